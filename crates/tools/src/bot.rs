//! Scripted player for headless runs.
//! Fights whatever is close, otherwise walks to the key and then to the stairs.
//! Always takes the first card on offer.

use std::collections::{HashMap, VecDeque};
use std::f32::consts::PI;

use game_core::collision::flat_distance;
use game_core::{FrameInput, Game, Grid, ItemKind, Pos, RunPhase, Vec2, Vec3, vec2};

/// Enemies closer than this are fought before anything else.
const ENGAGE_RANGE: f32 = 9.0;
const SWING_RANGE: f32 = 2.4;
const SWING_TOLERANCE: f32 = 0.6;
const STAIRS_REACH: f32 = 2.0;

fn wrap_angle(mut angle: f32) -> f32 {
    while angle > PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

fn yaw_toward(from: Vec3, to: Vec3) -> f32 {
    (-(to.x - from.x)).atan2(-(to.z - from.z))
}

/// First cell on a shortest 4-connected floor path from `from` to `to`.
/// Returns `to` itself when the two cells coincide and `None` when no path exists.
pub fn next_waypoint(grid: &Grid, from: Pos, to: Pos) -> Option<Pos> {
    if from == to {
        return Some(to);
    }
    let mut came_from: HashMap<Pos, Pos> = HashMap::from([(from, from)]);
    let mut frontier = VecDeque::from([from]);
    while let Some(cell) = frontier.pop_front() {
        if cell == to {
            break;
        }
        for (dy, dx) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
            let next = Pos { y: cell.y + dy, x: cell.x + dx };
            if grid.is_floor(next) && !came_from.contains_key(&next) {
                came_from.insert(next, cell);
                frontier.push_back(next);
            }
        }
    }

    let mut step = to;
    loop {
        let parent = *came_from.get(&step)?;
        if parent == from {
            return Some(step);
        }
        step = parent;
    }
}

/// World-plane direction that follows the floor path toward `target`.
fn steer(grid: &Grid, from: Vec3, target: Vec3) -> Vec2 {
    let from_cell = grid.cell_of(from.x, from.z);
    let target_cell = grid.cell_of(target.x, target.z);
    let aim = match next_waypoint(grid, from_cell, target_cell) {
        Some(cell) if cell == target_cell => target,
        Some(cell) => grid.world_of(cell),
        None => return Vec2::ZERO,
    };
    vec2(aim.x - from.x, aim.z - from.z)
}

pub fn decide(game: &Game) -> FrameInput {
    if game.phase() == RunPhase::Upgrading {
        return FrameInput { card_choice: Some(0), ..FrameInput::default() };
    }
    let player = game.player();
    let floor = game.floor();

    let nearest = floor
        .enemies
        .values()
        .map(|enemy| (flat_distance(enemy.pos, player.pos), enemy.pos))
        .filter(|(distance, _)| *distance < ENGAGE_RANGE)
        .min_by(|a, b| a.0.total_cmp(&b.0));
    if let Some((distance, enemy_pos)) = nearest {
        let turn = wrap_angle(yaw_toward(player.pos, enemy_pos) - player.yaw);
        return FrameInput {
            move_intent: if distance > SWING_RANGE * 0.8 {
                steer(&floor.grid, player.pos, enemy_pos)
            } else {
                Vec2::ZERO
            },
            look: vec2(turn, 0.0),
            attack: distance < SWING_RANGE && turn.abs() < SWING_TOLERANCE,
            ..FrameInput::default()
        };
    }

    let key_cell =
        floor.items.values().find(|item| item.kind == ItemKind::Key).map(|item| item.cell);
    let goal = match key_cell {
        Some(cell) if !player.has_key => floor.grid.world_of(cell),
        _ => floor.grid.world_of(floor.stairs),
    };
    let heading = steer(&floor.grid, player.pos, goal);
    let turn = if heading == Vec2::ZERO {
        0.0
    } else {
        let ahead = player.pos + Vec3::new(heading.x, 0.0, heading.y);
        wrap_angle(yaw_toward(player.pos, ahead) - player.yaw)
    };
    FrameInput {
        move_intent: heading,
        look: vec2(turn * 0.2, 0.0),
        interact: player.has_key && flat_distance(player.pos, goal) < STAIRS_REACH,
        ..FrameInput::default()
    }
}
