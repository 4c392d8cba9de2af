//! Shared test fixtures for the `game` submodule test suites.
//! This module exists to avoid repeating arena and enemy setup across many tests.
//! It does not own production gameplay logic.

use glam::Vec3;
use slotmap::SlotMap;

use super::Game;
use crate::config::SimConfig;
use crate::content::get_enemy_stats;
use crate::mapgen::Room;
use crate::state::{Enemy, FloorState, Grid, Item};
use crate::types::{BehaviorState, EnemyId, EnemyKind, ItemId, ItemKind, Pos, TileKind};

pub(super) const ARENA_EDGE: usize = 30;

/// Walled square with an all-floor interior.
pub(super) fn open_grid() -> Grid {
    let mut grid = Grid::new(ARENA_EDGE, ARENA_EDGE, 2.0);
    for y in 1..(ARENA_EDGE as i32 - 1) {
        for x in 1..(ARENA_EDGE as i32 - 1) {
            grid.set_tile(Pos { y, x }, TileKind::Floor);
        }
    }
    grid
}

pub(super) fn arena_center(grid: &Grid) -> Vec3 {
    let half = ARENA_EDGE as i32 / 2;
    grid.world_of(Pos { y: half, x: half })
}

/// A game on floor 1 whose floor is an empty arena: no enemies, no items,
/// stairs in a corner, player in the middle, no message showing.
pub(super) fn arena_game(seed: u64) -> Game {
    let mut game = Game::new(seed, SimConfig::default()).expect("default config generates");
    let grid = open_grid();
    let edge = ARENA_EDGE as i32;
    game.floor = FloorState {
        index: 1,
        explored: vec![false; grid.width * grid.height],
        rooms: vec![Room { x: 1, y: 1, width: edge - 2, height: edge - 2 }],
        stairs: Pos { y: 3, x: 3 },
        grid,
        enemies: SlotMap::with_key(),
        projectiles: SlotMap::with_key(),
        items: SlotMap::with_key(),
    };
    game.player.pos = arena_center(&game.floor.grid);
    game.message = None;
    game.log.clear();
    game
}

pub(super) fn enemy_at(kind: EnemyKind, pos: Vec3, floor: u32) -> Enemy {
    let stats = get_enemy_stats(kind, floor);
    Enemy {
        id: EnemyId::default(),
        kind,
        pos,
        hp: stats.hp,
        max_hp: stats.hp,
        radius: stats.radius,
        speed: stats.speed,
        damage: stats.damage,
        attack_range: stats.attack_range,
        attack_cooldown: 0.0,
        ranged_cooldown: stats.ranged_cooldown,
        knockback: Vec3::ZERO,
        state: BehaviorState::Idle,
        hurt_timer: 0.0,
        seen_player: false,
    }
}

pub(super) fn spawn_enemy(game: &mut Game, kind: EnemyKind, pos: Vec3) -> EnemyId {
    let template = enemy_at(kind, pos, game.floor.index);
    game.floor.enemies.insert_with_key(|id| Enemy { id, ..template })
}

pub(super) fn place_item(game: &mut Game, kind: ItemKind, cell: Pos) -> ItemId {
    game.floor.items.insert_with_key(|id| Item { id, kind, cell })
}
