//! Floor-change mechanics and generated floor state installation.
//! This module exists to isolate descent rules and the hard reset of floor-scoped entities.
//! It does not own room carving or placement; those live in `mapgen`.

use glam::Vec3;
use slotmap::SlotMap;
use tracing::{debug, error};

use super::Game;
use super::hud::{FLOOR_MESSAGE_SECS, LOCKED_STAIRS_MESSAGE_SECS};
use crate::collision::flat_distance;
use crate::config::SimConfig;
use crate::content::get_enemy_stats;
use crate::mapgen::{GenerationError, generate_floor};
use crate::rng::SimRng;
use crate::state::{Enemy, FloorState, Item};
use crate::types::{BehaviorState, ItemKind, LogEvent, RunPhase};

pub const STAIRS_RADIUS: f32 = 2.5;

/// Generates floor `index` and materializes its spawns into fresh arenas.
pub(super) fn build_floor(
    config: &SimConfig,
    index: u32,
    rng: &mut SimRng,
) -> Result<FloorState, GenerationError> {
    let generated = generate_floor(config, index, rng)?;
    let grid = generated.grid;

    let mut enemies = SlotMap::with_key();
    for spawn in &generated.enemy_spawns {
        let stats = get_enemy_stats(spawn.kind, index);
        let pos = grid.world_of(spawn.cell);
        enemies.insert_with_key(|id| Enemy {
            id,
            kind: spawn.kind,
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
        });
    }

    let mut items = SlotMap::with_key();
    for &cell in &generated.potions {
        items.insert_with_key(|id| Item { id, kind: ItemKind::Potion, cell });
    }
    items.insert_with_key(|id| Item { id, kind: ItemKind::Key, cell: generated.key });

    Ok(FloorState {
        index,
        explored: vec![false; grid.width * grid.height],
        grid,
        rooms: generated.rooms,
        stairs: generated.stairs,
        enemies,
        projectiles: SlotMap::with_key(),
        items,
    })
}

impl Game {
    /// Puts the player on the spawn cell of the freshly installed floor.
    pub(super) fn install_player_on_floor(&mut self) {
        let spawn = self.floor.rooms.first().map(|room| room.center()).unwrap_or(self.floor.stairs);
        self.player.pos = self.floor.grid.world_of(spawn);
        self.player.has_key = false;
        self.player.dash_timer = 0.0;
        self.player.invulnerable = 0.0;
        self.player.attack_cooldown = 0.0;
        self.floor.reveal_around(spawn, self.config.explore_radius);

        let index = self.floor.index;
        self.show_message(format!("FLOOR {index}"), FLOOR_MESSAGE_SECS);
        self.log.push(LogEvent::FloorEntered {
            floor: index,
            rooms: self.floor.rooms.len(),
            enemies: self.floor.enemies.len(),
        });
    }

    /// Replaces every floor-scoped entity with a newly generated floor.
    /// On generation failure the current floor stays in place.
    pub(super) fn enter_floor(&mut self, index: u32) {
        match build_floor(&self.config, index, &mut self.rng) {
            Ok(floor) => {
                self.floor = floor;
                self.install_player_on_floor();
            }
            Err(err) => {
                error!(floor = index, %err, "floor generation failed; staying on current floor");
            }
        }
    }

    pub(super) fn check_stairs(&mut self, interact: bool) {
        let stairs = self.floor.grid.world_of(self.floor.stairs);
        if flat_distance(self.player.pos, stairs) >= STAIRS_RADIUS {
            return;
        }
        if !self.player.has_key {
            if self.message.is_none() {
                self.show_message("FIND THE KEY", LOCKED_STAIRS_MESSAGE_SECS);
            }
            return;
        }
        if !interact || self.pending_descent {
            return;
        }

        self.check_level_up();
        if self.phase == RunPhase::Upgrading {
            debug!(floor = self.floor.index + 1, "descent deferred until a card is chosen");
            self.pending_descent = true;
            return;
        }
        self.enter_floor(self.floor.index + 1);
    }
}
