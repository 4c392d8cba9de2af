//! Run session orchestration and the fixed per-frame update order.
//! This module exists to own the `Game` session and sequence its subsystems each frame.
//! It does not own floor generation, enemy decisions, or card effects.

use std::mem;

use glam::Vec3;
use tracing::info;

use crate::config::SimConfig;
use crate::mapgen::GenerationError;
use crate::rng::SimRng;
use crate::state::{FloorState, PlayerState};
use crate::types::*;

mod ai;
mod combat;
mod floor_transition;
mod hash;
mod hud;
mod pickups;
mod player;
mod progression;
mod projectiles;

#[cfg(test)]
mod test_support;

pub use ai::{Behavior, BehaviorOutcome, ProjectileSpawn, Volley, behavior_for, decide};
pub use combat::in_attack_arc;
pub use hud::{EntityHandle, EntityPose, HudMessage, HudSnapshot, PoseKind};
pub use player::DamageTaken;
pub use progression::{CardOffer, apply_card, xp_to_level};
pub use projectiles::advance_projectile;

pub const STARTING_FLOOR: u32 = 1;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    pub score: u32,
    pub kills: u32,
}

/// One run: the player outlives floors, the floor state is swapped on each descent.
pub struct Game {
    config: SimConfig,
    rng: SimRng,
    phase: RunPhase,
    player: PlayerState,
    floor: FloorState,
    stats: RunStats,
    offer: Option<CardOffer>,
    // Descent requested at the stairs while a card choice was open.
    pending_descent: bool,
    hit_pause: f32,
    shake: f32,
    message: Option<HudMessage>,
    log: Vec<LogEvent>,
}

impl Game {
    pub fn new(seed: u64, config: SimConfig) -> Result<Self, GenerationError> {
        let mut rng = SimRng::seed_from_u64(seed);
        let floor = floor_transition::build_floor(&config, STARTING_FLOOR, &mut rng)?;
        let mut game = Self {
            config,
            rng,
            phase: RunPhase::Playing,
            player: PlayerState::default(),
            floor,
            stats: RunStats::default(),
            offer: None,
            pending_descent: false,
            hit_pause: 0.0,
            shake: 0.0,
            message: None,
            log: Vec::new(),
        };
        game.install_player_on_floor();
        info!(seed, "run started");
        Ok(game)
    }

    /// Resets the player and progress and regenerates the first floor.
    pub fn restart(&mut self) -> Result<(), GenerationError> {
        let floor = floor_transition::build_floor(&self.config, STARTING_FLOOR, &mut self.rng)?;
        self.phase = RunPhase::Playing;
        self.player = PlayerState::default();
        self.stats = RunStats::default();
        self.offer = None;
        self.pending_descent = false;
        self.hit_pause = 0.0;
        self.shake = 0.0;
        self.log.clear();
        self.floor = floor;
        self.install_player_on_floor();
        info!("run restarted");
        Ok(())
    }

    /// Advances the simulation by one rendered frame.
    pub fn step(&mut self, dt: f32, input: &FrameInput) -> StepResult {
        if dt > self.config.max_frame_dt {
            return StepResult::Skipped(FrameSkip::DeltaTooLarge);
        }
        if self.hit_pause > 0.0 {
            self.hit_pause -= dt;
            return StepResult::Skipped(FrameSkip::HitPause);
        }
        self.tick_message(dt);

        match self.phase {
            RunPhase::Playing => self.update_playing(dt, input),
            RunPhase::Upgrading => {
                if let Some(index) = input.card_choice {
                    self.choose_card(index);
                }
            }
            RunPhase::Dead => {}
        }
        StepResult::Simulated
    }

    fn update_playing(&mut self, dt: f32, input: &FrameInput) {
        self.player.apply_look(input.look);
        self.player.update_movement(&self.floor.grid, input.move_intent, input.dash, dt);
        let player_cell = self.floor.grid.cell_of(self.player.pos.x, self.player.pos.z);
        self.floor.reveal_around(player_cell, self.config.explore_radius);

        self.player.attack_cooldown -= dt;
        if input.attack && self.player.attack_cooldown <= 0.0 {
            self.player_attack();
            self.check_level_up();
        }

        self.player.tick_invulnerability(dt);
        self.player.apply_regen(dt);
        self.decay_shake();

        self.update_enemies(dt);
        self.update_projectiles(dt);
        if self.phase == RunPhase::Dead {
            return;
        }
        self.check_items();
        self.check_stairs(input.interact);
    }

    fn decay_shake(&mut self) {
        if self.shake > 0.01 {
            self.shake *= 0.85;
        } else {
            self.shake = 0.0;
        }
    }

    pub(crate) fn damage_player(&mut self, amount: i32, from: Vec3) {
        let Some(taken) = self.player.take_damage(amount) else {
            return;
        };
        self.shake = 0.8;
        self.log.push(LogEvent::PlayerDamaged {
            amount: taken.dealt,
            absorbed: taken.absorbed,
            from,
        });
        if taken.died {
            self.phase = RunPhase::Dead;
            self.offer = None;
            self.pending_descent = false;
            info!(
                floor = self.floor.index,
                level = self.player.level,
                kills = self.stats.kills,
                "player died"
            );
            self.log.push(LogEvent::PlayerDied {
                floor: self.floor.index,
                level: self.player.level,
                kills: self.stats.kills,
            });
        }
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn floor(&self) -> &FloorState {
        &self.floor
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn offer(&self) -> Option<&CardOffer> {
        self.offer.as_ref()
    }

    pub fn descent_pending(&self) -> bool {
        self.pending_descent
    }

    pub fn screen_shake(&self) -> f32 {
        self.shake
    }

    pub fn log(&self) -> &[LogEvent] {
        &self.log
    }

    pub fn drain_log(&mut self) -> Vec<LogEvent> {
        mem::take(&mut self.log)
    }
}

#[cfg(test)]
mod tests {
    use glam::{Vec2, vec3};

    use super::test_support::*;
    use super::*;

    #[test]
    fn oversized_delta_drops_the_frame() {
        let mut game = arena_game(1);
        let before = game.player.pos;
        let input = FrameInput { move_intent: Vec2::X, ..FrameInput::default() };
        assert_eq!(game.step(0.25, &input), StepResult::Skipped(FrameSkip::DeltaTooLarge));
        assert_eq!(game.player.pos, before);
    }

    #[test]
    fn hit_pause_suspends_simulation_until_elapsed() {
        let mut game = arena_game(1);
        game.hit_pause = 0.04;
        let before = game.player.pos;
        let input = FrameInput { move_intent: Vec2::X, ..FrameInput::default() };

        assert_eq!(game.step(0.03, &input), StepResult::Skipped(FrameSkip::HitPause));
        assert_eq!(game.step(0.03, &input), StepResult::Skipped(FrameSkip::HitPause));
        assert_eq!(game.player.pos, before);
        assert_eq!(game.step(0.03, &input), StepResult::Simulated);
        assert!(game.player.pos.x > before.x);
    }

    #[test]
    fn dead_run_ignores_input() {
        let mut game = arena_game(1);
        game.player.shield = 0;
        game.damage_player(1_000, vec3(0.0, 0.0, 0.0));
        assert_eq!(game.phase, RunPhase::Dead);
        assert_eq!(game.player.hp, 0);

        let before = game.player.pos;
        let input = FrameInput { move_intent: Vec2::X, attack: true, ..FrameInput::default() };
        assert_eq!(game.step(0.016, &input), StepResult::Simulated);
        assert_eq!(game.player.pos, before);
    }

    #[test]
    fn restart_resets_player_and_progress() {
        let mut game = Game::new(99, SimConfig::default()).expect("game");
        game.player.level = 4;
        game.player.hp = 3;
        game.stats.kills = 12;
        game.phase = RunPhase::Dead;

        game.restart().expect("restart");
        assert_eq!(game.phase, RunPhase::Playing);
        assert_eq!(game.player.level, 1);
        assert_eq!(game.player.hp, game.player.max_hp);
        assert_eq!(game.stats, RunStats::default());
        assert_eq!(game.floor.index, STARTING_FLOOR);
    }
}
