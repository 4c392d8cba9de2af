//! Player controller: look, walking, dashing and damage intake.
//! This module exists to keep per-frame player kinematics in one place.
//! It does not own melee resolution or the run phase transition on death.

use glam::{Vec2, Vec3, vec3};

use crate::collision::slide_move;
use crate::state::{Grid, PlayerState};

pub const PITCH_LIMIT: f32 = 1.3;
pub const MOVE_SPEED: f32 = 9.0;
pub const DASH_DURATION: f32 = 0.18;
pub const DASH_COOLDOWN: f32 = 0.55;
pub const DASH_SPEED: f32 = 28.0;
pub const DASH_INVULNERABILITY: f32 = 0.1;
pub const DAMAGE_INVULNERABILITY: f32 = 0.6;

/// How one accepted hit was split between shield and health.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageTaken {
    pub absorbed: i32,
    pub dealt: i32,
    pub died: bool,
}

impl PlayerState {
    pub(super) fn apply_look(&mut self, look: Vec2) {
        self.yaw += look.x;
        self.pitch = (self.pitch + look.y).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    pub(super) fn update_movement(&mut self, grid: &Grid, intent: Vec2, dash: bool, dt: f32) {
        let direction = if intent.length_squared() > 1e-6 {
            let unit = intent.normalize();
            vec3(unit.x, 0.0, unit.y)
        } else {
            Vec3::ZERO
        };

        self.dash_cooldown -= dt;
        if dash && self.dash_cooldown <= 0.0 {
            self.dash_timer = DASH_DURATION;
            self.dash_cooldown = DASH_COOLDOWN;
            self.dash_dir = if direction == Vec3::ZERO { self.forward() } else { direction };
        }

        let velocity = if self.dash_timer > 0.0 {
            self.dash_timer -= dt;
            self.invulnerable = self.invulnerable.max(DASH_INVULNERABILITY);
            self.dash_dir * DASH_SPEED
        } else {
            direction * MOVE_SPEED * self.speed_mult
        };

        if velocity != Vec3::ZERO {
            self.pos = slide_move(grid, self.pos, velocity * dt);
        }
    }

    /// Applies a hit. Returns `None` while invulnerable or already dead.
    pub(super) fn take_damage(&mut self, amount: i32) -> Option<DamageTaken> {
        if self.invulnerable > 0.0 || self.is_dead() {
            return None;
        }
        let amount = amount.max(0);
        let absorbed = amount.min(self.shield);
        self.shield -= absorbed;
        let dealt = amount - absorbed;
        self.hp -= dealt;
        self.invulnerable = DAMAGE_INVULNERABILITY;

        let died = self.hp <= 0;
        if died {
            self.hp = 0;
        }
        Some(DamageTaken { absorbed, dealt, died })
    }

    pub(super) fn tick_invulnerability(&mut self, dt: f32) {
        if self.invulnerable > 0.0 {
            self.invulnerable = (self.invulnerable - dt).max(0.0);
        }
    }

    /// Accumulates fractional regeneration and heals whole points only.
    pub(super) fn apply_regen(&mut self, dt: f32) {
        if self.regen <= 0.0 {
            return;
        }
        self.regen_accum += self.regen * dt;
        if self.regen_accum >= 1.0 {
            let whole = self.regen_accum.floor();
            self.heal(whole as i32);
            self.regen_accum -= whole;
        }
    }
}
