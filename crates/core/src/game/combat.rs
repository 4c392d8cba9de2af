//! Player melee sweep and enemy turn resolution.
//! This module exists to apply hits, kills and enemy strikes against the session state.
//! It does not own enemy decision rules; those live in `ai`.

use std::f32::consts::PI;

use glam::Vec3;

use super::Game;
use super::ai::{HURT_DURATION, step_enemy};
use crate::collision::{flat_direction, flat_distance};
use crate::content::xp_for_kill;
use crate::state::Projectile;
use crate::types::{BehaviorState, EnemyId, LogEvent};

pub const ATTACK_RANGE: f32 = 2.8;
pub const ATTACK_ARC: f32 = 0.7 * PI;
pub const ATTACK_COOLDOWN: f32 = 0.35;
pub const KNOCKBACK: f32 = 8.0;
const HIT_SHAKE: f32 = 0.3;

/// True when `target` is within `reach` of `origin` on the ground plane and inside the
/// swing arc centred on `yaw`.
pub fn in_attack_arc(origin: Vec3, yaw: f32, target: Vec3, reach: f32) -> bool {
    if flat_distance(origin, target) > reach {
        return false;
    }
    let dx = target.x - origin.x;
    let dz = target.z - origin.z;
    let facing = yaw.sin().atan2(yaw.cos());
    let bearing = (-dx).atan2(-dz);
    let mut diff = facing - bearing;
    while diff > PI {
        diff -= 2.0 * PI;
    }
    while diff < -PI {
        diff += 2.0 * PI;
    }
    diff.abs() <= ATTACK_ARC / 2.0
}

impl Game {
    pub(super) fn player_attack(&mut self) {
        self.player.attack_cooldown = ATTACK_COOLDOWN / self.player.attack_mult;
        let reach = ATTACK_RANGE * self.player.range_mult;
        let origin = self.player.pos;
        let yaw = self.player.yaw;

        let targets: Vec<EnemyId> = self
            .floor
            .enemies
            .iter()
            .filter(|(_, enemy)| in_attack_arc(origin, yaw, enemy.pos, reach))
            .map(|(id, _)| id)
            .collect();
        if targets.is_empty() {
            return;
        }

        let mut killed = Vec::new();
        for id in targets {
            let damage = (self.player.damage + self.rng.int_in(-2, 3)).max(1);
            let Some(enemy) = self.floor.enemies.get_mut(id) else {
                continue;
            };
            enemy.hp -= damage;
            enemy.knockback =
                flat_direction(origin, enemy.pos) * KNOCKBACK * self.player.knockback_mult;
            enemy.state = BehaviorState::Hurt;
            enemy.hurt_timer = HURT_DURATION;
            self.log.push(LogEvent::EnemyHit { enemy: id, damage, pos: enemy.pos });
            if enemy.hp <= 0 {
                killed.push(id);
            }

            if self.player.lifesteal > 0.0 {
                self.player.heal((damage as f32 * self.player.lifesteal) as i32);
            }
        }

        for id in killed {
            let Some(enemy) = self.floor.enemies.remove(id) else {
                continue;
            };
            let xp = xp_for_kill(enemy.kind);
            self.player.xp += xp;
            self.stats.score += xp;
            self.stats.kills += 1;
            self.log.push(LogEvent::EnemyKilled {
                enemy: id,
                kind: enemy.kind,
                xp,
                pos: enemy.pos,
            });
        }

        self.shake = HIT_SHAKE;
        self.hit_pause = self.config.hit_pause;
    }

    pub(super) fn update_enemies(&mut self, dt: f32) {
        let player_pos = self.player.pos;
        let floor_index = self.floor.index;
        let ids: Vec<EnemyId> = self.floor.enemies.keys().collect();

        for id in ids {
            let Some(enemy) = self.floor.enemies.get_mut(id) else {
                continue;
            };
            let (strike, volley) = step_enemy(enemy, player_pos, &self.floor.grid, floor_index, dt);
            let from = enemy.pos;

            if let Some(damage) = strike {
                self.damage_player(damage, from);
            }
            for spawn in volley {
                let projectile = self.floor.projectiles.insert_with_key(|key| Projectile {
                    id: key,
                    pos: spawn.pos,
                    vel: spawn.vel,
                    life: spawn.life,
                    damage: spawn.damage,
                });
                self.log.push(LogEvent::ProjectileFired { projectile });
            }
        }
    }
}
