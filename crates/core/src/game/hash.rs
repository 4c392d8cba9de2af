//! Stable snapshot hashing for same-seed regression checks.
//! This module exists to keep hashing concerns separate from simulation control code.
//! It does not own floor fingerprints; those live with `GeneratedFloor`.

use std::hash::Hasher;

use glam::Vec3;
use xxhash_rust::xxh3::Xxh3;

use super::Game;
use crate::types::{BehaviorState, RunPhase};

fn write_vec3(hasher: &mut Xxh3, value: Vec3) {
    hasher.write_u32(value.x.to_bits());
    hasher.write_u32(value.y.to_bits());
    hasher.write_u32(value.z.to_bits());
}

impl Game {
    /// Hash of the simulation-relevant session state. Two sessions fed the same seed,
    /// frame deltas and inputs produce the same value.
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u8(match self.phase {
            RunPhase::Playing => 0,
            RunPhase::Upgrading => 1,
            RunPhase::Dead => 2,
        });
        hasher.write_u32(self.floor.index);
        hasher.write_u32(self.stats.score);
        hasher.write_u32(self.stats.kills);

        let player = &self.player;
        write_vec3(&mut hasher, player.pos);
        hasher.write_i32(player.hp);
        hasher.write_i32(player.max_hp);
        hasher.write_i32(player.shield);
        hasher.write_i32(player.damage);
        hasher.write_u32(player.xp);
        hasher.write_u32(player.level);
        hasher.write_u8(u8::from(player.has_key));

        for enemy in self.floor.enemies.values() {
            hasher.write_u8(enemy.kind.index() as u8);
            write_vec3(&mut hasher, enemy.pos);
            hasher.write_i32(enemy.hp);
            hasher.write_u8(match enemy.state {
                BehaviorState::Idle => 0,
                BehaviorState::Chase => 1,
                BehaviorState::Attack => 2,
                BehaviorState::Hurt => 3,
            });
        }
        for projectile in self.floor.projectiles.values() {
            write_vec3(&mut hasher, projectile.pos);
        }
        hasher.write_usize(self.floor.items.len());
        if let Some(offer) = self.offer {
            hasher.write(&offer.card_ids);
        }
        hasher.finish()
    }
}
