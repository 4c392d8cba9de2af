use glam::Vec3;

use super::Game;
use crate::collision::{can_walk, flat_distance};
use crate::state::{Grid, Projectile};
use crate::types::{LogEvent, ProjectileEnd, ProjectileId};

pub const PLAYER_HIT_RADIUS: f32 = 1.0;

/// Moves one projectile and reports why it should be removed, if it should.
/// Checks run in order: player contact, wall, then lifetime.
pub fn advance_projectile(
    projectile: &mut Projectile,
    player_pos: Vec3,
    player_hittable: bool,
    grid: &Grid,
    dt: f32,
) -> Option<ProjectileEnd> {
    projectile.life -= dt;
    projectile.pos += projectile.vel * dt;

    if player_hittable && flat_distance(projectile.pos, player_pos) < PLAYER_HIT_RADIUS {
        return Some(ProjectileEnd::HitPlayer);
    }
    if !can_walk(grid, projectile.pos.x, projectile.pos.z) {
        return Some(ProjectileEnd::Wall);
    }
    if projectile.life <= 0.0 {
        return Some(ProjectileEnd::Expired);
    }
    None
}

impl Game {
    pub(super) fn update_projectiles(&mut self, dt: f32) {
        let ids: Vec<ProjectileId> = self.floor.projectiles.keys().collect();
        let mut finished = Vec::new();

        for id in ids {
            let hittable = self.player.invulnerable <= 0.0 && !self.player.is_dead();
            let Some(projectile) = self.floor.projectiles.get_mut(id) else {
                continue;
            };
            let Some(end) =
                advance_projectile(projectile, self.player.pos, hittable, &self.floor.grid, dt)
            else {
                continue;
            };
            if end == ProjectileEnd::HitPlayer {
                let (damage, from) = (projectile.damage, projectile.pos);
                self.damage_player(damage, from);
            }
            finished.push((id, end));
        }

        for (id, reason) in finished {
            if self.floor.projectiles.remove(id).is_some() {
                self.log.push(LogEvent::ProjectileRemoved { projectile: id, reason });
            }
        }
    }
}
