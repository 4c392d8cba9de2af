//! Read-only views for a renderer: HUD numbers, the transient message and entity poses.
//! This module exists so collaborators never reach into session internals to draw a frame.
//! It does not own any gameplay rule.

use glam::Vec3;
use serde::Serialize;

use super::Game;
use super::ai::facing_yaw;
use super::progression::xp_to_level;
use crate::types::{EnemyId, EnemyKind, ItemId, ItemKind, ProjectileId, RunPhase};

pub const FLOOR_MESSAGE_SECS: f32 = 1.5;
pub const KEY_MESSAGE_SECS: f32 = 1.5;
pub const POTION_MESSAGE_SECS: f32 = 1.0;
pub const LOCKED_STAIRS_MESSAGE_SECS: f32 = 1.0;
pub const CARD_MESSAGE_SECS: f32 = 1.2;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HudMessage {
    pub text: String,
    pub remaining: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HudSnapshot {
    pub phase: RunPhase,
    pub hp: i32,
    pub max_hp: i32,
    pub shield: i32,
    pub xp: u32,
    pub xp_to_next: u32,
    pub level: u32,
    pub floor: u32,
    pub kills: u32,
    pub score: u32,
    pub has_key: bool,
    pub weapon: &'static str,
    pub message: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityHandle {
    Player,
    Enemy(EnemyId),
    Projectile(ProjectileId),
    Item(ItemId),
    Stairs,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PoseKind {
    Player,
    Enemy(EnemyKind),
    Projectile,
    Item(ItemKind),
    Stairs,
}

/// Where to place one renderable proxy this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntityPose {
    pub handle: EntityHandle,
    pub kind: PoseKind,
    pub pos: Vec3,
    pub yaw: f32,
    /// Enemy health in `[0, 1]`; `None` for entities without health bars.
    pub health_fraction: Option<f32>,
}

impl Game {
    pub(super) fn show_message(&mut self, text: impl Into<String>, secs: f32) {
        self.message = Some(HudMessage { text: text.into(), remaining: secs });
    }

    pub(super) fn tick_message(&mut self, dt: f32) {
        let Some(message) = self.message.as_mut() else {
            return;
        };
        message.remaining -= dt;
        if message.remaining <= 0.0 {
            self.message = None;
        }
    }

    pub fn message(&self) -> Option<&HudMessage> {
        self.message.as_ref()
    }

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot {
            phase: self.phase,
            hp: self.player.hp,
            max_hp: self.player.max_hp,
            shield: self.player.shield,
            xp: self.player.xp,
            xp_to_next: xp_to_level(self.player.level),
            level: self.player.level,
            floor: self.floor.index,
            kills: self.stats.kills,
            score: self.stats.score,
            has_key: self.player.has_key,
            weapon: self.player.weapon.display_name(),
            message: self.message.as_ref().map(|message| message.text.clone()),
        }
    }

    /// Poses for every live entity. Enemies turn to face the player.
    pub fn poses(&self) -> Vec<EntityPose> {
        let player_pos = self.player.pos;
        let mut poses = Vec::with_capacity(
            2 + self.floor.enemies.len() + self.floor.projectiles.len() + self.floor.items.len(),
        );
        poses.push(EntityPose {
            handle: EntityHandle::Player,
            kind: PoseKind::Player,
            pos: player_pos,
            yaw: self.player.yaw,
            health_fraction: None,
        });
        for (id, enemy) in &self.floor.enemies {
            poses.push(EntityPose {
                handle: EntityHandle::Enemy(id),
                kind: PoseKind::Enemy(enemy.kind),
                pos: enemy.pos,
                yaw: facing_yaw(enemy.pos, player_pos),
                health_fraction: Some((enemy.hp.max(0) as f32 / enemy.max_hp as f32).min(1.0)),
            });
        }
        for (id, projectile) in &self.floor.projectiles {
            poses.push(EntityPose {
                handle: EntityHandle::Projectile(id),
                kind: PoseKind::Projectile,
                pos: projectile.pos,
                yaw: 0.0,
                health_fraction: None,
            });
        }
        for (id, item) in &self.floor.items {
            poses.push(EntityPose {
                handle: EntityHandle::Item(id),
                kind: PoseKind::Item(item.kind),
                pos: self.floor.grid.world_of(item.cell),
                yaw: 0.0,
                health_fraction: None,
            });
        }
        poses.push(EntityPose {
            handle: EntityHandle::Stairs,
            kind: PoseKind::Stairs,
            pos: self.floor.grid.world_of(self.floor.stairs),
            yaw: 0.0,
            health_fraction: None,
        });
        poses
    }
}
