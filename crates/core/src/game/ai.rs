//! Enemy behaviors as a closed enum keyed by archetype.
//! This module exists to turn one enemy and the player position into a movement step,
//! a melee strike or a projectile volley. It does not own damage application or arenas.

use std::f32::consts::PI;

use glam::{Vec3, vec3};

use crate::collision::{flat_direction, flat_distance, slide_move};
use crate::state::{Enemy, Grid};
use crate::types::{BehaviorState, EnemyKind};

pub const DETECTION_RANGE: f32 = 14.0;
pub const HURT_DURATION: f32 = 0.2;
const KNOCKBACK_FLOOR: f32 = 0.5;
const KNOCKBACK_DECAY: f32 = 0.85;

const FIREBALL_LIFT: f32 = 1.3;
const FIREBALL_AIM_LIFT: f32 = 0.8;
const BOLT_LIFT: f32 = 1.5;
const BOLT_SPREAD: [f32; 3] = [-0.3, 0.0, 0.3];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Volley {
    /// One fireball aimed at the player's chest.
    Fireball,
    /// Three horizontal bolts fanned around the bearing to the player.
    BoltFan,
}

impl Volley {
    fn speed(self) -> f32 {
        match self {
            Volley::Fireball => 10.0,
            Volley::BoltFan => 9.0,
        }
    }

    fn life(self) -> f32 {
        match self {
            Volley::Fireball => 4.0,
            Volley::BoltFan => 3.5,
        }
    }

    fn rearm(self, floor: u32) -> f32 {
        let f = floor as f32;
        match self {
            Volley::Fireball => (2.5 - 0.1 * f).max(1.2),
            Volley::BoltFan => (3.0 - 0.1 * f).max(1.5),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Behavior {
    /// Close the distance, then strike on a fixed rearm.
    Melee { rearm: f32 },
    /// Hold a band of distance and fire volleys from it.
    Kite { retreat_below: f32, advance_above: f32, fire_below: f32, volley: Volley },
}

pub fn behavior_for(kind: EnemyKind) -> Behavior {
    match kind {
        EnemyKind::Slime => Behavior::Melee { rearm: 1.0 },
        EnemyKind::Skeleton => Behavior::Melee { rearm: 0.8 },
        EnemyKind::Bat => Behavior::Melee { rearm: 0.7 },
        EnemyKind::Knight => Behavior::Melee { rearm: 0.6 },
        EnemyKind::Mage => Behavior::Kite {
            retreat_below: 5.0,
            advance_above: 14.0,
            fire_below: 15.0,
            volley: Volley::Fireball,
        },
        EnemyKind::Demon => Behavior::Kite {
            retreat_below: 6.0,
            advance_above: 16.0,
            fire_below: 16.0,
            volley: Volley::BoltFan,
        },
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSpawn {
    pub pos: Vec3,
    pub vel: Vec3,
    pub life: f32,
    pub damage: i32,
}

/// What an enemy wants this frame. Applying it is the caller's job.
#[derive(Clone, Debug, PartialEq)]
pub struct BehaviorOutcome {
    pub pos: Vec3,
    pub attack_cooldown: f32,
    pub ranged_cooldown: f32,
    pub state: BehaviorState,
    pub strike: Option<i32>,
    pub volley: Vec<ProjectileSpawn>,
}

/// Pure decision for an enemy that has already detected the player and is not hurt.
pub fn decide(
    enemy: &Enemy,
    player_pos: Vec3,
    grid: &Grid,
    floor: u32,
    dt: f32,
) -> BehaviorOutcome {
    let dist = flat_distance(enemy.pos, player_pos);
    let toward = flat_direction(enemy.pos, player_pos);
    let mut outcome = BehaviorOutcome {
        pos: enemy.pos,
        attack_cooldown: enemy.attack_cooldown,
        ranged_cooldown: enemy.ranged_cooldown,
        state: BehaviorState::Chase,
        strike: None,
        volley: Vec::new(),
    };

    match behavior_for(enemy.kind) {
        Behavior::Melee { rearm } => {
            if dist > enemy.attack_range {
                outcome.pos = slide_move(grid, enemy.pos, toward * enemy.speed * dt);
            } else {
                outcome.state = BehaviorState::Attack;
                if enemy.attack_cooldown <= 0.0 {
                    outcome.strike = Some(enemy.damage);
                    outcome.attack_cooldown = rearm;
                }
            }
        }
        Behavior::Kite { retreat_below, advance_above, fire_below, volley } => {
            if dist < retreat_below {
                outcome.pos = slide_move(grid, enemy.pos, -toward * enemy.speed * dt);
            } else if dist > advance_above {
                outcome.pos = slide_move(grid, enemy.pos, toward * enemy.speed * dt);
            }

            outcome.ranged_cooldown -= dt;
            if dist < fire_below {
                outcome.state = BehaviorState::Attack;
                if outcome.ranged_cooldown <= 0.0 {
                    outcome.volley = fire(volley, enemy, player_pos);
                    outcome.ranged_cooldown = volley.rearm(floor);
                }
            }
        }
    }
    outcome
}

fn fire(volley: Volley, enemy: &Enemy, player_pos: Vec3) -> Vec<ProjectileSpawn> {
    let speed = volley.speed();
    match volley {
        Volley::Fireball => {
            let origin = enemy.pos + vec3(0.0, FIREBALL_LIFT, 0.0);
            let target = player_pos + vec3(0.0, FIREBALL_AIM_LIFT, 0.0);
            let aim = (target - origin).try_normalize().unwrap_or(Vec3::NEG_Z);
            vec![ProjectileSpawn {
                pos: origin,
                vel: aim * speed,
                life: volley.life(),
                damage: enemy.damage,
            }]
        }
        Volley::BoltFan => {
            let origin = enemy.pos + vec3(0.0, BOLT_LIFT, 0.0);
            let toward = flat_direction(enemy.pos, player_pos);
            let bearing = toward.x.atan2(toward.z);
            BOLT_SPREAD
                .iter()
                .map(|offset| {
                    let angle = bearing + offset;
                    ProjectileSpawn {
                        pos: origin,
                        vel: vec3(angle.sin(), 0.0, angle.cos()) * speed,
                        life: volley.life(),
                        damage: enemy.damage,
                    }
                })
                .collect()
        }
    }
}

/// Per-frame enemy update: cooldowns, knockback, hurt recovery, detection, then `decide`.
/// Returns the strike and volley the enemy produced, if any.
pub(super) fn step_enemy(
    enemy: &mut Enemy,
    player_pos: Vec3,
    grid: &Grid,
    floor: u32,
    dt: f32,
) -> (Option<i32>, Vec<ProjectileSpawn>) {
    enemy.attack_cooldown = (enemy.attack_cooldown - dt).max(0.0);

    if enemy.knockback.length() > KNOCKBACK_FLOOR {
        enemy.pos = slide_move(grid, enemy.pos, enemy.knockback * dt);
        enemy.knockback *= KNOCKBACK_DECAY;
    } else {
        enemy.knockback = Vec3::ZERO;
    }

    if enemy.state == BehaviorState::Hurt {
        enemy.hurt_timer -= dt;
        if enemy.hurt_timer <= 0.0 {
            enemy.hurt_timer = 0.0;
            enemy.state = BehaviorState::Chase;
        }
        return (None, Vec::new());
    }

    if !enemy.seen_player {
        if flat_distance(enemy.pos, player_pos) < DETECTION_RANGE {
            enemy.seen_player = true;
        } else {
            enemy.state = BehaviorState::Idle;
            return (None, Vec::new());
        }
    }

    let outcome = decide(enemy, player_pos, grid, floor, dt);
    enemy.pos = outcome.pos;
    enemy.attack_cooldown = outcome.attack_cooldown;
    enemy.ranged_cooldown = outcome.ranged_cooldown;
    enemy.state = outcome.state;
    (outcome.strike, outcome.volley)
}

/// Yaw that turns an entity at `from` to face `to`, in the player's yaw convention.
pub(super) fn facing_yaw(from: Vec3, to: Vec3) -> f32 {
    let dx = to.x - from.x;
    let dz = to.z - from.z;
    if dx.abs() < 1e-6 && dz.abs() < 1e-6 {
        return 0.0;
    }
    (-dx).atan2(-dz).rem_euclid(2.0 * PI)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_support::*;

    #[test]
    fn melee_enemy_advances_until_in_range() {
        let grid = open_grid();
        let player = arena_center(&grid);
        let enemy = enemy_at(EnemyKind::Skeleton, player + vec3(6.0, 0.0, 0.0), 1);

        let outcome = decide(&enemy, player, &grid, 1, 0.1);
        assert_eq!(outcome.state, BehaviorState::Chase);
        assert!(outcome.pos.x < enemy.pos.x);
        assert!(outcome.strike.is_none());
    }

    #[test]
    fn melee_enemy_strikes_and_rearms_in_range() {
        let grid = open_grid();
        let player = arena_center(&grid);
        let enemy = enemy_at(EnemyKind::Knight, player + vec3(1.0, 0.0, 0.0), 1);

        let outcome = decide(&enemy, player, &grid, 1, 0.016);
        assert_eq!(outcome.state, BehaviorState::Attack);
        assert_eq!(outcome.strike, Some(enemy.damage));
        assert!((outcome.attack_cooldown - 0.6).abs() < 1e-6);
        assert_eq!(outcome.pos, enemy.pos);
    }

    #[test]
    fn mage_retreats_when_crowded_and_fires_one_fireball() {
        let grid = open_grid();
        let player = arena_center(&grid);
        let mut enemy = enemy_at(EnemyKind::Mage, player + vec3(3.0, 0.0, 0.0), 4);
        enemy.ranged_cooldown = 0.0;

        let outcome = decide(&enemy, player, &grid, 4, 0.1);
        assert!(outcome.pos.x > enemy.pos.x, "mage backs away below five units");
        assert_eq!(outcome.volley.len(), 1);
        let shot = outcome.volley[0];
        assert!((shot.vel.length() - 10.0).abs() < 1e-4);
        assert!((shot.pos.y - FIREBALL_LIFT).abs() < 1e-6);
        assert!((shot.life - 4.0).abs() < 1e-6);
        assert!((outcome.ranged_cooldown - 2.1).abs() < 1e-5);
    }

    #[test]
    fn demon_fans_three_horizontal_bolts() {
        let grid = open_grid();
        let player = arena_center(&grid);
        let mut enemy = enemy_at(EnemyKind::Demon, player + vec3(0.0, 0.0, 10.0), 20);
        enemy.ranged_cooldown = 0.0;

        let outcome = decide(&enemy, player, &grid, 20, 0.1);
        assert_eq!(outcome.volley.len(), 3);
        for bolt in &outcome.volley {
            assert_eq!(bolt.vel.y, 0.0);
            assert!((bolt.vel.length() - 9.0).abs() < 1e-4);
        }
        assert!(outcome.volley[1].vel.z < -8.9, "centre bolt heads straight at the player");
        assert!((outcome.ranged_cooldown - 1.5).abs() < 1e-6, "rearm floors at 1.5");
    }

    #[test]
    fn kiters_close_in_from_beyond_their_band_without_firing() {
        let grid = open_grid();
        let player = arena_center(&grid);
        for (kind, offset) in [(EnemyKind::Mage, 16.0), (EnemyKind::Demon, 20.0)] {
            let mut enemy = enemy_at(kind, player + vec3(offset, 0.0, 0.0), 3);
            enemy.ranged_cooldown = 0.5;

            let outcome = decide(&enemy, player, &grid, 3, 0.1);
            assert!(outcome.pos.x < enemy.pos.x, "{kind:?} advances from {offset}");
            assert!(outcome.volley.is_empty());
            assert_eq!(outcome.state, BehaviorState::Chase);
            assert!((outcome.ranged_cooldown - 0.4).abs() < 1e-6);
        }
    }

    #[test]
    fn demon_backs_off_inside_six_units() {
        let grid = open_grid();
        let player = arena_center(&grid);
        let mut enemy = enemy_at(EnemyKind::Demon, player + vec3(4.0, 0.0, 0.0), 5);
        enemy.ranged_cooldown = 1.0;

        let outcome = decide(&enemy, player, &grid, 5, 0.1);
        assert!(outcome.pos.x > enemy.pos.x);
        assert_eq!(outcome.state, BehaviorState::Attack);
        assert!(outcome.volley.is_empty(), "still rearming");
        assert!((outcome.ranged_cooldown - 0.9).abs() < 1e-6);
    }

    #[test]
    fn mage_holds_position_inside_its_band() {
        let grid = open_grid();
        let player = arena_center(&grid);
        let mut enemy = enemy_at(EnemyKind::Mage, player + vec3(10.0, 0.0, 0.0), 2);
        enemy.ranged_cooldown = 1.0;

        let waiting = decide(&enemy, player, &grid, 2, 0.1);
        assert_eq!(waiting.pos, enemy.pos);
        assert_eq!(waiting.state, BehaviorState::Attack);
        assert!(waiting.volley.is_empty());
        assert!((waiting.ranged_cooldown - 0.9).abs() < 1e-6);

        enemy.ranged_cooldown = 0.0;
        let firing = decide(&enemy, player, &grid, 2, 0.1);
        assert_eq!(firing.pos, enemy.pos);
        assert_eq!(firing.volley.len(), 1);
        assert!((firing.ranged_cooldown - 2.3).abs() < 1e-5);
    }

    #[test]
    fn volleys_need_the_target_strictly_inside_fire_range() {
        let grid = open_grid();
        let player = arena_center(&grid);
        for (kind, edge) in [(EnemyKind::Mage, 15.0), (EnemyKind::Demon, 16.0)] {
            let mut enemy = enemy_at(kind, player + vec3(0.0, 0.0, edge), 1);
            enemy.ranged_cooldown = 0.0;

            let outcome = decide(&enemy, player, &grid, 1, 0.1);
            assert!(outcome.volley.is_empty(), "{kind:?} holds fire at {edge}");
            assert_eq!(outcome.state, BehaviorState::Chase);
        }
    }

    #[test]
    fn hurt_enemy_does_not_move_except_knockback() {
        let grid = open_grid();
        let player = arena_center(&grid);
        let mut enemy = enemy_at(EnemyKind::Slime, player + vec3(4.0, 0.0, 0.0), 1);
        enemy.seen_player = true;
        enemy.state = BehaviorState::Hurt;
        enemy.hurt_timer = HURT_DURATION;

        let start = enemy.pos;
        let (strike, volley) = step_enemy(&mut enemy, player, &grid, 1, 0.06);
        assert!(strike.is_none() && volley.is_empty());
        assert_eq!(enemy.pos, start);
        assert_eq!(enemy.state, BehaviorState::Hurt);

        for _ in 0..3 {
            step_enemy(&mut enemy, player, &grid, 1, 0.06);
        }
        assert_eq!(enemy.state, BehaviorState::Chase, "hurt ends once its timer elapses");
        assert_eq!(enemy.pos, start);
    }

    #[test]
    fn knockback_decays_and_clears() {
        let grid = open_grid();
        let player = arena_center(&grid);
        let mut enemy = enemy_at(EnemyKind::Slime, player + vec3(2.0, 0.0, 0.0), 1);
        enemy.knockback = vec3(8.0, 0.0, 0.0);
        enemy.state = BehaviorState::Hurt;
        enemy.hurt_timer = HURT_DURATION;

        let start = enemy.pos;
        step_enemy(&mut enemy, player, &grid, 1, 0.016);
        assert!(enemy.pos.x > start.x);
        assert!((enemy.knockback.x - 8.0 * KNOCKBACK_DECAY).abs() < 1e-5);

        enemy.knockback = vec3(0.4, 0.0, 0.0);
        step_enemy(&mut enemy, player, &grid, 1, 0.016);
        assert_eq!(enemy.knockback, Vec3::ZERO);
    }

    #[test]
    fn undetected_enemy_idles_until_player_is_close() {
        let grid = open_grid();
        let player = arena_center(&grid);
        let mut enemy = enemy_at(EnemyKind::Bat, player + vec3(15.0, 0.0, 0.0), 2);

        step_enemy(&mut enemy, player, &grid, 2, 0.016);
        assert_eq!(enemy.state, BehaviorState::Idle);
        assert!(!enemy.seen_player);

        enemy.pos = player + vec3(10.0, 0.0, 0.0);
        step_enemy(&mut enemy, player, &grid, 2, 0.016);
        assert!(enemy.seen_player);
        assert_eq!(enemy.state, BehaviorState::Chase);
    }

    #[test]
    fn facing_yaw_matches_player_forward_convention() {
        let from = Vec3::ZERO;
        let yaw = facing_yaw(from, vec3(0.0, 0.0, -5.0));
        assert!(yaw.abs() < 1e-6 || (yaw - 2.0 * PI).abs() < 1e-6);
        let yaw = facing_yaw(from, vec3(0.0, 0.0, 5.0));
        assert!((yaw - PI).abs() < 1e-5);
    }
}
