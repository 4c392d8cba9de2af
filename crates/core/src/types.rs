use glam::{Vec2, Vec3};
use serde::Serialize;
use slotmap::new_key_type;

new_key_type! {
    pub struct EnemyId;
    pub struct ProjectileId;
    pub struct ItemId;
}

/// Grid cell coordinate. `y` is the row, which maps to the world z axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum TileKind {
    Wall,
    Floor,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum EnemyKind {
    Slime,
    Skeleton,
    Bat,
    Mage,
    Knight,
    Demon,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 6] = [
        EnemyKind::Slime,
        EnemyKind::Skeleton,
        EnemyKind::Bat,
        EnemyKind::Mage,
        EnemyKind::Knight,
        EnemyKind::Demon,
    ];

    pub fn index(self) -> usize {
        match self {
            EnemyKind::Slime => 0,
            EnemyKind::Skeleton => 1,
            EnemyKind::Bat => 2,
            EnemyKind::Mage => 3,
            EnemyKind::Knight => 4,
            EnemyKind::Demon => 5,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum BehaviorState {
    Idle,
    Chase,
    Attack,
    Hurt,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ItemKind {
    Potion,
    Key,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum CardCategory {
    Weapon,
    Upgrade,
    Buff,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Weapon {
    Sword,
    Broadsword,
    TwinDaggers,
    WarHammer,
}

impl Weapon {
    pub fn display_name(self) -> &'static str {
        match self {
            Weapon::Sword => "SWORD",
            Weapon::Broadsword => "BROADSWORD",
            Weapon::TwinDaggers => "TWIN DAGGERS",
            Weapon::WarHammer => "WAR HAMMER",
        }
    }
}

/// Session phase of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum RunPhase {
    Playing,
    Upgrading,
    Dead,
}

/// Per-frame intent snapshot produced by the input layer.
///
/// `move_intent` is already rotated into the world x/z plane by the caller
/// (x = world x, y = world z). `look` carries yaw and pitch deltas in radians.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    pub move_intent: Vec2,
    pub look: Vec2,
    pub attack: bool,
    pub dash: bool,
    pub interact: bool,
    pub card_choice: Option<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameSkip {
    DeltaTooLarge,
    HitPause,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepResult {
    Simulated,
    Skipped(FrameSkip),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectileEnd {
    HitPlayer,
    Wall,
    Expired,
}

#[derive(Clone, Debug, PartialEq)]
pub enum LogEvent {
    FloorEntered { floor: u32, rooms: usize, enemies: usize },
    EnemyHit { enemy: EnemyId, damage: i32, pos: Vec3 },
    EnemyKilled { enemy: EnemyId, kind: EnemyKind, xp: u32, pos: Vec3 },
    PlayerDamaged { amount: i32, absorbed: i32, from: Vec3 },
    ProjectileFired { projectile: ProjectileId },
    ProjectileRemoved { projectile: ProjectileId, reason: ProjectileEnd },
    ItemPickedUp { item: ItemId, kind: ItemKind },
    LevelUp { level: u32 },
    CardApplied { card_id: u8 },
    PlayerDied { floor: u32, level: u32, kills: u32 },
}
