use glam::{Vec3, vec3};
use slotmap::SlotMap;

use crate::mapgen::Room;
use crate::types::*;

pub const PLAYER_BASE_HP: i32 = 100;
pub const PLAYER_BASE_DAMAGE: i32 = 22;

#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    pub tile_size: f32,
    pub tiles: Vec<TileKind>,
}

impl Grid {
    pub fn new(width: usize, height: usize, tile_size: f32) -> Self {
        Self { width, height, tile_size, tiles: vec![TileKind::Wall; width * height] }
    }

    pub fn tile_at(&self, pos: Pos) -> TileKind {
        if !self.in_bounds(pos) {
            return TileKind::Wall;
        }
        self.tiles[self.index(pos)]
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && (pos.x as usize) < self.width
            && (pos.y as usize) < self.height
    }

    pub fn set_tile(&mut self, pos: Pos, tile: TileKind) {
        if !self.in_bounds(pos) {
            return;
        }
        let idx = self.index(pos);
        self.tiles[idx] = tile;
    }

    pub fn is_floor(&self, pos: Pos) -> bool {
        self.tile_at(pos) == TileKind::Floor
    }

    /// Nearest cell to a world-space point on the x/z plane.
    pub fn cell_of(&self, x: f32, z: f32) -> Pos {
        Pos { y: (z / self.tile_size).round() as i32, x: (x / self.tile_size).round() as i32 }
    }

    /// World-space centre of a cell, on the ground plane.
    pub fn world_of(&self, pos: Pos) -> Vec3 {
        vec3(pos.x as f32 * self.tile_size, 0.0, pos.y as f32 * self.tile_size)
    }

    pub fn floor_count(&self) -> usize {
        self.tiles.iter().filter(|&&tile| tile == TileKind::Floor).count()
    }

    pub(crate) fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub id: EnemyId,
    pub kind: EnemyKind,
    pub pos: Vec3,
    pub hp: i32,
    pub max_hp: i32,
    pub radius: f32,
    pub speed: f32,
    pub damage: i32,
    pub attack_range: f32,
    pub attack_cooldown: f32,
    pub ranged_cooldown: f32,
    pub knockback: Vec3,
    pub state: BehaviorState,
    pub hurt_timer: f32,
    pub seen_player: bool,
}

#[derive(Clone, Debug)]
pub struct Projectile {
    pub id: ProjectileId,
    pub pos: Vec3,
    pub vel: Vec3,
    pub life: f32,
    pub damage: i32,
}

#[derive(Clone, Debug)]
pub struct Item {
    pub id: ItemId,
    pub kind: ItemKind,
    pub cell: Pos,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlayerState {
    pub hp: i32,
    pub max_hp: i32,
    pub shield: i32,
    pub damage: i32,
    pub speed_mult: f32,
    pub attack_mult: f32,
    pub range_mult: f32,
    pub knockback_mult: f32,
    pub lifesteal: f32,
    pub regen: f32,
    pub regen_accum: f32,
    pub xp: u32,
    pub level: u32,
    pub pos: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub attack_cooldown: f32,
    pub dash_timer: f32,
    pub dash_cooldown: f32,
    pub dash_dir: Vec3,
    pub invulnerable: f32,
    pub has_key: bool,
    pub weapon: Weapon,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            hp: PLAYER_BASE_HP,
            max_hp: PLAYER_BASE_HP,
            shield: 0,
            damage: PLAYER_BASE_DAMAGE,
            speed_mult: 1.0,
            attack_mult: 1.0,
            range_mult: 1.0,
            knockback_mult: 1.0,
            lifesteal: 0.0,
            regen: 0.0,
            regen_accum: 0.0,
            xp: 0,
            level: 1,
            pos: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            attack_cooldown: 0.0,
            dash_timer: 0.0,
            dash_cooldown: 0.0,
            dash_dir: Vec3::NEG_Z,
            invulnerable: 0.0,
            has_key: false,
            weapon: Weapon::Sword,
        }
    }
}

impl PlayerState {
    /// Horizontal unit vector the player is facing.
    pub fn forward(&self) -> Vec3 {
        vec3(-self.yaw.sin(), 0.0, -self.yaw.cos())
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }

    /// Restores up to `amount` health without passing max. The dead stay dead.
    pub fn heal(&mut self, amount: i32) -> i32 {
        if self.is_dead() {
            return 0;
        }
        let healed = amount.clamp(0, (self.max_hp - self.hp).max(0));
        self.hp += healed;
        healed
    }
}

/// Everything owned by the current floor. Replaced wholesale on descent.
pub struct FloorState {
    pub index: u32,
    pub grid: Grid,
    pub rooms: Vec<Room>,
    pub explored: Vec<bool>,
    pub stairs: Pos,
    pub enemies: SlotMap<EnemyId, Enemy>,
    pub projectiles: SlotMap<ProjectileId, Projectile>,
    pub items: SlotMap<ItemId, Item>,
}

impl FloorState {
    pub fn is_explored(&self, pos: Pos) -> bool {
        self.grid.in_bounds(pos) && self.explored[self.grid.index(pos)]
    }

    pub fn reveal_around(&mut self, center: Pos, radius: i32) {
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let pos = Pos { y: center.y + dy, x: center.x + dx };
                if self.grid.in_bounds(pos) {
                    let idx = self.grid.index(pos);
                    self.explored[idx] = true;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_cells_read_as_wall() {
        let grid = Grid::new(4, 4, 2.0);
        assert_eq!(grid.tile_at(Pos { y: -1, x: 0 }), TileKind::Wall);
        assert_eq!(grid.tile_at(Pos { y: 0, x: 4 }), TileKind::Wall);
    }

    #[test]
    fn cell_of_rounds_to_nearest_cell_centre() {
        let grid = Grid::new(10, 10, 2.0);
        assert_eq!(grid.cell_of(2.9, 5.1), Pos { y: 3, x: 1 });
        assert_eq!(grid.cell_of(3.0, -0.9), Pos { y: 0, x: 2 });
        assert_eq!(grid.world_of(Pos { y: 3, x: 1 }), vec3(2.0, 0.0, 6.0));
    }

    #[test]
    fn heal_never_exceeds_max() {
        let mut player = PlayerState { hp: 95, ..PlayerState::default() };
        assert_eq!(player.heal(30), 5);
        assert_eq!(player.hp, player.max_hp);
        assert_eq!(player.heal(10), 0);
    }

    #[test]
    fn heal_leaves_a_dead_player_at_zero() {
        let mut player = PlayerState { hp: 0, ..PlayerState::default() };
        assert_eq!(player.heal(40), 0);
        assert_eq!(player.hp, 0);
        assert!(player.is_dead());
    }

    #[test]
    fn default_facing_points_down_negative_z() {
        let player = PlayerState::default();
        let forward = player.forward();
        assert!(forward.x.abs() < 1e-6);
        assert!((forward.z + 1.0).abs() < 1e-6);
    }
}
