//! Public data models for generated floors, rooms and spawn points.

use xxhash_rust::xxh3::xxh3_64;

use crate::state::Grid;
use crate::types::{EnemyKind, Pos, TileKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Room {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Room {
    pub fn center(self) -> Pos {
        Pos { y: self.y + self.height / 2, x: self.x + self.width / 2 }
    }

    /// True when `other` lies within `buffer` cells of this room on both axes.
    pub fn overlaps_with_buffer(self, other: &Room, buffer: i32) -> bool {
        self.x < other.x + other.width + buffer
            && self.x + self.width + buffer > other.x
            && self.y < other.y + other.height + buffer
            && self.y + self.height + buffer > other.y
    }

    pub fn contains(self, pos: Pos) -> bool {
        pos.x >= self.x
            && pos.x < self.x + self.width
            && pos.y >= self.y
            && pos.y < self.y + self.height
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnemySpawn {
    pub kind: EnemyKind,
    pub cell: Pos,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedFloor {
    pub floor_index: u32,
    pub grid: Grid,
    pub rooms: Vec<Room>,
    pub target_rooms: usize,
    pub spawn: Pos,
    pub stairs: Pos,
    pub key: Pos,
    pub potions: Vec<Pos>,
    pub enemy_spawns: Vec<EnemySpawn>,
}

impl GeneratedFloor {
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.grid.width as u32).to_le_bytes());
        bytes.extend((self.grid.height as u32).to_le_bytes());
        for tile in &self.grid.tiles {
            bytes.push(match tile {
                TileKind::Wall => 0,
                TileKind::Floor => 1,
            });
        }

        bytes.extend((self.rooms.len() as u32).to_le_bytes());
        for room in &self.rooms {
            for value in [room.x, room.y, room.width, room.height] {
                bytes.extend(value.to_le_bytes());
            }
        }

        for pos in [self.spawn, self.stairs, self.key] {
            bytes.extend(pos.y.to_le_bytes());
            bytes.extend(pos.x.to_le_bytes());
        }
        bytes.extend((self.potions.len() as u32).to_le_bytes());
        for pos in &self.potions {
            bytes.extend(pos.y.to_le_bytes());
            bytes.extend(pos.x.to_le_bytes());
        }

        bytes.extend((self.enemy_spawns.len() as u32).to_le_bytes());
        for spawn in &self.enemy_spawns {
            bytes.push(spawn.kind.index() as u8);
            bytes.extend(spawn.cell.y.to_le_bytes());
            bytes.extend(spawn.cell.x.to_le_bytes());
        }

        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}
