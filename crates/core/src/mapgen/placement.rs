//! Stairs, key, potion and enemy placement over an already carved layout.

use crate::content::enemy_pool;
use crate::rng::SimRng;
use crate::types::Pos;

use super::grid::farthest_room_from_spawn;
use super::model::{EnemySpawn, Room};

pub(super) struct Placement {
    pub(super) stairs: Pos,
    pub(super) key: Pos,
    pub(super) potions: Vec<Pos>,
    pub(super) enemy_spawns: Vec<EnemySpawn>,
}

pub(super) fn place_contents(rooms: &[Room], floor_index: u32, rng: &mut SimRng) -> Placement {
    let stairs_room = farthest_room_from_spawn(rooms);
    let key_room = pick_key_room(rooms.len(), stairs_room, rng);

    let potion_count = rng.int_in(1, 2);
    let potions = (0..potion_count)
        .map(|_| {
            let room = rooms[random_non_spawn_room(rooms.len(), rng)];
            random_interior_cell(&room, rng)
        })
        .collect();

    Placement {
        stairs: rooms[stairs_room].center(),
        key: rooms[key_room].center(),
        potions,
        enemy_spawns: place_enemies(rooms, floor_index, rng),
    }
}

fn pick_key_room(room_count: usize, stairs_room: usize, rng: &mut SimRng) -> usize {
    if room_count <= 1 {
        return 0;
    }
    if room_count == 2 {
        return 1;
    }
    let candidates: Vec<usize> = (1..room_count).filter(|&index| index != stairs_room).collect();
    candidates[rng.index(candidates.len())]
}

fn random_non_spawn_room(room_count: usize, rng: &mut SimRng) -> usize {
    if room_count <= 1 {
        return 0;
    }
    rng.int_in(1, room_count as i32 - 1) as usize
}

fn random_interior_cell(room: &Room, rng: &mut SimRng) -> Pos {
    Pos {
        y: rng.int_in(room.y + 1, room.y + room.height - 2),
        x: rng.int_in(room.x + 1, room.x + room.width - 2),
    }
}

pub(super) fn enemies_per_room_cap(floor_index: u32) -> i32 {
    (2 + floor_index as i32).min(8)
}

fn place_enemies(rooms: &[Room], floor_index: u32, rng: &mut SimRng) -> Vec<EnemySpawn> {
    let pool = enemy_pool(floor_index);
    let cap = enemies_per_room_cap(floor_index);
    let mut spawns = Vec::new();
    for room in rooms.iter().skip(1) {
        let count = rng.int_in((cap - 1).max(1), cap);
        for _ in 0..count {
            let kind = pool[rng.index(pool.len())];
            spawns.push(EnemySpawn { kind, cell: random_interior_cell(room, rng) });
        }
    }
    spawns
}
