//! Room placement, corridor carving and the corridor-widening pass.

use crate::rng::SimRng;
use crate::state::Grid;
use crate::types::{Pos, TileKind};

use super::generator::GenerationError;
use super::model::Room;

const MIN_ROOM_EDGE: i32 = 5;
const MAX_ROOM_EDGE: i32 = 9;
const BORDER: i32 = 2;
const ROOM_BUFFER: i32 = 2;
const ATTEMPTS_PER_ROOM: usize = 6;

#[derive(Clone, Debug, PartialEq)]
pub struct DungeonLayout {
    pub grid: Grid,
    pub rooms: Vec<Room>,
    pub target_rooms: usize,
}

pub fn target_room_count(floor_index: u32) -> usize {
    (6 + floor_index as usize).min(12)
}

/// Carves rooms and corridors for one floor. Fails only when no room could be placed.
pub fn generate_dungeon(
    width: usize,
    height: usize,
    tile_size: f32,
    floor_index: u32,
    rng: &mut SimRng,
) -> Result<DungeonLayout, GenerationError> {
    let mut grid = Grid::new(width, height, tile_size);
    let target_rooms = target_room_count(floor_index);
    let rooms = place_rooms(&mut grid, target_rooms, rng);
    if rooms.is_empty() {
        return Err(GenerationError::NoRooms { floor: floor_index, width, height });
    }

    for pair in rooms.windows(2) {
        carve_l_corridor(&mut grid, pair[0].center(), pair[1].center());
    }
    widen_corridors(&mut grid);

    Ok(DungeonLayout { grid, rooms, target_rooms })
}

fn place_rooms(grid: &mut Grid, target_rooms: usize, rng: &mut SimRng) -> Vec<Room> {
    let width = grid.width as i32;
    let height = grid.height as i32;
    let mut rooms: Vec<Room> = Vec::with_capacity(target_rooms);

    for _ in 0..(target_rooms * ATTEMPTS_PER_ROOM) {
        if rooms.len() >= target_rooms {
            break;
        }
        let room_width = rng.int_in(MIN_ROOM_EDGE, MAX_ROOM_EDGE);
        let room_height = rng.int_in(MIN_ROOM_EDGE, MAX_ROOM_EDGE);
        let max_x = width - room_width - BORDER;
        let max_y = height - room_height - BORDER;
        if max_x < BORDER || max_y < BORDER {
            continue;
        }
        let candidate = Room {
            x: rng.int_in(BORDER, max_x),
            y: rng.int_in(BORDER, max_y),
            width: room_width,
            height: room_height,
        };
        if rooms.iter().any(|existing| candidate.overlaps_with_buffer(existing, ROOM_BUFFER)) {
            continue;
        }
        carve_room(grid, &candidate);
        rooms.push(candidate);
    }

    rooms
}

fn carve_room(grid: &mut Grid, room: &Room) {
    for y in room.y..(room.y + room.height) {
        for x in room.x..(room.x + room.width) {
            grid.set_tile(Pos { y, x }, TileKind::Floor);
        }
    }
}

/// Walks x first, then z, marking every visited cell including the destination.
fn carve_l_corridor(grid: &mut Grid, start: Pos, end: Pos) {
    let mut cursor = start;
    while cursor.x != end.x {
        grid.set_tile(cursor, TileKind::Floor);
        cursor.x += (end.x - cursor.x).signum();
    }
    while cursor.y != end.y {
        grid.set_tile(cursor, TileKind::Floor);
        cursor.y += (end.y - cursor.y).signum();
    }
    grid.set_tile(cursor, TileKind::Floor);
}

/// Single row-major pass: neighbour tests read the pre-pass snapshot, writes land in the live grid.
pub(super) fn widen_corridors(grid: &mut Grid) {
    let snapshot = grid.clone();
    for y in 1..(grid.height as i32 - 1) {
        for x in 1..(grid.width as i32 - 1) {
            if !snapshot.is_floor(Pos { y, x }) {
                continue;
            }
            let below = Pos { y: y + 1, x };
            if !grid.is_floor(below) && snapshot.is_floor(Pos { y: y - 1, x }) {
                grid.set_tile(below, TileKind::Floor);
            }
            let right = Pos { y, x: x + 1 };
            if !grid.is_floor(right) && snapshot.is_floor(Pos { y, x: x - 1 }) {
                grid.set_tile(right, TileKind::Floor);
            }
        }
    }
}
