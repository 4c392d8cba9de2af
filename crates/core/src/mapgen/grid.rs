//! Grid-space helpers used by layout and placement.

use crate::types::Pos;

use super::model::Room;

pub(super) fn manhattan(a: Pos, b: Pos) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

/// Index of the room (other than the spawn room) whose centre is farthest from the spawn.
/// Falls back to the last room, which is the spawn room itself on a single-room floor.
pub(super) fn farthest_room_from_spawn(rooms: &[Room]) -> usize {
    let Some(spawn) = rooms.first().map(|room| room.center()) else {
        return 0;
    };
    let mut best_index = rooms.len() - 1;
    let mut best_distance = 0_u32;
    for (index, room) in rooms.iter().enumerate().skip(1) {
        let distance = manhattan(spawn, room.center());
        if distance > best_distance {
            best_distance = distance;
            best_index = index;
        }
    }
    best_index
}
