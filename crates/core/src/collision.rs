//! Walkability queries against the floor grid.
//! Every moving entity goes through `slide_move`, so walls block each axis independently.

use glam::Vec3;

use crate::state::Grid;

/// True when the cell nearest to world `(x, z)` is in bounds and floor.
pub fn can_walk(grid: &Grid, x: f32, z: f32) -> bool {
    grid.is_floor(grid.cell_of(x, z))
}

/// Applies `delta` on x, then on z from the possibly-updated x. Each axis is kept only if
/// its destination is walkable, which lets entities slide along walls.
pub fn slide_move(grid: &Grid, pos: Vec3, delta: Vec3) -> Vec3 {
    let mut next = pos;
    if can_walk(grid, next.x + delta.x, next.z) {
        next.x += delta.x;
    }
    if can_walk(grid, next.x, next.z + delta.z) {
        next.z += delta.z;
    }
    next
}

/// Distance between two points ignoring height.
pub fn flat_distance(a: Vec3, b: Vec3) -> f32 {
    let dx = b.x - a.x;
    let dz = b.z - a.z;
    (dx * dx + dz * dz).sqrt()
}

/// Horizontal unit direction from `from` towards `to`, or `-Z` when they coincide.
pub fn flat_direction(from: Vec3, to: Vec3) -> Vec3 {
    let delta = Vec3::new(to.x - from.x, 0.0, to.z - from.z);
    let length = delta.length();
    if length <= 0.001 {
        return Vec3::NEG_Z;
    }
    delta / length
}
