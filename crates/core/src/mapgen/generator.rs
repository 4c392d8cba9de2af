//! Floor generation orchestration: layout, then placement.

use thiserror::Error;
use tracing::{info, warn};

use crate::config::SimConfig;
use crate::rng::SimRng;

use super::layout::generate_dungeon;
use super::model::GeneratedFloor;
use super::placement::place_contents;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("no room fits a {width}x{height} grid on floor {floor}")]
    NoRooms { floor: u32, width: usize, height: usize },
}

pub struct MapGenerator {
    width: usize,
    height: usize,
    tile_size: f32,
}

impl MapGenerator {
    pub fn new(config: &SimConfig) -> Self {
        Self { width: config.grid_width, height: config.grid_height, tile_size: config.tile_size }
    }

    pub fn generate(
        &self,
        floor_index: u32,
        rng: &mut SimRng,
    ) -> Result<GeneratedFloor, GenerationError> {
        let layout = generate_dungeon(self.width, self.height, self.tile_size, floor_index, rng)?;
        if layout.rooms.len() < layout.target_rooms {
            warn!(
                floor = floor_index,
                placed = layout.rooms.len(),
                target = layout.target_rooms,
                "room placement fell short of target"
            );
        }

        let placement = place_contents(&layout.rooms, floor_index, rng);
        let spawn = layout.rooms[0].center();
        info!(
            floor = floor_index,
            rooms = layout.rooms.len(),
            enemies = placement.enemy_spawns.len(),
            "generated floor"
        );

        Ok(GeneratedFloor {
            floor_index,
            grid: layout.grid,
            rooms: layout.rooms,
            target_rooms: layout.target_rooms,
            spawn,
            stairs: placement.stairs,
            key: placement.key,
            potions: placement.potions,
            enemy_spawns: placement.enemy_spawns,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeSet, VecDeque};

    use proptest::prelude::*;

    use super::*;
    use crate::types::{Pos, TileKind};

    fn reachable_from(floor: &GeneratedFloor, start: Pos) -> BTreeSet<Pos> {
        let mut seen = BTreeSet::from([start]);
        let mut queue = VecDeque::from([start]);
        while let Some(pos) = queue.pop_front() {
            for (dy, dx) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
                let next = Pos { y: pos.y + dy, x: pos.x + dx };
                if floor.grid.is_floor(next) && seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        seen
    }

    fn all_floor_cells(floor: &GeneratedFloor) -> BTreeSet<Pos> {
        let mut cells = BTreeSet::new();
        for y in 0..floor.grid.height as i32 {
            for x in 0..floor.grid.width as i32 {
                let pos = Pos { y, x };
                if floor.grid.tile_at(pos) == TileKind::Floor {
                    cells.insert(pos);
                }
            }
        }
        cells
    }

    #[test]
    fn same_seed_produces_identical_fingerprint() {
        let generator = MapGenerator::new(&SimConfig::default());
        let a = generator.generate(3, &mut SimRng::seed_from_u64(123_456)).expect("floor");
        let b = generator.generate(3, &mut SimRng::seed_from_u64(123_456)).expect("floor");
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn different_seeds_change_floor_output() {
        let generator = MapGenerator::new(&SimConfig::default());
        let a = generator.generate(1, &mut SimRng::seed_from_u64(1)).expect("floor");
        let b = generator.generate(1, &mut SimRng::seed_from_u64(2)).expect("floor");
        assert_ne!(a.canonical_bytes(), b.canonical_bytes());
    }

    #[test]
    fn stairs_key_and_potions_sit_on_floor_cells() {
        let generator = MapGenerator::new(&SimConfig::default());
        for seed in [5_u64, 77, 1_024, 99_999] {
            let floor = generator.generate(4, &mut SimRng::seed_from_u64(seed)).expect("floor");
            assert!(floor.grid.is_floor(floor.stairs));
            assert!(floor.grid.is_floor(floor.key));
            for potion in &floor.potions {
                assert!(floor.grid.is_floor(*potion));
            }
            for spawn in &floor.enemy_spawns {
                assert!(floor.grid.is_floor(spawn.cell));
            }
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]
        #[test]
        fn generated_floors_are_fully_connected_from_spawn(
            seed in any::<u64>(),
            floor_index in 1_u32..=12,
        ) {
            let generator = MapGenerator::new(&SimConfig::default());
            let floor = generator.generate(floor_index, &mut SimRng::seed_from_u64(seed)).unwrap();

            prop_assert!(!floor.rooms.is_empty());
            prop_assert_eq!(floor.spawn, floor.rooms[0].center());
            prop_assert!(floor.grid.is_floor(floor.spawn));

            let reachable = reachable_from(&floor, floor.spawn);
            prop_assert_eq!(reachable, all_floor_cells(&floor));
        }
    }
}
