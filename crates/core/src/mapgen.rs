//! Procedural floor generation split into layout, placement and orchestration.

pub mod model;

mod generator;
mod grid;
mod layout;
mod placement;

pub use generator::{GenerationError, MapGenerator};
pub use layout::{DungeonLayout, generate_dungeon};
pub use model::{EnemySpawn, GeneratedFloor, Room};

use crate::config::SimConfig;
use crate::rng::SimRng;

pub fn generate_floor(
    config: &SimConfig,
    floor_index: u32,
    rng: &mut SimRng,
) -> Result<GeneratedFloor, GenerationError> {
    MapGenerator::new(config).generate(floor_index, rng)
}

#[cfg(test)]
mod tests {
    use super::MapGenerator;
    use crate::config::SimConfig;
    use crate::rng::SimRng;

    #[test]
    fn generate_floor_matches_map_generator_output() {
        let config = SimConfig::default();
        let from_helper =
            super::generate_floor(&config, 2, &mut SimRng::seed_from_u64(123)).expect("floor");
        let from_generator = MapGenerator::new(&config)
            .generate(2, &mut SimRng::seed_from_u64(123))
            .expect("floor");

        assert_eq!(from_helper, from_generator);
    }
}
