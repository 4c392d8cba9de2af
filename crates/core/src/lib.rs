pub mod collision;
pub mod config;
pub mod content;
pub mod game;
pub mod mapgen;
pub mod rng;
pub mod state;
pub mod types;

pub use config::{ConfigError, SimConfig};
pub use game::{EntityHandle, EntityPose, Game, HudMessage, HudSnapshot, PoseKind, RunStats};
pub use mapgen::GenerationError;
pub use rng::SimRng;
pub use state::{FloorState, Grid, PlayerState};
pub use types::*;

pub use glam::{Vec2, Vec3, vec2, vec3};
