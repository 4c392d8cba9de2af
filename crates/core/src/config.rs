//! Runtime-tunable world dimensions and frame pacing.
//! Gameplay constants (stats, cooldowns, cards) are compiled in and live in `content`.

use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Smallest grid edge that still fits a 9-cell room inside the 2-cell border.
pub const MIN_GRID_EDGE: usize = 16;
/// Reveal radius cap, in cells.
pub const MAX_EXPLORE_RADIUS: i32 = 32;
/// Longest hit pause a config may request, in seconds.
pub const MAX_HIT_PAUSE: f32 = 1.0;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub grid_width: usize,
    pub grid_height: usize,
    pub tile_size: f32,
    pub max_frame_dt: f32,
    pub hit_pause: f32,
    pub explore_radius: i32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            grid_width: 42,
            grid_height: 42,
            tile_size: 2.0,
            max_frame_dt: 0.1,
            hit_pause: 0.04,
            explore_radius: 7,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("grid {width}x{height} is smaller than the {min}x{min} minimum")]
    GridTooSmall { width: usize, height: usize, min: usize },
    #[error("tile size must be positive, got {0}")]
    BadTileSize(f32),
    #[error("explore radius must be within 0..={max}, got {radius}")]
    BadExploreRadius { radius: i32, max: i32 },
    #[error("max frame delta must be a positive number of seconds, got {0}")]
    BadFrameDelta(f32),
    #[error("hit pause must be within 0..={max} seconds, got {pause}")]
    BadHitPause { pause: f32, max: f32 },
}

impl SimConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width < MIN_GRID_EDGE || self.grid_height < MIN_GRID_EDGE {
            return Err(ConfigError::GridTooSmall {
                width: self.grid_width,
                height: self.grid_height,
                min: MIN_GRID_EDGE,
            });
        }
        if self.tile_size.is_nan() || self.tile_size <= 0.0 {
            return Err(ConfigError::BadTileSize(self.tile_size));
        }
        if !(0..=MAX_EXPLORE_RADIUS).contains(&self.explore_radius) {
            return Err(ConfigError::BadExploreRadius {
                radius: self.explore_radius,
                max: MAX_EXPLORE_RADIUS,
            });
        }
        if !self.max_frame_dt.is_finite() || self.max_frame_dt <= 0.0 {
            return Err(ConfigError::BadFrameDelta(self.max_frame_dt));
        }
        if !(0.0..=MAX_HIT_PAUSE).contains(&self.hit_pause) {
            return Err(ConfigError::BadHitPause { pause: self.hit_pause, max: MAX_HIT_PAUSE });
        }
        Ok(())
    }
}
