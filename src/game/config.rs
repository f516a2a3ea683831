use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use super::state::Grid;

/// Longest allowed grid side, in tiles
pub const MAX_GRID_SIDE: u32 = 1024;

/// Rejected configuration values
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid must have at least 2 tiles, got {width}x{height}")]
    GridTooSmall { width: u32, height: u32 },
    #[error("grid sides cannot exceed {} tiles, got {width}x{height}", MAX_GRID_SIDE)]
    GridTooLarge { width: u32, height: u32 },
    #[error("min_tick_ms must be positive")]
    ZeroMinTick,
    #[error("base_tick_ms ({base}) cannot be below min_tick_ms ({min})")]
    BaseBelowMin { base: u64, min: u64 },
    #[error("swipe_threshold must be positive and finite, got {0}")]
    BadSwipeThreshold(f32),
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid in tiles
    pub grid_width: u32,
    /// Height of the game grid in tiles
    pub grid_height: u32,

    // Speed curve
    /// Tick interval at the start of every game
    pub base_tick_ms: u64,
    /// How much each eaten food shortens the tick interval
    pub tick_step_ms: u64,
    /// The tick interval never drops below this
    pub min_tick_ms: u64,

    // Pointer input
    /// Pointer travel below this on both axes counts as a tap
    pub swipe_threshold: f32,
    /// Two taps closer than this toggle pause
    pub double_tap_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            base_tick_ms: 160,
            tick_step_ms: 2,
            min_tick_ms: 50,
            swipe_threshold: 10.0,
            double_tap_ms: 300,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Load a JSON config file; missing fields fall back to the defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        Ok(config)
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.grid_width, self.grid_height)
    }

    pub fn base_tick(&self) -> Duration {
        Duration::from_millis(self.base_tick_ms)
    }

    pub fn tick_step(&self) -> Duration {
        Duration::from_millis(self.tick_step_ms)
    }

    pub fn min_tick(&self) -> Duration {
        Duration::from_millis(self.min_tick_ms)
    }

    pub fn double_tap_window(&self) -> Duration {
        Duration::from_millis(self.double_tap_ms)
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width > MAX_GRID_SIDE || self.grid_height > MAX_GRID_SIDE {
            return Err(ConfigError::GridTooLarge {
                width: self.grid_width,
                height: self.grid_height,
            });
        }

        if u64::from(self.grid_width) * u64::from(self.grid_height) < 2 {
            return Err(ConfigError::GridTooSmall {
                width: self.grid_width,
                height: self.grid_height,
            });
        }

        if self.min_tick_ms == 0 {
            return Err(ConfigError::ZeroMinTick);
        }

        if self.base_tick_ms < self.min_tick_ms {
            return Err(ConfigError::BaseBelowMin {
                base: self.base_tick_ms,
                min: self.min_tick_ms,
            });
        }

        if !self.swipe_threshold.is_finite() || self.swipe_threshold <= 0.0 {
            return Err(ConfigError::BadSwipeThreshold(self.swipe_threshold));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 20);
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.base_tick(), Duration::from_millis(160));
        assert_eq!(config.min_tick(), Duration::from_millis(50));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 12);
        assert_eq!(config.grid(), Grid::new(15, 12));
    }

    #[test]
    fn test_validation() {
        let config = GameConfig::new(1, 1);
        assert_eq!(
            config.validate(),
            Err(ConfigError::GridTooSmall {
                width: 1,
                height: 1
            })
        );
        assert!(GameConfig::new(2, 1).validate().is_ok());

        assert!(GameConfig::new(MAX_GRID_SIDE, MAX_GRID_SIDE).validate().is_ok());
        assert_eq!(
            GameConfig::new(40_000, 2).validate(),
            Err(ConfigError::GridTooLarge {
                width: 40_000,
                height: 2
            })
        );
        assert!(matches!(
            GameConfig::new(3, u32::MAX).validate(),
            Err(ConfigError::GridTooLarge { .. })
        ));

        let config = GameConfig {
            base_tick_ms: 40,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::BaseBelowMin { .. })
        ));

        let config = GameConfig {
            min_tick_ms: 0,
            base_tick_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroMinTick));

        let config = GameConfig {
            swipe_threshold: f32::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_partial_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("snake.json");
        std::fs::write(&path, r#"{ "grid_width": 12, "base_tick_ms": 200 }"#).unwrap();

        let config = GameConfig::load(&path).unwrap();
        assert_eq!(config.grid_width, 12);
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.base_tick_ms, 200);
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        assert!(GameConfig::load(&temp_dir.path().join("nope.json")).is_err());
    }
}
