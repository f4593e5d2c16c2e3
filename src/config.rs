use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::geometry::Bounds;
use crate::input::ReversalPolicy;

/// Default playfield width in pixels.
pub const DEFAULT_GRID_WIDTH: i32 = 640;

/// Default playfield height in pixels.
pub const DEFAULT_GRID_HEIGHT: i32 = 480;

/// Default side length of one cell in pixels.
pub const DEFAULT_CELL_SIZE: i32 = 20;

/// Default game speed.
pub const DEFAULT_TICKS_PER_SECOND: u32 = 10;

/// Blocks in a fresh snake.
pub const DEFAULT_INITIAL_LENGTH: usize = 3;

/// Score granted per food eaten.
pub const DEFAULT_POINTS_PER_FOOD: u32 = 1;

/// Construction-time parameters for one game.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub grid_width: i32,
    pub grid_height: i32,
    pub cell_size: i32,
    pub ticks_per_second: u32,
    pub initial_length: usize,
    pub points_per_food: u32,
    pub reversal: ReversalPolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            cell_size: DEFAULT_CELL_SIZE,
            ticks_per_second: DEFAULT_TICKS_PER_SECOND,
            initial_length: DEFAULT_INITIAL_LENGTH,
            points_per_food: DEFAULT_POINTS_PER_FOOD,
            reversal: ReversalPolicy::default(),
        }
    }
}

impl GameConfig {
    /// Reads a JSON config file. Keys that are absent keep their defaults.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.grid_width, self.grid_height, self.cell_size)
    }

    /// Time between two ticks.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.ticks_per_second.max(1)
    }

    /// Checks that the grid tiles evenly and the starting snake fits in it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size <= 0 {
            return Err(ConfigError::Invalid(format!(
                "cell_size must be positive, got {}",
                self.cell_size
            )));
        }

        if self.grid_width < self.cell_size || self.grid_height < self.cell_size {
            return Err(ConfigError::Invalid(format!(
                "grid {}x{} is smaller than one {}px cell",
                self.grid_width, self.grid_height, self.cell_size
            )));
        }

        if self.grid_width % self.cell_size != 0 || self.grid_height % self.cell_size != 0 {
            return Err(ConfigError::Invalid(format!(
                "grid {}x{} is not a multiple of cell_size {}",
                self.grid_width, self.grid_height, self.cell_size
            )));
        }

        let bounds = self.bounds();
        if bounds.columns().checked_mul(bounds.rows()).is_none() {
            return Err(ConfigError::Invalid(format!(
                "grid of {}x{} cells is too large",
                bounds.columns(),
                bounds.rows()
            )));
        }

        if self.ticks_per_second == 0 {
            return Err(ConfigError::Invalid(
                "ticks_per_second must be at least 1".to_owned(),
            ));
        }

        if self.initial_length == 0 {
            return Err(ConfigError::Invalid(
                "initial_length must be at least 1".to_owned(),
            ));
        }

        // The snake starts at the center cell trailing to the left.
        let room = usize::try_from(bounds.columns() / 2 + 1).unwrap_or(0);
        if self.initial_length > room {
            return Err(ConfigError::Invalid(format!(
                "initial_length {} does not fit a grid {} cells wide",
                self.initial_length,
                bounds.columns()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use super::GameConfig;
    use crate::error::ConfigError;
    use crate::input::ReversalPolicy;

    #[test]
    fn default_config_is_valid() {
        let config = GameConfig::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.bounds().columns(), 32);
        assert_eq!(config.bounds().rows(), 24);
        assert_eq!(config.tick_interval(), Duration::from_millis(100));
    }

    #[test]
    fn misaligned_grid_is_rejected() {
        let config = GameConfig {
            grid_width: 630,
            ..GameConfig::default()
        };

        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn zero_tick_rate_is_rejected() {
        let config = GameConfig {
            ticks_per_second: 0,
            ..GameConfig::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn oversized_snake_is_rejected() {
        let config = GameConfig {
            grid_width: 100,
            grid_height: 100,
            initial_length: 4,
            ..GameConfig::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn grid_with_too_many_cells_is_rejected() {
        let config = GameConfig {
            grid_width: 2_000_000_000,
            grid_height: 2_000_000_000,
            cell_size: 1,
            ..GameConfig::default()
        };

        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn zero_cell_size_is_rejected() {
        let config = GameConfig {
            cell_size: 0,
            ..GameConfig::default()
        };

        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();
        let path = std::env::temp_dir().join(format!("grid-snake-config-{nanos}.json"));
        fs::write(&path, r#"{"cell_size": 10, "reversal": "allow"}"#)
            .expect("test file write should succeed");

        let config = GameConfig::from_path(&path).expect("config should parse");
        let _ = fs::remove_file(&path);

        assert_eq!(config.cell_size, 10);
        assert_eq!(config.reversal, ReversalPolicy::Allow);
        assert_eq!(config.grid_width, 640);
        assert_eq!(config.initial_length, 3);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let path = std::env::temp_dir().join("grid-snake-config-does-not-exist.json");
        assert!(matches!(
            GameConfig::from_path(&path),
            Err(ConfigError::Read { .. })
        ));
    }
}
