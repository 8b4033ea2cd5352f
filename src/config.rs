//! Canvas configuration: surface size and grid behaviour.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_GRID_SIZE};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("canvas size must be positive and finite, got {width}x{height}")]
    InvalidCanvasSize { width: f64, height: f64 },
    #[error("grid size must be greater than zero")]
    ZeroGridSize,
    #[error("invalid canvas config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parameters of the card surface the engine operates on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CanvasConfig {
    /// Surface width in canvas units.
    pub width: f64,
    /// Surface height in canvas units.
    pub height: f64,
    /// Grid pitch for the overlay and for snapping.
    pub grid_size: u32,
    /// Round drag and resize results to the grid.
    pub snap_to_grid: bool,
    /// Draw the grid overlay.
    pub show_grid: bool,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
            grid_size: DEFAULT_GRID_SIZE,
            snap_to_grid: false,
            show_grid: false,
        }
    }
}

impl CanvasConfig {
    /// Build a validated config. The grid overlay starts hidden.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCanvasSize` for non-positive or non-finite dimensions
    /// and `ZeroGridSize` when `grid_size` is zero.
    pub fn new(width: f64, height: f64, grid_size: u32, snap_to_grid: bool) -> Result<Self, ConfigError> {
        let config = Self { width, height, grid_size, snap_to_grid, show_grid: false };
        config.validate()?;
        Ok(config)
    }

    /// Parse a host-supplied JSON config. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `Json` on malformed input and the `validate` errors otherwise.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the transform relies on.
    ///
    /// # Errors
    ///
    /// See [`CanvasConfig::new`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(self.width) || !valid(self.height) {
            return Err(ConfigError::InvalidCanvasSize { width: self.width, height: self.height });
        }
        if self.grid_size == 0 {
            return Err(ConfigError::ZeroGridSize);
        }
        Ok(())
    }
}
