//! Pixel constants shared by layout, anchor math and rendering.

use serde::Deserialize;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid zoom bounds: min {min} must be positive and not above max {max}")]
    ZoomBounds { min: f64, max: f64 },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DiagramConfig {
    pub table_width: f64,
    pub header_height: f64,
    pub row_height: f64,
    pub x_spacing: f64,
    pub y_spacing: f64,
    pub x_margin: f64,
    pub y_margin: f64,
    pub min_scale: f64,
    pub max_scale: f64,
    pub zoom_step: f64,
    /// Lower bound for the horizontal control-point offset of a connector
    pub min_control_offset: f64,
    pub anchor_radius: f64,
    pub stroke_width: f64,
    /// Width of one display column of text, for truncation
    pub char_width: f64,
    pub padding_x: f64,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            table_width: 250.0,
            header_height: 50.0,
            row_height: 40.0,
            x_spacing: 350.0,
            y_spacing: 300.0,
            x_margin: 100.0,
            y_margin: 100.0,
            min_scale: 0.2,
            max_scale: 2.0,
            zoom_step: 0.1,
            min_control_offset: 50.0,
            anchor_radius: 4.0,
            stroke_width: 1.5,
            char_width: 8.0,
            padding_x: 12.0,
        }
    }
}

impl DiagramConfig {
    /// Parse a JSON config. Keys not present keep their defaults.
    pub fn from_json(input: &str) -> Result<Self, ConfigError> {
        let config: DiagramConfig = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let input = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&input)
    }

    /// Zoom bounds must be positive and ordered. NaN fails too.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_scale > 0.0 && self.min_scale <= self.max_scale) {
            return Err(ConfigError::ZoomBounds {
                min: self.min_scale,
                max: self.max_scale,
            });
        }
        Ok(())
    }

    /// Full rendered height of a table with `columns` rows.
    pub fn table_height(&self, columns: usize) -> f64 {
        self.header_height + columns as f64 * self.row_height
    }
}
