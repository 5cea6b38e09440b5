use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_CROP_SIZE, DEFAULT_MAGNIFICATION, DEFAULT_MARKER_RADIUS};
use crate::error::{CaliperError, Result};
use crate::refine::check_parameters;

/// User-tunable measuring settings, stored as TOML.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasureConfig {
    /// Side of the square region (source pixels) shown by the magnifier.
    pub crop_size: u32,
    /// Integer zoom applied to the magnifier crop.
    pub magnification: u32,
    /// Draw the safe-zone rectangle over the image.
    pub show_safe_zone: bool,
    /// Radius of the dot drawn at each refined point, in source pixels.
    pub marker_radius: f32,
}

impl Default for MeasureConfig {
    fn default() -> Self {
        Self {
            crop_size: DEFAULT_CROP_SIZE,
            magnification: DEFAULT_MAGNIFICATION,
            show_safe_zone: true,
            marker_radius: DEFAULT_MARKER_RADIUS,
        }
    }
}

impl MeasureConfig {
    pub fn validate(&self) -> Result<()> {
        check_parameters(self.crop_size, self.magnification)?;
        if !(self.marker_radius.is_finite() && self.marker_radius > 0.0) {
            return Err(CaliperError::InvalidConfig(format!(
                "marker_radius must be positive, got {}",
                self.marker_radius
            )));
        }
        Ok(())
    }

    /// Parse and validate. Missing keys fall back to defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!("Loaded settings from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_toml_string()?)?;
        tracing::info!("Saved settings to {}", path.display());
        Ok(())
    }
}
