// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Gridwall Contributors.

//! Conversion configuration

use crate::error::{ConversionError, Result};
use crate::geometry::DEFAULT_HEIGHT;
use crate::grid::DEFAULT_THRESHOLD;
use crate::io::StlFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file looked up by [`ConvertConfig::load`]
pub const CONFIG_FILE: &str = "gridwall.toml";

/// Parameters the mesh pipeline needs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConversionParams {
    /// Intensities at or below this are walls
    pub threshold: u8,
    /// Wall height in world units
    pub height: f64,
    /// Build prisms on the rayon pool
    pub parallel: bool,
}

impl Default for ConversionParams {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            height: DEFAULT_HEIGHT,
            parallel: true,
        }
    }
}

impl ConversionParams {
    pub fn validate(&self) -> Result<()> {
        if !self.height.is_finite() || self.height <= 0.0 {
            return Err(ConversionError::invalid_config(format!(
                "height must be a positive number, got {}",
                self.height
            )));
        }
        Ok(())
    }
}

/// Full configuration surface exposed to the command line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Intensities at or below this are walls
    pub threshold: u8,
    /// Wall height in world units
    pub height: f64,
    /// Directory the STL is written to
    pub export_dir: PathBuf,
    /// Build prisms in parallel
    pub parallel: bool,
    /// STL flavour
    pub format: StlFormat,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        let params = ConversionParams::default();
        Self {
            threshold: params.threshold,
            height: params.height,
            export_dir: PathBuf::from("."),
            parallel: params.parallel,
            format: StlFormat::Binary,
        }
    }
}

impl ConvertConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConversionError::invalid_config(format!("failed to read {}: {}", path.display(), e))
        })?;
        toml::from_str(&content).map_err(|e| {
            ConversionError::invalid_config(format!("failed to parse {}: {}", path.display(), e))
        })
    }

    /// Load `gridwall.toml` from the working directory if present, then
    /// apply environment variable overrides.
    pub fn load() -> Result<Self> {
        let mut config = if Path::new(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE)?
        } else {
            Self::default()
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Apply `GRIDWALL_THRESHOLD`, `GRIDWALL_HEIGHT` and
    /// `GRIDWALL_EXPORT_DIR` overrides.
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(threshold) = std::env::var("GRIDWALL_THRESHOLD") {
            self.threshold = threshold.trim().parse().map_err(|_| {
                ConversionError::invalid_config(format!(
                    "GRIDWALL_THRESHOLD must be an integer in 0..=255, got {:?}",
                    threshold
                ))
            })?;
        }

        if let Ok(height) = std::env::var("GRIDWALL_HEIGHT") {
            self.height = height.trim().parse().map_err(|_| {
                ConversionError::invalid_config(format!(
                    "GRIDWALL_HEIGHT must be a number, got {:?}",
                    height
                ))
            })?;
        }

        if let Ok(export_dir) = std::env::var("GRIDWALL_EXPORT_DIR") {
            self.export_dir = PathBuf::from(export_dir);
        }

        Ok(())
    }

    pub fn params(&self) -> ConversionParams {
        ConversionParams {
            threshold: self.threshold,
            height: self.height,
            parallel: self.parallel,
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.params().validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = ConvertConfig::default();
        assert_eq!(config.threshold, 105);
        assert_eq!(config.height, 0.6);
        assert_eq!(config.export_dir, PathBuf::from("."));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_file_partial() -> anyhow::Result<()> {
        let file = NamedTempFile::new()?;
        std::fs::write(file.path(), "height = 2.5\nformat = \"ascii\"\n")?;

        let config = ConvertConfig::from_file(file.path())?;
        assert_eq!(config.height, 2.5);
        assert_eq!(config.threshold, 105);
        assert_eq!(config.format, StlFormat::Ascii);
        Ok(())
    }

    #[test]
    fn test_threshold_out_of_range_rejected() -> anyhow::Result<()> {
        let file = NamedTempFile::new()?;
        std::fs::write(file.path(), "threshold = 300\n")?;
        assert!(ConvertConfig::from_file(file.path()).is_err());
        Ok(())
    }

    // The only test in this binary that touches GRIDWALL_* variables.
    #[test]
    fn test_env_overrides_file() -> anyhow::Result<()> {
        let file = NamedTempFile::new()?;
        std::fs::write(file.path(), "threshold = 50\nheight = 1.5\nexport_dir = \"from_file\"\n")?;
        let mut config = ConvertConfig::from_file(file.path())?;

        std::env::set_var("GRIDWALL_THRESHOLD", " 90 ");
        std::env::set_var("GRIDWALL_HEIGHT", "2.25");
        std::env::set_var("GRIDWALL_EXPORT_DIR", "/tmp/walls");
        let applied = config.apply_env();

        std::env::set_var("GRIDWALL_THRESHOLD", "dark");
        let mut rejected = config.clone();
        let bad_threshold = rejected.apply_env();

        std::env::set_var("GRIDWALL_THRESHOLD", "90");
        std::env::set_var("GRIDWALL_HEIGHT", "tall");
        let bad_height = config.clone().apply_env();

        std::env::remove_var("GRIDWALL_THRESHOLD");
        std::env::remove_var("GRIDWALL_HEIGHT");
        std::env::remove_var("GRIDWALL_EXPORT_DIR");

        applied?;
        assert_eq!(config.threshold, 90);
        assert_eq!(config.height, 2.25);
        assert_eq!(config.export_dir, PathBuf::from("/tmp/walls"));

        assert!(matches!(bad_threshold, Err(ConversionError::InvalidConfig { .. })));
        assert_eq!(rejected.threshold, 90);
        assert!(matches!(bad_height, Err(ConversionError::InvalidConfig { .. })));

        // Nothing set: the file values stand.
        let mut untouched = ConvertConfig::from_file(file.path())?;
        untouched.apply_env()?;
        assert_eq!(untouched.threshold, 50);
        assert_eq!(untouched.export_dir, PathBuf::from("from_file"));
        Ok(())
    }

    #[test]
    fn test_invalid_height() {
        let params = ConversionParams {
            height: 0.0,
            ..ConversionParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ConversionError::InvalidConfig { .. })
        ));

        let params = ConversionParams {
            height: f64::INFINITY,
            ..ConversionParams::default()
        };
        assert!(params.validate().is_err());
    }
}
