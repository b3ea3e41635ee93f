// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Gridwall Contributors.

//! Map metadata (resolution, origin, image name)

use crate::error::{ConversionError, Result};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Metadata describing how grid cells map into the world frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MetadataFile")]
pub struct MapMetadata {
    /// Output base name, usually the raster file name
    pub image: String,
    /// World units per cell
    pub resolution: f64,
    /// World position of the center of cell (0, 0)
    pub origin: Vector2<f64>,
    /// Rotation of the origin pose. Parsed but not applied.
    pub yaw: f64,
}

impl MapMetadata {
    /// Build metadata with zero yaw, checking the resolution and origin.
    pub fn new(image: impl Into<String>, resolution: f64, origin: Vector2<f64>) -> Result<Self> {
        let metadata = Self {
            image: image.into(),
            resolution,
            origin,
            yaw: 0.0,
        };
        metadata
            .validate()
            .map_err(|message| ConversionError::metadata_parse(&metadata.image, message))?;
        Ok(metadata)
    }

    /// Check the invariants the mesh pipeline relies on.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !self.resolution.is_finite() || self.resolution <= 0.0 {
            return Err(format!(
                "resolution must be a positive number, got {}",
                self.resolution
            ));
        }
        if !self.origin.x.is_finite() || !self.origin.y.is_finite() {
            return Err(format!(
                "origin must be finite, got [{}, {}]",
                self.origin.x, self.origin.y
            ));
        }
        Ok(())
    }

    pub fn has_rotation(&self) -> bool {
        self.yaw != 0.0
    }
}

/// On-disk layout of the metadata file. Extra ROS map keys
/// (`negate`, `occupied_thresh`, `free_thresh`, `mode`) are accepted and
/// ignored.
#[derive(Debug, Deserialize)]
struct MetadataFile {
    image: String,
    resolution: f64,
    origin: Vec<f64>,
}

impl TryFrom<MetadataFile> for MapMetadata {
    type Error = String;

    fn try_from(file: MetadataFile) -> std::result::Result<Self, Self::Error> {
        let (origin, yaw) = match file.origin.as_slice() {
            [x, y] => (Vector2::new(*x, *y), 0.0),
            [x, y, yaw] => (Vector2::new(*x, *y), *yaw),
            other => {
                return Err(format!(
                    "origin must have 2 or 3 components, got {}",
                    other.len()
                ))
            }
        };
        let metadata = MapMetadata {
            image: file.image,
            resolution: file.resolution,
            origin,
            yaw,
        };
        metadata.validate()?;
        Ok(metadata)
    }
}
