// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Gridwall Contributors.

//! Raster and metadata importers

use crate::error::{ConversionError, Result};
use crate::grid::{MapMetadata, Raster};
use image::imageops;
use std::fs;
use std::path::{Path, PathBuf};

/// Load a map image as a grayscale raster in grid order.
///
/// Colour images are converted to 8-bit luma. The image is flipped
/// vertically so that grid row 0 is the bottom row of the file.
pub fn load_raster(path: impl AsRef<Path>) -> Result<Raster> {
    let path = path.as_ref();
    log::info!("Loading map file: {}", path.display());

    let image = image::open(path).map_err(|e| ConversionError::raster_load(path, e))?;
    let gray = imageops::flip_vertical(&image.to_luma8());
    let (width, height) = gray.dimensions();

    Raster::new(width as usize, height as usize, gray.into_raw())
        .ok_or_else(|| ConversionError::raster_load(path, "decoded pixel buffer has the wrong size"))
}

/// Companion metadata path: the raster path with a `.yaml` extension.
pub fn metadata_path_for(raster_path: impl AsRef<Path>) -> PathBuf {
    raster_path.as_ref().with_extension("yaml")
}

/// Load map metadata from a YAML file.
pub fn load_metadata(path: impl AsRef<Path>) -> Result<MapMetadata> {
    let path = path.as_ref();
    log::debug!("Loading map metadata: {}", path.display());

    let content =
        fs::read_to_string(path).map_err(|e| ConversionError::metadata_parse(path, e))?;
    let metadata: MapMetadata =
        serde_yaml::from_str(&content).map_err(|e| ConversionError::metadata_parse(path, e))?;

    if metadata.has_rotation() {
        log::warn!(
            "Map origin yaw {} in {} is ignored; only the translation is applied",
            metadata.yaw,
            path.display()
        );
    }

    Ok(metadata)
}
