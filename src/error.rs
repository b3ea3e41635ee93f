// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Gridwall Contributors.

//! Error types for map conversion

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while converting an occupancy map to a mesh.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// Raster missing, unreadable, or not convertible to grayscale
    #[error("Failed to load raster {}: {message}", .path.display())]
    RasterLoad { path: PathBuf, message: String },

    /// Companion metadata missing or malformed
    #[error("Failed to parse map metadata {}: {message}", .path.display())]
    MetadataParse { path: PathBuf, message: String },

    /// Thresholding produced no occupied cells, so there is nothing to mesh
    #[error("No occupied cells found; the map has no walls to mesh")]
    EmptyOccupancy,

    /// A prism does not enclose a valid volume
    #[error("Degenerate geometry at cell (row {row}, col {col}): {message}")]
    DegenerateGeometry {
        row: usize,
        col: usize,
        message: String,
    },

    /// Configuration value out of range
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Mesh serialization failed
    #[error("Failed to export mesh to {}: {message}", .path.display())]
    Export { path: PathBuf, message: String },
}

impl ConversionError {
    pub fn raster_load(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::RasterLoad {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub fn metadata_parse(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::MetadataParse {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    pub fn export(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Export {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// True when the input was valid but contained no walls.
    pub fn is_empty_occupancy(&self) -> bool {
        matches!(self, Self::EmptyOccupancy)
    }
}

pub type Result<T> = std::result::Result<T, ConversionError>;
