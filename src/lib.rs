// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Gridwall Contributors.

//! Gridwall
//!
//! Converts a 2D occupancy-grid map (grayscale raster plus resolution and
//! origin metadata) into a 3D wall mesh: every occupied cell becomes a
//! closed rectangular prism, and all prisms are merged into one mesh with
//! duplicate faces removed.

pub mod config;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod io;
pub mod pipeline;

pub use config::{ConversionParams, ConvertConfig};
pub use error::{ConversionError, Result};
pub use geometry::{Mesh, PrismMesh, Triangle};
pub use grid::{MapMetadata, OccupiedCell, OccupiedCells, Raster};
pub use pipeline::{convert, convert_map_file, ConversionOutput};
