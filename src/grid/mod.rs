// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Gridwall Contributors.

//! Grid module - raster, metadata, thresholding and coordinate mapping

mod coords;
mod metadata;
mod raster;
mod threshold;

pub use coords::{cell_to_base_plane, cell_to_world};
pub use metadata::MapMetadata;
pub use raster::{normalize_sample, Raster, FREE_INTENSITY};
pub use threshold::{is_occupied, threshold, OccupiedCell, OccupiedCells, DEFAULT_THRESHOLD};
