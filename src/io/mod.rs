// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Gridwall Contributors.

//! I/O module - map loading and mesh export

mod exporter;
mod importer;

pub use exporter::{export_stl, output_path_for, StlFormat};
pub use importer::{load_metadata, load_raster, metadata_path_for};
