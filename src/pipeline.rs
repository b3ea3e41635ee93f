// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Gridwall Contributors.

//! Conversion driver: raster + metadata in, merged wall mesh out

use crate::config::{ConversionParams, ConvertConfig};
use crate::error::{ConversionError, Result};
use crate::geometry::{build_prism, merge, Mesh, PrismMesh};
use crate::grid::{threshold, MapMetadata, OccupiedCells, Raster};
use crate::io;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Convert an in-memory raster into a wall mesh.
///
/// Runs Threshold → BuildPrisms → Merge. Unknown samples must already be
/// normalized, which [`Raster`] construction guarantees. Either every
/// cell becomes part of the mesh or an error is returned.
pub fn convert(raster: &Raster, metadata: &MapMetadata, params: &ConversionParams) -> Result<Mesh> {
    params.validate()?;
    metadata
        .validate()
        .map_err(|message| ConversionError::metadata_parse(&metadata.image, message))?;

    let cells = threshold(raster, params.threshold);
    log::info!(
        "Found {} occupied cells of {} at threshold {}",
        cells.len(),
        raster.len(),
        params.threshold
    );

    let prisms = build_prisms(&cells, metadata, params.height, params.parallel)?;
    let mesh = merge(&prisms)?;
    log::info!(
        "Built mesh: {} vertices, {} faces",
        mesh.vertex_count(),
        mesh.triangle_count()
    );

    Ok(mesh)
}

/// Build one prism per occupied cell, in cell order.
pub fn build_prisms(
    cells: &OccupiedCells,
    metadata: &MapMetadata,
    height: f64,
    parallel: bool,
) -> Result<Vec<PrismMesh>> {
    if parallel {
        cells
            .as_slice()
            .par_iter()
            .map(|&cell| build_prism(cell, metadata, height))
            .collect()
    } else {
        cells
            .iter()
            .map(|&cell| build_prism(cell, metadata, height))
            .collect()
    }
}

/// Result of a file-level conversion
#[derive(Debug, Clone)]
pub struct ConversionOutput {
    pub mesh: Mesh,
    pub metadata: MapMetadata,
    pub output_path: PathBuf,
}

/// Load a map image and its metadata, convert, and write the STL.
///
/// `metadata_path` defaults to the map path with a `.yaml` extension. No
/// output file exists unless every stage succeeded.
pub fn convert_map_file(
    map_path: impl AsRef<Path>,
    metadata_path: Option<&Path>,
    config: &ConvertConfig,
) -> Result<ConversionOutput> {
    let map_path = map_path.as_ref();
    config.validate()?;

    let raster = io::load_raster(map_path)?;
    let metadata_path = metadata_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| io::metadata_path_for(map_path));
    let metadata = io::load_metadata(&metadata_path)?;

    log::info!("Processing {}x{} map", raster.width(), raster.height());
    let mesh = convert(&raster, &metadata, &config.params())?;

    let output_path = io::output_path_for(&config.export_dir, &metadata.image);
    log::info!("Export file: {}", output_path.display());
    io::export_stl(&mesh, &output_path, config.format)?;

    Ok(ConversionOutput {
        mesh,
        metadata,
        output_path,
    })
}
