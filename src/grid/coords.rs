// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Gridwall Contributors.

//! Grid to world coordinate mapping

use super::MapMetadata;
use nalgebra::{Point2, Point3};

/// Map a (possibly fractional) grid position to world XY.
///
/// `x = col * resolution + origin.x`, `y = row * resolution + origin.y`.
/// Only the translation of the origin is honoured; its yaw is ignored.
pub fn cell_to_world(col: f64, row: f64, metadata: &MapMetadata) -> Point2<f64> {
    Point2::new(
        col * metadata.resolution + metadata.origin.x,
        row * metadata.resolution + metadata.origin.y,
    )
}

/// Same as [`cell_to_world`] but lifted onto the z = 0 base plane.
pub fn cell_to_base_plane(col: f64, row: f64, metadata: &MapMetadata) -> Point3<f64> {
    let p = cell_to_world(col, row, metadata);
    Point3::new(p.x, p.y, 0.0)
}
