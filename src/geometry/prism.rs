// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Gridwall Contributors.

//! Prism builder: one occupied cell extruded into a closed box

use super::{Mesh, Triangle};
use crate::error::{ConversionError, Result};
use crate::grid::{cell_to_base_plane, MapMetadata, OccupiedCell};
use nalgebra::{Point3, Vector3};

/// Default wall height in world units
pub const DEFAULT_HEIGHT: f64 = 0.6;

/// Footprint corner offsets from the cell center, as (col, row).
/// Bottom vertices 0..4 use these in order; top vertices 4..8 repeat them.
const CORNER_OFFSETS: [(f64, f64); 4] = [(-0.5, -0.5), (-0.5, 0.5), (0.5, -0.5), (0.5, 0.5)];

/// Fixed box topology over the 8 prism vertices, wound outward.
#[rustfmt::skip]
pub const PRISM_FACES: [[usize; 3]; 12] = [
    [0, 2, 4], [4, 2, 6], // front  (-y)
    [1, 2, 0], [3, 2, 1], // bottom (-z)
    [5, 0, 4], [1, 0, 5], // left   (-x)
    [3, 7, 2], [7, 6, 2], // right  (+x)
    [7, 4, 6], [5, 4, 7], // top    (+z)
    [1, 5, 3], [7, 3, 5], // back   (+y)
];

/// Closed rectangular box standing on one occupied cell
#[derive(Debug, Clone, PartialEq)]
pub struct PrismMesh {
    pub cell: OccupiedCell,
    pub vertices: [Point3<f64>; 8],
    pub faces: [[usize; 3]; 12],
}

impl PrismMesh {
    /// Every undirected edge is used by exactly two faces.
    pub fn is_closed(&self) -> bool {
        let mut counts = [[0u8; 8]; 8];
        for face in &self.faces {
            for i in 0..3 {
                let (a, b) = (face[i], face[(i + 1) % 3]);
                counts[a.min(b)][a.max(b)] += 1;
            }
        }
        self.faces.iter().all(|face| {
            (0..3).all(|i| {
                let (a, b) = (face[i], face[(i + 1) % 3]);
                counts[a.min(b)][a.max(b)] == 2
            })
        })
    }

    /// Every directed edge appears once, so neighbouring faces agree on winding.
    pub fn is_consistently_wound(&self) -> bool {
        let mut counts = [[0u8; 8]; 8];
        for face in &self.faces {
            for i in 0..3 {
                counts[face[i]][face[(i + 1) % 3]] += 1;
            }
        }
        counts.iter().flatten().all(|&count| count <= 1)
    }

    /// Signed volume measured about the prism centroid.
    pub fn signed_volume(&self) -> f64 {
        let c = self.centroid();
        self.faces
            .iter()
            .map(|face| {
                let a = self.vertices[face[0]] - c;
                let b = self.vertices[face[1]] - c;
                let d = self.vertices[face[2]] - c;
                a.dot(&b.cross(&d)) / 6.0
            })
            .sum()
    }

    /// Closed, consistently wound, and enclosing a positive volume.
    pub fn is_volume(&self) -> bool {
        self.vertices.iter().all(|v| v.coords.iter().all(|c| c.is_finite()))
            && self.is_closed()
            && self.is_consistently_wound()
            && self.signed_volume() > 0.0
    }

    /// Re-wind faces so every normal points away from the centroid.
    /// Geometry is untouched. Returns the number of faces flipped.
    pub fn fix_normals(&mut self) -> usize {
        let c = self.centroid();
        let mut flipped = 0;
        for face in &mut self.faces {
            let [v0, v1, v2] = [self.vertices[face[0]], self.vertices[face[1]], self.vertices[face[2]]];
            let normal = (v1 - v0).cross(&(v2 - v0));
            let outward = Point3::from((v0.coords + v1.coords + v2.coords) / 3.0) - c;
            if normal.dot(&outward) < 0.0 {
                face.swap(1, 2);
                flipped += 1;
            }
        }
        flipped
    }

    pub fn centroid(&self) -> Point3<f64> {
        let sum: Vector3<f64> = self.vertices.iter().map(|v| v.coords).sum();
        Point3::from(sum / 8.0)
    }

    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.faces.iter().map(|face| Triangle::new(*face))
    }

    pub fn to_mesh(&self) -> Mesh {
        let mut mesh = Mesh::with_capacity(8, 12);
        let triangles: Vec<Triangle> = self.triangles().collect();
        mesh.append(&self.vertices, &triangles);
        mesh
    }
}

/// Build the prism for `cell`, `height` world units tall.
///
/// Fails with [`ConversionError::DegenerateGeometry`] when the result
/// cannot enclose a volume (non-finite coordinates, non-positive height).
pub fn build_prism(cell: OccupiedCell, metadata: &MapMetadata, height: f64) -> Result<PrismMesh> {
    let degenerate = |message: String| ConversionError::DegenerateGeometry {
        row: cell.row,
        col: cell.col,
        message,
    };

    if !height.is_finite() || height <= 0.0 {
        return Err(degenerate(format!("wall height must be positive, got {}", height)));
    }

    let (col, row) = (cell.col as f64, cell.row as f64);
    let lift = Vector3::new(0.0, 0.0, height);
    let base = CORNER_OFFSETS.map(|(dc, dr)| cell_to_base_plane(col + dc, row + dr, metadata));

    let mut prism = PrismMesh {
        cell,
        vertices: [
            base[0],
            base[1],
            base[2],
            base[3],
            base[0] + lift,
            base[1] + lift,
            base[2] + lift,
            base[3] + lift,
        ],
        faces: PRISM_FACES,
    };

    if !prism.is_volume() {
        let flipped = prism.fix_normals();
        log::debug!(
            "Re-oriented {} faces of prism at (row {}, col {})",
            flipped,
            cell.row,
            cell.col
        );
        if !prism.is_volume() {
            return Err(degenerate(format!(
                "prism is not a closed volume (signed volume {})",
                prism.signed_volume()
            )));
        }
    }

    Ok(prism)
}
