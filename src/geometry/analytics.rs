// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Gridwall Contributors.

//! Geometry analytics and statistics

use super::{merge::face_key, Mesh};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Geometry statistics and analytics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryStats {
    /// Absolute enclosed volume in cubic world units
    pub volume: f64,
    /// Total surface area in square world units
    pub surface_area: f64,
    /// Bounding box [min_x, min_y, min_z, max_x, max_y, max_z]
    pub bbox: [f64; 6],
    /// Number of vertices
    pub vertex_count: usize,
    /// Number of triangles
    pub triangle_count: usize,
    /// Edges (by position) bordered by exactly one face
    pub boundary_edges: usize,
    /// Edges (by position) bordered by more than two faces
    pub non_manifold_edges: usize,
    /// Highest number of times any face occurs
    pub max_face_multiplicity: usize,
    /// Every edge (by position) borders exactly two faces
    pub is_watertight: bool,
}

impl GeometryStats {
    /// Create empty stats
    pub fn empty() -> Self {
        Self {
            volume: 0.0,
            surface_area: 0.0,
            bbox: [0.0; 6],
            vertex_count: 0,
            triangle_count: 0,
            boundary_edges: 0,
            non_manifold_edges: 0,
            max_face_multiplicity: 0,
            is_watertight: false,
        }
    }
}

/// Analyze mesh geometry and compute statistics
pub fn analyze(mesh: &Mesh) -> GeometryStats {
    let vertex_count = mesh.vertex_count();
    let triangle_count = mesh.triangle_count();

    if vertex_count == 0 || triangle_count == 0 {
        return GeometryStats::empty();
    }

    let bbox = mesh.bounding_box();
    let edges = edge_usage(mesh);
    let boundary_edges = edges.values().filter(|&&n| n == 1).count();
    let non_manifold_edges = edges.values().filter(|&&n| n > 2).count();

    GeometryStats {
        volume: mesh.signed_volume().abs(),
        surface_area: calculate_surface_area(mesh),
        bbox: [
            bbox.min.x, bbox.min.y, bbox.min.z, bbox.max.x, bbox.max.y, bbox.max.z,
        ],
        vertex_count,
        triangle_count,
        boundary_edges,
        non_manifold_edges,
        max_face_multiplicity: max_face_multiplicity(mesh),
        is_watertight: boundary_edges == 0 && non_manifold_edges == 0,
    }
}

/// Calculate total surface area
fn calculate_surface_area(mesh: &Mesh) -> f64 {
    mesh.triangles
        .iter()
        .map(|triangle| {
            let [v0, v1, v2] = mesh.triangle_positions(triangle);
            (v1 - v0).cross(&(v2 - v0)).norm() / 2.0
        })
        .sum()
}

/// Count faces per undirected edge. Edges are keyed by vertex position,
/// since merged prisms keep their own copies of shared corners.
fn edge_usage(mesh: &Mesh) -> AHashMap<[[i64; 3]; 2], usize> {
    let mut edge_count = AHashMap::new();

    for triangle in &mesh.triangles {
        let corners = face_key(mesh, triangle);
        for (a, b) in [(0, 1), (1, 2), (0, 2)] {
            *edge_count.entry([corners[a], corners[b]]).or_insert(0) += 1;
        }
    }

    edge_count
}

fn max_face_multiplicity(mesh: &Mesh) -> usize {
    let mut counts = AHashMap::new();
    for triangle in &mesh.triangles {
        *counts.entry(face_key(mesh, triangle)).or_insert(0usize) += 1;
    }
    counts.values().copied().max().unwrap_or(0)
}
