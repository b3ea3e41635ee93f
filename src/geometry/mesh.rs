// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Gridwall Contributors.

//! Mesh representation and utilities

use super::BoundingBox;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Triangle defined by three vertex indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triangle {
    pub indices: [usize; 3],
}

impl Triangle {
    pub fn new(indices: [usize; 3]) -> Self {
        Self { indices }
    }
}

/// Indexed triangle mesh
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub vertices: Vec<Point3<f64>>,
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(triangle_count),
        }
    }

    /// Add a vertex and return its index
    pub fn add_vertex(&mut self, position: Point3<f64>) -> usize {
        let index = self.vertices.len();
        self.vertices.push(position);
        index
    }

    /// Add a triangle
    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Get vertex count
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get triangle count
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Append another mesh's vertices and triangles, offsetting indices.
    /// Coincident vertices are not welded.
    pub fn append(&mut self, vertices: &[Point3<f64>], triangles: &[Triangle]) {
        let offset = self.vertices.len();
        self.vertices.extend_from_slice(vertices);

        for triangle in triangles {
            self.triangles.push(Triangle::new([
                triangle.indices[0] + offset,
                triangle.indices[1] + offset,
                triangle.indices[2] + offset,
            ]));
        }
    }

    /// Vertex positions of a triangle
    pub fn triangle_positions(&self, triangle: &Triangle) -> [Point3<f64>; 3] {
        [
            self.vertices[triangle.indices[0]],
            self.vertices[triangle.indices[1]],
            self.vertices[triangle.indices[2]],
        ]
    }

    /// Unit normal implied by the triangle winding (zero for degenerate faces)
    pub fn face_normal(&self, triangle: &Triangle) -> Vector3<f64> {
        let [v0, v1, v2] = self.triangle_positions(triangle);
        let normal = (v1 - v0).cross(&(v2 - v0));
        let length = normal.norm();
        if length > 1e-12 {
            normal / length
        } else {
            Vector3::zeros()
        }
    }

    /// Signed enclosed volume; positive when faces wind outward.
    pub fn signed_volume(&self) -> f64 {
        self.triangles
            .iter()
            .map(|triangle| {
                let [v0, v1, v2] = self.triangle_positions(triangle);
                v0.coords.dot(&v1.coords.cross(&v2.coords)) / 6.0
            })
            .sum()
    }

    /// Compute bounding box
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(&self.vertices)
    }
}
