// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Gridwall Contributors.

//! Mesh merger: concatenate prisms and drop duplicate faces

use super::{Mesh, PrismMesh, Triangle};
use crate::error::{ConversionError, Result};
use ahash::AHashSet;
use nalgebra::Point3;

/// Vertex positions closer than this collapse to the same face key.
pub const KEY_TOLERANCE: f64 = 1e-8;

type QuantizedPoint = [i64; 3];

/// Order-independent identity of a face: its three quantized vertex
/// positions, sorted.
pub type FaceKey = [QuantizedPoint; 3];

fn quantize(point: &Point3<f64>) -> QuantizedPoint {
    [
        (point.x / KEY_TOLERANCE).round() as i64,
        (point.y / KEY_TOLERANCE).round() as i64,
        (point.z / KEY_TOLERANCE).round() as i64,
    ]
}

/// Canonical key for a triangle of `mesh`, independent of vertex order,
/// winding, and vertex index.
pub fn face_key(mesh: &Mesh, triangle: &Triangle) -> FaceKey {
    let mut key = mesh.triangle_positions(triangle).map(|p| quantize(&p));
    key.sort_unstable();
    key
}

/// Merge prisms into one mesh.
///
/// Vertices are concatenated without welding. A face whose three vertex
/// positions match an earlier face is dropped, which removes the second
/// copy of every wall shared by two adjacent cells.
pub fn merge(prisms: &[PrismMesh]) -> Result<Mesh> {
    if prisms.is_empty() {
        return Err(ConversionError::EmptyOccupancy);
    }

    let mut combined = Mesh::with_capacity(prisms.len() * 8, prisms.len() * 12);
    for prism in prisms {
        let triangles: Vec<Triangle> = prism.triangles().collect();
        combined.append(&prism.vertices, &triangles);
    }

    let naive_count = combined.triangle_count();
    let removed = remove_duplicate_faces(&mut combined);
    log::info!(
        "Merged {} prisms: {} faces, {} duplicates removed",
        prisms.len(),
        naive_count,
        removed
    );

    Ok(combined)
}

/// Keep the first occurrence of every face key. Returns the number of
/// faces removed.
pub fn remove_duplicate_faces(mesh: &mut Mesh) -> usize {
    let original = mesh.triangle_count();
    let mut seen: AHashSet<FaceKey> = AHashSet::with_capacity(original);

    let snapshot: &Mesh = mesh;
    let kept: Vec<Triangle> = snapshot
        .triangles
        .iter()
        .filter(|triangle| seen.insert(face_key(snapshot, triangle)))
        .copied()
        .collect();

    mesh.triangles = kept;
    original - mesh.triangle_count()
}
