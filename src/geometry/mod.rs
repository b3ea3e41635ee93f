// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Gridwall Contributors.

//! Geometry module - mesh representation, prism construction and merging

mod analytics;
mod bbox;
mod merge;
mod mesh;
mod prism;

pub use analytics::{analyze, GeometryStats};
pub use bbox::BoundingBox;
pub use merge::{face_key, merge, remove_duplicate_faces, FaceKey, KEY_TOLERANCE};
pub use mesh::{Mesh, Triangle};
pub use prism::{build_prism, PrismMesh, DEFAULT_HEIGHT, PRISM_FACES};
