// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Gridwall Contributors.

//! STL exporter

use crate::error::{ConversionError, Result};
use crate::geometry::Mesh;
use serde::{Deserialize, Serialize};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// STL flavour to write
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StlFormat {
    #[default]
    Binary,
    Ascii,
}

/// Output file for a map: `<export_dir>/<image stem>.stl`
pub fn output_path_for(export_dir: impl AsRef<Path>, image: &str) -> PathBuf {
    let name = Path::new(image)
        .file_name()
        .map(|n| Path::new(n).with_extension("stl"))
        .unwrap_or_else(|| PathBuf::from("map.stl"));
    export_dir.as_ref().join(name)
}

/// Export mesh to STL.
///
/// The file is written to a temporary file next to `path` and moved into
/// place only once fully written, so a failed export leaves nothing behind.
pub fn export_stl(mesh: &Mesh, path: impl AsRef<Path>, format: StlFormat) -> Result<()> {
    let path = path.as_ref();
    let fail = |e: &dyn std::fmt::Display| ConversionError::export(path, e);

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir).map_err(|e| fail(&e))?;

    let written = match format {
        StlFormat::Binary => write_stl_binary(mesh, file.as_file_mut()),
        StlFormat::Ascii => write_stl_ascii(mesh, file.as_file_mut()),
    };
    written.map_err(|e| fail(&e))?;

    file.persist(path).map_err(|e| fail(&e))?;
    log::info!("Exported {} faces to {}", mesh.triangle_count(), path.display());
    Ok(())
}

fn to_stl_triangles(mesh: &Mesh) -> Vec<stl_io::Triangle> {
    use stl_io::{Normal, Triangle as StlTriangle, Vertex as StlVertex};

    let vertex = |p: &nalgebra::Point3<f64>| StlVertex::new([p.x as f32, p.y as f32, p.z as f32]);

    mesh.triangles
        .iter()
        .map(|tri| {
            let [v0, v1, v2] = mesh.triangle_positions(tri);
            let normal = mesh.face_normal(tri);

            StlTriangle {
                normal: Normal::new([normal.x as f32, normal.y as f32, normal.z as f32]),
                vertices: [vertex(&v0), vertex(&v1), vertex(&v2)],
            }
        })
        .collect()
}

fn write_stl_binary<W: Write>(mesh: &Mesh, writer: &mut W) -> std::io::Result<()> {
    let triangles = to_stl_triangles(mesh);
    let mut writer = BufWriter::new(writer);
    stl_io::write_stl(&mut writer, triangles.iter())?;
    writer.flush()
}

fn write_stl_ascii<W: Write>(mesh: &Mesh, writer: &mut W) -> std::io::Result<()> {
    let mut out = BufWriter::new(writer);

    writeln!(out, "solid gridwall")?;

    for tri in &mesh.triangles {
        let normal = mesh.face_normal(tri);
        writeln!(out, "  facet normal {} {} {}", normal.x, normal.y, normal.z)?;
        writeln!(out, "    outer loop")?;
        for v in mesh.triangle_positions(tri) {
            writeln!(out, "      vertex {} {} {}", v.x, v.y, v.z)?;
        }
        writeln!(out, "    endloop")?;
        writeln!(out, "  endfacet")?;
    }

    writeln!(out, "endsolid gridwall")?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::build_prism;
    use crate::grid::{MapMetadata, OccupiedCell};
    use nalgebra::Vector2;
    use std::fs::File;
    use tempfile::TempDir;

    fn prism_mesh() -> Mesh {
        let metadata = MapMetadata::new("test.pgm", 1.0, Vector2::zeros()).unwrap();
        build_prism(OccupiedCell::new(0, 0), &metadata, 0.6)
            .unwrap()
            .to_mesh()
    }

    #[test]
    fn test_output_path_for() {
        assert_eq!(
            output_path_for("/tmp/out", "office.pgm"),
            PathBuf::from("/tmp/out/office.stl")
        );
        assert_eq!(
            output_path_for(".", "maps/lab.png"),
            PathBuf::from("./lab.stl")
        );
        assert_eq!(output_path_for("out", ""), PathBuf::from("out/map.stl"));
    }

    #[test]
    fn test_export_binary_stl() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("prism.stl");

        export_stl(&prism_mesh(), &path, StlFormat::Binary)?;

        let stl = stl_io::read_stl(&mut File::open(&path)?)?;
        assert_eq!(stl.faces.len(), 12);
        // 80-byte header + count + 50 bytes per face
        assert_eq!(std::fs::metadata(&path)?.len(), 84 + 12 * 50);
        Ok(())
    }

    #[test]
    fn test_export_ascii_stl() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("prism.stl");

        export_stl(&prism_mesh(), &path, StlFormat::Ascii)?;

        let text = std::fs::read_to_string(&path)?;
        assert!(text.starts_with("solid gridwall"));
        assert_eq!(text.matches("facet normal").count(), 12);
        Ok(())
    }

    #[test]
    fn test_export_into_missing_dir_fails_cleanly() {
        let err = export_stl(&prism_mesh(), "/nonexistent/dir/out.stl", StlFormat::Binary)
            .unwrap_err();
        assert!(matches!(err, ConversionError::Export { .. }));
    }
}
