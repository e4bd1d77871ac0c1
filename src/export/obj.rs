//! Wavefront OBJ mesh export.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::geometry::GeometryBuffer;

/// Errors that can occur during OBJ export.
#[derive(Error, Debug)]
pub enum ObjExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes the mesh as OBJ text.
///
/// Vertex lines carry the vertex color as the common `v x y z r g b`
/// extension; faces reference matching position and normal indices.
pub fn write_obj<W: Write>(buffer: &GeometryBuffer, writer: &mut W) -> Result<(), ObjExportError> {
    writeln!(
        writer,
        "# faultgen terrain: {} vertices, {} triangles",
        buffer.vertex_count(),
        buffer.triangle_count()
    )?;

    for (p, c) in buffer.positions().iter().zip(buffer.colors()) {
        writeln!(writer, "v {} {} {} {} {} {}", p.x, p.y, p.z, c.x, c.y, c.z)?;
    }
    for n in buffer.normals() {
        writeln!(writer, "vn {} {} {}", n.x, n.y, n.z)?;
    }
    for tri in buffer.triangles() {
        // OBJ indices are 1-based.
        let [a, b, c] = tri.map(|i| u32::from(i) + 1);
        writeln!(writer, "f {a}//{a} {b}//{b} {c}//{c}")?;
    }
    Ok(())
}

/// Exports the mesh to an OBJ file.
pub fn export_obj(buffer: &GeometryBuffer, path: &Path) -> Result<(), ObjExportError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_obj(buffer, &mut writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::generate_seeded;
    use tempfile::tempdir;

    #[test]
    fn test_write_obj_quad() {
        let buffer = generate_seeded(2, 0, 0).unwrap();
        let mut out = Vec::new();
        write_obj(&buffer, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), 4);
        assert_eq!(text.lines().filter(|l| l.starts_with("vn ")).count(), 4);
        assert!(text.contains("v -1 0 -1 0.75 0.5 0.25"));
        for line in text.lines().filter(|l| l.starts_with("vn ")) {
            let n: Vec<f32> = line[3..].split(' ').map(|v| v.parse().unwrap()).collect();
            assert_eq!(n, vec![0.0, 1.0, 0.0]);
        }
        assert!(text.contains("f 1//1 2//2 3//3"));
        assert!(text.contains("f 2//2 3//3 4//4"));
    }

    #[test]
    fn test_export_obj_file() {
        let buffer = generate_seeded(10, 25, 9).unwrap();
        let dir = tempdir().unwrap();
        let path = dir.path().join("terrain.obj");

        export_obj(&buffer, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let faces = text.lines().filter(|l| l.starts_with("f ")).count();
        assert_eq!(faces, buffer.triangle_count());
    }
}
