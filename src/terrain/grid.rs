//! Flat vertex lattice construction.

use glam::Vec3;
use tracing::debug;

use super::TerrainError;
use crate::geometry::{grid_coords, Geometry, BASE_COLOR, MAX_VERTICES};

/// Side length of the grid footprint in world units (it starts at -1).
const GRID_EXTENT: f32 = 2.0;

/// Builds a flat `grid_size × grid_size` lattice in the X-Z plane.
///
/// Vertices start at (-1, 0, -1) and advance by `2 / grid_size` per column
/// and row, row-major. Every vertex gets [`BASE_COLOR`]. No triangles are
/// emitted.
///
/// # Errors
/// `InvalidArgument` for a zero grid size, `IndexOverflow` when the vertex
/// count would not fit a 16-bit index buffer.
pub fn build_grid(grid_size: usize) -> Result<Geometry, TerrainError> {
    if grid_size == 0 {
        return Err(TerrainError::InvalidArgument(
            "grid size must be at least 1".to_string(),
        ));
    }

    let vertices = grid_size
        .checked_mul(grid_size)
        .filter(|&v| v <= MAX_VERTICES)
        .ok_or(TerrainError::IndexOverflow {
            vertices: grid_size.saturating_mul(grid_size),
            max: MAX_VERTICES,
        })?;

    let step = GRID_EXTENT / grid_size as f32;
    let positions: Vec<Vec3> = grid_coords(grid_size)
        .map(|c| Vec3::new(-1.0 + c.x as f32 * step, 0.0, -1.0 + c.z as f32 * step))
        .collect();

    debug!(grid_size, vertices, step, "built vertex grid");
    Ok(Geometry::from_channels(grid_size, positions, vec![BASE_COLOR; vertices]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_vertex_count() {
        for n in 1..=8 {
            let geometry = build_grid(n).unwrap();
            assert_eq!(geometry.vertex_count(), n * n);
            assert_eq!(geometry.colors().len(), n * n);
            assert_eq!(geometry.triangle_count(), 0);
        }
    }

    #[test]
    fn test_grid_two_by_two_layout() {
        let geometry = build_grid(2).unwrap();
        assert_eq!(
            geometry.positions(),
            &[
                Vec3::new(-1.0, 0.0, -1.0),
                Vec3::new(0.0, 0.0, -1.0),
                Vec3::new(-1.0, 0.0, 0.0),
                Vec3::new(0.0, 0.0, 0.0),
            ]
        );
    }

    #[test]
    fn test_grid_is_row_major() {
        let geometry = build_grid(4).unwrap();
        let step = 0.5;
        // Vertex 6 is column 2 of row 1.
        let p = geometry.positions()[6];
        assert!((p.x - (-1.0 + 2.0 * step)).abs() < 1e-6);
        assert!((p.z - (-1.0 + step)).abs() < 1e-6);
        assert!(geometry.heights().all(|h| h == 0.0));
        assert!(geometry.colors().iter().all(|&c| c == BASE_COLOR));
    }

    #[test]
    fn test_grid_zero_is_invalid() {
        assert!(matches!(build_grid(0), Err(TerrainError::InvalidArgument(_))));
    }

    #[test]
    fn test_grid_index_limit() {
        assert_eq!(build_grid(256).unwrap().vertex_count(), MAX_VERTICES);
        assert_eq!(
            build_grid(257),
            Err(TerrainError::IndexOverflow {
                vertices: 257 * 257,
                max: MAX_VERTICES
            })
        );
    }
}
