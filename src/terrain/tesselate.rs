//! Triangulation of the vertex lattice.

use tracing::{debug, warn};

use crate::geometry::{grid_side, Geometry};

/// Connects the vertex lattice into triangles, two per grid cell.
///
/// For each vertex `i` that starts a cell (not in the last row or column)
/// the cell is split into `(i, i+1, i+n)` and `(i+1, i+n, i+n+1)`. A grid of
/// one vertex has no cells and gets no triangles. Geometry whose vertex
/// count is not the square of its grid size is returned untouched.
pub fn tesselate(mut geometry: Geometry) -> Geometry {
    let vertices = geometry.vertex_count();
    let n = geometry.grid_size();
    if grid_side(vertices) != Some(n) {
        warn!(
            grid_size = n,
            vertices, "vertex count does not match grid size; skipping tesselation"
        );
        return geometry;
    }
    if n <= 1 {
        return geometry;
    }

    let cells = vertices - n - 1;
    geometry.triangles.reserve(2 * (n - 1) * (n - 1));
    for i in 0..cells {
        // Skip the last column; it has no cell to its right.
        if i == 0 || (i + 1) % n != 0 {
            // Vertex count is bounded by MAX_VERTICES, so every index fits u16.
            let (a, b, c, d) = (i as u16, (i + 1) as u16, (i + n) as u16, (i + n + 1) as u16);
            geometry.triangles.push([a, b, c]);
            geometry.triangles.push([b, c, d]);
        }
    }

    debug!(triangles = geometry.triangle_count(), "tesselated grid");
    geometry
}
