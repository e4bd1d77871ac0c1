//! Mapping between flat vertex ids and grid coordinates.
//!
//! Vertices are stored row-major: vertex `i` sits in column `i % n` of row
//! `i / n`. Triangulation and fault placement both rely on this layout.

/// A (column, row) coordinate on an `n × n` vertex grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCoord {
    /// Column (X direction).
    pub x: usize,
    /// Row (Z direction).
    pub z: usize,
}

impl GridCoord {
    pub const fn new(x: usize, z: usize) -> Self {
        Self { x, z }
    }

    /// Converts a flat vertex id into its grid coordinate.
    pub const fn from_vertex(vertex: usize, grid_size: usize) -> Self {
        Self {
            x: vertex % grid_size,
            z: vertex / grid_size,
        }
    }

    /// Converts this coordinate back into a flat vertex id.
    pub const fn to_vertex(self, grid_size: usize) -> usize {
        self.z * grid_size + self.x
    }
}

/// Returns the side length of a square grid with `vertex_count` vertices,
/// or `None` if the count is not a perfect square.
pub fn grid_side(vertex_count: usize) -> Option<usize> {
    let side = (vertex_count as f64).sqrt().round() as usize;
    (side * side == vertex_count).then_some(side)
}

/// Returns an iterator over all grid coordinates in vertex order.
pub fn grid_coords(grid_size: usize) -> impl Iterator<Item = GridCoord> {
    (0..grid_size).flat_map(move |z| (0..grid_size).map(move |x| GridCoord::new(x, z)))
}
