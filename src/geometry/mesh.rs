//! The mutable geometry value passed between generation stages.

use glam::Vec3;

use super::{AttributeChannel, GeometryBuffer};
use crate::terrain::TerrainError;

/// A triangle as three indices into the vertex channels.
pub type Triangle = [u16; 3];

/// Largest vertex count addressable by a 16-bit index buffer.
pub const MAX_VERTICES: usize = u16::MAX as usize + 1;

/// Color assigned to every grid vertex.
pub const BASE_COLOR: Vec3 = Vec3::new(0.75, 0.5, 0.25);

/// Heightfield geometry under construction.
///
/// All channels are parallel arrays of length `grid_size²` indexed by the
/// same vertex id. The normal channel is absent until normals are estimated.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub(crate) grid_size: usize,
    pub(crate) triangles: Vec<Triangle>,
    pub(crate) positions: Vec<Vec3>,
    pub(crate) colors: Vec<Vec3>,
    pub(crate) normals: Option<Vec<Vec3>>,
}

impl Geometry {
    /// Creates geometry from position and color channels with no triangles.
    ///
    /// The caller guarantees both channels hold `grid_size²` entries and that
    /// the count fits [`MAX_VERTICES`].
    pub(crate) fn from_channels(grid_size: usize, positions: Vec<Vec3>, colors: Vec<Vec3>) -> Self {
        debug_assert_eq!(positions.len(), grid_size * grid_size);
        debug_assert_eq!(colors.len(), positions.len());
        debug_assert!(positions.len() <= MAX_VERTICES);
        Self {
            grid_size,
            triangles: Vec::new(),
            positions,
            colors,
            normals: None,
        }
    }

    /// Returns the number of vertices along each side of the grid.
    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// Returns the total number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Returns the number of triangles emitted so far.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn colors(&self) -> &[Vec3] {
        &self.colors
    }

    /// Returns the normal channel, or `None` before normal estimation.
    pub fn normals(&self) -> Option<&[Vec3]> {
        self.normals.as_deref()
    }

    /// Returns the given channel if it has been populated.
    pub fn channel(&self, channel: AttributeChannel) -> Option<&[Vec3]> {
        match channel {
            AttributeChannel::Position => Some(&self.positions),
            AttributeChannel::Color => Some(&self.colors),
            AttributeChannel::Normal => self.normals(),
        }
    }

    /// Returns the height (Y) of a vertex.
    ///
    /// # Panics
    /// Panics if `vertex` is out of bounds.
    pub fn height(&self, vertex: usize) -> f32 {
        self.positions[vertex].y
    }

    /// Sets the height (Y) of a vertex.
    ///
    /// # Panics
    /// Panics if `vertex` is out of bounds.
    pub fn set_height(&mut self, vertex: usize, height: f32) {
        self.positions[vertex].y = height;
    }

    /// Returns an iterator over all vertex heights in vertex order.
    pub fn heights(&self) -> impl Iterator<Item = f32> + '_ {
        self.positions.iter().map(|p| p.y)
    }

    /// Returns a mutable iterator over all vertex heights.
    pub fn heights_mut(&mut self) -> impl Iterator<Item = &mut f32> + '_ {
        self.positions.iter_mut().map(|p| &mut p.y)
    }

    /// Returns the (min, max) height across all vertices.
    pub fn height_range(&self) -> (f32, f32) {
        height_range(self.heights())
    }

    /// Freezes the geometry into an immutable [`GeometryBuffer`].
    ///
    /// Fails if the normal channel has not been populated.
    pub fn into_buffer(self) -> Result<GeometryBuffer, TerrainError> {
        let normals = self
            .normals
            .ok_or(TerrainError::IncompleteGeometry("normal channel missing"))?;
        Ok(GeometryBuffer::new(
            self.grid_size,
            self.triangles,
            self.positions,
            self.colors,
            normals,
        ))
    }
}

/// Computes the (min, max) of a sequence of heights.
///
/// Returns `(0.0, 0.0)` for an empty sequence.
pub(crate) fn height_range(heights: impl Iterator<Item = f32>) -> (f32, f32) {
    let (min, max) = heights.fold((f32::MAX, f32::MIN), |(lo, hi), h| (lo.min(h), hi.max(h)));
    if min > max {
        (0.0, 0.0)
    } else {
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> Geometry {
        let positions = vec![
            Vec3::new(-1.0, 0.0, -1.0),
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 0.0),
        ];
        Geometry::from_channels(2, positions, vec![BASE_COLOR; 4])
    }

    #[test]
    fn test_geometry_creation() {
        let geometry = quad();
        assert_eq!(geometry.grid_size(), 2);
        assert_eq!(geometry.vertex_count(), 4);
        assert_eq!(geometry.triangle_count(), 0);
        assert!(geometry.normals().is_none());
        assert!(geometry.channel(AttributeChannel::Normal).is_none());
        assert_eq!(geometry.channel(AttributeChannel::Color).unwrap().len(), 4);
    }

    #[test]
    fn test_get_set_height() {
        let mut geometry = quad();
        geometry.set_height(3, 0.5);
        assert_eq!(geometry.height(3), 0.5);
        assert_eq!(geometry.positions()[3], Vec3::new(0.0, 0.5, 0.0));
    }

    #[test]
    fn test_height_range() {
        let mut geometry = quad();
        geometry.set_height(0, -0.5);
        geometry.set_height(2, 1.5);

        let (min, max) = geometry.height_range();
        assert_eq!(min, -0.5);
        assert_eq!(max, 1.5);
    }

    #[test]
    fn test_heights_mut() {
        let mut geometry = quad();
        for h in geometry.heights_mut() {
            *h += 2.0;
        }
        assert!(geometry.heights().all(|h| h == 2.0));
    }

    #[test]
    fn test_into_buffer_requires_normals() {
        let result = quad().into_buffer();
        assert!(matches!(result, Err(TerrainError::IncompleteGeometry(_))));
    }

    #[test]
    fn test_empty_height_range() {
        assert_eq!(height_range(std::iter::empty()), (0.0, 0.0));
    }
}
