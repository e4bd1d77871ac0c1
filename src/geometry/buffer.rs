//! Finished, read-only geometry handed to the renderer.

use glam::Vec3;

use super::{mesh::height_range, AttributeChannel, Triangle};

/// Immutable output of a generation run.
///
/// Exposes the three attribute channels in binding order together with the
/// 16-bit triangle index list, both as typed slices and as raw bytes ready
/// for GPU upload.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryBuffer {
    grid_size: usize,
    triangles: Vec<Triangle>,
    positions: Vec<Vec3>,
    colors: Vec<Vec3>,
    normals: Vec<Vec3>,
}

impl GeometryBuffer {
    pub(crate) fn new(
        grid_size: usize,
        triangles: Vec<Triangle>,
        positions: Vec<Vec3>,
        colors: Vec<Vec3>,
        normals: Vec<Vec3>,
    ) -> Self {
        debug_assert_eq!(positions.len(), colors.len());
        debug_assert_eq!(positions.len(), normals.len());
        Self {
            grid_size,
            triangles,
            positions,
            colors,
            normals,
        }
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Returns the triangle list flattened into a single index sequence.
    pub fn indices(&self) -> &[u16] {
        bytemuck::cast_slice(&self.triangles)
    }

    /// Returns the index list as native-endian bytes.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.triangles)
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn colors(&self) -> &[Vec3] {
        &self.colors
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// Returns the data for one attribute channel.
    pub fn channel(&self, channel: AttributeChannel) -> &[Vec3] {
        match channel {
            AttributeChannel::Position => &self.positions,
            AttributeChannel::Color => &self.colors,
            AttributeChannel::Normal => &self.normals,
        }
    }

    /// Returns one channel as tightly packed `f32` components.
    pub fn channel_components(&self, channel: AttributeChannel) -> &[f32] {
        bytemuck::cast_slice(self.channel(channel))
    }

    /// Returns one channel as native-endian bytes.
    pub fn channel_bytes(&self, channel: AttributeChannel) -> &[u8] {
        bytemuck::cast_slice(self.channel(channel))
    }

    /// Returns every channel paired with its identifier, in binding order.
    pub fn channels(&self) -> [(AttributeChannel, &[Vec3]); 3] {
        AttributeChannel::all().map(|c| (c, self.channel(c)))
    }

    /// Returns an iterator over all vertex heights in vertex order.
    pub fn heights(&self) -> impl Iterator<Item = f32> + '_ {
        self.positions.iter().map(|p| p.y)
    }

    /// Returns the (min, max) height across all vertices.
    pub fn height_range(&self) -> (f32, f32) {
        height_range(self.heights())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BASE_COLOR;

    fn buffer() -> GeometryBuffer {
        GeometryBuffer::new(
            2,
            vec![[0, 1, 2], [1, 2, 3]],
            vec![
                Vec3::new(-1.0, 0.0, -1.0),
                Vec3::new(0.0, 0.0, -1.0),
                Vec3::new(-1.0, 0.0, 0.0),
                Vec3::new(0.0, 0.0, 0.0),
            ],
            vec![BASE_COLOR; 4],
            vec![Vec3::Y; 4],
        )
    }

    #[test]
    fn test_indices_are_flattened_triangles() {
        let buffer = buffer();
        assert_eq!(buffer.indices(), &[0, 1, 2, 1, 2, 3]);
        assert_eq!(buffer.index_bytes().len(), 6 * 2);
    }

    #[test]
    fn test_channel_order() {
        let buffer = buffer();
        let channels = buffer.channels();
        assert_eq!(channels[0].0, AttributeChannel::Position);
        assert_eq!(channels[1].0, AttributeChannel::Color);
        assert_eq!(channels[2].0, AttributeChannel::Normal);
        assert_eq!(channels[2].1, buffer.normals());
    }

    #[test]
    fn test_channel_components() {
        let buffer = buffer();
        let colors = buffer.channel_components(AttributeChannel::Color);
        assert_eq!(colors.len(), 4 * AttributeChannel::COMPONENTS);
        assert_eq!(&colors[..3], &[0.75, 0.5, 0.25]);
        assert_eq!(buffer.channel_bytes(AttributeChannel::Position).len(), 4 * 3 * 4);
    }
}
