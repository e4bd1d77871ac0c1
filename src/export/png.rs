//! PNG export of the terrain grid as heightmap and normal map images.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use glam::Vec3;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ImageBuffer, ImageEncoder, Luma, Rgb};
use thiserror::Error;

use crate::geometry::{GeometryBuffer, GridCoord};

/// Errors that can occur during PNG export.
#[derive(Error, Debug)]
pub enum PngExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid height range: min ({0}) >= max ({1})")]
    InvalidHeightRange(f32, f32),
}

/// Options for PNG export.
#[derive(Debug, Clone)]
pub struct PngExportOptions {
    /// Height mapped to black.
    pub min_height: f32,
    /// Height mapped to white.
    pub max_height: f32,
    /// PNG compression type.
    pub compression: CompressionType,
    /// PNG filter type.
    pub filter: FilterType,
}

impl Default for PngExportOptions {
    fn default() -> Self {
        Self {
            min_height: -0.4,
            max_height: 0.4,
            compression: CompressionType::Default,
            filter: FilterType::Adaptive,
        }
    }
}

impl PngExportOptions {
    /// Creates options with the height range taken from the mesh.
    ///
    /// A flat mesh gets a tiny artificial range so it exports as black.
    pub fn auto_range(buffer: &GeometryBuffer) -> Self {
        let (min, max) = buffer.height_range();
        let max = if max > min { max } else { min + 1e-6 };
        Self {
            min_height: min,
            max_height: max,
            ..Default::default()
        }
    }
}

fn side(buffer: &GeometryBuffer) -> u32 {
    buffer.grid_size() as u32
}

/// Exports the heights as a 16-bit grayscale PNG, one pixel per vertex.
///
/// Row `z` of the grid becomes image row `z`.
pub fn export_heightmap_png(
    buffer: &GeometryBuffer,
    path: &Path,
    options: &PngExportOptions,
) -> Result<(), PngExportError> {
    let min = options.min_height;
    let max = options.max_height;
    if min >= max {
        return Err(PngExportError::InvalidHeightRange(min, max));
    }

    let n = side(buffer);
    let range = max - min;
    let mut img: ImageBuffer<Luma<u16>, Vec<u16>> = ImageBuffer::new(n, n);

    for (i, height) in buffer.heights().enumerate() {
        let c = GridCoord::from_vertex(i, buffer.grid_size());
        let normalized = ((height - min) / range).clamp(0.0, 1.0);
        img.put_pixel(c.x as u32, c.z as u32, Luma([(normalized * 65535.0) as u16]));
    }

    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let encoder = PngEncoder::new_with_quality(writer, options.compression, options.filter);
    let byte_slice: &[u8] = bytemuck::cast_slice(img.as_raw());
    encoder.write_image(byte_slice, n, n, image::ExtendedColorType::L16)?;
    Ok(())
}

fn encode_normal_rgb8(n: Vec3) -> [u8; 3] {
    let c = (n * 0.5) + Vec3::splat(0.5);
    [
        (c.x.clamp(0.0, 1.0) * 255.0).round() as u8,
        (c.y.clamp(0.0, 1.0) * 255.0).round() as u8,
        (c.z.clamp(0.0, 1.0) * 255.0).round() as u8,
    ]
}

/// Exports the vertex normals as an RGB PNG, one pixel per vertex.
///
/// Components are mapped from `[-1, 1]` to `[0, 255]` in X, Y, Z order, so a
/// flat terrain is a uniform (128, 255, 128).
pub fn export_normal_map_png(
    buffer: &GeometryBuffer,
    path: &Path,
    options: &PngExportOptions,
) -> Result<(), PngExportError> {
    let n = side(buffer);
    let mut img: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::new(n, n);

    for (i, &normal) in buffer.normals().iter().enumerate() {
        let c = GridCoord::from_vertex(i, buffer.grid_size());
        img.put_pixel(c.x as u32, c.z as u32, Rgb(encode_normal_rgb8(normal)));
    }

    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let encoder = PngEncoder::new_with_quality(writer, options.compression, options.filter);
    encoder.write_image(img.as_raw(), n, n, image::ExtendedColorType::Rgb8)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::generate_seeded;
    use tempfile::tempdir;

    #[test]
    fn test_export_heightmap_png() {
        let buffer = generate_seeded(16, 40, 42).unwrap();
        let dir = tempdir().unwrap();
        let path = dir.path().join("height.png");

        export_heightmap_png(&buffer, &path, &PngExportOptions::auto_range(&buffer)).unwrap();

        let img = image::open(&path).unwrap().to_luma16();
        assert_eq!(img.dimensions(), (16, 16));
        let values: Vec<u16> = img.pixels().map(|p| p.0[0]).collect();
        assert_eq!(values.iter().min(), Some(&0));
        assert_eq!(values.iter().max(), Some(&65535));
    }

    #[test]
    fn test_invalid_height_range() {
        let buffer = generate_seeded(2, 0, 0).unwrap();
        let dir = tempdir().unwrap();
        let options = PngExportOptions {
            min_height: 1.0,
            max_height: 1.0,
            ..Default::default()
        };

        let result = export_heightmap_png(&buffer, &dir.path().join("bad.png"), &options);
        assert!(matches!(result, Err(PngExportError::InvalidHeightRange(_, _))));
    }

    #[test]
    fn test_flat_normal_map() {
        let buffer = generate_seeded(4, 0, 0).unwrap();
        let dir = tempdir().unwrap();
        let path = dir.path().join("normals.png");

        export_normal_map_png(&buffer, &path, &PngExportOptions::default()).unwrap();

        let img = image::open(&path).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (4, 4));
        assert!(img.pixels().all(|p| p.0 == [128, 255, 128]));
    }

    #[test]
    fn test_encode_normal() {
        assert_eq!(encode_normal_rgb8(Vec3::Y), [128, 255, 128]);
        assert_eq!(encode_normal_rgb8(-Vec3::X), [0, 128, 128]);
    }
}
