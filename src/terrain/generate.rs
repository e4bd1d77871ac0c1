//! Terrain generation entry points.

use rand::RngCore;
use tracing::info;

use super::{build_grid, TerrainError};
use crate::config::TerrainConfig;
use crate::geometry::GeometryBuffer;
use crate::pipeline::Pipeline;

/// Generates a fault terrain mesh.
///
/// Builds a `grid_size × grid_size` grid, triangulates it, applies
/// `fault_count` random faults drawn from `rng`, normalizes heights into the
/// default span and estimates vertex normals.
///
/// # Errors
/// `InvalidArgument` if `grid_size < 1` or `fault_count < 0`,
/// `IndexOverflow` if `grid_size²` exceeds the 16-bit index range.
pub fn generate<R: RngCore>(
    grid_size: i64,
    fault_count: i64,
    rng: &mut R,
) -> Result<GeometryBuffer, TerrainError> {
    let config = TerrainConfig::from_args(grid_size, fault_count)?;
    generate_with_config(&config, rng)
}

/// Like [`generate`], using a ChaCha8 generator seeded with `seed`.
pub fn generate_seeded(grid_size: i64, fault_count: i64, seed: u64) -> Result<GeometryBuffer, TerrainError> {
    let config = TerrainConfig {
        seed,
        ..TerrainConfig::from_args(grid_size, fault_count)?
    };
    generate_with_config(&config, &mut config.rng())
}

/// Generates a terrain mesh from a full configuration.
///
/// The configuration's seed is ignored; randomness comes from `rng`.
pub fn generate_with_config<R: RngCore>(
    config: &TerrainConfig,
    rng: &mut R,
) -> Result<GeometryBuffer, TerrainError> {
    config.validate()?;

    let geometry = build_grid(config.grid_size)?;
    let geometry = Pipeline::standard(config).run(geometry, rng)?;
    let buffer = geometry.into_buffer()?;

    info!(
        grid_size = config.grid_size,
        faults = config.fault_count,
        vertices = buffer.vertex_count(),
        triangles = buffer.triangle_count(),
        "generated terrain"
    );
    Ok(buffer)
}
