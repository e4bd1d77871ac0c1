//! Terrain generation module.
//!
//! Builds the vertex grid, triangulates it, normalizes heights and estimates
//! normals. Fault displacement lives in [`crate::faults`].

mod error;
mod generate;
mod grid;
mod heightmap;
mod normals;
mod tesselate;

pub use error::TerrainError;
pub use generate::{generate, generate_seeded, generate_with_config};
pub use grid::build_grid;
pub use heightmap::{normalize_heights, rescale_heights, DEFAULT_HEIGHT_SPAN};
pub use normals::estimate_normals;
pub use tesselate::tesselate;
