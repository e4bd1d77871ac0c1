//! Procedural fault-line terrain mesh generator.
//!
//! Builds a square vertex grid, triangulates it, raises and lowers it along
//! random fault planes, normalizes the heights and estimates vertex normals.
//! The result is a [`GeometryBuffer`] with position, color and normal
//! channels plus a 16-bit index list, ready for GPU upload.

pub mod config;
pub mod export;
pub mod faults;
pub mod geometry;
pub mod pipeline;
pub mod terrain;

pub use config::{ConfigError, TerrainConfig};
pub use faults::Fault;
pub use geometry::{AttributeChannel, Geometry, GeometryBuffer, GridCoord};
pub use pipeline::{
    FaultStage, GenerationStage, NormalStage, NormalizationStage, Pipeline, StageId,
    TesselationStage,
};
pub use terrain::{generate, generate_seeded, generate_with_config, TerrainError};
