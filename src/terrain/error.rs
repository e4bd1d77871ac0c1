//! Errors raised while building terrain geometry.

use thiserror::Error;

/// Errors that can occur during terrain generation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TerrainError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Index overflow: {vertices} vertices exceed the 16-bit index limit of {max}")]
    IndexOverflow { vertices: usize, max: usize },
    #[error("Degenerate geometry: every vertex sits at height {height}")]
    DegenerateGeometry { height: f32 },
    #[error("Missing dependency: stage '{0}' requires '{1}'")]
    MissingDependency(String, String),
    #[error("Incomplete geometry: {0}")]
    IncompleteGeometry(&'static str),
}
