//! Heightfield geometry module.
//!
//! Provides the geometry value threaded through the generation stages, the
//! finished buffer handed to a renderer, and the vertex/grid coordinate
//! mapping shared by every stage.

mod buffer;
mod channel;
mod grid;
mod mesh;

pub use buffer::GeometryBuffer;
pub use channel::AttributeChannel;
pub use grid::{grid_coords, grid_side, GridCoord};
pub use mesh::{Geometry, Triangle, BASE_COLOR, MAX_VERTICES};
