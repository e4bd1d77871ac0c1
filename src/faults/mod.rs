//! Fault simulation module.
//!
//! A fault splits the grid along a random vertical plane and moves the two
//! sides apart vertically. Repeating this many times builds up ridges,
//! valleys and terraces.

mod half_plane;

pub use half_plane::{apply_faults, Fault};
