//! Export module for saving generated meshes.
//!
//! Supports RAW buffers laid out for GPU upload, Wavefront OBJ for mesh
//! tools, and PNG heightmap/normal map images.

mod obj;
mod png;
mod raw;

pub use obj::{export_obj, write_obj, ObjExportError};
pub use png::{export_heightmap_png, export_normal_map_png, PngExportError, PngExportOptions};
pub use raw::{
    expected_channel_size, expected_index_size, export_channel_raw, export_indices_raw,
    export_mesh_raw, RawExportError,
};
