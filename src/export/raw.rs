//! RAW buffer export, laid out exactly as a GPU upload consumes it.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::geometry::{AttributeChannel, GeometryBuffer};

/// Errors that can occur during RAW export.
#[derive(Error, Debug)]
pub enum RawExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes one attribute channel as little-endian `f32` triples.
pub fn export_channel_raw(
    buffer: &GeometryBuffer,
    channel: AttributeChannel,
    path: &Path,
) -> Result<(), RawExportError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    for &component in buffer.channel_components(channel) {
        writer.write_all(&component.to_le_bytes())?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the triangle list as little-endian `u16` indices.
pub fn export_indices_raw(buffer: &GeometryBuffer, path: &Path) -> Result<(), RawExportError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    for &index in buffer.indices() {
        writer.write_all(&index.to_le_bytes())?;
    }
    writer.flush()?;
    Ok(())
}

/// Exports every channel and the index list as separate RAW files.
///
/// Files are named `{base_name}_{channel}.raw` and `{base_name}_indices.raw`.
pub fn export_mesh_raw(
    buffer: &GeometryBuffer,
    output_dir: &Path,
    base_name: &str,
) -> Result<(), RawExportError> {
    std::fs::create_dir_all(output_dir)?;

    for channel in AttributeChannel::all() {
        let filename = format!("{}_{}.raw", base_name, channel.short_name());
        export_channel_raw(buffer, channel, &output_dir.join(filename))?;
    }
    export_indices_raw(buffer, &output_dir.join(format!("{}_indices.raw", base_name)))?;

    Ok(())
}

/// Returns the byte size of one channel file for the given grid size.
///
/// Saturates at `u64::MAX` for grid sizes far beyond the index limit.
pub fn expected_channel_size(grid_size: usize) -> u64 {
    let side = grid_size as u64;
    side.saturating_mul(side).saturating_mul(AttributeChannel::COMPONENTS as u64 * 4)
}

/// Returns the byte size of the index file for the given grid size.
///
/// Saturates at `u64::MAX` like [`expected_channel_size`].
pub fn expected_index_size(grid_size: usize) -> u64 {
    let cells = grid_size.saturating_sub(1) as u64;
    cells.saturating_mul(cells).saturating_mul(2 * 3 * 2)
}
