//! Height normalization into a fixed vertical span.

use tracing::debug;

use super::TerrainError;
use crate::geometry::Geometry;

/// Default total height span after normalization.
pub const DEFAULT_HEIGHT_SPAN: f32 = 0.8;

/// Rescales heights in place so they span exactly `[-span/2, span/2]`.
///
/// Each height becomes `span * (y - mean) / range` where `mean` is the
/// midpoint of the raw range. Returns the raw (min, max) range.
///
/// # Errors
/// `DegenerateGeometry` if every vertex has the same height (or the range
/// is not finite); the geometry is left untouched in that case.
pub fn rescale_heights(geometry: &mut Geometry, span: f32) -> Result<(f32, f32), TerrainError> {
    let (min, max) = geometry.height_range();
    let range = max - min;
    if !(range > 0.0 && range.is_finite()) {
        return Err(TerrainError::DegenerateGeometry { height: min });
    }

    let mean = 0.5 * (max + min);
    for h in geometry.heights_mut() {
        *h = span * (*h - mean) / range;
    }
    Ok((min, max))
}

/// Normalizes heights into `[-span/2, span/2]`.
///
/// A flat heightfield cannot be rescaled; it is recentred at height 0 instead.
pub fn normalize_heights(mut geometry: Geometry, span: f32) -> Geometry {
    match rescale_heights(&mut geometry, span) {
        Ok((min, max)) => {
            debug!(min, max, span, "normalized heights");
        }
        Err(err) => {
            debug!(%err, "flattening heightfield");
            for h in geometry.heights_mut() {
                *h = 0.0;
            }
        }
    }
    geometry
}
