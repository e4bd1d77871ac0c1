//! Per-vertex normal estimation from triangle faces.

use glam::Vec3;
use tracing::debug;

use crate::geometry::Geometry;

/// Computes an area-weighted unit normal for every vertex and appends the
/// normal channel.
///
/// Each triangle's unscaled face normal `(p1 - p0) × (p2 - p0)` is added to
/// its three vertices, then every sum is normalized. Face normals are turned
/// to point up (+Y) first: adjacent grid triangles have opposite winding,
/// and every heightfield face projects onto the X-Z plane with non-zero
/// area, so the Y component never vanishes. Vertices touched by no triangle
/// get (0, 1, 0).
pub fn estimate_normals(mut geometry: Geometry) -> Geometry {
    let positions = &geometry.positions;
    let mut accum = vec![Vec3::ZERO; positions.len()];

    for tri in &geometry.triangles {
        let [a, b, c] = tri.map(usize::from);
        let p0 = positions[a];
        let face = (positions[b] - p0).cross(positions[c] - p0);
        let face = if face.y < 0.0 { -face } else { face };

        accum[a] += face;
        accum[b] += face;
        accum[c] += face;
    }

    let normals: Vec<Vec3> = accum
        .into_iter()
        .map(|n| {
            let unit = n.normalize_or_zero();
            if unit == Vec3::ZERO {
                Vec3::Y
            } else {
                unit
            }
        })
        .collect();

    debug!(vertices = normals.len(), "estimated vertex normals");
    geometry.normals = Some(normals);
    geometry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::{build_grid, tesselate};
    use proptest::prelude::*;

    fn mesh(n: usize) -> Geometry {
        tesselate(build_grid(n).unwrap())
    }

    #[test]
    fn test_flat_grid_points_up() {
        for n in [2, 3, 8] {
            let geometry = estimate_normals(mesh(n));
            let normals = geometry.normals().unwrap();
            assert_eq!(normals.len(), n * n);
            for normal in normals {
                assert!((*normal - Vec3::Y).length() < 1e-6, "{:?}", normal);
            }
        }
    }

    #[test]
    fn test_single_vertex_defaults_up() {
        let geometry = estimate_normals(mesh(1));
        assert_eq!(geometry.normals().unwrap(), &[Vec3::Y]);
    }

    #[test]
    fn test_sloped_plane() {
        let slope = 0.5;
        let mut geometry = mesh(4);
        for i in 0..geometry.vertex_count() {
            let x = geometry.positions()[i].x;
            geometry.set_height(i, slope * x);
        }

        let geometry = estimate_normals(geometry);
        let expected = Vec3::new(-slope, 1.0, 0.0).normalize();
        for normal in geometry.normals().unwrap() {
            assert!((*normal - expected).length() < 1e-5, "{:?}", normal);
        }
    }

    #[test]
    fn test_positions_unchanged() {
        let before = mesh(3);
        let after = estimate_normals(before.clone());
        assert_eq!(before.positions(), after.positions());
        assert_eq!(before.triangles(), after.triangles());
    }

    proptest! {
        #[test]
        fn prop_normals_are_unit_and_up(heights in proptest::collection::vec(-1.0f32..1.0, 25)) {
            let mut geometry = mesh(5);
            for (i, h) in heights.into_iter().enumerate() {
                geometry.set_height(i, h);
            }

            let geometry = estimate_normals(geometry);
            for normal in geometry.normals().unwrap() {
                prop_assert!((normal.length() - 1.0).abs() < 1e-5);
                prop_assert!(normal.y > 0.0);
            }
        }
    }
}
