//! Half-plane fault displacement.

use glam::Vec3;
use rand::distr::Open01;
use rand::Rng;
use tracing::{debug, trace};

use crate::geometry::Geometry;

/// A single vertical fault through the grid.
///
/// The fault plane contains `pivot` and is perpendicular to the horizontal
/// `normal`. Vertices strictly in front of the plane rise by `displacement`;
/// all others (including those on the plane) sink by the same amount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fault {
    pub displacement: f32,
    pub pivot: Vec3,
    pub normal: Vec3,
}

impl Fault {
    /// Draws a random fault through one of the given vertex positions.
    ///
    /// The displacement is uniform in `(0, 1)`, the pivot is a uniformly
    /// chosen vertex, and each horizontal normal component is the difference
    /// of two uniform draws (triangular on `(-1, 1)`).
    ///
    /// # Panics
    /// Panics if `positions` is empty.
    pub fn random<R: Rng + ?Sized>(positions: &[Vec3], rng: &mut R) -> Self {
        let displacement: f32 = rng.sample(Open01);
        let pivot = positions[rng.random_range(0..positions.len())];
        let nx = rng.random::<f32>() - rng.random::<f32>();
        let nz = rng.random::<f32>() - rng.random::<f32>();

        Self {
            displacement,
            pivot,
            normal: Vec3::new(nx, 0.0, nz),
        }
    }

    /// Returns the height change this fault applies at `position`.
    pub fn offset_at(&self, position: Vec3) -> f32 {
        if (position - self.pivot).dot(self.normal) > 0.0 {
            self.displacement
        } else {
            -self.displacement
        }
    }

    /// Displaces every vertex of the geometry.
    pub fn apply(&self, geometry: &mut Geometry) {
        for p in &mut geometry.positions {
            p.y += self.offset_at(*p);
        }
    }
}

/// Applies `count` random faults to the geometry's heights.
///
/// Cost is `O(vertices * count)`. The random source is injected so a seeded
/// generator reproduces the same terrain.
pub fn apply_faults<R: Rng + ?Sized>(mut geometry: Geometry, count: usize, rng: &mut R) -> Geometry {
    if geometry.vertex_count() == 0 {
        return geometry;
    }

    for i in 0..count {
        let fault = Fault::random(&geometry.positions, rng);
        trace!(
            fault = i,
            displacement = fault.displacement,
            nx = fault.normal.x,
            nz = fault.normal.z,
            "applying fault"
        );
        fault.apply(&mut geometry);
    }

    debug!(count, vertices = geometry.vertex_count(), "applied faults");
    geometry
}
