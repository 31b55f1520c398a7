pub mod parametrize;
pub mod voronoi;

pub use parametrize::{arc_length, PowerLawResample, ResampledCurve};
pub use voronoi::{PlanarVoronoiBuilder, SpadeVoronoi};

use crate::math::Point3;

/// An ordered sequence of cartesian points along a physical curve.
///
/// Order is the traversal order of the curve; lengths and midlines depend on it.
pub type CartesianCurve = Vec<Point3>;

/// Splits a curve into its coordinate columns `(x, y, z)`.
#[must_use]
pub fn columns(curve: &[Point3]) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let mut xs = Vec::with_capacity(curve.len());
    let mut ys = Vec::with_capacity(curve.len());
    let mut zs = Vec::with_capacity(curve.len());
    for p in curve {
        xs.push(p.x);
        ys.push(p.y);
        zs.push(p.z);
    }
    (xs, ys, zs)
}

/// Smallest distance from the z-axis over the curve, or `None` if it is empty.
#[must_use]
pub fn min_radius(curve: &[Point3]) -> Option<f64> {
    curve.iter().map(|p| p.x.hypot(p.y)).reduce(f64::min)
}
