use tracing::warn;

use crate::error::{GeometryError, Result};
use crate::math::Point3;

/// Angle of `(x, y)` from the single-argument arctangent of `y / x`.
///
/// The result lies in `[-π/2, π/2]`: points with `x < 0` fold onto the right
/// half-plane, `x == 0` gives `±π/2` (or NaN at the origin). Blade passages sit
/// at small angles around the positive x-axis, where this agrees with `atan2`.
/// Switching to `atan2` changes results for `x <= 0`, so callers relying on the
/// folded angle must keep using this function.
#[must_use]
pub fn half_plane_angle(x: f64, y: f64) -> f64 {
    (y / x).atan()
}

/// A point in cylindrical coordinates about the z-axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarPoint {
    pub r: f64,
    pub theta: f64,
    pub z: f64,
}

impl PolarPoint {
    /// Converts a cartesian point using [`half_plane_angle`] for `theta`.
    #[must_use]
    pub fn from_cartesian(p: &Point3) -> Self {
        Self {
            r: p.x.hypot(p.y),
            theta: half_plane_angle(p.x, p.y),
            z: p.z,
        }
    }

    /// Unrolled circumferential coordinate `r·θ`.
    #[must_use]
    pub fn r_theta(&self) -> f64 {
        self.r * self.theta
    }
}

/// An ordered sequence of polar points.
pub type PolarCurve = Vec<PolarPoint>;

/// Converts a cartesian curve to polar coordinates, point by point.
///
/// Points on `x == 0` are converted anyway (see [`half_plane_angle`]) and a
/// warning is logged; use [`to_polar_checked`] to reject them.
#[must_use]
pub fn to_polar(curve: &[Point3]) -> PolarCurve {
    let singular = curve.iter().filter(|p| on_y_axis(p)).count();
    if singular > 0 {
        warn!(singular, "polar conversion of points with x = 0");
    }
    curve.iter().map(PolarPoint::from_cartesian).collect()
}

/// Like [`to_polar`], but fails on the first point with `x == 0`.
///
/// # Errors
///
/// Returns [`GeometryError::PolarSingularity`] naming the offending point.
pub fn to_polar_checked(curve: &[Point3]) -> Result<PolarCurve> {
    if let Some(index) = curve.iter().position(on_y_axis) {
        return Err(GeometryError::PolarSingularity { index }.into());
    }
    Ok(curve.iter().map(PolarPoint::from_cartesian).collect())
}

fn on_y_axis(p: &Point3) -> bool {
    p.x.abs() < f64::MIN_POSITIVE
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_4;

    #[test]
    fn diagonal_points() {
        let curve = vec![
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(2.0, 2.0, 2.0),
            Point3::new(3.0, 3.0, 3.0),
        ];
        let polar = to_polar(&curve);
        let expected_r = [2.0_f64.sqrt(), 8.0_f64.sqrt(), 18.0_f64.sqrt()];
        for ((p, r), z) in polar.iter().zip(expected_r).zip([1.0, 2.0, 3.0]) {
            assert_relative_eq!(p.r, r);
            assert_relative_eq!(p.theta, FRAC_PI_4);
            assert_relative_eq!(p.z, z);
        }
    }

    #[test]
    fn radius_round_trips() {
        let curve: Vec<Point3> = (0..20)
            .map(|i| {
                let t = f64::from(i) * 0.37 - 3.0;
                Point3::new(0.26 * t.cos() + 0.01, 0.27 * t.sin(), t)
            })
            .collect();
        for (p, q) in curve.iter().zip(to_polar(&curve)) {
            assert_relative_eq!(q.r, p.x.hypot(p.y), epsilon = 1e-14);
            assert_relative_eq!(q.r * q.theta.cos(), p.x.abs(), epsilon = 1e-12);
        }
    }

    #[test]
    fn left_half_plane_folds() {
        let p = PolarPoint::from_cartesian(&Point3::new(-1.0, 1.0, 0.0));
        assert_relative_eq!(p.theta, -FRAC_PI_4);
        assert_relative_eq!(p.r, 2.0_f64.sqrt());
    }

    #[test]
    fn y_axis_points() {
        let curve = vec![Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 2.0, 0.0)];
        let polar = to_polar(&curve);
        assert_relative_eq!(polar[1].theta, std::f64::consts::FRAC_PI_2);

        let origin = PolarPoint::from_cartesian(&Point3::new(0.0, 0.0, 0.0));
        assert!(origin.theta.is_nan());

        let err = to_polar_checked(&curve).unwrap_err();
        assert!(matches!(
            err,
            crate::ProtobladeError::Geometry(GeometryError::PolarSingularity { index: 1 })
        ));
    }

    #[test]
    fn r_theta_is_arc_coordinate() {
        let q = Point3::new(0.3_f64.cos() * 2.0, 0.3_f64.sin() * 2.0, 0.0);
        let p = PolarPoint::from_cartesian(&q);
        assert_relative_eq!(p.r_theta(), 0.6, epsilon = 1e-12);
    }
}
