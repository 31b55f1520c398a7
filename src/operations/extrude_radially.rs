use crate::error::{GeometryError, Result};
use crate::geometry::CartesianCurve;
use crate::math::polar::half_plane_angle;
use crate::math::Point3;

/// Moves every point of a curve radially (about the z-axis) by a fixed amount.
pub struct ExtrudeRadially<'a> {
    curve: &'a [Point3],
    delta_r: f64,
}

impl<'a> ExtrudeRadially<'a> {
    /// Creates a new `ExtrudeRadially` operation. Positive `delta_r` moves outwards.
    #[must_use]
    pub fn new(curve: &'a [Point3], delta_r: f64) -> Self {
        Self { curve, delta_r }
    }

    /// Executes the extrusion, returning the moved curve.
    ///
    /// The angle of each point is taken from [`half_plane_angle`], so points
    /// with `x < 0` land in the right half-plane. `z` is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NegativeRadius`] if any point would end up
    /// at a negative radius; no output is produced in that case.
    pub fn execute(&self) -> Result<CartesianCurve> {
        let radii: Vec<f64> = self
            .curve
            .iter()
            .map(|p| p.x.hypot(p.y) + self.delta_r)
            .collect();

        if let Some((index, &radius)) = radii.iter().enumerate().find(|(_, r)| **r < 0.0) {
            return Err(GeometryError::NegativeRadius { index, radius }.into());
        }

        Ok(self
            .curve
            .iter()
            .zip(radii)
            .map(|(p, r)| {
                let theta = half_plane_angle(p.x, p.y);
                Point3::new(r * theta.cos(), r * theta.sin(), p.z)
            })
            .collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    /// A section of a blade surface between radii 0.26 and 0.29.
    fn section() -> Vec<Point3> {
        (0..12)
            .map(|i| {
                let t = f64::from(i) / 11.0;
                let r = 0.26 + 0.03 * t;
                let theta = -0.05 + 0.1 * t * t;
                Point3::new(r * theta.cos(), r * theta.sin(), -0.02 + 0.05 * t)
            })
            .collect()
    }

    #[test]
    fn radius_shifts_by_delta() {
        let input = section();
        for delta_r in [-0.05, 0.05] {
            let out = ExtrudeRadially::new(&input, delta_r).execute().unwrap();
            assert_eq!(out.len(), input.len());
            for (p, q) in input.iter().zip(&out) {
                assert_abs_diff_eq!(q.x.hypot(q.y), p.x.hypot(p.y) + delta_r, epsilon = 1e-12);
                assert_abs_diff_eq!(q.z, p.z);
                assert_abs_diff_eq!(q.y.atan2(q.x), p.y.atan2(p.x), epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn negative_radius_is_rejected() {
        let err = ExtrudeRadially::new(&section(), -100.0).execute().unwrap_err();
        assert!(err.to_string().contains("new radius has gone below zero"));
        assert!(matches!(
            err,
            crate::ProtobladeError::Geometry(GeometryError::NegativeRadius { index: 0, .. })
        ));
    }

    #[test]
    fn shrinking_to_the_axis_is_allowed() {
        let input = [Point3::new(0.5, 0.0, 1.0)];
        let out = ExtrudeRadially::new(&input, -0.5).execute().unwrap();
        assert_abs_diff_eq!(out[0].x, 0.0);
        assert_abs_diff_eq!(out[0].z, 1.0);
    }
}
