use crate::error::{DomainError, Result};
use crate::geometry::{arc_length, columns, CartesianCurve, PowerLawResample};
use crate::math::{linspace, Point3};

/// Wraps a 2D blade profile around the z-axis at evenly spaced radii.
///
/// Profiles are given in the unrolled plane: `x` is the axial coordinate and
/// `y` is `r·θ` (`z` is ignored). Each section at radius `r` maps a profile
/// point to `(r cos θ, r sin θ, x + axial_offset)`.
pub struct ProfileSections<'a> {
    pressure: &'a [Point3],
    suction: &'a [Point3],
    n_sections: usize,
    r_min: f64,
    r_max: f64,
    constant_r_theta: bool,
    axial_offset: f64,
    n_resample: usize,
}

impl<'a> ProfileSections<'a> {
    /// Creates a new `ProfileSections` operation spanning `r_min..=r_max`.
    #[must_use]
    pub fn new(
        pressure: &'a [Point3],
        suction: &'a [Point3],
        n_sections: usize,
        r_min: f64,
        r_max: f64,
    ) -> Self {
        Self {
            pressure,
            suction,
            n_sections,
            r_min,
            r_max,
            constant_r_theta: true,
            axial_offset: 0.0,
            n_resample: 0,
        }
    }

    /// Keeps `r·θ` constant across the span (`true`, default) or keeps the
    /// angle found at `r_min` (`false`).
    #[must_use]
    pub fn constant_r_theta(mut self, constant_r_theta: bool) -> Self {
        self.constant_r_theta = constant_r_theta;
        self
    }

    /// Shifts every section axially.
    #[must_use]
    pub fn axial_offset(mut self, offset: f64) -> Self {
        self.axial_offset = offset;
        self
    }

    /// Power-law resamples both profiles (half-grid size `n`) before wrapping.
    /// Values below 2 leave the profiles as given.
    #[must_use]
    pub fn resample(mut self, n: usize) -> Self {
        self.n_resample = n;
        self
    }

    /// Executes the operation, returning `(pressure, suction)` sections from
    /// `r_min` to `r_max`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError`] if `n_sections == 0`, `r_min` is not positive,
    /// `r_max < r_min`, or resampling fails.
    pub fn execute(&self) -> Result<(Vec<CartesianCurve>, Vec<CartesianCurve>)> {
        if self.n_sections == 0 {
            return Err(DomainError::TooFewPoints {
                operation: "profile sections",
                required: 1,
                found: 0,
            }
            .into());
        }
        if self.r_min.is_nan() || self.r_min <= 0.0 {
            return Err(DomainError::OutOfRange {
                parameter: "r_min",
                value: self.r_min,
            }
            .into());
        }
        if self.r_max.is_nan() || self.r_max < self.r_min {
            return Err(DomainError::OutOfRange {
                parameter: "r_max",
                value: self.r_max,
            }
            .into());
        }

        let pressure = self.profile(self.pressure)?;
        let suction = self.profile(self.suction)?;
        let radii = linspace(self.r_min, self.r_max, self.n_sections);

        Ok((
            radii.iter().map(|&r| self.wrap(&pressure, r)).collect(),
            radii.iter().map(|&r| self.wrap(&suction, r)).collect(),
        ))
    }

    /// Returns the `(axial, r·θ)` columns, resampled if requested.
    fn profile(&self, points: &[Point3]) -> Result<(Vec<f64>, Vec<f64>)> {
        let (x, rt, _) = columns(points);
        if self.n_resample < 2 {
            return Ok((x, rt));
        }
        let s = arc_length(&x, &rt)?;
        let resampled = PowerLawResample::new(&x, &rt, &s)
            .base(PowerLawResample::DEFAULT_BASE)
            .half_count(self.n_resample)
            .execute()?;
        Ok((resampled.x, resampled.y))
    }

    fn wrap(&self, (x, rt): &(Vec<f64>, Vec<f64>), r: f64) -> CartesianCurve {
        let theta_radius = if self.constant_r_theta { r } else { self.r_min };
        x.iter()
            .zip(rt)
            .map(|(&x, &rt)| {
                let theta = rt / theta_radius;
                Point3::new(r * theta.cos(), r * theta.sin(), x + self.axial_offset)
            })
            .collect()
    }
}
