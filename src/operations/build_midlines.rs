use tracing::{debug, instrument};

use crate::error::{DomainError, Result};
use crate::geometry::CartesianCurve;
use crate::math::fourier::fourier_resample;
use crate::math::polar::to_polar;
use crate::math::{mean, Point3};
use crate::operations::{FindMidline, MidlineParams};

/// One radial section as a closed loop in the unrolled `(r·θ, z)` plane.
#[derive(Debug, Clone)]
pub struct UnrolledLoop {
    pub rt: Vec<f64>,
    pub z: Vec<f64>,
    /// Mean radius of the loop, used as the section radius.
    pub radius: f64,
}

impl UnrolledLoop {
    /// Joins the pressure surface and the reversed suction surface into one
    /// loop and unrolls it about the z-axis.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::TooFewPoints`] if both surfaces are empty.
    pub fn from_surfaces(pressure: &[Point3], suction: &[Point3]) -> Result<Self> {
        let section: Vec<Point3> = pressure.iter().chain(suction.iter().rev()).copied().collect();
        let polar = to_polar(&section);

        let radii: Vec<f64> = polar.iter().map(|p| p.r).collect();
        let radius = mean(&radii).ok_or(DomainError::TooFewPoints {
            operation: "section loop",
            required: 1,
            found: 0,
        })?;

        Ok(Self {
            rt: polar.iter().map(|p| p.r_theta()).collect(),
            z: polar.iter().map(|p| p.z).collect(),
            radius,
        })
    }

    /// Resamples `rt` and `z` uniformly (periodic band-limited) to `n` points.
    ///
    /// # Errors
    ///
    /// Returns an error if the loop is empty or `n == 0`.
    pub fn resampled(&self, n: usize) -> Result<Self> {
        Ok(Self {
            rt: fourier_resample(&self.rt, n)?,
            z: fourier_resample(&self.z, n)?,
            radius: self.radius,
        })
    }

    /// Number of points in the loop.
    #[must_use]
    pub fn len(&self) -> usize {
        self.z.len()
    }

    /// Returns `true` if the loop has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.z.is_empty()
    }
}

/// Builds one midline per radial section of a blade.
///
/// Sections are independent: each is unrolled, optionally resampled, and
/// handed to [`FindMidline`].
pub struct BuildMidlines<'a> {
    pressure: &'a [CartesianCurve],
    suction: &'a [CartesianCurve],
    z_min: f64,
    z_max: f64,
    pitch_angle_rad: f64,
    n_resample: usize,
    params: MidlineParams,
}

impl<'a> BuildMidlines<'a> {
    /// Creates a new `BuildMidlines` operation over matching section lists.
    #[must_use]
    pub fn new(
        pressure: &'a [CartesianCurve],
        suction: &'a [CartesianCurve],
        z_min: f64,
        z_max: f64,
        pitch_angle_rad: f64,
    ) -> Self {
        Self {
            pressure,
            suction,
            z_min,
            z_max,
            pitch_angle_rad,
            n_resample: 0,
            params: MidlineParams::default(),
        }
    }

    /// Resamples every loop to `n` points before extraction and returns
    /// midlines of `n` points. `0` disables resampling.
    #[must_use]
    pub fn resample(mut self, n: usize) -> Self {
        self.n_resample = n;
        self
    }

    /// Sets the midline extraction parameters.
    #[must_use]
    pub fn params(mut self, params: MidlineParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the operation, returning midlines in section order.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::SectionCountMismatch`] if the surfaces have a
    /// different number of sections, or the first error of any section.
    #[instrument(skip(self), fields(sections = self.pressure.len(), n_resample = self.n_resample))]
    pub fn execute(&self) -> Result<Vec<CartesianCurve>> {
        if self.pressure.len() != self.suction.len() {
            return Err(DomainError::SectionCountMismatch {
                pressure: self.pressure.len(),
                suction: self.suction.len(),
            }
            .into());
        }

        self.pressure
            .iter()
            .zip(self.suction)
            .enumerate()
            .map(|(index, (ps, ss))| self.section_midline(index, ps, ss))
            .collect()
    }

    fn section_midline(
        &self,
        index: usize,
        pressure: &[Point3],
        suction: &[Point3],
    ) -> Result<CartesianCurve> {
        let mut unrolled = UnrolledLoop::from_surfaces(pressure, suction)?;
        let n_out = if self.n_resample > 0 {
            unrolled = unrolled.resampled(self.n_resample)?;
            self.n_resample
        } else {
            self.params.n_out
        };
        debug!(index, points = unrolled.len(), radius = unrolled.radius, "extracting midline");

        FindMidline::new(&unrolled.rt, &unrolled.z, unrolled.radius, self.pitch_angle_rad)
            .z_range(self.z_min, self.z_max)
            .params(self.params)
            .n_out(n_out)
            .execute()
    }
}
