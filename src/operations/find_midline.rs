use tracing::debug;

use crate::error::{DomainError, GeometryError, Result};
use crate::geometry::{CartesianCurve, PlanarVoronoiBuilder, SpadeVoronoi};
use crate::math::interpolate::{Extrapolation, Interpolator, LinearInterpolator};
use crate::math::{linspace, Point2, Point3, TOLERANCE};

/// Parameters controlling periodic midline extraction.
#[derive(Debug, Clone, Copy)]
pub struct MidlineParams {
    /// Distance (per coordinate) below which a Voronoi vertex of the paired
    /// loops is treated as a vertex of the single loop.
    pub tolerance: f64,
    /// Vertices with `r·θ <= min(r·θ) + boundary_fraction · pitch` are dropped.
    pub boundary_fraction: f64,
    /// Number of output points when no resampling size is given.
    pub n_out: usize,
}

impl Default for MidlineParams {
    fn default() -> Self {
        Self {
            tolerance: 1e-3,
            boundary_fraction: 0.25,
            n_out: 200,
        }
    }
}

/// Finds the curve equidistant from a closed blade loop and its neighbour one
/// pitch away, in the unrolled `(r·θ, z)` plane.
///
/// The loop is the pressure surface followed by the reversed suction surface,
/// so its last point is expected to coincide with its first. Bisector points
/// between the two loops are the Voronoi vertices of both loops together that
/// are not Voronoi vertices of the single loop (directly or one pitch over).
/// They are windowed to `z_min < z < z_max`, interpolated linearly in `z` and
/// mapped back to 3D on the cylinder of the given radius.
pub struct FindMidline<'a> {
    rt: &'a [f64],
    z: &'a [f64],
    radius: f64,
    pitch_angle_rad: f64,
    z_min: f64,
    z_max: f64,
    n_out: usize,
    params: MidlineParams,
}

impl<'a> FindMidline<'a> {
    /// Creates a new `FindMidline` operation over the loop `(rt[i], z[i])`.
    ///
    /// `radius` is the representative radius of the section and
    /// `pitch_angle_rad` the angle between adjacent blades.
    #[must_use]
    pub fn new(rt: &'a [f64], z: &'a [f64], radius: f64, pitch_angle_rad: f64) -> Self {
        let params = MidlineParams::default();
        Self {
            rt,
            z,
            radius,
            pitch_angle_rad,
            z_min: f64::NEG_INFINITY,
            z_max: f64::INFINITY,
            n_out: params.n_out,
            params,
        }
    }

    /// Sets the axial window of the midline.
    #[must_use]
    pub fn z_range(mut self, z_min: f64, z_max: f64) -> Self {
        self.z_min = z_min;
        self.z_max = z_max;
        self
    }

    /// Sets the number of output points.
    #[must_use]
    pub fn n_out(mut self, n_out: usize) -> Self {
        self.n_out = n_out;
        self
    }

    /// Sets the filtering tolerances and the output size `params.n_out`.
    /// A later [`FindMidline::n_out`] overrides the size.
    #[must_use]
    pub fn params(mut self, params: MidlineParams) -> Self {
        self.n_out = params.n_out;
        self.params = params;
        self
    }

    /// Executes the operation with the `spade` Voronoi backend.
    ///
    /// # Errors
    ///
    /// See [`FindMidline::execute_with`].
    pub fn execute(&self) -> Result<CartesianCurve> {
        self.execute_with(&SpadeVoronoi)
    }

    /// Executes the operation with the given Voronoi backend.
    ///
    /// Returns exactly `n_out` points whose `z` values are evenly spaced over
    /// `[z_min, z_max]`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError`] if `rt` and `z` differ in length, the loop has
    /// fewer than three points, `n_out < 2`, or the window is not finite.
    /// Returns [`GeometryError::DegenerateMidline`] if fewer than two distinct
    /// bisector points survive filtering.
    pub fn execute_with<B: PlanarVoronoiBuilder>(&self, builder: &B) -> Result<CartesianCurve> {
        self.validate()?;

        let blade_pitch = self.radius * self.pitch_angle_rad;
        let single: Vec<Point2> = self
            .rt
            .iter()
            .zip(self.z)
            .map(|(&rt, &z)| Point2::new(rt, z))
            .collect();

        // The shifted copy starts where the loop closes, so its first point
        // replaces the loop's closing point.
        let mut paired = Vec::with_capacity(2 * single.len() - 1);
        paired.extend_from_slice(&single[..single.len() - 1]);
        paired.extend(single.iter().map(|p| Point2::new(p.x + blade_pitch, p.y)));

        let single_vertices = builder.vertices(&single)?;
        let paired_vertices = builder.vertices(&paired)?;
        let total = paired_vertices.len();

        let rt_floor = paired.iter().map(|p| p.x).fold(f64::INFINITY, f64::min)
            + self.params.boundary_fraction * blade_pitch;

        let mut candidates: Vec<Point2> = paired_vertices
            .into_iter()
            .filter(|v| !self.is_single_loop_vertex(v, &single_vertices, blade_pitch))
            .filter(|v| v.y > self.z_min && v.y < self.z_max && v.x > rt_floor)
            .collect();
        candidates.sort_by(|a, b| a.y.total_cmp(&b.y));
        let candidates = merge_equal_z(&candidates);

        debug!(
            total,
            single = single_vertices.len(),
            kept = candidates.len(),
            "filtered bisector vertices"
        );

        if candidates.len() < 2 {
            return Err(GeometryError::DegenerateMidline {
                found: candidates.len(),
            }
            .into());
        }

        let (zs, rts): (Vec<f64>, Vec<f64>) = candidates.iter().map(|p| (p.y, p.x)).unzip();
        let rt_of_z = LinearInterpolator::new(zs, rts, Extrapolation::Linear)?;

        linspace(self.z_min, self.z_max, self.n_out)
            .into_iter()
            .map(|z| -> Result<Point3> {
                let theta = rt_of_z.evaluate(z)? / self.radius;
                Ok(Point3::new(
                    self.radius * theta.cos(),
                    self.radius * theta.sin(),
                    z,
                ))
            })
            .collect()
    }

    fn validate(&self) -> Result<()> {
        if self.rt.len() != self.z.len() {
            return Err(DomainError::LengthMismatch {
                operation: "midline",
                left: self.rt.len(),
                right: self.z.len(),
            }
            .into());
        }
        if self.z.len() < 3 {
            return Err(DomainError::TooFewPoints {
                operation: "midline loop",
                required: 3,
                found: self.z.len(),
            }
            .into());
        }
        if self.n_out < 2 {
            return Err(DomainError::TooFewPoints {
                operation: "midline output",
                required: 2,
                found: self.n_out,
            }
            .into());
        }
        for (parameter, value) in [("z_min", self.z_min), ("z_max", self.z_max)] {
            if !value.is_finite() {
                return Err(DomainError::OutOfRange { parameter, value }.into());
            }
        }
        Ok(())
    }

    /// Whether `v` matches a single-loop vertex, as is or shifted one pitch.
    fn is_single_loop_vertex(&self, v: &Point2, single: &[Point2], blade_pitch: f64) -> bool {
        let tol = self.params.tolerance;
        single.iter().any(|s| {
            (v.y - s.y).abs() < tol
                && ((v.x - s.x).abs() < tol || (v.x - (s.x + blade_pitch)).abs() < tol)
        })
    }
}

/// Collapses runs of points with the same `z` (sorted input) into one point at
/// their mean `r·θ`, so the interpolant is single-valued.
#[allow(clippy::cast_precision_loss)]
fn merge_equal_z(sorted: &[Point2]) -> Vec<Point2> {
    let mut merged: Vec<Point2> = Vec::with_capacity(sorted.len());
    let mut run = 0usize;
    for p in sorted {
        match merged.last_mut() {
            Some(last) if (p.y - last.y).abs() <= TOLERANCE => {
                run += 1;
                last.x += (p.x - last.x) / run as f64;
            }
            _ => {
                merged.push(*p);
                run = 1;
            }
        }
    }
    merged
}
