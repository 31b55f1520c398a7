use crate::error::{DomainError, Result};
use crate::math::interpolate::{Extrapolation, Interpolator, LinearInterpolator};

/// Cumulative chord length along the planar curve `(x[i], y[i])`.
///
/// `s[0] = 0` and `s[i] = s[i - 1] + |p[i] - p[i - 1]|`, so the result is
/// non-decreasing and has the same length as the inputs.
///
/// # Errors
///
/// Returns [`DomainError::LengthMismatch`] if `x` and `y` differ in length.
pub fn arc_length(x: &[f64], y: &[f64]) -> Result<Vec<f64>> {
    if x.len() != y.len() {
        return Err(DomainError::LengthMismatch {
            operation: "arc length",
            left: x.len(),
            right: y.len(),
        }
        .into());
    }
    if x.is_empty() {
        return Ok(Vec::new());
    }

    let mut s = Vec::with_capacity(x.len());
    s.push(0.0);
    for i in 1..x.len() {
        let ds = (x[i] - x[i - 1]).hypot(y[i] - y[i - 1]);
        s.push(s[i - 1] + ds);
    }
    Ok(s)
}

/// Output of [`PowerLawResample`].
#[derive(Debug, Clone, Default)]
pub struct ResampledCurve {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// Arc-length parameter of each new point.
    pub s: Vec<f64>,
}

/// Re-interpolates a planar curve onto a power-law parameter grid that
/// clusters points towards both ends (leading and trailing edges).
///
/// The grid has `2 * n_new - 1` points: a half grid `((i / (n_new - 1)) · 0.5^(1/base))^base`
/// over `[0, 0.5]`, mirrored through `1.0`. Larger `base` clusters harder.
pub struct PowerLawResample<'a> {
    x: &'a [f64],
    y: &'a [f64],
    s: &'a [f64],
    base: f64,
    n_new: usize,
}

impl<'a> PowerLawResample<'a> {
    /// Default power-law exponent.
    pub const DEFAULT_BASE: f64 = 1.5;

    /// Creates a new `PowerLawResample` of `x(s)`, `y(s)`.
    ///
    /// Defaults to `base = 1.5` and a half grid as long as the input.
    #[must_use]
    pub fn new(x: &'a [f64], y: &'a [f64], s: &'a [f64]) -> Self {
        Self {
            x,
            y,
            s,
            base: Self::DEFAULT_BASE,
            n_new: 0,
        }
    }

    /// Sets the power-law exponent.
    #[must_use]
    pub fn base(mut self, base: f64) -> Self {
        self.base = base;
        self
    }

    /// Sets the half-grid size; `0` keeps the input length.
    #[must_use]
    pub fn half_count(mut self, n_new: usize) -> Self {
        self.n_new = n_new;
        self
    }

    /// Builds the normalized parameter grid over `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError`] if the half grid has fewer than two points or
    /// `base` is not a positive finite number.
    #[allow(clippy::cast_precision_loss)]
    pub fn grid(&self) -> Result<Vec<f64>> {
        let n_new = self.half_grid_len();
        if n_new < 2 {
            return Err(DomainError::TooFewPoints {
                operation: "power-law grid",
                required: 2,
                found: n_new,
            }
            .into());
        }
        if !(self.base.is_finite() && self.base > 0.0) {
            return Err(DomainError::OutOfRange {
                parameter: "base",
                value: self.base,
            }
            .into());
        }

        let start = 0.0_f64.powf(1.0 / self.base);
        let mid = 0.5_f64.powf(1.0 / self.base);
        let step = (mid - start) / (n_new - 1) as f64;
        let half: Vec<f64> = (0..n_new)
            .map(|i| (start + i as f64 * step).powf(self.base))
            .collect();

        let mut grid = Vec::with_capacity(2 * n_new - 1);
        grid.extend_from_slice(&half);
        grid.extend(half.iter().rev().skip(1).map(|v| 1.0 - v));
        Ok(grid)
    }

    /// Executes the resampling.
    ///
    /// The grid is mapped onto `[min(s), max(s)]`, so the first and last output
    /// points are the curve's end points.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError`] if the grid cannot be built, the inputs differ in
    /// length, or `s` is not non-decreasing.
    pub fn execute(&self) -> Result<ResampledCurve> {
        if self.x.len() != self.s.len() || self.y.len() != self.s.len() {
            return Err(DomainError::LengthMismatch {
                operation: "power-law resample",
                left: self.x.len().min(self.y.len()),
                right: self.s.len(),
            }
            .into());
        }
        let grid = self.grid()?;

        let s_min = self.s.iter().copied().fold(f64::INFINITY, f64::min);
        let s_max = self.s.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let del_s = s_max - s_min;
        let s_new: Vec<f64> = grid.iter().map(|g| s_min + g * del_s).collect();

        let fx = LinearInterpolator::new(self.s.to_vec(), self.x.to_vec(), Extrapolation::Reject)?;
        let fy = LinearInterpolator::new(self.s.to_vec(), self.y.to_vec(), Extrapolation::Reject)?;

        Ok(ResampledCurve {
            x: fx.evaluate_all(&s_new)?,
            y: fy.evaluate_all(&s_new)?,
            s: s_new,
        })
    }

    fn half_grid_len(&self) -> usize {
        if self.n_new == 0 {
            self.x.len()
        } else {
            self.n_new
        }
    }
}
