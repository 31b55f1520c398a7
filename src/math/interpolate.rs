use std::cmp::Ordering;

use crate::error::{DomainError, Result};
use crate::math::TOLERANCE;

/// Behaviour of an interpolant outside the range of its samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Extrapolation {
    /// Queries outside the sample range are an error.
    #[default]
    Reject,
    /// Queries outside the sample range continue the first/last segment.
    Linear,
}

/// A one-dimensional function fitted to samples.
///
/// Kept as a trait so the resampler and the midline solver do not depend on a
/// particular numerical backend.
pub trait Interpolator {
    /// Evaluates the interpolant at `x`.
    ///
    /// # Errors
    ///
    /// Returns an error if `x` cannot be evaluated (e.g. outside the sample
    /// range when extrapolation is rejected).
    fn evaluate(&self, x: f64) -> Result<f64>;

    /// Evaluates the interpolant at every value of `xs`.
    ///
    /// # Errors
    ///
    /// Returns the first evaluation error.
    fn evaluate_all(&self, xs: &[f64]) -> Result<Vec<f64>> {
        xs.iter().map(|&x| self.evaluate(x)).collect()
    }
}

/// Piecewise-linear interpolant over non-decreasing abscissae.
#[derive(Debug, Clone)]
pub struct LinearInterpolator {
    xs: Vec<f64>,
    ys: Vec<f64>,
    extrapolation: Extrapolation,
}

impl LinearInterpolator {
    /// Fits a linear interpolant to the samples `(xs[i], ys[i])`.
    ///
    /// Repeated abscissae are allowed; a zero-width segment evaluates to its
    /// right-hand sample.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError`] if the slices differ in length, hold fewer than
    /// two samples, or `xs` is not non-decreasing (NaN included).
    pub fn new(xs: Vec<f64>, ys: Vec<f64>, extrapolation: Extrapolation) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(DomainError::LengthMismatch {
                operation: "linear interpolation",
                left: xs.len(),
                right: ys.len(),
            }
            .into());
        }
        if xs.len() < 2 {
            return Err(DomainError::TooFewPoints {
                operation: "linear interpolation",
                required: 2,
                found: xs.len(),
            }
            .into());
        }
        if xs
            .windows(2)
            .any(|w| w[0].partial_cmp(&w[1]).is_none_or(Ordering::is_gt))
        {
            return Err(DomainError::NotMonotonic {
                operation: "linear interpolation",
            }
            .into());
        }
        Ok(Self {
            xs,
            ys,
            extrapolation,
        })
    }

    /// Returns the sampled range `(x_min, x_max)`.
    #[must_use]
    pub fn domain(&self) -> (f64, f64) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }
}

impl Interpolator for LinearInterpolator {
    fn evaluate(&self, x: f64) -> Result<f64> {
        let n = self.xs.len();
        let (lo, hi) = self.domain();

        if self.extrapolation == Extrapolation::Reject {
            // Absorb rounding from callers that rescale onto [lo, hi].
            let slack = TOLERANCE * (hi - lo).abs().max(1.0);
            if !(lo - slack..=hi + slack).contains(&x) {
                return Err(DomainError::OutOfRange {
                    parameter: "interpolation abscissa",
                    value: x,
                }
                .into());
            }
        }

        // Segment i spans xs[i]..=xs[i + 1]; ends extend the outer segments.
        let i = self.xs.partition_point(|&v| v <= x).clamp(1, n - 1) - 1;
        let (x0, x1) = (self.xs[i], self.xs[i + 1]);
        let (y0, y1) = (self.ys[i], self.ys[i + 1]);

        let dx = x1 - x0;
        if dx <= 0.0 {
            return Ok(y1);
        }
        Ok(y0 + (x - x0) * (y1 - y0) / dx)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ramp(extrapolation: Extrapolation) -> LinearInterpolator {
        LinearInterpolator::new(vec![0.0, 1.0, 3.0], vec![0.0, 2.0, 0.0], extrapolation).unwrap()
    }

    #[test]
    fn interpolates_inside_segments() {
        let f = ramp(Extrapolation::Reject);
        assert_relative_eq!(f.evaluate(0.5).unwrap(), 1.0);
        assert_relative_eq!(f.evaluate(2.0).unwrap(), 1.0);
        assert_relative_eq!(f.evaluate(3.0).unwrap(), 0.0);
        assert_relative_eq!(f.evaluate(0.0).unwrap(), 0.0);
    }

    #[test]
    fn rejects_outside_range() {
        let f = ramp(Extrapolation::Reject);
        assert!(f.evaluate(-0.1).is_err());
        assert!(f.evaluate(3.1).is_err());
        assert!(f.evaluate(f64::NAN).is_err());
    }

    #[test]
    fn extrapolates_outer_segments() {
        let f = ramp(Extrapolation::Linear);
        assert_relative_eq!(f.evaluate(-1.0).unwrap(), -2.0);
        assert_relative_eq!(f.evaluate(5.0).unwrap(), -2.0);
    }

    #[test]
    fn repeated_abscissa_is_not_singular() {
        let f = LinearInterpolator::new(
            vec![0.0, 1.0, 1.0, 2.0],
            vec![0.0, 1.0, 1.0, 3.0],
            Extrapolation::Reject,
        )
        .unwrap();
        assert_relative_eq!(f.evaluate(1.0).unwrap(), 1.0);
        assert_relative_eq!(f.evaluate(1.5).unwrap(), 2.0);
    }

    #[test]
    fn construction_preconditions() {
        assert!(LinearInterpolator::new(vec![0.0], vec![0.0], Extrapolation::Linear).is_err());
        assert!(LinearInterpolator::new(vec![0.0, 1.0], vec![0.0], Extrapolation::Linear).is_err());
        assert!(
            LinearInterpolator::new(vec![1.0, 0.0], vec![0.0, 1.0], Extrapolation::Linear).is_err()
        );
        assert!(LinearInterpolator::new(
            vec![0.0, f64::NAN],
            vec![0.0, 1.0],
            Extrapolation::Linear
        )
        .is_err());
    }
}
