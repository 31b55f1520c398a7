use std::f64::consts::TAU;

use nalgebra::Complex;

use crate::error::{DomainError, Result};

/// Resamples a uniformly spaced, periodic sequence to `num` samples.
///
/// The spectrum of `signal` is truncated (or zero-padded) to `num` bins and
/// transformed back, scaled by `num / n`. For an even number of retained bins
/// the Nyquist term is folded on downsampling and split on upsampling, so a
/// band-limited input is reproduced exactly at the new sample positions.
///
/// Direct DFT, `O(n² + num²)`.
///
/// # Errors
///
/// Returns [`DomainError::TooFewPoints`] if `signal` is empty or `num == 0`.
#[allow(clippy::cast_precision_loss)]
pub fn fourier_resample(signal: &[f64], num: usize) -> Result<Vec<f64>> {
    let n = signal.len();
    if n == 0 || num == 0 {
        return Err(DomainError::TooFewPoints {
            operation: "fourier resample",
            required: 1,
            found: n.min(num),
        }
        .into());
    }

    let spectrum = dft(signal);
    let mut resized = vec![Complex::new(0.0, 0.0); num];

    let kept = n.min(num);
    let positive = kept / 2 + 1;
    resized[..positive].copy_from_slice(&spectrum[..positive]);
    if kept > 2 {
        let negative = kept - positive;
        resized[num - negative..].copy_from_slice(&spectrum[n - negative..]);
    }
    if kept % 2 == 0 {
        let nyquist = kept / 2;
        if num < n {
            resized[nyquist] += spectrum[n - nyquist];
        } else if n < num {
            resized[nyquist] *= 0.5;
            resized[num - nyquist] = resized[nyquist];
        }
    }

    // Inverse transform, 1/num normalisation folded into the num/n scale.
    let scale = 1.0 / n as f64;
    Ok((0..num)
        .map(|j| {
            let sum: Complex<f64> = resized
                .iter()
                .enumerate()
                .map(|(k, c)| c * Complex::from_polar(1.0, TAU * (j * k % num) as f64 / num as f64))
                .sum();
            sum.re * scale
        })
        .collect())
}

#[allow(clippy::cast_precision_loss)]
fn dft(signal: &[f64]) -> Vec<Complex<f64>> {
    let n = signal.len();
    (0..n)
        .map(|k| {
            signal
                .iter()
                .enumerate()
                .map(|(j, &x)| Complex::from_polar(x, -TAU * (j * k % n) as f64 / n as f64))
                .sum()
        })
        .collect()
}
