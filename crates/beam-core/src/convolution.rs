//! FFT-based circular convolution of the density slope against the wake
//! kernel.
//!
//! The kernel lives on a doubled periodic support and the slope is
//! zero-padded to match, so the circular product reproduces the aperiodic
//! causal response on the first half of the period.

use beam_math::fft::{fft, ifft_real};
use beam_types::error::{BeamError, BeamResult};
use ndarray::{s, Array1};
use num_complex::Complex64;

/// Convolve the beam-profile slope with the wake kernel.
///
/// `wake_function` must hold exactly `2 * slope.len()` samples (see
/// [`crate::wake::csr_wake_function`]). The result is scaled by `delta`,
/// the bin width, to approximate the convolution integral, and truncated to
/// the causal first half.
pub fn convolve_fft(
    beam_profile_slope: &Array1<f64>,
    wake_function: &Array1<f64>,
    delta: f64,
) -> BeamResult<Array1<f64>> {
    let n = beam_profile_slope.len();
    if n == 0 {
        return Err(BeamError::PhysicsViolation(
            "Convolution requires a non-empty slope profile".to_string(),
        ));
    }
    if wake_function.len() != 2 * n {
        return Err(BeamError::PhysicsViolation(format!(
            "Wake/slope length mismatch: expected {}, got {}",
            2 * n,
            wake_function.len()
        )));
    }
    if !delta.is_finite() || delta <= 0.0 {
        return Err(BeamError::PhysicsViolation(format!(
            "Convolution requires finite delta > 0, got {delta}"
        )));
    }
    if beam_profile_slope.iter().any(|v| !v.is_finite())
        || wake_function.iter().any(|v| !v.is_finite())
    {
        return Err(BeamError::PhysicsViolation(
            "Convolution inputs contain non-finite values".to_string(),
        ));
    }

    let mut padded = Array1::zeros(2 * n);
    padded.slice_mut(s![..n]).assign(beam_profile_slope);

    let slope_hat = fft(&padded);
    let wake_hat = fft(wake_function);
    let product: Array1<Complex64> = Array1::from_iter(
        slope_hat
            .iter()
            .zip(wake_hat.iter())
            .map(|(a, b)| a * b),
    );
    let full = ifft_real(&product);

    let convolved = full.slice(s![..n]).mapv(|v| v * delta);
    if convolved.iter().any(|v| !v.is_finite()) {
        return Err(BeamError::PhysicsViolation(
            "Convolution produced non-finite wake values".to_string(),
        ));
    }
    Ok(convolved)
}
