//! 1D FFT wrappers around rustfft.
//!
//! Convention matches numpy:
//! - Forward FFT (fft): unnormalized
//! - Inverse FFT (ifft_real): normalized by 1/n, real part

use ndarray::Array1;
use num_complex::Complex64;
use rustfft::FftPlanner;

/// Forward 1D FFT of a real signal. Matches `numpy.fft.fft()`.
///
/// numpy does NOT normalize on forward FFT.
pub fn fft(input: &Array1<f64>) -> Array1<Complex64> {
    let n = input.len();
    let mut planner = FftPlanner::new();
    let plan = planner.plan_fft_forward(n);

    let mut data: Vec<Complex64> = input.iter().map(|&v| Complex64::new(v, 0.0)).collect();
    plan.process(&mut data);
    Array1::from(data)
}

/// Inverse 1D FFT returning the real part. Matches `numpy.fft.ifft().real`.
///
/// Applies 1/n normalization.
pub fn ifft_real(input: &Array1<Complex64>) -> Array1<f64> {
    let n = input.len();
    let mut planner = FftPlanner::new();
    let plan = planner.plan_fft_inverse(n);
    let norm = 1.0 / n as f64;

    let mut data: Vec<Complex64> = input.to_vec();
    plan.process(&mut data);
    Array1::from_iter(data.into_iter().map(|c| c.re * norm))
}
