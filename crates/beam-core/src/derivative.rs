//! Finite-difference slope of the deposited charge profile.

use beam_types::constants::Q_E;
use beam_types::error::{BeamError, BeamResult};
use ndarray::Array1;

/// Forward-difference slope of the charge histogram.
///
/// For a histogram of length `N + 1` returns `N` slopes,
/// `slope[i] = (hist[i+1] - hist[i]) / bin_size`. A forward difference uses
/// exactly the bins the deposition produced; no centered stencil. With
/// `number_density` set the charge profile is additionally converted to a
/// number-density slope by dividing out the elementary charge.
pub fn derivative_charge_1d(
    charge_distribution: &Array1<f64>,
    bin_size: f64,
    number_density: bool,
) -> BeamResult<Array1<f64>> {
    if charge_distribution.len() < 2 {
        return Err(BeamError::PhysicsViolation(format!(
            "Charge derivative requires at least 2 bins, got {}",
            charge_distribution.len()
        )));
    }
    if !bin_size.is_finite() || bin_size <= 0.0 {
        return Err(BeamError::PhysicsViolation(format!(
            "Charge derivative requires finite bin_size > 0, got {bin_size}"
        )));
    }
    if charge_distribution.iter().any(|v| !v.is_finite()) {
        return Err(BeamError::PhysicsViolation(
            "Charge distribution contains non-finite values".to_string(),
        ));
    }

    let denom = if number_density {
        bin_size * Q_E
    } else {
        bin_size
    };
    let n = charge_distribution.len() - 1;
    Ok(Array1::from_shape_fn(n, |i| {
        (charge_distribution[i + 1] - charge_distribution[i]) / denom
    }))
}
