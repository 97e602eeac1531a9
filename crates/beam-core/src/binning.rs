//! Charge deposition onto the longitudinal wake grid.
//!
//! Deposition is an associative, order-independent sum: each rayon worker
//! accumulates into its own fixed-size bin buffer and the buffers are merged
//! additively, so no bin is ever read-modified-written by two particles in a
//! conflicting order.

use beam_types::error::{BeamError, BeamResult};
use beam_types::state::{Bunch, WakeGrid};
use ndarray::Array1;
use rayon::prelude::*;

fn validate_grid(grid: &WakeGrid, label: &str) -> BeamResult<()> {
    if grid.num_bins < 2 {
        return Err(BeamError::PhysicsViolation(format!(
            "{label} requires num_bins >= 2, got {}",
            grid.num_bins
        )));
    }
    if !grid.bin_min.is_finite() || !grid.bin_size.is_finite() || grid.bin_size <= 0.0 {
        return Err(BeamError::PhysicsViolation(format!(
            "{label} grid must have finite bin_min and bin_size > 0, got bin_min={}, bin_size={}",
            grid.bin_min, grid.bin_size
        )));
    }
    Ok(())
}

fn validate_bunch(bunch: &Bunch, label: &str) -> BeamResult<()> {
    for (idx, p) in bunch.particles.iter().enumerate() {
        if !p.s_m.is_finite() || !p.x_m.is_finite() || !p.y_m.is_finite() {
            return Err(BeamError::PhysicsViolation(format!(
                "{label}: particle[{idx}] position components must be finite"
            )));
        }
        if !p.weight.is_finite() || p.weight < 0.0 {
            return Err(BeamError::PhysicsViolation(format!(
                "{label}: particle[{idx}].weight must be finite and >= 0, got {}",
                p.weight
            )));
        }
    }
    Ok(())
}

/// Deposit particle charge into the 1D longitudinal histogram.
///
/// Returns the per-rank partial histogram of length `num_bins + 1`; the
/// trailing bin absorbs clamped out-of-range particles. In unity-weight mode
/// each macro-particle deposits 1 instead of its statistical weight.
pub fn deposit_charge_1d(
    bunch: &Bunch,
    grid: &WakeGrid,
    unity_weight: bool,
) -> BeamResult<Array1<f64>> {
    validate_grid(grid, "Charge deposition")?;
    validate_bunch(bunch, "Charge deposition")?;

    let hist_len = grid.hist_len();
    let hist = bunch
        .particles
        .par_iter()
        .fold(
            || vec![0.0f64; hist_len],
            |mut bins, p| {
                let w = if unity_weight { 1.0 } else { p.weight };
                bins[grid.clamped_index(p.s_m)] += w;
                bins
            },
        )
        .reduce(
            || vec![0.0f64; hist_len],
            |mut a, b| {
                for (av, bv) in a.iter_mut().zip(b.iter()) {
                    *av += bv;
                }
                a
            },
        );
    Ok(Array1::from(hist))
}

/// Weight-averaged transverse positions per wake bin.
///
/// Follows the identical binning rule as [`deposit_charge_1d`]. Returns two
/// profiles of length `num_bins`; bins without particles stay at zero.
/// Overflow-bin particles carry no wake sample and do not contribute.
///
/// Only meaningful once the charge histogram is the fully reduced one: in
/// the distributed pipeline this runs on the designated rank only.
pub fn mean_transverse_position(
    bunch: &Bunch,
    grid: &WakeGrid,
    unity_weight: bool,
) -> BeamResult<(Array1<f64>, Array1<f64>)> {
    validate_grid(grid, "Transverse moment accumulation")?;
    validate_bunch(bunch, "Transverse moment accumulation")?;

    let n = grid.num_bins;
    let (sum_x, sum_y, sum_w) = bunch
        .particles
        .par_iter()
        .fold(
            || (vec![0.0f64; n], vec![0.0f64; n], vec![0.0f64; n]),
            |(mut sx, mut sy, mut sw), p| {
                if let Some(idx) = grid.wake_index(p.s_m) {
                    let w = if unity_weight { 1.0 } else { p.weight };
                    sx[idx] += w * p.x_m;
                    sy[idx] += w * p.y_m;
                    sw[idx] += w;
                }
                (sx, sy, sw)
            },
        )
        .reduce(
            || (vec![0.0f64; n], vec![0.0f64; n], vec![0.0f64; n]),
            |(mut ax, mut ay, mut aw), (bx, by, bw)| {
                for i in 0..n {
                    ax[i] += bx[i];
                    ay[i] += by[i];
                    aw[i] += bw[i];
                }
                (ax, ay, aw)
            },
        );

    let mut mean_x = Array1::zeros(n);
    let mut mean_y = Array1::zeros(n);
    for i in 0..n {
        if sum_w[i] > 0.0 {
            mean_x[i] = sum_x[i] / sum_w[i];
            mean_y[i] = sum_y[i] / sum_w[i];
        }
    }
    Ok((mean_x, mean_y))
}
