// ─────────────────────────────────────────────────────────────────────
// SCPN Beam Core — Wake Functions
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Closed-form wake functions and the CSR kernel builder.

use beam_types::constants::{C_SI, E_REST_ELECTRON_J, R_E_CLASSICAL};
use beam_types::error::{BeamError, BeamResult};
use ndarray::Array1;
use std::f64::consts::PI;

/// Free space impedance [Ohm]
const Z0_OHM: f64 = 377.0;

/// Wake function constant [unitless]
///
/// Used in eq. (21) of:
/// K. L. F. Bane, "Short-Range Dipole Wakefields in Accelerating Structures
/// for the NLC," SLAC-PUB-9663, 2003
const ALPHA_1: f64 = 0.4648;

/// Step function (Heaviside): 1 for s >= 0, else 0.
pub fn unit_step(s: f64) -> f64 {
    if s >= 0.0 {
        1.0
    } else {
        0.0
    }
}

/// Alpha function, eq. (21) in Bane, 2003.
pub fn alpha(s: f64) -> f64 {
    1.0 - ALPHA_1 * s.sqrt() - (1.0 - 2.0 * ALPHA_1) * s
}

/// Resistive wall wake function (transverse), eq. (17) in Bane, 2003.
///
/// `a` iris radius [m], `g` gap [m], `l` period length [m].
pub fn w_t_rf(s: f64, a: f64, g: f64, l: f64) -> f64 {
    let s0 = 0.169 * a.powf(1.79) * g.powf(0.38) / l.powf(1.17);
    4.0 * Z0_OHM * C_SI * s0 / (PI * a.powi(4))
        * (1.0 - (1.0 + (s / s0).sqrt()) * (-(s / s0).sqrt()).exp())
        * unit_step(s)
}

/// Resistive wall wake function (longitudinal), eq. (18) in Bane, 2003.
pub fn w_l_rf(s: f64, a: f64, g: f64, l: f64) -> f64 {
    let s00 = g / 8.0 * (a / (alpha(g / l) * g)).powi(2);
    Z0_OHM * C_SI / (PI * a * a) * (-(s / s00).sqrt()).exp() * unit_step(s)
}

/// CSR wake function (longitudinal), eq. (28) in:
/// E. L. Saldin et al., "On the coherent radiation of an electron bunch
/// moving in an arc of a circle", NIM A 398, 373-394 (1997).
///
/// The bin-averaged form: the kernel is smeared over one bin so its
/// non-integrable singularity at s = 0 integrates out of the difference.
pub fn w_l_csr(s: f64, r_bend: f64, bin_size: f64) -> f64 {
    let kappa =
        2.0 * R_E_CLASSICAL * E_REST_ELECTRON_J / (3.0f64.powf(1.0 / 3.0) * r_bend.powf(2.0 / 3.0));
    -1.5 * kappa / bin_size
        * (unit_step(s + bin_size / 2.0) * (s + bin_size / 2.0).abs().powf(2.0 / 3.0)
            - unit_step(s - bin_size / 2.0) * (s - bin_size / 2.0).abs().powf(2.0 / 3.0))
}

/// CSR wake kernel on the doubled periodic support used by the circular
/// convolution.
///
/// Index `i` in `[0, num_bins)` holds the kernel at lag `i * bin_size`;
/// index `i` in `(num_bins, 2*num_bins)` holds the kernel at the negative
/// lag `(i - 2*num_bins) * bin_size`. Index `num_bins` itself stays zero —
/// the seam between the two halves where the kernel is singular.
pub fn csr_wake_function(num_bins: usize, bin_size: f64, r_bend: f64) -> BeamResult<Array1<f64>> {
    if num_bins < 2 {
        return Err(BeamError::PhysicsViolation(format!(
            "CSR kernel requires num_bins >= 2, got {num_bins}"
        )));
    }
    if !bin_size.is_finite() || bin_size <= 0.0 {
        return Err(BeamError::PhysicsViolation(format!(
            "CSR kernel requires finite bin_size > 0, got {bin_size}"
        )));
    }
    if !r_bend.is_finite() || r_bend <= 0.0 {
        return Err(BeamError::PhysicsViolation(format!(
            "CSR kernel requires finite bend radius > 0, got {r_bend}"
        )));
    }

    let mut wake_function = Array1::zeros(2 * num_bins);
    for i in 0..2 * num_bins {
        if i == num_bins {
            continue;
        }
        let s = if i < num_bins {
            i as f64 * bin_size
        } else {
            (i as f64 - 2.0 * num_bins as f64) * bin_size
        };
        wake_function[i] = w_l_csr(s, r_bend, bin_size);
    }
    if wake_function.iter().any(|v| !v.is_finite()) {
        return Err(BeamError::PhysicsViolation(
            "CSR kernel evaluation produced non-finite values".to_string(),
        ));
    }
    Ok(wake_function)
}
