//! Momentum kick from the broadcast wake samples.

use beam_types::constants::Q_E;
use beam_types::error::{BeamError, BeamResult};
use beam_types::state::{Bunch, RefPart, WakeGrid};
use ndarray::Array1;
use rayon::prelude::*;

/// Conversion from a wake sample to the normalized `pt` kick.
///
/// The convolved wake carries the density slope normalized by the
/// elementary charge (see the number-density mode of the derivative
/// stage); scaling by `q_e` restores an energy change rate per particle
/// [J/m], multiplying by the slice length gives the energy change, and the
/// reference rest energy expresses it in the normalized energy coordinate.
/// Validate absolute magnitudes against the analytic steady-state CSR
/// formula before trusting new lattice setups.
pub fn push_constant(refpart: &RefPart, slice_ds: f64) -> f64 {
    Q_E * slice_ds / refpart.rest_energy_j()
}

/// Apply the wake kick to every resident particle.
///
/// Particles are mapped to wake samples with the same indexing rule the
/// deposition uses, but without clamping: a particle whose bin falls
/// outside `[0, num_bins)` has no wake sample and receives no kick.
pub fn wake_push(
    bunch: &mut Bunch,
    convolved_wakefield: &Array1<f64>,
    grid: &WakeGrid,
    slice_ds: f64,
    refpart: &RefPart,
) -> BeamResult<()> {
    if convolved_wakefield.len() != grid.num_bins {
        return Err(BeamError::PhysicsViolation(format!(
            "Wake length {} does not match num_bins {}",
            convolved_wakefield.len(),
            grid.num_bins
        )));
    }
    if convolved_wakefield.iter().any(|v| !v.is_finite()) {
        return Err(BeamError::PhysicsViolation(
            "Convolved wakefield contains non-finite values".to_string(),
        ));
    }
    if !slice_ds.is_finite() || slice_ds <= 0.0 {
        return Err(BeamError::PhysicsViolation(format!(
            "Wake push requires finite slice_ds > 0, got {slice_ds}"
        )));
    }
    let rest_energy = refpart.rest_energy_j();
    if !rest_energy.is_finite() || rest_energy <= 0.0 {
        return Err(BeamError::PhysicsViolation(format!(
            "Reference rest energy must be finite and > 0, got {rest_energy}"
        )));
    }
    for (idx, p) in bunch.particles.iter().enumerate() {
        if !p.s_m.is_finite() || !p.pt.is_finite() {
            return Err(BeamError::PhysicsViolation(format!(
                "Wake push: particle[{idx}] state must be finite"
            )));
        }
    }

    let kick_scale = push_constant(refpart, slice_ds);
    bunch.particles.par_iter_mut().for_each(|p| {
        if let Some(bin) = grid.wake_index(p.s_m) {
            p.pt += convolved_wakefield[bin] * kick_scale;
        }
    });
    Ok(())
}
