// ─────────────────────────────────────────────────────────────────────
// SCPN Beam Core — CSR Slice Pipeline
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Per-slice CSR wakefield orchestration.
//!
//! Reduce→compute-once→broadcast: every rank deposits its resident
//! particles into a partial histogram, the partials are summed onto the
//! designated rank, the wake is differentiated/convolved exactly once, and
//! the broadcast result kicks every rank's residents. The pipeline carries
//! no state between slices.

use beam_types::config::WakefieldConfig;
use beam_types::error::{BeamError, BeamResult};
use beam_types::state::{Bunch, RefPart, WakeGrid};
use ndarray::Array1;

use crate::elements::{csr_bend_radius, Element};

/// Debug dump target for the broadcast wake.
pub const WAKEFIELD_DEBUG_FILE: &str = "convolved_wakefield.txt";

/// Root-rank summary of an applied slice.
#[derive(Debug, Clone)]
pub struct CsrSliceReport {
    /// Bend radius the kernel was built for [m].
    pub r_bend_m: f64,
    /// Longitudinal grid the slice was binned on.
    pub grid: WakeGrid,
    /// Weight-averaged transverse offsets per bin (kick-shaping inputs).
    pub mean_x_m: Array1<f64>,
    pub mean_y_m: Array1<f64>,
    /// The broadcast wake potential per bin.
    pub convolved_wakefield: Array1<f64>,
}

/// Outcome of one slice invocation.
#[derive(Debug, Clone)]
pub enum CsrOutcome {
    /// Wake computed and kick applied on every rank.
    Applied(CsrSliceReport),
    /// CSR physics disabled in the configuration.
    Disabled,
    /// The element does not radiate.
    NoCsrElement,
    /// Zero longitudinal extent (or empty bunch); slice skipped with
    /// momenta untouched.
    DegenerateBunch,
}

/// Run the CSR wakefield pipeline for one slice.
///
/// `local_bunches` holds one resident partition per rank; index
/// [`crate::comm::ROOT_RANK`] is the designated rank. Skips silently when CSR is
/// disabled or the element does not bend; fails with a configuration error
/// when CSR is requested without FFT support, before touching any particle
/// data.
pub fn handle_csr_wakefield(
    local_bunches: &mut [Bunch],
    element: &Element,
    refpart: &RefPart,
    slice_ds: f64,
    cfg: &WakefieldConfig,
) -> BeamResult<CsrOutcome> {
    if !cfg.csr {
        return Ok(CsrOutcome::Disabled);
    }
    let Some(r_bend) = csr_bend_radius(element, refpart) else {
        return Ok(CsrOutcome::NoCsrElement);
    };
    run_csr_slice(local_bunches, r_bend, refpart, slice_ds, cfg)
}

#[cfg(not(feature = "fft"))]
fn run_csr_slice(
    _local_bunches: &mut [Bunch],
    _r_bend: f64,
    _refpart: &RefPart,
    _slice_ds: f64,
    _cfg: &WakefieldConfig,
) -> BeamResult<CsrOutcome> {
    Err(BeamError::ConfigError(
        "csr was requested but beam-core was built without FFT support. \
         Rebuild with the `fft` feature enabled."
            .to_string(),
    ))
}

#[cfg(feature = "fft")]
fn run_csr_slice(
    local_bunches: &mut [Bunch],
    r_bend: f64,
    refpart: &RefPart,
    slice_ds: f64,
    cfg: &WakefieldConfig,
) -> BeamResult<CsrOutcome> {
    use crate::binning::{deposit_charge_1d, mean_transverse_position};
    use crate::comm::{broadcast_from_root, reduce_sum_to_root, ROOT_RANK};
    use crate::convolution::convolve_fft;
    use crate::derivative::derivative_charge_1d;
    use crate::push::wake_push;
    use crate::wake::csr_wake_function;

    cfg.validate()?;
    if local_bunches.is_empty() {
        return Err(BeamError::PhysicsViolation(
            "CSR pipeline requires at least one rank".to_string(),
        ));
    }
    if !slice_ds.is_finite() || slice_ds <= 0.0 {
        return Err(BeamError::PhysicsViolation(format!(
            "CSR pipeline requires finite slice_ds > 0, got {slice_ds}"
        )));
    }

    // Measure the beam: union of per-rank bounding boxes.
    let extents = local_bunches
        .iter()
        .filter_map(|b| b.min_and_max_positions())
        .reduce(|a, b| a.union(b));
    let Some(extents) = extents else {
        return Ok(CsrOutcome::DegenerateBunch);
    };
    let spread = extents.s_max - extents.s_min;
    if !spread.is_finite() || spread <= 0.0 {
        return Ok(CsrOutcome::DegenerateBunch);
    }
    let grid = WakeGrid::from_extent(cfg.csr_bins, extents.s_min, extents.s_max)?;

    // Partial deposition per rank, then collective sum onto the root.
    let partials = local_bunches
        .iter()
        .map(|bunch| deposit_charge_1d(bunch, &grid, cfg.unity_particle_weight))
        .collect::<BeamResult<Vec<_>>>()?;
    let charge_distribution = reduce_sum_to_root(&partials)?;

    // Root-only compute block. The wake math never sees rank counts.
    let (mean_x_m, mean_y_m) = mean_transverse_position(
        &local_bunches[ROOT_RANK],
        &grid,
        cfg.unity_particle_weight,
    )?;
    let slopes = derivative_charge_1d(&charge_distribution, grid.bin_size, true)?;
    let wake_function = csr_wake_function(grid.num_bins, grid.bin_size, r_bend)?;
    let convolved_wakefield = convolve_fft(&slopes, &wake_function, grid.bin_size)?;

    if cfg.print_wakefield {
        print_convolved_wakefield(&convolved_wakefield, WAKEFIELD_DEBUG_FILE)?;
    }

    // Broadcast; every rank kicks its residents with the identical wake.
    let per_rank = broadcast_from_root(&convolved_wakefield, local_bunches.len())?;
    for (bunch, wake) in local_bunches.iter_mut().zip(per_rank.iter()) {
        wake_push(bunch, wake, &grid, slice_ds, refpart)?;
    }

    Ok(CsrOutcome::Applied(CsrSliceReport {
        r_bend_m: r_bend,
        grid,
        mean_x_m,
        mean_y_m,
        convolved_wakefield,
    }))
}

/// Debug dump: one wake value per line, echoed to stdout.
#[cfg(feature = "fft")]
fn print_convolved_wakefield(wake: &Array1<f64>, path: &str) -> BeamResult<()> {
    use std::io::Write;

    let mut outfile = std::fs::File::create(path)?;
    print!("Convolved wakefield: ");
    for v in wake.iter() {
        print!("{v} ");
        writeln!(outfile, "{v}")?;
    }
    println!();
    Ok(())
}
