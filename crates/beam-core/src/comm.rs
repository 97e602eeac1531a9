// ─────────────────────────────────────────────────────────────────────
// SCPN Beam Core — Collective Operations
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Collectives for the reduce→compute-once→broadcast wake exchange.
//!
//! Rank-indexed buffers stand in for distributed-memory ranks; wiring these
//! collectives to rsmpi in a later phase is a 1:1 swap. Rank 0 is the
//! designated (I/O) rank that owns the wake computation.

use beam_types::error::{BeamError, BeamResult};
use beam_types::state::Bunch;
use ndarray::Array1;

/// Rank that receives the reduced histogram and computes the wake.
pub const ROOT_RANK: usize = 0;

/// Deterministic round-robin partition of a bunch across `nranks` ranks.
///
/// Deposition and the kick are invariant under this choice; the partition
/// only fixes residency.
pub fn partition_bunch(bunch: &Bunch, nranks: usize) -> BeamResult<Vec<Bunch>> {
    if nranks == 0 {
        return Err(BeamError::PhysicsViolation(
            "Bunch partition requires nranks >= 1".to_string(),
        ));
    }
    let mut parts: Vec<Bunch> = (0..nranks).map(|_| Bunch::default()).collect();
    for (i, p) in bunch.particles.iter().enumerate() {
        parts[i % nranks].particles.push(*p);
    }
    Ok(parts)
}

/// Sum per-rank partial histograms into the designated rank's buffer.
///
/// Addition is commutative and associative, so the result is independent of
/// particle distribution and rank count. The returned array is the root
/// rank's view; non-root ranks hold no defined reduction result.
pub fn reduce_sum_to_root(partials: &[Array1<f64>]) -> BeamResult<Array1<f64>> {
    let first = partials.first().ok_or_else(|| {
        BeamError::PhysicsViolation("Reduction requires at least one rank buffer".to_string())
    })?;
    let len = first.len();
    let mut reduced = Array1::zeros(len);
    for (rank, partial) in partials.iter().enumerate() {
        if partial.len() != len {
            return Err(BeamError::PhysicsViolation(format!(
                "Rank {rank} buffer length {} does not match rank 0 length {len}",
                partial.len()
            )));
        }
        if partial.iter().any(|v| !v.is_finite()) {
            return Err(BeamError::PhysicsViolation(format!(
                "Rank {rank} buffer contains non-finite values"
            )));
        }
        reduced += partial;
    }
    Ok(reduced)
}

/// Broadcast the root rank's wake array to every rank.
///
/// Every returned buffer is a bit-identical copy of the root's.
pub fn broadcast_from_root(
    root_buffer: &Array1<f64>,
    nranks: usize,
) -> BeamResult<Vec<Array1<f64>>> {
    if nranks == 0 {
        return Err(BeamError::PhysicsViolation(
            "Broadcast requires nranks >= 1".to_string(),
        ));
    }
    if root_buffer.iter().any(|v| !v.is_finite()) {
        return Err(BeamError::PhysicsViolation(
            "Broadcast buffer contains non-finite values".to_string(),
        ));
    }
    Ok((0..nranks).map(|_| root_buffer.clone()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use beam_types::state::Particle;

    fn particle(s_m: f64) -> Particle {
        Particle {
            x_m: 0.0,
            y_m: 0.0,
            s_m,
            px: 0.0,
            py: 0.0,
            pt: 0.0,
            weight: 1.0,
        }
    }

    #[test]
    fn test_partition_preserves_every_particle() {
        let bunch = Bunch::new((0..23).map(|i| particle(i as f64)).collect());
        let parts = partition_bunch(&bunch, 4).unwrap();
        assert_eq!(parts.len(), 4);
        let total: usize = parts.iter().map(|b| b.len()).sum();
        assert_eq!(total, 23);
        // Round-robin: rank sizes differ by at most one.
        let sizes: Vec<usize> = parts.iter().map(|b| b.len()).collect();
        assert_eq!(sizes, vec![6, 6, 6, 5]);
    }

    #[test]
    fn test_partition_rejects_zero_ranks() {
        let bunch = Bunch::new(vec![particle(0.0)]);
        assert!(partition_bunch(&bunch, 0).is_err());
    }

    #[test]
    fn test_reduce_sums_rank_buffers() {
        let partials = vec![
            Array1::from(vec![1.0, 0.0, 2.0]),
            Array1::from(vec![0.5, 3.0, 0.0]),
            Array1::from(vec![0.0, 1.0, 1.0]),
        ];
        let reduced = reduce_sum_to_root(&partials).unwrap();
        assert_eq!(reduced, Array1::from(vec![1.5, 4.0, 3.0]));
    }

    #[test]
    fn test_reduce_is_order_independent() {
        let a = Array1::from(vec![0.125, 2.5]);
        let b = Array1::from(vec![1.75, -0.5]);
        let c = Array1::from(vec![3.0, 0.25]);
        let fwd = reduce_sum_to_root(&[a.clone(), b.clone(), c.clone()]).unwrap();
        let rev = reduce_sum_to_root(&[c, b, a]).unwrap();
        assert_eq!(fwd, rev);
    }

    #[test]
    fn test_reduce_rejects_mismatched_lengths() {
        let partials = vec![Array1::zeros(3), Array1::zeros(4)];
        let err = reduce_sum_to_root(&partials).expect_err("length mismatch must fail");
        match err {
            BeamError::PhysicsViolation(msg) => assert!(msg.contains("length")),
            other => panic!("Unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_reduce_rejects_non_finite_buffer() {
        let partials = vec![Array1::from(vec![1.0, f64::NAN])];
        assert!(reduce_sum_to_root(&partials).is_err());
    }

    #[test]
    fn test_broadcast_copies_are_bit_identical() {
        let wake = Array1::from(vec![1.0e-27, -3.5e-26, 0.0, 2.0e-28]);
        let copies = broadcast_from_root(&wake, 5).unwrap();
        assert_eq!(copies.len(), 5);
        for copy in &copies {
            assert_eq!(copy, &wake);
            for (a, b) in copy.iter().zip(wake.iter()) {
                assert_eq!(a.to_bits(), b.to_bits());
            }
        }
    }

    #[test]
    fn test_broadcast_rejects_non_finite_wake() {
        let wake = Array1::from(vec![f64::INFINITY]);
        assert!(broadcast_from_root(&wake, 2).is_err());
    }
}
