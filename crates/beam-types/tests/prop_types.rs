// ─────────────────────────────────────────────────────────────────────
// SCPN Beam Core — Property-Based Tests (proptest) for beam-types
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for beam-types using proptest.
//!
//! Covers: WakeGrid indexing invariants, bunch extent queries,
//! reference-particle kinematics, configuration roundtrip.

use beam_types::config::WakefieldConfig;
use beam_types::state::{Bunch, Particle, RefPart, WakeGrid};
use proptest::prelude::*;

fn particle_at(s_m: f64) -> Particle {
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

// ── WakeGrid Indexing Invariants ─────────────────────────────────────

proptest! {
    /// The clamped deposition index always lands inside the histogram.
    #[test]
    fn clamped_index_within_histogram(
        num_bins in 2usize..512,
        s in -10.0f64..10.0,
    ) {
        let grid = WakeGrid::from_extent(num_bins, -1.0, 1.0).unwrap();
        let idx = grid.clamped_index(s);
        prop_assert!(idx <= grid.num_bins, "index {} past overflow bin", idx);
    }

    /// Wake lookup agrees with the deposition rule wherever it is defined.
    #[test]
    fn wake_index_matches_clamped_index_in_range(
        num_bins in 2usize..512,
        s in -2.0f64..2.0,
    ) {
        let grid = WakeGrid::from_extent(num_bins, -1.0, 1.0).unwrap();
        if let Some(idx) = grid.wake_index(s) {
            prop_assert!(idx < grid.num_bins);
            prop_assert_eq!(idx, grid.clamped_index(s));
        } else {
            // Out-of-range positions deposit into the overflow bin.
            prop_assert_eq!(grid.clamped_index(s), grid.num_bins);
        }
    }

    /// The same position always maps to the same bin: the rule is a pure
    /// function of (s, grid), never of which rank holds the particle.
    #[test]
    fn bin_index_is_deterministic(
        num_bins in 2usize..256,
        s in -1.0f64..1.0,
    ) {
        let grid_a = WakeGrid::from_extent(num_bins, -1.0, 1.0).unwrap();
        let grid_b = grid_a.clone();
        prop_assert_eq!(grid_a.clamped_index(s), grid_b.clamped_index(s));
    }

    /// bin_size spans the extent with num_bins - 1 intervals.
    #[test]
    fn bin_size_spans_extent(
        num_bins in 2usize..1024,
        s_min in -5.0f64..0.0,
        width in 1e-6f64..10.0,
    ) {
        let grid = WakeGrid::from_extent(num_bins, s_min, s_min + width).unwrap();
        let recovered = grid.bin_size * (num_bins - 1) as f64;
        prop_assert!((recovered - width).abs() < 1e-9 * width.max(1.0));
    }
}

// ── Bunch Extents ────────────────────────────────────────────────────

proptest! {
    /// Extents bound every resident particle position.
    #[test]
    fn extents_bound_all_particles(positions in prop::collection::vec(-1.0f64..1.0, 1..200)) {
        let bunch = Bunch::new(positions.iter().copied().map(particle_at).collect());
        let ext = bunch.min_and_max_positions().unwrap();
        for &s in &positions {
            prop_assert!(ext.s_min <= s && s <= ext.s_max);
        }
    }

    /// A union of partition extents equals the extents of the whole bunch.
    #[test]
    fn partition_extents_union_matches_whole(
        positions in prop::collection::vec(-1.0f64..1.0, 2..200),
        split in 1usize..199,
    ) {
        let split = split.min(positions.len() - 1);
        let whole = Bunch::new(positions.iter().copied().map(particle_at).collect());
        let left = Bunch::new(positions[..split].iter().copied().map(particle_at).collect());
        let right = Bunch::new(positions[split..].iter().copied().map(particle_at).collect());

        let expected = whole.min_and_max_positions().unwrap();
        let unioned = left
            .min_and_max_positions()
            .unwrap()
            .union(right.min_and_max_positions().unwrap());
        prop_assert_eq!(expected, unioned);
    }
}

// ── Reference Particle ───────────────────────────────────────────────

proptest! {
    /// Rigidity is positive and increases with energy.
    #[test]
    fn rigidity_monotone_in_energy(kinetic_mev in 1.0f64..10_000.0) {
        let lo = RefPart::electron_with_energy_mev(kinetic_mev);
        let hi = RefPart::electron_with_energy_mev(kinetic_mev * 1.5);
        prop_assert!(lo.rigidity_tm() > 0.0);
        prop_assert!(hi.rigidity_tm() > lo.rigidity_tm());
    }

    /// Beta stays in (0, 1) for any positive kinetic energy.
    #[test]
    fn beta_stays_physical(kinetic_mev in 0.001f64..100_000.0) {
        let ref_part = RefPart::electron_with_energy_mev(kinetic_mev);
        let beta = ref_part.beta();
        prop_assert!(beta > 0.0 && beta < 1.0, "beta = {}", beta);
    }
}

// ── Configuration Roundtrip ──────────────────────────────────────────

proptest! {
    /// Serialize/deserialize preserves every field.
    #[test]
    fn config_roundtrip(
        csr in any::<bool>(),
        csr_bins in 2usize..4096,
        unity in any::<bool>(),
        print in any::<bool>(),
    ) {
        let cfg = WakefieldConfig {
            csr,
            csr_bins,
            unity_particle_weight: unity,
            print_wakefield: print,
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: WakefieldConfig = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(cfg.csr, back.csr);
        prop_assert_eq!(cfg.csr_bins, back.csr_bins);
        prop_assert_eq!(cfg.unity_particle_weight, back.unity_particle_weight);
        prop_assert_eq!(cfg.print_wakefield, back.print_wakefield);
    }
}
