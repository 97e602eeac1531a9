//! Lattice elements as seen by the wakefield pipeline.
//!
//! The pipeline only inspects bend curvature; every other element kind is
//! opaque here. New bend kinds are added as a variant plus one classifier
//! arm.

use beam_types::state::RefPart;

/// Lattice element kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// Field-free straight section.
    Drift { ds_m: f64 },
    /// Quadrupole of focusing strength k.
    Quad { ds_m: f64, k: f64 },
    /// Thin RF buncher cavity.
    Buncher { v: f64, k: f64 },
    /// Thin dipole edge focusing.
    DipEdge {
        psi_rad: f64,
        rc_m: f64,
        g_m: f64,
        k2: f64,
    },
    /// Sector bend with constant radius of curvature.
    Sbend { ds_m: f64, rc_m: f64 },
    /// Combined-function bend (dipole plus quadrupole field).
    CFbend { ds_m: f64, rc_m: f64, k: f64 },
    /// Exact sector bend. Specified either geometrically (bend angle over
    /// arc length) or by field strength, in which case the curvature
    /// follows the reference momentum.
    ExactSbend { ds_m: f64, phi_rad: f64, b_t: f64 },
}

impl Element {
    fn exact_sbend_rc(ds_m: f64, phi_rad: f64, b_t: f64, refpart: &RefPart) -> f64 {
        if b_t == 0.0 {
            ds_m / phi_rad
        } else {
            refpart.rigidity_tm() / b_t
        }
    }
}

/// Classify an element for CSR and extract its bending radius [m].
///
/// Returns `Some(|R|)` for curvature-bearing bend kinds, `None` for every
/// element that does not radiate. Pure function of its inputs.
pub fn csr_bend_radius(element: &Element, refpart: &RefPart) -> Option<f64> {
    match element {
        Element::Sbend { rc_m, .. } => Some(rc_m.abs()),
        Element::CFbend { rc_m, .. } => Some(rc_m.abs()),
        Element::ExactSbend { ds_m, phi_rad, b_t } => {
            Some(Element::exact_sbend_rc(*ds_m, *phi_rad, *b_t, refpart).abs())
        }
        Element::Drift { .. }
        | Element::Quad { .. }
        | Element::Buncher { .. }
        | Element::DipEdge { .. } => None,
    }
}
