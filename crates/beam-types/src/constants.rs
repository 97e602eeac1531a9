// ─────────────────────────────────────────────────────────────────────
// SCPN Beam Core — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
/// Elementary charge (C)
pub const Q_E: f64 = 1.602176634e-19;

/// Electron mass (kg)
pub const M_E: f64 = 9.1093837015e-31;

/// Speed of light in vacuum (m/s)
pub const C_SI: f64 = 299792458.0;

/// Vacuum permittivity (F/m)
pub const EP0_SI: f64 = 8.8541878128e-12;

/// Classical electron radius (m): q_e^2 / (4 pi ep0 m_e c^2)
pub const R_E_CLASSICAL: f64 = 2.8179403262e-15;

/// Electron rest energy (J): m_e c^2
pub const E_REST_ELECTRON_J: f64 = 8.1871057769e-14;

/// Electron rest energy (MeV)
pub const E_REST_ELECTRON_MEV: f64 = 0.51099895;
