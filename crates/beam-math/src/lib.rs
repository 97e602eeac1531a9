//! Mathematical primitives for SCPN Beam Core.

#[cfg(feature = "fft")]
pub mod fft;
