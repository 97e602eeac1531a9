//! CSR wakefield pipeline.
//!
//! Charge binning, density-slope synthesis, FFT wake convolution, and the
//! reduce→compute-once→broadcast kick application across ranks.

pub mod binning;
pub mod comm;
#[cfg(feature = "fft")]
pub mod convolution;
pub mod derivative;
pub mod elements;
pub mod pipeline;
pub mod push;
pub mod wake;
