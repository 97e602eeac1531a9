// ─────────────────────────────────────────────────────────────────────
// SCPN Beam Core — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use serde::{Deserialize, Serialize};

use crate::error::{BeamError, BeamResult};

/// Wakefield algorithm settings.
/// Maps 1:1 to the `algo` block of the tracking JSON config; every field
/// has a default so a partial (or empty) block deserializes cleanly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WakefieldConfig {
    /// Enable CSR physics in bending elements.
    #[serde(default)]
    pub csr: bool,
    /// Number of longitudinal bins for the wake grid.
    #[serde(default = "default_csr_bins")]
    pub csr_bins: usize,
    /// Deposit each macro-particle as one physical particle instead of its
    /// statistical weight.
    #[serde(default)]
    pub unity_particle_weight: bool,
    /// Debug: dump the convolved wakefield to convolved_wakefield.txt and
    /// echo it to stdout.
    #[serde(default)]
    pub print_wakefield: bool,
}

fn default_csr_bins() -> usize {
    150
}

impl Default for WakefieldConfig {
    fn default() -> Self {
        WakefieldConfig {
            csr: false,
            csr_bins: default_csr_bins(),
            unity_particle_weight: false,
            print_wakefield: false,
        }
    }
}

impl WakefieldConfig {
    /// Load from a JSON file.
    pub fn from_file(path: &str) -> BeamResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// The wake grid divides the extent by `csr_bins - 1`, so fewer than two
    /// bins cannot produce a finite bin size.
    pub fn validate(&self) -> BeamResult<()> {
        if self.csr_bins < 2 {
            return Err(BeamError::ConfigError(format!(
                "csr_bins must be >= 2, got {}",
                self.csr_bins
            )));
        }
        Ok(())
    }
}
