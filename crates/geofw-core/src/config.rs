// crates/geofw-core/src/config.rs
//
// Fixed conventions of the geometry format and the limits imposed by the
// application that re-reads it. Neither is a tuning knob; only `EditConfig`
// carries caller choices.

use crate::obstruct::envelope::OverlapPolicy;

/// Column layout of every numeric block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormatSpec {
    pub width: usize,
    pub per_line: usize,
    pub precision: usize,
}

impl FormatSpec {
    pub const LEGACY: FormatSpec = FormatSpec {
        width: 8,
        per_line: 10,
        precision: 2,
    };

    /// Round `v` onto the grid the encoder writes.
    pub fn quantize(&self, v: f64) -> f64 {
        let scale = 10f64.powi(self.precision as i32);
        (v * scale).round() / scale
    }
}

impl Default for FormatSpec {
    fn default() -> Self {
        FormatSpec::LEGACY
    }
}

/// Limits the downstream consumer enforces when it re-parses a file.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Limits {
    /// Profiles above this are rejected by the consumer.
    pub max_points: usize,
    /// Minimum separation between touching obstructions of different elevation.
    pub min_gap: f64,
}

impl Limits {
    pub const CONSUMER: Limits = Limits {
        max_points: 450,
        min_gap: 0.02,
    };
}

impl Default for Limits {
    fn default() -> Self {
        Limits::CONSUMER
    }
}

pub const BACKUP_SUFFIX: &str = ".bak";

/// Per-invocation options chosen by the caller.
#[derive(Clone, Debug)]
pub struct EditConfig {
    pub make_backup: bool,
    pub overlap_policy: OverlapPolicy,
    pub format: FormatSpec,
    pub limits: Limits,
}

impl Default for EditConfig {
    fn default() -> Self {
        EditConfig {
            make_backup: true,
            overlap_policy: OverlapPolicy::default(),
            format: FormatSpec::LEGACY,
            limits: Limits::CONSUMER,
        }
    }
}
