//! Sieve configuration.
//!
//! Values are layered, later sources winning:
//! 1. built-in defaults
//! 2. an optional config file (any format the `config` crate reads)
//! 3. environment variables prefixed with `PRIMER_`, e.g.
//!    `PRIMER_DENSITY=wheel6` or `PRIMER_SEGMENT_BITS=65536`

use std::path::Path;

use config::Config;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::error::Error;

/// Bounds below this run the flat sieve; the rest are segmented.
pub const DEFAULT_THRESHOLD: u64 = 10_000_000;

/// Candidates per segmented window. 256Ki bits is 32KB, which fits L1 on
/// virtually all x86/ARM parts.
pub const DEFAULT_SEGMENT_BITS: usize = 256 * 1024;

/// Which numbers get a bit in the sieve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DensityScheme {
    /// Odd numbers only.
    #[default]
    OddOnly,
    /// Numbers congruent to 1 or 5 mod 6.
    Wheel6,
}

/// Tuning knobs for a [`Sieve`](crate::Sieve).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SieveConfig {
    /// Dispatch threshold between the flat and segmented strategies.
    #[serde(default = "default_threshold")]
    pub threshold: u64,
    /// Maximum candidates per window in the segmented strategy.
    #[serde(default = "default_segment_bits")]
    pub segment_bits: usize,
    /// Density scheme used by both strategies.
    #[serde(default)]
    pub density: DensityScheme,
}

fn default_threshold() -> u64 {
    DEFAULT_THRESHOLD
}

fn default_segment_bits() -> usize {
    DEFAULT_SEGMENT_BITS
}

impl Default for SieveConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            segment_bits: DEFAULT_SEGMENT_BITS,
            density: DensityScheme::default(),
        }
    }
}

impl SieveConfig {
    /// Loads the configuration from defaults, an optional file and the
    /// environment, then validates it.
    pub fn new(config_path: Option<impl AsRef<Path>>) -> Result<Self, Error> {
        let env = Environment::with_prefix("PRIMER")
            .separator("__")
            .try_parsing(true)
            .prefix_separator("_");

        let mut cfg_builder = Config::builder();
        if let Some(path) = config_path {
            cfg_builder = cfg_builder.add_source(File::from(path.as_ref()));
        }
        cfg_builder = cfg_builder.add_source(env);

        let settings: SieveConfig = cfg_builder.build()?.try_deserialize()?;
        settings.validate()?;

        Ok(settings)
    }

    /// Perform validation on the configuration.
    pub fn validate(&self) -> Result<(), Error> {
        if self.segment_bits == 0 {
            return Err(Error::InvalidConfig(
                "segment_bits must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
