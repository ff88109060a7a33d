//! Top-level error type for the primer library
//!

use std::path::PathBuf;

/// Errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The output file could not be created. The sieve carries on without it.
    #[error("could not open output file '{}': {}", .0.display(), .1)]
    SinkOpen(PathBuf, #[source] std::io::Error),
    /// Writing a prime to the output failed. The sieve carries on without it.
    #[error("failed to write prime {1} to the output: {0}")]
    SinkWrite(#[source] std::io::Error, u64),
    /// The final flush of the output failed.
    #[error("failed to flush the output: {0}")]
    SinkFlush(#[source] std::io::Error),
    /// More base primes turned up than the buffer was sized for. This means
    /// the capacity bound is broken, so the run is abandoned rather than
    /// silently truncated.
    #[error("found more than {capacity} base primes up to {limit}")]
    BasePrimeOverflow {
        /// Size of the base prime buffer.
        capacity: usize,
        /// The bound the base primes were sieved up to.
        limit: u64,
    },
    /// The bit set for this bound cannot be addressed on this platform.
    #[error("bound {0} is too large to sieve in memory on this platform")]
    BoundTooLarge(u64),
    /// A configuration value failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// The configuration could not be loaded.
    #[error("could not load configuration: {0}")]
    Config(#[from] config::ConfigError),
}
