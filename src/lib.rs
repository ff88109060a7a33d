//! Bit-packed Sieve of Eratosthenes.
//!
//! Finds every prime up to an inclusive bound, optionally writing them out
//! in ascending order, and reports how many there are.
//!
//! - 1 bit per candidate, with candidates chosen by a density scheme
//!   ([`codec::OddOnly`] or [`codec::Wheel6`])
//! - a flat sieve for small bounds, and a cache-sized segmented sieve with
//!   bounded memory for large ones, picked by [`Strategy::for_bound`]
//! - lowest-set-bit iteration over 64-bit words when collecting survivors
//!
//! ```
//! let report = primer::compute_primes(100, None).unwrap();
//! assert_eq!(report.count, 25);
//! ```

pub mod base;
pub mod bitset;
pub mod codec;
pub mod config;
mod dispatch;
pub mod error;
pub mod logging;
pub mod segmented;
pub mod sink;

pub use config::DensityScheme;
pub use config::SieveConfig;
pub use dispatch::compute_primes;
pub use dispatch::Report;
pub use dispatch::Sieve;
pub use dispatch::Strategy;
pub use error::Error;
pub use sink::Sink;
