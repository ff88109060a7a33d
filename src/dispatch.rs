//! Picks a traversal strategy and a density scheme for each run.
//!
//! The two axes are independent: [`Strategy`] decides how the range is
//! walked, [`DensityScheme`] decides which numbers get a bit. Every pairing
//! is valid.

use std::path::Path;

use crate::base;
use crate::codec::Density;
use crate::codec::OddOnly;
use crate::codec::Wheel6;
use crate::config::DensityScheme;
use crate::config::SieveConfig;
use crate::error::Error;
use crate::segmented;
use crate::sink::Sink;

/// How the range `[0, n]` is traversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// One bit set over the whole range.
    Flat,
    /// Base primes up to `√n`, then fixed-size windows over the rest.
    Segmented,
}

impl Strategy {
    /// Bounds below `threshold` go flat, everything else is segmented.
    pub fn for_bound(n: u64, threshold: u64) -> Self {
        if n < threshold {
            Strategy::Flat
        } else {
            Strategy::Segmented
        }
    }
}

/// Outcome of [`compute_primes`].
#[derive(Debug)]
pub struct Report {
    /// Number of primes in `[0, bound]`.
    pub count: u64,
    /// Set when the output could not be fully written. The count is still
    /// exact.
    pub warning: Option<Error>,
}

/// A configured sieve. Holds no state between runs.
#[derive(Debug, Clone, Default)]
pub struct Sieve {
    config: SieveConfig,
}

impl Sieve {
    pub fn new(config: SieveConfig) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SieveConfig {
        &self.config
    }

    /// The strategy [`Sieve::run`] would pick for `n`.
    pub fn strategy(&self, n: u64) -> Strategy {
        Strategy::for_bound(n, self.config.threshold)
    }

    /// Counts the primes `<= n`, forwarding each to `sink` in ascending order.
    pub fn run(&self, n: u64, sink: &mut Sink<'_>) -> Result<u64, Error> {
        self.run_with(self.strategy(n), n, sink)
    }

    /// Like [`Sieve::run`], with the strategy forced.
    pub fn run_with(&self, strategy: Strategy, n: u64, sink: &mut Sink<'_>) -> Result<u64, Error> {
        match self.config.density {
            DensityScheme::OddOnly => self.run_density::<OddOnly>(strategy, n, sink),
            DensityScheme::Wheel6 => self.run_density::<Wheel6>(strategy, n, sink),
        }
    }

    fn run_density<D: Density>(
        &self,
        strategy: Strategy,
        n: u64,
        sink: &mut Sink<'_>,
    ) -> Result<u64, Error> {
        tracing::debug!(
            bound = n,
            threshold = self.config.threshold,
            density = D::NAME,
            ?strategy,
            "starting sieve"
        );
        match strategy {
            Strategy::Flat => base::count::<D>(n, sink),
            Strategy::Segmented => segmented::count::<D>(n, self.config.segment_bits, sink),
        }
    }

    /// Counts the primes `<= bound`, writing them to `output` if given.
    ///
    /// The output file is opened before and closed after the run, on every
    /// path. Output problems never fail the call; they come back as
    /// [`Report::warning`].
    pub fn compute(&self, bound: u64, output: Option<&Path>) -> Result<Report, Error> {
        self.compute_with(self.strategy(bound), bound, output)
    }

    /// Like [`Sieve::compute`], with the strategy forced.
    pub fn compute_with(
        &self,
        strategy: Strategy,
        bound: u64,
        output: Option<&Path>,
    ) -> Result<Report, Error> {
        let mut sink = match output {
            Some(path) => Sink::create(path),
            None => Sink::count_only(),
        };
        let result = self.run_with(strategy, bound, &mut sink);
        let warning = sink.finish();

        Ok(Report { count: result?, warning })
    }
}

/// Counts the primes in `[0, bound]` with the default configuration, writing
/// them one per line to `output` if given.
pub fn compute_primes(bound: u64, output: Option<&Path>) -> Result<Report, Error> {
    Sieve::default().compute(bound, output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0 => Strategy::Flat ; "zero")]
    #[test_case(9_999_999 => Strategy::Flat ; "just below")]
    #[test_case(10_000_000 => Strategy::Segmented ; "at threshold")]
    #[test_case(u64::MAX => Strategy::Segmented ; "max")]
    fn test_for_bound(n: u64) -> Strategy {
        Strategy::for_bound(n, 10_000_000)
    }

    #[test_case(0, 0 ; "zero")]
    #[test_case(1, 0 ; "one")]
    #[test_case(2, 1 ; "two")]
    #[test_case(3, 2 ; "three")]
    #[test_case(10, 4 ; "ten")]
    #[test_case(100, 25 ; "hundred")]
    fn test_compute_primes(n: u64, expected: u64) {
        let report = compute_primes(n, None).unwrap();
        assert_eq!(report.count, expected);
        assert!(report.warning.is_none());
    }

    #[test]
    fn test_every_pairing_agrees() {
        let n = 200_000;
        let mut counts = Vec::new();
        for density in [DensityScheme::OddOnly, DensityScheme::Wheel6] {
            let sieve = Sieve::new(SieveConfig {
                segment_bits: 1024,
                density,
                ..SieveConfig::default()
            })
            .unwrap();
            for strategy in [Strategy::Flat, Strategy::Segmented] {
                counts.push(sieve.run_with(strategy, n, &mut Sink::count_only()).unwrap());
            }
        }
        assert_eq!(counts, vec![17_984; 4]);
    }

    #[test]
    fn test_small_threshold_dispatches_segmented() {
        let sieve = Sieve::new(SieveConfig { threshold: 50, ..SieveConfig::default() }).unwrap();
        assert_eq!(sieve.strategy(49), Strategy::Flat);
        assert_eq!(sieve.strategy(50), Strategy::Segmented);
        assert_eq!(sieve.compute(49, None).unwrap().count, 15);
        assert_eq!(sieve.compute(50, None).unwrap().count, 15);
        assert_eq!(sieve.compute(53, None).unwrap().count, 16);
    }

    #[test]
    fn test_new_rejects_zero_window() {
        let config = SieveConfig { segment_bits: 0, ..SieveConfig::default() };
        assert!(matches!(Sieve::new(config), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_unwritable_output_still_counts() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened as a file.
        let report = compute_primes(100, Some(dir.path())).unwrap();
        assert_eq!(report.count, 25);
        assert!(matches!(report.warning, Some(Error::SinkOpen(..))));
    }
}
