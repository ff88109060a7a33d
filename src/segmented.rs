//! Segmented sieve for large bounds.
//!
//! Strategy:
//!   1. Flat sieve: find the base primes `<= √n` (a few KB even for huge n)
//!   2. Walk `(√n, n]` in windows of at most `segment_bits` candidates
//!   3. In each window, strike the stored multiples of every base prime
//!   4. Report the surviving candidates, window by window, in order
//!
//! Each window gets its own small [`BitSet`] that stays hot in cache, so
//! memory is bounded by the window size plus the base primes no matter how
//! large `n` gets.

use crate::base;
use crate::bitset::BitSet;
use crate::codec::first_cofactor;
use crate::codec::isqrt;
use crate::codec::strike_multiples;
use crate::codec::Density;
use crate::error::Error;
use crate::sink::Sink;

/// Counts the primes `<= n`, forwarding each to `sink` in ascending order.
pub fn count<D: Density>(n: u64, segment_bits: usize, sink: &mut Sink<'_>) -> Result<u64, Error> {
    if n < 2 {
        return Ok(0);
    }
    if segment_bits == 0 {
        return Err(Error::InvalidConfig("segment_bits must be greater than zero".into()));
    }

    // Phase 1: base primes. π(m) <= m, so √n slots always suffice.
    let sqrt_n = isqrt(n);
    let capacity = usize::try_from(sqrt_n).map_err(|_| Error::BoundTooLarge(n))?;
    let base_primes = base::collect::<D>(sqrt_n, capacity)?;
    tracing::debug!(sqrt_n, base_primes = base_primes.len(), density = D::NAME, "base primes ready");

    let mut count = 0;
    for &p in &base_primes {
        sink.emit(p);
        count += 1;
    }
    // Excluded primes above √n (only for tiny n) sit below every window candidate.
    for &p in D::EXCLUDED_PRIMES.iter().filter(|&&p| p > sqrt_n && p <= n) {
        sink.emit(p);
        count += 1;
    }

    // Excluded primes are the smallest ones and have no stored multiples.
    let sieving = &base_primes[base_primes.partition_point(|&p| !D::is_candidate(p))..];

    // Phase 2: windows over (√n, n]
    let span = (segment_bits as u64).saturating_mul(D::SPAN_PER_BIT);
    let mut low = sqrt_n + 1;
    let mut windows = 0u64;
    while low <= n {
        let high = low.saturating_add(span - 1).min(n);
        count += sieve_window::<D>(low, high, sieving, sink)?;
        windows += 1;

        if high == n {
            break;
        }
        low = high + 1;
    }

    tracing::debug!(n, windows, count, "segmented sieve done");
    Ok(count)
}

/// Sieves the candidates in `[low, high]` and reports the primes among them.
fn sieve_window<D: Density>(
    low: u64,
    high: u64,
    sieving: &[u64],
    sink: &mut Sink<'_>,
) -> Result<u64, Error> {
    let (Some(first), Some(last)) = (D::ceil_candidate(low), D::floor_candidate(high)) else {
        return Ok(0);
    };
    if first > last {
        return Ok(0);
    }

    let base = D::to_index(first);
    let len = usize::try_from(D::to_index(last) - base + 1).map_err(|_| Error::BoundTooLarge(high))?;
    let mut bits = BitSet::new(len);

    for &p in sieving {
        // p² past the window, and so is every larger prime's square
        if p > last / p {
            break;
        }
        if let Some(k) = first_cofactor::<D>(p, first) {
            strike_multiples::<D>(&mut bits, base, p, k, last);
        }
    }

    tracing::trace!(low, high, candidates = len, "window sieved");

    if !sink.is_emitting() {
        return Ok(bits.count_ones() as u64);
    }
    let mut count = 0;
    for i in bits.iter_ones() {
        sink.emit(D::to_number(base + i as u64));
        count += 1;
    }
    Ok(count)
}
