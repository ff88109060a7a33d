//! Flat, single-pass sieve over `[1, m]`.
//!
//! Used on its own for small bounds, and by the segmented sieve to find the
//! base primes up to `√n`. The whole range lives in one [`BitSet`], so memory
//! grows with `m`.

use crate::bitset::BitSet;
use crate::codec::strike_multiples;
use crate::codec::Density;
use crate::error::Error;
use crate::sink::Sink;

/// Upper bound on π(n) for pre-allocation. Overestimates by ~15%.
#[inline]
fn prime_count_upper(n: u64) -> usize {
    if n < 10 {
        return 4;
    }
    let nf = n as f64;
    (nf / nf.ln() * 1.15) as usize + 1
}

/// Marks every composite candidate `<= m`. Surviving bits are the primes
/// among the candidates. Requires `m >= 1`.
fn mark_composites<D: Density>(m: u64) -> Result<BitSet, Error> {
    let last = D::floor_candidate(m).ok_or(Error::BoundTooLarge(m))?;
    let len = usize::try_from(D::to_index(last) + 1).map_err(|_| Error::BoundTooLarge(m))?;

    let mut bits = BitSet::new(len);
    // Bit 0 is the number 1
    bits.clear(0);

    for i in 1..len {
        let p = D::to_number(i as u64);
        if p > m / p {
            break;
        }
        if bits.get(i) {
            strike_multiples::<D>(&mut bits, 0, p, p, last);
        }
    }

    Ok(bits)
}

/// Counts the primes `<= m`, forwarding each to `sink` in ascending order.
pub fn count<D: Density>(m: u64, sink: &mut Sink<'_>) -> Result<u64, Error> {
    if m < 2 {
        return Ok(0);
    }
    let bits = mark_composites::<D>(m)?;

    let mut count = 0;
    for &p in D::EXCLUDED_PRIMES.iter().take_while(|&&p| p <= m) {
        sink.emit(p);
        count += 1;
    }

    if sink.is_emitting() {
        for i in bits.iter_ones() {
            sink.emit(D::to_number(i as u64));
            count += 1;
        }
    } else {
        count += bits.count_ones() as u64;
    }

    tracing::trace!(bound = m, count, density = D::NAME, "flat sieve done");
    Ok(count)
}

/// Collects the primes `<= m` in ascending order into a buffer holding at
/// most `capacity` entries.
///
/// Running out of room means the caller's capacity bound is wrong, which is
/// reported as [`Error::BasePrimeOverflow`] instead of returning a short list.
pub fn collect<D: Density>(m: u64, capacity: usize) -> Result<Vec<u64>, Error> {
    let mut primes = Vec::with_capacity(prime_count_upper(m).min(capacity));
    if m < 2 {
        return Ok(primes);
    }
    let bits = mark_composites::<D>(m)?;

    let excluded = D::EXCLUDED_PRIMES.iter().copied().take_while(|&p| p <= m);
    let survivors = bits.iter_ones().map(|i| D::to_number(i as u64));
    for p in excluded.chain(survivors) {
        if primes.len() == capacity {
            return Err(Error::BasePrimeOverflow { capacity, limit: m });
        }
        primes.push(p);
    }

    Ok(primes)
}
