//! Index codecs: how natural numbers map onto bit positions.
//!
//! A density scheme decides which numbers are stored at all ("candidates")
//! and gives a dense, monotone numbering of them. Index 0 is always the
//! number 1 so that a sieve can knock it out with a single `clear(0)`.
//!
//! | scheme      | candidates        | bits per 6 integers |
//! |-------------|-------------------|---------------------|
//! | [`OddOnly`] | odd numbers       | 3                   |
//! | [`Wheel6`]  | `x ≡ 1, 5 (mod 6)`| 2                   |
//!
//! Primes that are not candidates (2, and 3 for the wheel) are listed in
//! [`Density::EXCLUDED_PRIMES`] and must be reported by the caller.

use crate::bitset::BitSet;

/// A density scheme. Implementations are zero-sized and used purely as type
/// parameters so each sieve is monomorphized per scheme.
pub trait Density {
    /// Name used in logs and bench output.
    const NAME: &'static str;

    /// Primes the scheme never stores, in ascending order.
    const EXCLUDED_PRIMES: &'static [u64];

    /// Integers covered by one stored bit.
    const SPAN_PER_BIT: u64;

    fn is_candidate(x: u64) -> bool;

    /// Bit index of a candidate. Only meaningful when `is_candidate(x)`.
    fn to_index(x: u64) -> u64;

    fn to_number(i: u64) -> u64;

    /// The smallest candidate strictly greater than the candidate `k`.
    fn next_candidate(k: u64) -> Option<u64>;

    /// The smallest candidate `>= x`, or `None` if it does not fit in a u64.
    fn ceil_candidate(x: u64) -> Option<u64>;

    /// The largest candidate `<= x`, or `None` when `x == 0`.
    fn floor_candidate(x: u64) -> Option<u64>;
}

/// One bit per odd number.
#[derive(Debug, Clone, Copy, Default)]
pub struct OddOnly;

impl Density for OddOnly {
    const NAME: &'static str = "odd-only";
    const EXCLUDED_PRIMES: &'static [u64] = &[2];
    const SPAN_PER_BIT: u64 = 2;

    #[inline]
    fn is_candidate(x: u64) -> bool {
        x & 1 == 1
    }

    #[inline]
    fn to_index(x: u64) -> u64 {
        x >> 1
    }

    #[inline]
    fn to_number(i: u64) -> u64 {
        2 * i + 1
    }

    #[inline]
    fn next_candidate(k: u64) -> Option<u64> {
        k.checked_add(2)
    }

    #[inline]
    fn ceil_candidate(x: u64) -> Option<u64> {
        if x & 1 == 1 {
            Some(x)
        } else {
            x.checked_add(1)
        }
    }

    #[inline]
    fn floor_candidate(x: u64) -> Option<u64> {
        match x {
            0 => None,
            x if x & 1 == 1 => Some(x),
            x => Some(x - 1),
        }
    }
}

/// Two bits per six integers: the residues 1 and 5 mod 6.
#[derive(Debug, Clone, Copy, Default)]
pub struct Wheel6;

impl Density for Wheel6 {
    const NAME: &'static str = "wheel6";
    const EXCLUDED_PRIMES: &'static [u64] = &[2, 3];
    const SPAN_PER_BIT: u64 = 3;

    #[inline]
    fn is_candidate(x: u64) -> bool {
        matches!(x % 6, 1 | 5)
    }

    #[inline]
    fn to_index(x: u64) -> u64 {
        2 * (x / 6) + u64::from(x % 6 == 5)
    }

    #[inline]
    fn to_number(i: u64) -> u64 {
        6 * (i / 2) + if i & 1 == 0 { 1 } else { 5 }
    }

    #[inline]
    fn next_candidate(k: u64) -> Option<u64> {
        // 1 -> 5 -> 7 -> 11 -> 13 ...
        if k % 6 == 1 {
            k.checked_add(4)
        } else {
            k.checked_add(2)
        }
    }

    #[inline]
    fn ceil_candidate(x: u64) -> Option<u64> {
        match x % 6 {
            0 => x.checked_add(1),
            1 | 5 => Some(x),
            r => x.checked_add(5 - r),
        }
    }

    #[inline]
    fn floor_candidate(x: u64) -> Option<u64> {
        match x % 6 {
            0 => x.checked_sub(1),
            1 | 5 => Some(x),
            r => Some(x - (r - 1)),
        }
    }
}

/// Integer square root, exact for every u64.
///
/// Seeds from `f64::sqrt` and then corrects by whole steps, since the float
/// result can be off by one once `n` passes 2^52.
#[inline]
pub fn isqrt(n: u64) -> u64 {
    if n == 0 {
        return 0;
    }
    let mut x = (n as f64).sqrt() as u64;
    while x > 0 && x.checked_mul(x).map_or(true, |sq| sq > n) {
        x -= 1;
    }
    while (x + 1).checked_mul(x + 1).map_or(false, |sq| sq <= n) {
        x += 1;
    }
    x
}

/// The first cofactor `k` for striking multiples of the prime `p` inside a
/// range starting at `first`: the smallest candidate `k` with `k >= p` and
/// `p * k >= first`.
///
/// Candidates are closed under multiplication by a candidate prime, so
/// walking `k` over candidates visits exactly the stored multiples of `p`.
#[inline]
pub(crate) fn first_cofactor<D: Density>(p: u64, first: u64) -> Option<u64> {
    D::ceil_candidate(first.div_ceil(p).max(p))
}

/// Clears every stored multiple `p * k <= last`, starting from cofactor `k`.
/// `base` is the codec index of the set's bit 0.
#[inline]
pub(crate) fn strike_multiples<D: Density>(
    bits: &mut BitSet,
    base: u64,
    p: u64,
    mut k: u64,
    last: u64,
) {
    while let Some(x) = p.checked_mul(k) {
        if x > last {
            break;
        }
        bits.clear((D::to_index(x) - base) as usize);
        match D::next_candidate(k) {
            Some(next) => k = next,
            None => break,
        }
    }
}
