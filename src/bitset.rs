//! Packed candidate bits.
//!
//! One bit per candidate, 64 candidates per word. A fresh set starts with
//! every bit on ("presumed prime") and bits are only ever cleared. Bits past
//! the capacity in the last word are masked off at creation, so
//! [`BitSet::iter_ones`] never walks off the end.

/// Fixed-capacity bit array, all ones on creation.
#[derive(Debug, Clone)]
pub struct BitSet {
    words: Vec<u64>,
    len: usize,
}

impl BitSet {
    /// Creates a set of `len` bits, all set.
    pub fn new(len: usize) -> Self {
        let num_words = len.div_ceil(64);
        let mut words = vec![!0u64; num_words];

        let tail = len & 63;
        if tail != 0 {
            words[num_words - 1] &= (1u64 << tail) - 1;
        }

        Self { words, len }
    }

    /// Number of bits the set was created with.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn get(&self, i: usize) -> bool {
        debug_assert!(i < self.len, "bit index {i} out of range for {} bits", self.len);
        (self.words[i >> 6] >> (i & 63)) & 1 == 1
    }

    #[inline]
    pub fn clear(&mut self, i: usize) {
        debug_assert!(i < self.len, "bit index {i} out of range for {} bits", self.len);
        self.words[i >> 6] &= !(1u64 << (i & 63));
    }

    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Indices of set bits in ascending order.
    pub fn iter_ones(&self) -> Ones<'_> {
        Ones {
            words: &self.words,
            word_index: 0,
            current: self.words.first().copied().unwrap_or(0),
        }
    }

    /// Heap bytes held by the set.
    pub fn byte_size(&self) -> usize {
        self.words.len() * std::mem::size_of::<u64>()
    }
}

/// Iterator over set bits. Pops the lowest set bit of each word in turn.
pub struct Ones<'a> {
    words: &'a [u64],
    word_index: usize,
    current: u64,
}

impl Iterator for Ones<'_> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        while self.current == 0 {
            self.word_index += 1;
            self.current = *self.words.get(self.word_index)?;
        }
        let tz = self.current.trailing_zeros() as usize;
        self.current &= self.current - 1;
        Some((self.word_index << 6) + tz)
    }
}
