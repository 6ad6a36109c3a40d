//! Bit-set move sampling.
//!
//! A move set is a slice of 64-bit words where bit `i` of word `i / 64`
//! flags move `i`. A prefix popcount over the words turns "the n-th legal
//! move" into a binary search plus an in-word scan, which keeps uniform
//! sampling cheap enough to run on every playout step.

use rand::Rng;

/// Number of flags stored per word.
pub const WORD_BITS: usize = 64;

/// Fills `prefix[i]` with the number of set bits in `words[..=i]`.
///
/// # Panics
/// Panics if `words` is empty or the slices differ in length.
pub fn prefix_popcount(words: &[u64], prefix: &mut [u32]) {
    assert!(!words.is_empty(), "prefix_popcount on a zero-word bit set");
    assert_eq!(words.len(), prefix.len(), "prefix length must match word count");

    let mut total = 0;
    for (sum, word) in prefix.iter_mut().zip(words) {
        total += word.count_ones();
        *sum = total;
    }
}

/// Position of the `n`-th (0-based) set bit of `word`.
///
/// Clears the lowest set bit `n` times, then reads the new lowest one.
///
/// # Panics
/// Panics if `n` is not below `word.count_ones()`.
#[inline]
pub fn index_of_nth_one(mut word: u64, n: u32) -> usize {
    assert!(n < word.count_ones(), "bit {n} of {word:#b} does not exist");
    for _ in 0..n {
        word &= word - 1; // Clear lowest bit
    }
    word.trailing_zeros() as usize
}

/// Position of the `n`-th (0-based) set bit across `words`.
///
/// `prefix` must be the prefix popcount of `words`.
///
/// # Panics
/// Panics if `n` is not below the total number of set bits.
pub fn index_of_nth_one_in(words: &[u64], prefix: &[u32], n: u32) -> usize {
    // First word whose running total exceeds n
    let word_index = prefix.partition_point(|&sum| sum <= n);
    assert!(
        word_index < words.len(),
        "bit {n} requested from a set of {} bits",
        prefix.last().copied().unwrap_or(0)
    );

    let before = if word_index == 0 { 0 } else { prefix[word_index - 1] };
    word_index * WORD_BITS + index_of_nth_one(words[word_index], n - before)
}

/// Draws a uniformly random set bit from `words`.
///
/// # Panics
/// Panics if no bit is set; callers check `prefix[W - 1] > 0` first.
pub fn random_one<R: Rng + ?Sized>(words: &[u64], prefix: &[u32], rng: &mut R) -> usize {
    let total = prefix[prefix.len() - 1];
    assert!(total > 0, "random_one on an empty bit set");

    let r = rng.gen_range(0..total);
    index_of_nth_one_in(words, prefix, r)
}

/// An owned legal-move set together with its prefix popcount.
///
/// Sized once for a game's move space and refilled in place.
#[derive(Clone, Debug)]
pub struct MoveSet {
    words: Vec<u64>,
    prefix: Vec<u32>,
}

impl MoveSet {
    /// Create an empty set of `word_count` words.
    ///
    /// # Panics
    /// Panics if `word_count` is zero.
    pub fn new(word_count: usize) -> Self {
        assert!(word_count > 0, "a move set needs at least one word");
        Self {
            words: vec![0; word_count],
            prefix: vec![0; word_count],
        }
    }

    /// Create a set from raw words.
    pub fn from_words(words: &[u64]) -> Self {
        let mut set = Self::new(words.len());
        set.load_with(|w| w.copy_from_slice(words));
        set
    }

    /// Overwrite the words through `fill` and recompute the prefix.
    ///
    /// `fill` receives the words zeroed.
    pub fn load_with(&mut self, fill: impl FnOnce(&mut [u64])) {
        self.words.fill(0);
        fill(&mut self.words);
        prefix_popcount(&self.words, &mut self.prefix);
    }

    /// The raw words.
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    /// The prefix popcount of the words.
    pub fn prefix(&self) -> &[u32] {
        &self.prefix
    }

    /// Number of set bits.
    #[inline]
    pub fn count(&self) -> u32 {
        self.prefix[self.prefix.len() - 1]
    }

    /// Returns true if no bit is set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Returns true if bit `index` is set.
    pub fn contains(&self, index: usize) -> bool {
        self.words
            .get(index / WORD_BITS)
            .is_some_and(|word| (word >> (index % WORD_BITS)) & 1 == 1)
    }

    /// Index of the `n`-th set bit.
    pub fn nth(&self, n: u32) -> usize {
        index_of_nth_one_in(&self.words, &self.prefix, n)
    }

    /// Draw a uniformly random set bit.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        random_one(&self.words, &self.prefix, rng)
    }

    /// Iterate over set bit indices in ascending order.
    pub fn iter(&self) -> Ones<'_> {
        Ones {
            words: &self.words,
            word_index: 0,
            current: self.words[0],
            remaining: self.count() as usize,
        }
    }
}

/// Iterator over the set bits of a [`MoveSet`].
pub struct Ones<'a> {
    words: &'a [u64],
    word_index: usize,
    current: u64,
    remaining: usize,
}

impl Iterator for Ones<'_> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        while self.current == 0 {
            self.word_index += 1;
            self.current = *self.words.get(self.word_index)?;
        }
        let bit = self.current.trailing_zeros() as usize;
        self.current &= self.current - 1;
        self.remaining -= 1;
        Some(self.word_index * WORD_BITS + bit)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Ones<'_> {}

/// A growable set of flags addressed by node id.
#[derive(Clone, Debug, Default)]
pub struct VisitedSet {
    words: Vec<u64>,
    len: usize,
}

impl VisitedSet {
    /// Create a set covering ids `0..len`, all clear.
    pub fn with_len(len: usize) -> Self {
        let mut set = Self::default();
        set.grow_to(len);
        set
    }

    /// Number of ids covered.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the set covers no ids.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Extend coverage to ids `0..len`. Never shrinks.
    pub fn grow_to(&mut self, len: usize) {
        if len > self.len {
            self.words.resize(len.div_ceil(WORD_BITS), 0);
            self.len = len;
        }
    }

    /// Set the flag for `id`.
    ///
    /// # Panics
    /// Panics if `id` is not covered.
    pub fn insert(&mut self, id: usize) {
        assert!(id < self.len, "node {id} outside visited table of {}", self.len);
        self.words[id / WORD_BITS] |= 1 << (id % WORD_BITS);
    }

    /// Returns true if the flag for `id` is set. Uncovered ids are unset.
    pub fn contains(&self, id: usize) -> bool {
        id < self.len && (self.words[id / WORD_BITS] >> (id % WORD_BITS)) & 1 == 1
    }

    /// Number of set flags.
    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }
}
