//! Fixed-capacity node sets packed into `u64` words.

#[inline(always)]
const fn word_count(capacity: usize) -> usize {
    capacity.div_ceil(64)
}

#[inline(always)]
const fn locate(v: usize) -> (usize, u64) {
    (v / 64, 1u64 << (v % 64))
}

/// A set of dense node indices in `0..capacity`.
///
/// Iteration is always in ascending index order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeSet {
    words: Vec<u64>,
}

impl NodeSet {
    /// Empty set able to hold indices `0..capacity`.
    pub fn empty(capacity: usize) -> Self {
        Self {
            words: vec![0u64; word_count(capacity)],
        }
    }

    /// Set containing every index in `0..capacity`.
    pub fn full(capacity: usize) -> Self {
        let mut words = vec![u64::MAX; word_count(capacity)];
        let tail = capacity % 64;
        if tail != 0 {
            if let Some(last) = words.last_mut() {
                *last = (1u64 << tail) - 1;
            }
        }
        Self { words }
    }

    #[inline]
    pub fn insert(&mut self, v: usize) {
        let (w, mask) = locate(v);
        self.words[w] |= mask;
    }

    #[inline]
    pub fn remove(&mut self, v: usize) {
        let (w, mask) = locate(v);
        self.words[w] &= !mask;
    }

    #[inline]
    pub fn contains(&self, v: usize) -> bool {
        let (w, mask) = locate(v);
        self.words.get(w).is_some_and(|word| word & mask != 0)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| *w == 0)
    }

    /// Smallest member.
    #[inline]
    pub fn first(&self) -> Option<usize> {
        self.words
            .iter()
            .enumerate()
            .find(|(_, w)| **w != 0)
            .map(|(i, w)| i * 64 + w.trailing_zeros() as usize)
    }

    /// Members present in both sets.
    #[inline]
    pub fn intersection(&self, other: &NodeSet) -> NodeSet {
        debug_assert_eq!(self.words.len(), other.words.len());
        NodeSet {
            words: self
                .words
                .iter()
                .zip(&other.words)
                .map(|(a, b)| a & b)
                .collect(),
        }
    }

    /// Members in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(i, &word)| {
            let mut w = word;
            std::iter::from_fn(move || {
                if w == 0 {
                    return None;
                }
                let tz = w.trailing_zeros() as usize;
                w &= w - 1;
                Some(i * 64 + tz)
            })
        })
    }
}
