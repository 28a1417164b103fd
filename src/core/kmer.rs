//! K-mer encoding for sequence classification.
//!
//! Maps DNA sequences to sets of base-4 k-mer indices (A=0, C=1, G=2, T=3).
//! Any window containing an ambiguous base is discarded entirely rather than
//! assigned an index, so a sequence of N's yields an empty set.

/// Largest supported k-mer length: 4^15 still fits a `u32` index.
pub const MAX_K: usize = 15;

/// Default k-mer length used for training and classification.
pub const DEFAULT_K: usize = 8;

/// Number of distinct k-mer indices for a given k (4^k).
///
/// Callers must ensure `k <= MAX_K`; the database builder validates this
/// before any encoding happens.
#[must_use]
pub fn kmer_space(k: usize) -> usize {
    1 << (2 * k)
}

/// The unique k-mers of one sequence, in first-seen order.
///
/// Uniqueness and a stable iteration order are both load-bearing: training
/// counts each k-mer once per sequence, and bootstrap sampling draws uniform
/// random indices into the backing array.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KmerSet {
    indices: Vec<u32>,
}

impl KmerSet {
    /// Number of unique k-mers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// True when the sequence produced no valid k-mer windows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The backing array, in first-seen order.
    #[must_use]
    pub fn as_slice(&self) -> &[u32] {
        &self.indices
    }
}

/// Extract the unique k-mer indices of a sequence.
///
/// Slides a window of length `k` with stride 1. Case-insensitive; windows
/// containing any symbol outside ACGT are skipped. Sequences shorter than
/// `k` produce an empty set.
#[must_use]
pub fn detect_kmers(sequence: &[u8], k: usize) -> KmerSet {
    if k == 0 || k > MAX_K || sequence.len() < k {
        return KmerSet::default();
    }

    let mask: u32 = (1 << (2 * k)) - 1;
    let mut seen = vec![false; kmer_space(k)];
    let mut indices = Vec::new();

    // Rolling 2-bit encoder: an ambiguous base resets the window, which is
    // equivalent to discarding every window that contains it.
    let mut kmer: u32 = 0;
    let mut valid_len = 0usize;

    for &base in sequence {
        match encode_base(base) {
            Some(code) => {
                kmer = ((kmer << 2) | code) & mask;
                valid_len += 1;
            }
            None => {
                kmer = 0;
                valid_len = 0;
            }
        }

        if valid_len >= k && !seen[kmer as usize] {
            seen[kmer as usize] = true;
            indices.push(kmer);
        }
    }

    KmerSet { indices }
}

/// Encode one base to its 2-bit value, or `None` for ambiguity codes.
const fn encode_base(base: u8) -> Option<u32> {
    match base {
        b'A' | b'a' => Some(0),
        b'C' | b'c' => Some(1),
        b'G' | b'g' => Some(2),
        b'T' | b't' => Some(3),
        _ => None,
    }
}
