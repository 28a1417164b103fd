//! Bootstrap resampling of a query's k-mer set.

use rand::Rng;

/// Draws resampled subsets of a query's unique k-mers.
///
/// Each draw samples `floor(n_kmers / k)` indices *with replacement* from
/// the set's fixed-order backing array, simulating partial reads of varying
/// composition. The divisor `k` is a fixed constant of the algorithm.
#[derive(Debug)]
pub struct BootstrapSampler<'a> {
    kmers: &'a [u32],
    sample_size: usize,
}

impl<'a> BootstrapSampler<'a> {
    /// Create a sampler over the query's k-mer backing array.
    ///
    /// Returns `None` when the sample size would be zero (fewer than `k`
    /// unique k-mers), in which case bootstrap estimation is impossible.
    #[must_use]
    pub fn new(kmers: &'a [u32], k: usize) -> Option<Self> {
        let sample_size = kmers.len() / k;
        if sample_size == 0 {
            return None;
        }
        Some(Self { kmers, sample_size })
    }

    /// Number of k-mers per draw.
    #[must_use]
    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    /// Draw one bootstrap sample into `buffer` (cleared first).
    pub fn draw<R: Rng>(&self, rng: &mut R, buffer: &mut Vec<u32>) {
        buffer.clear();
        for _ in 0..self.sample_size {
            let index = rng.gen_range(0..self.kmers.len());
            buffer.push(self.kmers[index]);
        }
    }
}
