//! Classification of query sequences against a trained database.
//!
//! The pipeline for one query:
//!
//! 1. Encode the sequence into its unique k-mer set ([`crate::core::kmer`]).
//! 2. Draw `n_bootstrap` resamples of the set ([`bootstrap::BootstrapSampler`]).
//! 3. Score each draw against every genus and take the arg-max
//!    ([`scorer::best_genus`]).
//! 4. Aggregate the genus votes into a per-rank consensus with confidence
//!    percentages ([`consensus::aggregate`]).
//!
//! The database is read-only throughout, so classifying many sequences in
//! parallel requires no synchronization.

pub mod bootstrap;
pub mod consensus;
pub mod scorer;

use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

use crate::core::kmer::detect_kmers;
use crate::core::taxonomy::Lineage;
use crate::database::store::TrainedDatabase;
use bootstrap::BootstrapSampler;
pub use consensus::Classification;

/// Default number of bootstrap iterations.
pub const DEFAULT_BOOTSTRAP_N: usize = 100;

/// Default minimum confidence (percent) for reporting a rank.
pub const DEFAULT_MIN_CONFIDENCE: f64 = 80.0;

#[derive(Error, Debug)]
pub enum ClassifyError {
    #[error("Query sequence produced no usable k-mers (shorter than k or all ambiguous)")]
    NoUsableKmers,

    #[error("Too few k-mers for bootstrap sampling: {found} unique k-mers at k={k}")]
    InsufficientKmersForBootstrap { found: usize, k: usize },
}

/// Parameters for classification.
#[derive(Debug, Clone)]
pub struct ClassifyParams {
    /// Number of bootstrap iterations. Default: 100.
    pub n_bootstrap: usize,

    /// Minimum confidence (percent) when filtering results for display.
    /// Default: 80.
    pub min_confidence: f64,

    /// Seed for the bootstrap RNG. `None` seeds from entropy, so repeated
    /// runs vary by design (bootstrap is a Monte Carlo estimator of
    /// classification stability).
    pub seed: Option<u64>,
}

impl Default for ClassifyParams {
    fn default() -> Self {
        Self {
            n_bootstrap: DEFAULT_BOOTSTRAP_N,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            seed: None,
        }
    }
}

/// Classifies query sequences against a borrowed [`TrainedDatabase`].
pub struct Classifier<'a> {
    db: &'a TrainedDatabase,
}

impl<'a> Classifier<'a> {
    #[must_use]
    pub fn new(db: &'a TrainedDatabase) -> Self {
        Self { db }
    }

    /// Classify one query sequence.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::NoUsableKmers`] if the sequence yields no
    /// valid k-mers, or [`ClassifyError::InsufficientKmersForBootstrap`] if
    /// the bootstrap sample size would be zero. Failures are per-sequence:
    /// other queries in a batch are unaffected.
    pub fn classify(
        &self,
        sequence: &str,
        params: &ClassifyParams,
    ) -> Result<Classification, ClassifyError> {
        let kmers = detect_kmers(sequence.as_bytes(), self.db.k());
        if kmers.is_empty() {
            return Err(ClassifyError::NoUsableKmers);
        }

        let sampler = BootstrapSampler::new(kmers.as_slice(), self.db.k()).ok_or(
            ClassifyError::InsufficientKmersForBootstrap {
                found: kmers.len(),
                k: self.db.k(),
            },
        )?;

        let mut rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut sample = Vec::with_capacity(sampler.sample_size());
        let mut votes: Vec<Lineage> = Vec::with_capacity(params.n_bootstrap);
        for _ in 0..params.n_bootstrap {
            sampler.draw(&mut rng, &mut sample);
            let genus = scorer::best_genus(self.db, &sample);
            votes.push(Lineage::parse(&self.db.genera()[genus]));
        }

        Ok(consensus::aggregate(&votes))
    }
}
