use std::collections::HashMap;

use thiserror::Error;
use tracing::info;

use crate::core::kmer::{detect_kmers, kmer_space, KmerSet, MAX_K};
use crate::core::taxonomy::ReferenceRecord;
use crate::database::store::TrainedDatabase;

/// Helper function to convert usize count to f64 with explicit precision loss allowance
#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Invalid k-mer length {0}: must be between 1 and {MAX_K}")]
    InvalidKmerLength(usize),

    #[error("Training set is empty")]
    EmptyTrainingSet,

    #[error(
        "Inconsistent taxonomy depth for '{id}': expected {expected} ranks, found {found}"
    )]
    InconsistentRankDepth {
        id: String,
        expected: usize,
        found: usize,
    },
}

/// Builds a [`TrainedDatabase`] from labeled reference sequences.
///
/// Training performs a single pass over the reference set:
///
/// 1. Encode every sequence into its unique k-mer set.
/// 2. Compute Laplace-smoothed word priors over the corpus, where a k-mer
///    contributes once per sequence containing it.
/// 3. Assign genus indices to full label strings in first-seen order.
/// 4. Count (k-mer, genus) occurrences and convert to the log-probability
///    matrix `ln((count + prior) / (genus_sequences + 1))`.
///
/// Every prior is strictly positive and every denominator is at least 1, so
/// the logarithm argument is always positive and every matrix cell finite.
#[derive(Debug, Clone)]
pub struct DatabaseBuilder {
    k: usize,
}

impl DatabaseBuilder {
    #[must_use]
    pub fn new(k: usize) -> Self {
        Self { k }
    }

    /// Train a database from reference records.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::InvalidKmerLength`] if `k` is 0 or exceeds
    /// [`MAX_K`], [`BuildError::EmptyTrainingSet`] if no records are given,
    /// or [`BuildError::InconsistentRankDepth`] if the training labels do
    /// not all have the same number of ranks.
    pub fn build(&self, records: &[ReferenceRecord]) -> Result<TrainedDatabase, BuildError> {
        if self.k == 0 || self.k > MAX_K {
            return Err(BuildError::InvalidKmerLength(self.k));
        }
        if records.is_empty() {
            return Err(BuildError::EmptyTrainingSet);
        }

        // All bootstrap votes must split into the same number of ranks, so
        // mixed-depth taxonomies are rejected up front.
        let rank_depth = records[0].lineage.depth();
        for record in records {
            if record.lineage.depth() != rank_depth {
                return Err(BuildError::InconsistentRankDepth {
                    id: record.id.clone(),
                    expected: rank_depth,
                    found: record.lineage.depth(),
                });
            }
        }

        let space = kmer_space(self.k);
        let kmer_sets: Vec<KmerSet> = records
            .iter()
            .map(|r| detect_kmers(r.sequence.as_bytes(), self.k))
            .collect();

        let priors = word_priors(&kmer_sets, space);

        // Genus index assignment: full label strings, first-seen order.
        let mut genus_of_label: HashMap<String, usize> = HashMap::new();
        let mut genera: Vec<String> = Vec::new();
        let mut genus_of_record: Vec<usize> = Vec::with_capacity(records.len());
        for record in records {
            let label = record.lineage.label();
            let genus = *genus_of_label.entry(label.clone()).or_insert_with(|| {
                genera.push(label);
                genera.len() - 1
            });
            genus_of_record.push(genus);
        }

        let n_genera = genera.len();
        let mut genus_counts = vec![0u32; n_genera];
        let mut kmer_counts: Vec<HashMap<u32, u32>> = vec![HashMap::new(); n_genera];
        for (set, &genus) in kmer_sets.iter().zip(&genus_of_record) {
            genus_counts[genus] += 1;
            let counts = &mut kmer_counts[genus];
            for &kmer in set.as_slice() {
                *counts.entry(kmer).or_insert(0) += 1;
            }
        }

        let mut log_probs = vec![0.0f64; n_genera * space];
        for (genus, counts) in kmer_counts.iter().enumerate() {
            let denominator = f64::from(genus_counts[genus]) + 1.0;
            let row = &mut log_probs[genus * space..(genus + 1) * space];
            for (i, cell) in row.iter_mut().enumerate() {
                #[allow(clippy::cast_possible_truncation)]
                let count = counts.get(&(i as u32)).copied().unwrap_or(0);
                *cell = ((f64::from(count) + priors[i]) / denominator).ln();
            }
        }

        info!(
            "Trained database: {} sequences, {} genera, k={}",
            records.len(),
            n_genera,
            self.k
        );

        Ok(TrainedDatabase::new(
            self.k,
            rank_depth,
            genera,
            genus_counts,
            log_probs,
        ))
    }
}

/// Laplace-smoothed prior probability per k-mer index:
/// `(sequences containing the k-mer + 0.5) / (total sequences + 1)`.
fn word_priors(kmer_sets: &[KmerSet], space: usize) -> Vec<f64> {
    let mut occurrences = vec![0u32; space];
    for set in kmer_sets {
        for &kmer in set.as_slice() {
            occurrences[kmer as usize] += 1;
        }
    }

    let denominator = count_to_f64(kmer_sets.len()) + 1.0;
    occurrences
        .into_iter()
        .map(|count| (f64::from(count) + 0.5) / denominator)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::taxonomy::Lineage;

    fn record(id: &str, seq: &str, label: &str) -> ReferenceRecord {
        ReferenceRecord::new(id, seq, Lineage::parse(label))
    }

    #[test]
    fn test_invalid_k() {
        let builder = DatabaseBuilder::new(0);
        let records = vec![record("r1", "ACGTACGT", "A;B")];
        assert!(matches!(
            builder.build(&records),
            Err(BuildError::InvalidKmerLength(0))
        ));

        let builder = DatabaseBuilder::new(MAX_K + 1);
        assert!(matches!(
            builder.build(&records),
            Err(BuildError::InvalidKmerLength(_))
        ));
    }

    #[test]
    fn test_empty_training_set() {
        let builder = DatabaseBuilder::new(8);
        assert!(matches!(
            builder.build(&[]),
            Err(BuildError::EmptyTrainingSet)
        ));
    }

    #[test]
    fn test_mixed_rank_depth_rejected() {
        let builder = DatabaseBuilder::new(2);
        let records = vec![
            record("r1", "ACGTACGT", "A;B;C"),
            record("r2", "TGCATGCA", "A;B"),
        ];
        let err = builder.build(&records).unwrap_err();
        assert!(matches!(
            err,
            BuildError::InconsistentRankDepth {
                expected: 3,
                found: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_genus_indices_first_seen_order() {
        let builder = DatabaseBuilder::new(2);
        let records = vec![
            record("r1", "ACGTACGT", "X;Y"),
            record("r2", "TGCATGCA", "X;Z"),
            record("r3", "ACGTACGA", "X;Y"),
        ];
        let db = builder.build(&records).unwrap();
        assert_eq!(db.genera(), &["X;Y".to_string(), "X;Z".to_string()]);
        assert_eq!(db.genus_counts(), &[2, 1]);
    }

    #[test]
    fn test_word_priors_in_range() {
        let sets = vec![
            detect_kmers(b"ACGTACGT", 2),
            detect_kmers(b"TTTTTTTT", 2),
        ];
        let priors = word_priors(&sets, kmer_space(2));
        assert!(priors.iter().all(|&p| p > 0.0 && p <= 1.0));
    }

    #[test]
    fn test_word_priors_count_once_per_sequence() {
        // TT appears many times in each sequence but counts once per sequence.
        let sets = vec![
            detect_kmers(b"TTTTTTTT", 2),
            detect_kmers(b"TTTTTTTT", 2),
        ];
        let priors = word_priors(&sets, kmer_space(2));
        let tt = 0b1111usize;
        assert!((priors[tt] - (2.0 + 0.5) / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_occurrence_totals_match_corpus() {
        // Inverting the prior formula recovers the raw occurrence counts;
        // their sum must equal the total k-mer occurrences over the corpus.
        let sets = vec![
            detect_kmers(b"ACGTACGT", 2),
            detect_kmers(b"TTTTGGGG", 2),
            detect_kmers(b"ACACACAC", 2),
        ];
        let total: usize = sets.iter().map(KmerSet::len).sum();
        let priors = word_priors(&sets, kmer_space(2));

        let denominator = count_to_f64(sets.len()) + 1.0;
        let recovered: f64 = priors.iter().map(|p| p * denominator - 0.5).sum();
        assert!((recovered - count_to_f64(total)).abs() < 1e-9);
    }

    #[test]
    fn test_matrix_cells_finite() {
        let builder = DatabaseBuilder::new(3);
        let records = vec![
            record("r1", "ACGTACGTACGT", "A;B"),
            record("r2", "TGCATGCATGCA", "A;C"),
        ];
        let db = builder.build(&records).unwrap();
        for genus in 0..db.n_genera() {
            assert!(db.log_prob_row(genus).iter().all(|v| v.is_finite()));
        }
    }

    #[test]
    fn test_build_is_deterministic() {
        let builder = DatabaseBuilder::new(4);
        let records = vec![
            record("r1", "ACGTACGTACGTACGT", "A;B"),
            record("r2", "TTTTGGGGCCCCAAAA", "A;C"),
        ];
        let a = builder.build(&records).unwrap();
        let b = builder.build(&records).unwrap();
        for genus in 0..a.n_genera() {
            assert_eq!(a.log_prob_row(genus), b.log_prob_row(genus));
        }
    }

    #[test]
    fn test_observed_kmer_scores_higher_than_unseen() {
        let builder = DatabaseBuilder::new(2);
        let records = vec![
            record("r1", "AAAA", "X;Y"), // only AA
            record("r2", "CCCC", "X;Z"), // only CC
        ];
        let db = builder.build(&records).unwrap();
        let aa = 0usize;
        let row_xy = db.log_prob_row(0);
        let row_xz = db.log_prob_row(1);
        assert!(row_xy[aa] > row_xz[aa]);
    }
}
