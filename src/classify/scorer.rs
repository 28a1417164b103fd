//! Per-genus log-probability scoring over a k-mer subset.

use crate::database::store::TrainedDatabase;

/// Sum the log-probabilities of `kmers` for every genus and return the
/// index of the best-scoring genus.
///
/// Implemented as an indexed gather-and-reduce over the dense matrix: no
/// sparse intermediate is materialized. Ties break toward the lowest genus
/// index, which is the first-seen genus in training order.
#[must_use]
pub fn best_genus(db: &TrainedDatabase, kmers: &[u32]) -> usize {
    let mut best_score = f64::NEG_INFINITY;
    let mut best_index = 0;

    for genus in 0..db.n_genera() {
        let row = db.log_prob_row(genus);
        let score: f64 = kmers.iter().map(|&kmer| row[kmer as usize]).sum();
        if score > best_score {
            best_score = score;
            best_index = genus;
        }
    }

    best_index
}
