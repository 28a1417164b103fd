//! Consensus aggregation of bootstrap votes into per-rank confidences.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::taxonomy::{Lineage, RANK_DELIMITER};

/// Helper function to convert usize count to f64 with explicit precision loss allowance
#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// The consensus taxonomy for one query sequence.
///
/// `taxonomy` and `confidence` are parallel, coarsest rank first: entry `i`
/// is the majority taxon name at rank `i` and the percentage of bootstrap
/// votes supporting it. Confidence is expected to be non-increasing with
/// depth on well-formed input, but divergence is reported as-is: it signals
/// mixed bootstrap votes, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Majority taxon name at each rank.
    pub taxonomy: Vec<String>,

    /// Support percentage (0-100) at each rank.
    pub confidence: Vec<f64>,
}

impl Classification {
    /// Truncate at the first rank whose confidence falls below `min_confidence`.
    ///
    /// This is the conventional display filter: report only ranks the
    /// bootstrap supports at or above the threshold (default 80).
    #[must_use]
    pub fn filtered(&self, min_confidence: f64) -> Self {
        let keep = self
            .confidence
            .iter()
            .take_while(|&&c| c >= min_confidence)
            .count();
        Self {
            taxonomy: self.taxonomy[..keep].to_vec(),
            confidence: self.confidence[..keep].to_vec(),
        }
    }

    /// Number of ranks in the result.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.taxonomy.len()
    }

    /// Render as `Name(confidence)` pairs joined by the rank delimiter,
    /// e.g. `Bacteria(100.0);Firmicutes(87.0)`.
    #[must_use]
    pub fn render(&self) -> String {
        self.taxonomy
            .iter()
            .zip(&self.confidence)
            .map(|(name, conf)| format!("{name}({conf:.1})"))
            .collect::<Vec<_>>()
            .join(&RANK_DELIMITER.to_string())
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}

/// Aggregate bootstrap votes into a per-rank majority with confidence.
///
/// For each truncation depth, every vote's label prefix (first `depth`
/// ranks) is tallied; the majority prefix wins, with ties broken by the
/// earliest vote. All votes must have the same rank depth; the database
/// builder guarantees this for training labels.
#[must_use]
pub fn aggregate(votes: &[Lineage]) -> Classification {
    let Some(first) = votes.first() else {
        return Classification {
            taxonomy: Vec::new(),
            confidence: Vec::new(),
        };
    };

    let n_ranks = first.depth();
    let n_votes = count_to_f64(votes.len());
    let mut taxonomy = Vec::with_capacity(n_ranks);
    let mut confidence = Vec::with_capacity(n_ranks);

    for depth in 1..=n_ranks {
        // (count, first position) per prefix; the winner is the highest
        // count, earliest first position.
        let mut tally: HashMap<String, (usize, usize)> = HashMap::new();
        for (position, vote) in votes.iter().enumerate() {
            let entry = tally.entry(vote.prefix(depth)).or_insert((0, position));
            entry.0 += 1;
        }

        let Some((majority, (count, _))) = tally
            .into_iter()
            .min_by_key(|&(_, (count, position))| (std::cmp::Reverse(count), position))
        else {
            break;
        };

        let name = majority
            .rsplit(RANK_DELIMITER)
            .next()
            .unwrap_or(&majority)
            .to_string();
        taxonomy.push(name);
        confidence.push(count_to_f64(count) / n_votes * 100.0);
    }

    Classification {
        taxonomy,
        confidence,
    }
}
