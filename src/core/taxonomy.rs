use serde::{Deserialize, Serialize};

/// Delimiter between ranks in a taxonomy string (SILVA/RDP convention).
pub const RANK_DELIMITER: char = ';';

/// A hierarchical taxonomy label, coarsest rank first.
///
/// Two reference sequences with identical full labels are the same class for
/// training purposes; the classifier operates at the granularity of the
/// supplied label column, not strictly biological genus.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Lineage {
    /// Taxon names, one per rank (e.g. kingdom down to genus).
    pub ranks: Vec<String>,
}

impl Lineage {
    /// Parse a delimited taxonomy string, e.g.
    /// `Bacteria;Firmicutes;Bacilli;Lactobacillales`.
    ///
    /// Rank names are trimmed and empty components are dropped, wherever
    /// they occur. An interior empty component therefore shortens the
    /// lineage; the database builder's uniform-depth check surfaces the
    /// mismatch at training time.
    #[must_use]
    pub fn parse(label: &str) -> Self {
        let ranks = label
            .split(RANK_DELIMITER)
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .collect();
        Self { ranks }
    }

    /// Number of ranks in this lineage.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.ranks.len()
    }

    /// The full label string, ranks joined by the delimiter.
    #[must_use]
    pub fn label(&self) -> String {
        self.ranks.join(&RANK_DELIMITER.to_string())
    }

    /// The label truncated to its first `depth` ranks.
    #[must_use]
    pub fn prefix(&self, depth: usize) -> String {
        self.ranks[..depth.min(self.ranks.len())].join(&RANK_DELIMITER.to_string())
    }
}

impl std::fmt::Display for Lineage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A labeled reference sequence used to train the classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceRecord {
    /// Accession or identifier from the FASTA header.
    pub id: String,

    /// DNA sequence (read-only to the classifier).
    pub sequence: String,

    /// Taxonomic label for this sequence.
    pub lineage: Lineage,
}

impl ReferenceRecord {
    pub fn new(id: impl Into<String>, sequence: impl Into<String>, lineage: Lineage) -> Self {
        Self {
            id: id.into(),
            sequence: sequence.into(),
            lineage,
        }
    }
}
