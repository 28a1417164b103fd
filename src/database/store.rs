use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::core::kmer::kmer_space;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read database: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to decode database: {0}")]
    Decode(#[from] bincode::Error),

    #[error("Failed to serialize database: {0}")]
    Json(#[from] serde_json::Error),
}

/// Database file format version for compatibility checking
pub const DATABASE_VERSION: &str = "1.0.0";

/// Serializable database file format
#[derive(Debug, Serialize, Deserialize)]
pub struct DatabaseFile {
    pub version: String,
    pub created_at: String,
    pub database: TrainedDatabase,
}

/// A trained classification database.
///
/// Immutable after construction: built once per training corpus and read
/// concurrently by any number of classification calls. Holds the conditional
/// log-probability matrix (genus-major, `n_genera` rows of `4^k` cells) and
/// the ordered genus label list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainedDatabase {
    k: usize,
    rank_depth: usize,
    genera: Vec<String>,
    genus_counts: Vec<u32>,
    log_probs: Vec<f64>,
}

impl TrainedDatabase {
    pub(crate) fn new(
        k: usize,
        rank_depth: usize,
        genera: Vec<String>,
        genus_counts: Vec<u32>,
        log_probs: Vec<f64>,
    ) -> Self {
        debug_assert_eq!(log_probs.len(), genera.len() * kmer_space(k));
        Self {
            k,
            rank_depth,
            genera,
            genus_counts,
            log_probs,
        }
    }

    /// K-mer length the database was trained with.
    #[must_use]
    pub fn k(&self) -> usize {
        self.k
    }

    /// Number of ranks in every training label.
    #[must_use]
    pub fn rank_depth(&self) -> usize {
        self.rank_depth
    }

    /// Genus labels (full taxonomy strings), in training order.
    #[must_use]
    pub fn genera(&self) -> &[String] {
        &self.genera
    }

    /// Number of genus-level classes.
    #[must_use]
    pub fn n_genera(&self) -> usize {
        self.genera.len()
    }

    /// Training sequences per genus, parallel to [`Self::genera`].
    #[must_use]
    pub fn genus_counts(&self) -> &[u32] {
        &self.genus_counts
    }

    /// Log-probability row for one genus: `4^k` cells indexed by k-mer.
    #[must_use]
    pub fn log_prob_row(&self, genus: usize) -> &[f64] {
        let space = kmer_space(self.k);
        &self.log_probs[genus * space..(genus + 1) * space]
    }

    /// Load a database from a binary file written by [`Self::save`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Read`] if the file cannot be read or
    /// [`StoreError::Decode`] if it is not a valid database file.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let bytes = std::fs::read(path)?;
        let file: DatabaseFile = bincode::deserialize(&bytes)?;

        // Version check (warn but don't fail)
        if file.version != DATABASE_VERSION {
            warn!(
                "Database version mismatch (expected {DATABASE_VERSION}, found {})",
                file.version
            );
        }

        Ok(file.database)
    }

    /// Write the database to a binary file.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Decode`] if encoding fails or
    /// [`StoreError::Read`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let file = DatabaseFile {
            version: DATABASE_VERSION.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            database: self.clone(),
        };
        let bytes = bincode::serialize(&file)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Export the database to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, StoreError> {
        let file = DatabaseFile {
            version: DATABASE_VERSION.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            database: self.clone(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }
}
