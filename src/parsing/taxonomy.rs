//! Parser for tab-separated taxonomy files.
//!
//! Each line maps a sequence identifier to its lineage:
//!
//! ```text
//! GA45A.1   Bacteria;Bacteroidota;Bacteroidia;Bacteroidales;Tannerellaceae
//! ```
//!
//! Lines starting with `#` and blank lines are ignored.

use std::collections::HashMap;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

use crate::core::taxonomy::Lineage;

#[derive(Error, Debug)]
pub enum TaxonomyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid taxonomy line {line_number}: expected 'id<TAB>lineage', got '{line}'")]
    InvalidLine { line_number: usize, line: String },

    #[error("Duplicate identifier '{0}' in taxonomy file")]
    DuplicateId(String),
}

/// Parse a taxonomy file into an id-to-lineage map.
///
/// # Errors
///
/// Returns `TaxonomyError::Io` if the file cannot be read,
/// `TaxonomyError::InvalidLine` for malformed lines, or
/// `TaxonomyError::DuplicateId` if an identifier appears twice.
pub fn parse_taxonomy_file(path: &Path) -> Result<HashMap<String, Lineage>, TaxonomyError> {
    let file = std::fs::File::open(path)?;
    let reader = BufReader::new(file);

    let mut map = HashMap::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let Some((id, label)) = trimmed.split_once('\t') else {
            return Err(TaxonomyError::InvalidLine {
                line_number: index + 1,
                line: trimmed.to_string(),
            });
        };

        let lineage = Lineage::parse(label);
        if lineage.depth() == 0 {
            return Err(TaxonomyError::InvalidLine {
                line_number: index + 1,
                line: trimmed.to_string(),
            });
        }

        if map.insert(id.trim().to_string(), lineage).is_some() {
            return Err(TaxonomyError::DuplicateId(id.trim().to_string()));
        }
    }

    Ok(map)
}
