//! Parser for FASTA files using noodles.
//!
//! Reads full sequences for training and classification. Supports both
//! uncompressed and gzip/bgzip compressed files.
//!
//! Supported extensions:
//! - `.fa`, `.fasta`, `.fna` (uncompressed)
//! - `.fa.gz`, `.fasta.gz`, `.fna.gz` (gzip compressed)

use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;
use noodles::fasta;
use thiserror::Error;

use crate::utils::validation::check_sequence_limit;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid FASTA format: {0}")]
    InvalidFormat(String),

    #[error("noodles error: {0}")]
    Noodles(String),

    #[error("Too many sequences: {0} exceeds maximum allowed")]
    TooManySequences(usize),
}

/// One FASTA record: identifier, optional description, sequence text.
#[derive(Debug, Clone)]
pub struct FastaRecord {
    /// Identifier (first word of the header line).
    pub id: String,

    /// Remainder of the header line, if any. Reference databases in the
    /// SILVA convention carry the taxonomy string here.
    pub description: Option<String>,

    /// Sequence text as read from the file.
    pub sequence: String,
}

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Parse a FASTA file into records.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, `ParseError::Noodles`
/// if parsing fails, `ParseError::InvalidFormat` if the file contains no
/// sequences, or `ParseError::TooManySequences` if the limit is exceeded.
pub fn parse_fasta_file(path: &Path) -> Result<Vec<FastaRecord>, ParseError> {
    if is_gzipped(path) {
        let file = std::fs::File::open(path)?;
        let decoder = GzDecoder::new(file);
        let reader = BufReader::new(decoder);
        parse_fasta_reader(&mut fasta::io::Reader::new(reader))
    } else {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        parse_fasta_reader(&mut fasta::io::Reader::new(reader))
    }
}

/// Parse from a noodles FASTA reader
fn parse_fasta_reader<R: BufRead>(
    reader: &mut fasta::io::Reader<R>,
) -> Result<Vec<FastaRecord>, ParseError> {
    let mut records = Vec::new();

    for result in reader.records() {
        let record = result
            .map_err(|e| ParseError::Noodles(format!("Failed to parse FASTA record: {e}")))?;

        if check_sequence_limit(records.len()).is_some() {
            return Err(ParseError::TooManySequences(records.len()));
        }

        let id = String::from_utf8_lossy(record.name()).to_string();
        let description = record
            .description()
            .map(|d| String::from_utf8_lossy(d).to_string());
        let sequence = String::from_utf8_lossy(record.sequence().as_ref()).to_string();

        records.push(FastaRecord {
            id,
            description,
            sequence,
        });
    }

    if records.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No sequences found in FASTA file".to_string(),
        ));
    }

    Ok(records)
}
