//! # taxotype
//!
//! A library for taxonomic classification of DNA sequences using a naive
//! Bayes classifier with bootstrap confidence estimation.
//!
//! Amplicon surveys of marker genes such as 16S rRNA produce sequences with
//! no labels attached. `taxotype` assigns them to a taxonomy by training on a
//! set of labeled reference sequences: every sequence is reduced to the set
//! of k-mers it contains, per-genus log probabilities are computed for each
//! possible k-mer, and a query is assigned to the genus that maximizes the
//! summed log probability of its k-mers.
//!
//! Confidence comes from bootstrapping. Each query is classified repeatedly
//! on random subsets of its k-mers, and the fraction of rounds that agree at
//! each taxonomic rank becomes that rank's confidence score.
//!
//! ## Features
//!
//! - **Training**: Build a classification database from labeled references
//! - **Classification**: Assign genus-level taxonomy with per-rank confidence
//! - **Bootstrap confidence**: 100 rounds by default, seedable for reproducibility
//! - **Confidence filtering**: Truncate lineages below a confidence threshold
//! - **Persistence**: Save and reload trained databases
//!
//! ## Example
//!
//! ```rust
//! use taxotype::{Classifier, ClassifyParams, DatabaseBuilder, Lineage, ReferenceRecord};
//!
//! let records = vec![
//!     ReferenceRecord::new(
//!         "ref_1".to_string(),
//!         "ACGTACGTACGTACGTACGTACGTACGT".to_string(),
//!         Lineage::parse("Bacteria;Firmicutes;Bacilli"),
//!     ),
//!     ReferenceRecord::new(
//!         "ref_2".to_string(),
//!         "GGCCGGCCGGCCGGCCGGCCGGCCGGCC".to_string(),
//!         Lineage::parse("Bacteria;Bacteroidota;Bacteroidia"),
//!     ),
//! ];
//!
//! let db = DatabaseBuilder::new(4).build(&records).unwrap();
//!
//! let params = ClassifyParams {
//!     seed: Some(42),
//!     ..ClassifyParams::default()
//! };
//! let result = Classifier::new(&db)
//!     .classify("ACGTACGTACGTACGTACGTACGTACGT", &params)
//!     .unwrap();
//! println!("{}", result.filtered(80.0).render());
//! ```
//!
//! ## Modules
//!
//! - [`core`]: K-mer encoding and taxonomy data types
//! - [`database`]: Database training and persistence
//! - [`classify`]: Bootstrap classification and consensus
//! - [`parsing`]: Parsers for FASTA and taxonomy files
//! - [`cli`]: Command-line interface implementation

pub mod classify;
pub mod cli;
pub mod core;
pub mod database;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use classify::consensus::Classification;
pub use classify::{Classifier, ClassifyParams};
pub use core::kmer::{detect_kmers, KmerSet};
pub use core::taxonomy::{Lineage, ReferenceRecord};
pub use database::builder::DatabaseBuilder;
pub use database::store::TrainedDatabase;
