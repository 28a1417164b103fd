//! Command-line interface for taxotype.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **train**: Build a classification database from labeled reference sequences
//! - **classify**: Classify query sequences against a trained database
//! - **db**: Inspect or export a trained database
//!
//! ## Usage
//!
//! ```text
//! # Train from a reference FASTA with SILVA-style headers
//! taxotype train silva_subset.fasta -o reference.db
//!
//! # Train with a separate taxonomy file
//! taxotype train refs.fasta --taxonomy refs.tsv -o reference.db
//!
//! # Classify queries
//! taxotype classify queries.fasta -d reference.db
//!
//! # Reproducible classification, JSON output for scripting
//! taxotype classify queries.fasta -d reference.db --seed 42 --format json
//!
//! # Database summary
//! taxotype db info reference.db
//! ```

use clap::{Parser, Subcommand};

pub mod classify;
pub mod database;
pub mod train;

#[derive(Parser)]
#[command(name = "taxotype")]
#[command(version)]
#[command(about = "Naive Bayes taxonomic classification of rRNA gene sequences")]
#[command(
    long_about = "taxotype assigns taxonomic labels to DNA sequences by comparing their k-mers against a database of labeled reference sequences.\n\nIt implements the RDP-style naive Bayes classifier with bootstrap confidence estimation: each query is classified repeatedly on random subsets of its k-mers, and the per-rank agreement across bootstrap rounds becomes the reported confidence."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a classification database from labeled reference sequences
    Train(train::TrainArgs),

    /// Classify query sequences against a trained database
    Classify(classify::ClassifyArgs),

    /// Inspect or export a trained database
    Db(database::DbArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
