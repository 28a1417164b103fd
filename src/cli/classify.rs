use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use rayon::prelude::*;

use crate::classify::{Classification, Classifier, ClassifyError, ClassifyParams};
use crate::cli::OutputFormat;
use crate::database::store::TrainedDatabase;
use crate::parsing;

#[derive(Args)]
pub struct ClassifyArgs {
    /// Query FASTA file (plain or gzipped)
    #[arg(required = true)]
    pub input: PathBuf,

    /// Trained database file
    #[arg(short, long)]
    pub database: PathBuf,

    /// Number of bootstrap iterations
    #[arg(short = 'n', long, default_value_t = crate::classify::DEFAULT_BOOTSTRAP_N)]
    pub bootstrap: usize,

    /// Minimum confidence (percent) for reporting a rank
    #[arg(short = 'c', long, default_value_t = crate::classify::DEFAULT_MIN_CONFIDENCE)]
    pub min_confidence: f64,

    /// Seed for reproducible bootstrap sampling
    #[arg(long)]
    pub seed: Option<u64>,

    /// Report every rank regardless of confidence
    #[arg(long)]
    pub all_ranks: bool,
}

/// Execute classify subcommand
///
/// # Errors
///
/// Returns an error if the database or queries cannot be read. Per-sequence
/// classification failures are reported in the output and do not abort the
/// batch.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ClassifyArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let db = TrainedDatabase::load(&args.database)
        .with_context(|| format!("Failed to load {}", args.database.display()))?;

    if verbose {
        eprintln!(
            "Loaded database: {} genera, k={}, {} ranks",
            db.n_genera(),
            db.k(),
            db.rank_depth()
        );
    }

    let queries = parsing::fasta::parse_fasta_file(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    let classifier = Classifier::new(&db);

    // The database is read-only, so queries shard cleanly across threads.
    // With a fixed seed each query gets its own offset so results stay
    // independent of thread scheduling.
    let results: Vec<(String, Result<Classification, ClassifyError>)> = queries
        .par_iter()
        .enumerate()
        .map(|(index, record)| {
            let params = ClassifyParams {
                n_bootstrap: args.bootstrap,
                min_confidence: args.min_confidence,
                seed: args.seed.map(|s| s.wrapping_add(index as u64)),
            };
            let result = classifier.classify(&record.sequence, &params);
            (record.id.clone(), result)
        })
        .collect();

    let min_confidence = if args.all_ranks {
        0.0
    } else {
        args.min_confidence
    };

    match format {
        OutputFormat::Text => print_text_results(&results, min_confidence),
        OutputFormat::Json => print_json_results(&results, min_confidence)?,
        OutputFormat::Tsv => print_tsv_results(&results, min_confidence),
    }

    Ok(())
}

fn print_text_results(
    results: &[(String, Result<Classification, ClassifyError>)],
    min_confidence: f64,
) {
    for (id, result) in results {
        match result {
            Ok(classification) => {
                println!("{id}\t{}", classification.filtered(min_confidence).render());
            }
            Err(e) => eprintln!("Warning: could not classify '{id}': {e}"),
        }
    }
}

fn print_json_results(
    results: &[(String, Result<Classification, ClassifyError>)],
    min_confidence: f64,
) -> anyhow::Result<()> {
    let output: Vec<serde_json::Value> = results
        .iter()
        .map(|(id, result)| match result {
            Ok(classification) => {
                let filtered = classification.filtered(min_confidence);
                serde_json::json!({
                    "id": id,
                    "taxonomy": filtered.taxonomy,
                    "confidence": filtered.confidence,
                    "rendered": filtered.render(),
                })
            }
            Err(e) => serde_json::json!({
                "id": id,
                "error": e.to_string(),
            }),
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_results(
    results: &[(String, Result<Classification, ClassifyError>)],
    min_confidence: f64,
) {
    println!("id\ttaxonomy\tdeepest_rank\tdeepest_confidence");
    for (id, result) in results {
        match result {
            Ok(classification) => {
                let filtered = classification.filtered(min_confidence);
                let deepest_rank = filtered.taxonomy.last().cloned().unwrap_or_default();
                let deepest_confidence = filtered
                    .confidence
                    .last()
                    .map(|c| format!("{c:.1}"))
                    .unwrap_or_default();
                println!(
                    "{id}\t{}\t{deepest_rank}\t{deepest_confidence}",
                    filtered.render()
                );
            }
            Err(e) => eprintln!("Warning: could not classify '{id}': {e}"),
        }
    }
}
