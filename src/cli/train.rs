use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::cli::OutputFormat;
use crate::core::kmer::DEFAULT_K;
use crate::core::taxonomy::{Lineage, ReferenceRecord};
use crate::database::builder::DatabaseBuilder;
use crate::parsing;

#[derive(Args)]
pub struct TrainArgs {
    /// Reference FASTA file (plain or gzipped). Lineages are taken from the
    /// taxonomy file when given, otherwise from the FASTA descriptions
    /// (SILVA-style `>ID Bacteria;Firmicutes;...` headers)
    #[arg(required = true)]
    pub reference: PathBuf,

    /// Tab-separated taxonomy file: `id<TAB>lineage`
    #[arg(short, long)]
    pub taxonomy: Option<PathBuf>,

    /// Output database file
    #[arg(short, long)]
    pub output: PathBuf,

    /// K-mer length
    #[arg(short, long, default_value_t = DEFAULT_K)]
    pub kmer_length: usize,
}

/// Execute train subcommand
///
/// # Errors
///
/// Returns an error if the inputs cannot be parsed, a reference sequence has
/// no lineage, or training fails.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: TrainArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let fasta = parsing::fasta::parse_fasta_file(&args.reference)
        .with_context(|| format!("Failed to read {}", args.reference.display()))?;

    if verbose {
        eprintln!(
            "Parsed {} reference sequences from {}",
            fasta.len(),
            args.reference.display()
        );
    }

    let taxonomy_map = match &args.taxonomy {
        Some(path) => Some(
            parsing::taxonomy::parse_taxonomy_file(path)
                .with_context(|| format!("Failed to read {}", path.display()))?,
        ),
        None => None,
    };

    let mut records = Vec::with_capacity(fasta.len());
    for record in fasta {
        let lineage = match &taxonomy_map {
            Some(map) => map
                .get(&record.id)
                .cloned()
                .with_context(|| format!("No taxonomy entry for sequence '{}'", record.id))?,
            None => {
                let description = record.description.as_deref().with_context(|| {
                    format!(
                        "Sequence '{}' has no description to take a lineage from; \
                         provide a taxonomy file with --taxonomy",
                        record.id
                    )
                })?;
                Lineage::parse(description)
            }
        };
        records.push(ReferenceRecord::new(record.id, record.sequence, lineage));
    }

    let db = DatabaseBuilder::new(args.kmer_length).build(&records)?;
    db.save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    let n_sequences = records.len();
    match format {
        OutputFormat::Text => {
            println!(
                "Trained database: {} sequences, {} genera, k={}",
                n_sequences,
                db.n_genera(),
                db.k()
            );
            println!("Written to {}", args.output.display());
        }
        OutputFormat::Json => {
            let summary = serde_json::json!({
                "sequences": n_sequences,
                "genera": db.n_genera(),
                "k": db.k(),
                "rank_depth": db.rank_depth(),
                "output": args.output.display().to_string(),
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Tsv => {
            println!("sequences\tgenera\tk\trank_depth\toutput");
            println!(
                "{}\t{}\t{}\t{}\t{}",
                n_sequences,
                db.n_genera(),
                db.k(),
                db.rank_depth(),
                args.output.display()
            );
        }
    }

    Ok(())
}
