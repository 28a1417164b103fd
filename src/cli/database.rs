use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Subcommand};

use crate::cli::OutputFormat;
use crate::database::store::TrainedDatabase;

#[derive(Args)]
pub struct DbArgs {
    #[command(subcommand)]
    pub command: DbCommands,
}

#[derive(Subcommand)]
pub enum DbCommands {
    /// Print a summary of a trained database
    Info {
        /// Trained database file
        #[arg(required = true)]
        database: PathBuf,
    },

    /// Export a trained database as JSON
    Export {
        /// Trained database file
        #[arg(required = true)]
        database: PathBuf,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Execute db subcommand
///
/// # Errors
///
/// Returns an error if the database cannot be read or the export cannot be
/// written.
pub fn run(args: DbArgs, format: OutputFormat, _verbose: bool) -> anyhow::Result<()> {
    match args.command {
        DbCommands::Info { database } => {
            let db = TrainedDatabase::load(&database)
                .with_context(|| format!("Failed to load {}", database.display()))?;
            print_info(&db, format);
        }
        DbCommands::Export { database, output } => {
            let db = TrainedDatabase::load(&database)
                .with_context(|| format!("Failed to load {}", database.display()))?;
            let json = db.to_json().context("Failed to serialize database")?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("Exported to {}", path.display());
                }
                None => println!("{json}"),
            }
        }
    }

    Ok(())
}

fn print_info(db: &TrainedDatabase, format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            println!("K-mer length:  {}", db.k());
            println!("Rank depth:    {}", db.rank_depth());
            println!("Genera:        {}", db.n_genera());
            println!(
                "Sequences:     {}",
                db.genus_counts().iter().map(|&c| u64::from(c)).sum::<u64>()
            );
        }
        OutputFormat::Json => {
            let summary = serde_json::json!({
                "k": db.k(),
                "rank_depth": db.rank_depth(),
                "genera": db.n_genera(),
                "sequences": db.genus_counts().iter().map(|&c| u64::from(c)).sum::<u64>(),
            });
            // json! of plain numbers cannot fail to serialize
            if let Ok(text) = serde_json::to_string_pretty(&summary) {
                println!("{text}");
            }
        }
        OutputFormat::Tsv => {
            println!("k\trank_depth\tgenera\tsequences");
            println!(
                "{}\t{}\t{}\t{}",
                db.k(),
                db.rank_depth(),
                db.n_genera(),
                db.genus_counts().iter().map(|&c| u64::from(c)).sum::<u64>()
            );
        }
    }
}
