use clap::Parser;
use tracing_subscriber::EnvFilter;

use taxotype::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("taxotype=debug,info")
    } else {
        EnvFilter::new("taxotype=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Train(args) => {
            cli::train::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Classify(args) => {
            cli::classify::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Db(args) => {
            cli::database::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
