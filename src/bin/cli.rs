//! ark-resolver CLI
//!
//! Resolves Gallica and IRHT manuscript URLs, one at a time or in batch from
//! a delimited file.

use std::path::PathBuf;

use ark_resolver::{
    error::{AppError, Result},
    models::Config,
    pipeline,
    services,
    utils::create_async_client,
};
use clap::{Parser, Subcommand};

/// ark-resolver - Manuscript metadata resolver
#[derive(Parser, Debug)]
#[command(
    name = "ark-resolver",
    version,
    about = "Resolve Gallica and IRHT manuscript URLs into metadata records"
)]

struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve URLs listed in a column of a delimited file
    Batch {
        /// Delimited input file with a header row
        #[arg(short, long)]
        infile: PathBuf,

        /// Name of the column holding the URLs
        #[arg(short, long)]
        column: String,

        /// Output JSON file
        #[arg(short, long)]
        outfile: PathBuf,

        /// Field delimiter of the input file
        #[arg(short, long, default_value_t = ',')]
        delimiter: char,
    },

    /// Resolve a single URL and print its record
    Resolve {
        /// Gallica or IRHT record URL
        url: String,
    },

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config;

    match cli.command {
        Command::Batch {
            infile,
            column,
            outfile,
            delimiter,
        } => {
            let delimiter = u8::try_from(delimiter)
                .map_err(|_| AppError::config(format!("Delimiter '{delimiter}' is not ASCII")))?;
            let urls = pipeline::read_url_column(&infile, &column, delimiter)?;
            log::info!("Loaded {} URLs from {}", urls.len(), infile.display());

            let config = Config::load_or_default(&config_path);
            let client = create_async_client(&config.http)?;
            let outcome = pipeline::run_batch(&config.batch, &client, &urls).await?;
            pipeline::write_results(&outfile, &outcome.results).await?;

            log::info!(
                "Resolved {} of {} URLs ({} unrecognized, {} failed)",
                outcome.resolved,
                outcome.total,
                outcome.unrecognized,
                outcome.failures
            );
            log::info!("Results saved to {}", outfile.display());
        }

        Command::Resolve { url } => {
            let config = Config::load_or_default(&config_path);
            let client = create_async_client(&config.http)?;
            match services::resolve_url(&client, &url).await? {
                Some(record) => println!("{}", serde_json::to_string_pretty(&record)?),
                None => log::warn!("{} does not belong to a known provider", url),
            }
        }

        Command::Validate => {
            log::info!("Validating {}...", config_path.display());

            if let Err(e) = Config::load_validated(&config_path) {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");
        }
    }

    Ok(())
}
