mod cli;
mod config;
mod corpus;
mod embedding;
mod error;
mod index;
mod query;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "arcana", version, about = "Tarot corpus pipeline and semantic search")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the validated card corpus from raw facts
    Build {
        /// Generate placeholder facts instead of reading the raw file
        #[arg(long)]
        seed: bool,
        /// Raw facts file (defaults to the configured path)
        #[arg(long)]
        raw: Option<String>,
        /// Output corpus file (defaults to the configured path)
        #[arg(long)]
        out: Option<String>,
    },
    /// Embed the corpus and load it into the vector store
    Load {
        /// Corpus file (defaults to the configured path)
        #[arg(long)]
        corpus: Option<String>,
    },
    /// Search the collection for cards matching a text
    Query {
        text: String,
        /// Maximum number of results
        #[arg(short, long)]
        limit: Option<usize>,
        /// Restrict to one arcana (Major or Minor)
        #[arg(long)]
        arcana: Option<String>,
        /// Restrict to one orientation (upright or reversed)
        #[arg(long)]
        orientation: Option<String>,
    },
    /// Check collection health, point count, and a sample retrieval
    Verify,
    /// Draw random cards from the corpus file (no vector search)
    Draw {
        /// Number of cards to draw
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config (for log level)
    let config = config::ArcanaConfig::load()?;

    let filter =
        EnvFilter::try_new(&config.server.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Build { seed, raw, out } => {
            cli::build::run(&config, seed, raw.as_deref(), out.as_deref())?;
        }
        Command::Load { corpus } => {
            cli::load::run(&config, corpus.as_deref()).await?;
        }
        Command::Query {
            text,
            limit,
            arcana,
            orientation,
        } => {
            cli::query::run(
                &config,
                &text,
                limit,
                arcana.as_deref(),
                orientation.as_deref(),
            )
            .await?;
        }
        Command::Verify => {
            cli::verify::run(&config).await?;
        }
        Command::Draw { count } => {
            cli::draw::run(&config, count)?;
        }
    }

    Ok(())
}
