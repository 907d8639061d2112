//! Knowledge Extractor CLI - main entry point
//!
//! Runs the extraction pipeline over plain-text documents.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use knowledge_extractor::commands::{self, BatchArgs, ProcessArgs};
use knowledge_extractor::{metrics, Config};

#[derive(Parser)]
#[command(name = "knowledge_extractor")]
#[command(about = "Extract entities, relations, keywords and summaries from documents", long_about = None)]
#[command(version)]
struct Cli {
    /// Print Prometheus metrics after the command finishes
    #[arg(long, global = true, default_value_t = false)]
    metrics: bool,

    /// Path to config.yml (defaults to ./config.yml or ../config.yml)
    #[arg(long, env = "KX_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract knowledge from one plain-text file and print it as JSON
    Process {
        /// Input file (.txt or .md)
        path: PathBuf,

        /// Annotation JSON produced by an external tagger
        #[arg(short, long)]
        annotations: Option<PathBuf>,

        /// Source id to record (defaults to the file name)
        #[arg(short, long)]
        source: Option<String>,

        /// Maximum summary sentences
        #[arg(short, long)]
        max_sentences: Option<usize>,
    },

    /// Print the extractive summary of a file
    Summarize {
        /// Input file (.txt or .md)
        path: PathBuf,

        /// Maximum summary sentences
        #[arg(short, long)]
        max_sentences: Option<usize>,
    },

    /// Process every plain-text file in a directory and print statistics
    Batch {
        /// Directory to scan
        dir: PathBuf,

        /// Directory holding `<file stem>.json` annotations
        #[arg(short, long)]
        annotations_dir: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    // Load .env for local development
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("knowledge_extractor=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match cli.config.as_deref() {
        Some(path) => Config::load_from_file(path)?,
        None => Config::new(),
    };

    execute_command(&config, cli.command)?;

    if cli.metrics {
        print!("{}", metrics::render());
    }

    Ok(())
}

fn execute_command(config: &Config, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Process {
            path,
            annotations,
            source,
            max_sentences,
        } => {
            let args = ProcessArgs {
                path,
                annotations,
                source,
                max_sentences,
            };
            commands::process_run(config, &args)?;
        }
        Commands::Summarize {
            path,
            max_sentences,
        } => {
            commands::summarize_run(
                &path,
                max_sentences.unwrap_or(config.max_summary_sentences),
            )?;
        }
        Commands::Batch {
            dir,
            annotations_dir,
        } => {
            let args = BatchArgs {
                dir,
                annotations_dir,
            };
            commands::batch_run(config, &args)?;
        }
    }

    Ok(())
}
