//! Graph RAG CLI - main entry point
//!
//! Unified CLI for building context, answering questions, and running
//! batch trials over the knowledge graph.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use medgraph::{commands, Config};

#[derive(Parser)]
#[command(name = "medgraph")]
#[command(about = "Graph RAG context builder & QA over a Neo4j knowledge graph", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer a question with retrieved context
    Ask {
        /// The question to answer
        query: String,

        /// Retrieval strategy: vector | graph | hybrid | none
        #[arg(long, default_value = "hybrid")]
        mode: String,

        /// Completion model (defaults to the configured one)
        #[arg(long)]
        model: Option<String>,

        /// Print the retrieved context before the answer
        #[arg(long, default_value_t = false)]
        show_context: bool,
    },

    /// (Re)create the entity vector index
    Index,

    /// Raw top-k vector search against the entity index
    Search {
        /// The text to match
        query: String,

        /// Number of matches to return (defaults to configured top_k)
        #[arg(short, long)]
        k: Option<usize>,
    },

    /// Show knowledge graph statistics
    Stats,

    /// Run batch trials over a questions file and export CSV
    Trial {
        /// File with one question per line
        questions: PathBuf,

        /// Answers generated per question, model, and strategy
        #[arg(long, default_value_t = 1)]
        trials: usize,

        /// Comma-separated list of completion models
        #[arg(long)]
        models: Option<String>,

        /// Output CSV path
        #[arg(short, long, default_value = "trial_results.csv")]
        output: PathBuf,
    },

    /// Convert a trial CSV into a markdown report
    Report {
        /// Trial CSV produced by the trial subcommand
        csv: PathBuf,

        /// Output markdown path
        #[arg(short, long, default_value = "trial_results.md")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("medgraph=info".parse()?))
        .init();

    let cli = Cli::parse();
    let config = Config::new();

    match cli.command {
        Commands::Ask {
            query,
            mode,
            model,
            show_context,
        } => {
            commands::ask_run(&config, &query, &mode, model, show_context).await?;
        }

        Commands::Index => {
            commands::index_run(&config).await?;
        }

        Commands::Search { query, k } => {
            commands::search_run(&config, &query, k).await?;
        }

        Commands::Stats => {
            commands::stats_run(&config).await?;
        }

        Commands::Trial {
            questions,
            trials,
            models,
            output,
        } => {
            let questions = commands::load_questions(&questions)?;
            let models: Vec<String> = match models {
                Some(list) => list
                    .split(',')
                    .map(str::trim)
                    .filter(|m| !m.is_empty())
                    .map(str::to_string)
                    .collect(),
                None => commands::TRIAL_MODELS.iter().map(|m| m.to_string()).collect(),
            };

            let report = commands::run_trial(&config, &questions, &models, trials).await?;
            commands::write_csv(&report, &output)?;
            println!("Trial results written to {}", output.display());
        }

        Commands::Report { csv, output } => {
            commands::create_md(&csv, &output)?;
            println!("Markdown report written to {}", output.display());
        }
    }

    Ok(())
}
