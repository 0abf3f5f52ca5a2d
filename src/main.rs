use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use cogito::analysis::{Category, Emotion};
use cogito::cli;
use cogito::config::CogitoConfig;
use cogito::server;
use cogito::thought::search::{SortKey, ThoughtFilter};

#[derive(Parser)]
#[command(
    name = "cogito",
    version,
    about = "Thought journal with a deterministic NLP annotation engine"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the JSON API server
    Serve,
    /// Log a new thought
    Log {
        /// The thought content
        content: String,
        #[arg(short, long, default_value = "reflection")]
        category: Category,
        /// Tag the entry (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,
        /// Explicit emotion label (overrides the classifier)
        #[arg(short, long)]
        emotion: Option<Emotion>,
        /// Explicit importance in [0.0, 1.0] (overrides scoring)
        #[arg(short, long)]
        importance: Option<f64>,
    },
    /// List thoughts with optional filters
    List {
        #[arg(short, long)]
        category: Option<Category>,
        #[arg(short, long)]
        emotion: Option<Emotion>,
        #[arg(short, long)]
        tag: Option<String>,
        #[arg(long)]
        min_importance: Option<f64>,
        #[arg(long)]
        max_importance: Option<f64>,
        #[arg(long, default_value = "created_at")]
        order_by: SortKey,
        /// Oldest/lowest first instead of newest/highest
        #[arg(long)]
        asc: bool,
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long, default_value_t = 20)]
        size: usize,
    },
    /// Show one thought in full, with a fresh analysis and its audit trail
    Inspect {
        /// Thought ID
        id: String,
    },
    /// Free-text search over content
    Search {
        query: String,
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Print store statistics
    Stats,
    /// Export thoughts as JSON or CSV
    Export {
        #[arg(short, long, default_value = "json")]
        format: String,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(short, long)]
        category: Option<Category>,
        #[arg(short, long)]
        emotion: Option<Emotion>,
        #[arg(short, long)]
        tag: Option<String>,
    },
    /// Re-annotate stored thoughts with the current lexicon
    Recompute {
        /// Only the most recent N thoughts
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Interactive chat; both sides of each turn are logged as thoughts
    Chat {
        /// Provider: mock or http (defaults to config)
        #[arg(short, long)]
        provider: Option<String>,
        /// Do not log this session
        #[arg(long)]
        no_log: bool,
        /// Replay prior turns to the provider as context
        #[arg(long)]
        history: bool,
    },
    /// Run database diagnostics
    Doctor,
    /// Delete the database
    Reset {
        /// Actually do it
        #[arg(long)]
        confirm: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = Cli::parse();

    let config = CogitoConfig::load()?;

    // Initialize tracing with the configured log level, on stderr so stdout
    // stays clean for exports and listings.
    let filter = EnvFilter::try_new(&config.server.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli_args.command {
        Command::Serve => {
            server::serve(config).await?;
        }
        Command::Log {
            content,
            category,
            tags,
            emotion,
            importance,
        } => {
            cli::log::log(&config, &content, category, tags, emotion, importance)?;
        }
        Command::List {
            category,
            emotion,
            tag,
            min_importance,
            max_importance,
            order_by,
            asc,
            page,
            size,
        } => {
            let filter = ThoughtFilter {
                category,
                emotion,
                tag,
                min_importance,
                max_importance,
                ..Default::default()
            };
            cli::list::list(&config, filter, order_by, asc, page, size)?;
        }
        Command::Inspect { id } => {
            cli::inspect::inspect(&config, &id)?;
        }
        Command::Search { query, limit } => {
            cli::search::search(&config, &query, limit)?;
        }
        Command::Stats => {
            cli::stats::stats(&config)?;
        }
        Command::Export {
            format,
            output,
            category,
            emotion,
            tag,
        } => {
            let filter = ThoughtFilter {
                category,
                emotion,
                tag,
                ..Default::default()
            };
            cli::export::export(&config, &format, output, filter)?;
        }
        Command::Recompute { limit } => {
            cli::recompute::recompute(&config, limit)?;
        }
        Command::Chat {
            provider,
            no_log,
            history,
        } => {
            cli::chat::chat(&config, provider, no_log, history).await?;
        }
        Command::Doctor => {
            cli::doctor::doctor(&config)?;
        }
        Command::Reset { confirm } => {
            cli::reset::reset(&config, confirm)?;
        }
    }

    Ok(())
}
