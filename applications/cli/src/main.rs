/// Soundboard - headless command-line soundboard
use anyhow::Context;
use clap::{Parser, Subcommand};
use soundboard_catalog::SortMode;
use soundboard_cli::{App, CliConfig};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "soundboard")]
#[command(about = "Browse, load and trigger soundboard clips", long_about = None)]
struct Cli {
    /// Configuration file path (default: ./soundboard.toml if present)
    #[arg(short, long, global = true, env = "SOUNDBOARD_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List sounds in display order
    List {
        /// Case-insensitive substring of the sound name
        #[arg(short, long)]
        search: Option<String>,
        /// Category name, or "all"
        #[arg(short, long)]
        category: Option<String>,
        /// insertion, name-asc, name-desc or category
        #[arg(long)]
        sort: Option<SortMode>,
    },
    /// Play the sound best matching NAME
    Play {
        /// Sound name or part of it
        name: String,
    },
    /// Load every sound and print the load status
    Status,
    /// Run local files through upload intake
    Import {
        /// Files to import
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = CliConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut app = App::start(config).await;

    match cli.command {
        Commands::List {
            search,
            category,
            sort,
        } => {
            app.load().await;
            let criteria = app.criteria(search.as_deref(), category.as_deref(), sort)?;
            for line in app.list(criteria)? {
                println!("{}", line);
            }
        }
        Commands::Play { name } => {
            let message = app.play(&name).await?;
            println!("{}", message);
        }
        Commands::Status => {
            let report = app.load().await;
            println!("{}", app.status_line());
            for id in &report.failed {
                if let Some(sound) = app.board().sound(id) {
                    let reason = sound.load_state().failure_reason().unwrap_or_default();
                    println!("  failed: {} ({})", sound.name(), reason);
                }
            }
        }
        Commands::Import { files } => {
            app.load().await;
            let report = app.import(&files).await;
            for (file_name, err) in &report.rejected {
                println!("skipped: {} ({})", file_name, err);
            }
            println!(
                "imported: {} ready, {} failed",
                report.loads.ready.len(),
                report.loads.failed.len()
            );
            println!("{}", app.status_line());
        }
    }

    Ok(())
}
