//! # rusty-blog
//!
//! Administrative entry point: bootstraps the JSON database and prints the feed.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use configs::{LogFormat, LogSettings, Settings};
use domains::DocumentStore;
use services::{posts, RequestScope};
use storage_adapters::JsonFileStore;
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter};

#[derive(Parser)]
#[command(name = "rusty-blog", version, about = "JSON-backed blog administration")]
struct Cli {
    /// Database file, overriding the configured path.
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Clear existing data and create new tables.
    InitDb,
    /// Print all posts, most recent first.
    Feed,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut settings = Settings::load().context("loading settings")?;
    if let Some(database) = cli.database {
        settings.database = database;
    }
    init_tracing(&settings.log);
    tracing::debug!(database = %settings.database.display(), "using database");

    let store = JsonFileStore::new(&settings.database);
    match cli.command {
        Command::InitDb => init_db(&store),
        Command::Feed => feed(&store),
    }
}

fn init_tracing(log: &LogSettings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.filter));
    let registry = tracing_subscriber::registry().with(filter);
    match log.format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

fn init_db(store: &JsonFileStore) -> Result<()> {
    store
        .initialize()
        .with_context(|| format!("initializing {}", store.path().display()))?;
    println!("Initialized the database.");
    Ok(())
}

fn feed(store: &JsonFileStore) -> Result<()> {
    let mut scope = RequestScope::new(store);
    let views = match posts::list(&mut scope) {
        Ok(views) => views,
        Err(err) => {
            scope.teardown(Some(&err))?;
            return Err(err).context("listing posts");
        }
    };
    scope.teardown(None)?;

    if views.is_empty() {
        println!("No posts yet.");
    }
    for view in views {
        println!(
            "#{} {} by {}: {}",
            view.post.id,
            view.post.created,
            view.username,
            view.post.title
        );
    }
    Ok(())
}
