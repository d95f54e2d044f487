use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use notion_listening_sync::{AddonConfig, FieldNote, NoteAddedBinding, NoteAddedHooks};

/// Host bridge: reads note-added events as JSON lines on stdin
#[derive(Parser)]
#[command(name = "notion-listening-sync")]
#[command(author, version, about = "Log listening difficulty of new notes to Notion", long_about = None)]
struct Cli {
    /// Add-on config file (config.json)
    #[arg(short, long)]
    config: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let config = AddonConfig::from_file(&cli.config)
        .context("Failed to load add-on config")?
        .with_env_overrides(|key| std::env::var(key).ok());
    debug!("Loaded config: {:?}", config);

    if config.target_note_type.is_empty() {
        warn!("TARGET_NOTE_TYPE is not set; no notes will be published");
    }

    let mut hooks = NoteAddedHooks::new();
    Arc::new(NoteAddedBinding::from_addon(&config)).register(&mut hooks);

    info!("Waiting for note-added events on stdin");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut events = 0usize;

    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<FieldNote>(&line) {
            Ok(note) => {
                events += 1;
                hooks.fire(&note).await;
            }
            Err(e) => warn!("Skipping malformed note event: {}", e),
        }
    }

    info!("Input closed after {} note events", events);
    Ok(())
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}
