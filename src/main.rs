use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tokio::sync::mpsc;

use curator::api::ApiClient;
use curator::app::{App, AppEvent};
use curator::config::Config;
use curator::ui;

/// Get the config directory path (~/.config/curator/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    let config_dir = PathBuf::from(home).join(".config").join("curator");
    Ok(config_dir)
}

#[derive(Parser, Debug)]
#[command(name = "curator", about = "Terminal admin client for catalog categories")]
struct Args {
    /// Backend base URL (overrides the config file)
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Rows per page (overrides the config file)
    #[arg(long, value_name = "N")]
    page_size: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Set up config directory
    let config_dir = get_config_dir()?;
    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir).context("Failed to create config directory")?;
        println!("Created config directory: {}", config_dir.display());
    }

    // Tracing goes to a file: writing to stdout would corrupt the alternate
    // screen while the TUI is active.
    let log_path = config_dir.join("curator.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file '{}'", log_path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .init();

    // Load config, then apply CLI overrides
    let config_path = config_dir.join("config.toml");
    let mut config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from '{}'", config_path.display()))?;
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    if let Some(page_size) = args.page_size {
        config.page_size = page_size;
    }
    if config.page_size == 0 {
        anyhow::bail!("page_size must be at least 1");
    }

    tracing::info!(base_url = %config.base_url, page_size = config.page_size, "Starting curator");

    let api = ApiClient::new(&config).context("Failed to create API client")?;
    let mut app = App::new(api, &config);

    // Create event channel for background tasks
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(32);

    // Run the TUI
    ui::run(&mut app, event_tx, event_rx).await?;

    println!("Goodbye!");
    Ok(())
}
