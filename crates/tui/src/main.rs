mod app;

use anyhow::{Context, Result};
use std::{
    fs::{self, OpenOptions},
    sync::Mutex,
};

use rideshare_core::{
    config::{self, AppConfig},
    FleetLoader, FleetWatcher,
};
use tokio::sync::mpsc;
use tracing_subscriber::{prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;
    init_logging(&config)?;
    let config_path = config::ensure_default_config()?;
    tracing::info!(config = %config_path.display(), fleet = %config.fleet_path.display(), "starting");

    let loader = FleetLoader::new(&config.fleet_path);
    let mut app = app::RideShareApp::new(loader);

    if config.watch_fleet {
        let (fleet_tx, fleet_rx) = mpsc::channel(8);
        let watcher = FleetWatcher::new(&config.fleet_path);
        tokio::spawn(async move {
            if let Err(err) = watcher.run(fleet_tx).await {
                tracing::error!("Fleet watcher error: {err:#}");
            }
        });
        app.attach_watcher(fleet_rx);
    }

    app.run().await
}

fn init_logging(config: &AppConfig) -> Result<()> {
    fs::create_dir_all(&config.log_dir)
        .with_context(|| format!("failed to create {}", config.log_dir.display()))?;
    let log_path = config.log_dir.join("rideshare.log");
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // The terminal belongs to the dashboard, so logs only go to the file.
    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .compact()
        .with_writer(Mutex::new(log_file));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Ok(())
}
