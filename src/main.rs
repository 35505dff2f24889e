//! Passing Defense Dashboard - EPA heatmap server
//!
//! Loads `plays.csv` and `defense.csv` once at startup and serves the dashboard on port 8050.

use anyhow::{Context, Result};
use passing_defense_dashboard::data::DataLoader;
use passing_defense_dashboard::{server, Dashboard, DashboardConfig};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn run() -> Result<()> {
    let config = DashboardConfig::locate();
    info!(data_dir = %config.data_dir.display(), "loading datasets");

    // Either file missing or unreadable is fatal.
    let loader = DataLoader::new();
    let plays = loader
        .load_plays(&config.plays_path())
        .context("loading plays dataset")?;
    let defense = loader
        .load_defense(&config.defense_path())
        .context("loading defense dataset")?;

    let (dashboard, summary) = Dashboard::from_sources(config.title.clone(), &plays, &defense);
    info!(
        plays = summary.plays_read,
        defense = summary.defense_read,
        penalty_dropped = summary.penalty_dropped,
        joined = summary.joined,
        null_dropped = summary.null_dropped,
        kept = summary.kept,
        zones = dashboard.zone_options().len(),
        alignments = dashboard.alignment_options().len(),
        "enriched dataset ready"
    );

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "serving dashboard");

    server::serve(listener, Arc::new(dashboard))
        .await
        .context("serving dashboard")?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    if let Err(err) = run().await {
        let message = format!("{err:#}");
        error!(error = %message, "dashboard stopped");
        return Err(err);
    }
    Ok(())
}
