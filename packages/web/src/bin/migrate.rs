//! Copy everything in the JSON fallback files into the document store.
//!
//! Uses the same settings as the server, so `PORTFOLIO__MONGO__URL` (or
//! `mongo.url` in `config.toml`) must point at a reachable database.

use anyhow::Context;
use api::{db, Settings};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::new().context("Failed to load settings")?;
    let store = db::connect(&settings).await;

    info!(data_dir = %settings.storage.data_dir, "Migrating fallback data...");
    let report = store.migrate().await.context("Migration failed")?;
    info!(
        profile = report.profile,
        links = report.links,
        notes = report.notes,
        learning = report.learning,
        "Migration finished"
    );

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
