// Kaiwa Backend Entry Point
// Rule-driven chat: understanding pipeline + response cascade over SQLite.

mod api;
mod brain;
mod config;
mod error;
mod models;
mod runtime;
mod store;
#[cfg(test)]
mod tests;

use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use api::ApiState;
use brain::ResponseEngine;
use config::AppConfig;
use runtime::{SystemClock, ThreadRandom};
use store::SqliteStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().context("failed to load configuration")?;

    let pool = store::init_db(&config.database_url)
        .await
        .context("failed to initialize database")?;
    let store = Arc::new(SqliteStore::new(pool));
    store
        .seed_default_intents()
        .await
        .context("failed to seed intents")?;

    let engine = Arc::new(ResponseEngine::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        Arc::new(SystemClock),
        Box::new(ThreadRandom),
    ));

    info!("Kaiwa engine initialized");

    api::start_server(
        ApiState {
            engine,
            store,
        },
        config.port,
    )
    .await
    .context("server error")?;

    Ok(())
}
