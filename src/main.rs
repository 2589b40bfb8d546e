mod admin;
mod api_doc;
mod app;
mod config;
mod error;
mod flash;
mod handlers;
mod models;
mod normalize;
mod render;
mod resolver;
mod routes;
mod state;
mod store;
mod word_bank;

use anyhow::Context;
use config::Config;
use state::AppState;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("redirect-routes starting");

    let config = Config::from_env()?;
    config.log_startup();

    let address = config.bind_address();
    let state = AppState::from_config(config);

    let existing = state.store.load().await;
    tracing::info!(
        "Route store {} holds {} routes",
        state.store.path().display(),
        existing.len()
    );

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    tracing::info!("Listening on {}", address);

    axum::serve(listener, app::build_app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("redirect-routes stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
