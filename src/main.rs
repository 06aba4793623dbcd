use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod db;
mod error;
mod models;
mod routes;
mod services;
mod state;
mod utils;

#[cfg(test)]
mod test_support;

use api::coincheck::CoincheckClient;
use config::AppConfig;
use db::SqliteRateStore;
use state::AppState;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("rate_chart=debug".parse().unwrap())
                .add_directive("sqlx=warn".parse().unwrap()),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let cfg = AppConfig::from_env();
    info!("Starting rate chart service...");
    info!("Rate API: {}", cfg.rate_api_base_url);

    // Initialize database
    info!("Initializing rate cache at {}...", cfg.database_url);
    let pool = match db::init_db(&cfg.database_url).await {
        Ok(p) => {
            info!("Rate cache initialized successfully");
            p
        }
        Err(e) => {
            error!("Failed to initialize rate cache: {}", e);
            return;
        }
    };

    let store = Arc::new(SqliteRateStore::new(pool));
    let source = Arc::new(CoincheckClient::with_base_url(cfg.rate_api_base_url.clone()));

    let addr: SocketAddr = match format!("{}:{}", cfg.bind, cfg.port).parse() {
        Ok(addr) => addr,
        Err(e) => {
            error!("Invalid bind address {}:{}: {}", cfg.bind, cfg.port, e);
            return;
        }
    };

    let app = routes::router(AppState::new(cfg, store, source));

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", addr, e);
            return;
        }
    };
    info!("Rate chart service listening on http://{}", addr);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, stopping...");
}
