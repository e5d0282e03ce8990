mod auth;
mod catalog;
mod config;
mod ledger;
mod requests;

use axum::{
    routing::{get, post},
    Json, Router,
};
use clap::Parser;
use serde_json::json;
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::{
    auth::{AdminGate, SharedSecretGate},
    catalog::ItemCatalog,
    config::ServerConfig,
    ledger::store::{Ledger, SharedLedger},
};

/// Off-chain credit ledger backend
#[derive(Debug, Parser)]
#[command(name = "backend")]
struct Args {
    /// Listen port (overrides the PORT environment variable)
    #[arg(long)]
    port: Option<u16>,
}

/// Shared state handed to every handler
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) ledger: SharedLedger,
    pub(crate) catalog: Arc<ItemCatalog>,
    pub(crate) admin_gate: Arc<dyn AdminGate>,
}

fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/items", get(ledger::list_items))
        .route("/api/wallets/:wallet/balance", get(ledger::get_balance))
        .route("/api/wallets/:wallet/inventory", get(ledger::get_inventory))
        .route("/api/wallets/:wallet/credit", post(ledger::credit))
        .route("/api/wallets/:wallet/debit", post(ledger::debit))
        .route("/api/wallets/:wallet/purchase", post(ledger::purchase))
        .route(
            "/api/withdrawals",
            get(requests::withdraw::list).post(requests::withdraw::create),
        )
        .route(
            "/api/withdrawals/:id/approve",
            post(requests::withdraw::approve),
        )
        .route(
            "/api/withdrawals/:id/sent",
            post(requests::withdraw::mark_sent),
        )
        .route(
            "/api/bridge",
            get(requests::bridge::list).post(requests::bridge::create),
        )
        .route("/api/bridge/:id/approve", post(requests::bridge::approve))
        .route("/api/bridge/:id/complete", post(requests::bridge::complete))
        .layer(cors)
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = ServerConfig::new();

    let catalog = match config.catalog_path() {
        Some(path) => ItemCatalog::from_file(path)?,
        None => ItemCatalog::builtin(),
    };

    let state = AppState {
        ledger: Arc::new(Ledger::new()),
        catalog: Arc::new(catalog),
        admin_gate: Arc::new(SharedSecretGate::new(config.admin_token())),
    };

    let app = app(state);

    let port = args.port.unwrap_or(config.port());
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "Server running at http://");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
