//! # forecast-api
//!
//! REST API server for the seasonal sales forecasting engine. The engine is
//! synchronous and request-scoped; this binary is the thin delivery layer
//! that fetches one store snapshot per request and serializes the forecast
//! products as JSON.

use axum::{routing::get, Json, Router};
use sales_data::{FileStore, StoreConfig};
use seasonal_forecast::Forecaster;
use std::env;
use std::net::SocketAddr;
use std::process;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod routes;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    forecaster: Arc<Forecaster>,
}

impl AppState {
    pub fn new(forecaster: Forecaster) -> Self {
        Self {
            forecaster: Arc::new(forecaster),
        }
    }
}

/// Liveness probe - is the server running?
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/forecast", get(routes::forecast))
        .route("/forecast/categories", get(routes::category_trends))
        .route("/forecast/units", get(routes::unit_forecast))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "forecast_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Store configuration is startup-fatal: refuse to serve without it.
    let config = match StoreConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("startup failed: {e}");
            process::exit(1);
        }
    };

    let store = Arc::new(FileStore::from_config(&config));
    let state = AppState::new(Forecaster::new(store));
    let app = router(state);

    let addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());
    let addr: SocketAddr = match addr.parse() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!("invalid BIND_ADDR '{addr}': {e}");
            process::exit(1);
        }
    };

    tracing::info!(%addr, snapshot = %config.snapshot_path.display(), "forecast-api listening");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("cannot bind {addr}: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("server error: {e}");
        process::exit(1);
    }
}
