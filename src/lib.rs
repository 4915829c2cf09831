//! Borewell quotation service.
//!
//! Prices borewell drilling jobs from a depth-tiered rate table and serves the
//! resulting quotes as JSON, an HTML summary, message text and a QR image.

pub mod cache;
pub mod config;
pub mod error;
pub mod pricing;
pub mod render;
pub mod routes;
pub mod settings;

use axum::{extract::State, routing::get, Json, Router};
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use cache::{AppCache, CacheStats};
use config::ServiceConfig;
use settings::SettingsStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServiceConfig>,
    pub settings: SettingsStore,
    pub cache: AppCache,
}

impl AppState {
    pub fn new(config: ServiceConfig, settings: SettingsStore) -> Self {
        let cache = AppCache::new(config.quote_validity_days);
        Self {
            config: Arc::new(config),
            settings,
            cache,
        }
    }
}

/// Build the full application router
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/cache/stats", get(cache_stats))
        .nest("/api", pricing::router())
        .nest("/api/settings", settings::router())
        .route("/quotes/:id", get(routes::quotes::quote_page))
        .route("/quotes/:id/message", get(routes::quotes::quote_message))
        .route("/quotes/:id/whatsapp", get(routes::quotes::quote_whatsapp))
        .route("/quotes/:id/qr.png", get(routes::quotes::quote_qr))
        .route("/quotes/:id/quote.pdf", get(routes::quotes::quote_pdf))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn cache_stats(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.cache.stats())
}
