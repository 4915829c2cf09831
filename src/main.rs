//! Borewell quote service entry point.
//!
//! # Environment Variables
//!
//! - `BIND_ADDR`: listen address (default `0.0.0.0:3000`)
//! - `DATABASE_URL`: Postgres URL for persisted settings (optional)
//! - `PUBLIC_BASE_URL`: base of share links and QR codes
//! - `BUSINESS_NAME`, `BUSINESS_TAGLINE`, `BUSINESS_PHONES`, `BUSINESS_EMAIL`,
//!   `WHATSAPP_NUMBER`: details printed on quotations
//! - `QUOTE_VALIDITY_DAYS`: how long shared quotes stay available (default 30)
//! - `RUST_LOG`: logging filter

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use borewell_quote::config::ServiceConfig;
use borewell_quote::pricing::RateConfig;
use borewell_quote::settings::SettingsStore;
use borewell_quote::{app, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "borewell_quote=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServiceConfig::from_env()?;

    let settings = match &config.database_url {
        Some(url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(url)
                .await
                .context("Failed to connect to database")?;
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run migrations")?;
            info!("Connected to database");
            SettingsStore::with_database(pool)
                .await
                .context("Failed to load settings")?
        }
        None => {
            warn!("DATABASE_URL not set, settings will not survive a restart");
            SettingsStore::in_memory(RateConfig::default())
        }
    };

    let bind_addr = config.bind_addr;
    let state = AppState::new(config, settings);
    let router = app(state);

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;
    info!("Listening on {}", bind_addr);

    axum::serve(listener, router).await?;

    Ok(())
}
