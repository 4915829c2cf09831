//! Database queries for persisted calculator settings.
//!
//! Settings are a single JSONB blob keyed by name; writes are plain upserts,
//! so the last writer wins.

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};

use crate::error::AppError;
use crate::pricing::models::RateConfig;

/// Row key of the active rate configuration
pub const RATE_CONFIG_KEY: &str = "rate_config";

/// Row from calculator_settings
#[derive(Debug, Clone, FromRow)]
pub struct SettingsRow {
    pub key: String,
    pub value: Json<RateConfig>,
    pub updated_at: DateTime<Utc>,
}

/// Load the persisted rate configuration, if any
pub async fn load_rate_config(pool: &PgPool) -> Result<Option<SettingsRow>, AppError> {
    let row = sqlx::query_as::<_, SettingsRow>(
        r#"
        SELECT key, value, updated_at
        FROM calculator_settings
        WHERE key = $1
        "#,
    )
    .bind(RATE_CONFIG_KEY)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Insert or replace the persisted rate configuration
pub async fn save_rate_config(pool: &PgPool, config: &RateConfig) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO calculator_settings (key, value, updated_at)
        VALUES ($1, $2, now())
        ON CONFLICT (key)
        DO UPDATE SET value = EXCLUDED.value, updated_at = EXCLUDED.updated_at
        "#,
    )
    .bind(RATE_CONFIG_KEY)
    .bind(Json(config))
    .execute(pool)
    .await?;

    Ok(())
}

/// Remove the persisted configuration so defaults apply on next start
pub async fn delete_rate_config(pool: &PgPool) -> Result<(), AppError> {
    sqlx::query("DELETE FROM calculator_settings WHERE key = $1")
        .bind(RATE_CONFIG_KEY)
        .execute(pool)
        .await?;

    Ok(())
}
