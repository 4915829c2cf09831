//! Settings API routes

use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::pricing::models::RateConfig;
use crate::pricing::responses::SlabTierResponse;
use crate::pricing::slab;
use crate::AppState;

use super::store::SettingsPatch;

/// Request to pin one tier to a manual rate
#[derive(Debug, Deserialize)]
pub struct TierOverrideRequest {
    pub rate: Decimal,
}

/// Active configuration together with the tiers it resolves to
#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    pub config: RateConfig,
    pub depth_ceiling_feet: u32,
    pub tiers: Vec<SlabTierResponse>,
}

impl SettingsResponse {
    fn from_config(config: &RateConfig) -> Result<Self> {
        let tiers = slab::build_from_config(config)?;
        Ok(Self {
            config: config.clone(),
            depth_ceiling_feet: slab::depth_ceiling(&tiers),
            tiers: tiers.iter().map(SlabTierResponse::from).collect(),
        })
    }
}

/// Settings routes, mounted under `/api/settings`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_settings).put(update_settings))
        .route("/reset", post(reset_settings))
        .route("/overrides", delete(clear_overrides))
        .route(
            "/overrides/:index",
            put(set_override).delete(clear_override),
        )
}

async fn get_settings(State(state): State<AppState>) -> Result<Json<SettingsResponse>> {
    let config = state.settings.current().await;
    Ok(Json(SettingsResponse::from_config(&config)?))
}

async fn update_settings(
    State(state): State<AppState>,
    Json(patch): Json<SettingsPatch>,
) -> Result<Json<SettingsResponse>> {
    let config = state.settings.update(&patch).await?;
    Ok(Json(SettingsResponse::from_config(&config)?))
}

async fn reset_settings(State(state): State<AppState>) -> Result<Json<SettingsResponse>> {
    let config = state.settings.reset().await?;
    Ok(Json(SettingsResponse::from_config(&config)?))
}

async fn set_override(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    Json(request): Json<TierOverrideRequest>,
) -> Result<Json<SettingsResponse>> {
    let config = state.settings.set_override(index, request.rate).await?;
    Ok(Json(SettingsResponse::from_config(&config)?))
}

async fn clear_override(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<SettingsResponse>> {
    let config = state.settings.clear_override(index).await?;
    Ok(Json(SettingsResponse::from_config(&config)?))
}

async fn clear_overrides(State(state): State<AppState>) -> Result<Json<SettingsResponse>> {
    let config = state.settings.clear_overrides().await?;
    Ok(Json(SettingsResponse::from_config(&config)?))
}
