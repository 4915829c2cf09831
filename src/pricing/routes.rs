//! Pricing API routes

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::AppState;

use super::requests::{QuoteRequest, SlabTableQuery};
use super::responses::{QuoteResponse, SlabTableResponse, SlabTierResponse};
use super::services::{self, SavedQuote};
use super::slab;

/// Response for a saved quote
#[derive(Debug, Serialize)]
pub struct SavedQuoteResponse {
    pub id: Uuid,
    pub share_url: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub valid_until: chrono::DateTime<chrono::Utc>,
    pub input: super::models::QuoteInput,
    pub quote: QuoteResponse,
}

impl SavedQuoteResponse {
    fn new(saved: &SavedQuote, share_url: String) -> Self {
        Self {
            id: saved.id,
            share_url,
            created_at: saved.created_at,
            valid_until: saved.valid_until,
            input: saved.input.clone(),
            quote: QuoteResponse::from(&saved.result),
        }
    }
}

/// Pricing routes, mounted under `/api`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pricing/quote", post(calculate_quote))
        .route("/pricing/slabs", get(slab_table))
        .route("/quotes", post(create_quote))
        .route("/quotes/:id", get(get_quote).delete(delete_quote))
}

/// Price a request without saving it
async fn calculate_quote(
    State(state): State<AppState>,
    Json(request): Json<QuoteRequest>,
) -> Result<Json<QuoteResponse>> {
    let priced = services::quote(&state.settings, &request).await?;
    Ok(Json(QuoteResponse::from(&priced.result)))
}

/// Tier table for the active config, optionally at another base rate
async fn slab_table(
    State(state): State<AppState>,
    Query(query): Query<SlabTableQuery>,
) -> Result<Json<SlabTableResponse>> {
    let active = state.settings.current().await;
    let config = match query.base_rate {
        Some(rate) => active.with_base_rate(rate),
        None => (*active).clone(),
    };
    let tiers = slab::build_from_config(&config)?;

    Ok(Json(SlabTableResponse {
        base_rate: config.base_drilling_rate_per_foot,
        depth_ceiling_feet: slab::depth_ceiling(&tiers),
        tiers: tiers.iter().map(SlabTierResponse::from).collect(),
    }))
}

/// Price a request and save it for sharing
async fn create_quote(
    State(state): State<AppState>,
    Json(request): Json<QuoteRequest>,
) -> Result<(StatusCode, Json<SavedQuoteResponse>)> {
    let saved = services::create_quote(
        &state.settings,
        &state.cache,
        &request,
        state.config.quote_validity_days,
    )
    .await?;
    let share_url = state.config.share_url(&saved.id);

    Ok((
        StatusCode::CREATED,
        Json(SavedQuoteResponse::new(&saved, share_url)),
    ))
}

async fn get_quote(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SavedQuoteResponse>> {
    let saved = services::find_quote(&state.cache, id).await?;
    let share_url = state.config.share_url(&saved.id);
    Ok(Json(SavedQuoteResponse::new(&saved, share_url)))
}

async fn delete_quote(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    if state.cache.quotes.get(&id).await.is_none() {
        return Err(AppError::NotFound);
    }
    state.cache.invalidate_quote(&id).await;
    Ok(StatusCode::NO_CONTENT)
}
