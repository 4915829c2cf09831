//! Quote service functions.
//!
//! These glue the pure engine to the settings snapshot and the saved-quote
//! cache. Every quote is priced against exactly one config snapshot, which is
//! stored alongside the result so renderers never see a different config.

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::cache::AppCache;
use crate::error::AppError;
use crate::settings::SettingsStore;

use super::calculators;
use super::errors::{QuoteError, ValidationError};
use super::models::{QuoteInput, QuoteResult, RateConfig};
use super::requests::QuoteRequest;

/// A priced quotation kept for sharing
#[derive(Debug, Clone)]
pub struct SavedQuote {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    pub input: QuoteInput,
    pub config: RateConfig,
    pub result: QuoteResult,
}

/// Engine output together with the exact input and config that produced it
#[derive(Debug, Clone)]
pub struct PricedQuote {
    pub input: QuoteInput,
    pub config: RateConfig,
    pub result: QuoteResult,
}

/// Price a request against a config snapshot.
///
/// A per-request drilling rate replaces the snapshot's base rate for this
/// quote only; manual tier overrides still apply.
pub fn price_request(request: &QuoteRequest, active: &RateConfig) -> Result<PricedQuote, QuoteError> {
    let config = match request.drilling_rate {
        Some(rate) if rate <= rust_decimal::Decimal::ZERO => {
            return Err(ValidationError::InvalidRate(rate).into());
        }
        Some(rate) => active.with_base_rate(rate),
        None => active.clone(),
    };
    let input = request.to_input();
    let result = calculators::compute(&input, &config)?;

    Ok(PricedQuote {
        input,
        config,
        result,
    })
}

/// Price a request against the active settings without saving it
pub async fn quote(settings: &SettingsStore, request: &QuoteRequest) -> Result<PricedQuote, AppError> {
    let active = settings.current().await;
    let priced = price_request(request, &active)?;
    debug!(
        "Priced {:?} quote: {} ft, total {}",
        priced.input.drilling_mode, priced.input.total_depth_feet, priced.result.total_cost
    );
    Ok(priced)
}

/// Price a request and keep it in the quote cache for sharing
pub async fn create_quote(
    settings: &SettingsStore,
    cache: &AppCache,
    request: &QuoteRequest,
    validity_days: u32,
) -> Result<Arc<SavedQuote>, AppError> {
    let priced = quote(settings, request).await?;

    let created_at = Utc::now();
    let saved = Arc::new(SavedQuote {
        id: Uuid::new_v4(),
        created_at,
        valid_until: created_at + Duration::days(i64::from(validity_days)),
        input: priced.input,
        config: priced.config,
        result: priced.result,
    });

    cache.quotes.insert(saved.id, saved.clone()).await;
    info!("Saved quote {} (total {})", saved.id, saved.result.total_cost);

    Ok(saved)
}

/// Look up a saved quote
pub async fn find_quote(cache: &AppCache, id: Uuid) -> Result<Arc<SavedQuote>, AppError> {
    match cache.quotes.get(&id).await {
        Some(saved) => {
            debug!("Cache HIT for quote: {}", id);
            Ok(saved)
        }
        None => {
            debug!("Cache MISS for quote: {}", id);
            Err(AppError::NotFound)
        }
    }
}
