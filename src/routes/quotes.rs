//! Share routes for saved quotes: HTML summary, message text, WhatsApp
//! redirect and QR image.

use askama::Template;
use axum::{
    extract::{Path, State},
    http::header,
    response::{Html, IntoResponse, Redirect},
};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::pricing::models::DrillingMode;
use crate::pricing::services::{self, SavedQuote};
use crate::render::currency::{format_inr, format_rate};
use crate::render::{self, message, pdf, qr, ItemRow};
use crate::AppState;

/// Quote summary template
#[derive(Template)]
#[template(path = "quote.html")]
struct QuotePageTemplate {
    business_name: String,
    tagline: String,
    quote_ref: String,
    issued_on: String,
    valid_until: String,
    drilling_type: String,
    total_depth_feet: u32,
    show_old_bore: bool,
    old_bore_depth_feet: u32,
    base_rate: String,
    rows: Vec<ItemRow>,
    subtotal: String,
    gst_enabled: bool,
    tax_percentage: String,
    tax_amount: String,
    total_cost: String,
    effective_rate: String,
    qr_data_uri: String,
    share_url: String,
    whatsapp_path: String,
    message_path: String,
    pdf_path: String,
}

/// QR code PNG for a saved quote, rendered once and cached
async fn qr_png(state: &AppState, saved: &SavedQuote) -> Result<Arc<Vec<u8>>> {
    if let Some(cached) = state.cache.qr_codes.get(&saved.id).await {
        tracing::debug!("Cache HIT for QR code: {}", saved.id);
        return Ok(cached);
    }

    tracing::debug!("Cache MISS for QR code: {}", saved.id);
    let share_url = state.config.share_url(&saved.id);
    let png = tokio::task::spawn_blocking(move || qr::render_png(&share_url))
        .await
        .map_err(|e| AppError::Internal(format!("QR render task failed: {}", e)))??;

    let png = Arc::new(png);
    state.cache.qr_codes.insert(saved.id, png.clone()).await;
    Ok(png)
}

/// HTML summary of a saved quote
pub async fn quote_page(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>> {
    let saved = services::find_quote(&state.cache, id).await?;
    let png = qr_png(&state, &saved).await?;
    let business = &state.config.business;

    let template = QuotePageTemplate {
        business_name: business.name.clone(),
        tagline: business.tagline.clone(),
        quote_ref: message::short_id(&saved),
        issued_on: saved.created_at.format("%d/%m/%Y").to_string(),
        valid_until: saved.valid_until.format("%d/%m/%Y").to_string(),
        drilling_type: saved.input.drilling_mode.label().to_string(),
        total_depth_feet: saved.input.total_depth_feet,
        show_old_bore: saved.input.drilling_mode == DrillingMode::Repair,
        old_bore_depth_feet: saved.input.old_bore_depth_feet,
        base_rate: format_rate(saved.config.base_drilling_rate_per_foot),
        rows: render::item_rows(&saved),
        subtotal: format_inr(saved.result.subtotal),
        gst_enabled: saved.input.gst_enabled,
        tax_percentage: format_rate(saved.result.tax_percentage_applied),
        tax_amount: format_inr(saved.result.tax_amount),
        total_cost: format_inr(saved.result.total_cost),
        effective_rate: format_inr(saved.result.effective_rate_per_foot),
        qr_data_uri: qr::png_data_uri(&png),
        share_url: state.config.share_url(&saved.id),
        whatsapp_path: format!("/quotes/{}/whatsapp", saved.id),
        message_path: format!("/quotes/{}/message", saved.id),
        pdf_path: format!("/quotes/{}/quote.pdf", saved.id),
    };

    Ok(Html(template.render()?))
}

/// Pre-formatted message text
pub async fn quote_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let saved = services::find_quote(&state.cache, id).await?;
    let text = message::render_message(
        &saved,
        &state.config.business,
        &state.config.share_url(&saved.id),
    )?;

    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], text))
}

/// Redirect to WhatsApp with the message prefilled
pub async fn quote_whatsapp(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Redirect> {
    let saved = services::find_quote(&state.cache, id).await?;
    let text = message::render_message(
        &saved,
        &state.config.business,
        &state.config.share_url(&saved.id),
    )?;
    let url = message::whatsapp_url(&state.config.business.whatsapp_number, &text)?;

    tracing::info!("WhatsApp share for quote {}", saved.id);
    Ok(Redirect::to(url.as_str()))
}

/// QR code PNG linking to the quote page
pub async fn quote_qr(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let saved = services::find_quote(&state.cache, id).await?;
    let png = qr_png(&state, &saved).await?;

    Ok(([(header::CONTENT_TYPE, "image/png")], png.as_ref().clone()))
}

/// Printable A4 quotation
pub async fn quote_pdf(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let saved = services::find_quote(&state.cache, id).await?;
    let config = state.config.clone();
    let share_url = config.share_url(&saved.id);
    let document = tokio::task::spawn_blocking(move || {
        pdf::render_pdf(&saved, &config.business, &share_url)
    })
    .await
    .map_err(|e| AppError::Internal(format!("PDF render task failed: {}", e)))??;

    tracing::info!("PDF quotation for {}", id);
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"quotation-{}.pdf\"", id.simple()),
            ),
        ],
        document,
    ))
}
