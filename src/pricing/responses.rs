//! Response DTOs for pricing API endpoints.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::render::currency::format_inr;

use super::calculators::round_money;
use super::models::{DrillingLineItem, LineItemKind, QuoteResult, SlabTier};

/// Money value for JSON responses
#[derive(Debug, Clone, Serialize)]
pub struct MoneyResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    /// Display form, e.g. `Rs.1,22,250`
    pub formatted: String,
}

impl From<Decimal> for MoneyResponse {
    fn from(amount: Decimal) -> Self {
        Self {
            amount,
            formatted: format_inr(amount),
        }
    }
}

/// One drilling breakdown row
#[derive(Debug, Serialize)]
pub struct LineItemResponse {
    pub kind: LineItemKind,
    pub range_label: String,
    pub start_foot: u32,
    pub end_foot: u32,
    #[serde(with = "rust_decimal::serde::str")]
    pub rate_per_foot: Decimal,
    pub footage: u32,
    pub cost: MoneyResponse,
}

impl From<&DrillingLineItem> for LineItemResponse {
    fn from(item: &DrillingLineItem) -> Self {
        Self {
            kind: item.kind,
            range_label: item.range_label.clone(),
            start_foot: item.start_foot,
            end_foot: item.end_foot,
            rate_per_foot: item.rate_per_foot,
            footage: item.footage,
            cost: item.cost.into(),
        }
    }
}

/// Response for a quote calculation
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub drilling_line_items: Vec<LineItemResponse>,
    pub drilling_cost: MoneyResponse,
    pub pvc7_cost: MoneyResponse,
    pub pvc10_cost: MoneyResponse,
    pub fixed_fee_cost: MoneyResponse,
    pub subtotal: MoneyResponse,
    pub tax_amount: MoneyResponse,
    pub total_cost: MoneyResponse,
    #[serde(with = "rust_decimal::serde::str")]
    pub effective_rate_per_foot: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub tax_percentage_applied: Decimal,
}

impl From<&QuoteResult> for QuoteResponse {
    fn from(result: &QuoteResult) -> Self {
        Self {
            drilling_line_items: result
                .drilling_line_items
                .iter()
                .map(LineItemResponse::from)
                .collect(),
            drilling_cost: result.drilling_cost.into(),
            pvc7_cost: result.pvc7_cost.into(),
            pvc10_cost: result.pvc10_cost.into(),
            fixed_fee_cost: result.fixed_fee_cost.into(),
            subtotal: result.subtotal.into(),
            tax_amount: result.tax_amount.into(),
            total_cost: result.total_cost.into(),
            effective_rate_per_foot: round_money(result.effective_rate_per_foot, 2),
            tax_percentage_applied: result.tax_percentage_applied,
        }
    }
}

/// One tier of the slab table
#[derive(Debug, Serialize)]
pub struct SlabTierResponse {
    pub index: usize,
    pub range_label: String,
    pub start_foot: u32,
    pub end_foot: u32,
    #[serde(with = "rust_decimal::serde::str")]
    pub rate_per_foot: Decimal,
    pub overridden: bool,
}

impl From<&SlabTier> for SlabTierResponse {
    fn from(tier: &SlabTier) -> Self {
        Self {
            index: tier.index,
            range_label: super::slab::range_label(tier.start_foot, tier.end_foot),
            start_foot: tier.start_foot,
            end_foot: tier.end_foot,
            rate_per_foot: tier.rate_per_foot,
            overridden: tier.overridden,
        }
    }
}

/// Response for the slab table endpoint
#[derive(Debug, Serialize)]
pub struct SlabTableResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub base_rate: Decimal,
    pub depth_ceiling_feet: u32,
    pub tiers: Vec<SlabTierResponse>,
}

/// Generic pricing error response
#[derive(Debug, Serialize)]
pub struct PricingErrorResponse {
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
