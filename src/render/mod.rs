//! Renderers for saved quotes.
//!
//! Each renderer takes the engine's result as-is; amounts are only rounded
//! for display, never recomputed.

pub mod currency;
pub mod message;
pub mod pdf;
pub mod qr;

use rust_decimal::Decimal;

use crate::pricing::models::LineItemKind;
use crate::pricing::services::SavedQuote;

pub use currency::format_inr;
use currency::format_rate;

/// One row of an itemized quotation table
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRow {
    pub title: String,
    pub quantity: String,
    pub rate: String,
    pub amount: String,
}

/// Itemized rows of a saved quote: drilling lines, pipes in use, then the
/// fixed fee.
pub fn item_rows(saved: &SavedQuote) -> Vec<ItemRow> {
    let mut rows: Vec<ItemRow> = saved
        .result
        .drilling_line_items
        .iter()
        .map(|item| ItemRow {
            title: match item.kind {
                LineItemKind::OldBore => "Old bore".to_string(),
                LineItemKind::Slab => format!("Drilling ({})", item.range_label),
            },
            quantity: format!("{} ft", item.footage),
            rate: format!("Rs.{}/ft", format_rate(item.rate_per_foot)),
            amount: format_inr(item.cost),
        })
        .collect();

    let pipes = [
        (
            "7\" PVC pipe",
            saved.input.pvc7_length_feet,
            saved.config.pvc7_rate_per_foot,
            saved.result.pvc7_cost,
        ),
        (
            "10\" PVC pipe",
            saved.input.pvc10_length_feet,
            saved.config.pvc10_rate_per_foot,
            saved.result.pvc10_cost,
        ),
    ];
    for (title, length, rate, cost) in pipes {
        if length > Decimal::ZERO {
            rows.push(ItemRow {
                title: title.to_string(),
                quantity: format!("{} ft", format_rate(length)),
                rate: format!("Rs.{}/ft", format_rate(rate)),
                amount: format_inr(cost),
            });
        }
    }

    rows.push(ItemRow {
        title: "Bore bata".to_string(),
        quantity: "1".to_string(),
        rate: format_inr(saved.result.fixed_fee_cost),
        amount: format_inr(saved.result.fixed_fee_cost),
    });

    rows
}
