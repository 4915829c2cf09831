//! Pre-formatted quotation text for chat apps.
//!
//! The text uses WhatsApp markup (`*bold*`) and reads fine as plain text.

use std::fmt::{self, Write};

use rust_decimal::Decimal;
use url::Url;

use crate::config::BusinessProfile;
use crate::pricing::models::{DrillingMode, LineItemKind};
use crate::pricing::services::SavedQuote;

use super::currency::{format_inr, format_rate};

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━";

/// Render the quotation message for a saved quote.
///
/// Every amount comes from the saved result; nothing is recomputed here.
pub fn render_message(
    quote: &SavedQuote,
    business: &BusinessProfile,
    share_url: &str,
) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_message(&mut out, quote, business, share_url)?;
    Ok(out)
}

fn write_message(
    out: &mut String,
    quote: &SavedQuote,
    business: &BusinessProfile,
    share_url: &str,
) -> fmt::Result {
    let input = &quote.input;
    let config = &quote.config;
    let result = &quote.result;

    writeln!(out, "*{}*", business.name.to_uppercase())?;
    writeln!(out, "{}", business.tagline)?;
    writeln!(out, "{}", RULE)?;
    writeln!(out)?;
    writeln!(out, "*BOREWELL QUOTATION*")?;
    writeln!(out, "Date: {}", quote.created_at.format("%d/%m/%Y"))?;
    writeln!(out, "Quote: {}", short_id(quote))?;
    writeln!(out)?;

    writeln!(out, "*PROJECT DETAILS:*")?;
    writeln!(out, "Total Depth: {} ft", input.total_depth_feet)?;
    writeln!(out, "Drilling Type: {}", input.drilling_mode.label())?;
    if input.drilling_mode == DrillingMode::Repair {
        writeln!(out, "Old Bore: {} ft", input.old_bore_depth_feet)?;
    }
    writeln!(
        out,
        "Base Rate: Rs.{}/ft",
        format_rate(config.base_drilling_rate_per_foot)
    )?;
    if input.pvc7_length_feet > Decimal::ZERO {
        writeln!(out, "7\" PVC: {} ft", format_rate(input.pvc7_length_feet))?;
    }
    if input.pvc10_length_feet > Decimal::ZERO {
        writeln!(out, "10\" PVC: {} ft", format_rate(input.pvc10_length_feet))?;
    }
    writeln!(out)?;

    writeln!(out, "*ITEMIZED COST BREAKDOWN:*")?;
    for item in &result.drilling_line_items {
        let title = match item.kind {
            LineItemKind::OldBore => "Old Bore".to_string(),
            LineItemKind::Slab => format!("Drilling ({})", item.range_label),
        };
        writeln!(out, "{}", title)?;
        writeln!(
            out,
            "  {} ft | Rs.{}/ft | {}",
            item.footage,
            format_rate(item.rate_per_foot),
            format_inr(item.cost)
        )?;
    }
    if input.pvc7_length_feet > Decimal::ZERO {
        writeln!(out, "7\" PVC Pipe")?;
        writeln!(
            out,
            "  {} ft | Rs.{}/ft | {}",
            format_rate(input.pvc7_length_feet),
            format_rate(config.pvc7_rate_per_foot),
            format_inr(result.pvc7_cost)
        )?;
    }
    if input.pvc10_length_feet > Decimal::ZERO {
        writeln!(out, "10\" PVC Pipe")?;
        writeln!(
            out,
            "  {} ft | Rs.{}/ft | {}",
            format_rate(input.pvc10_length_feet),
            format_rate(config.pvc10_rate_per_foot),
            format_inr(result.pvc10_cost)
        )?;
    }
    writeln!(out, "Bore Bata")?;
    writeln!(out, "  1 | {}", format_inr(result.fixed_fee_cost))?;
    writeln!(out, "{}", RULE)?;

    writeln!(out, "SUBTOTAL: {}", format_inr(result.subtotal))?;
    if input.gst_enabled {
        writeln!(
            out,
            "GST ({}%): {}",
            format_rate(result.tax_percentage_applied),
            format_inr(result.tax_amount)
        )?;
    }
    writeln!(out, "*TOTAL: {}*", format_inr(result.total_cost))?;
    writeln!(out, "*(Approximate)*")?;
    writeln!(out)?;

    writeln!(out, "*TERMS & CONDITIONS:*")?;
    writeln!(
        out,
        "• Valid until {}",
        quote.valid_until.format("%d/%m/%Y")
    )?;
    writeln!(out, "• Payment: 50% advance, 50% on completion")?;
    writeln!(out, "• GST as applicable")?;
    writeln!(out, "• Costs may vary per site conditions")?;

    if !business.phones.is_empty() || !business.email.is_empty() {
        writeln!(out)?;
        writeln!(out, "*CONTACT US:*")?;
        for phone in &business.phones {
            writeln!(out, "📞 {}", phone)?;
        }
        if !business.email.is_empty() {
            writeln!(out, "📧 {}", business.email)?;
        }
    }

    writeln!(out)?;
    writeln!(out, "View online: {}", share_url)?;
    write!(out, "Thank you for choosing {}!", business.name)
}

/// First block of the quote id, enough for a customer to quote back
pub fn short_id(quote: &SavedQuote) -> String {
    quote.id.simple().to_string()[..8].to_uppercase()
}

/// `wa.me` link that opens a chat prefilled with `message`.
///
/// Without a configured number the link lets the sender pick a contact.
pub fn whatsapp_url(number: &str, message: &str) -> Result<Url, url::ParseError> {
    let base = if number.is_empty() {
        "https://wa.me/".to_string()
    } else {
        format!("https://wa.me/{}", number)
    };
    Url::parse_with_params(&base, &[("text", message)])
}
