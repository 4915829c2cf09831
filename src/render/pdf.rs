//! Printable A4 quotation.
//!
//! `layout` turns a saved quote into positioned text lines; `render_pdf`
//! draws them with the built-in Helvetica faces so no font files ship with
//! the service.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument};

use crate::config::BusinessProfile;
use crate::error::AppError;
use crate::pricing::models::DrillingMode;
use crate::pricing::services::SavedQuote;

use super::currency::{format_inr, format_rate};
use super::{item_rows, message::short_id};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const TOP_MM: f32 = 277.0;
const BOTTOM_MM: f32 = 20.0;

/// Column x positions: item, quantity, price, amount
const COLUMNS_MM: [f32; 4] = [20.0, 90.0, 130.0, 170.0];

/// One line of text, possibly split across columns
#[derive(Debug, Clone, PartialEq)]
pub struct PdfLine {
    /// `(x in mm, text)` pairs
    pub cells: Vec<(f32, String)>,
    pub size: f32,
    pub bold: bool,
    /// Vertical space taken by the line in mm
    pub advance: f32,
}

impl PdfLine {
    fn text(text: impl Into<String>, size: f32) -> Self {
        Self {
            cells: vec![(COLUMNS_MM[0], text.into())],
            size,
            bold: false,
            advance: size * 0.6,
        }
    }

    fn columns(cells: Vec<(f32, String)>, size: f32) -> Self {
        Self {
            cells,
            size,
            bold: false,
            advance: size * 0.7,
        }
    }

    fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    fn gap(mut self, extra_mm: f32) -> Self {
        self.advance += extra_mm;
        self
    }

    /// Text of every cell, joined with single spaces
    pub fn joined(&self) -> String {
        self.cells
            .iter()
            .map(|(_, text)| text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn totals_line(label: String, amount: String, size: f32) -> PdfLine {
    PdfLine::columns(vec![(COLUMNS_MM[2], label), (COLUMNS_MM[3], amount)], size)
}

/// Lay out the quotation from the saved result; nothing is recomputed.
pub fn layout(quote: &SavedQuote, business: &BusinessProfile, share_url: &str) -> Vec<PdfLine> {
    let input = &quote.input;
    let result = &quote.result;
    let mut lines = Vec::new();

    lines.push(PdfLine {
        cells: vec![
            (COLUMNS_MM[0], business.name.to_uppercase()),
            (150.0, "QUOTATION".to_string()),
        ],
        size: 18.0,
        bold: true,
        advance: 9.0,
    });
    lines.push(PdfLine::text(business.tagline.clone(), 10.0));
    if !business.phones.is_empty() {
        lines.push(PdfLine::text(
            format!("Phone: {}", business.phones.join(" | ")),
            10.0,
        ));
    }
    if !business.email.is_empty() {
        lines.push(PdfLine::text(format!("Email: {}", business.email), 10.0));
    }
    if let Some(last) = lines.last_mut() {
        last.advance += 6.0;
    }

    lines.push(PdfLine::text(format!("Quotation No: {}", short_id(quote)), 11.0));
    lines.push(PdfLine::text(
        format!("Date: {}", quote.created_at.format("%d/%m/%Y")),
        11.0,
    ));
    lines.push(PdfLine::text(
        format!("Valid until: {}", quote.valid_until.format("%d/%m/%Y")),
        11.0,
    ));
    lines.push(PdfLine::text(
        format!("Drilling type: {}", input.drilling_mode.label()),
        11.0,
    ));
    lines.push(PdfLine::text(
        format!("Total depth: {} ft", input.total_depth_feet),
        11.0,
    ));
    if input.drilling_mode == DrillingMode::Repair {
        lines.push(PdfLine::text(
            format!("Old bore: {} ft", input.old_bore_depth_feet),
            11.0,
        ));
    }
    lines.push(
        PdfLine::text(
            format!(
                "Base rate: Rs.{}/ft",
                format_rate(quote.config.base_drilling_rate_per_foot)
            ),
            11.0,
        )
        .gap(6.0),
    );

    let headings = ["Items", "Quantity", "Price", "Total Amount"];
    lines.push(
        PdfLine::columns(
            COLUMNS_MM
                .iter()
                .zip(headings)
                .map(|(x, heading)| (*x, heading.to_string()))
                .collect(),
            11.0,
        )
        .bold()
        .gap(2.0),
    );
    for row in item_rows(quote) {
        lines.push(PdfLine::columns(
            vec![
                (COLUMNS_MM[0], row.title),
                (COLUMNS_MM[1], row.quantity),
                (COLUMNS_MM[2], row.rate),
                (COLUMNS_MM[3], row.amount),
            ],
            10.0,
        ));
    }
    if let Some(last) = lines.last_mut() {
        last.advance += 4.0;
    }

    lines.push(totals_line(
        "SUBTOTAL".to_string(),
        format_inr(result.subtotal),
        11.0,
    ));
    if input.gst_enabled {
        lines.push(totals_line(
            format!("TAX ({}%)", format_rate(result.tax_percentage_applied)),
            format_inr(result.tax_amount),
            11.0,
        ));
    }
    lines.push(
        totals_line("TOTAL".to_string(), format_inr(result.total_cost), 12.0)
            .bold()
            .gap(2.0),
    );
    lines.push(
        PdfLine::text(
            format!(
                "Effective rate: {} per foot (approximate)",
                format_inr(result.effective_rate_per_foot)
            ),
            10.0,
        )
        .gap(6.0),
    );

    lines.push(PdfLine::text("Terms & Conditions", 11.0).bold());
    for term in [
        "Payment: 50% advance, 50% on completion",
        "GST as applicable",
        "Costs may vary per site conditions",
    ] {
        lines.push(PdfLine::text(format!("- {}", term), 10.0));
    }
    if let Some(last) = lines.last_mut() {
        last.advance += 6.0;
    }

    lines.push(PdfLine::text(format!("View online: {}", share_url), 9.0));
    lines
}

fn pdf_error(err: printpdf::Error) -> AppError {
    AppError::Pdf(err.to_string())
}

/// Render the quotation as PDF bytes, starting a new page when a page fills
pub fn render_pdf(
    quote: &SavedQuote,
    business: &BusinessProfile,
    share_url: &str,
) -> Result<Vec<u8>, AppError> {
    let title = format!("Quotation {}", short_id(quote));
    let (doc, page, layer) = PdfDocument::new(
        title,
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Quotation",
    );
    let regular: IndirectFontRef = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(pdf_error)?;
    let bold: IndirectFontRef = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(pdf_error)?;

    let mut current = doc.get_page(page).get_layer(layer);
    let mut y = TOP_MM;

    for line in layout(quote, business, share_url) {
        if y - line.advance < BOTTOM_MM {
            let (page, layer) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Quotation");
            current = doc.get_page(page).get_layer(layer);
            y = TOP_MM;
        }

        let font = if line.bold { &bold } else { &regular };
        for (x, text) in &line.cells {
            current.use_text(text.as_str(), line.size, Mm(*x), Mm(y), font);
        }
        y -= line.advance;
    }

    doc.save_to_bytes().map_err(pdf_error)
}
