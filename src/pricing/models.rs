//! Value types for the pricing engine.
//!
//! Everything here is a plain value: configs are snapshotted, inputs are
//! built fresh per request and results are never mutated once produced.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Additive increments applied to the base rate, one per depth tier.
///
/// Tier 0 covers feet 1-300, every following tier covers 100 feet, so the
/// default table reaches 2000 ft.
pub const DEFAULT_TIER_INCREMENTS: [Decimal; 18] = [
    dec!(0),
    dec!(5),
    dec!(15),
    dec!(35),
    dec!(65),
    dec!(115),
    dec!(155),
    dec!(215),
    dec!(315),
    dec!(415),
    dec!(515),
    dec!(615),
    dec!(715),
    dec!(815),
    dec!(915),
    dec!(1015),
    dec!(1115),
    dec!(1215),
];

/// Drilling mode selected by the operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrillingMode {
    /// Fresh bore drilled from the surface
    New,
    /// Rebore: an existing bore is deepened past its old depth
    Repair,
}

impl DrillingMode {
    pub fn label(&self) -> &'static str {
        match self {
            DrillingMode::New => "New Drilling",
            DrillingMode::Repair => "Rebore (Repair)",
        }
    }
}

/// Rate configuration snapshot consumed by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateConfig {
    pub base_drilling_rate_per_foot: Decimal,
    pub pvc7_rate_per_foot: Decimal,
    pub pvc10_rate_per_foot: Decimal,
    /// Rate billed for the already-drilled part of a rebore
    pub old_bore_rate_per_foot: Decimal,
    pub gst_percentage: Decimal,
    pub tier_increments: Vec<Decimal>,
    /// Flat per-job charge (bore bata)
    pub fixed_fee: Decimal,
    /// Operator-chosen rates keyed by tier index; survive base-rate changes
    pub tier_overrides: BTreeMap<usize, Decimal>,
}

impl Default for RateConfig {
    fn default() -> Self {
        Self {
            base_drilling_rate_per_foot: dec!(90),
            pvc7_rate_per_foot: dec!(450),
            pvc10_rate_per_foot: dec!(750),
            old_bore_rate_per_foot: dec!(40),
            gst_percentage: dec!(18),
            tier_increments: DEFAULT_TIER_INCREMENTS.to_vec(),
            fixed_fee: dec!(2000),
            tier_overrides: BTreeMap::new(),
        }
    }
}

impl RateConfig {
    /// Copy of this config with a different base rate. Overrides are kept.
    pub fn with_base_rate(&self, base_rate: Decimal) -> Self {
        Self {
            base_drilling_rate_per_foot: base_rate,
            ..self.clone()
        }
    }
}

/// One depth band with its own per-foot rate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlabTier {
    pub index: usize,
    pub start_foot: u32,
    pub end_foot: u32,
    pub rate_per_foot: Decimal,
    /// True when the rate comes from a manual override
    pub overridden: bool,
}

impl SlabTier {
    pub fn span_feet(&self) -> u32 {
        self.end_foot - self.start_foot + 1
    }
}

/// Flat input record for one quotation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteInput {
    pub drilling_mode: DrillingMode,
    pub total_depth_feet: u32,
    #[serde(default)]
    pub old_bore_depth_feet: u32,
    #[serde(default)]
    pub pvc7_length_feet: Decimal,
    #[serde(default)]
    pub pvc10_length_feet: Decimal,
    #[serde(default)]
    pub gst_enabled: bool,
}

impl QuoteInput {
    /// Input for a new bore. The old-bore depth is reset to zero.
    pub fn new_drilling(
        total_depth_feet: u32,
        pvc7_length_feet: Decimal,
        pvc10_length_feet: Decimal,
        gst_enabled: bool,
    ) -> Self {
        Self {
            drilling_mode: DrillingMode::New,
            total_depth_feet,
            old_bore_depth_feet: 0,
            pvc7_length_feet,
            pvc10_length_feet,
            gst_enabled,
        }
    }

    /// Input for a rebore continuing past `old_bore_depth_feet`
    pub fn repair(
        total_depth_feet: u32,
        old_bore_depth_feet: u32,
        pvc7_length_feet: Decimal,
        pvc10_length_feet: Decimal,
        gst_enabled: bool,
    ) -> Self {
        Self {
            drilling_mode: DrillingMode::Repair,
            total_depth_feet,
            old_bore_depth_feet,
            pvc7_length_feet,
            pvc10_length_feet,
            gst_enabled,
        }
    }
}

/// Line item origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineItemKind {
    Slab,
    OldBore,
}

/// One row of the drilling breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrillingLineItem {
    pub kind: LineItemKind,
    pub range_label: String,
    pub start_foot: u32,
    pub end_foot: u32,
    pub rate_per_foot: Decimal,
    pub footage: u32,
    pub cost: Decimal,
}

/// Fully itemized quotation produced by [`crate::pricing::calculators::compute`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteResult {
    pub drilling_line_items: Vec<DrillingLineItem>,
    pub drilling_cost: Decimal,
    pub pvc7_cost: Decimal,
    pub pvc10_cost: Decimal,
    pub fixed_fee_cost: Decimal,
    pub subtotal: Decimal,
    pub tax_amount: Decimal,
    pub total_cost: Decimal,
    pub effective_rate_per_foot: Decimal,
    pub tax_percentage_applied: Decimal,
}

impl QuoteResult {
    /// Footage billed through depth tiers (old-bore footage excluded)
    pub fn slab_footage(&self) -> u32 {
        self.drilling_line_items
            .iter()
            .filter(|item| item.kind == LineItemKind::Slab)
            .map(|item| item.footage)
            .sum()
    }
}
