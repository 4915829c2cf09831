//! Request DTOs for pricing API endpoints.

use rust_decimal::Decimal;
use serde::Deserialize;

use super::models::{DrillingMode, QuoteInput};

/// Request to price a borewell job
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteRequest {
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
    /// Per-quote base rate; falls back to the configured one
    #[serde(default)]
    pub drilling_rate: Option<Decimal>,
}

impl QuoteRequest {
    /// Build the engine input. Switching to new drilling drops any old-bore
    /// depth the form still carries.
    pub fn to_input(&self) -> QuoteInput {
        match self.drilling_mode {
            DrillingMode::New => QuoteInput::new_drilling(
                self.total_depth_feet,
                self.pvc7_length_feet,
                self.pvc10_length_feet,
                self.gst_enabled,
            ),
            DrillingMode::Repair => QuoteInput::repair(
                self.total_depth_feet,
                self.old_bore_depth_feet,
                self.pvc7_length_feet,
                self.pvc10_length_feet,
                self.gst_enabled,
            ),
        }
    }
}

/// Query for the slab table endpoint
#[derive(Debug, Deserialize)]
pub struct SlabTableQuery {
    #[serde(default)]
    pub base_rate: Option<Decimal>,
}
