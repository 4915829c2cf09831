//! Pricing error types.

use rust_decimal::Decimal;

/// Input rejected before any cost is computed
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Total depth must be greater than zero")]
    InvalidDepth,

    #[error("Base drilling rate must be greater than zero (got {0})")]
    InvalidRate(Decimal),

    #[error("Old bore depth {old_bore_depth} ft must be less than total depth {total_depth} ft")]
    RepairBoreExceedsDepth { old_bore_depth: u32, total_depth: u32 },

    #[error("Total depth {depth} ft exceeds the rate table ceiling of {ceiling} ft")]
    DepthExceedsTierTable { depth: u32, ceiling: u32 },

    #[error("PVC length for {pipe} must not be negative (got {length})")]
    NegativePipeLength { pipe: &'static str, length: Decimal },

    #[error("Quote amount is too large to compute ({step})")]
    AmountOverflow { step: &'static str },
}

/// Rate configuration that cannot produce a tier table
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Tier increment table is empty")]
    EmptyTierTable,

    #[error("Base drilling rate must be greater than zero (got {0})")]
    NonPositiveBaseRate(Decimal),

    #[error("Rate '{field}' must not be negative (got {value})")]
    NegativeRate { field: &'static str, value: Decimal },

    #[error("GST percentage must be between 0 and 100 (got {0})")]
    TaxPercentageOutOfRange(Decimal),

    #[error("Tier override index {index} is outside the {tiers}-tier table")]
    OverrideOutOfRange { index: usize, tiers: usize },

    #[error("Rate for tier {index} is too large to compute")]
    RateOverflow { index: usize },
}

/// Any failure of a pricing calculation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QuoteError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl QuoteError {
    /// Stable machine-readable name for API responses
    pub fn error_type(&self) -> &'static str {
        match self {
            QuoteError::Validation(ValidationError::InvalidDepth) => "invalid_depth",
            QuoteError::Validation(ValidationError::InvalidRate(_)) => "invalid_rate",
            QuoteError::Validation(ValidationError::RepairBoreExceedsDepth { .. }) => {
                "repair_bore_exceeds_depth"
            }
            QuoteError::Validation(ValidationError::DepthExceedsTierTable { .. }) => {
                "depth_exceeds_tier_table"
            }
            QuoteError::Validation(ValidationError::NegativePipeLength { .. }) => {
                "negative_pipe_length"
            }
            QuoteError::Validation(ValidationError::AmountOverflow { .. }) => "amount_overflow",
            QuoteError::Config(ConfigError::EmptyTierTable) => "empty_tier_table",
            QuoteError::Config(ConfigError::NonPositiveBaseRate(_)) => "invalid_rate",
            QuoteError::Config(ConfigError::NegativeRate { .. }) => "negative_rate",
            QuoteError::Config(ConfigError::TaxPercentageOutOfRange(_)) => {
                "tax_percentage_out_of_range"
            }
            QuoteError::Config(ConfigError::OverrideOutOfRange { .. }) => "override_out_of_range",
            QuoteError::Config(ConfigError::RateOverflow { .. }) => "rate_overflow",
        }
    }
}
