//! Depth tier ("slab") rate table.
//!
//! Tiers are fixed in absolute foot-space: the first covers feet 1-300 and
//! each following tier covers the next 100 feet.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::errors::ConfigError;
use super::models::{RateConfig, SlabTier};

/// Span of the first tier in feet
pub const FIRST_TIER_SPAN_FEET: u32 = 300;

/// Span of every tier after the first
pub const TIER_SPAN_FEET: u32 = 100;

/// Build the ordered tier table.
///
/// Tier `i` is billed at `base_rate + increments[i]` unless `overrides`
/// carries a rate for `i`, which then wins regardless of the base rate.
/// Override indices past the end of the table are ignored.
///
/// # Errors
/// * `ConfigError::NonPositiveBaseRate` if `base_rate <= 0`
/// * `ConfigError::EmptyTierTable` if `increments` is empty
/// * `ConfigError::RateOverflow` if `base_rate + increments[i]` does not fit
pub fn build(
    base_rate: Decimal,
    increments: &[Decimal],
    overrides: &BTreeMap<usize, Decimal>,
) -> Result<Vec<SlabTier>, ConfigError> {
    if base_rate <= Decimal::ZERO {
        return Err(ConfigError::NonPositiveBaseRate(base_rate));
    }
    if increments.is_empty() {
        return Err(ConfigError::EmptyTierTable);
    }

    let mut tiers = Vec::with_capacity(increments.len());
    let mut start_foot = 1;

    for (index, increment) in increments.iter().enumerate() {
        let span = if index == 0 {
            FIRST_TIER_SPAN_FEET
        } else {
            TIER_SPAN_FEET
        };
        let end_foot = start_foot + span - 1;

        let (rate_per_foot, overridden) = match overrides.get(&index) {
            Some(rate) => (*rate, true),
            None => (
                base_rate
                    .checked_add(*increment)
                    .ok_or(ConfigError::RateOverflow { index })?,
                false,
            ),
        };

        tiers.push(SlabTier {
            index,
            start_foot,
            end_foot,
            rate_per_foot,
            overridden,
        });
        start_foot = end_foot + 1;
    }

    Ok(tiers)
}

/// Build the tier table described by a rate config
pub fn build_from_config(config: &RateConfig) -> Result<Vec<SlabTier>, ConfigError> {
    build(
        config.base_drilling_rate_per_foot,
        &config.tier_increments,
        &config.tier_overrides,
    )
}

/// Deepest foot covered by the table, 0 for an empty table
pub fn depth_ceiling(tiers: &[SlabTier]) -> u32 {
    tiers.last().map(|tier| tier.end_foot).unwrap_or(0)
}

/// Ceiling for a table with `tier_count` tiers, without building it
pub fn ceiling_for(tier_count: usize) -> u32 {
    match tier_count {
        0 => 0,
        n => FIRST_TIER_SPAN_FEET + TIER_SPAN_FEET * (n as u32 - 1),
    }
}

/// Label for a depth range, e.g. `001-300 ft`
pub fn range_label(start_foot: u32, end_foot: u32) -> String {
    format!("{:03}-{} ft", start_foot, end_foot)
}
