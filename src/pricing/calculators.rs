//! Core pricing calculation functions.
//!
//! Pure functions for quotation math - no database access, no shared state.
//! A single interval-intersection routine bills both new and repair drilling
//! so tier boundaries are identical in both modes.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

use super::errors::{QuoteError, ValidationError};
use super::models::{
    DrillingLineItem, DrillingMode, LineItemKind, QuoteInput, QuoteResult, RateConfig, SlabTier,
};
use super::slab;

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use borewell_quote::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));
/// assert_eq!(round_money(dec!(152.8125), 2), dec!(152.81));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

fn checked_mul(a: Decimal, b: Decimal, step: &'static str) -> Result<Decimal, ValidationError> {
    a.checked_mul(b)
        .ok_or(ValidationError::AmountOverflow { step })
}

fn checked_add(a: Decimal, b: Decimal, step: &'static str) -> Result<Decimal, ValidationError> {
    a.checked_add(b)
        .ok_or(ValidationError::AmountOverflow { step })
}

/// Drilling cost over one depth interval
#[derive(Debug, Clone, PartialEq)]
pub struct DrillingCost {
    pub line_items: Vec<DrillingLineItem>,
    pub total_cost: Decimal,
}

/// Bill the inclusive interval `[start_foot, end_foot_inclusive]` against the
/// tier table.
///
/// Each tier contributes the feet where its own range overlaps the interval.
/// Tiers without overlap contribute nothing, so no zero-footage rows appear.
///
/// # Errors
/// * `ValidationError::AmountOverflow` if a tier cost or the running total
///   does not fit in a `Decimal`
pub fn compute_drilling_cost(
    tiers: &[SlabTier],
    start_foot: u32,
    end_foot_inclusive: u32,
) -> Result<DrillingCost, ValidationError> {
    let mut line_items = Vec::new();
    let mut total_cost = Decimal::ZERO;

    for tier in tiers {
        let overlap_start = tier.start_foot.max(start_foot);
        let overlap_end = tier.end_foot.min(end_foot_inclusive);
        if overlap_start > overlap_end {
            continue;
        }

        let footage = overlap_end - overlap_start + 1;
        let cost = checked_mul(Decimal::from(footage), tier.rate_per_foot, "drilling")?;
        total_cost = checked_add(total_cost, cost, "drilling")?;

        line_items.push(DrillingLineItem {
            kind: LineItemKind::Slab,
            range_label: slab::range_label(overlap_start, overlap_end),
            start_foot: overlap_start,
            end_foot: overlap_end,
            rate_per_foot: tier.rate_per_foot,
            footage,
            cost,
        });
    }

    Ok(DrillingCost {
        line_items,
        total_cost,
    })
}

/// Check an input against the config before anything is priced.
pub fn validate(input: &QuoteInput, config: &RateConfig) -> Result<(), ValidationError> {
    if input.total_depth_feet == 0 {
        return Err(ValidationError::InvalidDepth);
    }

    if config.base_drilling_rate_per_foot <= Decimal::ZERO {
        return Err(ValidationError::InvalidRate(
            config.base_drilling_rate_per_foot,
        ));
    }

    if input.drilling_mode == DrillingMode::Repair
        && input.old_bore_depth_feet >= input.total_depth_feet
    {
        return Err(ValidationError::RepairBoreExceedsDepth {
            old_bore_depth: input.old_bore_depth_feet,
            total_depth: input.total_depth_feet,
        });
    }

    let ceiling = slab::ceiling_for(config.tier_increments.len());
    if ceiling > 0 && input.total_depth_feet > ceiling {
        return Err(ValidationError::DepthExceedsTierTable {
            depth: input.total_depth_feet,
            ceiling,
        });
    }

    if input.pvc7_length_feet < Decimal::ZERO {
        return Err(ValidationError::NegativePipeLength {
            pipe: "7\" PVC",
            length: input.pvc7_length_feet,
        });
    }
    if input.pvc10_length_feet < Decimal::ZERO {
        return Err(ValidationError::NegativePipeLength {
            pipe: "10\" PVC",
            length: input.pvc10_length_feet,
        });
    }

    Ok(())
}

/// Compute a fully itemized quotation.
///
/// Validation runs first; an error is returned instead of a partial result.
/// Amounts too large for a `Decimal` fail with `AmountOverflow`.
/// Same `(input, config)` always yields the same result.
pub fn compute(input: &QuoteInput, config: &RateConfig) -> Result<QuoteResult, QuoteError> {
    validate(input, config)?;

    let tiers = slab::build_from_config(config)?;

    let (drilling_cost, drilling_line_items) = match input.drilling_mode {
        DrillingMode::New => {
            let drilling = compute_drilling_cost(&tiers, 1, input.total_depth_feet)?;
            (drilling.total_cost, drilling.line_items)
        }
        DrillingMode::Repair => {
            let old_bore = input.old_bore_depth_feet;
            let old_bore_cost =
                checked_mul(Decimal::from(old_bore), config.old_bore_rate_per_foot, "old bore")?;
            let rest = compute_drilling_cost(&tiers, old_bore + 1, input.total_depth_feet)?;

            let mut items = Vec::with_capacity(rest.line_items.len() + 1);
            items.push(DrillingLineItem {
                kind: LineItemKind::OldBore,
                range_label: format!("000-{:03} ft (Old Bore)", old_bore),
                start_foot: 0,
                end_foot: old_bore,
                rate_per_foot: config.old_bore_rate_per_foot,
                footage: old_bore,
                cost: old_bore_cost,
            });
            items.extend(rest.line_items);

            (checked_add(old_bore_cost, rest.total_cost, "drilling")?, items)
        }
    };

    let pvc7_cost = checked_mul(input.pvc7_length_feet, config.pvc7_rate_per_foot, "7\" PVC")?;
    let pvc10_cost = checked_mul(
        input.pvc10_length_feet,
        config.pvc10_rate_per_foot,
        "10\" PVC",
    )?;
    let fixed_fee_cost = config.fixed_fee;

    let subtotal = [pvc7_cost, pvc10_cost, fixed_fee_cost]
        .into_iter()
        .try_fold(drilling_cost, |sum, cost| checked_add(sum, cost, "subtotal"))?;

    let tax_percentage_applied = if input.gst_enabled {
        config.gst_percentage
    } else {
        Decimal::ZERO
    };
    let tax_amount =
        checked_mul(subtotal, tax_percentage_applied, "tax")? / Decimal::ONE_HUNDRED;

    let total_cost = checked_add(subtotal, tax_amount, "total")?;

    let effective_rate_per_foot = if input.total_depth_feet > 0 {
        total_cost / Decimal::from(input.total_depth_feet)
    } else {
        Decimal::ZERO
    };

    Ok(QuoteResult {
        drilling_line_items,
        drilling_cost,
        pvc7_cost,
        pvc10_cost,
        fixed_fee_cost,
        subtotal,
        tax_amount,
        total_cost,
        effective_rate_per_foot,
        tax_percentage_applied,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::errors::ConfigError;
    use rust_decimal_macros::dec;

    fn reference_new_input() -> QuoteInput {
        QuoteInput::new_drilling(800, dec!(30), dec!(15), false)
    }

    fn reference_repair_input() -> QuoteInput {
        QuoteInput::repair(800, 350, dec!(30), dec!(15), false)
    }

    fn default_tiers() -> Vec<SlabTier> {
        slab::build_from_config(&RateConfig::default()).unwrap()
    }

    // ==================== round_money tests ====================

    #[test]
    fn test_round_money_bankers_rounding_to_even() {
        assert_eq!(round_money(dec!(2.5), 0), dec!(2));
        assert_eq!(round_money(dec!(3.5), 0), dec!(4));
        assert_eq!(round_money(dec!(2.25), 1), dec!(2.2));
    }

    // ==================== compute_drilling_cost tests ====================

    #[test]
    fn test_drilling_cost_single_tier() {
        let drilling = compute_drilling_cost(&default_tiers(), 1, 250).unwrap();

        assert_eq!(drilling.line_items.len(), 1);
        assert_eq!(drilling.line_items[0].range_label, "001-250 ft");
        assert_eq!(drilling.line_items[0].footage, 250);
        assert_eq!(drilling.total_cost, dec!(22500));
    }

    #[test]
    fn test_drilling_cost_uses_absolute_tier_boundaries() {
        let drilling = compute_drilling_cost(&default_tiers(), 351, 800).unwrap();

        let labels: Vec<&str> = drilling
            .line_items
            .iter()
            .map(|item| item.range_label.as_str())
            .collect();
        assert_eq!(
            labels,
            vec![
                "351-400 ft",
                "401-500 ft",
                "501-600 ft",
                "601-700 ft",
                "701-800 ft"
            ]
        );
        assert_eq!(drilling.line_items[0].footage, 50);
        assert_eq!(drilling.line_items[0].rate_per_foot, dec!(95));
        assert_eq!(drilling.total_cost, dec!(63750));
    }

    #[test]
    fn test_drilling_cost_boundary_depths() {
        let tiers = default_tiers();

        let at_300 = compute_drilling_cost(&tiers, 1, 300).unwrap();
        assert_eq!(at_300.line_items.len(), 1);
        assert_eq!(at_300.line_items[0].footage, 300);

        let at_301 = compute_drilling_cost(&tiers, 1, 301).unwrap();
        assert_eq!(at_301.line_items.len(), 2);
        assert_eq!(at_301.line_items[1].start_foot, 301);
        assert_eq!(at_301.line_items[1].footage, 1);
        assert_eq!(at_301.total_cost, dec!(27095));

        let at_2000 = compute_drilling_cost(&tiers, 1, 2000).unwrap();
        assert_eq!(at_2000.line_items.len(), 18);
    }

    #[test]
    fn test_drilling_cost_no_zero_footage_or_gaps() {
        let tiers = default_tiers();

        for depth in [1, 299, 300, 301, 399, 400, 401, 1000, 1999, 2000] {
            let drilling = compute_drilling_cost(&tiers, 1, depth).unwrap();
            assert!(drilling.line_items.iter().all(|item| item.footage > 0));
            assert_eq!(drilling.line_items[0].start_foot, 1);
            for pair in drilling.line_items.windows(2) {
                assert_eq!(pair[1].start_foot, pair[0].end_foot + 1);
            }
            assert_eq!(drilling.line_items.last().unwrap().end_foot, depth);
        }
    }

    #[test]
    fn test_drilling_cost_empty_interval() {
        let drilling = compute_drilling_cost(&default_tiers(), 501, 500).unwrap();
        assert!(drilling.line_items.is_empty());
        assert_eq!(drilling.total_cost, dec!(0));
    }

    // ==================== compute: reference scenarios ====================

    #[test]
    fn test_compute_new_drilling_reference_scenario() {
        let result = compute(&reference_new_input(), &RateConfig::default()).unwrap();

        let costs: Vec<Decimal> = result
            .drilling_line_items
            .iter()
            .map(|item| item.cost)
            .collect();
        assert_eq!(
            costs,
            vec![
                dec!(27000),
                dec!(9500),
                dec!(10500),
                dec!(12500),
                dec!(15500),
                dec!(20500)
            ]
        );
        assert_eq!(result.drilling_cost, dec!(95500));
        assert_eq!(result.pvc7_cost, dec!(13500));
        assert_eq!(result.pvc10_cost, dec!(11250));
        assert_eq!(result.fixed_fee_cost, dec!(2000));
        assert_eq!(result.subtotal, dec!(122250));
        assert_eq!(result.tax_amount, dec!(0));
        assert_eq!(result.total_cost, dec!(122250));
        assert_eq!(result.tax_percentage_applied, dec!(0));
        assert_eq!(result.effective_rate_per_foot, dec!(152.8125));
    }

    #[test]
    fn test_compute_repair_reference_scenario() {
        let result = compute(&reference_repair_input(), &RateConfig::default()).unwrap();

        let old_bore = &result.drilling_line_items[0];
        assert_eq!(old_bore.kind, LineItemKind::OldBore);
        assert_eq!(old_bore.footage, 350);
        assert_eq!(old_bore.rate_per_foot, dec!(40));
        assert_eq!(old_bore.cost, dec!(14000));
        assert_eq!(old_bore.range_label, "000-350 ft (Old Bore)");

        let slab_costs: Vec<Decimal> = result.drilling_line_items[1..]
            .iter()
            .map(|item| item.cost)
            .collect();
        assert_eq!(
            slab_costs,
            vec![dec!(4750), dec!(10500), dec!(12500), dec!(15500), dec!(20500)]
        );
        assert_eq!(result.drilling_cost, dec!(77750));
        assert_eq!(result.subtotal, dec!(77750) + dec!(13500) + dec!(11250) + dec!(2000));
    }

    #[test]
    fn test_compute_repair_bore_at_or_past_depth_is_rejected() {
        let config = RateConfig::default();

        let equal = QuoteInput::repair(800, 800, dec!(0), dec!(0), false);
        assert_eq!(
            compute(&equal, &config),
            Err(QuoteError::Validation(
                ValidationError::RepairBoreExceedsDepth {
                    old_bore_depth: 800,
                    total_depth: 800,
                }
            ))
        );

        let deeper = QuoteInput::repair(500, 900, dec!(0), dec!(0), false);
        assert!(matches!(
            compute(&deeper, &config),
            Err(QuoteError::Validation(
                ValidationError::RepairBoreExceedsDepth { .. }
            ))
        ));
    }

    // ==================== compute: validation ====================

    #[test]
    fn test_compute_rejects_zero_depth() {
        let input = QuoteInput::new_drilling(0, dec!(0), dec!(0), false);
        assert_eq!(
            compute(&input, &RateConfig::default()),
            Err(QuoteError::Validation(ValidationError::InvalidDepth))
        );
    }

    #[test]
    fn test_compute_rejects_non_positive_base_rate() {
        let config = RateConfig::default().with_base_rate(dec!(0));
        assert_eq!(
            compute(&reference_new_input(), &config),
            Err(QuoteError::Validation(ValidationError::InvalidRate(dec!(0))))
        );
    }

    #[test]
    fn test_compute_rejects_empty_tier_table() {
        let config = RateConfig {
            tier_increments: vec![],
            ..RateConfig::default()
        };
        assert_eq!(
            compute(&reference_new_input(), &config),
            Err(QuoteError::Config(ConfigError::EmptyTierTable))
        );
    }

    #[test]
    fn test_compute_rejects_depth_past_ceiling() {
        let input = QuoteInput::new_drilling(2001, dec!(0), dec!(0), false);
        assert_eq!(
            compute(&input, &RateConfig::default()),
            Err(QuoteError::Validation(
                ValidationError::DepthExceedsTierTable {
                    depth: 2001,
                    ceiling: 2000,
                }
            ))
        );
    }

    #[test]
    fn test_compute_rejects_negative_pipe_length() {
        let input = QuoteInput::new_drilling(500, dec!(-1), dec!(0), false);
        assert!(matches!(
            compute(&input, &RateConfig::default()),
            Err(QuoteError::Validation(
                ValidationError::NegativePipeLength { .. }
            ))
        ));
    }

    #[test]
    fn test_compute_zero_pipe_is_valid() {
        let input = QuoteInput::new_drilling(100, dec!(0), dec!(0), false);
        let result = compute(&input, &RateConfig::default()).unwrap();

        assert_eq!(result.pvc7_cost, dec!(0));
        assert_eq!(result.pvc10_cost, dec!(0));
        assert_eq!(result.subtotal, dec!(9000) + dec!(2000));
    }

    #[test]
    fn test_compute_new_mode_ignores_old_bore_depth() {
        let mut input = reference_new_input();
        input.old_bore_depth_feet = 5000;

        let result = compute(&input, &RateConfig::default()).unwrap();
        assert_eq!(result.drilling_cost, dec!(95500));
        assert!(result
            .drilling_line_items
            .iter()
            .all(|item| item.kind == LineItemKind::Slab));
    }

    // ==================== compute: tax ====================

    #[test]
    fn test_compute_with_gst_enabled() {
        let mut input = reference_new_input();
        input.gst_enabled = true;

        let result = compute(&input, &RateConfig::default()).unwrap();
        assert_eq!(result.tax_percentage_applied, dec!(18));
        assert_eq!(result.tax_amount, dec!(22005));
        assert_eq!(result.total_cost, dec!(144255));
    }

    #[test]
    fn test_compute_with_gst_disabled_total_equals_subtotal() {
        let result = compute(&reference_repair_input(), &RateConfig::default()).unwrap();
        assert_eq!(result.tax_amount, dec!(0));
        assert_eq!(result.total_cost, result.subtotal);
    }

    // ==================== compute: properties ====================

    #[test]
    fn test_new_mode_footage_and_cost_sum_for_every_depth() {
        let config = RateConfig::default();

        for depth in 1..=2000 {
            let input = QuoteInput::new_drilling(depth, dec!(0), dec!(0), false);
            let result = compute(&input, &config).unwrap();

            let footage: u32 = result.drilling_line_items.iter().map(|i| i.footage).sum();
            let cost: Decimal = result.drilling_line_items.iter().map(|i| i.cost).sum();
            assert_eq!(footage, depth);
            assert_eq!(cost, result.drilling_cost);
        }
    }

    #[test]
    fn test_repair_footage_adds_up_to_total_depth() {
        let config = RateConfig::default();

        for (total, old_bore) in [(800, 350), (301, 300), (2000, 1), (450, 0), (1200, 999)] {
            let input = QuoteInput::repair(total, old_bore, dec!(0), dec!(0), false);
            let result = compute(&input, &config).unwrap();

            assert_eq!(old_bore + result.slab_footage(), total);
            let cost: Decimal = result.drilling_line_items.iter().map(|i| i.cost).sum();
            assert_eq!(cost, result.drilling_cost);
        }
    }

    #[test]
    fn test_drilling_cost_is_monotonic_in_depth() {
        let config = RateConfig::default();
        let mut previous = Decimal::ZERO;

        for depth in 1..=2000 {
            let input = QuoteInput::new_drilling(depth, dec!(0), dec!(0), false);
            let cost = compute(&input, &config).unwrap().drilling_cost;
            assert!(cost >= previous, "cost dropped at {} ft", depth);
            previous = cost;
        }
    }

    #[test]
    fn test_compute_is_idempotent() {
        let config = RateConfig::default();
        let input = QuoteInput::repair(1234, 321, dec!(12.5), dec!(7), true);

        assert_eq!(compute(&input, &config), compute(&input, &config));
    }

    #[test]
    fn test_compute_honours_tier_override() {
        let mut config = RateConfig::default();
        config.tier_overrides.insert(1, dec!(100));

        let result = compute(&reference_new_input(), &config).unwrap();
        assert_eq!(result.drilling_line_items[1].rate_per_foot, dec!(100));
        assert_eq!(result.drilling_cost, dec!(96000));
    }

    #[test]
    fn test_compute_full_depth_new_drilling() {
        let input = QuoteInput::new_drilling(2000, dec!(0), dec!(0), false);
        let result = compute(&input, &RateConfig::default()).unwrap();

        assert_eq!(result.drilling_line_items.len(), 18);
        assert_eq!(result.drilling_line_items[17].rate_per_foot, dec!(1305));
        assert_eq!(result.drilling_cost, dec!(1005500));
        assert_eq!(result.total_cost, dec!(1007500));
    }

    // ==================== compute: overflow ====================

    #[test]
    fn test_compute_huge_pipe_length_is_rejected() {
        let input = QuoteInput::new_drilling(800, Decimal::MAX, dec!(0), false);

        assert_eq!(
            compute(&input, &RateConfig::default()),
            Err(QuoteError::Validation(ValidationError::AmountOverflow {
                step: "7\" PVC"
            }))
        );
    }

    #[test]
    fn test_compute_huge_config_rates_are_rejected() {
        let mut config = RateConfig::default();
        config.pvc10_rate_per_foot = Decimal::MAX;
        let result = compute(&reference_new_input(), &config);
        assert!(matches!(
            result,
            Err(QuoteError::Validation(ValidationError::AmountOverflow { step: "10\" PVC" }))
        ));

        let mut config = RateConfig::default();
        config.tier_overrides.insert(0, Decimal::MAX);
        let result = compute(&reference_new_input(), &config);
        assert!(matches!(
            result,
            Err(QuoteError::Validation(ValidationError::AmountOverflow { step: "drilling" }))
        ));

        let mut config = RateConfig::default();
        config.fixed_fee = Decimal::MAX;
        let result = compute(&reference_new_input(), &config);
        assert!(matches!(
            result,
            Err(QuoteError::Validation(ValidationError::AmountOverflow { step: "subtotal" }))
        ));
    }

    #[test]
    fn test_compute_huge_base_rate_is_rejected() {
        let mut config = RateConfig::default();
        config.base_drilling_rate_per_foot = Decimal::MAX;

        assert_eq!(
            compute(&reference_new_input(), &config),
            Err(QuoteError::Config(ConfigError::RateOverflow { index: 1 }))
        );
    }

    #[test]
    fn test_compute_repair_old_bore_overflow_is_rejected() {
        let mut config = RateConfig::default();
        config.old_bore_rate_per_foot = Decimal::MAX;

        let result = compute(&reference_repair_input(), &config);
        assert!(matches!(
            result,
            Err(QuoteError::Validation(ValidationError::AmountOverflow { step: "old bore" }))
        ));
    }
}
