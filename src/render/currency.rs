//! Rupee formatting shared by every renderer.

use rust_decimal::prelude::*;

/// Round to whole rupees, halves away from zero.
pub fn round_rupees(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Group digits the Indian way: last three, then pairs (`12,34,567`).
pub fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

/// Integer rupee amount with Indian grouping, e.g. `1,22,250`
pub fn format_amount(amount: Decimal) -> String {
    let rounded = round_rupees(amount);
    let digits = rounded.abs().trunc().to_string();
    let grouped = group_indian(&digits);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Display form used on every surface, e.g. `Rs.1,22,250`
pub fn format_inr(amount: Decimal) -> String {
    let formatted = format_amount(amount);
    match formatted.strip_prefix('-') {
        Some(positive) => format!("-Rs.{}", positive),
        None => format!("Rs.{}", formatted),
    }
}

/// Rate without trailing zeros, e.g. `95` or `95.5`
pub fn format_rate(rate: Decimal) -> String {
    rate.normalize().to_string()
}
