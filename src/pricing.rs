//! Pricing

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};

use crate::cart::CartLine;

/// Totals derived from a list of cart lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals {
    /// Sum of unit price × quantity over all lines
    pub amount: Money<'static, Currency>,

    /// Sum of quantities over all lines
    pub items: u64,
}

impl Totals {
    /// Zero totals in the given currency.
    pub fn zero(currency: &'static Currency) -> Self {
        Self {
            amount: Money::from_minor(0, currency),
            items: 0,
        }
    }
}

/// Price of a single line: unit price × quantity, in minor units.
pub fn line_total_minor(line: &CartLine) -> i64 {
    line.item()
        .price()
        .to_minor_units()
        .saturating_mul(i64::from(line.quantity()))
}

/// Folds the full line list into its totals.
///
/// Amounts are accumulated in integer minor units, so folding the same lines
/// always yields the same totals regardless of the order of earlier
/// mutations.
pub fn fold_totals(lines: &[CartLine], currency: &'static Currency) -> Totals {
    let (minor, items) = lines.iter().fold((0_i64, 0_u64), |(minor, items), line| {
        (
            minor.saturating_add(line_total_minor(line)),
            items.saturating_add(u64::from(line.quantity())),
        )
    });

    Totals {
        amount: Money::from_minor(minor, currency),
        items,
    }
}

/// Formats an amount as a dollar string with exactly two decimal places.
///
/// The `$` prefix is fixed and no thousands separators are added.
pub fn format_amount(amount: &Money<'_, Currency>) -> String {
    let value = Decimal::new(amount.to_minor_units(), amount.currency().exponent).round_dp(2);

    format!("${value:.2}")
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rusty_money::iso;

    use crate::items::Item;

    use super::*;

    fn line(id: &str, minor: i64, quantity: u32) -> CartLine {
        CartLine::new(
            Arc::new(Item::new(id, id, Money::from_minor(minor, iso::USD))),
            quantity,
        )
    }

    #[test]
    fn fold_totals_sums_price_times_quantity() {
        let lines = [line("a", 10_00, 2), line("b", 5_50, 3)];

        let totals = fold_totals(&lines, iso::USD);

        assert_eq!(totals.amount, Money::from_minor(36_50, iso::USD));
        assert_eq!(totals.items, 5);
    }

    #[test]
    fn fold_totals_empty_is_zero() {
        assert_eq!(fold_totals(&[], iso::USD), Totals::zero(iso::USD));
    }

    #[test]
    fn format_amount_pads_two_decimals() {
        assert_eq!(format_amount(&Money::from_minor(15_00, iso::USD)), "$15.00");
        assert_eq!(format_amount(&Money::from_minor(0, iso::USD)), "$0.00");
        assert_eq!(format_amount(&Money::from_minor(1_234_567, iso::USD)), "$12345.67");
    }

    #[test]
    fn format_amount_survives_float_like_sums() {
        // 0.10 + 0.20 would be 0.30000000000000004 in binary floating point
        let lines = [line("a", 10, 1), line("b", 20, 1)];

        let totals = fold_totals(&lines, iso::USD);

        assert_eq!(format_amount(&totals.amount), "$0.30");
    }
}
