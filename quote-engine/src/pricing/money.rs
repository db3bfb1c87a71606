//! Money calculation helpers
//!
//! All monetary arithmetic is done in `Decimal` internally and stored as
//! `f64` on the domain types, rounded to 2 decimal places half-up on the
//! way out.

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal for calculation.
///
/// Non-finite and out-of-range values become 0, which is exactly the
/// coercion the engine wants for invalid numeric parameters.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Round a Decimal amount to 2 decimal places half-up
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// First-thousand-then-next-thousand pricing.
///
/// Printing-press economics: a setup-inclusive price covers the first run
/// of up to 1000 units; each additional thousand is charged at the lower
/// marginal rate, fractionally. Below 1000 units the first-thousand price
/// is prorated.
///
/// ```text
/// thousands = round(quantity / 1000, 2dp)
/// cost = thousands >= 1
///      ? (thousands - 1) * cost_next_thousand + cost_first_thousand
///      : cost_first_thousand * thousands
/// ```
pub fn tiered_thousands_cost(
    quantity: f64,
    cost_first_thousand: f64,
    cost_next_thousand: f64,
) -> Decimal {
    let thousands = round_money(to_decimal(quantity) / Decimal::ONE_THOUSAND);
    let first = to_decimal(cost_first_thousand);
    let next = to_decimal(cost_next_thousand);
    if thousands >= Decimal::ONE {
        (thousands - Decimal::ONE) * next + first
    } else {
        first * thousands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_decimal_precision() {
        // Classic floating point problem: 0.1 + 0.2 != 0.3
        let sum = to_decimal(0.1) + to_decimal(0.2);
        assert_eq!(to_f64(sum), 0.3);
    }

    #[test]
    fn test_to_decimal_non_finite_becomes_zero() {
        assert_eq!(to_decimal(f64::NAN), Decimal::ZERO);
        assert_eq!(to_decimal(f64::INFINITY), Decimal::ZERO);
        assert_eq!(to_decimal(f64::NEG_INFINITY), Decimal::ZERO);
    }

    #[test]
    fn test_rounding_half_up() {
        assert_eq!(to_f64(Decimal::new(5, 3)), 0.01); // 0.005 rounds up
        assert_eq!(to_f64(Decimal::new(4, 3)), 0.0); // 0.004 rounds down
    }

    #[test]
    fn test_tiered_below_one_thousand() {
        // Prorated first-thousand price
        assert_eq!(to_f64(tiered_thousands_cost(500.0, 100.0, 80.0)), 50.0);
    }

    #[test]
    fn test_tiered_exactly_one_thousand() {
        assert_eq!(to_f64(tiered_thousands_cost(1000.0, 100.0, 80.0)), 100.0);
    }

    #[test]
    fn test_tiered_above_one_thousand() {
        assert_eq!(to_f64(tiered_thousands_cost(1500.0, 100.0, 80.0)), 140.0);
        assert_eq!(to_f64(tiered_thousands_cost(2000.0, 100.0, 80.0)), 180.0);
    }

    #[test]
    fn test_tiered_zero_quantity() {
        assert_eq!(to_f64(tiered_thousands_cost(0.0, 100.0, 80.0)), 0.0);
    }

    #[test]
    fn test_tiered_invalid_inputs_coerce_to_zero() {
        assert_eq!(to_f64(tiered_thousands_cost(f64::NAN, 100.0, 80.0)), 0.0);
        assert_eq!(
            to_f64(tiered_thousands_cost(1500.0, f64::INFINITY, 80.0)),
            40.0
        );
    }
}
