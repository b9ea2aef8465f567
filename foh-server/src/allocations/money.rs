//! Money calculation utilities using rust_decimal for precision
//!
//! All monetary arithmetic is done in `Decimal` and rounded to two places;
//! amounts are stored and serialized as `f64` of the rounded value. Totals
//! are always recomputed from source rows, never adjusted incrementally,
//! so repeated add/remove cycles cannot accumulate drift.

use rust_decimal::prelude::*;

use super::AllocationError;

/// Rounding for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed quantity per line item
pub const MAX_QUANTITY: i32 = 9999;

pub(super) fn validate_quantity(quantity: i32) -> Result<(), AllocationError> {
    if quantity < 1 {
        return Err(AllocationError::InvalidQuantity(quantity));
    }
    if quantity > MAX_QUANTITY {
        return Err(AllocationError::InvalidInput(format!(
            "Quantity exceeds maximum allowed ({MAX_QUANTITY}), got {quantity}"
        )));
    }
    Ok(())
}

fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

fn round(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(0.0)
}

/// quantity x unit price, rounded
pub fn line_subtotal(unit_price: f64, quantity: i32) -> f64 {
    round(to_decimal(unit_price) * Decimal::from(quantity))
}

/// Sum of (unit_price, quantity) pairs, computed in `Decimal`
pub fn sum_lines(lines: &[(f64, i32)]) -> f64 {
    let total = lines
        .iter()
        .fold(Decimal::ZERO, |acc, (unit_price, quantity)| {
            acc + to_decimal(*unit_price) * Decimal::from(*quantity)
        });
    round(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subtotal_is_quantity_times_price() {
        assert_eq!(line_subtotal(850.0, 2), 1700.0);
        assert_eq!(line_subtotal(350.0, 1), 350.0);
    }

    #[test]
    fn fractional_prices_do_not_drift() {
        // 0.1 + 0.2 style inputs stay exact in Decimal
        assert_eq!(line_subtotal(0.1, 3), 0.3);
        assert_eq!(sum_lines(&[(0.1, 1), (0.2, 1)]), 0.3);
        // Many small lines still sum exactly
        let lines: Vec<(f64, i32)> = (0..100).map(|_| (0.01, 1)).collect();
        assert_eq!(sum_lines(&lines), 1.0);
    }

    #[test]
    fn summation_order_does_not_matter() {
        let forward = [(19.99, 3), (4.55, 7), (0.05, 13)];
        let reverse = [(0.05, 13), (4.55, 7), (19.99, 3)];
        assert_eq!(sum_lines(&forward), sum_lines(&reverse));
    }

    #[test]
    fn quantity_bounds_are_enforced() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(MAX_QUANTITY).is_ok());
        assert!(matches!(
            validate_quantity(0),
            Err(AllocationError::InvalidQuantity(0))
        ));
        assert!(matches!(
            validate_quantity(-2),
            Err(AllocationError::InvalidQuantity(-2))
        ));
        assert!(validate_quantity(MAX_QUANTITY + 1).is_err());
    }
}
