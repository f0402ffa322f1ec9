use rust_decimal::{Decimal, RoundingStrategy};

/// Pure pricing rules shared by workshop operations, repair items, and invoices
pub struct PriceCalculator;

impl PriceCalculator {
    /// Round to 2 decimal places, half-up
    pub fn round2(value: Decimal) -> Decimal {
        value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Final sale price of a workshop operation: cost plus margin percentage
    ///
    /// final_price = round2(cost * (1 + margin / 100))
    pub fn final_price(cost: Decimal, margin_percent: Decimal) -> Decimal {
        Self::round2(cost * (Decimal::ONE + margin_percent / Decimal::from(100)))
    }

    /// Total for one repair order line item
    ///
    /// line_total = round2(unit_price * quantity)
    pub fn line_total(unit_price: Decimal, quantity: i32) -> Decimal {
        Self::round2(unit_price * Decimal::from(quantity))
    }

    /// Total price of a repair order: sum of its line totals
    pub fn order_total(line_totals: &[Decimal]) -> Decimal {
        line_totals.iter().sum()
    }

    /// Invoice tax at the fixed 21% VAT rate
    pub fn tax(amount: Decimal) -> Decimal {
        Self::round2(amount * Decimal::new(21, 2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_final_price_basic() {
        // cost 15, margin 40% => 21.00
        assert_eq!(PriceCalculator::final_price(dec!(15), dec!(40)), dec!(21.00));
    }

    #[test]
    fn test_final_price_default_margin() {
        assert_eq!(PriceCalculator::final_price(dec!(10), dec!(30)), dec!(13.00));
    }

    #[test]
    fn test_final_price_rounds_half_up() {
        // 10.01 * 1.125 = 11.26125 -> 11.26
        assert_eq!(
            PriceCalculator::final_price(dec!(10.01), dec!(12.5)),
            dec!(11.26)
        );
        // 2.00 * 1.2275 = 2.455 -> 2.46 (half-up on the midpoint)
        assert_eq!(
            PriceCalculator::final_price(dec!(2.00), dec!(22.75)),
            dec!(2.46)
        );
    }

    #[test]
    fn test_final_price_zero_margin() {
        assert_eq!(PriceCalculator::final_price(dec!(9.99), dec!(0)), dec!(9.99));
    }

    #[test]
    fn test_line_total_basic() {
        assert_eq!(PriceCalculator::line_total(dec!(20), 2), dec!(40.00));
    }

    #[test]
    fn test_line_total_single_quantity() {
        assert_eq!(PriceCalculator::line_total(dec!(12.95), 1), dec!(12.95));
    }

    #[test]
    fn test_order_total_sums_line_totals() {
        let totals = vec![dec!(40.00), dec!(12.95), dec!(5.05)];
        assert_eq!(PriceCalculator::order_total(&totals), dec!(58.00));
    }

    #[test]
    fn test_order_total_empty_is_zero() {
        assert_eq!(PriceCalculator::order_total(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_tax_is_21_percent() {
        assert_eq!(PriceCalculator::tax(dec!(100)), dec!(21.00));
        assert_eq!(PriceCalculator::tax(dec!(40.00)), dec!(8.40));
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// finalPrice == round2(cost * (1 + margin/100)) for all cost >= 0, margin >= 0
        #[test]
        fn prop_final_price_matches_formula(
            cost_cents in 0u32..=1_000_000,
            margin_bp in 0u32..=20_000u32
        ) {
            let cost = Decimal::from(cost_cents) / Decimal::from(100);
            let margin = Decimal::from(margin_bp) / Decimal::from(100);

            let expected = PriceCalculator::round2(
                cost * (Decimal::ONE + margin / Decimal::from(100)),
            );
            prop_assert_eq!(PriceCalculator::final_price(cost, margin), expected);
        }

        /// lineTotal == round2(price * quantity) for all price >= 0, quantity >= 1
        #[test]
        fn prop_line_total_matches_formula(
            price_cents in 0u32..=1_000_000,
            quantity in 1i32..=1000
        ) {
            let price = Decimal::from(price_cents) / Decimal::from(100);
            let expected = PriceCalculator::round2(price * Decimal::from(quantity));
            prop_assert_eq!(PriceCalculator::line_total(price, quantity), expected);
        }

        /// Order totals are non-negative and equal the sum of line totals
        #[test]
        fn prop_order_total_is_sum(
            line_cents in prop::collection::vec(0u32..=100_000u32, 0..=20)
        ) {
            let totals: Vec<Decimal> = line_cents
                .iter()
                .map(|&c| Decimal::from(c) / Decimal::from(100))
                .collect();

            let total = PriceCalculator::order_total(&totals);
            let expected: Decimal = totals.iter().sum();
            prop_assert_eq!(total, expected);
            prop_assert!(total >= Decimal::ZERO);
        }

        /// Rounding is stable: applying round2 twice changes nothing
        #[test]
        fn prop_round2_is_idempotent(value_cents in 0i64..=10_000_000) {
            let value = Decimal::new(value_cents, 3);
            let rounded = PriceCalculator::round2(value);
            prop_assert_eq!(PriceCalculator::round2(rounded), rounded);
        }
    }
}
