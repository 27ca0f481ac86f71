//! Checkout pricing formulas.
//!
//! Fixed storefront policy: 10% tax on the item subtotal, flat $10
//! shipping waived at $100 and above.

use crate::error::CommerceError;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Tax rate applied to the item subtotal, in percent.
pub const TAX_RATE_PERCENT: f64 = 10.0;

/// Orders at or above this subtotal ship free.
pub const FREE_SHIPPING_THRESHOLD_CENTS: i64 = 100_00;

/// Flat shipping fee below the threshold.
pub const SHIPPING_FLAT_FEE_CENTS: i64 = 10_00;

/// Complete pricing breakdown for an order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CheckoutPricing {
    /// Sum of line totals.
    pub items_price: Money,
    /// Tax on the item subtotal.
    pub tax_price: Money,
    /// Shipping cost.
    pub shipping_price: Money,
    /// Final total (items + tax + shipping).
    pub total_price: Money,
}

impl CheckoutPricing {
    /// Compute the pricing breakdown from an item subtotal.
    pub fn compute(items_price: Money) -> Result<Self, CommerceError> {
        let tax_price = items_price.percentage(TAX_RATE_PERCENT);
        let shipping_price = if items_price.amount_cents >= FREE_SHIPPING_THRESHOLD_CENTS {
            Money::zero(items_price.currency)
        } else {
            Money::new(SHIPPING_FLAT_FEE_CENTS, items_price.currency)
        };
        let total_price = items_price
            .try_add(&tax_price)
            .and_then(|m| m.try_add(&shipping_price))
            .ok_or(CommerceError::Overflow)?;

        Ok(Self {
            items_price,
            tax_price,
            shipping_price,
            total_price,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn usd(cents: i64) -> Money {
        Money::new(cents, Currency::USD)
    }

    #[test]
    fn test_pricing_at_free_shipping_threshold() {
        // items = $100.00 -> tax $10.00, shipping free, total $110.00
        let pricing = CheckoutPricing::compute(usd(100_00)).unwrap();
        assert_eq!(pricing.tax_price.amount_cents, 10_00);
        assert_eq!(pricing.shipping_price.amount_cents, 0);
        assert_eq!(pricing.total_price.amount_cents, 110_00);
    }

    #[test]
    fn test_pricing_below_threshold() {
        // items = $40.00 -> tax $4.00, shipping $10.00, total $54.00
        let pricing = CheckoutPricing::compute(usd(40_00)).unwrap();
        assert_eq!(pricing.tax_price.amount_cents, 4_00);
        assert_eq!(pricing.shipping_price.amount_cents, 10_00);
        assert_eq!(pricing.total_price.amount_cents, 54_00);
    }

    #[test]
    fn test_pricing_just_under_threshold() {
        let pricing = CheckoutPricing::compute(usd(99_99)).unwrap();
        assert_eq!(pricing.shipping_price.amount_cents, 10_00);
    }

    #[test]
    fn test_total_is_sum_of_parts() {
        let pricing = CheckoutPricing::compute(usd(123_45)).unwrap();
        let sum = pricing.items_price.amount_cents
            + pricing.tax_price.amount_cents
            + pricing.shipping_price.amount_cents;
        assert_eq!(pricing.total_price.amount_cents, sum);
    }

    #[test]
    fn test_tax_rounds_to_nearest_cent() {
        // $0.05 subtotal -> half-cent tax rounds to $0.01
        let pricing = CheckoutPricing::compute(usd(5)).unwrap();
        assert_eq!(pricing.tax_price.amount_cents, 1);
    }
}
