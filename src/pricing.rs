//! Pricing
//!
//! The checkout pricing pipeline: a pure derivation from the cart subtotal,
//! an optional coupon and the shipping-threshold rule. Steps run in a fixed
//! order with no alternative tie-breaks:
//!
//! 1. percentage discount, rounded half-away-from-zero
//! 2. discounted subtotal
//! 3. threshold shipping
//! 4. payable total

use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::ToPrimitive,
};
use serde::Deserialize;

use crate::{cart::CartState, coupons::Coupon, money::Minor};

/// Free-shipping threshold in minor units (₹2,000).
pub const FREE_SHIPPING_THRESHOLD: Minor = 2000_00;

/// Flat shipping fee below the threshold, in minor units (₹55).
pub const FLAT_SHIPPING_FEE: Minor = 55_00;

/// The shipping rule applied to a discounted subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PricingRules {
    /// Orders at or above this discounted subtotal ship free.
    pub free_shipping_threshold: Minor,

    /// Flat fee charged below the threshold.
    pub flat_shipping_fee: Minor,
}

impl Default for PricingRules {
    fn default() -> Self {
        Self {
            free_shipping_threshold: FREE_SHIPPING_THRESHOLD,
            flat_shipping_fee: FLAT_SHIPPING_FEE,
        }
    }
}

/// Derived checkout pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Quote {
    /// Cart subtotal before any adjustment.
    pub subtotal: Minor,

    /// Coupon discount taken off the subtotal.
    pub discount: Minor,

    /// Subtotal after the discount.
    pub discounted_subtotal: Minor,

    /// Shipping charge after the threshold rule.
    pub shipping: Minor,

    /// Final payable amount.
    pub total: Minor,
}

/// Derive the payable amount from a subtotal, an optional applied coupon and
/// the shipping rule.
pub fn quote(subtotal: Minor, coupon: Option<&Coupon>, rules: &PricingRules) -> Quote {
    let discount = match coupon {
        Some(coupon) => percentage_of(subtotal, coupon.discount_percentage.value()),
        None => 0,
    };

    let discounted_subtotal = subtotal.saturating_sub(discount);

    let shipping = if discounted_subtotal >= rules.free_shipping_threshold {
        0
    } else {
        rules.flat_shipping_fee
    };

    Quote {
        subtotal,
        discount,
        discounted_subtotal,
        shipping,
        total: discounted_subtotal + shipping,
    }
}

/// Derive pricing straight from a cart.
pub fn quote_cart(cart: &CartState, coupon: Option<&Coupon>, rules: &PricingRules) -> Quote {
    quote(cart.total(), coupon, rules)
}

/// `round(amount × percent / 100)`, half away from zero.
fn percentage_of(amount: Minor, percent: u8) -> Minor {
    let applied = Decimal::from(amount) * Decimal::from(percent) / Decimal::from(100_u8);

    // percent ≤ 100, so the rounded product never exceeds the original amount.
    applied
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .unwrap_or(amount)
}
