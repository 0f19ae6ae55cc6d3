//! Money

use rusty_money::{Money, iso};

/// Minor currency units (paise).
pub type Minor = u64;

/// The storefront trades in Indian Rupees.
pub const CURRENCY: &iso::Currency = iso::INR;

/// ISO alpha code of the storefront currency.
pub const CURRENCY_CODE: &str = "INR";

/// Wrap a minor-unit amount in the storefront currency for formatting.
///
/// Amounts beyond `i64` paise are not representable by the money type and
/// saturate rather than wrap.
pub fn inr(minor: Minor) -> Money<'static, iso::Currency> {
    let minor = i64::try_from(minor).unwrap_or(i64::MAX);

    Money::from_minor(minor, CURRENCY)
}

/// Format a minor-unit amount as a display string, e.g. `₹2,500.00`.
pub fn format_inr(minor: Minor) -> String {
    inr(minor).to_string()
}
