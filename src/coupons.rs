//! Coupons
//!
//! Percentage discount codes with a usage cap. Coupons are fetched fresh from
//! the backend per checkout session and validated at apply-time only; the
//! apply/redeem race between concurrent shoppers is a known, accepted gap.

use std::cell::RefCell;

use mockall::automock;
use rustc_hash::FxHashMap;
use thiserror::Error;

/// Errors applying a coupon. All are validation errors: the cart and any
/// previously applied coupon are left untouched.
#[derive(Debug, Error)]
pub enum CouponError {
    /// No active coupon matches the code.
    #[error("invalid coupon code")]
    UnknownCode,

    /// The coupon exists but has been deactivated.
    #[error("coupon is no longer active")]
    Inactive,

    /// The coupon has been redeemed as many times as it allows.
    #[error("coupon usage limit exceeded")]
    UsageLimitExceeded,

    /// Discount percentages live in `[0, 100]`.
    #[error("discount percentage must be between 0 and 100, got {0}")]
    InvalidPercentage(u8),

    /// The backend lookup itself failed.
    #[error(transparent)]
    Lookup(#[from] CouponLookupError),
}

/// A failed backend coupon fetch.
#[derive(Debug, Error)]
#[error("coupon lookup failed: {0}")]
pub struct CouponLookupError(pub String);

/// A percentage in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscountPercentage(u8);

impl DiscountPercentage {
    /// Validate a raw percentage.
    ///
    /// # Errors
    ///
    /// Returns [`CouponError::InvalidPercentage`] for values above 100.
    pub fn new(value: u8) -> Result<Self, CouponError> {
        if value > 100 {
            return Err(CouponError::InvalidPercentage(value));
        }

        Ok(Self(value))
    }

    /// The raw percentage value.
    pub fn value(self) -> u8 {
        self.0
    }
}

/// A coupon record as fetched from the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Coupon {
    /// The uppercase coupon code.
    pub code: String,

    /// Discount applied to the cart subtotal.
    pub discount_percentage: DiscountPercentage,

    /// Whether the coupon is currently redeemable at all.
    pub active: bool,

    /// How many redemptions the coupon allows in total.
    pub usage_limit: u32,

    /// How many redemptions have already happened.
    pub used_count: u32,
}

impl Coupon {
    /// Whether every allowed redemption has been used.
    pub fn is_exhausted(&self) -> bool {
        self.used_count >= self.usage_limit
    }
}

/// Backend source of coupon records, keyed by exact code match.
#[automock]
pub trait CouponSource {
    /// Fetch the coupon with the given (already normalised) code.
    ///
    /// # Errors
    ///
    /// Returns [`CouponLookupError`] if the backend call itself failed.
    fn fetch(&self, code: &str) -> Result<Option<Coupon>, CouponLookupError>;
}

/// Normalise a user-entered code the way the backend stores them.
pub fn normalise_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Fetch and validate a coupon for the current checkout session.
///
/// # Errors
///
/// - [`CouponError::UnknownCode`]: no coupon matches the code.
/// - [`CouponError::Inactive`]: the coupon has been deactivated.
/// - [`CouponError::UsageLimitExceeded`]: `used_count` has reached the cap.
/// - [`CouponError::Lookup`]: the backend call failed.
pub fn apply_coupon(source: &dyn CouponSource, code: &str) -> Result<Coupon, CouponError> {
    let code = normalise_code(code);
    let coupon = source.fetch(&code)?.ok_or(CouponError::UnknownCode)?;

    if !coupon.active {
        return Err(CouponError::Inactive);
    }

    if coupon.is_exhausted() {
        return Err(CouponError::UsageLimitExceeded);
    }

    Ok(coupon)
}

/// In-memory coupon table for tests and demos.
#[derive(Debug, Default)]
pub struct InMemoryCoupons {
    coupons: RefCell<FxHashMap<String, Coupon>>,
}

impl InMemoryCoupons {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a coupon, keyed by its code.
    pub fn insert(&self, coupon: Coupon) {
        self.coupons
            .borrow_mut()
            .insert(coupon.code.clone(), coupon);
    }
}

impl CouponSource for InMemoryCoupons {
    fn fetch(&self, code: &str) -> Result<Option<Coupon>, CouponLookupError> {
        Ok(self.coupons.borrow().get(code).cloned())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn first_five() -> Coupon {
        Coupon {
            code: "FIRST5".to_owned(),
            discount_percentage: DiscountPercentage(10),
            active: true,
            usage_limit: 100,
            used_count: 5,
        }
    }

    #[test]
    fn apply_accepts_an_active_coupon() -> TestResult {
        let source = InMemoryCoupons::new();
        source.insert(first_five());

        let coupon = apply_coupon(&source, "first5")?;

        assert_eq!(coupon.code, "FIRST5");
        assert_eq!(coupon.discount_percentage.value(), 10);

        Ok(())
    }

    #[test]
    fn apply_normalises_whitespace_and_case() -> TestResult {
        let source = InMemoryCoupons::new();
        source.insert(first_five());

        let coupon = apply_coupon(&source, "  First5 ")?;

        assert_eq!(coupon.code, "FIRST5");

        Ok(())
    }

    #[test]
    fn unknown_code_is_rejected() {
        let source = InMemoryCoupons::new();

        assert!(matches!(
            apply_coupon(&source, "NOPE"),
            Err(CouponError::UnknownCode)
        ));
    }

    #[test]
    fn inactive_coupon_is_rejected() {
        let source = InMemoryCoupons::new();
        source.insert(Coupon {
            active: false,
            ..first_five()
        });

        assert!(matches!(
            apply_coupon(&source, "FIRST5"),
            Err(CouponError::Inactive)
        ));
    }

    #[test]
    fn exhausted_coupon_is_rejected() {
        let source = InMemoryCoupons::new();
        source.insert(Coupon {
            usage_limit: 5,
            used_count: 5,
            ..first_five()
        });

        assert!(matches!(
            apply_coupon(&source, "FIRST5"),
            Err(CouponError::UsageLimitExceeded)
        ));
    }

    #[test]
    fn lookup_failure_is_surfaced() {
        let mut source = MockCouponSource::new();
        source
            .expect_fetch()
            .returning(|_| Err(CouponLookupError("backend unreachable".to_owned())));

        assert!(matches!(
            apply_coupon(&source, "FIRST5"),
            Err(CouponError::Lookup(_))
        ));
    }

    #[test]
    fn percentage_above_hundred_is_invalid() {
        assert!(matches!(
            DiscountPercentage::new(101),
            Err(CouponError::InvalidPercentage(101))
        ));
        assert!(DiscountPercentage::new(100).is_ok());
    }
}
