//! Vitrine prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    analytics::{AnalyticsEvent, AnalyticsSink, LogAnalytics, NoopAnalytics, RecordingAnalytics},
    cart::{
        AddOutcome, CartCommand, CartLine, CartState, LineKey, MAX_QUANTITY, MIN_QUANTITY,
        clamp_quantity,
        records::{CartLineRecord, CartRecord},
        store::CartStore,
    },
    checkout::{CheckoutError, CheckoutFlow, CheckoutPhase, GatewayEvent, GatewayRequest},
    config::{ConfigError, StoreConfig},
    coupons::{
        Coupon, CouponError, CouponLookupError, CouponSource, DiscountPercentage, InMemoryCoupons,
        apply_coupon,
    },
    money::{CURRENCY, CURRENCY_CODE, Minor, format_inr, inr},
    notifications::{NoopSender, NotificationError, NotificationSender, confirmation_body},
    orders::{CompletedOrder, CustomerInfo, OrderDraft, OrderId, OrderItem, ValidationError},
    pricing::{PricingRules, Quote, quote, quote_cart},
    products::{ProductId, ProductRef},
    receipt::Invoice,
    remote::{CartSync, InMemoryCartSync, SyncError, SyncKey, mirror_cart},
    storage::{CartStorage, InMemoryStorage, JsonFileStorage, StorageError},
    wishlist::{InMemoryWishlist, WishlistError, WishlistStore, toggle},
};
