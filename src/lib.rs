//! Vitrine
//!
//! Commerce core for a jewellery storefront: cart state with durable
//! persistence, coupon validation, checkout pricing, order drafts, the
//! payment-confirmation state machine, and receipt rendering. External
//! collaborators (storage, analytics, coupon backend, notifications, the
//! cart mirror) sit behind injectable ports with in-memory fakes.

pub mod analytics;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod coupons;
pub mod money;
pub mod notifications;
pub mod orders;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod receipt;
pub mod remote;
pub mod storage;
pub mod wishlist;
