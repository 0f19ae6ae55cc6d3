//! End-to-end checkout: cart → coupon → pricing → gateway → receipt.

use jiff::Timestamp;
use testresult::TestResult;

use vitrine::{
    analytics::{AnalyticsEvent, RecordingAnalytics},
    cart::{CartLine, LineKey, store::CartStore},
    checkout::{CheckoutError, CheckoutFlow, CheckoutPhase, GatewayEvent},
    coupons::{Coupon, CouponError, DiscountPercentage, InMemoryCoupons, apply_coupon},
    notifications::{NoopSender, confirmation_body},
    orders::{CustomerInfo, OrderDraft, OrderId},
    pricing::{PricingRules, quote_cart},
    products::ProductId,
    receipt::Invoice,
    storage::InMemoryStorage,
};

fn line(id: &str, name: &str, price: u64, quantity: u32, size: Option<&str>) -> CartLine {
    CartLine {
        product_id: ProductId::new(id),
        name: name.to_owned(),
        unit_price: price,
        image: format!("/images/{id}.jpg"),
        quantity,
        size: size.map(str::to_owned),
        category: Some("jewellery".to_owned()),
    }
}

fn customer() -> CustomerInfo {
    CustomerInfo {
        name: "Asha Patel".to_owned(),
        email: "asha@example.com".to_owned(),
        phone: "+91 9000000000".to_owned(),
        address: "12 Marine Drive".to_owned(),
        city: "Ahmedabad".to_owned(),
        state: "Gujarat".to_owned(),
        postal_code: "380001".to_owned(),
    }
}

fn coupon_table() -> InMemoryCoupons {
    let coupons = InMemoryCoupons::new();

    coupons.insert(Coupon {
        code: "FIRST5".to_owned(),
        discount_percentage: DiscountPercentage::new(10)
            .unwrap_or_else(|_| unreachable!("10 is a valid percentage")),
        active: true,
        usage_limit: 100,
        used_count: 5,
    });

    coupons
}

#[test]
fn full_checkout_with_coupon_and_free_shipping() -> TestResult {
    let slot = InMemoryStorage::new();
    let analytics = RecordingAnalytics::new();
    let events = analytics.clone();

    let mut store = CartStore::open(slot.clone(), analytics);

    store.add_item(line("ring-001", "Oxidised Silver Ring", 2500_00, 1, Some("6")));
    store.add_item(line("pendant-002", "Moonstone Pendant", 1800_00, 2, None));

    assert_eq!(store.total(), 6100_00);

    // Coupon fetched fresh for this session.
    let coupon = apply_coupon(&coupon_table(), "first5")?;
    let pricing = quote_cart(store.state(), Some(&coupon), &PricingRules::default());

    assert_eq!(pricing.discount, 610_00);
    assert_eq!(pricing.shipping, 0);
    assert_eq!(pricing.total, 5490_00);

    let draft = OrderDraft::assemble(
        OrderId::generate("VN", Timestamp::UNIX_EPOCH),
        store.lines(),
        pricing,
        customer(),
        Timestamp::UNIX_EPOCH,
    )?;

    let mut flow = CheckoutFlow::new();
    let request = flow.begin(draft, &store)?;

    assert_eq!(request.amount, 5490_00);
    assert_eq!(request.currency, "INR");

    let completed = flow.on_gateway_event(
        GatewayEvent::Success {
            payment_ref: "pay_9f3k2".to_owned(),
        },
        &mut store,
        &NoopSender,
    )?;

    // Success clears the cart and the durable slot behind it.
    assert!(store.is_empty());
    assert_eq!(slot.snapshot().map(|r| r.items.len()), Some(0));

    // The completed order still carries the full snapshot.
    assert_eq!(completed.order().items.len(), 2);
    assert_eq!(completed.order().pricing.total, 5490_00);

    // Signals: two inserts, one begin-checkout, one purchase.
    let events = events.events();

    assert_eq!(
        events
            .iter()
            .filter(|e| matches!(e, AnalyticsEvent::ItemAdded { .. }))
            .count(),
        2
    );
    assert!(events.iter().any(|e| matches!(
        e,
        AnalyticsEvent::BeginCheckout {
            line_count: 2,
            total: 5490_00
        }
    )));
    assert!(events.iter().any(|e| matches!(
        e,
        AnalyticsEvent::Purchase { total: 5490_00, .. }
    )));

    // Confirmation and invoice both derive from the same snapshot.
    let body = confirmation_body(&completed);

    assert!(body.contains("Moonstone Pendant"));
    assert!(body.contains("pay_9f3k2"));

    let invoice = Invoice::from_order(&completed, "Vitrine");

    assert!(invoice.text().contains("Oxidised Silver Ring"));
    assert_eq!(invoice.filename(), "invoice-VN000000.txt");

    Ok(())
}

#[test]
fn failed_payment_leaves_cart_for_resubmission() -> TestResult {
    let slot = InMemoryStorage::new();
    let mut store = CartStore::open(slot.clone(), RecordingAnalytics::new());

    store.add_item(line("ring-001", "Oxidised Silver Ring", 1500_00, 1, None));

    let pricing = quote_cart(store.state(), None, &PricingRules::default());

    assert_eq!(pricing.shipping, 55_00, "below the free-shipping threshold");
    assert_eq!(pricing.total, 1555_00);

    let mut flow = CheckoutFlow::new();

    let draft = OrderDraft::assemble(
        OrderId::generate("VN", Timestamp::UNIX_EPOCH),
        store.lines(),
        pricing,
        customer(),
        Timestamp::UNIX_EPOCH,
    )?;

    flow.begin(draft, &store)?;

    let result = flow.on_gateway_event(
        GatewayEvent::Failed {
            reason: "card declined".to_owned(),
        },
        &mut store,
        &NoopSender,
    );

    assert!(matches!(result, Err(CheckoutError::PaymentFailed { .. })));
    assert_eq!(store.total(), 1500_00, "cart must survive a failure");
    assert_eq!(
        slot.snapshot().map(|r| r.items.len()),
        Some(1),
        "durable slot must keep the cart too"
    );

    // User-initiated retry goes straight through.
    flow.retry()?;

    let pricing = quote_cart(store.state(), None, &PricingRules::default());
    let draft = OrderDraft::assemble(
        OrderId::generate("VN", Timestamp::UNIX_EPOCH),
        store.lines(),
        pricing,
        customer(),
        Timestamp::UNIX_EPOCH,
    )?;

    let request = flow.begin(draft, &store)?;

    assert_eq!(request.amount, 1555_00);
    assert_eq!(flow.phase(), CheckoutPhase::AwaitingGateway);

    Ok(())
}

#[test]
fn exhausted_coupon_is_rejected_and_pricing_unchanged() -> TestResult {
    let coupons = InMemoryCoupons::new();

    coupons.insert(Coupon {
        code: "FIRST5".to_owned(),
        discount_percentage: DiscountPercentage::new(10)
            .unwrap_or_else(|_| unreachable!("10 is a valid percentage")),
        active: true,
        usage_limit: 5,
        used_count: 5,
    });

    let mut store = CartStore::open(InMemoryStorage::new(), RecordingAnalytics::new());
    store.add_item(line("ring-001", "Oxidised Silver Ring", 2500_00, 1, None));

    let result = apply_coupon(&coupons, "FIRST5");

    assert!(matches!(result, Err(CouponError::UsageLimitExceeded)));

    // Checkout proceeds at full price, exactly as if no code was entered.
    let pricing = quote_cart(store.state(), None, &PricingRules::default());

    assert_eq!(pricing.discount, 0);
    assert_eq!(pricing.total, 2500_00);
    assert_eq!(store.total(), 2500_00);

    Ok(())
}

#[test]
fn cart_survives_across_sessions_via_the_slot() -> TestResult {
    let slot = InMemoryStorage::new();

    {
        let mut store = CartStore::open(slot.clone(), RecordingAnalytics::new());
        store.add_item(line("ring-001", "Oxidised Silver Ring", 2500_00, 2, Some("6")));
    }

    // A new session over the same slot sees the same cart.
    let store = CartStore::open(slot, RecordingAnalytics::new());

    assert_eq!(store.total(), 5000_00);

    let key = LineKey::new(ProductId::new("ring-001"), Some("6".to_owned()));

    assert_eq!(store.state().line(&key).map(|l| l.quantity), Some(2));

    Ok(())
}
