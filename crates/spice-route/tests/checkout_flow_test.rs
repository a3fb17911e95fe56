use chrono::{TimeZone, Utc};
use spice_route::cart_actor::CartError;
use spice_route::config::SpiceConfig;
use spice_route::fixtures;
use spice_route::lifecycle::{CheckoutRequest, SpiceSystem, SystemError};
use spice_route::model::{MenuItemId, OrderId};
use spice_route::pricing::{DeliveryWindow, PromoError};
use spice_route::status::OrderStatus;
use spice_route::storage::{FileStore, KeyValueStore, MemoryStore, PersistedPromo, CART_KEY};
use spice_route::tracking::ManualClock;
use std::sync::Arc;

fn clock() -> Arc<ManualClock> {
    // 10:00 in Chennai.
    Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 1, 20, 4, 30, 0).unwrap(),
    ))
}

async fn system(store: Arc<dyn KeyValueStore>) -> SpiceSystem {
    SpiceSystem::new(SpiceConfig::default(), store, clock())
        .await
        .unwrap()
}

fn request(window: DeliveryWindow) -> CheckoutRequest {
    CheckoutRequest {
        address: fixtures::home_address(),
        window,
        payment_method: "Google Pay".into(),
        special_instructions: None,
    }
}

#[tokio::test]
async fn checkout_with_welcome10_prices_and_places_the_order() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let system = system(store.clone()).await;

    system.add_to_cart(MenuItemId::from("rice-1"), 2).await.unwrap();
    let cart = system
        .add_to_cart(MenuItemId::from("breakfast-1"), 1)
        .await
        .unwrap();
    assert_eq!(cart.subtotal(), 747);
    assert_eq!(cart.item_count(), 3);

    let redemption = system.apply_promo("welcome10").await.unwrap();
    assert_eq!(redemption.discount, 75);
    assert!(PersistedPromo::new(store.clone()).load().is_some());

    let order = system.checkout(request(DeliveryWindow::Asap)).await.unwrap();
    assert_eq!(order.id, OrderId::from(7));
    assert_eq!(order.order_number, "SR240007");
    assert_eq!(order.status(), OrderStatus::Confirmed);
    assert_eq!(order.pricing.delivery_fee, 0);
    assert_eq!(order.pricing.tax, 37);
    assert_eq!(order.pricing.discount, 75);
    assert_eq!(order.pricing.total, 709);
    assert_eq!(order.items.len(), 2);

    // The cart is emptied and the promo consumed.
    assert!(system.current_cart().await.unwrap().is_empty());
    assert!(system.applied_promo().is_none());
    assert_eq!(store.get(CART_KEY).unwrap().as_deref(), Some("[]"));

    // The new order is now the newest active one.
    let active = system.orders.active_order().await.unwrap().unwrap();
    assert_eq!(active.id, order.id);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn scheduled_off_peak_slot_adds_the_surcharge() {
    let system = system(Arc::new(MemoryStore::new())).await;
    system.add_to_cart(MenuItemId::from("snack-1"), 1).await.unwrap();

    let slots = system.delivery_slots();
    assert_eq!(slots.len(), 21);
    // 9-11 tomorrow: off-peak.
    let window = system.choose_slot("1-0").unwrap();
    let asap = system.quote(&DeliveryWindow::Asap).await.unwrap();
    let scheduled = system.quote(&window).await.unwrap();
    assert_eq!(scheduled.delivery_fee, asap.delivery_fee + 29);

    // At 10:00 the 11-13 slot today is too close.
    assert!(matches!(
        system.choose_slot("0-1"),
        Err(SystemError::Slot(_))
    ));

    let order = system.checkout(request(window)).await.unwrap();
    assert_eq!(order.pricing, scheduled);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn checkout_rejects_an_empty_cart_and_bad_promos() {
    let system = system(Arc::new(MemoryStore::new())).await;

    assert!(matches!(
        system.checkout(request(DeliveryWindow::Asap)).await,
        Err(SystemError::EmptyCart)
    ));

    system.add_to_cart(MenuItemId::from("dessert-1"), 1).await.unwrap();
    assert!(matches!(
        system.apply_promo("SAVE50").await,
        Err(SystemError::Promo(PromoError::BelowMinimum { minimum: 300, .. }))
    ));
    assert!(matches!(
        system.apply_promo("FREEFOOD").await,
        Err(SystemError::Promo(PromoError::Unknown(_)))
    ));
    assert!(system.applied_promo().is_none());

    assert!(matches!(
        system.add_to_cart(MenuItemId::from("rice-99"), 1).await,
        Err(SystemError::Cart(CartError::UnknownItem(_)))
    ));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn cart_survives_a_restart_on_the_file_store() {
    let dir = tempfile::tempdir().unwrap();

    {
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(dir.path()).unwrap());
        let system = system(store).await;
        system.add_to_cart(MenuItemId::from("rice-3"), 2).await.unwrap();
        system
            .cart
            .set_quantity(system.cart_id(), MenuItemId::from("rice-3"), 3)
            .await
            .unwrap();
        system.shutdown().await.unwrap();
    }

    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(dir.path()).unwrap());
    let system = system(store).await;
    let cart = system.current_cart().await.unwrap();
    assert_eq!(cart.lines.len(), 1);
    assert_eq!(cart.lines[0].id, MenuItemId::from("rice-3"));
    assert_eq!(cart.lines[0].quantity, 3);
    assert_eq!(cart.subtotal(), 747);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn corrupt_cart_blob_starts_empty() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    store.set(CART_KEY, "{ definitely not a cart").unwrap();

    let system = system(store.clone()).await;
    assert!(system.current_cart().await.unwrap().is_empty());
    // Opening the cart rewrote the blob.
    assert_eq!(store.get(CART_KEY).unwrap().as_deref(), Some("[]"));

    system.shutdown().await.unwrap();
}
