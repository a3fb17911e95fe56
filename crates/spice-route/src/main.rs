//! # Spice Route demo
//!
//! Walks one order end to end against the in-process system:
//!
//! 1. Browse the menu and fill the cart.
//! 2. Apply `WELCOME10` and check out.
//! 3. Move the order out for delivery and track it against a feed that never answers,
//!    until tracking falls back to simulated motion.
//! 4. Print the map layout and shut down.
//!
//! Usage: `spice-route [config.json]`. See [`spice_route::config`] for the environment
//! overrides.

use spice_actors::tracing::setup_tracing;
use spice_route::catalog::{self, MenuFilter};
use spice_route::config::SpiceConfig;
use spice_route::fixtures;
use spice_route::lifecycle::{CheckoutRequest, SpiceSystem, SystemError};
use spice_route::model::{Category, MenuItemId, OrderId};
use spice_route::pricing::DeliveryWindow;
use spice_route::projection::MapProjector;
use spice_route::status::OrderStatus;
use spice_route::storage::{FileStore, KeyValueStore, MemoryStore};
use spice_route::tracking::{FeedError, Notice, ScriptedFeed, SystemClock};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config_path = std::env::args().nth(1);
    let config = SpiceConfig::load(config_path.as_deref().map(Path::new)).map_err(|e| e.to_string())?;

    let store: Arc<dyn KeyValueStore> = match &config.storage_dir {
        Some(dir) => Arc::new(FileStore::open(dir).map_err(|e| e.to_string())?),
        None => Arc::new(MemoryStore::new()),
    };
    let map_config = config.map.clone();
    let system = SpiceSystem::new(config, store, Arc::new(SystemClock))
        .await
        .map_err(|e| e.to_string())?;

    let span = tracing::info_span!("browse");
    async {
        let filter = MenuFilter {
            category: Some(Category::Rice),
            ..MenuFilter::default()
        };
        let rice = catalog::browse(&system.menu, &filter).await?;
        info!(dishes = rice.len(), "Rice dishes on the menu");

        system.add_to_cart(MenuItemId::from("rice-1"), 2).await?;
        let cart = system.add_to_cart(MenuItemId::from("breakfast-1"), 1).await?;
        info!(items = cart.item_count(), subtotal = cart.subtotal(), "Cart filled");
        Ok::<_, SystemError>(())
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    let span = tracing::info_span!("checkout");
    let order = async {
        let redemption = system.apply_promo("WELCOME10").await?;
        info!(discount = redemption.discount, "Promo accepted");

        let quote = system.quote(&DeliveryWindow::Asap).await?;
        info!(?quote, "Quote");

        system
            .checkout(CheckoutRequest {
                address: fixtures::home_address(),
                window: DeliveryWindow::Asap,
                payment_method: "Google Pay".into(),
                special_instructions: Some("Extra raita please".into()),
            })
            .await
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;
    info!(order_id = %order.id, order_number = %order.order_number, total = order.pricing.total, "Order placed");

    let span = tracing::info_span!("dispatch", order_id = %order.id);
    async {
        while !out_for_delivery(&system, &order.id).await? {
            let update = system.orders.advance(order.id.clone(), None, None).await?;
            info!(status = %update.status, "Status advanced");
        }
        system
            .orders
            .assign_driver(order.id.clone(), fixtures::delivery_person())
            .await?;
        system
            .orders
            .attach_tracking(order.id.clone(), fixtures::tracking_info())
            .await?;
        Ok::<_, SystemError>(())
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    let feed = Arc::new(ScriptedFeed::failing(FeedError::Unavailable(
        "demo feed offline".into(),
    )));
    let mut tracker = system
        .track(order.id.clone(), feed)
        .await
        .map_err(|e| e.to_string())?;

    let wait = async {
        while let Some(notice) = tracker.next_notice().await {
            info!(?notice, "Tracking notice");
            if notice == Notice::SimulatedTracking {
                break;
            }
        }
    };
    if tokio::time::timeout(Duration::from_secs(30), wait).await.is_err() {
        warn!("Tracking did not degrade in time");
    }

    let state = tracker.stop().await;
    let mut projector = MapProjector::new(map_config);
    let layout = projector.layout(&state);
    let rendered = serde_json::to_string_pretty(layout).map_err(|e| e.to_string())?;
    println!("{rendered}");

    system.shutdown().await.map_err(|e| e.to_string())?;
    info!("Demo completed");
    Ok(())
}

async fn out_for_delivery(system: &SpiceSystem, id: &OrderId) -> Result<bool, SystemError> {
    let order = system.orders.order(id.clone()).await?;
    Ok(order.status() == OrderStatus::OutForDelivery)
}
