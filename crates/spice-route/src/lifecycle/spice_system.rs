use super::SystemError;
use crate::cart_actor::{self, CartContext};
use crate::clients::{CartClient, MenuClient, OrderClient};
use crate::config::SpiceConfig;
use crate::fixtures;
use crate::menu_actor;
use crate::model::{
    Cart, CartCreate, CartId, DeliveryAddress, MenuItemId, Order, OrderCreate, OrderId, OrderItem,
};
use crate::order_actor::{self, OrderContext};
use crate::pricing::slots::{delivery_slots, find_slot};
use crate::pricing::{self, DeliverySlot, DeliveryWindow, PriceBreakdown, PromoCatalog, PromoCode};
use crate::pricing::promo::Redemption;
use crate::storage::{KeyValueStore, PersistedCart, PersistedPromo};
use crate::tracking::{spawn_tracking, Clock, FeedError, PositionFeed, ScriptedFeed, TrackingHandle};
use chrono::{Duration, NaiveDateTime};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info, instrument, warn};

/// What the shopper fills in on the checkout page.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub address: DeliveryAddress,
    pub window: DeliveryWindow,
    pub payment_method: String,
    pub special_instructions: Option<String>,
}

/// The running ordering core: actors, their clients, and the session state kept in the
/// key-value store.
pub struct SpiceSystem {
    pub menu: MenuClient,
    pub orders: OrderClient,
    pub cart: CartClient,
    cart_id: CartId,
    promos: PromoCatalog,
    applied_promo: PersistedPromo,
    config: SpiceConfig,
    clock: Arc<dyn Clock>,
    handles: Vec<JoinHandle<()>>,
}

impl SpiceSystem {
    /// Starts every actor, seeds the sample data and restores the persisted cart.
    pub async fn new(
        config: SpiceConfig,
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, SystemError> {
        let (menu_actor, menu_client) = menu_actor::new();
        let (order_actor, order_client) = order_actor::new();
        let (cart_actor, cart_client) = cart_actor::new();

        let menu = MenuClient::new(menu_client);
        let persisted_cart = PersistedCart::new(store.clone());

        let menu_handle = tokio::spawn(menu_actor.run(()));
        let order_handle = tokio::spawn(order_actor.run(OrderContext {
            menu: menu.clone(),
            clock: clock.clone(),
        }));
        let cart_handle = tokio::spawn(cart_actor.run(CartContext {
            menu: menu.clone(),
            store: persisted_cart.clone(),
        }));

        let orders = OrderClient::new(order_client);
        let cart = CartClient::new(cart_client);

        menu.seed(fixtures::menu_items()).await?;
        orders.seed(fixtures::orders()).await?;

        let lines = persisted_cart.load();
        let restored = lines.len();
        let cart_id = cart.open(CartCreate { lines }).await?;
        info!(%cart_id, restored, "System started");

        Ok(Self {
            menu,
            orders,
            cart,
            cart_id,
            promos: PromoCatalog::new(fixtures::promo_codes()),
            applied_promo: PersistedPromo::new(store),
            config,
            clock,
            handles: vec![menu_handle, order_handle, cart_handle],
        })
    }

    pub fn config(&self) -> &SpiceConfig {
        &self.config
    }

    pub fn promos(&self) -> &PromoCatalog {
        &self.promos
    }

    pub fn cart_id(&self) -> CartId {
        self.cart_id
    }

    pub async fn current_cart(&self) -> Result<Cart, SystemError> {
        Ok(self.cart.cart(self.cart_id).await?)
    }

    pub async fn add_to_cart(&self, item: MenuItemId, quantity: u32) -> Result<Cart, SystemError> {
        Ok(self.cart.add(self.cart_id, item, quantity).await?)
    }

    /// Validates `code` against the current cart and remembers it for checkout.
    #[instrument(skip(self))]
    pub async fn apply_promo(&self, code: &str) -> Result<Redemption, SystemError> {
        let subtotal = self.current_cart().await?.subtotal();
        let redemption = self.promos.redeem(code, subtotal)?;
        self.applied_promo.save(&redemption.promo)?;
        info!(code = %redemption.promo.code, discount = redemption.discount, "Promo applied");
        Ok(redemption)
    }

    pub fn applied_promo(&self) -> Option<PromoCode> {
        self.applied_promo.load()
    }

    pub fn remove_promo(&self) -> Result<(), SystemError> {
        Ok(self.applied_promo.clear()?)
    }

    /// Restaurant-local time, which is what delivery slots are laid out in.
    fn local_now(&self) -> NaiveDateTime {
        let offset = Duration::minutes(i64::from(self.config.pricing.utc_offset_minutes));
        self.clock.now().naive_utc() + offset
    }

    pub fn delivery_slots(&self) -> Vec<DeliverySlot> {
        delivery_slots(self.local_now())
    }

    /// Resolves a slot id from [`delivery_slots`](Self::delivery_slots).
    pub fn choose_slot(&self, id: &str) -> Result<DeliveryWindow, SystemError> {
        Ok(find_slot(self.local_now(), id)?)
    }

    /// Prices the current cart with the applied promo.
    pub async fn quote(&self, window: &DeliveryWindow) -> Result<PriceBreakdown, SystemError> {
        let subtotal = self.current_cart().await?.subtotal();
        let promo = self.applied_promo();
        Ok(pricing::quote(
            subtotal,
            promo.as_ref(),
            window,
            &self.config.pricing,
        ))
    }

    /// Turns the cart into an order.
    ///
    /// On success the cart is emptied and the applied promo is consumed. On failure
    /// both are left as they were.
    #[instrument(skip(self, request), fields(payment = %request.payment_method))]
    pub async fn checkout(&self, request: CheckoutRequest) -> Result<Order, SystemError> {
        let cart = self.current_cart().await?;
        if cart.is_empty() {
            return Err(SystemError::EmptyCart);
        }
        let promo = self.applied_promo();
        let pricing = pricing::quote(
            cart.subtotal(),
            promo.as_ref(),
            &request.window,
            &self.config.pricing,
        );
        let items = cart
            .lines
            .iter()
            .map(|line| OrderItem {
                id: line.id.clone(),
                name: line.name.clone(),
                quantity: line.quantity,
                price: line.price,
                image: line.image.clone(),
                customizations: Vec::new(),
            })
            .collect();

        let id = self
            .orders
            .place(OrderCreate {
                items,
                pricing,
                delivery_address: request.address,
                delivery_window: request.window,
                payment_method: request.payment_method,
                special_instructions: request.special_instructions,
                placed_at: self.clock.now(),
            })
            .await?;
        let order = self.orders.order(id).await?;
        info!(order_id = %order.id, total = order.pricing.total, "Order placed");

        self.cart.clear(self.cart_id).await?;
        if promo.is_some() {
            if let Err(e) = self.applied_promo.clear() {
                warn!(error = %e, "Could not clear the applied promo");
            }
        }
        Ok(order)
    }

    /// The feed named by the configuration. Without an endpoint every poll fails, so
    /// tracking falls back to synthetic motion.
    pub fn tracking_feed(&self) -> Result<Arc<dyn PositionFeed>, SystemError> {
        match &self.config.tracking_endpoint {
            #[cfg(feature = "http")]
            Some(endpoint) => {
                let feed = crate::tracking::HttpFeed::new(
                    endpoint.clone(),
                    self.config.tracking.request_timeout(),
                )
                .map_err(|e| SystemError::NoTracking(e.to_string()))?;
                Ok(Arc::new(feed))
            }
            #[cfg(not(feature = "http"))]
            Some(_) => Ok(Arc::new(ScriptedFeed::failing(FeedError::Unavailable(
                "built without the http feature".into(),
            )))),
            None => Ok(Arc::new(ScriptedFeed::failing(FeedError::Unavailable(
                "no tracking endpoint configured".into(),
            )))),
        }
    }

    /// Starts live tracking for an order that carries tracking data.
    #[instrument(skip(self, feed))]
    pub async fn track(
        &self,
        order_id: OrderId,
        feed: Arc<dyn PositionFeed>,
    ) -> Result<TrackingHandle, SystemError> {
        let order = self.orders.order(order_id.clone()).await?;
        let info = order
            .tracking
            .ok_or_else(|| SystemError::NoTracking(order_id.to_string()))?;
        Ok(spawn_tracking(
            order_id,
            &info,
            feed,
            self.clock.clone(),
            self.config.tracking.clone(),
        ))
    }

    /// Drops every client and waits for the actors to finish.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");
        drop(self.menu);
        drop(self.orders);
        drop(self.cart);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Actor task failed");
                return Err(SystemError::ActorTask(e.to_string()));
            }
        }
        info!("System shutdown complete.");
        Ok(())
    }
}
