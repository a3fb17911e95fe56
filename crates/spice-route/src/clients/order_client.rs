//! # Order Client
//!
//! High-level API over the order actor. Also the orders'
//! [`DataProvider`](crate::catalog::DataProvider), so the active-order lookup and the
//! history screen read live actor state.

use crate::catalog::{self, DataProvider};
use crate::model::{DeliveryPerson, Order, OrderCreate, OrderId, TrackingInfo};
use crate::order_actor::{OrderAction, OrderActionResult, OrderError};
use crate::status::StatusUpdate;
use async_trait::async_trait;
use spice_actors::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, info, instrument};

#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    /// Loads existing orders under their own ids.
    #[instrument(skip(self, orders), fields(count = orders.len()))]
    pub async fn seed(&self, orders: Vec<Order>) -> Result<(), OrderError> {
        for order in orders {
            self.inner
                .seed(order.id.clone(), order)
                .await
                .map_err(Self::map_error)?;
        }
        info!("Orders seeded");
        Ok(())
    }

    #[instrument(skip(self, params), fields(items = params.items.len(), total = params.pricing.total))]
    pub async fn place(&self, params: OrderCreate) -> Result<OrderId, OrderError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// An order that must exist.
    #[instrument(skip(self))]
    pub async fn order(&self, id: OrderId) -> Result<Order, OrderError> {
        self.get(id.clone())
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }

    /// Moves the order one step along the canonical sequence.
    #[instrument(skip(self))]
    pub async fn advance(
        &self,
        id: OrderId,
        message: Option<String>,
        location: Option<String>,
    ) -> Result<StatusUpdate, OrderError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id, OrderAction::Advance { message, location })
            .await
        {
            Ok(OrderActionResult::Advanced(update)) => Ok(update),
            Ok(other) => Err(unexpected("Advance", &other)),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    #[instrument(skip(self))]
    pub async fn cancel(
        &self,
        id: OrderId,
        reason: Option<String>,
    ) -> Result<StatusUpdate, OrderError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id, OrderAction::Cancel { reason })
            .await
        {
            Ok(OrderActionResult::Cancelled(update)) => Ok(update),
            Ok(other) => Err(unexpected("Cancel", &other)),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    #[instrument(skip(self, person), fields(driver = %person.name))]
    pub async fn assign_driver(&self, id: OrderId, person: DeliveryPerson) -> Result<(), OrderError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id, OrderAction::AssignDriver(person))
            .await
        {
            Ok(OrderActionResult::DriverAssigned) => Ok(()),
            Ok(other) => Err(unexpected("AssignDriver", &other)),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    #[instrument(skip(self, tracking))]
    pub async fn attach_tracking(&self, id: OrderId, tracking: TrackingInfo) -> Result<(), OrderError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id, OrderAction::AttachTracking(tracking))
            .await
        {
            Ok(OrderActionResult::TrackingAttached) => Ok(()),
            Ok(other) => Err(unexpected("AttachTracking", &other)),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// The newest order still on its way.
    pub async fn active_order(&self) -> Result<Option<Order>, OrderError> {
        catalog::active_order(self).await
    }

    /// Delivered and cancelled orders, newest first.
    pub async fn history(&self) -> Result<Vec<Order>, OrderError> {
        catalog::order_history(self).await
    }
}

fn unexpected(action: &str, result: &OrderActionResult) -> OrderError {
    OrderError::ActorCommunicationError(format!("{action} answered with {result:?}"))
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        if let Some(inner) = e.entity_error::<OrderError>() {
            return inner.clone();
        }
        match e {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}

#[async_trait]
impl DataProvider<Order> for OrderClient {
    type Id = OrderId;
    type Error = OrderError;

    async fn list(&self) -> Result<Vec<Order>, OrderError> {
        ActorClient::list(self).await
    }

    async fn get_by_id(&self, id: &OrderId) -> Result<Option<Order>, OrderError> {
        ActorClient::get(self, id.clone()).await
    }
}
