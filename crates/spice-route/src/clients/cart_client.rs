//! # Cart Client
//!
//! High-level API over the cart actor. Every mutating call returns the cart as it is
//! after the change, which is also what was written to storage.

use crate::cart_actor::{CartAction, CartError};
use crate::model::{Cart, CartCreate, CartId, MenuItemId};
use async_trait::async_trait;
use spice_actors::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct CartClient {
    inner: ResourceClient<Cart>,
}

impl CartClient {
    pub fn new(inner: ResourceClient<Cart>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, params), fields(lines = params.lines.len()))]
    pub async fn open(&self, params: CartCreate) -> Result<CartId, CartError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// A cart that must exist.
    #[instrument(skip(self))]
    pub async fn cart(&self, id: CartId) -> Result<Cart, CartError> {
        self.get(id)
            .await?
            .ok_or_else(|| CartError::NotFound(id.to_string()))
    }

    async fn perform(&self, id: CartId, action: CartAction) -> Result<Cart, CartError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn add(&self, id: CartId, item: MenuItemId, quantity: u32) -> Result<Cart, CartError> {
        self.perform(id, CartAction::Add { item, quantity }).await
    }

    #[instrument(skip(self))]
    pub async fn set_quantity(
        &self,
        id: CartId,
        item: MenuItemId,
        quantity: u32,
    ) -> Result<Cart, CartError> {
        self.perform(id, CartAction::SetQuantity { item, quantity })
            .await
    }

    #[instrument(skip(self))]
    pub async fn remove(&self, id: CartId, item: MenuItemId) -> Result<Cart, CartError> {
        self.perform(id, CartAction::Remove { item }).await
    }

    #[instrument(skip(self))]
    pub async fn clear(&self, id: CartId) -> Result<Cart, CartError> {
        self.perform(id, CartAction::Clear).await
    }
}

#[async_trait]
impl ActorClient<Cart> for CartClient {
    type Error = CartError;

    fn inner(&self) -> &ResourceClient<Cart> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        if let Some(inner) = e.entity_error::<CartError>() {
            return inner.clone();
        }
        match e {
            FrameworkError::NotFound(id) => CartError::NotFound(id),
            other => CartError::ActorCommunicationError(other.to_string()),
        }
    }
}
