//! # ActorClient Trait
//!
//! Default `get` and `list` for resource-specific client wrappers.

use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit the read operations.
///
/// A wrapper only supplies `inner()` and `map_error()`; lookups come for free and are
/// traced with the calling id.
///
/// # Example
///
/// ```rust
/// use spice_actors::{ActorClient, ActorEntity, FrameworkError, ResourceClient};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Dish { id: u32 }
/// #[derive(Debug)] struct DishCreate;
/// #[derive(Debug)] enum DishAction {}
/// #[derive(Debug, thiserror::Error)]
/// enum DishError {
///     #[error("dish unavailable: {0}")]
///     Unavailable(String),
/// }
///
/// #[async_trait]
/// impl ActorEntity for Dish {
///     type Id = u32;
///     type Create = DishCreate;
///     type Action = DishAction;
///     type ActionResult = ();
///     type Context = ();
///     type Error = DishError;
///
///     fn from_create_params(id: u32, _: DishCreate) -> Result<Self, DishError> {
///         Ok(Self { id })
///     }
///     async fn handle_action(&mut self, a: DishAction, _: &()) -> Result<(), DishError> {
///         match a {}
///     }
/// }
///
/// struct DishClient { inner: ResourceClient<Dish> }
///
/// impl ActorClient<Dish> for DishClient {
///     type Error = DishError;
///     fn inner(&self) -> &ResourceClient<Dish> { &self.inner }
///     fn map_error(e: FrameworkError) -> DishError { DishError::Unavailable(e.to_string()) }
/// }
///
/// async fn usage(client: DishClient) {
///     let _ = client.get(1).await;
///     let _ = client.list().await;
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch a resource by id.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Every resource, in insertion order.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list().await.map_err(Self::map_error)
    }
}
