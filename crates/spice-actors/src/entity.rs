//! # ActorEntity Trait
//!
//! The contract every resource (menu item, order, cart) implements to be hosted by a
//! [`ResourceActor`](crate::ResourceActor). The associated types pin down the id, the
//! creation payload, the resource-specific actions and the collaborators injected at
//! `run()` time, so a `CartAction` can never be sent to the order actor.
//!
//! There is no update or delete hook. Resources in this system change only through
//! named actions (`AdvanceStatus`, `SetQuantity`, ...), which keeps every mutation
//! visible in the logs as a domain event rather than a generic patch.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource must implement to be managed by `ResourceActor`.
///
/// # Async & Context
/// Hooks are `async` so they can talk to other actors or to a store. The `Context`
/// type is passed by reference into every hook; it is supplied to
/// [`ResourceActor::run`](crate::ResourceActor::run), not to the constructor, so two
/// actors can be created before either is wired.
#[async_trait]
pub trait ActorEntity: Clone + Debug + Send + Sync + 'static {
    /// Identifier. `From<u32>` lets the actor mint ids for `Create` requests.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Payload for `Create`.
    type Create: Send + Sync + Debug;

    /// Resource-specific operations.
    type Action: Send + Sync + Debug;

    /// Result of an action.
    type ActionResult: Send + Sync + Debug;

    /// Collaborators injected at `run()`. Use `()` when there are none.
    type Context: Send + Sync;

    /// Per-resource error. Boxed into
    /// [`FrameworkError::EntityError`](crate::FrameworkError::EntityError) on the way out.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build the resource from a freshly minted id and its payload.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Runs after construction and before the resource is stored.
    /// A failure here rejects the create.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Apply a resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
