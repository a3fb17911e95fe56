//! # Generic Messages
//!
//! Requests a [`ResourceClient`](crate::ResourceClient) sends to its
//! [`ResourceActor`](crate::ResourceActor). Every variant carries a oneshot sender
//! for the reply.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor.
///
/// - **Create**: mint an id and build the resource from [`ActorEntity::Create`].
/// - **Seed**: insert a fully built resource under a caller-chosen id. Used to load
///   read-only catalogs (menu, sample orders) at start-up.
/// - **Get**: fetch one resource by id.
/// - **List**: every resource, in insertion order.
/// - **Action**: run an [`ActorEntity::Action`] against one resource.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Seed {
        id: T::Id,
        entity: T,
        respond_to: Response<()>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
