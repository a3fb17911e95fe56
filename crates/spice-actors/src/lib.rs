//! # Spice Actors
//!
//! The actor runtime underneath the Spice Route ordering core. Each resource type
//! (menu item, order, cart) is hosted by its own [`ResourceActor`], a Tokio task that
//! owns the resources and handles requests one at a time. Callers talk to it through a
//! cloneable [`ResourceClient`].
//!
//! ## Layers
//!
//! 1. **Entity** ([`ActorEntity`]): the resource's data, its creation payload, its
//!    actions and the collaborators it needs.
//! 2. **Runtime** ([`ResourceActor`]): the request loop and the store.
//! 3. **Interface** ([`ResourceClient`], [`ActorClient`]): typed requests and replies.
//!
//! ## Operations
//!
//! | Request | Effect |
//! |---|---|
//! | `create` | mint an id, build via `from_create_params`, run `on_create`, store |
//! | `seed` | store a prebuilt resource under a chosen id (catalog loading) |
//! | `get` | clone one resource out |
//! | `list` | clone every resource out, in insertion order |
//! | `perform_action` | run a resource-specific action; failures leave the resource unchanged |
//!
//! ## Context Injection
//!
//! Collaborators are handed to [`ResourceActor::run`], not to `new`, so every actor
//! and client can exist before anything is wired:
//!
//! ```rust
//! use spice_actors::{ActorEntity, ResourceActor, ResourceClient};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Dish { id: u32, price: u64 }
//! #[derive(Debug)] struct DishCreate(u64);
//! #[derive(Debug)] enum DishAction { Price }
//! #[derive(Debug, thiserror::Error)] #[error("dish")] struct DishError;
//!
//! #[async_trait]
//! impl ActorEntity for Dish {
//!     type Id = u32; type Create = DishCreate; type Action = DishAction;
//!     type ActionResult = u64; type Context = (); type Error = DishError;
//!     fn from_create_params(id: u32, p: DishCreate) -> Result<Self, DishError> {
//!         Ok(Self { id, price: p.0 })
//!     }
//!     async fn handle_action(&mut self, _: DishAction, _: &()) -> Result<u64, DishError> {
//!         Ok(self.price)
//!     }
//! }
//!
//! #[derive(Clone, Debug)] struct Basket { id: u32, total: u64 }
//! #[derive(Debug)] struct BasketCreate { dish: u32 }
//! #[derive(Debug)] enum BasketAction {}
//! #[derive(Debug, thiserror::Error)] #[error("basket")] struct BasketError;
//!
//! #[async_trait]
//! impl ActorEntity for Basket {
//!     type Id = u32; type Create = BasketCreate; type Action = BasketAction;
//!     type ActionResult = (); type Context = ResourceClient<Dish>; type Error = BasketError;
//!     fn from_create_params(id: u32, p: BasketCreate) -> Result<Self, BasketError> {
//!         Ok(Self { id, total: p.dish as u64 })
//!     }
//!     async fn on_create(&mut self, dishes: &ResourceClient<Dish>) -> Result<(), BasketError> {
//!         let dish_id = self.total as u32;
//!         self.total = dishes.perform_action(dish_id, DishAction::Price).await.map_err(|_| BasketError)?;
//!         Ok(())
//!     }
//!     async fn handle_action(&mut self, a: BasketAction, _: &ResourceClient<Dish>) -> Result<(), BasketError> {
//!         match a {}
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (dish_actor, dishes) = ResourceActor::<Dish>::new(8);
//!     let (basket_actor, baskets) = ResourceActor::<Basket>::new(8);
//!     tokio::spawn(dish_actor.run(()));
//!     tokio::spawn(basket_actor.run(dishes.clone()));
//!
//!     let dish = dishes.create(DishCreate(149)).await.unwrap();
//!     let basket = baskets.create(BasketCreate { dish }).await.unwrap();
//!     assert_eq!(baskets.get(basket).await.unwrap().unwrap().total, 149);
//! }
//! ```
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers requests from a queue of expectations so the code
//! around a client can be tested without actors. See the [`mock`] module.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
