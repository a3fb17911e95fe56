//! # Order Actor
//!
//! Hosts customer orders. An order is created by checkout, validated against the menu in
//! `on_create`, and from then on only moves forward through its status timeline.
//!
//! ## Structure
//!
//! - [`entity`]: [`ActorEntity`](spice_actors::ActorEntity) implementation for
//!   [`Order`](crate::model::Order)
//! - [`actions`]: [`OrderAction`] and [`OrderActionResult`]
//! - [`error`]: [`OrderError`]
//!
//! ## Context
//!
//! [`OrderContext`] carries the menu client (to check every ordered dish still exists
//! at the listed price) and the clock that stamps status updates.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::MenuClient;
use crate::model::Order;
use crate::tracking::Clock;
use spice_actors::{ResourceActor, ResourceClient};
use std::sync::Arc;

/// Collaborators injected into the order actor at `run()`.
#[derive(Clone)]
pub struct OrderContext {
    pub menu: MenuClient,
    pub clock: Arc<dyn Clock>,
}

/// Creates the order actor and its generic client.
pub fn new() -> (ResourceActor<Order>, ResourceClient<Order>) {
    ResourceActor::new(32)
}
