//! # Cart Actor
//!
//! Hosts the shopping cart. There is normally exactly one, created at start-up from
//! whatever the key-value store still holds. Every successful [`CartAction`] writes
//! the new contents back through [`PersistedCart`], so a restart resumes the same cart.
//! A mutation that cannot be persisted is rejected and the cart stays as it was.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::MenuClient;
use crate::model::Cart;
use crate::storage::PersistedCart;
use spice_actors::{ResourceActor, ResourceClient};

/// Collaborators injected into the cart actor at `run()`.
#[derive(Clone)]
pub struct CartContext {
    pub menu: MenuClient,
    pub store: PersistedCart,
}

/// Creates the cart actor and its generic client.
pub fn new() -> (ResourceActor<Cart>, ResourceClient<Cart>) {
    ResourceActor::new(8)
}
