//! Errors surfaced by [`SpiceSystem`](super::SpiceSystem).

use crate::cart_actor::CartError;
use crate::menu_actor::MenuError;
use crate::order_actor::OrderError;
use crate::pricing::{PromoError, SlotError};
use crate::storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SystemError {
    #[error("The cart is empty")]
    EmptyCart,

    #[error("Order {0} has no tracking data")]
    NoTracking(String),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Menu(#[from] MenuError),

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    Promo(#[from] PromoError),

    #[error(transparent)]
    Slot(#[from] SlotError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Actor task failed: {0}")]
    ActorTask(String),
}
