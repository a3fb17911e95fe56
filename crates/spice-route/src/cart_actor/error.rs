//! Error types for the cart actor.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Cart not found: {0}")]
    NotFound(String),

    #[error("Not on the menu: {0}")]
    UnknownItem(String),

    #[error("Not in the cart: {0}")]
    NotInCart(String),

    #[error("Quantity must be at least 1")]
    InvalidQuantity,

    #[error("Could not save the cart: {0}")]
    Persistence(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
