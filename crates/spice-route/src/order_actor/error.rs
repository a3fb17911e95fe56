//! Error types for the order actor.

use crate::model::{AddressError, Amount};
use crate::status::StatusError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(String),

    #[error("An order needs at least one item")]
    EmptyOrder,

    #[error("Invalid quantity {quantity} for {item}")]
    InvalidQuantity { item: String, quantity: u32 },

    #[error(transparent)]
    InvalidAddress(#[from] AddressError),

    #[error("Subtotal {actual} does not match the items ({expected})")]
    PricingMismatch { expected: Amount, actual: Amount },

    #[error("Not on the menu: {0}")]
    UnknownItem(String),

    #[error("Price of {item} changed from {ordered} to {listed}")]
    PriceChanged {
        item: String,
        ordered: Amount,
        listed: Amount,
    },

    #[error(transparent)]
    Status(#[from] StatusError),

    #[error("Order {0} is no longer active")]
    NotActive(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
