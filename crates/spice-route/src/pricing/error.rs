use crate::model::Amount;
use thiserror::Error;

/// Why a promo code could not be applied. Shown to the shopper as-is.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PromoError {
    #[error("Enter a promo code")]
    Empty,

    #[error("Invalid promo code: {0}")]
    Unknown(String),

    #[error("Minimum order of ₹{minimum} required for {code}")]
    BelowMinimum { code: String, minimum: Amount },
}

/// Why a delivery slot could not be selected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SlotError {
    #[error("Unknown delivery slot: {0}")]
    Unknown(String),

    #[error("This time slot is not available: {0}")]
    Unavailable(String),
}
