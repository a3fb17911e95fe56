//! Error types for the menu actor.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum MenuError {
    #[error("Menu item not found: {0}")]
    NotFound(String),

    #[error("Invalid menu item: {0}")]
    ValidationError(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
