//! # Framework Errors
//!
//! Transport-level failures between a client and its actor, plus a boxed slot for the
//! resource's own error type.

/// Errors that can occur within the actor runtime itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Item already exists: {0}")]
    Duplicate(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Borrow the resource error carried by `EntityError`, if it has type `E`.
    ///
    /// Clients use this to hand their callers the typed error the entity raised
    /// instead of a stringly message.
    pub fn entity_error<E: std::error::Error + 'static>(&self) -> Option<&E> {
        match self {
            FrameworkError::EntityError(inner) => inner.downcast_ref::<E>(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error, PartialEq)]
    #[error("out of stock")]
    struct OutOfStock;

    #[derive(Debug, thiserror::Error)]
    #[error("other")]
    struct Other;

    #[test]
    fn entity_error_downcasts_to_the_boxed_type() {
        let err = FrameworkError::EntityError(Box::new(OutOfStock));
        assert_eq!(err.entity_error::<OutOfStock>(), Some(&OutOfStock));
        assert!(err.entity_error::<Other>().is_none());
        assert!(FrameworkError::ActorClosed.entity_error::<OutOfStock>().is_none());
    }
}
