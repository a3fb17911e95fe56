use super::OrderStatus;
use thiserror::Error;

/// Reasons a status update is refused.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StatusError {
    #[error("Status timeline is empty")]
    Empty,

    #[error("Status timeline must start at Confirmed, not {0}")]
    MustStartConfirmed(OrderStatus),

    #[error("Order is already {0}")]
    Terminal(OrderStatus),

    #[error("Cannot move from {from} to {to}")]
    IllegalTransition { from: OrderStatus, to: OrderStatus },

    #[error("Update to {status} is timestamped before the previous update")]
    TimestampRegressed { status: OrderStatus },
}
