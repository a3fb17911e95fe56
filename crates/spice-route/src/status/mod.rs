//! # Order Status Model
//!
//! An order moves along a fixed line:
//!
//! ```text
//! confirmed -> preparing -> ready -> picked-up -> out-for-delivery -> delivered
//!     |
//!     +-> cancelled
//! ```
//!
//! `cancelled` is a second terminal reachable only from `confirmed`. Nothing moves
//! backward. [`StatusTimeline`] records every transition with its timestamp and refuses
//! anything that would break those rules.

pub mod error;
pub mod timeline;

pub use error::StatusError;
pub use timeline::{StatusTimeline, StatusUpdate};

use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    Confirmed,
    Preparing,
    Ready,
    PickedUp,
    OutForDelivery,
    Delivered,
    Cancelled,
}

/// Where an order sits on the stepper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepIndex {
    /// Position in [`OrderStatus::CANONICAL`].
    Canonical(usize),
    Cancelled,
}

impl OrderStatus {
    /// The happy path, in order.
    pub const CANONICAL: [OrderStatus; 6] = [
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::PickedUp,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
    ];

    pub fn step_index(&self) -> StepIndex {
        match Self::CANONICAL.iter().position(|s| s == self) {
            Some(i) => StepIndex::Canonical(i),
            None => StepIndex::Cancelled,
        }
    }

    /// The next status on the happy path, if any.
    pub fn next(&self) -> Option<OrderStatus> {
        match self.step_index() {
            StepIndex::Canonical(i) => Self::CANONICAL.get(i + 1).copied(),
            StepIndex::Cancelled => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Only the immediate successor, or `cancelled` from `confirmed`.
    pub fn can_transition_to(&self, to: OrderStatus) -> bool {
        if to == OrderStatus::Cancelled {
            return *self == OrderStatus::Confirmed;
        }
        self.next() == Some(to)
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::Ready => "Ready",
            OrderStatus::PickedUp => "Picked Up",
            OrderStatus::OutForDelivery => "Out for Delivery",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// Progress bar fill, 0 to 100.
    pub fn progress_percent(&self) -> u8 {
        match self {
            OrderStatus::Confirmed => 20,
            OrderStatus::Preparing => 40,
            OrderStatus::Ready => 60,
            OrderStatus::PickedUp => 70,
            OrderStatus::OutForDelivery => 90,
            OrderStatus::Delivered => 100,
            OrderStatus::Cancelled => 0,
        }
    }

    /// Default audit message for a transition into this status.
    pub fn default_message(&self) -> &'static str {
        match self {
            OrderStatus::Confirmed => "Order confirmed and sent to restaurant",
            OrderStatus::Preparing => "Restaurant is preparing your order",
            OrderStatus::Ready => "Order is ready for pickup",
            OrderStatus::PickedUp => "Order picked up by delivery partner",
            OrderStatus::OutForDelivery => "On the way to your location",
            OrderStatus::Delivered => "Order delivered successfully",
            OrderStatus::Cancelled => "Order cancelled",
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_walk_ends_at_delivered() {
        let mut status = OrderStatus::Confirmed;
        let mut seen = vec![status];
        while let Some(next) = status.next() {
            assert!(status.can_transition_to(next));
            status = next;
            seen.push(status);
        }
        assert_eq!(seen, OrderStatus::CANONICAL.to_vec());
        assert!(status.is_terminal());
    }

    #[test]
    fn cancel_only_from_confirmed() {
        assert!(OrderStatus::Confirmed.can_transition_to(OrderStatus::Cancelled));
        for status in &OrderStatus::CANONICAL[1..] {
            assert!(!status.can_transition_to(OrderStatus::Cancelled));
        }
        assert_eq!(OrderStatus::Cancelled.next(), None);
    }

    #[test]
    fn no_skips_or_backward_moves() {
        assert!(!OrderStatus::Confirmed.can_transition_to(OrderStatus::Ready));
        assert!(!OrderStatus::Ready.can_transition_to(OrderStatus::Preparing));
        assert!(!OrderStatus::Ready.can_transition_to(OrderStatus::Ready));
    }

    #[test]
    fn display_helpers() {
        assert_eq!(OrderStatus::PickedUp.label(), "Picked Up");
        assert_eq!(OrderStatus::OutForDelivery.progress_percent(), 90);
        assert_eq!(OrderStatus::Cancelled.progress_percent(), 0);
        assert_eq!(OrderStatus::Ready.step_index(), StepIndex::Canonical(2));
        assert_eq!(OrderStatus::Cancelled.step_index(), StepIndex::Cancelled);
    }

    #[test]
    fn serializes_as_kebab_case() {
        let json = serde_json::to_string(&OrderStatus::OutForDelivery).unwrap();
        assert_eq!(json, "\"out-for-delivery\"");
    }
}
