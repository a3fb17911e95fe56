//! Operations on a placed order.

use crate::model::{DeliveryPerson, TrackingInfo};
use crate::status::StatusUpdate;

#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Move to the next canonical status, stamped by the context clock.
    Advance {
        message: Option<String>,
        location: Option<String>,
    },
    /// Only possible while the order is still `confirmed`.
    Cancel { reason: Option<String> },
    AssignDriver(DeliveryPerson),
    AttachTracking(TrackingInfo),
}

/// Results from [`OrderAction`]s, one variant per action.
#[derive(Debug, Clone)]
pub enum OrderActionResult {
    Advanced(StatusUpdate),
    Cancelled(StatusUpdate),
    DriverAssigned,
    TrackingAttached,
}
