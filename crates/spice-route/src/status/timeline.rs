//! Append-only audit trail of status transitions.

use super::{OrderStatus, StatusError, StepIndex};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: OrderStatus,
    pub timestamp: DateTime<Utc>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl StatusUpdate {
    pub fn new(status: OrderStatus, timestamp: DateTime<Utc>) -> Self {
        Self {
            status,
            timestamp,
            message: status.default_message().to_string(),
            location: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

/// The status history of one order.
///
/// Never empty: it always starts with a `confirmed` record. Every later record is a legal
/// successor of the one before it and carries a timestamp no earlier than it. Records
/// are never edited or removed. Deserializing replays the records through
/// [`append`](Self::append), so a stored timeline that breaks these rules fails to load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<StatusUpdate>", into = "Vec<StatusUpdate>")]
pub struct StatusTimeline {
    updates: Vec<StatusUpdate>,
}

impl StatusTimeline {
    pub fn start(first: StatusUpdate) -> Result<Self, StatusError> {
        if first.status != OrderStatus::Confirmed {
            return Err(StatusError::MustStartConfirmed(first.status));
        }
        Ok(Self {
            updates: vec![first],
        })
    }

    /// A new timeline confirmed at `timestamp` with the default message.
    pub fn confirmed_at(timestamp: DateTime<Utc>) -> Self {
        Self {
            updates: vec![StatusUpdate::new(OrderStatus::Confirmed, timestamp)],
        }
    }

    pub fn append(&mut self, update: StatusUpdate) -> Result<(), StatusError> {
        let last = self.last();
        if last.status.is_terminal() {
            return Err(StatusError::Terminal(last.status));
        }
        if !last.status.can_transition_to(update.status) {
            return Err(StatusError::IllegalTransition {
                from: last.status,
                to: update.status,
            });
        }
        if update.timestamp < last.timestamp {
            return Err(StatusError::TimestampRegressed {
                status: update.status,
            });
        }
        self.updates.push(update);
        Ok(())
    }

    pub fn current(&self) -> OrderStatus {
        self.last().status
    }

    pub fn step_index(&self) -> StepIndex {
        self.current().step_index()
    }

    pub fn updates(&self) -> &[StatusUpdate] {
        &self.updates
    }

    pub fn last(&self) -> &StatusUpdate {
        // `updates` is non-empty by construction.
        &self.updates[self.updates.len() - 1]
    }

    /// When the order first reached `status`, if it did.
    pub fn reached_at(&self, status: OrderStatus) -> Option<DateTime<Utc>> {
        self.updates
            .iter()
            .find(|u| u.status == status)
            .map(|u| u.timestamp)
    }
}

impl TryFrom<Vec<StatusUpdate>> for StatusTimeline {
    type Error = StatusError;

    fn try_from(updates: Vec<StatusUpdate>) -> Result<Self, Self::Error> {
        let mut iter = updates.into_iter();
        let first = iter.next().ok_or(StatusError::Empty)?;
        let mut timeline = Self::start(first)?;
        for update in iter {
            timeline.append(update)?;
        }
        Ok(timeline)
    }
}

impl From<StatusTimeline> for Vec<StatusUpdate> {
    fn from(timeline: StatusTimeline) -> Self {
        timeline.updates
    }
}
