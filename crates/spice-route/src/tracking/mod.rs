//! # Live tracking
//!
//! Driver position for an active order, refreshed by polling a [`PositionFeed`].
//!
//! The logic lives in [`TrackingSimulator`], a pure state machine: it consumes
//! [`TrackingEvent`]s and answers with timer [`Directive`]s and advisory [`Notice`]s,
//! so every transition is testable without a runtime. [`spawn_tracking`] wraps it in a
//! tokio task that owns the interval and the single in-flight poll.
//!
//! ```text
//!            Start/Shown            poll failed
//!   Idle ───────────────▶ Polling ─────────────▶ Degraded
//!    ▲  ◀─────── Hidden ─── │  ▲ ◀── poll ok ───── │
//!    │                      │  │                   │
//!    │          ConnectivityLost   Restored        │
//!    │                      ▼  │                   │
//!    └──── Stop ─────────  Offline ◀───────────────┘
//! ```
//!
//! Failures never reach the caller. Past the retry ceiling the simulator synthesizes
//! motion toward the destination and raises [`Notice::SimulatedTracking`].

pub mod clock;
pub mod driver;
pub mod error;
pub mod feed;
pub mod simulator;

pub use clock::{Clock, ManualClock, SystemClock};
pub use driver::{spawn_tracking, TrackingControl, TrackingHandle};
pub use error::FeedError;
#[cfg(feature = "http")]
pub use feed::HttpFeed;
pub use feed::{PositionFeed, PositionFix, ScriptedFeed};
pub use simulator::{
    Directive, Outcome, Notice, Phase, TrackingEvent, TrackingSimulator, TrackingState,
};

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tuning for the poll loop and the synthetic fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    pub poll_interval_ms: u64,
    pub request_timeout_ms: u64,
    /// Consecutive failures before synthetic motion kicks in.
    pub retry_ceiling: u32,
    /// Fraction of the remaining distance covered per synthetic step.
    pub synthetic_step: f64,
    /// Route points kept behind the current position while synthesizing.
    pub trail_length: usize,
    /// Degrees; smaller moves do not count as movement.
    pub movement_epsilon: f64,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 3_000,
            request_timeout_ms: 5_000,
            retry_ceiling: 3,
            synthetic_step: 0.02,
            trail_length: 5,
            movement_epsilon: 0.0001,
        }
    }
}

impl TrackingConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms.max(1))
    }
}
