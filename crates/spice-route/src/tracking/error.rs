use thiserror::Error;

/// A failed position poll. Every variant is transient: the simulator retries and then
/// falls back to synthetic motion, it never surfaces these as hard errors.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FeedError {
    #[error("Tracking request timed out after {0} ms")]
    Timeout(u64),

    #[error("Tracking endpoint returned HTTP {0}")]
    Status(u16),

    #[error("Tracking request failed: {0}")]
    Transport(String),

    #[error("Tracking payload unreadable: {0}")]
    Decode(String),

    #[error("Tracking feed unavailable: {0}")]
    Unavailable(String),
}
