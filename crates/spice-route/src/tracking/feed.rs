//! Sources of driver positions.
//!
//! The real source is `GET {base}/tracking/{orderId}` ([`HttpFeed`], behind the default
//! `http` feature). [`ScriptedFeed`] replays canned results for tests and the demo.

use super::error::FeedError;
use crate::model::{Coordinate, OrderId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// One successful poll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionFix {
    pub current_location: Coordinate,
    #[serde(default)]
    pub route_points: Vec<Coordinate>,
}

#[async_trait]
pub trait PositionFeed: Send + Sync {
    async fn fetch(&self, order_id: &OrderId) -> Result<PositionFix, FeedError>;
}

/// Replays a fixed list of results, then repeats a fallback forever.
#[derive(Debug)]
pub struct ScriptedFeed {
    script: Mutex<VecDeque<Result<PositionFix, FeedError>>>,
    fallback: Result<PositionFix, FeedError>,
    latency: Option<Duration>,
    calls: AtomicUsize,
}

impl ScriptedFeed {
    pub fn new(script: Vec<Result<PositionFix, FeedError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback: Err(FeedError::Unavailable("script exhausted".into())),
            latency: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// A feed whose every poll fails with `error`.
    pub fn failing(error: FeedError) -> Self {
        Self::new(Vec::new()).then_repeat(Err(error))
    }

    pub fn then_repeat(mut self, result: Result<PositionFix, FeedError>) -> Self {
        self.fallback = result;
        self
    }

    /// Delays every response by `latency` of tokio time.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Number of polls served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PositionFeed for ScriptedFeed {
    async fn fetch(&self, _order_id: &OrderId) -> Result<PositionFix, FeedError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self
            .script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        next.unwrap_or_else(|| self.fallback.clone())
    }
}

#[cfg(feature = "http")]
pub use http::HttpFeed;

#[cfg(feature = "http")]
mod http {
    use super::*;
    use tracing::debug;

    /// Polls `GET {base}/tracking/{orderId}` for a JSON [`PositionFix`].
    #[derive(Debug, Clone)]
    pub struct HttpFeed {
        client: reqwest::Client,
        base_url: String,
        timeout: Duration,
    }

    impl HttpFeed {
        pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FeedError> {
            let client = reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .map_err(|e| FeedError::Transport(e.to_string()))?;
            Ok(Self {
                client,
                base_url: base_url.into(),
                timeout,
            })
        }

        pub fn url_for(&self, order_id: &OrderId) -> String {
            format!(
                "{}/tracking/{}",
                self.base_url.trim_end_matches('/'),
                order_id
            )
        }

        fn classify(&self, e: reqwest::Error) -> FeedError {
            if e.is_timeout() {
                FeedError::Timeout(self.timeout.as_millis() as u64)
            } else if e.is_decode() {
                FeedError::Decode(e.to_string())
            } else {
                FeedError::Transport(e.to_string())
            }
        }
    }

    #[async_trait]
    impl PositionFeed for HttpFeed {
        async fn fetch(&self, order_id: &OrderId) -> Result<PositionFix, FeedError> {
            let url = self.url_for(order_id);
            debug!(%url, "Polling tracking endpoint");
            let response = self
                .client
                .get(&url)
                .header(reqwest::header::ACCEPT, "application/json")
                .send()
                .await
                .map_err(|e| self.classify(e))?;
            let status = response.status();
            if !status.is_success() {
                return Err(FeedError::Status(status.as_u16()));
            }
            response
                .json::<PositionFix>()
                .await
                .map_err(|e| self.classify(e))
        }
    }

}
