//! # Configuration
//!
//! [`SpiceConfig`] is read from an optional JSON file, where every field may be left
//! out, and then overridden from the environment:
//!
//! | Variable | Field |
//! |---|---|
//! | `SPICE_TRACKING_ENDPOINT` | `tracking_endpoint` |
//! | `SPICE_STORAGE_DIR` | `storage_dir` |
//! | `SPICE_POLL_INTERVAL_MS` | `tracking.poll_interval_ms` |

use crate::pricing::PricingConfig;
use crate::projection::MapConfig;
use crate::tracking::TrackingConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

pub const ENV_TRACKING_ENDPOINT: &str = "SPICE_TRACKING_ENDPOINT";
pub const ENV_STORAGE_DIR: &str = "SPICE_STORAGE_DIR";
pub const ENV_POLL_INTERVAL_MS: &str = "SPICE_POLL_INTERVAL_MS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid value for {key}: {value:?}")]
    InvalidEnv { key: &'static str, value: String },

    #[error("Out of range setting {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpiceConfig {
    pub pricing: PricingConfig,
    pub tracking: TrackingConfig,
    pub map: MapConfig,
    /// Where the file store keeps the cart and promo. `None` keeps them in memory.
    pub storage_dir: Option<PathBuf>,
    /// Base URL of the tracking service. `None` means no live feed.
    pub tracking_endpoint: Option<String>,
}

impl SpiceConfig {
    /// Reads `path` if given, then applies the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let config = config.with_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Applies overrides looked up through `lookup`. Empty values are ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(endpoint) = get(ENV_TRACKING_ENDPOINT) {
            debug!(key = ENV_TRACKING_ENDPOINT, "Override applied");
            self.tracking_endpoint = Some(endpoint.trim().to_string());
        }
        if let Some(dir) = get(ENV_STORAGE_DIR) {
            debug!(key = ENV_STORAGE_DIR, "Override applied");
            self.storage_dir = Some(PathBuf::from(dir));
        }
        if let Some(raw) = get(ENV_POLL_INTERVAL_MS) {
            let interval = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|ms| *ms > 0)
                .ok_or(ConfigError::InvalidEnv {
                    key: ENV_POLL_INTERVAL_MS,
                    value: raw.clone(),
                })?;
            debug!(key = ENV_POLL_INTERVAL_MS, interval, "Override applied");
            self.tracking.poll_interval_ms = interval;
        }
        Ok(self)
    }

    /// Rejects settings the projection and the tracking fallback cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let map = &self.map;
        let tracking = &self.tracking;
        check("map.inset_min", map.inset_min, (0.0..=100.0).contains(&map.inset_min))?;
        check(
            "map.inset_max",
            map.inset_max,
            map.inset_max <= 100.0 && map.inset_max >= map.inset_min,
        )?;
        check("map.padding", map.padding, map.padding.is_finite() && map.padding >= 0.0)?;
        check(
            "tracking.synthetic_step",
            tracking.synthetic_step,
            tracking.synthetic_step > 0.0 && tracking.synthetic_step <= 1.0,
        )?;
        check(
            "tracking.movement_epsilon",
            tracking.movement_epsilon,
            tracking.movement_epsilon.is_finite() && tracking.movement_epsilon >= 0.0,
        )?;
        if tracking.retry_ceiling == 0 {
            return Err(ConfigError::Invalid {
                key: "tracking.retry_ceiling",
                value: "0".into(),
            });
        }
        Ok(())
    }
}

fn check(key: &'static str, value: f64, ok: bool) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
        })
    }
}
