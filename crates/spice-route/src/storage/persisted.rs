//! Typed access to the persisted blobs.
//!
//! Loading never fails: a missing key, an unreadable store or a blob that does not
//! parse all come back as "nothing stored", with a `warn!` for the last two.

use super::{KeyValueStore, StorageError};
use crate::model::CartLine;
use crate::pricing::PromoCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

pub const CART_KEY: &str = "spice-route-cart";
pub const PROMO_KEY: &str = "spice-route-applied-promo";

fn load<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!(key, error = %e, "Persisted state unreadable, starting empty");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, error = %e, "Discarding corrupt persisted state");
            None
        }
    }
}

fn save<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value).map_err(|source| StorageError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &raw)
}

/// The cart blob: a JSON list of `{id, name, price, image, quantity}`.
#[derive(Clone)]
pub struct PersistedCart {
    store: Arc<dyn KeyValueStore>,
}

impl PersistedCart {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Stored lines, or an empty cart when nothing usable is stored.
    pub fn load(&self) -> Vec<CartLine> {
        load(self.store.as_ref(), CART_KEY).unwrap_or_default()
    }

    pub fn save(&self, lines: &[CartLine]) -> Result<(), StorageError> {
        save(self.store.as_ref(), CART_KEY, &lines)
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(CART_KEY)
    }
}

/// The applied-promo blob: `{code, discount, type, minOrder}`.
#[derive(Clone)]
pub struct PersistedPromo {
    store: Arc<dyn KeyValueStore>,
}

impl PersistedPromo {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn load(&self) -> Option<PromoCode> {
        load(self.store.as_ref(), PROMO_KEY)
    }

    pub fn save(&self, promo: &PromoCode) -> Result<(), StorageError> {
        save(self.store.as_ref(), PROMO_KEY, promo)
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(PROMO_KEY)
    }
}
