//! The shopping cart.
//!
//! # Actor Framework
//! [`Cart`] is hosted by the cart actor (see [`crate::cart_actor`]); every mutation goes
//! through a [`CartAction`](crate::cart_actor::CartAction) and is written back to the
//! key-value store.

use crate::model::{Amount, MenuItem, MenuItemId};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CartId(pub u32);

impl From<u32> for CartId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for CartId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cart-{}", self.0)
    }
}

/// One dish in the cart. Serialized in the shape the cart blob is stored in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: MenuItemId,
    pub name: String,
    pub price: Amount,
    pub image: String,
    pub quantity: u32,
}

impl CartLine {
    pub fn for_item(item: &MenuItem, quantity: u32) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            price: item.price,
            image: item.image.clone(),
            quantity,
        }
    }

    pub fn line_total(&self) -> Amount {
        self.price * Amount::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    pub id: CartId,
    pub lines: Vec<CartLine>,
}

impl Cart {
    pub fn new(id: CartId, lines: Vec<CartLine>) -> Self {
        let mut cart = Self {
            id,
            lines: Vec::new(),
        };
        for line in lines {
            cart.add(line);
        }
        cart
    }

    /// Adds a line, merging quantities when the dish is already present.
    /// Zero-quantity lines are ignored.
    pub fn add(&mut self, line: CartLine) {
        if line.quantity == 0 {
            return;
        }
        match self.lines.iter_mut().find(|l| l.id == line.id) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(line.quantity),
            None => self.lines.push(line),
        }
    }

    /// Sets the quantity of a line; zero removes it. Returns false if the dish is absent.
    pub fn set_quantity(&mut self, id: &MenuItemId, quantity: u32) -> bool {
        let Some(pos) = self.lines.iter().position(|l| &l.id == id) else {
            return false;
        };
        if quantity == 0 {
            self.lines.remove(pos);
        } else {
            self.lines[pos].quantity = quantity;
        }
        true
    }

    pub fn remove(&mut self, id: &MenuItemId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| &l.id != id);
        self.lines.len() != before
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn subtotal(&self) -> Amount {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Payload for creating a cart, optionally restored from storage.
#[derive(Debug, Clone, Default)]
pub struct CartCreate {
    pub lines: Vec<CartLine>,
}
