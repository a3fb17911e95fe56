//! Dishes on the menu.
//!
//! # Actor Framework
//! [`MenuItem`] is hosted by the menu actor (see [`crate::menu_actor`]). The catalog is
//! seeded at start-up and read through [`DataProvider`](crate::catalog::DataProvider);
//! `Create` exists for adding specials at runtime.

use crate::model::Amount;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Menu identifiers are the slugs used by the catalog (`rice-1`, `dessert-2`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuItemId(pub String);

impl From<u32> for MenuItemId {
    fn from(id: u32) -> Self {
        Self(format!("special-{id}"))
    }
}

impl From<&str> for MenuItemId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Display for MenuItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Breakfast,
    MainCourse,
    Rice,
    Curries,
    Snacks,
    Desserts,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Breakfast,
        Category::MainCourse,
        Category::Rice,
        Category::Curries,
        Category::Snacks,
        Category::Desserts,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Breakfast => "Breakfast",
            Category::MainCourse => "Main Course",
            Category::Rice => "Rice & Biryani",
            Category::Curries => "Curries",
            Category::Snacks => "Snacks",
            Category::Desserts => "Desserts",
        }
    }
}

/// Heat on a 1 to 3 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpiceLevel {
    Mild,
    Medium,
    Hot,
}

impl SpiceLevel {
    pub fn level(&self) -> u8 {
        match self {
            SpiceLevel::Mild => 1,
            SpiceLevel::Medium => 2,
            SpiceLevel::Hot => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    pub description: String,
    pub price: Amount,
    pub original_price: Option<Amount>,
    pub image: String,
    pub category: Category,
    pub rating: f32,
    pub reviews: u32,
    pub is_veg: bool,
    pub spice_level: SpiceLevel,
    pub tags: Vec<String>,
    pub calories: Option<u32>,
    pub prep_time_minutes: Option<u32>,
}

impl MenuItem {
    /// Amount saved against `original_price`, if the dish is on offer.
    pub fn savings(&self) -> Option<Amount> {
        self.original_price
            .filter(|original| *original > self.price)
            .map(|original| original - self.price)
    }
}

/// Payload for adding a dish at runtime.
#[derive(Debug, Clone)]
pub struct MenuItemCreate {
    pub name: String,
    pub description: String,
    pub price: Amount,
    pub image: String,
    pub category: Category,
    pub is_veg: bool,
    pub spice_level: SpiceLevel,
}
