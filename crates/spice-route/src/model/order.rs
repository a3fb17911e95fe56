//! Customer orders.
//!
//! # Actor Framework
//! [`Order`] is hosted by the order actor (see [`crate::order_actor`]). Orders are
//! created by checkout with an [`OrderCreate`] and afterwards change only through
//! [`OrderAction`](crate::order_actor::OrderAction)s that extend the status timeline.

use crate::model::{Amount, Coordinate, DeliveryAddress, MenuItemId};
use crate::pricing::{DeliveryWindow, PriceBreakdown};
use crate::status::{OrderStatus, StatusTimeline};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub const RESTAURANT_NAME: &str = "Spice Route Kitchen";
pub const RESTAURANT_ADDRESS: &str = "456 Food Street, Chennai, Tamil Nadu 600002";

/// Order identifiers look like `ord-007`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(format!("ord-{id:03}"))
    }
}

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl OrderId {
    /// Customer-facing order number: `ord-001` becomes `SR240001`.
    pub fn order_number(&self) -> String {
        let digits: String = self.0.chars().filter(char::is_ascii_digit).collect();
        format!("SR24{digits:0>4}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: MenuItemId,
    pub name: String,
    pub quantity: u32,
    pub price: Amount,
    pub image: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub customizations: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Bike,
    Scooter,
    Bicycle,
    Car,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryPerson {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub rating: f32,
    pub total_deliveries: u32,
    pub vehicle_type: VehicleType,
    pub vehicle_number: String,
}

/// Static tracking data attached to an order: the two fixed endpoints, where the driver
/// was last seen and the planned route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingInfo {
    pub restaurant_location: Coordinate,
    pub delivery_location: Coordinate,
    pub current_driver_location: Coordinate,
    pub estimated_arrival: String,
    pub distance_remaining: String,
    #[serde(default)]
    pub route_points: Vec<Coordinate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    #[default]
    Delivery,
    Pickup,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub order_number: String,
    pub placed_at: DateTime<Utc>,
    pub items: Vec<OrderItem>,
    pub pricing: PriceBreakdown,
    pub timeline: StatusTimeline,
    pub delivery_address: DeliveryAddress,
    pub delivery_window: DeliveryWindow,
    pub payment_method: String,
    pub restaurant_name: String,
    pub restaurant_address: String,
    pub delivery_person: Option<DeliveryPerson>,
    pub tracking: Option<TrackingInfo>,
    pub special_instructions: Option<String>,
    pub order_type: OrderType,
}

impl Order {
    pub fn status(&self) -> OrderStatus {
        self.timeline.current()
    }

    /// Still on its way: neither delivered nor cancelled.
    pub fn is_active(&self) -> bool {
        !self.status().is_terminal()
    }

    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

/// Payload produced by checkout.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub items: Vec<OrderItem>,
    pub pricing: PriceBreakdown,
    pub delivery_address: DeliveryAddress,
    pub delivery_window: DeliveryWindow,
    pub payment_method: String,
    pub special_instructions: Option<String>,
    pub placed_at: DateTime<Utc>,
}
