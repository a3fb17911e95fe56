//! Sample data seeded into the actors at start-up: the menu, the promo codes, a
//! handful of past orders and the live tracking data of the active one.
//!
//! Core logic never reads these directly; it goes through
//! [`DataProvider`](crate::catalog::DataProvider) and the actors.

use crate::model::{
    Category, Coordinate, DeliveryAddress, DeliveryPerson, MenuItem, MenuItemId, Order, OrderId,
    OrderItem, OrderType, SpiceLevel, TrackingInfo, VehicleType, RESTAURANT_ADDRESS,
    RESTAURANT_NAME,
};
use crate::pricing::{DeliveryWindow, PriceBreakdown, PromoCode, PromoKind};
use crate::status::{OrderStatus, StatusTimeline, StatusUpdate};
use chrono::{DateTime, TimeZone, Utc};
use tracing::warn;

/// Id of the order that is out for delivery in the sample data.
pub const ACTIVE_ORDER: &str = "ord-001";

#[allow(clippy::too_many_arguments)]
fn dish(
    id: &str,
    name: &str,
    description: &str,
    price: u64,
    original_price: Option<u64>,
    image: &str,
    category: Category,
    rating: f32,
    reviews: u32,
    is_veg: bool,
    spice_level: SpiceLevel,
    tags: &[&str],
    calories: u32,
    prep_time_minutes: u32,
) -> MenuItem {
    MenuItem {
        id: MenuItemId::from(id),
        name: name.into(),
        description: description.into(),
        price,
        original_price,
        image: image.into(),
        category,
        rating,
        reviews,
        is_veg,
        spice_level,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        calories: Some(calories),
        prep_time_minutes: Some(prep_time_minutes),
    }
}

#[rustfmt::skip]
pub fn menu_items() -> Vec<MenuItem> {
    use Category::*;
    use SpiceLevel::*;
    vec![
        dish("breakfast-1", "Masala Dosa", "Crispy rice crepe filled with spiced potato curry, served with coconut chutney and sambar", 149, Some(179), "/masala_dosa.webp", Breakfast, 4.8, 2341, true, Medium, &["Popular", "Traditional"], 320, 15),
        dish("breakfast-2", "Idli Sambar", "Soft steamed rice cakes served with lentil soup and coconut chutney", 89, None, "/idli_sambar.webp", Breakfast, 4.7, 1856, true, Mild, &["Healthy", "Light"], 180, 10),
        dish("breakfast-3", "Vada Sambar", "Deep-fried lentil donuts soaked in tangy sambar with coconut chutney", 99, None, "/sambar_vada.webp", Breakfast, 4.6, 983, true, Medium, &["Comfort Food"], 280, 12),
        dish("breakfast-4", "Rava Upma", "Semolina porridge with vegetables, curry leaves and mustard seeds", 79, None, "/rava_upma.webp", Breakfast, 4.4, 742, true, Mild, &["Healthy"], 220, 15),
        dish("rice-1", "Chicken Biryani", "Aromatic basmati rice cooked with tender chicken and authentic spices", 299, Some(349), "/chicken_biriyani.webp", Rice, 4.9, 3421, false, Hot, &["Bestseller", "Spicy"], 580, 45),
        dish("rice-2", "Mutton Biryani", "Fragrant basmati rice layered with succulent mutton pieces and saffron", 399, Some(449), "/mutton_biriyani.webp", Rice, 4.8, 1654, false, Hot, &["Premium", "Spicy"], 650, 60),
        dish("rice-3", "Vegetable Biryani", "Aromatic rice with mixed vegetables, paneer and fragrant biryani spices", 249, None, "/veg_biriyani.webp", Rice, 4.5, 892, true, Medium, &["Vegetarian"], 420, 35),
        dish("rice-4", "Curd Rice", "Comforting rice mixed with yogurt, tempered with curry leaves and mustard", 119, None, "/curd_rice.webp", Rice, 4.3, 567, true, Mild, &["Comfort Food", "Cooling"], 280, 10),
        dish("main-1", "Ghee Roast Chicken", "Mangalorean style chicken roasted in ghee with aromatic spices", 329, None, "/ghee_roast_chicken.webp", MainCourse, 4.7, 1234, false, Hot, &["Spicy", "Coastal"], 480, 25),
        dish("main-2", "Malabar Fish Curry", "Kerala-style fish curry cooked in coconut milk with curry leaves", 279, None, "/fish_curry.webp", MainCourse, 4.6, 987, false, Medium, &["Coastal", "Authentic"], 380, 30),
        dish("curry-1", "Sambar", "Traditional lentil curry with vegetables and tamarind", 89, None, "/sambar.webp", Curries, 4.5, 1567, true, Medium, &["Traditional", "Healthy"], 150, 20),
        dish("curry-2", "Rasam", "Tangy tomato-based soup with tamarind and spices", 69, None, "/rasam.webp", Curries, 4.4, 892, true, Medium, &["Comfort Food", "Digestive"], 80, 15),
        dish("snack-1", "Masala Vadai", "Crispy lentil fritters with onions and green chilies", 59, None, "/masala_vada.webp", Snacks, 4.3, 445, true, Medium, &["Crispy", "Tea Time"], 180, 12),
        dish("snack-2", "Banana Chips", "Crispy Kerala-style banana chips fried in coconut oil", 79, None, "/banana_chips.webp", Snacks, 4.2, 334, true, Mild, &["Crispy", "Traditional"], 160, 8),
        dish("dessert-1", "Payasam", "Traditional South Indian rice pudding with jaggery and coconut milk", 89, None, "/payasam.webp", Desserts, 4.6, 678, true, Mild, &["Sweet", "Traditional"], 250, 12),
        dish("dessert-2", "Mysore Pak", "Rich and sweet confection made with ghee, sugar, and gram flour", 129, None, "/mysore_pak.webp", Desserts, 4.5, 423, true, Mild, &["Sweet", "Festival Special"], 320, 15),
    ]
}

fn promo(code: &str, value: u64, kind: PromoKind, min_order: u64, description: &str) -> PromoCode {
    PromoCode {
        code: code.into(),
        value,
        kind,
        min_order: Some(min_order),
        description: description.into(),
    }
}

/// The promo catalog, in display order.
pub fn promo_codes() -> Vec<PromoCode> {
    vec![
        promo("WELCOME10", 10, PromoKind::Percentage, 200, "10% off on your first order"),
        promo("SAVE50", 50, PromoKind::Fixed, 300, "₹50 off on orders above ₹300"),
        promo("BIRYANI20", 20, PromoKind::Percentage, 250, "20% off on Biryani orders"),
        promo("FREESHIP", 49, PromoKind::Fixed, 100, "Free delivery on any order"),
    ]
}

pub fn tracking_info() -> TrackingInfo {
    TrackingInfo {
        restaurant_location: Coordinate::new(13.0827, 80.2707),
        delivery_location: Coordinate::new(13.0878, 80.2785),
        current_driver_location: Coordinate::new(13.0850, 80.2750),
        estimated_arrival: "12 minutes".into(),
        distance_remaining: "2.3 km".into(),
        route_points: vec![
            Coordinate::new(13.0827, 80.2707),
            Coordinate::new(13.0835, 80.2720),
            Coordinate::new(13.0845, 80.2735),
            Coordinate::new(13.0850, 80.2750),
            Coordinate::new(13.0860, 80.2765),
            Coordinate::new(13.0870, 80.2775),
            Coordinate::new(13.0878, 80.2785),
        ],
    }
}

/// The customer's saved "Home" address.
pub fn home_address() -> DeliveryAddress {
    DeliveryAddress {
        name: "Home".into(),
        street: "123 Main Street, Apartment 4B".into(),
        city: "Chennai".into(),
        state: "Tamil Nadu".into(),
        postal_code: "600001".into(),
        landmark: None,
        instructions: None,
    }
}

fn office_address() -> DeliveryAddress {
    DeliveryAddress {
        name: "Office".into(),
        street: "789 Business Park, Floor 3".into(),
        postal_code: "600002".into(),
        ..home_address()
    }
}

fn person(
    id: &str,
    name: &str,
    phone: &str,
    rating: f32,
    total_deliveries: u32,
    vehicle_type: VehicleType,
    vehicle_number: &str,
) -> DeliveryPerson {
    DeliveryPerson {
        id: id.into(),
        name: name.into(),
        phone: phone.into(),
        rating,
        total_deliveries,
        vehicle_type,
        vehicle_number: vehicle_number.into(),
    }
}

/// The rider on the active order, also assigned to newly placed ones.
pub fn delivery_person() -> DeliveryPerson {
    person("dp-001", "Rajesh Kumar", "+91 98765 43210", 4.8, 1247, VehicleType::Bike, "TN 09 AB 1234")
}

fn item(menu_id: &str, quantity: u32, customizations: &[&str]) -> OrderItem {
    let menu = menu_items();
    let dish = menu.iter().find(|d| d.id.0 == menu_id);
    OrderItem {
        id: MenuItemId::from(menu_id),
        name: dish.map(|d| d.name.clone()).unwrap_or_default(),
        quantity,
        price: dish.map(|d| d.price).unwrap_or_default(),
        image: dish.map(|d| d.image.clone()).unwrap_or_default(),
        customizations: customizations.iter().map(|c| c.to_string()).collect(),
    }
}

fn at(month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

fn timeline(updates: Vec<StatusUpdate>) -> StatusTimeline {
    let mut updates = updates.into_iter();
    let Some(first) = updates.next() else {
        return StatusTimeline::confirmed_at(DateTime::<Utc>::default());
    };
    let mut timeline = StatusTimeline::confirmed_at(first.timestamp);
    for update in updates {
        if let Err(e) = timeline.append(update) {
            warn!(error = %e, "Skipping invalid sample status update");
        }
    }
    timeline
}

/// A delivered order's full progression, spread evenly between the two timestamps.
fn delivered_between(confirmed: DateTime<Utc>, delivered: DateTime<Utc>) -> StatusTimeline {
    let span = delivered - confirmed;
    let steps = OrderStatus::CANONICAL.len() as i32 - 1;
    timeline(
        OrderStatus::CANONICAL
            .iter()
            .enumerate()
            .map(|(i, status)| {
                let ts = if i as i32 == steps {
                    delivered
                } else {
                    confirmed + span * i as i32 / steps
                };
                StatusUpdate::new(*status, ts)
            })
            .collect(),
    )
}

#[allow(clippy::too_many_arguments)]
fn order(
    id: &str,
    order_number: &str,
    placed_at: DateTime<Utc>,
    items: Vec<OrderItem>,
    pricing: PriceBreakdown,
    timeline: StatusTimeline,
    delivery_address: DeliveryAddress,
    payment_method: &str,
    delivery_person: Option<DeliveryPerson>,
) -> Order {
    Order {
        id: OrderId::from(id),
        order_number: order_number.into(),
        placed_at,
        items,
        pricing,
        timeline,
        delivery_address,
        delivery_window: DeliveryWindow::Asap,
        payment_method: payment_method.into(),
        restaurant_name: RESTAURANT_NAME.into(),
        restaurant_address: RESTAURANT_ADDRESS.into(),
        delivery_person,
        tracking: None,
        special_instructions: None,
        order_type: OrderType::Delivery,
    }
}

/// One active order (`ord-001`, out for delivery) and five past ones, newest first.
pub fn orders() -> Vec<Order> {
    let kitchen = RESTAURANT_NAME;
    let active_timeline = timeline(vec![
        StatusUpdate::new(OrderStatus::Confirmed, at(1, 15, 14, 30)),
        StatusUpdate::new(OrderStatus::Preparing, at(1, 15, 14, 35)).at(kitchen),
        StatusUpdate::new(OrderStatus::Ready, at(1, 15, 14, 55)).at(kitchen),
        StatusUpdate::new(OrderStatus::PickedUp, at(1, 15, 15, 0)).at(kitchen),
        StatusUpdate::new(OrderStatus::OutForDelivery, at(1, 15, 15, 2)).at("En route"),
    ]);
    let mut active = order(
        "ord-001",
        "SR240001",
        at(1, 15, 14, 30),
        vec![
            item("rice-1", 2, &["Extra spicy", "Extra raita"]),
            item("breakfast-1", 1, &[]),
        ],
        PriceBreakdown::from_parts(747, 0, 37, 50),
        active_timeline,
        DeliveryAddress {
            landmark: Some("Near City Mall".into()),
            instructions: Some(
                "Ring the bell twice. Please call when you arrive at the gate.".into(),
            ),
            ..home_address()
        },
        "Google Pay",
        Some(delivery_person()),
    );
    active.tracking = Some(tracking_info());
    active.special_instructions = Some("Please handle with care - contains hot items".into());

    let cancelled_timeline = timeline(vec![
        StatusUpdate::new(OrderStatus::Confirmed, at(1, 3, 16, 45)),
        StatusUpdate::new(OrderStatus::Cancelled, at(1, 3, 17, 0))
            .with_message("Order cancelled due to restaurant unavailability"),
    ]);

    vec![
        active,
        order(
            "ord-002",
            "SR239998",
            at(1, 13, 19, 45),
            vec![item("main-2", 1, &[]), item("breakfast-2", 2, &[])],
            PriceBreakdown::from_parts(457, 49, 23, 0),
            delivered_between(at(1, 13, 19, 45), at(1, 13, 20, 25)),
            home_address(),
            "Credit Card",
            Some(person("dp-002", "Priya Sharma", "+91 98765 43211", 4.9, 892, VehicleType::Scooter, "TN 09 CD 5678")),
        ),
        order(
            "ord-003",
            "SR239995",
            at(1, 10, 12, 15),
            vec![item("rice-3", 1, &[]), item("dessert-1", 2, &[])],
            PriceBreakdown::from_parts(427, 0, 21, 75),
            delivered_between(at(1, 10, 12, 15), at(1, 10, 12, 58)),
            office_address(),
            "UPI",
            Some(person("dp-003", "Arjun Nair", "+91 98765 43212", 4.7, 654, VehicleType::Bicycle, "ECO-001")),
        ),
        order(
            "ord-004",
            "SR239990",
            at(1, 8, 18, 20),
            vec![item("main-1", 1, &[])],
            PriceBreakdown::from_parts(329, 49, 16, 0),
            delivered_between(at(1, 8, 18, 20), at(1, 8, 19, 10)),
            home_address(),
            "PhonePe",
            Some(person("dp-004", "Meera Patel", "+91 98765 43213", 4.6, 423, VehicleType::Scooter, "TN 09 EF 9012")),
        ),
        order(
            "ord-005",
            "SR239985",
            at(1, 5, 20, 30),
            vec![item("curry-1", 2, &[]), item("snack-1", 4, &[])],
            PriceBreakdown::from_parts(414, 0, 21, 40),
            delivered_between(at(1, 5, 20, 30), at(1, 5, 21, 12)),
            home_address(),
            "Amazon Pay",
            Some(person("dp-005", "Karthik Reddy", "+91 98765 43214", 4.5, 789, VehicleType::Bike, "TN 09 GH 3456")),
        ),
        order(
            "ord-006",
            "SR239980",
            at(1, 3, 16, 45),
            vec![item("rice-2", 1, &[])],
            PriceBreakdown::from_parts(399, 0, 20, 0),
            cancelled_timeline,
            home_address(),
            "Credit Card",
            None,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::StepIndex;

    #[test]
    fn menu_has_every_category() {
        let items = menu_items();
        assert_eq!(items.len(), 16);
        for category in Category::ALL {
            assert!(items.iter().any(|i| i.category == category));
        }
    }

    #[test]
    fn order_items_resolve_against_the_menu() {
        for order in orders() {
            for item in &order.items {
                assert!(!item.name.is_empty(), "{} unresolved", item.id);
                assert!(item.price > 0);
            }
            assert_eq!(
                order.pricing.total,
                order.pricing.subtotal + order.pricing.delivery_fee + order.pricing.tax
                    - order.pricing.discount
            );
        }
    }

    #[test]
    fn sample_timelines_are_complete() {
        let orders = orders();
        assert_eq!(orders[0].status(), OrderStatus::OutForDelivery);
        assert_eq!(orders[0].pricing.total, 734);
        for delivered in &orders[1..5] {
            assert_eq!(delivered.status(), OrderStatus::Delivered);
            assert_eq!(delivered.timeline.updates().len(), 6);
        }
        let cancelled = &orders[5];
        assert_eq!(cancelled.timeline.step_index(), StepIndex::Cancelled);
        let statuses: Vec<_> = cancelled.timeline.updates().iter().map(|u| u.status).collect();
        assert_eq!(statuses, vec![OrderStatus::Confirmed, OrderStatus::Cancelled]);
    }

    #[test]
    fn only_the_first_order_is_active() {
        let active: Vec<_> = orders().into_iter().filter(|o| o.is_active()).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, OrderId::from(ACTIVE_ORDER));
        assert!(active[0].tracking.is_some());
    }
}
