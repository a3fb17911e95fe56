//! Delivery windows.
//!
//! A shopper picks either "as soon as possible" or a scheduled two-hour slot over the
//! next three days. Early and late slots carry a surcharge on the delivery fee.

use super::error::SlotError;
use crate::model::Amount;
use chrono::{Days, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Extra fee for slots starting before noon or after 8 pm.
pub const OFF_PEAK_SURCHARGE: Amount = 29;

/// Days of slots offered, today included.
pub const SLOT_DAYS: u32 = 3;

/// Today's slots need at least this much lead time (strictly more, in whole hours).
const LEAD_HOURS: u32 = 2;

/// `(start hour, end hour, popular)` for each slot of a day.
const RANGES: [(u32, u32, bool); 7] = [
    (9, 11, true),
    (11, 13, false),
    (13, 15, true),
    (15, 17, false),
    (17, 19, true),
    (19, 21, true),
    (21, 23, false),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliverySlot {
    /// `"{day offset}-{range index}"`, stable for a given day.
    pub id: String,
    pub date: NaiveDate,
    pub start_hour: u32,
    pub end_hour: u32,
    pub label: String,
    pub available: bool,
    pub popular: bool,
    pub surcharge: Amount,
    pub estimate: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum DeliveryWindow {
    #[default]
    Asap,
    Scheduled(DeliverySlot),
}

impl DeliveryWindow {
    pub fn surcharge(&self) -> Amount {
        match self {
            DeliveryWindow::Asap => 0,
            DeliveryWindow::Scheduled(slot) => slot.surcharge,
        }
    }
}

fn hour_label(hour: u32) -> String {
    let suffix = if hour < 12 { "AM" } else { "PM" };
    let twelve = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{twelve}:00 {suffix}")
}

fn surcharge_for(start_hour: u32) -> Amount {
    if start_hour < 12 || start_hour > 20 {
        OFF_PEAK_SURCHARGE
    } else {
        0
    }
}

/// Every slot for today and the next two days, laid out in restaurant-local time.
///
/// Today's slots are available only when they start more than two hours after the
/// current hour. Later days are fully open.
pub fn delivery_slots(now: NaiveDateTime) -> Vec<DeliverySlot> {
    let today = now.date();
    let current_hour = now.hour();
    let mut slots = Vec::with_capacity(SLOT_DAYS as usize * RANGES.len());

    for day in 0..SLOT_DAYS {
        let Some(date) = today.checked_add_days(Days::new(u64::from(day))) else {
            break;
        };
        let is_today = day == 0;
        for (index, (start, end, popular)) in RANGES.iter().copied().enumerate() {
            let available = !is_today || start > current_hour + LEAD_HOURS;
            let estimate = if is_today && start <= current_hour + 3 {
                "30-45 mins"
            } else {
                "45-60 mins"
            };
            slots.push(DeliverySlot {
                id: format!("{day}-{index}"),
                date,
                start_hour: start,
                end_hour: end,
                label: format!("{} - {}", hour_label(start), hour_label(end)),
                available,
                popular: popular && available,
                surcharge: surcharge_for(start),
                estimate: estimate.to_string(),
            });
        }
    }
    slots
}

/// Resolves a slot id picked by the shopper into a scheduled window.
pub fn find_slot(now: NaiveDateTime, id: &str) -> Result<DeliveryWindow, SlotError> {
    let slot = delivery_slots(now)
        .into_iter()
        .find(|s| s.id == id)
        .ok_or_else(|| SlotError::Unknown(id.to_string()))?;
    if !slot.available {
        return Err(SlotError::Unavailable(slot.label));
    }
    Ok(DeliveryWindow::Scheduled(slot))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(hour, 10, 0)
            .unwrap()
    }

    #[test]
    fn three_days_of_seven_slots() {
        let slots = delivery_slots(at(8));
        assert_eq!(slots.len(), 21);
        assert_eq!(slots[0].label, "9:00 AM - 11:00 AM");
        assert_eq!(slots[6].label, "9:00 PM - 11:00 PM");
        assert_eq!(slots[7].date, NaiveDate::from_ymd_opt(2024, 1, 16).unwrap());
    }

    #[test]
    fn today_needs_more_than_two_hours_lead() {
        let slots = delivery_slots(at(12));
        let today: Vec<_> = slots.iter().filter(|s| s.id.starts_with("0-")).collect();
        // 12 + 2 = 14, so 15:00 is the first bookable start.
        assert!(!today[2].available, "13:00 slot");
        assert!(today[3].available, "15:00 slot");
        assert!(!today[2].popular);
        assert!(slots.iter().filter(|s| !s.id.starts_with("0-")).all(|s| s.available));
    }

    #[test]
    fn off_peak_slots_carry_the_surcharge() {
        let slots = delivery_slots(at(6));
        let surcharges: Vec<_> = slots[..7].iter().map(|s| s.surcharge).collect();
        assert_eq!(surcharges, vec![29, 29, 0, 0, 0, 0, 29]);
    }

    #[test]
    fn find_slot_rejects_unknown_and_unavailable() {
        assert_eq!(
            find_slot(at(20), "9-9"),
            Err(SlotError::Unknown("9-9".into()))
        );
        assert!(matches!(
            find_slot(at(20), "0-6"),
            Err(SlotError::Unavailable(_))
        ));
        let window = find_slot(at(20), "1-0").unwrap();
        assert_eq!(window.surcharge(), OFF_PEAK_SURCHARGE);
    }
}
