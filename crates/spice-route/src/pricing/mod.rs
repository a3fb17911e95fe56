//! # Pricing Calculator
//!
//! Pure functions from a cart subtotal, an optional promo and a delivery window to a
//! [`PriceBreakdown`]. All amounts are whole rupees; every percentage is rounded
//! half-up in integer arithmetic, so `747 * 5%` is 37 and `747 * 10%` is 75.
//!
//! | Line | Rule |
//! |---|---|
//! | delivery fee | 0 at or above the free-delivery threshold (299), else the flat fee (49), plus any slot surcharge |
//! | tax | 5% of the subtotal |
//! | discount | promo value when the subtotal meets the promo minimum, never more than subtotal + fee + tax |
//! | total | subtotal + fee + tax - discount |
//!
//! Nothing here fails: a malformed promo simply discounts nothing. Validation that the
//! shopper should see lives in [`promo::PromoCatalog::redeem`] and
//! [`slots::find_slot`].

pub mod error;
pub mod promo;
pub mod slots;

pub use error::{PromoError, SlotError};
pub use promo::{PromoCatalog, PromoCode, PromoKind};
pub use slots::{DeliverySlot, DeliveryWindow};

use crate::model::Amount;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Fee and tax parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    pub free_delivery_threshold: Amount,
    pub delivery_fee: Amount,
    pub tax_percent: Amount,
    /// Minutes east of UTC used to lay out delivery slots in restaurant time.
    pub utc_offset_minutes: i32,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            free_delivery_threshold: 299,
            delivery_fee: 49,
            tax_percent: 5,
            utc_offset_minutes: 330,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub subtotal: Amount,
    pub delivery_fee: Amount,
    pub tax: Amount,
    pub discount: Amount,
    pub total: Amount,
}

impl PriceBreakdown {
    /// Assembles a breakdown, clamping the discount so the total never goes negative.
    pub fn from_parts(subtotal: Amount, delivery_fee: Amount, tax: Amount, discount: Amount) -> Self {
        let gross = subtotal + delivery_fee + tax;
        let discount = discount.min(gross);
        Self {
            subtotal,
            delivery_fee,
            tax,
            discount,
            total: gross - discount,
        }
    }
}

/// `amount * percent / 100`, rounded half-up.
pub fn round_percent(amount: Amount, percent: Amount) -> Amount {
    (amount * percent + 50) / 100
}

/// Base delivery fee, before any slot surcharge.
pub fn delivery_fee(subtotal: Amount, config: &PricingConfig) -> Amount {
    if subtotal >= config.free_delivery_threshold {
        0
    } else {
        config.delivery_fee
    }
}

pub fn tax(subtotal: Amount, config: &PricingConfig) -> Amount {
    round_percent(subtotal, config.tax_percent)
}

/// Unclamped discount for `promo` on `subtotal`. Zero when the promo is malformed or
/// the subtotal is below its minimum.
pub fn promo_discount(subtotal: Amount, promo: &PromoCode) -> Amount {
    if !promo.is_well_formed() || !promo.applies_to(subtotal) {
        return 0;
    }
    match promo.kind {
        PromoKind::Percentage => round_percent(subtotal, promo.value),
        PromoKind::Fixed => promo.value,
    }
}

/// How much more the shopper must add to get free delivery. Zero once they qualify.
pub fn free_delivery_gap(subtotal: Amount, config: &PricingConfig) -> Amount {
    config.free_delivery_threshold.saturating_sub(subtotal)
}

/// Prices an order.
pub fn quote(
    subtotal: Amount,
    promo: Option<&PromoCode>,
    window: &DeliveryWindow,
    config: &PricingConfig,
) -> PriceBreakdown {
    let fee = delivery_fee(subtotal, config) + window.surcharge();
    let tax = tax(subtotal, config);
    let discount = promo.map_or(0, |p| promo_discount(subtotal, p));
    let breakdown = PriceBreakdown::from_parts(subtotal, fee, tax, discount);
    debug!(
        subtotal,
        fee,
        tax,
        discount = breakdown.discount,
        total = breakdown.total,
        "Quote computed"
    );
    breakdown
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> PricingConfig {
        PricingConfig::default()
    }

    fn promo(code: &str, kind: PromoKind, value: Amount, min_order: Option<Amount>) -> PromoCode {
        PromoCode {
            code: code.to_string(),
            value,
            kind,
            min_order,
            description: String::new(),
        }
    }

    #[test]
    fn welcome10_on_747() {
        let welcome = promo("WELCOME10", PromoKind::Percentage, 10, Some(200));
        let q = quote(747, Some(&welcome), &DeliveryWindow::Asap, &cfg());
        assert_eq!(
            q,
            PriceBreakdown {
                subtotal: 747,
                delivery_fee: 0,
                tax: 37,
                discount: 75,
                total: 709,
            }
        );
    }

    #[test]
    fn small_order_pays_the_flat_fee() {
        let q = quote(150, None, &DeliveryWindow::Asap, &cfg());
        assert_eq!(q.delivery_fee, 49);
        assert_eq!(q.tax, 8);
        assert_eq!(q.total, 207);
    }

    #[test]
    fn total_identity_and_fee_threshold_hold_across_subtotals() {
        for subtotal in (0..2000).step_by(7) {
            let q = quote(subtotal, None, &DeliveryWindow::Asap, &cfg());
            assert_eq!(q.total, q.subtotal + q.delivery_fee + q.tax - q.discount);
            assert_eq!(q.delivery_fee == 0, subtotal >= 299, "subtotal {subtotal}");
            assert!(q.delivery_fee == 0 || q.delivery_fee == 49);
            assert_eq!(q.tax, (subtotal * 5 + 50) / 100);
        }
    }

    #[test]
    fn tax_rounds_half_up() {
        assert_eq!(tax(747, &cfg()), 37);
        assert_eq!(tax(10, &cfg()), 1);
        assert_eq!(tax(9, &cfg()), 0);
        assert_eq!(tax(0, &cfg()), 0);
    }

    #[test]
    fn promo_below_minimum_discounts_nothing() {
        let save50 = promo("SAVE50", PromoKind::Fixed, 50, Some(300));
        let q = quote(299, Some(&save50), &DeliveryWindow::Asap, &cfg());
        assert_eq!(q.discount, 0);
        let q = quote(300, Some(&save50), &DeliveryWindow::Asap, &cfg());
        assert_eq!(q.discount, 50);
    }

    #[test]
    fn fixed_discount_is_clamped_to_the_gross() {
        let huge = promo("BIG", PromoKind::Fixed, 5_000, None);
        let q = quote(100, Some(&huge), &DeliveryWindow::Asap, &cfg());
        assert_eq!(q.discount, 100 + 49 + 5);
        assert_eq!(q.total, 0);
    }

    #[test]
    fn malformed_promos_discount_nothing() {
        let zero = promo("ZERO", PromoKind::Fixed, 0, None);
        let over = promo("OVER", PromoKind::Percentage, 150, None);
        assert_eq!(promo_discount(500, &zero), 0);
        assert_eq!(promo_discount(500, &over), 0);
    }

    #[test]
    fn free_delivery_gap_counts_down_to_zero() {
        assert_eq!(free_delivery_gap(150, &cfg()), 149);
        assert_eq!(free_delivery_gap(299, &cfg()), 0);
        assert_eq!(free_delivery_gap(800, &cfg()), 0);
    }
}
