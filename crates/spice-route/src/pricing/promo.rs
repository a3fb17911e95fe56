//! Promo codes and the catalog they are redeemed from.

use super::error::PromoError;
use super::promo_discount;
use crate::model::Amount;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromoKind {
    Percentage,
    Fixed,
}

/// A promo descriptor.
///
/// Serializes to the persisted blob shape `{code, discount, type, minOrder}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromoCode {
    pub code: String,
    /// Percent for `Percentage`, rupees for `Fixed`.
    #[serde(rename = "discount")]
    pub value: Amount,
    #[serde(rename = "type")]
    pub kind: PromoKind,
    #[serde(default)]
    pub min_order: Option<Amount>,
    #[serde(default, skip_serializing)]
    pub description: String,
}

impl PromoCode {
    /// A zero value or a percentage above 100 can never produce a sensible discount.
    pub fn is_well_formed(&self) -> bool {
        self.value > 0 && !(self.kind == PromoKind::Percentage && self.value > 100)
    }

    pub fn applies_to(&self, subtotal: Amount) -> bool {
        self.min_order.is_none_or(|min| subtotal >= min)
    }
}

/// The promo codes on offer.
#[derive(Debug, Clone, Default)]
pub struct PromoCatalog {
    codes: Vec<PromoCode>,
}

/// A successful redemption: the promo and what it takes off this subtotal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redemption {
    pub promo: PromoCode,
    pub discount: Amount,
}

impl PromoCatalog {
    pub fn new(codes: Vec<PromoCode>) -> Self {
        Self { codes }
    }

    pub fn codes(&self) -> &[PromoCode] {
        &self.codes
    }

    /// Case-insensitive lookup, ignoring surrounding whitespace.
    pub fn find(&self, code: &str) -> Option<&PromoCode> {
        let code = code.trim();
        self.codes.iter().find(|p| p.code.eq_ignore_ascii_case(code))
    }

    /// Validates `code` against `subtotal` the way the checkout form does.
    pub fn redeem(&self, code: &str, subtotal: Amount) -> Result<Redemption, PromoError> {
        if code.trim().is_empty() {
            return Err(PromoError::Empty);
        }
        let promo = self
            .find(code)
            .ok_or_else(|| PromoError::Unknown(code.trim().to_string()))?;
        if let Some(minimum) = promo.min_order.filter(|min| subtotal < *min) {
            return Err(PromoError::BelowMinimum {
                code: promo.code.clone(),
                minimum,
            });
        }
        Ok(Redemption {
            promo: promo.clone(),
            discount: promo_discount(subtotal, promo),
        })
    }

    /// Codes whose minimum this subtotal already meets, for suggestions.
    pub fn eligible(&self, subtotal: Amount) -> impl Iterator<Item = &PromoCode> {
        self.codes
            .iter()
            .filter(move |p| p.is_well_formed() && p.applies_to(subtotal))
    }

    /// The best saving on offer for `subtotal`, if any code applies.
    pub fn best_for(&self, subtotal: Amount) -> Option<&PromoCode> {
        self.eligible(subtotal)
            .max_by_key(|p| promo_discount(subtotal, p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn catalog() -> PromoCatalog {
        PromoCatalog::new(fixtures::promo_codes())
    }

    #[test]
    fn lookup_ignores_case_and_whitespace() {
        let catalog = catalog();
        assert_eq!(catalog.find("  welcome10 ").map(|p| p.value), Some(10));
        assert!(catalog.find("WELCOME11").is_none());
    }

    #[test]
    fn redeem_reports_each_failure() {
        let catalog = catalog();
        assert_eq!(catalog.redeem("   ", 500), Err(PromoError::Empty));
        assert_eq!(
            catalog.redeem("nope", 500),
            Err(PromoError::Unknown("nope".into()))
        );
        assert_eq!(
            catalog.redeem("save50", 250),
            Err(PromoError::BelowMinimum {
                code: "SAVE50".into(),
                minimum: 300
            })
        );
    }

    #[test]
    fn redeem_returns_the_discount_for_this_subtotal() {
        let redemption = catalog().redeem("BIRYANI20", 598).unwrap();
        assert_eq!(redemption.promo.code, "BIRYANI20");
        assert_eq!(redemption.discount, 120);
    }

    #[test]
    fn suggestions_follow_the_minimum() {
        let catalog = catalog();
        let codes: Vec<_> = catalog.eligible(220).map(|p| p.code.as_str()).collect();
        assert_eq!(codes, vec!["WELCOME10", "FREESHIP"]);
        assert_eq!(
            catalog.best_for(747).map(|p| p.code.as_str()),
            Some("BIRYANI20")
        );
    }

    #[test]
    fn persisted_shape_matches_the_stored_blob() {
        let promo = catalog().find("WELCOME10").cloned().unwrap();
        let json = serde_json::to_value(&promo).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"code": "WELCOME10", "discount": 10, "type": "percentage", "minOrder": 200})
        );
    }
}
