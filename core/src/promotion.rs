//! Promotion tiers carried by a catalog item.
//!
//! A catalog item has three independent tiers: category, brand and
//! product. Each one is copied through to the response untouched. This
//! module only classifies a single tier; it never decides which tier's
//! discount applies.

use crate::types::{PromotionId, Timestamp};
use serde::{Deserialize, Serialize};

/// Which of the three promotion blocks a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromoTier {
    Category,
    Brand,
    Product,
}

impl PromoTier {
    pub const ALL: [PromoTier; 3] = [PromoTier::Category, PromoTier::Brand, PromoTier::Product];

    /// Field-name prefix used in the flattened response row.
    pub fn prefix(self) -> &'static str {
        match self {
            PromoTier::Category => "category_promo",
            PromoTier::Brand    => "brand_promo",
            PromoTier::Product  => "product_promo",
        }
    }
}

/// One promotion block. Every field is independently nullable; a tier
/// with no fields set means "no promotion at this tier".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PromotionTier {
    pub id:            Option<PromotionId>,
    pub name:          Option<String>,
    pub description:   Option<String>,
    /// Decimal as text, passed through verbatim.
    pub discount_rate: Option<String>,
    pub active:        Option<bool>,
    pub start_date:    Option<Timestamp>,
    pub end_date:      Option<Timestamp>,
}

impl PromotionTier {
    pub const NONE: PromotionTier = PromotionTier {
        id:            None,
        name:          None,
        description:   None,
        discount_rate: None,
        active:        None,
        start_date:    None,
        end_date:      None,
    };

    pub fn is_absent(&self) -> bool {
        *self == Self::NONE
    }

    /// Classify this tier at instant `now`.
    ///
    /// Date bounds are inclusive. A missing bound leaves that side of
    /// the window open.
    pub fn status(&self, now: Timestamp) -> PromotionStatus {
        if self.id.is_none() {
            return PromotionStatus::None;
        }
        if self.active != Some(true) {
            return PromotionStatus::Inactive;
        }
        if let Some(start) = self.start_date {
            if now < start {
                return PromotionStatus::Scheduled;
            }
        }
        if let Some(end) = self.end_date {
            if now > end {
                return PromotionStatus::Expired;
            }
        }
        PromotionStatus::Active
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromotionStatus {
    /// No promotion at this tier.
    None,
    Inactive,
    Scheduled,
    Active,
    Expired,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn at(day: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap()
    }

    fn spring_sale() -> PromotionTier {
        PromotionTier {
            id:            Some(7),
            name:          Some("Spring sale".into()),
            description:   Some("10% off outerwear".into()),
            discount_rate: Some("10".into()),
            active:        Some(true),
            start_date:    Some(at(1)),
            end_date:      Some(at(20)),
        }
    }

    #[test]
    fn absent_tier_has_no_status() {
        assert!(PromotionTier::default().is_absent());
        assert_eq!(PromotionTier::NONE.status(at(5)), PromotionStatus::None);
    }

    #[test]
    fn status_follows_date_window() {
        let promo = spring_sale();
        assert_eq!(promo.status(at(10)), PromotionStatus::Active);
        assert_eq!(promo.status(at(1)), PromotionStatus::Active, "start bound is inclusive");
        assert_eq!(promo.status(at(21)), PromotionStatus::Expired);

        let mut later = promo.clone();
        later.start_date = Some(at(15));
        assert_eq!(later.status(at(10)), PromotionStatus::Scheduled);
    }

    #[test]
    fn inactive_flag_wins_over_window() {
        let mut promo = spring_sale();
        promo.active = Some(false);
        assert_eq!(promo.status(at(10)), PromotionStatus::Inactive);

        promo.active = None;
        assert_eq!(promo.status(at(10)), PromotionStatus::Inactive);
    }

    #[test]
    fn open_ended_window_never_expires() {
        let mut promo = spring_sale();
        promo.end_date = None;
        assert_eq!(promo.status(at(28)), PromotionStatus::Active);
    }

    #[test]
    fn prefixes_match_response_field_names() {
        let prefixes: Vec<&str> = PromoTier::ALL.iter().map(|t| t.prefix()).collect();
        assert_eq!(prefixes, vec!["category_promo", "brand_promo", "product_promo"]);
    }
}
