//! Input records and the flat response row.
//!
//! Cart lines, catalog items and size rows arrive already fetched and
//! scoped to a single user. They are read-only snapshots; nothing in
//! this crate mutates them.

use crate::{
    promotion::{PromoTier, PromotionTier},
    types::{CartId, CartLineId, ProductId, ProductItemId, PromotionId, SizeId, Timestamp, UserId},
};
use serde::{Deserialize, Serialize};

/// One line of a user's shopping cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub id:               CartLineId,
    pub shopping_cart_id: CartId,
    pub user_id:          UserId,
    pub product_item_id:  ProductItemId,
    pub size_id:          SizeId,
    pub qty:              i32,
    pub created_at:       Timestamp,
    pub updated_at:       Timestamp,
}

/// One product item of the catalog slice, with its three promotion tiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub product_item_id: ProductItemId,
    pub product_id:      ProductId,
    pub name:            String,
    pub color:           String,
    /// Decimal as text; never parsed here.
    pub price:           String,
    pub product_image_1: String,
    #[serde(default)]
    pub product_image_2: Option<String>,
    #[serde(default)]
    pub product_image_3: Option<String>,
    pub active:          bool,
    pub qty:             i32,
    #[serde(default)]
    pub category_promo:  PromotionTier,
    #[serde(default)]
    pub brand_promo:     PromotionTier,
    #[serde(default)]
    pub product_promo:   PromotionTier,
}

impl CatalogItem {
    pub fn promotion(&self, tier: PromoTier) -> &PromotionTier {
        match tier {
            PromoTier::Category => &self.category_promo,
            PromoTier::Brand    => &self.brand_promo,
            PromoTier::Product  => &self.product_promo,
        }
    }
}

/// Size and size-level stock of a product item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeRow {
    pub product_item_id: ProductItemId,
    pub size_id:         SizeId,
    pub size_value:      String,
    pub qty:             i32,
}

/// How completely a response row was joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinStatus {
    Complete,
    MissingCartLine,
    MissingSize,
    MissingBoth,
}

impl JoinStatus {
    pub fn from_presence(has_cart_line: bool, has_size: bool) -> Self {
        match (has_cart_line, has_size) {
            (true, true)   => JoinStatus::Complete,
            (false, true)  => JoinStatus::MissingCartLine,
            (true, false)  => JoinStatus::MissingSize,
            (false, false) => JoinStatus::MissingBoth,
        }
    }

    pub fn is_complete(self) -> bool {
        self == JoinStatus::Complete
    }

    pub fn missing_cart_line(self) -> bool {
        matches!(self, JoinStatus::MissingCartLine | JoinStatus::MissingBoth)
    }

    pub fn missing_size(self) -> bool {
        matches!(self, JoinStatus::MissingSize | JoinStatus::MissingBoth)
    }
}

/// The denormalized view of one catalog item, as sent to the client.
///
/// Fields sourced from the cart line or the size row are `None` when
/// that side did not join, so an incomplete row can never pass for a
/// real one. Promotion fields are copied tier by tier, without any
/// precedence between tiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseRow {
    pub id:               Option<CartLineId>,
    pub shopping_cart_id: Option<CartId>,
    pub created_at:       Option<Timestamp>,
    pub updated_at:       Option<Timestamp>,
    pub product_item_id:  ProductItemId,
    pub name:             String,
    pub qty:              Option<i32>,
    pub product_id:       ProductId,
    pub product_image:    String,
    pub size_id:          Option<SizeId>,
    pub size_value:       Option<String>,
    pub size_qty:         Option<i32>,
    pub color:            String,
    pub price:            String,
    pub active:           bool,

    pub category_promo_id:            Option<PromotionId>,
    pub category_promo_name:          Option<String>,
    pub category_promo_description:   Option<String>,
    pub category_promo_discount_rate: Option<String>,
    pub category_promo_active:        Option<bool>,
    pub category_promo_start_date:    Option<Timestamp>,
    pub category_promo_end_date:      Option<Timestamp>,

    pub brand_promo_id:            Option<PromotionId>,
    pub brand_promo_name:          Option<String>,
    pub brand_promo_description:   Option<String>,
    pub brand_promo_discount_rate: Option<String>,
    pub brand_promo_active:        Option<bool>,
    pub brand_promo_start_date:    Option<Timestamp>,
    pub brand_promo_end_date:      Option<Timestamp>,

    pub product_promo_id:            Option<PromotionId>,
    pub product_promo_name:          Option<String>,
    pub product_promo_description:   Option<String>,
    pub product_promo_discount_rate: Option<String>,
    pub product_promo_active:        Option<bool>,
    pub product_promo_start_date:    Option<Timestamp>,
    pub product_promo_end_date:      Option<Timestamp>,

    pub join_status: JoinStatus,
}

impl ResponseRow {
    /// Build a row from whatever sides matched. Never fails.
    pub fn join(item: &CatalogItem, line: Option<&CartLine>, size: Option<&SizeRow>) -> Self {
        let cat = item.category_promo.clone();
        let brand = item.brand_promo.clone();
        let prod = item.product_promo.clone();

        Self {
            id:               line.map(|l| l.id),
            shopping_cart_id: line.map(|l| l.shopping_cart_id),
            created_at:       line.map(|l| l.created_at),
            updated_at:       line.map(|l| l.updated_at),
            product_item_id:  item.product_item_id,
            name:             item.name.clone(),
            qty:              line.map(|l| l.qty),
            product_id:       item.product_id,
            product_image:    item.product_image_1.clone(),
            size_id:          size.map(|s| s.size_id),
            size_value:       size.map(|s| s.size_value.clone()),
            size_qty:         size.map(|s| s.qty),
            color:            item.color.clone(),
            price:            item.price.clone(),
            active:           item.active,

            category_promo_id:            cat.id,
            category_promo_name:          cat.name,
            category_promo_description:   cat.description,
            category_promo_discount_rate: cat.discount_rate,
            category_promo_active:        cat.active,
            category_promo_start_date:    cat.start_date,
            category_promo_end_date:      cat.end_date,

            brand_promo_id:            brand.id,
            brand_promo_name:          brand.name,
            brand_promo_description:   brand.description,
            brand_promo_discount_rate: brand.discount_rate,
            brand_promo_active:        brand.active,
            brand_promo_start_date:    brand.start_date,
            brand_promo_end_date:      brand.end_date,

            product_promo_id:            prod.id,
            product_promo_name:          prod.name,
            product_promo_description:   prod.description,
            product_promo_discount_rate: prod.discount_rate,
            product_promo_active:        prod.active,
            product_promo_start_date:    prod.start_date,
            product_promo_end_date:      prod.end_date,

            join_status: JoinStatus::from_presence(line.is_some(), size.is_some()),
        }
    }

    /// Re-nest the flattened fields of one tier.
    pub fn promotion(&self, tier: PromoTier) -> PromotionTier {
        match tier {
            PromoTier::Category => PromotionTier {
                id:            self.category_promo_id,
                name:          self.category_promo_name.clone(),
                description:   self.category_promo_description.clone(),
                discount_rate: self.category_promo_discount_rate.clone(),
                active:        self.category_promo_active,
                start_date:    self.category_promo_start_date,
                end_date:      self.category_promo_end_date,
            },
            PromoTier::Brand => PromotionTier {
                id:            self.brand_promo_id,
                name:          self.brand_promo_name.clone(),
                description:   self.brand_promo_description.clone(),
                discount_rate: self.brand_promo_discount_rate.clone(),
                active:        self.brand_promo_active,
                start_date:    self.brand_promo_start_date,
                end_date:      self.brand_promo_end_date,
            },
            PromoTier::Product => PromotionTier {
                id:            self.product_promo_id,
                name:          self.product_promo_name.clone(),
                description:   self.product_promo_description.clone(),
                discount_rate: self.product_promo_discount_rate.clone(),
                active:        self.product_promo_active,
                start_date:    self.product_promo_start_date,
                end_date:      self.product_promo_end_date,
            },
        }
    }
}
