//! Shared primitive types used across the cart view engine.

use chrono::{DateTime, Utc};

/// Primary key of a shopping-cart line item.
pub type CartLineId = i64;

/// The shopping cart a line belongs to.
pub type CartId = i64;

/// The user owning the cart.
pub type UserId = i64;

/// A catalog product (the parent of one or more product items).
pub type ProductId = i64;

/// A purchasable product variant. The join key across all inputs.
pub type ProductItemId = i64;

/// A size entry of a product item.
pub type SizeId = i64;

/// A promotion at any of the three tiers.
pub type PromotionId = i64;

/// Every timestamp crossing the engine is UTC.
pub type Timestamp = DateTime<Utc>;
