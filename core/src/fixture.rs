//! Deterministic cart fixtures for tests and the benchmark harness.
//!
//! RULE: fixtures never touch a platform RNG. Everything flows from one
//! u64 seed, so a seed always reproduces the same three input sets.

use crate::{
    model::{CartLine, CatalogItem, SizeRow},
    promotion::PromotionTier,
    types::{ProductItemId, Timestamp},
};
use chrono::{DateTime, Duration, Utc};
use rand::{seq::SliceRandom, RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

const COLORS: &[&str] = &["black", "white", "navy", "olive", "red", "sand"];
const SIZE_LABELS: &[&str] = &["XS", "S", "M", "L", "XL", "XXL"];
const FIRST_PRODUCT_ITEM_ID: ProductItemId = 1_000;
const FIRST_SIZE_ID: i64 = 50_000;

/// A seeded PCG stream.
pub struct FixtureRng {
    inner: Pcg64Mcg,
}

impl FixtureRng {
    pub fn new(seed: u64) -> Self {
        Self { inner: Pcg64Mcg::seed_from_u64(seed) }
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Bernoulli trial: returns true with probability p.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    pub fn pick<'a>(&mut self, options: &[&'a str]) -> &'a str {
        options[self.next_u64_below(options.len() as u64) as usize]
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.inner);
    }
}

/// Three consistent input sets: every catalog item has exactly one cart
/// line and one size row, matched on both product item and size id.
#[derive(Debug, Clone, PartialEq)]
pub struct CartFixture {
    pub cart_lines:    Vec<CartLine>,
    pub catalog_items: Vec<CatalogItem>,
    pub size_rows:     Vec<SizeRow>,
}

impl CartFixture {
    /// Generate `n` joinable records per input. Cart lines and size rows
    /// are shuffled so their order never matches catalog order.
    pub fn generate(n: usize, seed: u64) -> Self {
        let mut rng = FixtureRng::new(seed);
        let base = base_time();

        let mut catalog_items = Vec::with_capacity(n);
        let mut cart_lines = Vec::with_capacity(n);
        let mut size_rows = Vec::with_capacity(n);

        for i in 0..n {
            let product_item_id = FIRST_PRODUCT_ITEM_ID + i as i64;
            let size_id = FIRST_SIZE_ID + i as i64;
            let added = base + Duration::minutes(rng.next_u64_below(60 * 24 * 30) as i64);

            catalog_items.push(CatalogItem {
                product_item_id,
                product_id:      100 + (i / 3) as i64,
                name:            format!("Item {i}"),
                color:           rng.pick(COLORS).to_string(),
                price:           format!("{}.{:02}", 5 + rng.next_u64_below(195), rng.next_u64_below(100)),
                product_image_1: format!("https://cdn.example.com/items/{product_item_id}/1.jpg"),
                product_image_2: rng.chance(0.5)
                    .then(|| format!("https://cdn.example.com/items/{product_item_id}/2.jpg")),
                product_image_3: None,
                active:          rng.chance(0.9),
                qty:             rng.next_u64_below(500) as i32,
                category_promo:  random_promotion(&mut rng, base, "Category"),
                brand_promo:     random_promotion(&mut rng, base, "Brand"),
                product_promo:   random_promotion(&mut rng, base, "Product"),
            });

            cart_lines.push(CartLine {
                id:               10_000 + i as i64,
                shopping_cart_id: 1,
                user_id:          1,
                product_item_id,
                size_id,
                qty:              1 + rng.next_u64_below(5) as i32,
                created_at:       added,
                updated_at:       added + Duration::minutes(rng.next_u64_below(120) as i64),
            });

            size_rows.push(SizeRow {
                product_item_id,
                size_id,
                size_value: rng.pick(SIZE_LABELS).to_string(),
                qty:        rng.next_u64_below(80) as i32,
            });
        }

        rng.shuffle(&mut cart_lines);
        rng.shuffle(&mut size_rows);

        Self { cart_lines, catalog_items, size_rows }
    }

    /// Append a later cart line and size row for each of the first `k`
    /// catalog items, sharing their keys. The appended records are the
    /// ones a last-wins join must pick.
    pub fn with_duplicates(mut self, k: usize) -> Self {
        let k = k.min(self.catalog_items.len());
        for i in 0..k {
            let product_item_id = self.catalog_items[i].product_item_id;
            let line = self.cart_lines.iter().find(|l| l.product_item_id == product_item_id).cloned();
            if let Some(mut later) = line {
                later.id += 1_000_000;
                later.qty += 10;
                self.cart_lines.push(later);
            }
            let size = self.size_rows.iter().find(|s| s.product_item_id == product_item_id).cloned();
            if let Some(mut later) = size {
                later.size_value = format!("{}-restocked", later.size_value);
                later.qty += 100;
                self.size_rows.push(later);
            }
        }
        self
    }

    /// Drop every cart line for the catalog item at `index`.
    pub fn without_cart_line(mut self, index: usize) -> Self {
        if let Some(item) = self.catalog_items.get(index) {
            let id = item.product_item_id;
            self.cart_lines.retain(|l| l.product_item_id != id);
        }
        self
    }

    /// Drop every size row for the catalog item at `index`.
    pub fn without_size(mut self, index: usize) -> Self {
        if let Some(item) = self.catalog_items.get(index) {
            let id = item.product_item_id;
            self.size_rows.retain(|s| s.product_item_id != id);
        }
        self
    }
}

fn base_time() -> Timestamp {
    // 2024-01-01T00:00:00Z
    DateTime::<Utc>::UNIX_EPOCH + Duration::days(19_723)
}

fn random_promotion(rng: &mut FixtureRng, base: Timestamp, tier: &str) -> PromotionTier {
    if !rng.chance(0.6) {
        return PromotionTier::NONE;
    }
    let id = 1 + rng.next_u64_below(50) as i64;
    let start = base - Duration::days(rng.next_u64_below(30) as i64);
    PromotionTier {
        id:            Some(id),
        name:          Some(format!("{tier} promo {id}")),
        description:   rng.chance(0.7).then(|| format!("{tier}-wide discount")),
        discount_rate: Some(format!("{}", 5 * (1 + rng.next_u64_below(10)))),
        active:        Some(rng.chance(0.8)),
        start_date:    Some(start),
        end_date:      rng.chance(0.8).then(|| start + Duration::days(14 + rng.next_u64_below(60) as i64)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_fixture() {
        assert_eq!(CartFixture::generate(25, 99), CartFixture::generate(25, 99));
        assert_ne!(CartFixture::generate(25, 99), CartFixture::generate(25, 100));
    }

    #[test]
    fn fixture_keys_are_consistent() {
        let fixture = CartFixture::generate(30, 5);
        for item in &fixture.catalog_items {
            let lines: Vec<_> = fixture
                .cart_lines
                .iter()
                .filter(|l| l.product_item_id == item.product_item_id)
                .collect();
            let sizes: Vec<_> = fixture
                .size_rows
                .iter()
                .filter(|s| s.product_item_id == item.product_item_id)
                .collect();
            assert_eq!(lines.len(), 1);
            assert_eq!(sizes.len(), 1);
            assert_eq!(lines[0].size_id, sizes[0].size_id);
        }
    }

    #[test]
    fn duplicates_are_appended_last() {
        let fixture = CartFixture::generate(10, 5).with_duplicates(3);
        assert_eq!(fixture.cart_lines.len(), 13);
        assert_eq!(fixture.size_rows.len(), 13);
        let last = &fixture.cart_lines[12];
        assert_eq!(last.product_item_id, fixture.catalog_items[2].product_item_id);
    }
}
