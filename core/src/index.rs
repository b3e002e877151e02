//! Single-pass lookup indices over cart lines and size rows.
//!
//! RULE: on a duplicate key the later element in input order replaces
//! the earlier one. Both indices borrow their input; nothing is copied
//! or mutated.

use crate::{
    config::SizeJoin,
    model::{CartLine, SizeRow},
    types::{ProductItemId, SizeId},
};
use std::collections::HashMap;

/// Cart lines keyed by product item.
#[derive(Debug, Default)]
pub struct CartIndex<'a> {
    by_item:    HashMap<ProductItemId, &'a CartLine>,
    duplicates: usize,
}

impl<'a> CartIndex<'a> {
    pub fn build(lines: &'a [CartLine]) -> Self {
        let mut by_item = HashMap::with_capacity(lines.len());
        let mut duplicates = 0;
        for line in lines {
            if by_item.insert(line.product_item_id, line).is_some() {
                duplicates += 1;
            }
        }
        if duplicates > 0 {
            log::debug!("index: {duplicates} cart line(s) shadowed by a later line for the same product item");
        }
        Self { by_item, duplicates }
    }

    pub fn get(&self, product_item_id: ProductItemId) -> Option<&'a CartLine> {
        self.by_item.get(&product_item_id).copied()
    }

    pub fn len(&self) -> usize {
        self.by_item.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_item.is_empty()
    }

    /// Number of input lines replaced by a later line with the same key.
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum SizeKey {
    Item(ProductItemId),
    Selection(ProductItemId, SizeId),
}

/// Size rows keyed according to a [`SizeJoin`] mode.
#[derive(Debug)]
pub struct SizeIndex<'a> {
    mode:       SizeJoin,
    by_key:     HashMap<SizeKey, &'a SizeRow>,
    duplicates: usize,
}

impl<'a> SizeIndex<'a> {
    pub fn build(rows: &'a [SizeRow], mode: SizeJoin) -> Self {
        let mut by_key = HashMap::with_capacity(rows.len());
        let mut duplicates = 0;
        for row in rows {
            let key = match mode {
                SizeJoin::ProductItem   => SizeKey::Item(row.product_item_id),
                SizeJoin::CartSelection => SizeKey::Selection(row.product_item_id, row.size_id),
            };
            if by_key.insert(key, row).is_some() {
                duplicates += 1;
            }
        }
        if duplicates > 0 {
            log::debug!("index: {duplicates} size row(s) shadowed by a later row ({mode:?})");
        }
        Self { mode, by_key, duplicates }
    }

    pub fn mode(&self) -> SizeJoin {
        self.mode
    }

    /// Resolve the size for a product item.
    ///
    /// In [`SizeJoin::CartSelection`] mode the cart line supplies the
    /// size id; without a line there is no selection and `None` is
    /// returned.
    pub fn lookup(
        &self,
        product_item_id: ProductItemId,
        line: Option<&CartLine>,
    ) -> Option<&'a SizeRow> {
        let key = match self.mode {
            SizeJoin::ProductItem   => SizeKey::Item(product_item_id),
            SizeJoin::CartSelection => SizeKey::Selection(product_item_id, line?.size_id),
        };
        self.by_key.get(&key).copied()
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    pub fn duplicates(&self) -> usize {
        self.duplicates
    }
}
