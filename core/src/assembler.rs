//! The cart view assembler.
//!
//! Joins cart lines, catalog items and size rows on product item id and
//! emits one response row per catalog item, in catalog order.
//!
//! RULES:
//!   - One linear pass to index each of cart lines and size rows.
//!   - One linear pass over catalog items; every lookup is checked.
//!   - A missing join is handled by the configured policy and counted.
//!     It is never a panic and never a fabricated zero value.

use crate::{
    config::{AssemblyConfig, MissingMatchPolicy},
    error::CartResult,
    index::{CartIndex, SizeIndex},
    model::{CartLine, CatalogItem, JoinStatus, ResponseRow, SizeRow},
};
use serde::{Deserialize, Serialize};

/// Counters describing one assembly call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyDiagnostics {
    pub catalog_items:        usize,
    pub rows_emitted:         usize,
    pub rows_omitted:         usize,
    pub missing_cart_line:    usize,
    pub missing_size:         usize,
    pub duplicate_cart_lines: usize,
    pub duplicate_size_rows:  usize,
}

impl AssemblyDiagnostics {
    pub fn has_missing(&self) -> bool {
        self.missing_cart_line > 0 || self.missing_size > 0
    }
}

/// Output of one assembly call.
#[derive(Debug, Clone, PartialEq)]
pub struct Assembly {
    pub rows:        Vec<ResponseRow>,
    pub diagnostics: AssemblyDiagnostics,
}

impl Assembly {
    /// True when every catalog item joined a cart line and a size row.
    pub fn is_complete(&self) -> bool {
        !self.diagnostics.has_missing()
    }

    /// The rows as the JSON array sent to the client.
    pub fn to_json(&self) -> CartResult<String> {
        Ok(serde_json::to_string(&self.rows)?)
    }

    pub fn into_rows(self) -> Vec<ResponseRow> {
        self.rows
    }
}

#[derive(Debug, Clone, Default)]
pub struct Assembler {
    config: AssemblyConfig,
}

impl Assembler {
    pub fn new(config: AssemblyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AssemblyConfig {
        &self.config
    }

    pub fn assemble(
        &self,
        cart_lines: &[CartLine],
        catalog_items: &[CatalogItem],
        size_rows: &[SizeRow],
    ) -> Assembly {
        let cart_index = CartIndex::build(cart_lines);
        let size_index = SizeIndex::build(size_rows, self.config.size_join);

        let mut diagnostics = AssemblyDiagnostics {
            catalog_items:        catalog_items.len(),
            duplicate_cart_lines: cart_index.duplicates(),
            duplicate_size_rows:  size_index.duplicates(),
            ..AssemblyDiagnostics::default()
        };
        let mut rows = Vec::with_capacity(catalog_items.len());

        for item in catalog_items {
            let line = cart_index.get(item.product_item_id);
            let size = size_index.lookup(item.product_item_id, line);
            let status = JoinStatus::from_presence(line.is_some(), size.is_some());

            if !status.is_complete() {
                if status.missing_cart_line() {
                    diagnostics.missing_cart_line += 1;
                }
                if status.missing_size() {
                    diagnostics.missing_size += 1;
                }
                if self.config.log_missing {
                    log::warn!(
                        "assembler: product item {} incomplete ({:?}, policy={:?})",
                        item.product_item_id,
                        status,
                        self.config.missing_match
                    );
                }
                if self.config.missing_match == MissingMatchPolicy::Omit {
                    diagnostics.rows_omitted += 1;
                    continue;
                }
            }

            rows.push(ResponseRow::join(item, line, size));
        }

        diagnostics.rows_emitted = rows.len();
        log::debug!(
            "assembler: {} catalog items -> {} rows ({} omitted, {} missing cart line, {} missing size)",
            diagnostics.catalog_items,
            diagnostics.rows_emitted,
            diagnostics.rows_omitted,
            diagnostics.missing_cart_line,
            diagnostics.missing_size
        );

        Assembly { rows, diagnostics }
    }
}

/// Assemble with the default configuration.
pub fn assemble(
    cart_lines: &[CartLine],
    catalog_items: &[CatalogItem],
    size_rows: &[SizeRow],
) -> Assembly {
    Assembler::default().assemble(cart_lines, catalog_items, size_rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::SizeJoin, fixture::CartFixture};

    #[test]
    fn every_catalog_item_yields_one_row_in_order() {
        let fixture = CartFixture::generate(40, 11);
        let assembly = assemble(&fixture.cart_lines, &fixture.catalog_items, &fixture.size_rows);

        assert!(assembly.is_complete());
        assert_eq!(assembly.rows.len(), fixture.catalog_items.len());
        for (row, item) in assembly.rows.iter().zip(&fixture.catalog_items) {
            assert_eq!(row.product_item_id, item.product_item_id);
        }
    }

    #[test]
    fn flag_policy_keeps_incomplete_rows() {
        let fixture = CartFixture::generate(5, 3).without_cart_line(1).without_size(3);
        let assembly = assemble(&fixture.cart_lines, &fixture.catalog_items, &fixture.size_rows);

        assert_eq!(assembly.rows.len(), 5);
        assert_eq!(assembly.rows[1].join_status, JoinStatus::MissingBoth);
        assert_eq!(assembly.rows[3].join_status, JoinStatus::MissingSize);
        assert_eq!(assembly.diagnostics.missing_cart_line, 1);
        assert_eq!(assembly.diagnostics.missing_size, 2);
        assert_eq!(assembly.diagnostics.rows_omitted, 0);
    }

    #[test]
    fn omit_policy_drops_and_counts() {
        let fixture = CartFixture::generate(5, 3).without_size(0);
        let config = AssemblyConfig {
            missing_match: MissingMatchPolicy::Omit,
            size_join:     SizeJoin::ProductItem,
            log_missing:   false,
        };
        let assembly = Assembler::new(config)
            .assemble(&fixture.cart_lines, &fixture.catalog_items, &fixture.size_rows);

        assert_eq!(assembly.rows.len(), 4);
        assert_eq!(assembly.diagnostics.rows_omitted, 1);
        assert_eq!(assembly.diagnostics.rows_emitted, 4);
        assert!(!assembly.is_complete());
        assert!(assembly.rows.iter().all(|r| r.join_status.is_complete()));
    }
}
