//! Nested-loop reference assembler.
//!
//! O(n·m·k) and kept only to pin the behavior of the indexed assembler:
//! tests compare the two row for row, and the bench tool times them
//! against each other. Not compiled into normal builds.

use crate::{
    config::{AssemblyConfig, MissingMatchPolicy, SizeJoin},
    model::{CartLine, CatalogItem, JoinStatus, ResponseRow, SizeRow},
};

fn size_matches(mode: SizeJoin, item: &CatalogItem, line: Option<&CartLine>, size: &SizeRow) -> bool {
    if size.product_item_id != item.product_item_id {
        return false;
    }
    match mode {
        SizeJoin::ProductItem   => true,
        SizeJoin::CartSelection => line.is_some_and(|l| l.size_id == size.size_id),
    }
}

/// Scan every cart line and size row for every catalog item. The last
/// match in input order wins.
pub fn assemble_naive(
    config: &AssemblyConfig,
    cart_lines: &[CartLine],
    catalog_items: &[CatalogItem],
    size_rows: &[SizeRow],
) -> Vec<ResponseRow> {
    let mut rows = Vec::new();

    for item in catalog_items {
        let mut line: Option<&CartLine> = None;
        let mut size: Option<&SizeRow> = None;

        for candidate in cart_lines {
            if candidate.product_item_id != item.product_item_id {
                continue;
            }
            line = Some(candidate);
            size = None;
            for s in size_rows {
                if size_matches(config.size_join, item, line, s) {
                    size = Some(s);
                }
            }
        }

        if line.is_none() {
            for s in size_rows {
                if size_matches(config.size_join, item, None, s) {
                    size = Some(s);
                }
            }
        }

        let status = JoinStatus::from_presence(line.is_some(), size.is_some());
        if !status.is_complete() && config.missing_match == MissingMatchPolicy::Omit {
            continue;
        }
        rows.push(ResponseRow::join(item, line, size));
    }

    rows
}
