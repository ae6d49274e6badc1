//! Axis Index Builder: enumerates named row entries (members, below the
//! anchor) and column entries (events, right of the anchor) into
//! name → position indexes.

use crate::config::{ColumnScanPolicy, RowScanPolicy};
use crate::types::{AnchorRef, AxisIndex};
use crate::workbook::SheetTable;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// `"1."`, `"12."` — a sequence number followed by a period.
static SEQ_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.").expect("valid literal pattern"));

/// Enumerate entries downward from `anchor.row + 1`, reading the cell at
/// `anchor.col` in each row.
///
/// Duplicate names keep their first position. An anchor at the bottom of
/// the table yields an empty index, which callers treat as zero entries.
pub fn build_row_axis(table: &SheetTable, anchor: AnchorRef, policy: &RowScanPolicy) -> AxisIndex {
    let mut index = AxisIndex::new();

    let end = match policy {
        RowScanPolicy::Unconditional => table.height(),
        // Bounded lookahead so a malformed sheet cannot cause a runaway scan.
        RowScanPolicy::SequencePrefix { lookahead } => {
            (anchor.row + 1 + lookahead).min(table.height())
        }
    };

    for row in anchor.row + 1..end {
        let text = table.cell(row, anchor.col).display_text();
        let name = text.trim();
        if name.is_empty() {
            continue;
        }

        match policy {
            RowScanPolicy::Unconditional => {
                index.entry(name.to_string()).or_insert(row);
            }
            RowScanPolicy::SequencePrefix { .. } => {
                if SEQ_PREFIX.is_match(name) {
                    index.entry(name.to_string()).or_insert(row);
                } else {
                    // Possible end of the list, but later valid rows may
                    // still exist; keep scanning within the lookahead.
                    debug!(
                        sheet = table.name(),
                        row,
                        entry = name,
                        "row without sequence-number prefix, possible list boundary"
                    );
                }
            }
        }
    }

    index
}

/// Enumerate event headers rightward along the anchor's row.
///
/// `start_col` overrides the default `anchor.col + 1` for tables that
/// reserve extra leading columns. An anchor row outside the table bounds
/// yields an empty index, not an error.
pub fn build_column_axis(
    table: &SheetTable,
    anchor: AnchorRef,
    policy: ColumnScanPolicy,
    start_col: Option<u32>,
) -> AxisIndex {
    let mut index = AxisIndex::new();
    if anchor.row >= table.height() {
        return index;
    }

    let start = start_col.unwrap_or(anchor.col + 1);
    for col in start..table.width() {
        let text = table.cell(anchor.row, col).display_text();
        let name = text.trim();
        if name.is_empty() {
            match policy {
                ColumnScanPolicy::UntilBlank => break,
                ColumnScanPolicy::Bounded => continue,
            }
        }
        index.entry(name.to_string()).or_insert(col);
    }

    index
}
