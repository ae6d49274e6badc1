//! Anchor Locator: finds the marker cell that is the coordinate origin
//! for all offset-based discovery in one table.

use crate::config::MarkerMatch;
use crate::error::{SplitError, SplitResult};
use crate::types::AnchorRef;
use crate::workbook::SheetTable;
use tracing::debug;

/// Scan `table` in row-major order for the first cell whose normalized
/// text matches `marker` under `policy`.
///
/// `row_limit` bounds the scan window; `None` scans the full sheet.
/// Failure is fatal for the run, every table needs its own anchor.
pub fn locate(
    table: &SheetTable,
    marker: &str,
    policy: MarkerMatch,
    row_limit: Option<u32>,
) -> SplitResult<AnchorRef> {
    let max_row = row_limit
        .map(|limit| limit.min(table.height()))
        .unwrap_or_else(|| table.height());

    for row in 0..max_row {
        for col in 0..table.width() {
            let text = normalize(&table.cell(row, col).display_text());
            if text.is_empty() {
                continue;
            }
            let hit = match policy {
                MarkerMatch::Contains => text.contains(marker),
                MarkerMatch::Exact => text == marker,
            };
            if hit {
                debug!(
                    sheet = table.name(),
                    row, col, "located anchor marker"
                );
                return Ok(AnchorRef { row, col });
            }
        }
    }

    Err(SplitError::AnchorNotFound {
        sheet: table.name().to_string(),
        marker: marker.to_string(),
    })
}

/// Strip line breaks (markers may be wrapped inside the cell) and trim.
fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| *c != '\n' && *c != '\r')
        .collect::<String>()
        .trim()
        .to_string()
}
