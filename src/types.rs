//! Core data model shared across discovery, extraction and reporting.

use indexmap::IndexMap;
use std::path::PathBuf;

/// Zero-based coordinate of a located marker cell in one source table.
///
/// All row/column enumeration in that table is offset from this point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorRef {
    pub row: u32,
    pub col: u32,
}

/// Entity name → row or column position, in scan order.
///
/// Keys are trimmed cell text and unique within one table; the first
/// occurrence wins on duplicates.
pub type AxisIndex = IndexMap<String, u32>;

/// Both spellings of a member's name.
///
/// `raw` (possibly `"1.Jane Doe"`) is the roster key and the output file
/// name component; `clean` (sequence prefix stripped) is what appears in
/// report titles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberNames {
    pub raw: String,
    pub clean: String,
}

/// External-reference formulas pointing back into the source workbook,
/// one per source table the event appears in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceRefs {
    pub sponsorship: Option<String>,
    pub program_quota: Option<String>,
    pub ticket_quota: Option<String>,
}

/// One member's derived financial record for a single event.
///
/// Invariants: `total == sponsorship` and `receivable == total - ticket_quota`.
/// A record exists only if at least one of the three raw values is strictly
/// positive; `index` is 1-based over emitted records.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub index: usize,
    pub name: String,
    pub sponsorship: f64,
    pub program_quota: f64,
    pub ticket_quota: f64,
    pub total: f64,
    pub receivable: f64,
    pub refs: Option<SourceRefs>,
}

/// Outcome of one full pipeline run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Members discovered in the sponsorship roster.
    pub members: usize,
    /// Events in the merged universe.
    pub events: usize,
    /// Reports written successfully.
    pub generated: usize,
    /// Members whose report failed (logged, run continued).
    pub failed: usize,
    /// Paths of the written report files.
    pub outputs: Vec<PathBuf>,
}
