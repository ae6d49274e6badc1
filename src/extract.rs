//! Member Record Extractor: derives one member's per-event financial
//! records from the three source tables and the merged event universe.

use crate::types::{AxisIndex, EventRecord, SourceRefs};
use crate::workbook::{column_letter, CellContent, SheetTable};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// One source table paired with its event column axis.
#[derive(Debug, Clone, Copy)]
pub struct TableView<'a> {
    pub table: &'a SheetTable,
    pub events: &'a AxisIndex,
}

/// The three table views, in the fixed sponsorship / program-quota /
/// ticket-quota roles.
#[derive(Debug, Clone, Copy)]
pub struct SourceTables<'a> {
    pub sponsorship: TableView<'a>,
    pub program_quota: TableView<'a>,
    pub ticket_quota: TableView<'a>,
}

/// Context for building external-reference formulas back into the source
/// workbook. The source path is threaded here explicitly rather than held
/// in shared state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefContext {
    /// Directory part of the reference. Excel resolves it relative to the
    /// report workbook's own directory, so this is the source directory as
    /// seen from `output_dir`: empty when they coincide, otherwise ending
    /// with `/` (`../`, `../data/`).
    pub dir_part: String,
    pub file_name: String,
}

impl RefContext {
    pub fn new(source: &Path, output_dir: &Path) -> Self {
        let file_name = source
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| source.display().to_string());

        let source_dir = match source.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };

        let dir_part = match relative_dir(source_dir, output_dir) {
            Some(rel) if rel.as_os_str().is_empty() => String::new(),
            Some(rel) => format!("{}/", rel.display()),
            // No relative form; an absolute path still resolves from
            // anywhere.
            None => match fs::canonicalize(source_dir) {
                Ok(abs) => format!("{}/", abs.display()),
                Err(_) => format!("{}/", source_dir.display()),
            },
        };

        RefContext {
            dir_part,
            file_name,
        }
    }

    /// Excel external-reference formula for one source cell,
    /// `='dir/[file.xlsx]Sheet'!$C$5` form. Row/col are zero-based.
    pub fn cell_ref(&self, sheet: &str, row: u32, col: u32) -> String {
        format!(
            "='{}[{}]{}'!${}${}",
            self.dir_part,
            self.file_name,
            sheet,
            column_letter(col),
            row + 1
        )
    }
}

/// `source_dir` expressed relative to `output_dir`: drop the common
/// prefix, one `..` per remaining output component, then the remaining
/// source components. `None` when either side cannot be canonicalized.
fn relative_dir(source_dir: &Path, output_dir: &Path) -> Option<PathBuf> {
    let source = fs::canonicalize(source_dir).ok()?;
    let output = fs::canonicalize(output_dir).ok()?;

    let mut source_parts = source.components().peekable();
    let mut output_parts = output.components().peekable();
    while let (Some(a), Some(b)) = (source_parts.peek(), output_parts.peek()) {
        if a != b {
            break;
        }
        source_parts.next();
        output_parts.next();
    }

    let mut rel = PathBuf::new();
    for _ in output_parts {
        rel.push("..");
    }
    for part in source_parts {
        rel.push(part);
    }
    Some(rel)
}

/// Strip a `"1."` style sequence prefix for human-facing display: drop
/// everything up to and including the first period, then trim. Names
/// without a period pass through trimmed.
pub fn clean_member_name(raw: &str) -> String {
    match raw.find('.') {
        Some(idx) => raw[idx + 1..].trim().to_string(),
        None => raw.trim().to_string(),
    }
}

/// Strip characters that are illegal in file names.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|'))
        .filter(|c| !c.is_control())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Why a cell defaulted to 0 during numeric coercion.
///
/// Blank is the expected case in sparse tables and is logged quietly;
/// every other kind points at a cell that looks wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    Blank,
    FormulaNotNumeric,
    FormulaNoResult,
    TextNotNumeric,
    BoolCell,
    ErrorCell,
}

impl Fallback {
    fn describe(self) -> &'static str {
        match self {
            Fallback::Blank => "blank cell",
            Fallback::FormulaNotNumeric => "formula result not numeric",
            Fallback::FormulaNoResult => "formula without cached result",
            Fallback::TextNotNumeric => "text not numeric",
            Fallback::BoolCell => "boolean cell",
            Fallback::ErrorCell => "error cell",
        }
    }
}

/// Numeric coercion over the cell variant, in fixed priority order:
/// numbers directly; formulas by cached numeric result, then by parsing
/// the displayed text; text by parsing; everything else 0.
///
/// Returns the value and, when the value was defaulted, the reason.
/// Pure; callers decide how loudly to log.
pub fn coerce_number(cell: &CellContent) -> (f64, Option<Fallback>) {
    match cell {
        CellContent::Number(v) => (*v, None),
        CellContent::Formula {
            cached_number: Some(v),
            ..
        } => (*v, None),
        CellContent::Formula {
            cached_text: Some(text),
            ..
        } => match text.trim().parse::<f64>() {
            Ok(v) => (v, None),
            Err(_) => (0.0, Some(Fallback::FormulaNotNumeric)),
        },
        CellContent::Formula { .. } => (0.0, Some(Fallback::FormulaNoResult)),
        CellContent::Text(text) => match text.trim().parse::<f64>() {
            Ok(v) => (v, None),
            Err(_) => (0.0, Some(Fallback::TextNotNumeric)),
        },
        CellContent::Bool(_) => (0.0, Some(Fallback::BoolCell)),
        CellContent::Blank => (0.0, Some(Fallback::Blank)),
        CellContent::Error(_) => (0.0, Some(Fallback::ErrorCell)),
    }
}

/// Read one member/event value from one table: event absent from the
/// table's axis means value 0 and no reference. Never fails; bad cells
/// default to 0 with a warning so one cell cannot abort extraction.
fn read_value(
    view: &TableView<'_>,
    member_row: u32,
    event: &str,
    refs: Option<&RefContext>,
) -> (f64, Option<String>) {
    let Some(&col) = view.events.get(event) else {
        return (0.0, None);
    };

    let cell = view.table.cell(member_row, col);
    let (value, fallback) = coerce_number(cell);
    match fallback {
        None | Some(Fallback::Blank) => {}
        Some(kind) => warn!(
            sheet = view.table.name(),
            row = member_row,
            col,
            event,
            reason = kind.describe(),
            "cell not usable as a number, defaulting to 0"
        ),
    }

    let cell_ref = refs.map(|r| r.cell_ref(view.table.name(), member_row, col));
    (value, cell_ref)
}

/// Extract one member's records over the merged event universe, in its
/// stable order.
///
/// Degenerate rows where none of the three raw values is strictly
/// positive are dropped; `index` numbers the emitted records only.
pub fn extract_member(
    member_row: u32,
    tables: &SourceTables<'_>,
    events: &[String],
    refs: Option<&RefContext>,
) -> Vec<EventRecord> {
    let mut records = Vec::new();

    for event in events {
        let (sponsorship, sponsorship_ref) =
            read_value(&tables.sponsorship, member_row, event, refs);
        let (program_quota, program_ref) =
            read_value(&tables.program_quota, member_row, event, refs);
        let (ticket_quota, ticket_ref) = read_value(&tables.ticket_quota, member_row, event, refs);

        if sponsorship <= 0.0 && program_quota <= 0.0 && ticket_quota <= 0.0 {
            debug!(event = %event, row = member_row, "all-zero event record dropped");
            continue;
        }

        let total = sponsorship;
        let receivable = total - ticket_quota;

        records.push(EventRecord {
            index: records.len() + 1,
            name: event.clone(),
            sponsorship,
            program_quota,
            ticket_quota,
            total,
            receivable,
            refs: refs.map(|_| SourceRefs {
                sponsorship: sponsorship_ref,
                program_quota: program_ref,
                ticket_quota: ticket_ref,
            }),
        });
    }

    records
}
