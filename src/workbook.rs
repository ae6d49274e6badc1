//! Adapter over the source workbook: loads the three named tables via
//! calamine into owned cell grids with a tagged-variant cell model.
//!
//! Downstream code never touches calamine types; it reads `CellContent`
//! by absolute `(row, col)` coordinates and queries table bounds.

use crate::config::TableSet;
use crate::error::{SplitError, SplitResult};
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Typed content of one cell.
///
/// Formula cells carry the cached evaluated result calamine exposes, if
/// any; the numeric coercion policy in `extract` is a pure function over
/// this variant.
#[derive(Debug, Clone, PartialEq)]
pub enum CellContent {
    Number(f64),
    Text(String),
    Bool(bool),
    Formula {
        formula: String,
        cached_number: Option<f64>,
        cached_text: Option<String>,
    },
    Blank,
    Error(String),
}

impl CellContent {
    /// Human-readable text of the cell, used for anchor matching and axis
    /// entry names. Blank and error cells yield an empty string.
    pub fn display_text(&self) -> String {
        match self {
            CellContent::Number(v) => format_number(*v),
            CellContent::Text(s) => s.clone(),
            CellContent::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
            CellContent::Formula {
                cached_text,
                cached_number,
                ..
            } => cached_text
                .clone()
                .or_else(|| cached_number.map(format_number))
                .unwrap_or_default(),
            CellContent::Blank | CellContent::Error(_) => String::new(),
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, CellContent::Blank)
    }
}

/// Integer-valued floats display without a trailing `.0` so numeric
/// headers like a year read as `"2024"`.
fn format_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

/// One source table as an owned row-major grid of typed cells.
///
/// Coordinates are absolute sheet coordinates; reads outside the grid
/// return `Blank`.
#[derive(Debug, Clone)]
pub struct SheetTable {
    name: String,
    grid: Vec<Vec<CellContent>>,
    width: u32,
}

impl SheetTable {
    /// Build a table by zipping a value range with its formula range.
    pub fn from_range(
        name: &str,
        values: &Range<Data>,
        formulas: Option<&Range<String>>,
    ) -> Self {
        let (height, width) = match values.end() {
            Some((row, col)) => (row + 1, col + 1),
            None => (0, 0),
        };

        let mut grid = Vec::with_capacity(height as usize);
        for row in 0..height {
            let mut cells = Vec::with_capacity(width as usize);
            for col in 0..width {
                let value = values.get_value((row, col));
                let formula = formulas
                    .and_then(|f| f.get_value((row, col)))
                    .map(String::as_str)
                    .filter(|f| !f.trim().is_empty());
                cells.push(convert_cell(value, formula));
            }
            grid.push(cells);
        }

        SheetTable {
            name: name.to_string(),
            grid,
            width,
        }
    }

    /// In-memory constructor, used by tests and callers that already hold
    /// typed cells. Rows may be ragged; reads past a short row are `Blank`.
    pub fn from_rows(name: &str, rows: Vec<Vec<CellContent>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0) as u32;
        SheetTable {
            name: name.to_string(),
            grid: rows,
            width,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn height(&self) -> u32 {
        self.grid.len() as u32
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn cell(&self, row: u32, col: u32) -> &CellContent {
        self.grid
            .get(row as usize)
            .and_then(|r| r.get(col as usize))
            .unwrap_or(&CellContent::Blank)
    }
}

/// Map one calamine cell (plus any formula text at the same coordinate)
/// into the tagged cell model.
fn convert_cell(value: Option<&Data>, formula: Option<&str>) -> CellContent {
    if let Some(formula) = formula {
        let (cached_number, cached_text) = match value {
            Some(Data::Float(v)) => (Some(*v), None),
            Some(Data::Int(v)) => (Some(*v as f64), None),
            Some(Data::String(s)) => (None, Some(s.clone())),
            Some(Data::Bool(b)) => (None, Some(b.to_string())),
            Some(Data::DateTime(dt)) => (Some(dt.as_f64()), None),
            _ => (None, None),
        };
        return CellContent::Formula {
            formula: formula.to_string(),
            cached_number,
            cached_text,
        };
    }

    match value {
        None | Some(Data::Empty) => CellContent::Blank,
        Some(Data::Float(v)) => CellContent::Number(*v),
        Some(Data::Int(v)) => CellContent::Number(*v as f64),
        Some(Data::String(s)) => CellContent::Text(s.clone()),
        Some(Data::Bool(b)) => CellContent::Bool(*b),
        Some(Data::DateTime(dt)) => CellContent::Number(dt.as_f64()),
        Some(Data::DateTimeIso(s)) | Some(Data::DurationIso(s)) => CellContent::Text(s.clone()),
        Some(Data::Error(e)) => CellContent::Error(format!("{e:?}")),
    }
}

/// The opened source workbook: the three tables, loaded once and
/// read-only for the rest of the run.
#[derive(Debug)]
pub struct SourceWorkbook {
    pub sponsorship: SheetTable,
    pub program_quota: SheetTable,
    pub ticket_quota: SheetTable,
}

impl SourceWorkbook {
    /// Open the workbook and load the three tables named in `tables`.
    /// A missing sheet is fatal for the whole run.
    pub fn open(path: &Path, tables: &TableSet) -> SplitResult<Self> {
        let mut workbook: Xlsx<_> = open_workbook(path).map_err(|e| {
            SplitError::Workbook(format!("Failed to open {}: {}", path.display(), e))
        })?;

        Ok(SourceWorkbook {
            sponsorship: load_table(&mut workbook, &tables.sponsorship.sheet)?,
            program_quota: load_table(&mut workbook, &tables.program_quota.sheet)?,
            ticket_quota: load_table(&mut workbook, &tables.ticket_quota.sheet)?,
        })
    }
}

fn load_table(workbook: &mut Xlsx<BufReader<File>>, sheet: &str) -> SplitResult<SheetTable> {
    if !workbook.sheet_names().iter().any(|n| n == sheet) {
        return Err(SplitError::TableMissing(sheet.to_string()));
    }

    let values = workbook
        .worksheet_range(sheet)
        .map_err(|e| SplitError::Workbook(format!("Failed to read sheet {sheet:?}: {e}")))?;
    // Formula text is optional; values alone are enough for static reports.
    let formulas = workbook.worksheet_formula(sheet).ok();

    Ok(SheetTable::from_range(sheet, &values, formulas.as_ref()))
}

/// Convert a zero-based column index to an Excel column letter
/// (0 → A, 25 → Z, 26 → AA).
pub fn column_letter(n: u32) -> String {
    let mut result = String::new();
    let mut num = n;

    loop {
        let remainder = num % 26;
        result.insert(0, (b'A' + remainder as u8) as char);
        if num < 26 {
            break;
        }
        num = num / 26 - 1;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> CellContent {
        CellContent::Text(s.to_string())
    }

    #[test]
    fn test_column_letter() {
        assert_eq!(column_letter(0), "A");
        assert_eq!(column_letter(1), "B");
        assert_eq!(column_letter(25), "Z");
        assert_eq!(column_letter(26), "AA");
        assert_eq!(column_letter(27), "AB");
        assert_eq!(column_letter(51), "AZ");
        assert_eq!(column_letter(702), "AAA");
    }

    #[test]
    fn test_cell_out_of_bounds_is_blank() {
        let table = SheetTable::from_rows("t", vec![vec![text("a")]]);
        assert_eq!(*table.cell(0, 0), text("a"));
        assert!(table.cell(0, 5).is_blank());
        assert!(table.cell(9, 0).is_blank());
    }

    #[test]
    fn test_ragged_rows_read_blank() {
        let table = SheetTable::from_rows(
            "t",
            vec![vec![text("a"), text("b")], vec![text("c")]],
        );
        assert_eq!(table.width(), 2);
        assert_eq!(table.height(), 2);
        assert!(table.cell(1, 1).is_blank());
    }

    #[test]
    fn test_display_text_variants() {
        assert_eq!(CellContent::Number(2024.0).display_text(), "2024");
        assert_eq!(CellContent::Number(1.5).display_text(), "1.5");
        assert_eq!(text("Gala").display_text(), "Gala");
        assert_eq!(CellContent::Blank.display_text(), "");
        assert_eq!(
            CellContent::Formula {
                formula: "A1+B1".to_string(),
                cached_number: Some(30.0),
                cached_text: None,
            }
            .display_text(),
            "30"
        );
        assert_eq!(
            CellContent::Formula {
                formula: "CONCAT(A1,B1)".to_string(),
                cached_number: None,
                cached_text: Some("Spring Gala".to_string()),
            }
            .display_text(),
            "Spring Gala"
        );
    }

    #[test]
    fn test_convert_cell_formula_keeps_cached_value() {
        let data = Data::Float(42.0);
        let cell = convert_cell(Some(&data), Some("SUM(A1:A3)"));
        assert_eq!(
            cell,
            CellContent::Formula {
                formula: "SUM(A1:A3)".to_string(),
                cached_number: Some(42.0),
                cached_text: None,
            }
        );
    }

    #[test]
    fn test_convert_cell_plain_values() {
        assert_eq!(
            convert_cell(Some(&Data::Int(7)), None),
            CellContent::Number(7.0)
        );
        assert_eq!(convert_cell(Some(&Data::Empty), None), CellContent::Blank);
        assert_eq!(convert_cell(None, None), CellContent::Blank);
        assert_eq!(
            convert_cell(Some(&Data::String("x".to_string())), None),
            text("x")
        );
    }
}
