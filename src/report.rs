//! Report Emitter: renders one member's extracted records into a
//! single-sheet statement workbook.

use crate::config::NumberStyle;
use crate::error::{SplitError, SplitResult};
use crate::extract::sanitize_file_name;
use crate::types::{EventRecord, MemberNames};
use chrono::NaiveDate;
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Formula, Workbook, Worksheet};
use std::fs;
use std::path::Path;

/// Zero-based row of the 7-column header; the title section sits above it.
const HEADER_ROW: u32 = 4;

const HEADERS: [&str; 7] = [
    "No.",
    "Event",
    "Sponsorship",
    "Total",
    "Program Quota",
    "Ticket Quota",
    "Receivable",
];

/// Per-report presentation options. The reporting year and generation
/// date are passed in so emission stays a pure function of its inputs.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub year: String,
    pub number_style: NumberStyle,
    pub generated_on: NaiveDate,
}

/// `{year without '/'}{suffix}_{sanitized raw member name}.xlsx`
pub fn report_file_name(year: &str, suffix: &str, raw_member: &str) -> String {
    format!(
        "{}{}_{}.xlsx",
        year.replace('/', ""),
        suffix,
        sanitize_file_name(raw_member)
    )
}

/// Write one member's statement workbook.
///
/// The save is atomic with respect to `path`: the workbook is written to
/// a `.tmp` sibling first and renamed into place, so a crash mid-write
/// never leaves a partial report.
pub fn write_member_report(
    path: &Path,
    member: &MemberNames,
    records: &[EventRecord],
    options: &ReportOptions,
) -> SplitResult<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(sheet_name(&member.clean))
        .map_err(|e| SplitError::Report(format!("Failed to set sheet name: {e}")))?;

    write_title(worksheet, member, options)?;
    write_header(worksheet)?;
    write_records(worksheet, records, options)?;
    write_summary(worksheet, records.len())?;

    worksheet
        .set_column_width(0, 6)
        .and_then(|ws| ws.set_column_width(1, 30))
        .map_err(|e| SplitError::Report(format!("Failed to set column widths: {e}")))?;
    for col in 2..7 {
        worksheet
            .set_column_width(col, 14)
            .map_err(|e| SplitError::Report(format!("Failed to set column widths: {e}")))?;
    }

    let tmp = path.with_extension("xlsx.tmp");
    workbook
        .save(&tmp)
        .map_err(|e| SplitError::Report(format!("Failed to save {}: {}", tmp.display(), e)))?;
    fs::rename(&tmp, path)?;

    Ok(())
}

fn write_title(
    worksheet: &mut Worksheet,
    member: &MemberNames,
    options: &ReportOptions,
) -> SplitResult<()> {
    let title_fmt = Format::new().set_bold().set_font_size(14);
    let label_fmt = Format::new().set_bold();

    let title = format!("Event Statement: {}", member.clean);
    worksheet
        .write_string_with_format(0, 0, &title, &title_fmt)
        .map_err(|e| SplitError::Report(format!("Failed to write title: {e}")))?;
    worksheet
        .write_string_with_format(1, 0, "Reporting year", &label_fmt)
        .and_then(|ws| ws.write_string(1, 1, &options.year))
        .and_then(|ws| ws.write_string_with_format(2, 0, "Generated", &label_fmt))
        .and_then(|ws| {
            ws.write_string(2, 1, options.generated_on.format("%Y-%m-%d").to_string())
        })
        .map_err(|e| SplitError::Report(format!("Failed to write title section: {e}")))?;

    Ok(())
}

fn write_header(worksheet: &mut Worksheet) -> SplitResult<()> {
    let header_fmt = Format::new()
        .set_bold()
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Center);

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet
            .write_string_with_format(HEADER_ROW, col as u16, *header, &header_fmt)
            .map_err(|e| SplitError::Report(format!("Failed to write header: {e}")))?;
    }

    Ok(())
}

fn write_records(
    worksheet: &mut Worksheet,
    records: &[EventRecord],
    options: &ReportOptions,
) -> SplitResult<()> {
    let text_fmt = Format::new().set_border(FormatBorder::Thin);
    let num_fmt = Format::new()
        .set_border(FormatBorder::Thin)
        .set_num_format(options.number_style.num_format());

    for record in records {
        let row = HEADER_ROW + record.index as u32;
        let excel_row = row + 1; // 1-based, for in-sheet derivation formulas

        worksheet
            .write_number_with_format(row, 0, record.index as f64, &text_fmt)
            .and_then(|ws| ws.write_string_with_format(row, 1, &record.name, &text_fmt))
            .map_err(|e| SplitError::Report(format!("Failed to write record row: {e}")))?;

        let refs = record.refs.as_ref();
        let source_cells: [(u16, Option<&String>, f64); 3] = [
            (2, refs.and_then(|r| r.sponsorship.as_ref()), record.sponsorship),
            (4, refs.and_then(|r| r.program_quota.as_ref()), record.program_quota),
            (5, refs.and_then(|r| r.ticket_quota.as_ref()), record.ticket_quota),
        ];
        for (col, cell_ref, value) in source_cells {
            write_value_or_ref(worksheet, row, col, cell_ref, value, &num_fmt)?;
        }

        // Total and Receivable: derived in-sheet in the live variant so
        // they track the source-backed cells.
        if refs.is_some() {
            worksheet
                .write_formula_with_format(row, 3, Formula::new(format!("=C{excel_row}")), &num_fmt)
                .and_then(|ws| {
                    ws.write_formula_with_format(
                        row,
                        6,
                        Formula::new(format!("=D{excel_row}-F{excel_row}")),
                        &num_fmt,
                    )
                })
                .map_err(|e| SplitError::Report(format!("Failed to write derivation: {e}")))?;
        } else {
            worksheet
                .write_number_with_format(row, 3, record.total, &num_fmt)
                .and_then(|ws| ws.write_number_with_format(row, 6, record.receivable, &num_fmt))
                .map_err(|e| SplitError::Report(format!("Failed to write derived values: {e}")))?;
        }
    }

    Ok(())
}

fn write_summary(worksheet: &mut Worksheet, record_count: usize) -> SplitResult<()> {
    let summary_fmt = Format::new().set_bold().set_border(FormatBorder::Thin);

    let row = HEADER_ROW + record_count as u32 + 1;
    worksheet
        .write_string_with_format(row, 1, "Total", &summary_fmt)
        .map_err(|e| SplitError::Report(format!("Failed to write summary label: {e}")))?;

    // Data rows in 1-based terms: first is HEADER_ROW + 2
    let first = HEADER_ROW + 2;
    let last = HEADER_ROW + 1 + record_count as u32;

    for col in 2..7u16 {
        if record_count == 0 {
            worksheet
                .write_number_with_format(row, col, 0.0, &summary_fmt)
                .map_err(|e| SplitError::Report(format!("Failed to write summary: {e}")))?;
        } else {
            let letter = crate::workbook::column_letter(u32::from(col));
            let formula = format!("=SUM({letter}{first}:{letter}{last})");
            worksheet
                .write_formula_with_format(row, col, Formula::new(formula), &summary_fmt)
                .map_err(|e| SplitError::Report(format!("Failed to write summary: {e}")))?;
        }
    }

    Ok(())
}

/// Sheet names cap at 31 chars and reject `[]:*?/\`.
fn sheet_name(clean_member: &str) -> String {
    let cleaned: String = clean_member
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\'))
        .take(31)
        .collect();
    if cleaned.trim().is_empty() {
        "Statement".to_string()
    } else {
        cleaned
    }
}

fn write_value_or_ref(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell_ref: Option<&String>,
    value: f64,
    num_fmt: &Format,
) -> SplitResult<()> {
    match cell_ref {
        Some(formula) => worksheet
            .write_formula_with_format(row, col, Formula::new(formula.as_str()), num_fmt)
            .map_err(|e| SplitError::Report(format!("Failed to write reference: {e}")))?,
        None => worksheet
            .write_number_with_format(row, col, value, num_fmt)
            .map_err(|e| SplitError::Report(format!("Failed to write value: {e}")))?,
    };
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_report_file_name_strips_year_slash() {
        assert_eq!(
            report_file_name("2025/2026", "Statement", "1.Jane Doe"),
            "20252026Statement_1.Jane Doe.xlsx"
        );
    }

    #[test]
    fn test_report_file_name_sanitizes_member() {
        assert_eq!(
            report_file_name("2025", "Statement", "A/B:C"),
            "2025Statement_ABC.xlsx"
        );
    }

    #[test]
    fn test_sheet_name_rules() {
        assert_eq!(sheet_name("Jane Doe"), "Jane Doe");
        assert_eq!(sheet_name("A[b]:c"), "Abc");
        assert_eq!(sheet_name(""), "Statement");
        assert_eq!(sheet_name(&"x".repeat(40)).len(), 31);
    }

    #[test]
    fn test_write_report_creates_file_and_no_tmp() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("20252026Statement_1.Alice.xlsx");

        let member = MemberNames {
            raw: "1.Alice".to_string(),
            clean: "Alice".to_string(),
        };
        let records = vec![EventRecord {
            index: 1,
            name: "Spring Gala".to_string(),
            sponsorship: 100.0,
            program_quota: 0.0,
            ticket_quota: 20.0,
            total: 100.0,
            receivable: 80.0,
            refs: None,
        }];
        let options = ReportOptions {
            year: "2025/2026".to_string(),
            number_style: NumberStyle::Grouped,
            generated_on: NaiveDate::from_ymd_opt(2026, 8, 23).unwrap(),
        };

        write_member_report(&path, &member, &records, &options).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("xlsx.tmp").exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_write_report_empty_records() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("empty.xlsx");

        let member = MemberNames {
            raw: "2.Bob".to_string(),
            clean: "Bob".to_string(),
        };
        let options = ReportOptions {
            year: "2025".to_string(),
            number_style: NumberStyle::TwoDecimal,
            generated_on: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        };

        write_member_report(&path, &member, &[], &options).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_write_report_to_missing_directory_fails() {
        let member = MemberNames {
            raw: "x".to_string(),
            clean: "x".to_string(),
        };
        let options = ReportOptions {
            year: "2025".to_string(),
            number_style: NumberStyle::Grouped,
            generated_on: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        };
        let result = write_member_report(
            Path::new("/nonexistent/dir/report.xlsx"),
            &member,
            &[],
            &options,
        );
        assert!(result.is_err());
    }
}
