//! Shared fixture builder: writes a small overview workbook matching the
//! default table layout.

// Not every test binary uses every fixture.
#![allow(dead_code)]

use rust_xlsxwriter::Workbook;
use std::path::Path;

/// Three tables, anchors at row 2 / col 0, members on rows 3-4.
///
/// Sponsorship events: Spring Gala, Golf Day
/// Program Quota events: Golf Day, Winter Ball
/// Ticket Quota events: Winter Ball
///
/// Alice: sponsorship Spring Gala=100; program Golf Day=50; ticket Winter Ball=20
/// Bob:   sponsorship Golf Day=200; ticket Winter Ball=10
pub fn write_overview_fixture(path: &Path) {
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet();
    sheet.set_name("Sponsorship").unwrap();
    sheet.write_string(0, 0, "2025/2026 sponsorship overview").unwrap();
    sheet.write_string(2, 0, "Board member (sponsorship)").unwrap();
    sheet.write_string(2, 1, "Spring Gala").unwrap();
    sheet.write_string(2, 2, "Golf Day").unwrap();
    sheet.write_string(3, 0, "1.Alice Zhang").unwrap();
    sheet.write_number(3, 1, 100.0).unwrap();
    sheet.write_number(3, 2, 0.0).unwrap();
    sheet.write_string(4, 0, "2.Bob Liu").unwrap();
    sheet.write_number(4, 1, 0.0).unwrap();
    sheet.write_number(4, 2, 200.0).unwrap();

    let sheet = workbook.add_worksheet();
    sheet.set_name("Program Quota").unwrap();
    sheet.write_string(0, 0, "program quota overview").unwrap();
    // Exact-match anchor for this table
    sheet.write_string(2, 0, "Board member").unwrap();
    sheet.write_string(2, 1, "Golf Day").unwrap();
    sheet.write_string(2, 2, "Winter Ball").unwrap();
    sheet.write_string(3, 0, "1.Alice Zhang").unwrap();
    sheet.write_number(3, 1, 50.0).unwrap();
    sheet.write_number(3, 2, 0.0).unwrap();
    sheet.write_string(4, 0, "2.Bob Liu").unwrap();
    sheet.write_number(4, 1, 0.0).unwrap();
    sheet.write_number(4, 2, 0.0).unwrap();

    let sheet = workbook.add_worksheet();
    sheet.set_name("Ticket Quota").unwrap();
    sheet.write_string(0, 0, "ticket quota overview").unwrap();
    sheet.write_string(2, 0, "Board member (tickets)").unwrap();
    sheet.write_string(2, 1, "Winter Ball").unwrap();
    sheet.write_string(3, 0, "1.Alice Zhang").unwrap();
    sheet.write_number(3, 1, 20.0).unwrap();
    sheet.write_string(4, 0, "2.Bob Liu").unwrap();
    sheet.write_number(4, 1, 10.0).unwrap();

    workbook.save(path).unwrap();
}

/// Same layout but the sponsorship sheet has no anchor marker anywhere.
pub fn write_fixture_without_anchor(path: &Path) {
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet();
    sheet.set_name("Sponsorship").unwrap();
    sheet.write_string(0, 0, "no marker in this sheet").unwrap();
    sheet.write_string(2, 1, "Spring Gala").unwrap();

    let sheet = workbook.add_worksheet();
    sheet.set_name("Program Quota").unwrap();
    sheet.write_string(2, 0, "Board member").unwrap();

    let sheet = workbook.add_worksheet();
    sheet.set_name("Ticket Quota").unwrap();
    sheet.write_string(2, 0, "Board member").unwrap();

    workbook.save(path).unwrap();
}
