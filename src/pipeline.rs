//! Run orchestration: discovery once, then one isolated report per member.

use crate::config::RunConfig;
use crate::discover::{build_column_axis, build_row_axis, locate, merge_events};
use crate::error::SplitResult;
use crate::extract::{clean_member_name, extract_member, RefContext, SourceTables, TableView};
use crate::report::{report_file_name, write_member_report, ReportOptions};
use crate::types::{AnchorRef, AxisIndex, MemberNames, RunSummary};
use crate::workbook::{SheetTable, SourceWorkbook};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Discovery results for one source table.
#[derive(Debug)]
pub struct TableDiscovery {
    pub anchor: AnchorRef,
    pub events: AxisIndex,
}

/// Everything discovery produces before any member is processed.
/// Computed once per run and read-only thereafter.
#[derive(Debug)]
pub struct Discovery {
    pub sponsorship: TableDiscovery,
    pub program_quota: TableDiscovery,
    pub ticket_quota: TableDiscovery,
    /// Member name → sponsorship-table row. Rows are reused verbatim to
    /// index the other two tables, which share row alignment.
    pub roster: AxisIndex,
    /// Merged event universe, in first-encounter order.
    pub events: Vec<String>,
}

/// Locate anchors, build axes and merge the event universe.
///
/// Any failure here is structural and aborts the run; no member report
/// could be valid without all three anchors.
pub fn discover(workbook: &SourceWorkbook, config: &RunConfig) -> SplitResult<Discovery> {
    let tables = &config.tables;

    let sponsorship = discover_table(&workbook.sponsorship, &tables.sponsorship)?;
    let program_quota = discover_table(&workbook.program_quota, &tables.program_quota)?;
    let ticket_quota = discover_table(&workbook.ticket_quota, &tables.ticket_quota)?;

    // The member roster comes from the sponsorship table only.
    let roster = build_row_axis(
        &workbook.sponsorship,
        sponsorship.anchor,
        &tables.sponsorship.row_policy,
    );

    let events = merge_events(&[
        &sponsorship.events,
        &program_quota.events,
        &ticket_quota.events,
    ]);

    info!(
        members = roster.len(),
        events = events.len(),
        "discovery complete"
    );

    Ok(Discovery {
        sponsorship,
        program_quota,
        ticket_quota,
        roster,
        events,
    })
}

fn discover_table(
    table: &SheetTable,
    spec: &crate::config::TableSpec,
) -> SplitResult<TableDiscovery> {
    let anchor = locate(table, &spec.marker, spec.marker_match, spec.anchor_row_limit)?;
    let events = build_column_axis(table, anchor, spec.column_policy, spec.event_start_col);
    Ok(TableDiscovery { anchor, events })
}

/// Full pipeline: open, discover, then emit one report per member.
///
/// A failure generating one member's report is logged and counted; the
/// run continues with the remaining members.
pub fn run(source: &Path, output_dir: &Path, config: &RunConfig) -> SplitResult<RunSummary> {
    let workbook = SourceWorkbook::open(source, &config.tables)?;
    let discovery = discover(&workbook, config)?;

    fs::create_dir_all(output_dir)?;

    let tables = SourceTables {
        sponsorship: TableView {
            table: &workbook.sponsorship,
            events: &discovery.sponsorship.events,
        },
        program_quota: TableView {
            table: &workbook.program_quota,
            events: &discovery.program_quota.events,
        },
        ticket_quota: TableView {
            table: &workbook.ticket_quota,
            events: &discovery.ticket_quota.events,
        },
    };

    let refs = config
        .live_references
        .then(|| RefContext::new(source, output_dir));

    let options = ReportOptions {
        year: config.year.clone(),
        number_style: config.number_style,
        generated_on: chrono::Local::now().date_naive(),
    };

    let mut summary = RunSummary {
        members: discovery.roster.len(),
        events: discovery.events.len(),
        ..RunSummary::default()
    };

    for (raw_name, &member_row) in &discovery.roster {
        let member = MemberNames {
            raw: raw_name.clone(),
            clean: clean_member_name(raw_name),
        };
        match generate_one(
            member_row,
            &member,
            &tables,
            &discovery.events,
            refs.as_ref(),
            output_dir,
            config,
            &options,
        ) {
            Ok(path) => {
                info!(member = %member.raw, path = %path.display(), "report written");
                summary.generated += 1;
                summary.outputs.push(path);
            }
            Err(e) => {
                warn!(member = %member.raw, error = %e, "report generation failed");
                summary.failed += 1;
            }
        }
    }

    info!(
        generated = summary.generated,
        attempted = summary.members,
        failed = summary.failed,
        "run complete"
    );

    Ok(summary)
}

#[allow(clippy::too_many_arguments)]
fn generate_one(
    member_row: u32,
    member: &MemberNames,
    tables: &SourceTables<'_>,
    events: &[String],
    refs: Option<&RefContext>,
    output_dir: &Path,
    config: &RunConfig,
    options: &ReportOptions,
) -> SplitResult<PathBuf> {
    let records = extract_member(member_row, tables, events, refs);
    let path = output_dir.join(report_file_name(
        &config.year,
        &config.file_suffix,
        &member.raw,
    ));
    write_member_report(&path, member, &records, options)?;
    Ok(path)
}
