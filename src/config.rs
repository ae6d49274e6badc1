//! Run configuration: table names, anchor markers and scan policies.
//!
//! The three source tables are configuration constants, not discovered at
//! runtime. Compiled-in defaults cover the standard overview layout; any
//! field can be overridden from a YAML file passed on the command line.

use crate::error::SplitResult;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// How marker text is matched against normalized cell text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerMatch {
    /// Cell text contains the marker (marker is a prefix/fragment).
    Contains,
    /// Cell text equals the marker after line-break removal.
    Exact,
}

/// How member rows below the anchor are recognized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RowScanPolicy {
    /// Any non-blank trimmed cell is an entry; scan runs to the table bounds.
    Unconditional,
    /// Only cells matching a sequence-number prefix (`"1."`) are entries.
    /// Non-matching rows are logged as possible list boundaries but the
    /// scan continues, bounded to `lookahead` rows past the anchor.
    SequencePrefix { lookahead: u32 },
}

/// How event header columns right of the anchor are enumerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnScanPolicy {
    /// Scan to the last populated cell of the header row, skipping blanks.
    Bounded,
    /// Stop at the first blank cell (contiguous headers).
    UntilBlank,
}

/// Display format for numeric report columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NumberStyle {
    /// Integer with thousands grouping (`#,##0`).
    Grouped,
    /// Two decimal places (`#,##0.00`).
    TwoDecimal,
}

impl NumberStyle {
    pub fn num_format(self) -> &'static str {
        match self {
            NumberStyle::Grouped => "#,##0",
            NumberStyle::TwoDecimal => "#,##0.00",
        }
    }
}

/// Where one source table lives and how its axes are discovered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TableSpec {
    /// Sheet name in the source workbook.
    pub sheet: String,
    /// Anchor marker text, matched against normalized cell text.
    pub marker: String,
    pub marker_match: MarkerMatch,
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub row_policy: RowScanPolicy,
    pub column_policy: ColumnScanPolicy,
    /// Explicit first event column; defaults to `anchor.col + 1`. Tables
    /// reserve a different number of leading columns.
    #[serde(default)]
    pub event_start_col: Option<u32>,
    /// Bound on the anchor scan window; `None` scans the full sheet.
    #[serde(default)]
    pub anchor_row_limit: Option<u32>,
}

/// The three fixed source tables. Each defaults independently so a YAML
/// overlay can override one table without restating the others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TableSet {
    #[serde(default = "default_sponsorship")]
    pub sponsorship: TableSpec,
    #[serde(default = "default_program_quota")]
    pub program_quota: TableSpec,
    #[serde(default = "default_ticket_quota")]
    pub ticket_quota: TableSpec,
}

fn default_sponsorship() -> TableSpec {
    TableSet::default().sponsorship
}

fn default_program_quota() -> TableSpec {
    TableSet::default().program_quota
}

fn default_ticket_quota() -> TableSpec {
    TableSet::default().ticket_quota
}

impl Default for TableSet {
    fn default() -> Self {
        TableSet {
            sponsorship: TableSpec {
                sheet: "Sponsorship".to_string(),
                marker: "Board member".to_string(),
                marker_match: MarkerMatch::Contains,
                row_policy: RowScanPolicy::SequencePrefix { lookahead: 20 },
                column_policy: ColumnScanPolicy::Bounded,
                event_start_col: None,
                anchor_row_limit: None,
            },
            program_quota: TableSpec {
                sheet: "Program Quota".to_string(),
                marker: "Board member".to_string(),
                marker_match: MarkerMatch::Exact,
                row_policy: RowScanPolicy::Unconditional,
                column_policy: ColumnScanPolicy::UntilBlank,
                event_start_col: None,
                anchor_row_limit: None,
            },
            ticket_quota: TableSpec {
                sheet: "Ticket Quota".to_string(),
                marker: "Board member".to_string(),
                marker_match: MarkerMatch::Contains,
                row_policy: RowScanPolicy::Unconditional,
                column_policy: ColumnScanPolicy::Bounded,
                event_start_col: None,
                anchor_row_limit: None,
            },
        }
    }
}

/// Full run configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RunConfig {
    /// Reporting year as displayed in titles, e.g. `"2025/2026"`.
    /// Slashes are removed when the year is used in file names.
    pub year: String,
    /// Fixed file-name component between the year and the member name.
    pub file_suffix: String,
    /// Emit external-reference formulas instead of frozen values.
    pub live_references: bool,
    pub number_style: NumberStyle,
    pub tables: TableSet,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            year: "2025/2026".to_string(),
            file_suffix: "Statement".to_string(),
            live_references: false,
            number_style: NumberStyle::Grouped,
            tables: TableSet::default(),
        }
    }
}

impl RunConfig {
    /// Load a config overlay from a YAML file. Missing fields keep their
    /// defaults.
    pub fn from_yaml_file(path: &Path) -> SplitResult<Self> {
        let contents = fs::read_to_string(path)?;
        let config: RunConfig = serde_yaml::from_str(&contents)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config_has_three_tables() {
        let config = RunConfig::default();
        assert_eq!(config.tables.sponsorship.sheet, "Sponsorship");
        assert_eq!(config.tables.program_quota.sheet, "Program Quota");
        assert_eq!(config.tables.ticket_quota.sheet, "Ticket Quota");
        assert!(!config.live_references);
    }

    #[test]
    fn test_yaml_overlay_partial_override() {
        let yaml = r#"
year: "2026/2027"
live-references: true
"#;
        // serde(default) keeps unspecified fields at their defaults
        let config: RunConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.year, "2026/2027");
        assert!(config.live_references);
        assert_eq!(config.file_suffix, "Statement");
        assert_eq!(config.tables, TableSet::default());
    }

    #[test]
    fn test_yaml_overlay_table_policies() {
        let yaml = r#"
tables:
  sponsorship:
    sheet: "Overview A"
    marker: "Member"
    marker-match: contains
    row-policy:
      sequence-prefix:
        lookahead: 10
    column-policy: until-blank
    event-start-col: 2
  program-quota:
    sheet: "Overview B"
    marker: "Member"
    marker-match: exact
    row-policy: unconditional
    column-policy: bounded
  ticket-quota:
    sheet: "Overview C"
    marker: "Member"
    marker-match: contains
    row-policy: unconditional
    column-policy: bounded
"#;
        let config: RunConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.tables.sponsorship.sheet, "Overview A");
        assert_eq!(
            config.tables.sponsorship.row_policy,
            RowScanPolicy::SequencePrefix { lookahead: 10 }
        );
        assert_eq!(config.tables.sponsorship.event_start_col, Some(2));
        assert_eq!(
            config.tables.program_quota.marker_match,
            MarkerMatch::Exact
        );
    }

    #[test]
    fn test_yaml_overlay_single_table() {
        let yaml = r#"
tables:
  sponsorship:
    sheet: "Custom Overview"
    marker: "Member"
    marker-match: contains
    row-policy: unconditional
    column-policy: bounded
"#;
        let config: RunConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.tables.sponsorship.sheet, "Custom Overview");
        // Untouched tables keep their defaults
        assert_eq!(config.tables.program_quota.sheet, "Program Quota");
        assert_eq!(config.tables.ticket_quota.sheet, "Ticket Quota");
    }

    #[test]
    fn test_number_style_formats() {
        assert_eq!(NumberStyle::Grouped.num_format(), "#,##0");
        assert_eq!(NumberStyle::TwoDecimal.num_format(), "#,##0.00");
    }

    #[test]
    fn test_config_round_trip() {
        let config = RunConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let back: RunConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(config, back);
    }
}
