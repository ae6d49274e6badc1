//! Boardsplit - per-member statement generator
//!
//! This library reads one "overview" workbook holding three related tables
//! (sponsorship amounts, program quotas, ticket quotas), discovers the shared
//! board-member rows and event columns by locating an anchor marker cell in
//! each table, merges the event sets into one master list, and writes one
//! statement workbook per member.
//!
//! # Features
//!
//! - Anchor-based schema discovery with per-table matching and scan policies
//! - Ordered union of heterogeneous per-table event sets
//! - Tolerant numeric coercion over typed cells (values, cached formula
//!   results, text fallbacks)
//! - Static values or live external-reference formulas in the output
//!
//! # Example
//!
//! ```no_run
//! use boardsplit::config::RunConfig;
//! use boardsplit::pipeline;
//! use std::path::Path;
//!
//! let config = RunConfig::default();
//! let summary = pipeline::run(Path::new("overview.xlsx"), Path::new("reports"), &config)?;
//! println!("{}/{} reports generated", summary.generated, summary.members);
//! # Ok::<(), boardsplit::error::SplitError>(())
//! ```

pub mod cli;
pub mod config;
pub mod discover;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod report;
pub mod types;
pub mod workbook;

// Re-export commonly used types
pub use config::RunConfig;
pub use error::{SplitError, SplitResult};
pub use types::{AnchorRef, AxisIndex, EventRecord, MemberNames, RunSummary, SourceRefs};
