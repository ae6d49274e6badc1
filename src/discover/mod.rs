//! Cross-sheet schema discovery: anchor location, axis enumeration and
//! event-set merging over the three source tables.

pub mod anchor;
pub mod axis;
pub mod merge;

pub use anchor::locate;
pub use axis::{build_column_axis, build_row_axis};
pub use merge::merge_events;
