//! Event Set Merger: unions the per-table event axes into the canonical
//! ordered master list.

use crate::types::AxisIndex;
use indexmap::IndexSet;

/// Union of all axis keys in first-encounter order, no duplicates.
///
/// This union, not any single table's columns, is the enumeration used
/// when emitting a member's report rows, so a member may show zero values
/// for an event that exists only in another table.
pub fn merge_events(axes: &[&AxisIndex]) -> Vec<String> {
    let mut merged: IndexSet<String> = IndexSet::new();
    for axis in axes {
        for name in axis.keys() {
            merged.insert(name.clone());
        }
    }
    merged.into_iter().collect()
}
