//! Wire records for the diff summary between two table versions.
//!
//! These are static, explicitly-typed mirrors of the service payload:
//! camelCase field names, unknown fields rejected, omittable fields modeled
//! as `Option` or defaults so absence stays visible. How the summary is
//! produced (HTTP, file, fixture) is outside this crate.

use serde::{Deserialize, Serialize};

/// Raw diff summary between two committed table versions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DiffResult {
    /// Checksum of the new table.
    pub table_sum: String,
    /// Checksum of the old table.
    pub old_table_sum: String,
    /// Primary-key column indices of the new table.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pk: Vec<usize>,
    /// Primary-key column indices of the old table.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub old_pk: Vec<usize>,
    /// Column names of the new table, in schema order.
    pub columns: Vec<String>,
    /// Column names of the old table, in schema order.
    pub old_columns: Vec<String>,
    /// Row-level differences; absent when the service produced none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_diff: Option<Vec<RowDiff>>,
    /// Statistics changes; absent when profiling was off.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_profile: Option<TableProfileDiff>,
}

impl DiffResult {
    /// Ordered primary-key names of the new table. Key indices must be in
    /// range for `columns`.
    pub fn primary_key(&self) -> Vec<String> {
        self.pk.iter().map(|&idx| self.columns[idx].clone()).collect()
    }

    /// Ordered primary-key names of the old table. Key indices must be in
    /// range for `old_columns`.
    pub fn old_primary_key(&self) -> Vec<String> {
        self.old_pk
            .iter()
            .map(|&idx| self.old_columns[idx].clone())
            .collect()
    }
}

/// One row-level difference, addressed by offsets into each table version.
///
/// `off1` points into the new table, `off2` into the old one. A pair with
/// only `off1` is an added row, only `off2` a removed row, both a modified
/// row. A pair with neither is malformed and rejected by the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RowDiff {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub off1: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub off2: Option<u64>,
}

/// Row-count and per-column statistics changes attached to a diff summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TableProfileDiff {
    pub old_rows_count: u64,
    pub new_rows_count: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<ColumnProfileDiff>,
}

/// Statistics changes for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ColumnProfileDiff {
    pub name: String,
    /// True when the column exists only in the new version.
    #[serde(default, skip_serializing_if = "is_false")]
    pub new_addition: bool,
    /// True when the column exists only in the old version.
    #[serde(default, skip_serializing_if = "is_false")]
    pub removed: bool,
    /// Opaque per-statistic change objects, passed through untouched.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stats: Vec<serde_json::Value>,
}

fn is_false(flag: &bool) -> bool {
    !*flag
}
