//! Wire records for commits and the tables behind them.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::table::Table;

/// Payload describing one committed table version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TableInfo {
    /// Checksum of the table, as a hex string.
    pub sum: String,
    /// Column names in schema order.
    pub columns: Vec<String>,
    /// Indices of primary-key columns; absent means the table has no key.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pk: Vec<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows_count: Option<u64>,
}

impl TableInfo {
    /// Ordered primary-key column names.
    pub fn primary_key(&self) -> Vec<String> {
        self.pk.iter().map(|&idx| self.columns[idx].clone()).collect()
    }

    /// Core-facing schema view of this table.
    pub fn schema(&self) -> Table {
        Table::new(self.columns.clone(), self.pk.clone())
    }
}

/// Payload of a successful commit: the commit checksum and the checksum of
/// the table it captured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CommitResult {
    pub sum: String,
    pub table: String,
}

/// One immutable snapshot of a table, with ancestry.
///
/// The commit graph is a tree of owned values built bottom-up: `parents`
/// carries checksums, and `parent_commits` owns the parent records keyed by
/// checksum when the commit came back from a tree request. Ownership runs
/// strictly parent to child, so the structure cannot cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Commit {
    /// Checksum of the commit, as a hex string.
    pub sum: String,
    pub author_name: String,
    pub author_email: String,
    pub message: String,
    pub table: TableInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<FixedOffset>>,
    /// Checksums of parent commits.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parents: Vec<String>,
    /// Parent records, resolved to the requested depth.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parent_commits: BTreeMap<String, Commit>,
}

impl Commit {
    /// Walks the resolved ancestry depth-first, yielding this commit and
    /// every parent record it owns.
    pub fn walk(&self) -> Vec<&Commit> {
        let mut stack = vec![self];
        let mut seen = Vec::new();
        while let Some(commit) = stack.pop() {
            seen.push(commit);
            stack.extend(commit.parent_commits.values());
        }
        seen
    }
}

/// Payload of a commit-tree request: the root commit with ancestors
/// resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CommitTree {
    pub sum: String,
    pub root: Commit,
}
