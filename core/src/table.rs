//! Schema-level view of one table version.

/// Ordered column names plus primary-key indices for one table version.
///
/// This is the core-facing shape consumed by [`ColDiff`](crate::ColDiff):
/// no checksum, no row count, just what alignment needs. The wire-level
/// record with those extras is [`TableInfo`](crate::TableInfo).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    /// Column names in schema order. Names are unique within one table.
    pub columns: Vec<String>,
    /// Indices into `columns` naming the primary key, in key order.
    pub pk: Vec<usize>,
}

impl Table {
    pub fn new(columns: Vec<String>, pk: Vec<usize>) -> Self {
        debug_assert!(
            pk.iter().all(|&idx| idx < columns.len()),
            "primary key index out of range"
        );
        Table { columns, pk }
    }

    /// Ordered primary-key column names derived from `pk`.
    pub fn primary_key(&self) -> Vec<String> {
        self.pk.iter().map(|&idx| self.columns[idx].clone()).collect()
    }
}
