//! Row fetching boundary.
//!
//! The diff reader never talks to storage or the network itself; it pulls
//! raw rows through [`RowSource`] in batches of offsets. [`MemorySource`]
//! is the in-memory implementation used by tests, examples, and offline
//! callers.

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::error_codes;

/// Failure raised by a [`RowSource`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SourceError {
    /// Transport-level failure while fetching rows.
    #[error("[TBLDIFF_SOURCE_001] row fetch failed for table '{table}': {reason}")]
    Fetch { table: String, reason: String },
    /// The source holds no table with the given checksum.
    #[error("[TBLDIFF_SOURCE_002] unknown table '{table}'")]
    UnknownTable { table: String },
    /// A requested offset lies beyond the end of the table.
    #[error("[TBLDIFF_SOURCE_003] offset {offset} out of range for table '{table}' with {rows} rows")]
    OffsetOutOfRange { table: String, offset: u64, rows: u64 },
}

impl SourceError {
    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            SourceError::Fetch { .. } => error_codes::SOURCE_FETCH_FAILED,
            SourceError::UnknownTable { .. } => error_codes::SOURCE_TABLE_UNKNOWN,
            SourceError::OffsetOutOfRange { .. } => error_codes::SOURCE_OFFSET_OUT_OF_RANGE,
        }
    }
}

/// Supplies raw rows of one concrete table version by offset.
///
/// Offsets are arbitrary and need not be contiguous or sorted.
/// Implementations must answer with exactly one full row of string cells
/// per requested offset, in request order; the reader verifies both and
/// rejects violations.
pub trait RowSource {
    fn fetch_rows(
        &self,
        table_sum: &str,
        offsets: &[u64],
    ) -> Result<Vec<Vec<String>>, SourceError>;
}

/// In-memory [`RowSource`] keyed by table checksum.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    tables: FxHashMap<String, Vec<Vec<String>>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `rows` under `table_sum`, replacing any previous rows.
    pub fn insert_table(&mut self, table_sum: impl Into<String>, rows: Vec<Vec<String>>) {
        self.tables.insert(table_sum.into(), rows);
    }

    /// Number of rows held for `table_sum`, when the table is known.
    pub fn rows_count(&self, table_sum: &str) -> Option<u64> {
        self.tables.get(table_sum).map(|rows| rows.len() as u64)
    }
}

impl RowSource for MemorySource {
    fn fetch_rows(
        &self,
        table_sum: &str,
        offsets: &[u64],
    ) -> Result<Vec<Vec<String>>, SourceError> {
        let rows = self
            .tables
            .get(table_sum)
            .ok_or_else(|| SourceError::UnknownTable {
                table: table_sum.to_string(),
            })?;
        offsets
            .iter()
            .map(|&offset| {
                usize::try_from(offset)
                    .ok()
                    .and_then(|idx| rows.get(idx))
                    .cloned()
                    .ok_or_else(|| SourceError::OffsetOutOfRange {
                        table: table_sum.to_string(),
                        offset,
                        rows: rows.len() as u64,
                    })
            })
            .collect()
    }
}
