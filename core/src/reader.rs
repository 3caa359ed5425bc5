//! Diff reading: eager change summaries, lazy batched row retrieval.
//!
//! [`DiffReader`] consumes one [`DiffResult`] and exposes three row
//! sequences (added, removed, modified) that pull raw rows through a
//! [`RowSource`] in batches and project them into the unified column
//! layout. Everything is synchronous and pull-based: nothing is fetched
//! until a sequence is polled past its current batch.

use std::collections::BTreeSet;

use serde::Serialize;
use thiserror::Error;

use crate::coldiff::{CellPair, ColDiff};
use crate::diff::{DiffResult, RowDiff, TableProfileDiff};
use crate::error_codes;
use crate::source::{RowSource, SourceError};
use crate::table::Table;

/// Number of row offsets fetched per batch unless overridden.
pub const DEFAULT_FETCH_SIZE: usize = 100;

/// Failure while constructing a [`DiffReader`] or pulling rows from one of
/// its sequences.
#[derive(Debug, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ReadError {
    /// The requested fetch size cannot drive batching.
    #[error("[TBLDIFF_READ_001] fetch size must be at least 1. Suggestion: keep the default of {DEFAULT_FETCH_SIZE} unless batch tuning is needed")]
    InvalidFetchSize,
    /// A row-offset pair carries neither side's offset.
    #[error("[TBLDIFF_READ_002] row diff pair {index} carries neither a new-side nor an old-side offset. Suggestion: the summary is corrupt, request it again")]
    MalformedRowPair { index: usize },
    /// A primary-key index points past the end of its column list.
    #[error("[TBLDIFF_READ_003] {side} primary key index {index} out of range for {columns} columns")]
    PkOutOfRange {
        side: &'static str,
        index: usize,
        columns: usize,
    },
    /// The row source answered a batch with the wrong number of rows.
    #[error("[TBLDIFF_READ_004] row source answered {returned} rows for {requested} requested offsets of table '{table}'")]
    RowCountMismatch {
        table: String,
        requested: usize,
        returned: usize,
    },
    /// The row source answered with a row of the wrong width.
    #[error("[TBLDIFF_READ_005] row at offset {offset} of table '{table}' has {cells} cells, schema expects {expected}")]
    RowWidthMismatch {
        table: String,
        offset: u64,
        cells: usize,
        expected: usize,
    },
    /// A fetch failed; the underlying error is chained unmodified.
    #[error("[TBLDIFF_READ_006] row source failure: {0}")]
    Source(#[from] SourceError),
}

impl ReadError {
    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            ReadError::InvalidFetchSize => error_codes::READ_INVALID_FETCH_SIZE,
            ReadError::MalformedRowPair { .. } => error_codes::READ_MALFORMED_ROW_PAIR,
            ReadError::PkOutOfRange { .. } => error_codes::READ_PK_OUT_OF_RANGE,
            ReadError::RowCountMismatch { .. } => error_codes::READ_ROW_COUNT_MISMATCH,
            ReadError::RowWidthMismatch { .. } => error_codes::READ_ROW_WIDTH_MISMATCH,
            ReadError::Source(_) => error_codes::READ_SOURCE_FAILURE,
        }
    }
}

/// Name-level change summary between an old and a new column list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnChanges {
    /// New-side names in schema order.
    pub new_values: Vec<String>,
    /// Old-side names in schema order.
    pub old_values: Vec<String>,
    /// Names present on both sides.
    pub unchanged: BTreeSet<String>,
    /// Names only the new side has.
    pub added: BTreeSet<String>,
    /// Names only the old side has.
    pub removed: BTreeSet<String>,
}

impl ColumnChanges {
    pub fn from_new_old(new_values: &[String], old_values: &[String]) -> Self {
        let new_set: BTreeSet<&String> = new_values.iter().collect();
        let old_set: BTreeSet<&String> = old_values.iter().collect();
        ColumnChanges {
            new_values: new_values.to_vec(),
            old_values: old_values.to_vec(),
            unchanged: new_set
                .intersection(&old_set)
                .map(|name| (*name).clone())
                .collect(),
            added: new_set
                .difference(&old_set)
                .map(|name| (*name).clone())
                .collect(),
            removed: old_set
                .difference(&new_set)
                .map(|name| (*name).clone())
                .collect(),
        }
    }

    /// True when both sides carry exactly the same names, order aside.
    pub fn is_unchanged(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Row offsets grouped by the kind of change they address.
#[derive(Debug, Default)]
struct RowOffsets {
    added: Vec<u64>,
    removed: Vec<u64>,
    modified: Vec<(u64, u64)>,
}

impl RowOffsets {
    /// Splits the pair list by which offsets are present, keeping input
    /// order within each group.
    fn classify(pairs: &[RowDiff]) -> Result<Self, ReadError> {
        let mut sets = RowOffsets::default();
        for (index, pair) in pairs.iter().enumerate() {
            match (pair.off1, pair.off2) {
                (Some(new), Some(old)) => sets.modified.push((new, old)),
                (Some(new), None) => sets.added.push(new),
                (None, Some(old)) => sets.removed.push(old),
                (None, None) => return Err(ReadError::MalformedRowPair { index }),
            }
        }
        Ok(sets)
    }
}

fn check_pk(side: &'static str, pk: &[usize], columns: usize) -> Result<(), ReadError> {
    match pk.iter().find(|&&idx| idx >= columns) {
        Some(&index) => Err(ReadError::PkOutOfRange {
            side,
            index,
            columns,
        }),
        None => Ok(()),
    }
}

/// Reads one diff summary: column and key summaries eagerly, row sequences
/// lazily through a [`RowSource`].
///
/// When the two sides' ordered primary-key names differ, or when the
/// summary carries no row-offset pairs at all, the reader runs in degraded
/// mode: the three row accessors return `None` while every schema-level
/// summary stays available.
#[derive(Debug)]
pub struct DiffReader<'a, S: RowSource> {
    source: &'a S,
    table_sum: String,
    old_table_sum: String,
    col_diff: ColDiff,
    column_changes: ColumnChanges,
    pk_changes: ColumnChanges,
    data_profile: Option<TableProfileDiff>,
    unified_columns: Vec<String>,
    primary_key: Vec<String>,
    new_width: usize,
    old_width: usize,
    fetch_size: usize,
    rows: Option<RowOffsets>,
}

impl<'a, S: RowSource> DiffReader<'a, S> {
    /// Reads `diff` with the default fetch size.
    pub fn new(source: &'a S, diff: DiffResult) -> Result<Self, ReadError> {
        Self::with_fetch_size(source, diff, DEFAULT_FETCH_SIZE)
    }

    /// Reads `diff`, fetching `fetch_size` offsets per batch and side.
    pub fn with_fetch_size(
        source: &'a S,
        diff: DiffResult,
        fetch_size: usize,
    ) -> Result<Self, ReadError> {
        if fetch_size == 0 {
            return Err(ReadError::InvalidFetchSize);
        }
        check_pk("new", &diff.pk, diff.columns.len())?;
        check_pk("old", &diff.old_pk, diff.old_columns.len())?;

        let new_tbl = Table::new(diff.columns.clone(), diff.pk.clone());
        let old_tbl = Table::new(diff.old_columns.clone(), diff.old_pk.clone());
        let col_diff = ColDiff::between(&old_tbl, &new_tbl);
        let column_changes = ColumnChanges::from_new_old(&new_tbl.columns, &old_tbl.columns);
        let new_key = new_tbl.primary_key();
        let old_key = old_tbl.primary_key();
        let pk_changes = ColumnChanges::from_new_old(&new_key, &old_key);

        // Malformed pairs are rejected even when degraded mode would
        // withhold the sequences anyway.
        let offsets = match &diff.row_diff {
            Some(pairs) => Some(RowOffsets::classify(pairs)?),
            None => None,
        };
        let rows = if new_key == old_key { offsets } else { None };

        let unified_columns = col_diff
            .columns()
            .iter()
            .map(|col| col.name.clone())
            .collect();
        Ok(DiffReader {
            source,
            new_width: diff.columns.len(),
            old_width: diff.old_columns.len(),
            table_sum: diff.table_sum,
            old_table_sum: diff.old_table_sum,
            col_diff,
            column_changes,
            pk_changes,
            data_profile: diff.data_profile,
            unified_columns,
            primary_key: new_key,
            fetch_size,
            rows,
        })
    }

    /// The unified column diff between the two sides.
    pub fn col_diff(&self) -> &ColDiff {
        &self.col_diff
    }

    /// Name-level column changes between the two sides.
    pub fn column_changes(&self) -> &ColumnChanges {
        &self.column_changes
    }

    /// Name-level primary-key changes between the two sides.
    pub fn pk_changes(&self) -> &ColumnChanges {
        &self.pk_changes
    }

    /// Statistics changes carried by the summary, if any.
    pub fn data_profile(&self) -> Option<&TableProfileDiff> {
        self.data_profile.as_ref()
    }

    /// Unified column names in final order; every row sequence follows this
    /// layout.
    pub fn columns(&self) -> &[String] {
        &self.unified_columns
    }

    /// New-side primary-key names.
    pub fn primary_key(&self) -> &[String] {
        &self.primary_key
    }

    /// Rows only the new side has, projected into unified order. `None` in
    /// degraded mode. Each call starts a fresh cursor at the first offset.
    pub fn added_rows(&self) -> Option<RowIter<'_, S>> {
        self.rows.as_ref().map(|rows| {
            self.row_iter(&rows.added, &self.table_sum, Projection::Layer(0), self.new_width)
        })
    }

    /// Rows only the old side has, projected into unified order. `None` in
    /// degraded mode. Each call starts a fresh cursor at the first offset.
    pub fn removed_rows(&self) -> Option<RowIter<'_, S>> {
        self.rows.as_ref().map(|rows| {
            self.row_iter(&rows.removed, &self.old_table_sum, Projection::Base, self.old_width)
        })
    }

    /// Rows both sides have with different content, as unified-order value
    /// pairs. `None` in degraded mode. Each call starts a fresh cursor.
    pub fn modified_rows(&self) -> Option<ModifiedRowIter<'_, S>> {
        self.rows.as_ref().map(|rows| ModifiedRowIter {
            source: self.source,
            table_sum: &self.table_sum,
            old_table_sum: &self.old_table_sum,
            offsets: &rows.modified,
            col_diff: &self.col_diff,
            new_width: self.new_width,
            old_width: self.old_width,
            columns: &self.unified_columns,
            primary_key: &self.primary_key,
            fetch_size: self.fetch_size,
            batch: Vec::new().into_iter(),
            cursor: 0,
            done: false,
        })
    }

    fn row_iter<'r>(
        &'r self,
        offsets: &'r [u64],
        table_sum: &'r str,
        projection: Projection,
        expected_width: usize,
    ) -> RowIter<'r, S> {
        RowIter {
            source: self.source,
            table_sum,
            offsets,
            col_diff: &self.col_diff,
            projection,
            expected_width,
            columns: &self.unified_columns,
            primary_key: &self.primary_key,
            fetch_size: self.fetch_size,
            batch: Vec::new().into_iter(),
            cursor: 0,
            done: false,
        }
    }
}

/// Which side of the diff a [`RowIter`] projects from.
#[derive(Debug, Clone, Copy)]
enum Projection {
    /// Layer-side rows via `rearrange_row`.
    Layer(usize),
    /// Base-side rows via `rearrange_base_row`.
    Base,
}

fn fetch_batch<S: RowSource>(
    source: &S,
    table_sum: &str,
    offsets: &[u64],
) -> Result<Vec<Vec<String>>, ReadError> {
    let rows = source.fetch_rows(table_sum, offsets)?;
    if rows.len() != offsets.len() {
        return Err(ReadError::RowCountMismatch {
            table: table_sum.to_string(),
            requested: offsets.len(),
            returned: rows.len(),
        });
    }
    Ok(rows)
}

/// Lazy cursor over one side's rows, projected into unified order.
///
/// Yields `Err` once and terminates if a batch fetch fails or comes back
/// malformed.
pub struct RowIter<'r, S: RowSource> {
    source: &'r S,
    table_sum: &'r str,
    offsets: &'r [u64],
    col_diff: &'r ColDiff,
    projection: Projection,
    expected_width: usize,
    columns: &'r [String],
    primary_key: &'r [String],
    fetch_size: usize,
    batch: std::vec::IntoIter<(u64, Vec<String>)>,
    cursor: usize,
    done: bool,
}

impl<'r, S: RowSource> RowIter<'r, S> {
    /// Number of rows this sequence addresses.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Unified column names the projected cells follow.
    pub fn columns(&self) -> &[String] {
        self.columns
    }

    pub fn primary_key(&self) -> &[String] {
        self.primary_key
    }

    fn project(&mut self, offset: u64, row: Vec<String>) -> Result<Vec<Option<String>>, ReadError> {
        if row.len() != self.expected_width {
            self.done = true;
            return Err(ReadError::RowWidthMismatch {
                table: self.table_sum.to_string(),
                offset,
                cells: row.len(),
                expected: self.expected_width,
            });
        }
        Ok(match self.projection {
            Projection::Layer(layer) => self.col_diff.rearrange_row(layer, &row),
            Projection::Base => self.col_diff.rearrange_base_row(&row),
        })
    }
}

impl<'r, S: RowSource> Iterator for RowIter<'r, S> {
    type Item = Result<Vec<Option<String>>, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            if let Some((offset, row)) = self.batch.next() {
                return Some(self.project(offset, row));
            }
            if self.cursor >= self.offsets.len() {
                return None;
            }
            let end = (self.cursor + self.fetch_size).min(self.offsets.len());
            let chunk = &self.offsets[self.cursor..end];
            match fetch_batch(self.source, self.table_sum, chunk) {
                Ok(rows) => {
                    self.cursor = end;
                    let paired: Vec<(u64, Vec<String>)> =
                        chunk.iter().copied().zip(rows).collect();
                    self.batch = paired.into_iter();
                }
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.offsets.len()))
    }
}

/// Lazy cursor over modified rows, pairing both sides' values per unified
/// column.
///
/// Each batch issues one fetch against the new table, then one against the
/// old. Yields `Err` once and terminates if either fetch fails or comes
/// back malformed.
pub struct ModifiedRowIter<'r, S: RowSource> {
    source: &'r S,
    table_sum: &'r str,
    old_table_sum: &'r str,
    offsets: &'r [(u64, u64)],
    col_diff: &'r ColDiff,
    new_width: usize,
    old_width: usize,
    columns: &'r [String],
    primary_key: &'r [String],
    fetch_size: usize,
    batch: std::vec::IntoIter<((u64, Vec<String>), (u64, Vec<String>))>,
    cursor: usize,
    done: bool,
}

impl<'r, S: RowSource> ModifiedRowIter<'r, S> {
    /// Number of row pairs this sequence addresses.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Unified column names the value pairs follow.
    pub fn columns(&self) -> &[String] {
        self.columns
    }

    pub fn primary_key(&self) -> &[String] {
        self.primary_key
    }

    fn check_width(
        &mut self,
        table: &str,
        offset: u64,
        row: &[String],
        expected: usize,
    ) -> Result<(), ReadError> {
        if row.len() != expected {
            self.done = true;
            return Err(ReadError::RowWidthMismatch {
                table: table.to_string(),
                offset,
                cells: row.len(),
                expected,
            });
        }
        Ok(())
    }
}

impl<'r, S: RowSource> Iterator for ModifiedRowIter<'r, S> {
    type Item = Result<Vec<CellPair>, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            if let Some(((new_off, new_row), (old_off, old_row))) = self.batch.next() {
                let new_width = self.new_width;
                let old_width = self.old_width;
                let table_sum = self.table_sum;
                let old_table_sum = self.old_table_sum;
                if let Err(err) = self.check_width(table_sum, new_off, &new_row, new_width) {
                    return Some(Err(err));
                }
                if let Err(err) = self.check_width(old_table_sum, old_off, &old_row, old_width) {
                    return Some(Err(err));
                }
                return Some(Ok(self.col_diff.combine_rows(0, &new_row, &old_row)));
            }
            if self.cursor >= self.offsets.len() {
                return None;
            }
            let end = (self.cursor + self.fetch_size).min(self.offsets.len());
            let chunk = &self.offsets[self.cursor..end];
            let new_offsets: Vec<u64> = chunk.iter().map(|&(new, _)| new).collect();
            let old_offsets: Vec<u64> = chunk.iter().map(|&(_, old)| old).collect();
            let fetched = fetch_batch(self.source, self.table_sum, &new_offsets).and_then(
                |new_rows| {
                    let old_rows = fetch_batch(self.source, self.old_table_sum, &old_offsets)?;
                    Ok((new_rows, old_rows))
                },
            );
            match fetched {
                Ok((new_rows, old_rows)) => {
                    self.cursor = end;
                    let paired: Vec<_> = new_offsets
                        .into_iter()
                        .zip(new_rows)
                        .zip(old_offsets.into_iter().zip(old_rows))
                        .collect();
                    self.batch = paired.into_iter();
                }
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.offsets.len()))
    }
}
