//! Table Diff: a client-side reader for tabular diff summaries.
//!
//! This crate provides functionality for:
//! - Reconciling two or more column schemas into one unified, order-stable
//!   column list with per-source provenance (`ColDiff`)
//! - Deriving minimal column move sets on top of a longest increasing
//!   subsequence
//! - Projecting side-local rows into the unified column layout
//! - Walking a whole diff summary with lazy, batched row retrieval
//!   (`DiffReader`)
//!
//! # Quick Start
//!
//! ```
//! use table_diff::{DiffReader, DiffResult, MemorySource, RowDiff};
//!
//! # fn main() -> Result<(), table_diff::ReadError> {
//! let mut source = MemorySource::new();
//! source.insert_table("sumNew", vec![vec!["1".into(), "x".into()]]);
//! source.insert_table("sumOld", vec![vec!["1".into(), "y".into()]]);
//!
//! let diff = DiffResult {
//!     table_sum: "sumNew".into(),
//!     old_table_sum: "sumOld".into(),
//!     pk: vec![0],
//!     old_pk: vec![0],
//!     columns: vec!["id".into(), "name".into()],
//!     old_columns: vec!["id".into(), "name".into()],
//!     row_diff: Some(vec![RowDiff { off1: Some(0), off2: Some(0) }]),
//!     data_profile: None,
//! };
//!
//! let reader = DiffReader::new(&source, diff)?;
//! assert_eq!(reader.columns(), ["id", "name"]);
//! for row in reader.modified_rows().expect("row sequences are available") {
//!     let cells = row?;
//!     assert_eq!(cells[1].new_value.as_deref(), Some("x"));
//!     assert_eq!(cells[1].old_value.as_deref(), Some("y"));
//! }
//! # Ok(())
//! # }
//! ```

mod coldiff;
mod commit;
mod config;
mod diff;
pub mod error_codes;
mod reader;
mod source;
mod table;

pub use coldiff::lis::longest_increasing_indices;
pub use coldiff::move_ops::{MoveOp, move_ops};
pub use coldiff::{CellPair, ColDiff, Column, Move};
pub use commit::{Commit, CommitResult, CommitTree, TableInfo};
pub use config::{Auth, Branch, Config, Pack, Receive, Remote, User};
pub use diff::{ColumnProfileDiff, DiffResult, RowDiff, TableProfileDiff};
pub use reader::{
    ColumnChanges, DEFAULT_FETCH_SIZE, DiffReader, ModifiedRowIter, ReadError, RowIter,
};
pub use source::{MemorySource, RowSource, SourceError};
pub use table::Table;
