//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use table_diff::{ColDiff, DiffResult, MemorySource, RowDiff, Table};

pub fn tbl(columns: &[&str], pk: &[usize]) -> Table {
    Table::new(columns.iter().map(|s| s.to_string()).collect(), pk.to_vec())
}

pub fn unified_names(cd: &ColDiff) -> Vec<&str> {
    cd.columns().iter().map(|col| col.name.as_str()).collect()
}

pub fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|s| s.to_string()).collect()
}

pub fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
    data.iter().map(|cells| row(cells)).collect()
}

pub fn cells(values: &[Option<&str>]) -> Vec<Option<String>> {
    values.iter().map(|value| value.map(str::to_string)).collect()
}

pub fn pair(off1: Option<u64>, off2: Option<u64>) -> RowDiff {
    RowDiff { off1, off2 }
}

/// A summary between the fixture tables `sumNew` and `sumOld`.
pub fn diff_result(
    columns: &[&str],
    pk: &[usize],
    old_columns: &[&str],
    old_pk: &[usize],
    row_diff: Option<Vec<RowDiff>>,
) -> DiffResult {
    DiffResult {
        table_sum: "sumNew".to_string(),
        old_table_sum: "sumOld".to_string(),
        pk: pk.to_vec(),
        old_pk: old_pk.to_vec(),
        columns: columns.iter().map(|s| s.to_string()).collect(),
        old_columns: old_columns.iter().map(|s| s.to_string()).collect(),
        row_diff,
        data_profile: None,
    }
}

/// An in-memory source holding the fixture tables `sumNew` and `sumOld`.
pub fn source_with(new_rows: &[&[&str]], old_rows: &[&[&str]]) -> MemorySource {
    let mut source = MemorySource::new();
    source.insert_table("sumNew", rows(new_rows));
    source.insert_table("sumOld", rows(old_rows));
    source
}
