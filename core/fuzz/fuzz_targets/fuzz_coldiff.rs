#![no_main]

use std::collections::BTreeSet;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use table_diff::{ColDiff, Table};

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    base_names: Vec<u8>,
    base_pk: Vec<u8>,
    layer_names: Vec<u8>,
    layer_pk: Vec<u8>,
    extra_names: Vec<u8>,
    cells: Vec<u8>,
}

fn build_schema(names: &[u8], pk: &[u8]) -> Table {
    let mut columns: Vec<String> = Vec::new();
    let mut seen: BTreeSet<u8> = BTreeSet::new();
    for &raw in names.iter().take(24) {
        let tag = raw % 32;
        if seen.insert(tag) {
            columns.push(format!("col{tag:02}"));
        }
    }
    if columns.is_empty() {
        columns.push("col00".to_string());
    }
    let mut key: Vec<usize> = Vec::new();
    for &raw in pk.iter().take(4) {
        let idx = raw as usize % columns.len();
        if !key.contains(&idx) {
            key.push(idx);
        }
    }
    Table::new(columns, key)
}

fn cell_value(pool: &[u8], idx: usize) -> String {
    let raw = if pool.is_empty() {
        0
    } else {
        pool[idx % pool.len()]
    };
    format!("v{raw}")
}

fuzz_target!(|input: FuzzInput| {
    let base = build_schema(&input.base_names, &input.base_pk);
    let layers = vec![
        build_schema(&input.layer_names, &input.layer_pk),
        build_schema(&input.extra_names, &[]),
    ];
    let cd = ColDiff::new(&base, &layers);

    let union: BTreeSet<&str> = base
        .columns
        .iter()
        .chain(layers.iter().flat_map(|layer| layer.columns.iter()))
        .map(String::as_str)
        .collect();
    assert_eq!(cd.len(), union.len(), "one unified column per distinct name");
    assert_eq!(cd.layer_count(), layers.len());

    for (at, col) in cd.columns().iter().enumerate() {
        assert_eq!(cd.position(&col.name), Some(at));
        if let Some(idx) = col.base_idx {
            assert_eq!(base.columns[idx], col.name);
        }
        assert_eq!(
            col.base_pk,
            base.pk.iter().any(|&idx| base.columns[idx] == col.name)
        );
        for (l, layer) in layers.iter().enumerate() {
            let in_layer = col.layer_idx[l].is_some();
            assert!(!(col.added[l] && col.removed[l]));
            assert_eq!(col.added[l], in_layer && col.base_idx.is_none());
            assert_eq!(col.removed[l], !in_layer && col.base_idx.is_some());
            if let Some(idx) = col.layer_idx[l] {
                assert_eq!(layer.columns[idx], col.name);
            }
            assert_eq!(
                col.layer_pk[l],
                layer.pk.iter().any(|&idx| layer.columns[idx] == col.name)
            );
        }
    }

    // The first layer's key leads the final order, in key order.
    let key = layers[0].primary_key();
    let leading: Vec<&str> = cd
        .columns()
        .iter()
        .take(key.len())
        .map(|col| col.name.as_str())
        .collect();
    assert!(key.iter().map(String::as_str).eq(leading));

    let base_row: Vec<String> = (0..base.columns.len())
        .map(|idx| cell_value(&input.cells, idx))
        .collect();
    let layer_row: Vec<String> = (0..layers[0].columns.len())
        .map(|idx| cell_value(&input.cells, idx.wrapping_add(7)))
        .collect();

    let projected = cd.rearrange_base_row(&base_row);
    assert_eq!(projected.len(), cd.len());
    for (col, cell) in cd.columns().iter().zip(&projected) {
        assert_eq!(cell.is_none(), col.base_idx.is_none());
    }

    let projected = cd.rearrange_row(0, &layer_row);
    assert_eq!(projected.len(), cd.len());
    for (col, cell) in cd.columns().iter().zip(&projected) {
        assert_eq!(cell.is_none(), col.layer_idx[0].is_none());
    }

    let combined = cd.combine_rows(0, &layer_row, &base_row);
    assert_eq!(combined.len(), cd.len());
    for (col, pair) in cd.columns().iter().zip(&combined) {
        assert_eq!(
            pair.new_value.is_none(),
            col.removed[0] || col.layer_idx[0].is_none()
        );
        assert_eq!(
            pair.old_value.is_none(),
            col.added[0] || col.base_idx.is_none()
        );
    }

    assert!(ColDiff::between(&base, &base).no_column_changes());
});
