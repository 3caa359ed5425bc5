//! Unified column diff across a base schema and layered schemas.
//!
//! Pipeline: merge every schema into one order-stable column list, classify
//! each column per layer as added or removed, derive minimal moves from LIS
//! anchors, hoist the first layer's primary key to the front, then assign
//! final indices against the hoisted order.
//!
//! Submodules:
//! - [`lis`]: longest-increasing-subsequence index selection
//! - [`move_ops`]: anchor-based minimal-move derivation

pub mod lis;
pub mod move_ops;

mod column;
mod project;

pub use column::{Column, Move};
pub use project::CellPair;

use std::collections::BTreeMap;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::table::Table;
use move_ops::move_ops;

/// Order-stable unified column diff between one base schema and one or more
/// layer schemas.
///
/// Built once by [`ColDiff::new`] and immutable afterwards, so any number of
/// row iterators can read it without synchronization. Layer numbers used
/// throughout are positions in the `layers` slice handed to the constructor.
#[derive(Debug, Clone)]
pub struct ColDiff {
    columns: Vec<Column>,
    name_map: FxHashMap<String, usize>,
    layers: usize,
}

impl ColDiff {
    /// Diffs `base` against a single layer.
    pub fn between(base: &Table, layer: &Table) -> Self {
        Self::new(base, std::slice::from_ref(layer))
    }

    /// Diffs `base` against `layers`. The first layer's primary key drives
    /// hoisting.
    ///
    /// Column names must be unique within each schema. Panics when `layers`
    /// is empty.
    pub fn new(base: &Table, layers: &[Table]) -> Self {
        assert!(!layers.is_empty(), "at least one layer schema is required");
        let mut cd = ColDiff {
            columns: Vec::new(),
            name_map: FxHashMap::default(),
            layers: layers.len(),
        };
        for layer in layers.iter().rev() {
            cd.insert_columns(&layer.columns);
        }
        cd.insert_columns(&base.columns);
        for (l, layer) in layers.iter().enumerate() {
            cd.classify_layer(l, base, layer);
            cd.assign_moves(l, base, layer);
        }
        cd.hoist_pk_to_front(&layers[0]);
        cd.assign_indices(base, layers);
        cd
    }

    /// The unified columns in final order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Unified position of `name`, when the diff knows it.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.name_map.get(name).copied()
    }

    /// Number of unified columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Number of layers this diff was built against.
    pub fn layer_count(&self) -> usize {
        self.layers
    }

    /// Merges one schema's names into the unified list. Names never seen
    /// before land directly after their nearest preceding known column, or
    /// at the front when nothing known precedes them, keeping their relative
    /// order from the source schema.
    fn insert_columns(&mut self, names: &[String]) {
        let mut insert_at = 0usize;
        let mut pending: BTreeMap<usize, Vec<Column>> = BTreeMap::new();
        for name in names {
            match self.name_map.get(name.as_str()) {
                Some(&at) => insert_at = at + 1,
                None => pending
                    .entry(insert_at)
                    .or_default()
                    .push(Column::new(name.clone(), self.layers)),
            }
        }
        if pending.is_empty() {
            return;
        }
        // Splice highest positions first so earlier splices cannot shift
        // the ones still pending.
        for (at, cols) in pending.into_iter().rev() {
            self.columns.splice(at..at, cols);
        }
        self.rebuild_name_map();
    }

    fn classify_layer(&mut self, layer: usize, base: &Table, table: &Table) {
        let base_set: FxHashSet<&str> = base.columns.iter().map(String::as_str).collect();
        let layer_set: FxHashSet<&str> = table.columns.iter().map(String::as_str).collect();
        for col in &mut self.columns {
            let name = col.name.as_str();
            if layer_set.contains(name) && !base_set.contains(name) {
                col.added[layer] = true;
            } else if base_set.contains(name) && !layer_set.contains(name) {
                col.removed[layer] = true;
            }
        }
    }

    /// Records a move for every common column the LIS selection left
    /// unanchored, expressed relative to the nearest anchored neighbour.
    /// Anchor references use unified positions as they stand now, before
    /// hoisting.
    fn assign_moves(&mut self, layer: usize, base: &Table, table: &Table) {
        let layer_set: FxHashSet<&str> = table.columns.iter().map(String::as_str).collect();
        let common_cols: Vec<&str> = base
            .columns
            .iter()
            .map(String::as_str)
            .filter(|name| layer_set.contains(name))
            .collect();
        let common_map: FxHashMap<&str, usize> = common_cols
            .iter()
            .enumerate()
            .map(|(i, &name)| (name, i))
            .collect();

        // Walk the unified list once, collecting each common column's old
        // position and its unified position in layer order.
        let mut old_positions = Vec::with_capacity(common_cols.len());
        let mut unified_positions = Vec::with_capacity(common_cols.len());
        for (i, col) in self.columns.iter().enumerate() {
            if let Some(&old) = common_map.get(col.name.as_str()) {
                unified_positions.push(i);
                old_positions.push(old);
            }
        }

        let ops = move_ops(&old_positions);
        let movers: FxHashSet<usize> = ops.iter().map(|op| op.old_idx).collect();
        for op in &ops {
            let unified = unified_positions[op.new_idx];
            let anchor = (0..op.old_idx)
                .rev()
                .find(|i| !movers.contains(i))
                .map(|i| Move::After(self.name_map[common_cols[i]]))
                .or_else(|| {
                    (op.old_idx..common_cols.len())
                        .find(|i| !movers.contains(i))
                        .map(|i| Move::Before(self.name_map[common_cols[i]]))
                });
            match anchor {
                Some(mv) => self.columns[unified].moved[layer] = Some(mv),
                None => unreachable!("move derived with no anchor in either direction"),
            }
        }
    }

    /// Stable-sorts primary-key columns of the first layer to the front, in
    /// key order; everything else keeps its relative order behind them.
    fn hoist_pk_to_front(&mut self, first_layer: &Table) {
        let rank: FxHashMap<String, usize> = first_layer
            .primary_key()
            .into_iter()
            .enumerate()
            .map(|(i, name)| (name, i))
            .collect();
        self.columns
            .sort_by_key(|col| rank.get(col.name.as_str()).copied().unwrap_or(usize::MAX));
        self.rebuild_name_map();
    }

    /// Records every column's position and key membership per source, looked
    /// up against the final hoisted order.
    fn assign_indices(&mut self, base: &Table, layers: &[Table]) {
        for (i, name) in base.columns.iter().enumerate() {
            let at = self.name_map[name.as_str()];
            self.columns[at].base_idx = Some(i);
        }
        for name in base.primary_key() {
            let at = self.name_map[name.as_str()];
            self.columns[at].base_pk = true;
        }
        for (l, layer) in layers.iter().enumerate() {
            for (j, name) in layer.columns.iter().enumerate() {
                let at = self.name_map[name.as_str()];
                self.columns[at].layer_idx[l] = Some(j);
            }
            for name in layer.primary_key() {
                let at = self.name_map[name.as_str()];
                self.columns[at].layer_pk[l] = true;
            }
        }
    }

    fn rebuild_name_map(&mut self) {
        self.name_map = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, col)| (col.name.clone(), i))
            .collect();
    }
}
