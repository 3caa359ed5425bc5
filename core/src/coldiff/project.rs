//! Row projection into the unified column layout.

use super::ColDiff;

/// New-side and old-side values of one unified column in a modified row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellPair {
    /// Layer-side value; `None` exactly when the column is removed for the
    /// layer the pair was combined against.
    pub new_value: Option<String>,
    /// Base-side value; `None` exactly when the column is added for that
    /// layer.
    pub old_value: Option<String>,
}

impl ColDiff {
    /// Projects a layer-side row into unified order. Columns absent from
    /// `layer` come back as `None`.
    ///
    /// `row` must hold exactly one cell per column of that layer's schema.
    pub fn rearrange_row(&self, layer: usize, row: &[String]) -> Vec<Option<String>> {
        self.columns()
            .iter()
            .map(|col| col.layer_idx[layer].map(|idx| row[idx].clone()))
            .collect()
    }

    /// Projects a base-side row into unified order. Columns absent from the
    /// base come back as `None`.
    ///
    /// `row` must hold exactly one cell per column of the base schema.
    pub fn rearrange_base_row(&self, row: &[String]) -> Vec<Option<String>> {
        self.columns()
            .iter()
            .map(|col| col.base_idx.map(|idx| row[idx].clone()))
            .collect()
    }

    /// Pairs a layer-side and a base-side row of the same logical record,
    /// column by unified column.
    pub fn combine_rows(
        &self,
        layer: usize,
        new_row: &[String],
        old_row: &[String],
    ) -> Vec<CellPair> {
        self.columns()
            .iter()
            .map(|col| CellPair {
                new_value: if col.removed[layer] {
                    None
                } else {
                    col.layer_idx[layer].map(|idx| new_row[idx].clone())
                },
                old_value: if col.added[layer] {
                    None
                } else {
                    col.base_idx.map(|idx| old_row[idx].clone())
                },
            })
            .collect()
    }

    /// True when no column was added, removed, or relocated in any layer.
    pub fn no_column_changes(&self) -> bool {
        self.columns()
            .iter()
            .all(|col| !col.is_added() && !col.is_removed() && !col.is_moved())
    }
}
