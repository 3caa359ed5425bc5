//! Column and move records of the unified list.

/// Where a relocated column landed, relative to a column that stayed put.
///
/// Indices reference unified positions as they were when moves were
/// derived, before primary-key hoisting reorders the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// The column now sits directly after the column at this unified index.
    After(usize),
    /// The column now sits directly before the column at this unified index.
    Before(usize),
}

/// One column of the unified list, classified against the base and against
/// every layer.
///
/// Per-layer attributes are fixed-size vectors indexed by layer number; the
/// layer count is set when the [`ColDiff`](super::ColDiff) is built and
/// never changes afterwards. For any layer `l`, `removed[l]` holds exactly
/// when the base has the column and layer `l` does not; a column owned by
/// neither side of that comparison carries neither flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Column name, unique within the unified list.
    pub name: String,
    /// Position in the base schema, when the base has this column.
    pub base_idx: Option<usize>,
    /// Whether the name belongs to the base primary key.
    pub base_pk: bool,
    /// Slot `l` is true when layer `l` introduced this column.
    pub added: Vec<bool>,
    /// Slot `l` is true when layer `l` dropped this column.
    pub removed: Vec<bool>,
    /// Slot `l` records how layer `l` relocated this column, if it did.
    pub moved: Vec<Option<Move>>,
    /// Position in each layer's schema, when that layer has this column.
    pub layer_idx: Vec<Option<usize>>,
    /// Whether the name belongs to each layer's primary key.
    pub layer_pk: Vec<bool>,
}

impl Column {
    /// A column with no classification yet, sized for `layers` layers.
    pub fn new(name: impl Into<String>, layers: usize) -> Self {
        Column {
            name: name.into(),
            base_idx: None,
            base_pk: false,
            added: vec![false; layers],
            removed: vec![false; layers],
            moved: vec![None; layers],
            layer_idx: vec![None; layers],
            layer_pk: vec![false; layers],
        }
    }

    /// True when any layer introduced this column.
    pub fn is_added(&self) -> bool {
        self.added.iter().any(|&flag| flag)
    }

    /// True when any layer dropped this column.
    pub fn is_removed(&self) -> bool {
        self.removed.iter().any(|&flag| flag)
    }

    /// True when any layer relocated this column.
    pub fn is_moved(&self) -> bool {
        self.moved.iter().any(Option::is_some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_column_reports_no_changes() {
        let col = Column::new("a", 2);
        assert!(!col.is_added());
        assert!(!col.is_removed());
        assert!(!col.is_moved());
        assert_eq!(col.added.len(), 2);
        assert_eq!(col.layer_idx, vec![None, None]);
    }

    #[test]
    fn status_flags_consider_every_layer() {
        let mut col = Column::new("a", 3);
        col.added[2] = true;
        assert!(col.is_added());
        col.moved[1] = Some(Move::Before(4));
        assert!(col.is_moved());
        assert!(!col.is_removed());
    }
}
