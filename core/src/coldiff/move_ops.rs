//! Minimal-move derivation on top of LIS anchoring.

use super::lis::longest_increasing_indices;

/// One relocation: the element that used to sit at `old_idx` now sits at
/// `new_idx`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOp {
    pub old_idx: usize,
    pub new_idx: usize,
}

/// Derives the moves that turn the old order into the new one.
///
/// `positions` lists old positions in new order. Elements on the longest
/// strictly increasing run act as anchors and stay put; every other element
/// yields one op. Ops come back in ascending `new_idx`, following a left to
/// right scan of the input. Identity and empty inputs yield no ops.
pub fn move_ops(positions: &[usize]) -> Vec<MoveOp> {
    let mut anchored = vec![false; positions.len()];
    for idx in longest_increasing_indices(positions) {
        anchored[idx] = true;
    }
    positions
        .iter()
        .enumerate()
        .filter(|&(i, _)| !anchored[i])
        .map(|(i, &v)| MoveOp {
            old_idx: v,
            new_idx: i,
        })
        .collect()
}
