#![no_main]

use libfuzzer_sys::fuzz_target;

use table_diff::{longest_increasing_indices, move_ops};

fuzz_target!(|data: &[u8]| {
    let len = data.len().min(64);
    if len == 0 {
        return;
    }
    // Shuffle the identity into a permutation steered by the input bytes.
    let mut positions: Vec<usize> = (0..len).collect();
    for (i, &raw) in data.iter().take(len).enumerate() {
        positions.swap(i, raw as usize % len);
    }

    let anchors = longest_increasing_indices(&positions);
    assert!(!anchors.is_empty());
    for pair in anchors.windows(2) {
        assert!(pair[0] < pair[1], "anchor indices must ascend");
        assert!(
            positions[pair[0]] < positions[pair[1]],
            "anchor values must ascend"
        );
    }

    // A longest selection can never lose to the greedy increasing run.
    let mut greedy = 1;
    let mut last = positions[0];
    for &value in &positions[1..] {
        if value > last {
            greedy += 1;
            last = value;
        }
    }
    assert!(anchors.len() >= greedy);

    let mut anchored = vec![false; len];
    for &at in &anchors {
        anchored[at] = true;
    }

    let ops = move_ops(&positions);
    assert_eq!(ops.len() + anchors.len(), len);
    for pair in ops.windows(2) {
        assert!(pair[0].new_idx < pair[1].new_idx);
    }
    for op in &ops {
        assert!(!anchored[op.new_idx], "anchored elements never move");
        assert_eq!(positions[op.new_idx], op.old_idx);
    }

    let identity: Vec<usize> = (0..len).collect();
    assert!(move_ops(&identity).is_empty());
});
