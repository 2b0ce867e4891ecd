//! Property-based invariant tests for the insertion resolver.
//!
//! 1. The index never exceeds the child count.
//! 2. The index is monotone in the pointer position.
//! 3. Pointers above the first midpoint give 0, at or below the last give len.
//! 4. The index splits the children by midpoint.
//! 5. Markers for interior indices sit between the neighbouring edges.

use pageblocks_geometry::{insertion_index, marker_position, Rect};
use proptest::prelude::*;

// ── Strategy helpers ──────────────────────────────────────────────────

/// Non-overlapping rects stacked top to bottom
fn stacked_rects() -> impl Strategy<Value = Vec<Rect>> {
    prop::collection::vec((0.0f64..50.0, 1.0f64..120.0), 0..12).prop_map(|parts| {
        let mut y = 0.0;
        parts
            .into_iter()
            .map(|(gap, height)| {
                let top = y + gap;
                y = top + height;
                Rect::new(top, y)
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn index_is_bounded(rects in stacked_rects(), y in -500.0f64..3000.0) {
        prop_assert!(insertion_index(y, &rects) <= rects.len());
    }
}

proptest! {
    #[test]
    fn index_is_monotone(rects in stacked_rects(), a in -500.0f64..3000.0, b in -500.0f64..3000.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(insertion_index(lo, &rects) <= insertion_index(hi, &rects));
    }
}

proptest! {
    #[test]
    fn boundary_indices(rects in stacked_rects()) {
        if let (Some(first), Some(last)) = (rects.first(), rects.last()) {
            prop_assert_eq!(insertion_index(first.midpoint() - 1.0, &rects), 0);
            prop_assert_eq!(insertion_index(last.midpoint(), &rects), rects.len());
        } else {
            prop_assert_eq!(insertion_index(0.0, &rects), 0);
        }
    }
}

proptest! {
    #[test]
    fn index_splits_by_midpoint(rects in stacked_rects(), y in -500.0f64..3000.0) {
        let index = insertion_index(y, &rects);
        for rect in &rects[..index] {
            prop_assert!(rect.midpoint() <= y);
        }
        if let Some(next) = rects.get(index) {
            prop_assert!(y < next.midpoint());
        }
    }
}

proptest! {
    #[test]
    fn interior_marker_between_edges(rects in stacked_rects(), offset in 0.0f64..20.0) {
        let container = Rect::new(-100.0, 5000.0);
        for index in 1..rects.len() {
            let marker = marker_position(index, &rects, &container, offset);
            prop_assert!(marker >= rects[index - 1].bottom);
            prop_assert!(marker <= rects[index].top);
        }
    }
}
