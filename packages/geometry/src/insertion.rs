//! # Insertion Point Resolution
//!
//! Maps a pointer position over a container to an insertion index among its
//! children, and places the static insertion marker for that index.
//!
//! Everything here works on a geometry snapshot (sibling rects captured from
//! the rendered page), never on live layout, and never touches the tree.

use crate::Rect;
use pageblocks_model::BlockId;
use serde::{Deserialize, Serialize};

/// Gap between an edge and the marker when there is no neighbour on one side
pub const DEFAULT_MARKER_OFFSET: f64 = 4.0;

/// Index at which a drop at `pointer_y` lands among `children`
///
/// `children` must be in document order. The result is the first child whose
/// midpoint lies below the pointer, or the child count when the pointer is at
/// or below the last midpoint.
pub fn insertion_index(pointer_y: f64, children: &[Rect]) -> usize {
    children
        .iter()
        .position(|rect| pointer_y < rect.midpoint())
        .unwrap_or(children.len())
}

/// Vertical position of the insertion marker for `index`
pub fn marker_position(index: usize, children: &[Rect], container: &Rect, offset: f64) -> f64 {
    let (Some(first), Some(last)) = (children.first(), children.last()) else {
        return container.top + offset;
    };

    if index == 0 {
        first.top - offset
    } else if index >= children.len() {
        last.bottom + offset
    } else {
        (children[index - 1].bottom + children[index].top) / 2.0
    }
}

/// A container under the pointer, with its children's geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropTarget {
    pub parent_id: BlockId,
    pub container: Rect,
    pub child_rects: Vec<Rect>,
}

impl DropTarget {
    pub fn new(parent_id: impl Into<BlockId>, container: Rect, child_rects: Vec<Rect>) -> Self {
        Self {
            parent_id: parent_id.into(),
            container,
            child_rects,
        }
    }
}

/// Speculative drop location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    pub parent_id: BlockId,
    pub index: usize,
    pub marker_y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InsertionResolver {
    pub marker_offset: f64,
}

impl Default for InsertionResolver {
    fn default() -> Self {
        Self {
            marker_offset: DEFAULT_MARKER_OFFSET,
        }
    }
}

impl InsertionResolver {
    pub fn new(marker_offset: f64) -> Self {
        Self { marker_offset }
    }

    pub fn propose(&self, target: &DropTarget, pointer_y: f64) -> Proposal {
        let index = insertion_index(pointer_y, &target.child_rects);
        Proposal {
            parent_id: target.parent_id.clone(),
            index,
            marker_y: marker_position(
                index,
                &target.child_rects,
                &target.container,
                self.marker_offset,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stacked() -> Vec<Rect> {
        // midpoints 20, 70, 120
        vec![
            Rect::new(0.0, 40.0),
            Rect::new(50.0, 90.0),
            Rect::new(100.0, 140.0),
        ]
    }

    #[test]
    fn test_empty_parent_is_always_zero() {
        assert_eq!(insertion_index(-500.0, &[]), 0);
        assert_eq!(insertion_index(0.0, &[]), 0);
        assert_eq!(insertion_index(9999.0, &[]), 0);
    }

    #[test]
    fn test_boundaries() {
        let rects = stacked();
        assert_eq!(insertion_index(5.0, &rects), 0);
        assert_eq!(insertion_index(130.0, &rects), 3);
        assert_eq!(insertion_index(45.0, &rects), 1);
        assert_eq!(insertion_index(100.0, &rects), 2);
    }

    #[test]
    fn test_exact_midpoint_goes_after() {
        let rects = stacked();
        assert_eq!(insertion_index(20.0, &rects), 1);
        assert_eq!(insertion_index(120.0, &rects), 3);
    }

    #[test]
    fn test_marker_positions() {
        let rects = stacked();
        let container = Rect::new(-10.0, 150.0);

        assert_eq!(marker_position(0, &rects, &container, 4.0), -4.0);
        assert_eq!(marker_position(1, &rects, &container, 4.0), 45.0);
        assert_eq!(marker_position(2, &rects, &container, 4.0), 95.0);
        assert_eq!(marker_position(3, &rects, &container, 4.0), 144.0);
        assert_eq!(marker_position(0, &[], &container, 4.0), -6.0);
    }

    #[test]
    fn test_propose() {
        let target = DropTarget::new("section-1", Rect::new(0.0, 200.0), stacked());
        let proposal = InsertionResolver::default().propose(&target, 60.0);

        assert_eq!(proposal.parent_id.as_str(), "section-1");
        assert_eq!(proposal.index, 1);
        assert_eq!(proposal.marker_y, 45.0);
    }
}
