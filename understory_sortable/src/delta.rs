// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The sortable offset: how far a participant must shift to preview its new slot.
//!
//! While a drag is in progress the elements are still laid out in the
//! baseline order. A participant whose live index differs from its baseline
//! index is shifted by one slot's worth of space, measured from the dragged
//! participant's extent, on every axis where its position differs from the
//! dragged participant's position. Moving earlier in the order shifts it
//! backwards.
//!
//! This models single-row, single-column, and simple grid layouts. It does
//! not try to solve variable-sized or wrapping layouts.

use core::fmt;
use core::hash::Hash;

use understory_dnd::{DragDropContext, Layout, Transform};

use crate::order::SortOrder;

/// Offset for a participant moving from `initial_index` to `current_index`.
///
/// `layout` is the participant's own layout and `active_layout` the layout of
/// the participant being dragged. The result is the identity when the index
/// did not change or when either layout is unknown. An id missing from an
/// order is `None`, which sorts before every index.
///
/// ```
/// use understory_dnd::{Layout, Transform};
/// use understory_sortable::slot_delta;
///
/// let own = Layout::new(0.0, 0.0, 100.0, 50.0);
/// let dragged = Layout::new(100.0, 0.0, 120.0, 50.0);
///
/// // Pushed one slot later: shift right by the dragged width.
/// assert_eq!(slot_delta(Some(0), Some(1), Some(own), Some(dragged)), Transform::new(120.0, 0.0));
/// // Pulled one slot earlier: shift left.
/// assert_eq!(slot_delta(Some(1), Some(0), Some(own), Some(dragged)), Transform::new(-120.0, 0.0));
/// ```
#[must_use]
pub fn slot_delta(
    initial_index: Option<usize>,
    current_index: Option<usize>,
    layout: Option<Layout>,
    active_layout: Option<Layout>,
) -> Transform {
    if current_index == initial_index {
        return Transform::ZERO;
    }
    let (Some(layout), Some(active)) = (layout, active_layout) else {
        return Transform::ZERO;
    };
    let sign = if current_index < initial_index { -1.0 } else { 1.0 };
    let mut delta = Transform::ZERO;
    if layout.x != active.x {
        delta.x = sign * active.width;
    }
    if layout.y != active.y {
        delta.y = sign * active.height;
    }
    delta
}

/// Sortable offset of `id`, resolved against `order` and the drag state of `dnd`.
///
/// Layouts are droppable layouts; the dragged participant's layout is the
/// droppable layout of the active draggable id. Recomputed on every call.
#[must_use]
pub fn sort_delta<K>(id: &K, order: &SortOrder<K>, dnd: &DragDropContext<K>) -> Transform
where
    K: Clone + Eq + Hash + fmt::Debug,
{
    let initial_index = order.initial_index(id);
    let current_index = order.current_index(id);
    if current_index == initial_index {
        return Transform::ZERO;
    }
    let active_layout = dnd
        .active()
        .draggable
        .as_ref()
        .and_then(|active| dnd.droppable_layout(active));
    slot_delta(
        initial_index,
        current_index,
        dnd.droppable_layout(id),
        active_layout,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWN: Layout = Layout::new(0.0, 0.0, 100.0, 50.0);
    const RIGHT: Layout = Layout::new(100.0, 0.0, 100.0, 50.0);
    const BELOW: Layout = Layout::new(0.0, 50.0, 100.0, 40.0);
    const DIAGONAL: Layout = Layout::new(100.0, 50.0, 80.0, 40.0);

    #[test]
    fn unchanged_index_is_identity() {
        for i in [None, Some(0), Some(5)] {
            assert_eq!(slot_delta(i, i, Some(OWN), Some(RIGHT)), Transform::ZERO);
        }
    }

    #[test]
    fn missing_layouts_are_identity() {
        assert_eq!(slot_delta(Some(0), Some(1), None, Some(RIGHT)), Transform::ZERO);
        assert_eq!(slot_delta(Some(0), Some(1), Some(OWN), None), Transform::ZERO);
    }

    #[test]
    fn axes_are_independent() {
        assert_eq!(
            slot_delta(Some(0), Some(1), Some(OWN), Some(BELOW)),
            Transform::new(0.0, 40.0)
        );
        assert_eq!(
            slot_delta(Some(0), Some(1), Some(OWN), Some(DIAGONAL)),
            Transform::new(80.0, 40.0)
        );
        assert_eq!(
            slot_delta(Some(0), Some(1), Some(OWN), Some(OWN)),
            Transform::ZERO
        );
    }

    #[test]
    fn direction_is_symmetric() {
        let forward = slot_delta(Some(2), Some(5), Some(OWN), Some(DIAGONAL));
        let backward = slot_delta(Some(5), Some(2), Some(OWN), Some(DIAGONAL));
        assert_eq!(forward, -backward);
        assert_eq!(backward, Transform::new(-80.0, -40.0));
    }

    #[test]
    fn unaligned_axis_stays_positive_zero() {
        let delta = slot_delta(Some(3), Some(1), Some(OWN), Some(RIGHT));
        assert_eq!(delta, Transform::new(-100.0, 0.0));
        assert!(delta.y.is_sign_positive());
    }

    #[test]
    fn removed_id_moves_backwards() {
        // Absent from the live order: `None` sorts before every baseline index.
        assert_eq!(
            slot_delta(Some(1), None, Some(OWN), Some(RIGHT)),
            Transform::new(-100.0, 0.0)
        );
        assert_eq!(slot_delta(Some(1), None, None, Some(RIGHT)), Transform::ZERO);
    }
}
