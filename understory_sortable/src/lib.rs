// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_sortable --heading-base-level=0

//! Understory Sortable: preview list reordering during a drag.
//!
//! When an item of a sortable list is dragged, the other items should visually
//! make room for it *before* the list's canonical order is changed. This crate
//! computes that preview as a transform per item and plugs it into the
//! transformer fold of [`understory_dnd::DragDropContext`].
//!
//! The core concepts are:
//!
//! - [`SortableContext`]: a shared handle to the list's [`SortOrder`], which
//!   holds the baseline order (`initial_ids`) and the live order
//!   (`sorted_ids`) the drag would produce if dropped now.
//! - [`sort_delta`] / [`slot_delta`]: the *sortable offset*, i.e. how far an
//!   item must shift so that it appears in its live slot while elements are
//!   still laid out in baseline order.
//! - [`Sortable`]: the per-element binding. On [`attach`](Sortable::attach) it
//!   registers a draggable, a droppable, and a `"sortableOffset"` transformer
//!   (order `100`) on the droppable side; on [`detach`](Sortable::detach) it
//!   removes them again.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use understory_dnd::{DragDropContext, Layout, Transform};
//! use understory_sortable::{Sortable, SortableContext};
//!
//! let mut dnd = DragDropContext::new();
//! let list = SortableContext::new([1_u32, 2, 3]);
//!
//! // One binding per item, laid out in a row of 100px wide cells.
//! let mut items: Vec<Sortable<u32, Option<Transform>>> = Vec::new();
//! for (i, id) in [1_u32, 2, 3].into_iter().enumerate() {
//!     let mut item = Sortable::new(id, list.clone());
//!     item.attach(&mut dnd);
//!     dnd.set_layout(&id, Layout::new(100.0 * i as f64, 0.0, 100.0, 40.0));
//!     item.bind(&mut dnd, None);
//!     items.push(item);
//! }
//!
//! // Drag item 3 to the left, over item 2.
//! let activators = items[2].drag_activators();
//! activators
//!     .dispatch(understory_dnd::ActivatorEvent::PointerDown, &mut dnd, Point::new(250.0, 20.0))
//!     .unwrap();
//! dnd.drag_move(Point::new(150.0, 20.0));
//! list.track(&dnd);
//! assert_eq!(list.sorted_ids(), [1, 3, 2]);
//!
//! for item in &mut items {
//!     item.refresh(&dnd);
//! }
//! // Item 2 shifts right into the slot item 3 left behind ...
//! assert_eq!(items[1].element(), Some(&Some(Transform::new(100.0, 0.0))));
//! // ... item 3 follows the pointer ...
//! assert_eq!(items[2].element(), Some(&Some(Transform::new(-100.0, 0.0))));
//! // ... and item 1 stays put.
//! assert_eq!(items[0].element(), Some(&None));
//!
//! // Dropping commits the live order.
//! let end = dnd.drag_end().unwrap();
//! assert_eq!(list.on_drag_end(&end), Some(vec![1, 3, 2]));
//! ```
//!
//! ## Updating elements
//!
//! There is no reactive runtime here. Hosts call [`Sortable::refresh`] after
//! any change to the order, the drag state, or layouts. The
//! [`SortableContext::revision`] and
//! [`DragDropContext::revision`](understory_dnd::DragDropContext::revision)
//! counters tell them when such a change happened. `refresh` only touches the
//! element when the transform actually changed, and removes the transform
//! instead of writing an identity value.
//!
//! ## Preconditions
//!
//! `sorted_ids` must be a permutation of `initial_ids`. [`SortableContext`]
//! enforces this for the operations it offers; the offset computation itself
//! does not re-check it. Ids missing from an order are treated as index `None`,
//! and missing layouts produce no offset, so a participant that is removed
//! mid-drag simply stops moving.
//!
//! ## Features
//!
//! - `std` (default): forwards to `understory_dnd/std`.
//! - `libm`: forwards to `understory_dnd/libm` for `no_std` targets.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod delta;
mod order;
mod sortable;

pub use delta::{slot_delta, sort_delta};
pub use order::{OrderError, SortOrder, SortableContext};
pub use sortable::{
    BindingState, SORTABLE_OFFSET, SORTABLE_OFFSET_ORDER, Sortable, SortableOptions,
};
