// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_dnd --heading-base-level=0

//! Understory DnD: a headless drag-and-drop context.
//!
//! This crate tracks the participants of a drag-and-drop interaction and
//! composes the visual offset each of them should be drawn with. It does not
//! capture pointers, hit-test elements, or touch any styles itself; hosts feed
//! it pointer positions and layout snapshots and read transforms back.
//!
//! The core concepts are:
//!
//! - [`Layout`] and [`Transform`]: plain geometric snapshots and additive offsets.
//! - [`DragDropContext`]: the registered draggables and droppables, their
//!   layouts, and the [`ActiveDrag`] state.
//! - [`Transformer`] and [`TransformerRegistry`]: named, priority-ordered
//!   contributors that are folded, per participant, into the final transform.
//!   Transformers receive the context itself as a read-only environment, so a
//!   contributor can depend on layouts and active drag state without any
//!   ambient lookup.
//! - [`Draggable`] and [`Droppable`]: per-element handles over the context,
//!   including the [`DragActivators`] that start a drag.
//! - [`TransformTarget`]: the host's element sink. [`apply_transform`] writes a
//!   transform, or removes it entirely when it is the identity.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use understory_dnd::{
//!     DragDropContext, Draggable, Droppable, Layout, TargetKind, Transform, Transformer,
//! };
//!
//! let mut dnd = DragDropContext::new();
//! for (i, id) in [1_u32, 2].into_iter().enumerate() {
//!     Draggable::new(id).register(&mut dnd);
//!     Droppable::new(id).register(&mut dnd);
//!     dnd.set_layout(&id, Layout::new(0.0, 60.0 * i as f64, 200.0, 50.0));
//! }
//!
//! // While 1 is being dragged, nudge droppable 2 down by the dragged height.
//! dnd.add_transformer(
//!     TargetKind::Droppables,
//!     2,
//!     Transformer::new("make-room", 100, |t: Transform, ctx: &DragDropContext<u32>| {
//!         match ctx.active().draggable.and_then(|id| ctx.droppable_layout(&id)) {
//!             Some(dragged) => t + Transform::new(0.0, dragged.height),
//!             None => t,
//!         }
//!     }),
//! );
//!
//! assert_eq!(dnd.droppable_transform(&2), Some(Transform::ZERO));
//! dnd.drag_start(1, Point::new(5.0, 5.0)).unwrap();
//! assert_eq!(dnd.droppable_transform(&2), Some(Transform::new(0.0, 50.0)));
//! ```
//!
//! ## Transform composition
//!
//! For a participant `id`:
//!
//! - the draggable transform is the raw pointer offset of the active drag
//!   folded through the [`TargetKind::Draggables`] transformers of `id`;
//! - the droppable transform is [`Transform::ZERO`] folded through the
//!   [`TargetKind::Droppables`] transformers of `id`.
//!
//! Folds run in ascending [`Transformer::order`], ties in registration order,
//! and are recomputed on every query.
//!
//! ## Change tracking
//!
//! [`DragDropContext::revision`] bumps on every observable change (registration,
//! layout, drag state, transformers). Hosts that cache derived transforms can
//! compare revisions to decide when to recompute.
//!
//! ## Logging
//!
//! Drag lifecycle events are emitted through [`tracing`] at `debug` level, and
//! transformer bookkeeping at `trace` level. No subscriber is installed.
//!
//! ## Features
//!
//! - `std` (default): forwards to `kurbo/std` and `tracing/std`.
//! - `libm`: forwards to `kurbo/libm` for `no_std` targets.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod collision;
mod context;
mod error;
mod geometry;
mod participant;
mod pointer;
mod target;
mod transformer;

pub use collision::CollisionStrategy;
pub use context::{ActiveDrag, DragDropContext, DragEnd, NodeOptions};
pub use error::DndError;
pub use geometry::{Layout, Transform};
pub use participant::{ActivatorEvent, DragActivators, Draggable, Droppable};
pub use pointer::PointerTrack;
pub use target::{TransformTarget, apply_transform};
pub use transformer::{TargetKind, Transformer, TransformerRegistry};
