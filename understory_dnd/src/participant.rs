// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-element handles for the two sides of a drag-drop participant.
//!
//! [`Draggable`] and [`Droppable`] are thin, id-carrying views over a
//! [`DragDropContext`]. They register the participant, bind elements, and
//! answer "am I active?" queries. They hold no state of their own, so the
//! context always stays the single source of truth.

use core::fmt;
use core::hash::Hash;

use kurbo::Point;

use crate::context::{DragDropContext, NodeOptions};
use crate::error::DndError;
use crate::geometry::Transform;
use crate::target::{TransformTarget, apply_transform};
use crate::transformer::TargetKind;

/// Input events that can activate a drag.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ActivatorEvent {
    /// A pointer was pressed on the element.
    PointerDown,
}

/// The activation listeners of a draggable, keyed by [`ActivatorEvent`].
///
/// Hosts attach a listener for each of [`events`](Self::events) to the
/// element and forward matching input to [`dispatch`](Self::dispatch).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragActivators<K> {
    id: K,
}

impl<K> DragActivators<K> {
    /// The draggable these listeners activate.
    #[must_use]
    pub fn id(&self) -> &K {
        &self.id
    }

    /// Events with a listener.
    #[must_use]
    pub fn events(&self) -> &'static [ActivatorEvent] {
        &[ActivatorEvent::PointerDown]
    }

    /// Returns `true` if `event` has a listener.
    #[must_use]
    pub fn handles(&self, event: ActivatorEvent) -> bool {
        self.events().contains(&event)
    }
}

impl<K> DragActivators<K>
where
    K: Clone + Eq + Hash + fmt::Debug,
{
    /// Runs the listener for `event` with the pointer at `pointer`.
    ///
    /// Returns `Ok(false)` if `event` has no listener.
    pub fn dispatch(
        &self,
        event: ActivatorEvent,
        dnd: &mut DragDropContext<K>,
        pointer: Point,
    ) -> Result<bool, DndError<K>> {
        match event {
            ActivatorEvent::PointerDown => {
                dnd.drag_start(self.id.clone(), pointer)?;
                Ok(true)
            }
        }
    }
}

/// The draggable side of a participant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Draggable<K> {
    id: K,
}

impl<K> Draggable<K>
where
    K: Clone + Eq + Hash + fmt::Debug,
{
    /// Creates a handle for the draggable `id`.
    #[must_use]
    pub fn new(id: K) -> Self {
        Self { id }
    }

    /// The participant id.
    #[must_use]
    pub fn id(&self) -> &K {
        &self.id
    }

    /// Registers the draggable with `dnd`.
    pub fn register(&self, dnd: &mut DragDropContext<K>) -> bool {
        dnd.add_draggable(self.id.clone())
    }

    /// Unregisters the draggable from `dnd`.
    pub fn unregister(&self, dnd: &mut DragDropContext<K>) -> bool {
        dnd.remove_draggable(&self.id)
    }

    /// Records that an element is bound to this draggable.
    pub fn bind_node(&self, dnd: &mut DragDropContext<K>, options: NodeOptions) -> bool {
        dnd.bind_node(TargetKind::Draggables, &self.id, options)
    }

    /// Forgets the bound element.
    pub fn unbind_node(&self, dnd: &mut DragDropContext<K>) -> bool {
        dnd.unbind_node(TargetKind::Draggables, &self.id)
    }

    /// Returns `true` if this draggable is being dragged.
    #[must_use]
    pub fn is_active_draggable(&self, dnd: &DragDropContext<K>) -> bool {
        dnd.is_active_draggable(&self.id)
    }

    /// Draggable-side transform, or the identity if unregistered.
    #[must_use]
    pub fn transform(&self, dnd: &DragDropContext<K>) -> Transform {
        dnd.draggable_transform(&self.id).unwrap_or_default()
    }

    /// The activation listeners for this draggable.
    #[must_use]
    pub fn drag_activators(&self) -> DragActivators<K> {
        DragActivators {
            id: self.id.clone(),
        }
    }

    /// Writes this draggable's transform to `target`.
    ///
    /// Does nothing, and returns `false`, unless an element is bound without
    /// [`NodeOptions::skip_transform`].
    pub fn sync_element<T: TransformTarget + ?Sized>(
        &self,
        dnd: &DragDropContext<K>,
        target: &mut T,
    ) -> bool {
        match dnd.node_options(TargetKind::Draggables, &self.id) {
            Some(options) if !options.skip_transform => {
                apply_transform(target, self.transform(dnd));
                true
            }
            _ => false,
        }
    }
}

/// The droppable side of a participant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Droppable<K> {
    id: K,
}

impl<K> Droppable<K>
where
    K: Clone + Eq + Hash + fmt::Debug,
{
    /// Creates a handle for the droppable `id`.
    #[must_use]
    pub fn new(id: K) -> Self {
        Self { id }
    }

    /// The participant id.
    #[must_use]
    pub fn id(&self) -> &K {
        &self.id
    }

    /// Registers the droppable with `dnd`.
    pub fn register(&self, dnd: &mut DragDropContext<K>) -> bool {
        dnd.add_droppable(self.id.clone())
    }

    /// Unregisters the droppable from `dnd`.
    pub fn unregister(&self, dnd: &mut DragDropContext<K>) -> bool {
        dnd.remove_droppable(&self.id)
    }

    /// Records that an element is bound to this droppable.
    pub fn bind_node(&self, dnd: &mut DragDropContext<K>, options: NodeOptions) -> bool {
        dnd.bind_node(TargetKind::Droppables, &self.id, options)
    }

    /// Forgets the bound element.
    pub fn unbind_node(&self, dnd: &mut DragDropContext<K>) -> bool {
        dnd.unbind_node(TargetKind::Droppables, &self.id)
    }

    /// Returns `true` if the active drag is over this droppable.
    #[must_use]
    pub fn is_active_droppable(&self, dnd: &DragDropContext<K>) -> bool {
        dnd.is_active_droppable(&self.id)
    }

    /// Droppable-side transform, or the identity if unregistered.
    #[must_use]
    pub fn transform(&self, dnd: &DragDropContext<K>) -> Transform {
        dnd.droppable_transform(&self.id).unwrap_or_default()
    }

    /// Writes this droppable's transform to `target`.
    ///
    /// Does nothing, and returns `false`, unless an element is bound without
    /// [`NodeOptions::skip_transform`].
    pub fn sync_element<T: TransformTarget + ?Sized>(
        &self,
        dnd: &DragDropContext<K>,
        target: &mut T,
    ) -> bool {
        match dnd.node_options(TargetKind::Droppables, &self.id) {
            Some(options) if !options.skip_transform => {
                apply_transform(target, self.transform(dnd));
                true
            }
            _ => false,
        }
    }
}
