// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drag-drop context: participants, active drag state, and transformers.

use alloc::vec::Vec;
use core::fmt;
use core::hash::Hash;

use hashbrown::HashMap;
use kurbo::{Point, Vec2};

use crate::collision::CollisionStrategy;
use crate::error::DndError;
use crate::geometry::{Layout, Transform};
use crate::pointer::PointerTrack;
use crate::transformer::{TargetKind, Transformer, TransformerRegistry};

/// How an element bound to a participant should be treated.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeOptions {
    /// The participant must not write its own transform to the element; some
    /// other layer composes and applies the final transform.
    pub skip_transform: bool,
}

/// Which participant, if any, is being dragged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActiveDrag<K> {
    /// The draggable being dragged.
    pub draggable: Option<K>,
    /// The droppable the drag is currently over.
    pub droppable: Option<K>,
    /// Whether a floating overlay, rather than the original element, represents the drag.
    ///
    /// This is a property of the host's rendering setup and survives the end of a drag.
    pub overlay: bool,
}

impl<K> Default for ActiveDrag<K> {
    fn default() -> Self {
        Self {
            draggable: None,
            droppable: None,
            overlay: false,
        }
    }
}

/// Outcome of [`DragDropContext::drag_end`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragEnd<K> {
    /// The draggable that was dropped.
    pub draggable: K,
    /// The droppable it was over, if any.
    pub droppable: Option<K>,
}

#[derive(Clone, Debug, Default)]
struct DraggableEntry {
    layout: Option<Layout>,
    offset: Transform,
    node: Option<NodeOptions>,
}

#[derive(Clone, Debug, Default)]
struct DroppableEntry {
    layout: Option<Layout>,
    node: Option<NodeOptions>,
}

/// Shared drag-drop state.
///
/// The context owns every registered draggable and droppable, their layout
/// snapshots, the active drag, and the [`TransformerRegistry`] whose
/// transformers see the context itself as their environment.
///
/// Every observable change bumps [`revision`](Self::revision), which hosts can
/// use to decide when derived transforms need to be recomputed.
///
/// ```
/// use kurbo::Point;
/// use understory_dnd::{DragDropContext, Layout, Transform};
///
/// let mut dnd = DragDropContext::new();
/// dnd.add_draggable("card");
/// dnd.add_droppable("card");
/// dnd.set_layout(&"card", Layout::new(0.0, 0.0, 80.0, 40.0));
///
/// dnd.drag_start("card", Point::new(10.0, 10.0)).unwrap();
/// dnd.drag_move(Point::new(25.0, 12.0));
/// assert_eq!(dnd.draggable_transform(&"card"), Some(Transform::new(15.0, 2.0)));
///
/// let end = dnd.drag_end().unwrap();
/// assert_eq!(end.draggable, "card");
/// assert_eq!(dnd.draggable_transform(&"card"), Some(Transform::ZERO));
/// ```
pub struct DragDropContext<K> {
    draggables: HashMap<K, DraggableEntry>,
    droppables: HashMap<K, DroppableEntry>,
    droppable_order: Vec<K>,
    active: ActiveDrag<K>,
    pointer: PointerTrack,
    transformers: TransformerRegistry<K, Self>,
    collision: CollisionStrategy,
    revision: u64,
}

impl<K> Default for DragDropContext<K> {
    fn default() -> Self {
        Self {
            draggables: HashMap::new(),
            droppables: HashMap::new(),
            droppable_order: Vec::new(),
            active: ActiveDrag::default(),
            pointer: PointerTrack::default(),
            transformers: TransformerRegistry::new(),
            collision: CollisionStrategy::default(),
            revision: 0,
        }
    }
}

impl<K: fmt::Debug> fmt::Debug for DragDropContext<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragDropContext")
            .field("draggables", &self.draggables)
            .field("droppables", &self.droppables)
            .field("droppable_order", &self.droppable_order)
            .field("active", &self.active)
            .field("pointer", &self.pointer)
            .field("transformers", &self.transformers)
            .field("collision", &self.collision)
            .field("revision", &self.revision)
            .finish()
    }
}

impl<K> DragDropContext<K> {
    /// Creates an empty context using [`CollisionStrategy::ClosestCenter`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variant of [`set_collision`](Self::set_collision).
    #[must_use]
    pub fn with_collision(mut self, strategy: CollisionStrategy) -> Self {
        self.collision = strategy;
        self
    }

    /// Replaces the collision strategy used while dragging.
    pub fn set_collision(&mut self, strategy: CollisionStrategy) {
        self.collision = strategy;
    }

    /// The collision strategy used while dragging.
    #[must_use]
    pub fn collision(&self) -> CollisionStrategy {
        self.collision
    }

    /// Change counter; bumps on every observable state change.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The active drag state.
    #[must_use]
    pub fn active(&self) -> &ActiveDrag<K> {
        &self.active
    }

    /// Returns `true` while a draggable is being dragged.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.active.draggable.is_some()
    }

    /// Read access to the transformer registry.
    #[must_use]
    pub fn transformers(&self) -> &TransformerRegistry<K, Self> {
        &self.transformers
    }

    /// Registered droppable ids in registration order.
    pub fn droppable_ids(&self) -> impl Iterator<Item = &K> {
        self.droppable_order.iter()
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl<K> DragDropContext<K>
where
    K: Clone + Eq + Hash + fmt::Debug,
{
    /// Registers a draggable. Returns `false` if it was already registered.
    pub fn add_draggable(&mut self, id: K) -> bool {
        if self.draggables.contains_key(&id) {
            return false;
        }
        self.draggables.insert(id, DraggableEntry::default());
        self.bump();
        true
    }

    /// Unregisters a draggable, cancelling the drag if it was the active one.
    pub fn remove_draggable(&mut self, id: &K) -> bool {
        if self.draggables.remove(id).is_none() {
            return false;
        }
        if self.active.draggable.as_ref() == Some(id) {
            tracing::debug!(?id, "active draggable removed; cancelling drag");
            self.active.draggable = None;
            self.active.droppable = None;
            self.pointer.end();
        }
        self.bump();
        true
    }

    /// Registers a droppable. Returns `false` if it was already registered.
    pub fn add_droppable(&mut self, id: K) -> bool {
        if self.droppables.contains_key(&id) {
            return false;
        }
        self.droppables.insert(id.clone(), DroppableEntry::default());
        self.droppable_order.push(id);
        self.bump();
        true
    }

    /// Unregisters a droppable, clearing it as the active droppable if needed.
    pub fn remove_droppable(&mut self, id: &K) -> bool {
        if self.droppables.remove(id).is_none() {
            return false;
        }
        self.droppable_order.retain(|d| d != id);
        if self.active.droppable.as_ref() == Some(id) {
            self.active.droppable = None;
        }
        self.bump();
        true
    }

    /// Returns `true` if `id` is a registered draggable.
    #[must_use]
    pub fn has_draggable(&self, id: &K) -> bool {
        self.draggables.contains_key(id)
    }

    /// Returns `true` if `id` is a registered droppable.
    #[must_use]
    pub fn has_droppable(&self, id: &K) -> bool {
        self.droppables.contains_key(id)
    }

    /// Replaces the layout snapshot of the draggable and/or droppable named `id`.
    ///
    /// Returns `false` if `id` is neither.
    pub fn set_layout(&mut self, id: &K, layout: Layout) -> bool {
        let mut known = false;
        if let Some(entry) = self.draggables.get_mut(id) {
            entry.layout = Some(layout);
            known = true;
        }
        if let Some(entry) = self.droppables.get_mut(id) {
            entry.layout = Some(layout);
            known = true;
        }
        if known {
            self.resolve_droppable();
            self.bump();
        }
        known
    }

    /// Layout of the draggable named `id`, if known.
    #[must_use]
    pub fn draggable_layout(&self, id: &K) -> Option<Layout> {
        self.draggables.get(id)?.layout
    }

    /// Layout of the droppable named `id`, if known.
    #[must_use]
    pub fn droppable_layout(&self, id: &K) -> Option<Layout> {
        self.droppables.get(id)?.layout
    }

    /// Records that an element is bound to the participant `(kind, id)`.
    pub fn bind_node(&mut self, kind: TargetKind, id: &K, options: NodeOptions) -> bool {
        let Some(node) = self.node_slot(kind, id) else {
            return false;
        };
        *node = Some(options);
        self.bump();
        true
    }

    /// Forgets the element bound to the participant `(kind, id)`.
    pub fn unbind_node(&mut self, kind: TargetKind, id: &K) -> bool {
        let Some(node) = self.node_slot(kind, id) else {
            return false;
        };
        if node.take().is_none() {
            return false;
        }
        self.bump();
        true
    }

    /// Options of the element bound to `(kind, id)`, if one is bound.
    #[must_use]
    pub fn node_options(&self, kind: TargetKind, id: &K) -> Option<NodeOptions> {
        match kind {
            TargetKind::Draggables => self.draggables.get(id)?.node,
            TargetKind::Droppables => self.droppables.get(id)?.node,
        }
    }

    fn node_slot(&mut self, kind: TargetKind, id: &K) -> Option<&mut Option<NodeOptions>> {
        match kind {
            TargetKind::Draggables => self.draggables.get_mut(id).map(|e| &mut e.node),
            TargetKind::Droppables => self.droppables.get_mut(id).map(|e| &mut e.node),
        }
    }

    /// Starts dragging the draggable `id` with the pointer at `pointer`.
    ///
    /// Starting a new drag while one is active replaces it; the replaced drag
    /// ends without a [`DragEnd`].
    pub fn drag_start(&mut self, id: K, pointer: Point) -> Result<(), DndError<K>> {
        if !self.draggables.contains_key(&id) {
            return Err(DndError::UnknownDraggable(id));
        }
        if let Some(previous) = self.active.draggable.take() {
            if let Some(entry) = self.draggables.get_mut(&previous) {
                entry.offset = Transform::ZERO;
            }
        }
        if let Some(entry) = self.draggables.get_mut(&id) {
            entry.offset = Transform::ZERO;
        }
        tracing::debug!(?id, x = pointer.x, y = pointer.y, "drag start");
        self.pointer.start(pointer);
        self.active.draggable = Some(id);
        self.active.droppable = None;
        self.resolve_droppable();
        self.bump();
        Ok(())
    }

    /// Moves the pointer of the active drag, returning the delta since the last move.
    ///
    /// Returns `None` when nothing is being dragged.
    pub fn drag_move(&mut self, pointer: Point) -> Option<Vec2> {
        let id = self.active.draggable.clone()?;
        let delta = self.pointer.update(pointer)?;
        let offset = self.pointer.offset().unwrap_or(Vec2::ZERO);
        if let Some(entry) = self.draggables.get_mut(&id) {
            entry.offset = offset.into();
        }
        self.resolve_droppable();
        self.bump();
        Some(delta)
    }

    /// Ends the active drag.
    ///
    /// Returns `None` when nothing was being dragged.
    pub fn drag_end(&mut self) -> Option<DragEnd<K>> {
        let draggable = self.active.draggable.take()?;
        let droppable = self.active.droppable.take();
        if let Some(entry) = self.draggables.get_mut(&draggable) {
            entry.offset = Transform::ZERO;
        }
        self.pointer.end();
        tracing::debug!(?draggable, ?droppable, "drag end");
        self.bump();
        Some(DragEnd {
            draggable,
            droppable,
        })
    }

    /// Records whether an overlay represents the dragged participant.
    pub fn set_overlay(&mut self, overlay: bool) {
        if self.active.overlay != overlay {
            tracing::debug!(overlay, "overlay changed");
            self.active.overlay = overlay;
            self.bump();
        }
    }

    /// Returns `true` if `id` is the draggable being dragged.
    #[must_use]
    pub fn is_active_draggable(&self, id: &K) -> bool {
        self.active.draggable.as_ref() == Some(id)
    }

    /// Returns `true` if `id` is the droppable the drag is over.
    #[must_use]
    pub fn is_active_droppable(&self, id: &K) -> bool {
        self.active.droppable.as_ref() == Some(id)
    }

    /// Draggable-side transform of `id`: the raw drag offset folded through the
    /// draggable transformers.
    ///
    /// Returns `None` for an unknown draggable.
    #[must_use]
    pub fn draggable_transform(&self, id: &K) -> Option<Transform> {
        let entry = self.draggables.get(id)?;
        Some(
            self.transformers
                .apply(TargetKind::Draggables, id, entry.offset, self),
        )
    }

    /// Droppable-side transform of `id`: the identity folded through the
    /// droppable transformers.
    ///
    /// Returns `None` for an unknown droppable.
    #[must_use]
    pub fn droppable_transform(&self, id: &K) -> Option<Transform> {
        if !self.droppables.contains_key(id) {
            return None;
        }
        Some(
            self.transformers
                .apply(TargetKind::Droppables, id, Transform::ZERO, self),
        )
    }

    /// Registers a transformer for `(kind, id)`.
    pub fn add_transformer(&mut self, kind: TargetKind, id: K, transformer: Transformer<Self>) {
        tracing::trace!(
            ?kind,
            ?id,
            transformer = transformer.id(),
            order = transformer.order(),
            "add transformer"
        );
        self.transformers.add(kind, id, transformer);
        self.bump();
    }

    /// Removes the first transformer named `transformer_id` for `(kind, id)`.
    ///
    /// Returns `false`, and changes nothing, if no such transformer exists.
    pub fn remove_transformer(&mut self, kind: TargetKind, id: &K, transformer_id: &str) -> bool {
        if self.transformers.remove(kind, id, transformer_id).is_none() {
            return false;
        }
        tracing::trace!(?kind, ?id, transformer = transformer_id, "remove transformer");
        self.bump();
        true
    }

    fn resolve_droppable(&mut self) {
        if !self.is_dragging() {
            return;
        }
        let over = self.detect_collision();
        if over != self.active.droppable {
            tracing::trace!(?over, "active droppable changed");
            self.active.droppable = over;
        }
    }

    fn detect_collision(&self) -> Option<K> {
        let id = self.active.draggable.as_ref()?;
        let layout = self.draggable_layout(id)?;
        let transform = self.draggable_transform(id).unwrap_or_default();
        let dragged = layout.translated(transform);
        let candidates = self
            .droppable_order
            .iter()
            .filter_map(|d| Some((d, self.droppables.get(d)?.layout?)));
        self.collision
            .detect(dragged, candidates, self.active.droppable.as_ref())
            .cloned()
    }
}
