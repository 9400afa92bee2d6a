// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-element sortable binding.

use core::fmt;
use core::hash::Hash;

use understory_dnd::{
    DragActivators, DragDropContext, Draggable, Droppable, NodeOptions, TargetKind, Transform,
    TransformTarget, Transformer, apply_transform,
};

use crate::delta::sort_delta;
use crate::order::SortableContext;

/// Name of the transformer a [`Sortable`] registers by default.
pub const SORTABLE_OFFSET: &str = "sortableOffset";

/// Fold priority of the sortable-offset transformer by default.
pub const SORTABLE_OFFSET_ORDER: i32 = 100;

/// Configuration of a [`Sortable`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SortableOptions {
    /// Name of the droppable transformer contributing the sortable offset.
    pub transformer_id: &'static str,
    /// Fold priority of that transformer.
    pub order: i32,
}

impl Default for SortableOptions {
    fn default() -> Self {
        Self {
            transformer_id: SORTABLE_OFFSET,
            order: SORTABLE_OFFSET_ORDER,
        }
    }
}

/// Lifecycle state of a [`Sortable`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum BindingState {
    /// Not registered with a drag-drop context.
    #[default]
    Unregistered,
    /// Registered: draggable, droppable, and sortable-offset transformer are live.
    Registered,
}

/// A participant of a sortable list.
///
/// A `Sortable` pairs a [`Draggable`] and a [`Droppable`] with the same id and
/// contributes the sortable offset (see [`sort_delta`]) to the droppable side of
/// the transform fold. The host owns its lifetime:
///
/// - [`attach`](Self::attach) when the element mounts, [`detach`](Self::detach)
///   when it unmounts;
/// - [`bind`](Self::bind) or [`set_ref`](Self::set_ref) to connect the element
///   that should carry the transform;
/// - [`refresh`](Self::refresh) after any change to order, drag state, or
///   layout, to write the recomputed transform to the element.
///
/// ```
/// use kurbo::Point;
/// use understory_dnd::{DragDropContext, Layout, Transform};
/// use understory_sortable::{Sortable, SortableContext};
///
/// let mut dnd = DragDropContext::new();
/// let list = SortableContext::new(["a", "b"]);
///
/// let mut a = Sortable::<_, Option<Transform>>::new("a", list.clone());
/// let mut b = Sortable::<_, Option<Transform>>::new("b", list.clone());
/// a.attach(&mut dnd);
/// b.attach(&mut dnd);
/// dnd.set_layout(&"a", Layout::new(0.0, 0.0, 100.0, 40.0));
/// dnd.set_layout(&"b", Layout::new(0.0, 40.0, 100.0, 40.0));
/// a.bind(&mut dnd, None);
///
/// // Drag `b` over `a`: `a` is pushed down by `b`'s height.
/// dnd.drag_start("b", Point::new(50.0, 60.0)).unwrap();
/// dnd.drag_move(Point::new(50.0, 20.0));
/// list.track(&dnd);
/// assert_eq!(list.sorted_ids(), ["b", "a"]);
///
/// a.refresh(&dnd);
/// assert_eq!(a.element(), Some(&Some(Transform::new(0.0, 40.0))));
/// ```
pub struct Sortable<K, N> {
    id: K,
    list: SortableContext<K>,
    options: SortableOptions,
    draggable: Draggable<K>,
    droppable: Droppable<K>,
    state: BindingState,
    element: Option<N>,
    applied: Option<Transform>,
}

impl<K: fmt::Debug, N> fmt::Debug for Sortable<K, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sortable")
            .field("id", &self.id)
            .field("options", &self.options)
            .field("state", &self.state)
            .field("has_element", &self.element.is_some())
            .field("applied", &self.applied)
            .finish_non_exhaustive()
    }
}

impl<K, N> Sortable<K, N>
where
    K: Clone + Eq + Hash + fmt::Debug + 'static,
{
    /// Creates an unregistered binding for `id` in `list`.
    #[must_use]
    pub fn new(id: K, list: SortableContext<K>) -> Self {
        Self::with_options(id, list, SortableOptions::default())
    }

    /// Creates an unregistered binding with explicit options.
    #[must_use]
    pub fn with_options(id: K, list: SortableContext<K>, options: SortableOptions) -> Self {
        Self {
            draggable: Draggable::new(id.clone()),
            droppable: Droppable::new(id.clone()),
            id,
            list,
            options,
            state: BindingState::Unregistered,
            element: None,
            applied: None,
        }
    }

    /// The participant id.
    #[must_use]
    pub fn id(&self) -> &K {
        &self.id
    }

    /// The list this participant belongs to.
    #[must_use]
    pub fn list(&self) -> &SortableContext<K> {
        &self.list
    }

    /// The binding's configuration.
    #[must_use]
    pub fn options(&self) -> SortableOptions {
        self.options
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> BindingState {
        self.state
    }

    /// Returns `true` while registered with a drag-drop context.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.state == BindingState::Registered
    }

    /// Registers the draggable, the droppable, and the sortable-offset transformer.
    ///
    /// Does nothing, and returns `false`, if already registered, or if another
    /// participant already holds this id in `dnd`. Each id has at most one
    /// attached binding per context.
    pub fn attach(&mut self, dnd: &mut DragDropContext<K>) -> bool {
        if self.is_attached() {
            return false;
        }
        if dnd.has_draggable(&self.id) || dnd.has_droppable(&self.id) {
            tracing::debug!(id = ?self.id, "id already registered; sortable not attached");
            return false;
        }
        self.draggable.register(dnd);
        self.droppable.register(dnd);
        dnd.add_transformer(TargetKind::Droppables, self.id.clone(), self.transformer());
        self.state = BindingState::Registered;
        tracing::trace!(id = ?self.id, "sortable attached");
        true
    }

    /// Removes the sortable-offset transformer and unregisters both sides.
    ///
    /// Detaching the active draggable cancels its drag, so the list's live
    /// order is restored to the baseline. Does nothing, and returns `false`, if
    /// not registered. The bound element is kept, so the binding can be
    /// attached again.
    pub fn detach(&mut self, dnd: &mut DragDropContext<K>) -> bool {
        if !self.is_attached() {
            return false;
        }
        if dnd.is_active_draggable(&self.id) && self.list.reset() {
            tracing::debug!(id = ?self.id, "active sortable detached; order reset");
        }
        dnd.remove_transformer(
            TargetKind::Droppables,
            &self.id,
            self.options.transformer_id,
        );
        self.draggable.unregister(dnd);
        self.droppable.unregister(dnd);
        self.state = BindingState::Unregistered;
        self.applied = None;
        tracing::trace!(id = ?self.id, "sortable detached");
        true
    }

    fn transformer(&self) -> Transformer<DragDropContext<K>> {
        let id = self.id.clone();
        let list = self.list.clone();
        Transformer::new(
            self.options.transformer_id,
            self.options.order,
            move |transform, dnd: &DragDropContext<K>| {
                transform + sort_delta(&id, &list.order(), dnd)
            },
        )
    }

    /// The transform this participant should be drawn with.
    ///
    /// The active draggable, when no overlay stands in for it, follows the
    /// pointer with its draggable transform. Every other participant uses its
    /// droppable transform, which includes the sortable offset. Unregistered
    /// participants get the identity.
    #[must_use]
    pub fn transform(&self, dnd: &DragDropContext<K>) -> Transform {
        let follows_pointer = dnd.is_active_draggable(&self.id) && !dnd.active().overlay;
        let transform = if follows_pointer {
            dnd.draggable_transform(&self.id)
        } else {
            dnd.droppable_transform(&self.id)
        };
        transform.unwrap_or_default()
    }

    /// Returns `true` if this participant is being dragged.
    #[must_use]
    pub fn is_active_draggable(&self, dnd: &DragDropContext<K>) -> bool {
        self.draggable.is_active_draggable(dnd)
    }

    /// Returns `true` if the active drag is over this participant.
    #[must_use]
    pub fn is_active_droppable(&self, dnd: &DragDropContext<K>) -> bool {
        self.droppable.is_active_droppable(dnd)
    }

    /// The listeners that start dragging this participant.
    #[must_use]
    pub fn drag_activators(&self) -> DragActivators<K> {
        self.draggable.drag_activators()
    }

    /// The bound element, if any.
    #[must_use]
    pub fn element(&self) -> Option<&N> {
        self.element.as_ref()
    }

    /// Mutable access to the bound element, if any.
    pub fn element_mut(&mut self) -> Option<&mut N> {
        self.element.as_mut()
    }
}

impl<K, N> Sortable<K, N>
where
    K: Clone + Eq + Hash + fmt::Debug + 'static,
    N: TransformTarget,
{
    /// Binds `element` as the carrier of this participant's transform.
    ///
    /// Both sides are told to skip writing their own transforms, since the
    /// composed transform is written here. Returns the previously bound element.
    pub fn bind(&mut self, dnd: &mut DragDropContext<K>, element: N) -> Option<N> {
        let options = NodeOptions {
            skip_transform: true,
        };
        self.draggable.bind_node(dnd, options);
        self.droppable.bind_node(dnd, options);
        self.link(dnd, element)
    }

    /// Declarative variant of [`bind`](Self::bind).
    ///
    /// `Some` binds the element to both sides with default node options and
    /// links transform updates; `None` unbinds. Returns the previously bound
    /// element.
    pub fn set_ref(&mut self, dnd: &mut DragDropContext<K>, element: Option<N>) -> Option<N> {
        match element {
            Some(element) => {
                self.draggable.bind_node(dnd, NodeOptions::default());
                self.droppable.bind_node(dnd, NodeOptions::default());
                self.link(dnd, element)
            }
            None => {
                self.draggable.unbind_node(dnd);
                self.droppable.unbind_node(dnd);
                self.applied = None;
                self.element.take()
            }
        }
    }

    fn link(&mut self, dnd: &DragDropContext<K>, element: N) -> Option<N> {
        let previous = self.element.replace(element);
        self.applied = None;
        self.refresh(dnd);
        previous
    }

    /// Recomputes the transform and writes it to the bound element.
    ///
    /// The element is only touched when the transform differs from the last
    /// one written. An identity transform removes the element's transform
    /// instead of writing a no-op value. Returns whether the element was
    /// touched.
    pub fn refresh(&mut self, dnd: &DragDropContext<K>) -> bool {
        let transform = self.transform(dnd);
        let Some(element) = self.element.as_mut() else {
            return false;
        };
        if self.applied == Some(transform) {
            return false;
        }
        apply_transform(element, transform);
        self.applied = Some(transform);
        tracing::trace!(
            id = ?self.id,
            x = transform.x,
            y = transform.y,
            "sortable transform applied"
        );
        true
    }
}
