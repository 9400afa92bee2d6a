// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Baseline and live orderings of a sortable list.

use alloc::rc::Rc;
use alloc::vec;
use alloc::vec::Vec;
use core::cell::{Ref, RefCell};
use core::fmt;
use core::hash::Hash;

use understory_dnd::{DragDropContext, DragEnd};

/// A reordering request was rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OrderError<K> {
    /// The proposed live order is not a permutation of the baseline order.
    NotAPermutation,
    /// The id is not part of the list.
    UnknownId(K),
    /// The target index is past the end of the list.
    OutOfBounds {
        /// The requested index.
        index: usize,
        /// The list length.
        len: usize,
    },
}

impl<K: fmt::Debug> fmt::Display for OrderError<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAPermutation => {
                f.write_str("sorted ids must be a permutation of the initial ids")
            }
            Self::UnknownId(id) => write!(f, "{id:?} is not part of the sortable list"),
            Self::OutOfBounds { index, len } => {
                write!(f, "index {index} is out of bounds for a list of {len} ids")
            }
        }
    }
}

impl<K: fmt::Debug> core::error::Error for OrderError<K> {}

/// The two orderings a sortable list is tracked with.
///
/// `initial_ids` is the baseline captured when the list was last set or
/// committed; `sorted_ids` is the live order, reflecting where every id would
/// land if the current drag were dropped now. `sorted_ids` is always a
/// permutation of `initial_ids`.
///
/// A live order produced by [`on_drag_over`](Self::on_drag_over) belongs to the
/// draggable that moved. Once a different draggable drags over the list, the
/// stale preview is dropped and the baseline restored first, so a cancelled
/// drag cannot leak its offsets into the next one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortOrder<K> {
    initial_ids: Vec<K>,
    sorted_ids: Vec<K>,
    previewed_by: Option<K>,
    revision: u64,
}

impl<K: Clone + PartialEq> SortOrder<K> {
    /// Creates an order whose baseline and live orders are both `ids`.
    pub fn new<I: IntoIterator<Item = K>>(ids: I) -> Self {
        let initial_ids: Vec<K> = ids.into_iter().collect();
        Self {
            sorted_ids: initial_ids.clone(),
            initial_ids,
            previewed_by: None,
            revision: 0,
        }
    }

    /// Baseline order.
    #[must_use]
    pub fn initial_ids(&self) -> &[K] {
        &self.initial_ids
    }

    /// Live order.
    #[must_use]
    pub fn sorted_ids(&self) -> &[K] {
        &self.sorted_ids
    }

    /// Change counter; bumps whenever either order changes.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The draggable whose drag produced the live order, if any.
    #[must_use]
    pub fn previewed_by(&self) -> Option<&K> {
        self.previewed_by.as_ref()
    }

    /// Position of `id` in the baseline order.
    #[must_use]
    pub fn initial_index(&self, id: &K) -> Option<usize> {
        self.initial_ids.iter().position(|k| k == id)
    }

    /// Position of `id` in the live order.
    #[must_use]
    pub fn current_index(&self, id: &K) -> Option<usize> {
        self.sorted_ids.iter().position(|k| k == id)
    }

    /// Returns `true` if the live order differs from the baseline.
    #[must_use]
    pub fn is_reordered(&self) -> bool {
        self.sorted_ids != self.initial_ids
    }

    /// Replaces both orders with `ids`.
    pub fn set_ids<I: IntoIterator<Item = K>>(&mut self, ids: I) {
        self.initial_ids = ids.into_iter().collect();
        self.sorted_ids.clone_from(&self.initial_ids);
        self.previewed_by = None;
        self.bump();
    }

    /// Replaces the live order.
    ///
    /// Rejects `ids` unless it is a permutation of the baseline order.
    pub fn set_sorted_ids<I: IntoIterator<Item = K>>(
        &mut self,
        ids: I,
    ) -> Result<(), OrderError<K>> {
        let ids: Vec<K> = ids.into_iter().collect();
        if !is_permutation(&self.initial_ids, &ids) {
            return Err(OrderError::NotAPermutation);
        }
        self.previewed_by = None;
        if ids != self.sorted_ids {
            self.sorted_ids = ids;
            self.bump();
        }
        Ok(())
    }

    /// Moves `id` to index `to` of the live order.
    ///
    /// Returns whether the order changed.
    pub fn move_item(&mut self, id: &K, to: usize) -> Result<bool, OrderError<K>> {
        let len = self.sorted_ids.len();
        let Some(from) = self.current_index(id) else {
            return Err(OrderError::UnknownId(id.clone()));
        };
        if to >= len {
            return Err(OrderError::OutOfBounds { index: to, len });
        }
        self.previewed_by = None;
        if from == to {
            return Ok(false);
        }
        let item = self.sorted_ids.remove(from);
        self.sorted_ids.insert(to, item);
        self.bump();
        Ok(true)
    }

    /// Moves `active` to the slot `over` occupies in the baseline order.
    ///
    /// Droppable layouts reflect the baseline order until it is committed, so
    /// the target slot is looked up in `initial_ids`. A preview left by another
    /// draggable is discarded first (see [`release_preview`](Self::release_preview)).
    /// Returns whether the live order changed; unknown ids change nothing.
    pub fn on_drag_over(&mut self, active: &K, over: &K) -> bool {
        let released = self.release_preview(active);
        let (Some(from), Some(to)) = (self.current_index(active), self.initial_index(over)) else {
            return released;
        };
        if from == to {
            return released;
        }
        let item = self.sorted_ids.remove(from);
        self.sorted_ids.insert(to, item);
        self.previewed_by = Some(active.clone());
        self.bump();
        true
    }

    /// Restores the baseline if the live order was previewed by a draggable
    /// other than `active`. Returns whether the live order changed.
    pub fn release_preview(&mut self, active: &K) -> bool {
        match &self.previewed_by {
            Some(owner) if owner != active => self.reset(),
            _ => false,
        }
    }

    /// Restores the live order to the baseline. Returns whether anything changed.
    pub fn reset(&mut self) -> bool {
        self.previewed_by = None;
        if !self.is_reordered() {
            return false;
        }
        self.sorted_ids.clone_from(&self.initial_ids);
        self.bump();
        true
    }

    /// Makes the live order the new baseline. Returns whether anything changed.
    pub fn commit(&mut self) -> bool {
        self.previewed_by = None;
        if !self.is_reordered() {
            return false;
        }
        self.initial_ids.clone_from(&self.sorted_ids);
        self.bump();
        true
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

fn is_permutation<K: PartialEq>(a: &[K], b: &[K]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut used = vec![false; a.len()];
    b.iter().all(|item| {
        let slot = a
            .iter()
            .zip(used.iter())
            .position(|(candidate, taken)| !*taken && candidate == item);
        match slot {
            Some(i) => {
                used[i] = true;
                true
            }
            None => false,
        }
    })
}

/// Shared handle to a [`SortOrder`].
///
/// The list owner and every sortable binding hold clones of the same handle;
/// sortable-offset transformers read it whenever a transform is folded. All
/// access is single-threaded and borrows are released before each method
/// returns.
///
/// ```
/// use understory_sortable::SortableContext;
///
/// let list = SortableContext::new(["a", "b", "c"]);
/// let handle = list.clone();
///
/// assert!(list.on_drag_over(&"c", &"a"));
/// assert_eq!(handle.sorted_ids(), ["c", "a", "b"]);
/// assert_eq!(handle.initial_ids(), ["a", "b", "c"]);
/// ```
pub struct SortableContext<K> {
    inner: Rc<RefCell<SortOrder<K>>>,
}

impl<K> Clone for SortableContext<K> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<K: fmt::Debug> fmt::Debug for SortableContext<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SortableContext").field(&self.inner).finish()
    }
}

impl<K> From<SortOrder<K>> for SortableContext<K> {
    fn from(order: SortOrder<K>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(order)),
        }
    }
}

impl<K> SortableContext<K> {
    /// Read access to the underlying orders.
    ///
    /// # Panics
    ///
    /// Panics if called from inside a mutation of this context.
    #[must_use]
    pub fn order(&self) -> Ref<'_, SortOrder<K>> {
        self.inner.borrow()
    }

    /// Returns `true` if both handles refer to the same list.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<K> SortableContext<K>
where
    K: Clone + Eq + Hash + fmt::Debug,
{
    /// Creates a list whose baseline and live orders are both `ids`.
    pub fn new<I: IntoIterator<Item = K>>(ids: I) -> Self {
        SortOrder::new(ids).into()
    }

    /// Copy of the baseline order.
    #[must_use]
    pub fn initial_ids(&self) -> Vec<K> {
        self.order().initial_ids.clone()
    }

    /// Copy of the live order.
    #[must_use]
    pub fn sorted_ids(&self) -> Vec<K> {
        self.order().sorted_ids.clone()
    }

    /// See [`SortOrder::revision`].
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.order().revision
    }

    /// See [`SortOrder::initial_index`].
    #[must_use]
    pub fn initial_index(&self, id: &K) -> Option<usize> {
        self.order().initial_index(id)
    }

    /// See [`SortOrder::current_index`].
    #[must_use]
    pub fn current_index(&self, id: &K) -> Option<usize> {
        self.order().current_index(id)
    }

    /// See [`SortOrder::set_ids`].
    pub fn set_ids<I: IntoIterator<Item = K>>(&self, ids: I) {
        self.inner.borrow_mut().set_ids(ids);
    }

    /// See [`SortOrder::set_sorted_ids`].
    pub fn set_sorted_ids<I: IntoIterator<Item = K>>(
        &self,
        ids: I,
    ) -> Result<(), OrderError<K>> {
        self.inner.borrow_mut().set_sorted_ids(ids)
    }

    /// See [`SortOrder::move_item`].
    pub fn move_item(&self, id: &K, to: usize) -> Result<bool, OrderError<K>> {
        self.inner.borrow_mut().move_item(id, to)
    }

    /// See [`SortOrder::on_drag_over`].
    pub fn on_drag_over(&self, active: &K, over: &K) -> bool {
        let moved = self.inner.borrow_mut().on_drag_over(active, over);
        if moved {
            tracing::trace!(?active, ?over, "live order changed");
        }
        moved
    }

    /// Applies [`on_drag_over`](Self::on_drag_over) for the active drag of `dnd`.
    ///
    /// With no droppable under the drag, only a preview left by another
    /// draggable is released. Returns whether the live order changed.
    pub fn track(&self, dnd: &DragDropContext<K>) -> bool {
        let active = dnd.active();
        match (&active.draggable, &active.droppable) {
            (Some(draggable), Some(droppable)) => self.on_drag_over(draggable, droppable),
            (Some(draggable), None) => {
                let released = self.inner.borrow_mut().release_preview(draggable);
                if released {
                    tracing::debug!(?draggable, "stale preview released");
                }
                released
            }
            _ => false,
        }
    }

    /// Settles the live order once a drag has ended.
    ///
    /// A drop over a droppable commits the live order and returns it if it
    /// differs from the previous baseline. A drop over nothing restores the
    /// baseline and returns `None`.
    pub fn on_drag_end(&self, end: &DragEnd<K>) -> Option<Vec<K>> {
        let mut order = self.inner.borrow_mut();
        if end.droppable.is_none() {
            if order.reset() {
                tracing::debug!(draggable = ?end.draggable, "drop outside the list; order reset");
            }
            return None;
        }
        if !order.commit() {
            return None;
        }
        tracing::debug!(draggable = ?end.draggable, "order committed");
        Some(order.sorted_ids.clone())
    }

    /// See [`SortOrder::reset`].
    pub fn reset(&self) -> bool {
        self.inner.borrow_mut().reset()
    }

    /// See [`SortOrder::commit`].
    pub fn commit(&self) -> bool {
        self.inner.borrow_mut().commit()
    }
}
