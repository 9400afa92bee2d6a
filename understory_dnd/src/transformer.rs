// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Priority-ordered transform contributors.
//!
//! A [`Transformer`] is a named, pure function that adjusts a running
//! [`Transform`]. The [`TransformerRegistry`] keeps, per [`TargetKind`] and id,
//! an ordered list of transformers and folds a base transform through them.
//!
//! ## Ordering
//!
//! Transformers run in ascending [`Transformer::order`]. Transformers with the
//! same order run in registration order. The fold is pure: calling
//! [`TransformerRegistry::apply`] repeatedly without changing the registry
//! yields the same result.
//!
//! ```
//! use understory_dnd::{TargetKind, Transform, Transformer, TransformerRegistry};
//!
//! let mut registry = TransformerRegistry::<u32, ()>::new();
//! registry.add(
//!     TargetKind::Droppables,
//!     7,
//!     Transformer::new("double", 20, |t: Transform, _: &()| Transform::new(t.x * 2.0, t.y * 2.0)),
//! );
//! registry.add(
//!     TargetKind::Droppables,
//!     7,
//!     Transformer::new("nudge", 10, |t: Transform, _: &()| t + Transform::new(1.0, 0.0)),
//! );
//!
//! // `nudge` (order 10) runs before `double` (order 20).
//! let out = registry.apply(TargetKind::Droppables, &7, Transform::new(1.0, 1.0), &());
//! assert_eq!(out, Transform::new(4.0, 2.0));
//! ```

use alloc::borrow::Cow;
use alloc::rc::Rc;
use core::fmt;
use core::hash::Hash;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::geometry::Transform;

/// Which side of the registry a transformer targets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TargetKind {
    /// Transforms applied to a participant while it is being dragged.
    Draggables,
    /// Transforms applied to a participant's placement slot.
    Droppables,
}

/// A named, priority-ordered transform contributor.
///
/// The callback receives the accumulated transform and a read-only environment
/// `E` (for the drag-drop context this is the context itself) and returns the
/// next accumulated transform.
pub struct Transformer<E> {
    id: Cow<'static, str>,
    order: i32,
    callback: Rc<dyn Fn(Transform, &E) -> Transform>,
}

impl<E> Transformer<E> {
    /// Creates a transformer.
    ///
    /// `id` is either a literal or a name built at runtime, such as one per
    /// plugin instance.
    pub fn new<F>(id: impl Into<Cow<'static, str>>, order: i32, callback: F) -> Self
    where
        F: Fn(Transform, &E) -> Transform + 'static,
    {
        Self {
            id: id.into(),
            order,
            callback: Rc::new(callback),
        }
    }

    /// Name used to remove the transformer again.
    #[must_use]
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Fold priority; lower runs first.
    #[must_use]
    #[inline]
    pub fn order(&self) -> i32 {
        self.order
    }

    /// Runs the callback on `transform`.
    #[must_use]
    pub fn apply(&self, transform: Transform, env: &E) -> Transform {
        (self.callback)(transform, env)
    }

    /// Returns `true` if both transformers share the same callback.
    #[must_use]
    pub fn same_callback(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.callback, &other.callback)
    }
}

impl<E> Clone for Transformer<E> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            order: self.order,
            callback: Rc::clone(&self.callback),
        }
    }
}

impl<E> fmt::Debug for Transformer<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transformer")
            .field("id", &self.id)
            .field("order", &self.order)
            .finish_non_exhaustive()
    }
}

type TransformerList<E> = SmallVec<[Transformer<E>; 2]>;

/// Ordered transformer lists keyed by target kind and id.
pub struct TransformerRegistry<K, E> {
    draggables: HashMap<K, TransformerList<E>>,
    droppables: HashMap<K, TransformerList<E>>,
}

impl<K, E> Default for TransformerRegistry<K, E> {
    fn default() -> Self {
        Self {
            draggables: HashMap::new(),
            droppables: HashMap::new(),
        }
    }
}

impl<K: fmt::Debug, E> fmt::Debug for TransformerRegistry<K, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformerRegistry")
            .field("draggables", &self.draggables)
            .field("droppables", &self.droppables)
            .finish()
    }
}

impl<K, E> TransformerRegistry<K, E> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of registered transformers across all targets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.draggables
            .values()
            .chain(self.droppables.values())
            .map(SmallVec::len)
            .sum()
    }

    /// Returns `true` if no transformers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.draggables.is_empty() && self.droppables.is_empty()
    }

    fn table(&self, kind: TargetKind) -> &HashMap<K, TransformerList<E>> {
        match kind {
            TargetKind::Draggables => &self.draggables,
            TargetKind::Droppables => &self.droppables,
        }
    }

    fn table_mut(&mut self, kind: TargetKind) -> &mut HashMap<K, TransformerList<E>> {
        match kind {
            TargetKind::Draggables => &mut self.draggables,
            TargetKind::Droppables => &mut self.droppables,
        }
    }
}

impl<K, E> TransformerRegistry<K, E>
where
    K: Eq + Hash,
{
    /// Inserts `transformer` for `(kind, id)`.
    ///
    /// The list stays sorted by ascending order; the new entry lands after every
    /// entry whose order is less than or equal to its own. Registering the same
    /// transformer id twice keeps both entries.
    pub fn add(&mut self, kind: TargetKind, id: K, transformer: Transformer<E>) {
        let list = self.table_mut(kind).entry(id).or_default();
        let at = list.partition_point(|t| t.order <= transformer.order);
        list.insert(at, transformer);
    }

    /// Removes the first transformer named `transformer_id` for `(kind, id)`.
    ///
    /// Returns `None` if nothing matched.
    pub fn remove(
        &mut self,
        kind: TargetKind,
        id: &K,
        transformer_id: &str,
    ) -> Option<Transformer<E>> {
        let table = self.table_mut(kind);
        let list = table.get_mut(id)?;
        let at = list.iter().position(|t| t.id == transformer_id)?;
        let removed = list.remove(at);
        if list.is_empty() {
            table.remove(id);
        }
        Some(removed)
    }

    /// Folds `base` through every transformer registered for `(kind, id)`.
    #[must_use]
    pub fn apply(&self, kind: TargetKind, id: &K, base: Transform, env: &E) -> Transform {
        self.iter_for(kind, id)
            .fold(base, |acc, transformer| transformer.apply(acc, env))
    }

    /// Transformers registered for `(kind, id)`, in fold order.
    pub fn iter_for(&self, kind: TargetKind, id: &K) -> impl Iterator<Item = &Transformer<E>> {
        self.table(kind).get(id).into_iter().flatten()
    }

    /// Number of transformers registered for `(kind, id)`.
    #[must_use]
    pub fn len_for(&self, kind: TargetKind, id: &K) -> usize {
        self.table(kind).get(id).map_or(0, SmallVec::len)
    }

    /// Returns `true` if a transformer named `transformer_id` is registered for `(kind, id)`.
    #[must_use]
    pub fn contains(&self, kind: TargetKind, id: &K, transformer_id: &str) -> bool {
        self.iter_for(kind, id).any(|t| t.id == transformer_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::vec::Vec;
    use core::cell::Cell;

    fn shift(id: &'static str, order: i32, dx: f64) -> Transformer<()> {
        Transformer::new(id, order, move |t, _| t + Transform::new(dx, 0.0))
    }

    #[test]
    fn empty_registry_returns_base() {
        let registry = TransformerRegistry::<u32, ()>::new();
        let base = Transform::new(3.0, 4.0);
        assert_eq!(registry.apply(TargetKind::Draggables, &1, base, &()), base);
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn fold_runs_in_ascending_order() {
        let mut registry = TransformerRegistry::<u32, ()>::new();
        registry.add(
            TargetKind::Droppables,
            1,
            Transformer::new("scale", 50, |t, _| Transform::new(t.x * 10.0, t.y)),
        );
        registry.add(TargetKind::Droppables, 1, shift("shift", -5, 1.0));

        let out = registry.apply(TargetKind::Droppables, &1, Transform::ZERO, &());
        assert_eq!(out, Transform::new(10.0, 0.0));

        let ids: Vec<_> = registry
            .iter_for(TargetKind::Droppables, &1)
            .map(Transformer::id)
            .collect();
        assert_eq!(ids, ["shift", "scale"]);
    }

    #[test]
    fn ties_keep_registration_order() {
        let mut registry = TransformerRegistry::<u32, ()>::new();
        registry.add(TargetKind::Droppables, 1, shift("a", 100, 1.0));
        registry.add(TargetKind::Droppables, 1, shift("b", 100, 1.0));
        registry.add(TargetKind::Droppables, 1, shift("c", 0, 1.0));
        registry.add(TargetKind::Droppables, 1, shift("d", 100, 1.0));

        let ids: Vec<_> = registry
            .iter_for(TargetKind::Droppables, &1)
            .map(Transformer::id)
            .collect();
        assert_eq!(ids, ["c", "a", "b", "d"]);
    }

    #[test]
    fn kinds_and_ids_are_partitioned() {
        let mut registry = TransformerRegistry::<u32, ()>::new();
        registry.add(TargetKind::Draggables, 1, shift("x", 0, 5.0));

        assert_eq!(registry.len_for(TargetKind::Draggables, &1), 1);
        assert_eq!(registry.len_for(TargetKind::Droppables, &1), 0);
        assert_eq!(registry.len_for(TargetKind::Draggables, &2), 0);
        assert_eq!(
            registry.apply(TargetKind::Droppables, &1, Transform::ZERO, &()),
            Transform::ZERO
        );
    }

    #[test]
    fn duplicates_are_kept_and_removed_one_at_a_time() {
        let mut registry = TransformerRegistry::<u32, ()>::new();
        registry.add(TargetKind::Droppables, 1, shift("dup", 0, 1.0));
        registry.add(TargetKind::Droppables, 1, shift("dup", 0, 1.0));
        assert_eq!(
            registry.apply(TargetKind::Droppables, &1, Transform::ZERO, &()),
            Transform::new(2.0, 0.0)
        );

        assert!(registry.remove(TargetKind::Droppables, &1, "dup").is_some());
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(TargetKind::Droppables, &1, "dup"));
    }

    #[test]
    fn remove_is_idempotent() {
        let mut registry = TransformerRegistry::<u32, ()>::new();
        registry.add(TargetKind::Droppables, 9, shift("other", 0, 1.0));
        let before = registry.len();

        registry.add(TargetKind::Droppables, 1, shift("offset", 100, 1.0));
        assert!(registry.remove(TargetKind::Droppables, &1, "offset").is_some());
        assert!(registry.remove(TargetKind::Droppables, &1, "offset").is_none());
        assert!(registry.remove(TargetKind::Droppables, &2, "missing").is_none());

        assert_eq!(registry.len(), before);
        assert!(!registry.contains(TargetKind::Droppables, &1, "offset"));
    }

    #[test]
    fn runtime_ids_are_removable_by_name() {
        let mut registry = TransformerRegistry::<u32, ()>::new();
        for plugin in 0..3 {
            let id = format!("plugin-{plugin}");
            registry.add(
                TargetKind::Draggables,
                1,
                Transformer::new(id, plugin, |t, _| t + Transform::new(1.0, 0.0)),
            );
        }
        assert!(registry.contains(TargetKind::Draggables, &1, "plugin-1"));

        let removed = registry.remove(TargetKind::Draggables, &1, "plugin-1");
        assert_eq!(removed.as_ref().map(Transformer::id), Some("plugin-1"));
        let ids: Vec<_> = registry
            .iter_for(TargetKind::Draggables, &1)
            .map(Transformer::id)
            .collect();
        assert_eq!(ids, ["plugin-0", "plugin-2"]);
    }

    #[test]
    fn fold_is_deterministic() {
        let mut registry = TransformerRegistry::<u32, Cell<f64>>::new();
        registry.add(
            TargetKind::Droppables,
            1,
            Transformer::new("env", 0, |t, env: &Cell<f64>| t + Transform::new(env.get(), 1.0)),
        );

        let env = Cell::new(2.5);
        let first = registry.apply(TargetKind::Droppables, &1, Transform::ZERO, &env);
        let second = registry.apply(TargetKind::Droppables, &1, Transform::ZERO, &env);
        assert_eq!(first, second);
        assert_eq!(first, Transform::new(2.5, 1.0));
    }

    #[test]
    fn clones_share_a_callback() {
        let a = shift("a", 0, 1.0);
        let b = a.clone();
        let c = shift("a", 0, 1.0);
        assert!(a.same_callback(&b));
        assert!(!a.same_callback(&c));
    }
}
