// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Writing computed transforms to elements.

use crate::geometry::Transform;

/// An element (or element proxy) that can carry a visual transform.
///
/// Hosts implement this for their native node type, for example by setting or
/// removing a CSS `transform` property, or by updating a scene node's local
/// translation.
pub trait TransformTarget {
    /// Sets the element's transform to `transform`.
    fn set_transform(&mut self, transform: Transform);

    /// Removes the element's transform property entirely.
    fn clear_transform(&mut self);
}

impl<T: TransformTarget + ?Sized> TransformTarget for &mut T {
    fn set_transform(&mut self, transform: Transform) {
        (**self).set_transform(transform);
    }

    fn clear_transform(&mut self) {
        (**self).clear_transform();
    }
}

/// Headless target: `Some` while a transform is set, `None` once cleared.
impl TransformTarget for Option<Transform> {
    fn set_transform(&mut self, transform: Transform) {
        *self = Some(transform);
    }

    fn clear_transform(&mut self) {
        *self = None;
    }
}

/// Writes `transform` to `target`, clearing the property for the identity transform.
pub fn apply_transform<T: TransformTarget + ?Sized>(target: &mut T, transform: Transform) {
    if transform.is_identity() {
        target.clear_transform();
    } else {
        target.set_transform(transform);
    }
}
