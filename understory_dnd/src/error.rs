// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by the drag-drop context.

use core::fmt;

/// An operation on the drag-drop context was rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DndError<K> {
    /// A drag was started for an id that is not a registered draggable.
    UnknownDraggable(K),
}

impl<K: fmt::Debug> fmt::Display for DndError<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownDraggable(id) => {
                write!(f, "cannot start a drag: {id:?} is not a registered draggable")
            }
        }
    }
}

impl<K: fmt::Debug> core::error::Error for DndError<K> {}
