// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer tracking for an active drag.
//!
//! [`PointerTrack`] remembers where a drag started and where the pointer was
//! last seen. The drag-drop context derives the raw draggable offset from
//! [`PointerTrack::offset`].

use kurbo::{Point, Vec2};

/// Start and last pointer positions of the current drag.
#[derive(Debug, Clone, Default, Copy, PartialEq)]
pub struct PointerTrack {
    start: Option<Point>,
    last: Option<Point>,
}

impl PointerTrack {
    /// Begins tracking at `pos`, discarding any previous drag.
    pub fn start(&mut self, pos: Point) {
        self.start = Some(pos);
        self.last = Some(pos);
    }

    /// Records a move to `pos` and returns the delta since the previous position.
    ///
    /// Returns `None` if no drag is being tracked.
    pub fn update(&mut self, pos: Point) -> Option<Vec2> {
        if self.start.is_none() {
            return None;
        }
        let delta = self.last.map(|last| pos - last);
        self.last = Some(pos);
        delta
    }

    /// Total offset from the start position to the last seen position.
    #[must_use]
    pub fn offset(&self) -> Option<Vec2> {
        Some(self.last? - self.start?)
    }

    /// Position the drag started at.
    #[must_use]
    pub fn start_pos(&self) -> Option<Point> {
        self.start
    }

    /// Stops tracking.
    pub fn end(&mut self) {
        *self = Self::default();
    }

    /// Returns `true` while a drag is being tracked.
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.start.is_some()
    }
}
