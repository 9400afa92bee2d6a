// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout snapshots and additive transforms.
//!
//! Both types are plain `Copy` values. A [`Layout`] is replaced wholesale when a
//! participant's geometry changes; a [`Transform`] is the offset a participant
//! is visually moved by.

use alloc::format;
use alloc::string::String;
use core::ops::{Add, AddAssign, Neg};

use kurbo::{Affine, Point, Rect, Vec2};

/// Axis-aligned bounding box of a participant, measured in a shared coordinate space.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Layout {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Extent along the x axis.
    pub width: f64,
    /// Extent along the y axis.
    pub height: f64,
}

impl Layout {
    /// Creates a layout from its origin and size.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Center point of the box.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Returns this layout moved by `transform`.
    #[must_use]
    pub fn translated(&self, transform: Transform) -> Self {
        Self {
            x: self.x + transform.x,
            y: self.y + transform.y,
            ..*self
        }
    }

    /// Returns the layout as a Kurbo rectangle.
    #[must_use]
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

impl From<Rect> for Layout {
    fn from(rect: Rect) -> Self {
        let rect = rect.abs();
        Self::new(rect.x0, rect.y0, rect.width(), rect.height())
    }
}

impl From<Layout> for Rect {
    fn from(layout: Layout) -> Self {
        layout.to_rect()
    }
}

/// Additive 2D offset.
///
/// Equality is structural: two transforms are equal iff both axis deltas are
/// numerically equal, so `-0.0` and `0.0` compare equal.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Transform {
    /// Offset along the x axis.
    pub x: f64,
    /// Offset along the y axis.
    pub y: f64,
}

impl Transform {
    /// The identity offset.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Creates a transform from its axis deltas.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the identity offset.
    #[must_use]
    pub const fn zero() -> Self {
        Self::ZERO
    }

    /// Returns `true` if this transform does not move anything.
    #[must_use]
    pub fn is_identity(self) -> bool {
        self == Self::ZERO
    }

    /// Returns the offset as a Kurbo vector.
    #[must_use]
    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Returns the offset as a translation.
    #[must_use]
    pub fn to_affine(self) -> Affine {
        Affine::translate(self.to_vec2())
    }

    /// Formats the offset as a CSS `transform` value.
    ///
    /// ```
    /// use understory_dnd::Transform;
    ///
    /// assert_eq!(Transform::new(12.0, -4.5).css_value(), "translate3d(12px, -4.5px, 0)");
    /// ```
    #[must_use]
    pub fn css_value(self) -> String {
        format!("translate3d({}px, {}px, 0)", self.x, self.y)
    }
}

impl From<Vec2> for Transform {
    fn from(v: Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Transform> for Vec2 {
    fn from(t: Transform) -> Self {
        t.to_vec2()
    }
}

impl Add for Transform {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Transform {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Neg for Transform {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}
