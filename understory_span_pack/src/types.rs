// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive integer geometry shared by the packer and its hosts.

use crate::Axis;

/// Half-open, axis-aligned integer rectangle.
///
/// The same type carries cell coordinates (inside a [`SpanPacker`](crate::SpanPacker))
/// and pixel coordinates (once a host scales cells by a cell extent). A rectangle
/// covers `left..right` horizontally and `top..bottom` vertically, so a rectangle
/// with `right == left` or `bottom == top` is empty.
///
/// Constructors never produce inverted rectangles; debug builds assert it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntRect {
    /// Minimum x (inclusive).
    pub left: i32,
    /// Minimum y (inclusive).
    pub top: i32,
    /// Maximum x (exclusive).
    pub right: i32,
    /// Maximum y (exclusive).
    pub bottom: i32,
}

impl IntRect {
    /// Edge coordinate used for the far side of the lane's unbounded axis.
    pub const UNBOUNDED: i32 = i32::MAX;

    /// The empty rectangle at the origin.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Create a rectangle from its edges.
    #[inline]
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        debug_assert!(left <= right && top <= bottom, "IntRect must not be inverted");
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create a rectangle from an origin and a size, saturating at the `i32` range.
    #[inline]
    pub const fn from_origin_size(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(
            x,
            y,
            x.saturating_add(if width > 0 { width } else { 0 }),
            y.saturating_add(if height > 0 { height } else { 0 }),
        )
    }

    /// Horizontal extent.
    #[inline]
    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    /// Vertical extent.
    #[inline]
    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Returns `true` if the rectangle covers no cells.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.right <= self.left || self.bottom <= self.top
    }

    /// Near edge along `axis` (`left` for [`Axis::X`], `top` for [`Axis::Y`]).
    #[inline]
    pub const fn start(&self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.left,
            Axis::Y => self.top,
        }
    }

    /// Far edge along `axis` (`right` for [`Axis::X`], `bottom` for [`Axis::Y`]).
    #[inline]
    pub const fn end(&self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.right,
            Axis::Y => self.bottom,
        }
    }

    /// Whether the point lies inside the rectangle.
    #[inline]
    pub const fn contains_point(&self, x: i32, y: i32) -> bool {
        self.left <= x && x < self.right && self.top <= y && y < self.bottom
    }

    /// Whether `other` lies entirely inside this rectangle.
    ///
    /// An empty rectangle contains nothing, not even another empty rectangle.
    #[inline]
    pub const fn contains(&self, other: &Self) -> bool {
        !self.is_empty()
            && self.left <= other.left
            && self.top <= other.top
            && self.right >= other.right
            && self.bottom >= other.bottom
    }

    /// Whether the two rectangles share at least one cell.
    ///
    /// Rectangles that only touch along an edge do not intersect.
    ///
    /// # Examples
    ///
    /// ```
    /// use understory_span_pack::IntRect;
    ///
    /// let a = IntRect::new(0, 0, 2, 2);
    /// assert!(a.intersects(&IntRect::new(1, 1, 3, 3)));
    /// assert!(!a.intersects(&IntRect::new(2, 0, 4, 2)));
    /// ```
    #[inline]
    pub const fn intersects(&self, other: &Self) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }

    /// Whether an edge of this rectangle lies on the same line as the opposing
    /// edge of `other`.
    ///
    /// This is a line test, not a contact test: the two rectangles may be far
    /// apart along the shared line.
    #[inline]
    pub const fn is_adjacent_to(&self, other: &Self) -> bool {
        self.right == other.left
            || self.top == other.bottom
            || self.left == other.right
            || self.bottom == other.top
    }

    /// The overlapping region of two rectangles, or an empty rectangle when they
    /// do not intersect.
    #[inline]
    pub fn intersect(&self, other: &Self) -> Self {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right.min(other.right).max(left);
        let bottom = self.bottom.min(other.bottom).max(top);
        Self::new(left, top, right, bottom)
    }

    /// The smallest rectangle enclosing both.
    #[inline]
    pub fn union(&self, other: &Self) -> Self {
        Self::new(
            self.left.min(other.left),
            self.top.min(other.top),
            self.right.max(other.right),
            self.bottom.max(other.bottom),
        )
    }

    /// Move the rectangle by `(dx, dy)`.
    #[inline]
    pub const fn translate(&self, dx: i32, dy: i32) -> Self {
        Self::new(
            self.left + dx,
            self.top + dy,
            self.right + dx,
            self.bottom + dy,
        )
    }

    /// Multiply every edge by `factor`, or `None` if an edge leaves the `i32`
    /// range.
    ///
    /// Used to turn a cell rectangle into pixels; `factor` must be non-negative.
    #[inline]
    pub const fn checked_scale(&self, factor: i32) -> Option<Self> {
        debug_assert!(factor >= 0, "IntRect::checked_scale needs a non-negative factor");
        let (Some(left), Some(top), Some(right), Some(bottom)) = (
            self.left.checked_mul(factor),
            self.top.checked_mul(factor),
            self.right.checked_mul(factor),
            self.bottom.checked_mul(factor),
        ) else {
            return None;
        };
        Some(Self::new(left, top, right, bottom))
    }

    /// Multiply every edge by `factor`, saturating at the `i32` range.
    ///
    /// Saturated rectangles lose their size; use
    /// [`checked_scale`](Self::checked_scale) where that matters.
    #[inline]
    pub const fn scale(&self, factor: i32) -> Self {
        debug_assert!(factor >= 0, "IntRect::scale needs a non-negative factor");
        Self::new(
            self.left.saturating_mul(factor),
            self.top.saturating_mul(factor),
            self.right.saturating_mul(factor),
            self.bottom.saturating_mul(factor),
        )
    }

    /// Shrink the rectangle by `insets`, collapsing to an empty rectangle rather
    /// than inverting when the insets are larger than the rectangle.
    #[inline]
    pub fn inset(&self, insets: Insets) -> Self {
        let left = self.left + insets.left;
        let top = self.top + insets.top;
        let right = (self.right - insets.right).max(left);
        let bottom = (self.bottom - insets.bottom).max(top);
        Self::new(left, top, right, bottom)
    }
}

#[cfg(feature = "kurbo")]
impl From<IntRect> for kurbo::Rect {
    fn from(rect: IntRect) -> Self {
        Self::new(
            f64::from(rect.left),
            f64::from(rect.top),
            f64::from(rect.right),
            f64::from(rect.bottom),
        )
    }
}

/// Integer insets, used for viewport padding and per-item decorations.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Insets {
    /// Inset from the left edge.
    pub left: i32,
    /// Inset from the top edge.
    pub top: i32,
    /// Inset from the right edge.
    pub right: i32,
    /// Inset from the bottom edge.
    pub bottom: i32,
}

impl Insets {
    /// No insets.
    pub const ZERO: Self = Self::uniform(0);

    /// Create insets from each side.
    #[inline]
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The same inset on all four sides.
    #[inline]
    pub const fn uniform(value: i32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Inset at the near side of `axis`.
    #[inline]
    pub const fn start(&self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.left,
            Axis::Y => self.top,
        }
    }

    /// Inset at the far side of `axis`.
    #[inline]
    pub const fn end(&self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.right,
            Axis::Y => self.bottom,
        }
    }

    /// Sum of both insets along `axis`.
    #[inline]
    pub const fn total(&self, axis: Axis) -> i32 {
        self.start(axis) + self.end(axis)
    }
}
