// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lane orientation and axes.

use crate::IntRect;

/// A 2D axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// Horizontal axis (columns, `left`/`right`).
    X,
    /// Vertical axis (rows, `top`/`bottom`).
    Y,
}

impl Axis {
    /// The other axis.
    #[inline]
    pub const fn cross(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::X,
        }
    }
}

/// Which way a lane grows and scrolls.
///
/// The orientation is fixed for the lifetime of a packer: it decides which axis
/// is bounded by the span count and which one is unbounded.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// `spans` columns; rows grow downwards without bound.
    #[default]
    Vertical,
    /// `spans` rows; columns grow rightwards without bound.
    Horizontal,
}

impl Orientation {
    /// The unbounded axis, along which content scrolls.
    #[inline]
    pub const fn scroll_axis(self) -> Axis {
        match self {
            Self::Vertical => Axis::Y,
            Self::Horizontal => Axis::X,
        }
    }

    /// The axis bounded by the span count.
    #[inline]
    pub const fn cross_axis(self) -> Axis {
        self.scroll_axis().cross()
    }

    /// The whole lane as a single rectangle, `spans` cells across and unbounded
    /// along the scroll axis.
    #[inline]
    pub const fn lane(self, spans: i32) -> IntRect {
        match self {
            Self::Vertical => IntRect::new(0, 0, spans, IntRect::UNBOUNDED),
            Self::Horizontal => IntRect::new(0, 0, IntRect::UNBOUNDED, spans),
        }
    }

    /// Sort key for free-space scanning: scroll-axis start first, then
    /// cross-axis start.
    #[inline]
    pub const fn scan_key(self, rect: &IntRect) -> (i32, i32) {
        match self {
            Self::Vertical => (rect.top, rect.left),
            Self::Horizontal => (rect.left, rect.top),
        }
    }
}
