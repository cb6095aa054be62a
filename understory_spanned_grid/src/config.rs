// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid configuration and viewport description.

use core::num::NonZeroU32;

use understory_span_pack::{Axis, Insets, Orientation};

/// Options fixed for a [`SpannedGrid`](crate::SpannedGrid) between structural changes.
///
/// ```rust
/// use core::num::NonZeroU32;
/// use understory_spanned_grid::{GridConfig, Orientation};
///
/// let config = GridConfig::new(Orientation::Horizontal, 3)
///     .with_item_order_is_stable(true)
///     .with_cell_extent(NonZeroU32::new(64))
///     .with_slack_screens(2);
/// assert_eq!(config.spans, 3);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridConfig {
    /// Which axis scrolls. The other one is `spans` cells across.
    pub orientation: Orientation,
    /// Number of cells across the bounded axis. Must be at least 1.
    pub spans: u32,
    /// Hint that positions keep their identity between passes.
    ///
    /// When set, a [`scroll_to_position`](crate::SpannedGrid::scroll_to_position)
    /// that is not accompanied by a structural change reuses the placements of
    /// the current pass instead of re-packing the lane from position 0.
    pub item_order_is_stable: bool,
    /// Pixel size of one cell. Derived from the viewport's cross extent when
    /// `None`.
    pub cell_extent: Option<NonZeroU32>,
    /// How many extra viewport extents to keep materialized on each side of
    /// the viewport while filling.
    pub slack_screens: u32,
}

impl GridConfig {
    /// A configuration with the given orientation and span count, and defaults
    /// for everything else.
    #[must_use]
    pub const fn new(orientation: Orientation, spans: u32) -> Self {
        Self {
            orientation,
            spans,
            item_order_is_stable: false,
            cell_extent: None,
            slack_screens: 1,
        }
    }

    /// Sets [`item_order_is_stable`](Self::item_order_is_stable).
    #[must_use]
    pub const fn with_item_order_is_stable(mut self, stable: bool) -> Self {
        self.item_order_is_stable = stable;
        self
    }

    /// Sets [`cell_extent`](Self::cell_extent).
    #[must_use]
    pub const fn with_cell_extent(mut self, cell_extent: Option<NonZeroU32>) -> Self {
        self.cell_extent = cell_extent;
        self
    }

    /// Sets [`slack_screens`](Self::slack_screens).
    #[must_use]
    pub const fn with_slack_screens(mut self, slack_screens: u32) -> Self {
        self.slack_screens = slack_screens;
        self
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::new(Orientation::Vertical, 1)
    }
}

/// The pixel box the grid is laid out into.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
    /// Padding inside the viewport. Padding along the scroll axis scrolls with
    /// the content.
    pub padding: Insets,
}

impl Viewport {
    /// A viewport of `width × height` pixels without padding.
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            padding: Insets::ZERO,
        }
    }

    /// Sets the padding.
    #[must_use]
    pub const fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    /// Extent along `axis`, padding included.
    #[must_use]
    pub const fn extent(&self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
        }
    }
}
