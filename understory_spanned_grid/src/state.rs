// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Saved scroll position and scrollbar metrics.

/// What a grid needs to come back to the same place after suspension.
///
/// Opaque to callers beyond storing and handing it back to
/// [`SpannedGrid::restore_state`](crate::SpannedGrid::restore_state).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SavedState {
    /// Position of the first item whose leading edge is inside the viewport.
    pub first_visible_position: usize,
}

/// Position-based scrollbar metrics.
///
/// Item extents vary, so these count items rather than pixels: the thumb is
/// `extent` items long and starts `offset` items into a track of `range` items.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrollMetrics {
    /// First materialized position.
    pub offset: usize,
    /// Number of materialized items.
    pub extent: usize,
    /// Total number of items.
    pub range: usize,
}
