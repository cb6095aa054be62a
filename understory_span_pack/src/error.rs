// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Packing errors.

use thiserror::Error;

use crate::IntRect;

/// Errors raised while configuring a lane or placing spans in it.
///
/// None of these are transient: each one means the lane configuration or the
/// span data is wrong, and continuing would break the free-space bookkeeping.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum PackError {
    /// The lane was configured with fewer than one span.
    #[error("invalid layout spans: {spans}; the span count must be at least 1")]
    InvalidSpans {
        /// The rejected span count.
        spans: u32,
    },
    /// An item asked for a span with a side outside `1..=spans`.
    #[error("invalid item span size {width}x{height}; each side must be in 1..={spans}")]
    InvalidSpanSize {
        /// Requested width in cells.
        width: u32,
        /// Requested height in cells.
        height: u32,
        /// The lane's span count.
        spans: u32,
    },
    /// The unbounded axis ran past the `i32` coordinate range.
    #[error("no free space left in the lane for a {width}x{height} span")]
    LaneExhausted {
        /// Requested width in cells.
        width: u32,
        /// Requested height in cells.
        height: u32,
    },
    /// A position was committed again at a different rectangle.
    #[error("position {position} is already committed at {existing:?}, not {requested:?}")]
    PositionConflict {
        /// The position being committed.
        position: usize,
        /// Where it was committed first.
        existing: IntRect,
        /// The rejected rectangle.
        requested: IntRect,
    },
}
