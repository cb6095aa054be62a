// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid errors.

use thiserror::Error;
use understory_span_pack::PackError;

/// Fatal grid errors.
///
/// Every variant describes a configuration or data bug. A layout pass that
/// returns an error leaves the grid needing a fresh pass once the cause is fixed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    /// The [`GridConfig`](crate::GridConfig) was rejected.
    #[error("invalid grid configuration: {0}")]
    Config(#[source] PackError),
    /// An item could not be placed.
    #[error("cannot lay out item {position}: {source}")]
    Layout {
        /// The offending item.
        position: usize,
        /// Why it could not be placed.
        #[source]
        source: PackError,
    },
    /// An item's pixel frame, padding included, does not fit `i32` coordinates.
    #[error("item {position} lies beyond the pixel range at cell extent {cell_extent}")]
    PixelOverflow {
        /// The first item that does not fit.
        position: usize,
        /// Pixel size of one cell in the failing pass.
        cell_extent: i32,
    },
}
