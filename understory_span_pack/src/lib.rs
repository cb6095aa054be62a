// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_span_pack --heading-base-level=0

//! Understory Span Pack: first-fit packing of whole-cell spans into a lane.
//!
//! A *lane* is a strip of grid cells that is `spans` cells across one axis and
//! unbounded along the other. Items occupy rectangular *spans* (`width × height`
//! cells) and are placed one after another, in position order, into the first
//! free spot that can hold them.
//!
//! - [`IntRect`]: half-open integer rectangle used for cells and pixels alike.
//! - [`SpanSize`]: an item's footprint in cells, validated against the lane.
//! - [`Orientation`]: which axis is bounded and which one scrolls.
//! - [`SpanPacker`]: tracks free space as a list of maximal free rectangles and
//!   answers "where does the next span go".
//!
//! The packer is pure geometry. It knows nothing about pixels, scrolling, or
//! which items are on screen; see `understory_spanned_grid` for a windowed
//! layout engine built on top of it.
//!
//! ## Example
//!
//! ```rust
//! use understory_span_pack::{IntRect, Orientation, SpanPacker, SpanSize};
//!
//! // Four columns, rows grow downwards.
//! let mut packer = SpanPacker::new(Orientation::Vertical, 4).unwrap();
//!
//! assert_eq!(packer.place(0, SpanSize::ONE).unwrap(), IntRect::new(0, 0, 1, 1));
//! assert_eq!(packer.place(1, SpanSize::ONE).unwrap(), IntRect::new(1, 0, 2, 1));
//! // A 2×2 block still fits on the first row, next to the two single cells.
//! assert_eq!(packer.place(2, SpanSize::square(2)).unwrap(), IntRect::new(2, 0, 4, 2));
//! // The next single cell fills the hole below the first two.
//! assert_eq!(packer.place(3, SpanSize::ONE).unwrap(), IntRect::new(0, 1, 1, 2));
//! ```
//!
//! Re-querying a committed position returns its cached rectangle without
//! touching the free space:
//!
//! ```rust
//! use understory_span_pack::{Orientation, SpanPacker, SpanSize};
//!
//! let mut packer = SpanPacker::new(Orientation::Horizontal, 2).unwrap();
//! let rect = packer.place(0, SpanSize::new(1, 2)).unwrap();
//! assert_eq!(packer.find_rect(0, SpanSize::new(1, 2)).unwrap(), rect);
//! ```
//!
//! ## Features
//!
//! - `std` *(default)*: forwards to `kurbo/std` when `kurbo` is enabled.
//! - `libm`: forwards to `kurbo/libm` for `no_std` builds with `kurbo`.
//! - `kurbo`: `From<IntRect> for kurbo::Rect`.
//! - `serde`: `Serialize`/`Deserialize` for the plain value types.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod orientation;
mod packer;
mod span;
mod types;

pub use error::PackError;
pub use orientation::{Axis, Orientation};
pub use packer::SpanPacker;
pub use span::SpanSize;
pub use types::{Insets, IntRect};

#[cfg(all(test, feature = "kurbo"))]
mod tests {
    use super::IntRect;

    #[test]
    fn converts_into_kurbo_rect() {
        let rect: kurbo::Rect = IntRect::new(1, 2, 30, 40).into();
        assert_eq!(rect, kurbo::Rect::new(1.0, 2.0, 30.0, 40.0));
    }
}
