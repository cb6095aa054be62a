// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_spanned_grid --heading-base-level=0

//! Understory Spanned Grid: windowed layout of variable-span items on a grid lane.
//!
//! Items are indexed `0..len` and each one covers a rectangle of whole cells
//! (`1×1`, `2×2`, `3×1`, ...). A lane is `spans` cells across and scrolls along
//! the other axis. Items are packed first-fit in position order by
//! [`understory_span_pack`], so later small items back-fill holes left by
//! earlier large ones.
//!
//! The core concepts are:
//!
//! - [`GridConfig`] and [`Viewport`]: lane shape, cell size, and the visible
//!   window with its padding.
//! - [`SpanSource`]: how many items there are and how many cells each spans.
//!   [`SpanList`] and [`FnSpanSource`] cover the common cases.
//! - [`ItemHost`]: the rendering surface. The grid asks it to materialize,
//!   measure, position, offset, and recycle items, and never owns views itself.
//! - [`SpannedGrid`]: the engine. It keeps roughly one screen of items
//!   materialized on either side of the viewport, recycles what scrolls away,
//!   and can jump straight to an arbitrary item.
//!
//! This crate does not know about widgets, input, or animation. Hosts drive it
//! from their own scroll events and draw whatever their handles stand for.
//!
//! ## Example
//!
//! ```rust
//! use understory_spanned_grid::{
//!     GridConfig, IntRect, ItemHost, Orientation, SpanList, SpanSize, SpannedGrid, Viewport,
//! };
//! use understory_spanned_grid::Axis;
//!
//! /// Remembers where each live item was put.
//! #[derive(Default)]
//! struct Frames(Vec<(usize, IntRect)>);
//!
//! impl ItemHost for Frames {
//!     type Handle = usize;
//!
//!     fn materialize(&mut self, position: usize) -> usize {
//!         position
//!     }
//!     fn measure(&mut self, _: &mut usize, _: i32, _: i32) {}
//!     fn position(&mut self, handle: &mut usize, rect: IntRect) {
//!         self.0.push((*handle, rect));
//!     }
//!     fn recycle(&mut self, handle: usize) {
//!         self.0.retain(|(position, _)| *position != handle);
//!     }
//!     fn offset_all(&mut self, delta: i32, axis: Axis) {
//!         for (_, rect) in &mut self.0 {
//!             *rect = match axis {
//!                 Axis::X => rect.translate(delta, 0),
//!                 Axis::Y => rect.translate(0, delta),
//!             };
//!         }
//!     }
//! }
//!
//! let mut grid = SpannedGrid::new(GridConfig::new(Orientation::Vertical, 4)).unwrap();
//! grid.set_viewport(Viewport::new(400, 300));
//!
//! // Every twelfth item is a 2×2 block.
//! let mut items: SpanList = (0..500)
//!     .map(|i| if i % 12 == 0 { SpanSize::square(2) } else { SpanSize::ONE })
//!     .collect();
//! let mut host = Frames::default();
//!
//! grid.layout(&mut items, &mut host).unwrap();
//! assert_eq!(grid.cell_extent(), 100);
//! assert_eq!(grid.frame_of(0), Some(IntRect::new(0, 0, 200, 200)));
//! // Item 1 sits to the right of the block; item 3 fills the hole below it.
//! assert_eq!(grid.frame_of(1), Some(IntRect::new(200, 0, 300, 100)));
//! assert_eq!(grid.frame_of(3), Some(IntRect::new(200, 100, 300, 200)));
//!
//! // Scrolling recycles what leaves the top and fills in below.
//! assert_eq!(grid.scroll_by(450, &mut items, &mut host).unwrap(), 450);
//! assert!(host.0.iter().all(|(position, _)| *position > 0));
//!
//! // Jumping to an item happens on the next layout pass.
//! grid.scroll_to_position(240);
//! grid.layout(&mut items, &mut host).unwrap();
//! assert_eq!(grid.visible_frame_of(240).map(|rect| rect.top), Some(0));
//! ```
//!
//! ## Features
//!
//! - `std` *(default)*: forwards to `understory_span_pack/std`.
//! - `libm`: forwards to `understory_span_pack/libm`.
//! - `kurbo`: `From<IntRect> for kurbo::Rect`.
//! - `serde`: `Serialize`/`Deserialize` for [`GridConfig`], [`Viewport`], and
//!   [`SavedState`].
//!
//! Diagnostics go through the [`log`] facade.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod error;
mod grid;
mod host;
mod source;
mod state;

#[cfg(test)]
mod test_host;

pub use config::{GridConfig, Viewport};
pub use error::GridError;
pub use grid::SpannedGrid;
pub use host::ItemHost;
pub use source::{FnSpanSource, SpanList, SpanSource};
pub use state::{SavedState, ScrollMetrics};

pub use understory_span_pack::{Axis, Insets, IntRect, Orientation, PackError, SpanSize};
