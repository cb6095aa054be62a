// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rendering surface the grid drives.

use understory_span_pack::{Axis, Insets, IntRect};

/// Creates, sizes, positions, and recycles on-screen items for a
/// [`SpannedGrid`](crate::SpannedGrid).
///
/// The grid only computes geometry. Hosts own the actual views (widgets,
/// display-list nodes, terminal cells, ...) and hand the grid an opaque
/// [`Handle`](Self::Handle) for each materialized item.
///
/// All rectangles are in viewport pixels, already adjusted for scroll and
/// padding. Calls are synchronous and happen on the caller's thread, in the
/// order: `materialize`, `decoration_insets`, `measure`, `position`, and
/// eventually `recycle`.
pub trait ItemHost {
    /// Opaque per-item handle.
    type Handle;

    /// Produces a handle for the item at `position`, reusing pooled views when
    /// possible.
    fn materialize(&mut self, position: usize) -> Self::Handle;

    /// Decoration space the host wants inside the item's frame (for example,
    /// spacing between items). Defaults to none.
    fn decoration_insets(&mut self, handle: &Self::Handle) -> Insets {
        let _ = handle;
        Insets::ZERO
    }

    /// Tells the item its size: the frame minus its decoration insets.
    fn measure(&mut self, handle: &mut Self::Handle, width: i32, height: i32);

    /// Places the item's content rectangle in viewport coordinates.
    fn position(&mut self, handle: &mut Self::Handle, rect: IntRect);

    /// Returns an item to the host's pool.
    fn recycle(&mut self, handle: Self::Handle);

    /// Shifts every materialized item by `delta` pixels along `axis`.
    ///
    /// Called when the scroll offset changes; a positive `delta` moves items
    /// towards larger coordinates.
    fn offset_all(&mut self, delta: i32, axis: Axis);
}
