// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording host and counting source shared by the unit tests.

use alloc::vec::Vec;

use hashbrown::HashMap;
use understory_span_pack::{Axis, Insets, IntRect, SpanSize};

use crate::{ItemHost, SpanSource};

/// Tracks every live item's last content rectangle, in viewport coordinates.
#[derive(Debug, Default)]
pub(crate) struct RecordingHost {
    pub(crate) live: HashMap<usize, IntRect>,
    pub(crate) measured: HashMap<usize, (i32, i32)>,
    pub(crate) insets: Insets,
    pub(crate) materialized: usize,
    pub(crate) recycled: usize,
    pub(crate) max_live: usize,
}

impl ItemHost for RecordingHost {
    type Handle = usize;

    fn materialize(&mut self, position: usize) -> usize {
        assert!(
            self.live.insert(position, IntRect::ZERO).is_none(),
            "item {position} materialized twice"
        );
        self.materialized += 1;
        self.max_live = self.max_live.max(self.live.len());
        position
    }

    fn decoration_insets(&mut self, _: &usize) -> Insets {
        self.insets
    }

    fn measure(&mut self, handle: &mut usize, width: i32, height: i32) {
        self.measured.insert(*handle, (width, height));
    }

    fn position(&mut self, handle: &mut usize, rect: IntRect) {
        self.live.insert(*handle, rect);
    }

    fn recycle(&mut self, handle: usize) {
        assert!(
            self.live.remove(&handle).is_some(),
            "item {handle} recycled while not live"
        );
        self.recycled += 1;
    }

    fn offset_all(&mut self, delta: i32, axis: Axis) {
        for rect in self.live.values_mut() {
            *rect = match axis {
                Axis::X => rect.translate(delta, 0),
                Axis::Y => rect.translate(0, delta),
            };
        }
    }
}

/// Counts how often each position's span is looked up.
pub(crate) struct CountingSource<F> {
    lookup: F,
    calls: Vec<u32>,
}

impl<F: FnMut(usize) -> SpanSize> CountingSource<F> {
    pub(crate) fn new(len: usize, lookup: F) -> Self {
        Self {
            lookup,
            calls: alloc::vec![0; len],
        }
    }

    pub(crate) fn calls_for(&self, position: usize) -> u32 {
        self.calls[position]
    }

    pub(crate) fn max_calls(&self) -> u32 {
        self.calls.iter().copied().max().unwrap_or(0)
    }
}

impl<F: FnMut(usize) -> SpanSize> SpanSource for CountingSource<F> {
    fn len(&self) -> usize {
        self.calls.len()
    }

    fn span_size(&mut self, position: usize) -> SpanSize {
        self.calls[position] += 1;
        (self.lookup)(position)
    }
}
