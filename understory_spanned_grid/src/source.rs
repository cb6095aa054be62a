// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Item sources: how many items there are and how many cells each one spans.

use alloc::vec::Vec;
use core::fmt;

use understory_span_pack::SpanSize;

/// A dense sequence of items, indexed `0..len`, each with a [`SpanSize`].
///
/// [`span_size`](Self::span_size) is queried at most once per item per full
/// layout pass and must be deterministic within a pass. It may change between
/// passes; call [`SpannedGrid::invalidate`](crate::SpannedGrid::invalidate) when
/// it does.
pub trait SpanSource {
    /// Number of items.
    fn len(&self) -> usize;

    /// Returns `true` if there are no items.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Footprint of the item at `position`, in cells.
    fn span_size(&mut self, position: usize) -> SpanSize;
}

/// A [`SpanSource`] backed by a vector of span sizes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpanList {
    sizes: Vec<SpanSize>,
}

impl SpanList {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self { sizes: Vec::new() }
    }

    /// `len` items that all span `span`.
    #[must_use]
    pub fn uniform(len: usize, span: SpanSize) -> Self {
        Self {
            sizes: alloc::vec![span; len],
        }
    }

    /// Appends an item.
    pub fn push(&mut self, span: SpanSize) {
        self.sizes.push(span);
    }

    /// Replaces the span of an existing item. Returns the previous span, or
    /// `None` if `position` is out of range.
    pub fn set(&mut self, position: usize, span: SpanSize) -> Option<SpanSize> {
        self.sizes
            .get_mut(position)
            .map(|slot| core::mem::replace(slot, span))
    }

    /// The span of `position`, if it exists.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<SpanSize> {
        self.sizes.get(position).copied()
    }

    /// Shortens or extends the list; new items get `fill`.
    pub fn resize(&mut self, len: usize, fill: SpanSize) {
        self.sizes.resize(len, fill);
    }

    /// The spans as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[SpanSize] {
        &self.sizes
    }
}

impl From<Vec<SpanSize>> for SpanList {
    fn from(sizes: Vec<SpanSize>) -> Self {
        Self { sizes }
    }
}

impl FromIterator<SpanSize> for SpanList {
    fn from_iter<I: IntoIterator<Item = SpanSize>>(iter: I) -> Self {
        Self {
            sizes: iter.into_iter().collect(),
        }
    }
}

impl SpanSource for SpanList {
    fn len(&self) -> usize {
        self.sizes.len()
    }

    fn span_size(&mut self, position: usize) -> SpanSize {
        // Positions past the end are never laid out; a single cell is harmless.
        self.sizes.get(position).copied().unwrap_or(SpanSize::ONE)
    }
}

/// A [`SpanSource`] that computes spans with a closure.
///
/// Useful for very long sequences whose spans follow from the position, or from
/// state owned elsewhere.
///
/// ```rust
/// use understory_spanned_grid::{FnSpanSource, SpanSize, SpanSource};
///
/// let mut source = FnSpanSource::new(1_000_000, |position| {
///     if position % 12 == 0 { SpanSize::square(2) } else { SpanSize::ONE }
/// });
/// assert_eq!(source.len(), 1_000_000);
/// assert_eq!(source.span_size(24), SpanSize::square(2));
/// ```
pub struct FnSpanSource<F> {
    len: usize,
    lookup: F,
}

impl<F> FnSpanSource<F>
where
    F: FnMut(usize) -> SpanSize,
{
    /// Creates a source of `len` items whose spans come from `lookup`.
    pub const fn new(len: usize, lookup: F) -> Self {
        Self { len, lookup }
    }

    /// Changes the number of items.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
    }
}

impl<F> fmt::Debug for FnSpanSource<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSpanSource")
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}

impl<F> SpanSource for FnSpanSource<F>
where
    F: FnMut(usize) -> SpanSize,
{
    fn len(&self) -> usize {
        self.len
    }

    fn span_size(&mut self, position: usize) -> SpanSize {
        (self.lookup)(position)
    }
}
