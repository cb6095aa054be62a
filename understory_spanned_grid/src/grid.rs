// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The windowed layout engine.

use alloc::collections::VecDeque;

use hashbrown::HashMap;
use log::{debug, trace, warn};
use understory_span_pack::{Axis, IntRect, Orientation, SpanPacker, SpanSize};

use crate::{GridConfig, GridError, ItemHost, SavedState, ScrollMetrics, SpanSource, Viewport};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Edge {
    Leading,
    Trailing,
}

#[derive(Debug)]
struct Child<T> {
    position: usize,
    handle: T,
}

/// Lays out a sequence of variable-span items on a grid lane and keeps only the
/// items near the viewport materialized.
///
/// This type:
/// - owns a [`SpanPacker`] plus a cache of pixel frames for every position
///   placed during the current pass,
/// - stores the scroll offset and the bounds of the materialized window
///   ([`layout_start`](Self::layout_start)/[`layout_end`](Self::layout_end)),
/// - holds the host's handles for the materialized items, which always form a
///   contiguous run of positions.
///
/// It does not own the items or their views. Every operation that may place or
/// materialize items takes the [`SpanSource`] and the [`ItemHost`] explicitly.
///
/// Along the scroll axis, *content coordinates* are lane pixels plus the leading
/// padding, and the viewport shows content `[scroll, scroll + extent)`.
///
/// Call [`layout`](Self::layout) after construction and after every structural
/// change ([`invalidate`](Self::invalidate), [`set_viewport`](Self::set_viewport),
/// [`set_config`](Self::set_config)), then [`scroll_by`](Self::scroll_by) as
/// often as needed.
#[derive(Debug)]
pub struct SpannedGrid<T> {
    config: GridConfig,
    viewport: Viewport,
    packer: SpanPacker,
    frames: HashMap<usize, IntRect>,
    children: VecDeque<Child<T>>,
    item_count: usize,
    cell_extent: i32,

    scroll: i32,
    layout_start: i32,
    layout_end: i32,
    // First position to fill forward from while nothing is materialized.
    resume_at: usize,

    pending_scroll: Option<usize>,
    structure_dirty: bool,
}

impl<T> SpannedGrid<T> {
    /// Creates a grid with the given configuration and an empty viewport.
    ///
    /// Returns [`GridError::Config`] if `config.spans` is zero.
    pub fn new(config: GridConfig) -> Result<Self, GridError> {
        let packer = SpanPacker::new(config.orientation, config.spans).map_err(GridError::Config)?;
        Ok(Self {
            config,
            viewport: Viewport::default(),
            packer,
            frames: HashMap::new(),
            children: VecDeque::new(),
            item_count: 0,
            cell_extent: 0,
            scroll: 0,
            layout_start: 0,
            layout_end: 0,
            resume_at: 0,
            pending_scroll: None,
            structure_dirty: true,
        })
    }

    /// The current configuration.
    #[must_use]
    pub const fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Replaces the configuration. This is a structural change.
    pub fn set_config(&mut self, config: GridConfig) -> Result<(), GridError> {
        SpanPacker::new(config.orientation, config.spans).map_err(GridError::Config)?;
        if config != self.config {
            self.config = config;
            self.structure_dirty = true;
        }
        Ok(())
    }

    /// The current viewport.
    #[must_use]
    pub const fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Sets the viewport. A different viewport is a structural change.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if viewport != self.viewport {
            self.viewport = viewport;
            self.structure_dirty = true;
        }
    }

    /// Marks the item sequence as changed; the next [`layout`](Self::layout)
    /// re-packs the lane from position 0.
    pub fn invalidate(&mut self) {
        self.structure_dirty = true;
    }

    /// Returns `true` if a full layout pass is due.
    #[must_use]
    pub const fn needs_layout(&self) -> bool {
        self.structure_dirty || self.pending_scroll.is_some()
    }

    /// Returns the current scroll offset.
    #[must_use]
    pub const fn scroll_offset(&self) -> i32 {
        self.scroll
    }

    /// Leading edge of the materialized items, in content coordinates.
    #[must_use]
    pub const fn layout_start(&self) -> i32 {
        self.layout_start
    }

    /// Trailing edge of the materialized items, in content coordinates.
    #[must_use]
    pub const fn layout_end(&self) -> i32 {
        self.layout_end
    }

    /// Pixel size of one cell in the current pass.
    #[must_use]
    pub const fn cell_extent(&self) -> i32 {
        self.cell_extent
    }

    /// Number of items seen by the current pass.
    #[must_use]
    pub const fn item_count(&self) -> usize {
        self.item_count
    }

    /// The packer of the current pass.
    #[must_use]
    pub const fn packer(&self) -> &SpanPacker {
        &self.packer
    }

    /// Cell rectangle of `position`, if it was placed during the current pass.
    #[must_use]
    pub fn cell_rect_of(&self, position: usize) -> Option<IntRect> {
        self.packer.placement(position)
    }

    /// Pixel frame of `position` in lane coordinates (no scroll, no padding),
    /// if it was placed during the current pass.
    #[must_use]
    pub fn frame_of(&self, position: usize) -> Option<IntRect> {
        self.frames.get(&position).copied()
    }

    /// Pixel frame of `position` in viewport coordinates.
    #[must_use]
    pub fn visible_frame_of(&self, position: usize) -> Option<IntRect> {
        self.frame_of(position).map(|frame| self.to_viewport(frame))
    }

    /// Number of materialized items.
    #[must_use]
    pub fn materialized_len(&self) -> usize {
        self.children.len()
    }

    /// Materialized items in position order.
    pub fn materialized(&self) -> impl Iterator<Item = (usize, &T)> + '_ {
        self.children.iter().map(|child| (child.position, &child.handle))
    }

    /// First materialized position, or 0 when nothing is materialized.
    #[must_use]
    pub fn first_visible_position(&self) -> usize {
        self.children.front().map_or(0, |child| child.position)
    }

    /// Last materialized position, or 0 when nothing is materialized.
    #[must_use]
    pub fn last_visible_position(&self) -> usize {
        self.children.back().map_or(0, |child| child.position)
    }

    /// Item-based scrollbar metrics.
    #[must_use]
    pub fn scroll_metrics(&self) -> ScrollMetrics {
        ScrollMetrics {
            offset: self.first_visible_position(),
            extent: self.children.len(),
            range: self.item_count,
        }
    }

    /// Returns `true` if the grid scrolls along `axis`.
    #[must_use]
    pub const fn can_scroll(&self, axis: Axis) -> bool {
        matches!(
            (self.config.orientation, axis),
            (Orientation::Vertical, Axis::Y) | (Orientation::Horizontal, Axis::X)
        )
    }

    /// Requests that the next [`layout`](Self::layout) brings `position` to the
    /// viewport's leading edge.
    pub fn scroll_to_position(&mut self, position: usize) {
        self.pending_scroll = Some(position);
    }

    /// The pending scroll target, if any.
    #[must_use]
    pub const fn pending_scroll_position(&self) -> Option<usize> {
        self.pending_scroll
    }

    /// Drops a pending scroll target before it runs, returning it.
    pub fn cancel_pending_scroll(&mut self) -> Option<usize> {
        self.pending_scroll.take()
    }

    /// Captures the first item whose leading edge is inside the viewport.
    ///
    /// Returns `None` when nothing is materialized.
    #[must_use]
    pub fn save_state(&self) -> Option<SavedState> {
        let first = self
            .children
            .iter()
            .find(|child| {
                self.content_span_of(child.position)
                    .is_some_and(|(start, _)| start >= self.scroll)
            })
            .or_else(|| self.children.front())?;
        Some(SavedState {
            first_visible_position: first.position,
        })
    }

    /// Schedules a scroll back to a previously saved item.
    pub fn restore_state(&mut self, state: SavedState) {
        self.scroll_to_position(state.first_visible_position);
    }

    /// Runs a full layout pass.
    ///
    /// Recycles every materialized item, then:
    /// - re-packs the lane from position 0 if the structure changed (or the
    ///   configuration does not promise a stable item order),
    /// - seeks to the pending scroll target if there is one,
    /// - otherwise refills around the current scroll offset,
    ///
    /// and finally pulls the scroll offset back if it ran past the end of the
    /// content.
    pub fn layout<S, H>(&mut self, source: &mut S, host: &mut H) -> Result<(), GridError>
    where
        S: SpanSource + ?Sized,
        H: ItemHost<Handle = T>,
    {
        let item_count = source.len();
        let reuse = !self.structure_dirty
            && self.config.item_order_is_stable
            && item_count == self.item_count
            && self.cell_extent == self.derive_cell_extent();

        self.recycle_all(host);
        if !reuse {
            self.structure_dirty = true;
            self.packer = SpanPacker::new(self.config.orientation, self.config.spans)
                .map_err(GridError::Config)?;
            self.frames.clear();
            self.item_count = item_count;
            self.cell_extent = self.derive_cell_extent();
        }
        self.layout_start = self.padding_start();
        self.layout_end = self.layout_start;
        self.resume_at = 0;

        debug!(
            "spanned grid layout: {} items, {} spans, cell extent {}, pending scroll {:?}, reusing placements: {}",
            self.item_count, self.config.spans, self.cell_extent, self.pending_scroll, reuse
        );

        if self.cell_extent <= 0 {
            warn!(
                "spanned grid viewport {:?} is smaller than one cell per span; laying out nothing",
                self.viewport
            );
        }
        if self.is_degenerate() {
            self.scroll = 0;
        } else if let Some(target) = self.pending_scroll {
            self.seek(target, source, host)?;
        } else {
            self.scroll = self.scroll.max(0);
            self.fill_after(source, host)?;
            self.fill_before(source, host)?;
        }
        self.correct_overscroll(source, host)?;

        self.pending_scroll = None;
        self.structure_dirty = false;
        Ok(())
    }

    /// Scrolls by `delta` pixels along the scroll axis and returns the distance
    /// actually scrolled.
    ///
    /// Deltas that would move past the start, or past the end of content once
    /// the last item is materialized, are clamped; a fully illegal delta scrolls
    /// by 0. Items that end up entirely outside the viewport behind the motion
    /// are recycled and the slack ahead of the motion is refilled.
    ///
    /// Runs a full [`layout`](Self::layout) first if one is due.
    pub fn scroll_by<S, H>(
        &mut self,
        delta: i32,
        source: &mut S,
        host: &mut H,
    ) -> Result<i32, GridError>
    where
        S: SpanSource + ?Sized,
        H: ItemHost<Handle = T>,
    {
        if delta == 0 {
            return Ok(0);
        }
        if self.needs_layout() {
            self.layout(source, host)?;
        }
        if self.is_degenerate() {
            return Ok(0);
        }

        let before = self.scroll;
        let applied = self.clamp_delta(delta);
        if applied == 0 {
            trace!("spanned grid scroll of {delta} clamped to 0 at offset {before}");
            return Ok(0);
        }

        self.apply_scroll(applied, host);
        if applied > 0 {
            self.recycle_leading(host);
            self.fill_after(source, host)?;
        } else {
            self.recycle_trailing(host);
            self.fill_before(source, host)?;
        }
        self.correct_overscroll(source, host)?;

        trace!(
            "spanned grid scrolled {} (asked {delta}) to offset {}",
            self.scroll - before,
            self.scroll
        );
        Ok(self.scroll - before)
    }

    fn is_degenerate(&self) -> bool {
        self.item_count == 0 || self.cell_extent <= 0
    }

    fn scroll_axis(&self) -> Axis {
        self.config.orientation.scroll_axis()
    }

    fn extent(&self) -> i32 {
        self.viewport.extent(self.scroll_axis()).max(0)
    }

    fn padding_start(&self) -> i32 {
        self.viewport.padding.start(self.scroll_axis())
    }

    fn padding_end(&self) -> i32 {
        self.viewport.padding.end(self.scroll_axis())
    }

    fn slack(&self) -> i32 {
        i32::try_from(self.config.slack_screens)
            .unwrap_or(i32::MAX)
            .saturating_mul(self.extent())
    }

    fn derive_cell_extent(&self) -> i32 {
        if let Some(extent) = self.config.cell_extent {
            return i32::try_from(extent.get()).unwrap_or(i32::MAX);
        }
        let cross = self.config.orientation.cross_axis();
        let available = self.viewport.extent(cross) - self.viewport.padding.total(cross);
        let spans = i32::try_from(self.config.spans).unwrap_or(i32::MAX);
        (available / spans).max(0)
    }

    fn content_span(&self, frame: IntRect) -> (i32, i32) {
        let axis = self.scroll_axis();
        let padding = self.padding_start();
        (frame.start(axis) + padding, frame.end(axis) + padding)
    }

    fn content_span_of(&self, position: usize) -> Option<(i32, i32)> {
        self.frames
            .get(&position)
            .map(|frame| self.content_span(*frame))
    }

    fn to_viewport(&self, frame: IntRect) -> IntRect {
        let padding = self.viewport.padding;
        match self.config.orientation {
            Orientation::Vertical => frame.translate(padding.left, padding.top - self.scroll),
            Orientation::Horizontal => frame.translate(padding.left - self.scroll, padding.top),
        }
    }

    fn next_after(&self) -> usize {
        self.children
            .back()
            .map_or(self.resume_at, |child| child.position + 1)
    }

    fn next_before(&self) -> Option<usize> {
        self.children
            .front()
            .map_or(self.resume_at, |child| child.position)
            .checked_sub(1)
    }

    /// Packs `position` if this pass has not done so yet and returns its frame.
    fn place<S>(&mut self, position: usize, source: &mut S) -> Result<IntRect, GridError>
    where
        S: SpanSource + ?Sized,
    {
        if let Some(frame) = self.frames.get(&position) {
            return Ok(*frame);
        }
        debug_assert!(
            position == self.packer.placed_len(),
            "positions must be packed in order; got {position} after {} placements",
            self.packer.placed_len()
        );
        let span = source.span_size(position);
        let frame = self.pixel_frame(position, span).inspect_err(|_| {
            // The packer may be ahead of the frame cache now.
            self.structure_dirty = true;
        })?;
        self.frames.insert(position, frame);
        Ok(frame)
    }

    fn pixel_frame(&mut self, position: usize, span: SpanSize) -> Result<IntRect, GridError> {
        let cell = self
            .packer
            .place(position, span)
            .map_err(|err| GridError::Layout {
                position,
                source: err,
            })?;
        let overflow = GridError::PixelOverflow {
            position,
            cell_extent: self.cell_extent,
        };
        let frame = cell.checked_scale(self.cell_extent).ok_or(overflow)?;
        let padding = self.viewport.padding;
        for axis in [Axis::X, Axis::Y] {
            // Content coordinates add the padding on both sides.
            if frame.end(axis).checked_add(padding.total(axis)).is_none() {
                return Err(overflow);
            }
        }
        Ok(frame)
    }

    fn attach<H>(&mut self, position: usize, frame: IntRect, edge: Edge, host: &mut H)
    where
        H: ItemHost<Handle = T>,
    {
        let mut handle = host.materialize(position);
        let insets = host.decoration_insets(&handle);
        let content = self.to_viewport(frame).inset(insets);
        host.measure(&mut handle, content.width(), content.height());
        host.position(&mut handle, content);

        let (start, end) = self.content_span(frame);
        if self.children.is_empty() {
            self.layout_start = start;
            self.layout_end = end;
        } else {
            self.layout_start = self.layout_start.min(start);
            self.layout_end = self.layout_end.max(end);
        }
        let child = Child { position, handle };
        match edge {
            Edge::Leading => self.children.push_front(child),
            Edge::Trailing => self.children.push_back(child),
        }
    }

    /// Seeks to `target`: packs every position up to it without materializing
    /// anything, jumps the scroll offset to its leading edge, and fills around it.
    ///
    /// Packing is O(target) for a fresh pass.
    fn seek<S, H>(&mut self, target: usize, source: &mut S, host: &mut H) -> Result<(), GridError>
    where
        S: SpanSource + ?Sized,
        H: ItemHost<Handle = T>,
    {
        let last = self.item_count - 1;
        let target = if target > last {
            warn!("spanned grid scroll target {target} is past the last item {last}; clamping");
            last
        } else {
            target
        };

        let first_row = usize::try_from(self.config.spans).unwrap_or(usize::MAX);
        if target < first_row {
            self.scroll = 0;
            self.fill_after(source, host)?;
            return Ok(());
        }

        let mut frame = IntRect::ZERO;
        for position in 0..=target {
            frame = self.place(position, source)?;
        }
        let (offset, _) = self.content_span(frame);
        debug!("spanned grid seek to item {target} resolved at offset {offset}");

        self.scroll = offset;
        self.layout_start = offset;
        self.layout_end = offset;
        self.resume_at = target;
        self.fill_after(source, host)?;
        self.fill_before(source, host)
    }

    /// Materializes positions after the window until the slack ahead of the
    /// viewport is covered or the items run out.
    fn fill_after<S, H>(&mut self, source: &mut S, host: &mut H) -> Result<(), GridError>
    where
        S: SpanSource + ?Sized,
        H: ItemHost<Handle = T>,
    {
        let limit = self
            .scroll
            .saturating_add(self.extent())
            .saturating_add(self.slack());
        let mut position = self.next_after();
        let mut added = 0_usize;
        let mut skipped = 0_usize;
        while position < self.item_count && (self.children.is_empty() || limit > self.layout_end) {
            let frame = self.place(position, source)?;
            let (_, end) = self.content_span(frame);
            position += 1;
            if self.children.is_empty() && end <= self.scroll {
                // Entirely behind the viewport: packed, never shown.
                self.resume_at = position;
                skipped += 1;
                continue;
            }
            self.attach(position - 1, frame, Edge::Trailing, host);
            added += 1;
        }
        trace!("spanned grid filled {added} items after (skipped {skipped}) up to {limit}");

        if self.children.is_empty() && self.item_count > 0 {
            // Scrolled past the end of the content: settle on the last screenful.
            let end = self
                .frames
                .values()
                .map(|frame| self.content_span(*frame).1)
                .max()
                .unwrap_or_else(|| self.padding_start());
            self.scroll = (end + self.padding_end() - self.extent()).max(0);
            self.layout_start = end;
            self.layout_end = end;
            self.resume_at = self.item_count;
            return self.fill_before(source, host);
        }
        Ok(())
    }

    /// Materializes positions before the window until the slack behind the
    /// viewport is covered or position 0 is reached.
    fn fill_before<S, H>(&mut self, source: &mut S, host: &mut H) -> Result<(), GridError>
    where
        S: SpanSource + ?Sized,
        H: ItemHost<Handle = T>,
    {
        let limit = self.scroll.saturating_sub(self.slack()).max(0);
        let trailing = self.scroll.saturating_add(self.extent());
        let mut added = 0_usize;
        while self.children.is_empty() || self.layout_start > limit {
            let Some(position) = self.next_before() else {
                break;
            };
            let frame = self.place(position, source)?;
            let (start, _) = self.content_span(frame);
            if self.children.is_empty() && start >= trailing {
                self.resume_at = position;
                continue;
            }
            self.attach(position, frame, Edge::Leading, host);
            added += 1;
        }
        trace!("spanned grid filled {added} items before, down to {limit}");
        Ok(())
    }

    fn clamp_delta(&self, delta: i32) -> i32 {
        if delta < 0 {
            return delta.max(-self.scroll.max(0));
        }
        if self.next_after() < self.item_count {
            // The end of the content is not known yet. Keep the fill limit in range.
            let headroom = i32::MAX
                - self
                    .scroll
                    .saturating_add(self.extent())
                    .saturating_add(self.slack());
            return delta.min(headroom);
        }
        let room = self
            .layout_end
            .saturating_add(self.padding_end())
            .saturating_sub(self.scroll.saturating_add(self.extent()));
        delta.min(room.max(0))
    }

    fn apply_scroll<H>(&mut self, delta: i32, host: &mut H)
    where
        H: ItemHost<Handle = T>,
    {
        self.scroll += delta;
        host.offset_all(-delta, self.scroll_axis());
    }

    /// Pulls the scroll offset back when the last item is materialized and the
    /// viewport reaches past the end of the content.
    fn correct_overscroll<S, H>(&mut self, source: &mut S, host: &mut H) -> Result<(), GridError>
    where
        S: SpanSource + ?Sized,
        H: ItemHost<Handle = T>,
    {
        let Some(last) = self.children.back().map(|child| child.position) else {
            return Ok(());
        };
        if last + 1 != self.item_count {
            return Ok(());
        }
        let overscroll = self
            .scroll
            .saturating_add(self.extent())
            .saturating_sub(self.layout_end.saturating_add(self.padding_end()));
        let correction = overscroll.min(self.scroll);
        if correction <= 0 {
            return Ok(());
        }
        trace!("spanned grid overscrolled by {overscroll}; scrolling back {correction}");
        self.apply_scroll(-correction, host);
        self.fill_before(source, host)
    }

    /// Recycles items from the lowest position while they end at or before the
    /// viewport's leading edge.
    fn recycle_leading<H>(&mut self, host: &mut H)
    where
        H: ItemHost<Handle = T>,
    {
        let mut boundary = None;
        let mut recycled = 0_usize;
        while let Some(front) = self.children.front() {
            let position = front.position;
            let Some((_, end)) = self.content_span_of(position) else {
                break;
            };
            if end > self.scroll {
                break;
            }
            if let Some(child) = self.children.pop_front() {
                host.recycle(child.handle);
                boundary = Some((position + 1, end));
                recycled += 1;
            }
        }
        if let Some((resume_at, edge)) = boundary {
            trace!("spanned grid recycled {recycled} leading items");
            self.refresh_edges(resume_at, edge);
        }
    }

    /// Recycles items from the highest position while they start at or after the
    /// viewport's trailing edge.
    fn recycle_trailing<H>(&mut self, host: &mut H)
    where
        H: ItemHost<Handle = T>,
    {
        let trailing = self.scroll.saturating_add(self.extent());
        let mut boundary = None;
        let mut recycled = 0_usize;
        while let Some(back) = self.children.back() {
            let position = back.position;
            let Some((start, _)) = self.content_span_of(position) else {
                break;
            };
            if start < trailing {
                break;
            }
            if let Some(child) = self.children.pop_back() {
                host.recycle(child.handle);
                boundary = Some((position, start));
                recycled += 1;
            }
        }
        if let Some((resume_at, edge)) = boundary {
            trace!("spanned grid recycled {recycled} trailing items");
            self.refresh_edges(resume_at, edge);
        }
    }

    fn recycle_all<H>(&mut self, host: &mut H)
    where
        H: ItemHost<Handle = T>,
    {
        for child in self.children.drain(..) {
            host.recycle(child.handle);
        }
    }

    /// Recomputes the window bounds from the surviving items, or collapses them
    /// onto `edge` when nothing survived.
    fn refresh_edges(&mut self, resume_at: usize, edge: i32) {
        if self.children.is_empty() {
            self.layout_start = edge;
            self.layout_end = edge;
            self.resume_at = resume_at;
            return;
        }
        let (start, end) = self
            .children
            .iter()
            .filter_map(|child| self.content_span_of(child.position))
            .fold((i32::MAX, i32::MIN), |(start, end), (s, e)| {
                (start.min(s), end.max(e))
            });
        self.layout_start = start;
        self.layout_end = end;
    }
}
