// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Free-rectangle tracking for a single lane.

use alloc::vec;
use alloc::vec::Vec;

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use smallvec::SmallVec;

use crate::{IntRect, Orientation, PackError, SpanSize};

/// Places spans into a lane `spans` cells across and unbounded along the
/// orientation's scroll axis.
///
/// The packer keeps two views of the lane:
/// - a placement cache mapping item positions to their cell rectangles, and
/// - a list of free rectangles, sorted by [`Orientation::scan_key`].
///
/// Free rectangles are maximal: each one extends as far as it can in both
/// directions, so free rectangles may overlap each other. They never overlap a
/// placed rectangle, and together with the placements they cover every cell of
/// the lane. Exactly one free rectangle spans the whole cross axis and reaches
/// [`IntRect::UNBOUNDED`], so any valid span always fits somewhere.
///
/// Placement is first-fit in scan order, which makes results a pure function of
/// the sequence of `(position, span)` pairs committed.
#[derive(Clone, Debug)]
pub struct SpanPacker {
    orientation: Orientation,
    spans: u32,
    free: Vec<IntRect>,
    placements: HashMap<usize, IntRect>,
}

impl SpanPacker {
    /// Creates an empty lane with `spans` cells across.
    ///
    /// Returns [`PackError::InvalidSpans`] if `spans` is zero or does not fit the
    /// lane's `i32` coordinates.
    pub fn new(orientation: Orientation, spans: u32) -> Result<Self, PackError> {
        let lane_spans = match i32::try_from(spans) {
            Ok(lane_spans) if lane_spans > 0 => lane_spans,
            _ => return Err(PackError::InvalidSpans { spans }),
        };
        Ok(Self {
            orientation,
            spans,
            free: vec![orientation.lane(lane_spans)],
            placements: HashMap::new(),
        })
    }

    /// The lane's orientation.
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Number of cells across the bounded axis.
    #[must_use]
    pub const fn spans(&self) -> u32 {
        self.spans
    }

    /// Finds where `span` would be placed for `position`.
    ///
    /// If `position` was already committed, its cached rectangle is returned and
    /// `span` is ignored. Otherwise the free list is scanned in order and the
    /// first free rectangle that can hold `span` anchored at its near corner
    /// wins. This does not change the free space; call [`commit`](Self::commit)
    /// with the result before placing the next position.
    pub fn find_rect(&self, position: usize, span: SpanSize) -> Result<IntRect, PackError> {
        if let Some(rect) = self.placements.get(&position) {
            return Ok(*rect);
        }
        let span = span.validate(self.spans)?;
        // Validated sides are bounded by `spans`, which fits in `i32`.
        let width = i32::try_from(span.width).unwrap_or(i32::MAX);
        let height = i32::try_from(span.height).unwrap_or(i32::MAX);
        self.free
            .iter()
            .find_map(|free| {
                let candidate = IntRect::new(
                    free.left,
                    free.top,
                    free.left.checked_add(width)?,
                    free.top.checked_add(height)?,
                );
                free.contains(&candidate).then_some(candidate)
            })
            .ok_or(PackError::LaneExhausted {
                width: span.width,
                height: span.height,
            })
    }

    /// Records `rect` as the placement of `position` and removes it from the
    /// free space.
    ///
    /// Committing the same rectangle again for a position is a no-op. Committing
    /// a different one returns [`PackError::PositionConflict`] and leaves the
    /// lane untouched.
    pub fn commit(&mut self, position: usize, rect: IntRect) -> Result<(), PackError> {
        match self.placements.entry(position) {
            Entry::Occupied(existing) if *existing.get() == rect => Ok(()),
            Entry::Occupied(existing) => Err(PackError::PositionConflict {
                position,
                existing: *existing.get(),
                requested: rect,
            }),
            Entry::Vacant(slot) => {
                slot.insert(rect);
                self.subtract(rect);
                Ok(())
            }
        }
    }

    /// Finds a rectangle for `position` and commits it in one step.
    pub fn place(&mut self, position: usize, span: SpanSize) -> Result<IntRect, PackError> {
        let rect = self.find_rect(position, span)?;
        self.commit(position, rect)?;
        Ok(rect)
    }

    /// The committed rectangle of `position`, if any.
    #[must_use]
    pub fn placement(&self, position: usize) -> Option<IntRect> {
        self.placements.get(&position).copied()
    }

    /// All committed `(position, rect)` pairs, in no particular order.
    pub fn placements(&self) -> impl Iterator<Item = (usize, IntRect)> + '_ {
        self.placements.iter().map(|(position, rect)| (*position, *rect))
    }

    /// Number of committed positions.
    #[must_use]
    pub fn placed_len(&self) -> usize {
        self.placements.len()
    }

    /// The current free rectangles, in scan order.
    #[must_use]
    pub fn free_rects(&self) -> &[IntRect] {
        &self.free
    }

    /// The far edge of the occupied region along the scroll axis, in cells.
    #[must_use]
    pub fn occupied_extent(&self) -> i32 {
        let axis = self.orientation.scroll_axis();
        self.placements
            .values()
            .map(|rect| rect.end(axis))
            .max()
            .unwrap_or(0)
    }

    /// Removes `placed` from the free space.
    ///
    /// Every free rectangle that intersects `placed` is replaced by up to four
    /// maximal remainders (left, right, top, bottom). Free rectangles whose edge
    /// shares a line with `placed` stay as they are and absorb any remainder they
    /// already contain; remainders contained in other remainders are dropped too.
    fn subtract(&mut self, placed: IntRect) {
        let mut adjacent: SmallVec<[IntRect; 8]> = SmallVec::new();
        let mut remainders: SmallVec<[IntRect; 8]> = SmallVec::new();

        self.free.retain(|free| {
            let is_adjacent = free.is_adjacent_to(&placed);
            if !is_adjacent && !free.intersects(&placed) {
                return true;
            }
            if is_adjacent && !placed.contains(free) {
                adjacent.push(*free);
                return true;
            }
            if free.left < placed.left {
                remainders.push(IntRect::new(free.left, free.top, placed.left, free.bottom));
            }
            if free.right > placed.right {
                remainders.push(IntRect::new(placed.right, free.top, free.right, free.bottom));
            }
            if free.top < placed.top {
                remainders.push(IntRect::new(free.left, free.top, free.right, placed.top));
            }
            if free.bottom > placed.bottom {
                remainders.push(IntRect::new(free.left, placed.bottom, free.right, free.bottom));
            }
            false
        });

        for (i, rect) in remainders.iter().enumerate() {
            let covered = |other: &IntRect| other != rect && other.contains(rect);
            if adjacent.iter().any(covered) || remainders.iter().any(covered) {
                continue;
            }
            if remainders[..i].contains(rect) {
                continue;
            }
            self.free.push(*rect);
        }

        let orientation = self.orientation;
        self.free.sort_by_key(|rect| orientation.scan_key(rect));
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::SpanPacker;
    use crate::{IntRect, Orientation, PackError, SpanSize};

    fn pack(orientation: Orientation, spans: u32, sizes: &[SpanSize]) -> SpanPacker {
        let mut packer = SpanPacker::new(orientation, spans).unwrap();
        for (position, span) in sizes.iter().enumerate() {
            packer.place(position, *span).unwrap();
        }
        packer
    }

    /// Every cell up to `rows` lines past the occupied extent is either placed
    /// exactly once or free, never both and never neither.
    fn assert_tiles(packer: &SpanPacker) {
        let spans = i32::try_from(packer.spans()).unwrap();
        let lines = packer.occupied_extent() + 2;
        let placed: Vec<IntRect> = packer.placements().map(|(_, rect)| rect).collect();
        for line in 0..lines {
            for cross in 0..spans {
                let (x, y) = match packer.orientation() {
                    Orientation::Vertical => (cross, line),
                    Orientation::Horizontal => (line, cross),
                };
                let owners = placed.iter().filter(|r| r.contains_point(x, y)).count();
                let free = packer
                    .free_rects()
                    .iter()
                    .any(|r| r.contains_point(x, y));
                assert!(owners <= 1, "cell ({x}, {y}) is placed {owners} times");
                assert!(
                    (owners == 1) != free,
                    "cell ({x}, {y}) placed={owners} free={free}"
                );
            }
        }
    }

    #[test]
    fn zero_spans_is_a_configuration_error() {
        assert_eq!(
            SpanPacker::new(Orientation::Vertical, 0).unwrap_err(),
            PackError::InvalidSpans { spans: 0 }
        );
        assert!(SpanPacker::new(Orientation::Vertical, u32::MAX).is_err());
        assert!(SpanPacker::new(Orientation::Horizontal, 1).is_ok());
    }

    #[test]
    fn mixed_spans_fill_holes_first() {
        let sizes = [
            SpanSize::ONE,
            SpanSize::ONE,
            SpanSize::square(2),
            SpanSize::ONE,
            SpanSize::ONE,
            SpanSize::ONE,
        ];
        let packer = pack(Orientation::Vertical, 4, &sizes);
        let expected = [
            IntRect::new(0, 0, 1, 1),
            IntRect::new(1, 0, 2, 1),
            IntRect::new(2, 0, 4, 2),
            IntRect::new(0, 1, 1, 2),
            IntRect::new(1, 1, 2, 2),
            IntRect::new(0, 2, 1, 3),
        ];
        for (position, rect) in expected.iter().enumerate() {
            assert_eq!(packer.placement(position), Some(*rect), "position {position}");
        }
        assert_eq!(packer.occupied_extent(), 3);
        assert_tiles(&packer);
    }

    #[test]
    fn horizontal_lane_mirrors_vertical() {
        let sizes = [SpanSize::ONE, SpanSize::ONE, SpanSize::square(2), SpanSize::ONE];
        let packer = pack(Orientation::Horizontal, 4, &sizes);
        assert_eq!(packer.placement(0), Some(IntRect::new(0, 0, 1, 1)));
        assert_eq!(packer.placement(1), Some(IntRect::new(0, 1, 1, 2)));
        assert_eq!(packer.placement(2), Some(IntRect::new(0, 2, 2, 4)));
        assert_eq!(packer.placement(3), Some(IntRect::new(1, 0, 2, 1)));
        assert_tiles(&packer);
    }

    #[test]
    fn requery_is_idempotent() {
        let mut packer = SpanPacker::new(Orientation::Vertical, 3).unwrap();
        let first = packer.place(0, SpanSize::new(2, 1)).unwrap();
        let free_before = packer.free_rects().to_vec();

        // The cached rect wins, whatever span is asked for.
        assert_eq!(packer.find_rect(0, SpanSize::ONE), Ok(first));
        assert_eq!(packer.commit(0, first), Ok(()));
        assert_eq!(packer.free_rects(), free_before.as_slice());
        assert_eq!(packer.placed_len(), 1);
    }

    #[test]
    fn conflicting_commit_is_rejected() {
        let mut packer = SpanPacker::new(Orientation::Vertical, 3).unwrap();
        let first = packer.place(0, SpanSize::ONE).unwrap();
        let free_before = packer.free_rects().to_vec();

        let elsewhere = IntRect::new(1, 0, 2, 1);
        assert_eq!(
            packer.commit(0, elsewhere),
            Err(PackError::PositionConflict {
                position: 0,
                existing: first,
                requested: elsewhere
            })
        );
        assert_eq!(packer.placement(0), Some(first));
        assert_eq!(packer.free_rects(), free_before.as_slice());
        // The cell stays free for the next position.
        assert_eq!(packer.place(1, SpanSize::ONE), Ok(elsewhere));
    }

    #[test]
    fn invalid_span_sizes_are_rejected() {
        let packer = SpanPacker::new(Orientation::Vertical, 1).unwrap();
        assert_eq!(
            packer.find_rect(0, SpanSize::new(2, 1)),
            Err(PackError::InvalidSpanSize {
                width: 2,
                height: 1,
                spans: 1
            })
        );
        assert!(packer.find_rect(0, SpanSize::new(0, 1)).is_err());
    }

    #[test]
    fn placements_never_overlap_and_tile_the_lane() {
        // A deterministic but irregular mix of spans.
        let sizes: Vec<SpanSize> = (0..200_u32)
            .map(|i| match i % 7 {
                0 => SpanSize::square(2),
                3 => SpanSize::new(3, 1),
                5 => SpanSize::new(1, 3),
                6 => SpanSize::new(5, 2),
                _ => SpanSize::ONE,
            })
            .collect();
        for orientation in [Orientation::Vertical, Orientation::Horizontal] {
            let packer = pack(orientation, 5, &sizes);
            let placed: Vec<IntRect> = packer.placements().map(|(_, rect)| rect).collect();
            for (i, a) in placed.iter().enumerate() {
                for b in &placed[i + 1..] {
                    assert!(!a.intersects(b), "{a:?} overlaps {b:?}");
                }
                for free in packer.free_rects() {
                    assert!(!a.intersects(free), "{a:?} overlaps free {free:?}");
                }
            }
            assert_tiles(&packer);
        }
    }

    #[test]
    fn packing_is_deterministic() {
        let sizes: Vec<SpanSize> = (0..64_u32)
            .map(|i| if i % 5 == 0 { SpanSize::square(2) } else { SpanSize::ONE })
            .collect();
        let a = pack(Orientation::Vertical, 4, &sizes);
        let b = pack(Orientation::Vertical, 4, &sizes);
        for position in 0..sizes.len() {
            assert_eq!(a.placement(position), b.placement(position));
        }
        assert_eq!(a.free_rects(), b.free_rects());
    }

    #[test]
    fn one_free_rect_always_reaches_the_far_edge() {
        let sizes: Vec<SpanSize> = (0..50_u32)
            .map(|i| SpanSize::new(1 + i % 3, 1 + i % 2))
            .collect();
        let packer = pack(Orientation::Vertical, 3, &sizes);
        let unbounded: Vec<&IntRect> = packer
            .free_rects()
            .iter()
            .filter(|r| r.bottom == IntRect::UNBOUNDED && r.left == 0 && r.right == 3)
            .collect();
        assert_eq!(unbounded.len(), 1, "{:?}", packer.free_rects());
        assert_eq!(unbounded[0].top, packer.occupied_extent());
    }

    #[test]
    fn free_rects_stay_sorted() {
        let sizes = [SpanSize::new(1, 2), SpanSize::ONE, SpanSize::new(2, 1)];
        let packer = pack(Orientation::Vertical, 4, &sizes);
        let keys: Vec<(i32, i32)> = packer
            .free_rects()
            .iter()
            .map(|r| Orientation::Vertical.scan_key(r))
            .collect();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        assert_eq!(keys, sorted);
    }
}
