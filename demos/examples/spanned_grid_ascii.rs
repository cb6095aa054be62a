// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A 500-item, four-column gallery rendered as ASCII art.
//!
//! Tapping an item toggles it between a single cell and a 2×2 block. The demo
//! "taps" a few items, scrolls, jumps, and saves/restores its place, printing
//! the viewport after each step.
//!
//! Run:
//! - `cargo run -p understory_demos --example spanned_grid_ascii`

use std::collections::HashMap;

use understory_spanned_grid::{
    Axis, GridConfig, Insets, IntRect, ItemHost, Orientation, SpanList, SpanSize, SpannedGrid,
    Viewport,
};

const CELL: i32 = 40;
const SPANS: u32 = 4;
const ROWS_VISIBLE: i32 = 6;
// Each character covers this many pixels.
const PIXEL: i32 = 5;

/// Keeps a label and the on-screen rectangle of each live item.
#[derive(Default)]
struct AsciiHost {
    live: HashMap<usize, IntRect>,
    pool: usize,
}

impl ItemHost for AsciiHost {
    type Handle = usize;

    fn materialize(&mut self, position: usize) -> usize {
        self.pool = self.pool.saturating_sub(1);
        position
    }

    // Five pixels of spacing around every item.
    fn decoration_insets(&mut self, _: &usize) -> Insets {
        Insets::uniform(PIXEL)
    }

    fn measure(&mut self, _: &mut usize, _: i32, _: i32) {}

    fn position(&mut self, handle: &mut usize, rect: IntRect) {
        self.live.insert(*handle, rect);
    }

    fn recycle(&mut self, handle: usize) {
        self.live.remove(&handle);
        self.pool += 1;
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

impl AsciiHost {
    fn render(&self, title: &str, grid: &SpannedGrid<usize>) {
        let width = (CELL * SPANS as i32) / PIXEL;
        let height = (CELL * ROWS_VISIBLE) / PIXEL;
        let mut canvas = vec![vec![' '; width as usize]; height as usize];
        for (&position, rect) in &self.live {
            let label = char::from(b'a' + (position % 26) as u8);
            for y in (rect.top / PIXEL).max(0)..(rect.bottom / PIXEL).min(height) {
                for x in (rect.left / PIXEL).max(0)..(rect.right / PIXEL).min(width) {
                    canvas[y as usize][x as usize] = label;
                }
            }
        }
        println!(
            "== {title}: offset {}, items {}..={} ({} live, {} pooled)",
            grid.scroll_offset(),
            grid.first_visible_position(),
            grid.last_visible_position(),
            self.live.len(),
            self.pool,
        );
        for row in canvas {
            println!("|{}|", row.into_iter().collect::<String>());
        }
    }
}

fn toggle(items: &mut SpanList, position: usize) {
    let next = match items.get(position) {
        Some(span) if span == SpanSize::ONE => SpanSize::square(2),
        _ => SpanSize::ONE,
    };
    items.set(position, next);
}

fn main() {
    let config = GridConfig::new(Orientation::Vertical, SPANS);
    let mut grid = SpannedGrid::new(config).expect("four spans is a valid lane");
    grid.set_viewport(Viewport::new(CELL * SPANS as i32, CELL * ROWS_VISIBLE));

    let mut items = SpanList::uniform(500, SpanSize::ONE);
    let mut host = AsciiHost::default();

    grid.layout(&mut items, &mut host).expect("all spans fit");
    host.render("initial", &grid);

    for position in [1, 6, 7] {
        toggle(&mut items, position);
    }
    grid.invalidate();
    grid.layout(&mut items, &mut host).expect("all spans fit");
    host.render("after toggling 1, 6 and 7", &grid);

    let moved = grid
        .scroll_by(3 * CELL + CELL / 2, &mut items, &mut host)
        .expect("all spans fit");
    host.render(&format!("scrolled by {moved}"), &grid);

    let saved = grid.save_state();

    grid.scroll_to_position(321);
    grid.layout(&mut items, &mut host).expect("all spans fit");
    host.render("jumped to 321", &grid);

    let moved = grid
        .scroll_by(-10_000, &mut items, &mut host)
        .expect("all spans fit");
    host.render(&format!("scrolled back by {moved}"), &grid);

    if let Some(saved) = saved {
        grid.restore_state(saved);
        grid.layout(&mut items, &mut host).expect("all spans fit");
        host.render("restored", &grid);
    }

    let moved = grid
        .scroll_by(1_000_000, &mut items, &mut host)
        .expect("all spans fit");
    host.render(&format!("flung to the end ({moved})"), &grid);
}
