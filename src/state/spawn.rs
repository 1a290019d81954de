// Initial scatter placement: rail-aligned slots around the board, shuffled by a
// level-seeded generator, with progressively looser fallbacks that always terminate.
use std::collections::HashSet;

use crate::state::layout::Layout;
use crate::util::{clamp, SeededRandom};

pub const OUTER_MARGIN: f64 = 8.0;
pub const SIDE_GAP: f64 = 16.0;
const RANDOM_ATTEMPTS_PER_PIECE: usize = 300;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    /// Open-interval overlap; touching edges do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right() && self.right() > other.x && self.y < other.bottom() && self.bottom() > other.y
    }
}

pub fn spawn_seed(level: u32, total: usize) -> u32 {
    level.wrapping_mul(1097).wrapping_add((total as u32).wrapping_mul(173))
}

/// Geometry the placement works against, derived from a [`Layout`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnArea {
    pub piece_width: f64,
    pub piece_height: f64,
    pub min_x: f64,
    pub max_x: f64,
    pub max_y: f64,
    /// Top edge of the scatter region, below the heads-up band.
    pub reserved_top: f64,
    /// Board rectangle expanded by [`SIDE_GAP`] on every side.
    pub board_guard: Rect,
    pub logo_zone: Rect,
    pub x_step: f64,
    pub y_step: f64,
}

impl SpawnArea {
    pub fn from_layout(layout: &Layout) -> Self {
        let vw = layout.viewport_width;
        let vh = layout.viewport_height;
        let pw = layout.piece_width;
        let ph = layout.piece_height;

        let horizontal_gap = (pw * 0.12).round().max(8.0);
        let vertical_gap = (ph * 0.12).round().max(10.0);
        let max_x = vw - pw - OUTER_MARGIN;
        let max_y = vh - ph - OUTER_MARGIN;

        let hud_ratio = if vw < 900.0 { 0.28 } else { 0.21 };
        let hud_reserved = (vh * hud_ratio).round();
        let reserved_top = OUTER_MARGIN.max(hud_reserved).min(OUTER_MARGIN.max(max_y));

        Self {
            piece_width: pw,
            piece_height: ph,
            min_x: OUTER_MARGIN,
            max_x,
            max_y,
            reserved_top,
            board_guard: Rect {
                x: layout.board_x - SIDE_GAP,
                y: layout.board_y - SIDE_GAP,
                w: layout.board_size + SIDE_GAP * 2.0,
                h: layout.board_size + SIDE_GAP * 2.0,
            },
            logo_zone: Rect {
                x: 0.0,
                y: 0.0,
                w: 220.0f64.min(vw * 0.24),
                h: 96.0f64.max((vh * 0.15).round()),
            },
            x_step: pw + horizontal_gap,
            y_step: ph + vertical_gap,
        }
    }

    pub fn piece_rect(&self, x: f64, y: f64) -> Rect {
        Rect { x, y, w: self.piece_width, h: self.piece_height }
    }

    pub fn is_blocked(&self, x: f64, y: f64) -> bool {
        let rect = self.piece_rect(x, y);
        rect.intersects(&self.board_guard) || rect.intersects(&self.logo_zone)
    }

    /// Overlap allowance between selected rail slots.
    pub fn strict_buffer(&self) -> f64 {
        (self.piece_width.min(self.piece_height) * 0.18).round().max(8.0)
    }

    /// Looser allowance used once the strict pass runs out of slots.
    pub fn relaxed_buffer(&self) -> f64 {
        (self.strict_buffer() * 0.55).round().max(4.0)
    }

    /// True when the two piece boxes overlap by more than `buffer` on both axes.
    pub fn overlaps(&self, a: Point, b: Point, buffer: f64) -> bool {
        !(a.x + self.piece_width - buffer <= b.x
            || b.x + self.piece_width - buffer <= a.x
            || a.y + self.piece_height - buffer <= b.y
            || b.y + self.piece_height - buffer <= a.y)
    }

    /// Rail candidates in generation order: left, right, below, above.
    pub fn candidate_slots(&self, layout: &Layout) -> Vec<Point> {
        let mut seen: HashSet<(i64, i64)> = HashSet::new();
        let mut slots = Vec::new();
        let mut add = |raw_x: f64, raw_y: f64| {
            let x = clamp(raw_x.round(), self.min_x, self.max_x);
            let y = clamp(raw_y.round(), self.reserved_top, self.max_y);
            if self.is_blocked(x, y) {
                return;
            }
            if seen.insert((x as i64, y as i64)) {
                slots.push(Point { x, y });
            }
        };

        let board_right = layout.board_x + layout.board_size;
        let board_bottom = layout.board_y + layout.board_size;

        // Left rails, closest to the board first.
        let mut x = layout.board_x - self.piece_width - SIDE_GAP;
        while x >= self.min_x {
            let mut y = self.reserved_top;
            while y <= self.max_y {
                add(x, y);
                y += self.y_step;
            }
            x -= self.x_step;
        }
        // Right rails.
        let mut x = board_right + SIDE_GAP;
        while x <= self.max_x {
            let mut y = self.reserved_top;
            while y <= self.max_y {
                add(x, y);
                y += self.y_step;
            }
            x += self.x_step;
        }
        // Below the board.
        let mut y = board_bottom + SIDE_GAP;
        while y <= self.max_y {
            let mut x = self.min_x;
            while x <= self.max_x {
                add(x, y);
                x += self.x_step;
            }
            y += self.y_step;
        }
        // Above the board, only while clear of the heads-up band.
        let mut y = layout.board_y - self.piece_height - SIDE_GAP;
        while y >= self.reserved_top {
            let mut x = self.min_x;
            while x <= self.max_x {
                add(x, y);
                x += self.x_step;
            }
            y -= self.y_step;
        }

        slots
    }
}

/// Produces `total` scatter positions for the pieces of `level`, in build order.
pub fn build_spawn_positions(layout: &Layout, level: u32, total: usize) -> Vec<Point> {
    let area = SpawnArea::from_layout(layout);
    let mut random = SeededRandom::new(spawn_seed(level, total));

    let mut slots = area.candidate_slots(layout);
    for i in (1..slots.len()).rev() {
        let j = random.index(i + 1);
        slots.swap(i, j);
    }

    let strict_buffer = area.strict_buffer();
    let relaxed_buffer = area.relaxed_buffer();

    let mut selected: Vec<Point> = Vec::with_capacity(total);
    for buffer in [strict_buffer, relaxed_buffer] {
        for slot in &slots {
            if selected.len() >= total {
                break;
            }
            if selected.iter().any(|placed| area.overlaps(*slot, *placed, buffer)) {
                continue;
            }
            selected.push(*slot);
        }
    }

    let mut attempts = 0;
    while selected.len() < total && attempts < total * RANDOM_ATTEMPTS_PER_PIECE {
        attempts += 1;
        let candidate = Point {
            x: random.between(area.min_x, area.max_x).round(),
            y: random.between(area.reserved_top, area.max_y).round(),
        };
        if area.is_blocked(candidate.x, candidate.y) {
            continue;
        }
        if selected.iter().any(|placed| area.overlaps(candidate, *placed, relaxed_buffer)) {
            continue;
        }
        selected.push(candidate);
    }

    if selected.len() < total {
        log::warn!(
            "spawn placement fell back to tiling for {} of {} pieces",
            total - selected.len(),
            total
        );
    }
    while selected.len() < total {
        let i = selected.len();
        selected.push(Point {
            x: clamp(area.min_x + (i % 2) as f64 * area.x_step, area.min_x, area.max_x),
            y: clamp(
                area.reserved_top + (i % 6) as f64 * 16.0f64.max(area.y_step * 0.68),
                area.reserved_top,
                area.max_y,
            ),
        });
    }

    selected
}
