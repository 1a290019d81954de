// Canvas metrics and board geometry, recomputed on build and on every resize.
use crate::util::clamp;

pub const MIN_VIEWPORT: f64 = 320.0;
pub const MAX_DEVICE_PIXEL_RATIO: f64 = 2.0;
pub const BOARD_PADDING: f64 = 24.0;
pub const MIN_BOARD_SIZE: f64 = 220.0;

/// Displayed canvas bounds as reported by the host, in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub device_pixel_ratio: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Layout {
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub device_pixel_ratio: f64,
    /// Backing-store resolution in device pixels.
    pub backing_width: u32,
    pub backing_height: u32,
    pub board_x: f64,
    pub board_y: f64,
    pub board_size: f64,
    pub piece_width: f64,
    pub piece_height: f64,
}

impl Layout {
    pub fn compute(viewport: Viewport, rows: u32, cols: u32) -> Self {
        let viewport_width = positive_or(viewport.width, MIN_VIEWPORT).max(MIN_VIEWPORT);
        let viewport_height = positive_or(viewport.height, MIN_VIEWPORT).max(MIN_VIEWPORT);
        let dpr = positive_or(viewport.device_pixel_ratio, 1.0).min(MAX_DEVICE_PIXEL_RATIO);

        let max_board = viewport_width.min(viewport_height) - BOARD_PADDING * 2.0;
        let grid = rows.max(cols) as f64;
        // Bigger grids get a slightly smaller share of the screen.
        let base_scale = if viewport_width < 760.0 { 0.72 } else { 0.66 };
        let board_scale = clamp(base_scale - (grid - 3.0) * 0.04, 0.52, 0.74);
        let board_size = MIN_BOARD_SIZE.max(
            max_board.min((viewport_width * board_scale).min(viewport_height * board_scale)),
        );

        Self {
            viewport_width,
            viewport_height,
            device_pixel_ratio: dpr,
            backing_width: (viewport_width * dpr).round() as u32,
            backing_height: (viewport_height * dpr).round() as u32,
            board_x: (viewport_width - board_size) / 2.0,
            board_y: (viewport_height - board_size) / 2.0,
            board_size,
            piece_width: board_size / cols as f64,
            piece_height: board_size / rows as f64,
        }
    }

    pub fn target_for(&self, row: u32, col: u32) -> (f64, f64) {
        (
            self.board_x + col as f64 * self.piece_width,
            self.board_y + row as f64 * self.piece_height,
        )
    }

    /// Maps a point expressed against `previous`'s board onto this board.
    pub fn remap_from(&self, previous: &Layout, x: f64, y: f64) -> (f64, f64) {
        let old_size = previous.board_size.max(1.0);
        let rel_x = (x - previous.board_x) / old_size;
        let rel_y = (y - previous.board_y) / old_size;
        (self.board_x + rel_x * self.board_size, self.board_y + rel_y * self.board_size)
    }
}

fn positive_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value > 0.0 { value } else { fallback }
}
