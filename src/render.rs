// Canvas 2D drawing of one engine frame: board, grid, then pieces in paint order.
use web_sys::CanvasRenderingContext2d;

use crate::engine::Frame;
use crate::model::{LevelConfig, SnapStyle};
use crate::puzzle_image::PuzzleImage;
use crate::state::layout::Layout;
use crate::state::piece::{Piece, PiecePhase};

const BOARD_FILL: &str = "rgba(241, 241, 241, 0.75)";
const GRID_STROKE: &str = "rgba(7, 7, 7, 0.28)";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glow {
    pub color: &'static str,
    pub blur: f64,
}

/// Halo for a piece at `timestamp`, or `None` when it is drawn flat.
pub fn glow_for(piece: &Piece, style: SnapStyle, timestamp: f64) -> Option<Glow> {
    // The near-snap hint outranks the pickup shadow.
    if piece.near_snap && !piece.is_snapped {
        return Some(Glow { color: "rgba(36, 207, 239, 0.72)", blur: 14.0 });
    }
    if piece.shadow_blur > 0.0 {
        return Some(Glow { color: "rgba(255, 0, 168, 0.62)", blur: piece.shadow_blur });
    }
    if !piece.is_snapped {
        return None;
    }
    Some(match style {
        SnapStyle::HighGlow => Glow { color: "rgba(255, 0, 168, 0.54)", blur: 18.0 },
        SnapStyle::StandardGlow => Glow { color: "rgba(36, 207, 239, 0.54)", blur: 12.0 },
        SnapStyle::Pulse => Glow {
            color: "rgba(238, 220, 150, 0.65)",
            blur: 7.0 + wave(timestamp, 220.0) * 6.0,
        },
    })
}

/// Alpha of the pink wash over the board on pulse levels, in `[0.08, 0.16]`.
pub fn board_pulse_alpha(timestamp: f64) -> f64 {
    0.08 + wave(timestamp, 200.0) * 0.08
}

pub fn outline_alpha(piece: &Piece) -> f64 {
    if piece.phase() == PiecePhase::Snapped { 0.88 } else { 0.35 }
}

// 0..1 sine over `period` ms.
fn wave(timestamp: f64, period: f64) -> f64 {
    ((timestamp / period).sin() + 1.0) / 2.0
}

pub fn draw_frame(ctx: &CanvasRenderingContext2d, image: &PuzzleImage, frame: &Frame<'_>) {
    let layout = frame.layout;
    let dpr = layout.device_pixel_ratio;
    if let Err(e) = ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0) {
        log::debug!("set_transform failed: {:?}", e);
    }
    ctx.set_image_smoothing_enabled(true);
    ctx.clear_rect(0.0, 0.0, layout.viewport_width, layout.viewport_height);

    draw_board(ctx, layout, frame.level, frame.timestamp);
    for piece in frame.pieces {
        draw_piece(ctx, image, piece, frame.level.snap_style, frame.timestamp);
    }
}

fn draw_board(ctx: &CanvasRenderingContext2d, layout: &Layout, level: &LevelConfig, timestamp: f64) {
    let (bx, by, size) = (layout.board_x, layout.board_y, layout.board_size);

    ctx.save();
    ctx.set_fill_style_str(BOARD_FILL);
    ctx.fill_rect(bx, by, size, size);

    ctx.set_stroke_style_str(GRID_STROKE);
    ctx.set_line_width(1.0);
    ctx.begin_path();
    for col in 0..=level.cols {
        let x = bx + col as f64 * layout.piece_width;
        ctx.move_to(x, by);
        ctx.line_to(x, by + size);
    }
    for row in 0..=level.rows {
        let y = by + row as f64 * layout.piece_height;
        ctx.move_to(bx, y);
        ctx.line_to(bx + size, y);
    }
    ctx.stroke();

    if level.snap_style == SnapStyle::Pulse {
        ctx.set_fill_style_str(&format!("rgba(255, 0, 168, {:.3})", board_pulse_alpha(timestamp)));
        ctx.fill_rect(bx, by, size, size);
    }
    ctx.restore();
}

fn draw_piece(
    ctx: &CanvasRenderingContext2d,
    image: &PuzzleImage,
    piece: &Piece,
    style: SnapStyle,
    timestamp: f64,
) {
    let (x, y, w, h) = piece.draw_rect();

    ctx.save();
    if let Some(glow) = glow_for(piece, style, timestamp) {
        ctx.set_shadow_color(glow.color);
        ctx.set_shadow_blur(glow.blur);
    }
    if let Err(e) = image.draw_slice(ctx, piece.sx, piece.sy, piece.sw, piece.sh, x, y, w, h) {
        log::debug!("draw_image failed for piece {}: {:?}", piece.id, e);
    }
    ctx.set_shadow_blur(0.0);
    ctx.set_stroke_style_str(&format!("rgba(7, 7, 7, {})", outline_alpha(piece)));
    ctx.set_line_width(1.0);
    ctx.stroke_rect(x + 0.5, y + 0.5, w - 1.0, h - 1.0);
    ctx.restore();
}
