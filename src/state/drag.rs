// Pointer drag state and the geometric helpers the engine's pointer handlers use.
use crate::state::piece::Piece;
use crate::util::clamp;

pub const PICKUP_SCALE: f64 = 1.05;
pub const PICKUP_SHADOW: f64 = 15.0;
/// Margin kept between a dragged piece and every viewport edge.
pub const DRAG_MARGIN: f64 = 8.0;

/// The one in-flight drag. Its piece is always the topmost entry of the piece list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActiveDrag {
    pub pointer_id: i32,
    pub offset_x: f64,
    pub offset_y: f64,
}

/// Topmost unsnapped piece under the point, by index into `pieces`.
pub fn hit_test(pieces: &[Piece], x: f64, y: f64) -> Option<usize> {
    pieces
        .iter()
        .enumerate()
        .rev()
        .find(|(_, piece)| !piece.is_snapped && piece.contains(x, y))
        .map(|(index, _)| index)
}

/// Keeps a `width`×`height` box at least [`DRAG_MARGIN`] inside the viewport.
pub fn clamp_to_viewport(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    viewport_width: f64,
    viewport_height: f64,
) -> (f64, f64) {
    (
        clamp(x, DRAG_MARGIN, viewport_width - width - DRAG_MARGIN),
        clamp(y, DRAG_MARGIN, viewport_height - height - DRAG_MARGIN),
    )
}

pub fn lift(piece: &mut Piece) {
    piece.scale = PICKUP_SCALE;
    piece.shadow_blur = PICKUP_SHADOW;
}

pub fn settle(piece: &mut Piece) {
    piece.scale = 1.0;
    piece.shadow_blur = 0.0;
}
