// Piece entity owned by the puzzle engine, plus the pure snap helpers.
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PieceId {
    pub row: u32,
    pub col: u32,
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.row, self.col)
    }
}

/// In-flight snap-into-place transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapAnimation {
    pub start_x: f64,
    pub start_y: f64,
    /// Frame-clock timestamp (ms) when the piece was released.
    pub started_at: f64,
    pub duration: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PiecePhase {
    Free,
    Dragging,
    Snapping,
    Snapped,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Piece {
    pub id: PieceId,
    pub row: u32,
    pub col: u32,
    /// Source rect into the raster, one cell of the grid.
    pub sx: f64,
    pub sy: f64,
    pub sw: f64,
    pub sh: f64,
    pub x: f64,
    pub y: f64,
    pub target_x: f64,
    pub target_y: f64,
    /// 1.0 at rest, enlarged while lifted.
    pub scale: f64,
    pub shadow_blur: f64,
    pub near_snap: bool,
    pub width: f64,
    pub height: f64,
    /// Monotonic: never reverts once set.
    pub is_snapped: bool,
    pub snap_animation: Option<SnapAnimation>,
}

impl Piece {
    pub fn phase(&self) -> PiecePhase {
        if self.is_snapped {
            PiecePhase::Snapped
        } else if self.snap_animation.is_some() {
            PiecePhase::Snapping
        } else if self.scale > 1.0 {
            PiecePhase::Dragging
        } else {
            PiecePhase::Free
        }
    }

    /// Bounding box as drawn: the scaled size centered on the unscaled box.
    pub fn draw_rect(&self) -> (f64, f64, f64, f64) {
        let w = self.width * self.scale;
        let h = self.height * self.scale;
        (self.x - (w - self.width) / 2.0, self.y - (h - self.height) / 2.0, w, h)
    }

    pub fn contains(&self, px: f64, py: f64) -> bool {
        let (x, y, w, h) = self.draw_rect();
        px >= x && px <= x + w && py >= y && py <= y + h
    }

    pub(crate) fn pin_to_target(&mut self) {
        self.x = self.target_x;
        self.y = self.target_y;
    }
}

/// Euclidean distance between the piece's current and target positions.
pub fn distance_to_target(piece: &Piece) -> f64 {
    (piece.x - piece.target_x).hypot(piece.y - piece.target_y)
}

/// Strict: a piece exactly `radius` away is not within the radius.
pub fn is_within_snap_radius(piece: &Piece, radius: f64) -> bool {
    distance_to_target(piece) < radius
}

/// An empty collection is never complete.
pub fn all_pieces_snapped(pieces: &[Piece]) -> bool {
    !pieces.is_empty() && pieces.iter().all(|p| p.is_snapped)
}

#[cfg(test)]
pub(crate) fn sample_piece(x: f64, y: f64, target_x: f64, target_y: f64) -> Piece {
    Piece {
        id: PieceId { row: 0, col: 0 },
        row: 0,
        col: 0,
        sx: 0.0,
        sy: 0.0,
        sw: 100.0,
        sh: 100.0,
        x,
        y,
        target_x,
        target_y,
        scale: 1.0,
        shadow_blur: 0.0,
        near_snap: false,
        width: 50.0,
        height: 50.0,
        is_snapped: false,
        snap_animation: None,
    }
}
