// Snap-into-place transition: eased interpolation toward the piece's target.
use crate::state::piece::{Piece, SnapAnimation};
use crate::util::{clamp, lerp};

pub const SNAP_DURATION_MS: f64 = 100.0;

pub fn ease_in_out_quad(progress: f64) -> f64 {
    if progress < 0.5 {
        2.0 * progress * progress
    } else {
        1.0 - (-2.0 * progress + 2.0).powi(2) / 2.0
    }
}

/// Starts a snap for `piece`. Returns false for pieces already snapped or animating.
pub fn start_snap(piece: &mut Piece, now: f64) -> bool {
    if piece.is_snapped || piece.snap_animation.is_some() {
        return false;
    }
    piece.snap_animation = Some(SnapAnimation {
        start_x: piece.x,
        start_y: piece.y,
        started_at: now,
        duration: SNAP_DURATION_MS,
    });
    piece.near_snap = false;
    true
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnapStep {
    /// No animation on this piece.
    Idle,
    Moving,
    /// The animation finished this frame and the piece is now snapped.
    Landed,
}

/// Advances the piece's snap animation to `timestamp`.
pub fn advance_snap(piece: &mut Piece, timestamp: f64) -> SnapStep {
    let Some(anim) = piece.snap_animation else {
        return SnapStep::Idle;
    };
    let progress = clamp((timestamp - anim.started_at) / anim.duration, 0.0, 1.0);
    let eased = ease_in_out_quad(progress);
    piece.x = lerp(anim.start_x, piece.target_x, eased);
    piece.y = lerp(anim.start_y, piece.target_y, eased);

    if progress < 1.0 {
        return SnapStep::Moving;
    }
    piece.snap_animation = None;
    if piece.is_snapped {
        return SnapStep::Moving;
    }
    piece.is_snapped = true;
    // Drop interpolation error.
    piece.pin_to_target();
    SnapStep::Landed
}
