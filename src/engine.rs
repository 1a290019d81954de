//! Real-time puzzle engine: owns the pieces, the pointer drag state machine and the
//! demand-driven frame loop. Everything browser-specific sits behind [`EngineHost`].

use yew::Callback;

use crate::model::LevelConfig;
use crate::state::animation::{self, SnapStep};
use crate::state::drag::{self, ActiveDrag};
use crate::state::layout::{Layout, Viewport};
use crate::state::piece::{self, Piece, PieceId};
use crate::state::spawn;

pub type FrameHandle = i32;

/// Everything the engine needs from the surface it runs on.
pub trait EngineHost {
    /// Applies a fresh layout to the backing store (size and pixel-ratio transform).
    fn configure_surface(&mut self, layout: &Layout);
    /// Schedules one call to [`PuzzleEngine::tick`]. `None` if the host cannot.
    fn request_frame(&mut self) -> Option<FrameHandle>;
    fn cancel_frame(&mut self, handle: FrameHandle);
    fn draw(&mut self, frame: &Frame<'_>);
    /// Called once from [`PuzzleEngine::destroy`].
    fn detach(&mut self) {}
}

/// Read-only view handed to the host for one redraw.
pub struct Frame<'a> {
    pub layout: &'a Layout,
    pub level: &'a LevelConfig,
    pub pieces: &'a [Piece],
    pub timestamp: f64,
}

#[derive(Clone, Default)]
pub struct EngineCallbacks {
    /// `(snapped, total)`
    pub on_progress: Option<Callback<(usize, usize)>>,
    pub on_level_complete: Option<Callback<()>>,
    pub on_snap: Option<Callback<PieceId>>,
}

/// Pixel dimensions of the source raster.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RasterSize {
    pub width: f64,
    pub height: f64,
}

pub struct PuzzleEngine<H: EngineHost> {
    host: H,
    level: LevelConfig,
    raster: RasterSize,
    callbacks: EngineCallbacks,
    layout: Layout,
    /// Paint and hit-test order; the last piece is on top.
    pieces: Vec<Piece>,
    drag: Option<ActiveDrag>,
    frame: Option<FrameHandle>,
    is_running: bool,
    is_destroyed: bool,
    level_completed: bool,
}

impl<H: EngineHost> PuzzleEngine<H> {
    pub fn new(
        host: H,
        viewport: Viewport,
        raster: RasterSize,
        level: LevelConfig,
        callbacks: EngineCallbacks,
        now: f64,
    ) -> Self {
        let mut engine = Self {
            host,
            level,
            raster,
            callbacks,
            layout: Layout::default(),
            pieces: Vec::new(),
            drag: None,
            frame: None,
            is_running: false,
            is_destroyed: false,
            level_completed: false,
        };
        engine.refresh_metrics(viewport);
        engine.create_pieces();
        engine.emit_progress();
        engine.draw(now);
        engine
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// The piece being dragged, if any.
    pub fn active_piece(&self) -> Option<&Piece> {
        self.drag.and_then(|_| self.pieces.last())
    }

    pub fn active_pointer_id(&self) -> Option<i32> {
        self.drag.map(|d| d.pointer_id)
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn is_destroyed(&self) -> bool {
        self.is_destroyed
    }

    pub fn level_completed(&self) -> bool {
        self.level_completed
    }

    pub fn snapped_count(&self) -> usize {
        self.pieces.iter().filter(|p| p.is_snapped).count()
    }

    fn refresh_metrics(&mut self, viewport: Viewport) {
        self.layout = Layout::compute(viewport, self.level.rows, self.level.cols);
        self.host.configure_surface(&self.layout);
    }

    fn create_pieces(&mut self) {
        let rows = self.level.rows;
        let cols = self.level.cols;
        let source_width = self.raster.width / cols as f64;
        let source_height = self.raster.height / rows as f64;
        let total = self.level.total_pieces();
        let positions = spawn::build_spawn_positions(&self.layout, self.level.level, total);

        let mut pieces = Vec::with_capacity(total);
        for row in 0..rows {
            for col in 0..cols {
                let spawn = positions[pieces.len()];
                let (target_x, target_y) = self.layout.target_for(row, col);
                pieces.push(Piece {
                    id: PieceId { row, col },
                    row,
                    col,
                    sx: col as f64 * source_width,
                    sy: row as f64 * source_height,
                    sw: source_width,
                    sh: source_height,
                    x: spawn.x,
                    y: spawn.y,
                    target_x,
                    target_y,
                    scale: 1.0,
                    shadow_blur: 0.0,
                    near_snap: false,
                    width: self.layout.piece_width,
                    height: self.layout.piece_height,
                    is_snapped: false,
                    snap_animation: None,
                });
            }
        }

        log::debug!("built {} pieces for level {}", pieces.len(), self.level.level);
        self.pieces = pieces;
        self.level_completed = false;
    }

    /// Recomputes geometry for a new viewport and settles every piece onto it.
    pub fn resize(&mut self, viewport: Viewport) {
        if self.is_destroyed {
            return;
        }
        let previous = self.layout;
        self.refresh_metrics(viewport);
        let layout = self.layout;

        for piece in &mut self.pieces {
            let (target_x, target_y) = layout.target_for(piece.row, piece.col);
            piece.target_x = target_x;
            piece.target_y = target_y;
            piece.width = layout.piece_width;
            piece.height = layout.piece_height;

            if piece.is_snapped || piece.snap_animation.is_some() {
                piece.snap_animation = None;
                piece.pin_to_target();
                continue;
            }

            let (x, y) = layout.remap_from(&previous, piece.x, piece.y);
            (piece.x, piece.y) = drag::clamp_to_viewport(
                x,
                y,
                piece.width,
                piece.height,
                layout.viewport_width,
                layout.viewport_height,
            );
        }

        self.start_loop();
    }

    /// Returns true when the press picked up a piece (the host should capture the pointer).
    pub fn pointer_down(&mut self, pointer_id: i32, x: f64, y: f64) -> bool {
        if self.is_destroyed || self.level_completed || self.drag.is_some() {
            return false;
        }
        let Some(index) = drag::hit_test(&self.pieces, x, y) else {
            return false;
        };

        let piece = self.pieces.remove(index);
        self.pieces.push(piece);
        let Some(piece) = self.pieces.last_mut() else {
            return false;
        };

        self.drag = Some(ActiveDrag {
            pointer_id,
            offset_x: x - piece.x,
            offset_y: y - piece.y,
        });
        drag::lift(piece);

        self.start_loop();
        true
    }

    /// Returns true when the event belonged to the active drag.
    pub fn pointer_move(&mut self, pointer_id: i32, x: f64, y: f64) -> bool {
        if self.is_destroyed {
            return false;
        }
        let Some(active) = self.drag.filter(|d| d.pointer_id == pointer_id) else {
            return false;
        };
        let Some(piece) = self.pieces.last_mut() else {
            return false;
        };

        (piece.x, piece.y) = drag::clamp_to_viewport(
            x - active.offset_x,
            y - active.offset_y,
            piece.width,
            piece.height,
            self.layout.viewport_width,
            self.layout.viewport_height,
        );
        piece.near_snap = piece::is_within_snap_radius(piece, self.level.snap_radius);

        self.start_loop();
        true
    }

    /// Handles pointer-up and pointer-cancel alike. Returns true when the event
    /// ended the active drag (the host should release pointer capture).
    pub fn pointer_up(&mut self, pointer_id: i32, now: f64) -> bool {
        if self.is_destroyed {
            return false;
        }
        if self.drag.map(|d| d.pointer_id) != Some(pointer_id) {
            return false;
        }
        self.drag = None;

        if let Some(piece) = self.pieces.last_mut() {
            drag::settle(piece);
            if piece::is_within_snap_radius(piece, self.level.snap_radius) {
                animation::start_snap(piece, now);
            } else {
                piece.near_snap = false;
            }
        }

        self.start_loop();
        true
    }

    fn start_loop(&mut self) {
        if self.is_destroyed || self.is_running {
            return;
        }
        self.frame = self.host.request_frame();
        self.is_running = self.frame.is_some();
        if !self.is_running {
            log::warn!("host refused an animation frame");
        }
    }

    /// One frame: advance animations, redraw, then keep or stop the loop.
    pub fn tick(&mut self, timestamp: f64) {
        if self.is_destroyed {
            return;
        }
        self.frame = None;

        let animating = self.update_animations(timestamp);
        let has_motion = animating || self.drag.is_some();
        self.draw(timestamp);

        if has_motion && !self.is_destroyed {
            self.frame = self.host.request_frame();
            self.is_running = self.frame.is_some();
            return;
        }
        self.is_running = false;
    }

    fn update_animations(&mut self, timestamp: f64) -> bool {
        let mut any_active = false;
        // Each landing reports before the next piece advances.
        for index in 0..self.pieces.len() {
            match animation::advance_snap(&mut self.pieces[index], timestamp) {
                SnapStep::Idle => {}
                SnapStep::Moving => any_active = true,
                SnapStep::Landed => {
                    any_active = true;
                    let id = self.pieces[index].id;
                    if let Some(cb) = &self.callbacks.on_snap {
                        cb.emit(id);
                    }
                    self.emit_progress();
                    self.check_completion();
                }
            }
        }
        any_active
    }

    pub(crate) fn check_completion(&mut self) {
        if self.level_completed || self.is_destroyed {
            return;
        }
        if piece::all_pieces_snapped(&self.pieces) {
            self.level_completed = true;
            log::info!("level {} complete", self.level.level);
            if let Some(cb) = &self.callbacks.on_level_complete {
                cb.emit(());
            }
        }
    }

    fn emit_progress(&self) {
        if let Some(cb) = &self.callbacks.on_progress {
            cb.emit((self.snapped_count(), self.pieces.len()));
        }
    }

    fn draw(&mut self, timestamp: f64) {
        let frame = Frame {
            layout: &self.layout,
            level: &self.level,
            pieces: &self.pieces,
            timestamp,
        };
        self.host.draw(&frame);
    }

    /// Idempotent teardown: no callback fires and no frame is drawn afterwards.
    pub fn destroy(&mut self) {
        if self.is_destroyed {
            return;
        }
        self.is_destroyed = true;
        self.host.detach();
        if let Some(handle) = self.frame.take() {
            self.host.cancel_frame(handle);
        }
        self.is_running = false;
        self.drag = None;
        self.pieces.clear();
        log::debug!("puzzle engine for level {} destroyed", self.level.level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::level_config;
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::rc::Rc;

    #[derive(Default)]
    struct FakeHost {
        next_handle: i32,
        requests: usize,
        cancelled: Vec<FrameHandle>,
        draws: usize,
        configured: Vec<Layout>,
        detached: usize,
    }

    impl EngineHost for FakeHost {
        fn configure_surface(&mut self, layout: &Layout) {
            self.configured.push(*layout);
        }

        fn request_frame(&mut self) -> Option<FrameHandle> {
            self.requests += 1;
            self.next_handle += 1;
            Some(self.next_handle)
        }

        fn cancel_frame(&mut self, handle: FrameHandle) {
            self.cancelled.push(handle);
        }

        fn draw(&mut self, _frame: &Frame<'_>) {
            self.draws += 1;
        }

        fn detach(&mut self) {
            self.detached += 1;
        }
    }

    #[derive(Default, Clone)]
    struct Recorder {
        progress: Rc<RefCell<Vec<(usize, usize)>>>,
        completions: Rc<RefCell<usize>>,
        snaps: Rc<RefCell<Vec<PieceId>>>,
        events: Rc<RefCell<Vec<&'static str>>>,
    }

    impl Recorder {
        fn callbacks(&self) -> EngineCallbacks {
            let progress = self.progress.clone();
            let completions = self.completions.clone();
            let snaps = self.snaps.clone();
            let (on_progress_events, on_complete_events, on_snap_events) =
                (self.events.clone(), self.events.clone(), self.events.clone());
            EngineCallbacks {
                on_progress: Some(Callback::from(move |p| {
                    progress.borrow_mut().push(p);
                    on_progress_events.borrow_mut().push("progress");
                })),
                on_level_complete: Some(Callback::from(move |_| {
                    *completions.borrow_mut() += 1;
                    on_complete_events.borrow_mut().push("complete");
                })),
                on_snap: Some(Callback::from(move |id| {
                    snaps.borrow_mut().push(id);
                    on_snap_events.borrow_mut().push("snap");
                })),
            }
        }
    }

    const DESKTOP: Viewport = Viewport {
        width: 1920.0,
        height: 1080.0,
        device_pixel_ratio: 1.0,
    };

    fn engine(level: u32, recorder: &Recorder) -> PuzzleEngine<FakeHost> {
        PuzzleEngine::new(
            FakeHost::default(),
            DESKTOP,
            RasterSize { width: 900.0, height: 900.0 },
            level_config(level),
            recorder.callbacks(),
            0.0,
        )
    }

    fn center(piece: &Piece) -> (f64, f64) {
        (piece.x + piece.width / 2.0, piece.y + piece.height / 2.0)
    }

    /// Picks up whatever sits on top at `piece`'s center and releases it on its own target.
    fn release_topmost_on_target(engine: &mut PuzzleEngine<FakeHost>, piece: &Piece, now: f64) -> PieceId {
        let (px, py) = center(piece);
        assert!(engine.pointer_down(1, px, py));
        let active = engine.active_piece().cloned().unwrap();
        let (ox, oy) = (px - active.x, py - active.y);
        assert!(engine.pointer_move(1, active.target_x + ox, active.target_y + oy));
        assert!(engine.active_piece().unwrap().near_snap);
        assert!(engine.pointer_up(1, now));
        active.id
    }

    fn snap_topmost_at(engine: &mut PuzzleEngine<FakeHost>, piece: &Piece, now: f64) -> PieceId {
        let id = release_topmost_on_target(engine, piece, now);
        engine.tick(now + animation::SNAP_DURATION_MS);
        id
    }

    #[test]
    fn construction_builds_grid_and_reports_zero_progress() {
        let recorder = Recorder::default();
        let engine = engine(1, &recorder);
        assert_eq!(engine.pieces().len(), 9);
        assert_eq!(*recorder.progress.borrow(), vec![(0, 9)]);
        assert_eq!(engine.host().draws, 1);
        assert_eq!(engine.host().configured.len(), 1);
        assert!(!engine.is_running());

        let layout = *engine.layout();
        for piece in engine.pieces() {
            assert_eq!((piece.target_x, piece.target_y), layout.target_for(piece.row, piece.col));
            assert_eq!((piece.sw, piece.sh), (300.0, 300.0));
            assert_eq!((piece.sx, piece.sy), (piece.col as f64 * 300.0, piece.row as f64 * 300.0));
            assert!(!piece.is_snapped);
        }
        let ids: HashSet<String> = engine.pieces().iter().map(|p| p.id.to_string()).collect();
        assert_eq!(ids.len(), 9);
        assert!(ids.contains("2-1"));
    }

    #[test]
    fn rebuilding_with_same_inputs_reproduces_scatter() {
        let a = engine(2, &Recorder::default());
        let b = engine(2, &Recorder::default());
        let pos = |e: &PuzzleEngine<FakeHost>| e.pieces().iter().map(|p| (p.x, p.y)).collect::<Vec<_>>();
        assert_eq!(pos(&a), pos(&b));
    }

    #[test]
    fn dragging_near_target_and_releasing_snaps_exactly() {
        let recorder = Recorder::default();
        let mut engine = engine(1, &recorder);
        let top = engine.pieces().last().cloned().unwrap();
        let (px, py) = center(&top);

        assert!(engine.pointer_down(7, px, py));
        assert_eq!(engine.active_pointer_id(), Some(7));
        let active = engine.active_piece().unwrap();
        assert_eq!(active.id, top.id);
        assert_eq!(active.scale, drag::PICKUP_SCALE);

        // Leave the piece 14px right and 6px below its target.
        let (ox, oy) = (px - top.x, py - top.y);
        engine.pointer_move(7, top.target_x + 14.0 + ox, top.target_y + 6.0 + oy);
        let active = engine.active_piece().unwrap();
        assert!((piece::distance_to_target(active) - 15.23).abs() < 0.01);
        assert!(piece::is_within_snap_radius(active, 25.0));
        assert!(active.near_snap);

        assert!(engine.pointer_up(7, 1_000.0));
        assert_eq!(engine.active_pointer_id(), None);
        let landing = engine.pieces().last().unwrap();
        assert!(landing.snap_animation.is_some());
        assert_eq!(landing.scale, 1.0);

        engine.tick(1_050.0);
        assert!(!engine.pieces().last().unwrap().is_snapped);
        engine.tick(1_100.0);

        let snapped = engine.pieces().last().unwrap();
        assert!(snapped.is_snapped);
        assert_eq!((snapped.x, snapped.y), (snapped.target_x, snapped.target_y));
        assert_eq!(*recorder.snaps.borrow(), vec![top.id]);
        assert_eq!(recorder.progress.borrow().last(), Some(&(1, 9)));

        // Loop settles once nothing moves.
        engine.tick(1_116.0);
        assert!(!engine.is_running());
    }

    #[test]
    fn release_outside_radius_drops_piece_in_place() {
        let recorder = Recorder::default();
        let mut engine = engine(1, &recorder);
        let top = engine.pieces().last().cloned().unwrap();
        let (px, py) = center(&top);

        engine.pointer_down(1, px, py);
        engine.pointer_move(1, px + 5.0, py + 5.0);
        engine.pointer_up(1, 500.0);

        let dropped = engine.pieces().last().unwrap();
        assert!((dropped.x - (top.x + 5.0)).abs() < 1e-9);
        assert!((dropped.y - (top.y + 5.0)).abs() < 1e-9);
        assert!(dropped.snap_animation.is_none());
        assert!(!dropped.near_snap);
        assert!(!dropped.is_snapped);
        assert_eq!(dropped.scale, 1.0);
        assert_eq!(*recorder.progress.borrow(), vec![(0, 9)]);
    }

    #[test]
    fn pickup_moves_piece_to_top_of_paint_order() {
        let mut engine = engine(1, &Recorder::default());
        let bottom = engine.pieces()[0].clone();
        // Find a point on the bottom piece not covered by anything above it.
        let (px, py) = center(&bottom);
        let hit = drag::hit_test(engine.pieces(), px, py).unwrap();
        let expected = engine.pieces()[hit].id;

        engine.pointer_down(3, px, py);
        assert_eq!(engine.pieces().last().unwrap().id, expected);
        assert_eq!(engine.pieces().len(), 9);
    }

    #[test]
    fn other_pointers_are_ignored_while_dragging() {
        let mut engine = engine(1, &Recorder::default());
        let top = engine.pieces().last().cloned().unwrap();
        let (px, py) = center(&top);
        assert!(engine.pointer_down(1, px, py));

        assert!(!engine.pointer_down(2, px, py));
        assert!(!engine.pointer_move(2, px + 40.0, py + 40.0));
        assert_eq!(engine.active_piece().unwrap().x, top.x);
        assert!(!engine.pointer_up(2, 10.0));
        assert_eq!(engine.active_pointer_id(), Some(1));
        assert_eq!(engine.active_piece().unwrap().scale, drag::PICKUP_SCALE);

        assert!(engine.pointer_up(1, 10.0));
        assert!(!engine.pointer_up(1, 20.0));
    }

    #[test]
    fn drag_is_clamped_inside_viewport() {
        let mut engine = engine(1, &Recorder::default());
        let top = engine.pieces().last().cloned().unwrap();
        let (px, py) = center(&top);
        engine.pointer_down(1, px, py);
        engine.pointer_move(1, -500.0, 5_000.0);
        let piece = engine.active_piece().unwrap();
        assert_eq!(piece.x, drag::DRAG_MARGIN);
        assert_eq!(piece.y, DESKTOP.height - piece.height - drag::DRAG_MARGIN);
    }

    #[test]
    fn loop_runs_only_while_something_moves() {
        let mut engine = engine(1, &Recorder::default());
        assert_eq!(engine.host().requests, 0);

        let top = engine.pieces().last().cloned().unwrap();
        let (px, py) = center(&top);
        engine.pointer_down(1, px, py);
        assert_eq!(engine.host().requests, 1);
        assert!(engine.is_running());

        engine.pointer_move(1, px + 3.0, py);
        assert_eq!(engine.host().requests, 1);

        engine.tick(16.0);
        assert_eq!(engine.host().requests, 2);

        engine.pointer_up(1, 20.0);
        engine.tick(32.0);
        assert!(!engine.is_running());
        assert_eq!(engine.host().requests, 2);

        engine.resize(DESKTOP);
        assert_eq!(engine.host().requests, 3);
        assert!(engine.is_running());
    }

    #[test]
    fn completing_every_piece_fires_completion_once() {
        let recorder = Recorder::default();
        let mut engine = engine(1, &recorder);
        let mut now = 1_000.0;
        while engine.snapped_count() < 9 {
            let candidate = engine.pieces().iter().find(|p| !p.is_snapped).cloned().unwrap();
            snap_topmost_at(&mut engine, &candidate, now);
            now += 500.0;
        }

        assert!(engine.level_completed());
        assert_eq!(*recorder.completions.borrow(), 1);
        assert_eq!(recorder.snaps.borrow().len(), 9);

        let progress = recorder.progress.borrow().clone();
        assert_eq!(progress.len(), 10);
        assert!(progress.windows(2).all(|w| w[0].0 <= w[1].0));
        assert!(progress.iter().all(|&(_, total)| total == 9));
        assert_eq!(progress.last(), Some(&(9, 9)));

        engine.check_completion();
        assert_eq!(*recorder.completions.borrow(), 1);

        let first = engine.pieces()[0].clone();
        assert!(!engine.pointer_down(1, first.x + 1.0, first.y + 1.0));
    }

    #[test]
    fn snaps_landing_in_one_frame_report_in_order() {
        let recorder = Recorder::default();
        let mut engine = engine(1, &recorder);
        let mut now = 1_000.0;
        while engine.snapped_count() < 7 {
            let candidate = engine.pieces().iter().find(|p| !p.is_snapped).cloned().unwrap();
            snap_topmost_at(&mut engine, &candidate, now);
            now += 500.0;
        }
        recorder.progress.borrow_mut().clear();
        recorder.events.borrow_mut().clear();

        let first = engine.pieces().iter().find(|p| !p.is_snapped).cloned().unwrap();
        let first_id = release_topmost_on_target(&mut engine, &first, now);
        let second = engine
            .pieces()
            .iter()
            .find(|p| !p.is_snapped && p.snap_animation.is_none())
            .cloned()
            .unwrap();
        let second_id = release_topmost_on_target(&mut engine, &second, now + 10.0);
        assert_ne!(first_id, second_id);
        assert!(recorder.progress.borrow().is_empty());

        engine.tick(now + 200.0);
        assert_eq!(*recorder.progress.borrow(), vec![(8, 9), (9, 9)]);
        assert_eq!(
            *recorder.events.borrow(),
            vec!["snap", "progress", "snap", "progress", "complete"]
        );
        assert_eq!(*recorder.completions.borrow(), 1);
    }

    #[test]
    fn resize_pins_settled_pieces_and_remaps_free_ones() {
        let recorder = Recorder::default();
        let mut engine = engine(1, &recorder);
        let topmost = engine.pieces().last().cloned().unwrap();
        let snapped_id = snap_topmost_at(&mut engine, &topmost, 100.0);

        // Start another snap and resize mid-flight.
        let next = engine.pieces().iter().find(|p| !p.is_snapped).cloned().unwrap();
        let (px, py) = center(&next);
        engine.pointer_down(1, px, py);
        let animating = engine.active_piece().cloned().unwrap();
        let (ox, oy) = (px - animating.x, py - animating.y);
        engine.pointer_move(1, animating.target_x + ox + 3.0, animating.target_y + oy);
        engine.pointer_up(1, 2_000.0);

        let free_before: Vec<Piece> = engine
            .pieces()
            .iter()
            .filter(|p| !p.is_snapped && p.snap_animation.is_none())
            .cloned()
            .collect();
        let old_layout = *engine.layout();

        let smaller = Viewport { width: 1280.0, height: 800.0, device_pixel_ratio: 2.0 };
        engine.resize(smaller);
        let layout = *engine.layout();
        assert_eq!(engine.host().configured.last(), Some(&layout));
        assert_eq!(layout.backing_width, 2560);

        for piece in engine.pieces() {
            assert_eq!((piece.target_x, piece.target_y), layout.target_for(piece.row, piece.col));
            assert_eq!(piece.width, layout.piece_width);
            if piece.id == snapped_id || piece.id == animating.id {
                assert_eq!((piece.x, piece.y), (piece.target_x, piece.target_y));
                assert!(piece.snap_animation.is_none());
            }
        }
        // The interrupted snap never completed.
        assert!(!engine.pieces().iter().find(|p| p.id == animating.id).unwrap().is_snapped);

        for before in free_before {
            let after = engine.pieces().iter().find(|p| p.id == before.id).unwrap();
            let (rx, ry) = layout.remap_from(&old_layout, before.x, before.y);
            let (cx, cy) = drag::clamp_to_viewport(rx, ry, after.width, after.height, 1280.0, 800.0);
            assert_eq!((after.x, after.y), (cx, cy));
        }
    }

    #[test]
    fn destroy_mid_drag_is_idempotent_and_silent() {
        let recorder = Recorder::default();
        let mut engine = engine(1, &recorder);
        let top = engine.pieces().last().cloned().unwrap();
        let (px, py) = center(&top);
        engine.pointer_down(4, px, py);
        let pending = engine.host().next_handle;

        engine.destroy();
        engine.destroy();
        assert!(engine.is_destroyed());
        assert!(engine.pieces().is_empty());
        assert_eq!(engine.active_pointer_id(), None);
        assert_eq!(engine.host().cancelled, vec![pending]);
        assert_eq!(engine.host().detached, 1);

        let draws = engine.host().draws;
        let requests = engine.host().requests;
        engine.tick(50.0);
        engine.resize(DESKTOP);
        assert!(!engine.pointer_down(4, px, py));
        assert!(!engine.pointer_move(4, px, py));
        assert!(!engine.pointer_up(4, 60.0));
        engine.check_completion();

        assert_eq!(engine.host().draws, draws);
        assert_eq!(engine.host().requests, requests);
        assert_eq!(*recorder.progress.borrow(), vec![(0, 9)]);
        assert_eq!(*recorder.completions.borrow(), 0);
    }
}
