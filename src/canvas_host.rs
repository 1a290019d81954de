//! Browser binding for [`PuzzleEngine`]: a `<canvas>` surface, the
//! `requestAnimationFrame` loop, and pointer/resize listeners.
//!
//! A [`PuzzleCanvasHandle`] owns one engine for one level; the canvas component
//! mounts a new handle whenever the level, run or image changes and destroys
//! the old one first.
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use thiserror::Error;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Event, EventTarget, HtmlCanvasElement, PointerEvent, Window};

use crate::engine::{EngineCallbacks, EngineHost, Frame, FrameHandle, PuzzleEngine};
use crate::model::LevelConfig;
use crate::puzzle_image::PuzzleImage;
use crate::render;
use crate::state::layout::{Layout, Viewport};

#[derive(Debug, Error, PartialEq)]
pub enum HostError {
    #[error("no global `window` available")]
    NoWindow,
    #[error("canvas has no 2d rendering context")]
    NoContext,
    #[error("puzzle image has zero size")]
    EmptyImage,
    #[error("failed to attach `{0}` listener")]
    Listener(&'static str),
}

type FrameClosure = Closure<dyn FnMut(f64)>;

pub struct CanvasSurface {
    window: Window,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    image: PuzzleImage,
    frame_callback: Rc<RefCell<Option<FrameClosure>>>,
}

impl EngineHost for CanvasSurface {
    fn configure_surface(&mut self, layout: &Layout) {
        // Resizing the backing store resets the context state.
        self.canvas.set_width(layout.backing_width);
        self.canvas.set_height(layout.backing_height);
        let dpr = layout.device_pixel_ratio;
        self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0).ok();
        self.ctx.set_image_smoothing_enabled(true);
    }

    fn request_frame(&mut self) -> Option<FrameHandle> {
        let callback = self.frame_callback.borrow();
        let callback = callback.as_ref()?;
        self.window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .ok()
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let _ = self.window.cancel_animation_frame(handle);
    }

    fn draw(&mut self, frame: &Frame<'_>) {
        render::draw_frame(&self.ctx, &self.image, frame);
    }

    fn detach(&mut self) {
        self.frame_callback.borrow_mut().take();
    }
}

type SharedEngine = Rc<RefCell<PuzzleEngine<CanvasSurface>>>;

struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

pub struct PuzzleCanvasHandle {
    engine: SharedEngine,
    listeners: Vec<Listener>,
}

impl PuzzleCanvasHandle {
    pub fn mount(
        canvas: HtmlCanvasElement,
        image: PuzzleImage,
        level: LevelConfig,
        callbacks: EngineCallbacks,
    ) -> Result<Self, HostError> {
        let window = web_sys::window().ok_or(HostError::NoWindow)?;
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or(HostError::NoContext)?;
        let raster = image.raster_size();
        if raster.width <= 0.0 || raster.height <= 0.0 {
            return Err(HostError::EmptyImage);
        }

        let frame_callback: Rc<RefCell<Option<FrameClosure>>> = Rc::new(RefCell::new(None));
        let surface = CanvasSurface {
            window: window.clone(),
            canvas: canvas.clone(),
            ctx,
            image,
            frame_callback: frame_callback.clone(),
        };
        let viewport = measure(&window, &canvas);
        let engine: SharedEngine = Rc::new(RefCell::new(PuzzleEngine::new(
            surface,
            viewport,
            raster,
            level,
            callbacks,
            now(&window),
        )));

        // Weak: the closure lives inside the engine's own host.
        let weak: Weak<RefCell<PuzzleEngine<CanvasSurface>>> = Rc::downgrade(&engine);
        *frame_callback.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
            if let Some(engine) = weak.upgrade() {
                if let Ok(mut engine) = engine.try_borrow_mut() {
                    engine.tick(timestamp);
                }
            }
        }) as Box<dyn FnMut(f64)>));

        let mut handle = Self { engine, listeners: Vec::new() };
        let canvas_target: EventTarget = canvas.clone().into();
        let window_target: EventTarget = window.clone().into();

        let pointer_down = {
            let engine = handle.engine.clone();
            let canvas = canvas.clone();
            Closure::wrap(Box::new(move |e: Event| {
                let Some(e) = e.dyn_ref::<PointerEvent>() else { return };
                let (x, y) = local_point(&canvas, e);
                let Ok(mut engine) = engine.try_borrow_mut() else { return };
                if engine.pointer_down(e.pointer_id(), x, y) {
                    let _ = canvas.set_pointer_capture(e.pointer_id());
                    e.prevent_default();
                }
            }) as Box<dyn FnMut(_)>)
        };
        handle.listen(&canvas_target, "pointerdown", pointer_down)?;

        let pointer_move = {
            let engine = handle.engine.clone();
            let canvas = canvas.clone();
            Closure::wrap(Box::new(move |e: Event| {
                let Some(e) = e.dyn_ref::<PointerEvent>() else { return };
                let (x, y) = local_point(&canvas, e);
                let Ok(mut engine) = engine.try_borrow_mut() else { return };
                if engine.pointer_move(e.pointer_id(), x, y) {
                    e.prevent_default();
                }
            }) as Box<dyn FnMut(_)>)
        };
        handle.listen(&canvas_target, "pointermove", pointer_move)?;

        for event in ["pointerup", "pointercancel"] {
            let release = {
                let engine = handle.engine.clone();
                let canvas = canvas.clone();
                let window = window.clone();
                Closure::wrap(Box::new(move |e: Event| {
                    let Some(e) = e.dyn_ref::<PointerEvent>() else { return };
                    let id = e.pointer_id();
                    let Ok(mut engine) = engine.try_borrow_mut() else { return };
                    // Capture is only released for the pointer that owns the drag.
                    if engine.pointer_up(id, now(&window)) {
                        if canvas.has_pointer_capture(id) {
                            let _ = canvas.release_pointer_capture(id);
                        }
                        e.prevent_default();
                    }
                }) as Box<dyn FnMut(_)>)
            };
            handle.listen(&canvas_target, event, release)?;
        }

        let resize = {
            let engine = handle.engine.clone();
            let canvas = canvas.clone();
            let window = window.clone();
            Closure::wrap(Box::new(move |_e: Event| {
                let viewport = measure(&window, &canvas);
                if let Ok(mut engine) = engine.try_borrow_mut() {
                    engine.resize(viewport);
                }
            }) as Box<dyn FnMut(_)>)
        };
        handle.listen(&window_target, "resize", resize)?;

        log::debug!(
            "mounted level {} on {}x{} canvas",
            level.level,
            viewport.width,
            viewport.height
        );
        Ok(handle)
    }

    fn listen(
        &mut self,
        target: &EventTarget,
        event: &'static str,
        callback: Closure<dyn FnMut(Event)>,
    ) -> Result<(), HostError> {
        target
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            .map_err(|_| HostError::Listener(event))?;
        self.listeners.push(Listener {
            target: target.clone(),
            event,
            callback,
        });
        Ok(())
    }

    pub fn engine(&self) -> &SharedEngine {
        &self.engine
    }

    /// Removes every listener and stops the engine. Safe to call repeatedly.
    pub fn destroy(&mut self) {
        for listener in self.listeners.drain(..) {
            let _ = listener.target.remove_event_listener_with_callback(
                listener.event,
                listener.callback.as_ref().unchecked_ref(),
            );
        }
        match self.engine.try_borrow_mut() {
            Ok(mut engine) => engine.destroy(),
            Err(_) => log::warn!("puzzle engine busy during teardown"),
        }
    }
}

impl Drop for PuzzleCanvasHandle {
    fn drop(&mut self) {
        self.destroy();
    }
}

fn measure(window: &Window, canvas: &HtmlCanvasElement) -> Viewport {
    let rect = canvas.get_bounding_client_rect();
    Viewport {
        width: rect.width(),
        height: rect.height(),
        device_pixel_ratio: window.device_pixel_ratio(),
    }
}

fn local_point(canvas: &HtmlCanvasElement, e: &PointerEvent) -> (f64, f64) {
    let rect = canvas.get_bounding_client_rect();
    (e.client_x() as f64 - rect.left(), e.client_y() as f64 - rect.top())
}

/// Same clock as the timestamps `requestAnimationFrame` passes to `tick`.
fn now(window: &Window) -> f64 {
    window.performance().map(|p| p.now()).unwrap_or(0.0)
}
