// Raster provisioning: a level photo when one loads, otherwise a seeded poster
// drawn onto an offscreen canvas. The engine only needs non-zero dimensions.
use std::f64::consts::PI;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};
use yew::Callback;

use crate::engine::RasterSize;
use crate::levels::level_config;
use crate::model::LevelConfig;
use crate::util::SeededRandom;

pub const GENERATED_SIZE: u32 = 920;

const LEVEL_PHOTOS: [(u32, &str); 3] = [
    (1, "assets/monalisa.jpeg"),
    (2, "assets/starrynight.jpg"),
    (3, "assets/tinkerspace.jpeg"),
];

const PINK: &str = "#ff00a8";
const CYAN: &str = "#24cfef";
const CREAM: &str = "#eedc96";
const PAPER: &str = "#f1f1f1";
const BLACK: &str = "#070707";

#[derive(Clone, Debug, PartialEq)]
pub enum PuzzleImage {
    Photo(HtmlImageElement),
    Generated(HtmlCanvasElement),
}

impl PuzzleImage {
    pub fn raster_size(&self) -> RasterSize {
        let (width, height) = match self {
            PuzzleImage::Photo(img) => (img.natural_width(), img.natural_height()),
            PuzzleImage::Generated(canvas) => (canvas.width(), canvas.height()),
        };
        RasterSize {
            width: width as f64,
            height: height as f64,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn draw_slice(
        &self,
        ctx: &CanvasRenderingContext2d,
        sx: f64,
        sy: f64,
        sw: f64,
        sh: f64,
        dx: f64,
        dy: f64,
        dw: f64,
        dh: f64,
    ) -> Result<(), JsValue> {
        match self {
            PuzzleImage::Photo(img) => ctx
                .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                    img, sx, sy, sw, sh, dx, dy, dw, dh,
                ),
            PuzzleImage::Generated(canvas) => ctx
                .draw_image_with_html_canvas_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                    canvas, sx, sy, sw, sh, dx, dy, dw, dh,
                ),
        }
    }
}

pub fn photo_source(level: u32) -> Option<&'static str> {
    LEVEL_PHOTOS
        .iter()
        .find(|(n, _)| *n == level)
        .map(|(_, src)| *src)
}

pub fn poster_seed(level: &LevelConfig) -> u32 {
    level.level * 131 + level.rows * 37 + level.cols * 17
}

/// Resolves the raster for `level` and hands it to `on_ready` exactly once.
pub fn load_level_image(level: u32, on_ready: Callback<PuzzleImage>) {
    let Some(src) = photo_source(level) else {
        emit_generated(level, &on_ready);
        return;
    };
    let img = match HtmlImageElement::new() {
        Ok(img) => img,
        Err(e) => {
            log::warn!("image element unavailable: {:?}", e);
            emit_generated(level, &on_ready);
            return;
        }
    };

    let onload = {
        let img = img.clone();
        let on_ready = on_ready.clone();
        Closure::once_into_js(move || {
            if img.natural_width() == 0 || img.natural_height() == 0 {
                emit_generated(level, &on_ready);
            } else {
                on_ready.emit(PuzzleImage::Photo(img));
            }
        })
    };
    let onerror = Closure::once_into_js(move || {
        log::info!("photo for level {} unavailable, using generated poster", level);
        emit_generated(level, &on_ready);
    });
    img.set_onload(Some(onload.unchecked_ref()));
    img.set_onerror(Some(onerror.unchecked_ref()));
    img.set_src(src);
}

fn emit_generated(level: u32, on_ready: &Callback<PuzzleImage>) {
    match generate_poster(&level_config(level), GENERATED_SIZE) {
        Ok(canvas) => on_ready.emit(PuzzleImage::Generated(canvas)),
        Err(e) => log::error!("failed to generate puzzle image: {:?}", e),
    }
}

pub fn generate_poster(level: &LevelConfig, size: u32) -> Result<HtmlCanvasElement, JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
    canvas.set_width(size);
    canvas.set_height(size);
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into()?;

    let s = size as f64;
    let mut random = SeededRandom::new(poster_seed(level));

    ctx.set_fill_style_str(PAPER);
    ctx.fill_rect(0.0, 0.0, s, s);

    // Sunburst.
    let rays = 22 + level.level * 2;
    ctx.save();
    ctx.translate(s * 0.5, s * 0.5)?;
    ctx.rotate(level.level as f64 * PI / 14.0)?;
    for i in 0..rays {
        let start = i as f64 / rays as f64 * PI * 2.0;
        let end = (i + 1) as f64 / rays as f64 * PI * 2.0;
        ctx.begin_path();
        ctx.move_to(0.0, 0.0);
        ctx.arc(0.0, 0.0, s * 1.05, start, end)?;
        ctx.close_path();
        ctx.set_fill_style_str(if i % 2 == 0 { PINK } else { PAPER });
        ctx.fill();
    }
    ctx.restore();

    // Tilted cards.
    let palette = [CREAM, CYAN, PAPER, PINK];
    for _ in 0..(7 + level.level * 2) {
        let w = s * (0.13 + random.next_f64() * 0.2);
        let h = s * (0.08 + random.next_f64() * 0.16);
        let x = random.next_f64() * (s - w);
        let y = random.next_f64() * (s - h);
        let rotation = (-5.0 + random.next_f64() * 10.0).to_radians();

        ctx.save();
        ctx.translate(x + w / 2.0, y + h / 2.0)?;
        ctx.rotate(rotation)?;
        ctx.set_fill_style_str(palette[random.index(palette.len())]);
        ctx.fill_rect(-w / 2.0, -h / 2.0, w, h);
        ctx.set_stroke_style_str(BLACK);
        ctx.set_line_width(5.0);
        ctx.stroke_rect(-w / 2.0, -h / 2.0, w, h);
        ctx.restore();
    }

    // Level banner.
    ctx.save();
    ctx.set_fill_style_str(PINK);
    ctx.fill_rect(s * 0.17, s * 0.75, s * 0.66, s * 0.14);
    ctx.set_stroke_style_str(BLACK);
    ctx.set_line_width(8.0);
    ctx.stroke_rect(s * 0.17, s * 0.75, s * 0.66, s * 0.14);
    ctx.set_fill_style_str(BLACK);
    ctx.set_font(&format!("700 {}px \"Archivo Black\", Impact, sans-serif", (s * 0.055).round()));
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.fill_text(&format!("LEVEL {:02}", level.level), s * 0.5, s * 0.82)?;
    ctx.restore();

    // Offset title with two color shadows.
    ctx.save();
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.set_font(&format!("700 {}px \"Archivo Black\", Impact, sans-serif", (s * 0.2).round()));
    for (color, offset) in [(CYAN, 0.01), (PINK, 0.005), (BLACK, 0.0)] {
        ctx.set_fill_style_str(color);
        ctx.fill_text("FLOW", s * (0.505 + offset), s * (0.35 + offset))?;
    }
    ctx.restore();

    ctx.set_stroke_style_str("rgba(7, 7, 7, 0.25)");
    ctx.set_line_width(2.0);
    for i in 1..12 {
        let y = s / 12.0 * i as f64;
        ctx.begin_path();
        ctx.move_to(0.0, y);
        ctx.line_to(s, y);
        ctx.stroke();
    }

    Ok(canvas)
}
