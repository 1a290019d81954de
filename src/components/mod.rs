pub mod app;
pub mod hud;
pub mod level_modal;
pub mod puzzle_canvas;
