mod audio;
mod canvas_host;
mod components;
mod engine;
mod levels;
mod model;
mod puzzle_image;
mod render;
mod settings;
mod state;
mod util;

fn main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("piece out starting");
    yew::Renderer::<components::app::App>::new().render();
}
