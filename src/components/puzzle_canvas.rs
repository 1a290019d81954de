use crate::canvas_host::PuzzleCanvasHandle;
use crate::engine::EngineCallbacks;
use crate::model::LevelConfig;
use crate::puzzle_image::PuzzleImage;
use crate::state::piece::PieceId;
use web_sys::HtmlCanvasElement;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct PuzzleCanvasProps {
    pub level: LevelConfig,
    pub image: PuzzleImage,
    /// Bumped on every start/replay so the same level can be rebuilt.
    pub run_key: u32,
    pub on_progress: Callback<(usize, usize)>,
    pub on_level_complete: Callback<()>,
    pub on_snap: Callback<PieceId>,
}

#[function_component(PuzzleCanvas)]
pub fn puzzle_canvas(props: &PuzzleCanvasProps) -> Html {
    let canvas_ref = use_node_ref();
    {
        let canvas_ref = canvas_ref.clone();
        let callbacks = EngineCallbacks {
            on_progress: Some(props.on_progress.clone()),
            on_level_complete: Some(props.on_level_complete.clone()),
            on_snap: Some(props.on_snap.clone()),
        };
        use_effect_with(
            (props.level, props.image.clone(), props.run_key),
            move |(level, image, _)| {
                let handle = canvas_ref.cast::<HtmlCanvasElement>().and_then(|canvas| {
                    match PuzzleCanvasHandle::mount(canvas, image.clone(), *level, callbacks) {
                        Ok(handle) => Some(handle),
                        Err(e) => {
                            log::error!("could not start level {}: {}", level.level, e);
                            None
                        }
                    }
                });
                move || {
                    if let Some(mut handle) = handle {
                        handle.destroy();
                    }
                }
            },
        );
    }
    html! {
        <canvas ref={canvas_ref} style="position:absolute; inset:0; width:100%; height:100%; display:block; touch-action:none;"></canvas>
    }
}
