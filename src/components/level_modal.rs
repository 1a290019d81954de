use crate::model::GameStatus;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct LevelModalProps {
    pub status: GameStatus,
    pub current_level: u32,
    pub on_start: Callback<()>,
    pub on_next: Callback<()>,
    pub on_replay: Callback<()>,
    pub on_restart_all: Callback<()>,
}

const BUTTON: &str = "background:#24cfef; color:#070707; border:3px solid #070707; border-radius:10px; padding:10px 18px; font-size:15px; font-weight:800; letter-spacing:0.06em; cursor:pointer; box-shadow:4px 4px 0 #070707;";

fn emit(cb: &Callback<()>) -> Callback<MouseEvent> {
    let cb = cb.clone();
    Callback::from(move |_| cb.emit(()))
}

#[function_component(LevelModal)]
pub fn level_modal(props: &LevelModalProps) -> Html {
    let (title, subtitle, buttons) = match props.status {
        GameStatus::Playing => return html! {},
        GameStatus::Idle => (
            "ENTER FLOW MODE".to_string(),
            "DRAG EVERY PIECE ONTO THE BOARD".to_string(),
            html! { <button style={BUTTON} onclick={emit(&props.on_start)}>{"START RUN"}</button> },
        ),
        GameStatus::Completed => (
            "LEVEL COMPLETE".to_string(),
            format!("CLEAN SNAP ON LEVEL {}", props.current_level),
            html! {<>
                <button style={BUTTON} onclick={emit(&props.on_next)}>{"NEXT LEVEL"}</button>
                <button style={BUTTON} onclick={emit(&props.on_replay)}>{"REPLAY LEVEL"}</button>
            </>},
        ),
        GameStatus::Finished => (
            "ALL LEVELS DONE".to_string(),
            "FLOW SEQUENCE FINISHED".to_string(),
            html! { <button style={BUTTON} onclick={emit(&props.on_restart_all)}>{"REPLAY ALL"}</button> },
        ),
    };
    html! {
        <div style="position:absolute; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(7,7,7,0.35);">
            <div style="background:#f1f1f1; color:#070707; border:4px solid #070707; border-radius:16px; padding:28px 36px; max-width:440px; width:88%; box-shadow:8px 8px 0 #ff00a8; text-align:center; font-family:'Archivo Black', Impact, sans-serif;">
                <h2 style="margin:0 0 10px 0; font-size:28px; letter-spacing:0.04em;">{ title }</h2>
                <p style="margin:0 0 18px 0; font-size:13px; letter-spacing:0.08em; opacity:0.8;">{ subtitle }</p>
                <div style="display:flex; gap:12px; justify-content:center;">{ buttons }</div>
            </div>
        </div>
    }
}
