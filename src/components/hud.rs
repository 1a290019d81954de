use crate::model::Progress;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct HudProps {
    pub theme_label: AttrValue,
    pub level: u32,
    pub max_level: u32,
    pub progress: Progress,
    pub muted: bool,
    pub on_toggle_mute: Callback<()>,
    pub on_restart: Callback<()>,
}

const PILL: &str = "background:#f1f1f1; color:#070707; border:3px solid #070707; border-radius:999px; padding:6px 14px; font-weight:800; letter-spacing:0.06em; box-shadow:4px 4px 0 #070707;";
const BUTTON: &str = "background:#ff00a8; color:#070707; border:3px solid #070707; border-radius:999px; padding:6px 14px; font-weight:800; letter-spacing:0.06em; cursor:pointer; box-shadow:4px 4px 0 #070707;";

#[function_component(Hud)]
pub fn hud(props: &HudProps) -> Html {
    let mute_cb = {
        let cb = props.on_toggle_mute.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let restart_cb = {
        let cb = props.on_restart.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {<div style="position:absolute; top:14px; left:0; right:0; display:flex; flex-wrap:wrap; justify-content:center; gap:10px; pointer-events:none; font-family:'Archivo Black', Impact, sans-serif; font-size:13px;">
        <span style={PILL}>{ props.theme_label.clone() }</span>
        <span style={PILL}>{ format!("LEVEL {} / {}", props.level, props.max_level) }</span>
        <span style={PILL}>{ format!("SNAPPED {} / {}", props.progress.snapped, props.progress.total) }</span>
        <button style={format!("{BUTTON} pointer-events:auto;")} onclick={mute_cb}>
            { if props.muted { "UNMUTE" } else { "MUTE" } }
        </button>
        <button style={format!("{BUTTON} pointer-events:auto;")} onclick={restart_cb}>{"RESTART"}</button>
    </div>}
}
