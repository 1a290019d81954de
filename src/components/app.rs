use super::{hud::Hud, level_modal::LevelModal, puzzle_canvas::PuzzleCanvas};
use crate::audio::play_snap_sound;
use crate::levels::{level_config, max_level, theme_label};
use crate::model::{GameAction, GameState, GameStatus};
use crate::puzzle_image::{load_level_image, PuzzleImage};
use crate::settings::Settings;
use crate::state::piece::PieceId;
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    let game = use_reducer(|| GameState::new(max_level()));
    let settings = use_state(Settings::load);
    // Read by the engine's snap callback, which outlives any single render.
    let muted_flag = use_mut_ref(|| settings.muted);
    let image = use_state(|| None::<(u32, PuzzleImage)>);
    let requested_level = use_mut_ref(|| 0u32);

    // Persist settings & mirror mute into the flag
    {
        let muted_flag = muted_flag.clone();
        use_effect_with(*settings, move |settings| {
            *muted_flag.borrow_mut() = settings.muted;
            settings.save();
            || ()
        });
    }
    // Provision the raster for the current level
    {
        let image = image.clone();
        let requested_level = requested_level.clone();
        use_effect_with(game.current_level, move |level| {
            let level = *level;
            *requested_level.borrow_mut() = level;
            let on_ready = Callback::from(move |img: PuzzleImage| {
                // A slower load for an earlier level must not win.
                if *requested_level.borrow() == level {
                    image.set(Some((level, img)));
                }
            });
            load_level_image(level, on_ready);
            || ()
        });
    }

    let dispatch = |action: fn() -> GameAction| {
        let game = game.clone();
        Callback::from(move |_: ()| game.dispatch(action()))
    };
    let on_start = dispatch(|| GameAction::StartRun);
    let on_next = dispatch(|| GameAction::NextLevel);
    let on_replay = dispatch(|| GameAction::ReplayLevel);
    let on_restart_all = dispatch(|| GameAction::RestartAll);
    let on_level_complete = dispatch(|| GameAction::LevelComplete);
    let on_progress = {
        let game = game.clone();
        Callback::from(move |(snapped, total): (usize, usize)| {
            game.dispatch(GameAction::Progress { snapped, total })
        })
    };
    let on_snap = {
        let muted_flag = muted_flag.clone();
        Callback::from(move |id: PieceId| {
            log::debug!("piece {} snapped", id);
            play_snap_sound(*muted_flag.borrow());
        })
    };
    let on_toggle_mute = {
        let settings = settings.clone();
        Callback::from(move |_: ()| settings.set(settings.toggled_mute()))
    };

    let level = level_config(game.current_level);
    let canvas = match (&*image, game.status) {
        (_, GameStatus::Idle) => html! {},
        (Some((loaded, img)), _) if *loaded == game.current_level => html! {
            <PuzzleCanvas
                level={level}
                image={img.clone()}
                run_key={game.run_key}
                on_progress={on_progress}
                on_level_complete={on_level_complete}
                on_snap={on_snap}
            />
        },
        _ => html! {
            <div style="position:absolute; inset:0; display:flex; align-items:center; justify-content:center; font-weight:800; letter-spacing:0.1em;">{"LOADING"}</div>
        },
    };

    html! {
        <div style="position:fixed; inset:0; overflow:hidden; background:#eedc96; color:#070707; font-family:'Archivo Black', Impact, sans-serif; user-select:none;">
            { canvas }
            <div style="position:absolute; top:14px; left:18px; font-size:26px; font-weight:900; letter-spacing:0.04em; pointer-events:none;">{"PIECE OUT"}</div>
            <Hud
                theme_label={AttrValue::from(theme_label(level.snap_style))}
                level={game.current_level}
                max_level={game.max_level}
                progress={game.progress}
                muted={settings.muted}
                on_toggle_mute={on_toggle_mute}
                on_restart={on_restart_all.clone()}
            />
            <LevelModal
                status={game.status}
                current_level={game.current_level}
                on_start={on_start}
                on_next={on_next}
                on_replay={on_replay}
                on_restart_all={on_restart_all}
            />
        </div>
    }
}
