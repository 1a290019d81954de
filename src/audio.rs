// Snap chirp through a lazily created, shared AudioContext.
use std::cell::RefCell;

use wasm_bindgen::JsValue;
use web_sys::{AudioContext, AudioContextState, OscillatorType};

thread_local! {
    static CONTEXT: RefCell<Option<AudioContext>> = const { RefCell::new(None) };
}

const START_HZ: f32 = 1040.0;
const END_HZ: f32 = 720.0;
const SWEEP_SECS: f64 = 0.1;
const PEAK_GAIN: f32 = 0.07;
const FLOOR_GAIN: f32 = 0.0001;
const ATTACK_SECS: f64 = 0.015;
const RELEASE_SECS: f64 = 0.12;

fn audio_available() -> bool {
    web_sys::window()
        .map(|w| js_sys::Reflect::has(&w, &JsValue::from_str("AudioContext")).unwrap_or(false))
        .unwrap_or(false)
}

fn shared_context() -> Option<AudioContext> {
    CONTEXT.with(|slot| {
        let mut slot = slot.borrow_mut();
        if slot.is_none() {
            if !audio_available() {
                return None;
            }
            match AudioContext::new() {
                Ok(ctx) => *slot = Some(ctx),
                Err(e) => {
                    log::warn!("audio unavailable: {:?}", e);
                    return None;
                }
            }
        }
        let ctx = slot.clone()?;
        // Browsers start contexts suspended until a user gesture.
        if ctx.state() == AudioContextState::Suspended {
            let _ = ctx.resume();
        }
        Some(ctx)
    })
}

pub fn play_snap_sound(muted: bool) {
    if muted {
        return;
    }
    let Some(ctx) = shared_context() else {
        return;
    };
    if let Err(e) = schedule_chirp(&ctx) {
        log::debug!("snap sound failed: {:?}", e);
    }
}

fn schedule_chirp(ctx: &AudioContext) -> Result<(), JsValue> {
    let start = ctx.current_time();
    let osc = ctx.create_oscillator()?;
    let gain = ctx.create_gain()?;

    osc.set_type(OscillatorType::Triangle);
    osc.frequency().set_value_at_time(START_HZ, start)?;
    osc.frequency().exponential_ramp_to_value_at_time(END_HZ, start + SWEEP_SECS)?;

    gain.gain().set_value_at_time(FLOOR_GAIN, start)?;
    gain.gain().exponential_ramp_to_value_at_time(PEAK_GAIN, start + ATTACK_SECS)?;
    gain.gain().exponential_ramp_to_value_at_time(FLOOR_GAIN, start + RELEASE_SECS)?;

    osc.connect_with_audio_node(&gain)?;
    gain.connect_with_audio_node(&ctx.destination())?;
    osc.start_with_when(start)?;
    osc.stop_with_when(start + RELEASE_SECS)?;
    Ok(())
}
