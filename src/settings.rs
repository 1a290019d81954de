// Player preferences persisted across sessions.
use serde::{Deserialize, Serialize};

pub const STORAGE_KEY: &str = "pieceout_settings";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub muted: bool,
}

impl Settings {
    /// Unreadable or missing entries yield the defaults.
    pub fn from_json(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_default()
    }

    pub fn load() -> Self {
        if let Some(win) = web_sys::window() {
            if let Ok(Some(store)) = win.local_storage() {
                if let Ok(Some(raw)) = store.get_item(STORAGE_KEY) {
                    return Self::from_json(&raw);
                }
            }
        }
        Self::default()
    }

    pub fn save(&self) {
        if let Some(win) = web_sys::window() {
            if let Ok(Some(store)) = win.local_storage() {
                if let Ok(s) = serde_json::to_string(self) {
                    let _ = store.set_item(STORAGE_KEY, &s);
                }
            }
        }
    }

    pub fn toggled_mute(self) -> Self {
        Self { muted: !self.muted }
    }
}
