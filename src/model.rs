//! Core data models for Piece Out.
//! Level configuration consumed by the puzzle engine and the run-level game state
//! driven by the app shell.

use serde::{Deserialize, Serialize};
use std::rc::Rc;
use yew::Reducible;

/// Cosmetic treatment applied to snapped pieces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SnapStyle {
    /// Steady pink glow.
    HighGlow,
    /// Steady cyan glow.
    StandardGlow,
    /// Pulsing cream highlight (board overlay pulses too).
    Pulse,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelConfig {
    pub level: u32,
    pub rows: u32,
    pub cols: u32,
    /// Release distance (CSS px) under which a piece snaps to its target.
    pub snap_radius: f64,
    pub snap_style: SnapStyle,
}

impl LevelConfig {
    pub fn total_pieces(&self) -> usize {
        (self.rows * self.cols) as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Idle,
    Playing,
    Completed,
    Finished,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Progress {
    pub snapped: usize,
    pub total: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub status: GameStatus,
    pub current_level: u32,
    pub max_level: u32,
    pub progress: Progress,
    /// Bumped whenever a fresh engine must be built for the current level.
    pub run_key: u32,
}

impl GameState {
    pub fn new(max_level: u32) -> Self {
        Self {
            status: GameStatus::Idle,
            current_level: 1,
            max_level,
            progress: Progress::default(),
            run_key: 0,
        }
    }

    fn restart_level(&mut self, level: u32) {
        self.current_level = level;
        self.status = GameStatus::Playing;
        self.progress = Progress::default();
        self.run_key = self.run_key.wrapping_add(1);
    }
}

// ---------------- Reducer & Actions -----------------
#[derive(Clone, Debug)]
pub enum GameAction {
    StartRun,
    Progress { snapped: usize, total: usize },
    LevelComplete,
    NextLevel,
    ReplayLevel,
    RestartAll,
}

impl Reducible for GameState {
    type Action = GameAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut new = (*self).clone();
        match action {
            GameAction::StartRun | GameAction::RestartAll => new.restart_level(1),
            GameAction::Progress { snapped, total } => {
                let progress = Progress { snapped, total };
                if new.progress == progress {
                    return self;
                }
                new.progress = progress;
            }
            GameAction::LevelComplete => {
                if new.status != GameStatus::Playing {
                    return self;
                }
                new.status = if new.current_level >= new.max_level {
                    GameStatus::Finished
                } else {
                    GameStatus::Completed
                };
            }
            GameAction::NextLevel => {
                if new.status != GameStatus::Completed {
                    return self;
                }
                let next = (new.current_level + 1).min(new.max_level);
                new.restart_level(next);
            }
            GameAction::ReplayLevel => {
                let level = new.current_level;
                new.restart_level(level);
            }
        }
        Rc::new(new)
    }
}
