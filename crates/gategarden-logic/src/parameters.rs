//! Trial tuning parameters.
//!
//! A remote service may supply these; when it is disabled, unreachable or
//! returns something unreadable, the built-in fallback values apply.

use serde::{Deserialize, Serialize};

/// Fallback fish trial length in seconds.
pub const FISH_TIME_LIMIT: u32 = 60;
pub const MIN_FISH_SPEED: u32 = 200;
pub const MAX_FISH_SPEED: u32 = 400;
/// Good fish needed to win.
pub const FISHES_NEEDED: u32 = 5;
/// Fallback search trial length in seconds.
pub const PUZZLE_TIME_LIMIT: u32 = 30;
/// Hidden figures to find.
pub const PUZZLE_TARGETS_NEEDED: u32 = 7;

/// Largest goal a remote payload may set for either trial.
pub const MAX_TRIAL_GOAL: u32 = 100;
/// Longest trial a remote payload may set, in seconds.
pub const MAX_TRIAL_SECONDS: u32 = 600;
/// Fastest fall speed a remote payload may set.
pub const MAX_FALL_SPEED: u32 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FishParameters {
    pub min_speed: u32,
    pub max_speed: u32,
    pub fishes_needed: u32,
    pub time_limit: u32,
}

impl Default for FishParameters {
    fn default() -> Self {
        Self {
            min_speed: MIN_FISH_SPEED,
            max_speed: MAX_FISH_SPEED,
            fishes_needed: FISHES_NEEDED,
            time_limit: FISH_TIME_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleParameters {
    pub targets_needed: u32,
    pub time_limit: u32,
}

impl Default for PuzzleParameters {
    fn default() -> Self {
        Self {
            targets_needed: PUZZLE_TARGETS_NEEDED,
            time_limit: PUZZLE_TIME_LIMIT,
        }
    }
}

/// Parameters for both trials.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameParameters {
    pub fish: FishParameters,
    pub puzzle: PuzzleParameters,
}

impl GameParameters {
    /// Parse remotely supplied parameters, falling back to the defaults.
    pub fn from_json_or_default(json: &str) -> Self {
        match serde_json::from_str::<GameParameters>(json) {
            Ok(params) if params.is_playable() => params,
            Ok(params) => {
                log::warn!("unplayable game parameters {:?}, using fallback", params);
                Self::default()
            }
            Err(e) => {
                log::warn!("game parameters unreadable ({}), using fallback", e);
                Self::default()
            }
        }
    }

    /// Every trial needs a bounded goal and time limit, and ordered speeds
    /// no faster than [`MAX_FALL_SPEED`].
    pub fn is_playable(&self) -> bool {
        let goal = 1..=MAX_TRIAL_GOAL;
        let seconds = 1..=MAX_TRIAL_SECONDS;
        goal.contains(&self.fish.fishes_needed)
            && seconds.contains(&self.fish.time_limit)
            && self.fish.min_speed <= self.fish.max_speed
            && self.fish.max_speed <= MAX_FALL_SPEED
            && goal.contains(&self.puzzle.targets_needed)
            && seconds.contains(&self.puzzle.time_limit)
    }
}

/// Trial difficulty in [0, 1]: rises with elapsed time, eased by progress.
pub fn difficulty(score: u32, needed: u32, time_left: u32, max_time: u32) -> f32 {
    let time_progress = if max_time == 0 {
        1.0
    } else {
        1.0 - time_left as f32 / max_time as f32
    };
    let score_progress = if needed == 0 {
        1.0
    } else {
        score as f32 / needed as f32
    };
    (time_progress - score_progress * 0.3).clamp(0.0, 1.0)
}
