//! Rules of the two animal trials, independent of how they are drawn.
//!
//! The presentation layer feeds in clock ticks, catches and clicks; the
//! trial reports when it ends and how. A won trial earns its medal.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::medals::{MedalSource, MedalTrack};
use crate::parameters::{FishParameters, PuzzleParameters};

/// Fall speed added every fifth second of the fish trial.
const SPEED_STEP: u32 = 20;

/// How a trial ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrialOutcome {
    /// Goal reached.
    Won,
    /// Clock ran out first.
    TimeUp { score: u32 },
    /// Caught a tainted fish.
    Corrupted,
}

impl TrialOutcome {
    /// Award `source`'s medal if this outcome earned it.
    pub fn award_to(self, track: &mut MedalTrack, source: MedalSource) -> bool {
        match self {
            TrialOutcome::Won => track.award_medal(source),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FishKind {
    Good,
    Bad,
}

/// The unicorn's trial: catch good fish, avoid tainted ones.
#[derive(Debug, Clone, Serialize)]
pub struct FishTrial {
    score: u32,
    needed: u32,
    time_left: u32,
    speed: u32,
    max_speed: u32,
    outcome: Option<TrialOutcome>,
}

impl FishTrial {
    pub fn new(params: &FishParameters) -> Self {
        Self {
            score: 0,
            needed: params.fishes_needed,
            time_left: params.time_limit,
            speed: params.min_speed,
            max_speed: params.max_speed,
            outcome: None,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn needed(&self) -> u32 {
        self.needed
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn outcome(&self) -> Option<TrialOutcome> {
        self.outcome
    }

    pub fn is_active(&self) -> bool {
        self.outcome.is_none()
    }

    /// One second of the countdown.
    pub fn tick(&mut self) -> Option<TrialOutcome> {
        if !self.is_active() {
            return self.outcome;
        }
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left % 5 == 0 && self.speed < self.max_speed {
            self.speed = self.speed.saturating_add(SPEED_STEP);
        }
        if self.time_left == 0 {
            self.finish(TrialOutcome::TimeUp { score: self.score });
        }
        self.outcome
    }

    /// A fish landed in the basket.
    pub fn catch(&mut self, kind: FishKind) -> Option<TrialOutcome> {
        if !self.is_active() {
            return self.outcome;
        }
        match kind {
            FishKind::Good => {
                self.score += 1;
                if self.score >= self.needed {
                    self.finish(TrialOutcome::Won);
                }
            }
            FishKind::Bad => self.finish(TrialOutcome::Corrupted),
        }
        self.outcome
    }

    fn finish(&mut self, outcome: TrialOutcome) {
        log::info!("fish trial over: {:?} ({}/{})", outcome, self.score, self.needed);
        self.outcome = Some(outcome);
    }
}

/// The elephant's trial: find every hidden figure before time runs out.
#[derive(Debug, Clone, Serialize)]
pub struct SearchTrial {
    found: BTreeSet<u32>,
    needed: u32,
    time_left: u32,
    outcome: Option<TrialOutcome>,
}

impl SearchTrial {
    pub fn new(params: &PuzzleParameters) -> Self {
        Self {
            found: BTreeSet::new(),
            needed: params.targets_needed,
            time_left: params.time_limit,
            outcome: None,
        }
    }

    pub fn score(&self) -> u32 {
        self.found.len() as u32
    }

    pub fn needed(&self) -> u32 {
        self.needed
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn outcome(&self) -> Option<TrialOutcome> {
        self.outcome
    }

    pub fn is_active(&self) -> bool {
        self.outcome.is_none()
    }

    pub fn is_found(&self, target: u32) -> bool {
        self.found.contains(&target)
    }

    /// The player clicked target `target`. Returns true if it was newly found.
    pub fn find(&mut self, target: u32) -> bool {
        if !self.is_active() || target >= self.needed || !self.found.insert(target) {
            return false;
        }
        if self.score() >= self.needed {
            log::info!("search trial won ({} figures)", self.needed);
            self.outcome = Some(TrialOutcome::Won);
        }
        true
    }

    pub fn tick(&mut self) -> Option<TrialOutcome> {
        if !self.is_active() {
            return self.outcome;
        }
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            let score = self.score();
            log::info!("search trial timed out ({}/{})", score, self.needed);
            self.outcome = Some(TrialOutcome::TimeUp { score });
        }
        self.outcome
    }
}
