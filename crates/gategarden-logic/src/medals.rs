//! Medal mode: earn medals from the animal trials to open the gate.

use serde::{Deserialize, Serialize};

use crate::config::GardenConfig;

/// Trial that can award a medal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MedalSource {
    /// The unicorn's fish-catching trial.
    FishCatching,
    /// The elephant's hidden-figure search.
    ElephantSearch,
}

/// Medal counter plus per-trial completion flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedalTrack {
    medals: u8,
    fish_catching: bool,
    elephant_search: bool,
    /// Count last reported by `take_new_medals`.
    last_known: u8,
    cap: u8,
    gate_threshold: u8,
}

/// Medal-mode view for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MedalSnapshot {
    pub medals: u8,
    pub gate_open: bool,
    pub fish_catching: bool,
    pub elephant_search: bool,
}

impl MedalTrack {
    pub fn new(config: &GardenConfig) -> Self {
        Self {
            medals: 0,
            fish_catching: false,
            elephant_search: false,
            last_known: 0,
            cap: config.medal_cap,
            gate_threshold: config.gate_threshold,
        }
    }

    pub fn medals(&self) -> u8 {
        self.medals
    }

    /// Award a medal for `source`. Returns false (and changes nothing) at the cap.
    ///
    /// Re-completing a trial still counts: the flag is already set, but the
    /// counter rises again until the cap.
    pub fn award_medal(&mut self, source: MedalSource) -> bool {
        if self.medals >= self.cap {
            log::debug!("medal cap {} reached, {:?} not awarded", self.cap, source);
            return false;
        }
        self.medals += 1;
        match source {
            MedalSource::FishCatching => self.fish_catching = true,
            MedalSource::ElephantSearch => self.elephant_search = true,
        }
        log::info!("medal awarded for {:?}: {}/{}", source, self.medals, self.cap);
        true
    }

    pub fn has_completed(&self, source: MedalSource) -> bool {
        match source {
            MedalSource::FishCatching => self.fish_catching,
            MedalSource::ElephantSearch => self.elephant_search,
        }
    }

    pub fn can_open_gate(&self) -> bool {
        self.medals >= self.gate_threshold
    }

    /// Medals gained since the previous call (drives the "new medal" reveal).
    pub fn take_new_medals(&mut self) -> u8 {
        let gained = self.medals.saturating_sub(self.last_known);
        self.last_known = self.medals;
        gained
    }

    pub fn reset(&mut self) {
        self.medals = 0;
        self.fish_catching = false;
        self.elephant_search = false;
        self.last_known = 0;
    }

    pub fn snapshot(&self) -> MedalSnapshot {
        MedalSnapshot {
            medals: self.medals,
            gate_open: self.can_open_gate(),
            fish_catching: self.fish_catching,
            elephant_search: self.elephant_search,
        }
    }
}

impl Default for MedalTrack {
    fn default() -> Self {
        Self::new(&GardenConfig::default())
    }
}
