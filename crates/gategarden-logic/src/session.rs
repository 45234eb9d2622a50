//! The gatekeeper's session: meters, day counter and terminal state.
//!
//! A [`GardenSession`] is an explicit, owned game state. The presentation
//! layer holds one and submits decisions to it; every call completes and
//! returns the new state immediately. How long the UI waits before
//! revealing a result is not this module's business.
//!
//! # Phases
//!
//! ```text
//!   Active ──(visitor quota met)──▶ DayComplete ──(advance_day)──▶ Active
//!     │                                 │
//!     └──(meter hits 0)──▶ Terminal ◀───┴──(day > max_days)
//! ```
//!
//! `Terminal` is absorbing: further deltas, decisions and day advances are
//! ignored until [`GardenSession::reset`].

use serde::Serialize;

use crate::config::{validate_config, GardenConfig};
use crate::error::Result;
use crate::events::RandomEvent;
use crate::meters::{Meter, MeterEffects, MeterSet, METER_MIN};
use crate::outcome::{classify, Outcome};
use crate::visitors::{Decision, Visitor};

/// Where the session is in its daily cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Active,
    DayComplete,
    Terminal,
}

/// Counters and terminal flag for one reign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionState {
    /// Current day, 1-based.
    pub day: u32,
    pub max_days: u32,
    pub visitors_today: u32,
    pub max_visitors_per_day: u32,
    /// Set once, cleared only by reset.
    pub outcome: Option<Outcome>,
}

impl SessionState {
    fn new(config: &GardenConfig) -> Self {
        Self {
            day: 1,
            max_days: config.max_days,
            visitors_today: 0,
            max_visitors_per_day: config.max_visitors_per_day,
            outcome: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn is_day_complete(&self) -> bool {
        self.visitors_today >= self.max_visitors_per_day
    }

    pub fn phase(&self) -> SessionPhase {
        if self.is_terminal() {
            SessionPhase::Terminal
        } else if self.is_day_complete() {
            SessionPhase::DayComplete
        } else {
            SessionPhase::Active
        }
    }
}

/// Read-only view handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub health: u8,
    pub support: u8,
    pub trust: u8,
    pub stability: u8,
    pub day: u32,
    pub max_day: u32,
    pub visitors_today: u32,
    pub max_visitors_per_day: u32,
    pub terminal: bool,
    pub terminal_reason: Option<Outcome>,
}

/// What a resolved decision did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub meters: MeterSet,
    pub phase: SessionPhase,
    /// Present once the session is terminal.
    pub outcome: Option<Outcome>,
    /// False when the session was already terminal and nothing changed.
    pub applied: bool,
}

impl Resolution {
    pub fn terminal(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn day_complete(&self) -> bool {
        self.phase == SessionPhase::DayComplete
    }
}

/// One gatekeeper's reign.
#[derive(Debug, Clone)]
pub struct GardenSession {
    config: GardenConfig,
    meters: MeterSet,
    state: SessionState,
}

impl GardenSession {
    /// Start a reign under `config`.
    ///
    /// `config` must pass [`validate_config`] (as [`GardenConfig::from_json`]
    /// guarantees). A zero visitor quota or a zero starting meter would start
    /// the session in an inconsistent phase; debug builds assert on it.
    pub fn new(config: GardenConfig) -> Self {
        debug_assert!(
            validate_config(&config).is_empty(),
            "invalid config: {:?}",
            validate_config(&config)
        );
        let meters = MeterSet::new(config.initial_meter);
        let state = SessionState::new(&config);
        Self {
            config,
            meters,
            state,
        }
    }

    pub fn config(&self) -> &GardenConfig {
        &self.config
    }

    pub fn meters(&self) -> &MeterSet {
        &self.meters
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase()
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.state.outcome
    }

    /// Bounds-checked meter write. Returns the meter's value afterwards.
    ///
    /// A meter landing on zero ends the session, named after that meter.
    /// Once terminal, the call changes nothing.
    pub fn apply_delta(&mut self, meter: Meter, delta: i32) -> u8 {
        if self.is_terminal() {
            return self.meters.get(meter);
        }
        let before = self.meters.get(meter);
        let after = self.meters.apply_delta(meter, delta);
        log::debug!("{} {} -> {} ({:+})", meter.key(), before, after, delta);

        if after == METER_MIN {
            let outcome = meter.collapse_outcome();
            log::info!(
                "day {}: {} collapsed, reign ends in {}",
                self.state.day,
                meter.key(),
                outcome
            );
            self.state.outcome = Some(outcome);
        }
        after
    }

    /// Apply every non-zero entry in enumeration order. No visitor slot is used.
    ///
    /// Once a meter collapses the remaining entries are not applied.
    pub fn apply_effects(&mut self, effects: &MeterEffects) -> Resolution {
        let applied = !self.is_terminal();
        for (meter, delta) in effects.nonzero() {
            if self.is_terminal() {
                break;
            }
            self.apply_delta(meter, delta);
        }
        self.resolution(applied)
    }

    /// Resolve one visitor decision and count it against today's quota.
    pub fn resolve_decision(&mut self, effects: &MeterEffects) -> Resolution {
        if self.is_terminal() {
            return self.resolution(false);
        }
        self.apply_effects(effects);
        self.state.visitors_today += 1;
        if self.state.is_day_complete() && !self.is_terminal() {
            log::debug!("day {} complete", self.state.day);
        }
        self.resolution(true)
    }

    pub fn resolve_visitor(&mut self, visitor: &Visitor, decision: Decision) -> Resolution {
        log::debug!("{:?} {}", decision, visitor.id);
        self.resolve_decision(visitor.effects(decision))
    }

    /// Apply one event choice. Events do not use a visitor slot.
    pub fn resolve_event(&mut self, event: &RandomEvent, choice: usize) -> Result<Resolution> {
        let choice = event.choice(choice)?;
        log::debug!("event {}: {}", event.id, choice.text);
        Ok(self.apply_effects(&choice.effects))
    }

    /// Move to the next day and check the day limit.
    pub fn advance_day(&mut self) -> Resolution {
        if self.is_terminal() {
            return self.resolution(false);
        }
        self.state.day += 1;
        self.state.visitors_today = 0;
        if let Some(outcome) = classify(&self.meters, self.state.day, self.state.max_days) {
            log::info!("reign of {} days over: {}", self.state.max_days, outcome);
            self.state.outcome = Some(outcome);
        } else {
            log::info!("day {} begins", self.state.day);
        }
        self.resolution(true)
    }

    /// Start a fresh reign with the same rules.
    pub fn reset(&mut self) {
        self.meters = MeterSet::new(self.config.initial_meter);
        self.state = SessionState::new(&self.config);
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            health: self.meters.health(),
            support: self.meters.support(),
            trust: self.meters.trust(),
            stability: self.meters.stability(),
            day: self.state.day,
            max_day: self.state.max_days,
            visitors_today: self.state.visitors_today,
            max_visitors_per_day: self.state.max_visitors_per_day,
            terminal: self.state.is_terminal(),
            terminal_reason: self.state.outcome,
        }
    }

    fn resolution(&self, applied: bool) -> Resolution {
        Resolution {
            meters: self.meters,
            phase: self.state.phase(),
            outcome: self.state.outcome,
            applied,
        }
    }
}

impl Default for GardenSession {
    fn default() -> Self {
        Self::new(GardenConfig::default())
    }
}
