//! The four bounded realm meters and the effect vectors that move them.
//!
//! Every meter is an integer in [`METER_MIN`, `METER_MAX`]. The fields of
//! [`MeterSet`] are private so the only way to change a value is through
//! [`MeterSet::apply_delta`], which clamps.

use serde::{Deserialize, Serialize};

use crate::outcome::Outcome;

/// Lowest meter value. Reaching it ends the session.
pub const METER_MIN: u8 = 0;

/// Highest meter value.
pub const METER_MAX: u8 = 100;

/// Value every meter starts at (and returns to on reset).
pub const INITIAL_METER: u8 = 75;

/// One of the four realm meters.
///
/// The declaration order is the fixed enumeration order used whenever
/// several meters are touched at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Meter {
    Health,
    Support,
    Trust,
    Stability,
}

impl Meter {
    /// All meters in enumeration order.
    pub const ALL: [Meter; 4] = [
        Meter::Health,
        Meter::Support,
        Meter::Trust,
        Meter::Stability,
    ];

    /// Lowercase key, as used in content tables and snapshots.
    pub fn key(self) -> &'static str {
        match self {
            Meter::Health => "health",
            Meter::Support => "support",
            Meter::Trust => "trust",
            Meter::Stability => "stability",
        }
    }

    /// Player-facing meter name.
    pub fn display_name(self) -> &'static str {
        match self {
            Meter::Health => "Public Health",
            Meter::Support => "Support/Economy",
            Meter::Trust => "Public Trust",
            Meter::Stability => "Political Stability",
        }
    }

    /// Ending reached when this meter hits zero.
    pub fn collapse_outcome(self) -> Outcome {
        match self {
            Meter::Health => Outcome::Plague,
            Meter::Support => Outcome::EconomicCollapse,
            Meter::Trust => Outcome::Rebellion,
            Meter::Stability => Outcome::Chaos,
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Meter::ALL.into_iter().find(|m| m.key() == key)
    }
}

/// Presentation tier of a meter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeterLevel {
    /// Above 50.
    Normal,
    /// 26..=50, drawn in the warning color.
    Warning,
    /// 25 and below, drawn in the danger color and pulsed.
    Danger,
}

impl MeterLevel {
    pub fn from_value(value: u8) -> Self {
        if value <= 25 {
            Self::Danger
        } else if value <= 50 {
            Self::Warning
        } else {
            Self::Normal
        }
    }

    /// Whether the meter panel should pulse this meter's icon.
    pub fn is_critical(self) -> bool {
        matches!(self, Self::Danger)
    }
}

/// Clamp a signed value into the meter range.
pub fn clamp_meter(value: i32) -> u8 {
    value.clamp(METER_MIN as i32, METER_MAX as i32) as u8
}

/// The four meter values. Always within [`METER_MIN`, `METER_MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MeterSet {
    health: u8,
    support: u8,
    trust: u8,
    stability: u8,
}

impl MeterSet {
    /// All four meters at `initial` (clamped into range).
    pub fn new(initial: u8) -> Self {
        let v = initial.min(METER_MAX);
        Self {
            health: v,
            support: v,
            trust: v,
            stability: v,
        }
    }

    /// Build from explicit values, clamping each into range.
    pub fn from_values(health: i32, support: i32, trust: i32, stability: i32) -> Self {
        Self {
            health: clamp_meter(health),
            support: clamp_meter(support),
            trust: clamp_meter(trust),
            stability: clamp_meter(stability),
        }
    }

    pub fn get(&self, meter: Meter) -> u8 {
        match meter {
            Meter::Health => self.health,
            Meter::Support => self.support,
            Meter::Trust => self.trust,
            Meter::Stability => self.stability,
        }
    }

    pub fn health(&self) -> u8 {
        self.health
    }

    pub fn support(&self) -> u8 {
        self.support
    }

    pub fn trust(&self) -> u8 {
        self.trust
    }

    pub fn stability(&self) -> u8 {
        self.stability
    }

    /// Apply a signed delta to one meter and return the new value,
    /// `clamp(current + delta, 0, 100)`.
    pub fn apply_delta(&mut self, meter: Meter, delta: i32) -> u8 {
        let next = clamp_meter((self.get(meter) as i32).saturating_add(delta));
        let slot = match meter {
            Meter::Health => &mut self.health,
            Meter::Support => &mut self.support,
            Meter::Trust => &mut self.trust,
            Meter::Stability => &mut self.stability,
        };
        *slot = next;
        next
    }

    /// First meter (in enumeration order) sitting at zero, if any.
    pub fn depleted(&self) -> Option<Meter> {
        Meter::ALL.into_iter().find(|&m| self.get(m) == METER_MIN)
    }

    pub fn level(&self, meter: Meter) -> MeterLevel {
        MeterLevel::from_value(self.get(meter))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Meter, u8)> + '_ {
        Meter::ALL.into_iter().map(move |m| (m, self.get(m)))
    }
}

impl Default for MeterSet {
    fn default() -> Self {
        Self::new(INITIAL_METER)
    }
}

/// Signed deltas for all four meters. A zero entry means "no change".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeterEffects {
    pub health: i32,
    pub support: i32,
    pub trust: i32,
    pub stability: i32,
}

impl MeterEffects {
    pub const fn new(health: i32, support: i32, trust: i32, stability: i32) -> Self {
        Self {
            health,
            support,
            trust,
            stability,
        }
    }

    /// A vector touching a single meter.
    pub fn single(meter: Meter, delta: i32) -> Self {
        let mut effects = Self::default();
        match meter {
            Meter::Health => effects.health = delta,
            Meter::Support => effects.support = delta,
            Meter::Trust => effects.trust = delta,
            Meter::Stability => effects.stability = delta,
        }
        effects
    }

    pub fn get(&self, meter: Meter) -> i32 {
        match meter {
            Meter::Health => self.health,
            Meter::Support => self.support,
            Meter::Trust => self.trust,
            Meter::Stability => self.stability,
        }
    }

    /// Non-zero entries in enumeration order.
    pub fn nonzero(&self) -> impl Iterator<Item = (Meter, i32)> + '_ {
        Meter::ALL
            .into_iter()
            .map(move |m| (m, self.get(m)))
            .filter(|&(_, d)| d != 0)
    }

    pub fn is_empty(&self) -> bool {
        self.nonzero().next().is_none()
    }
}
