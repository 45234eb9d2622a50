//! Endings and the end-of-reign classifier.
//!
//! A session ends either when a meter collapses to zero (the ending is
//! named after that meter) or when the day counter passes the last day,
//! in which case [`final_outcome`] reads the whole meter snapshot.

use serde::{Deserialize, Serialize};

use crate::meters::MeterSet;

/// Terminal outcome of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Plague,
    EconomicCollapse,
    Rebellion,
    Chaos,
    CivilUnrest,
    Despotism,
    Survival,
    UncertainTimes,
}

impl Outcome {
    pub const ALL: [Outcome; 8] = [
        Outcome::Plague,
        Outcome::EconomicCollapse,
        Outcome::Rebellion,
        Outcome::Chaos,
        Outcome::CivilUnrest,
        Outcome::Despotism,
        Outcome::Survival,
        Outcome::UncertainTimes,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Outcome::Plague => "plague",
            Outcome::EconomicCollapse => "economic_collapse",
            Outcome::Rebellion => "rebellion",
            Outcome::Chaos => "chaos",
            Outcome::CivilUnrest => "civil_unrest",
            Outcome::Despotism => "despotism",
            Outcome::Survival => "survival",
            Outcome::UncertainTimes => "uncertain_times",
        }
    }

    /// Only surviving the full reign with every meter healthy counts as a win.
    pub fn is_victory(self) -> bool {
        matches!(self, Outcome::Survival)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Ending for a reign that lasted all its days. First matching rule wins.
pub fn final_outcome(meters: &MeterSet) -> Outcome {
    let health = meters.health();
    let support = meters.support();
    let trust = meters.trust();
    let stability = meters.stability();

    if health == 0 {
        Outcome::Plague
    } else if trust == 0 || stability == 0 {
        Outcome::Rebellion
    } else if trust < 25 || stability < 25 {
        Outcome::CivilUnrest
    } else if stability > 80 && trust < 30 {
        Outcome::Despotism
    } else if health > 40 && support > 40 && trust > 40 && stability > 40 {
        Outcome::Survival
    } else {
        Outcome::UncertainTimes
    }
}

/// Day-limit check: `Some(ending)` once `day` has passed `max_day`.
pub fn classify(meters: &MeterSet, day: u32, max_day: u32) -> Option<Outcome> {
    (day > max_day).then(|| final_outcome(meters))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(health: i32, support: i32, trust: i32, stability: i32) -> MeterSet {
        MeterSet::from_values(health, support, trust, stability)
    }

    #[test]
    fn test_not_terminal_before_day_limit() {
        assert_eq!(classify(&m(50, 50, 50, 50), 10, 10), None);
        assert_eq!(classify(&m(0, 0, 0, 0), 3, 10), None);
    }

    #[test]
    fn test_survival() {
        assert_eq!(classify(&m(50, 50, 50, 50), 11, 10), Some(Outcome::Survival));
    }

    #[test]
    fn test_plague_first() {
        assert_eq!(final_outcome(&m(0, 90, 0, 90)), Outcome::Plague);
    }

    #[test]
    fn test_rebellion_before_civil_unrest() {
        assert_eq!(final_outcome(&m(90, 90, 50, 0)), Outcome::Rebellion);
        assert_eq!(final_outcome(&m(90, 90, 0, 50)), Outcome::Rebellion);
    }

    #[test]
    fn test_low_stability_is_civil_unrest() {
        assert_eq!(final_outcome(&m(90, 90, 90, 15)), Outcome::CivilUnrest);
    }

    #[test]
    fn test_low_trust_is_civil_unrest() {
        assert_eq!(final_outcome(&m(100, 100, 10, 90)), Outcome::CivilUnrest);
    }

    #[test]
    fn test_civil_unrest_preempts_despotism() {
        // trust < 30 with high stability would be despotism, but trust < 25 wins
        assert_eq!(final_outcome(&m(60, 60, 20, 90)), Outcome::CivilUnrest);
    }

    #[test]
    fn test_despotism() {
        assert_eq!(final_outcome(&m(60, 60, 28, 85)), Outcome::Despotism);
        // boundary: stability exactly 80 is not despotism
        assert_eq!(final_outcome(&m(60, 60, 28, 80)), Outcome::UncertainTimes);
    }

    #[test]
    fn test_uncertain_times() {
        assert_eq!(final_outcome(&m(40, 90, 90, 90)), Outcome::UncertainTimes);
        assert_eq!(final_outcome(&m(90, 30, 90, 60)), Outcome::UncertainTimes);
    }

    #[test]
    fn test_labels_serialize_snake_case() {
        for outcome in Outcome::ALL {
            let json = serde_json::to_string(&outcome).unwrap();
            assert_eq!(json, format!("\"{}\"", outcome.label()));
        }
    }

    #[test]
    fn test_only_survival_is_victory() {
        let wins: Vec<_> = Outcome::ALL.into_iter().filter(|o| o.is_victory()).collect();
        assert_eq!(wins, vec![Outcome::Survival]);
    }
}
