//! One-off realm events.
//!
//! Each event is tied to a trigger day and offers two or three choices,
//! each with its own effect vector.

use serde::Serialize;

use crate::error::{GardenError, Result};
use crate::meters::MeterEffects;

/// One option offered by an event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventChoice {
    pub text: &'static str,
    pub effects: MeterEffects,
}

/// A random event record. Static, read-only content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RandomEvent {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub trigger_day: u32,
    pub choices: &'static [EventChoice],
}

impl RandomEvent {
    pub fn choice(&self, index: usize) -> Result<&EventChoice> {
        self.choices
            .get(index)
            .ok_or_else(|| GardenError::InvalidEventChoice {
                event: self.id.to_string(),
                index,
                available: self.choices.len(),
            })
    }

    /// Eligible on exactly its trigger day.
    pub fn is_eligible(&self, day: u32) -> bool {
        self.trigger_day == day
    }
}

/// Every event the realm can face.
pub static RANDOM_EVENTS: &[RandomEvent] = &[
    RandomEvent {
        id: "plague_outbreak",
        name: "Plague Outbreak",
        description: "A mysterious illness spreads through nearby villages. Refugees seek shelter, but they may carry the contagion.",
        trigger_day: 3,
        choices: &[
            EventChoice {
                text: "Open the gates to refugees",
                effects: MeterEffects::new(-15, 12, 10, -5),
            },
            EventChoice {
                text: "Seal the garden completely",
                effects: MeterEffects::new(10, -8, -12, 8),
            },
        ],
    },
    RandomEvent {
        id: "harvest_boom",
        name: "Abundant Harvest",
        description: "The garden yields an extraordinary bounty. The surplus must be distributed.",
        trigger_day: 5,
        choices: &[
            EventChoice {
                text: "Share freely with all",
                effects: MeterEffects::new(8, 15, 12, -5),
            },
            EventChoice {
                text: "Trade for political favors",
                effects: MeterEffects::new(3, 8, -8, 15),
            },
        ],
    },
    RandomEvent {
        id: "merchant_caravan",
        name: "Merchant Caravan",
        description: "A great caravan arrives with exotic goods and demands exclusive access to the garden for a day.",
        trigger_day: 7,
        choices: &[
            EventChoice {
                text: "Grant exclusive access",
                effects: MeterEffects::new(-5, 18, -10, 5),
            },
            EventChoice {
                text: "Maintain open access",
                effects: MeterEffects::new(5, -8, 10, -3),
            },
        ],
    },
    RandomEvent {
        id: "noble_feast",
        name: "Noble's Feast",
        description: "A powerful noble asks to host a grand feast in the garden and promises influential guests.",
        trigger_day: 4,
        choices: &[
            EventChoice {
                text: "Host the grand feast",
                effects: MeterEffects::new(-8, 5, -5, 18),
            },
            EventChoice {
                text: "Decline politely",
                effects: MeterEffects::new(3, 8, 10, -12),
            },
        ],
    },
    RandomEvent {
        id: "cult_gathering",
        name: "Mystical Gathering",
        description: "A cult wishes to hold full-moon rituals in the garden, promising prosperity.",
        trigger_day: 6,
        choices: &[
            EventChoice {
                text: "Allow the rituals",
                effects: MeterEffects::new(-10, -5, -15, 12),
            },
            EventChoice {
                text: "Forbid the gathering",
                effects: MeterEffects::new(5, 8, 12, -8),
            },
        ],
    },
    RandomEvent {
        id: "tax_collector",
        name: "Royal Tax Collector",
        description: "The crown demands higher taxes from the garden. Comply, negotiate or resist.",
        trigger_day: 8,
        choices: &[
            EventChoice {
                text: "Pay the increased taxes",
                effects: MeterEffects::new(0, -12, -5, 15),
            },
            EventChoice {
                text: "Negotiate a compromise",
                effects: MeterEffects::new(-3, -5, 8, 3),
            },
            EventChoice {
                text: "Refuse to pay",
                effects: MeterEffects::new(5, 10, 12, -20),
            },
        ],
    },
    RandomEvent {
        id: "hermit_prophecy",
        name: "Hermit's Prophecy",
        description: "An ancient hermit emerges from the deep woods speaking of omens and offering cryptic guidance.",
        trigger_day: 9,
        choices: &[
            EventChoice {
                text: "Heed the prophecy",
                effects: MeterEffects::new(8, -8, -10, 10),
            },
            EventChoice {
                text: "Dismiss as nonsense",
                effects: MeterEffects::new(-3, 10, 8, -5),
            },
        ],
    },
];
