//! The visitor catalog.
//!
//! Each visitor asks to pass the gate. Allowing or denying them applies
//! one of two effect vectors to the realm meters.

use serde::{Deserialize, Serialize};

use crate::meters::MeterEffects;

/// How often a visitor shows up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Legendary,
}

impl Rarity {
    pub const ALL: [Rarity; 4] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Legendary,
    ];
}

/// Integer weight per rarity tier. The shipped weights sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RarityWeights {
    pub common: u32,
    pub uncommon: u32,
    pub rare: u32,
    pub legendary: u32,
}

impl Default for RarityWeights {
    fn default() -> Self {
        Self {
            common: 60,
            uncommon: 25,
            rare: 12,
            legendary: 3,
        }
    }
}

impl RarityWeights {
    pub fn weight(&self, rarity: Rarity) -> u32 {
        match rarity {
            Rarity::Common => self.common,
            Rarity::Uncommon => self.uncommon,
            Rarity::Rare => self.rare,
            Rarity::Legendary => self.legendary,
        }
    }

    /// Sum of all four weights. Widened so any `u32` weights fit.
    pub fn total(&self) -> u64 {
        Rarity::ALL.into_iter().map(|r| u64::from(self.weight(r))).sum()
    }
}

/// The gatekeeper's verdict on a visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Allow,
    Deny,
}

/// A visitor record. Static, read-only content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Visitor {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub rarity: Rarity,
    pub allow: MeterEffects,
    pub deny: MeterEffects,
}

impl Visitor {
    pub fn effects(&self, decision: Decision) -> &MeterEffects {
        match decision {
            Decision::Allow => &self.allow,
            Decision::Deny => &self.deny,
        }
    }
}

/// Every visitor that can appear at the gate.
pub static VISITORS: &[Visitor] = &[
    Visitor {
        id: "fruit_merchant",
        name: "Fruit-Bodied Merchant",
        description: "A strange trader with oranges for limbs and grapes for eyes. Offers exotic goods from distant realms that smell oddly sweet and sour.",
        rarity: Rarity::Common,
        allow: MeterEffects::new(-5, 10, 8, 0),
        deny: MeterEffects::new(0, -8, -3, 5),
    },
    Visitor {
        id: "worm_pilgrim",
        name: "Worm-Headed Pilgrim",
        description: "A devout traveler with earthworms where a head should be, carrying relics that pulse with earthy energy toward the sacred grove.",
        rarity: Rarity::Common,
        allow: MeterEffects::new(3, -2, -8, 0),
        deny: MeterEffects::new(8, -5, 0, -3),
    },
    Visitor {
        id: "noble_hybrid",
        name: "Noble Hybrid",
        description: "An aristocrat with a deer's legs and a raven's wings, bearing papers sealed with wax that shifts color in the light.",
        rarity: Rarity::Common,
        allow: MeterEffects::new(-8, 5, 10, 12),
        deny: MeterEffects::new(0, -3, -12, -8),
    },
    Visitor {
        id: "crystal_child",
        name: "Crystal Child",
        description: "A child of ringing crystal who brings visions of the future. Their presence unsettles everyone nearby.",
        rarity: Rarity::Uncommon,
        allow: MeterEffects::new(-3, -5, -10, 15),
        deny: MeterEffects::new(5, 8, 5, -10),
    },
    Visitor {
        id: "root_scholar",
        name: "Root Scholar",
        description: "An ancient academic rooted to the ground from the waist down, trading forbidden knowledge for sanctuary.",
        rarity: Rarity::Uncommon,
        allow: MeterEffects::new(8, -3, -5, -8),
        deny: MeterEffects::new(-5, 5, 8, 3),
    },
    Visitor {
        id: "mirror_twin",
        name: "Mirror Twin",
        description: "Two beings fused back to back who speak in perfect unison and contradict each other.",
        rarity: Rarity::Rare,
        allow: MeterEffects::new(0, 8, -15, 10),
        deny: MeterEffects::new(-8, -5, 12, -5),
    },
    Visitor {
        id: "plague_healer",
        name: "Plague Healer",
        description: "A bandaged figure seeping luminous oil who claims to cure any ailment. Former patients have changed.",
        rarity: Rarity::Rare,
        allow: MeterEffects::new(15, -10, -12, -8),
        deny: MeterEffects::new(-12, 8, 5, 10),
    },
    Visitor {
        id: "mushroom_court",
        name: "Mushroom Court",
        description: "A procession of tiny folk growing from one enormous cap, seeking land for a colony and paying in spores.",
        rarity: Rarity::Uncommon,
        allow: MeterEffects::new(-5, 12, 5, -8),
        deny: MeterEffects::new(8, -10, -8, 5),
    },
    Visitor {
        id: "bone_architect",
        name: "Bone Architect",
        description: "A skeleton in moth-eaten velvet with blueprints drawn on skin, eager to raise monuments to forgotten sorrows.",
        rarity: Rarity::Rare,
        allow: MeterEffects::new(-10, -8, 8, 15),
        deny: MeterEffects::new(5, 10, -5, -12),
    },
    Visitor {
        id: "wind_singer",
        name: "Wind Singer",
        description: "A being whose voice carries seeds and pollen. Birds follow in their wake; some listeners go mad.",
        rarity: Rarity::Uncommon,
        allow: MeterEffects::new(5, 8, -8, -5),
        deny: MeterEffects::new(-3, -5, 10, 8),
    },
    Visitor {
        id: "clockwork_prophet",
        name: "Clockwork Prophet",
        description: "A figure of brass and steam who speaks prophecy in precisely timed mechanical verse.",
        rarity: Rarity::Legendary,
        allow: MeterEffects::new(-8, 15, 12, -10),
        deny: MeterEffects::new(10, -12, -15, 20),
    },
    Visitor {
        id: "shadow_merchant",
        name: "Shadow Merchant",
        description: "A trader of living darkness dealing in memories and dreams that change when nobody is looking.",
        rarity: Rarity::Legendary,
        allow: MeterEffects::new(10, -15, -20, 12),
        deny: MeterEffects::new(-15, 12, 8, -8),
    },
];
