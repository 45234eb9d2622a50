//! Character dialogue: generated when possible, canned otherwise.
//!
//! The text generator is an external collaborator behind [`TextSource`].
//! Whatever happens on the other side (disabled, timeout, bad payload) the
//! caller always gets a line to show; failures are logged and replaced by
//! one of the character's fallback lines.

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::GardenConfig;
use crate::medals::MedalTrack;
use crate::session::SessionSnapshot;

/// Who is speaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Character {
    Guardian,
    Unicorn,
    Elephant,
    Giraffe,
    Rabbit,
    Dog,
}

impl Character {
    pub fn id(self) -> &'static str {
        match self {
            Character::Guardian => "guardian",
            Character::Unicorn => "unicorn",
            Character::Elephant => "elephant",
            Character::Giraffe => "giraffe",
            Character::Rabbit => "rabbit",
            Character::Dog => "dog",
        }
    }

    /// Unknown identifiers speak as the guardian.
    pub fn from_id(id: &str) -> Self {
        match id {
            "unicorn" => Character::Unicorn,
            "elephant" => Character::Elephant,
            "giraffe" => Character::Giraffe,
            "rabbit" => Character::Rabbit,
            "dog" => Character::Dog,
            _ => Character::Guardian,
        }
    }

    pub fn fallback_lines(self) -> &'static [&'static str] {
        match self {
            Character::Guardian => &[
                "Listen to the whispers of the ancient ones. They guide those who seek true balance.",
            ],
            Character::Unicorn => &[
                "Trust your instincts.",
                "Magic flows where trust and stability meet.",
                "I sense great potential in your realm.",
            ],
            Character::Elephant => &[
                "Strength comes not from force, but from wisdom.",
                "Stability is built on foundations of trust and support.",
                "The health of the realm reflects the health of its people.",
            ],
            Character::Giraffe => &[
                "Look beyond the immediate.",
                "Support flows like water through the land.",
                "Time is your ally.",
            ],
            Character::Rabbit => &[
                "Quick decisions can save lives.",
                "I hear whispers of change in the wind.",
                "Health and happiness go hand in hand.",
            ],
            Character::Dog => &[
                "Loyalty is earned through trust and fairness.",
                "Even in dark times, hope remains.",
                "Guard your realm well.",
            ],
        }
    }
}

/// Game state the generator may condition on.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OracleContext {
    Realm(SessionSnapshot),
    Medals { medals: u8 },
}

impl From<&MedalTrack> for OracleContext {
    fn from(track: &MedalTrack) -> Self {
        OracleContext::Medals {
            medals: track.medals(),
        }
    }
}

/// One request for a line of dialogue.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OracleRequest {
    pub character: Character,
    pub prompt: String,
    pub context: OracleContext,
}

impl OracleRequest {
    pub fn advice(character: Character, context: OracleContext) -> Self {
        Self {
            character,
            prompt: format!(
                "Provide wisdom and guidance to the Gatekeeper as a {}",
                character.id()
            ),
            context,
        }
    }
}

/// Why the text source produced nothing usable.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("text source unavailable: {0}")]
    Unavailable(String),
    #[error("text source timed out")]
    Timeout,
    #[error("text source returned an empty line")]
    Empty,
}

/// External text generator.
pub trait TextSource {
    fn generate(&self, request: &OracleRequest) -> Result<String, OracleError>;
}

/// Dialogue front door: generated text when enabled, fallback otherwise.
pub struct Oracle<'a> {
    source: Option<&'a dyn TextSource>,
    enabled: bool,
}

impl<'a> Oracle<'a> {
    pub fn new(source: Option<&'a dyn TextSource>, enabled: bool) -> Self {
        Self { source, enabled }
    }

    /// Consults `source` only when the rules enable the oracle.
    pub fn from_config(config: &GardenConfig, source: Option<&'a dyn TextSource>) -> Self {
        Self::new(source, config.oracle_enabled)
    }

    /// Fallback lines only.
    pub fn offline() -> Self {
        Self {
            source: None,
            enabled: false,
        }
    }

    /// The line of dialogue to show for `request`.
    pub fn speak(&self, request: &OracleRequest, rng: &mut impl Rng) -> String {
        if let (true, Some(source)) = (self.enabled, self.source) {
            match source.generate(request) {
                Ok(text) if !text.trim().is_empty() => return text,
                Ok(_) => log::warn!("{}: {}, using fallback", request.character.id(), OracleError::Empty),
                Err(e) => log::warn!("{}: {}, using fallback", request.character.id(), e),
            }
        }
        fallback_line(request.character, rng).to_string()
    }
}

/// Uniformly chosen canned line for `character`.
pub fn fallback_line(character: Character, rng: &mut impl Rng) -> &'static str {
    let lines = character.fallback_lines();
    lines[rng.gen_range(0..lines.len())]
}
