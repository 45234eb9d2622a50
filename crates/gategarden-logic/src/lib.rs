//! Pure game logic for Gate Garden.
//!
//! This crate contains every rule of the game that is independent of
//! rendering, animation, audio or any engine. Functions take plain data
//! (and an injected random source) and return results, so the whole game
//! can be played headless and reproduced from a seed.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | Tunable game rules, JSON loading and validation |
//! | [`error`] | Crate error type |
//! | [`events`] | Day-gated realm events and their choices |
//! | [`medals`] | Medal mode: medal counter, trial flags, gate predicate |
//! | [`meters`] | The four bounded meters and effect vectors |
//! | [`oracle`] | Character dialogue with canned fallbacks |
//! | [`outcome`] | Endings and the end-of-reign classifier |
//! | [`parameters`] | Trial tuning parameters and difficulty curve |
//! | [`selection`] | Weighted visitor draws and event gates |
//! | [`session`] | Session state machine: decisions, days, terminal state |
//! | [`spawning`] | Fallback fish schedules and hidden-figure placement |
//! | [`trials`] | Fish-catching and hidden-figure trial rules |
//! | [`visitors`] | The visitor catalog and rarity weights |
//!
//! # Example
//!
//! ```
//! use gategarden_logic::config::GardenConfig;
//! use gategarden_logic::selection::ContentDirector;
//! use gategarden_logic::session::GardenSession;
//! use gategarden_logic::visitors::Decision;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let config = GardenConfig::default();
//! let director = ContentDirector::new(&config);
//! let mut session = GardenSession::new(config);
//! let mut rng = StdRng::seed_from_u64(42);
//!
//! let (first, second) = director.daily_visitors(&mut rng).unwrap();
//! session.resolve_visitor(first, Decision::Allow);
//! let result = session.resolve_visitor(second, Decision::Deny);
//! assert!(result.day_complete() || result.terminal());
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod medals;
pub mod meters;
pub mod oracle;
pub mod outcome;
pub mod parameters;
pub mod selection;
pub mod session;
pub mod spawning;
pub mod trials;
pub mod visitors;

pub use error::{GardenError, Result};
