//! Fallback spawn plans for the trials.
//!
//! When no remote spawner answers, these build the fish schedule and the
//! hidden-figure placements locally from the injected RNG.

use rand::Rng;
use serde::Serialize;

use crate::parameters::{FishParameters, PuzzleParameters, MAX_TRIAL_GOAL};
use crate::trials::FishKind;

/// Distance kept from every board edge.
const EDGE_MARGIN: f32 = 50.0;
/// Fish spawned per good fish needed.
const FISH_PER_NEEDED: u32 = 10;
/// Chance a spawned fish is good.
const GOOD_FISH_CHANCE: f64 = 0.7;
/// Base fall duration in milliseconds.
const BASE_FALL_MS: u32 = 8000;
/// Pause between spawn pairs in milliseconds.
const PAIR_INTERVAL_MS: u32 = 3000;
/// Stagger between the two fish of a pair in milliseconds.
const PAIR_STAGGER_MS: u32 = 500;

/// One scheduled fish.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FishSpawn {
    pub x: f32,
    pub y: f32,
    pub kind: FishKind,
    /// Time to fall the full screen, milliseconds.
    pub fall_ms: u32,
    /// Horizontal sway amplitude in pixels.
    pub sway_range: f32,
    /// Sway period, milliseconds.
    pub sway_ms: u32,
    /// Delay after trial start, milliseconds.
    pub delay_ms: u32,
}

/// Schedule for a whole fish trial across a screen `width` pixels wide.
///
/// The goal is capped at [`MAX_TRIAL_GOAL`] so the plan stays bounded.
pub fn fish_spawn_plan(width: f32, params: &FishParameters, rng: &mut impl Rng) -> Vec<FishSpawn> {
    let count = params.fishes_needed.min(MAX_TRIAL_GOAL) * FISH_PER_NEEDED;
    let (lo, hi) = inset(0.0, width);

    (0..count)
        .map(|i| {
            let kind = if rng.gen_bool(GOOD_FISH_CHANCE) {
                FishKind::Good
            } else {
                FishKind::Bad
            };
            FishSpawn {
                x: uniform(lo, hi, rng),
                y: -EDGE_MARGIN,
                kind,
                fall_ms: BASE_FALL_MS + rng.gen_range(1000..3000),
                sway_range: rng.gen_range(10.0..40.0),
                sway_ms: rng.gen_range(1000..2000),
                delay_ms: PAIR_INTERVAL_MS
                    .saturating_mul(i / 2)
                    .saturating_add(PAIR_STAGGER_MS * (i % 2)),
            }
        })
        .collect()
}

/// Search board rectangle in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoardBounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Where one hidden figure goes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetPlacement {
    pub x: f32,
    pub y: f32,
    pub image: String,
    pub scale: f32,
    pub alpha: f32,
}

/// Place every needed figure inside the board, cycling through `images`.
/// At most [`MAX_TRIAL_GOAL`] figures are placed.
pub fn target_placements(
    bounds: &BoardBounds,
    images: &[&str],
    params: &PuzzleParameters,
    rng: &mut impl Rng,
) -> Vec<TargetPlacement> {
    if images.is_empty() {
        return Vec::new();
    }
    let (x_lo, x_hi) = inset(bounds.x, bounds.width);
    let (y_lo, y_hi) = inset(bounds.y, bounds.height);

    (0..params.targets_needed.min(MAX_TRIAL_GOAL) as usize)
        .map(|i| TargetPlacement {
            x: uniform(x_lo, x_hi, rng),
            y: uniform(y_lo, y_hi, rng),
            image: images[i % images.len()].to_string(),
            scale: 0.2,
            alpha: 0.9,
        })
        .collect()
}

/// Usable span of `[start, start + len]` after the edge margin.
/// Collapses to the midpoint when the span is narrower than two margins.
fn inset(start: f32, len: f32) -> (f32, f32) {
    if len <= 2.0 * EDGE_MARGIN {
        let mid = start + len / 2.0;
        (mid, mid)
    } else {
        (start + EDGE_MARGIN, start + len - EDGE_MARGIN)
    }
}

fn uniform(lo: f32, hi: f32, rng: &mut impl Rng) -> f32 {
    if hi > lo {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}
