//! Gate Garden Headless Simulation Harness
//!
//! Validates the pure game logic and the shipped rule file.
//! Runs entirely in-process: no rendering, no audio, no text generator.
//!
//! Usage:
//!   cargo run -p gategarden-simtest
//!   cargo run -p gategarden-simtest -- --verbose
//!   cargo run -p gategarden-simtest -- --seed 7 --sessions 500

use std::collections::HashMap;

use gategarden_logic::config::{validate_config, GardenConfig};
use gategarden_logic::events::RANDOM_EVENTS;
use gategarden_logic::medals::{MedalSource, MedalTrack};
use gategarden_logic::meters::{clamp_meter, Meter, MeterEffects, MeterSet, METER_MAX};
use gategarden_logic::oracle::{Character, Oracle, OracleContext, OracleRequest};
use gategarden_logic::outcome::{classify, final_outcome, Outcome};
use gategarden_logic::parameters::{difficulty, GameParameters};
use gategarden_logic::selection::ContentDirector;
use gategarden_logic::session::{GardenSession, SessionPhase};
use gategarden_logic::spawning::{fish_spawn_plan, target_placements, BoardBounds};
use gategarden_logic::trials::{FishKind, FishTrial, SearchTrial, TrialOutcome};
use gategarden_logic::visitors::{Decision, Rarity, VISITORS};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ── Rule file (same JSON a front end would load) ───────────────────────
const RULES_JSON: &str = include_str!("../../../data/garden_rules.json");

const DEFAULT_SEED: u64 = 42;
const DEFAULT_SESSIONS: u32 = 1000;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

struct Options {
    verbose: bool,
    seed: Option<u64>,
    sessions: u32,
}

/// Value following `flag`, if present and parseable as `T`.
fn flag_value<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse::<T>().ok())
}

fn parse_args(args: &[String]) -> Options {
    Options {
        verbose: args.iter().any(|a| a == "--verbose"),
        seed: flag_value(args, "--seed"),
        sessions: flag_value(args, "--sessions").unwrap_or(DEFAULT_SESSIONS),
    }
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let opts = parse_args(&args);
    println!("=== Gate Garden Simulation Harness ===\n");

    let mut results = Vec::new();

    // 1. Rule file validation
    let config = match validate_rules(&mut results) {
        Some(config) => config,
        None => GardenConfig::default(),
    };
    // --seed beats the rule file's seed
    let seed = opts.seed.or(config.seed).unwrap_or(DEFAULT_SEED);

    // 2. Meter clamp sweep
    results.extend(validate_meter_clamping(opts.verbose));

    // 3. Ending classifier
    results.extend(validate_classifier(opts.verbose));

    // 4. Seeded reigns
    results.extend(validate_reigns(&config, seed, opts.sessions, opts.verbose));

    // 5. Visitor draws
    results.extend(validate_visitor_draws(&config, seed, opts.verbose));

    // 6. Event gating
    results.extend(validate_event_gating(&config, seed, opts.verbose));

    // 7. Medal track
    results.extend(validate_medals(&config, opts.verbose));

    // 8. Trials and spawn plans
    results.extend(validate_trials(seed, opts.verbose));

    // 9. Oracle fallback
    results.extend(validate_oracle(&config, seed, opts.verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || opts.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed (seed {}) ===",
        passed, total, failed, seed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Rule File ────────────────────────────────────────────────────────

fn validate_rules(results: &mut Vec<TestResult>) -> Option<GardenConfig> {
    println!("--- Rule File ---");

    let config = match GardenConfig::from_json(RULES_JSON) {
        Ok(c) => c,
        Err(e) => {
            results.push(TestResult {
                name: "rules_parse".into(),
                passed: false,
                detail: format!("rule file rejected: {}", e),
            });
            return None;
        }
    };

    results.push(TestResult {
        name: "rules_parse".into(),
        passed: true,
        detail: format!(
            "{} days, {} visitors/day, start {}",
            config.max_days, config.max_visitors_per_day, config.initial_meter
        ),
    });

    // Shipped rules match the built-in defaults
    let mut expected = GardenConfig::default();
    expected.seed = config.seed;
    results.push(TestResult {
        name: "rules_match_defaults".into(),
        passed: config == expected,
        detail: if config == expected {
            "rule file equals built-in defaults".into()
        } else {
            format!("rule file differs from defaults: {:?}", config)
        },
    });

    let weights = config.rarity_weights;
    results.push(TestResult {
        name: "rules_rarity_total".into(),
        passed: weights.total() == 100,
        detail: format!(
            "{}/{}/{}/{} = {}",
            weights.common,
            weights.uncommon,
            weights.rare,
            weights.legendary,
            weights.total()
        ),
    });

    // A broken rule file must be refused with every problem listed
    let mut broken = GardenConfig::default();
    broken.max_days = 0;
    broken.event_base_chance = 1.5;
    broken.gate_threshold = 9;
    let errors = validate_config(&broken);
    results.push(TestResult {
        name: "rules_validation_reports_all".into(),
        passed: errors.len() == 3,
        detail: format!("{} errors reported for 3 faults", errors.len()),
    });

    Some(config)
}

// ── 2. Meter Clamping ───────────────────────────────────────────────────

fn validate_meter_clamping(verbose: bool) -> Vec<TestResult> {
    println!("--- Meter Clamping ---");
    let mut results = Vec::new();

    let mut mismatches = 0;
    let mut checked = 0;
    for start in (0..=100).step_by(5) {
        for delta in (-150..=150).step_by(7) {
            for meter in Meter::ALL {
                let mut set = MeterSet::from_values(start, start, start, start);
                let got = set.apply_delta(meter, delta);
                let want = (start + delta).clamp(0, 100) as u8;
                checked += 1;
                if got != want || set.get(meter) != want {
                    mismatches += 1;
                    if verbose {
                        println!("    {:?} {} {:+} -> {} (want {})", meter, start, delta, got, want);
                    }
                }
            }
        }
    }
    results.push(TestResult {
        name: "clamp_sweep".into(),
        passed: mismatches == 0,
        detail: format!("{} deltas checked, {} mismatches", checked, mismatches),
    });

    results.push(TestResult {
        name: "clamp_extremes".into(),
        passed: clamp_meter(i32::MIN) == 0 && clamp_meter(i32::MAX) == METER_MAX,
        detail: "i32 extremes clamp to [0, 100]".into(),
    });

    // Zero on any meter ends the reign with that meter's ending
    let mut wrong = Vec::new();
    for meter in Meter::ALL {
        let mut session = GardenSession::default();
        session.apply_delta(meter, -100);
        if session.outcome() != Some(meter.collapse_outcome()) {
            wrong.push(meter.key());
        }
    }
    results.push(TestResult {
        name: "collapse_endings".into(),
        passed: wrong.is_empty(),
        detail: if wrong.is_empty() {
            "each meter collapse names its ending".into()
        } else {
            format!("wrong ending for: {}", wrong.join(", "))
        },
    });

    results
}

// ── 3. Ending Classifier ────────────────────────────────────────────────

fn validate_classifier(verbose: bool) -> Vec<TestResult> {
    println!("--- Ending Classifier ---");
    let mut results = Vec::new();

    let table: [((i32, i32, i32, i32), Outcome); 8] = [
        ((50, 50, 50, 50), Outcome::Survival),
        ((60, 60, 20, 90), Outcome::CivilUnrest),
        ((60, 60, 28, 90), Outcome::Despotism),
        ((30, 80, 80, 80), Outcome::UncertainTimes),
        ((0, 90, 90, 90), Outcome::Plague),
        ((90, 90, 0, 90), Outcome::Rebellion),
        ((90, 90, 90, 0), Outcome::Rebellion),
        ((41, 41, 41, 41), Outcome::Survival),
    ];
    let mut bad = 0;
    for ((h, s, t, st), want) in table {
        let got = final_outcome(&MeterSet::from_values(h, s, t, st));
        if got != want {
            bad += 1;
        }
        if verbose || got != want {
            println!("    ({}, {}, {}, {}) -> {} (want {})", h, s, t, st, got, want);
        }
    }
    results.push(TestResult {
        name: "classifier_table".into(),
        passed: bad == 0,
        detail: format!("{}/{} rows match", table.len() - bad, table.len()),
    });

    let before_limit = classify(&MeterSet::from_values(0, 0, 0, 0), 10, 10);
    let after_limit = classify(&MeterSet::default(), 11, 10);
    results.push(TestResult {
        name: "classifier_day_gate".into(),
        passed: before_limit.is_none() && after_limit == Some(Outcome::Survival),
        detail: format!("day 10: {:?}, day 11: {:?}", before_limit, after_limit),
    });

    let victories: Vec<_> = Outcome::ALL.iter().filter(|o| o.is_victory()).collect();
    results.push(TestResult {
        name: "classifier_single_victory".into(),
        passed: victories == vec![&Outcome::Survival],
        detail: format!("victory endings: {:?}", victories),
    });

    results
}

// ── 4. Seeded Reigns ────────────────────────────────────────────────────

struct ReignStats {
    endings: HashMap<Outcome, u32>,
    out_of_range: u32,
    overlong: u32,
    unended: u32,
    frozen_violations: u32,
}

fn play_reign(config: &GardenConfig, director: &ContentDirector, rng: &mut StdRng) -> GardenSession {
    let mut session = GardenSession::new(config.clone());
    // enough loop turns for every day plus slack
    let max_turns = (config.max_days as usize + 2) * 4;

    for _ in 0..max_turns {
        if session.is_terminal() {
            break;
        }
        let day = session.state().day;
        if let Some(event) = director.draw_event(day, rng) {
            let choice = rng.gen_range(0..event.choices.len());
            if session.resolve_event(event, choice).is_err() {
                break;
            }
        }
        while session.phase() == SessionPhase::Active {
            let (first, second) = match director.daily_visitors(rng) {
                Ok(pair) => pair,
                Err(_) => return session,
            };
            for visitor in [first, second] {
                if session.phase() != SessionPhase::Active {
                    break;
                }
                let decision = if rng.gen_bool(0.5) {
                    Decision::Allow
                } else {
                    Decision::Deny
                };
                session.resolve_visitor(visitor, decision);
            }
        }
        if session.phase() == SessionPhase::DayComplete {
            session.advance_day();
        }
    }
    session
}

fn validate_reigns(
    config: &GardenConfig,
    seed: u64,
    sessions: u32,
    verbose: bool,
) -> Vec<TestResult> {
    println!("--- Seeded Reigns ({}) ---", sessions);
    let mut results = Vec::new();
    let director = ContentDirector::new(config);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut stats = ReignStats {
        endings: HashMap::new(),
        out_of_range: 0,
        overlong: 0,
        unended: 0,
        frozen_violations: 0,
    };

    for _ in 0..sessions {
        let mut session = play_reign(config, &director, &mut rng);
        if !session.is_terminal() {
            stats.unended += 1;
            continue;
        }
        if session.meters().iter().any(|(_, v)| v > METER_MAX) {
            stats.out_of_range += 1;
        }
        if session.state().day > config.max_days + 1 {
            stats.overlong += 1;
        }
        let frozen = session.snapshot();
        session.resolve_decision(&MeterEffects::new(25, 25, 25, 25));
        session.advance_day();
        if session.snapshot() != frozen {
            stats.frozen_violations += 1;
        }
        if let Some(outcome) = session.outcome() {
            *stats.endings.entry(outcome).or_insert(0) += 1;
        }
    }

    results.push(TestResult {
        name: "reigns_all_end".into(),
        passed: stats.unended == 0,
        detail: format!("{} of {} reigns never ended", stats.unended, sessions),
    });
    results.push(TestResult {
        name: "reigns_meters_in_range".into(),
        passed: stats.out_of_range == 0,
        detail: format!("{} reigns with out-of-range meters", stats.out_of_range),
    });
    results.push(TestResult {
        name: "reigns_day_bound".into(),
        passed: stats.overlong == 0,
        detail: format!("{} reigns past day {}", stats.overlong, config.max_days + 1),
    });
    results.push(TestResult {
        name: "reigns_terminal_absorbing".into(),
        passed: stats.frozen_violations == 0,
        detail: format!(
            "{} terminal sessions changed after further input",
            stats.frozen_violations
        ),
    });

    if verbose {
        let mut endings: Vec<_> = stats.endings.iter().collect();
        endings.sort_by(|a, b| b.1.cmp(a.1));
        for (outcome, count) in endings {
            println!("    {:<18} {:>5}", outcome.label(), count);
        }
    }

    // Same seed, same reign
    let mut a = StdRng::seed_from_u64(seed);
    let mut b = StdRng::seed_from_u64(seed);
    let first = play_reign(config, &director, &mut a).snapshot();
    let second = play_reign(config, &director, &mut b).snapshot();
    results.push(TestResult {
        name: "reigns_reproducible".into(),
        passed: first == second,
        detail: format!(
            "seed {} ends in {:?} on day {}",
            seed, first.terminal_reason, first.day
        ),
    });

    results
}

// ── 5. Visitor Draws ────────────────────────────────────────────────────

fn validate_visitor_draws(config: &GardenConfig, seed: u64, verbose: bool) -> Vec<TestResult> {
    println!("--- Visitor Draws ---");
    let mut results = Vec::new();
    let director = ContentDirector::new(config);
    let mut rng = StdRng::seed_from_u64(seed ^ 0x5eed);

    let pairs = 5000;
    let mut same = 0;
    let mut failed_draws = 0;
    for _ in 0..pairs {
        match director.daily_visitors(&mut rng) {
            Ok((a, b)) if a.id == b.id => same += 1,
            Ok(_) => {}
            Err(_) => failed_draws += 1,
        }
    }
    results.push(TestResult {
        name: "daily_pair_distinct".into(),
        passed: same == 0 && failed_draws == 0,
        detail: format!(
            "{} pairs, {} duplicates, {} failures",
            pairs, same, failed_draws
        ),
    });

    let rolls = 100_000u32;
    let mut counts: HashMap<Rarity, u32> = HashMap::new();
    for _ in 0..rolls {
        if let Some(r) = director.roll_rarity(&mut rng) {
            *counts.entry(r).or_insert(0) += 1;
        }
    }
    let weights = config.rarity_weights;
    let total = weights.total() as f64;
    let mut worst = 0.0f64;
    for rarity in Rarity::ALL {
        let observed = *counts.get(&rarity).unwrap_or(&0) as f64 / rolls as f64;
        let expected = weights.weight(rarity) as f64 / total;
        worst = worst.max((observed - expected).abs());
        if verbose {
            println!(
                "    {:?}: {:.3} (expected {:.3})",
                rarity, observed, expected
            );
        }
    }
    results.push(TestResult {
        name: "rarity_distribution".into(),
        passed: worst < 0.01,
        detail: format!("largest deviation {:.4} over {} rolls", worst, rolls),
    });

    let missing: Vec<_> = ["fruit_merchant", "shadow_merchant"]
        .iter()
        .filter(|id| director.visitor_by_id(id).is_err())
        .collect();
    results.push(TestResult {
        name: "visitor_lookup".into(),
        passed: missing.is_empty() && director.visitor_by_id("dragon").is_err(),
        detail: format!("{} visitors in catalog", VISITORS.len()),
    });

    results
}

// ── 6. Event Gating ─────────────────────────────────────────────────────

fn validate_event_gating(config: &GardenConfig, seed: u64, verbose: bool) -> Vec<TestResult> {
    println!("--- Event Gating ---");
    let mut results = Vec::new();
    let director = ContentDirector::new(config);
    let mut rng = StdRng::seed_from_u64(seed ^ 0xe7e7);

    let trials = 2000;
    let quiet_fired = (1..=config.event_quiet_days)
        .flat_map(|day| std::iter::repeat(day).take(trials))
        .filter(|&day| director.draw_event(day, &mut rng).is_some())
        .count();
    results.push(TestResult {
        name: "events_quiet_days".into(),
        passed: quiet_fired == 0,
        detail: format!(
            "{} events on days 1..={}",
            quiet_fired, config.event_quiet_days
        ),
    });

    // Each event only becomes eligible on its trigger day
    let mut misfires = Vec::new();
    for event in RANDOM_EVENTS {
        for day in 1..=config.max_days {
            if director
                .events_for_day(day, &mut rng)
                .iter()
                .any(|e| e.id == event.id && day != event.trigger_day)
            {
                misfires.push(format!("{}@{}", event.id, day));
            }
        }
    }
    results.push(TestResult {
        name: "events_trigger_day_only".into(),
        passed: misfires.is_empty(),
        detail: if misfires.is_empty() {
            format!("{} events checked", RANDOM_EVENTS.len())
        } else {
            format!("off-day events: {}", misfires.join(", "))
        },
    });

    // Trigger-day rate matches the configured gate
    let day = RANDOM_EVENTS[0].trigger_day;
    let fired = (0..trials)
        .filter(|_| !director.events_for_day(day, &mut rng).is_empty())
        .count();
    let rate = fired as f64 / trials as f64;
    if verbose {
        println!("    day {} fired {:.3} (gate {:.2})", day, rate, config.event_trigger_chance);
    }
    results.push(TestResult {
        name: "events_trigger_rate".into(),
        passed: (rate - config.event_trigger_chance).abs() < 0.05,
        detail: format!("day {} fired {:.3}", day, rate),
    });

    // Events never use a visitor slot
    let mut session = GardenSession::new(config.clone());
    let applied = session.resolve_event(&RANDOM_EVENTS[0], 0).is_ok();
    let bad_choice = session.resolve_event(&RANDOM_EVENTS[0], 99).is_err();
    results.push(TestResult {
        name: "events_free_slot".into(),
        passed: applied && bad_choice && session.state().visitors_today == 0,
        detail: format!("visitors_today = {}", session.state().visitors_today),
    });

    results
}

// ── 7. Medal Track ──────────────────────────────────────────────────────

fn validate_medals(config: &GardenConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Medal Track ---");
    let mut results = Vec::new();
    let mut track = MedalTrack::new(config);

    let mut awards = Vec::new();
    for _ in 0..=config.medal_cap {
        awards.push(track.award_medal(MedalSource::FishCatching));
    }
    if verbose {
        println!("    awards: {:?}", awards);
    }
    let capped = awards.last() == Some(&false)
        && awards[..awards.len() - 1].iter().all(|&a| a)
        && track.medals() == config.medal_cap;
    results.push(TestResult {
        name: "medals_capped".into(),
        passed: capped,
        detail: format!("{} medals after {} awards", track.medals(), awards.len()),
    });

    results.push(TestResult {
        name: "medals_gate_open".into(),
        passed: track.can_open_gate(),
        detail: format!(
            "gate at {} of {} medals",
            config.gate_threshold,
            track.medals()
        ),
    });

    track.reset();
    let mut opened_at = None;
    for i in 1..=config.medal_cap {
        track.award_medal(MedalSource::ElephantSearch);
        if opened_at.is_none() && track.can_open_gate() {
            opened_at = Some(i);
        }
    }
    results.push(TestResult {
        name: "medals_gate_threshold".into(),
        passed: opened_at == Some(config.gate_threshold),
        detail: format!("gate opened after medal {:?}", opened_at),
    });

    results
}

// ── 8. Trials ───────────────────────────────────────────────────────────

fn validate_trials(seed: u64, verbose: bool) -> Vec<TestResult> {
    println!("--- Trials ---");
    let mut results = Vec::new();
    let params = GameParameters::default();
    let mut rng = StdRng::seed_from_u64(seed ^ 0xf15f);

    // Replay the fallback fish schedule, catching every fish that falls
    let plan = fish_spawn_plan(1536.0, &params.fish, &mut rng);
    let mut trial = FishTrial::new(&params.fish);
    let mut outcome = None;
    for fish in &plan {
        outcome = trial.catch(fish.kind);
        if outcome.is_some() {
            break;
        }
    }
    let first_bad = plan.iter().position(|f| f.kind == FishKind::Bad);
    let good_before_bad = first_bad.unwrap_or(plan.len());
    let expected = if good_before_bad >= params.fish.fishes_needed as usize {
        Some(TrialOutcome::Won)
    } else {
        Some(TrialOutcome::Corrupted)
    };
    results.push(TestResult {
        name: "fish_plan_replay".into(),
        passed: outcome == expected,
        detail: format!("{} fish scheduled, ended {:?}", plan.len(), outcome),
    });

    let mut timed = FishTrial::new(&params.fish);
    let mut ticks = 0;
    while timed.is_active() {
        timed.tick();
        ticks += 1;
    }
    results.push(TestResult {
        name: "fish_time_limit".into(),
        passed: ticks == params.fish.time_limit
            && timed.outcome() == Some(TrialOutcome::TimeUp { score: 0 }),
        detail: format!(
            "{} ticks, final speed {}",
            ticks,
            timed.speed()
        ),
    });

    let bounds = BoardBounds {
        x: 400.0,
        y: 100.0,
        width: 900.0,
        height: 700.0,
    };
    let placed = target_placements(&bounds, &["bird", "owl"], &params.puzzle, &mut rng);
    let mut search = SearchTrial::new(&params.puzzle);
    for i in 0..placed.len() as u32 {
        search.find(i);
    }
    results.push(TestResult {
        name: "search_all_found".into(),
        passed: search.outcome() == Some(TrialOutcome::Won),
        detail: format!("{} figures placed", placed.len()),
    });

    let d0 = difficulty(0, 7, 30, 30);
    let d1 = difficulty(0, 7, 0, 30);
    let eased = difficulty(7, 7, 0, 30);
    if verbose {
        println!("    difficulty start {:.2}, end {:.2}, eased {:.2}", d0, d1, eased);
    }
    results.push(TestResult {
        name: "difficulty_curve".into(),
        passed: d0 == 0.0 && d1 == 1.0 && eased < d1,
        detail: format!("{:.2} -> {:.2}, eased {:.2}", d0, d1, eased),
    });

    results
}

// ── 9. Oracle ───────────────────────────────────────────────────────────

fn validate_oracle(config: &GardenConfig, seed: u64, verbose: bool) -> Vec<TestResult> {
    println!("--- Oracle ---");
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(seed);
    // no text source is wired into the harness, so every line is a fallback
    let oracle = Oracle::from_config(config, None);
    let session = GardenSession::default();

    let mut strays = Vec::new();
    for id in ["guardian", "unicorn", "elephant", "giraffe", "rabbit", "dog", "owl"] {
        let character = Character::from_id(id);
        let request = OracleRequest::advice(character, OracleContext::Realm(session.snapshot()));
        let line = oracle.speak(&request, &mut rng);
        if verbose {
            println!("    {}: {}", id, line);
        }
        if !character.fallback_lines().contains(&line.as_str()) {
            strays.push(id);
        }
    }
    results.push(TestResult {
        name: "oracle_offline_fallback".into(),
        passed: strays.is_empty(),
        detail: if strays.is_empty() {
            "every character answered from its fallback lines".into()
        } else {
            format!("unexpected lines for: {}", strays.join(", "))
        },
    });

    results
}
