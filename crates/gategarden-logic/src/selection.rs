//! Content selection: which visitors knock and which events intervene.
//!
//! All draws take an injected `Rng` so a seeded generator reproduces a
//! whole session. The director is agnostic to how its picks are shown;
//! the session engine is agnostic to how they were picked.

use rand::Rng;

use crate::config::GardenConfig;
use crate::error::{GardenError, Result};
use crate::events::{RandomEvent, RANDOM_EVENTS};
use crate::visitors::{Rarity, RarityWeights, Visitor, VISITORS};

/// Redraws before the second daily visitor is picked directly from the rest.
const MAX_PAIR_REDRAWS: usize = 32;

/// Picks visitors and events from the content tables.
#[derive(Debug, Clone)]
pub struct ContentDirector<'a> {
    visitors: &'a [Visitor],
    events: &'a [RandomEvent],
    weights: RarityWeights,
    trigger_chance: f64,
    base_chance: f64,
    quiet_days: u32,
}

impl ContentDirector<'static> {
    /// Director over the built-in tables.
    pub fn new(config: &GardenConfig) -> Self {
        Self::with_tables(VISITORS, RANDOM_EVENTS, config)
    }
}

impl<'a> ContentDirector<'a> {
    pub fn with_tables(
        visitors: &'a [Visitor],
        events: &'a [RandomEvent],
        config: &GardenConfig,
    ) -> Self {
        Self {
            visitors,
            events,
            weights: config.rarity_weights,
            trigger_chance: config.event_trigger_chance.clamp(0.0, 1.0),
            base_chance: config.event_base_chance.clamp(0.0, 1.0),
            quiet_days: config.event_quiet_days,
        }
    }

    pub fn visitors(&self) -> &'a [Visitor] {
        self.visitors
    }

    pub fn events(&self) -> &'a [RandomEvent] {
        self.events
    }

    pub fn visitor_by_id(&self, id: &str) -> Result<&'a Visitor> {
        self.visitors
            .iter()
            .find(|v| v.id == id)
            .ok_or_else(|| GardenError::UnknownVisitor(id.to_string()))
    }

    /// Weighted tier roll over `[0, total)`.
    ///
    /// Returns `None` when every weight is zero.
    pub fn roll_rarity(&self, rng: &mut impl Rng) -> Option<Rarity> {
        let total = self.weights.total();
        if total == 0 {
            return None;
        }
        let mut roll = rng.gen_range(0..total);
        for rarity in Rarity::ALL {
            let w = u64::from(self.weights.weight(rarity));
            if roll < w {
                return Some(rarity);
            }
            roll -= w;
        }
        None
    }

    /// One visitor: weighted tier, then uniform within the tier.
    ///
    /// An empty tier falls back to the common tier, then to the whole table.
    pub fn random_visitor(&self, rng: &mut impl Rng) -> Option<&'a Visitor> {
        if self.visitors.is_empty() {
            return None;
        }
        let rarity = self.roll_rarity(rng).unwrap_or(Rarity::Common);
        let mut pool = self.tier(rarity);
        if pool.is_empty() {
            pool = self.tier(Rarity::Common);
        }
        if pool.is_empty() {
            pool = self.visitors.iter().collect();
        }
        let visitor = pool[rng.gen_range(0..pool.len())];
        log::debug!("drew visitor {} ({:?})", visitor.id, rarity);
        Some(visitor)
    }

    /// Today's two visitors, always with distinct ids.
    pub fn daily_visitors(&self, rng: &mut impl Rng) -> Result<(&'a Visitor, &'a Visitor)> {
        let distinct_ids = {
            let mut ids: Vec<_> = self.visitors.iter().map(|v| v.id).collect();
            ids.sort_unstable();
            ids.dedup();
            ids.len()
        };
        if distinct_ids < 2 {
            return Err(GardenError::NotEnoughVisitors(distinct_ids));
        }

        let first = self
            .random_visitor(rng)
            .ok_or(GardenError::NotEnoughVisitors(0))?;
        for _ in 0..MAX_PAIR_REDRAWS {
            if let Some(second) = self.random_visitor(rng) {
                if second.id != first.id {
                    return Ok((first, second));
                }
            }
        }

        let rest: Vec<&Visitor> = self.visitors.iter().filter(|v| v.id != first.id).collect();
        let second = rest[rng.gen_range(0..rest.len())];
        Ok((first, second))
    }

    /// Events on their trigger day that also pass the trigger-chance gate.
    pub fn events_for_day(&self, day: u32, rng: &mut impl Rng) -> Vec<&'a RandomEvent> {
        self.events
            .iter()
            .filter(|e| e.is_eligible(day) && rng.gen_bool(self.trigger_chance))
            .collect()
    }

    /// Whether the event subsystem intervenes today at all.
    pub fn should_trigger_event(&self, day: u32, rng: &mut impl Rng) -> bool {
        if day <= self.quiet_days {
            return false;
        }
        if !self.events_for_day(day, rng).is_empty() {
            return true;
        }
        rng.gen_bool(self.base_chance)
    }

    /// Uniform pick among events whose trigger day has arrived.
    pub fn random_available_event(&self, day: u32, rng: &mut impl Rng) -> Option<&'a RandomEvent> {
        let available: Vec<_> = self.events.iter().filter(|e| e.trigger_day <= day).collect();
        if available.is_empty() {
            return None;
        }
        Some(available[rng.gen_range(0..available.len())])
    }

    /// The event (if any) that interrupts today's visitor flow.
    pub fn draw_event(&self, day: u32, rng: &mut impl Rng) -> Option<&'a RandomEvent> {
        if !self.should_trigger_event(day, rng) {
            return None;
        }
        let event = self
            .events_for_day(day, rng)
            .into_iter()
            .next()
            .or_else(|| self.random_available_event(day, rng));
        if let Some(e) = event {
            log::debug!("day {} event: {}", day, e.id);
        }
        event
    }

    fn tier(&self, rarity: Rarity) -> Vec<&'a Visitor> {
        self.visitors.iter().filter(|v| v.rarity == rarity).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventChoice;
    use crate::meters::MeterEffects;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn visitor(id: &'static str, rarity: Rarity) -> Visitor {
        Visitor {
            id,
            name: id,
            description: "",
            rarity,
            allow: MeterEffects::new(1, 0, 0, 0),
            deny: MeterEffects::new(-1, 0, 0, 0),
        }
    }

    static ONE_CHOICE: &[EventChoice] = &[EventChoice {
        text: "ok",
        effects: MeterEffects::new(0, 1, 0, 0),
    }];

    fn event(id: &'static str, trigger_day: u32) -> RandomEvent {
        RandomEvent {
            id,
            name: id,
            description: "",
            trigger_day,
            choices: ONE_CHOICE,
        }
    }

    #[test]
    fn test_daily_visitors_distinct() {
        let director = ContentDirector::new(&GardenConfig::default());
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let (a, b) = director.daily_visitors(&mut rng).unwrap();
            assert_ne!(a.id, b.id);
        }
    }

    #[test]
    fn test_daily_visitors_two_entry_table() {
        // "b" is drawn only when the legendary tier is rolled
        let table = vec![visitor("a", Rarity::Common), visitor("b", Rarity::Legendary)];
        let director = ContentDirector::with_tables(&table, &[], &GardenConfig::default());
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..200 {
            let (a, b) = director.daily_visitors(&mut rng).unwrap();
            assert_ne!(a.id, b.id);
        }
    }

    #[test]
    fn test_daily_visitors_needs_two() {
        let table = vec![visitor("solo", Rarity::Common)];
        let director = ContentDirector::with_tables(&table, &[], &GardenConfig::default());
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            director.daily_visitors(&mut rng),
            Err(GardenError::NotEnoughVisitors(1))
        ));
    }

    #[test]
    fn test_empty_tier_falls_back_to_common() {
        let table = vec![visitor("c1", Rarity::Common), visitor("c2", Rarity::Common)];
        let mut config = GardenConfig::default();
        config.rarity_weights = RarityWeights {
            common: 0,
            uncommon: 0,
            rare: 0,
            legendary: 1,
        };
        let director = ContentDirector::with_tables(&table, &[], &config);
        let mut rng = StdRng::seed_from_u64(3);
        let v = director.random_visitor(&mut rng).unwrap();
        assert_eq!(v.rarity, Rarity::Common);
    }

    #[test]
    fn test_empty_common_falls_back_to_table() {
        let table = vec![visitor("r1", Rarity::Rare)];
        let mut config = GardenConfig::default();
        config.rarity_weights.rare = 0;
        let director = ContentDirector::with_tables(&table, &[], &config);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            assert_eq!(director.random_visitor(&mut rng).unwrap().id, "r1");
        }
    }

    #[test]
    fn test_rarity_roll_follows_weights() {
        let director = ContentDirector::new(&GardenConfig::default());
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts = [0u32; 4];
        let n = 20_000;
        for _ in 0..n {
            let r = director.roll_rarity(&mut rng).unwrap();
            let idx = Rarity::ALL.iter().position(|&x| x == r).unwrap();
            counts[idx] += 1;
        }
        let expected = [0.60, 0.25, 0.12, 0.03];
        for (count, exp) in counts.iter().zip(expected) {
            let frac = *count as f64 / n as f64;
            assert!((frac - exp).abs() < 0.02, "got {} expected {}", frac, exp);
        }
    }

    #[test]
    fn test_roll_rarity_zero_weights() {
        let mut config = GardenConfig::default();
        config.rarity_weights = RarityWeights {
            common: 0,
            uncommon: 0,
            rare: 0,
            legendary: 0,
        };
        let director = ContentDirector::new(&config);
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(director.roll_rarity(&mut rng), None);
        // still draws something from the common tier
        assert!(director.random_visitor(&mut rng).is_some());
    }

    #[test]
    fn test_roll_rarity_huge_weights() {
        let mut config = GardenConfig::default();
        config.rarity_weights = RarityWeights {
            common: u32::MAX,
            uncommon: u32::MAX,
            rare: u32::MAX,
            legendary: u32::MAX,
        };
        let director = ContentDirector::new(&config);
        let mut rng = StdRng::seed_from_u64(23);
        for _ in 0..100 {
            assert!(director.roll_rarity(&mut rng).is_some());
        }
    }

    #[test]
    fn test_visitor_by_id() {
        let director = ContentDirector::new(&GardenConfig::default());
        assert_eq!(director.visitor_by_id("mirror_twin").unwrap().rarity, Rarity::Rare);
        assert!(matches!(
            director.visitor_by_id("nobody"),
            Err(GardenError::UnknownVisitor(_))
        ));
    }

    #[test]
    fn test_no_events_in_quiet_days() {
        let director = ContentDirector::new(&GardenConfig::default());
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..100 {
            assert!(!director.should_trigger_event(1, &mut rng));
            assert!(!director.should_trigger_event(2, &mut rng));
            assert!(director.draw_event(2, &mut rng).is_none());
        }
    }

    #[test]
    fn test_events_for_day_gate() {
        let events = vec![event("e3", 3)];
        let mut config = GardenConfig::default();
        config.event_trigger_chance = 1.0;
        let always = ContentDirector::with_tables(&[], &events, &config);
        config.event_trigger_chance = 0.0;
        let never = ContentDirector::with_tables(&[], &events, &config);
        let mut rng = StdRng::seed_from_u64(9);

        assert_eq!(always.events_for_day(3, &mut rng).len(), 1);
        assert!(always.events_for_day(4, &mut rng).is_empty());
        assert!(never.events_for_day(3, &mut rng).is_empty());
    }

    #[test]
    fn test_event_trigger_rate() {
        let events = vec![event("e5", 5)];
        let director = ContentDirector::with_tables(&[], &events, &GardenConfig::default());
        let mut rng = StdRng::seed_from_u64(11);
        let n = 10_000;
        let fired = (0..n)
            .filter(|_| !director.events_for_day(5, &mut rng).is_empty())
            .count();
        let frac = fired as f64 / n as f64;
        assert!((frac - 0.7).abs() < 0.03, "trigger rate {}", frac);
    }

    #[test]
    fn test_ordinary_day_base_chance() {
        let director = ContentDirector::with_tables(&[], &[], &GardenConfig::default());
        let mut rng = StdRng::seed_from_u64(13);
        let n = 10_000;
        let fired = (0..n)
            .filter(|_| director.should_trigger_event(4, &mut rng))
            .count();
        let frac = fired as f64 / n as f64;
        assert!((frac - 0.3).abs() < 0.03, "base rate {}", frac);
    }

    #[test]
    fn test_random_available_event_respects_day() {
        let events = vec![event("early", 3), event("late", 9)];
        let director = ContentDirector::with_tables(&[], &events, &GardenConfig::default());
        let mut rng = StdRng::seed_from_u64(17);
        assert!(director.random_available_event(2, &mut rng).is_none());
        for _ in 0..50 {
            assert_eq!(director.random_available_event(5, &mut rng).unwrap().id, "early");
        }
    }

    #[test]
    fn test_draw_event_prefers_todays_event() {
        let events = vec![event("early", 3), event("today", 6)];
        let mut config = GardenConfig::default();
        config.event_trigger_chance = 1.0;
        let director = ContentDirector::with_tables(&[], &events, &config);
        let mut rng = StdRng::seed_from_u64(19);
        for _ in 0..50 {
            assert_eq!(director.draw_event(6, &mut rng).unwrap().id, "today");
        }
    }

    #[test]
    fn test_draw_event_deterministic_with_seed() {
        let director = ContentDirector::new(&GardenConfig::default());
        let draws = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (1..=10)
                .map(|day| director.draw_event(day, &mut rng).map(|e| e.id))
                .collect::<Vec<_>>()
        };
        assert_eq!(draws(99), draws(99));
    }
}
