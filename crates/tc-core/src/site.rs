//! Turn-by-turn site exploration.
//!
//! A site keeps a rolling window of six encounter slots ten minutes apart,
//! the timers running inside the site, and the detail flags of each slot.
//! A turn moves everything one slot nearer and rolls a fresh "50 minutes".

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::data::GameData;
use crate::encounter::{Encounter, EncounterRoll};
use crate::error::{TcError, TcResult};
use crate::expansion::ExpansionFlags;
use crate::random::RandomSource;
use crate::time::{Slot, TURN_MINUTES, format_elapsed};
use crate::timer::{Timer, TimerId, TimerList};
use crate::zone::ZoneKind;

/// The site window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteState {
    /// Minutes since the site was entered, a multiple of ten.
    pub elapsed_minutes: u32,
    /// Encounter per slot, indexed by [`Slot::index`].
    pub encounters: [Option<Encounter>; 6],
    /// Running timers, shortest first.
    pub timers: TimerList,
    /// Which slots have their details open.
    pub expanded: ExpansionFlags,
}

impl SiteState {
    /// The encounter in a slot.
    pub fn encounter(&self, slot: Slot) -> Option<&Encounter> {
        self.encounters[slot.index()].as_ref()
    }

    /// Elapsed time as shown to the GM.
    pub fn elapsed_label(&self) -> String {
        format_elapsed(self.elapsed_minutes)
    }
}

/// Generates and advances a site.
#[derive(Debug)]
pub struct SiteEngine<R> {
    data: Arc<GameData>,
    rng: R,
    zone: Option<String>,
    state: SiteState,
}

impl<R: RandomSource> SiteEngine<R> {
    /// Create an engine with no zone selected.
    pub fn new(data: Arc<GameData>, rng: R) -> Self {
        Self {
            data,
            rng,
            zone: None,
            state: SiteState::default(),
        }
    }

    /// The current window.
    pub fn state(&self) -> &SiteState {
        &self.state
    }

    /// The selected site zone.
    pub fn zone(&self) -> Option<&str> {
        self.zone.as_deref()
    }

    /// Select the site zone by case-insensitive name. The zone must be a
    /// `Site` zone.
    pub fn set_zone(&mut self, name: &str) -> TcResult<&str> {
        let zone = self.data.zones.select(name, ZoneKind::Site)?;
        log::info!("site zone: {}", zone.name);
        Ok(self.zone.insert(zone.name.clone()).as_str())
    }

    fn require_zone(&self) -> TcResult<String> {
        self.zone
            .clone()
            .ok_or_else(|| TcError::Validation("no site zone selected".into()))
    }

    fn roll_slot(&mut self, zone: &str, slot: Slot) -> TcResult<Encounter> {
        let context = zone.to_string();
        EncounterRoll {
            zone: self.data.zones.require(zone)?,
            table: &self.data.encounter_by_zone,
            context: &context,
            catalog: &self.data.encounters,
            time: slot.label(),
            rng: &mut self.rng,
        }
        .generate()
    }

    fn roll_window(&mut self, zone: &str, include_current: bool) -> TcResult<[Option<Encounter>; 6]> {
        let mut encounters: [Option<Encounter>; 6] = Default::default();
        for slot in Slot::ALL {
            let encounter = if slot == Slot::Current && !include_current {
                Encounter::none(slot.label())
            } else {
                self.roll_slot(zone, slot)?
            };
            encounters[slot.index()] = Some(encounter);
        }
        Ok(encounters)
    }

    /// Enter the site: time 0, no timers, nothing expanded, nothing
    /// happening yet and five rolled future slots.
    pub fn generate(&mut self) -> TcResult<&SiteState> {
        let zone = self.require_zone()?;
        let encounters = self.roll_window(&zone, false)?;
        self.state = SiteState {
            encounters,
            ..SiteState::default()
        };
        log::info!("site generated in {zone}");
        Ok(&self.state)
    }

    /// Let ten minutes pass.
    ///
    /// Timers count down and expired ones are dropped. Every slot and its
    /// detail flag move one nearer; the new "50 minutes" slot is rolled and
    /// starts closed.
    pub fn advance_turn(&mut self) -> TcResult<&SiteState> {
        let zone = self.require_zone()?;
        let newest = self.roll_slot(&zone, Slot::In50)?;

        self.state.elapsed_minutes += TURN_MINUTES;
        self.state.timers.tick(TURN_MINUTES as i32);
        self.state.encounters.rotate_left(1);
        self.state.encounters[Slot::In50.index()] = Some(newest);
        self.state.expanded.rotate();

        log::info!("site turn: {}", self.state.elapsed_label());
        Ok(&self.state)
    }

    /// Reroll what is happening now.
    pub fn regenerate_current(&mut self) -> TcResult<&Encounter> {
        self.regenerate_one(Slot::Current)
    }

    /// Reroll one slot. Flags, timers and other slots are untouched.
    pub fn regenerate_one(&mut self, slot: Slot) -> TcResult<&Encounter> {
        let zone = self.require_zone()?;
        let encounter = self.roll_slot(&zone, slot)?;
        log::info!("regenerated {slot}: {encounter}");
        Ok(&*self.state.encounters[slot.index()].insert(encounter))
    }

    /// Reroll all six slots, "Current" included, without passing time.
    pub fn regenerate_turn(&mut self) -> TcResult<&SiteState> {
        let zone = self.require_zone()?;
        self.state.encounters = self.roll_window(&zone, true)?;
        log::info!("regenerated site turn at {}", self.state.elapsed_label());
        Ok(&self.state)
    }

    /// Start a timer. Negative durations start at 0.
    pub fn add_timer(&mut self, name: impl Into<String>, minutes: i32) -> Timer {
        self.state.timers.add(name, minutes)
    }

    /// Stop a timer.
    pub fn remove_timer(&mut self, id: TimerId) -> TcResult<Timer> {
        self.state.timers.remove(id)
    }

    /// Stop the timer at a display position (0-based).
    pub fn remove_timer_at(&mut self, index: usize) -> TcResult<Timer> {
        self.state.timers.remove_at(index)
    }

    /// Open or close a slot's details.
    pub fn set_expanded(&mut self, slot: Slot, open: bool) {
        self.state.expanded.set(slot.index(), open);
    }

    /// Flip a slot's details. Returns the new value.
    pub fn toggle_expanded(&mut self, slot: Slot) -> bool {
        self.state.expanded.toggle(slot.index())
    }

    /// Clear everything without rolling. The zone stays selected.
    pub fn reset(&mut self) -> &SiteState {
        self.state = SiteState::default();
        log::info!("site reset");
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::game_data;
    use crate::random::{ScriptedRolls, seeded};
    use crate::timer::TimerState;
    use rand::rngs::StdRng;

    fn engine(zone: &str, seed: u64) -> SiteEngine<StdRng> {
        let mut e = SiteEngine::new(Arc::new(game_data()), seeded(seed));
        e.set_zone(zone).unwrap();
        e
    }

    fn named(name: &str, time: &str) -> Encounter {
        Encounter {
            name: Some(name.to_string()),
            time: time.to_string(),
            sparks: vec![],
            description: None,
            habitat: None,
        }
    }

    #[test]
    fn requires_zone() {
        let mut e = SiteEngine::new(Arc::new(game_data()), seeded(1));
        assert!(matches!(e.generate(), Err(TcError::Validation(_))));
        assert!(matches!(e.advance_turn(), Err(TcError::Validation(_))));
        assert_eq!(*e.state(), SiteState::default());
    }

    #[test]
    fn only_site_zones_are_accepted() {
        let mut e = SiteEngine::new(Arc::new(game_data()), seeded(1));
        assert!(matches!(e.set_zone("Road"), Err(TcError::Validation(_))));
        assert!(matches!(e.set_zone("Forest"), Err(TcError::Validation(_))));
        assert!(e.zone().is_none());
        assert_eq!(e.set_zone("empty").unwrap(), "Empty");
    }

    #[test]
    fn generate_leaves_current_empty() {
        for seed in 0..20 {
            let mut e = engine("Cave", seed);
            e.reset();
            let state = e.generate().unwrap();
            assert!(!state.encounter(Slot::Current).unwrap().is_encounter());
            for slot in &Slot::ALL[1..] {
                let enc = state.encounter(*slot).unwrap();
                assert_eq!(enc.name.as_deref(), Some("Bats"));
                assert_eq!(enc.time, slot.label());
            }
        }
    }

    #[test]
    fn closed_gate_means_quiet_site() {
        let mut e = engine("Empty", 4);
        e.generate().unwrap();
        for _ in 0..5 {
            e.advance_turn().unwrap();
        }
        assert!(
            e.state()
                .encounters
                .iter()
                .all(|s| !s.as_ref().unwrap().is_encounter())
        );
    }

    #[test]
    fn shift_before_generate() {
        let mut e = engine("Cave", 8);
        e.generate().unwrap();
        let labels = ["A", "B", "C", "D", "E", "F"];
        for (i, name) in labels.iter().enumerate() {
            e.state.encounters[i] = Some(named(name, Slot::ALL[i].label()));
        }
        let flags = [true, false, true, true, false, true];
        for (i, f) in flags.iter().enumerate() {
            e.state.expanded.set(i, *f);
        }

        let state = e.advance_turn().unwrap();
        let names: Vec<_> = state
            .encounters
            .iter()
            .map(|s| s.as_ref().unwrap().name.clone().unwrap())
            .collect();
        assert_eq!(&names[..5], &["B", "C", "D", "E", "F"]);
        assert_eq!(names[5], "Bats");
        assert_eq!(state.expanded.as_array(), [false, true, true, false, true, false]);
        assert_eq!(state.elapsed_minutes, 10);
    }

    #[test]
    fn failed_roll_leaves_state() {
        let mut data = game_data();
        data.encounter_by_zone.insert("Ghost Town".to_string(), "Nobody".to_string(), 1);
        data.zones.add(crate::data::fixtures::zone(
            "Ghost Town",
            &[crate::zone::ZoneKind::Site],
            100,
        ));
        let mut e = SiteEngine::new(Arc::new(data), ScriptedRolls::default());
        e.set_zone("Ghost Town").unwrap();
        e.add_timer("Torch", 30);
        let before = e.state().clone();
        assert!(matches!(e.advance_turn(), Err(TcError::Configuration(_))));
        assert_eq!(*e.state(), before);
    }

    #[test]
    fn timer_counts_down_and_expires() {
        let mut e = engine("Cave", 2);
        e.generate().unwrap();
        let t = e.add_timer("Torch", 25);
        e.advance_turn().unwrap();
        e.advance_turn().unwrap();
        let timer = e.state().timers.get(t.id).unwrap();
        assert_eq!(timer.remaining_minutes, 5);
        assert_eq!(timer.state(), TimerState::Current);
        assert_eq!(timer.to_string(), "Current: Torch");
        e.advance_turn().unwrap();
        assert!(e.state().timers.get(t.id).is_none());
        assert!(matches!(e.remove_timer(t.id), Err(TcError::NotFound(_))));
    }

    #[test]
    fn generate_clears_timers_and_flags() {
        let mut e = engine("Cave", 2);
        e.generate().unwrap();
        e.add_timer("Torch", 60);
        e.toggle_expanded(Slot::In20);
        e.advance_turn().unwrap();
        e.generate().unwrap();
        assert_eq!(e.state().elapsed_minutes, 0);
        assert!(e.state().timers.is_empty());
        assert_eq!(e.state().expanded, ExpansionFlags::new());
    }

    #[test]
    fn regenerate_one_keeps_everything_else() {
        let mut e = engine("Cave", 6);
        e.generate().unwrap();
        e.add_timer("Rations", 40);
        e.toggle_expanded(Slot::Current);
        e.advance_turn().unwrap();
        let before = e.state().clone();

        let current = e.regenerate_current().unwrap().clone();
        assert_eq!(current.name.as_deref(), Some("Bats"));
        assert_eq!(current.time, "Current");
        let after = e.state();
        assert_eq!(after.timers, before.timers);
        assert_eq!(after.expanded, before.expanded);
        assert_eq!(after.elapsed_minutes, before.elapsed_minutes);
        for slot in &Slot::ALL[1..] {
            assert_eq!(after.encounter(*slot), before.encounter(*slot));
        }
    }

    #[test]
    fn regenerate_turn_includes_current() {
        let mut e = engine("Cave", 6);
        e.generate().unwrap();
        e.add_timer("Rations", 40);
        e.advance_turn().unwrap();
        let state = e.regenerate_turn().unwrap();
        assert!(state.encounters.iter().all(|s| s.as_ref().unwrap().is_encounter()));
        assert_eq!(state.elapsed_minutes, 10);
        assert_eq!(state.timers.len(), 1);
    }

    #[test]
    fn reset_clears_without_rolling() {
        let mut e = SiteEngine::new(Arc::new(game_data()), ScriptedRolls::default());
        e.set_zone("Cave").unwrap();
        e.generate().unwrap();
        let consumed = e.rng.consumed();
        let state = e.reset();
        assert_eq!(*state, SiteState::default());
        assert_eq!(e.rng.consumed(), consumed);
        assert_eq!(e.zone(), Some("Cave"));
    }

    #[test]
    fn elapsed_label_grows() {
        let mut e = engine("Cave", 1);
        e.generate().unwrap();
        for _ in 0..7 {
            e.advance_turn().unwrap();
        }
        assert_eq!(e.state().elapsed_label(), "70 minutes (1 hour 10 minutes)");
    }
}
