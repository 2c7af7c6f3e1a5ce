//! End-to-end scenarios through the public engine API.

use std::sync::Arc;

use tc_core::random::seeded;
use tc_core::{
    Calendar, CalendarDate, CalendarDefinition, EncounterChance, EncounterDetails, GameData,
    Month, OverlandEngine, ScriptedRolls, SiteEngine, Slot, Watch, Weather, Zone, ZoneKind,
};

fn zone(name: &str, kind: ZoneKind, chance: u32) -> Zone {
    Zone {
        name: name.to_string(),
        kinds: vec![kind],
        encounter_chance: EncounterChance::new(chance),
    }
}

fn details(name: &str, sparks: &[&str]) -> EncounterDetails {
    EncounterDetails {
        name: name.to_string(),
        description: format!("{name} on the move"),
        habitat: "Everywhere".to_string(),
        sparks: sparks.iter().map(|s| s.to_string()).collect(),
        watch_percent: [100; 6],
    }
}

fn data() -> GameData {
    GameData::new()
        .with_zone(zone("Road", ZoneKind::Overland, 100))
        .with_zone(zone("Cave", ZoneKind::Site, 40))
        .with_encounter(details("Merchant", &["haggling", "lame mule", "rumours", "escort"]))
        .with_encounter(details("Rats", &["squeaking", "nest"]))
        .with_encounter(details("Slime", &["drip"]))
        .with_zone_weight("Road", "Merchant", 1)
        .with_zone_weight("Cave", "Rats", 3)
        .with_zone_weight("Cave", "Slime", 1)
        .with_weather(Weather::plain("Clear"))
        .with_season_weight("Summer", "Clear", 1)
        .build()
}

#[test]
fn road_dawn_is_always_the_merchant() {
    let data = Arc::new(data());
    let pool = ["haggling", "lame mule", "rumours", "escort"];
    for seed in 0..100 {
        let mut engine = OverlandEngine::new(Arc::clone(&data), seeded(seed));
        engine.set_zone("Road").unwrap();
        engine.set_season("Summer").unwrap();
        let dawn = engine.regenerate_one(Watch::Dawn).unwrap();
        assert_eq!(dawn.name.as_deref(), Some("Merchant"));
        assert!((1..=4).contains(&dawn.sparks.len()));
        assert!(dawn.sparks.iter().all(|s| pool.contains(&s.as_str())));
    }
}

#[test]
fn cave_current_slot_starts_empty() {
    let data = Arc::new(data());
    for seed in 0..50 {
        let mut site = SiteEngine::new(Arc::clone(&data), seeded(seed));
        site.set_zone("Cave").unwrap();
        site.reset();
        let state = site.generate().unwrap();
        assert!(state.encounter(Slot::Current).unwrap().name.is_none());
        for slot in &Slot::ALL[1..] {
            let enc = state.encounter(*slot).unwrap();
            if let Some(name) = &enc.name {
                assert!(name == "Rats" || name == "Slime");
            }
        }
    }
}

#[test]
fn scripted_site_is_exact() {
    // gate 40 passes, table 4 of 4 = Slime, one spark; then gates of 41 fail
    let rolls = ScriptedRolls::new([40, 4, 1, 1, 41, 41, 41, 41]);
    let mut site = SiteEngine::new(Arc::new(data()), rolls);
    site.set_zone("Cave").unwrap();
    let state = site.generate().unwrap();
    let names: Vec<_> = state
        .encounters
        .iter()
        .map(|e| e.as_ref().unwrap().name.clone())
        .collect();
    assert_eq!(
        names,
        vec![None, Some("Slime".to_string()), None, None, None, None]
    );
    assert_eq!(state.encounter(Slot::In10).unwrap().sparks, vec!["drip"]);
}

#[test]
fn expanded_encounter_reaches_current() {
    let mut site = SiteEngine::new(Arc::new(data()), seeded(3));
    site.set_zone("Cave").unwrap();
    site.generate().unwrap();
    let tracked = site.state().encounter(Slot::In20).cloned();
    site.set_expanded(Slot::In20, true);

    site.advance_turn().unwrap();
    assert!(site.state().expanded.slot(Slot::In10));
    site.advance_turn().unwrap();
    assert!(site.state().expanded.slot(Slot::Current));
    assert_eq!(site.state().encounter(Slot::Current).cloned(), tracked);
    assert!(!site.state().expanded.slot(Slot::In50));
}

#[test]
fn timer_of_25_minutes() {
    let mut site = SiteEngine::new(Arc::new(data()), seeded(9));
    site.set_zone("Cave").unwrap();
    site.generate().unwrap();
    let timer = site.add_timer("Lantern oil", 25);

    site.advance_turn().unwrap();
    site.advance_turn().unwrap();
    let t = site.state().timers.get(timer.id).unwrap();
    assert_eq!(t.remaining_minutes, 5);
    assert_eq!(t.to_string(), "Current: Lantern oil");

    site.advance_turn().unwrap();
    assert!(site.state().timers.get(timer.id).is_none());
    assert_eq!(site.state().elapsed_minutes, 30);
}

#[test]
fn calendar_wraps_and_tracks_season() {
    let mut cal = Calendar::new(CalendarDefinition {
        months: vec![
            Month {
                name: "Early".to_string(),
                days: 5,
                season: "Summer".to_string(),
            },
            Month {
                name: "Late".to_string(),
                days: 5,
                season: "Winter".to_string(),
            },
        ],
        holidays: vec![],
        days_per_week: 5,
        current_date: Some(CalendarDate::new(2, 5)),
    })
    .unwrap();

    assert_eq!(cal.advance(1).unwrap().date, CalendarDate::new(1, 1));
    cal.set_date(2, 3).unwrap();
    let today = cal.current_date().unwrap();
    assert_eq!(cal.season_of(today).unwrap(), "Winter");
}
