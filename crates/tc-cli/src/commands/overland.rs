use std::path::Path;
use std::sync::Arc;

use colored::Colorize;

use tc_core::random::seeded;
use tc_core::{OverlandEngine, Watch};

pub fn run(
    dir: &Path,
    zone: &str,
    overlay: Option<&str>,
    season: Option<&str>,
    days: u32,
    seed: u64,
) -> Result<(), String> {
    let loaded = super::load(dir)?;
    let mut calendar = super::preview_calendar(&loaded)?;
    let mut engine = OverlandEngine::new(Arc::new(loaded.data), seeded(seed));

    engine.set_zone(zone).map_err(|e| e.to_string())?;
    engine.set_overlay(overlay).map_err(|e| e.to_string())?;
    if let Some(season) = season {
        engine.set_season(season).map_err(|e| e.to_string())?;
        // an explicit season overrides the calendar's
        calendar = None;
    }

    for _ in 0..days.max(1) {
        let change = engine
            .new_day(calendar.as_mut())
            .map_err(|e| e.to_string())?;
        let state = engine.state();
        let sel = engine.selection();

        let mut heading = format!(
            "Day {} | {}",
            state.day_count,
            sel.zone.as_deref().unwrap_or("-")
        );
        if let Some(overlay) = &sel.overlay {
            heading.push_str(&format!(" + {overlay}"));
        }
        heading.push_str(&format!(" | {}", sel.season.as_deref().unwrap_or("-")));
        println!("  {}", heading.bold());

        if let (Some(change), Some(cal)) = (change, calendar.as_ref()) {
            println!("  Date: {}", cal.label(change.date));
            if let Some(holiday) = cal.holiday_at(change.date) {
                println!("  Holiday: {}", holiday.name.cyan());
            }
        }
        if let Some(weather) = &state.weather {
            println!("  Weather: {weather}");
        }

        let table = super::encounter_table(
            Watch::ALL
                .iter()
                .map(|w| (w.label(), state.encounter(*w))),
        );
        println!("{table}");

        if let Some(rest) = state.rest_info.as_ref().filter(|r| !r.is_empty()) {
            let dcs: Vec<String> = rest
                .rest_dcs
                .iter()
                .map(|d| format!("{} DC {}", d.camp, d.dc))
                .collect();
            if !dcs.is_empty() {
                println!("  Rest: {}", dcs.join(", "));
            }
            for m in &rest.weather_modifiers {
                println!("    {} {:+} ({})", m.effect, m.modifier, m.description);
            }
            for m in &rest.situational_modifiers {
                println!("    {} {:+}", m.situation, m.modifier);
            }
        }
        println!();
    }

    Ok(())
}
