use std::path::Path;
use std::sync::Arc;

use colored::Colorize;

use tc_core::random::seeded;
use tc_core::{SiteEngine, SiteState, Slot, Timer};

/// Parse `NAME=MINUTES`.
fn parse_timer(arg: &str) -> Result<(&str, i32), String> {
    let (name, minutes) = arg
        .rsplit_once('=')
        .ok_or_else(|| format!("timer '{arg}' must be NAME=MINUTES"))?;
    let minutes = minutes
        .trim()
        .parse()
        .map_err(|_| format!("timer '{arg}' has a bad minute count"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("timer '{arg}' has no name"));
    }
    Ok((name, minutes))
}

fn print_state(zone: &str, state: &SiteState) {
    println!("  {}", format!("Site: {zone} | {}", state.elapsed_label()).bold());
    let table = super::encounter_table(
        Slot::ALL
            .iter()
            .map(|s| (s.label(), state.encounter(*s))),
    );
    println!("{table}");
    if !state.timers.is_empty() {
        println!("  Timers:");
        for timer in state.timers.all() {
            println!("    {timer}");
        }
    }
    println!();
}

pub fn run(dir: &Path, zone: &str, turns: u32, timers: &[String], seed: u64) -> Result<(), String> {
    let timers = timers
        .iter()
        .map(|t| parse_timer(t))
        .collect::<Result<Vec<_>, _>>()?;

    let loaded = super::load(dir)?;
    let mut engine = SiteEngine::new(Arc::new(loaded.data), seeded(seed));
    let zone = engine.set_zone(zone).map_err(|e| e.to_string())?.to_string();
    engine.generate().map_err(|e| e.to_string())?;
    for (name, minutes) in timers {
        engine.add_timer(name, minutes);
    }
    print_state(&zone, engine.state());

    for _ in 0..turns {
        let before: Vec<Timer> = engine.state().timers.all().to_vec();
        engine.advance_turn().map_err(|e| e.to_string())?;
        let state = engine.state();
        for timer in before {
            if state.timers.get(timer.id).is_none() {
                println!("  {} {}", "Timer expired:".red(), timer.name);
            }
        }
        print_state(&zone, state);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_specs() {
        assert_eq!(parse_timer("Torch=60").unwrap(), ("Torch", 60));
        assert_eq!(parse_timer("Spell = 5").unwrap(), ("Spell", 5));
        assert!(parse_timer("Torch").is_err());
        assert!(parse_timer("=10").is_err());
        assert!(parse_timer("Torch=soon").is_err());
    }
}
