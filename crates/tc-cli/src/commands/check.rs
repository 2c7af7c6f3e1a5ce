use std::path::Path;

use comfy_table::{ContentArrangement, Table};

pub fn run(dir: &Path) -> Result<(), String> {
    let loaded = super::load(dir)?;
    let data = &loaded.data;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Zone", "Types", "Chance", "Encounters"]);
    for zone in data.zones.all() {
        let kinds: Vec<String> = zone.kinds.iter().map(ToString::to_string).collect();
        let encounters = data
            .encounter_by_zone
            .entries(&zone.name)
            .map(|entries| entries.iter().filter(|e| e.weight > 0).count())
            .unwrap_or(0);
        table.add_row(vec![
            zone.name.clone(),
            kinds.join(", "),
            zone.encounter_chance.to_string(),
            encounters.to_string(),
        ]);
    }
    println!("{table}");
    println!();

    if loaded.warnings.is_empty() {
        println!("  All checks passed for '{}'.", dir.display());
    } else {
        println!("  Loaded '{}' with warnings.", dir.display());
    }
    println!(
        "  {} zones, {} encounters, {} weathers, {} seasons",
        data.zones.len(),
        data.encounters.len(),
        data.weathers.len(),
        data.seasons.len()
    );
    match loaded.open_calendar() {
        Some(cal) => println!(
            "  Calendar: {} months, {} holidays, today {}",
            cal.months().len(),
            cal.holidays().len(),
            cal.current_label()
        ),
        None => println!("  No calendar."),
    }

    Ok(())
}
