pub mod calendar;
pub mod check;
pub mod init;
pub mod overland;
pub mod play;
pub mod site;

use std::path::Path;

use colored::Colorize;
use tc_data::LoadedData;

/// Load a data directory and print its warnings to stderr.
fn load(dir: &Path) -> Result<LoadedData, String> {
    let loaded = tc_data::load_dir(dir).map_err(|e| e.to_string())?;
    print_warnings(&loaded.warnings);
    Ok(loaded)
}

fn print_warnings(warnings: &[String]) {
    for w in warnings {
        eprintln!("  {} {w}", "warning:".yellow());
    }
    if !warnings.is_empty() {
        eprintln!(
            "  {} warning{}",
            warnings.len(),
            if warnings.len() == 1 { "" } else { "s" }
        );
    }
}

/// Calendar for a preview run: loaded without persistence.
fn preview_calendar(loaded: &LoadedData) -> Result<Option<tc_core::Calendar>, String> {
    loaded
        .calendar
        .clone()
        .map(tc_core::Calendar::new)
        .transpose()
        .map_err(|e| e.to_string())
}

/// One row per watch or slot: time, encounter, sparks.
fn encounter_table<'a>(
    rows: impl IntoIterator<Item = (&'a str, Option<&'a tc_core::Encounter>)>,
) -> comfy_table::Table {
    let mut table = comfy_table::Table::new();
    table.set_content_arrangement(comfy_table::ContentArrangement::Dynamic);
    table.set_header(vec!["Time", "Encounter", "Sparks"]);
    for (label, encounter) in rows {
        let (name, sparks) = match encounter {
            Some(enc) => (
                enc.name.clone().unwrap_or_else(|| "No Encounter".to_string()),
                enc.sparks.join("; "),
            ),
            None => ("-".to_string(), String::new()),
        };
        table.add_row(vec![label.to_string(), name, sparks]);
    }
    table
}
