//! A small starter data directory.

use std::path::{Path, PathBuf};

use serde_json::{Value, json};

use crate::error::{DataError, DataResult};
use crate::manifest::MANIFEST_FILE;

fn manifest() -> Value {
    json!({
        "files": {
            "zones": "zones.json",
            "encounters": "encounters.json",
            "weathers": "weathers.json",
            "rest_info": "rest.json",
            "encounter_by_zone": "encounter_by_zone.json",
            "weather_by_season": "weather_by_season.json",
            "calendar": "calendar.json"
        }
    })
}

fn zones() -> Value {
    json!({
        "zones": [
            { "name": "Old Road", "types": ["Overland"], "encounter_chance": "20%" },
            { "name": "Deep Forest", "types": ["Overland", "Overlay"], "encounter_chance": "35%" },
            { "name": "River", "types": ["Overlay"], "encounter_chance": "25%" },
            { "name": "Barrow", "types": ["Site"], "encounter_chance": "40%" }
        ]
    })
}

fn encounters() -> Value {
    json!({
        "encounters": [
            {
                "name": "Merchant Caravan",
                "description": "Three wagons and a nervous guard.",
                "habitat": "Roads and fords",
                "sparks": ["Broken axle", "Smuggled goods", "Seeking an escort", "Rumours from the south"],
                "watch": { "dawn": "50%", "morning": "100%", "afternoon": "100%", "dusk": "50%" }
            },
            {
                "name": "Wolves",
                "description": "A hungry pack, shadowing the party.",
                "habitat": "Forest",
                "sparks": ["Howling", "Injured pup", "Fresh kill", "Alpha challenge"],
                "watch": { "dusk": "100%", "early night": "100%", "late night": "100%", "dawn": "50%" }
            },
            {
                "name": "Bandits",
                "description": "Ragged men with good bows.",
                "habitat": "Roads and forest edges",
                "sparks": ["Toll demanded", "Ambush", "Deserters", "Captive"],
                "watch": { "dawn": "100%", "morning": "50%", "afternoon": "50%", "dusk": "100%", "early night": "100%", "late night": "50%" }
            },
            {
                "name": "Ferryman",
                "description": "An old woman with a flat boat.",
                "habitat": "Rivers",
                "sparks": ["Wants a story", "Overloaded", "Knows the ford"],
                "watch": { "morning": "100%", "afternoon": "100%" }
            },
            {
                "name": "Skeletons",
                "description": "Bones that remember their oaths.",
                "habitat": "Tombs",
                "sparks": ["Rusted blades", "Guarding a door", "Crumbling"],
                "watch": { "dawn": "100%", "morning": "100%", "afternoon": "100%", "dusk": "100%", "early night": "100%", "late night": "100%" }
            },
            {
                "name": "Giant Rats",
                "description": "Fat and bold.",
                "habitat": "Underground",
                "sparks": ["Nest", "Disease", "Fleeing something"],
                "watch": { "dawn": "100%", "morning": "100%", "afternoon": "100%", "dusk": "100%", "early night": "100%", "late night": "100%" }
            }
        ]
    })
}

fn weathers() -> Value {
    json!({
        "weathers": [
            { "name": "Clear", "effects": [] },
            { "name": "Rain", "effects": ["Wet"] },
            { "name": "Fog", "effects": ["Low visibility"] },
            { "name": "Snow", "effects": ["Cold", "Wet"] },
            { "name": "Heat", "effects": ["Hot"] }
        ]
    })
}

fn rest() -> Value {
    json!({
        "rest_checks": {
            "rest_dcs": {
                "Spring": [ { "camp": "Shelter", "dc": 8 }, { "camp": "Open ground", "dc": 12 } ],
                "Summer": [ { "camp": "Shelter", "dc": 6 }, { "camp": "Open ground", "dc": 10 } ],
                "Autumn": [ { "camp": "Shelter", "dc": 8 }, { "camp": "Open ground", "dc": 13 } ],
                "Winter": [ { "camp": "Shelter", "dc": 11 }, { "camp": "Open ground", "dc": 16 } ]
            },
            "weather_modifiers": [
                { "effect": "Wet", "description": "Soaked bedding", "modifier": 2 },
                { "effect": "Cold", "description": "Biting cold", "modifier": 3 },
                { "effect": "Hot", "description": "Stifling night", "modifier": 1 }
            ],
            "situational_modifiers": [
                { "situation": "Campfire lit", "modifier": -2 },
                { "situation": "Watch kept", "modifier": -1 },
                { "situation": "Injured", "modifier": 2 }
            ]
        }
    })
}

fn encounter_by_zone() -> Value {
    json!({
        "zones": ["Old Road", "Deep Forest", "River", "Barrow"],
        "rows": [
            { "encounter": "Merchant Caravan", "weights": [4, 0, 1, 0] },
            { "encounter": "Wolves", "weights": [1, 4, 1, 0] },
            { "encounter": "Bandits", "weights": [3, 2, 0, 0] },
            { "encounter": "Ferryman", "weights": [0, 0, 3, 0] },
            { "encounter": "Skeletons", "weights": [0, 0, 0, 2] },
            { "encounter": "Giant Rats", "weights": [0, 1, 0, 3] }
        ]
    })
}

fn weather_by_season() -> Value {
    json!({
        "seasons": ["Spring", "Summer", "Autumn", "Winter"],
        "rows": [
            { "weather": "No Change", "weights": [3, 4, 3, 3] },
            { "weather": "Clear", "weights": [3, 5, 2, 1] },
            { "weather": "Rain", "weights": [4, 1, 4, 1] },
            { "weather": "Fog", "weights": [2, 0, 3, 2] },
            { "weather": "Snow", "weights": [0, 0, 1, 5] },
            { "weather": "Heat", "weights": [0, 3, 0, 0] }
        ]
    })
}

fn calendar() -> Value {
    json!({
        "calendar": {
            "months": [
                { "name": "Thaw", "days": 30, "season": "Spring" },
                { "name": "Bloom", "days": 30, "season": "Spring" },
                { "name": "Highsun", "days": 30, "season": "Summer" },
                { "name": "Harvest", "days": 30, "season": "Autumn" },
                { "name": "Leafall", "days": 30, "season": "Autumn" },
                { "name": "Deepfrost", "days": 30, "season": "Winter" }
            ],
            "holidays": [
                { "name": "First Light", "description": "The year begins with bonfires.", "month": "Thaw", "day": 1 },
                { "name": "Midsummer", "description": "Markets and duels.", "month": "Highsun", "day": 15 },
                { "name": "Long Night", "description": "Doors barred till dawn.", "month": "Deepfrost", "day": 30 }
            ],
            "days_per_week": 6,
            "current_date": { "month": 1, "day": 1 }
        }
    })
}

/// Write a starter data directory into `dir`, creating it if needed.
///
/// Refuses to touch a directory that already has a manifest. Returns the
/// files written.
pub fn write_template(dir: &Path) -> DataResult<Vec<PathBuf>> {
    if dir.join(MANIFEST_FILE).exists() {
        return Err(DataError::Invalid(format!(
            "{} already contains {MANIFEST_FILE}",
            dir.display()
        )));
    }
    std::fs::create_dir_all(dir).map_err(|e| DataError::io(dir, e))?;

    let files = [
        ("zones.json", zones()),
        ("encounters.json", encounters()),
        ("weathers.json", weathers()),
        ("rest.json", rest()),
        ("encounter_by_zone.json", encounter_by_zone()),
        ("weather_by_season.json", weather_by_season()),
        ("calendar.json", calendar()),
        (MANIFEST_FILE, manifest()),
    ];

    let mut written = Vec::with_capacity(files.len());
    for (name, value) in files {
        let path = dir.join(name);
        let text = serde_json::to_string_pretty(&value).map_err(|e| DataError::parse(&path, e))?;
        std::fs::write(&path, text + "\n").map_err(|e| DataError::io(&path, e))?;
        log::debug!("wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}
