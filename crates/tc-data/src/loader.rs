//! Loading a data directory into engine tables.

use std::path::{Path, PathBuf};

use tc_core::{
    Calendar, CalendarDefinition, EncounterCatalog, EncounterChance, EncounterDetails, GameData,
    RandomTable, Watch, Weather, WeatherCatalog, Zone, ZoneKind, ZoneTable,
};

use crate::error::{DataError, DataResult};
use crate::files::{EncountersFile, MatrixFile, RestFile, WeathersFile, ZonesFile};
use crate::manifest::{Manifest, read_json};
use crate::store::JsonCalendarStore;
use crate::validate::validate;

/// Everything read from a data directory.
#[derive(Debug)]
pub struct LoadedData {
    /// Tables for the engines.
    pub data: GameData,
    /// Calendar definition, when the directory has a usable one.
    pub calendar: Option<CalendarDefinition>,
    /// Where the calendar was read from.
    pub calendar_path: Option<PathBuf>,
    /// Problems that did not stop loading.
    pub warnings: Vec<String>,
}

impl LoadedData {
    /// Build the calendar, saving date changes back to its file.
    ///
    /// A definition the calendar rejects is logged and treated as absent.
    pub fn open_calendar(&self) -> Option<Calendar> {
        let definition = self.calendar.clone()?;
        match Calendar::new(definition) {
            Ok(calendar) => Some(match &self.calendar_path {
                Some(path) => calendar.with_store(Box::new(JsonCalendarStore::new(path))),
                None => calendar,
            }),
            Err(e) => {
                log::warn!("running without calendar: {e}");
                None
            }
        }
    }
}

/// Load every file named by the manifest in `dir`.
///
/// Missing or malformed required files are errors. Cross-reference
/// problems are collected as warnings.
pub fn load_dir(dir: &Path) -> DataResult<LoadedData> {
    let manifest = Manifest::load(dir)?;
    let files = &manifest.files;
    let mut warnings = Vec::new();

    let zones = load_zones(&Manifest::resolve(dir, &files.zones), &mut warnings)?;
    let encounters = load_encounters(&Manifest::resolve(dir, &files.encounters), &mut warnings)?;
    let weathers = load_weathers(&Manifest::resolve(dir, &files.weathers))?;
    let rest: RestFile = read_json(&Manifest::resolve(dir, &files.rest_info))?;
    let encounter_by_zone = load_matrix(&Manifest::resolve(dir, &files.encounter_by_zone))?;
    let (weather_by_season, seasons) =
        load_season_matrix(&Manifest::resolve(dir, &files.weather_by_season))?;

    let mut data = GameData {
        zones,
        encounters,
        encounter_by_zone,
        weathers,
        weather_by_season,
        seasons,
        rest: rest.rest_checks,
        ..GameData::default()
    };
    data.derive_watch_table();
    log::info!(
        "loaded {} zones, {} encounters, {} weathers, {} seasons",
        data.zones.len(),
        data.encounters.len(),
        data.weathers.len(),
        data.seasons.len()
    );

    let calendar_path = files.calendar.as_deref().map(|f| Manifest::resolve(dir, f));
    let calendar = match &calendar_path {
        Some(path) => match load_calendar(path) {
            Ok(calendar) => calendar,
            Err(e) => {
                warnings.push(format!("running without calendar: {e}"));
                None
            }
        },
        None => {
            log::info!("no calendar configured");
            None
        }
    };

    warnings.extend(validate(&data, calendar.as_ref()));
    for warning in &warnings {
        log::warn!("{warning}");
    }

    let calendar_path = calendar.as_ref().and(calendar_path);
    Ok(LoadedData {
        data,
        calendar,
        calendar_path,
        warnings,
    })
}

fn load_zones(path: &Path, warnings: &mut Vec<String>) -> DataResult<ZoneTable> {
    let file: ZonesFile = read_json(path)?;
    let mut table = ZoneTable::new();
    for entry in file.zones {
        let encounter_chance = EncounterChance::parse(&entry.encounter_chance.as_text())
            .map_err(|e| DataError::Invalid(format!("zone '{}': {e}", entry.name)))?;
        let mut kinds = Vec::new();
        for t in &entry.types {
            match ZoneKind::parse(t) {
                Some(kind) => kinds.push(kind),
                None => warnings.push(format!("zone '{}' has unknown type '{t}'", entry.name)),
            }
        }
        table.add(Zone {
            name: entry.name,
            kinds,
            encounter_chance,
        });
    }
    Ok(table)
}

fn load_encounters(path: &Path, warnings: &mut Vec<String>) -> DataResult<EncounterCatalog> {
    let file: EncountersFile = read_json(path)?;
    let mut catalog = EncounterCatalog::new();
    for entry in file.encounters {
        let mut watch_percent = [0u32; 6];
        for (key, value) in &entry.watch {
            let Some(watch) = Watch::parse(key) else {
                warnings.push(format!("encounter '{}' has unknown watch '{key}'", entry.name));
                continue;
            };
            let pct = EncounterChance::parse(&value.as_text()).map_err(|e| {
                DataError::Invalid(format!("encounter '{}' watch '{key}': {e}", entry.name))
            })?;
            watch_percent[watch.index()] = pct.percent();
        }
        catalog.add(EncounterDetails {
            name: entry.name,
            description: entry.description,
            habitat: entry.habitat,
            sparks: entry.sparks,
            watch_percent,
        });
    }
    Ok(catalog)
}

fn load_weathers(path: &Path) -> DataResult<WeatherCatalog> {
    let file: WeathersFile = read_json(path)?;
    let mut catalog = WeatherCatalog::new();
    for entry in file.weathers {
        catalog.add(Weather {
            name: entry.name,
            effects: entry.effects,
        });
    }
    Ok(catalog)
}

fn matrix_table(matrix: &MatrixFile) -> RandomTable<String, String> {
    let mut table = RandomTable::new();
    for (col, column) in matrix.columns.iter().enumerate() {
        table.ensure_context(column.clone());
        for row in &matrix.rows {
            table.insert(column.clone(), row.label.clone(), row.weight(col));
        }
    }
    table
}

fn load_matrix(path: &Path) -> DataResult<RandomTable<String, String>> {
    let matrix: MatrixFile = read_json(path)?;
    Ok(matrix_table(&matrix))
}

fn load_season_matrix(path: &Path) -> DataResult<(RandomTable<String, String>, Vec<String>)> {
    let matrix: MatrixFile = read_json(path)?;
    if matrix.columns.is_empty() {
        return Err(DataError::Invalid(format!(
            "{} has no seasons",
            path.display()
        )));
    }
    Ok((matrix_table(&matrix), matrix.columns))
}

/// Read a calendar file.
///
/// A missing or blank file, a document without a `calendar` key, or a
/// calendar with no months all mean "no calendar".
pub fn load_calendar(path: &Path) -> DataResult<Option<CalendarDefinition>> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::info!("calendar file {} not found", path.display());
            return Ok(None);
        }
        Err(e) => return Err(DataError::io(path, e)),
    };
    if text.trim().is_empty() {
        log::info!("calendar file {} is blank", path.display());
        return Ok(None);
    }

    let mut doc: serde_json::Value =
        serde_json::from_str(&text).map_err(|e| DataError::parse(path, e))?;
    let Some(calendar) = doc.get_mut("calendar").map(serde_json::Value::take) else {
        log::info!("calendar file {} has no calendar", path.display());
        return Ok(None);
    };
    if calendar.is_null() {
        return Ok(None);
    }
    let definition: CalendarDefinition =
        serde_json::from_value(calendar).map_err(|e| DataError::parse(path, e))?;
    if definition.months.is_empty() {
        log::info!("calendar has no months");
        return Ok(None);
    }
    log::info!(
        "loaded calendar: {} months, {} holidays",
        definition.months.len(),
        definition.holidays.len()
    );
    Ok(Some(definition))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::write_template;
    use tc_core::CalendarDate;

    fn write(dir: &Path, name: &str, body: &str) {
        std::fs::write(dir.join(name), body).unwrap();
    }

    #[test]
    fn loads_template() {
        let dir = tempfile::tempdir().unwrap();
        write_template(dir.path()).unwrap();
        let loaded = load_dir(dir.path()).unwrap();
        assert!(loaded.warnings.is_empty(), "{:?}", loaded.warnings);
        assert!(!loaded.data.zones.is_empty());
        assert!(!loaded.data.encounters.is_empty());
        assert!(!loaded.data.seasons.is_empty());
        assert!(loaded.calendar.is_some());
        let cal = loaded.open_calendar().unwrap();
        assert!(cal.current_date().is_some());
    }

    #[test]
    fn missing_required_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        write_template(dir.path()).unwrap();
        std::fs::remove_file(dir.path().join("zones.json")).unwrap();
        assert!(matches!(load_dir(dir.path()), Err(DataError::Io { .. })));
    }

    #[test]
    fn bad_percentage_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        write_template(dir.path()).unwrap();
        write(
            dir.path(),
            "zones.json",
            r#"{"zones": [{"name": "Road", "types": ["Overland"], "encounter_chance": "often"}]}"#,
        );
        assert!(matches!(load_dir(dir.path()), Err(DataError::Invalid(_))));
    }

    #[test]
    fn matrix_builds_contexts_per_column() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "m.json",
            r#"{"zones": ["Road", "Cave"], "rows": [
                {"encounter": "Bandits", "weights": [3, 0]},
                {"encounter": "Bats", "weights": [0]}
            ]}"#,
        );
        let t = load_matrix(&dir.path().join("m.json")).unwrap();
        assert_eq!(t.len(), 2);
        assert_eq!(t.total_weight(&"Road".to_string()).unwrap(), 3);
        assert_eq!(t.total_weight(&"Cave".to_string()).unwrap(), 0);
    }

    #[test]
    fn calendar_absent_forms() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calendar.json");
        assert!(load_calendar(&path).unwrap().is_none());
        write(dir.path(), "calendar.json", "  \n");
        assert!(load_calendar(&path).unwrap().is_none());
        write(dir.path(), "calendar.json", r#"{"other": 1}"#);
        assert!(load_calendar(&path).unwrap().is_none());
        write(dir.path(), "calendar.json", r#"{"calendar": {"months": []}}"#);
        assert!(load_calendar(&path).unwrap().is_none());
    }

    #[test]
    fn calendar_with_date() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "calendar.json",
            r#"{"calendar": {
                "months": [{"name": "Thaw", "days": 30, "season": "Spring"}],
                "current_date": {"month": 1, "day": 12}
            }}"#,
        );
        let def = load_calendar(&dir.path().join("calendar.json"))
            .unwrap()
            .unwrap();
        assert_eq!(def.current_date, Some(CalendarDate::new(1, 12)));
        assert_eq!(def.days_per_week, 6);
    }

    #[test]
    fn broken_calendar_is_a_warning() {
        let dir = tempfile::tempdir().unwrap();
        write_template(dir.path()).unwrap();
        write(dir.path(), "calendar.json", "{not json");
        let loaded = load_dir(dir.path()).unwrap();
        assert!(loaded.calendar.is_none());
        assert!(loaded.calendar_path.is_none());
        assert!(loaded.warnings.iter().any(|w| w.contains("without calendar")));
    }

    #[test]
    fn unknown_watch_and_type_warn() {
        let dir = tempfile::tempdir().unwrap();
        let mut warnings = Vec::new();
        write(
            dir.path(),
            "e.json",
            r#"{"encounters": [{"name": "Owls", "watch": {"noon": "10%", "late night": "90%"}}]}"#,
        );
        let catalog = load_encounters(&dir.path().join("e.json"), &mut warnings).unwrap();
        assert_eq!(catalog.get("Owls").unwrap().watch_percent(Watch::LateNight), 90);
        assert_eq!(warnings.len(), 1);

        write(
            dir.path(),
            "z.json",
            r#"{"zones": [{"name": "Sea", "types": ["Ocean", "Overlay"], "encounter_chance": 5}]}"#,
        );
        let zones = load_zones(&dir.path().join("z.json"), &mut warnings).unwrap();
        assert_eq!(zones.get("Sea").unwrap().kinds, vec![ZoneKind::Overlay]);
        assert_eq!(warnings.len(), 2);
    }
}
