//! Cross-reference checks between loaded tables.
//!
//! Nothing here is fatal: a dangling name simply never rolls, so each
//! problem becomes a warning string for the caller to report.

use tc_core::weather::NO_CHANGE;
use tc_core::{CalendarDefinition, GameData};

/// Find references between tables that do not resolve.
pub fn validate(data: &GameData, calendar: Option<&CalendarDefinition>) -> Vec<String> {
    let mut warnings = Vec::new();

    let mut zones: Vec<&String> = data.encounter_by_zone.contexts().collect();
    zones.sort();
    for zone in zones {
        if data.zones.get(zone).is_none() {
            warnings.push(format!("encounter matrix names unknown zone '{zone}'"));
        }
        for entry in data.encounter_by_zone.entries(zone).unwrap_or_default() {
            if data.encounters.get(&entry.outcome).is_none() {
                warnings.push(format!(
                    "encounter matrix names unknown encounter '{}' in zone '{zone}'",
                    entry.outcome
                ));
            }
        }
    }

    for season in &data.seasons {
        for entry in data.weather_by_season.entries(season).unwrap_or_default() {
            if entry.outcome != NO_CHANGE && !data.weathers.contains(&entry.outcome) {
                warnings.push(format!(
                    "weather matrix names unknown weather '{}' in season '{season}'",
                    entry.outcome
                ));
            }
        }
    }

    let mut rest_seasons: Vec<&String> = data.rest.rest_dcs.keys().collect();
    rest_seasons.sort();
    for season in rest_seasons {
        if !data.seasons.contains(season) {
            warnings.push(format!("rest DCs name unknown season '{season}'"));
        }
    }

    if let Some(calendar) = calendar {
        for month in &calendar.months {
            if month.days == 0 {
                warnings.push(format!("month '{}' has no days", month.name));
            }
            if !data.seasons.contains(&month.season) {
                warnings.push(format!(
                    "month '{}' names unknown season '{}'",
                    month.name, month.season
                ));
            }
        }
        for holiday in &calendar.holidays {
            match calendar.months.iter().find(|m| m.name == holiday.month) {
                None => warnings.push(format!(
                    "holiday '{}' names unknown month '{}'",
                    holiday.name, holiday.month
                )),
                Some(month) if holiday.day == 0 || holiday.day > month.days => {
                    warnings.push(format!(
                        "holiday '{}' falls on day {} but {} has {} days",
                        holiday.name, holiday.day, month.name, month.days
                    ));
                }
                Some(_) => {}
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use tc_core::{
        EncounterChance, EncounterDetails, Holiday, Month, RestDc, RestTable, Weather, Zone,
        ZoneKind,
    };

    fn data() -> GameData {
        let mut rest = RestTable::default();
        rest.rest_dcs.insert(
            "Spring".to_string(),
            vec![RestDc {
                camp: "Tent".to_string(),
                dc: 10,
            }],
        );
        GameData::new()
            .with_zone(Zone {
                name: "Road".to_string(),
                kinds: vec![ZoneKind::Overland],
                encounter_chance: EncounterChance::new(50),
            })
            .with_encounter(EncounterDetails {
                name: "Bandits".to_string(),
                description: String::new(),
                habitat: String::new(),
                sparks: vec![],
                watch_percent: [100; 6],
            })
            .with_zone_weight("Road", "Bandits", 1)
            .with_weather(Weather::plain("Clear"))
            .with_season_weight("Spring", "Clear", 2)
            .with_season_weight("Spring", NO_CHANGE, 1)
            .with_rest(rest)
            .build()
    }

    fn calendar() -> CalendarDefinition {
        CalendarDefinition {
            months: vec![Month {
                name: "Thaw".to_string(),
                days: 30,
                season: "Spring".to_string(),
            }],
            holidays: vec![Holiday {
                name: "Fools".to_string(),
                description: String::new(),
                month: "Thaw".to_string(),
                day: 1,
            }],
            days_per_week: 6,
            current_date: None,
        }
    }

    #[test]
    fn consistent_data_is_clean() {
        assert!(validate(&data(), Some(&calendar())).is_empty());
    }

    #[test]
    fn dangling_names_warn() {
        let data = data()
            .with_zone_weight("Swamp", "Bandits", 1)
            .with_zone_weight("Road", "Dragon", 1)
            .with_season_weight("Spring", "Hail", 1);
        let warnings = validate(&data, None);
        assert_eq!(warnings.len(), 3, "{warnings:?}");
        assert!(warnings.iter().any(|w| w.contains("'Swamp'")));
        assert!(warnings.iter().any(|w| w.contains("'Dragon'")));
        assert!(warnings.iter().any(|w| w.contains("'Hail'")));
    }

    #[test]
    fn rest_season_must_exist() {
        let mut data = data();
        data.rest.rest_dcs.insert("Monsoon".to_string(), vec![]);
        let warnings = validate(&data, None);
        assert_eq!(warnings, vec!["rest DCs name unknown season 'Monsoon'"]);
    }

    #[test]
    fn holiday_checks() {
        let mut cal = calendar();
        cal.holidays.push(Holiday {
            name: "Lost".to_string(),
            description: String::new(),
            month: "Nowhere".to_string(),
            day: 1,
        });
        cal.holidays.push(Holiday {
            name: "Late".to_string(),
            description: String::new(),
            month: "Thaw".to_string(),
            day: 31,
        });
        let warnings = validate(&data(), Some(&cal));
        assert_eq!(warnings.len(), 2, "{warnings:?}");
        assert!(warnings[0].contains("unknown month"));
        assert!(warnings[1].contains("day 31"));
    }
}
