//! Rest checks: camp DCs by season and the modifiers that apply.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::weather::Weather;

/// Difficulty of resting in one kind of camp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestDc {
    /// Kind of camp, e.g. "Shelter" or "Open ground".
    pub camp: String,
    /// Difficulty class.
    pub dc: i32,
}

/// Modifier that applies while the weather has a given effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherModifier {
    /// Weather effect keyword this modifier is tied to.
    pub effect: String,
    /// What the modifier represents.
    #[serde(default)]
    pub description: String,
    /// Signed adjustment to the check.
    pub modifier: i32,
}

/// Modifier the GM applies by judgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SituationalModifier {
    /// The situation.
    pub situation: String,
    /// Signed adjustment to the check.
    pub modifier: i32,
}

/// Everything the data source knows about rest checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestTable {
    /// Camp DCs keyed by season.
    #[serde(default, alias = "rest_DCs")]
    pub rest_dcs: HashMap<String, Vec<RestDc>>,
    /// All weather-dependent modifiers.
    #[serde(default)]
    pub weather_modifiers: Vec<WeatherModifier>,
    /// Modifiers that always apply at the GM's discretion.
    #[serde(default)]
    pub situational_modifiers: Vec<SituationalModifier>,
}

impl RestTable {
    /// Rest info for a season and the day's weather.
    ///
    /// Weather modifiers are kept only when their effect is one of the
    /// weather's effects. An unknown season has no DCs.
    pub fn lookup(&self, season: &str, weather: Option<&Weather>) -> RestInfo {
        let rest_dcs = self.rest_dcs.get(season).cloned().unwrap_or_default();
        let weather_modifiers = match weather {
            Some(w) => self
                .weather_modifiers
                .iter()
                .filter(|m| w.effects.contains(&m.effect))
                .cloned()
                .collect(),
            None => Vec::new(),
        };
        let info = RestInfo {
            rest_dcs,
            weather_modifiers,
            situational_modifiers: self.situational_modifiers.clone(),
        };
        log::debug!(
            "rest info for {season}: {} DCs, {} weather modifiers, {} situational modifiers",
            info.rest_dcs.len(),
            info.weather_modifiers.len(),
            info.situational_modifiers.len()
        );
        info
    }
}

/// Rest info for one day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestInfo {
    /// Camp DCs for the season.
    pub rest_dcs: Vec<RestDc>,
    /// Modifiers matching today's weather.
    pub weather_modifiers: Vec<WeatherModifier>,
    /// Situational modifiers.
    pub situational_modifiers: Vec<SituationalModifier>,
}

impl RestInfo {
    /// Whether there is nothing to show.
    pub fn is_empty(&self) -> bool {
        self.rest_dcs.is_empty()
            && self.weather_modifiers.is_empty()
            && self.situational_modifiers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RestTable {
        let mut rest_dcs = HashMap::new();
        rest_dcs.insert(
            "Winter".to_string(),
            vec![
                RestDc {
                    camp: "Shelter".to_string(),
                    dc: 10,
                },
                RestDc {
                    camp: "Open ground".to_string(),
                    dc: 15,
                },
            ],
        );
        RestTable {
            rest_dcs,
            weather_modifiers: vec![
                WeatherModifier {
                    effect: "Wet".to_string(),
                    description: "Soaked bedding".to_string(),
                    modifier: 2,
                },
                WeatherModifier {
                    effect: "Cold".to_string(),
                    description: "Biting cold".to_string(),
                    modifier: 3,
                },
            ],
            situational_modifiers: vec![SituationalModifier {
                situation: "Fire lit".to_string(),
                modifier: -2,
            }],
        }
    }

    #[test]
    fn filters_weather_modifiers_by_effect() {
        let weather = Weather {
            name: "Sleet".to_string(),
            effects: vec!["Cold".to_string()],
        };
        let info = table().lookup("Winter", Some(&weather));
        assert_eq!(info.rest_dcs.len(), 2);
        assert_eq!(info.weather_modifiers.len(), 1);
        assert_eq!(info.weather_modifiers[0].effect, "Cold");
        assert_eq!(info.situational_modifiers.len(), 1);
    }

    #[test]
    fn no_weather_means_no_weather_modifiers() {
        let info = table().lookup("Winter", None);
        assert!(info.weather_modifiers.is_empty());
        let info = table().lookup("Winter", Some(&Weather::plain("Clear")));
        assert!(info.weather_modifiers.is_empty());
    }

    #[test]
    fn unknown_season_has_no_dcs() {
        let info = table().lookup("Summer", None);
        assert!(info.rest_dcs.is_empty());
        assert!(!info.is_empty());
        assert!(RestTable::default().lookup("Summer", None).is_empty());
    }
}
