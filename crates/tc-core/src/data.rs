//! The loaded game data every engine draws from.

use crate::encounter::{EncounterCatalog, EncounterDetails};
use crate::rest::RestTable;
use crate::table::RandomTable;
use crate::time::Watch;
use crate::weather::{Weather, WeatherCatalog};
use crate::zone::{Zone, ZoneTable};

/// Encounter weights keyed by zone and watch.
pub type WatchTable = RandomTable<(String, Watch), String>;

/// Immutable tables shared by the overland and site engines.
#[derive(Debug, Clone, Default)]
pub struct GameData {
    /// All zones.
    pub zones: ZoneTable,
    /// All encounters.
    pub encounters: EncounterCatalog,
    /// Encounter weights per zone, used by sites.
    pub encounter_by_zone: RandomTable<String, String>,
    /// Encounter weights per zone and watch, used overland.
    pub encounter_by_zone_and_watch: WatchTable,
    /// All weather types.
    pub weathers: WeatherCatalog,
    /// Weather weights per season.
    pub weather_by_season: RandomTable<String, String>,
    /// Seasons in declaration order.
    pub seasons: Vec<String>,
    /// Rest check tables.
    pub rest: RestTable,
}

impl GameData {
    /// Empty data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a zone.
    pub fn with_zone(mut self, zone: Zone) -> Self {
        self.zones.add(zone);
        self
    }

    /// Add an encounter to the catalog.
    pub fn with_encounter(mut self, details: EncounterDetails) -> Self {
        self.encounters.add(details);
        self
    }

    /// Add a weather type.
    pub fn with_weather(mut self, weather: Weather) -> Self {
        self.weathers.add(weather);
        self
    }

    /// Set an encounter's weight in a zone.
    pub fn with_zone_weight(mut self, zone: &str, encounter: &str, weight: u32) -> Self {
        self.encounter_by_zone
            .insert(zone.to_string(), encounter.to_string(), weight);
        self
    }

    /// Set a weather's weight in a season, registering the season.
    pub fn with_season_weight(mut self, season: &str, weather: &str, weight: u32) -> Self {
        if !self.seasons.iter().any(|s| s == season) {
            self.seasons.push(season.to_string());
        }
        self.weather_by_season
            .insert(season.to_string(), weather.to_string(), weight);
        self
    }

    /// Set the rest tables.
    pub fn with_rest(mut self, rest: RestTable) -> Self {
        self.rest = rest;
        self
    }

    /// Rebuild the zone-and-watch table from the zone table.
    ///
    /// weight(e, z, w) = zone weight(e, z) × watch percent(e, w). Encounters
    /// missing from the catalog get weight 0. Every zone with a weight
    /// column gets all six watch contexts.
    pub fn derive_watch_table(&mut self) {
        let mut table = WatchTable::new();
        let mut zones: Vec<&String> = self.encounter_by_zone.contexts().collect();
        zones.sort();
        for zone in zones {
            let Ok(entries) = self.encounter_by_zone.entries(zone) else {
                continue;
            };
            for watch in Watch::ALL {
                let key = (zone.clone(), watch);
                table.ensure_context(key.clone());
                for entry in entries {
                    let percent = self
                        .encounters
                        .get(&entry.outcome)
                        .map_or(0, |d| d.watch_percent(watch));
                    table.insert(
                        key.clone(),
                        entry.outcome.clone(),
                        entry.weight.saturating_mul(percent),
                    );
                }
            }
        }
        log::debug!("derived {} zone/watch contexts", table.len());
        self.encounter_by_zone_and_watch = table;
    }

    /// Finish building: derive the watch table.
    pub fn build(mut self) -> Self {
        self.derive_watch_table();
        self
    }
}
