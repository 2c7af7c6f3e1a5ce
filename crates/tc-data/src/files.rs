//! On-disk shapes of the individual data files.

use std::collections::BTreeMap;

use serde::Deserialize;

use tc_core::RestTable;

/// A percentage written as `"15%"`, `"15"` or a bare number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Percent {
    /// Text form.
    Text(String),
    /// Numeric form.
    Number(f64),
}

impl Percent {
    /// The text the core parser understands.
    pub fn as_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => n.to_string(),
        }
    }
}

/// `zones.json`.
#[derive(Debug, Deserialize)]
pub struct ZonesFile {
    /// Zone entries.
    #[serde(default)]
    pub zones: Vec<ZoneEntry>,
}

/// One zone.
#[derive(Debug, Deserialize)]
pub struct ZoneEntry {
    /// Zone name.
    pub name: String,
    /// `Overland`, `Overlay`, `Site`.
    #[serde(default)]
    pub types: Vec<String>,
    /// Chance of any encounter.
    pub encounter_chance: Percent,
}

/// `encounters.json`.
#[derive(Debug, Deserialize)]
pub struct EncountersFile {
    /// Encounter entries.
    #[serde(default)]
    pub encounters: Vec<EncounterEntry>,
}

/// One encounter.
#[derive(Debug, Deserialize)]
pub struct EncounterEntry {
    /// Encounter name.
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Habitat.
    #[serde(default)]
    pub habitat: String,
    /// Spark pool.
    #[serde(default)]
    pub sparks: Vec<String>,
    /// Percent likelihood keyed by watch name; missing watches are 0%.
    #[serde(default)]
    pub watch: BTreeMap<String, Percent>,
}

/// `weathers.json`.
#[derive(Debug, Deserialize)]
pub struct WeathersFile {
    /// Weather entries.
    #[serde(default)]
    pub weathers: Vec<WeatherEntry>,
}

/// One weather type.
#[derive(Debug, Deserialize)]
pub struct WeatherEntry {
    /// Weather name.
    pub name: String,
    /// Effect keywords.
    #[serde(default)]
    pub effects: Vec<String>,
}

/// `rest.json`.
#[derive(Debug, Deserialize)]
pub struct RestFile {
    /// The rest tables.
    #[serde(default)]
    pub rest_checks: RestTable,
}

/// A weight matrix: one column per zone or season, one row per outcome.
#[derive(Debug, Deserialize)]
pub struct MatrixFile {
    /// Column headers.
    #[serde(alias = "zones", alias = "seasons")]
    pub columns: Vec<String>,
    /// Weighted rows.
    #[serde(default)]
    pub rows: Vec<MatrixRow>,
}

/// One outcome and its weight in each column.
#[derive(Debug, Deserialize)]
pub struct MatrixRow {
    /// The outcome.
    #[serde(alias = "encounter", alias = "weather")]
    pub label: String,
    /// Weights by column; missing cells are 0.
    #[serde(default)]
    pub weights: Vec<u32>,
}

impl MatrixRow {
    /// Weight in a column.
    pub fn weight(&self, column: usize) -> u32 {
        self.weights.get(column).copied().unwrap_or(0)
    }
}
