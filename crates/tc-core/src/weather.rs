//! Daily weather.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TcResult;
use crate::random::RandomSource;
use crate::table::RandomTable;

/// Table outcome meaning "keep yesterday's weather".
pub const NO_CHANGE: &str = "No Change";

/// Weather used when the season has nothing to draw.
pub const FALLBACK_WEATHER: &str = "Clear";

/// Re-roll limit when "No Change" comes up with no previous weather.
pub const MAX_WEATHER_ATTEMPTS: usize = 100;

/// Weather conditions and their mechanical effects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weather {
    /// Weather name.
    pub name: String,
    /// Effect keywords, possibly empty.
    pub effects: Vec<String>,
}

impl Weather {
    /// Weather with no effects.
    pub fn plain(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            effects: Vec::new(),
        }
    }
}

/// `name` alone, or `name (effect1, effect2)`.
impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.effects.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} ({})", self.name, self.effects.join(", "))
        }
    }
}

/// Known weather types and their effects.
#[derive(Debug, Clone, Default)]
pub struct WeatherCatalog {
    effects: HashMap<String, Vec<String>>,
    order: Vec<String>,
}

impl WeatherCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a weather type.
    pub fn add(&mut self, weather: Weather) {
        if !self.effects.contains_key(&weather.name) {
            self.order.push(weather.name.clone());
        }
        self.effects.insert(weather.name, weather.effects);
    }

    /// Whether a weather type is known.
    pub fn contains(&self, name: &str) -> bool {
        self.effects.contains_key(name)
    }

    /// Build a [`Weather`] for a name. Unknown names get no effects.
    pub fn weather(&self, name: &str) -> Weather {
        Weather {
            name: name.to_string(),
            effects: self.effects.get(name).cloned().unwrap_or_default(),
        }
    }

    /// Names in declaration order.
    pub fn names(&self) -> &[String] {
        &self.order
    }

    /// Number of weather types.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Draw the day's weather for a season.
///
/// "No Change" keeps `previous`; with no previous weather it is re-rolled
/// up to [`MAX_WEATHER_ATTEMPTS`] times. An empty season, or running out of
/// attempts, gives [`FALLBACK_WEATHER`].
pub fn roll_weather<R: RandomSource + ?Sized>(
    season: &str,
    previous: Option<&Weather>,
    table: &RandomTable<String, String>,
    catalog: &WeatherCatalog,
    rng: &mut R,
) -> TcResult<Weather> {
    let context = season.to_string();
    for attempt in 1..=MAX_WEATHER_ATTEMPTS {
        let Some(name) = table.sample(&context, rng)? else {
            log::info!("no weather weights for season {season}, using {FALLBACK_WEATHER}");
            return Ok(Weather::plain(FALLBACK_WEATHER));
        };

        if name == NO_CHANGE {
            match previous {
                Some(prev) => {
                    log::debug!("weather: no change (keeping {})", prev.name);
                    return Ok(prev.clone());
                }
                None => {
                    log::debug!("weather attempt {attempt}: no change with no previous weather");
                    continue;
                }
            }
        }

        let weather = catalog.weather(name);
        log::debug!("weather: {weather}");
        return Ok(weather);
    }

    log::warn!("weather re-roll limit reached for {season}, using {FALLBACK_WEATHER}");
    Ok(Weather::plain(FALLBACK_WEATHER))
}
