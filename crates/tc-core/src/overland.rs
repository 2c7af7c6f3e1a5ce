//! Day-by-day overland travel.
//!
//! A day is weather, one encounter per watch, and the rest info that follows
//! from the season and weather. Every operation builds its result in full
//! before replacing any state, so a failed roll leaves the day as it was.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::calendar::{Calendar, DateChange};
use crate::data::GameData;
use crate::encounter::{Encounter, EncounterRoll};
use crate::error::{TcError, TcResult};
use crate::expansion::ExpansionFlags;
use crate::random::RandomSource;
use crate::rest::RestInfo;
use crate::time::Watch;
use crate::weather::{Weather, roll_weather};
use crate::zone::ZoneKind;

/// The user's overland choices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlandSelection {
    /// Primary zone.
    pub zone: Option<String>,
    /// Secondary zone that takes over half the watches on average.
    pub overlay: Option<String>,
    /// Season used for weather and rest DCs.
    pub season: Option<String>,
}

/// The generated day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlandState {
    /// Days travelled since the last reset.
    pub day_count: u32,
    /// Today's weather.
    pub weather: Option<Weather>,
    /// One encounter per watch, indexed by [`Watch::index`].
    pub encounters: [Option<Encounter>; 6],
    /// Rest DCs and modifiers for today.
    pub rest_info: Option<RestInfo>,
    /// Which watches have their details open.
    pub expanded: ExpansionFlags,
}

impl OverlandState {
    /// The encounter for a watch, if the day has been generated.
    pub fn encounter(&self, watch: Watch) -> Option<&Encounter> {
        self.encounters[watch.index()].as_ref()
    }

    /// Whether a day has been generated since the last reset.
    pub fn is_generated(&self) -> bool {
        self.weather.is_some()
    }
}

/// Generates and advances overland days.
#[derive(Debug)]
pub struct OverlandEngine<R> {
    data: Arc<GameData>,
    rng: R,
    selection: OverlandSelection,
    state: OverlandState,
}

impl<R: RandomSource> OverlandEngine<R> {
    /// Create an engine with nothing selected.
    pub fn new(data: Arc<GameData>, rng: R) -> Self {
        Self {
            data,
            rng,
            selection: OverlandSelection::default(),
            state: OverlandState::default(),
        }
    }

    /// The tables this engine draws from.
    pub fn data(&self) -> &GameData {
        &self.data
    }

    /// The current day.
    pub fn state(&self) -> &OverlandState {
        &self.state
    }

    /// The current selections.
    pub fn selection(&self) -> &OverlandSelection {
        &self.selection
    }

    /// Select the primary zone by case-insensitive name. The zone must be an
    /// `Overland` zone.
    pub fn set_zone(&mut self, name: &str) -> TcResult<&str> {
        let zone = self.data.zones.select(name, ZoneKind::Overland)?;
        log::info!("overland zone: {}", zone.name);
        Ok(self.selection.zone.insert(zone.name.clone()).as_str())
    }

    /// Select or clear the overlay zone.
    pub fn set_overlay(&mut self, name: Option<&str>) -> TcResult<()> {
        self.selection.overlay = match name {
            Some(name) => {
                let zone = self.data.zones.select(name, ZoneKind::Overlay)?;
                Some(zone.name.clone())
            }
            None => None,
        };
        log::info!("overland overlay: {:?}", self.selection.overlay);
        Ok(())
    }

    /// Select the season by case-insensitive name.
    pub fn set_season(&mut self, name: &str) -> TcResult<&str> {
        let season = self
            .known_season(name)
            .ok_or_else(|| TcError::Validation(format!("unknown season '{name}'")))?;
        log::info!("overland season: {season}");
        Ok(self.selection.season.insert(season).as_str())
    }

    fn known_season(&self, name: &str) -> Option<String> {
        let lower = name.trim().to_lowercase();
        self.data
            .seasons
            .iter()
            .find(|s| s.to_lowercase() == lower)
            .cloned()
    }

    fn require_zone(&self) -> TcResult<String> {
        self.selection
            .zone
            .clone()
            .ok_or_else(|| TcError::Validation("no overland zone selected".into()))
    }

    fn require_season(&self) -> TcResult<String> {
        self.selection
            .season
            .clone()
            .ok_or_else(|| TcError::Validation("no season selected".into()))
    }

    fn roll_watch(&mut self, zone: &str, watch: Watch) -> TcResult<Encounter> {
        let active = match self.selection.overlay.as_deref() {
            Some(overlay) if self.rng.coin() => overlay,
            _ => zone,
        };
        log::debug!("{watch}: rolling in {active}");
        let context = (active.to_string(), watch);
        EncounterRoll {
            zone: self.data.zones.require(active)?,
            table: &self.data.encounter_by_zone_and_watch,
            context: &context,
            catalog: &self.data.encounters,
            time: watch.label(),
            rng: &mut self.rng,
        }
        .generate()
    }

    fn roll_day(&mut self, day_count: u32, zone: &str, season: &str) -> TcResult<OverlandState> {
        let weather = roll_weather(
            season,
            self.state.weather.as_ref(),
            &self.data.weather_by_season,
            &self.data.weathers,
            &mut self.rng,
        )?;
        let mut encounters: [Option<Encounter>; 6] = Default::default();
        for watch in Watch::ALL {
            encounters[watch.index()] = Some(self.roll_watch(zone, watch)?);
        }
        let rest_info = self.data.rest.lookup(season, Some(&weather));
        Ok(OverlandState {
            day_count,
            weather: Some(weather),
            encounters,
            rest_info: Some(rest_info),
            expanded: ExpansionFlags::new(),
        })
    }

    /// Generate the whole day without changing the day count.
    pub fn generate(&mut self) -> TcResult<&OverlandState> {
        let zone = self.require_zone()?;
        let season = self.require_season()?;
        self.state = self.roll_day(self.state.day_count, &zone, &season)?;
        log::info!("overland day {} generated", self.state.day_count);
        Ok(&self.state)
    }

    /// Regenerate weather, encounters and rest info for the same day.
    pub fn regenerate_day(&mut self) -> TcResult<&OverlandState> {
        log::info!("regenerating overland day {}", self.state.day_count);
        self.generate()
    }

    /// Move to the next day and generate it.
    ///
    /// With a calendar that has a current date, the calendar moves one day
    /// forward and the season follows the new date when that season is
    /// known; otherwise the selected season stays. Nothing changes if the
    /// day cannot be generated.
    pub fn new_day(&mut self, calendar: Option<&mut Calendar>) -> TcResult<Option<DateChange>> {
        let zone = self.require_zone()?;
        let dated = calendar.filter(|c| c.current_date().is_some());

        let season = match dated.as_deref() {
            Some(cal) => {
                let today = cal
                    .current_date()
                    .ok_or_else(|| TcError::Validation("no current date set".into()))?;
                let month_season = cal.season_of(cal.date_after(today, 1)?)?;
                match self.known_season(month_season) {
                    Some(season) => season,
                    None => {
                        log::warn!(
                            "calendar season '{month_season}' has no weather table, keeping the selected season"
                        );
                        self.require_season()?
                    }
                }
            }
            None => self.require_season()?,
        };

        let next = self.roll_day(self.state.day_count + 1, &zone, &season)?;
        let change = match dated {
            Some(cal) => Some(cal.advance(1)?),
            None => None,
        };
        self.selection.season = Some(season);
        self.state = next;
        log::info!("overland day {}", self.state.day_count);
        Ok(change)
    }

    /// Regenerate the encounter of a single watch.
    pub fn regenerate_one(&mut self, watch: Watch) -> TcResult<&Encounter> {
        let zone = self.require_zone()?;
        let encounter = self.roll_watch(&zone, watch)?;
        log::info!("regenerated {watch}: {encounter}");
        Ok(&*self.state.encounters[watch.index()].insert(encounter))
    }

    /// Regenerate the weather and the rest info that depends on it.
    pub fn regenerate_weather(&mut self) -> TcResult<&Weather> {
        let season = self.require_season()?;
        let weather = roll_weather(
            &season,
            self.state.weather.as_ref(),
            &self.data.weather_by_season,
            &self.data.weathers,
            &mut self.rng,
        )?;
        log::info!("regenerated weather: {weather}");
        self.state.rest_info = Some(self.data.rest.lookup(&season, Some(&weather)));
        Ok(&*self.state.weather.insert(weather))
    }

    /// Open or close the details of a watch.
    pub fn set_expanded(&mut self, watch: Watch, open: bool) {
        self.state.expanded.set(watch.index(), open);
    }

    /// Flip the details of a watch. Returns the new value.
    pub fn toggle_expanded(&mut self, watch: Watch) -> bool {
        self.state.expanded.toggle(watch.index())
    }

    /// Back to day 0 with nothing generated. Selections are kept.
    pub fn reset(&mut self) -> &OverlandState {
        self.state = OverlandState::default();
        log::info!("overland reset");
        &self.state
    }
}
