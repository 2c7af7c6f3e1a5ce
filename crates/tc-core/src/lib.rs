//! Generation-and-progression engine for a tabletop GM control panel.
//!
//! Weighted random tables drive overland travel (weather, one encounter per
//! watch, rest checks) and site exploration (a rolling six-slot encounter
//! window with timers). A calendar with seasons and holidays can drive the
//! overland season. All randomness goes through [`RandomSource`] so tests
//! can script exact rolls.

pub mod calendar;
pub mod config;
pub mod data;
pub mod encounter;
pub mod error;
pub mod expansion;
pub mod overland;
pub mod random;
pub mod rest;
pub mod session;
pub mod site;
pub mod table;
pub mod time;
pub mod timer;
pub mod weather;
pub mod zone;

pub use calendar::{Calendar, CalendarDate, CalendarDefinition, DateChange, DateStore, Holiday, Month};
pub use config::SessionConfig;
pub use data::GameData;
pub use encounter::{Encounter, EncounterCatalog, EncounterDetails};
pub use error::{TcError, TcResult};
pub use expansion::ExpansionFlags;
pub use overland::{OverlandEngine, OverlandSelection, OverlandState};
pub use random::{RandomSource, ScriptedRolls};
pub use rest::{RestDc, RestInfo, RestTable, SituationalModifier, WeatherModifier};
pub use session::GmSession;
pub use site::{SiteEngine, SiteState};
pub use table::RandomTable;
pub use time::{Slot, Watch};
pub use timer::{Timer, TimerId, TimerList, TimerState};
pub use weather::{Weather, WeatherCatalog};
pub use zone::{EncounterChance, Zone, ZoneKind, ZoneTable};
