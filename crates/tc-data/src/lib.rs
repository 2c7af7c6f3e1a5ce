//! Torchcrawl data directories.
//!
//! A data directory holds a `torchcrawl.json` manifest naming the zone,
//! encounter, weather, rest and matrix files, plus an optional calendar.
//! This crate reads them into [`tc_core::GameData`], reports dangling
//! references as warnings, and writes the current date back to the
//! calendar file.

pub mod error;
pub mod files;
pub mod loader;
pub mod manifest;
pub mod store;
pub mod template;
pub mod validate;

pub use error::{DataError, DataResult};
pub use loader::{LoadedData, load_calendar, load_dir};
pub use manifest::{MANIFEST_FILE, Manifest, ManifestFiles};
pub use store::JsonCalendarStore;
pub use template::write_template;
pub use validate::validate;
