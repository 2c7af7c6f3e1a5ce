//! Writing the current date back into the calendar file.

use std::path::{Path, PathBuf};

use tc_core::{CalendarDate, DateStore, TcError, TcResult};

/// Saves the current date into `calendar.current_date` of a JSON file,
/// leaving the rest of the document as it was.
#[derive(Debug, Clone)]
pub struct JsonCalendarStore {
    path: PathBuf,
}

impl JsonCalendarStore {
    /// Store backed by the given calendar file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persistence(&self, what: &str, e: impl std::fmt::Display) -> TcError {
        TcError::Persistence(format!("{what} {}: {e}", self.path.display()))
    }
}

impl DateStore for JsonCalendarStore {
    fn save(&mut self, date: CalendarDate) -> TcResult<()> {
        let text = std::fs::read_to_string(&self.path)
            .map_err(|e| self.persistence("cannot read", e))?;
        let mut doc: serde_json::Value =
            serde_json::from_str(&text).map_err(|e| self.persistence("cannot parse", e))?;
        let calendar = doc
            .get_mut("calendar")
            .and_then(serde_json::Value::as_object_mut)
            .ok_or_else(|| self.persistence("no calendar object in", "missing key"))?;
        calendar.insert(
            "current_date".to_string(),
            serde_json::to_value(date).map_err(|e| self.persistence("cannot encode date for", e))?,
        );
        let out = serde_json::to_string_pretty(&doc)
            .map_err(|e| self.persistence("cannot encode", e))?;
        std::fs::write(&self.path, out + "\n").map_err(|e| self.persistence("cannot write", e))?;
        log::debug!("saved date {date} to {}", self.path.display());
        Ok(())
    }
}
