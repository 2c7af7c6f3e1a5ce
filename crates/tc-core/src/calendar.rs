//! Setting calendar: months, seasons, holidays and the current date.
//!
//! There is no year. Advancing past the last day of the last month wraps to
//! day 1 of month 1. Holidays are bound to a month *name*, so reordering the
//! month list does not move them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{TcError, TcResult};

/// Days per week when the calendar does not say.
pub const DEFAULT_DAYS_PER_WEEK: u32 = 6;

/// A day in the calendar. Both fields are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalendarDate {
    /// Month index, 1 = first month.
    pub month: u32,
    /// Day of the month, 1 = first day.
    pub day: u32,
}

impl CalendarDate {
    /// Create a date without validating it.
    pub fn new(month: u32, day: u32) -> Self {
        Self { month, day }
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "month {}, day {}", self.month, self.day)
    }
}

/// One month of the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Month {
    /// Month name.
    pub name: String,
    /// Number of days.
    pub days: u32,
    /// Season the whole month belongs to.
    pub season: String,
}

/// A named day of the year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    /// Holiday name.
    pub name: String,
    /// What happens on the day.
    #[serde(default)]
    pub description: String,
    /// Name of the month it falls in.
    pub month: String,
    /// Day of that month.
    pub day: u32,
}

/// Plain calendar data, as read from the data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDefinition {
    /// Months in order.
    pub months: Vec<Month>,
    /// Holidays, in any order.
    #[serde(default)]
    pub holidays: Vec<Holiday>,
    /// Columns in the month grid.
    #[serde(default = "default_days_per_week")]
    pub days_per_week: u32,
    /// Today, if one has been chosen.
    #[serde(default)]
    pub current_date: Option<CalendarDate>,
}

fn default_days_per_week() -> u32 {
    DEFAULT_DAYS_PER_WEEK
}

/// Writes the current date back to wherever the calendar came from.
pub trait DateStore {
    /// Persist a new current date.
    fn save(&mut self, date: CalendarDate) -> TcResult<()>;
}

/// Outcome of a date change.
///
/// The in-memory date has always been updated; `warning` carries a failed
/// save, which is reported but not rolled back.
#[derive(Debug)]
pub struct DateChange {
    /// The new current date.
    pub date: CalendarDate,
    /// Set when persisting the date failed.
    pub warning: Option<TcError>,
}

/// The calendar with its current date and optional persistence.
pub struct Calendar {
    months: Vec<Month>,
    holidays: Vec<Holiday>,
    days_per_week: u32,
    current: Option<CalendarDate>,
    store: Option<Box<dyn DateStore>>,
}

impl fmt::Debug for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Calendar")
            .field("months", &self.months)
            .field("holidays", &self.holidays)
            .field("days_per_week", &self.days_per_week)
            .field("current", &self.current)
            .field("persistent", &self.store.is_some())
            .finish()
    }
}

impl Calendar {
    /// Build a calendar from its definition.
    ///
    /// Fails if there are no months or a month has no days. A stored
    /// current date that does not fit the months is dropped with a warning.
    pub fn new(definition: CalendarDefinition) -> TcResult<Self> {
        if definition.months.is_empty() {
            return Err(TcError::Validation("calendar has no months".into()));
        }
        if let Some(m) = definition.months.iter().find(|m| m.days == 0) {
            return Err(TcError::Validation(format!(
                "month '{}' has no days",
                m.name
            )));
        }

        let mut calendar = Self {
            months: definition.months,
            holidays: definition.holidays,
            days_per_week: definition.days_per_week.max(1),
            current: None,
            store: None,
        };
        if let Some(date) = definition.current_date {
            match calendar.validate(date) {
                Ok(()) => calendar.current = Some(date),
                Err(e) => log::warn!("ignoring stored calendar date: {e}"),
            }
        }
        Ok(calendar)
    }

    /// Attach a store that receives every date change.
    pub fn with_store(mut self, store: Box<dyn DateStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Months in order.
    pub fn months(&self) -> &[Month] {
        &self.months
    }

    /// Month by 1-based index.
    pub fn month(&self, index: u32) -> Option<&Month> {
        index
            .checked_sub(1)
            .and_then(|i| self.months.get(i as usize))
    }

    /// All holidays.
    pub fn holidays(&self) -> &[Holiday] {
        &self.holidays
    }

    /// Columns in a month grid.
    pub fn days_per_week(&self) -> u32 {
        self.days_per_week
    }

    /// Today, if set.
    pub fn current_date(&self) -> Option<CalendarDate> {
        self.current
    }

    /// Days in a full cycle of months.
    pub fn days_in_year(&self) -> u32 {
        self.months.iter().map(|m| m.days).sum()
    }

    /// Check that a date exists in this calendar.
    pub fn validate(&self, date: CalendarDate) -> TcResult<()> {
        let month = self.month(date.month).ok_or_else(|| {
            TcError::Validation(format!(
                "month {} is out of range 1-{}",
                date.month,
                self.months.len()
            ))
        })?;
        if date.day == 0 || date.day > month.days {
            return Err(TcError::Validation(format!(
                "day {} is out of range 1-{} for {}",
                date.day, month.days, month.name
            )));
        }
        Ok(())
    }

    /// The date `days` after `date`, wrapping at the end of the last month.
    pub fn date_after(&self, date: CalendarDate, days: u32) -> TcResult<CalendarDate> {
        self.validate(date)?;
        let mut month = date.month;
        let mut day = date.day + days % self.days_in_year();
        loop {
            let len = self.months[(month - 1) as usize].days;
            if day <= len {
                break;
            }
            day -= len;
            month += 1;
            if month as usize > self.months.len() {
                month = 1;
            }
        }
        Ok(CalendarDate { month, day })
    }

    /// Move the current date forward and persist it.
    pub fn advance(&mut self, days: u32) -> TcResult<DateChange> {
        if days == 0 {
            return Err(TcError::Validation("days to advance must be positive".into()));
        }
        let current = self
            .current
            .ok_or_else(|| TcError::Validation("no current date set".into()))?;
        let next = self.date_after(current, days)?;
        Ok(self.commit(next))
    }

    /// Replace the current date and persist it.
    pub fn set_date(&mut self, month: u32, day: u32) -> TcResult<DateChange> {
        let date = CalendarDate { month, day };
        self.validate(date)?;
        Ok(self.commit(date))
    }

    fn commit(&mut self, date: CalendarDate) -> DateChange {
        self.current = Some(date);
        log::info!("calendar date is now {}", self.label(date));
        let warning = self.store.as_mut().and_then(|store| match store.save(date) {
            Ok(()) => None,
            Err(e) => {
                log::warn!("calendar date not saved: {e}");
                Some(e)
            }
        });
        DateChange { date, warning }
    }

    /// Season of the month a date falls in.
    pub fn season_of(&self, date: CalendarDate) -> TcResult<&str> {
        self.month(date.month)
            .map(|m| m.season.as_str())
            .ok_or_else(|| TcError::Validation(format!("month {} is out of range", date.month)))
    }

    /// Season of the current date.
    pub fn current_season(&self) -> Option<&str> {
        self.current.and_then(|d| self.season_of(d).ok())
    }

    /// The holiday on a date, matched by month name and day.
    pub fn holiday_at(&self, date: CalendarDate) -> Option<&Holiday> {
        let month = self.month(date.month)?;
        self.holidays
            .iter()
            .find(|h| h.month == month.name && h.day == date.day)
    }

    /// The holiday today, if any.
    pub fn current_holiday(&self) -> Option<&Holiday> {
        self.current.and_then(|d| self.holiday_at(d))
    }

    /// `"{month} {day} ({season})"`.
    pub fn label(&self, date: CalendarDate) -> String {
        match self.month(date.month) {
            Some(m) => format!("{} {} ({})", m.name, date.day, m.season),
            None => "Invalid date".to_string(),
        }
    }

    /// Label for today, or `"No date set"`.
    pub fn current_label(&self) -> String {
        match self.current {
            Some(d) => self.label(d),
            None => "No date set".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn month(name: &str, days: u32, season: &str) -> Month {
        Month {
            name: name.to_string(),
            days,
            season: season.to_string(),
        }
    }

    fn two_months() -> Calendar {
        Calendar::new(CalendarDefinition {
            months: vec![month("Thaw", 5, "Spring"), month("Blaze", 5, "Summer")],
            holidays: vec![Holiday {
                name: "Midsummer".to_string(),
                description: "Bonfires".to_string(),
                month: "Blaze".to_string(),
                day: 3,
            }],
            days_per_week: 5,
            current_date: Some(CalendarDate::new(1, 1)),
        })
        .unwrap()
    }

    #[derive(Clone, Default)]
    struct Recorder {
        saved: Rc<RefCell<Vec<CalendarDate>>>,
        fail: bool,
    }

    impl DateStore for Recorder {
        fn save(&mut self, date: CalendarDate) -> TcResult<()> {
            if self.fail {
                return Err(TcError::Persistence("disk full".into()));
            }
            self.saved.borrow_mut().push(date);
            Ok(())
        }
    }

    #[test]
    fn wraps_from_last_day_of_last_month() {
        let mut cal = two_months();
        cal.set_date(2, 5).unwrap();
        let change = cal.advance(1).unwrap();
        assert_eq!(change.date, CalendarDate::new(1, 1));
        assert_eq!(cal.current_date(), Some(CalendarDate::new(1, 1)));
    }

    #[test]
    fn crosses_month_boundary() {
        let mut cal = two_months();
        cal.set_date(1, 4).unwrap();
        assert_eq!(cal.advance(3).unwrap().date, CalendarDate::new(2, 2));
    }

    #[test]
    fn advance_by_multiple_years() {
        let cal = two_months();
        let date = cal.date_after(CalendarDate::new(1, 2), 23).unwrap();
        assert_eq!(date, CalendarDate::new(1, 5));
    }

    #[test]
    fn advance_requires_positive_days_and_date() {
        let mut cal = two_months();
        assert!(cal.advance(0).is_err());

        let mut undated = Calendar::new(CalendarDefinition {
            months: vec![month("Only", 10, "Always")],
            holidays: vec![],
            days_per_week: 6,
            current_date: None,
        })
        .unwrap();
        assert!(matches!(undated.advance(1), Err(TcError::Validation(_))));
        assert_eq!(undated.current_label(), "No date set");
    }

    #[test]
    fn set_date_then_season() {
        let mut cal = two_months();
        cal.set_date(2, 3).unwrap();
        assert_eq!(cal.season_of(cal.current_date().unwrap()).unwrap(), "Summer");
        assert_eq!(cal.current_season(), Some("Summer"));
    }

    #[test]
    fn set_date_rejects_out_of_range() {
        let mut cal = two_months();
        assert!(cal.set_date(3, 1).is_err());
        assert!(cal.set_date(0, 1).is_err());
        assert!(cal.set_date(1, 6).is_err());
        assert!(cal.set_date(1, 0).is_err());
        assert_eq!(cal.current_date(), Some(CalendarDate::new(1, 1)));
    }

    #[test]
    fn holiday_lookup_by_month_name() {
        let mut cal = two_months();
        assert!(cal.current_holiday().is_none());
        cal.set_date(2, 3).unwrap();
        assert_eq!(cal.current_holiday().unwrap().name, "Midsummer");
        assert!(cal.holiday_at(CalendarDate::new(1, 3)).is_none());
    }

    #[test]
    fn holidays_follow_reordered_months() {
        let cal = Calendar::new(CalendarDefinition {
            months: vec![month("Blaze", 5, "Summer"), month("Thaw", 5, "Spring")],
            holidays: vec![Holiday {
                name: "Midsummer".to_string(),
                description: "Bonfires".to_string(),
                month: "Blaze".to_string(),
                day: 3,
            }],
            days_per_week: 5,
            current_date: Some(CalendarDate::new(2, 3)),
        })
        .unwrap();
        assert_eq!(cal.holiday_at(CalendarDate::new(1, 3)).unwrap().name, "Midsummer");
        assert!(cal.current_holiday().is_none());
        assert!(cal.holiday_at(CalendarDate::new(2, 3)).is_none());
    }

    #[test]
    fn labels() {
        let cal = two_months();
        assert_eq!(cal.label(CalendarDate::new(2, 4)), "Blaze 4 (Summer)");
        assert_eq!(cal.current_label(), "Thaw 1 (Spring)");
        assert_eq!(cal.label(CalendarDate::new(9, 1)), "Invalid date");
    }

    #[test]
    fn changes_are_persisted() {
        let store = Recorder::default();
        let saved = store.saved.clone();
        let mut cal = two_months().with_store(Box::new(store));
        cal.set_date(2, 1).unwrap();
        cal.advance(2).unwrap();
        assert_eq!(
            *saved.borrow(),
            vec![CalendarDate::new(2, 1), CalendarDate::new(2, 3)]
        );
    }

    #[test]
    fn failed_save_keeps_new_date() {
        let store = Recorder {
            fail: true,
            ..Recorder::default()
        };
        let mut cal = two_months().with_store(Box::new(store));
        let change = cal.advance(1).unwrap();
        assert!(matches!(change.warning, Some(TcError::Persistence(_))));
        assert_eq!(cal.current_date(), Some(CalendarDate::new(1, 2)));
    }

    #[test]
    fn invalid_stored_date_is_dropped() {
        let cal = Calendar::new(CalendarDefinition {
            months: vec![month("Only", 10, "Always")],
            holidays: vec![],
            days_per_week: 6,
            current_date: Some(CalendarDate::new(4, 40)),
        })
        .unwrap();
        assert!(cal.current_date().is_none());
    }

    #[test]
    fn rejects_empty_definitions() {
        let empty = CalendarDefinition {
            months: vec![],
            holidays: vec![],
            days_per_week: 6,
            current_date: None,
        };
        assert!(Calendar::new(empty).is_err());
        let zero_day = CalendarDefinition {
            months: vec![month("Void", 0, "None")],
            holidays: vec![],
            days_per_week: 6,
            current_date: None,
        };
        assert!(Calendar::new(zero_day).is_err());
    }

    #[test]
    fn definition_defaults_from_json() {
        let def: CalendarDefinition =
            serde_json::from_str(r#"{"months":[{"name":"A","days":3,"season":"S"}]}"#).unwrap();
        assert_eq!(def.days_per_week, DEFAULT_DAYS_PER_WEEK);
        assert!(def.holidays.is_empty());
        assert!(def.current_date.is_none());
    }

    proptest::proptest! {
        #[test]
        fn advance_stays_valid(start_month in 1u32..=2, start_day in 1u32..=5, days in 1u32..500) {
            let cal = two_months();
            let next = cal.date_after(CalendarDate::new(start_month, start_day), days).unwrap();
            proptest::prop_assert!(cal.validate(next).is_ok());
            let ordinal = |d: CalendarDate| (d.month - 1) * 5 + d.day - 1;
            proptest::prop_assert_eq!(
                ordinal(next),
                (ordinal(CalendarDate::new(start_month, start_day)) + days) % 10
            );
        }
    }
}
