//! Countdown timers for site exploration.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{TcError, TcResult};

/// Minutes a new timer runs when no duration is given.
pub const DEFAULT_TIMER_MINUTES: i32 = 60;

/// Stable identity of a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerId(Uuid);

impl TimerId {
    /// A fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TimerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a timer is in its countdown. Derived from the remaining minutes,
/// never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    /// Ten or more minutes remain.
    Active,
    /// Fires this turn: 0-9 minutes remain.
    Current,
    /// Ran out; removed on the turn it happens.
    Expired,
}

/// A named countdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    /// Identity used for removal.
    pub id: TimerId,
    /// What the timer tracks.
    pub name: String,
    /// Minutes left; negative once expired.
    pub remaining_minutes: i32,
}

impl Timer {
    /// Create a timer. Negative durations start at 0.
    pub fn new(name: impl Into<String>, minutes: i32) -> Self {
        Self {
            id: TimerId::new(),
            name: name.into(),
            remaining_minutes: minutes.max(0),
        }
    }

    /// Current state of the countdown.
    pub fn state(&self) -> TimerState {
        match self.remaining_minutes {
            m if m < 0 => TimerState::Expired,
            0..=9 => TimerState::Current,
            _ => TimerState::Active,
        }
    }

    /// Whether the timer has run out.
    pub fn is_expired(&self) -> bool {
        self.state() == TimerState::Expired
    }

    /// Subtract minutes. Returns the new state.
    pub fn decrement(&mut self, minutes: i32) -> TimerState {
        self.remaining_minutes -= minutes;
        self.state()
    }
}

impl fmt::Display for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.state() {
            TimerState::Expired => write!(f, "⚠ EXPIRED: {}", self.name),
            TimerState::Current => write!(f, "Current: {}", self.name),
            TimerState::Active => write!(f, "{} minutes: {}", self.remaining_minutes, self.name),
        }
    }
}

/// Timers owned by a site, kept sorted by remaining time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerList {
    timers: Vec<Timer>,
}

impl TimerList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a timer and return a copy of it.
    pub fn add(&mut self, name: impl Into<String>, minutes: i32) -> Timer {
        let timer = Timer::new(name, minutes);
        log::info!("timer added: {} ({} minutes)", timer.name, timer.remaining_minutes);
        self.timers.push(timer.clone());
        self.timers.sort_by_key(|t| t.remaining_minutes);
        timer
    }

    /// Remove a timer by id.
    pub fn remove(&mut self, id: TimerId) -> TcResult<Timer> {
        let idx = self
            .timers
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| TcError::NotFound(format!("timer {id}")))?;
        let timer = self.timers.remove(idx);
        log::info!("timer removed: {}", timer.name);
        Ok(timer)
    }

    /// Remove the timer at a display position (0-based).
    pub fn remove_at(&mut self, index: usize) -> TcResult<Timer> {
        let id = self
            .timers
            .get(index)
            .map(|t| t.id)
            .ok_or_else(|| TcError::NotFound(format!("timer #{}", index + 1)))?;
        self.remove(id)
    }

    /// Count every timer down and drop the ones that expire.
    ///
    /// Returns the expired timers, for reporting only.
    pub fn tick(&mut self, minutes: i32) -> Vec<Timer> {
        for timer in &mut self.timers {
            timer.decrement(minutes);
        }
        let (expired, kept): (Vec<_>, Vec<_>) =
            self.timers.drain(..).partition(Timer::is_expired);
        self.timers = kept;
        for timer in &expired {
            log::info!("timer expired: {}", timer.name);
        }
        expired
    }

    /// Look up a timer by id.
    pub fn get(&self, id: TimerId) -> Option<&Timer> {
        self.timers.iter().find(|t| t.id == id)
    }

    /// All timers, shortest first.
    pub fn all(&self) -> &[Timer] {
        &self.timers
    }

    /// Drop every timer.
    pub fn clear(&mut self) {
        self.timers.clear();
    }

    /// Number of timers.
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// Whether there are no timers.
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}
