//! Fixed time divisions: overland watches and site slots.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the six daily periods used by overland travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Watch {
    /// First light.
    Dawn,
    /// Morning travel.
    Morning,
    /// Afternoon travel.
    Afternoon,
    /// Evening and sunset.
    Dusk,
    /// First half of the night.
    EarlyNight,
    /// Second half of the night.
    LateNight,
}

impl Watch {
    /// All watches in daily order.
    pub const ALL: [Watch; 6] = [
        Watch::Dawn,
        Watch::Morning,
        Watch::Afternoon,
        Watch::Dusk,
        Watch::EarlyNight,
        Watch::LateNight,
    ];

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Dawn => "Dawn",
            Self::Morning => "Morning",
            Self::Afternoon => "Afternoon",
            Self::Dusk => "Dusk",
            Self::EarlyNight => "Early Night",
            Self::LateNight => "Late Night",
        }
    }

    /// Position within the day, 0 = Dawn.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Parse a watch label, case-insensitively. `early-night` and
    /// `early_night` are accepted as well as `early night`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace(['-', '_'], " ").as_str() {
            "dawn" => Some(Self::Dawn),
            "morning" => Some(Self::Morning),
            "afternoon" => Some(Self::Afternoon),
            "dusk" => Some(Self::Dusk),
            "early night" => Some(Self::EarlyNight),
            "late night" => Some(Self::LateNight),
            _ => None,
        }
    }
}

impl fmt::Display for Watch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One of the six rolling site positions, ten minutes apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Slot {
    /// What is happening now.
    Current,
    /// Ten minutes ahead.
    In10,
    /// Twenty minutes ahead.
    In20,
    /// Thirty minutes ahead.
    In30,
    /// Forty minutes ahead.
    In40,
    /// Fifty minutes ahead.
    In50,
}

impl Slot {
    /// All slots, nearest first.
    pub const ALL: [Slot; 6] = [
        Slot::Current,
        Slot::In10,
        Slot::In20,
        Slot::In30,
        Slot::In40,
        Slot::In50,
    ];

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Current => "Current",
            Self::In10 => "10 minutes",
            Self::In20 => "20 minutes",
            Self::In30 => "30 minutes",
            Self::In40 => "40 minutes",
            Self::In50 => "50 minutes",
        }
    }

    /// Position in the window, 0 = Current.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Minutes until this slot.
    pub fn offset_minutes(self) -> u32 {
        self.index() as u32 * 10
    }

    /// Parse `current`, `10`, `10m`, `10 minutes`.
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        if lower == "current" || lower == "now" || lower == "0" {
            return Some(Self::Current);
        }
        let digits = lower
            .trim_end_matches("minutes")
            .trim_end_matches("min")
            .trim_end_matches('m')
            .trim();
        match digits {
            "10" => Some(Self::In10),
            "20" => Some(Self::In20),
            "30" => Some(Self::In30),
            "40" => Some(Self::In40),
            "50" => Some(Self::In50),
            _ => None,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Minutes that pass with each site turn.
pub const TURN_MINUTES: u32 = 10;

/// Format elapsed site time.
///
/// Up to 50 minutes this is just `"{n} minutes"`; past that an hours and
/// minutes breakdown is appended.
pub fn format_elapsed(minutes: u32) -> String {
    if minutes <= 50 {
        return format!("{minutes} minutes");
    }
    let hours = minutes / 60;
    let rest = minutes % 60;
    format!(
        "{minutes} minutes ({hours} hour{} {rest} minute{})",
        if hours == 1 { "" } else { "s" },
        if rest == 1 { "" } else { "s" },
    )
}
