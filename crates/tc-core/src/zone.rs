//! Zones and their encounter chance.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{TcError, TcResult};
use crate::random::RandomSource;

/// Where a zone may be selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoneKind {
    /// A primary overland travel zone.
    Overland,
    /// A secondary zone mixed into overland travel.
    Overlay,
    /// A site (dungeon, ruin, cave) explored turn by turn.
    Site,
}

impl ZoneKind {
    /// Parse a zone kind name, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "overland" => Some(Self::Overland),
            "overlay" => Some(Self::Overlay),
            "site" => Some(Self::Site),
            _ => None,
        }
    }
}

impl fmt::Display for ZoneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overland => write!(f, "Overland"),
            Self::Overlay => write!(f, "Overlay"),
            Self::Site => write!(f, "Site"),
        }
    }
}

/// Percentage chance (0-100) that any encounter happens at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterChance(u32);

impl EncounterChance {
    /// Create a chance, clamped to 0-100.
    pub fn new(percent: u32) -> Self {
        Self(percent.min(100))
    }

    /// The percentage value.
    pub fn percent(self) -> u32 {
        self.0
    }

    /// Parse `"15%"`, `"15"` or `" 15 % "`. Fractions round to the nearest
    /// whole percent and the result is clamped to 0-100.
    pub fn parse(s: &str) -> TcResult<Self> {
        let cleaned = s.trim();
        let cleaned = cleaned.strip_suffix('%').unwrap_or(cleaned).trim();
        let value: f64 = cleaned
            .parse()
            .map_err(|_| TcError::Validation(format!("cannot parse '{s}' as a percentage")))?;
        if !value.is_finite() {
            return Err(TcError::Validation(format!(
                "cannot parse '{s}' as a percentage"
            )));
        }
        Ok(Self::new(value.round().clamp(0.0, 100.0) as u32))
    }

    /// Roll d100: the gate passes when the roll is at or below the chance.
    pub fn passes<R: RandomSource + ?Sized>(self, rng: &mut R) -> bool {
        let roll = rng.roll(100);
        let pass = roll <= self.0;
        log::debug!("encounter gate: rolled {roll} vs {}% -> {pass}", self.0);
        pass
    }
}

impl fmt::Display for EncounterChance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// A named zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    /// Zone name, the key used by every encounter table.
    pub name: String,
    /// Where the zone may be selected.
    pub kinds: Vec<ZoneKind>,
    /// Chance of any encounter per watch or slot.
    pub encounter_chance: EncounterChance,
}

impl Zone {
    /// Whether the zone may be used as the given kind.
    pub fn is(&self, kind: ZoneKind) -> bool {
        self.kinds.contains(&kind)
    }
}

/// All zones, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct ZoneTable {
    zones: Vec<Zone>,
    by_name: HashMap<String, usize>,
}

impl ZoneTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a zone. A zone with the same name replaces the earlier one.
    pub fn add(&mut self, zone: Zone) {
        if let Some(&idx) = self.by_name.get(&zone.name) {
            self.zones[idx] = zone;
        } else {
            self.by_name.insert(zone.name.clone(), self.zones.len());
            self.zones.push(zone);
        }
    }

    /// Look up a zone by exact name.
    pub fn get(&self, name: &str) -> Option<&Zone> {
        self.by_name.get(name).map(|&i| &self.zones[i])
    }

    /// Look up a zone, or fail with a configuration error.
    pub fn require(&self, name: &str) -> TcResult<&Zone> {
        self.get(name)
            .ok_or_else(|| TcError::Configuration(format!("unknown zone '{name}'")))
    }

    /// Find a zone by case-insensitive name.
    pub fn find(&self, name: &str) -> Option<&Zone> {
        let lower = name.trim().to_lowercase();
        self.zones.iter().find(|z| z.name.to_lowercase() == lower)
    }

    /// Find a zone by case-insensitive name that may be used as `kind`.
    ///
    /// Unknown names and zones of the wrong kind are validation errors.
    pub fn select(&self, name: &str, kind: ZoneKind) -> TcResult<&Zone> {
        let zone = self
            .find(name)
            .ok_or_else(|| TcError::Validation(format!("unknown zone '{name}'")))?;
        if !zone.is(kind) {
            return Err(TcError::Validation(format!(
                "'{}' is not a {kind} zone (choose from: {})",
                zone.name,
                self.names_of(kind).join(", ")
            )));
        }
        Ok(zone)
    }

    /// Names of zones usable as `kind`, in declaration order.
    pub fn names_of(&self, kind: ZoneKind) -> Vec<&str> {
        self.zones
            .iter()
            .filter(|z| z.is(kind))
            .map(|z| z.name.as_str())
            .collect()
    }

    /// All zones in declaration order.
    pub fn all(&self) -> &[Zone] {
        &self.zones
    }

    /// Number of zones.
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}
