//! Encounters: the catalog of possible encounters and generated instances.
//!
//! Generation runs in a fixed order of draws so scripted sources stay
//! predictable: the d100 gate, the weighted table draw, the spark count
//! (d4), then one draw per spark from the remaining pool.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::error::{TcError, TcResult};
use crate::random::RandomSource;
use crate::table::RandomTable;
use crate::time::Watch;
use crate::zone::Zone;

/// Most sparks attached to a single encounter.
pub const MAX_SPARKS: u32 = 4;

/// A generated encounter, or the canonical "no encounter".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encounter {
    /// Encounter name; `None` means nothing happens.
    pub name: Option<String>,
    /// The watch or slot label this encounter belongs to.
    pub time: String,
    /// One to four situational prompts, empty for no encounter.
    pub sparks: Vec<String>,
    /// Catalog description.
    pub description: Option<String>,
    /// Catalog habitat.
    pub habitat: Option<String>,
}

impl Encounter {
    /// The "no encounter" outcome for a time label.
    pub fn none(time: impl Into<String>) -> Self {
        Self {
            name: None,
            time: time.into(),
            sparks: Vec::new(),
            description: None,
            habitat: None,
        }
    }

    /// Whether something actually happens.
    pub fn is_encounter(&self) -> bool {
        self.name.is_some()
    }
}

impl fmt::Display for Encounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name} at {}", self.time),
            None => write!(f, "No Encounter"),
        }
    }
}

/// Catalog entry describing one possible encounter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterDetails {
    /// Unique name, matching the rows of the weight tables.
    pub name: String,
    /// Description shown when expanded.
    pub description: String,
    /// Where the creature or event is usually found.
    pub habitat: String,
    /// Pool of prompts to draw sparks from.
    pub sparks: Vec<String>,
    /// Percentage likelihood per watch, indexed by [`Watch::index`].
    pub watch_percent: [u32; 6],
}

impl EncounterDetails {
    /// Percentage likelihood during a watch.
    pub fn watch_percent(&self, watch: Watch) -> u32 {
        self.watch_percent[watch.index()]
    }
}

/// All known encounters, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct EncounterCatalog {
    entries: Vec<EncounterDetails>,
    by_name: HashMap<String, usize>,
}

impl EncounterCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry; a later entry with the same name replaces the earlier.
    pub fn add(&mut self, details: EncounterDetails) {
        if let Some(&idx) = self.by_name.get(&details.name) {
            self.entries[idx] = details;
        } else {
            self.by_name.insert(details.name.clone(), self.entries.len());
            self.entries.push(details);
        }
    }

    /// Look up an entry by exact name.
    pub fn get(&self, name: &str) -> Option<&EncounterDetails> {
        self.by_name.get(name).map(|&i| &self.entries[i])
    }

    /// Look up an entry, or fail with a configuration error.
    pub fn require(&self, name: &str) -> TcResult<&EncounterDetails> {
        self.get(name).ok_or_else(|| {
            TcError::Configuration(format!("encounter '{name}' is not in the catalog"))
        })
    }

    /// All entries.
    pub fn all(&self) -> &[EncounterDetails] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Draw 1-4 distinct sparks from a pool.
///
/// The count is a d4 capped at the pool size; each spark is then drawn
/// uniformly from what is left. Out-of-range rolls are clamped to the pool.
pub fn draw_sparks<R: RandomSource + ?Sized>(pool: &[String], rng: &mut R) -> Vec<String> {
    if pool.is_empty() {
        return Vec::new();
    }
    let count = rng.roll(MAX_SPARKS).min(pool.len() as u32) as usize;
    let mut remaining: Vec<&String> = pool.iter().collect();
    let mut drawn = Vec::with_capacity(count);
    for _ in 0..count {
        let idx = (rng.roll(remaining.len() as u32) as usize).clamp(1, remaining.len()) - 1;
        drawn.push(remaining.swap_remove(idx).clone());
    }
    drawn
}

/// Everything needed to generate encounters for one zone and context.
pub struct EncounterRoll<'a, C, R: ?Sized> {
    /// The zone whose chance gates the roll.
    pub zone: &'a Zone,
    /// Weight table to draw from.
    pub table: &'a RandomTable<C, String>,
    /// Context key into `table`.
    pub context: &'a C,
    /// Catalog used to fill in details.
    pub catalog: &'a EncounterCatalog,
    /// Label stored on the result.
    pub time: &'a str,
    /// Source of draws.
    pub rng: &'a mut R,
}

impl<C, R> EncounterRoll<'_, C, R>
where
    C: Eq + Hash + fmt::Debug,
    R: RandomSource + ?Sized,
{
    /// Run the gate, the weighted draw and the spark draw.
    pub fn generate(self) -> TcResult<Encounter> {
        if !self.zone.encounter_chance.passes(self.rng) {
            log::debug!("{}: no encounter in {} (gate)", self.time, self.zone.name);
            return Ok(Encounter::none(self.time));
        }

        let Some(name) = self.table.sample(self.context, self.rng)? else {
            log::debug!(
                "{}: no weighted encounters for {:?}",
                self.time,
                self.context
            );
            return Ok(Encounter::none(self.time));
        };

        let details = self.catalog.require(name)?;
        let sparks = draw_sparks(&details.sparks, self.rng);
        log::debug!(
            "{}: {} (zone {}, weight {})",
            self.time,
            name,
            self.zone.name,
            self.table
                .entries(self.context)?
                .iter()
                .find(|e| &e.outcome == name)
                .map_or(0, |e| e.weight)
        );

        Ok(Encounter {
            name: Some(name.clone()),
            time: self.time.to_string(),
            sparks,
            description: Some(details.description.clone()),
            habitat: Some(details.habitat.clone()),
        })
    }
}
