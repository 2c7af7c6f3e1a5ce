//! Weighted random tables.
//!
//! A [`RandomTable`] maps a context key (a zone, a zone and watch, a season)
//! to an ordered list of weighted outcomes. Sampling draws a single outcome
//! with probability proportional to its weight. Entry order is insertion
//! order, so a scripted [`RandomSource`] always picks the same outcome.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::error::{TcError, TcResult};
use crate::random::RandomSource;

/// One outcome and its weight within a context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedEntry<K> {
    /// The outcome returned when this entry is drawn.
    pub outcome: K,
    /// Relative weight. Zero-weight entries are never drawn.
    pub weight: u32,
}

/// Weighted outcomes keyed by a compound context.
#[derive(Debug, Clone)]
pub struct RandomTable<C, K> {
    contexts: HashMap<C, Vec<WeightedEntry<K>>>,
}

impl<C, K> Default for RandomTable<C, K> {
    fn default() -> Self {
        Self {
            contexts: HashMap::new(),
        }
    }
}

impl<C: Eq + Hash + Debug, K> RandomTable<C, K> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an outcome to a context, creating the context if needed.
    pub fn insert(&mut self, context: C, outcome: K, weight: u32) {
        self.contexts
            .entry(context)
            .or_default()
            .push(WeightedEntry { outcome, weight });
    }

    /// Register a context with no outcomes. Sampling it yields nothing.
    pub fn ensure_context(&mut self, context: C) {
        self.contexts.entry(context).or_default();
    }

    /// Whether the context has been registered.
    pub fn contains(&self, context: &C) -> bool {
        self.contexts.contains_key(context)
    }

    /// Number of registered contexts.
    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    /// Whether no contexts are registered.
    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    /// All registered context keys, in no particular order.
    pub fn contexts(&self) -> impl Iterator<Item = &C> {
        self.contexts.keys()
    }

    /// Entries for a context, in declaration order.
    pub fn entries(&self, context: &C) -> TcResult<&[WeightedEntry<K>]> {
        self.contexts
            .get(context)
            .map(Vec::as_slice)
            .ok_or_else(|| TcError::Configuration(format!("no table entry for {context:?}")))
    }

    /// Sum of all weights in a context.
    pub fn total_weight(&self, context: &C) -> TcResult<u64> {
        Ok(self
            .entries(context)?
            .iter()
            .map(|e| u64::from(e.weight))
            .sum())
    }

    /// Draw one outcome for `context`.
    ///
    /// Returns `Ok(None)` when every weight in the context is zero, and a
    /// configuration error when the context is not in the table.
    pub fn sample<R: RandomSource + ?Sized>(
        &self,
        context: &C,
        rng: &mut R,
    ) -> TcResult<Option<&K>> {
        let entries = self.entries(context)?;
        let total = entries.iter().map(|e| u64::from(e.weight)).sum::<u64>();
        if total == 0 {
            return Ok(None);
        }
        let total = u32::try_from(total).map_err(|_| {
            TcError::Configuration(format!("weights for {context:?} overflow a single draw"))
        })?;

        let draw = rng.roll(total);
        let mut cumulative = 0u32;
        for entry in entries {
            if entry.weight == 0 {
                continue;
            }
            cumulative += entry.weight;
            if draw <= cumulative {
                return Ok(Some(&entry.outcome));
            }
        }
        // draw <= total, so the loop always returns; keep the last positive entry as a guard.
        Ok(entries
            .iter()
            .rev()
            .find(|e| e.weight > 0)
            .map(|e| &e.outcome))
    }
}

impl<C: Eq + Hash + Debug, K: PartialEq> RandomTable<C, K> {
    /// Weight of a specific outcome in a context, 0 if absent.
    pub fn weight_of(&self, context: &C, outcome: &K) -> u32 {
        self.contexts
            .get(context)
            .and_then(|entries| entries.iter().find(|e| &e.outcome == outcome))
            .map_or(0, |e| e.weight)
    }
}
