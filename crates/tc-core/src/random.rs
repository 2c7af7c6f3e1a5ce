//! Pluggable randomness.
//!
//! Every draw the engines make goes through [`RandomSource::roll`], a single
//! uniform integer in `1..=max`. Production code uses a seeded [`StdRng`];
//! tests script exact sequences with [`ScriptedRolls`].

use std::collections::VecDeque;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// A source of uniform integer draws.
pub trait RandomSource {
    /// Draw a uniform integer in `1..=max`. `max` is always at least 1.
    fn roll(&mut self, max: u32) -> u32;

    /// A fair coin: `true` on heads.
    fn coin(&mut self) -> bool {
        self.roll(2) == 1
    }
}

impl RandomSource for StdRng {
    fn roll(&mut self, max: u32) -> u32 {
        self.random_range(1..=max.max(1))
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn roll(&mut self, max: u32) -> u32 {
        (**self).roll(max)
    }
}

/// Create the default seeded source.
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// A fixed sequence of rolls, for reproducible tests.
///
/// Each scripted value is clamped into `1..=max` of the draw that consumes
/// it. Once the script is exhausted every further draw returns 1.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRolls {
    rolls: VecDeque<u32>,
    consumed: usize,
}

impl ScriptedRolls {
    /// Create a source that replays `rolls` in order.
    pub fn new(rolls: impl IntoIterator<Item = u32>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
            consumed: 0,
        }
    }

    /// Append more rolls to the end of the script.
    pub fn push(&mut self, rolls: impl IntoIterator<Item = u32>) {
        self.rolls.extend(rolls);
    }

    /// Number of draws made so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Number of scripted rolls not yet used.
    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl RandomSource for ScriptedRolls {
    fn roll(&mut self, max: u32) -> u32 {
        self.consumed += 1;
        self.rolls.pop_front().unwrap_or(1).clamp(1, max.max(1))
    }
}
