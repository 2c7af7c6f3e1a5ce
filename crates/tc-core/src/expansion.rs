//! "Is the detail view open" flags for encounter slots.
//!
//! Flags are stored by position, 0 = Current. Rotating moves every flag one
//! slot nearer so a flag follows its encounter rather than its label.

use serde::{Deserialize, Serialize};

use crate::time::{Slot, Watch};

/// Six positional flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionFlags([bool; 6]);

impl ExpansionFlags {
    /// All flags closed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flag at a position.
    pub fn get(&self, index: usize) -> bool {
        self.0.get(index).copied().unwrap_or(false)
    }

    /// Set the flag at a position. Out-of-range positions are ignored.
    pub fn set(&mut self, index: usize, open: bool) {
        if let Some(flag) = self.0.get_mut(index) {
            *flag = open;
        }
    }

    /// Flip the flag at a position and return the new value.
    pub fn toggle(&mut self, index: usize) -> bool {
        let open = !self.get(index);
        self.set(index, open);
        open
    }

    /// Flag for a site slot.
    pub fn slot(&self, slot: Slot) -> bool {
        self.get(slot.index())
    }

    /// Flag for an overland watch.
    pub fn watch(&self, watch: Watch) -> bool {
        self.get(watch.index())
    }

    /// Shift every flag one position nearer; the last position closes.
    ///
    /// Works on a copy of the old array, so no new value is read back.
    pub fn rotate(&mut self) {
        let old = self.0;
        self.0 = [old[1], old[2], old[3], old[4], old[5], false];
    }

    /// Close every flag.
    pub fn clear(&mut self) {
        self.0 = [false; 6];
    }

    /// The flags as an array, position 0 first.
    pub fn as_array(&self) -> [bool; 6] {
        self.0
    }
}
