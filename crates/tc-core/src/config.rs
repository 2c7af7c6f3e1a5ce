//! Configuration for a GM session.

use crate::timer::DEFAULT_TIMER_MINUTES;

/// Configuration for a GM session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// RNG seed for reproducible rolls.
    pub seed: u64,
    /// Duration of a timer started without one.
    pub default_timer_minutes: i32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            default_timer_minutes: DEFAULT_TIMER_MINUTES,
        }
    }
}

impl SessionConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the default timer duration (negative values become 0).
    pub fn with_timer_minutes(mut self, minutes: i32) -> Self {
        self.default_timer_minutes = minutes.max(0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = SessionConfig::default();
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.default_timer_minutes, 60);
    }

    #[test]
    fn builder_methods() {
        let cfg = SessionConfig::default()
            .with_seed(123)
            .with_timer_minutes(30);
        assert_eq!(cfg.seed, 123);
        assert_eq!(cfg.default_timer_minutes, 30);
    }

    #[test]
    fn timer_minutes_clamped() {
        let cfg = SessionConfig::default().with_timer_minutes(-10);
        assert_eq!(cfg.default_timer_minutes, 0);
    }
}
