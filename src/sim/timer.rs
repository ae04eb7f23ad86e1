//! Round countdown and attack-interval ramp

use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Round clock
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundTimer {
    /// Seconds left in the round
    pub remaining: f32,
    /// Seconds between attack spawns
    pub attack_interval: f32,
    initial_interval: f32,
    interval_floor: f32,
    ramp_threshold: f32,
}

impl RoundTimer {
    pub fn new(settings: &Settings) -> Self {
        Self {
            remaining: settings.round_duration,
            attack_interval: settings.attack_interval,
            initial_interval: settings.attack_interval,
            interval_floor: settings.attack_interval_floor,
            ramp_threshold: settings.ramp_threshold,
        }
    }

    /// Count down by `elapsed`; returns true once the clock hits zero
    pub fn advance(&mut self, elapsed: f32) -> bool {
        let was_ramping = self.is_ramping();
        self.remaining = (self.remaining - elapsed).max(0.0);

        if self.is_ramping() {
            if !was_ramping {
                log::info!("Attack ramp started ({:.1}s left)", self.remaining);
            }
            let ramped = self.initial_interval * (self.remaining / self.ramp_threshold);
            self.attack_interval = self.attack_interval.min(ramped.max(self.interval_floor));
        }

        self.remaining <= 0.0
    }

    pub fn is_ramping(&self) -> bool {
        self.remaining < self.ramp_threshold
    }

    pub fn is_expired(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Countdown as `MM:SS` (whole seconds, rounded down)
    pub fn countdown(&self) -> String {
        let total = self.remaining.max(0.0) as u32;
        format!("{:02}:{:02}", total / 60, total % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_interval_constant_above_threshold() {
        let mut timer = RoundTimer::new(&Settings::default());
        timer.advance(29.0);
        assert_eq!(timer.remaining, 61.0);
        assert_eq!(timer.attack_interval, 3.0);
    }

    #[test]
    fn test_interval_ramps_to_floor() {
        let mut timer = RoundTimer::new(&Settings::default());
        timer.advance(45.0);
        assert!((timer.attack_interval - 2.25).abs() < 1e-4);
        timer.advance(40.0);
        assert_eq!(timer.attack_interval, 1.5);
    }

    #[test]
    fn test_expiry_clamps_to_zero() {
        let mut timer = RoundTimer::new(&Settings::default());
        assert!(!timer.advance(89.0));
        assert!(timer.advance(5.0));
        assert_eq!(timer.remaining, 0.0);
        assert!(timer.is_expired());
    }

    #[test]
    fn test_countdown_format() {
        let mut timer = RoundTimer::new(&Settings::default());
        assert_eq!(timer.countdown(), "01:30");
        timer.advance(21.5);
        assert_eq!(timer.countdown(), "01:08");
        timer.advance(68.5);
        assert_eq!(timer.countdown(), "00:00");
    }

    proptest! {
        #[test]
        fn prop_interval_non_increasing(steps in proptest::collection::vec(0.0f32..2.0, 1..200)) {
            let mut timer = RoundTimer::new(&Settings::default());
            let mut last = timer.attack_interval;
            for dt in steps {
                timer.advance(dt);
                prop_assert!(timer.attack_interval <= last);
                prop_assert!(timer.attack_interval >= 1.5);
                if timer.remaining >= 60.0 {
                    prop_assert_eq!(timer.attack_interval, 3.0);
                }
                last = timer.attack_interval;
            }
        }
    }
}
