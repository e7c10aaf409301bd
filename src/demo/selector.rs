//! Wall-clock driven choice of demo confidence values
//!
//! Demo values rotate through a fixed list in 8-second windows, so repeated
//! requests inside one window see the same value.

use chrono::Utc;

use super::profile::Confidence;

/// Rotation used when no live prediction is available.
pub const DEMO_CONFIDENCES: [u8; 8] = [87, 73, 92, 45, 68, 91, 55, 83];

/// Length of one rotation window in milliseconds.
pub const DEMO_WINDOW_MS: i64 = 8_000;

/// Confidence shown when a live behavior prediction fails.
pub const FALLBACK_BEHAVIOR_CONFIDENCE: u8 = 75;

/// Confidence shown when a live maintenance prediction fails.
pub const FALLBACK_MAINTENANCE_CONFIDENCE: u8 = 80;

/// Source of wall-clock time.
pub trait Clock {
    /// Milliseconds since the unix epoch.
    fn now_millis(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct DemoSelector<C> {
    clock: C,
}

impl<C: Clock> DemoSelector<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    /// Index into [`DEMO_CONFIDENCES`] for the current window.
    pub fn window_index(&self) -> usize {
        let window = self.clock.now_millis().div_euclid(DEMO_WINDOW_MS);
        window.rem_euclid(DEMO_CONFIDENCES.len() as i64) as usize
    }

    pub fn select(&self) -> Confidence {
        Confidence::from(DEMO_CONFIDENCES[self.window_index()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_window_same_value() {
        let base = 1_700_000_000_000i64 - 1_700_000_000_000i64.rem_euclid(DEMO_WINDOW_MS);
        let first = DemoSelector::new(FixedClock(base)).select();
        let second = DemoSelector::new(FixedClock(base + DEMO_WINDOW_MS - 1)).select();
        assert_eq!(first, second);
    }

    #[test]
    fn test_rotation_advances_per_window() {
        for (i, expected) in DEMO_CONFIDENCES.iter().enumerate() {
            let selector = DemoSelector::new(FixedClock(i as i64 * DEMO_WINDOW_MS + 10));
            assert_eq!(selector.select().percent(), *expected);
        }
        let wrapped = DemoSelector::new(FixedClock(8 * DEMO_WINDOW_MS));
        assert_eq!(wrapped.select().percent(), 87);
    }

    #[test]
    fn test_pre_epoch_clock() {
        let selector = DemoSelector::new(FixedClock(-1));
        assert_eq!(selector.window_index(), 7);
        assert_eq!(selector.select().percent(), 83);
    }

    #[test]
    fn test_system_clock_selects_from_rotation() {
        let value = DemoSelector::new(SystemClock).select();
        assert!(DEMO_CONFIDENCES.contains(&value.percent()));
    }
}
