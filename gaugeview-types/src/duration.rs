//! Sampling-window representation.
//!
//! A duration is a `(unit, count)` pair: the node samples one value per
//! `unit` seconds and keeps `count` of them, so the effective window is
//! `unit * count` seconds. Two durations are the same window iff both
//! fields match.

use alloc::format;
use alloc::string::String;

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;

/// A sampling window requested from or reported by a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DurationSpec {
    /// Sampling granularity in seconds.
    #[cfg_attr(feature = "serde", serde(default))]
    pub unit: u64,
    /// Number of samples in the window.
    #[cfg_attr(feature = "serde", serde(default))]
    pub count: u64,
}

impl DurationSpec {
    /// Create a duration from a unit (seconds) and sample count.
    pub const fn new(unit: u64, count: u64) -> Self {
        Self { unit, count }
    }

    /// Effective window in seconds.
    pub const fn window(&self) -> u64 {
        self.unit * self.count
    }

    /// The zero/zero sentinel used when a metric reports no durations.
    pub const fn is_zero(&self) -> bool {
        self.unit == 0 && self.count == 0
    }

    /// Human-readable window description, e.g. `"1 Minute"` or `"3 Hours"`.
    ///
    /// Falls back through days, hours and minutes to raw seconds for
    /// windows that do not divide evenly.
    pub fn describe(&self) -> String {
        let total = self.window();
        match total {
            MINUTE => String::from("1 Minute"),
            HOUR => String::from("1 Hour"),
            DAY => String::from("1 Day"),
            _ => {
                if total != 0 && total % DAY == 0 {
                    format!("{} Days", total / DAY)
                } else if total != 0 && total % HOUR == 0 {
                    format!("{} Hours", total / HOUR)
                } else if total != 0 && total % MINUTE == 0 {
                    format!("{} Minutes", total / MINUTE)
                } else {
                    format!("{} Seconds", total)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_is_unit_times_count() {
        assert_eq!(DurationSpec::new(60, 60).window(), 3600);
        assert_eq!(DurationSpec::new(1, 300).window(), 300);
    }

    #[test]
    fn equality_is_structural() {
        assert_eq!(DurationSpec::new(60, 1), DurationSpec::new(60, 1));
        // Same window, different granularity: not the same duration.
        assert_ne!(DurationSpec::new(60, 1), DurationSpec::new(1, 60));
    }

    #[test]
    fn zero_sentinel() {
        assert!(DurationSpec::default().is_zero());
        assert!(!DurationSpec::new(60, 0).is_zero());
    }

    #[test]
    fn describe_named_windows() {
        assert_eq!(DurationSpec::new(1, 60).describe(), "1 Minute");
        assert_eq!(DurationSpec::new(60, 60).describe(), "1 Hour");
        assert_eq!(DurationSpec::new(3600, 24).describe(), "1 Day");
    }

    #[test]
    fn describe_multiples() {
        assert_eq!(DurationSpec::new(3600, 48).describe(), "2 Days");
        assert_eq!(DurationSpec::new(3600, 3).describe(), "3 Hours");
        assert_eq!(DurationSpec::new(60, 5).describe(), "5 Minutes");
        assert_eq!(DurationSpec::new(90, 1).describe(), "90 Seconds");
        assert_eq!(DurationSpec::default().describe(), "0 Seconds");
    }
}
