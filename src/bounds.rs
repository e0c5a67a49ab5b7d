use std::fmt;

use crate::value::{Date, DateTime, Time};

/// Inclusive `[minimum, maximum]` range.
/// A maximum below the minimum is collapsed onto the minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bounds<T> {
    minimum: T,
    maximum: T,
}

impl<T: Ord + Copy> Bounds<T> {
    /// Creates bounds, resolving a conflicting maximum to the minimum.
    pub fn new(minimum: T, maximum: T) -> Self {
        Self {
            minimum,
            maximum: resolve_max(minimum, maximum),
        }
    }

    pub const fn minimum(&self) -> T {
        self.minimum
    }

    pub const fn maximum(&self) -> T {
        self.maximum
    }

    /// Returns both ends as a tuple
    pub const fn pair(&self) -> (T, T) {
        (self.minimum, self.maximum)
    }

    pub fn contains(&self, value: &T) -> bool {
        self.minimum <= *value && *value <= self.maximum
    }

    pub fn clamp(&self, value: T) -> T {
        value.clamp(self.minimum, self.maximum)
    }

    /// Bounds with a new minimum; the current maximum loses if it now conflicts.
    pub fn with_minimum(self, minimum: T) -> Self {
        Self::new(minimum, self.maximum)
    }

    /// Bounds with a new maximum, collapsed onto the minimum if it conflicts.
    pub fn with_maximum(self, maximum: T) -> Self {
        Self::new(self.minimum, maximum)
    }
}

impl<T: fmt::Display> fmt::Display for Bounds<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.minimum, self.maximum)
    }
}

/// `max` when it is not below `min`, otherwise `min`.
pub fn resolve_max<T: Ord>(min: T, max: T) -> T {
    if max >= min { max } else { min }
}

pub fn resolve_max_date(min: Date, max: Date) -> Date {
    resolve_max(min, max)
}

pub fn resolve_max_time(min: Time, max: Time) -> Time {
    resolve_max(min, max)
}

pub fn resolve_max_date_time(min: DateTime, max: DateTime) -> DateTime {
    resolve_max(min, max)
}

/// Clamps a date into `[min, max]`. An absent date stays absent.
pub fn clamp_date(value: Option<Date>, min: Date, max: Date) -> Option<Date> {
    value.map(|v| v.clamp(min, resolve_max_date(min, max)))
}

/// Clamps a date-time into `[min, max]`. An absent value becomes `min`, unlike
/// [`clamp_date`].
pub fn clamp_date_time(value: Option<DateTime>, min: DateTime, max: DateTime) -> DateTime {
    value.map_or(min, |v| v.clamp(min, resolve_max_date_time(min, max)))
}

/// Clamps the hour and minute of `value` into `[min, max]`, keeping `value`'s
/// seconds unless they alone would leave the range.
pub fn clamp_selected_time(value: Time, min: Time, max: Time) -> Time {
    let max = resolve_max_time(min, max);
    if value < min {
        min.with_second(value.second()).max(min)
    } else if value > max {
        max.with_second(value.second()).min(max)
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, date_time, time};

    #[test]
    fn test_resolve_max_minimum_wins() {
        assert_eq!(resolve_max_date(date(2023, 12, 31), date(2023, 1, 1)), date(2023, 12, 31));
        assert_eq!(resolve_max_date(date(2023, 1, 1), date(2023, 12, 31)), date(2023, 12, 31));
        assert_eq!(resolve_max_time(time(18, 0, 0), time(9, 0, 0)), time(18, 0, 0));
        assert_eq!(
            resolve_max_date_time(date_time(2024, 1, 1, 10, 0, 0), date_time(2024, 1, 1, 9, 0, 0)),
            date_time(2024, 1, 1, 10, 0, 0)
        );
    }

    #[test]
    fn test_bounds_new_collapses_conflict() {
        let bounds = Bounds::new(date(2023, 12, 31), date(2023, 1, 1));
        assert_eq!(bounds.pair(), (date(2023, 12, 31), date(2023, 12, 31)));
        assert!(bounds.contains(&date(2023, 12, 31)));
        assert!(!bounds.contains(&date(2023, 6, 1)));
        assert_eq!(bounds.to_string(), "2023-12-31/2023-12-31");
    }

    #[test]
    fn test_bounds_with_minimum_drags_maximum() {
        let bounds = Bounds::new(date(2000, 1, 1), date(2010, 1, 1)).with_minimum(date(2020, 1, 1));
        assert_eq!(bounds.maximum(), date(2020, 1, 1));
        let bounds = bounds.with_maximum(date(2030, 1, 1));
        assert_eq!(bounds.pair(), (date(2020, 1, 1), date(2030, 1, 1)));
        assert_eq!(bounds.clamp(date(2040, 5, 5)), date(2030, 1, 1));
    }

    #[test]
    fn test_clamp_date() {
        let min = date(1900, 1, 1);
        let max = date(2100, 12, 31);
        assert_eq!(clamp_date(Some(date(1800, 2, 16)), min, max), Some(min));
        assert_eq!(clamp_date(Some(date(2200, 1, 1)), min, max), Some(max));
        assert_eq!(clamp_date(Some(date(2000, 6, 6)), min, max), Some(date(2000, 6, 6)));
        assert_eq!(clamp_date(None, min, max), None);
        // conflicting bounds collapse instead of panicking
        assert_eq!(clamp_date(Some(date(2000, 6, 6)), max, min), Some(max));
    }

    #[test]
    fn test_clamp_date_time_absent_becomes_minimum() {
        let min = date_time(2024, 1, 1, 8, 0, 0);
        let max = date_time(2024, 12, 31, 18, 0, 0);
        assert_eq!(clamp_date_time(None, min, max), min);
        assert_eq!(clamp_date_time(Some(date_time(2025, 1, 1, 0, 0, 0)), min, max), max);
        assert_eq!(clamp_date_time(Some(date_time(2024, 1, 1, 7, 0, 0)), min, max), min);
    }

    #[test]
    fn test_clamp_selected_time_cases() {
        struct TestCase {
            value:       Time,
            expected:    Time,
            description: &'static str,
        }

        let min = time(9, 30, 20);
        let max = time(17, 15, 40);
        let cases = [
            TestCase {
                value:       time(8, 10, 45),
                expected:    time(9, 30, 45),
                description: "below: seconds kept",
            },
            TestCase {
                value:       time(8, 10, 5),
                expected:    time(9, 30, 20),
                description: "below: kept seconds would still be below",
            },
            TestCase {
                value:       time(9, 30, 10),
                expected:    time(9, 30, 20),
                description: "only seconds below",
            },
            TestCase {
                value:       time(18, 0, 10),
                expected:    time(17, 15, 10),
                description: "above: seconds kept",
            },
            TestCase {
                value:       time(18, 0, 50),
                expected:    time(17, 15, 40),
                description: "above: kept seconds would still be above",
            },
            TestCase {
                value:       time(12, 0, 0),
                expected:    time(12, 0, 0),
                description: "inside",
            },
        ];

        for case in &cases {
            assert_eq!(
                clamp_selected_time(case.value, min, max),
                case.expected,
                "{}",
                case.description
            );
        }
    }
}
