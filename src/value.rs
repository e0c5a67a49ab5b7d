use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{
    CENTURY_CYCLE, DATE_SEPARATOR, DATE_TIME_SEPARATOR, DAYS_IN_MONTH, FEBRUARY,
    FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, HOURS_PER_HALF_DAY, LEAP_YEAR_CYCLE, MAX_HOUR,
    MAX_MINUTE, MAX_MONTH, MAX_SECOND, MAX_YEAR, MIN_DAY, MIN_YEAR, TIME_SEPARATOR,
};
use crate::prelude::*;

/// Error returned when a date or time component is out of range or cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    /// Year outside `MIN_YEAR..=MAX_YEAR`.
    #[error("Invalid year: {0} (must be {min}-{max})", min = MIN_YEAR, max = MAX_YEAR)]
    InvalidYear(u16),

    /// Month outside `1..=12`.
    #[error("Invalid month: {0} (must be 1-{max})", max = MAX_MONTH)]
    InvalidMonth(u8),

    /// Day that does not exist in the given month.
    #[error("Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { year: u16, month: u8, day: u8 },

    /// Hour, minute or second out of range.
    #[error("Invalid time {hour:02}:{minute:02}:{second:02}")]
    InvalidTime { hour: u8, minute: u8, second: u8 },

    /// Text that is not an ISO 8601 date, time or date-time.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Blank input.
    #[error("Empty input")]
    EmptyInput,
}

/// A calendar date in the proleptic Gregorian calendar, year `1..=9999`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", year, month, day)]
pub struct Date {
    year:  u16,
    month: u8,
    day:   u8,
}

impl Date {
    /// Creates a validated date.
    ///
    /// # Errors
    /// Returns `ValueError` when the year, month or day is out of range.
    pub const fn new(year: u16, month: u8, day: u8) -> Result<Self, ValueError> {
        if year < MIN_YEAR || year > MAX_YEAR {
            return Err(ValueError::InvalidYear(year));
        }
        if month == 0 || month > MAX_MONTH {
            return Err(ValueError::InvalidMonth(month));
        }
        if day < MIN_DAY || day > days_in_month(year, month) {
            return Err(ValueError::InvalidDay { year, month, day });
        }
        Ok(Self { year, month, day })
    }

    /// Builds a date whose components are already known to be valid.
    pub(crate) const fn from_parts(year: u16, month: u8, day: u8) -> Self {
        debug_assert!(month != 0 && month <= MAX_MONTH);
        Self { year, month, day }
    }

    /// Builds a date, pulling the day back to the month's last day when it overflows.
    pub(crate) fn fitted(year: u16, month: u8, day: u8) -> Self {
        let year = year.clamp(MIN_YEAR, MAX_YEAR);
        let month = month.clamp(1, MAX_MONTH);
        let day = day.clamp(MIN_DAY, days_in_month(year, month));
        Self { year, month, day }
    }

    #[inline]
    pub const fn year(self) -> u16 {
        self.year
    }

    #[inline]
    pub const fn month(self) -> u8 {
        self.month
    }

    #[inline]
    pub const fn day(self) -> u8 {
        self.day
    }

    /// Whether this is the last day of its month.
    pub const fn is_last_day_of_month(self) -> bool {
        self.day == days_in_month(self.year, self.month)
    }

    /// Combines this date with a time of day.
    pub const fn at(self, time: Time) -> DateTime {
        DateTime { date: self, time }
    }
}

/// A time of day with second precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:02}:{:02}:{:02}", hour, minute, second)]
pub struct Time {
    hour:   u8,
    minute: u8,
    second: u8,
}

impl Time {
    /// 00:00:00
    pub const MIDNIGHT: Self = Self { hour: 0, minute: 0, second: 0 };
    /// 23:59:59
    pub const END_OF_DAY: Self = Self {
        hour:   MAX_HOUR,
        minute: MAX_MINUTE,
        second: MAX_SECOND,
    };

    /// Creates a validated time of day.
    ///
    /// # Errors
    /// Returns `ValueError::InvalidTime` when any component is out of range.
    pub const fn new(hour: u8, minute: u8, second: u8) -> Result<Self, ValueError> {
        if hour > MAX_HOUR || minute > MAX_MINUTE || second > MAX_SECOND {
            return Err(ValueError::InvalidTime { hour, minute, second });
        }
        Ok(Self { hour, minute, second })
    }

    pub(crate) const fn from_parts(hour: u8, minute: u8, second: u8) -> Self {
        debug_assert!(hour <= MAX_HOUR && minute <= MAX_MINUTE && second <= MAX_SECOND);
        Self { hour, minute, second }
    }

    /// Hour in 24-hour form (0-23)
    #[inline]
    pub const fn hour(self) -> u8 {
        self.hour
    }

    #[inline]
    pub const fn minute(self) -> u8 {
        self.minute
    }

    #[inline]
    pub const fn second(self) -> u8 {
        self.second
    }

    /// True for 12:00:00 and later.
    pub const fn is_pm(self) -> bool {
        self.hour >= HOURS_PER_HALF_DAY
    }

    /// Returns a copy with the seconds replaced.
    pub(crate) const fn with_second(self, second: u8) -> Self {
        Self { second, ..self }
    }
}

/// A date combined with a time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From)]
#[display(fmt = "{}T{}", date, time)]
pub struct DateTime {
    date: Date,
    time: Time,
}

impl DateTime {
    pub const fn new(date: Date, time: Time) -> Self {
        Self { date, time }
    }

    #[inline]
    pub const fn date(self) -> Date {
        self.date
    }

    #[inline]
    pub const fn time(self) -> Time {
        self.time
    }
}

pub const fn is_leap_year(year: u16) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

/// Number of days in `month` of `year`, leap-year aware. Zero for a month outside
/// `1..=12`.
pub const fn days_in_month(year: u16, month: u8) -> u8 {
    if month == 0 || month > MAX_MONTH {
        return 0;
    }
    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

// --- parsing ---

fn parse_u16(s: &str) -> Result<u16, ValueError> {
    s.trim()
        .parse::<u16>()
        .map_err(|_| ValueError::InvalidFormat(s.to_owned()))
}

fn parse_u8(s: &str) -> Result<u8, ValueError> {
    s.trim()
        .parse::<u8>()
        .map_err(|_| ValueError::InvalidFormat(s.to_owned()))
}

impl FromStr for Date {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValueError::EmptyInput);
        }

        let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).collect();
        let [year, month, day] = parts.as_slice() else {
            return Err(ValueError::InvalidFormat(format!(
                "Expected YYYY{DATE_SEPARATOR}MM{DATE_SEPARATOR}DD, found {trimmed}"
            )));
        };
        Self::new(parse_u16(year)?, parse_u8(month)?, parse_u8(day)?)
    }
}

impl FromStr for Time {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValueError::EmptyInput);
        }

        // Seconds are optional: HH:MM or HH:MM:SS
        let parts: Vec<&str> = trimmed.split(TIME_SEPARATOR).collect();
        match parts.as_slice() {
            [hour, minute] => Self::new(parse_u8(hour)?, parse_u8(minute)?, 0),
            [hour, minute, second] => {
                Self::new(parse_u8(hour)?, parse_u8(minute)?, parse_u8(second)?)
            },
            _ => Err(ValueError::InvalidFormat(format!(
                "Expected HH{TIME_SEPARATOR}MM[{TIME_SEPARATOR}SS], found {trimmed}"
            ))),
        }
    }
}

impl FromStr for DateTime {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValueError::EmptyInput);
        }

        let (date, time) = trimmed
            .split_once(DATE_TIME_SEPARATOR)
            .or_else(|| trimmed.split_once(' '))
            .ok_or_else(|| ValueError::InvalidFormat(trimmed.to_owned()))?;
        Ok(Self::new(date.parse()?, time.parse()?))
    }
}

macro_rules! serde_as_iso_string {
    ($($ty:ty),*) => {$(
        impl Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&self.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    )*};
}

serde_as_iso_string!(Date, Time, DateTime);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, date_time, time};

    #[test]
    fn test_date_new_cases() {
        struct TestCase {
            year:        u16,
            month:       u8,
            day:         u8,
            is_valid:    bool,
            description: &'static str,
        }

        let cases = [
            TestCase { year: 2024, month: 2, day: 29, is_valid: true, description: "leap day" },
            TestCase { year: 2023, month: 2, day: 29, is_valid: false, description: "non-leap Feb 29" },
            TestCase { year: 2024, month: 4, day: 31, is_valid: false, description: "April 31" },
            TestCase { year: 2024, month: 13, day: 1, is_valid: false, description: "month 13" },
            TestCase { year: 2024, month: 0, day: 1, is_valid: false, description: "month 0" },
            TestCase { year: 0, month: 1, day: 1, is_valid: false, description: "year 0" },
            TestCase { year: 10000, month: 1, day: 1, is_valid: false, description: "year 10000" },
            TestCase { year: 9999, month: 12, day: 31, is_valid: true, description: "last date" },
        ];

        for case in &cases {
            assert_eq!(
                Date::new(case.year, case.month, case.day).is_ok(),
                case.is_valid,
                "{}",
                case.description
            );
        }
    }

    #[test]
    fn test_date_errors() {
        assert!(matches!(Date::new(2024, 13, 1), Err(ValueError::InvalidMonth(13))));
        assert!(matches!(Date::new(0, 1, 1), Err(ValueError::InvalidYear(0))));
        assert!(matches!(
            Date::new(2023, 2, 30),
            Err(ValueError::InvalidDay { year: 2023, month: 2, day: 30 })
        ));
    }

    #[test]
    fn test_time_new() {
        assert!(Time::new(23, 59, 59).is_ok());
        assert!(matches!(Time::new(24, 0, 0), Err(ValueError::InvalidTime { hour: 24, .. })));
        assert!(Time::new(12, 60, 0).is_err());
        assert!(Time::new(12, 0, 60).is_err());
    }

    #[test]
    fn test_fitted_pulls_day_into_month() {
        assert_eq!(Date::fitted(2023, 2, 31), date(2023, 2, 28));
        assert_eq!(Date::fitted(2024, 2, 31), date(2024, 2, 29));
        assert_eq!(Date::fitted(2024, 4, 31), date(2024, 4, 30));
        assert_eq!(Date::fitted(2024, 5, 31), date(2024, 5, 31));
    }

    #[test]
    fn test_last_day_of_month() {
        assert!(date(2023, 2, 28).is_last_day_of_month());
        assert!(!date(2024, 2, 28).is_last_day_of_month());
        assert!(date(2024, 12, 31).is_last_day_of_month());
    }

    #[test]
    fn test_is_pm() {
        assert!(!time(0, 0, 0).is_pm());
        assert!(!time(11, 59, 59).is_pm());
        assert!(time(12, 0, 0).is_pm());
        assert!(time(23, 0, 0).is_pm());
    }

    #[test]
    fn test_ordering() {
        assert!(date(2023, 12, 31) < date(2024, 1, 1));
        assert!(date(2024, 1, 31) < date(2024, 2, 1));
        assert!(time(9, 59, 59) < time(10, 0, 0));
        assert!(date_time(2024, 1, 1, 23, 0, 0) < date_time(2024, 1, 2, 0, 0, 0));
    }

    #[test]
    fn test_display() {
        assert_eq!(date(991, 8, 5).to_string(), "0991-08-05");
        assert_eq!(time(7, 5, 9).to_string(), "07:05:09");
        assert_eq!(date_time(2024, 2, 29, 13, 5, 0).to_string(), "2024-02-29T13:05:00");
    }

    #[test]
    fn test_date_time_from_pair() {
        let value = DateTime::from((date(2024, 2, 29), time(13, 5, 0)));
        assert_eq!(value, date(2024, 2, 29).at(time(13, 5, 0)));
        assert_eq!(value.date(), date(2024, 2, 29));
    }

    #[test]
    fn test_parse() {
        assert_eq!("2024-02-29".parse::<Date>(), Ok(date(2024, 2, 29)));
        assert_eq!(" 13:05 ".parse::<Time>(), Ok(time(13, 5, 0)));
        assert_eq!("13:05:07".parse::<Time>(), Ok(time(13, 5, 7)));
        assert_eq!(
            "2024-02-29T13:05:00".parse::<DateTime>(),
            Ok(date_time(2024, 2, 29, 13, 5, 0))
        );
        assert_eq!(
            "2024-02-29 13:05".parse::<DateTime>(),
            Ok(date_time(2024, 2, 29, 13, 5, 0))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Date>(), Err(ValueError::EmptyInput));
        assert!(matches!("2024-02".parse::<Date>(), Err(ValueError::InvalidFormat(_))));
        assert!(matches!("2024-XX-01".parse::<Date>(), Err(ValueError::InvalidFormat(_))));
        assert!(matches!("2023-02-29".parse::<Date>(), Err(ValueError::InvalidDay { .. })));
        assert!(matches!("1:2:3:4".parse::<Time>(), Err(ValueError::InvalidFormat(_))));
        assert!(matches!("25:00".parse::<Time>(), Err(ValueError::InvalidTime { .. })));
        assert!(matches!("2024-02-29".parse::<DateTime>(), Err(ValueError::InvalidFormat(_))));
    }

    #[test]
    fn test_serde_string_format() {
        let value = date_time(2024, 2, 29, 13, 5, 0);
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#""2024-02-29T13:05:00""#);
        let parsed: DateTime = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, value);

        let result: Result<Date, _> = serde_json::from_str(r#""2024-02-30""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_is_leap_year_cases() {
        for (year, expected) in [
            (2020, true),
            (2023, false),
            (1900, false),
            (2100, false),
            (2000, true),
            (2400, true),
        ] {
            assert_eq!(is_leap_year(year), expected, "year {year}");
        }
    }

    #[test]
    fn test_days_in_month() {
        let expected = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for month in 1..=12 {
            assert_eq!(days_in_month(2023, month), expected[month as usize], "month {month}");
        }
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2000, 2), 29, "Century year divisible by 400");
    }

    #[test]
    fn test_days_in_month_out_of_range_month() {
        for month in [0, 13, u8::MAX] {
            assert_eq!(days_in_month(2024, month), 0, "month {month}");
        }
        assert!(Date::new(2024, 13, 0).is_err());
    }
}
