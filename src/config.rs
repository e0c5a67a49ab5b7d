//! Serializable picker configuration.
//!
//! Every field has a default, so `{}` is a valid configuration for any picker.

use serde::{Deserialize, Serialize};

use crate::{
    consts::{DEFAULT_MAXIMUM_DATE, DEFAULT_MINIMUM_DATE},
    format::{DateFormat, TimeFormat},
    value::{Date, DateTime, Time},
};

/// Error loading a picker configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Malformed JSON, an unknown format name, or an invalid date/time string.
    #[error("Invalid picker configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Step between consecutive entries of each component column.
///
/// Values `<= 0` step by one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Intervals {
    pub year:   i32,
    pub month:  i32,
    pub day:    i32,
    pub hour:   i32,
    pub minute: i32,
    pub second: i32,
}

impl Default for Intervals {
    fn default() -> Self {
        Self {
            year:   1,
            month:  1,
            day:    1,
            hour:   1,
            minute: 1,
            second: 1,
        }
    }
}

const fn default_minimum_date() -> Date {
    let (year, month, day) = DEFAULT_MINIMUM_DATE;
    Date::from_parts(year, month, day)
}

const fn default_maximum_date() -> Date {
    let (year, month, day) = DEFAULT_MAXIMUM_DATE;
    Date::from_parts(year, month, day)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatePickerConfig {
    pub format:    DateFormat,
    pub minimum:   Date,
    pub maximum:   Date,
    pub value:     Option<Date>,
    pub intervals: Intervals,
}

impl Default for DatePickerConfig {
    fn default() -> Self {
        Self {
            format:    DateFormat::Default,
            minimum:   default_minimum_date(),
            maximum:   default_maximum_date(),
            value:     None,
            intervals: Intervals::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimePickerConfig {
    pub format:    TimeFormat,
    pub minimum:   Time,
    pub maximum:   Time,
    pub value:     Option<Time>,
    pub intervals: Intervals,
}

impl Default for TimePickerConfig {
    fn default() -> Self {
        Self {
            format:    TimeFormat::Default,
            minimum:   Time::MIDNIGHT,
            maximum:   Time::END_OF_DAY,
            value:     None,
            intervals: Intervals::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateTimePickerConfig {
    pub date_format: DateFormat,
    pub time_format: TimeFormat,
    pub minimum:     DateTime,
    pub maximum:     DateTime,
    /// Absent means "start at the minimum".
    pub value:       Option<DateTime>,
    pub intervals:   Intervals,
}

impl Default for DateTimePickerConfig {
    fn default() -> Self {
        Self {
            date_format: DateFormat::Default,
            time_format: TimeFormat::Default,
            minimum:     default_minimum_date().at(Time::MIDNIGHT),
            maximum:     default_maximum_date().at(Time::END_OF_DAY),
            value:       None,
            intervals:   Intervals::default(),
        }
    }
}

macro_rules! impl_from_json {
    ($($ty:ty),*) => {$(
        impl $ty {
            /// Parses a JSON configuration, filling missing fields with defaults.
            ///
            /// # Errors
            /// Returns `ConfigError::Json` for malformed input.
            pub fn from_json(json: &str) -> Result<Self, ConfigError> {
                Ok(serde_json::from_str(json)?)
            }
        }
    )*};
}

impl_from_json!(DatePickerConfig, TimePickerConfig, DateTimePickerConfig);
