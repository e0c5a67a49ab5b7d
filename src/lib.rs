//! Column generation and selection synchronization for picker controls.
//!
//! A picker shows one scrolling column per date or time component. This crate
//! decides which columns exist and in what order (from a format selector or the
//! locale's short pattern), fills them with bounded, interval-stepped values and
//! keeps the selected entries in step with a single composite value.

mod bounds;
mod column;
mod config;
mod consts;
mod date_picker;
mod date_time_picker;
mod engine;
mod format;
mod generate;
mod item_picker;
mod locale;
mod prelude;
mod time_picker;
mod value;

#[cfg(test)]
mod test_utils;

pub use bounds::{
    Bounds, clamp_date, clamp_date_time, clamp_selected_time, resolve_max, resolve_max_date,
    resolve_max_date_time, resolve_max_time,
};
pub use column::{Column, clamp_index, index_for, index_of_item};
pub use config::{ConfigError, DatePickerConfig, DateTimePickerConfig, Intervals, TimePickerConfig};
pub use consts::*;
pub use date_picker::DatePicker;
pub use date_time_picker::DateTimePicker;
pub use engine::{SharedLocale, SyncState, ValueChanged};
pub use format::{
    DateFormat, FormatSpec, HourCycle, Slot, SlotFormat, TimeFormat, Token, parse_date_pattern,
    parse_time_pattern, resolve_date_format, resolve_time_format,
};
pub use generate::{
    AM_KEY, PM_KEY, days, format_hour, format_meridiem, format_month, format_year, hours,
    meridiem, minutes, months, normalize_interval, seconds, years,
};
pub use item_picker::{ItemPicker, SelectionChanged};
pub use locale::{FixedLocale, LocaleProvider, NameWidth};
pub use time_picker::TimePicker;
pub use value::{Date, DateTime, Time, ValueError, days_in_month, is_leap_year};
