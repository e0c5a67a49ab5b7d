//! Generation of the bounded, interval-stepped entries of each component column.
//!
//! Date columns always end on their true upper boundary even when that breaks the
//! step; time columns hold the interval multiples that fall inside the bounds.
//! Nothing here fails: inverted ranges give empty columns and intervals `<= 0` step
//! by one.

use std::ops::RangeInclusive;

use crate::{
    column::Column,
    consts::{
        DECEMBER, HOURS_PER_HALF_DAY, JANUARY, MAX_HOUR, MAX_MINUTE, MAX_MONTH, MAX_SECOND, MIN_DAY,
    },
    format::{HourCycle, Token},
    locale::{LocaleProvider, NameWidth},
    value::{Date, DateTime, days_in_month},
};

/// Key of the AM entry in a meridiem column.
pub const AM_KEY: u16 = 0;
/// Key of the PM entry in a meridiem column.
pub const PM_KEY: u16 = 1;

/// Step used for a configured interval.
pub fn normalize_interval(interval: i32) -> usize {
    usize::try_from(interval).ok().filter(|&i| i > 0).unwrap_or(1)
}

/// `start..=end` by `interval`, with `end` appended when the step skips it.
fn stepped_to_boundary<T>(start: T, end: T, interval: i32) -> Vec<T>
where
    T: Copy + PartialOrd,
    RangeInclusive<T>: Iterator<Item = T>,
{
    if start > end {
        return Vec::new();
    }
    let mut values: Vec<T> = (start..=end).step_by(normalize_interval(interval)).collect();
    if values.last() != Some(&end) {
        values.push(end);
    }
    values
}

/// Interval multiples of `origin..=last` that fall inside `lower..=upper`.
fn stepped_within(origin: u8, last: u8, lower: u8, upper: u8, interval: i32) -> Vec<u8> {
    (origin..=last)
        .step_by(normalize_interval(interval))
        .filter(|v| (lower..=upper).contains(v))
        .collect()
}

/// Numeric entries keyed by their own value.
fn numeric_entries(values: Vec<u8>, token: Token) -> Column {
    Column::from_entries(
        values
            .into_iter()
            .map(|v| (u16::from(v), format_number(u16::from(v), token))),
    )
}

fn format_number(value: u16, token: Token) -> String {
    match token {
        Token::Numeric => value.to_string(),
        _ => format!("{value:02}"),
    }
}

pub fn format_year(year: u16, token: Token) -> String {
    match token {
        Token::Numeric => year.to_string(),
        Token::TwoDigit => format!("{:02}", year % 100),
        _ => format!("{year:04}"),
    }
}

pub fn format_month(month: u8, token: Token, locale: &dyn LocaleProvider) -> String {
    match token {
        Token::Abbreviated => locale.month_name(month, NameWidth::Abbreviated).to_owned(),
        Token::Full => locale.month_name(month, NameWidth::Full).to_owned(),
        _ => format_number(u16::from(month), token),
    }
}

/// Formats a 24-hour `hour`; on a 12-hour clock 0 shows as 12 and 13 as 1.
pub fn format_hour(hour: u8, token: Token, cycle: HourCycle) -> String {
    let shown = match cycle {
        HourCycle::H24 => hour,
        HourCycle::H12 => match hour % HOURS_PER_HALF_DAY {
            0 => HOURS_PER_HALF_DAY,
            h => h,
        },
    };
    format_number(u16::from(shown), token)
}

pub fn format_meridiem(is_pm: bool, token: Token, locale: &dyn LocaleProvider) -> String {
    let designator = if is_pm {
        locale.pm_designator()
    } else {
        locale.am_designator()
    };
    let initial = |d: &str| d.chars().next();
    // One letter only when it still tells the halves apart ("午前"/"午後" would not).
    let distinct = initial(locale.am_designator()) != initial(locale.pm_designator());
    match token {
        Token::Abbreviated if distinct => designator.chars().take(1).collect(),
        _ => designator.to_owned(),
    }
}

/// Years from `min.year` to `max.year`.
pub fn years(token: Token, min: Date, max: Date, interval: i32) -> Column {
    Column::from_entries(
        stepped_to_boundary(min.year(), max.year(), interval)
            .into_iter()
            .map(|y| (y, format_year(y, token))),
    )
}

/// Months selectable in `year`, cut at the boundary months of `min`/`max`.
pub fn months(
    token: Token,
    year: u16,
    min: Date,
    max: Date,
    interval: i32,
    locale: &dyn LocaleProvider,
) -> Column {
    let start = if year == min.year() { min.month() } else { JANUARY };
    let end = if year == max.year() { max.month() } else { DECEMBER };
    Column::from_entries(
        stepped_to_boundary(start, end, interval)
            .into_iter()
            .map(|m| (u16::from(m), format_month(m, token, locale))),
    )
}

/// Days of `(year, month)`, cut at the boundary days of `min`/`max`.
pub fn days(token: Token, month: u8, year: u16, min: Date, max: Date, interval: i32) -> Column {
    if month == 0 || month > MAX_MONTH {
        return Column::default();
    }
    let start = if (year, month) == (min.year(), min.month()) {
        min.day()
    } else {
        MIN_DAY
    };
    let mut end = days_in_month(year, month);
    if (year, month) == (max.year(), max.month()) {
        end = end.min(max.day());
    }
    numeric_entries(stepped_to_boundary(start, end, interval), token)
}

/// Hours for `current`'s day: all 24, or the 12 of `current`'s half day on a 12-hour
/// clock. Keys are always 24-hour values.
pub fn hours(
    token: Token,
    cycle: HourCycle,
    interval: i32,
    current: DateTime,
    min: DateTime,
    max: DateTime,
) -> Column {
    let (origin, last) = match cycle {
        HourCycle::H24 => (0, MAX_HOUR),
        HourCycle::H12 if current.time().is_pm() => (HOURS_PER_HALF_DAY, MAX_HOUR),
        HourCycle::H12 => (0, HOURS_PER_HALF_DAY - 1),
    };
    let lower = if current.date() == min.date() {
        min.time().hour()
    } else {
        0
    };
    let upper = if current.date() == max.date() {
        max.time().hour()
    } else {
        MAX_HOUR
    };
    Column::from_entries(
        stepped_within(origin, last, lower, upper, interval)
            .into_iter()
            .map(|h| (u16::from(h), format_hour(h, token, cycle))),
    )
}

/// Minutes of `hour` on `current`'s day.
pub fn minutes(
    token: Token,
    interval: i32,
    hour: u8,
    current: DateTime,
    min: DateTime,
    max: DateTime,
) -> Column {
    let on_min = current.date() == min.date() && hour == min.time().hour();
    let on_max = current.date() == max.date() && hour == max.time().hour();
    let lower = if on_min { min.time().minute() } else { 0 };
    let upper = if on_max {
        max.time().minute()
    } else {
        MAX_MINUTE
    };
    numeric_entries(stepped_within(0, MAX_MINUTE, lower, upper, interval), token)
}

/// Seconds of `hour:minute` on `current`'s day.
pub fn seconds(
    token: Token,
    interval: i32,
    hour: u8,
    minute: u8,
    current: DateTime,
    min: DateTime,
    max: DateTime,
) -> Column {
    let on_min = current.date() == min.date()
        && (hour, minute) == (min.time().hour(), min.time().minute());
    let on_max = current.date() == max.date()
        && (hour, minute) == (max.time().hour(), max.time().minute());
    let lower = if on_min { min.time().second() } else { 0 };
    let upper = if on_max {
        max.time().second()
    } else {
        MAX_SECOND
    };
    numeric_entries(stepped_within(0, MAX_SECOND, lower, upper, interval), token)
}

/// AM and PM designators, dropping a half of the day the bounds rule out on
/// `current`'s date.
pub fn meridiem(
    token: Token,
    min: DateTime,
    max: DateTime,
    current: DateTime,
    locale: &dyn LocaleProvider,
) -> Column {
    let am_reachable = current.date() != min.date() || !min.time().is_pm();
    let pm_reachable = current.date() != max.date() || max.time().is_pm();
    let mut entries = Vec::with_capacity(2);
    if am_reachable {
        entries.push((AM_KEY, format_meridiem(false, token, locale)));
    }
    if pm_reachable {
        entries.push((PM_KEY, format_meridiem(true, token, locale)));
    }
    Column::from_entries(entries)
}
