//! Shorthand constructors for tests.

use std::sync::Arc;

use crate::{
    engine::SharedLocale,
    locale::FixedLocale,
    value::{Date, DateTime, Time},
};

pub fn date(year: u16, month: u8, day: u8) -> Date {
    Date::new(year, month, day).unwrap()
}

pub fn time(hour: u8, minute: u8, second: u8) -> Time {
    Time::new(hour, minute, second).unwrap()
}

pub fn date_time(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> DateTime {
    date(year, month, day).at(time(hour, minute, second))
}

pub fn en_us() -> SharedLocale {
    Arc::new(FixedLocale::en_us())
}
