//! Read-only locale data consumed by the format resolver and the generators.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_MONTH;

/// Width of a localized name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameWidth {
    /// "Jan", "AM"
    Abbreviated,
    /// "January", "AM"
    Full,
}

/// Source of the active locale's patterns and names.
///
/// Implementations are injected into pickers; nothing in this crate reads a
/// process-wide locale.
pub trait LocaleProvider {
    /// Short date pattern such as `M/d/yyyy`.
    fn short_date_pattern(&self) -> &str;

    /// Short time pattern such as `h:mm tt`.
    fn short_time_pattern(&self) -> &str;

    /// Localized month name for `month` in `1..=12`; empty for anything else.
    fn month_name(&self, month: u8, width: NameWidth) -> &str;

    /// Ante meridiem designator.
    fn am_designator(&self) -> &str;

    /// Post meridiem designator.
    fn pm_designator(&self) -> &str;
}

/// A locale described entirely by data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedLocale {
    pub name:               String,
    pub short_date_pattern: String,
    pub short_time_pattern: String,
    pub abbreviated_months: Vec<String>,
    pub full_months:        Vec<String>,
    pub am_designator:      String,
    pub pm_designator:      String,
}

const EN_FULL_MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

const DE_FULL_MONTHS: [&str; 12] = [
    "Januar", "Februar", "März", "April", "Mai", "Juni", "Juli", "August", "September",
    "Oktober", "November", "Dezember",
];

const DE_ABBREVIATED_MONTHS: [&str; 12] = [
    "Jan.", "Feb.", "März", "Apr.", "Mai", "Juni", "Juli", "Aug.", "Sept.", "Okt.", "Nov.", "Dez.",
];

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|&n| n.to_owned()).collect()
}

fn english_abbreviations() -> Vec<String> {
    EN_FULL_MONTHS.iter().map(|n| n.chars().take(3).collect()).collect()
}

impl FixedLocale {
    /// United States English: `M/d/yyyy`, `h:mm tt`.
    pub fn en_us() -> Self {
        Self {
            name:               "en-US".to_owned(),
            short_date_pattern: "M/d/yyyy".to_owned(),
            short_time_pattern: "h:mm tt".to_owned(),
            abbreviated_months: english_abbreviations(),
            full_months:        owned(&EN_FULL_MONTHS),
            am_designator:      "AM".to_owned(),
            pm_designator:      "PM".to_owned(),
        }
    }

    /// British English: `dd/MM/yyyy`, `HH:mm`.
    pub fn en_gb() -> Self {
        Self {
            name: "en-GB".to_owned(),
            short_date_pattern: "dd/MM/yyyy".to_owned(),
            short_time_pattern: "HH:mm".to_owned(),
            am_designator: "am".to_owned(),
            pm_designator: "pm".to_owned(),
            ..Self::en_us()
        }
    }

    /// German: `dd.MM.yyyy`, `HH:mm`.
    pub fn de_de() -> Self {
        Self {
            name:               "de-DE".to_owned(),
            short_date_pattern: "dd.MM.yyyy".to_owned(),
            short_time_pattern: "HH:mm".to_owned(),
            abbreviated_months: owned(&DE_ABBREVIATED_MONTHS),
            full_months:        owned(&DE_FULL_MONTHS),
            am_designator:      "AM".to_owned(),
            pm_designator:      "PM".to_owned(),
        }
    }

    /// Japanese: `yyyy/MM/dd`, `H:mm`.
    pub fn ja_jp() -> Self {
        let months: Vec<String> = (1..=MAX_MONTH).map(|m| format!("{m}月")).collect();
        Self {
            name:               "ja-JP".to_owned(),
            short_date_pattern: "yyyy/MM/dd".to_owned(),
            short_time_pattern: "H:mm".to_owned(),
            abbreviated_months: months.clone(),
            full_months:        months,
            am_designator:      "午前".to_owned(),
            pm_designator:      "午後".to_owned(),
        }
    }

    /// Culture-neutral data: `MM/dd/yyyy`, `HH:mm:ss`.
    pub fn invariant() -> Self {
        Self {
            name: String::new(),
            short_date_pattern: "MM/dd/yyyy".to_owned(),
            short_time_pattern: "HH:mm:ss".to_owned(),
            ..Self::en_us()
        }
    }
}

impl Default for FixedLocale {
    fn default() -> Self {
        Self::invariant()
    }
}

impl LocaleProvider for FixedLocale {
    fn short_date_pattern(&self) -> &str {
        &self.short_date_pattern
    }

    fn short_time_pattern(&self) -> &str {
        &self.short_time_pattern
    }

    fn month_name(&self, month: u8, width: NameWidth) -> &str {
        let names = match width {
            NameWidth::Abbreviated => &self.abbreviated_months,
            NameWidth::Full => &self.full_months,
        };
        month
            .checked_sub(1)
            .and_then(|i| names.get(usize::from(i)))
            .map_or("", String::as_str)
    }

    fn am_designator(&self) -> &str {
        &self.am_designator
    }

    fn pm_designator(&self) -> &str {
        &self.pm_designator
    }
}
