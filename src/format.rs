//! Resolution of format selectors into ordered component slots.
//!
//! Both locale patterns and the fixed selectors go through the same marker table,
//! so `DateFormat::DdMmmYyyy` and a locale whose short pattern is `dd MMM yyyy`
//! produce identical specs.

use serde::{Deserialize, Serialize};

use crate::{locale::LocaleProvider, prelude::*};

/// One date or time component a picker can show as a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    #[display(fmt = "year")]
    Year,
    #[display(fmt = "month")]
    Month,
    #[display(fmt = "day")]
    Day,
    #[display(fmt = "hour")]
    Hour,
    #[display(fmt = "minute")]
    Minute,
    #[display(fmt = "second")]
    Second,
    #[display(fmt = "meridiem")]
    Meridiem,
}

impl Slot {
    /// Whether the slot belongs to the date half of a date-time.
    pub const fn is_date(self) -> bool {
        matches!(self, Self::Year | Self::Month | Self::Day)
    }
}

/// Display width/style of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    /// `d`, `M`, `y`, `h`: no padding
    Numeric,
    /// `dd`, `MM`, `yyyy`, `hh`: zero padded (four digits for years)
    Padded,
    /// `yy`: last two digits of the year
    TwoDigit,
    /// `MMM`, `t`: abbreviated month name or one-letter designator
    Abbreviated,
    /// `MMMM`, `tt`: full month name or designator
    Full,
}

/// Whether hours are shown on a 12- or 24-hour clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HourCycle {
    H12,
    H24,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotFormat {
    pub slot:  Slot,
    pub token: Token,
}

/// Ordered slots of a picker plus the hour cycle when hours are shown.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormatSpec {
    slots:      Vec<SlotFormat>,
    hour_cycle: Option<HourCycle>,
}

impl FormatSpec {
    /// A spec with no slots: "cannot build columns".
    pub const fn empty() -> Self {
        Self {
            slots:      Vec::new(),
            hour_cycle: None,
        }
    }

    pub fn slots(&self) -> &[SlotFormat] {
        &self.slots
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub const fn hour_cycle(&self) -> Option<HourCycle> {
        self.hour_cycle
    }

    /// Column position of `slot`, if shown.
    pub fn position(&self, slot: Slot) -> Option<usize> {
        self.slots.iter().position(|s| s.slot == slot)
    }

    pub fn token(&self, slot: Slot) -> Option<Token> {
        self.slots.iter().find(|s| s.slot == slot).map(|s| s.token)
    }

    pub fn contains(&self, slot: Slot) -> bool {
        self.position(slot).is_some()
    }

    /// Date slots followed by time slots, as shown by a date-time picker.
    pub fn concat(date: &Self, time: &Self) -> Self {
        let slots = date
            .slots
            .iter()
            .filter(|s| s.slot.is_date())
            .chain(time.slots.iter().filter(|s| !s.slot.is_date()))
            .copied()
            .collect();
        Self {
            slots,
            hour_cycle: time.hour_cycle,
        }
    }
}

/// Date column layouts a host can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateFormat {
    /// Order and widths come from the locale's short date pattern.
    #[default]
    Default,
    DdMmYyyy,
    DdMmmYyyy,
    #[serde(rename = "m_d_yyyy")]
    MDYyyy,
    MmDdYyyy,
    MmmDdYyyy,
    YyyyMmDd,
    YyyyMmmDd,
    MmmmYyyy,
    DdMm,
}

impl DateFormat {
    /// Fixed pattern for explicit selectors, `None` for `Default`.
    pub const fn pattern(self) -> Option<&'static str> {
        match self {
            Self::Default => None,
            Self::DdMmYyyy => Some("dd MM yyyy"),
            Self::DdMmmYyyy => Some("dd MMM yyyy"),
            Self::MDYyyy => Some("M d yyyy"),
            Self::MmDdYyyy => Some("MM dd yyyy"),
            Self::MmmDdYyyy => Some("MMM dd yyyy"),
            Self::YyyyMmDd => Some("yyyy MM dd"),
            Self::YyyyMmmDd => Some("yyyy MMM dd"),
            Self::MmmmYyyy => Some("MMMM yyyy"),
            Self::DdMm => Some("dd MM"),
        }
    }
}

/// Time column layouts a host can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeFormat {
    /// Order and widths come from the locale's short time pattern.
    #[default]
    Default,
    /// `H:mm`
    HMm,
    /// `HH:mm`
    HhMm24,
    /// `HH:mm:ss`
    HhMmSs24,
    /// `h:mm tt`
    HMmTt,
    /// `hh:mm tt`
    HhMmTt,
    /// `hh:mm:ss tt`
    HhMmSsTt,
    /// `hh tt`
    HhTt,
    /// `mm:ss`
    MmSs,
}

impl TimeFormat {
    /// Fixed pattern for explicit selectors, `None` for `Default`.
    pub const fn pattern(self) -> Option<&'static str> {
        match self {
            Self::Default => None,
            Self::HMm => Some("H:mm"),
            Self::HhMm24 => Some("HH:mm"),
            Self::HhMmSs24 => Some("HH:mm:ss"),
            Self::HMmTt => Some("h:mm tt"),
            Self::HhMmTt => Some("hh:mm tt"),
            Self::HhMmSsTt => Some("hh:mm:ss tt"),
            Self::HhTt => Some("hh tt"),
            Self::MmSs => Some("mm:ss"),
        }
    }
}

/// Maps a run of one marker letter to a slot and, by run length, a token.
struct MarkerRule {
    marker: char,
    slot:   Slot,
    cycle:  Option<HourCycle>,
    /// `(minimum run length, token)`, ascending
    tokens: &'static [(usize, Token)],
}

const NUMERIC_OR_PADDED: &[(usize, Token)] = &[(1, Token::Numeric), (2, Token::Padded)];

const DATE_MARKERS: &[MarkerRule] = &[
    MarkerRule {
        marker: 'd',
        slot:   Slot::Day,
        cycle:  None,
        tokens: NUMERIC_OR_PADDED,
    },
    MarkerRule {
        marker: 'M',
        slot:   Slot::Month,
        cycle:  None,
        tokens: &[
            (1, Token::Numeric),
            (2, Token::Padded),
            (3, Token::Abbreviated),
            (4, Token::Full),
        ],
    },
    MarkerRule {
        marker: 'y',
        slot:   Slot::Year,
        cycle:  None,
        tokens: &[(1, Token::Numeric), (2, Token::TwoDigit), (3, Token::Padded)],
    },
];

const TIME_MARKERS: &[MarkerRule] = &[
    MarkerRule {
        marker: 'h',
        slot:   Slot::Hour,
        cycle:  Some(HourCycle::H12),
        tokens: NUMERIC_OR_PADDED,
    },
    MarkerRule {
        marker: 'H',
        slot:   Slot::Hour,
        cycle:  Some(HourCycle::H24),
        tokens: NUMERIC_OR_PADDED,
    },
    MarkerRule {
        marker: 'm',
        slot:   Slot::Minute,
        cycle:  None,
        tokens: NUMERIC_OR_PADDED,
    },
    MarkerRule {
        marker: 's',
        slot:   Slot::Second,
        cycle:  None,
        tokens: NUMERIC_OR_PADDED,
    },
    MarkerRule {
        marker: 't',
        slot:   Slot::Meridiem,
        cycle:  None,
        tokens: &[(1, Token::Abbreviated), (2, Token::Full)],
    },
];

impl MarkerRule {
    fn token_for(&self, run: usize) -> Token {
        self.tokens
            .iter()
            .rev()
            .find(|(min, _)| run >= *min)
            .map_or(Token::Numeric, |&(_, token)| token)
    }
}

/// Splits a pattern into `(letter, run length)` pairs, skipping quoted literals.
fn marker_runs(pattern: &str) -> Vec<(char, usize)> {
    let mut runs: Vec<(char, usize)> = Vec::new();
    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\'' | '"' => {
                for literal in chars.by_ref() {
                    if literal == c {
                        break;
                    }
                }
            },
            '\\' => {
                chars.next();
            },
            _ => {
                let mut len = 1;
                while chars.next_if_eq(&c).is_some() {
                    len += 1;
                }
                runs.push((c, len));
            },
        }
    }
    runs
}

/// Applies the marker table, keeping the longest run per slot in order of first appearance.
fn resolve_runs(pattern: &str, rules: &[MarkerRule]) -> FormatSpec {
    let mut slots: Vec<(SlotFormat, usize)> = Vec::new();
    let mut hour_cycle = None;

    for (marker, run) in marker_runs(pattern) {
        let Some(rule) = rules.iter().find(|r| r.marker == marker) else {
            continue;
        };
        let format = SlotFormat {
            slot:  rule.slot,
            token: rule.token_for(run),
        };
        match slots.iter_mut().find(|(s, _)| s.slot == rule.slot) {
            Some(existing) if existing.1 >= run => {},
            Some(existing) => {
                *existing = (format, run);
                hour_cycle = rule.cycle.or(hour_cycle);
            },
            None => {
                slots.push((format, run));
                hour_cycle = rule.cycle.or(hour_cycle);
            },
        }
    }

    let mut slots: Vec<SlotFormat> = slots.into_iter().map(|(s, _)| s).collect();
    // A designator only means something next to a 12-hour clock.
    if hour_cycle != Some(HourCycle::H12) {
        slots.retain(|s| s.slot != Slot::Meridiem);
    }
    // Without a designator column the other half of the day is unreachable on a
    // 12-hour clock, so the hours run through all 24.
    if hour_cycle == Some(HourCycle::H12) && !slots.iter().any(|s| s.slot == Slot::Meridiem) {
        hour_cycle = Some(HourCycle::H24);
    }
    FormatSpec { slots, hour_cycle }
}

/// Parses a date pattern; empty when it has neither a day nor a month marker.
pub fn parse_date_pattern(pattern: &str) -> FormatSpec {
    let spec = resolve_runs(pattern, DATE_MARKERS);
    if spec.contains(Slot::Day) || spec.contains(Slot::Month) {
        spec
    } else {
        FormatSpec::empty()
    }
}

/// Parses a time pattern; empty when it has no hour marker.
pub fn parse_time_pattern(pattern: &str) -> FormatSpec {
    let spec = resolve_runs(pattern, TIME_MARKERS);
    if spec.contains(Slot::Hour) {
        spec
    } else {
        FormatSpec::empty()
    }
}

/// Resolves a date selector, consulting the locale only for `DateFormat::Default`.
pub fn resolve_date_format(format: DateFormat, locale: &dyn LocaleProvider) -> FormatSpec {
    format.pattern().map_or_else(
        || parse_date_pattern(locale.short_date_pattern()),
        |pattern| resolve_runs(pattern, DATE_MARKERS),
    )
}

/// Resolves a time selector, consulting the locale only for `TimeFormat::Default`.
pub fn resolve_time_format(format: TimeFormat, locale: &dyn LocaleProvider) -> FormatSpec {
    format.pattern().map_or_else(
        || parse_time_pattern(locale.short_time_pattern()),
        |pattern| resolve_runs(pattern, TIME_MARKERS),
    )
}
