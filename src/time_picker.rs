use crate::{
    bounds::Bounds,
    config::TimePickerConfig,
    engine::{SharedLocale, Synchronizer, ValueChanged, picker_common},
    format::{TimeFormat, resolve_time_format},
    value::Time,
};

/// Hour/minute/second/meridiem columns synchronized with an optional time of day.
pub struct TimePicker {
    sync:   Synchronizer<Time>,
    format: TimeFormat,
}

impl TimePicker {
    pub fn new(config: TimePickerConfig, locale: SharedLocale) -> Self {
        let spec = resolve_time_format(config.format, locale.as_ref());
        let bounds = Bounds::new(config.minimum, config.maximum);
        Self {
            sync:   Synchronizer::new(spec, config.intervals, bounds, config.value, locale),
            format: config.format,
        }
    }

    picker_common!(Time, Option<Time>);

    pub fn value(&self) -> Option<Time> {
        self.sync.value()
    }

    pub const fn format(&self) -> TimeFormat {
        self.format
    }

    /// Assigns a time. Out-of-range hours and minutes are clamped while the
    /// seconds are kept where the bounds allow.
    pub fn set_value(&mut self, value: Option<Time>) -> Option<ValueChanged<Option<Time>>> {
        self.sync.set_value(value)
    }

    pub fn set_format(&mut self, format: TimeFormat) {
        self.format = format;
        let spec = resolve_time_format(format, self.sync.engine().locale());
        self.sync.set_spec(spec);
    }

    pub fn set_locale(&mut self, locale: SharedLocale) {
        let spec = resolve_time_format(self.format, locale.as_ref());
        self.sync.set_locale(locale, spec);
    }
}
