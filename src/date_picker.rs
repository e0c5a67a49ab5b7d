use crate::{
    bounds::Bounds,
    config::DatePickerConfig,
    engine::{SharedLocale, Synchronizer, ValueChanged, picker_common},
    format::{DateFormat, resolve_date_format},
    value::Date,
};

/// Day/month/year columns synchronized with an optional date.
pub struct DatePicker {
    sync:   Synchronizer<Date>,
    format: DateFormat,
}

impl DatePicker {
    pub fn new(config: DatePickerConfig, locale: SharedLocale) -> Self {
        let spec = resolve_date_format(config.format, locale.as_ref());
        let bounds = Bounds::new(config.minimum, config.maximum);
        Self {
            sync:   Synchronizer::new(spec, config.intervals, bounds, config.value, locale),
            format: config.format,
        }
    }

    picker_common!(Date, Option<Date>);

    /// The selected date; `None` until one is assigned or picked.
    pub fn value(&self) -> Option<Date> {
        self.sync.value()
    }

    pub const fn format(&self) -> DateFormat {
        self.format
    }

    /// Assigns a date, clamped into the bounds. `None` clears every column's selection.
    pub fn set_value(&mut self, value: Option<Date>) -> Option<ValueChanged<Option<Date>>> {
        self.sync.set_value(value)
    }

    pub fn set_format(&mut self, format: DateFormat) {
        self.format = format;
        let spec = resolve_date_format(format, self.sync.engine().locale());
        self.sync.set_spec(spec);
    }

    /// Switches locale; a `DateFormat::Default` layout is resolved again.
    pub fn set_locale(&mut self, locale: SharedLocale) {
        let spec = resolve_date_format(self.format, locale.as_ref());
        self.sync.set_locale(locale, spec);
    }
}
