use crate::{
    bounds::Bounds,
    config::DateTimePickerConfig,
    engine::{SharedLocale, Synchronizer, ValueChanged, picker_common},
    format::{DateFormat, FormatSpec, TimeFormat, resolve_date_format, resolve_time_format},
    locale::LocaleProvider,
    value::DateTime,
};

fn combined_spec(date: DateFormat, time: TimeFormat, locale: &dyn LocaleProvider) -> FormatSpec {
    FormatSpec::concat(
        &resolve_date_format(date, locale),
        &resolve_time_format(time, locale),
    )
}

/// Date columns followed by time columns, synchronized with a date-time that is
/// never absent.
pub struct DateTimePicker {
    sync:        Synchronizer<DateTime>,
    date_format: DateFormat,
    time_format: TimeFormat,
}

impl DateTimePicker {
    pub fn new(config: DateTimePickerConfig, locale: SharedLocale) -> Self {
        let spec = combined_spec(config.date_format, config.time_format, locale.as_ref());
        let bounds = Bounds::new(config.minimum, config.maximum);
        Self {
            sync:        Synchronizer::new(spec, config.intervals, bounds, config.value, locale),
            date_format: config.date_format,
            time_format: config.time_format,
        }
    }

    picker_common!(DateTime, DateTime);

    pub fn value(&self) -> DateTime {
        self.sync.value()
    }

    pub const fn date_format(&self) -> DateFormat {
        self.date_format
    }

    pub const fn time_format(&self) -> TimeFormat {
        self.time_format
    }

    /// Assigns a date-time; `None` resets the value to the minimum.
    pub fn set_value(&mut self, value: Option<DateTime>) -> Option<ValueChanged<DateTime>> {
        self.sync.set_value(value)
    }

    pub fn set_format(&mut self, date_format: DateFormat, time_format: TimeFormat) {
        self.date_format = date_format;
        self.time_format = time_format;
        let spec = combined_spec(date_format, time_format, self.sync.engine().locale());
        self.sync.set_spec(spec);
    }

    pub fn set_locale(&mut self, locale: SharedLocale) {
        let spec = combined_spec(self.date_format, self.time_format, locale.as_ref());
        self.sync.set_locale(locale, spec);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;
    use crate::{
        format::Slot,
        test_utils::{date_time, en_us},
    };

    fn picker(min: DateTime, max: DateTime, value: Option<DateTime>) -> DateTimePicker {
        let config = DateTimePickerConfig {
            date_format: DateFormat::DdMmYyyy,
            time_format: TimeFormat::HhMm24,
            minimum: min,
            maximum: max,
            value,
            ..DateTimePickerConfig::default()
        };
        DateTimePicker::new(config, en_us())
    }

    #[test]
    fn test_absent_value_becomes_minimum() {
        let picker = DateTimePicker::new(DateTimePickerConfig::default(), en_us());
        assert_eq!(picker.value(), date_time(1900, 1, 1, 0, 0, 0));
        let slots: Vec<Slot> = picker.format_spec().slots().iter().map(|s| s.slot).collect();
        assert_eq!(slots, vec![
            Slot::Month,
            Slot::Day,
            Slot::Year,
            Slot::Hour,
            Slot::Minute,
            Slot::Meridiem
        ]);
        assert!(picker.columns().iter().all(|c| c.selected_index().is_some()));
    }

    #[test]
    fn test_assigning_none_resets_to_minimum() {
        let min = date_time(2024, 5, 5, 8, 30, 0);
        let mut picker = picker(min, date_time(2024, 5, 7, 17, 0, 0), Some(date_time(2024, 5, 6, 12, 0, 0)));
        let change = picker.set_value(None);
        assert_eq!(change.map(|c| c.new), Some(min));
        assert_eq!(picker.set_value(None), None);
    }

    #[test]
    fn test_hours_follow_boundary_dates() {
        let mut picker = picker(
            date_time(2024, 5, 5, 8, 30, 0),
            date_time(2024, 5, 7, 17, 0, 0),
            Some(date_time(2024, 5, 5, 9, 0, 0)),
        );
        let hour_count = |picker: &DateTimePicker| picker.column(Slot::Hour).map(|c| c.len());
        assert_eq!(picker.column(Slot::Day).map(|c| c.len()), Some(3));
        assert_eq!(hour_count(&picker), Some(16));

        let change = picker.select_slot(Slot::Day, 1);
        assert_eq!(change.map(|c| c.new), Some(date_time(2024, 5, 6, 9, 0, 0)));
        assert_eq!(hour_count(&picker), Some(24));

        picker.select_slot(Slot::Day, 2);
        assert_eq!(hour_count(&picker), Some(18));
        assert_eq!(
            picker.column(Slot::Hour).and_then(|c| c.selected_item()),
            Some("09")
        );
    }

    #[test]
    fn test_time_selection_clamps_on_minimum_date() {
        let mut picker = picker(
            date_time(2024, 5, 5, 8, 30, 0),
            date_time(2024, 5, 7, 17, 0, 0),
            Some(date_time(2024, 5, 5, 9, 0, 0)),
        );
        let change = picker.select_slot(Slot::Hour, 0);
        assert_eq!(change.map(|c| c.new), Some(date_time(2024, 5, 5, 8, 30, 0)));
        assert_eq!(picker.column(Slot::Minute).map(|c| c.len()), Some(30));

        // leaving the boundary date frees the minutes again
        picker.select_slot(Slot::Day, 1);
        assert_eq!(picker.value(), date_time(2024, 5, 6, 8, 30, 0));
        assert_eq!(picker.column(Slot::Minute).map(|c| c.len()), Some(60));
    }

    #[test]
    fn test_repeated_configuration_change_is_idempotent() {
        let mut picker = picker(
            date_time(2000, 1, 1, 0, 0, 0),
            date_time(2030, 12, 31, 23, 59, 59),
            Some(date_time(2024, 3, 31, 9, 45, 0)),
        );
        let snapshot = |picker: &DateTimePicker| {
            let columns = picker.columns().to_vec();
            let indices: Vec<Option<usize>> = columns.iter().map(|c| c.selected_index()).collect();
            (columns, indices, picker.value())
        };

        let min = date_time(2024, 3, 31, 8, 30, 0);
        let max = date_time(2024, 4, 2, 17, 0, 0);
        let first_change = picker.set_bounds(min, max);
        let first = snapshot(&picker);
        assert_eq!(picker.set_bounds(min, max), None);
        assert_eq!(snapshot(&picker), first);
        assert_eq!(first_change, None);

        picker.set_format(DateFormat::MmmDdYyyy, TimeFormat::HhMmSsTt);
        let first = snapshot(&picker);
        picker.set_format(DateFormat::MmmDdYyyy, TimeFormat::HhMmSsTt);
        assert_eq!(snapshot(&picker), first);
        assert_eq!(first.2, date_time(2024, 3, 31, 9, 45, 0));
        assert_eq!(picker.column(Slot::Hour).map(|c| c.len()), Some(4));
    }

    #[test]
    fn test_format_change_rebuilds_silently() {
        let mut picker = picker(
            date_time(2000, 1, 1, 0, 0, 0),
            date_time(2030, 12, 31, 23, 59, 59),
            Some(date_time(2024, 1, 31, 18, 45, 0)),
        );
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        picker.on_value_changed(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        picker.set_format(DateFormat::YyyyMmmDd, TimeFormat::HhMmTt);
        assert_eq!((picker.date_format(), picker.time_format()), (DateFormat::YyyyMmmDd, TimeFormat::HhMmTt));
        let selected: Vec<Option<&str>> = picker.columns().iter().map(|c| c.selected_item()).collect();
        assert_eq!(selected, vec![
            Some("2024"),
            Some("Jan"),
            Some("31"),
            Some("06"),
            Some("45"),
            Some("PM")
        ]);
        assert_eq!(count.load(Ordering::SeqCst), 0);

        // month change keeps the last day and the time
        picker.select_slot(Slot::Month, 1);
        assert_eq!(picker.value(), date_time(2024, 2, 29, 18, 45, 0));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
