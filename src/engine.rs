//! Selection synchronization shared by the date, time and date-time pickers.
//!
//! Every picker keeps one composite value and a column per displayed slot. The
//! [`ColumnEngine`] owns the columns and works purely on [`DateTime`]s; the
//! [`Synchronizer`] adds the typed value, the remembered previous value, the
//! Idle/Recomputing guard and change notification.

use std::{fmt, sync::Arc};

use tracing::{debug, trace};

use crate::{
    bounds::{Bounds, clamp_date, clamp_date_time, clamp_selected_time},
    column::Column,
    config::Intervals,
    consts::{HOURS_PER_HALF_DAY, JANUARY, MAX_MONTH},
    format::{FormatSpec, HourCycle, Slot, SlotFormat},
    generate::{self, PM_KEY},
    locale::LocaleProvider,
    value::{Date, DateTime, Time, days_in_month},
};

/// Locale handle shared between a host and its pickers.
pub type SharedLocale = Arc<dyn LocaleProvider + Send + Sync>;

/// Placeholder date carried by time-only values while they pass through the engine.
const TIME_ANCHOR: Date = Date::from_parts(2000, 1, 1);

const ALL_SLOTS: [Slot; 7] = [
    Slot::Year,
    Slot::Month,
    Slot::Day,
    Slot::Hour,
    Slot::Minute,
    Slot::Second,
    Slot::Meridiem,
];

/// Columns to regenerate when a component's value changes.
const fn dependents(slot: Slot) -> &'static [Slot] {
    match slot {
        Slot::Year => &[
            Slot::Month,
            Slot::Day,
            Slot::Hour,
            Slot::Minute,
            Slot::Second,
            Slot::Meridiem,
        ],
        Slot::Month => &[Slot::Day, Slot::Hour, Slot::Minute, Slot::Second, Slot::Meridiem],
        Slot::Day => &[Slot::Hour, Slot::Minute, Slot::Second, Slot::Meridiem],
        Slot::Meridiem => &[Slot::Hour, Slot::Minute, Slot::Second],
        Slot::Hour => &[Slot::Minute, Slot::Second, Slot::Meridiem],
        Slot::Minute => &[Slot::Second],
        Slot::Second => &[],
    }
}

/// Numeric value of `slot` in `moment`, as stored in column keys.
fn component(slot: Slot, moment: DateTime) -> u16 {
    let (date, time) = (moment.date(), moment.time());
    match slot {
        Slot::Year => date.year(),
        Slot::Month => u16::from(date.month()),
        Slot::Day => u16::from(date.day()),
        Slot::Hour => u16::from(time.hour()),
        Slot::Minute => u16::from(time.minute()),
        Slot::Second => u16::from(time.second()),
        Slot::Meridiem => u16::from(time.is_pm()),
    }
}

/// Whether a synchronization pass is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncState {
    #[default]
    Idle,
    Recomputing,
}

/// Emitted once per committed change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueChanged<T> {
    pub old: T,
    pub new: T,
}

/// Columns of one picker, generated and resynced from date-times.
pub(crate) struct ColumnEngine {
    spec:      FormatSpec,
    intervals: Intervals,
    bounds:    Bounds<DateTime>,
    locale:    SharedLocale,
    columns:   Vec<Column>,
}

impl ColumnEngine {
    pub(crate) fn new(
        spec: FormatSpec,
        intervals: Intervals,
        bounds: Bounds<DateTime>,
        locale: SharedLocale,
    ) -> Self {
        Self {
            spec,
            intervals,
            bounds,
            locale,
            columns: Vec::new(),
        }
    }

    pub(crate) fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub(crate) const fn spec(&self) -> &FormatSpec {
        &self.spec
    }

    pub(crate) const fn intervals(&self) -> Intervals {
        self.intervals
    }

    pub(crate) fn locale(&self) -> &dyn LocaleProvider {
        self.locale.as_ref()
    }

    pub(crate) fn set_spec(&mut self, spec: FormatSpec) {
        self.spec = spec;
    }

    pub(crate) fn set_intervals(&mut self, intervals: Intervals) {
        self.intervals = intervals;
    }

    pub(crate) fn set_bounds(&mut self, bounds: Bounds<DateTime>) {
        self.bounds = bounds;
    }

    pub(crate) fn set_locale(&mut self, locale: SharedLocale) {
        self.locale = locale;
    }

    fn generate(&self, format: SlotFormat, context: DateTime) -> Column {
        let (min, max) = self.bounds.pair();
        let iv = self.intervals;
        let (date, time) = (context.date(), context.time());
        let token = format.token;
        let column = match format.slot {
            Slot::Year => generate::years(token, min.date(), max.date(), iv.year),
            Slot::Month => generate::months(
                token,
                date.year(),
                min.date(),
                max.date(),
                iv.month,
                self.locale(),
            ),
            Slot::Day => {
                generate::days(token, date.month(), date.year(), min.date(), max.date(), iv.day)
            },
            Slot::Hour => {
                let cycle = self.spec.hour_cycle().unwrap_or(HourCycle::H24);
                generate::hours(token, cycle, iv.hour, context, min, max)
            },
            Slot::Minute => generate::minutes(token, iv.minute, time.hour(), context, min, max),
            Slot::Second => generate::seconds(
                token,
                iv.second,
                time.hour(),
                time.minute(),
                context,
                min,
                max,
            ),
            Slot::Meridiem => generate::meridiem(token, min, max, context, self.locale()),
        };
        trace!(slot = %format.slot, len = column.len(), "generated column");
        column
    }

    /// Discards every column and generates them again around `context`.
    pub(crate) fn rebuild(&mut self, context: DateTime) {
        self.columns = self
            .spec
            .slots()
            .iter()
            .map(|&format| self.generate(format, context))
            .collect();
        debug!(columns = self.columns.len(), %context, "rebuilt picker columns");
        self.resync(context);
    }

    /// Points every column at the entry for `value`.
    pub(crate) fn resync(&mut self, value: DateTime) {
        for (format, column) in self.spec.slots().iter().zip(self.columns.iter_mut()) {
            column.select_key(component(format.slot, value));
        }
    }

    pub(crate) fn clear_selections(&mut self) {
        self.columns.iter_mut().for_each(Column::clear_selection);
    }

    /// Regenerates the columns depending on a component that differs between
    /// `old` and `new`, then resyncs all columns to `new`.
    pub(crate) fn refresh(&mut self, old: DateTime, new: DateTime) {
        let mut stale: Vec<Slot> = Vec::new();
        for slot in ALL_SLOTS {
            if component(slot, old) != component(slot, new) {
                for dependent in dependents(slot) {
                    if !stale.contains(dependent) {
                        stale.push(*dependent);
                    }
                }
            }
        }

        let regenerated: Vec<(usize, Column)> = self
            .spec
            .slots()
            .iter()
            .enumerate()
            .filter(|(_, format)| stale.contains(&format.slot))
            .map(|(i, &format)| (i, self.generate(format, new)))
            .collect();
        for (i, column) in regenerated {
            if let Some(existing) = self.columns.get_mut(i) {
                *existing = column;
            }
        }
        self.resync(new);
    }

    fn selected(&self, slot: Slot) -> Option<u16> {
        self.spec
            .position(slot)
            .and_then(|i| self.columns.get(i))
            .and_then(Column::selected_key)
    }

    fn selected_u8(&self, slot: Slot) -> Option<u8> {
        self.selected(slot).and_then(|k| u8::try_from(k).ok())
    }

    /// Assembles a value from the column selections; missing slots come from `fallback`.
    fn compose(&self, fallback: DateTime, changed: Slot) -> DateTime {
        let (date, time) = (fallback.date(), fallback.time());

        let year = self.selected(Slot::Year).unwrap_or(date.year());
        let month = self.selected_u8(Slot::Month).unwrap_or(date.month());
        let mut day = self.selected_u8(Slot::Day).unwrap_or(date.day());
        // The last day of a month stays the last day when the month changes.
        if matches!(changed, Slot::Year | Slot::Month) && date.is_last_day_of_month() {
            day = days_in_month(year, month.clamp(JANUARY, MAX_MONTH));
        }
        let date = Date::fitted(year, month, day);

        let mut hour = self.selected_u8(Slot::Hour).unwrap_or(time.hour());
        if let Some(half) = self.selected(Slot::Meridiem) {
            let offset = if half == PM_KEY { HOURS_PER_HALF_DAY } else { 0 };
            hour = hour % HOURS_PER_HALF_DAY + offset;
        }
        let minute = self.selected_u8(Slot::Minute).unwrap_or(time.minute());
        let second = self.selected_u8(Slot::Second).unwrap_or(time.second());

        date.at(Time::from_parts(hour, minute, second))
    }

    /// Applies a user selection in the column at `position`; returns the new composite
    /// value, or `None` when the selection was cleared or `position` is unknown.
    pub(crate) fn select(
        &mut self,
        position: usize,
        requested: isize,
        current: DateTime,
    ) -> Option<DateTime> {
        let slot = self.spec.slots().get(position)?.slot;
        let applied = self.columns.get_mut(position)?.set_selected_index(requested);
        if applied.is_none() {
            self.resync(current);
            return None;
        }

        let composed = self.compose(current, slot);
        let new = self.bounds.clamp(composed);
        trace!(%slot, %composed, %new, "composed selection");
        self.refresh(current, new);
        Some(new)
    }
}

/// A picker value that can pass through the date-time based engine.
pub(crate) trait PickerValue: Copy + Ord + fmt::Debug + fmt::Display {
    /// How the picker stores its value (`Option<Self>`, or `Self` when never absent).
    type Stored: Copy + PartialEq + fmt::Debug;

    fn moment(self) -> DateTime;

    fn from_moment(moment: DateTime) -> Self;

    /// Clamps an assigned value into `bounds`.
    fn normalize(value: Option<Self>, bounds: &Bounds<Self>) -> Self::Stored;

    fn present(stored: Self::Stored) -> Option<Self>;

    fn store(value: Self) -> Self::Stored;
}

impl PickerValue for Date {
    type Stored = Option<Self>;

    fn moment(self) -> DateTime {
        self.at(Time::MIDNIGHT)
    }

    fn from_moment(moment: DateTime) -> Self {
        moment.date()
    }

    fn normalize(value: Option<Self>, bounds: &Bounds<Self>) -> Self::Stored {
        clamp_date(value, bounds.minimum(), bounds.maximum())
    }

    fn present(stored: Self::Stored) -> Option<Self> {
        stored
    }

    fn store(value: Self) -> Self::Stored {
        Some(value)
    }
}

impl PickerValue for Time {
    type Stored = Option<Self>;

    fn moment(self) -> DateTime {
        TIME_ANCHOR.at(self)
    }

    fn from_moment(moment: DateTime) -> Self {
        moment.time()
    }

    fn normalize(value: Option<Self>, bounds: &Bounds<Self>) -> Self::Stored {
        value.map(|v| clamp_selected_time(v, bounds.minimum(), bounds.maximum()))
    }

    fn present(stored: Self::Stored) -> Option<Self> {
        stored
    }

    fn store(value: Self) -> Self::Stored {
        Some(value)
    }
}

impl PickerValue for DateTime {
    type Stored = Self;

    fn moment(self) -> DateTime {
        self
    }

    fn from_moment(moment: DateTime) -> Self {
        moment
    }

    fn normalize(value: Option<Self>, bounds: &Bounds<Self>) -> Self::Stored {
        clamp_date_time(value, bounds.minimum(), bounds.maximum())
    }

    fn present(stored: Self::Stored) -> Option<Self> {
        Some(stored)
    }

    fn store(value: Self) -> Self::Stored {
        value
    }
}

type Listener<S> = Box<dyn FnMut(&ValueChanged<S>) + Send>;

/// Live state of one picker: composite value, columns and listeners.
pub(crate) struct Synchronizer<V: PickerValue> {
    engine:    ColumnEngine,
    bounds:    Bounds<V>,
    value:     V::Stored,
    previous:  V,
    state:     SyncState,
    listeners: Vec<Listener<V::Stored>>,
}

fn moment_bounds<V: PickerValue>(bounds: &Bounds<V>) -> Bounds<DateTime> {
    Bounds::new(bounds.minimum().moment(), bounds.maximum().moment())
}

impl<V: PickerValue> Synchronizer<V> {
    pub(crate) fn new(
        spec: FormatSpec,
        intervals: Intervals,
        bounds: Bounds<V>,
        value: Option<V>,
        locale: SharedLocale,
    ) -> Self {
        let engine = ColumnEngine::new(spec, intervals, moment_bounds(&bounds), locale);
        let value = V::normalize(value, &bounds);
        let previous = V::present(value).unwrap_or_else(|| bounds.minimum());
        let mut sync = Self {
            engine,
            bounds,
            value,
            previous,
            state: SyncState::Idle,
            listeners: Vec::new(),
        };
        sync.rebuild();
        sync
    }

    pub(crate) const fn value(&self) -> V::Stored {
        self.value
    }

    pub(crate) const fn bounds(&self) -> &Bounds<V> {
        &self.bounds
    }

    pub(crate) const fn state(&self) -> SyncState {
        self.state
    }

    pub(crate) const fn engine(&self) -> &ColumnEngine {
        &self.engine
    }

    pub(crate) fn on_value_changed<F>(&mut self, listener: F)
    where
        F: FnMut(&ValueChanged<V::Stored>) + Send + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// The value columns are placed around: the current value, else the previous one.
    fn context(&self) -> DateTime {
        let value = V::present(self.value).unwrap_or(self.previous);
        self.bounds.clamp(value).moment()
    }

    fn rebuild(&mut self) {
        let context = self.context();
        self.engine.rebuild(context);
        if V::present(self.value).is_none() {
            self.engine.clear_selections();
        }
    }

    fn begin(&mut self) -> bool {
        if self.state == SyncState::Recomputing {
            trace!("ignoring trigger during synchronization pass");
            return false;
        }
        self.state = SyncState::Recomputing;
        true
    }

    fn finish(
        &mut self,
        change: Option<ValueChanged<V::Stored>>,
    ) -> Option<ValueChanged<V::Stored>> {
        self.state = SyncState::Idle;
        if let Some(change) = &change {
            debug!(old = ?change.old, new = ?change.new, "picker value changed");
            for listener in &mut self.listeners {
                listener(change);
            }
        }
        change
    }

    /// Stores `stored`, returning the change when it differs from the current value.
    fn commit(&mut self, stored: V::Stored) -> Option<ValueChanged<V::Stored>> {
        if let Some(present) = V::present(stored) {
            self.previous = present;
        }
        if stored == self.value {
            return None;
        }
        let old = std::mem::replace(&mut self.value, stored);
        Some(ValueChanged { old, new: stored })
    }

    /// A user moved the column at `position` to `index`.
    pub(crate) fn select(&mut self, position: usize, index: isize) -> Option<ValueChanged<V::Stored>> {
        if !self.begin() {
            return None;
        }
        let current = self.context();
        let change = self
            .engine
            .select(position, index, current)
            .and_then(|moment| self.commit(V::store(V::from_moment(moment))));
        self.finish(change)
    }

    /// Host assigned a value.
    pub(crate) fn set_value(&mut self, value: Option<V>) -> Option<ValueChanged<V::Stored>> {
        if !self.begin() {
            return None;
        }
        let old_context = self.context();
        let change = self.commit(V::normalize(value, &self.bounds));
        let new_context = self.context();
        self.engine.refresh(old_context, new_context);
        if V::present(self.value).is_none() {
            self.engine.clear_selections();
        }
        self.finish(change)
    }

    /// Bounds changed: renormalize the value and rebuild every column.
    pub(crate) fn set_bounds(&mut self, bounds: Bounds<V>) -> Option<ValueChanged<V::Stored>> {
        if !self.begin() {
            return None;
        }
        self.bounds = bounds;
        self.engine.set_bounds(moment_bounds(&bounds));
        let change = self.commit(V::normalize(V::present(self.value), &bounds));
        self.rebuild();
        self.finish(change)
    }

    pub(crate) fn set_spec(&mut self, spec: FormatSpec) {
        if self.begin() {
            self.engine.set_spec(spec);
            self.rebuild();
            self.finish(None);
        }
    }

    pub(crate) fn set_intervals(&mut self, intervals: Intervals) {
        if self.begin() {
            self.engine.set_intervals(intervals);
            self.rebuild();
            self.finish(None);
        }
    }

    pub(crate) fn set_locale(&mut self, locale: SharedLocale, spec: FormatSpec) {
        if self.begin() {
            self.engine.set_locale(locale);
            self.engine.set_spec(spec);
            self.rebuild();
            self.finish(None);
        }
    }
}

/// Accessors and column operations common to the typed pickers, which all keep
/// their state in a `sync: Synchronizer<$value>` field.
macro_rules! picker_common {
    ($value:ty, $stored:ty) => {
        /// Columns in display order.
        pub fn columns(&self) -> &[$crate::column::Column] {
            self.sync.engine().columns()
        }

        /// The column showing `slot`, if displayed.
        pub fn column(&self, slot: $crate::format::Slot) -> Option<&$crate::column::Column> {
            self.format_spec()
                .position(slot)
                .and_then(|i| self.columns().get(i))
        }

        pub fn format_spec(&self) -> &$crate::format::FormatSpec {
            self.sync.engine().spec()
        }

        pub fn intervals(&self) -> $crate::config::Intervals {
            self.sync.engine().intervals()
        }

        pub fn minimum(&self) -> $value {
            self.sync.bounds().minimum()
        }

        pub fn maximum(&self) -> $value {
            self.sync.bounds().maximum()
        }

        pub fn state(&self) -> $crate::engine::SyncState {
            self.sync.state()
        }

        /// Moves the column at `position` to `index` (clamped; negative clears it)
        /// and recomposes the value.
        pub fn select(
            &mut self,
            position: usize,
            index: isize,
        ) -> Option<$crate::engine::ValueChanged<$stored>> {
            self.sync.select(position, index)
        }

        /// Like [`Self::select`], addressing the column by slot.
        pub fn select_slot(
            &mut self,
            slot: $crate::format::Slot,
            index: isize,
        ) -> Option<$crate::engine::ValueChanged<$stored>> {
            let position = self.format_spec().position(slot)?;
            self.sync.select(position, index)
        }

        /// Replaces the bounds; a maximum below `minimum` collapses onto it.
        pub fn set_bounds(
            &mut self,
            minimum: $value,
            maximum: $value,
        ) -> Option<$crate::engine::ValueChanged<$stored>> {
            self.sync.set_bounds($crate::bounds::Bounds::new(minimum, maximum))
        }

        pub fn set_minimum(
            &mut self,
            minimum: $value,
        ) -> Option<$crate::engine::ValueChanged<$stored>> {
            let bounds = self.sync.bounds().with_minimum(minimum);
            self.sync.set_bounds(bounds)
        }

        pub fn set_maximum(
            &mut self,
            maximum: $value,
        ) -> Option<$crate::engine::ValueChanged<$stored>> {
            let bounds = self.sync.bounds().with_maximum(maximum);
            self.sync.set_bounds(bounds)
        }

        pub fn set_intervals(&mut self, intervals: $crate::config::Intervals) {
            self.sync.set_intervals(intervals);
        }

        /// Registers a listener called once per committed value change.
        pub fn on_value_changed<F>(&mut self, listener: F)
        where
            F: FnMut(&$crate::engine::ValueChanged<$stored>)
                + Send
                + 'static,
        {
            self.sync.on_value_changed(listener);
        }
    };
}

pub(crate) use picker_common;
