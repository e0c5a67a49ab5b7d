//! Columns of selectable strings and the index lookups performed on them.

/// An ordered list of display strings with the current selection.
///
/// Each entry also carries the numeric value it was generated from (its key),
/// so lookups compare numbers instead of parsing display text. For item columns
/// the key is the entry's position.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Column {
    items:    Vec<String>,
    keys:     Vec<u16>,
    selected: Option<usize>,
}

impl Column {
    /// An item column whose keys are the item positions.
    pub fn from_items<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items: Vec<String> = items.into_iter().map(Into::into).collect();
        let keys = (0..items.len())
            .map(|i| u16::try_from(i).unwrap_or(u16::MAX))
            .collect();
        Self {
            items,
            keys,
            selected: None,
        }
    }

    /// A component column from `(key, label)` pairs in display order.
    pub(crate) fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (u16, String)>,
    {
        let (keys, items) = entries.into_iter().unzip();
        Self {
            items,
            keys,
            selected: None,
        }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn keys(&self) -> &[u16] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Selected index, `None` meaning nothing is selected.
    pub const fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Selected index with `-1` standing for "nothing selected".
    pub fn selected_position(&self) -> isize {
        self.selected
            .and_then(|i| isize::try_from(i).ok())
            .unwrap_or(-1)
    }

    /// `items[selected]`, or `None` when nothing is selected.
    pub fn selected_item(&self) -> Option<&str> {
        self.selected
            .and_then(|i| self.items.get(i))
            .map(String::as_str)
    }

    /// Numeric value behind the selected entry.
    pub fn selected_key(&self) -> Option<u16> {
        self.selected.and_then(|i| self.keys.get(i).copied())
    }

    /// Selects `requested` after clamping it into the column; returns the applied index.
    pub fn set_selected_index(&mut self, requested: isize) -> Option<usize> {
        self.selected = clamp_index(requested, self.len());
        self.selected
    }

    /// Selects the entry matching `target` (see [`index_for`]).
    pub(crate) fn select_key(&mut self, target: u16) -> Option<usize> {
        self.selected = index_for(self, target);
        self.selected
    }

    pub(crate) fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Whether the last entry is selected.
    pub fn is_last_selected(&self) -> bool {
        self.selected.is_some_and(|i| i + 1 == self.len())
    }
}

/// Index of the entry for `target`: the exact match, else the first entry above it,
/// else the last entry. `None` for an empty column.
pub fn index_for(column: &Column, target: u16) -> Option<usize> {
    let last = column.len().checked_sub(1)?;
    if let Some(exact) = column.keys.iter().position(|&k| k == target) {
        return Some(exact);
    }
    Some(
        column
            .keys
            .iter()
            .position(|&k| k >= target)
            .unwrap_or(last),
    )
}

/// Index of the item whose text is exactly `text`.
pub fn index_of_item(column: &Column, text: &str) -> Option<usize> {
    column.items.iter().position(|item| item == text)
}

/// Clamps a requested index into `0..item_count`; `None` stands for -1.
pub fn clamp_index(requested: isize, item_count: usize) -> Option<usize> {
    if item_count == 0 || requested < 0 {
        return None;
    }
    let requested = usize::try_from(requested).ok()?;
    Some(requested.min(item_count - 1))
}
