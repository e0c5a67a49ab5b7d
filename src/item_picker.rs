use tracing::debug;

use crate::column::{Column, index_of_item};

/// Emitted when the selected index of an [`ItemPicker`] changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionChanged {
    pub old_index: Option<usize>,
    pub new_index: Option<usize>,
}

type Listener = Box<dyn FnMut(&SelectionChanged) + Send>;

/// A single column of host-supplied strings.
#[derive(Default)]
pub struct ItemPicker {
    column:    Column,
    listeners: Vec<Listener>,
}

impl ItemPicker {
    /// Creates a picker over `items` with `selected` clamped into range (negative
    /// selects nothing).
    pub fn new<I, S>(items: I, selected: isize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut column = Column::from_items(items);
        column.set_selected_index(selected);
        Self {
            column,
            listeners: Vec::new(),
        }
    }

    pub const fn column(&self) -> &Column {
        &self.column
    }

    pub fn items(&self) -> &[String] {
        self.column.items()
    }

    pub const fn selected_index(&self) -> Option<usize> {
        self.column.selected_index()
    }

    pub fn selected_item(&self) -> Option<&str> {
        self.column.selected_item()
    }

    pub fn on_selection_changed<F>(&mut self, listener: F)
    where
        F: FnMut(&SelectionChanged) + Send + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    fn apply(&mut self, old_index: Option<usize>) -> Option<SelectionChanged> {
        let new_index = self.column.selected_index();
        if new_index == old_index {
            return None;
        }
        let change = SelectionChanged {
            old_index,
            new_index,
        };
        debug!(?old_index, ?new_index, "item selection changed");
        for listener in &mut self.listeners {
            listener(&change);
        }
        Some(change)
    }

    /// Selects `index` clamped into the items; negative clears the selection.
    pub fn select(&mut self, index: isize) -> Option<SelectionChanged> {
        let old = self.column.selected_index();
        self.column.set_selected_index(index);
        self.apply(old)
    }

    /// Selects the first item equal to `text`, or nothing when no item matches.
    pub fn select_item(&mut self, text: &str) -> Option<SelectionChanged> {
        let old = self.column.selected_index();
        let index = index_of_item(&self.column, text)
            .and_then(|i| isize::try_from(i).ok())
            .unwrap_or(-1);
        self.column.set_selected_index(index);
        self.apply(old)
    }

    /// Replaces the items, keeping the selected index clamped into the new list.
    pub fn set_items<I, S>(&mut self, items: I) -> Option<SelectionChanged>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let old = self.column.selected_index();
        let position = self.column.selected_position();
        self.column = Column::from_items(items);
        self.column.set_selected_index(position);
        self.apply(old)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[test]
    fn test_new_clamps_selection() {
        struct TestCase {
            items:    Vec<&'static str>,
            selected: isize,
            expected: Option<&'static str>,
        }

        let cases = [
            TestCase {
                items:    vec!["a", "b", "c"],
                selected: 1,
                expected: Some("b"),
            },
            TestCase {
                items:    vec!["a", "b", "c"],
                selected: 9,
                expected: Some("c"),
            },
            TestCase {
                items:    vec!["a", "b", "c"],
                selected: -1,
                expected: None,
            },
            TestCase {
                items:    vec![],
                selected: 0,
                expected: None,
            },
        ];

        for case in &cases {
            let picker = ItemPicker::new(case.items.clone(), case.selected);
            assert_eq!(
                picker.selected_item(),
                case.expected,
                "{:?} @ {}",
                case.items,
                case.selected
            );
        }
    }

    #[test]
    fn test_select_notifies_once_per_change() {
        let mut picker = ItemPicker::new(["red", "green", "blue"], -1);
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        picker.on_selection_changed(move |change| sink.lock().unwrap().push(*change));

        assert_eq!(
            picker.select(2),
            Some(SelectionChanged {
                old_index: None,
                new_index: Some(2),
            })
        );
        assert_eq!(picker.select(5), None);
        assert_eq!(picker.select_item("red").map(|c| c.new_index), Some(Some(0)));
        assert_eq!(picker.select_item("purple").map(|c| c.new_index), Some(None));

        assert_eq!(log.lock().unwrap().len(), 3);
    }

    #[test]
    fn test_set_items_keeps_clamped_index() {
        let mut picker = ItemPicker::new(["a", "b", "c", "d"], 3);
        let change = picker.set_items(["x", "y"]);
        assert_eq!(
            change,
            Some(SelectionChanged {
                old_index: Some(3),
                new_index: Some(1),
            })
        );
        assert_eq!(picker.selected_item(), Some("y"));

        assert_eq!(picker.set_items(["p", "q", "r"]), None);
        assert_eq!(picker.selected_item(), Some("q"));

        let change = picker.set_items(Vec::<String>::new());
        assert_eq!(change.map(|c| c.new_index), Some(None));
        assert!(picker.items().is_empty());
        assert_eq!(picker.column().selected_position(), -1);
    }
}
