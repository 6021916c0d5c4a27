//! Selection navigation shared by lists and tables.
//!
//! Both `ListState` and `TableState` keep an optional selected index; the
//! [`SelectionNav`] extension gives them the same move/page/wrap behaviour.

use ratatui::widgets::{ListState, TableState};

/// Default page size for page up/down navigation.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Anything with an optional selected row.
pub trait Selectable {
    fn selected_index(&self) -> Option<usize>;
    fn select_index(&mut self, index: Option<usize>);
}

impl Selectable for ListState {
    fn selected_index(&self) -> Option<usize> {
        self.selected()
    }

    fn select_index(&mut self, index: Option<usize>) {
        self.select(index);
    }
}

impl Selectable for TableState {
    fn selected_index(&self) -> Option<usize> {
        self.selected()
    }

    fn select_index(&mut self, index: Option<usize>) {
        self.select(index);
    }
}

/// Navigation helpers for any [`Selectable`].
pub trait SelectionNav {
    /// Move selection up, stopping at the first item.
    fn move_up_by(&mut self, count: usize, total_items: usize);

    /// Move selection down, stopping at the last item.
    fn move_down_by(&mut self, count: usize, total_items: usize);

    fn select_first_item(&mut self, total_items: usize);

    fn select_last_item(&mut self, total_items: usize);

    /// Moving up from the first item goes to the last.
    fn select_previous_wrap(&mut self, total_items: usize);

    /// Moving down from the last item goes to the first.
    fn select_next_wrap(&mut self, total_items: usize);

    /// Keep the selection valid after the item count changed.
    /// Selects the first item when nothing is selected, clears it when empty.
    fn clamp_selection(&mut self, total_items: usize);
}

impl<T: Selectable> SelectionNav for T {
    fn move_up_by(&mut self, count: usize, total_items: usize) {
        if total_items == 0 {
            return;
        }
        let current = self.selected_index().unwrap_or(0);
        self.select_index(Some(current.saturating_sub(count)));
    }

    fn move_down_by(&mut self, count: usize, total_items: usize) {
        if total_items == 0 {
            return;
        }
        let current = self.selected_index().unwrap_or(0);
        self.select_index(Some((current + count).min(total_items - 1)));
    }

    fn select_first_item(&mut self, total_items: usize) {
        if total_items > 0 {
            self.select_index(Some(0));
        }
    }

    fn select_last_item(&mut self, total_items: usize) {
        if total_items > 0 {
            self.select_index(Some(total_items - 1));
        }
    }

    fn select_previous_wrap(&mut self, total_items: usize) {
        if total_items == 0 {
            return;
        }
        let current = self.selected_index().unwrap_or(0);
        let new_index = if current == 0 {
            total_items - 1
        } else {
            current - 1
        };
        self.select_index(Some(new_index));
    }

    fn select_next_wrap(&mut self, total_items: usize) {
        if total_items == 0 {
            return;
        }
        let current = self.selected_index().unwrap_or(0);
        let new_index = if current >= total_items - 1 {
            0
        } else {
            current + 1
        };
        self.select_index(Some(new_index));
    }

    fn clamp_selection(&mut self, total_items: usize) {
        if total_items == 0 {
            self.select_index(None);
            return;
        }
        let current = self.selected_index().unwrap_or(0);
        self.select_index(Some(current.min(total_items - 1)));
    }
}
