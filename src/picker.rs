// 📋 Option-List Picker - pick one item from a static table
//
// Shows a list, marks the item currently stored in the record, and returns
// the chosen item on confirm. Optional case-insensitive search narrows the
// list (the App picker uses it).

use crate::catalog::PickerItem;

#[derive(Debug, Clone)]
pub struct ListPicker<T> {
    items: Vec<T>,
    searchable: bool,
    query: String,
    /// Indexes into `items` that match `query`, in display order
    matches: Vec<usize>,
    /// Position within `matches`
    cursor: usize,
    /// Id of the item stored in the record when the picker opened
    marked: Option<String>,
    open: bool,
}

impl<T: PickerItem + Clone> ListPicker<T> {
    pub fn new(items: Vec<T>) -> Self {
        let matches = (0..items.len()).collect();
        ListPicker {
            items,
            searchable: false,
            query: String::new(),
            matches,
            cursor: 0,
            marked: None,
            open: false,
        }
    }

    /// Enable the search filter
    pub fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    pub fn is_searchable(&self) -> bool {
        self.searchable
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Show the list with `selected` marked and highlighted
    pub fn open(&mut self, selected: Option<&T>) {
        self.query.clear();
        self.refilter();
        self.marked = selected.map(|item| item.id().to_string());
        self.cursor = selected
            .and_then(|sel| {
                self.matches
                    .iter()
                    .position(|&i| self.items[i].id() == sel.id())
            })
            .unwrap_or(0);
        self.open = true;
    }

    /// Items passing the current filter
    pub fn visible(&self) -> Vec<&T> {
        self.matches.iter().map(|&i| &self.items[i]).collect()
    }

    pub fn cursor(&self) -> Option<usize> {
        if self.matches.is_empty() {
            None
        } else {
            Some(self.cursor)
        }
    }

    pub fn highlighted(&self) -> Option<&T> {
        self.matches.get(self.cursor).map(|&i| &self.items[i])
    }

    /// Whether `item` is the one stored in the record
    pub fn is_marked(&self, item: &T) -> bool {
        self.marked.as_deref() == Some(item.id())
    }

    pub fn next(&mut self) {
        let len = self.matches.len();
        if len == 0 {
            return;
        }
        self.cursor = if self.cursor >= len - 1 { 0 } else { self.cursor + 1 };
    }

    pub fn previous(&mut self) {
        let len = self.matches.len();
        if len == 0 {
            return;
        }
        self.cursor = if self.cursor == 0 { len - 1 } else { self.cursor - 1 };
    }

    /// Move the cursor to visible row `index`; false when out of range
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.matches.len() {
            return false;
        }
        self.cursor = index;
        true
    }

    pub fn push_search(&mut self, c: char) {
        if !self.searchable || c.is_control() {
            return;
        }
        self.query.push(c);
        self.refilter();
    }

    pub fn pop_search(&mut self) {
        if !self.searchable {
            return;
        }
        if self.query.pop().is_some() {
            self.refilter();
        }
    }

    /// Close and return the highlighted item (nothing when the filter is empty)
    pub fn confirm(&mut self) -> Option<T> {
        if !self.open {
            return None;
        }
        let chosen = self.highlighted().cloned();
        if chosen.is_some() {
            self.open = false;
        }
        chosen
    }

    pub fn cancel(&mut self) {
        self.open = false;
    }

    fn refilter(&mut self) {
        let needle = self.query.to_lowercase();
        self.matches = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.label().to_lowercase().contains(&needle))
            .map(|(i, _)| i)
            .collect();
        self.cursor = 0;
    }
}
