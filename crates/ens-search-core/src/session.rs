//! Interactive state around the dropdown: the current input, which row is
//! highlighted, and what happens when a row is chosen.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::debounce::Debouncer;
use crate::dropdown::DropdownBuilder;
use crate::history::HistoryStore;
use crate::i18n::{Catalog, Translator};
use crate::item::{HistoryItem, NameType, SearchItem};
use crate::validate::{EnsNameValidator, NameValidator};
use crate::Result;

/// Where the browser should go after a row was chosen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Navigation {
    pub text: String,
    pub name_type: NameType,
    pub route: String,
}

/// Record `item` in history and return its route. Error and placeholder rows
/// do nothing.
pub fn open_item(item: &SearchItem, store: &dyn HistoryStore) -> Result<Option<Navigation>> {
    let Some(name_type) = item.name_type() else {
        return Ok(None);
    };
    let text = item.text();
    if text.is_empty() {
        return Ok(None);
    }
    store.record(text, name_type, item.validity())?;
    Ok(Some(Navigation {
        text: text.to_string(),
        name_type,
        route: format!("/{text}"),
    }))
}

pub struct SearchSession<V = EnsNameValidator, T = Catalog> {
    builder: DropdownBuilder<V, T>,
    input: String,
    items: Vec<SearchItem>,
    selected: Option<usize>,
    debouncer: Debouncer,
    using_placeholder: bool,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchSession {
    pub fn new() -> Self {
        Self::with_builder(DropdownBuilder::new(), crate::debounce::DEFAULT_DEBOUNCE)
    }
}

impl<V: NameValidator, T: Translator> SearchSession<V, T> {
    pub fn with_builder(builder: DropdownBuilder<V, T>, debounce: Duration) -> Self {
        let items = builder.build("", &[]);
        Self {
            builder,
            input: String::new(),
            items,
            selected: None,
            debouncer: Debouncer::new(debounce),
            using_placeholder: false,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn items(&self) -> &[SearchItem] {
        &self.items
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&SearchItem> {
        self.selected.and_then(|i| self.items.get(i))
    }

    pub fn builder(&self) -> &DropdownBuilder<V, T> {
        &self.builder
    }

    /// New input text. Typing highlights the first row; clearing the box
    /// drops the highlight. Non-history rows count as placeholders until the
    /// input has been quiet for the debounce interval.
    pub fn set_input(&mut self, input: impl Into<String>, history: &[HistoryItem], now: Instant) {
        let input = input.into();
        let changed = input != self.input;
        self.input = input;
        self.items = self.builder.build(&self.input, history);
        if changed {
            self.selected = if self.input.is_empty() { None } else { Some(0) };
            self.using_placeholder = true;
            self.debouncer.trigger(now);
        }
        self.clamp_selection();
    }

    /// Rebuild with fresh history, keeping input and highlight.
    pub fn refresh(&mut self, history: &[HistoryItem]) {
        self.items = self.builder.build(&self.input, history);
        self.clamp_selection();
    }

    /// Advance time; returns true when the placeholder state just ended.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.debouncer.poll(now) {
            self.using_placeholder = false;
            return true;
        }
        false
    }

    pub fn using_placeholder(&self) -> bool {
        self.using_placeholder
    }

    /// Whether `item` should be drawn as provisional. History rows never are.
    pub fn is_provisional(&self, item: &SearchItem) -> bool {
        self.using_placeholder && !item.is_history()
    }

    pub fn move_down(&mut self) {
        let n = self.items.len();
        if n == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) => (i + 1) % n,
            None => 0,
        });
    }

    pub fn move_up(&mut self) {
        let n = self.items.len();
        if n == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) => (i + n - 1) % n,
            None => n - 1,
        });
    }

    pub fn hover(&mut self, index: usize) {
        if index < self.items.len() {
            self.selected = Some(index);
        }
    }

    pub fn mouse_leave(&mut self) {
        if self.input.is_empty() {
            self.selected = None;
        }
    }

    /// Dropdown dismissed.
    pub fn close(&mut self) {
        self.selected = None;
        self.debouncer.cancel();
        self.using_placeholder = false;
    }

    /// Choose the row at `index`.
    pub fn open(&self, index: usize, store: &dyn HistoryStore) -> Result<Option<Navigation>> {
        match self.items.get(index) {
            Some(item) => open_item(item, store),
            None => Ok(None),
        }
    }

    /// Choose the highlighted row, as on Enter.
    pub fn submit(&self, store: &dyn HistoryStore) -> Result<Option<Navigation>> {
        match self.selected {
            Some(i) => self.open(i, store),
            None => Ok(None),
        }
    }

    fn clamp_selection(&mut self) {
        if let Some(i) = self.selected {
            if self.items.is_empty() {
                self.selected = None;
            } else if i >= self.items.len() {
                self.selected = Some(self.items.len() - 1);
            }
        }
    }
}
