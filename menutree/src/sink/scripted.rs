//! Headless sink driven by a script instead of user input.

use std::collections::HashSet;

use super::MenuSink;
use crate::path::{self, DEFAULT_SEPARATOR};

/// One call the walker made into a [`ScriptedSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkCall {
    BeginPopup { label: String, open: bool },
    EndPopup,
    BeginMenu { label: String, open: bool },
    EndMenu,
    MenuItem { label: String, activated: bool },
    OpenPopup { label: String },
}

/// A [`MenuSink`] that records every call and reports activations from a
/// script.
///
/// Items and menus are addressed by their full path (segments joined with the
/// sink's separator), so equally named leaves under different menus can be
/// told apart. Nested menus are open unless collapsed; popups are closed until
/// [`open_popup`](MenuSink::open_popup) or [`ScriptedSink::set_open`] opens them.
///
/// # Example
///
/// ```
/// use menutree::{MenuConfig, ScriptedSink, StatefulMenu, handler};
///
/// let menu = StatefulMenu::new(MenuConfig::inline());
/// menu.add("File/Quit", handler(|| println!("bye")));
///
/// let mut sink = ScriptedSink::new();
/// sink.activate("File/Quit");
/// let stats = menu.render(&mut sink).unwrap();
/// assert_eq!(stats.activated, 1);
/// ```
#[derive(Debug, Clone)]
pub struct ScriptedSink {
    separator: String,
    calls: Vec<SinkCall>,
    presented: Vec<String>,
    scope: Vec<String>,
    open_popups: HashSet<String>,
    collapsed: HashSet<String>,
    activations: HashSet<String>,
}

impl Default for ScriptedSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedSink {
    /// Create a sink using the default `/` separator.
    pub fn new() -> Self {
        Self::with_separator(DEFAULT_SEPARATOR)
    }

    /// Create a sink that joins scope labels with `separator`.
    pub fn with_separator(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
            calls: Vec::new(),
            presented: Vec::new(),
            scope: Vec::new(),
            open_popups: HashSet::new(),
            collapsed: HashSet::new(),
            activations: HashSet::new(),
        }
    }

    /// Report the item at `path` as activated the next time it is presented.
    pub fn activate(&mut self, path: impl Into<String>) {
        self.activations.insert(path.into());
    }

    /// Refuse to open the nested menu at `path`.
    pub fn collapse(&mut self, path: impl Into<String>) {
        self.collapsed.insert(path.into());
    }

    /// Allow the nested menu at `path` to open again.
    pub fn expand(&mut self, path: &str) {
        self.collapsed.remove(path);
    }

    /// Mark the popup `label` open or closed.
    pub fn set_open(&mut self, label: impl Into<String>, open: bool) {
        let label = label.into();
        if open {
            self.open_popups.insert(label);
        } else {
            self.open_popups.remove(&label);
        }
    }

    /// Whether the popup `label` is currently open.
    pub fn is_open(&self, label: &str) -> bool {
        self.open_popups.contains(label)
    }

    /// Every call recorded so far.
    pub fn calls(&self) -> &[SinkCall] {
        &self.calls
    }

    /// Full paths of every item presented so far, in presentation order.
    pub fn presented_items(&self) -> &[String] {
        &self.presented
    }

    /// Forget recorded calls and presented items, keeping the script.
    pub fn clear(&mut self) {
        self.calls.clear();
        self.presented.clear();
    }

    /// Number of recorded calls that present something (items or menus).
    pub fn presentation_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, SinkCall::BeginMenu { .. } | SinkCall::MenuItem { .. }))
            .count()
    }

    fn full_path(&self, label: &str) -> String {
        let mut segments: Vec<&str> = self.scope.iter().map(String::as_str).collect();
        segments.push(label);
        path::join(&segments, &self.separator)
    }
}

impl MenuSink for ScriptedSink {
    fn begin_popup(&mut self, label: &str) -> bool {
        let open = self.open_popups.contains(label);
        self.calls.push(SinkCall::BeginPopup {
            label: label.to_string(),
            open,
        });
        open
    }

    fn end_popup(&mut self) {
        self.calls.push(SinkCall::EndPopup);
    }

    fn begin_menu(&mut self, label: &str) -> bool {
        let open = !self.collapsed.contains(&self.full_path(label));
        self.calls.push(SinkCall::BeginMenu {
            label: label.to_string(),
            open,
        });
        if open {
            self.scope.push(label.to_string());
        }
        open
    }

    fn end_menu(&mut self) {
        self.scope.pop();
        self.calls.push(SinkCall::EndMenu);
    }

    fn menu_item(&mut self, label: &str) -> bool {
        let path = self.full_path(label);
        let activated = self.activations.remove(&path);
        self.calls.push(SinkCall::MenuItem {
            label: label.to_string(),
            activated,
        });
        self.presented.push(path);
        activated
    }

    fn open_popup(&mut self, label: &str) {
        self.calls.push(SinkCall::OpenPopup {
            label: label.to_string(),
        });
        self.open_popups.insert(label.to_string());
    }
}
