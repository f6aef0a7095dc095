//! Rendering backends.
//!
//! The menu never draws anything itself. Each render pass walks the tree and
//! calls into a [`MenuSink`], which is expected to be a thin adapter over an
//! immediate-mode UI's popup and menu primitives. Labels passed to the sink
//! are only borrowed for the duration of the call.

mod scripted;

pub use scripted::{ScriptedSink, SinkCall};

/// Immediate-mode menu primitives the walker drives.
///
/// Every `begin_*` that returns `true` is matched by the corresponding `end_*`
/// call before the render pass returns.
pub trait MenuSink {
    /// Begin the top-level popup identified by `label`. Returns whether it is
    /// open this frame.
    fn begin_popup(&mut self, label: &str) -> bool;

    /// Close the scope opened by a successful [`begin_popup`](Self::begin_popup).
    fn end_popup(&mut self);

    /// Begin a nested menu. Returns whether its contents should be presented.
    fn begin_menu(&mut self, label: &str) -> bool;

    /// Close the scope opened by a successful [`begin_menu`](Self::begin_menu).
    fn end_menu(&mut self);

    /// Present a leaf item. Returns whether the user activated it this frame.
    fn menu_item(&mut self, label: &str) -> bool;

    /// Ask for the popup identified by `label` to be opened.
    fn open_popup(&mut self, label: &str);
}

impl<S: MenuSink + ?Sized> MenuSink for &mut S {
    fn begin_popup(&mut self, label: &str) -> bool {
        (**self).begin_popup(label)
    }

    fn end_popup(&mut self) {
        (**self).end_popup()
    }

    fn begin_menu(&mut self, label: &str) -> bool {
        (**self).begin_menu(label)
    }

    fn end_menu(&mut self) {
        (**self).end_menu()
    }

    fn menu_item(&mut self, label: &str) -> bool {
        (**self).menu_item(label)
    }

    fn open_popup(&mut self, label: &str) {
        (**self).open_popup(label)
    }
}
