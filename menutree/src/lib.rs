//! Thread-safe, path-addressed command menus for immediate-mode UIs.
//!
//! Commands are registered by path (`"File/Recent/notes.txt"`) from any thread
//! and only applied to the tree at the start of a render pass, so a frame never
//! sees a node that is removed while it is being drawn.

pub mod config;
pub mod error;
pub mod handler;
pub mod identity;
pub mod menu;
pub mod node;
pub mod path;
pub mod queue;
pub mod sink;

pub use config::MenuConfig;
pub use error::{ConfigError, MenuError, PathError};
pub use handler::{Handler, handler};
pub use identity::{ANCHOR_PREFIX, IdentitySource};
pub use menu::{RenderStats, StatefulMenu};
pub use node::MenuNode;
pub use sink::{MenuSink, ScriptedSink, SinkCall};
