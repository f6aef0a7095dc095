//! The stateful menu.
//!
//! Any thread may queue additions and removals at any time. The render thread
//! calls [`StatefulMenu::render`] once per frame, which applies everything
//! queued so far and then walks the tree into a [`MenuSink`]. Nothing else
//! edits the tree, so a node the sink saw this frame can only disappear at the
//! start of the next one.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, RwLock};

use crate::config::MenuConfig;
use crate::error::{MenuError, PathError};
use crate::handler::Handler;
use crate::identity::IdentitySource;
use crate::node::{MenuNode, Removal};
use crate::path;
use crate::queue::{Batch, RequestQueues, lock};
use crate::sink::MenuSink;

/// What a render pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Leaves erased by queued removals.
    pub removed: usize,
    /// Paths attached by queued additions.
    pub added: usize,
    /// Failed requests dropped because ignore-errors was on.
    pub skipped: usize,
    /// Handlers run because the sink reported an activation.
    pub activated: usize,
    /// Whether the tree was walked (false when the popup was closed).
    pub presented: bool,
}

#[derive(Debug, Clone)]
struct Labels {
    anchor: String,
    separator: String,
}

/// Thread-safe, path-addressed menu of commands.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// use menutree::{MenuConfig, ScriptedSink, StatefulMenu, handler};
///
/// let menu = Arc::new(StatefulMenu::new(MenuConfig::default()));
/// let saves = Arc::new(AtomicUsize::new(0));
///
/// let counter = Arc::clone(&saves);
/// let producer = Arc::clone(&menu);
/// std::thread::spawn(move || {
///     producer.add("File/Save", handler(move || {
///         counter.fetch_add(1, Ordering::SeqCst);
///     }));
/// })
/// .join()
/// .unwrap();
///
/// let mut sink = ScriptedSink::new();
/// menu.show(&mut sink);
/// sink.activate("File/Save");
/// menu.render(&mut sink).unwrap();
/// assert_eq!(saves.load(Ordering::SeqCst), 1);
/// ```
pub struct StatefulMenu {
    queues: RequestQueues,
    /// Held for a whole render pass.
    tree: Mutex<MenuNode>,
    labels: RwLock<Labels>,
    popup: AtomicBool,
    ignore_errors: AtomicBool,
}

impl Default for StatefulMenu {
    fn default() -> Self {
        Self::new(MenuConfig::default())
    }
}

impl StatefulMenu {
    /// Create an empty menu, drawing its anchor label (unless configured) from
    /// the process-wide identity source.
    pub fn new(config: MenuConfig) -> Self {
        Self::with_identity(config, IdentitySource::process())
    }

    /// Create an empty menu, drawing its anchor label (unless configured) from
    /// `identity`.
    pub fn with_identity(config: MenuConfig, identity: &IdentitySource) -> Self {
        let anchor = config
            .anchor_label
            .unwrap_or_else(|| identity.next_label());
        Self {
            queues: RequestQueues::new(),
            tree: Mutex::new(MenuNode::new()),
            labels: RwLock::new(Labels {
                anchor,
                separator: config.separator,
            }),
            popup: AtomicBool::new(config.popup),
            ignore_errors: AtomicBool::new(config.ignore_errors),
        }
    }

    // =========================================================================
    // Requests
    // =========================================================================

    /// Queue `handler` to be attached at `path` on the next render pass.
    ///
    /// Missing containers along the path are created then. Queuing the same
    /// path again before that pass replaces the queued handler.
    pub fn add(&self, path: impl Into<String>, handler: Handler) {
        self.queues.push_addition(path.into(), handler);
    }

    /// Queue several additions.
    pub fn add_all<I, P>(&self, entries: I)
    where
        I: IntoIterator<Item = (P, Handler)>,
        P: Into<String>,
    {
        for (path, handler) in entries {
            self.add(path, handler);
        }
    }

    /// Queue the leaf at `path` for removal on the next render pass.
    ///
    /// Containers left empty by the removal are removed with it.
    pub fn remove(&self, path: impl Into<String>) {
        self.queues.push_removal(path.into());
    }

    /// Queue a removal and an addition of `path` that land in the same pass,
    /// replacing the handler of an existing leaf.
    pub fn modify(&self, path: impl Into<String>, handler: Handler) {
        self.queues.push_replacement(path.into(), handler);
    }

    /// Number of removals waiting for the next render pass.
    pub fn pending_removals(&self) -> usize {
        self.queues.pending_removals()
    }

    /// Number of additions waiting for the next render pass.
    pub fn pending_additions(&self) -> usize {
        self.queues.pending_additions()
    }

    // =========================================================================
    // Render pass
    // =========================================================================

    /// Apply queued requests, then present the tree to `sink`.
    ///
    /// Removals are applied before additions. A failing request does not stop
    /// the rest of the batch, and both queues are empty afterwards either way.
    /// Unless ignore-errors is on, any failure is returned here and the tree is
    /// not presented this pass.
    ///
    /// Activated handlers run on this thread while the tree is locked: they may
    /// queue requests but must not call `render`, `is_empty` or `leaf_paths`.
    pub fn render<S: MenuSink + ?Sized>(&self, sink: &mut S) -> Result<RenderStats, MenuError> {
        let mut tree = lock(&self.tree);
        let mut stats = RenderStats::default();

        let failures = self.apply(&mut tree, &mut stats);
        if !failures.is_empty() {
            return Err(MenuError::Mutation { failures });
        }

        if self.is_popup() {
            let anchor = self.anchor_label();
            if sink.begin_popup(&anchor) {
                stats.activated = tree.render(sink);
                stats.presented = true;
                sink.end_popup();
            }
        } else {
            stats.activated = tree.render(sink);
            stats.presented = true;
        }

        Ok(stats)
    }

    /// Ask `sink` to open this menu's popup.
    pub fn show<S: MenuSink + ?Sized>(&self, sink: &mut S) {
        sink.open_popup(&self.anchor_label());
    }

    fn apply(&self, tree: &mut MenuNode, stats: &mut RenderStats) -> Vec<PathError> {
        let Batch {
            removals,
            additions,
        } = self.queues.drain();
        if removals.is_empty() && additions.is_empty() {
            return Vec::new();
        }

        let separator = self.path_separator();
        log::debug!(
            "[menu] Applying {} removal(s), {} addition(s)",
            removals.len(),
            additions.len()
        );

        let mut failures = Vec::new();
        for path in &removals {
            match remove_path(tree, path, &separator) {
                Ok(Removal::Erased { pruned }) => {
                    log::trace!("[menu] Removed {:?}, pruned {} container(s)", path, pruned);
                    stats.removed += 1;
                }
                Ok(Removal::ContainerKept) => {
                    log::warn!("[menu] {:?} is a container, not removing it", path);
                }
                Err(error) => failures.push(error),
            }
        }
        for (path, handler) in additions {
            match add_path(tree, &path, &separator, handler) {
                Ok(()) => stats.added += 1,
                Err(error) => failures.push(error),
            }
        }

        if self.ignore_errors() {
            for failure in failures.drain(..) {
                log::debug!("[menu] Ignoring failed request: {}", failure);
                stats.skipped += 1;
            }
        } else {
            for failure in &failures {
                log::warn!("[menu] {}", failure);
            }
        }
        failures
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Whether the applied tree has no entries. Queued requests don't count.
    pub fn is_empty(&self) -> bool {
        lock(&self.tree).is_empty()
    }

    /// Full path of every leaf in the applied tree, in presentation order.
    pub fn leaf_paths(&self) -> Vec<String> {
        let separator = self.path_separator();
        lock(&self.tree).leaf_paths(&separator)
    }

    // =========================================================================
    // Settings
    // =========================================================================

    /// Label identifying this menu's popup to the sink.
    pub fn anchor_label(&self) -> String {
        self.read_labels().anchor.clone()
    }

    pub fn set_anchor_label(&self, label: impl Into<String>) {
        self.write_labels().anchor = label.into();
    }

    pub fn path_separator(&self) -> String {
        self.read_labels().separator.clone()
    }

    /// Change the separator used when applying requests from now on.
    pub fn set_path_separator(&self, separator: impl Into<String>) -> Result<(), MenuError> {
        let separator = separator.into();
        path::validate_separator(&separator)?;
        self.write_labels().separator = separator;
        Ok(())
    }

    pub fn is_popup(&self) -> bool {
        self.popup.load(Ordering::SeqCst)
    }

    pub fn set_popup(&self, popup: bool) {
        self.popup.store(popup, Ordering::SeqCst);
    }

    pub fn ignore_errors(&self) -> bool {
        self.ignore_errors.load(Ordering::SeqCst)
    }

    pub fn set_ignore_errors(&self, ignore: bool) {
        self.ignore_errors.store(ignore, Ordering::SeqCst);
    }

    fn read_labels(&self) -> std::sync::RwLockReadGuard<'_, Labels> {
        self.labels
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_labels(&self) -> std::sync::RwLockWriteGuard<'_, Labels> {
        self.labels
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl fmt::Debug for StatefulMenu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatefulMenu")
            .field("labels", &*self.read_labels())
            .field("popup", &self.is_popup())
            .field("ignore_errors", &self.ignore_errors())
            .field("queues", &self.queues)
            .finish_non_exhaustive()
    }
}

fn remove_path(tree: &mut MenuNode, path: &str, separator: &str) -> Result<Removal, PathError> {
    let segments = path::split(path, separator)?;
    tree.remove(&segments).map_err(|_| PathError::NotFound {
        path: path.to_string(),
    })
}

fn add_path(
    tree: &mut MenuNode,
    path: &str,
    separator: &str,
    handler: Handler,
) -> Result<(), PathError> {
    let segments = path::split(path, separator)?;
    tree.insert(&segments, handler)
        .map_err(|_| PathError::InsertionConflict {
            path: path.to_string(),
        })
}
