//! Tree store for the menu.
//!
//! Whether a node is a leaf or a container is never stored: a node with no
//! children is a leaf and must carry a handler, a node with children is a
//! container and its handler (if any) is never run. Only the mutator in
//! [`StatefulMenu::render`](crate::StatefulMenu::render) edits the tree, through
//! [`MenuNode::insert`] and [`MenuNode::remove`], and both keep that rule.

use std::collections::BTreeMap;
use std::fmt;

use crate::handler::{Handler, HandlerDebug};
use crate::sink::MenuSink;

/// One level of the menu tree.
///
/// Children are keyed by segment name, so siblings always come out in
/// lexicographic order.
#[derive(Default, Clone)]
pub struct MenuNode {
    children: BTreeMap<String, MenuNode>,
    handler: Option<Handler>,
}

/// What a successful removal did to the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// The leaf was erased, along with `pruned` ancestors left empty by it.
    Erased {
        /// Number of ancestor containers erased after the leaf.
        pruned: usize,
    },
    /// The path names a container; nothing was erased.
    ContainerKept,
}

/// The path did not resolve to a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotFound;

/// An addition targeted an existing container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conflict;

impl MenuNode {
    /// Create an empty root.
    pub fn new() -> Self {
        Self::default()
    }

    fn with_handler(handler: Handler) -> Self {
        Self {
            children: BTreeMap::new(),
            handler: Some(handler),
        }
    }

    /// True if this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// True if this node has no children. Reads better on the root.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Child nodes in key order.
    pub fn children(&self) -> impl Iterator<Item = (&str, &MenuNode)> {
        self.children.iter().map(|(key, node)| (key.as_str(), node))
    }

    /// Look up the node at `segments` below this one.
    pub fn get(&self, segments: &[&str]) -> Option<&MenuNode> {
        segments
            .iter()
            .try_fold(self, |node, segment| node.children.get(*segment))
    }

    /// Attach `handler` at `segments`, creating missing containers on the way.
    ///
    /// Created intermediates hold a copy of the handler that is never run while
    /// they have children. An existing leaf gets its handler replaced. Fails if
    /// the final node already exists with children, since a handler there could
    /// never be activated.
    pub fn insert(&mut self, segments: &[&str], handler: Handler) -> Result<(), Conflict> {
        let Some((last, parents)) = segments.split_last() else {
            return Err(Conflict);
        };

        let mut node = self;
        for segment in parents {
            node = node
                .children
                .entry((*segment).to_string())
                .or_insert_with(|| MenuNode::with_handler(handler.clone()));
        }

        match node.children.get_mut(*last) {
            Some(existing) if !existing.is_leaf() => Err(Conflict),
            Some(existing) => {
                existing.handler = Some(handler);
                Ok(())
            }
            None => {
                node.children
                    .insert((*last).to_string(), MenuNode::with_handler(handler));
                Ok(())
            }
        }
    }

    /// Erase the leaf at `segments`, then every ancestor left without children.
    ///
    /// Pruning stops at the first ancestor that still has children and never
    /// touches `self`.
    pub fn remove(&mut self, segments: &[&str]) -> Result<Removal, NotFound> {
        let Some((head, rest)) = segments.split_first() else {
            return Err(NotFound);
        };
        let child = self.children.get_mut(*head).ok_or(NotFound)?;

        if rest.is_empty() {
            if !child.is_leaf() {
                return Ok(Removal::ContainerKept);
            }
            self.children.remove(*head);
            return Ok(Removal::Erased { pruned: 0 });
        }

        match child.remove(rest)? {
            Removal::Erased { pruned } if child.is_empty() => {
                self.children.remove(*head);
                Ok(Removal::Erased { pruned: pruned + 1 })
            }
            other => Ok(other),
        }
    }

    /// Full paths of every leaf below this node, in traversal order.
    pub fn leaf_paths(&self, separator: &str) -> Vec<String> {
        let mut out = Vec::new();
        let mut prefix = Vec::new();
        self.collect_leaves(&mut prefix, separator, &mut out);
        out
    }

    fn collect_leaves<'a>(
        &'a self,
        prefix: &mut Vec<&'a str>,
        separator: &str,
        out: &mut Vec<String>,
    ) {
        for (key, child) in &self.children {
            prefix.push(key);
            if child.is_leaf() {
                out.push(prefix.join(separator));
            } else {
                child.collect_leaves(prefix, separator, out);
            }
            prefix.pop();
        }
    }

    /// Present every child to `sink`, depth first, and run the handlers of
    /// activated leaves. Returns the number of handlers run.
    pub fn render<S: MenuSink + ?Sized>(&self, sink: &mut S) -> usize {
        let mut activated = 0;
        for (key, child) in &self.children {
            if child.is_leaf() {
                if !sink.menu_item(key) {
                    continue;
                }
                match &child.handler {
                    Some(handler) => {
                        log::debug!("[menu] Activated {:?}", key);
                        handler();
                        activated += 1;
                    }
                    None => log::warn!("[menu] Leaf {:?} has no handler", key),
                }
            } else if sink.begin_menu(key) {
                log::trace!("[menu] Entered {:?}", key);
                activated += child.render(sink);
                sink.end_menu();
            }
        }
        activated
    }
}

impl fmt::Debug for MenuNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuNode")
            .field("handler", &HandlerDebug(&self.handler))
            .field("children", &self.children)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::handler::handler;

    fn noop() -> Handler {
        handler(|| {})
    }

    fn counting(counter: &Arc<AtomicUsize>) -> Handler {
        let counter = Arc::clone(counter);
        handler(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_insert_creates_containers() {
        let mut root = MenuNode::new();
        root.insert(&["a", "b", "c"], noop()).unwrap();

        assert!(!root.get(&["a"]).unwrap().is_leaf());
        assert!(!root.get(&["a", "b"]).unwrap().is_leaf());
        assert!(root.get(&["a", "b", "c"]).unwrap().is_leaf());
        assert_eq!(root.leaf_paths("/"), vec!["a/b/c"]);
    }

    #[test]
    fn test_insert_replaces_leaf_handler() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let mut root = MenuNode::new();
        root.insert(&["x"], counting(&first)).unwrap();
        root.insert(&["x"], counting(&second)).unwrap();

        let leaf = root.get(&["x"]).unwrap();
        (leaf.handler.as_ref().unwrap())();
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_insert_onto_container_conflicts() {
        let mut root = MenuNode::new();
        root.insert(&["a", "b"], noop()).unwrap();
        assert_eq!(root.insert(&["a"], noop()), Err(Conflict));
        assert_eq!(root.insert(&[], noop()), Err(Conflict));
    }

    #[test]
    fn test_leaf_becomes_container() {
        let mut root = MenuNode::new();
        root.insert(&["a"], noop()).unwrap();
        root.insert(&["a", "b"], noop()).unwrap();
        assert_eq!(root.leaf_paths("/"), vec!["a/b"]);
    }

    #[test]
    fn test_remove_prunes_empty_ancestors() {
        let mut root = MenuNode::new();
        root.insert(&["a", "b", "c"], noop()).unwrap();
        assert_eq!(
            root.remove(&["a", "b", "c"]),
            Ok(Removal::Erased { pruned: 2 })
        );
        assert!(root.is_empty());
    }

    #[test]
    fn test_remove_stops_at_non_empty_ancestor() {
        let mut root = MenuNode::new();
        root.insert(&["a", "b", "c"], noop()).unwrap();
        root.insert(&["a", "d"], noop()).unwrap();

        assert_eq!(
            root.remove(&["a", "b", "c"]),
            Ok(Removal::Erased { pruned: 1 })
        );
        assert_eq!(root.leaf_paths("/"), vec!["a/d"]);
    }

    #[test]
    fn test_remove_missing() {
        let mut root = MenuNode::new();
        root.insert(&["a", "b"], noop()).unwrap();
        assert_eq!(root.remove(&["a", "x"]), Err(NotFound));
        assert_eq!(root.remove(&["a", "b", "c"]), Err(NotFound));
        assert_eq!(root.remove(&["z"]), Err(NotFound));
        assert_eq!(root.leaf_paths("/"), vec!["a/b"]);
    }

    #[test]
    fn test_remove_container_keeps_tree() {
        let mut root = MenuNode::new();
        root.insert(&["a", "b"], noop()).unwrap();
        assert_eq!(root.remove(&["a"]), Ok(Removal::ContainerKept));
        assert_eq!(root.leaf_paths("/"), vec!["a/b"]);
    }

    #[test]
    fn test_leaf_paths_sorted() {
        let mut root = MenuNode::new();
        for path in [["b", "z"], ["a", "y"], ["b", "a"]] {
            root.insert(&path, noop()).unwrap();
        }
        assert_eq!(root.leaf_paths("::"), vec!["a::y", "b::a", "b::z"]);
    }
}
