//! Persistent routing trie.
//!
//! Edges are segment matchers; each node partitions its children into
//! three buckets: literals (keyed by exact string), the `*` child, and
//! the `**` child. Terminal nodes carry the routes whose patterns end
//! there, in insertion order.
//!
//! The trie is persistent: `insert` and `remove` return a new root and
//! share untouched subtrees through `Arc`, so a published router value
//! stays valid for concurrent readers while updates build new values.

use std::collections::HashMap;
use std::sync::Arc;

use crate::pattern::Segment;
use crate::Route;

/// A route as registered: the user's rule plus the bookkeeping the
/// ordering algorithm needs.
#[derive(Debug, Clone)]
pub(crate) struct RouteEntry {
    pub route: Route,
    /// Monotonic registration counter; earlier wins on full ties.
    pub index: u64,
    /// Cached specificity vector of the pattern.
    pub rank: Vec<u8>,
}

/// One trie node.
#[derive(Debug, Clone, Default)]
pub(crate) struct Node {
    literals: HashMap<String, Arc<Node>>,
    single: Option<Arc<Node>>,
    multi: Option<Arc<Node>>,
    routes: Vec<Arc<RouteEntry>>,
}

impl Node {
    fn child(&self, segment: &Segment) -> Option<&Arc<Node>> {
        match segment {
            Segment::Literal(s) => self.literals.get(s),
            Segment::Single => self.single.as_ref(),
            Segment::Multi => self.multi.as_ref(),
        }
    }

    fn set_child(&mut self, segment: &Segment, child: Option<Arc<Node>>) {
        match segment {
            Segment::Literal(s) => match child {
                Some(child) => {
                    self.literals.insert(s.clone(), child);
                }
                None => {
                    self.literals.remove(s);
                }
            },
            Segment::Single => self.single = child,
            Segment::Multi => self.multi = child,
        }
    }

    fn is_empty(&self) -> bool {
        self.routes.is_empty()
            && self.literals.is_empty()
            && self.single.is_none()
            && self.multi.is_none()
    }
}

/// Inserts an entry at the end of its pattern path, path-copying from
/// `node` down and sharing everything else.
pub(crate) fn insert(node: &Node, segments: &[Segment], entry: Arc<RouteEntry>) -> Node {
    let mut copy = node.clone();
    match segments.split_first() {
        None => copy.routes.push(entry),
        Some((segment, rest)) => {
            let child = match node.child(segment) {
                Some(existing) => insert(existing, rest, entry),
                None => insert(&Node::default(), rest, entry),
            };
            copy.set_child(segment, Some(Arc::new(child)));
        }
    }
    copy
}

/// Removes entries at the pattern's terminal node for which `keep`
/// returns `false`, pruning now-empty subtrees.
///
/// Returns the new subtree (`None` when it became empty) and the
/// number of entries removed. A missing path is a no-op.
pub(crate) fn remove(
    node: &Node,
    segments: &[Segment],
    keep: &dyn Fn(&RouteEntry) -> bool,
) -> (Option<Node>, usize) {
    let mut copy = node.clone();
    let mut removed = 0;

    match segments.split_first() {
        None => {
            let before = copy.routes.len();
            copy.routes.retain(|entry| keep(entry));
            removed = before - copy.routes.len();
        }
        Some((segment, rest)) => {
            if let Some(child) = node.child(segment) {
                let (new_child, child_removed) = remove(child, rest, keep);
                removed = child_removed;
                copy.set_child(segment, new_child.map(Arc::new));
            }
        }
    }

    if copy.is_empty() {
        (None, removed)
    } else {
        (Some(copy), removed)
    }
}

/// Collects every entry whose pattern matches the given type segments.
///
/// Worklist descent over `(node, segment_index)` states: literal and
/// `*` children advance one segment; the `**` child is enqueued at
/// every remaining offset, which is what lets it span zero or more
/// segments. Cost is `O(n · w)` in the segment count and the branching
/// factor of visited nodes.
pub(crate) fn collect(root: &Node, segments: &[&str]) -> Vec<Arc<RouteEntry>> {
    let n = segments.len();
    let mut found = Vec::new();
    let mut work: Vec<(&Node, usize)> = vec![(root, 0)];

    while let Some((node, idx)) = work.pop() {
        if idx == n {
            found.extend(node.routes.iter().cloned());
        } else {
            if let Some(child) = node.literals.get(segments[idx]) {
                work.push((child, idx + 1));
            }
            if let Some(child) = &node.single {
                work.push((child, idx + 1));
            }
        }
        if let Some(child) = &node.multi {
            for k in idx..=n {
                work.push((child, k));
            }
        }
    }

    found
}

/// Total number of entries in the subtree.
pub(crate) fn count(node: &Node) -> usize {
    let mut total = node.routes.len();
    for child in node.literals.values() {
        total += count(child);
    }
    if let Some(child) = &node.single {
        total += count(child);
    }
    if let Some(child) = &node.multi {
        total += count(child);
    }
    total
}
