//! Radix trie over an arena of nodes.
//!
//! This module contains [`Trie`] and the raw trie algorithms: prefix matching
//! ([`fast_find`](Trie::fast_find), [`locate`](Trie::locate)), insertion with fragment
//! splitting, subtree removal and traversal. The delimiter-aware store layer built on top of
//! these lives in [`store`](crate::store).

use tracing::{debug, trace};

use crate::arena::{Arena, NodeId};
use crate::config::Config;
use crate::error::{TrieError, TrieResult};
use crate::fragment::common_prefix;
use crate::node::{Node, NodeKind};

/// Outcome of [`Trie::fast_find`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FindResult {
    /// How many bytes of the deepest node's fragment matched the query. Zero on an exact match.
    pub partial_matched_size: usize,
    /// The deepest node reached. `None` only for an empty query.
    pub node: Option<NodeId>,
    /// The whole query was consumed, either exactly at a node boundary or inside a fragment.
    pub matched: bool,
}

impl FindResult {
    /// The query ended exactly at a node boundary.
    pub fn is_exact(&self) -> bool {
        self.matched && self.partial_matched_size == 0 && self.node.is_some()
    }
}

/// Outcome of [`Trie::locate`] and [`Trie::search`].
///
/// Same as [`FindResult`], plus the ancestors visited on the way down (root first, direct
/// parent last). The handles are only meaningful until the trie is next mutated.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LocateResult {
    pub partial_matched_size: usize,
    pub node: Option<NodeId>,
    pub parents: Vec<NodeId>,
    pub matched: bool,
    /// Set by [`Trie::search`] when the query stopped one delimiter short of the end of the
    /// node's fragment.
    pub delimited: bool,
}

impl LocateResult {
    pub fn is_exact(&self) -> bool {
        self.matched && self.partial_matched_size == 0 && self.node.is_some()
    }

    /// Exact match, or a match through the delimiter-trailing rule.
    pub fn is_found(&self) -> bool {
        self.is_exact() || (self.delimited && self.node.is_some())
    }

    /// The direct parent of the located node.
    pub fn parent(&self) -> Option<NodeId> {
        self.parents.last().copied()
    }

    /// The located node, or the error describing why `key` did not resolve to one.
    pub fn resolve(&self, key: &str) -> TrieResult<NodeId> {
        match self.node {
            Some(id) if self.is_found() => Ok(id),
            _ if self.partial_matched_size > 0 => Err(TrieError::PartialOnly {
                key: key.to_string(),
                matched: self.partial_matched_size,
            }),
            _ => Err(TrieError::not_found(key)),
        }
    }
}

/// Where [`Trie::descend`] records the nodes it passes through.
trait Trail {
    fn push(&mut self, id: NodeId);
}

impl Trail for () {
    #[inline]
    fn push(&mut self, _id: NodeId) {}
}

impl Trail for Vec<NodeId> {
    #[inline]
    fn push(&mut self, id: NodeId) {
        Vec::push(self, id)
    }
}

/// A radix trie mapping string keys to values of type `V`.
///
/// Each node holds a fragment of a key; the key of a node is the concatenation of the fragments
/// from the root down to it. Sibling fragments never share a first character, so every lookup
/// follows at most one child per level.
///
/// # Examples
///
/// ```rust
/// use trie_store::Trie;
///
/// let mut trie = Trie::<i32>::new();
/// assert_eq!(trie.insert("herz", 1), Ok(None));
/// assert_eq!(trie.insert("hers", 2), Ok(None));
/// assert_eq!(trie.insert("herz", 3), Ok(Some(1)));
///
/// assert_eq!(trie.find("herz"), Some(&3));
/// assert_eq!(trie.find("her"), None);
/// assert_eq!(trie.size(), 2);
/// ```
pub struct Trie<V> {
    pub(crate) nodes: Arena<Node<V>>,
    pub(crate) root: NodeId,
    pub(crate) config: Config,
}

impl<V> Default for Trie<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Trie<V> {
    /// Create an empty trie with the default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create an empty trie. The configuration is fixed for the lifetime of the trie.
    pub fn with_config(config: Config) -> Self {
        let mut nodes = Arena::new();
        let root = nodes.insert(Node::new_root(config.metadata));
        Self {
            nodes,
            root,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn delimiter(&self) -> char {
        self.config.delimiter
    }

    /// Handle of the root node. The root has an empty fragment and never holds a value.
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn root_node(&self) -> &Node<V> {
        &self.nodes[self.root]
    }

    /// Resolve a node handle.
    ///
    /// Fails with [`TrieError::WeakRefExpired`] if the node has been removed since the handle
    /// was obtained.
    pub fn node(&self, id: NodeId) -> TrieResult<&Node<V>> {
        self.nodes.get(id).ok_or(TrieError::WeakRefExpired { id })
    }

    pub fn node_mut(&mut self, id: NodeId) -> TrieResult<&mut Node<V>> {
        self.nodes.get_mut(id).ok_or(TrieError::WeakRefExpired { id })
    }

    /// Store `value` at the node behind `id`, returning the value it replaced.
    pub fn set_value(&mut self, id: NodeId, value: V) -> TrieResult<Option<V>> {
        if id == self.root {
            return Err(TrieError::EmptyKey);
        }
        Ok(self.node_mut(id)?.replace_value(value))
    }

    /// Number of nodes in the trie, the root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Match `query` against the trie as far as it goes.
    ///
    /// # Returns
    ///
    /// - `matched` with `partial_matched_size == 0` when `query` is the key of a node
    /// - `matched` with `partial_matched_size > 0` when `query` ends inside the fragment of the
    ///   returned node, after that many bytes of it
    /// - not `matched` when the query runs off the trie; `partial_matched_size` is then how much
    ///   of the returned node's fragment matched before the divergence
    /// - an empty, unmatched result for an empty query
    pub fn fast_find(&self, query: &str) -> FindResult {
        if query.is_empty() {
            return FindResult::default();
        }
        let found = self.descend(self.root, query, &mut ());
        trace!(
            key = query,
            matched = found.matched,
            at = found.partial_matched_size,
            "fast_find"
        );
        found
    }

    /// Like [`fast_find`](Self::fast_find), also collecting the chain of ancestors of the node
    /// reached.
    pub fn locate(&self, query: &str) -> LocateResult {
        if query.is_empty() {
            return LocateResult::default();
        }
        let mut parents = Vec::new();
        let found = self.descend(self.root, query, &mut parents);
        LocateResult {
            partial_matched_size: found.partial_matched_size,
            node: found.node,
            parents,
            matched: found.matched,
            delimited: false,
        }
    }

    /// The value stored under exactly `path`, without the delimiter-trailing rule.
    pub fn find(&self, path: &str) -> Option<&V> {
        let found = self.fast_find(path);
        if !found.is_exact() {
            return None;
        }
        self.nodes[found.node?].value.as_ref()
    }

    fn descend<T: Trail>(&self, mut id: NodeId, mut rest: &str, trail: &mut T) -> FindResult {
        loop {
            let node = &self.nodes[id];
            let matched_len = common_prefix(&node.fragment, rest);

            if matched_len < node.fragment.len() {
                return FindResult {
                    partial_matched_size: matched_len,
                    node: Some(id),
                    matched: matched_len == rest.len(),
                };
            }
            if matched_len == rest.len() {
                return FindResult {
                    partial_matched_size: 0,
                    node: Some(id),
                    matched: true,
                };
            }
            rest = &rest[matched_len..];
            let Some(child) = self.child_starting_with(node, rest) else {
                return FindResult {
                    partial_matched_size: matched_len,
                    node: Some(id),
                    matched: false,
                };
            };
            trail.push(id);
            id = child;
        }
    }

    fn child_starting_with(&self, node: &Node<V>, rest: &str) -> Option<NodeId> {
        let first = rest.chars().next()?;
        node.children
            .iter()
            .copied()
            .find(|child| self.nodes[*child].fragment.starts_with(first))
    }

    /// Insert `value` under `path`.
    ///
    /// Splits the fragment of an existing node when `path` ends inside it or diverges from it.
    /// The existing node keeps the head of its fragment, so handles to it stay valid.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(old_value))` if a value was already stored under `path`
    /// - `Ok(None)` if this was a new key
    /// - `Err(TrieError::EmptyKey)` for an empty `path`
    pub fn insert(&mut self, path: &str, value: V) -> TrieResult<Option<V>> {
        if path.is_empty() {
            return Err(TrieError::EmptyKey);
        }
        let found = self.fast_find(path);
        let id = found.node.unwrap_or(self.root);
        let at = found.partial_matched_size;

        if found.matched {
            if at > 0 {
                // The path ends inside this node's fragment: the head becomes the key's node.
                self.split(id, at);
            }
            let old = self.nodes[id].replace_value(value);
            debug!(key = path, replaced = old.is_some(), "stored value");
            return Ok(old);
        }

        if at < self.nodes[id].fragment.len() {
            self.split(id, at);
        }
        let fragment = path[self.nodes[id].path.len()..].to_string();
        self.attach_leaf(id, path, fragment, value);
        Ok(None)
    }

    fn split(&mut self, id: NodeId, at: usize) {
        let tail = self.nodes[id].split_off(at);
        debug!(
            node = %self.nodes[id].path,
            tail = %tail.fragment,
            "split node"
        );
        let tail_id = self.nodes.insert(tail);
        let node = &mut self.nodes[id];
        node.children.push(tail_id);
        node.sync_kind();
    }

    fn attach_leaf(&mut self, parent: NodeId, path: &str, fragment: String, value: V) -> NodeId {
        debug!(key = path, fragment = %fragment, "attach leaf");
        let leaf = Node::new_leaf(path.to_string(), fragment, value, self.config.metadata);
        let leaf_id = self.nodes.insert(leaf);
        let parent = &mut self.nodes[parent];
        parent.children.push(leaf_id);
        parent.sync_kind();
        leaf_id
    }

    /// Remove the node resolved by [`search`](Self::search) for `path`.
    ///
    /// With `include_children`, the whole subtree below the node goes with it; without, only a
    /// childless node may be removed. Ancestors left without value and children are removed as
    /// well.
    ///
    /// # Returns
    ///
    /// - `Ok(value)` with the value the node held, if any
    /// - `Err(TrieError::NotFound)` / `Err(TrieError::PartialOnly)` if `path` does not resolve
    /// - `Err(TrieError::BranchHasChildren)` for a node with children and no `include_children`
    pub fn remove(&mut self, path: &str, include_children: bool) -> TrieResult<Option<V>> {
        let located = self.search(path);
        let id = located.resolve(path)?;
        self.unlink(id, &located.parents, include_children)
    }

    /// Remove the node behind a handle, see [`remove`](Self::remove).
    ///
    /// Fails with [`TrieError::WeakRefExpired`] for a stale handle and with
    /// [`TrieError::OrphanNode`] for the root, which has no parent to be unlinked from.
    pub fn remove_node(&mut self, id: NodeId, include_children: bool) -> TrieResult<Option<V>> {
        let path = self.node(id)?.path.clone();
        if id == self.root {
            return Err(TrieError::orphan(path));
        }
        let located = self.locate(&path);
        if located.node != Some(id) || !located.is_exact() {
            return Err(TrieError::orphan(path));
        }
        self.unlink(id, &located.parents, include_children)
    }

    fn unlink(
        &mut self,
        id: NodeId,
        parents: &[NodeId],
        include_children: bool,
    ) -> TrieResult<Option<V>> {
        let node = self.node(id)?;
        let path = node.path.clone();
        if !node.children.is_empty() && !include_children {
            return Err(TrieError::branch_has_children(path));
        }
        let Some((&parent, ancestors)) = parents.split_last() else {
            return Err(TrieError::orphan(path));
        };
        self.node_mut(parent)?.children.retain(|child| *child != id);

        let (value, freed) = self.free_subtree(id);
        debug!(key = %path, freed, "removed subtree");
        self.prune(parent, ancestors);
        Ok(value)
    }

    /// Release `id` and everything below it. Returns the value `id` held and the number of nodes
    /// freed.
    fn free_subtree(&mut self, id: NodeId) -> (Option<V>, usize) {
        let mut stack = vec![id];
        let mut value = None;
        let mut freed = 0;
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes.remove(next) {
                if next == id {
                    value = node.value;
                }
                stack.extend(node.children);
                freed += 1;
            }
        }
        (value, freed)
    }

    /// Walk up from `id`, dropping nodes that no longer hold a value or children.
    fn prune(&mut self, mut id: NodeId, mut ancestors: &[NodeId]) {
        loop {
            let node = &mut self.nodes[id];
            node.sync_kind();
            if id == self.root || node.kind != NodeKind::None {
                return;
            }
            let Some((&parent, rest)) = ancestors.split_last() else {
                return;
            };
            debug!(key = %node.path, "prune empty node");
            self.nodes.remove(id);
            self.nodes[parent].children.retain(|child| *child != id);
            id = parent;
            ancestors = rest;
        }
    }

    /// Visit every node that holds a value or has children, depth first, parents before
    /// children and children in insertion order.
    ///
    /// The callback receives the node's kind, the node, its index among its siblings and its
    /// depth, the root being at depth 0.
    pub fn walk<F>(&self, mut f: F)
    where
        F: FnMut(NodeKind, &Node<V>, usize, usize),
    {
        self.walk_from(self.root, &mut f);
    }

    fn walk_from<F>(&self, start: NodeId, f: &mut F)
    where
        F: FnMut(NodeKind, &Node<V>, usize, usize),
    {
        // (node, index among siblings, depth)
        let mut stack = vec![(start, 0, 0)];
        while let Some((id, index, level)) = stack.pop() {
            let node = &self.nodes[id];
            if node.kind != NodeKind::None {
                f(node.kind, node, index, level);
            }
            stack.extend(
                node.children
                    .iter()
                    .enumerate()
                    .rev()
                    .map(|(idx, child)| (*child, idx, level + 1)),
            );
        }
    }

    /// Number of leaf nodes.
    ///
    /// A key that is also the prefix of deeper keys sits on a branch and is not counted here;
    /// see [`len`](Self::len) for the number of stored values.
    pub fn size(&self) -> usize {
        let mut count = 0;
        self.walk(|kind, _, _, _| {
            if kind == NodeKind::Leaf {
                count += 1;
            }
        });
        count
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        let mut count = 0;
        self.walk(|_, node, _, _| {
            if node.has_value() {
                count += 1;
            }
        });
        count
    }

    pub fn is_empty(&self) -> bool {
        self.nodes[self.root].children.is_empty()
    }
}
