use std::slice;

use crate::arena::{Arena, NodeId};
use crate::node::Node;
use crate::tree::Trie;

/// Pre-order iterator over the `(key, value)` pairs of a trie or of one of its subtrees.
///
/// Parents come before their children and siblings come in insertion order, the same order
/// [`Trie::walk`] uses.
pub struct Iter<'a, V> {
    nodes: &'a Arena<Node<V>>,
    // The node the iteration starts from, until it has been visited.
    start: Option<NodeId>,
    node_iter_stack: Vec<slice::Iter<'a, NodeId>>,
}

impl<'a, V> Iter<'a, V> {
    pub(crate) fn new(nodes: &'a Arena<Node<V>>, start: Option<NodeId>) -> Self {
        Self {
            nodes,
            start,
            node_iter_stack: Vec::new(),
        }
    }

    fn visit(&mut self, id: NodeId) -> Option<(&'a str, &'a V)> {
        let nodes: &'a Arena<Node<V>> = self.nodes;
        let node = nodes.get(id)?;
        self.node_iter_stack.push(node.children.iter());
        node.value.as_ref().map(|value| (node.path.as_str(), value))
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(start) = self.start.take() {
            if let Some(entry) = self.visit(start) {
                return Some(entry);
            }
        }
        // Descend into the next child of the innermost unfinished node; drop exhausted levels.
        loop {
            let last_iter = self.node_iter_stack.last_mut()?;
            let Some(child) = last_iter.next() else {
                self.node_iter_stack.pop();
                continue;
            };
            if let Some(entry) = self.visit(*child) {
                return Some(entry);
            }
        }
    }
}

impl<V> Trie<V> {
    /// Iterate over every stored `(key, value)` pair.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(&self.nodes, Some(self.root))
    }

    /// Iterate over the stored pairs whose key starts with `prefix`.
    ///
    /// The prefix is matched textually: `app.log` covers `app.logging.file` as well as
    /// `app.logo`.
    pub fn iter_prefix(&self, prefix: &str) -> Iter<'_, V> {
        if prefix.is_empty() {
            return self.iter();
        }
        let found = self.fast_find(prefix);
        let start = if found.matched { found.node } else { None };
        Iter::new(&self.nodes, start)
    }
}

impl<'a, V> IntoIterator for &'a Trie<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
