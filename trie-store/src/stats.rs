//! Statistics and introspection.
//!
//! Gathered with a single [`Trie::walk`], so the cost is linear in the number of nodes. Useful
//! for judging how well keys compress and how deep lookups have to go.

use crate::node::NodeKind;
use crate::tree::Trie;

pub trait TrieStatsTrait {
    fn get_trie_stats(&self) -> TrieStats;
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TrieStats {
    /// Nodes of kind [`NodeKind::Leaf`]; equals [`Trie::size`].
    pub num_leaves: usize,
    /// Nodes of kind [`NodeKind::Branch`], the root included once it has children.
    pub num_branches: usize,
    /// Nodes holding a value, leaves and value-bearing branches alike.
    pub num_values: usize,
    /// Depth of the deepest node, the root being at depth 0.
    pub max_depth: usize,
    /// Total length of all fragments in bytes.
    pub fragment_bytes: usize,
    /// Total length of all stored keys in bytes.
    pub key_bytes: usize,
}

impl TrieStats {
    /// Average number of key bytes per node below the root.
    pub fn avg_fragment_len(&self) -> f64 {
        let nodes = self.num_leaves + self.num_branches;
        if nodes <= 1 {
            return self.fragment_bytes as f64;
        }
        // The root is counted as a branch but has no fragment.
        self.fragment_bytes as f64 / (nodes - 1) as f64
    }

    /// Fragment bytes per stored key byte. Below 1.0 when keys share prefixes.
    pub fn compression_ratio(&self) -> f64 {
        if self.key_bytes == 0 {
            return 1.0;
        }
        self.fragment_bytes as f64 / self.key_bytes as f64
    }
}

impl<V> TrieStatsTrait for Trie<V> {
    fn get_trie_stats(&self) -> TrieStats {
        let mut stats = TrieStats::default();
        self.walk(|kind, node, _index, level| {
            match kind {
                NodeKind::Leaf => stats.num_leaves += 1,
                NodeKind::Branch => stats.num_branches += 1,
                NodeKind::None => {}
            }
            if node.has_value() {
                stats.num_values += 1;
                stats.key_bytes += node.path().len();
            }
            stats.max_depth = stats.max_depth.max(level);
            stats.fragment_bytes += node.fragment().len();
        });
        stats
    }
}

impl<V> Trie<V> {
    pub fn stats(&self) -> TrieStats {
        self.get_trie_stats()
    }
}
