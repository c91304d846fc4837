//! Error types for trie operations.

use thiserror::Error;

use crate::arena::NodeId;

/// Result type for trie operations.
pub type TrieResult<T> = Result<T, TrieError>;

/// Errors reported by mutating operations and by node handle resolution.
///
/// Lookups never fail; they describe how far a key matched instead. These variants are what a
/// caller sees when it asks for an operation that needs a resolved node.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum TrieError {
    /// The empty key addresses the root, which cannot hold a value.
    #[error("empty key")]
    EmptyKey,

    /// The key does not resolve to any node.
    #[error("key not found: {key:?}")]
    NotFound {
        /// The key that was looked up.
        key: String,
    },

    /// The key only matches part of a stored fragment.
    #[error("key {key:?} only partially matches a stored key ({matched} bytes into a fragment)")]
    PartialOnly {
        /// The key that was looked up.
        key: String,
        /// How many bytes of the deepest fragment matched.
        matched: usize,
    },

    /// Removal of a node that still has descendants was requested without `include_children`.
    #[error("{key:?} is a branch with children")]
    BranchHasChildren {
        /// The key of the branch.
        key: String,
    },

    /// The node has no parent to be unlinked from.
    #[error("{key:?} has no parent node")]
    OrphanNode {
        /// The key of the node.
        key: String,
    },

    /// A node handle refers to a node that has been removed.
    #[error("node handle {id} no longer refers to a live node")]
    WeakRefExpired {
        /// The stale handle.
        id: NodeId,
    },
}

impl TrieError {
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    pub fn branch_has_children(key: impl Into<String>) -> Self {
        Self::BranchHasChildren { key: key.into() }
    }

    pub fn orphan(key: impl Into<String>) -> Self {
        Self::OrphanNode { key: key.into() }
    }
}
