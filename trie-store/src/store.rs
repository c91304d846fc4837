//! Store-level access: lookups that treat keys as delimiter-separated segments.
//!
//! A store lookup differs from the raw trie lookups in one respect. When the query stops exactly
//! one delimiter short of the end of a node's fragment, the node counts as found: with keys
//! `app.logging.file` and `app.logging.rotate` stored, `app.logging` resolves to the branch
//! `app.logging.` just as `app.logging.` does.

use tracing::{debug, trace};

use crate::arena::NodeId;
use crate::error::TrieResult;
use crate::fragment::is_delimited_extension;
use crate::tree::{LocateResult, Trie};
use crate::value::Value;

/// A trie holding [`Value`]s, the usual shape of a settings store.
pub type Store<V = Value> = Trie<V>;

impl<V> Trie<V> {
    /// [`locate`](Self::locate) with the delimiter-trailing rule applied.
    pub fn search(&self, path: &str) -> LocateResult {
        let mut located = self.locate(path);
        if let Some(id) = located.node {
            if located.matched && located.partial_matched_size > 0 {
                located.delimited = is_delimited_extension(
                    &self.nodes[id].fragment,
                    located.partial_matched_size,
                    self.config.delimiter,
                );
            }
        }
        trace!(key = path, found = located.is_found(), "search");
        located
    }

    /// Whether `path` names a node of the trie.
    ///
    /// With `partial_match`, any query that matches a nonzero part of some stored key counts.
    pub fn has(&self, path: &str, partial_match: bool) -> bool {
        let located = self.search(path);
        located.is_found() || (partial_match && located.partial_matched_size > 0)
    }

    /// The value stored under `path`.
    ///
    /// `None` if `path` does not resolve, and also when it resolves to a branch that holds no
    /// value of its own.
    pub fn get(&self, path: &str) -> Option<&V> {
        let id = self.get_node(path)?;
        self.nodes[id].value.as_ref()
    }

    /// The value stored under `path`, or `default`.
    pub fn get_or<'a>(&'a self, path: &str, default: &'a V) -> &'a V {
        self.get(path).unwrap_or(default)
    }

    /// Handle of the node `path` resolves to.
    pub fn get_node(&self, path: &str) -> Option<NodeId> {
        let located = self.search(path);
        located.resolve(path).ok()
    }

    /// Same as [`insert`](Self::insert).
    pub fn set(&mut self, path: &str, value: V) -> TrieResult<Option<V>> {
        self.insert(path, value)
    }

    /// Replace the value of an existing key. Never creates a node.
    ///
    /// # Returns
    ///
    /// - `Ok(old_value)` with whatever the node held before
    /// - `Err(TrieError::NotFound)` / `Err(TrieError::PartialOnly)` if `path` does not resolve
    pub fn update(&mut self, path: &str, value: V) -> TrieResult<Option<V>> {
        let id = self.search(path).resolve(path)?;
        debug!(key = path, "update");
        Ok(self.nodes[id].replace_value(value))
    }
}

impl Trie<Value> {
    /// Merge `value` into what `path` already holds (see [`Value::merge`]), or insert it when
    /// the key holds nothing yet.
    ///
    /// Returns the value held before.
    pub fn append(&mut self, path: &str, value: Value) -> TrieResult<Option<Value>> {
        let Some(id) = self.get_node(path) else {
            return self.insert(path, value);
        };
        let node = &mut self.nodes[id];
        let old = node.take_value();
        let merged = match &old {
            Some(current) => current.clone().merge(value),
            None => value,
        };
        debug!(key = path, kind = merged.type_name(), "append");
        node.replace_value(merged);
        Ok(old)
    }
}
