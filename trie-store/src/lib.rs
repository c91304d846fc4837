//! An in-memory key/value store on a radix trie.
//!
//! Keys are strings made of delimiter-separated segments (`app.logging.file`), values are
//! [`Value`]s by default, or any type with [`Trie<V>`]. Nodes hold key fragments rather than
//! single characters, so keys sharing a prefix share the nodes for it.
//!
//! ```rust
//! use trie_store::{Store, Value};
//!
//! let mut store: Store = Store::new();
//! store.set("app.debug", true.into()).unwrap();
//! store.set("app.logging.file", "~/.trie.log".into()).unwrap();
//! store.set("app.logging.rotate", 6.into()).unwrap();
//!
//! assert!(store.has("app.logging", false));
//! assert_eq!(store.get("app.logging.rotate"), Some(&Value::Int(6)));
//!
//! store.remove("app.logging", true).unwrap();
//! assert!(!store.has("app.logging.file", false));
//! assert_eq!(store.size(), 1);
//! ```

pub mod arena;
pub mod config;
pub mod dump;
pub mod error;
mod fragment;
pub mod iter;
pub mod node;
pub mod stats;
pub mod store;
pub mod tree;
pub mod value;

#[cfg(test)]
mod proptests;

pub use arena::NodeId;
pub use config::{Config, MetadataSlots};
pub use error::{TrieError, TrieResult};
pub use fragment::common_prefix;
pub use node::{Metadata, Node, NodeKind};
pub use stats::{TrieStats, TrieStatsTrait};
pub use store::Store;
pub use tree::{FindResult, LocateResult, Trie};
pub use value::Value;
