use std::fmt;

use tracing::trace;

use crate::arena::NodeId;
use crate::config::MetadataSlots;

/// Structural role of a node.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum NodeKind {
    /// Holds neither a value nor children. Only the root of an empty trie is in this state.
    #[default]
    None,
    /// Childless node holding a value.
    Leaf,
    /// Node with at least one child. May carry a value of its own.
    Branch,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::None => f.write_str(" "),
            NodeKind::Leaf => f.write_str("L"),
            NodeKind::Branch => f.write_str("B"),
        }
    }
}

/// Optional description, comment and tag attached to a node.
///
/// Which of the three slots exist is decided by the trie's [`Config`](crate::Config). A slot
/// that is not enabled ignores writes and always reads back as `None`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Metadata {
    slots: MetadataSlots,
    desc: Option<String>,
    comment: Option<String>,
    tag: Option<String>,
}

impl Metadata {
    pub(crate) fn new(slots: MetadataSlots) -> Self {
        Self {
            slots,
            ..Default::default()
        }
    }

    pub fn slots(&self) -> MetadataSlots {
        self.slots
    }

    pub fn desc(&self) -> Option<&str> {
        self.desc.as_deref()
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn set_desc(&mut self, desc: impl Into<String>) {
        if self.slots.description {
            self.desc = Some(desc.into());
        } else {
            trace!("description slot disabled, write dropped");
        }
    }

    pub fn set_comment(&mut self, comment: impl Into<String>) {
        if self.slots.comment {
            self.comment = Some(comment.into());
        } else {
            trace!("comment slot disabled, write dropped");
        }
    }

    pub fn set_tag(&mut self, tag: impl Into<String>) {
        if self.slots.tag {
            self.tag = Some(tag.into());
        } else {
            trace!("tag slot disabled, write dropped");
        }
    }
}

/// A single trie node.
///
/// `fragment` is the part of the key consumed by this node alone, `path` is the whole key from
/// the root down to and including this node. Children are kept in insertion order and their
/// fragments never share a first character.
#[derive(Clone, Debug)]
pub struct Node<V> {
    pub(crate) kind: NodeKind,
    pub(crate) path: String,
    pub(crate) fragment: String,
    pub(crate) value: Option<V>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) meta: Metadata,
}

impl<V> Node<V> {
    pub(crate) fn new_root(slots: MetadataSlots) -> Self {
        Self {
            kind: NodeKind::None,
            path: String::new(),
            fragment: String::new(),
            value: None,
            children: vec![],
            meta: Metadata::new(slots),
        }
    }

    pub(crate) fn new_leaf(path: String, fragment: String, value: V, slots: MetadataSlots) -> Self {
        Self {
            kind: NodeKind::Leaf,
            path,
            fragment,
            value: Some(value),
            children: vec![],
            meta: Metadata::new(slots),
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_leaf(&self) -> bool {
        self.kind == NodeKind::Leaf
    }

    pub fn is_branch(&self) -> bool {
        self.kind == NodeKind::Branch
    }

    /// The complete key of this node.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The part of the key held by this node alone.
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    pub fn value_mut(&mut self) -> Option<&mut V> {
        self.value.as_mut()
    }

    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn children_count(&self) -> usize {
        self.children.len()
    }

    pub fn meta(&self) -> &Metadata {
        &self.meta
    }

    pub fn meta_mut(&mut self) -> &mut Metadata {
        &mut self.meta
    }

    pub fn desc(&self) -> Option<&str> {
        self.meta.desc()
    }

    pub fn set_desc(&mut self, desc: impl Into<String>) {
        self.meta.set_desc(desc)
    }

    pub fn comment(&self) -> Option<&str> {
        self.meta.comment()
    }

    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.meta.set_comment(comment)
    }

    pub fn tag(&self) -> Option<&str> {
        self.meta.tag()
    }

    pub fn set_tag(&mut self, tag: impl Into<String>) {
        self.meta.set_tag(tag)
    }

    /// Store `value`, returning what was there before.
    pub(crate) fn replace_value(&mut self, value: V) -> Option<V> {
        let old = self.value.replace(value);
        self.sync_kind();
        old
    }

    pub(crate) fn take_value(&mut self) -> Option<V> {
        let old = self.value.take();
        self.sync_kind();
        old
    }

    /// Recompute `kind` from the node's children and value.
    pub(crate) fn sync_kind(&mut self) {
        self.kind = if !self.children.is_empty() {
            NodeKind::Branch
        } else if self.value.is_some() {
            NodeKind::Leaf
        } else {
            NodeKind::None
        };
    }

    /// Cut the node at `at` bytes into its fragment. The node keeps the head of the fragment;
    /// everything it owned (the tail of the fragment, its value, metadata and children) is
    /// returned as a new node to be attached as its only child.
    pub(crate) fn split_off(&mut self, at: usize) -> Node<V> {
        debug_assert!(at > 0 && at < self.fragment.len());
        let tail_fragment = self.fragment.split_off(at);
        let tail_path = self.path.clone();
        self.path.truncate(self.path.len() - tail_fragment.len());

        let slots = self.meta.slots();
        let mut tail = Node {
            kind: NodeKind::None,
            path: tail_path,
            fragment: tail_fragment,
            value: self.value.take(),
            children: std::mem::take(&mut self.children),
            meta: std::mem::replace(&mut self.meta, Metadata::new(slots)),
        };
        tail.sync_kind();
        tail
    }
}
