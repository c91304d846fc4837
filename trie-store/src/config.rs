//! Construction-time configuration of a [`Trie`](crate::Trie).

/// Which optional per-leaf metadata slots a trie carries.
///
/// Slots that are not enabled behave as no-ops: writes are dropped and reads yield `None`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MetadataSlots {
    pub description: bool,
    pub comment: bool,
    pub tag: bool,
}

impl MetadataSlots {
    /// No metadata slots.
    pub const NONE: MetadataSlots = MetadataSlots {
        description: false,
        comment: false,
        tag: false,
    };

    /// Every metadata slot.
    pub const ALL: MetadataSlots = MetadataSlots {
        description: true,
        comment: true,
        tag: true,
    };

    pub fn with_description(mut self) -> Self {
        self.description = true;
        self
    }

    pub fn with_comment(mut self) -> Self {
        self.comment = true;
        self
    }

    pub fn with_tag(mut self) -> Self {
        self.tag = true;
        self
    }
}

/// Configuration for a [`Trie`](crate::Trie). Fixed once the trie is built.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// Separator of key segments, used by the store-level lookups.
    pub delimiter: char,
    /// Optional per-leaf metadata.
    pub metadata: MetadataSlots,
    /// Width of the fragment column when dumping the tree.
    pub dump_left_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delimiter: '.',
            metadata: MetadataSlots::NONE,
            dump_left_width: 32,
        }
    }
}

impl Config {
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn metadata(mut self, metadata: MetadataSlots) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn dump_left_width(mut self, width: usize) -> Self {
        self.dump_left_width = width;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, MetadataSlots};

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.delimiter, '.');
        assert_eq!(config.metadata, MetadataSlots::NONE);
        assert_eq!(config.dump_left_width, 32);
    }

    #[test]
    fn test_builder() {
        let config = Config::default()
            .delimiter('/')
            .metadata(MetadataSlots::default().with_description().with_tag())
            .dump_left_width(20);
        assert_eq!(config.delimiter, '/');
        assert!(config.metadata.description);
        assert!(!config.metadata.comment);
        assert!(config.metadata.tag);
        assert_eq!(config.dump_left_width, 20);
    }
}
