//! Human-readable rendering of a trie.
//!
//! ```text
//! <root>
//!   app.                           -> [B]
//!     d                            -> [B]
//!       ebug                       -> [L] (app.debug) true
//!       ump                        -> [L] (app.dump) 3
//!     verbose                      -> [L] (app.verbose) true
//! ```
//!
//! One line per node holding a value or children: the fragment indented by two spaces per
//! level and padded to [`Config::dump_left_width`](crate::Config::dump_left_width), then the
//! kind marker, then for nodes with a value the full key and the value.

use std::fmt;

use crate::node::{Node, NodeKind};
use crate::tree::Trie;

impl<V: fmt::Display> Trie<V> {
    /// Render the trie into `out`.
    pub fn dump<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        let width = self.config.dump_left_width;
        let mut result = out.write_str("<root>\n");
        self.walk(|kind, node, _index, level| {
            // The root has no fragment of its own; its children start at level 1.
            if result.is_err() || node.fragment().is_empty() {
                return;
            }
            result = write_line(out, kind, node, level, width);
        });
        result?;
        out.write_str("\n")
    }
}

fn write_line<V: fmt::Display, W: fmt::Write>(
    out: &mut W,
    kind: NodeKind,
    node: &Node<V>,
    level: usize,
    width: usize,
) -> fmt::Result {
    let indent = level * 2;
    write!(
        out,
        "{:indent$}{:<pad$} -> [{kind}]",
        "",
        node.fragment(),
        pad = width.saturating_sub(indent),
    )?;
    if let Some(value) = node.value() {
        write!(out, " ({}) {value}", node.path())?;
    }
    out.write_str("\n")
}

impl<V: fmt::Display> fmt::Display for Trie<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.dump(f)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::tree::Trie;
    use crate::value::Value;

    #[test]
    fn test_dump_empty() {
        let trie = Trie::<Value>::new();
        assert_eq!(trie.to_string(), "<root>\n\n");
    }

    #[test]
    fn test_dump_layout() {
        let mut trie = Trie::new();
        trie.insert("herz", Value::from(1)).unwrap();
        trie.insert("hers", Value::from("s")).unwrap();

        let mut out = String::new();
        trie.dump(&mut out).unwrap();
        let expected = format!(
            "<root>\n  {:<30} -> [B]\n    {:<28} -> [L] (herz) 1\n    {:<28} -> [L] (hers) \"s\"\n\n",
            "her", "z", "s"
        );
        assert_eq!(out, expected);
        assert_eq!(trie.to_string(), expected);
    }

    #[test]
    fn test_dump_value_bearing_branch_and_width() {
        let mut trie = Trie::with_config(Config::default().dump_left_width(6));
        trie.insert("a.b", 1).unwrap();
        trie.insert("a", 2).unwrap();
        assert_eq!(
            trie.to_string(),
            "<root>\n  a    -> [B] (a) 2\n    .b -> [L] (a.b) 1\n\n"
        );
    }
}
