use super::*;

use proptest::prelude::*;
use std::collections::BTreeMap;

/// Check the structural invariants of `t` by walking every node reachable from the root.
fn validate_trie<V>(t: &Trie<V>) {
    let root = t.root_node();
    assert_eq!(root.fragment(), "", "root must have an empty fragment");
    assert_eq!(root.path(), "", "root must have an empty path");
    assert!(!root.has_value(), "root must never hold a value");

    let mut stack: Vec<NodeId> = vec![t.root()];
    let mut reachable = 0usize;
    let mut leaves = 0usize;
    while let Some(id) = stack.pop() {
        let node = t.node(id).expect("reachable node must be live");
        reachable += 1;

        let expected_kind = if !node.children().is_empty() {
            NodeKind::Branch
        } else if node.has_value() {
            NodeKind::Leaf
        } else {
            NodeKind::None
        };
        assert_eq!(node.kind(), expected_kind, "stale kind at {:?}", node.path());
        if node.kind() == NodeKind::Leaf {
            leaves += 1;
        }
        if id != t.root() {
            assert_ne!(
                node.kind(),
                NodeKind::None,
                "empty non-root node {:?} should have been pruned",
                node.path()
            );
        }

        let children: Vec<&Node<V>> = node
            .children()
            .iter()
            .map(|child| t.node(*child).expect("child handle must be live"))
            .collect();
        for (i, child) in children.iter().enumerate() {
            assert!(!child.fragment().is_empty(), "empty fragment below {:?}", node.path());
            assert_eq!(
                child.path(),
                format!("{}{}", node.path(), child.fragment()),
                "path must be the concatenation of fragments"
            );
            for sibling in &children[i + 1..] {
                assert_eq!(
                    common_prefix(child.fragment(), sibling.fragment()),
                    0,
                    "siblings {:?} and {:?} share a prefix",
                    child.path(),
                    sibling.path()
                );
            }
        }
        stack.extend(node.children().iter().copied());
    }

    assert_eq!(reachable, t.node_count(), "every live node must be reachable");
    assert_eq!(leaves, t.size(), "size() must count leaf nodes");
}

#[derive(Clone, Debug)]
enum Op {
    Insert(String, u64),
    Remove(String),
    RemoveSubtree(String),
    Get(String),
}

fn key_strategy() -> impl Strategy<Value = String> + Clone {
    // A small alphabet without the delimiter, so that keys collide on prefixes a lot and no
    // lookup goes through the delimiter-trailing rule.
    "[abc]{1,8}"
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    let key = key_strategy();
    let op = prop_oneof![
        50 => (key.clone(), any::<u64>()).prop_map(|(k, v)| Op::Insert(k, v)),
        20 => key.clone().prop_map(Op::Remove),
        5 => key.clone().prop_map(Op::RemoveSubtree),
        25 => key.clone().prop_map(Op::Get),
    ];
    prop::collection::vec(op, 0..=500)
}

fn dotted_key_strategy() -> impl Strategy<Value = String> {
    "[ab]{1,2}(\\.[ab]{1,2}){0,3}"
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 50_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence(ops in ops_strategy()) {
        let mut t: Trie<u64> = Trie::new();
        let mut m: BTreeMap<String, u64> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(key, value) => {
                    let old_t = t.insert(&key, value);
                    let old_m = m.insert(key, value);
                    prop_assert_eq!(old_t, Ok(old_m));
                }
                Op::Remove(key) => {
                    let extended = m.keys().any(|k| k.len() > key.len() && k.starts_with(&key));
                    let removed = t.remove(&key, false);
                    match m.get(&key).copied() {
                        Some(value) if !extended => {
                            prop_assert_eq!(removed, Ok(Some(value)));
                            m.remove(&key);
                        }
                        Some(_) => {
                            prop_assert_eq!(removed, Err(TrieError::branch_has_children(key)));
                        }
                        None => prop_assert!(removed.is_err()),
                    }
                }
                Op::RemoveSubtree(key) => match t.remove(&key, true) {
                    Ok(value) => {
                        prop_assert_eq!(value, m.remove(&key));
                        m.retain(|k, _| !k.starts_with(&key));
                    }
                    Err(_) => prop_assert!(!m.contains_key(&key)),
                },
                Op::Get(key) => {
                    prop_assert_eq!(t.find(&key), m.get(&key));
                    prop_assert_eq!(t.get(&key), m.get(&key));
                }
            }

            prop_assert_eq!(t.len(), m.len());
        }

        validate_trie(&t);
        let mut got: Vec<(String, u64)> = t.iter().map(|(k, v)| (k.to_string(), *v)).collect();
        got.sort();
        let expected: Vec<(String, u64)> = m.into_iter().collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_dotted_keys(keys in prop::collection::vec(dotted_key_strategy(), 1..64)) {
        let mut t: Trie<usize> = Trie::new();
        let mut m: BTreeMap<String, usize> = BTreeMap::new();
        for (i, key) in keys.iter().enumerate() {
            t.set(key, i).unwrap();
            m.insert(key.clone(), i);
        }
        validate_trie(&t);

        for (key, value) in &m {
            prop_assert!(t.has(key, false));
            prop_assert_eq!(t.get(key), Some(value));
            for (end, _) in key.char_indices().skip(1) {
                prop_assert!(t.has(&key[..end], true), "prefix {:?} of {:?}", &key[..end], key);
            }
        }

        // Whatever `has` accepts through the delimiter rule is one delimiter short of a node.
        for key in m.keys() {
            for (end, c) in key.char_indices() {
                if c != '.' {
                    continue;
                }
                let segment = &key[..end];
                let located = t.search(segment);
                if located.delimited {
                    let node = t.node(located.node.unwrap()).unwrap();
                    prop_assert_eq!(node.path(), format!("{segment}."));
                }
            }
        }
    }
}

#[test]
fn sample_store_structure() {
    let mut t: Store = Store::new();
    t.set("app.debug", true.into()).unwrap();
    t.set("app.verbose", true.into()).unwrap();
    t.set("app.dump", 3.into()).unwrap();
    t.set("app.logging.file", "~/.trie.log".into()).unwrap();
    t.set("app.server.start", 5.into()).unwrap();
    t.set("app.logging.rotate", 6.into()).unwrap();
    t.set("app.logging.words", vec!["a", "1", "false"].into()).unwrap();
    t.set("app.server.sites", 1.into()).unwrap();
    validate_trie(&t);

    t.remove("app.logging", true).unwrap();
    validate_trie(&t);
    t.remove("app.server.s", true).unwrap();
    validate_trie(&t);
    t.remove("app.dump", false).unwrap();
    validate_trie(&t);
    assert_eq!(t.size(), 2);
}
