#![no_main]

use std::collections::BTreeMap;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use trie_store::{NodeKind, Trie};

#[derive(Arbitrary, Debug)]
enum MapMethod {
    Get { key: Vec<u8> },
    Insert { key: Vec<u8>, val: usize },
    Update { key: Vec<u8>, val: usize },
    Delete { key: Vec<u8> },
    DeleteSubtree { key: Vec<u8> },
}

/// Map fuzzer bytes onto a tiny alphabet so that keys share prefixes and segments.
fn to_key(bytes: &[u8]) -> String {
    bytes
        .iter()
        .take(12)
        .map(|b| match b % 4 {
            0 => 'a',
            1 => 'b',
            2 => 'é',
            _ => '.',
        })
        .collect()
}

fuzz_target!(|methods: Vec<MapMethod>| {
    let mut trie = Trie::<usize>::new();
    let mut bt_map = BTreeMap::<String, usize>::new();

    for m in &methods {
        match m {
            MapMethod::Get { key } => {
                let key = to_key(key);
                assert_eq!(trie.find(&key), bt_map.get(&key));
            }
            MapMethod::Insert { key, val } => {
                let key = to_key(key);
                if key.is_empty() {
                    assert!(trie.insert(&key, *val).is_err());
                    continue;
                }
                let bt_insert = bt_map.insert(key.clone(), *val);
                let t_insert = trie.insert(&key, *val);
                eprintln!("Insert: {:?} {:?} {:?}", key, val, t_insert);
                assert_eq!(t_insert, Ok(bt_insert));
            }
            MapMethod::Update { key, val } => {
                let key = to_key(key);
                // Only exact keys: the delimiter rule may resolve a key to a branch.
                if let Some(old_bt) = bt_map.get_mut(&key) {
                    let old_t = trie.update(&key, *val);
                    assert_eq!(old_t, Ok(Some(*old_bt)));
                    *old_bt = *val;
                }
                assert_eq!(trie.find(&key), bt_map.get(&key));
            }
            MapMethod::Delete { key } => {
                let key = to_key(key);
                let extended = bt_map
                    .keys()
                    .any(|k| k.len() > key.len() && k.starts_with(key.as_str()));
                if bt_map.contains_key(&key) && !extended {
                    let removed = trie.remove(&key, false);
                    eprintln!("Delete: {:?} {:?}", key, removed);
                    assert_eq!(removed, Ok(bt_map.remove(&key)));
                }
            }
            MapMethod::DeleteSubtree { key } => {
                let key = to_key(key);
                let found = trie.fast_find(&key);
                if let (true, Some(id)) = (found.is_exact(), found.node) {
                    let removed = trie.remove_node(id, true);
                    eprintln!("DeleteSubtree: {:?} {:?}", key, removed);
                    assert_eq!(removed, Ok(bt_map.remove(&key)));
                    bt_map.retain(|k, _| !k.starts_with(key.as_str()));
                }
            }
        }
        assert_eq!(trie.len(), bt_map.len());
    }

    let mut leaves = 0;
    trie.walk(|kind, _, _, _| {
        if kind == NodeKind::Leaf {
            leaves += 1;
        }
    });
    assert_eq!(trie.size(), leaves);

    for (k, expected_value) in bt_map.iter() {
        let result = trie.find(k);
        assert_eq!(
            result,
            Some(expected_value),
            "Expected value for key {:?}: {:?} != {:?}",
            k,
            result,
            expected_value
        );
    }
    assert_eq!(trie.iter().count(), bt_map.len());
});
