//! Build a small settings store, print it, then remove a subtree and print it again.
//!
//! Run with `RUST_LOG=trie_store=debug` to see the splits and removals as they happen.

use std::time::Duration;

use tracing_subscriber::EnvFilter;
use trie_store::{Config, MetadataSlots, Store, Trie, TrieResult, Value};

fn main() -> TrieResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    let config = Config::default().metadata(MetadataSlots::default().with_description());
    let mut store: Store = Trie::with_config(config);
    store.set("app.debug", true.into())?;
    store.set("app.verbose", true.into())?;
    store.set("app.dump", 3.into())?;
    store.set("app.logging.file", "~/.trie.log".into())?;
    store.set("app.server.start", 5.into())?;
    store.set("app.logging.rotate", 6.into())?;
    store.set("app.logging.words", vec!["a", "1", "false"].into())?;
    store.set("app.server.sites", 1.into())?;
    store.set("app.server.timeout", Duration::from_millis(1500).into())?;

    if let Some(id) = store.get_node("app.server") {
        store.node_mut(id)?.set_desc("listener settings");
    }

    print!("{store}");
    println!("size: {}, has(app.logging): {}", store.size(), store.has("app.logging", false));

    for (key, value) in store.iter_prefix("app.server") {
        println!("{key} = {value}");
    }

    store.append("app.logging.words", Value::from("more"))?;
    let removed = store.remove("app.logging", true)?;
    println!("removed app.logging (held {removed:?})");
    print!("{store}");
    println!("size: {}, stats: {:?}", store.size(), store.stats());
    Ok(())
}
