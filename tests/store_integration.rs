use std::sync::Arc;
use std::thread;

use auxconfig::{
    codec, AuxConfigStore, DirProjectRoot, Fragment, ProjectRoot, Tier, SHARED_CONFIG_FILENAME,
};

fn open_store(dir: &tempfile::TempDir) -> AuxConfigStore {
    let root = DirProjectRoot::new(dir.path())
        .with_attribute_file(dir.path().join("private-attrs.json"));
    AuxConfigStore::new(Arc::new(root))
}

fn shared_doc_keys(dir: &tempfile::TempDir) -> Vec<(String, String)> {
    let bytes = std::fs::read(dir.path().join(SHARED_CONFIG_FILENAME)).unwrap();
    let document = codec::parse(&bytes, "test").unwrap();
    document
        .child_elements()
        .map(|child| (child.local_name.clone(), child.namespace.clone()))
        .collect()
}

#[test]
fn test_shared_round_trip_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir);

    let fragment = Fragment::new("target", "urn:x")
        .with_attribute("flavor", "debug")
        .with_text("API-30");
    store.put_fragment(&fragment, Tier::Shared).unwrap();

    assert!(dir.path().join(SHARED_CONFIG_FILENAME).exists());
    assert_eq!(
        store.get_fragment("target", "urn:x", Tier::Shared).unwrap(),
        fragment
    );

    // A second store over the same directory sees the same data.
    let reopened = open_store(&dir);
    assert_eq!(
        reopened.get_fragment("target", "urn:x", Tier::Shared).unwrap(),
        fragment
    );
}

#[test]
fn test_private_round_trip_leaves_project_tree_clean() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir);

    let fragment = Fragment::new("sdk-path", "urn:x").with_text("/opt/sdk");
    store.put_fragment(&fragment, Tier::Private).unwrap();

    assert_eq!(
        store.get_fragment("sdk-path", "urn:x", Tier::Private).unwrap(),
        fragment
    );
    // Private data must not land in the shared document.
    assert!(!dir.path().join(SHARED_CONFIG_FILENAME).exists());
    assert!(store.get_fragment("sdk-path", "urn:x", Tier::Shared).is_none());
}

#[test]
fn test_abi_sorts_before_target_in_document() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir);

    store
        .put_fragment(&Fragment::new("target", "urn:x").with_text("API-30"), Tier::Shared)
        .unwrap();
    store
        .put_fragment(&Fragment::new("abi", "urn:x").with_text("arm64"), Tier::Shared)
        .unwrap();

    assert_eq!(
        shared_doc_keys(&dir),
        vec![("abi".into(), "urn:x".into()), ("target".into(), "urn:x".into())]
    );
    assert_eq!(
        store.get_fragment("abi", "urn:x", Tier::Shared).unwrap().text(),
        "arm64"
    );
    assert_eq!(
        store.get_fragment("target", "urn:x", Tier::Shared).unwrap().text(),
        "API-30"
    );
}

#[test]
fn test_written_document_has_no_declaration() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir);
    store
        .put_fragment(&Fragment::new("target", "urn:x"), Tier::Shared)
        .unwrap();

    let content = std::fs::read_to_string(dir.path().join(SHARED_CONFIG_FILENAME)).unwrap();
    assert!(!content.contains("<?xml"));
    assert!(content.starts_with("<auxiliary-configuration"));
}

#[test]
fn test_removing_last_shared_fragment_deletes_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir);

    store
        .put_fragment(&Fragment::new("target", "urn:x"), Tier::Shared)
        .unwrap();
    assert!(store.remove_fragment("target", "urn:x", Tier::Shared));

    assert!(!dir.path().join(SHARED_CONFIG_FILENAME).exists());
    assert!(store.get_fragment("target", "urn:x", Tier::Shared).is_none());
    assert!(!store.remove_fragment("target", "urn:x", Tier::Shared));
}

#[test]
fn test_corrupt_document_reads_absent_but_blocks_writes() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir);
    store
        .put_fragment(&Fragment::new("target", "urn:x").with_text("API-30"), Tier::Shared)
        .unwrap();

    // An external editor mangles the file.
    std::fs::write(dir.path().join(SHARED_CONFIG_FILENAME), b"<broken").unwrap();

    assert!(store.get_fragment("target", "urn:x", Tier::Shared).is_none());

    let err = store
        .put_fragment(&Fragment::new("abi", "urn:x"), Tier::Shared)
        .unwrap_err();
    assert!(matches!(err, auxconfig::AuxConfigError::MalformedDocument { .. }));
    // The aborted write must not have touched the file.
    assert_eq!(
        std::fs::read(dir.path().join(SHARED_CONFIG_FILENAME)).unwrap(),
        b"<broken"
    );
}

#[test]
fn test_concurrent_writers_lose_no_updates() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(open_store(&dir));
    let writers = 8;

    thread::scope(|scope| {
        for i in 0..writers {
            let store = Arc::clone(&store);
            scope.spawn(move || {
                let fragment =
                    Fragment::new(format!("entry-{i}"), "urn:x").with_text(format!("value-{i}"));
                store.put_fragment(&fragment, Tier::Shared).unwrap();
            });
        }
    });

    let keys = shared_doc_keys(&dir);
    assert_eq!(keys.len(), writers);
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted, "document children must stay in canonical order");

    for i in 0..writers {
        let fragment = store
            .get_fragment(&format!("entry-{i}"), "urn:x", Tier::Shared)
            .unwrap();
        assert_eq!(fragment.text(), format!("value-{i}"));
    }
}

#[test]
fn test_readers_run_while_store_is_busy() {
    // Readers and writers interleaving freely must never observe a torn
    // document: every read sees either no fragment or a complete one.
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(open_store(&dir));

    thread::scope(|scope| {
        let writer_store = Arc::clone(&store);
        scope.spawn(move || {
            for i in 0..20 {
                let fragment = Fragment::new("counter", "urn:x").with_text(i.to_string());
                writer_store.put_fragment(&fragment, Tier::Shared).unwrap();
            }
        });
        for _ in 0..4 {
            let reader_store = Arc::clone(&store);
            scope.spawn(move || {
                for _ in 0..20 {
                    if let Some(fragment) =
                        reader_store.get_fragment("counter", "urn:x", Tier::Shared)
                    {
                        assert!(fragment.text().parse::<u32>().is_ok());
                    }
                }
            });
        }
    });
}

#[test]
fn test_private_attribute_survives_store_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let fragment = Fragment::new("token", "urn:x").with_text("secret");

    open_store(&dir)
        .put_fragment(&fragment, Tier::Private)
        .unwrap();

    let reopened = open_store(&dir);
    assert_eq!(
        reopened.get_fragment("token", "urn:x", Tier::Private).unwrap(),
        fragment
    );
    assert!(reopened.remove_fragment("token", "urn:x", Tier::Private));
    assert!(reopened.get_fragment("token", "urn:x", Tier::Private).is_none());
}

#[test]
fn test_raw_project_root_view_matches_store_view() {
    // External collaborators read the document through their own tooling;
    // the bytes the store writes must parse as a plain namespaced document.
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir);
    store
        .put_fragment(
            &Fragment::new("target", "urn:x").with_child(Fragment::new("api", "urn:x").with_text("30")),
            Tier::Shared,
        )
        .unwrap();

    let root = DirProjectRoot::new(dir.path());
    let bytes = root.read_file(SHARED_CONFIG_FILENAME).unwrap().unwrap();
    let document = codec::parse(&bytes, "external").unwrap();
    let target = document.find_child("target", "urn:x").unwrap();
    assert_eq!(target.find_child("api", "urn:x").unwrap().text(), "30");
}
