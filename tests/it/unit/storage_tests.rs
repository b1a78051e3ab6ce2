//! Project Store Tests
//!
//! File-backed saves live in a temp dir per test.

use crate::helpers::TestProjectBuilder;
use domino::storage::{FileProjectStore, ProjectStore, SaveMetadata, StoreError};

fn store() -> (tempfile::TempDir, FileProjectStore) {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileProjectStore::new(dir.path().join("saves"));
    (dir, store)
}

#[test]
fn test_file_store_round_trip() {
    let (_dir, store) = store();
    let project = TestProjectBuilder::new()
        .with_title("Alpha")
        .with_card("a", (0.0, 0.0))
        .with_card("b", (256.0, 160.0))
        .with_link("l", "a", "b")
        .build();

    let meta = store.save(&project).expect("save");
    assert_eq!(meta.title, "Alpha");

    let loaded = store.get(&project.details.id).expect("get").expect("present");
    assert_eq!(loaded, project);
    assert!(store.root().join("projects").join(format!("{}.json", meta.id)).exists());
}

#[test]
fn test_missing_key_reads_as_none() {
    let (_dir, store) = store();
    assert_eq!(store.get("nothing-here").expect("get"), None);
    assert!(store.list_all().expect("list").is_empty());
    assert!(!store.delete("nothing-here").expect("delete"));
}

#[test]
fn test_overwrite_keeps_single_listing() {
    let (_dir, store) = store();
    let mut project = TestProjectBuilder::new().with_title("First").build();
    store.save(&project).expect("save");
    project.details.title = "Renamed".into();
    store.save(&project).expect("save again");

    let saves = store.list_all().expect("list");
    assert_eq!(saves.len(), 1);
    assert_eq!(saves[0].title, "Renamed");
}

#[test]
fn test_delete_removes_project_and_metadata() {
    let (_dir, store) = store();
    let project = TestProjectBuilder::new().build();
    store.save(&project).expect("save");

    assert!(store.delete(&project.details.id).expect("delete"));
    assert_eq!(store.get(&project.details.id).expect("get"), None);
    assert!(store.list_all().expect("list").is_empty());
}

#[test]
fn test_path_like_keys_are_rejected() {
    let (_dir, store) = store();
    let project = TestProjectBuilder::new().build();
    let meta = SaveMetadata::for_project(&project);

    for key in ["../escape", "nested/key", ""] {
        let err = store.put(key, &project, &meta).expect_err("rejected");
        assert!(matches!(err, StoreError::InvalidKey(_)), "{key}");
    }
}

#[test]
fn test_corrupt_project_file_is_a_json_error() {
    let (_dir, store) = store();
    let project = TestProjectBuilder::new().build();
    store.save(&project).expect("save");

    let path = store
        .root()
        .join("projects")
        .join(format!("{}.json", project.details.id));
    std::fs::write(&path, "{ broken").expect("write");
    assert!(matches!(store.get(&project.details.id), Err(StoreError::Json(_))));
}
