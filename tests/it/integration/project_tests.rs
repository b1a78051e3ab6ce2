//! Project Management Tests
//!
//! Save, load, duplicate and delete through the session against a
//! file-backed store.

use crate::helpers::*;
use domino::storage::{FileProjectStore, StoreError};

fn store() -> (tempfile::TempDir, FileProjectStore) {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileProjectStore::new(dir.path());
    (dir, store)
}

#[test]
fn test_save_then_load_restores_document() {
    let (_dir, store) = store();
    let mut session = TestProjectBuilder::new()
        .with_title("Roadmap")
        .with_card("a", (0.0, 0.0))
        .with_card("b", (512.0, 0.0))
        .with_link("l", "a", "b")
        .session();
    drag(&mut session, (10.0, 10.0), (138.0, 10.0));
    let saved = session.save(&store).expect("save");
    let id = session.project().details.id.clone();
    assert_eq!(saved.id, id);

    session.new_project();
    assert_card_count(&session, 0);
    assert_ne!(session.project().details.id, id);

    session.load(&store, &id).expect("load");
    assert_eq!(session.project().details.title, "Roadmap");
    assert_card_at(&session, "a", 128.0, 0.0);
    assert_eq!(session.project().links.len(), 1);
    // A load starts a fresh history.
    assert!(!session.can_undo());
}

#[test]
fn test_saving_leaves_history_alone() {
    let (_dir, store) = store();
    let mut session = single_card_session();
    drag(&mut session, (10.0, 10.0), (138.0, 10.0));

    session.save(&store).expect("save");
    assert!(session.can_undo());
    assert!(session.undo());
    assert_card_at(&session, "a", 0.0, 0.0);
}

#[test]
fn test_duplicate_and_list() {
    let (_dir, store) = store();
    let session = TestProjectBuilder::new()
        .with_title("Notes")
        .with_card("a", (0.0, 0.0))
        .session();
    let original = session.save(&store).expect("save");

    let copy = session.duplicate(&store, &original.id).expect("duplicate");
    assert_ne!(copy.id, original.id);
    assert_eq!(copy.title, "Notes (copy)");

    let saves = session.list_saves(&store).expect("list");
    assert_eq!(saves.len(), 2);
    assert!(saves.windows(2).all(|pair| pair[0].date >= pair[1].date));

    assert!(session.delete(&store, &original.id).expect("delete"));
    let saves = session.list_saves(&store).expect("list");
    assert_eq!(saves.len(), 1);
    assert_eq!(saves[0].id, copy.id);
}

#[test]
fn test_loading_missing_save_keeps_document() {
    let (_dir, store) = store();
    let mut session = single_card_session();

    let err = session.load(&store, "missing").expect_err("not found");
    assert!(matches!(err, StoreError::NotFound(_)));
    assert_card_count(&session, 1);
}

#[test]
fn test_export_import_gets_fresh_id() {
    let mut session = TestProjectBuilder::new()
        .with_title("Shared")
        .with_card("a", (0.0, 0.0))
        .with_card("b", (256.0, 160.0))
        .session();
    let json = session.export_json().expect("export");
    let source_id = session.project().details.id.clone();

    session.new_project();
    session.import_json(&json).expect("import");
    assert_eq!(session.project().details.title, "Shared");
    assert_card_count(&session, 2);
    assert_ne!(session.project().details.id, source_id);

    assert!(session.import_json("not json").is_err());
    assert_card_count(&session, 2);
}
