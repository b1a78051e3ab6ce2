//! History Manager Tests
//!
//! Coalescing, cancellation and redo invalidation over a small document.

use domino::history::{HistoryManager, PendingEdit};
use domino::types::CardId;

#[derive(Clone, Debug, PartialEq)]
struct Doc {
    x: i32,
    label: String,
}

fn doc(x: i32) -> Doc {
    Doc {
        x,
        label: format!("doc {x}"),
    }
}

#[test]
fn test_coalesced_edit_is_one_entry() {
    let mut live = doc(0);
    let mut history = HistoryManager::new(&live);

    for step in 1..=50 {
        history.mark_dirty(PendingEdit::SelectionPosition, &live);
        live = doc(step);
    }
    assert!(history.confirm_dirty(&PendingEdit::SelectionPosition));
    assert_eq!(history.len(), 2);

    assert!(history.undo(&mut live));
    assert_eq!(live, doc(0));
    assert!(!history.can_undo());
}

#[test]
fn test_cancel_restores_length_and_index() {
    let mut live = doc(0);
    let mut history = HistoryManager::new(&live);
    for step in 1..=3 {
        history.make_checkpoint(&live);
        live = doc(step);
    }
    let before = (history.len(), history.index());

    history.mark_dirty(PendingEdit::CardSize(CardId::from("a")), &live);
    assert!(history.cancel_dirty(&PendingEdit::CardSize(CardId::from("a"))));
    assert_eq!((history.len(), history.index()), before);
    assert_eq!(live, doc(3));
}

#[test]
fn test_new_edit_after_undo_discards_redo_branch() {
    let mut live = doc(0);
    let mut history = HistoryManager::new(&live);
    history.make_checkpoint(&live);
    live = doc(1);
    history.make_checkpoint(&live);
    live = doc(2);

    history.undo(&mut live);
    history.undo(&mut live);
    assert!(history.can_redo());

    history.make_checkpoint(&live);
    live = doc(10);
    assert!(!history.can_redo());

    history.undo(&mut live);
    assert_eq!(live, doc(0));
    // The branch through doc(1)/doc(2) is gone for good.
    assert!(history.redo(&mut live));
    assert_eq!(live, doc(10));
    assert!(!history.can_redo());
}

#[test]
fn test_bounds_are_noops() {
    let mut live = doc(0);
    let mut history = HistoryManager::new(&live);
    assert!(!history.undo(&mut live));
    assert!(!history.redo(&mut live));
    assert_eq!(live, doc(0));
}

#[test]
fn test_variant_payload_must_match() {
    let mut history = HistoryManager::new(&doc(0));
    history.mark_dirty(PendingEdit::CardContent(CardId::from("a")), &doc(0));
    assert!(!history.confirm_dirty(&PendingEdit::CardContent(CardId::from("b"))));
    assert!(!history.confirm_dirty(&PendingEdit::CardSize(CardId::from("a"))));
    assert!(history.confirm_dirty(&PendingEdit::CardContent(CardId::from("a"))));
}
