//! Group Workflow Tests
//!
//! Group backings are hit-tested under the cards, select on click and drag
//! their members as one.

use crate::helpers::*;
use domino::types::{CardId, GroupId};

/// `a` and `b` in group `pair`; `a` alone in group `solo`, drawn on top.
fn grouped_session() -> domino::EditorSession {
    TestProjectBuilder::new()
        .with_card("a", (0.0, 0.0))
        .with_card("b", (256.0, 0.0))
        .with_card("c", (0.0, 320.0))
        .with_group("pair", &["a", "b"], "rgb(1 2 3)")
        .with_group("solo", &["a"], "rgb(4 5 6)")
        .session()
}

fn highlighted(session: &domino::EditorSession) -> Option<&str> {
    session.selection().highlighted_group().map(GroupId::as_str)
}

#[test]
fn test_clicking_backing_cycles_overlapping_groups() {
    let mut session = grouped_session();

    // Gap between a and b, inside both backings
    click(&mut session, (252.0, 50.0));
    assert_eq!(session.selection().groups().len(), 2);
    assert_eq!(highlighted(&session), Some("solo"));

    click(&mut session, (252.0, 50.0));
    assert_eq!(highlighted(&session), Some("pair"));
    click(&mut session, (252.0, 50.0));
    assert_eq!(highlighted(&session), Some("solo"));

    assert!(session.selection().cards().is_empty());
    assert!(!session.can_undo());
}

#[test]
fn test_click_inside_only_one_backing() {
    let mut session = grouped_session();

    // Right of a's backing, still inside pair's
    click(&mut session, (500.0, 156.0));
    assert_eq!(session.selection().groups(), &[GroupId::from("pair")]);
}

#[test]
fn test_dragging_backing_moves_members() {
    let mut session = grouped_session();

    drag(&mut session, (500.0, 156.0), (500.0, 316.0));
    assert_card_at(&session, "a", 0.0, 160.0);
    assert_card_at(&session, "b", 256.0, 160.0);
    assert_card_at(&session, "c", 0.0, 320.0);

    assert!(session.undo());
    assert_card_at(&session, "a", 0.0, 0.0);
    assert_card_at(&session, "b", 256.0, 0.0);
}

#[test]
fn test_card_click_edits_highlighted_group() {
    let mut session = grouped_session();
    click(&mut session, (500.0, 156.0));

    click(&mut session, (10.0, 330.0));
    let pair = session
        .project()
        .group(&GroupId::from("pair"))
        .expect("pair");
    assert!(pair.cards.contains(&CardId::from("c")));

    click(&mut session, (10.0, 330.0));
    let pair = session
        .project()
        .group(&GroupId::from("pair"))
        .expect("pair");
    assert!(!pair.cards.contains(&CardId::from("c")));

    assert!(session.undo());
    assert!(
        session
            .project()
            .group(&GroupId::from("pair"))
            .expect("pair")
            .cards
            .contains(&CardId::from("c"))
    );
}

#[test]
fn test_group_selection_round_trip() {
    let mut session = grouped_session();
    click(&mut session, (10.0, 330.0));

    let group = session.group_selection().expect("grouped");
    assert_eq!(session.project().groups.len(), 3);
    assert_eq!(session.selection().highlighted_group(), Some(&group));

    assert!(session.select_group_cards());
    assert_eq!(session.selection().cards(), &[CardId::from("c")]);
    assert!(session.selection().groups().is_empty());

    session.select_groups(vec![group.clone()]);
    assert_eq!(session.delete_group(), Some(group));
    assert_eq!(session.project().groups.len(), 2);
    assert!(session.selection().groups().is_empty());
}
