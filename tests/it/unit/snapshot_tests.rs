//! Snapshot tests using the insta crate.
//!
//! These pin the persisted document format: saves written by one version
//! must stay readable by the next. To update after an intentional format
//! change:
//! ```sh
//! cargo insta test --accept
//! ```

use domino::geometry::Vec2;
use domino::storage::SaveMetadata;
use domino::types::{Card, CardIcon, Group, Link, ProjectDetails};

#[test]
fn snapshot_link() {
    let link = Link {
        id: "l1".into(),
        card_a: "a".into(),
        card_b: "b".into(),
        color: Some("red".into()),
    };
    insta::assert_json_snapshot!(link, @r#"
    {
      "id": "l1",
      "cardA": "a",
      "cardB": "b",
      "color": "red"
    }
    "#);
}

#[test]
fn snapshot_group() {
    let group = Group {
        id: "g1".into(),
        cards: vec!["a".into(), "b".into()],
        color: "rgb(10 20 30)".into(),
    };
    insta::assert_json_snapshot!(group, @r#"
    {
      "id": "g1",
      "cards": [
        "a",
        "b"
      ],
      "color": "rgb(10 20 30)"
    }
    "#);
}

#[test]
fn snapshot_save_metadata() {
    let meta = SaveMetadata {
        id: "p1".into(),
        title: "Board".into(),
        date: 1_700_000_000_000,
    };
    insta::assert_json_snapshot!(meta, @r#"
    {
      "id": "p1",
      "title": "Board",
      "date": 1700000000000
    }
    "#);
}

#[test]
fn snapshot_project_details() {
    let details = ProjectDetails {
        id: "p1".into(),
        title: "new project".into(),
        name: "project".into(),
        focus: String::new(),
    };
    insta::assert_json_snapshot!(details, @r#"
    {
      "id": "p1",
      "title": "new project",
      "name": "project",
      "focus": ""
    }
    "#);
}

#[test]
fn snapshot_card() {
    let mut card = Card::new(Vec2::new(256.0, 80.0), "hello")
        .with_id("c1")
        .with_size(3, 2);
    card.icons.push(CardIcon {
        icon: "★".into(),
        action: "open".into(),
    });
    let json = serde_json::to_string_pretty(&card).expect("serialize");
    insta::assert_snapshot!(json, @r#"
    {
      "id": "c1",
      "position": {
        "x": 256.0,
        "y": 80.0
      },
      "size": {
        "x": 3,
        "y": 2
      },
      "text": "hello",
      "icons": [
        {
          "icon": "★",
          "action": "open"
        }
      ]
    }
    "#);
}

#[test]
fn test_old_saves_without_optional_fields_load() {
    let json = r#"{
        "details": { "id": "p", "title": "t", "name": "n" },
        "cards": [{ "id": "a", "position": { "x": 0, "y": 0 }, "size": { "x": 2, "y": 2 }, "text": "" }]
    }"#;
    let project: domino::Project = serde_json::from_str(json).expect("parse");
    assert_eq!(project.cards.len(), 1);
    assert!(project.cards[0].icons.is_empty());
    assert!(project.card_styles.is_empty());
    assert_eq!(project.details.focus, "");
}
