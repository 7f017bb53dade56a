//! End-to-end persistence: everything visible in the UI must survive a
//! full close-and-reopen of the database file.

use fiveam::core::action::{Action, Relationship, update};
use fiveam::core::state::{App, Pane, SETTING_SHOW_DONE_ITEMS};
use fiveam::store::{Status, Store};

fn open_app(path: &std::path::Path) -> App {
    App::new(Store::open(path).unwrap(), 14).unwrap()
}

#[test]
fn test_state_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("5am.db");

    {
        let mut app = open_app(&db_path);
        update(&mut app, Action::Submit("write report".into()));
        update(
            &mut app,
            Action::BeginRelated {
                pane: Pane::Todo,
                index: 0,
                relationship: Relationship::Child,
            },
        );
        update(&mut app, Action::Submit("gather numbers".into()));
        update(&mut app, Action::Submit("buy stamps".into()));
        update(
            &mut app,
            Action::SetPriority {
                index: 2,
                priority: Some(3),
            },
        );
        update(
            &mut app,
            Action::Flip {
                pane: Pane::Todo,
                index: 2,
            },
        );
        update(&mut app, Action::SetShowDoneItems(false));
    }

    let app = open_app(&db_path);

    let texts: Vec<&str> = app
        .todo_items
        .iter()
        .map(|i| i.record.text.as_str())
        .collect();
    assert_eq!(texts, vec!["write report", "gather numbers"]);
    assert_eq!(app.todo_items[1].depth, 1);
    assert_eq!(
        app.todo_items[1].record.parent_id,
        Some(app.todo_items[0].record.id)
    );

    assert_eq!(app.done_items.len(), 1);
    let done = &app.done_items[0].record;
    assert_eq!(done.text, "buy stamps");
    assert_eq!(done.status, Status::Done);
    assert_eq!(done.priority, Some(3));
    assert!(done.completed_timestamp.is_some());

    assert!(!app.show_done_items);
    assert!(
        !app.store
            .get_bool_setting(SETTING_SHOW_DONE_ITEMS, true)
            .unwrap()
    );
}

#[test]
fn test_focus_minutes_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("5am.db");

    {
        let mut app = open_app(&db_path);
        update(&mut app, Action::Submit("deep work".into()));
        let id = app.todo_items[0].record.id;
        update(&mut app, Action::RecordFocus { id, seconds: 300 });
    }

    let app = open_app(&db_path);
    assert_eq!(*app.dashboard.focus_minutes.last().unwrap(), 5);
}

#[test]
fn test_reopening_existing_file_does_not_duplicate_rows() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("5am.db");

    {
        let mut app = open_app(&db_path);
        update(&mut app, Action::Submit("only one".into()));
    }
    // Schema setup must be idempotent across opens.
    for _ in 0..3 {
        let app = open_app(&db_path);
        assert_eq!(app.todo_items.len(), 1);
    }
}
