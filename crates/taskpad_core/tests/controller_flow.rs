use std::time::Instant;

use taskpad_core::db::{open_db_in_memory, DbError};
use taskpad_core::{
    Controller, EditKey, Filter, RowAction, SlotError, SlotResult, SqliteTaskSlot, StatusKind,
    Task, TaskId, TaskSlot, UiEvent, ViewEntry, STATUS_TTL,
};

fn submit(controller: &mut Controller<impl TaskSlot>, text: &str, now: Instant) {
    controller.dispatch(
        UiEvent::SubmitNew {
            text: text.to_string(),
        },
        now,
    );
}

fn visible_ids(controller: &Controller<impl TaskSlot>) -> Vec<TaskId> {
    controller
        .view()
        .entries
        .iter()
        .filter_map(|entry| match entry {
            ViewEntry::Task { id, .. } | ViewEntry::Edit { id, .. } => Some(*id),
            ViewEntry::Placeholder => None,
        })
        .collect()
}

/// Slot whose writes always fail, simulating full or blocked storage.
struct BlockedSlot;

impl TaskSlot for BlockedSlot {
    fn save(&self, _tasks: &[Task]) -> SlotResult<()> {
        Err(SlotError::Db(DbError::Sqlite(
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_FULL),
                Some("database or disk is full".to_string()),
            ),
        )))
    }

    fn load(&self) -> SlotResult<Vec<Task>> {
        Ok(Vec::new())
    }
}

#[test]
fn end_to_end_add_toggle_clear_scenario() {
    let conn = open_db_in_memory().unwrap();
    let mut controller = Controller::open(SqliteTaskSlot::new(&conn));
    let now = Instant::now();

    submit(&mut controller, "Buy milk", now);
    assert_eq!(controller.view().count_label, "1 task");

    submit(&mut controller, "Buy eggs", now);
    assert_eq!(controller.view().count_label, "2 tasks");

    let first_id = visible_ids(&controller)[0];
    controller.dispatch(
        UiEvent::ToggleChanged {
            id: first_id,
            checked: true,
        },
        now,
    );
    assert_eq!(controller.store().query(Filter::Active).len(), 1);

    controller.dispatch(UiEvent::ClearCompleted, now);
    assert_eq!(controller.view().count_label, "1 task");
    assert_eq!(controller.store().tasks()[0].text, "Buy eggs");
}

#[test]
fn successful_submit_clears_input_and_redraws() {
    let conn = open_db_in_memory().unwrap();
    let mut controller = Controller::open(SqliteTaskSlot::new(&conn));

    let outcome = controller.dispatch(
        UiEvent::SubmitNew {
            text: "write letter".to_string(),
        },
        Instant::now(),
    );

    assert!(outcome.redraw);
    assert!(outcome.clear_input);
    assert!(outcome.status_token.is_none());
}

#[test]
fn blank_submit_sets_message_and_changes_nothing() {
    let conn = open_db_in_memory().unwrap();
    let mut controller = Controller::open(SqliteTaskSlot::new(&conn));
    let now = Instant::now();

    let outcome = controller.dispatch(
        UiEvent::SubmitNew {
            text: "   ".to_string(),
        },
        now,
    );

    assert!(!outcome.redraw);
    assert!(!outcome.clear_input);
    let message = controller.status(now).unwrap();
    assert_eq!(message.kind, StatusKind::Error);
    assert_eq!(message.text, "Please enter a non-empty task.");
    assert!(controller.store().is_empty());
}

#[test]
fn entering_edit_on_second_task_resets_the_first() {
    let conn = open_db_in_memory().unwrap();
    let mut controller = Controller::open(SqliteTaskSlot::new(&conn));
    let now = Instant::now();

    submit(&mut controller, "task a", now);
    submit(&mut controller, "task b", now);
    let ids = visible_ids(&controller);

    controller.dispatch(
        UiEvent::RowAction {
            id: ids[0],
            action: RowAction::Edit,
        },
        now,
    );
    assert_eq!(controller.editing(), Some(ids[0]));

    controller.dispatch(
        UiEvent::RowAction {
            id: ids[1],
            action: RowAction::Edit,
        },
        now,
    );
    assert_eq!(controller.editing(), Some(ids[1]));

    let edit_entries = controller
        .view()
        .entries
        .iter()
        .filter(|entry| matches!(entry, ViewEntry::Edit { .. }))
        .count();
    assert_eq!(edit_entries, 1);
}

#[test]
fn rejected_commit_stays_editing_with_message() {
    let conn = open_db_in_memory().unwrap();
    let mut controller = Controller::open(SqliteTaskSlot::new(&conn));
    let now = Instant::now();

    submit(&mut controller, "original", now);
    let id = visible_ids(&controller)[0];

    controller.dispatch(
        UiEvent::RowAction {
            id,
            action: RowAction::Edit,
        },
        now,
    );
    let outcome = controller.dispatch(
        UiEvent::EditKey {
            id,
            key: EditKey::Enter,
            text: "   ".to_string(),
        },
        now,
    );

    assert!(!outcome.redraw);
    assert_eq!(controller.editing(), Some(id));
    assert_eq!(controller.status(now).unwrap().text, "Task cannot be empty.");
    assert_eq!(controller.store().tasks()[0].text, "original");
}

#[test]
fn enter_commits_and_escape_aborts() {
    let conn = open_db_in_memory().unwrap();
    let mut controller = Controller::open(SqliteTaskSlot::new(&conn));
    let now = Instant::now();

    submit(&mut controller, "draft", now);
    let id = visible_ids(&controller)[0];

    controller.dispatch(
        UiEvent::RowAction {
            id,
            action: RowAction::Edit,
        },
        now,
    );
    controller.dispatch(
        UiEvent::EditKey {
            id,
            key: EditKey::Enter,
            text: "final".to_string(),
        },
        now,
    );
    assert_eq!(controller.editing(), None);
    assert_eq!(controller.store().tasks()[0].text, "final");

    controller.dispatch(
        UiEvent::RowAction {
            id,
            action: RowAction::Edit,
        },
        now,
    );
    controller.dispatch(
        UiEvent::EditKey {
            id,
            key: EditKey::Escape,
            text: "typed but discarded".to_string(),
        },
        now,
    );
    assert_eq!(controller.editing(), None);
    assert_eq!(controller.store().tasks()[0].text, "final");
}

#[test]
fn filter_selection_changes_only_the_view() {
    let conn = open_db_in_memory().unwrap();
    let mut controller = Controller::open(SqliteTaskSlot::new(&conn));
    let now = Instant::now();

    submit(&mut controller, "open", now);
    submit(&mut controller, "closed", now);
    let ids = visible_ids(&controller);
    controller.dispatch(
        UiEvent::ToggleChanged {
            id: ids[1],
            checked: true,
        },
        now,
    );

    controller.dispatch(UiEvent::FilterSelected(Filter::Active), now);
    assert_eq!(controller.filter(), Filter::Active);
    assert_eq!(visible_ids(&controller).len(), 1);
    assert_eq!(controller.store().len(), 2);
}

#[test]
fn clear_with_nothing_completed_is_informational_without_redraw() {
    let conn = open_db_in_memory().unwrap();
    let mut controller = Controller::open(SqliteTaskSlot::new(&conn));
    let now = Instant::now();

    submit(&mut controller, "still open", now);
    let outcome = controller.dispatch(UiEvent::ClearCompleted, now);

    assert!(!outcome.redraw);
    let message = controller.status(now).unwrap();
    assert_eq!(message.kind, StatusKind::Info);
    assert_eq!(message.text, "No completed tasks to clear.");
    assert_eq!(controller.store().len(), 1);
}

#[test]
fn write_failure_warns_but_keeps_memory_state() {
    let mut controller = Controller::open(BlockedSlot);
    let now = Instant::now();

    let outcome = controller.dispatch(
        UiEvent::SubmitNew {
            text: "kept in memory".to_string(),
        },
        now,
    );

    assert!(outcome.redraw);
    assert!(outcome.clear_input);
    assert_eq!(
        controller.status(now).unwrap().text,
        "Unable to save tasks (storage full or blocked)."
    );
    assert_eq!(controller.store().len(), 1);
    assert_eq!(controller.store().tasks()[0].text, "kept in memory");
}

#[test]
fn status_token_from_dispatch_expires_only_its_own_message() {
    let conn = open_db_in_memory().unwrap();
    let mut controller = Controller::open(SqliteTaskSlot::new(&conn));
    let now = Instant::now();

    let first = controller.dispatch(
        UiEvent::SubmitNew {
            text: String::new(),
        },
        now,
    );
    let second = controller.dispatch(UiEvent::ClearCompleted, now);

    // The stale timer token must not blank the newer message.
    assert!(!controller.expire_status(first.status_token.unwrap()));
    assert_eq!(
        controller.status(now).unwrap().text,
        "No completed tasks to clear."
    );

    assert!(controller.expire_status(second.status_token.unwrap()));
    assert!(controller.status(now).is_none());
}

#[test]
fn unattended_message_auto_clears_after_ttl() {
    let conn = open_db_in_memory().unwrap();
    let mut controller = Controller::open(SqliteTaskSlot::new(&conn));
    let now = Instant::now();

    controller.dispatch(
        UiEvent::SubmitNew {
            text: String::new(),
        },
        now,
    );

    assert!(controller.status(now).is_some());
    assert!(controller.status(now + STATUS_TTL).is_none());
}
