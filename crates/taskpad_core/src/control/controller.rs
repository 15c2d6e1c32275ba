//! Event dispatch over the task store.
//!
//! # Responsibility
//! - Translate (event kind, origin role) pairs into store operations.
//! - Drive the edit-session state machine and the status line.
//!
//! # Invariants
//! - Every redraw resets all tasks to display mode; the edit session only
//!   survives a dispatch that explicitly stays editing.
//! - A rejected edit commit keeps the session editing and shows a message.
//! - Unknown ids are silent no-ops, mirroring the store contract.

use crate::control::status::{StatusKind, StatusLine, StatusMessage, StatusToken};
use crate::model::task::{Filter, TaskId};
use crate::slot::task_slot::TaskSlot;
use crate::store::task_store::{ClearOutcome, SaveStatus, TaskStore};
use crate::view::render::{render, TaskListView};
use log::debug;
use std::time::Instant;

const MSG_BLANK_ADD: &str = "Please enter a non-empty task.";
const MSG_BLANK_EDIT: &str = "Task cannot be empty.";
const MSG_SAVE_FAILED: &str = "Unable to save tasks (storage full or blocked).";
const MSG_NOTHING_TO_CLEAR: &str = "No completed tasks to clear.";

/// Per-row action distinguished by the origin element of a click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAction {
    Delete,
    Edit,
    Save { text: String },
    Cancel,
}

/// Key press inside the inline edit input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    Enter,
    Escape,
}

/// Host input event, named by kind and origin role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// New-task form submission.
    SubmitNew { text: String },
    /// Checkbox change on a task row.
    ToggleChanged { id: TaskId, checked: bool },
    /// Click delegated to a row control.
    RowAction { id: TaskId, action: RowAction },
    /// Key press inside a row's edit input, carrying the typed text.
    EditKey {
        id: TaskId,
        key: EditKey,
        text: String,
    },
    /// Filter selector click.
    FilterSelected(Filter),
    /// Clear-completed button.
    ClearCompleted,
}

/// What the host should do after a dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dispatch {
    /// Redraw the list from `Controller::view`.
    pub redraw: bool,
    /// Clear the new-task input field.
    pub clear_input: bool,
    /// Token for the status timer to pass back after `STATUS_TTL`, when a
    /// message was set.
    pub status_token: Option<StatusToken>,
}

/// Single authoritative owner of application state.
///
/// Holds the store, the active filter, the edit session, and the status
/// line, so renderer and host stay stateless projections.
pub struct Controller<S: TaskSlot> {
    store: TaskStore<S>,
    filter: Filter,
    editing: Option<TaskId>,
    status: StatusLine,
}

impl<S: TaskSlot> Controller<S> {
    /// Opens the controller over a freshly loaded store, filter `all`.
    pub fn open(slot: S) -> Self {
        Self {
            store: TaskStore::open(slot),
            filter: Filter::All,
            editing: None,
            status: StatusLine::new(),
        }
    }

    /// Dispatches one host event to completion.
    pub fn dispatch(&mut self, event: UiEvent, now: Instant) -> Dispatch {
        debug!("event=ui_dispatch module=control input={event:?}");
        match event {
            UiEvent::SubmitNew { text } => self.on_submit_new(&text, now),
            UiEvent::ToggleChanged { id, checked } => self.on_toggle(id, checked, now),
            UiEvent::RowAction { id, action } => match action {
                RowAction::Delete => self.on_delete(id, now),
                RowAction::Edit => self.on_enter_edit(id),
                RowAction::Save { text } => self.on_commit_edit(id, &text, now),
                RowAction::Cancel => self.on_abort_edit(),
            },
            UiEvent::EditKey { id, key, text } => match key {
                EditKey::Enter => self.on_commit_edit(id, &text, now),
                EditKey::Escape => self.on_abort_edit(),
            },
            UiEvent::FilterSelected(filter) => self.on_filter(filter),
            UiEvent::ClearCompleted => self.on_clear_completed(now),
        }
    }

    /// Renders the current state; a full redraw from this view implicitly
    /// returns every task to display mode except the active edit session.
    pub fn view(&self) -> TaskListView {
        render(self.store.tasks(), self.filter, self.editing)
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    /// Task currently in inline-edit mode, if any.
    pub fn editing(&self) -> Option<TaskId> {
        self.editing
    }

    /// Visible status message, honoring the auto-clear deadline.
    pub fn status(&self, now: Instant) -> Option<&StatusMessage> {
        self.status.current(now)
    }

    /// Clears the status line if `token` is still the latest message.
    pub fn expire_status(&mut self, token: StatusToken) -> bool {
        self.status.clear_if_current(token)
    }

    pub fn store(&self) -> &TaskStore<S> {
        &self.store
    }

    fn on_submit_new(&mut self, text: &str, now: Instant) -> Dispatch {
        match self.store.add(text) {
            Err(_) => self.reject(MSG_BLANK_ADD, now),
            Ok((_, status)) => {
                let mut out = self.redraw();
                out.clear_input = true;
                out.status_token = self.warn_if_failed(status, now);
                out
            }
        }
    }

    fn on_toggle(&mut self, id: TaskId, checked: bool, now: Instant) -> Dispatch {
        match self.store.toggle(id, checked) {
            None => Dispatch::default(),
            Some(status) => {
                let mut out = self.redraw();
                out.status_token = self.warn_if_failed(status, now);
                out
            }
        }
    }

    fn on_delete(&mut self, id: TaskId, now: Instant) -> Dispatch {
        match self.store.delete(id) {
            None => Dispatch::default(),
            Some(status) => {
                let mut out = self.redraw();
                out.status_token = self.warn_if_failed(status, now);
                out
            }
        }
    }

    fn on_enter_edit(&mut self, id: TaskId) -> Dispatch {
        if !self.store.tasks().iter().any(|task| task.id == id) {
            return Dispatch::default();
        }
        // Entering edit on one task returns every other task to display.
        self.editing = Some(id);
        Dispatch {
            redraw: true,
            ..Dispatch::default()
        }
    }

    fn on_commit_edit(&mut self, id: TaskId, text: &str, now: Instant) -> Dispatch {
        match self.store.edit(id, text) {
            // Stays editing so the user can fix the blank input.
            Err(_) => self.reject(MSG_BLANK_EDIT, now),
            Ok(None) => self.redraw(),
            Ok(Some(status)) => {
                let mut out = self.redraw();
                out.status_token = self.warn_if_failed(status, now);
                out
            }
        }
    }

    fn on_abort_edit(&mut self) -> Dispatch {
        // Typed changes are discarded by redrawing from the store.
        self.redraw()
    }

    fn on_filter(&mut self, filter: Filter) -> Dispatch {
        self.filter = filter;
        self.redraw()
    }

    fn on_clear_completed(&mut self, now: Instant) -> Dispatch {
        match self.store.clear_completed() {
            ClearOutcome::NothingToClear => Dispatch {
                redraw: false,
                clear_input: false,
                status_token: Some(self.status.set(MSG_NOTHING_TO_CLEAR, StatusKind::Info, now)),
            },
            ClearOutcome::Cleared { status, .. } => {
                let mut out = self.redraw();
                out.status_token = self.warn_if_failed(status, now);
                out
            }
        }
    }

    fn redraw(&mut self) -> Dispatch {
        self.editing = None;
        Dispatch {
            redraw: true,
            ..Dispatch::default()
        }
    }

    fn reject(&mut self, message: &str, now: Instant) -> Dispatch {
        Dispatch {
            redraw: false,
            clear_input: false,
            status_token: Some(self.status.set(message, StatusKind::Error, now)),
        }
    }

    fn warn_if_failed(&mut self, status: SaveStatus, now: Instant) -> Option<StatusToken> {
        match status {
            SaveStatus::Saved => None,
            SaveStatus::WriteFailed => {
                Some(self.status.set(MSG_SAVE_FAILED, StatusKind::Error, now))
            }
        }
    }
}
