//! Core domain logic for taskpad, a durable local task list.
//! This crate is the single source of truth for task invariants.

pub mod control;
pub mod db;
pub mod logging;
pub mod model;
pub mod slot;
pub mod store;
pub mod view;

pub use control::controller::{Controller, Dispatch, EditKey, RowAction, UiEvent};
pub use control::status::{StatusKind, StatusLine, StatusMessage, StatusToken, STATUS_TTL};
pub use logging::{default_log_level, init_logging};
pub use model::task::{Filter, Task, TaskId, TaskValidationError};
pub use slot::task_slot::{SlotError, SlotResult, SqliteTaskSlot, TaskSlot, SLOT_KEY};
pub use store::task_store::{ClearOutcome, SaveStatus, TaskStore};
pub use view::render::{count_label, escape_markup, render, TaskListView, ViewEntry};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
