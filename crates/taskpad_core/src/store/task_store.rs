//! Task store operations.
//!
//! # Responsibility
//! - Provide add/toggle/edit/delete/clear/query over the ordered sequence.
//! - Write the full sequence through to the slot after each mutation.
//!
//! # Invariants
//! - Insertion order is the only ordering; no sort key exists.
//! - `id` is unique across the sequence at any instant.
//! - Unknown ids are silent no-ops and never trigger a slot write.
//! - Durability failure leaves the in-memory sequence untouched and is
//!   reported as `SaveStatus::WriteFailed`, not as a mutation error.

use crate::model::task::{validate_text, Filter, Task, TaskId, TaskValidationError};
use crate::slot::task_slot::TaskSlot;
use log::warn;
use std::time::{SystemTime, UNIX_EPOCH};

/// Durability outcome of a store mutation.
///
/// The mutation itself succeeded in memory either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveStatus {
    /// Sequence was written to the slot.
    Saved,
    /// Slot write failed; state is correct in memory but not durable.
    WriteFailed,
}

/// Outcome of `clear_completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    /// At least one completed task was removed and the sequence persisted.
    Cleared { removed: usize, status: SaveStatus },
    /// No completed task existed; informational, no slot write happened.
    NothingToClear,
}

/// Ordered task sequence with write-through persistence.
///
/// Single-threaded, single-owner; every handler mutates it to completion
/// before the next event is processed.
pub struct TaskStore<S: TaskSlot> {
    tasks: Vec<Task>,
    slot: S,
}

impl<S: TaskSlot> TaskStore<S> {
    /// Opens the store from the slot.
    ///
    /// A missing slot yields an empty sequence. A load or parse failure is
    /// logged and downgraded to an empty sequence; the session starts fresh
    /// rather than crashing on malformed persisted data.
    pub fn open(slot: S) -> Self {
        let tasks = match slot.load() {
            Ok(tasks) => tasks,
            Err(err) => {
                warn!("event=slot_load module=store status=error fallback=empty error={err}");
                Vec::new()
            }
        };
        Self { tasks, slot }
    }

    /// Appends a new task with a fresh id and `completed=false`.
    ///
    /// # Errors
    /// - `TaskValidationError::EmptyText` when `text` trims to empty; the
    ///   sequence is unchanged and nothing is persisted.
    pub fn add(&mut self, text: &str) -> Result<(TaskId, SaveStatus), TaskValidationError> {
        let trimmed = validate_text(text)?;
        let task = Task::new(trimmed, now_epoch_ms());
        let id = task.id;
        self.tasks.push(task);
        Ok((id, self.persist("add")))
    }

    /// Sets `completed` on the matching task.
    ///
    /// Returns `None` when `id` is unknown (silent no-op, no slot write).
    pub fn toggle(&mut self, id: TaskId, completed: bool) -> Option<SaveStatus> {
        let task = self.tasks.iter_mut().find(|task| task.id == id)?;
        task.completed = completed;
        Some(self.persist("toggle"))
    }

    /// Overwrites `text` on the matching task with the trimmed input.
    ///
    /// Returns `Ok(None)` when `id` is unknown (silent no-op, no slot write).
    ///
    /// # Errors
    /// - `TaskValidationError::EmptyText` when `new_text` trims to empty.
    pub fn edit(
        &mut self,
        id: TaskId,
        new_text: &str,
    ) -> Result<Option<SaveStatus>, TaskValidationError> {
        let trimmed = validate_text(new_text)?;
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            return Ok(None);
        };
        task.text = trimmed.to_string();
        Ok(Some(self.persist("edit")))
    }

    /// Removes the matching task.
    ///
    /// Returns `None` when `id` is unknown (silent no-op, no slot write).
    pub fn delete(&mut self, id: TaskId) -> Option<SaveStatus> {
        let index = self.tasks.iter().position(|task| task.id == id)?;
        self.tasks.remove(index);
        Some(self.persist("delete"))
    }

    /// Removes every completed task.
    ///
    /// When none exist the outcome is informational and no slot write occurs.
    pub fn clear_completed(&mut self) -> ClearOutcome {
        let before = self.tasks.len();
        self.tasks.retain(|task| !task.completed);
        let removed = before - self.tasks.len();
        if removed == 0 {
            return ClearOutcome::NothingToClear;
        }
        ClearOutcome::Cleared {
            removed,
            status: self.persist("clear_completed"),
        }
    }

    /// Returns the subsequence admitted by `filter`, in insertion order.
    ///
    /// Pure; no side effects.
    pub fn query(&self, filter: Filter) -> Vec<&Task> {
        self.tasks.iter().filter(|task| filter.admits(task)).collect()
    }

    /// The full sequence in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Unfiltered task count.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn persist(&self, op: &'static str) -> SaveStatus {
        match self.slot.save(&self.tasks) {
            Ok(()) => SaveStatus::Saved,
            Err(err) => {
                warn!("event=slot_save module=store status=error op={op} error={err}");
                SaveStatus::WriteFailed
            }
        }
    }
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}
