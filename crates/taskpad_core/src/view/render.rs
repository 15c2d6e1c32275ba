//! Task list renderer.
//!
//! # Responsibility
//! - Produce one entry per visible task plus a count label.
//! - Escape task text before it can be interpreted as markup.
//!
//! # Invariants
//! - Rendering is a pure projection; identical inputs yield identical views.
//! - The count label uses the unfiltered total, never the filtered length.
//! - Display text in entries is already escaped; edit prefill stays raw and
//!   is escaped only when emitted into markup.

use crate::model::task::{Filter, Task, TaskId};
use std::fmt::Write as _;

/// Placeholder shown when the filtered subsequence is empty.
pub const EMPTY_PLACEHOLDER: &str = "No tasks yet.";

/// One rendered list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEntry {
    /// Task in display mode: checked-state, escaped text, edit/delete controls.
    Task {
        id: TaskId,
        completed: bool,
        /// Markup-escaped task text.
        text: String,
    },
    /// Task in inline-edit mode: focused input prefilled with current text,
    /// plus save/cancel controls.
    Edit {
        id: TaskId,
        /// Raw (unescaped) current text for the edit input.
        prefill: String,
    },
    /// Single placeholder entry for an empty filtered view.
    Placeholder,
}

/// Structural rendering of the task list for one redraw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListView {
    pub entries: Vec<ViewEntry>,
    /// Count of all tasks, pluralized: `0 tasks`, `1 task`, `2 tasks`.
    pub count_label: String,
    pub filter: Filter,
}

/// Renders the filtered task list.
///
/// `editing` marks at most one task as inline-edit; a stale or filtered-out
/// id simply renders nothing special.
pub fn render(tasks: &[Task], filter: Filter, editing: Option<TaskId>) -> TaskListView {
    let visible: Vec<&Task> = tasks.iter().filter(|task| filter.admits(task)).collect();

    let entries = if visible.is_empty() {
        vec![ViewEntry::Placeholder]
    } else {
        visible
            .iter()
            .map(|task| {
                if editing == Some(task.id) {
                    ViewEntry::Edit {
                        id: task.id,
                        prefill: task.text.clone(),
                    }
                } else {
                    ViewEntry::Task {
                        id: task.id,
                        completed: task.completed,
                        text: escape_markup(&task.text),
                    }
                }
            })
            .collect()
    };

    TaskListView {
        entries,
        count_label: count_label(tasks.len()),
        filter,
    }
}

/// Pluralized unfiltered-total label.
pub fn count_label(total: usize) -> String {
    format!("{total} task{}", if total == 1 { "" } else { "s" })
}

/// Replaces the five markup-significant characters with safe equivalents.
pub fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            other => escaped.push(other),
        }
    }
    escaped
}

impl TaskListView {
    /// Emits list-item markup for the whole view.
    ///
    /// Task text is never emitted unescaped.
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            match entry {
                ViewEntry::Placeholder => {
                    let _ = writeln!(out, "<li class=\"task empty\">{EMPTY_PLACEHOLDER}</li>");
                }
                ViewEntry::Task {
                    id,
                    completed,
                    text,
                } => {
                    let class = if *completed { "task completed" } else { "task" };
                    let checked = if *completed { " checked" } else { "" };
                    let _ = writeln!(
                        out,
                        "<li class=\"{class}\" data-id=\"{id}\">\
                         <input class=\"toggle\" type=\"checkbox\"{checked} />\
                         <span class=\"text\">{text}</span>\
                         <button class=\"edit-btn\">Edit</button>\
                         <button class=\"delete-btn\">Delete</button>\
                         </li>"
                    );
                }
                ViewEntry::Edit { id, prefill } => {
                    let _ = writeln!(
                        out,
                        "<li class=\"task editing\" data-id=\"{id}\">\
                         <input class=\"edit-input\" type=\"text\" value=\"{}\" />\
                         <button class=\"save-btn\">Save</button>\
                         <button class=\"cancel-btn\">Cancel</button>\
                         </li>",
                        escape_markup(prefill)
                    );
                }
            }
        }
        let _ = writeln!(out, "<span class=\"task-count\">{}</span>", self.count_label);
        out
    }
}
