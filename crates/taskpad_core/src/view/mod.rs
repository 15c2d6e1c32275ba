//! View projection of the task list.
//!
//! # Responsibility
//! - Map (tasks, filter, edit session) to a structural view and markup.
//! - Keep rendering free of mutable state so any host can redraw at will.

pub mod render;
