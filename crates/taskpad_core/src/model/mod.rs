//! Domain model for the task list.
//!
//! # Responsibility
//! - Define the canonical task record persisted across sessions.
//! - Define the view filter shared by renderer and controller.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`, never reused.
//! - Task text is validated at add/edit boundaries, not continuously.

pub mod task;
