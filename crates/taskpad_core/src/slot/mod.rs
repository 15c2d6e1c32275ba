//! Persistence boundary for the task list.
//!
//! # Responsibility
//! - Define the durable slot contract used by the task store.
//! - Isolate SQLite and serialization details from store/controller logic.
//!
//! # Invariants
//! - The whole task sequence is written in one slot write; no partial rows.
//! - Slot APIs return semantic errors (`Corrupt`) in addition to DB
//!   transport errors.

pub mod task_slot;
