//! In-memory task store with write-through durability.
//!
//! # Responsibility
//! - Own the ordered task sequence for one application instance.
//! - Delegate durability to the slot after every successful mutation.
//!
//! # Invariants
//! - Mutations that change nothing perform no slot write.
//! - A failed slot write never corrupts in-memory state.

pub mod task_store;
