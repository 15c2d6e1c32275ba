//! Interaction layer: event dispatch and transient UI state.
//!
//! # Responsibility
//! - Bind host input events to store operations and redraw signals.
//! - Own the active filter, the single edit session, and the status line.
//!
//! # Invariants
//! - At most one task is in inline-edit mode at a time.
//! - A full redraw returns every task to display mode.
//! - Handlers run to completion; no event is processed mid-mutation.

pub mod controller;
pub mod status;
