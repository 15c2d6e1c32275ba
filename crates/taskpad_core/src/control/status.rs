//! Transient status line with generation-guarded expiry.
//!
//! # Responsibility
//! - Hold the single ephemeral message shown for validation and storage
//!   failures, auto-clearing after a fixed delay.
//!
//! # Invariants
//! - Each `set` bumps a generation counter; a clear carrying a stale token
//!   never blanks a newer message.
//! - A message past its deadline reads as already cleared.

use std::time::{Duration, Instant};

/// How long a message stays visible before auto-clearing.
pub const STATUS_TTL: Duration = Duration::from_secs(3);

/// Severity of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// Validation rejection or storage warning.
    Error,
    /// Informational, e.g. nothing to clear.
    Info,
}

/// One displayed message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

/// Token identifying the generation a timer was armed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusToken(u64);

/// The single status line of the application.
#[derive(Debug, Default)]
pub struct StatusLine {
    current: Option<(StatusMessage, Instant)>,
    generation: u64,
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Displays `text`, replacing any prior message, and returns the token a
    /// host timer should pass back to `clear_if_current` after `STATUS_TTL`.
    pub fn set(&mut self, text: impl Into<String>, kind: StatusKind, now: Instant) -> StatusToken {
        self.generation += 1;
        self.current = Some((
            StatusMessage {
                text: text.into(),
                kind,
            },
            now + STATUS_TTL,
        ));
        StatusToken(self.generation)
    }

    /// Clears the message only when `token` matches the current generation.
    ///
    /// Returns whether anything was cleared. A stale token is a no-op, so a
    /// timer armed for an old message cannot blank its replacement.
    pub fn clear_if_current(&mut self, token: StatusToken) -> bool {
        if token.0 != self.generation {
            return false;
        }
        self.current.take().is_some()
    }

    /// The visible message, if any; a past-deadline message reads as cleared.
    pub fn current(&self, now: Instant) -> Option<&StatusMessage> {
        match &self.current {
            Some((message, deadline)) if now < *deadline => Some(message),
            _ => None,
        }
    }
}
