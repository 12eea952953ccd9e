// --- File: crates/slotsync_engine/src/error.rs ---
use chrono::{DateTime, Utc};
use slotsync_common::BoxedError;
use thiserror::Error;

/// Errors surfaced by a recomputation.
///
/// Per-participant fetch failures are deliberately absent: they are handled
/// inside the coordinator by treating the participant as free (logged, never
/// fatal).
#[derive(Error, Debug)]
pub enum EngineError {
    /// The group's window is misconfigured upstream; rejected before any
    /// fetch is attempted.
    #[error("invalid scheduling window: start {start} is not before end {end}")]
    InvalidWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    #[error("scheduling group not found: {0}")]
    GroupNotFound(String),
    #[error("group repository error: {0}")]
    Repository(#[source] BoxedError),
    /// The atomic replace could not commit. The previously stored slots are
    /// untouched; callers may retry.
    #[error("failed to persist available slots: {0}")]
    Persistence(#[source] BoxedError),
}
