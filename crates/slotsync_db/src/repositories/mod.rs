// --- File: crates/slotsync_db/src/repositories/mod.rs ---
//! SQL-backed implementations of the group repository and slot store.

pub mod group_sql;
pub mod slots_sql;

pub use group_sql::SqlGroupRepository;
pub use slots_sql::SqlSlotStore;

use crate::error::DbError;
use chrono::{DateTime, SecondsFormat, Utc};
use slotsync_common::BoxedError;

/// Encode an instant for a TEXT column: fixed-width RFC3339 in UTC with
/// millisecond precision, so lexicographic order equals chronological order.
pub(crate) fn instant_to_text(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Decode a TEXT timestamp column back into an instant.
pub(crate) fn instant_from_text(
    column: &'static str,
    raw: &str,
) -> Result<DateTime<Utc>, DbError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| DbError::CorruptTimestamp(column, raw.to_string()))
}

pub(crate) fn query_err(err: sqlx::Error) -> BoxedError {
    BoxedError::new(DbError::QueryError(err.to_string()))
}
