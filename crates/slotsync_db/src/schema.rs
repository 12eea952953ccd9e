// --- File: crates/slotsync_db/src/schema.rs ---
//! Schema bootstrap for the Slotsync tables.
//!
//! Instants live in TEXT columns as fixed-width RFC3339 UTC strings with
//! millisecond precision (the day seams end at `.999`). The `any` driver
//! cannot round-trip `DateTime<Utc>` natively, and its integer binds are
//! unreliable across backends, so strings are the portable representation;
//! their lexicographic order matches chronological order.

use crate::client::DbClient;
use crate::error::DbError;
use tracing::{debug, info};

/// Create the Slotsync tables if they do not already exist.
pub async fn init_schema(db_client: &DbClient) -> Result<(), DbError> {
    debug!("Initializing scheduling schema");

    db_client
        .execute(
            r#"
            CREATE TABLE IF NOT EXISTS scheduling_groups (
                id TEXT PRIMARY KEY,
                window_start TEXT NOT NULL,
                window_end TEXT NOT NULL,
                min_slot_minutes BIGINT NOT NULL DEFAULT 0
            )
        "#,
        )
        .await?;

    db_client
        .execute(
            r#"
            CREATE TABLE IF NOT EXISTS group_participants (
                group_id TEXT NOT NULL REFERENCES scheduling_groups(id) ON DELETE CASCADE,
                user_id TEXT NOT NULL,
                access_token TEXT,
                calendar_id TEXT NOT NULL DEFAULT 'primary',
                PRIMARY KEY (group_id, user_id)
            )
        "#,
        )
        .await?;

    db_client
        .execute(
            r#"
            CREATE TABLE IF NOT EXISTS available_slots (
                id TEXT PRIMARY KEY,
                group_id TEXT NOT NULL REFERENCES scheduling_groups(id) ON DELETE CASCADE,
                start_at TEXT NOT NULL,
                end_at TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
        "#,
        )
        .await?;

    db_client
        .execute(
            r#"
            CREATE INDEX IF NOT EXISTS idx_available_slots_group_start
            ON available_slots (group_id, start_at)
        "#,
        )
        .await?;

    info!("Scheduling schema initialized successfully");
    Ok(())
}
