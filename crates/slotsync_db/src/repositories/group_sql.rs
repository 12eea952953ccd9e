// --- File: crates/slotsync_db/src/repositories/group_sql.rs ---
//! SQL implementation of the scheduling-group repository.

use crate::error::DbError;
use crate::repositories::{instant_from_text, instant_to_text, query_err};
use crate::DbClient;
use chrono::Duration;
use slotsync_common::{
    BoxFuture, BoxedError, GroupRepository, ParticipantCredential, SchedulingWindow,
};
use sqlx::Row;
use tracing::debug;

const INSERT_GROUP: &str = r#"
    INSERT INTO scheduling_groups (id, window_start, window_end, min_slot_minutes)
    VALUES ($1, $2, $3, $4)
"#;

const INSERT_PARTICIPANT: &str = r#"
    INSERT INTO group_participants (group_id, user_id, access_token, calendar_id)
    VALUES ($1, $2, $3, $4)
"#;

/// SQL implementation of the scheduling-group repository.
///
/// The read side implements [`GroupRepository`] for the coordinator; the
/// write side (`create_group_with_participants` and friends) is inherent
/// and used by the admin surface only.
#[derive(Debug, Clone)]
pub struct SqlGroupRepository {
    db_client: DbClient,
}

impl SqlGroupRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }

    /// Create a group and its full roster in one transaction. A failure on
    /// any insert rolls the whole creation back, so a group is never left
    /// half-populated.
    pub async fn create_group_with_participants(
        &self,
        group_id: &str,
        window: &SchedulingWindow,
        participants: &[ParticipantCredential],
    ) -> Result<(), DbError> {
        debug!(
            "Creating scheduling group {} with {} participants",
            group_id,
            participants.len()
        );

        let mut tx = self.db_client.begin().await?;

        sqlx::query(INSERT_GROUP)
            .bind(group_id)
            .bind(instant_to_text(window.start))
            .bind(instant_to_text(window.end))
            .bind(window.min_slot_duration.num_minutes())
            .execute(&mut *tx)
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        for credential in participants {
            sqlx::query(INSERT_PARTICIPANT)
                .bind(group_id)
                .bind(&credential.user_id)
                .bind(credential.access_token.as_deref())
                .bind(&credential.calendar_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| DbError::QueryError(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionError(e.to_string()))?;

        Ok(())
    }

    /// Create a scheduling group with its window and no participants.
    pub async fn create_group(
        &self,
        group_id: &str,
        window: &SchedulingWindow,
    ) -> Result<(), DbError> {
        self.create_group_with_participants(group_id, window, &[])
            .await
    }

    /// Add a participant with their calendar credential to a group.
    pub async fn add_participant(
        &self,
        group_id: &str,
        credential: &ParticipantCredential,
    ) -> Result<(), DbError> {
        debug!(
            "Adding participant {} to group {}",
            credential.user_id, group_id
        );

        sqlx::query(INSERT_PARTICIPANT)
            .bind(group_id)
            .bind(&credential.user_id)
            .bind(credential.access_token.as_deref())
            .bind(&credential.calendar_id)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        Ok(())
    }
}

impl GroupRepository for SqlGroupRepository {
    type Error = BoxedError;

    fn get_scheduling_window(
        &self,
        group_id: &str,
    ) -> BoxFuture<'_, Option<SchedulingWindow>, Self::Error> {
        let group_id = group_id.to_string();

        Box::pin(async move {
            let row = sqlx::query(
                r#"
                SELECT window_start, window_end, min_slot_minutes
                FROM scheduling_groups
                WHERE id = $1
            "#,
            )
            .bind(&group_id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(query_err)?;

            let Some(row) = row else {
                return Ok(None);
            };

            let start: String = row.try_get("window_start").map_err(query_err)?;
            let end: String = row.try_get("window_end").map_err(query_err)?;
            let min_minutes: i64 = row.try_get("min_slot_minutes").map_err(query_err)?;

            Ok(Some(SchedulingWindow {
                start: instant_from_text("window_start", &start).map_err(BoxedError::new)?,
                end: instant_from_text("window_end", &end).map_err(BoxedError::new)?,
                min_slot_duration: Duration::minutes(min_minutes),
            }))
        })
    }

    fn get_participant_credentials(
        &self,
        group_id: &str,
    ) -> BoxFuture<'_, Vec<ParticipantCredential>, Self::Error> {
        let group_id = group_id.to_string();

        Box::pin(async move {
            let rows = sqlx::query(
                r#"
                SELECT user_id, access_token, calendar_id
                FROM group_participants
                WHERE group_id = $1
                ORDER BY user_id
            "#,
            )
            .bind(&group_id)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(query_err)?;

            let mut credentials = Vec::with_capacity(rows.len());
            for row in rows {
                credentials.push(ParticipantCredential {
                    user_id: row.try_get("user_id").map_err(query_err)?,
                    access_token: row.try_get("access_token").map_err(query_err)?,
                    calendar_id: row.try_get("calendar_id").map_err(query_err)?,
                });
            }

            Ok(credentials)
        })
    }
}
