// --- File: crates/slotsync_db/src/repositories/slots_sql.rs ---
//! SQL implementation of the slot store.

use crate::error::DbError;
use crate::repositories::{instant_from_text, instant_to_text, query_err};
use crate::DbClient;
use slotsync_common::{AvailableSlot, BoxFuture, BoxedError, SlotStore};
use sqlx::Row;
use tracing::{debug, info};
use uuid::Uuid;

/// SQL implementation of the slot store.
#[derive(Debug, Clone)]
pub struct SqlSlotStore {
    db_client: DbClient,
}

impl SqlSlotStore {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }
}

impl SlotStore for SqlSlotStore {
    type Error = BoxedError;

    /// Delete-then-insert inside one transaction, so readers see either the
    /// previous set or the new set, never a mix.
    fn replace_slots(
        &self,
        group_id: &str,
        slots: Vec<AvailableSlot>,
    ) -> BoxFuture<'_, (), Self::Error> {
        let group_id = group_id.to_string();

        Box::pin(async move {
            debug!(
                "Replacing slots for group {}: {} new slots",
                group_id,
                slots.len()
            );

            let mut tx = self.db_client.begin().await.map_err(BoxedError::new)?;

            sqlx::query("DELETE FROM available_slots WHERE group_id = $1")
                .bind(&group_id)
                .execute(&mut *tx)
                .await
                .map_err(query_err)?;

            for slot in &slots {
                sqlx::query(
                    r#"
                    INSERT INTO available_slots (id, group_id, start_at, end_at, created_at)
                    VALUES ($1, $2, $3, $4, $5)
                "#,
                )
                .bind(slot.id.to_string())
                .bind(&slot.group_id)
                .bind(instant_to_text(slot.start))
                .bind(instant_to_text(slot.end))
                .bind(instant_to_text(slot.created_at))
                .execute(&mut *tx)
                .await
                .map_err(query_err)?;
            }

            tx.commit()
                .await
                .map_err(|e| BoxedError::new(DbError::TransactionError(e.to_string())))?;

            info!("Stored {} slots for group {}", slots.len(), group_id);
            Ok(())
        })
    }

    fn list_slots(&self, group_id: &str) -> BoxFuture<'_, Vec<AvailableSlot>, Self::Error> {
        let group_id = group_id.to_string();

        Box::pin(async move {
            let rows = sqlx::query(
                r#"
                SELECT id, group_id, start_at, end_at, created_at
                FROM available_slots
                WHERE group_id = $1
                ORDER BY start_at ASC
            "#,
            )
            .bind(&group_id)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(query_err)?;

            let mut slots = Vec::with_capacity(rows.len());
            for row in rows {
                let id: String = row.try_get("id").map_err(query_err)?;
                let start: String = row.try_get("start_at").map_err(query_err)?;
                let end: String = row.try_get("end_at").map_err(query_err)?;
                let created_at: String = row.try_get("created_at").map_err(query_err)?;

                slots.push(AvailableSlot {
                    id: Uuid::parse_str(&id)
                        .map_err(|e| BoxedError::new(DbError::QueryError(e.to_string())))?,
                    group_id: row.try_get("group_id").map_err(query_err)?,
                    start: instant_from_text("start_at", &start).map_err(BoxedError::new)?,
                    end: instant_from_text("end_at", &end).map_err(BoxedError::new)?,
                    created_at: instant_from_text("created_at", &created_at)
                        .map_err(BoxedError::new)?,
                });
            }

            Ok(slots)
        })
    }
}
