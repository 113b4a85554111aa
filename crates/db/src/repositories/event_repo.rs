//! Repository for the `events` audit table.

use bostarter_core::types::DbId;
use sqlx::PgPool;

use crate::models::event::StoredEvent;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, event_type, source_entity_type, source_entity_id, actor_user_id, payload, created_at";

/// Provides append and read access to the audit event log.
pub struct EventRepo;

impl EventRepo {
    /// Append an event row, returning its ID.
    pub async fn insert(
        pool: &PgPool,
        event_type: &str,
        source_entity_type: Option<&str>,
        source_entity_id: Option<DbId>,
        actor_user_id: Option<DbId>,
        payload: &serde_json::Value,
    ) -> Result<DbId, sqlx::Error> {
        let row: (DbId,) = sqlx::query_as(
            "INSERT INTO events (event_type, source_entity_type, source_entity_id, actor_user_id, payload)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(event_type)
        .bind(source_entity_type)
        .bind(source_entity_id)
        .bind(actor_user_id)
        .bind(payload)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// List events for a source entity, oldest first (audit order).
    pub async fn list_for_source(
        pool: &PgPool,
        source_entity_type: &str,
        source_entity_id: DbId,
    ) -> Result<Vec<StoredEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM events
             WHERE source_entity_type = $1 AND source_entity_id = $2
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, StoredEvent>(&query)
            .bind(source_entity_type)
            .bind(source_entity_id)
            .fetch_all(pool)
            .await
    }
}
