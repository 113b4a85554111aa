//! Best-effort audit log writer.
//!
//! [`AuditWriter`] subscribes to the [`EventBus`](crate::bus::EventBus)
//! broadcast channel and appends every received [`DomainEvent`] to the
//! `events` table. It runs as a long-lived background task and shuts down
//! gracefully when the bus sender is dropped. A failed write is logged and
//! the event dropped; the transaction path is never affected.

use bostarter_core::types::DbId;
use bostarter_db::repositories::EventRepo;
use bostarter_db::DbPool;
use tokio::sync::broadcast;

use crate::bus::DomainEvent;

/// Background service that persists domain events to the audit table.
pub struct AuditWriter;

impl AuditWriter {
    /// Run the persistence loop.
    ///
    /// Subscribes via the provided `receiver` and persists every event it
    /// receives. The loop exits when the channel is closed (i.e. the
    /// [`EventBus`](crate::bus::EventBus) is dropped).
    pub async fn run(pool: DbPool, mut receiver: broadcast::Receiver<DomainEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if let Err(e) = Self::persist(&pool, &event).await {
                        tracing::error!(
                            error = %e,
                            event_type = event.event_type(),
                            "Failed to persist audit event"
                        );
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(
                        skipped = n,
                        "Audit writer lagged, some events were not persisted"
                    );
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, audit writer shutting down");
                    break;
                }
            }
        }
    }

    /// Write a single event to the `events` table.
    async fn persist(pool: &DbPool, event: &DomainEvent) -> Result<DbId, sqlx::Error> {
        let (source_type, source_id) = event.source();
        let payload = serde_json::to_value(event).unwrap_or_default();

        EventRepo::insert(
            pool,
            event.event_type(),
            Some(source_type),
            Some(source_id),
            event.actor(),
            &payload,
        )
        .await
    }
}
