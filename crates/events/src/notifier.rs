//! In-app notification fan-out.
//!
//! [`Notifier`] subscribes to the event bus and turns funding events into
//! rows in the `notifications` table:
//!
//! - `pledge.accepted` -> notify the project's creator,
//! - `project.state_changed` into a terminal state -> notify the creator.
//!
//! Reliability changes are visible on the public profile and produce no
//! notification. Delivery is best-effort: failures are logged and dropped.

use bostarter_core::project::ProjectState;
use bostarter_db::models::notification::CreateNotification;
use bostarter_db::repositories::{NotificationRepo, ProjectRepo};
use bostarter_db::DbPool;
use tokio::sync::broadcast;

use crate::bus::DomainEvent;

/// Background service that routes domain events to user notifications.
pub struct Notifier;

impl Notifier {
    /// Run the notification loop until the bus closes.
    pub async fn run(pool: DbPool, mut receiver: broadcast::Receiver<DomainEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if let Err(e) = Self::route(&pool, &event).await {
                        tracing::error!(
                            error = %e,
                            event_type = event.event_type(),
                            "Failed to deliver notification"
                        );
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Notifier lagged, some notifications were lost");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, notifier shutting down");
                    break;
                }
            }
        }
    }

    /// Translate one event into zero or more notification rows.
    async fn route(pool: &DbPool, event: &DomainEvent) -> Result<(), sqlx::Error> {
        match event {
            DomainEvent::PledgeAccepted {
                project_id, amount, ..
            } => {
                let Some(project) = ProjectRepo::find_by_id(pool, *project_id).await? else {
                    return Ok(());
                };
                let create = CreateNotification {
                    user_id: project.creator_id,
                    event_type: event.event_type().to_string(),
                    body: format!("\"{}\" received a pledge of {amount}", project.title),
                    payload: serde_json::to_value(event).unwrap_or_default(),
                };
                NotificationRepo::create(pool, &create).await?;
            }
            DomainEvent::ProjectStateChanged {
                project_id,
                new_state,
                ..
            } if new_state.is_terminal() => {
                let Some(project) = ProjectRepo::find_by_id(pool, *project_id).await? else {
                    return Ok(());
                };
                let verb = match new_state {
                    ProjectState::Funded => "reached its funding goal",
                    ProjectState::Expired => "expired before reaching its goal",
                    _ => "was cancelled",
                };
                let create = CreateNotification {
                    user_id: project.creator_id,
                    event_type: event.event_type().to_string(),
                    body: format!("\"{}\" {verb}", project.title),
                    payload: serde_json::to_value(event).unwrap_or_default(),
                };
                NotificationRepo::create(pool, &create).await?;
            }
            _ => {}
        }
        Ok(())
    }
}
