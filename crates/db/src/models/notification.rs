//! In-app notification model and DTOs.

use bostarter_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub user_id: DbId,
    pub event_type: String,
    pub body: String,
    pub payload: serde_json::Value,
    pub read: bool,
    pub created_at: Timestamp,
}

/// Fields for inserting a notification.
#[derive(Debug, Clone)]
pub struct CreateNotification {
    pub user_id: DbId,
    pub event_type: String,
    pub body: String,
    pub payload: serde_json::Value,
}
