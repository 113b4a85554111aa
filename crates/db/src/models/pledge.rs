//! Pledge (funding record) model.
//!
//! Pledges are append-only: once a row is written `completed` it is never
//! edited. The `pending` and `failed` statuses exist so a payment-capture
//! phase can be added without a schema change; this core writes pledges as
//! immediately captured.

use bostarter_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// Payment captured; counts toward aggregates.
pub const PLEDGE_COMPLETED: &str = "completed";
/// Awaiting capture; excluded from aggregates.
pub const PLEDGE_PENDING: &str = "pending";
/// Capture failed; excluded from aggregates.
pub const PLEDGE_FAILED: &str = "failed";

/// A pledge row from the `pledges` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Pledge {
    pub id: DbId,
    pub project_id: DbId,
    pub backer_id: DbId,
    pub reward_id: Option<DbId>,
    pub amount: Decimal,
    pub status: String,
    pub created_at: Timestamp,
}

/// Fields for inserting a new pledge.
#[derive(Debug, Clone)]
pub struct NewPledge {
    pub project_id: DbId,
    pub backer_id: DbId,
    pub reward_id: Option<DbId>,
    pub amount: Decimal,
}
