//! Reward tier model and DTOs.

use bostarter_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A reward row from the `rewards` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Reward {
    pub id: DbId,
    pub project_id: DbId,
    pub title: String,
    pub description: Option<String>,
    /// Pledges selecting this tier must be at or above this amount.
    pub minimum_amount: Decimal,
    /// `None` means unlimited.
    pub quantity_limit: Option<i32>,
    pub delivery_date: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for creating a reward tier.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReward {
    pub project_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub minimum_amount: Decimal,
    pub quantity_limit: Option<i32>,
    pub delivery_date: Option<Timestamp>,
}
