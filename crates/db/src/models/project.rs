//! Project entity model and DTOs.

use bostarter_core::project::{ProjectState, StatusId};
use bostarter_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub creator_id: DbId,
    pub title: String,
    pub description: Option<String>,
    /// `hardware` or `software`.
    pub kind: String,
    pub goal_amount: Decimal,
    /// Sum of completed pledge amounts. Derived; updated in the pledge
    /// transaction, never written by anything else.
    pub total_raised: Decimal,
    /// Count of distinct backers with completed pledges. Derived.
    pub backer_count: i32,
    pub status_id: StatusId,
    pub deadline: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Project {
    /// The lifecycle state for this row's `status_id`.
    ///
    /// The status column references the seeded `project_statuses` lookup
    /// table, so an unknown id indicates a corrupted row.
    pub fn state(&self) -> ProjectState {
        ProjectState::from_id(self.status_id).unwrap_or(ProjectState::Draft)
    }
}

/// DTO for creating a new project (always starts in `Draft`).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub creator_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub kind: String,
    pub goal_amount: Decimal,
    pub deadline: Timestamp,
}
