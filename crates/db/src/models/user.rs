//! User entity model and DTOs.
//!
//! A user acts both as a backer and, for projects they created, as a
//! creator. The reliability fields are materialized aggregates maintained by
//! the reliability recalculator.

use bostarter_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub display_name: String,
    /// Number of projects this user has created.
    pub project_count: i32,
    /// Number of those projects with at least one completed pledge.
    pub funded_project_count: i32,
    /// `funded / total * 100`, rounded to 2 decimal places; 0 when no projects.
    pub reliability: Decimal,
    pub created_at: Timestamp,
}

/// DTO for registering a new user.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub display_name: String,
}
