//! Repository for the `rewards` table.

use bostarter_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::reward::{CreateReward, Reward};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, title, description, minimum_amount, \
    quantity_limit, delivery_date, created_at";

/// Provides persistence operations for reward tiers.
pub struct RewardRepo;

impl RewardRepo {
    /// Insert a new reward tier, returning the created row.
    ///
    /// The `uq_rewards_project_minimum` constraint rejects a duplicate
    /// minimum amount within the same project; the caller classifies that
    /// unique violation.
    pub async fn create(
        conn: &mut PgConnection,
        input: &CreateReward,
    ) -> Result<Reward, sqlx::Error> {
        let query = format!(
            "INSERT INTO rewards (project_id, title, description, minimum_amount, quantity_limit, delivery_date)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Reward>(&query)
            .bind(input.project_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.minimum_amount)
            .bind(input.quantity_limit)
            .bind(input.delivery_date)
            .fetch_one(conn)
            .await
    }

    /// Find a reward by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Reward>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rewards WHERE id = $1");
        sqlx::query_as::<_, Reward>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Load a reward inside a transaction (used by the pledge validator
    /// after the project row lock is held).
    pub async fn find_by_id_in_tx(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Reward>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rewards WHERE id = $1");
        sqlx::query_as::<_, Reward>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// List a project's reward tiers, cheapest first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Reward>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM rewards WHERE project_id = $1 ORDER BY minimum_amount ASC"
        );
        sqlx::query_as::<_, Reward>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Count a project's reward tiers (publish precondition).
    pub async fn count_for_project(
        conn: &mut PgConnection,
        project_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM rewards WHERE project_id = $1")
            .bind(project_id)
            .fetch_one(conn)
            .await?;
        Ok(row.0)
    }

    /// Delete a reward by ID. Returns `true` if a row was removed.
    ///
    /// Callers must first verify no completed pledge references the reward.
    pub async fn delete(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM rewards WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
