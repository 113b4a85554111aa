//! Repository for the append-only `pledges` table.

use bostarter_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::pledge::{NewPledge, Pledge, PLEDGE_COMPLETED};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, backer_id, reward_id, amount, status, created_at";

/// Provides persistence operations for pledges.
pub struct PledgeRepo;

impl PledgeRepo {
    /// Insert a pledge with status `completed`.
    ///
    /// This core models pledges as immediately captured funds; there is no
    /// separate payment-gateway callback phase. Must run inside the pledge
    /// transaction, after the project row lock is held.
    pub async fn insert_completed(
        conn: &mut PgConnection,
        input: &NewPledge,
    ) -> Result<Pledge, sqlx::Error> {
        let query = format!(
            "INSERT INTO pledges (project_id, backer_id, reward_id, amount, status)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Pledge>(&query)
            .bind(input.project_id)
            .bind(input.backer_id)
            .bind(input.reward_id)
            .bind(input.amount)
            .bind(PLEDGE_COMPLETED)
            .fetch_one(conn)
            .await
    }

    /// Find a pledge by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Pledge>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pledges WHERE id = $1");
        sqlx::query_as::<_, Pledge>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's pledges, newest first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Pledge>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM pledges WHERE project_id = $1 ORDER BY created_at DESC");
        sqlx::query_as::<_, Pledge>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Count completed pledges referencing a reward (quantity-limit check;
    /// also gates reward deletion).
    pub async fn count_completed_for_reward(
        conn: &mut PgConnection,
        reward_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM pledges WHERE reward_id = $1 AND status = 'completed'",
        )
        .bind(reward_id)
        .fetch_one(conn)
        .await?;
        Ok(row.0)
    }

    /// Count all pledge rows for a project, regardless of status.
    pub async fn count_for_project(pool: &PgPool, project_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM pledges WHERE project_id = $1")
            .bind(project_id)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }
}
