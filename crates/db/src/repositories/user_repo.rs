//! Repository for the `users` table, including the materialized creator
//! reliability fields.

use bostarter_core::types::DbId;
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};

use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, username, display_name, project_count, funded_project_count, reliability, created_at";

/// Provides persistence operations for users and creator reliability.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, display_name)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.display_name)
            .fetch_one(pool)
            .await
    }

    /// Find a user by their internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Lock and load a user row with `SELECT ... FOR UPDATE`.
    ///
    /// Serializes concurrent reliability recomputations for one creator.
    pub async fn find_by_id_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Top creators by reliability (public "top creators" view).
    pub async fn top_by_reliability(pool: &PgPool, limit: i64) -> Result<Vec<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users
             WHERE project_count > 0
             ORDER BY reliability DESC, project_count DESC
             LIMIT $1"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Ground-truth counts for a creator's reliability:
    /// `(total projects, projects with at least one completed pledge)`.
    pub async fn creator_project_stats(
        conn: &mut PgConnection,
        creator_id: DbId,
    ) -> Result<(i64, i64), sqlx::Error> {
        sqlx::query_as(
            "SELECT COUNT(*), COUNT(*) FILTER (WHERE funded)
             FROM (
                 SELECT EXISTS (
                     SELECT 1 FROM pledges pl
                     WHERE pl.project_id = p.id AND pl.status = 'completed'
                 ) AS funded
                 FROM projects p
                 WHERE p.creator_id = $1
             ) s",
        )
        .bind(creator_id)
        .fetch_one(conn)
        .await
    }

    /// Store a recomputed reliability snapshot. Returns `true` if a row changed.
    pub async fn set_reliability(
        conn: &mut PgConnection,
        creator_id: DbId,
        project_count: i32,
        funded_project_count: i32,
        reliability: Decimal,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users
             SET project_count = $2, funded_project_count = $3, reliability = $4
             WHERE id = $1",
        )
        .bind(creator_id)
        .bind(project_count)
        .bind(funded_project_count)
        .bind(reliability)
        .execute(conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
