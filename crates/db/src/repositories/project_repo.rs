//! Repository for the `projects` table.
//!
//! Methods that participate in the pledge/lifecycle transactions take a
//! `&mut PgConnection` so callers can pass `&mut *tx`; pool-level reads take
//! the pool directly.

use bostarter_core::project::{ProjectState, StatusId};
use bostarter_core::types::DbId;
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};

use crate::models::project::{CreateProject, Project};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, creator_id, title, description, kind, goal_amount, \
    total_raised, backer_count, status_id, deadline, created_at, updated_at";

/// Provides persistence operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project in `Draft` state, returning the created row.
    ///
    /// Runs on a connection so project creation and the creator's
    /// reliability recomputation share one transaction.
    pub async fn create(
        conn: &mut PgConnection,
        input: &CreateProject,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (creator_id, title, description, kind, goal_amount, status_id, deadline)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(input.creator_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.kind)
            .bind(input.goal_amount)
            .bind(ProjectState::Draft.id())
            .bind(input.deadline)
            .fetch_one(conn)
            .await
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all projects, most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY created_at DESC");
        sqlx::query_as::<_, Project>(&query).fetch_all(pool).await
    }

    /// Lock and load a project row with `SELECT ... FOR UPDATE`.
    ///
    /// This is the per-project serialization point: every pledge write and
    /// lifecycle transition for a project takes this lock first, so
    /// aggregate recomputation and reward-quantity checks cannot race.
    pub async fn find_by_id_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Set a project's lifecycle status. Returns `true` if a row changed.
    ///
    /// Legality of the transition is the caller's responsibility (checked in
    /// `bostarter-core` under the row lock).
    pub async fn set_status(
        conn: &mut PgConnection,
        id: DbId,
        status_id: StatusId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE projects SET status_id = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(status_id)
                .execute(conn)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Recompute a project's derived aggregates from the pledge ledger and
    /// store them, returning `(total_raised, backer_count)`.
    ///
    /// A full recomputation over completed pledges, not an increment, so the
    /// stored totals can never drift from the ledger.
    pub async fn recompute_aggregates(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<(Decimal, i32), sqlx::Error> {
        let row: (Decimal, i32) = sqlx::query_as(
            "UPDATE projects p
             SET total_raised = agg.total,
                 backer_count = agg.backers,
                 updated_at = NOW()
             FROM (
                 SELECT COALESCE(SUM(amount), 0)::NUMERIC(12,2) AS total,
                        COUNT(DISTINCT backer_id)::INT AS backers
                 FROM pledges
                 WHERE project_id = $1 AND status = 'completed'
             ) agg
             WHERE p.id = $1
             RETURNING p.total_raised, p.backer_count",
        )
        .bind(id)
        .fetch_one(conn)
        .await?;
        Ok(row)
    }

    /// Move every `Open` project whose deadline has passed to `Expired`,
    /// returning the affected project IDs.
    pub async fn expire_overdue(pool: &PgPool) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "UPDATE projects
             SET status_id = $1, updated_at = NOW()
             WHERE status_id = $2 AND deadline < NOW()
             RETURNING id",
        )
        .bind(ProjectState::Expired.id())
        .bind(ProjectState::Open.id())
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|r| r.0).collect())
    }
}
