//! Creator reliability recalculation.
//!
//! The score is always recomputed from ground truth (see
//! `bostarter_core::reliability`), never incremented, so re-running it is
//! idempotent and redundant runs are merely wasted work, not drift.
//!
//! The creator's row is locked before the counts are read: a concurrent
//! recomputation for the same creator blocks until this one commits and
//! then sees its writes, so the stored score cannot regress to a stale
//! snapshot.

use bostarter_core::reliability::compute_reliability;
use bostarter_core::types::DbId;
use bostarter_core::DomainError;
use bostarter_db::repositories::UserRepo;
use bostarter_db::DbPool;
use bostarter_events::{DomainEvent, EventBus};
use rust_decimal::Decimal;
use sqlx::PgConnection;

use crate::classify_db_error;

/// Outcome of one recomputation.
#[derive(Debug, Clone)]
pub struct ReliabilityUpdate {
    pub old_score: Decimal,
    pub new_score: Decimal,
    pub project_count: i32,
    pub funded_project_count: i32,
}

impl ReliabilityUpdate {
    /// `true` if the stored score actually moved.
    pub fn changed(&self) -> bool {
        self.old_score != self.new_score
    }
}

/// Recompute and store a creator's reliability inside an open transaction.
///
/// Called by the pledge writer and by project creation; both share this
/// code path so the two trigger points cannot diverge.
pub(crate) async fn recompute_in_tx(
    conn: &mut PgConnection,
    creator_id: DbId,
) -> Result<ReliabilityUpdate, sqlx::Error> {
    let user = UserRepo::find_by_id_for_update(conn, creator_id)
        .await?
        .ok_or(sqlx::Error::RowNotFound)?;

    let (total, funded) = UserRepo::creator_project_stats(conn, creator_id).await?;
    let new_score = compute_reliability(total, funded);

    UserRepo::set_reliability(conn, creator_id, total as i32, funded as i32, new_score).await?;

    Ok(ReliabilityUpdate {
        old_score: user.reliability,
        new_score,
        project_count: total as i32,
        funded_project_count: funded as i32,
    })
}

/// Standalone recomputation in its own transaction, emitting
/// `ReliabilityChanged` when the score moved.
///
/// The writer and lifecycle paths already recompute inline; this entry
/// point exists for backfills and consistency checks.
pub async fn recompute_creator(
    pool: &DbPool,
    bus: &EventBus,
    creator_id: DbId,
) -> Result<ReliabilityUpdate, DomainError> {
    let mut tx = pool.begin().await.map_err(classify_db_error)?;
    let update = match recompute_in_tx(&mut tx, creator_id).await {
        Ok(update) => update,
        Err(sqlx::Error::RowNotFound) => {
            return Err(DomainError::NotFound {
                entity: "User",
                id: creator_id,
            })
        }
        Err(e) => return Err(classify_db_error(e)),
    };
    tx.commit().await.map_err(classify_db_error)?;

    if update.changed() {
        bus.publish(DomainEvent::reliability_changed(
            creator_id,
            update.new_score,
        ));
    }
    Ok(update)
}
