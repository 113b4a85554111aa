//! Pledge validation against ledger state.
//!
//! The rules themselves are pure functions in `bostarter_core::pledge`; this
//! module reads the state they need inside the write transaction, after the
//! project row lock is held, so validation cannot race with a concurrent
//! pledge. Checks run in order and short-circuit on the first failure; no
//! side effects on any path.

use bostarter_core::pledge as rules;
use bostarter_core::types::DbId;
use bostarter_core::DomainError;
use bostarter_db::models::project::Project;
use bostarter_db::models::reward::Reward;
use bostarter_db::repositories::{PledgeRepo, RewardRepo};
use rust_decimal::Decimal;
use sqlx::PgConnection;

use crate::classify_db_error;

/// A pledge request as received from the boundary layer.
#[derive(Debug, Clone)]
pub struct PledgeCommand {
    pub project_id: DbId,
    pub backer_id: DbId,
    pub amount: Decimal,
    pub reward_id: Option<DbId>,
}

/// Validate `cmd` against the locked `project` row.
///
/// Returns the referenced reward (if any) so the writer does not need to
/// load it again. The project-exists check happens when the writer loads
/// the row; everything after runs here:
///
/// 1. project is `Open`,
/// 2. the backer is not the creator,
/// 3. amount meets the global minimum,
/// 4. reward exists, belongs to this project, is met by the amount, and has
///    quantity remaining.
pub(crate) async fn validate_pledge(
    conn: &mut PgConnection,
    project: &Project,
    cmd: &PledgeCommand,
) -> Result<Option<Reward>, DomainError> {
    rules::check_project_open(project.state())?;
    rules::check_not_self_funding(cmd.backer_id, project.creator_id)?;
    rules::check_amount(cmd.amount)?;

    let Some(reward_id) = cmd.reward_id else {
        return Ok(None);
    };

    let reward = RewardRepo::find_by_id_in_tx(conn, reward_id)
        .await
        .map_err(classify_db_error)?
        .ok_or(DomainError::InvalidReward)?;

    rules::check_reward_project(reward.project_id, project.id)?;
    rules::check_reward_threshold(cmd.amount, reward.minimum_amount)?;

    if reward.quantity_limit.is_some() {
        let taken = PledgeRepo::count_completed_for_reward(conn, reward.id)
            .await
            .map_err(classify_db_error)?;
        rules::check_reward_quantity(taken, reward.quantity_limit)?;
    }

    Ok(Some(reward))
}
