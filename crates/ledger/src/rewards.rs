//! Reward tier management.
//!
//! Rewards are mutable only by the owning project's creator, only while the
//! project is in `Draft` or `Open`, and a reward selected by a completed
//! pledge can never be deleted. All mutations take the project row lock so
//! they serialize with pledge writes (a reward cannot be deleted in the
//! middle of a pledge that selects it).

use bostarter_core::ownership::ensure_owner;
use bostarter_core::project::ProjectState;
use bostarter_core::types::DbId;
use bostarter_core::DomainError;
use bostarter_db::models::reward::{CreateReward, Reward};
use bostarter_db::repositories::{PledgeRepo, ProjectRepo, RewardRepo};
use bostarter_db::DbPool;
use rust_decimal::Decimal;

use crate::{classify_db_error, is_unique_violation};

/// Unique constraint guarding one minimum amount per project.
const UQ_PROJECT_MINIMUM: &str = "uq_rewards_project_minimum";

/// Add a reward tier to a project.
pub async fn add_reward(
    pool: &DbPool,
    actor_id: DbId,
    input: &CreateReward,
) -> Result<Reward, DomainError> {
    if input.minimum_amount <= Decimal::ZERO {
        return Err(DomainError::Validation(
            "reward minimum amount must be positive".into(),
        ));
    }
    if matches!(input.quantity_limit, Some(limit) if limit <= 0) {
        return Err(DomainError::Validation(
            "reward quantity limit must be positive".into(),
        ));
    }

    let mut tx = pool.begin().await.map_err(classify_db_error)?;

    let project = ProjectRepo::find_by_id_for_update(&mut tx, input.project_id)
        .await
        .map_err(classify_db_error)?
        .ok_or(DomainError::NotFound {
            entity: "Project",
            id: input.project_id,
        })?;

    ensure_owner(actor_id, project.creator_id)?;
    ensure_rewards_mutable(project.state())?;

    let reward = match RewardRepo::create(&mut tx, input).await {
        Ok(reward) => reward,
        Err(e) if is_unique_violation(&e, UQ_PROJECT_MINIMUM) => {
            return Err(DomainError::Conflict(
                "a reward with this minimum amount already exists for the project".into(),
            ));
        }
        Err(e) => return Err(classify_db_error(e)),
    };

    tx.commit().await.map_err(classify_db_error)?;
    tracing::info!(reward_id = reward.id, project_id = project.id, "Reward created");
    Ok(reward)
}

/// Delete a reward tier.
///
/// Refused once any completed pledge has selected it.
pub async fn delete_reward(pool: &DbPool, actor_id: DbId, reward_id: DbId) -> Result<(), DomainError> {
    let mut tx = pool.begin().await.map_err(classify_db_error)?;

    let reward = RewardRepo::find_by_id_in_tx(&mut tx, reward_id)
        .await
        .map_err(classify_db_error)?
        .ok_or(DomainError::NotFound {
            entity: "Reward",
            id: reward_id,
        })?;

    let project = ProjectRepo::find_by_id_for_update(&mut tx, reward.project_id)
        .await
        .map_err(classify_db_error)?
        .ok_or(DomainError::NotFound {
            entity: "Project",
            id: reward.project_id,
        })?;

    ensure_owner(actor_id, project.creator_id)?;
    ensure_rewards_mutable(project.state())?;

    let taken = PledgeRepo::count_completed_for_reward(&mut tx, reward_id)
        .await
        .map_err(classify_db_error)?;
    if taken > 0 {
        return Err(DomainError::Conflict(
            "reward has been selected by a backer and cannot be deleted".into(),
        ));
    }

    RewardRepo::delete(&mut tx, reward_id)
        .await
        .map_err(classify_db_error)?;
    tx.commit().await.map_err(classify_db_error)?;

    tracing::info!(reward_id, project_id = project.id, "Reward deleted");
    Ok(())
}

/// List a project's reward tiers.
pub async fn list_rewards(pool: &DbPool, project_id: DbId) -> Result<Vec<Reward>, DomainError> {
    ProjectRepo::find_by_id(pool, project_id)
        .await
        .map_err(classify_db_error)?
        .ok_or(DomainError::NotFound {
            entity: "Project",
            id: project_id,
        })?;
    RewardRepo::list_by_project(pool, project_id)
        .await
        .map_err(classify_db_error)
}

/// Rewards are mutable only before the project closes.
fn ensure_rewards_mutable(state: ProjectState) -> Result<(), DomainError> {
    match state {
        ProjectState::Draft | ProjectState::Open => Ok(()),
        _ => Err(DomainError::Conflict(
            "rewards cannot be changed once the project has closed".into(),
        )),
    }
}
