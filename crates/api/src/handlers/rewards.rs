//! Handlers for the `/rewards` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use bostarter_core::types::DbId;
use bostarter_ledger::rewards;

use crate::error::AppResult;
use crate::middleware::actor::Actor;
use crate::state::AppState;

/// DELETE /api/v1/rewards/{id}
///
/// Owner only; refused once any completed pledge has selected the reward or
/// the project has closed. Returns 204 No Content on success.
pub async fn delete_reward(
    actor: Actor,
    State(state): State<AppState>,
    Path(reward_id): Path<DbId>,
) -> AppResult<StatusCode> {
    rewards::delete_reward(&state.pool, actor.user_id, reward_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
