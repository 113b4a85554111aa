//! Handlers for the `/pledges` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use bostarter_core::types::DbId;
use bostarter_ledger::{submit_pledge, PledgeCommand};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::middleware::actor::Actor;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /pledges`. The backer is the acting user.
#[derive(Debug, Deserialize)]
pub struct PledgeRequest {
    pub project_id: DbId,
    pub amount: Decimal,
    /// Optional reward tier selection.
    pub reward_id: Option<DbId>,
}

/// Response payload for an accepted pledge.
#[derive(Debug, Serialize)]
pub struct PledgeResponse {
    pub pledge_id: DbId,
    pub project_new_total: Decimal,
    pub project_backer_count: i32,
    /// Project state after the write (`funded` if this pledge closed it).
    pub project_status: String,
}

/// POST /api/v1/pledges
///
/// Validate and commit a pledge through the ledger writer. Returns 201 with
/// the post-commit project aggregates, or a typed domain error.
pub async fn create_pledge(
    actor: Actor,
    State(state): State<AppState>,
    Json(input): Json<PledgeRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<PledgeResponse>>)> {
    let cmd = PledgeCommand {
        project_id: input.project_id,
        backer_id: actor.user_id,
        amount: input.amount,
        reward_id: input.reward_id,
    };
    let outcome = submit_pledge(&state.pool, &state.event_bus, &cmd).await?;

    let response = PledgeResponse {
        pledge_id: outcome.pledge.id,
        project_new_total: outcome.new_total,
        project_backer_count: outcome.backer_count,
        project_status: outcome.project_state.to_string(),
    };
    Ok((StatusCode::CREATED, Json(DataResponse { data: response })))
}
