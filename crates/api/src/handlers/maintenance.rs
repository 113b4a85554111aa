//! Handlers for the `/maintenance` resource.
//!
//! The expiry sweep is driven externally (cron-style) through this
//! endpoint, keeping the engine stateless between calls.

use axum::extract::State;
use axum::Json;
use bostarter_ledger::lifecycle;
use serde::Serialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response payload for the expiry sweep.
#[derive(Debug, Serialize)]
pub struct ExpireResponse {
    /// Number of projects moved to `Expired`.
    pub expired: u64,
}

/// POST /api/v1/maintenance/expire
///
/// Close every `Open` project whose deadline has passed.
pub async fn expire(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<ExpireResponse>>> {
    let expired = lifecycle::expire_overdue(&state.pool, &state.event_bus).await?;
    Ok(Json(DataResponse {
        data: ExpireResponse { expired },
    }))
}
