use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use bostarter_core::types::DbId;

use crate::error::AppError;
use crate::state::AppState;

/// The acting user, extracted from the `x-actor-id` header.
///
/// Identity is established upstream (the platform fronts this service with
/// its own session layer); this extractor only carries the resolved user id
/// into handlers. Use it as an extractor parameter in any handler that acts
/// on behalf of a user:
///
/// ```ignore
/// async fn my_handler(actor: Actor) -> AppResult<Json<()>> {
///     tracing::info!(user_id = actor.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    /// The acting user's internal database id.
    pub user_id: DbId,
}

impl FromRequestParts<AppState> for Actor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get("x-actor-id")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Missing x-actor-id header".into()))?;

        let user_id: DbId = header
            .parse()
            .map_err(|_| AppError::Unauthorized("x-actor-id must be a numeric user id".into()))?;

        Ok(Actor { user_id })
    }
}
