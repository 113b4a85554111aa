//! Route definitions for the `/rewards` resource.

use axum::routing::delete;
use axum::Router;

use crate::handlers::rewards;
use crate::state::AppState;

/// Routes mounted at `/rewards`.
///
/// ```text
/// DELETE /{id}   -> delete_reward
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", delete(rewards::delete_reward))
}
