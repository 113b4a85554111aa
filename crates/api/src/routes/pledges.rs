//! Route definitions for the `/pledges` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::pledges;
use crate::state::AppState;

/// Routes mounted at `/pledges`.
///
/// ```text
/// POST   /   -> create_pledge
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(pledges::create_pledge))
}
