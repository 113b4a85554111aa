//! Route definitions for the `/maintenance` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::maintenance;
use crate::state::AppState;

/// Routes mounted at `/maintenance`.
///
/// ```text
/// POST   /expire   -> expire (the deadline sweep)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/expire", post(maintenance::expire))
}
