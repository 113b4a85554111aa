//! Route definitions for the `/users` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// POST   /                      -> create_user
/// GET    /top                   -> top_users
/// GET    /{id}                  -> get_user
/// GET    /{id}/notifications    -> list_notifications
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(users::create_user))
        .route("/top", get(users::top_users))
        .route("/{id}", get(users::get_user))
        .route("/{id}/notifications", get(users::list_notifications))
}
