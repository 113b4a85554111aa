//! Route definitions for the `/projects` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::projects;
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                  -> list_projects
/// POST   /                  -> create_project
/// GET    /{id}              -> get_project
/// POST   /{id}/publish      -> publish_project
/// POST   /{id}/cancel       -> cancel_project
/// GET    /{id}/rewards      -> list_rewards
/// POST   /{id}/rewards      -> create_reward
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(projects::list_projects).post(projects::create_project))
        .route("/{id}", get(projects::get_project))
        .route("/{id}/publish", post(projects::publish_project))
        .route("/{id}/cancel", post(projects::cancel_project))
        .route(
            "/{id}/rewards",
            get(projects::list_rewards).post(projects::create_reward),
        )
}
