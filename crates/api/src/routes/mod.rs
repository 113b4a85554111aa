pub mod health;
pub mod maintenance;
pub mod pledges;
pub mod projects;
pub mod rewards;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /users                           create
/// /users/top                       top creators by reliability
/// /users/{id}                      get
/// /users/{id}/notifications        in-app notification feed
///
/// /projects                        list, create (Draft)
/// /projects/{id}                   get
/// /projects/{id}/publish           Draft -> Open (POST, owner)
/// /projects/{id}/cancel            Open -> Cancelled (POST, owner)
/// /projects/{id}/rewards           list, create (owner)
///
/// /rewards/{id}                    delete (owner, while unselected)
///
/// /pledges                         create (POST, actor = backer)
///
/// /maintenance/expire              expiry sweep (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/projects", projects::router())
        .nest("/rewards", rewards::router())
        .nest("/pledges", pledges::router())
        .nest("/maintenance", maintenance::router())
}
