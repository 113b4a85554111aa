//! Handlers for the `/users` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bostarter_core::types::DbId;
use bostarter_core::DomainError;
use bostarter_db::models::notification::Notification;
use bostarter_db::models::user::{CreateUser, User};
use bostarter_db::repositories::{NotificationRepo, UserRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /users/top`.
#[derive(Debug, Deserialize)]
pub struct TopQuery {
    /// Maximum number of results. Defaults to 10, capped at 50.
    pub limit: Option<i64>,
}

/// Maximum page size for the top-creators listing.
const MAX_LIMIT: i64 = 50;

/// Default page size for the top-creators listing.
const DEFAULT_LIMIT: i64 = 10;

/// POST /api/v1/users
///
/// Register a user. Usernames are unique; a duplicate yields 409.
pub async fn create_user(
    State(state): State<AppState>,
    Json(input): Json<CreateUser>,
) -> AppResult<(StatusCode, Json<DataResponse<User>>)> {
    if input.username.trim().is_empty() {
        return Err(AppError::BadRequest("username must not be empty".into()));
    }
    if input.display_name.trim().is_empty() {
        return Err(AppError::BadRequest("display_name must not be empty".into()));
    }

    let user = UserRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: user })))
}

/// GET /api/v1/users/{id}
///
/// Fetch a user, including the materialized reliability fields.
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<DataResponse<User>>> {
    let user = UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or(AppError::Domain(DomainError::NotFound {
            entity: "User",
            id: user_id,
        }))?;
    Ok(Json(DataResponse { data: user }))
}

/// GET /api/v1/users/top
///
/// Top creators ranked by reliability. Users with no projects are excluded.
pub async fn top_users(
    State(state): State<AppState>,
    Query(params): Query<TopQuery>,
) -> AppResult<Json<DataResponse<Vec<User>>>> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let users = UserRepo::top_by_reliability(&state.pool, limit).await?;
    Ok(Json(DataResponse { data: users }))
}

/// GET /api/v1/users/{id}/notifications
///
/// The user's in-app notification feed, newest first.
pub async fn list_notifications(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Notification>>>> {
    UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or(AppError::Domain(DomainError::NotFound {
            entity: "User",
            id: user_id,
        }))?;

    let notifications = NotificationRepo::list_for_user(&state.pool, user_id).await?;
    Ok(Json(DataResponse { data: notifications }))
}
