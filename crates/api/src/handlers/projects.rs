//! Handlers for the `/projects` resource.
//!
//! Creation and lifecycle transitions act on behalf of the [`Actor`]; the
//! engine enforces ownership, so a non-owner gets 403 regardless of what the
//! boundary lets through.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use bostarter_core::types::{DbId, Timestamp};
use bostarter_db::models::project::{CreateProject, Project};
use bostarter_db::models::reward::{CreateReward, Reward};
use bostarter_db::repositories::ProjectRepo;
use bostarter_ledger::{lifecycle, rewards};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::actor::Actor;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /projects`. The creator is the acting user.
#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub title: String,
    pub description: Option<String>,
    /// `hardware` or `software`.
    pub kind: String,
    pub goal_amount: Decimal,
    pub deadline: Timestamp,
}

/// Request body for `POST /projects/{id}/rewards`. The project comes from
/// the path.
#[derive(Debug, Deserialize)]
pub struct CreateRewardRequest {
    pub title: String,
    pub description: Option<String>,
    pub minimum_amount: Decimal,
    pub quantity_limit: Option<i32>,
    pub delivery_date: Option<Timestamp>,
}

/// POST /api/v1/projects
///
/// Create a project in `Draft`. The creator's reliability is refreshed in
/// the same transaction.
pub async fn create_project(
    actor: Actor,
    State(state): State<AppState>,
    Json(input): Json<CreateProjectRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Project>>)> {
    let create = CreateProject {
        creator_id: actor.user_id,
        title: input.title,
        description: input.description,
        kind: input.kind,
        goal_amount: input.goal_amount,
        deadline: input.deadline,
    };
    let project = lifecycle::create_project(&state.pool, &state.event_bus, &create).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}

/// GET /api/v1/projects/{id}
pub async fn get_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = lifecycle::find_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: project }))
}

/// GET /api/v1/projects
pub async fn list_projects(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let projects = ProjectRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// POST /api/v1/projects/{id}/publish
///
/// `Draft -> Open`. Owner only; requires at least one reward tier.
pub async fn publish_project(
    actor: Actor,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project =
        lifecycle::publish_project(&state.pool, &state.event_bus, project_id, actor.user_id)
            .await?;
    Ok(Json(DataResponse { data: project }))
}

/// POST /api/v1/projects/{id}/cancel
///
/// `Open -> Cancelled`. Owner only.
pub async fn cancel_project(
    actor: Actor,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project =
        lifecycle::cancel_project(&state.pool, &state.event_bus, project_id, actor.user_id)
            .await?;
    Ok(Json(DataResponse { data: project }))
}

/// POST /api/v1/projects/{id}/rewards
///
/// Add a reward tier. Owner only, while the project is `Draft` or `Open`.
pub async fn create_reward(
    actor: Actor,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateRewardRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Reward>>)> {
    let create = CreateReward {
        project_id,
        title: input.title,
        description: input.description,
        minimum_amount: input.minimum_amount,
        quantity_limit: input.quantity_limit,
        delivery_date: input.delivery_date,
    };
    let reward = rewards::add_reward(&state.pool, actor.user_id, &create).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: reward })))
}

/// GET /api/v1/projects/{id}/rewards
pub async fn list_rewards(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Reward>>>> {
    let list = rewards::list_rewards(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: list }))
}
