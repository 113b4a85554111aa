//! Project lifecycle operations: creation, publish, cancel, and the expiry
//! sweep.
//!
//! Publish and cancel take the project row lock so they serialize with
//! in-flight pledge writes; the sweep is a single conditional UPDATE. The
//! sweep is driven by an external scheduler (cron-style invocation through
//! the boundary layer), keeping this crate stateless between calls.

use bostarter_core::ownership::ensure_owner;
use bostarter_core::project::{validate_new_project, validate_publish, ProjectKind, ProjectState};
use bostarter_core::types::DbId;
use bostarter_core::DomainError;
use bostarter_db::models::project::{CreateProject, Project};
use bostarter_db::repositories::{ProjectRepo, RewardRepo, UserRepo};
use bostarter_db::DbPool;
use bostarter_events::{DomainEvent, EventBus};
use chrono::Utc;

use crate::{classify_db_error, reliability};

/// Create a project in `Draft` state and refresh the creator's reliability
/// (the project count just grew, so the score may drop).
pub async fn create_project(
    pool: &DbPool,
    bus: &EventBus,
    input: &CreateProject,
) -> Result<Project, DomainError> {
    ProjectKind::parse(&input.kind).ok_or_else(|| {
        DomainError::Validation(format!(
            "unknown project kind '{}', expected 'hardware' or 'software'",
            input.kind
        ))
    })?;
    validate_new_project(input.goal_amount, input.deadline, Utc::now())?;

    UserRepo::find_by_id(pool, input.creator_id)
        .await
        .map_err(classify_db_error)?
        .ok_or(DomainError::NotFound {
            entity: "User",
            id: input.creator_id,
        })?;

    let mut tx = pool.begin().await.map_err(classify_db_error)?;
    let project = ProjectRepo::create(&mut tx, input)
        .await
        .map_err(classify_db_error)?;
    let update = reliability::recompute_in_tx(&mut tx, input.creator_id)
        .await
        .map_err(classify_db_error)?;
    tx.commit().await.map_err(classify_db_error)?;

    tracing::info!(project_id = project.id, creator_id = project.creator_id, "Project created");

    if update.changed() {
        bus.publish(DomainEvent::reliability_changed(
            input.creator_id,
            update.new_score,
        ));
    }
    Ok(project)
}

/// Publish a project: `Draft -> Open`.
///
/// Owner only; requires at least one reward tier and a future deadline.
pub async fn publish_project(
    pool: &DbPool,
    bus: &EventBus,
    project_id: DbId,
    actor_id: DbId,
) -> Result<Project, DomainError> {
    transition(pool, bus, project_id, actor_id, ProjectState::Open).await
}

/// Cancel a project: `Open -> Cancelled`. Owner only, always allowed while
/// `Open`.
pub async fn cancel_project(
    pool: &DbPool,
    bus: &EventBus,
    project_id: DbId,
    actor_id: DbId,
) -> Result<Project, DomainError> {
    transition(pool, bus, project_id, actor_id, ProjectState::Cancelled).await
}

/// Shared creator-initiated transition: lock, authorize, check the state
/// machine, apply, commit, emit.
async fn transition(
    pool: &DbPool,
    bus: &EventBus,
    project_id: DbId,
    actor_id: DbId,
    to: ProjectState,
) -> Result<Project, DomainError> {
    let mut tx = pool.begin().await.map_err(classify_db_error)?;

    let mut project = ProjectRepo::find_by_id_for_update(&mut tx, project_id)
        .await
        .map_err(classify_db_error)?
        .ok_or(DomainError::NotFound {
            entity: "Project",
            id: project_id,
        })?;

    ensure_owner(actor_id, project.creator_id)?;

    let from = project.state();
    from.ensure_transition(to)?;

    if to == ProjectState::Open {
        let reward_count = RewardRepo::count_for_project(&mut tx, project_id)
            .await
            .map_err(classify_db_error)?;
        validate_publish(reward_count, project.deadline, Utc::now())?;
    }

    ProjectRepo::set_status(&mut tx, project_id, to.id())
        .await
        .map_err(classify_db_error)?;
    tx.commit().await.map_err(classify_db_error)?;

    tracing::info!(project_id, %from, state = %to, "Project state changed");
    bus.publish(DomainEvent::project_state_changed(project_id, from, to));

    project.status_id = to.id();
    Ok(project)
}

/// The expiry sweep: move every `Open` project past its deadline to
/// `Expired`, regardless of how much it raised. Projects the synchronous
/// goal check already moved to `Funded` are untouched.
///
/// Returns the number of projects closed.
pub async fn expire_overdue(pool: &DbPool, bus: &EventBus) -> Result<u64, DomainError> {
    let expired = ProjectRepo::expire_overdue(pool)
        .await
        .map_err(classify_db_error)?;

    for project_id in &expired {
        bus.publish(DomainEvent::project_state_changed(
            *project_id,
            ProjectState::Open,
            ProjectState::Expired,
        ));
    }

    if !expired.is_empty() {
        tracing::info!(count = expired.len(), "Expiry sweep closed projects");
    }
    Ok(expired.len() as u64)
}

/// Read a project by id (boundary read path).
pub async fn find_project(pool: &DbPool, id: DbId) -> Result<Project, DomainError> {
    ProjectRepo::find_by_id(pool, id)
        .await
        .map_err(classify_db_error)?
        .ok_or(DomainError::NotFound {
            entity: "Project",
            id,
        })
}
