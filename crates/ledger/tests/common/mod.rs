//! Shared fixtures for ledger integration tests.

use bostarter_db::models::project::{CreateProject, Project};
use bostarter_db::models::reward::{CreateReward, Reward};
use bostarter_db::models::user::{CreateUser, User};
use bostarter_db::repositories::UserRepo;
use bostarter_events::EventBus;
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

/// Register a user.
pub async fn create_user(pool: &PgPool, username: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            display_name: username.to_uppercase(),
        },
    )
    .await
    .expect("create user")
}

/// Create a draft project with a 30-day deadline.
pub async fn create_project(pool: &PgPool, bus: &EventBus, creator_id: i64, goal: i64) -> Project {
    bostarter_ledger::lifecycle::create_project(
        pool,
        bus,
        &CreateProject {
            creator_id,
            title: format!("project-{goal}"),
            description: None,
            kind: "software".to_string(),
            goal_amount: Decimal::from(goal),
            deadline: Utc::now() + Duration::days(30),
        },
    )
    .await
    .expect("create project")
}

/// Add a reward tier owned by `creator_id`.
pub async fn add_reward(
    pool: &PgPool,
    creator_id: i64,
    project_id: i64,
    minimum: Decimal,
    quantity_limit: Option<i32>,
) -> Reward {
    bostarter_ledger::rewards::add_reward(
        pool,
        creator_id,
        &CreateReward {
            project_id,
            title: format!("tier-{minimum}"),
            description: None,
            minimum_amount: minimum,
            quantity_limit,
            delivery_date: None,
        },
    )
    .await
    .expect("add reward")
}

/// Create a creator plus an `Open` project with one baseline reward tier
/// (minimum 1, unlimited).
pub async fn setup_open_project(pool: &PgPool, bus: &EventBus, goal: i64) -> (User, Project) {
    let creator = create_user(pool, &format!("creator-{goal}")).await;
    let project = create_project(pool, bus, creator.id, goal).await;
    add_reward(pool, creator.id, project.id, Decimal::ONE, None).await;
    let project = bostarter_ledger::lifecycle::publish_project(pool, bus, project.id, creator.id)
        .await
        .expect("publish project");
    (creator, project)
}

/// Backdate an `Open` project so its deadline has already passed.
///
/// The schema enforces `deadline > created_at`, so both columns move.
pub async fn backdate_deadline(pool: &PgPool, project_id: i64) {
    sqlx::query(
        "UPDATE projects
         SET created_at = NOW() - INTERVAL '10 days',
             deadline = NOW() - INTERVAL '1 day'
         WHERE id = $1",
    )
    .bind(project_id)
    .execute(pool)
    .await
    .expect("backdate project");
}

/// `(total_raised, backer_count, status_id)` straight from the table.
pub async fn project_snapshot(pool: &PgPool, project_id: i64) -> (Decimal, i32, i16) {
    sqlx::query_as("SELECT total_raised, backer_count, status_id FROM projects WHERE id = $1")
        .bind(project_id)
        .fetch_one(pool)
        .await
        .expect("project snapshot")
}

/// Number of pledge rows for a project.
pub async fn pledge_count(pool: &PgPool, project_id: i64) -> i64 {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM pledges WHERE project_id = $1")
        .bind(project_id)
        .fetch_one(pool)
        .await
        .expect("pledge count");
    row.0
}
