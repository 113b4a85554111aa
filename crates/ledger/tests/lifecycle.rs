//! Project lifecycle and reliability tests against a live Postgres instance.

mod common;

use assert_matches::assert_matches;
use bostarter_core::project::ProjectState;
use bostarter_core::DomainError;
use bostarter_events::{DomainEvent, EventBus};
use bostarter_ledger::lifecycle::{cancel_project, expire_overdue, publish_project};
use bostarter_ledger::reliability::recompute_creator;
use bostarter_ledger::{submit_pledge, PledgeCommand};
use rust_decimal::Decimal;
use sqlx::PgPool;

use common::*;

/// Publishing requires at least one reward tier.
#[sqlx::test(migrations = "../db/migrations")]
async fn publish_without_reward_rejected(pool: PgPool) {
    let bus = EventBus::default();
    let creator = create_user(&pool, "creator").await;
    let project = create_project(&pool, &bus, creator.id, 100).await;

    let err = publish_project(&pool, &bus, project.id, creator.id)
        .await
        .unwrap_err();
    assert_matches!(err, DomainError::Validation(_));
}

/// Only the creator may publish or cancel.
#[sqlx::test(migrations = "../db/migrations")]
async fn non_owner_cannot_transition(pool: PgPool) {
    let bus = EventBus::default();
    let creator = create_user(&pool, "creator").await;
    let stranger = create_user(&pool, "stranger").await;
    let project = create_project(&pool, &bus, creator.id, 100).await;
    add_reward(&pool, creator.id, project.id, Decimal::ONE, None).await;

    let err = publish_project(&pool, &bus, project.id, stranger.id)
        .await
        .unwrap_err();
    assert_matches!(err, DomainError::Forbidden(_));
}

/// Draft -> Open -> Cancelled, with transition events; a second publish is
/// an invalid transition.
#[sqlx::test(migrations = "../db/migrations")]
async fn publish_then_cancel(pool: PgPool) {
    let bus = EventBus::default();
    let creator = create_user(&pool, "creator").await;
    let project = create_project(&pool, &bus, creator.id, 100).await;
    add_reward(&pool, creator.id, project.id, Decimal::ONE, None).await;

    let mut rx = bus.subscribe();
    let opened = publish_project(&pool, &bus, project.id, creator.id)
        .await
        .unwrap();
    assert_eq!(opened.state(), ProjectState::Open);
    assert_matches!(
        rx.try_recv().unwrap(),
        DomainEvent::ProjectStateChanged {
            old_state: ProjectState::Draft,
            new_state: ProjectState::Open,
            ..
        }
    );

    let err = publish_project(&pool, &bus, project.id, creator.id)
        .await
        .unwrap_err();
    assert_matches!(
        err,
        DomainError::InvalidTransition {
            from: ProjectState::Open,
            to: ProjectState::Open,
        }
    );

    let cancelled = cancel_project(&pool, &bus, project.id, creator.id)
        .await
        .unwrap();
    assert_eq!(cancelled.state(), ProjectState::Cancelled);

    // Terminal: no way back.
    let err = cancel_project(&pool, &bus, project.id, creator.id)
        .await
        .unwrap_err();
    assert_matches!(err, DomainError::InvalidTransition { .. });
}

/// Scenario: the expiry sweep closes an under-goal project as Expired, and
/// never as Funded.
#[sqlx::test(migrations = "../db/migrations")]
async fn sweep_expires_underfunded_project(pool: PgPool) {
    let bus = EventBus::default();
    let (_creator, project) = setup_open_project(&pool, &bus, 1000).await;
    let backer = create_user(&pool, "backer").await;
    submit_pledge(
        &pool,
        &bus,
        &PledgeCommand {
            project_id: project.id,
            backer_id: backer.id,
            amount: Decimal::from(400),
            reward_id: None,
        },
    )
    .await
    .unwrap();

    backdate_deadline(&pool, project.id).await;

    let mut rx = bus.subscribe();
    let closed = expire_overdue(&pool, &bus).await.unwrap();
    assert_eq!(closed, 1);

    let (total, _, status) = project_snapshot(&pool, project.id).await;
    assert_eq!(total, Decimal::from(400));
    assert_eq!(status, ProjectState::Expired.id());
    assert_matches!(
        rx.try_recv().unwrap(),
        DomainEvent::ProjectStateChanged {
            old_state: ProjectState::Open,
            new_state: ProjectState::Expired,
            ..
        }
    );

    // Expired projects accept nothing further.
    let late = create_user(&pool, "late").await;
    let err = submit_pledge(
        &pool,
        &bus,
        &PledgeCommand {
            project_id: project.id,
            backer_id: late.id,
            amount: Decimal::from(10),
            reward_id: None,
        },
    )
    .await
    .unwrap_err();
    assert_matches!(err, DomainError::ProjectNotAcceptingFunds);
}

/// The sweep leaves already-funded and in-date projects alone.
#[sqlx::test(migrations = "../db/migrations")]
async fn sweep_ignores_funded_and_current_projects(pool: PgPool) {
    let bus = EventBus::default();
    let (_c1, funded) = setup_open_project(&pool, &bus, 10).await;
    let backer = create_user(&pool, "backer").await;
    submit_pledge(
        &pool,
        &bus,
        &PledgeCommand {
            project_id: funded.id,
            backer_id: backer.id,
            amount: Decimal::from(10),
            reward_id: None,
        },
    )
    .await
    .unwrap();
    let (_c2, _current) = setup_open_project(&pool, &bus, 500).await;

    let closed = expire_overdue(&pool, &bus).await.unwrap();
    assert_eq!(closed, 0);

    let (_, _, status) = project_snapshot(&pool, funded.id).await;
    assert_eq!(status, ProjectState::Funded.id());
}

/// Scenario: 3 projects, 1 of them funded -> reliability 33.33.
#[sqlx::test(migrations = "../db/migrations")]
async fn reliability_one_of_three(pool: PgPool) {
    let bus = EventBus::default();
    let creator = create_user(&pool, "creator").await;

    let first = create_project(&pool, &bus, creator.id, 100).await;
    add_reward(&pool, creator.id, first.id, Decimal::ONE, None).await;
    publish_project(&pool, &bus, first.id, creator.id)
        .await
        .unwrap();
    create_project(&pool, &bus, creator.id, 200).await;
    create_project(&pool, &bus, creator.id, 300).await;

    let backer = create_user(&pool, "backer").await;
    submit_pledge(
        &pool,
        &bus,
        &PledgeCommand {
            project_id: first.id,
            backer_id: backer.id,
            amount: Decimal::from(5),
            reward_id: None,
        },
    )
    .await
    .unwrap();

    let (reliability, total, funded): (Decimal, i32, i32) = sqlx::query_as(
        "SELECT reliability, project_count, funded_project_count FROM users WHERE id = $1",
    )
    .bind(creator.id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(total, 3);
    assert_eq!(funded, 1);
    assert_eq!(reliability, Decimal::new(3333, 2));
}

/// Recomputing with no intervening writes neither changes the score nor
/// emits an event.
#[sqlx::test(migrations = "../db/migrations")]
async fn reliability_recompute_is_idempotent(pool: PgPool) {
    let bus = EventBus::default();
    let (creator, project) = setup_open_project(&pool, &bus, 1000).await;
    let backer = create_user(&pool, "backer").await;
    submit_pledge(
        &pool,
        &bus,
        &PledgeCommand {
            project_id: project.id,
            backer_id: backer.id,
            amount: Decimal::from(50),
            reward_id: None,
        },
    )
    .await
    .unwrap();

    let first = recompute_creator(&pool, &bus, creator.id).await.unwrap();
    let mut rx = bus.subscribe();
    let second = recompute_creator(&pool, &bus, creator.id).await.unwrap();

    assert_eq!(first.new_score, second.new_score);
    assert!(!second.changed());
    assert!(rx.try_recv().is_err(), "no event for an unchanged score");
}

/// A brand-new creator holds a zero score; their first project keeps it at
/// zero until a pledge lands.
#[sqlx::test(migrations = "../db/migrations")]
async fn reliability_starts_at_zero(pool: PgPool) {
    let bus = EventBus::default();
    let creator = create_user(&pool, "creator").await;
    create_project(&pool, &bus, creator.id, 100).await;

    let (reliability,): (Decimal,) =
        sqlx::query_as("SELECT reliability FROM users WHERE id = $1")
            .bind(creator.id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(reliability, Decimal::ZERO);
}
