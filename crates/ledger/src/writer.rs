//! The pledge ledger writer.
//!
//! One transaction per accepted pledge:
//!
//! 1. lock the project row (`SELECT ... FOR UPDATE`) -- the per-project
//!    serialization point for aggregates and reward quantities,
//! 2. validate the command against the locked state,
//! 3. insert the pledge with status `completed`,
//! 4. recompute `total_raised` and `backer_count` from the ledger,
//! 5. transition `Open -> Funded` when the new total reaches the goal,
//!    synchronously, so the project is never observably over-goal and open,
//! 6. recompute the creator's reliability.
//!
//! Either all of the above commit or none do. Events are published only
//! after a successful commit. The goal check runs ahead of the polled
//! expiry sweep by construction, so `Funded` wins the tie-break.

use bostarter_core::project::ProjectState;
use bostarter_core::types::DbId;
use bostarter_core::DomainError;
use bostarter_db::models::pledge::{NewPledge, Pledge};
use bostarter_db::repositories::{PledgeRepo, ProjectRepo};
use bostarter_db::DbPool;
use bostarter_events::{DomainEvent, EventBus};
use rust_decimal::Decimal;

use crate::validator::{validate_pledge, PledgeCommand};
use crate::{classify_db_error, reliability};

/// How many times a serialization conflict is retried before giving up.
/// Each retry re-runs the full validate+write sequence against fresh state.
const MAX_CONFLICT_RETRIES: u32 = 3;

/// Result of a committed pledge.
#[derive(Debug, Clone)]
pub struct PledgeOutcome {
    pub pledge: Pledge,
    pub new_total: Decimal,
    pub backer_count: i32,
    /// Project state after the write (`Funded` if this pledge closed it).
    pub project_state: ProjectState,
}

/// Validate and commit a pledge, retrying on concurrency conflicts.
pub async fn submit_pledge(
    pool: &DbPool,
    bus: &EventBus,
    cmd: &PledgeCommand,
) -> Result<PledgeOutcome, DomainError> {
    let mut attempt = 0;
    loop {
        match try_submit(pool, cmd).await {
            Ok((outcome, events)) => {
                for event in events {
                    bus.publish(event);
                }
                tracing::info!(
                    pledge_id = outcome.pledge.id,
                    project_id = cmd.project_id,
                    backer_id = cmd.backer_id,
                    state = %outcome.project_state,
                    "Pledge committed"
                );
                return Ok(outcome);
            }
            Err(DomainError::ConcurrencyConflict) if attempt < MAX_CONFLICT_RETRIES => {
                attempt += 1;
                tracing::debug!(
                    attempt,
                    project_id = cmd.project_id,
                    "Pledge transaction conflicted, retrying"
                );
            }
            Err(e) => return Err(e),
        }
    }
}

/// One attempt: the full transaction described in the module docs.
///
/// Returns the outcome plus the events to publish after commit, in order:
/// `PledgeAccepted`, then `ProjectStateChanged` if the pledge closed the
/// project, then `ReliabilityChanged` if the creator's score moved.
async fn try_submit(
    pool: &DbPool,
    cmd: &PledgeCommand,
) -> Result<(PledgeOutcome, Vec<DomainEvent>), DomainError> {
    let mut tx = pool.begin().await.map_err(classify_db_error)?;

    let project = ProjectRepo::find_by_id_for_update(&mut tx, cmd.project_id)
        .await
        .map_err(classify_db_error)?
        .ok_or(DomainError::NotFound {
            entity: "Project",
            id: cmd.project_id,
        })?;

    validate_pledge(&mut tx, &project, cmd).await?;

    let pledge = PledgeRepo::insert_completed(
        &mut tx,
        &NewPledge {
            project_id: project.id,
            backer_id: cmd.backer_id,
            reward_id: cmd.reward_id,
            amount: cmd.amount,
        },
    )
    .await
    .map_err(classify_db_error)?;

    let (new_total, backer_count) = ProjectRepo::recompute_aggregates(&mut tx, project.id)
        .await
        .map_err(classify_db_error)?;

    let mut events = vec![DomainEvent::pledge_accepted(
        project.id,
        cmd.backer_id,
        cmd.amount,
    )];

    // Goal check, inside the same transaction as the aggregate update.
    let mut state = project.state();
    if state == ProjectState::Open && new_total >= project.goal_amount {
        ProjectRepo::set_status(&mut tx, project.id, ProjectState::Funded.id())
            .await
            .map_err(classify_db_error)?;
        events.push(DomainEvent::project_state_changed(
            project.id,
            state,
            ProjectState::Funded,
        ));
        state = ProjectState::Funded;
    }

    let update = reliability::recompute_in_tx(&mut tx, project.creator_id)
        .await
        .map_err(classify_db_error)?;

    tx.commit().await.map_err(classify_db_error)?;

    if update.changed() {
        events.push(DomainEvent::reliability_changed(
            project.creator_id,
            update.new_score,
        ));
    }

    let outcome = PledgeOutcome {
        pledge,
        new_total,
        backer_count,
        project_state: state,
    };
    Ok((outcome, events))
}

/// Look up a committed pledge (read path for the boundary layer).
pub async fn find_pledge(pool: &DbPool, id: DbId) -> Result<Pledge, DomainError> {
    PledgeRepo::find_by_id(pool, id)
        .await
        .map_err(classify_db_error)?
        .ok_or(DomainError::NotFound {
            entity: "Pledge",
            id,
        })
}
