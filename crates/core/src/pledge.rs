//! Ordered pledge validation rules.
//!
//! Each rule is a pure function over values already read from the ledger;
//! the transactional engine applies them in the order below, short-circuiting
//! on the first failure:
//!
//! 1. project exists (checked by the caller when loading the row),
//! 2. project is accepting pledges,
//! 3. the backer is not the project's creator,
//! 4. the amount meets the global minimum,
//! 5. reward checks (same project, tier threshold, quantity limit).

use rust_decimal::Decimal;

use crate::error::DomainError;
use crate::money::MIN_PLEDGE_AMOUNT;
use crate::project::ProjectState;
use crate::types::DbId;

/// Rule 2: only `Open` projects accept pledges.
pub fn check_project_open(state: ProjectState) -> Result<(), DomainError> {
    if state.accepts_pledges() {
        Ok(())
    } else {
        Err(DomainError::ProjectNotAcceptingFunds)
    }
}

/// Rule 3: a creator may not pledge to their own project.
pub fn check_not_self_funding(backer_id: DbId, creator_id: DbId) -> Result<(), DomainError> {
    if backer_id == creator_id {
        Err(DomainError::SelfFundingForbidden)
    } else {
        Ok(())
    }
}

/// Rule 4: the amount must be positive and at least the global minimum.
pub fn check_amount(amount: Decimal) -> Result<(), DomainError> {
    if amount < MIN_PLEDGE_AMOUNT {
        Err(DomainError::InvalidAmount)
    } else {
        Ok(())
    }
}

/// Rule 5a: a referenced reward must belong to the pledged project.
pub fn check_reward_project(reward_project_id: DbId, project_id: DbId) -> Result<(), DomainError> {
    if reward_project_id == project_id {
        Ok(())
    } else {
        Err(DomainError::InvalidReward)
    }
}

/// Rule 5b: the amount must reach the reward's minimum. Equal is accepted.
pub fn check_reward_threshold(amount: Decimal, minimum: Decimal) -> Result<(), DomainError> {
    if amount >= minimum {
        Ok(())
    } else {
        Err(DomainError::AmountBelowRewardThreshold { minimum })
    }
}

/// Rule 5c: with a quantity limit, the count of completed pledges already
/// referencing the reward must be below the limit.
pub fn check_reward_quantity(
    completed_count: i64,
    quantity_limit: Option<i32>,
) -> Result<(), DomainError> {
    match quantity_limit {
        Some(limit) if completed_count >= i64::from(limit) => Err(DomainError::RewardExhausted),
        _ => Ok(()),
    }
}
