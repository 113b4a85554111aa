use rust_decimal::Decimal;

use crate::project::ProjectState;
use crate::types::DbId;

/// The funding engine's error taxonomy.
///
/// Validator failures are terminal for the request that produced them; the
/// caller must not retry without new input. The two exceptions are
/// [`ConcurrencyConflict`](DomainError::ConcurrencyConflict), which the
/// ledger retries automatically after re-validation, and
/// [`Persistence`](DomainError::Persistence), which is transient and may be
/// retried by the caller as a whole.
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Pledge amount must be at least the global minimum")]
    InvalidAmount,

    #[error("Pledge amount is below the reward minimum of {minimum}")]
    AmountBelowRewardThreshold { minimum: Decimal },

    #[error("Reward has reached its quantity limit")]
    RewardExhausted,

    #[error("Reward does not belong to the pledged project")]
    InvalidReward,

    #[error("Project is not accepting pledges")]
    ProjectNotAcceptingFunds,

    #[error("Creators may not pledge to their own projects")]
    SelfFundingForbidden,

    #[error("Invalid project state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: ProjectState,
        to: ProjectState,
    },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Concurrent modification conflict, retry required")]
    ConcurrencyConflict,

    #[error("Persistence failure: {0}")]
    Persistence(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl DomainError {
    /// Returns `true` if the error is transient and the whole operation may
    /// be retried (after re-validation, since state may have changed).
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            DomainError::ConcurrencyConflict | DomainError::Persistence(_)
        )
    }
}
