//! The BOSTARTER funding engine.
//!
//! Transactional orchestration over the ledger store:
//!
//! - [`validator`] — ordered pledge validation against state read under the
//!   project row lock.
//! - [`writer`] — the pledge ledger writer: one transaction per pledge,
//!   covering the insert, aggregate recomputation, the synchronous
//!   goal-reached transition, and reliability recalculation.
//! - [`lifecycle`] — project creation, publish, cancel, and the expiry sweep.
//! - [`rewards`] — reward tier management under the ownership predicate.
//! - [`reliability`] — creator reliability recalculation.
//!
//! All components are stateless functions over data read from and written to
//! the store within the transaction of the triggering write; the store is
//! the only shared mutable resource.

pub mod lifecycle;
pub mod reliability;
pub mod rewards;
pub mod validator;
pub mod writer;

pub use validator::PledgeCommand;
pub use writer::{submit_pledge, PledgeOutcome};

use bostarter_core::DomainError;

/// Classify a database error into the domain taxonomy.
///
/// Serialization failures and deadlocks (SQLSTATE 40001 / 40P01) become
/// [`DomainError::ConcurrencyConflict`], which the writer retries with
/// re-validation. Everything else is a [`DomainError::Persistence`].
pub(crate) fn classify_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(ref db) = err {
        if matches!(db.code().as_deref(), Some("40001") | Some("40P01")) {
            return DomainError::ConcurrencyConflict;
        }
    }
    DomainError::Persistence(Box::new(err))
}

/// `true` if `err` is a unique violation on the named constraint.
pub(crate) fn is_unique_violation(err: &sqlx::Error, constraint: &str) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db)
            if db.code().as_deref() == Some("23505") && db.constraint() == Some(constraint)
    )
}
