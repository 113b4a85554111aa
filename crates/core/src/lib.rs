//! BOSTARTER domain core.
//!
//! Pure, I/O-free building blocks of the funding engine:
//!
//! - [`error::DomainError`] — the typed error taxonomy shared by every crate.
//! - [`project`] — project lifecycle state machine and creation rules.
//! - [`pledge`] — ordered pledge validation rules.
//! - [`reliability`] — creator reliability computation.
//! - [`ownership`] — the single ownership predicate used before any mutation.
//!
//! Everything here operates on plain values; persistence and transactions
//! live in `bostarter-db` and `bostarter-ledger`.

pub mod error;
pub mod money;
pub mod ownership;
pub mod pledge;
pub mod project;
pub mod reliability;
pub mod types;

pub use error::DomainError;
pub use project::{ProjectKind, ProjectState};
