//! The single ownership predicate applied before any core mutation.
//!
//! Authentication happens upstream; the engine only ever compares an
//! already-established actor id against a resource's owner.

use crate::error::DomainError;
use crate::types::DbId;

/// `true` when the actor owns the resource.
pub fn is_owner(actor_id: DbId, owner_id: DbId) -> bool {
    actor_id == owner_id
}

/// Ownership check producing the typed error on failure.
pub fn ensure_owner(actor_id: DbId, owner_id: DbId) -> Result<(), DomainError> {
    if is_owner(actor_id, owner_id) {
        Ok(())
    } else {
        Err(DomainError::Forbidden(
            "only the project creator may perform this action".into(),
        ))
    }
}
