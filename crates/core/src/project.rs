//! Project lifecycle state machine and creation rules.
//!
//! States follow `Draft -> Open -> {Funded, Expired, Cancelled}`. The three
//! right-hand states are terminal: a closed project is never reopened and
//! never accepts another pledge.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::types::Timestamp;

/// Status ID type matching SMALLINT/SMALLSERIAL in the database.
pub type StatusId = i16;

/// Minimum number of rewards a project must offer before it can be
/// published. Policy choice; adjust here if tiers become optional.
pub const MIN_REWARDS_TO_PUBLISH: i64 = 1;

/// Project lifecycle state.
///
/// Discriminants match the seed data order (1-based) in the
/// `project_statuses` lookup table.
#[repr(i16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectState {
    Draft = 1,
    Open = 2,
    Funded = 3,
    Expired = 4,
    Cancelled = 5,
}

impl ProjectState {
    /// Return the database status ID.
    pub fn id(self) -> StatusId {
        self as StatusId
    }

    /// Resolve a database status ID back to a state.
    pub fn from_id(id: StatusId) -> Option<Self> {
        match id {
            1 => Some(ProjectState::Draft),
            2 => Some(ProjectState::Open),
            3 => Some(ProjectState::Funded),
            4 => Some(ProjectState::Expired),
            5 => Some(ProjectState::Cancelled),
            _ => None,
        }
    }

    /// `Funded`, `Expired`, and `Cancelled` are terminal: no further
    /// transitions and no further pledges.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ProjectState::Funded | ProjectState::Expired | ProjectState::Cancelled
        )
    }

    /// Only `Open` projects accept pledges.
    pub fn accepts_pledges(self) -> bool {
        self == ProjectState::Open
    }

    /// Whether `self -> to` is a legal transition.
    pub fn can_transition_to(self, to: ProjectState) -> bool {
        matches!(
            (self, to),
            (ProjectState::Draft, ProjectState::Open)
                | (ProjectState::Open, ProjectState::Funded)
                | (ProjectState::Open, ProjectState::Expired)
                | (ProjectState::Open, ProjectState::Cancelled)
        )
    }

    /// Check a transition, producing the typed error on violation.
    pub fn ensure_transition(self, to: ProjectState) -> Result<(), DomainError> {
        if self.can_transition_to(to) {
            Ok(())
        } else {
            Err(DomainError::InvalidTransition { from: self, to })
        }
    }
}

impl std::fmt::Display for ProjectState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ProjectState::Draft => "draft",
            ProjectState::Open => "open",
            ProjectState::Funded => "funded",
            ProjectState::Expired => "expired",
            ProjectState::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// Project category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectKind {
    Hardware,
    Software,
}

impl ProjectKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectKind::Hardware => "hardware",
            ProjectKind::Software => "software",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "hardware" => Some(ProjectKind::Hardware),
            "software" => Some(ProjectKind::Software),
            _ => None,
        }
    }
}

/// Validate the fields of a new project before insertion.
///
/// The funding goal must be strictly positive and the deadline must lie in
/// the future relative to `now`.
pub fn validate_new_project(
    goal_amount: Decimal,
    deadline: Timestamp,
    now: Timestamp,
) -> Result<(), DomainError> {
    if goal_amount <= Decimal::ZERO {
        return Err(DomainError::Validation(
            "funding goal must be a positive amount".into(),
        ));
    }
    if deadline <= now {
        return Err(DomainError::Validation(
            "deadline must be in the future".into(),
        ));
    }
    Ok(())
}

/// Validate that a project is publishable: a future deadline and at least
/// [`MIN_REWARDS_TO_PUBLISH`] reward tiers.
pub fn validate_publish(
    reward_count: i64,
    deadline: Timestamp,
    now: Timestamp,
) -> Result<(), DomainError> {
    if reward_count < MIN_REWARDS_TO_PUBLISH {
        return Err(DomainError::Validation(format!(
            "project must offer at least {MIN_REWARDS_TO_PUBLISH} reward before publishing"
        )));
    }
    if deadline <= now {
        return Err(DomainError::Validation(
            "cannot publish a project whose deadline has passed".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{Duration, Utc};
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn state_ids_match_seed_data() {
        assert_eq!(ProjectState::Draft.id(), 1);
        assert_eq!(ProjectState::Open.id(), 2);
        assert_eq!(ProjectState::Funded.id(), 3);
        assert_eq!(ProjectState::Expired.id(), 4);
        assert_eq!(ProjectState::Cancelled.id(), 5);
    }

    #[test]
    fn from_id_round_trips() {
        for state in [
            ProjectState::Draft,
            ProjectState::Open,
            ProjectState::Funded,
            ProjectState::Expired,
            ProjectState::Cancelled,
        ] {
            assert_eq!(ProjectState::from_id(state.id()), Some(state));
        }
        assert_eq!(ProjectState::from_id(0), None);
        assert_eq!(ProjectState::from_id(6), None);
    }

    #[test]
    fn legal_transitions() {
        assert!(ProjectState::Draft.can_transition_to(ProjectState::Open));
        assert!(ProjectState::Open.can_transition_to(ProjectState::Funded));
        assert!(ProjectState::Open.can_transition_to(ProjectState::Expired));
        assert!(ProjectState::Open.can_transition_to(ProjectState::Cancelled));
    }

    #[test]
    fn terminal_states_never_transition() {
        for from in [
            ProjectState::Funded,
            ProjectState::Expired,
            ProjectState::Cancelled,
        ] {
            assert!(from.is_terminal());
            for to in [
                ProjectState::Draft,
                ProjectState::Open,
                ProjectState::Funded,
                ProjectState::Expired,
                ProjectState::Cancelled,
            ] {
                assert!(!from.can_transition_to(to), "{from:?} -> {to:?}");
            }
        }
    }

    #[test]
    fn no_reopening_or_skipping_draft() {
        assert!(!ProjectState::Draft.can_transition_to(ProjectState::Funded));
        assert!(!ProjectState::Draft.can_transition_to(ProjectState::Expired));
        assert!(!ProjectState::Open.can_transition_to(ProjectState::Draft));
    }

    #[test]
    fn only_open_accepts_pledges() {
        assert!(ProjectState::Open.accepts_pledges());
        assert!(!ProjectState::Draft.accepts_pledges());
        assert!(!ProjectState::Funded.accepts_pledges());
        assert!(!ProjectState::Expired.accepts_pledges());
        assert!(!ProjectState::Cancelled.accepts_pledges());
    }

    #[test]
    fn ensure_transition_reports_both_states() {
        let err = ProjectState::Funded
            .ensure_transition(ProjectState::Open)
            .unwrap_err();
        assert_matches!(
            err,
            DomainError::InvalidTransition {
                from: ProjectState::Funded,
                to: ProjectState::Open,
            }
        );
    }

    #[test]
    fn new_project_requires_positive_goal_and_future_deadline() {
        let now = Utc::now();
        let future = now + Duration::days(30);

        assert!(validate_new_project(Decimal::new(1000, 0), future, now).is_ok());
        assert_matches!(
            validate_new_project(Decimal::ZERO, future, now),
            Err(DomainError::Validation(_))
        );
        assert_matches!(
            validate_new_project(Decimal::new(-5, 0), future, now),
            Err(DomainError::Validation(_))
        );
        assert_matches!(
            validate_new_project(Decimal::new(1000, 0), now - Duration::days(1), now),
            Err(DomainError::Validation(_))
        );
    }

    #[test]
    fn publish_requires_a_reward() {
        let now = Utc::now();
        let future = now + Duration::days(7);

        assert!(validate_publish(1, future, now).is_ok());
        assert_matches!(validate_publish(0, future, now), Err(DomainError::Validation(_)));
    }

    #[test]
    fn publish_requires_future_deadline() {
        let now = Utc::now();
        assert_matches!(
            validate_publish(2, now - Duration::hours(1), now),
            Err(DomainError::Validation(_))
        );
    }

    #[test]
    fn kind_parse_round_trips() {
        assert_eq!(ProjectKind::parse("hardware"), Some(ProjectKind::Hardware));
        assert_eq!(ProjectKind::parse("software"), Some(ProjectKind::Software));
        assert_eq!(ProjectKind::parse("art"), None);
        assert_eq!(ProjectKind::Hardware.as_str(), "hardware");
    }
}
