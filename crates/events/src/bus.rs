//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is shared via `Arc<EventBus>` across the application. Events
//! are published after the transaction that produced them commits, in commit
//! order, so subscribers observe per-project FIFO; ordering across projects
//! is not guaranteed.

use bostarter_core::project::ProjectState;
use bostarter_core::types::{DbId, Timestamp};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// DomainEvent
// ---------------------------------------------------------------------------

/// A domain event emitted by the funding core.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DomainEvent {
    /// A pledge was committed to the ledger.
    PledgeAccepted {
        project_id: DbId,
        backer_id: DbId,
        amount: Decimal,
        timestamp: Timestamp,
    },
    /// A project moved to a new lifecycle state.
    ProjectStateChanged {
        project_id: DbId,
        old_state: ProjectState,
        new_state: ProjectState,
        timestamp: Timestamp,
    },
    /// A creator's materialized reliability score moved.
    ReliabilityChanged {
        creator_id: DbId,
        new_score: Decimal,
        timestamp: Timestamp,
    },
}

impl DomainEvent {
    pub fn pledge_accepted(project_id: DbId, backer_id: DbId, amount: Decimal) -> Self {
        DomainEvent::PledgeAccepted {
            project_id,
            backer_id,
            amount,
            timestamp: Utc::now(),
        }
    }

    pub fn project_state_changed(
        project_id: DbId,
        old_state: ProjectState,
        new_state: ProjectState,
    ) -> Self {
        DomainEvent::ProjectStateChanged {
            project_id,
            old_state,
            new_state,
            timestamp: Utc::now(),
        }
    }

    pub fn reliability_changed(creator_id: DbId, new_score: Decimal) -> Self {
        DomainEvent::ReliabilityChanged {
            creator_id,
            new_score,
            timestamp: Utc::now(),
        }
    }

    /// Dot-separated event name used by the audit log and notifications.
    pub fn event_type(&self) -> &'static str {
        match self {
            DomainEvent::PledgeAccepted { .. } => "pledge.accepted",
            DomainEvent::ProjectStateChanged { .. } => "project.state_changed",
            DomainEvent::ReliabilityChanged { .. } => "reliability.changed",
        }
    }

    /// `(entity type, entity id)` of the event's source.
    pub fn source(&self) -> (&'static str, DbId) {
        match self {
            DomainEvent::PledgeAccepted { project_id, .. }
            | DomainEvent::ProjectStateChanged { project_id, .. } => ("project", *project_id),
            DomainEvent::ReliabilityChanged { creator_id, .. } => ("user", *creator_id),
        }
    }

    /// The acting user, where one is attributable.
    pub fn actor(&self) -> Option<DbId> {
        match self {
            DomainEvent::PledgeAccepted { backer_id, .. } => Some(*backer_id),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`DomainEvent`].
pub struct EventBus {
    sender: broadcast::Sender<DomainEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// If there are no active subscribers the event is silently dropped;
    /// delivery is best-effort by contract.
    pub fn publish(&self, event: DomainEvent) {
        // Ignore the SendError -- it only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_and_receive_single_subscriber() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        bus.publish(DomainEvent::pledge_accepted(42, 7, Decimal::new(2500, 2)));

        let received = rx.recv().await.expect("should receive the event");
        assert_eq!(received.event_type(), "pledge.accepted");
        assert_eq!(received.source(), ("project", 42));
        assert_eq!(received.actor(), Some(7));
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_event() {
        let bus = EventBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(DomainEvent::project_state_changed(
            1,
            ProjectState::Open,
            ProjectState::Funded,
        ));

        let e1 = rx1.recv().await.expect("subscriber 1 should receive");
        let e2 = rx2.recv().await.expect("subscriber 2 should receive");
        assert_eq!(e1.event_type(), "project.state_changed");
        assert_eq!(e2.event_type(), "project.state_changed");
    }

    #[test]
    fn publish_with_no_subscribers_does_not_panic() {
        let bus = EventBus::default();
        bus.publish(DomainEvent::reliability_changed(9, Decimal::new(5000, 2)));
    }

    #[test]
    fn events_preserve_publish_order_per_project() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        bus.publish(DomainEvent::pledge_accepted(1, 2, Decimal::ONE));
        bus.publish(DomainEvent::project_state_changed(
            1,
            ProjectState::Open,
            ProjectState::Funded,
        ));

        let first = rx.try_recv().unwrap();
        let second = rx.try_recv().unwrap();
        assert_eq!(first.event_type(), "pledge.accepted");
        assert_eq!(second.event_type(), "project.state_changed");
    }

    #[test]
    fn serializes_with_event_tag() {
        let event = DomainEvent::reliability_changed(3, Decimal::new(3333, 2));
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "reliability_changed");
        assert_eq!(json["creator_id"], 3);
    }
}
