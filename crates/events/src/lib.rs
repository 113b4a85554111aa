//! BOSTARTER activity notifier: the event bus and its best-effort sinks.
//!
//! - [`EventBus`] — in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`DomainEvent`] — the typed envelope for funding-core events.
//! - [`AuditWriter`] — background task appending every event to the
//!   `events` table.
//! - [`Notifier`] — background task translating events into in-app
//!   notification rows.
//!
//! Both sinks are best-effort by contract: a failed write is logged and
//! dropped, and publishing never blocks or fails the transaction that
//! produced the event.

pub mod audit;
pub mod bus;
pub mod notifier;

pub use audit::AuditWriter;
pub use bus::{DomainEvent, EventBus};
pub use notifier::Notifier;
