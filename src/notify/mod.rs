//! Notification dispatch.
//!
//! The dispatcher turns a `NotificationRequest` into one rendered HTML
//! document and one transport call, converting every failure into a
//! `DispatchResult` instead of an error. Composition helpers build the
//! subject + fragment pairs for the predefined site events.

pub mod compose;
mod dispatcher;
mod types;

pub use dispatcher::NotificationDispatcher;
pub use types::{DispatchResult, DispatcherStats, DispatcherStatsSnapshot, NotificationRequest};
