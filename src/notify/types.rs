use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::template::TemplateKind;

/// One notification to render and deliver.
#[derive(Debug, Clone)]
pub struct NotificationRequest {
    /// Recipient mailbox
    pub recipient: String,
    pub subject: String,
    /// Pre-escaped HTML content fragment
    pub body_fragment: String,
    pub kind: TemplateKind,
}

impl NotificationRequest {
    /// Check the invariant that recipient, subject, and body are non-empty.
    pub fn validate(&self) -> Result<(), String> {
        if self.recipient.trim().is_empty() {
            return Err("missing required field: recipient".to_string());
        }
        if self.subject.trim().is_empty() {
            return Err("missing required field: subject".to_string());
        }
        if self.body_fragment.trim().is_empty() {
            return Err("missing required field: content".to_string());
        }
        Ok(())
    }
}

/// Outcome of a single dispatch attempt.
///
/// `message_id` is present iff the transport acknowledged delivery;
/// `error` is present iff it did not.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DispatchResult {
    pub fn delivered(message_id: String) -> Self {
        Self {
            success: true,
            message_id: Some(message_id),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message_id: None,
            error: Some(error.into()),
        }
    }
}

/// Counters for the notification dispatcher.
#[derive(Debug, Default)]
pub struct DispatcherStats {
    /// Total dispatch calls
    pub total_dispatched: AtomicU64,
    /// Dispatches acknowledged by the transport
    pub total_delivered: AtomicU64,
    /// Dispatches that ended in failure
    pub total_failed: AtomicU64,
    /// Failures caught before any transport call
    pub validation_failures: AtomicU64,
}

impl DispatcherStats {
    pub fn snapshot(&self) -> DispatcherStatsSnapshot {
        DispatcherStatsSnapshot {
            total_dispatched: self.total_dispatched.load(Ordering::Relaxed),
            total_delivered: self.total_delivered.load(Ordering::Relaxed),
            total_failed: self.total_failed.load(Ordering::Relaxed),
            validation_failures: self.validation_failures.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of dispatcher counters.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatcherStatsSnapshot {
    pub total_dispatched: u64,
    pub total_delivered: u64,
    pub total_failed: u64,
    pub validation_failures: u64,
}
