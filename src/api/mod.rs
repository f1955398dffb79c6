//! HTTP surface: route table, handlers, and the shared response envelope.

mod bundles;
mod gallery;
mod health;
mod messages;
mod notify;
mod routes;

use serde::Serialize;

use crate::notify::DispatchResult;

pub use routes::api_routes;

/// Uniform success envelope.
///
/// `messageId` is set by the pure notify endpoints; `data` carries persisted
/// records; `notification` reports the dispatch outcome independently of the
/// persistence outcome for the domain endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEnvelope<T: Serialize> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<DispatchResult>,
}

impl<T: Serialize> ApiEnvelope<T> {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            message_id: None,
            data: None,
            notification: None,
        }
    }

    pub fn with_data(mut self, data: T) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_message_id(mut self, message_id: Option<String>) -> Self {
        self.message_id = message_id;
        self
    }

    pub fn with_notification(mut self, notification: DispatchResult) -> Self {
        self.notification = Some(notification);
        self
    }
}

/// Envelope for endpoints that return no record payload.
pub type StatusEnvelope = ApiEnvelope<()>;
