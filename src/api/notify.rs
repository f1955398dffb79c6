//! Pure notification endpoints: no persistence, one dispatch per call.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::notify::{compose, NotificationRequest};
use crate::server::AppState;
use crate::storage::{BundleUpdate, NewContactMessage, NewGalleryImage};
use crate::template::TemplateKind;

use super::StatusEnvelope;

/// Generic notify-by-recipient request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendNotificationRequest {
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub subject: String,
    /// Pre-escaped HTML content fragment
    #[serde(default)]
    pub content: String,
    /// Template kind; unknown values fall back to "default"
    #[serde(default = "default_template")]
    pub template: String,
}

fn default_template() -> String {
    "default".to_string()
}

/// Bundle-update notice request (notify only, nothing is persisted).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleNoticeRequest {
    #[serde(default)]
    pub bundle_id: String,
    #[serde(flatten)]
    pub update: BundleUpdate,
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!(
            "missing required field: {field}"
        )));
    }
    Ok(())
}

/// Convert a dispatch outcome into the HTTP contract: 200 with a message id
/// on success, 500 on transport failure.
fn into_response(
    result: crate::notify::DispatchResult,
    message: &str,
) -> Result<Json<StatusEnvelope>> {
    if result.success {
        Ok(Json(
            StatusEnvelope::ok(message).with_message_id(result.message_id),
        ))
    } else {
        Err(AppError::Transport(
            result
                .error
                .unwrap_or_else(|| "notification dispatch failed".to_string()),
        ))
    }
}

/// Send a notification to an arbitrary recipient.
#[tracing::instrument(
    name = "http.send_notification",
    skip(state, request),
    fields(to = %request.to, template = %request.template)
)]
pub async fn send_notification(
    State(state): State<AppState>,
    Json(request): Json<SendNotificationRequest>,
) -> Result<Json<StatusEnvelope>> {
    require("to", &request.to)?;
    require("subject", &request.subject)?;
    require("content", &request.content)?;

    let result = state
        .dispatcher
        .dispatch(NotificationRequest {
            recipient: request.to,
            subject: request.subject,
            body_fragment: request.content,
            kind: TemplateKind::parse(&request.template),
        })
        .await;

    into_response(result, "Notification sent")
}

/// Notify the administrator about a contact message.
#[tracing::instrument(name = "http.notify_new_message", skip(state, request))]
pub async fn notify_new_message(
    State(state): State<AppState>,
    Json(request): Json<NewContactMessage>,
) -> Result<Json<StatusEnvelope>> {
    require("name", &request.name)?;
    require("email", &request.email)?;
    require("message", &request.message)?;

    let notice = compose::contact_message(&request);
    let result = state
        .dispatcher
        .dispatch_to_admin(notice.subject, notice.fragment)
        .await;

    into_response(result, "Message notification sent")
}

/// Notify the administrator about a gallery upload.
#[tracing::instrument(name = "http.notify_image_upload", skip(state, request))]
pub async fn notify_image_upload(
    State(state): State<AppState>,
    Json(request): Json<NewGalleryImage>,
) -> Result<Json<StatusEnvelope>> {
    let notice = compose::image_upload(&request);
    let result = state
        .dispatcher
        .dispatch_to_admin(notice.subject, notice.fragment)
        .await;

    into_response(result, "Image notification sent")
}

/// Notify the administrator about a bundle change.
#[tracing::instrument(
    name = "http.notify_bundle_update",
    skip(state, request),
    fields(bundle_id = %request.bundle_id)
)]
pub async fn notify_bundle_update(
    State(state): State<AppState>,
    Json(request): Json<BundleNoticeRequest>,
) -> Result<Json<StatusEnvelope>> {
    require("bundleId", &request.bundle_id)?;
    require("name", &request.update.name)?;
    require("price", &request.update.price)?;

    let notice = compose::bundle_update(&request.bundle_id, &request.update);
    let result = state
        .dispatcher
        .dispatch_to_admin(notice.subject, notice.fragment)
        .await;

    into_response(result, "Bundle notification sent")
}
