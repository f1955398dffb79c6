//! Contact message endpoints: persist first, then notify the administrator.
//!
//! Persistence and notification outcomes are reported independently; a
//! failed notification never rolls back or masks a committed insert.

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::notify::compose;
use crate::server::AppState;
use crate::storage::{ContactMessage, NewContactMessage};

use super::{ApiEnvelope, StatusEnvelope};

/// Accept a contact-form submission.
#[tracing::instrument(name = "http.create_message", skip(state, request))]
pub async fn create_message(
    State(state): State<AppState>,
    Json(request): Json<NewContactMessage>,
) -> Result<Json<ApiEnvelope<ContactMessage>>> {
    for (field, value) in [
        ("name", &request.name),
        ("email", &request.email),
        ("message", &request.message),
    ] {
        if value.trim().is_empty() {
            return Err(AppError::Validation(format!(
                "missing required field: {field}"
            )));
        }
    }

    let record = state.store.insert_message(request.clone()).await?;

    let notice = compose::contact_message(&request);
    let notification = state
        .dispatcher
        .dispatch_to_admin(notice.subject, notice.fragment)
        .await;

    Ok(Json(
        ApiEnvelope::ok("Contact message saved")
            .with_data(record)
            .with_notification(notification),
    ))
}

pub async fn list_messages(
    State(state): State<AppState>,
) -> Result<Json<ApiEnvelope<Vec<ContactMessage>>>> {
    let records = state.store.list_messages().await?;
    Ok(Json(ApiEnvelope::ok("Messages retrieved").with_data(records)))
}

#[tracing::instrument(name = "http.mark_message_read", skip(state))]
pub async fn mark_message_read(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiEnvelope<ContactMessage>>> {
    let record = state.store.mark_message_read(id).await?;
    Ok(Json(ApiEnvelope::ok("Message marked as read").with_data(record)))
}

#[tracing::instrument(name = "http.delete_message", skip(state))]
pub async fn delete_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StatusEnvelope>> {
    state.store.delete_message(id).await?;
    Ok(Json(StatusEnvelope::ok("Message deleted")))
}
