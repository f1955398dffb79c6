//! Gallery image endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::notify::compose;
use crate::server::AppState;
use crate::storage::{GalleryImage, NewGalleryImage, UpdateGalleryImage};

use super::{ApiEnvelope, StatusEnvelope};

#[derive(Debug, Deserialize)]
pub struct ListImagesQuery {
    /// When true, only images visible on the public site are returned
    #[serde(default)]
    pub visible: bool,
}

/// Register an uploaded image and notify the administrator.
#[tracing::instrument(name = "http.create_image", skip(state, request))]
pub async fn create_image(
    State(state): State<AppState>,
    Json(request): Json<NewGalleryImage>,
) -> Result<Json<ApiEnvelope<GalleryImage>>> {
    if request.title.trim().is_empty() {
        return Err(AppError::Validation(
            "missing required field: title".to_string(),
        ));
    }

    let record = state.store.insert_image(request.clone()).await?;

    let notice = compose::image_upload(&request);
    let notification = state
        .dispatcher
        .dispatch_to_admin(notice.subject, notice.fragment)
        .await;

    Ok(Json(
        ApiEnvelope::ok("Gallery image saved")
            .with_data(record)
            .with_notification(notification),
    ))
}

pub async fn list_images(
    State(state): State<AppState>,
    Query(query): Query<ListImagesQuery>,
) -> Result<Json<ApiEnvelope<Vec<GalleryImage>>>> {
    let records = state.store.list_images(query.visible).await?;
    Ok(Json(ApiEnvelope::ok("Images retrieved").with_data(records)))
}

#[tracing::instrument(name = "http.update_image", skip(state, update))]
pub async fn update_image(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<UpdateGalleryImage>,
) -> Result<Json<ApiEnvelope<GalleryImage>>> {
    let record = state.store.update_image(id, update).await?;
    Ok(Json(ApiEnvelope::ok("Gallery image updated").with_data(record)))
}

#[tracing::instrument(name = "http.delete_image", skip(state))]
pub async fn delete_image(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StatusEnvelope>> {
    state.store.delete_image(id).await?;
    Ok(Json(StatusEnvelope::ok("Gallery image deleted")))
}
