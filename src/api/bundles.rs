//! Pricing bundle endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::{AppError, Result};
use crate::notify::compose;
use crate::server::AppState;
use crate::storage::{BundleUpdate, PricingBundle};

use super::{ApiEnvelope, StatusEnvelope};

pub async fn list_bundles(
    State(state): State<AppState>,
) -> Result<Json<ApiEnvelope<Vec<PricingBundle>>>> {
    let records = state.store.list_bundles().await?;
    Ok(Json(ApiEnvelope::ok("Bundles retrieved").with_data(records)))
}

#[tracing::instrument(name = "http.get_bundle", skip(state))]
pub async fn get_bundle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiEnvelope<PricingBundle>>> {
    let record = state.store.get_bundle(&id).await?;
    Ok(Json(ApiEnvelope::ok("Bundle retrieved").with_data(record)))
}

/// Create or replace a bundle, then notify the administrator.
#[tracing::instrument(name = "http.update_bundle", skip(state, update))]
pub async fn update_bundle(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<BundleUpdate>,
) -> Result<Json<ApiEnvelope<PricingBundle>>> {
    for (field, value) in [("name", &update.name), ("price", &update.price)] {
        if value.trim().is_empty() {
            return Err(AppError::Validation(format!(
                "missing required field: {field}"
            )));
        }
    }

    let record = state.store.upsert_bundle(&id, update.clone()).await?;

    let notice = compose::bundle_update(&id, &update);
    let notification = state
        .dispatcher
        .dispatch_to_admin(notice.subject, notice.fragment)
        .await;

    Ok(Json(
        ApiEnvelope::ok("Bundle saved")
            .with_data(record)
            .with_notification(notification),
    ))
}

#[tracing::instrument(name = "http.delete_bundle", skip(state))]
pub async fn delete_bundle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StatusEnvelope>> {
    state.store.delete_bundle(&id).await?;
    Ok(Json(StatusEnvelope::ok("Bundle deleted")))
}
