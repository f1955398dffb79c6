use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::server::AppState;

use super::bundles::{delete_bundle, get_bundle, list_bundles, update_bundle};
use super::gallery::{create_image, delete_image, list_images, update_image};
use super::health::{health, stats};
use super::messages::{create_message, delete_message, list_messages, mark_message_read};
use super::notify::{
    notify_bundle_update, notify_image_upload, notify_new_message, send_notification,
};

pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health & Stats
        .route("/health", get(health))
        .route("/stats", get(stats))
        .nest(
            "/api",
            Router::new()
                // Notification endpoints
                .route("/send-notification", post(send_notification))
                .route("/notify/new-message", post(notify_new_message))
                .route("/notify/image-upload", post(notify_image_upload))
                .route("/notify/bundle-update", post(notify_bundle_update))
                // Contact messages
                .route("/messages", post(create_message).get(list_messages))
                .route("/messages/{id}/read", patch(mark_message_read))
                .route("/messages/{id}", delete(delete_message))
                // Gallery images
                .route("/gallery", post(create_image).get(list_images))
                .route("/gallery/{id}", patch(update_image).delete(delete_image))
                // Pricing bundles
                .route("/bundles", get(list_bundles))
                .route(
                    "/bundles/{id}",
                    get(get_bundle).put(update_bundle).delete(delete_bundle),
                ),
        )
}
