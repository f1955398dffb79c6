//! Persistence layer for site content.
//!
//! Defines the `SiteStore` abstraction over the three content tables
//! (contact messages, gallery images, pricing bundles) with interchangeable
//! backends: PostgreSQL for deployments and an in-memory store for tests
//! and local development.

mod memory;
mod models;
mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::config::DatabaseConfig;

pub use memory::MemoryStore;
pub use models::{
    BundleUpdate, ContactMessage, GalleryImage, NewContactMessage, NewGalleryImage,
    PricingBundle, UpdateGalleryImage,
};
pub use postgres::PostgresStore;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested record does not exist
    #[error("Record not found: {0}")]
    NotFound(String),

    /// PostgreSQL operation failed
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sqlx::Error),

    /// Serialization error (JSONB columns)
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Storage abstraction over the site's content tables.
///
/// Every mutating call commits before it returns; notification dispatch is
/// layered on top by the API handlers and never participates in a store
/// transaction.
#[async_trait]
pub trait SiteStore: Send + Sync {
    // Contact messages
    async fn insert_message(&self, new: NewContactMessage) -> Result<ContactMessage, StoreError>;
    async fn list_messages(&self) -> Result<Vec<ContactMessage>, StoreError>;
    async fn mark_message_read(&self, id: Uuid) -> Result<ContactMessage, StoreError>;
    async fn delete_message(&self, id: Uuid) -> Result<(), StoreError>;

    // Gallery images
    async fn insert_image(&self, new: NewGalleryImage) -> Result<GalleryImage, StoreError>;
    async fn list_images(&self, only_visible: bool) -> Result<Vec<GalleryImage>, StoreError>;
    async fn update_image(
        &self,
        id: Uuid,
        update: UpdateGalleryImage,
    ) -> Result<GalleryImage, StoreError>;
    async fn delete_image(&self, id: Uuid) -> Result<(), StoreError>;

    // Pricing bundles
    async fn list_bundles(&self) -> Result<Vec<PricingBundle>, StoreError>;
    async fn get_bundle(&self, id: &str) -> Result<PricingBundle, StoreError>;
    async fn upsert_bundle(
        &self,
        id: &str,
        update: BundleUpdate,
    ) -> Result<PricingBundle, StoreError>;
    async fn delete_bundle(&self, id: &str) -> Result<(), StoreError>;

    /// Cheap connectivity probe for the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Backend type identifier for health reporting.
    fn backend_type(&self) -> &'static str;
}

/// Create a store backend from configuration.
///
/// An empty database URL selects the in-memory store so the service can run
/// without PostgreSQL (tests, local development).
pub async fn create_store(config: &DatabaseConfig) -> Result<Arc<dyn SiteStore>, StoreError> {
    if config.url.is_empty() {
        tracing::warn!("database.url not set, using in-memory store");
        Ok(Arc::new(MemoryStore::new()))
    } else {
        let store = PostgresStore::connect(config).await?;
        Ok(Arc::new(store))
    }
}
