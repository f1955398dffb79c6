//! In-memory `SiteStore` implementation.
//!
//! Used by the test suite and as the fallback backend when no database URL
//! is configured. Nothing survives a restart.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::models::{
    BundleUpdate, ContactMessage, GalleryImage, NewContactMessage, NewGalleryImage,
    PricingBundle, UpdateGalleryImage,
};
use super::{SiteStore, StoreError};

/// Volatile store keeping all records in process memory.
#[derive(Default)]
pub struct MemoryStore {
    messages: RwLock<HashMap<Uuid, ContactMessage>>,
    images: RwLock<HashMap<Uuid, GalleryImage>>,
    bundles: RwLock<HashMap<String, PricingBundle>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SiteStore for MemoryStore {
    async fn insert_message(&self, new: NewContactMessage) -> Result<ContactMessage, StoreError> {
        let record = ContactMessage {
            id: Uuid::new_v4(),
            name: new.name,
            email: new.email,
            phone: new.phone,
            service: new.service,
            message: new.message,
            page: new.page,
            read: false,
            created_at: Utc::now(),
        };

        self.messages
            .write()
            .await
            .insert(record.id, record.clone());
        Ok(record)
    }

    async fn list_messages(&self) -> Result<Vec<ContactMessage>, StoreError> {
        let mut records: Vec<_> = self.messages.read().await.values().cloned().collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    async fn mark_message_read(&self, id: Uuid) -> Result<ContactMessage, StoreError> {
        let mut messages = self.messages.write().await;
        match messages.get_mut(&id) {
            Some(record) => {
                record.read = true;
                Ok(record.clone())
            }
            None => Err(StoreError::NotFound(format!("contact message {id}"))),
        }
    }

    async fn delete_message(&self, id: Uuid) -> Result<(), StoreError> {
        self.messages
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(format!("contact message {id}")))
    }

    async fn insert_image(&self, new: NewGalleryImage) -> Result<GalleryImage, StoreError> {
        let record = GalleryImage {
            id: Uuid::new_v4(),
            title: new.title,
            description: new.description,
            category: new.category,
            filename: new.filename,
            url: new.url,
            size_bytes: new.size_bytes,
            visible: true,
            created_at: Utc::now(),
        };

        self.images.write().await.insert(record.id, record.clone());
        Ok(record)
    }

    async fn list_images(&self, only_visible: bool) -> Result<Vec<GalleryImage>, StoreError> {
        let mut records: Vec<_> = self
            .images
            .read()
            .await
            .values()
            .filter(|img| img.visible || !only_visible)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    async fn update_image(
        &self,
        id: Uuid,
        update: UpdateGalleryImage,
    ) -> Result<GalleryImage, StoreError> {
        let mut images = self.images.write().await;
        match images.get_mut(&id) {
            Some(record) => {
                if let Some(title) = update.title {
                    record.title = title;
                }
                if let Some(description) = update.description {
                    record.description = Some(description);
                }
                if let Some(category) = update.category {
                    record.category = category;
                }
                if let Some(visible) = update.visible {
                    record.visible = visible;
                }
                Ok(record.clone())
            }
            None => Err(StoreError::NotFound(format!("gallery image {id}"))),
        }
    }

    async fn delete_image(&self, id: Uuid) -> Result<(), StoreError> {
        self.images
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(format!("gallery image {id}")))
    }

    async fn list_bundles(&self) -> Result<Vec<PricingBundle>, StoreError> {
        let mut records: Vec<_> = self.bundles.read().await.values().cloned().collect();
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(records)
    }

    async fn get_bundle(&self, id: &str) -> Result<PricingBundle, StoreError> {
        self.bundles
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("bundle {id}")))
    }

    async fn upsert_bundle(
        &self,
        id: &str,
        update: BundleUpdate,
    ) -> Result<PricingBundle, StoreError> {
        let mut bundles = self.bundles.write().await;
        let now = Utc::now();

        let record = match bundles.get(id) {
            Some(existing) => PricingBundle {
                id: id.to_string(),
                name: update.name,
                price: update.price,
                features: update.features,
                status: update.status,
                created_at: existing.created_at,
                updated_at: now,
            },
            None => PricingBundle {
                id: id.to_string(),
                name: update.name,
                price: update.price,
                features: update.features,
                status: update.status,
                created_at: now,
                updated_at: now,
            },
        };

        bundles.insert(id.to_string(), record.clone());
        Ok(record)
    }

    async fn delete_bundle(&self, id: &str) -> Result<(), StoreError> {
        self.bundles
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(format!("bundle {id}")))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn backend_type(&self) -> &'static str {
        "memory"
    }
}
