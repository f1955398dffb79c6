//! PostgreSQL-backed `SiteStore` implementation.
//!
//! Table structure:
//! - `contact_messages` - contact-form submissions with a `read` flag
//! - `gallery_images` - image metadata with a `visible` flag
//! - `pricing_bundles` - product bundles keyed by slug, features as JSONB

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions};
use uuid::Uuid;

use crate::config::DatabaseConfig;

use super::models::{
    BundleUpdate, ContactMessage, GalleryImage, NewContactMessage, NewGalleryImage,
    PricingBundle, UpdateGalleryImage,
};
use super::{SiteStore, StoreError};

type MessageRow = (
    Uuid,
    String,
    String,
    Option<String>,
    Option<String>,
    String,
    Option<String>,
    bool,
    DateTime<Utc>,
);

type ImageRow = (
    Uuid,
    String,
    Option<String>,
    String,
    String,
    Option<String>,
    i64,
    bool,
    DateTime<Utc>,
);

type BundleRow = (
    String,
    String,
    String,
    serde_json::Value,
    String,
    DateTime<Utc>,
    DateTime<Utc>,
);

/// PostgreSQL-backed store.
pub struct PostgresStore {
    /// The underlying connection pool
    pool: PgPool,
}

impl PostgresStore {
    /// Create a store from an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect a new pool from configuration.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.pool_size)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds as u64))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds as u64))
            .connect(&config.url)
            .await?;

        tracing::info!(
            pool_size = config.pool_size,
            "PostgreSQL connection pool created"
        );

        Ok(Self { pool })
    }

    /// Get a reference to the underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn message_from_row(row: MessageRow) -> ContactMessage {
    let (id, name, email, phone, service, message, page, read, created_at) = row;
    ContactMessage {
        id,
        name,
        email,
        phone,
        service,
        message,
        page,
        read,
        created_at,
    }
}

fn image_from_row(row: ImageRow) -> GalleryImage {
    let (id, title, description, category, filename, url, size_bytes, visible, created_at) = row;
    GalleryImage {
        id,
        title,
        description,
        category,
        filename,
        url,
        size_bytes,
        visible,
        created_at,
    }
}

fn bundle_from_row(row: BundleRow) -> Result<PricingBundle, StoreError> {
    let (id, name, price, features, status, created_at, updated_at) = row;
    Ok(PricingBundle {
        id,
        name,
        price,
        features: serde_json::from_value(features)?,
        status,
        created_at,
        updated_at,
    })
}

#[async_trait]
impl SiteStore for PostgresStore {
    async fn insert_message(&self, new: NewContactMessage) -> Result<ContactMessage, StoreError> {
        let row: MessageRow = sqlx::query_as(
            r#"
            INSERT INTO contact_messages (id, name, email, phone, service, message, page, "read", created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, FALSE, NOW())
            RETURNING id, name, email, phone, service, message, page, "read", created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new.name)
        .bind(&new.email)
        .bind(&new.phone)
        .bind(&new.service)
        .bind(&new.message)
        .bind(&new.page)
        .fetch_one(&self.pool)
        .await?;

        let record = message_from_row(row);
        tracing::debug!(message_id = %record.id, "Contact message stored");
        Ok(record)
    }

    async fn list_messages(&self) -> Result<Vec<ContactMessage>, StoreError> {
        let rows: Vec<MessageRow> = sqlx::query_as(
            r#"
            SELECT id, name, email, phone, service, message, page, "read", created_at
            FROM contact_messages
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(message_from_row).collect())
    }

    async fn mark_message_read(&self, id: Uuid) -> Result<ContactMessage, StoreError> {
        let row: Option<MessageRow> = sqlx::query_as(
            r#"
            UPDATE contact_messages
            SET "read" = TRUE
            WHERE id = $1
            RETURNING id, name, email, phone, service, message, page, "read", created_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(message_from_row)
            .ok_or_else(|| StoreError::NotFound(format!("contact message {id}")))
    }

    async fn delete_message(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM contact_messages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("contact message {id}")));
        }
        Ok(())
    }

    async fn insert_image(&self, new: NewGalleryImage) -> Result<GalleryImage, StoreError> {
        let row: ImageRow = sqlx::query_as(
            r#"
            INSERT INTO gallery_images (id, title, description, category, filename, url, size_bytes, visible, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, TRUE, NOW())
            RETURNING id, title, description, category, filename, url, size_bytes, visible, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new.title)
        .bind(&new.description)
        .bind(&new.category)
        .bind(&new.filename)
        .bind(&new.url)
        .bind(new.size_bytes)
        .fetch_one(&self.pool)
        .await?;

        let record = image_from_row(row);
        tracing::debug!(image_id = %record.id, "Gallery image stored");
        Ok(record)
    }

    async fn list_images(&self, only_visible: bool) -> Result<Vec<GalleryImage>, StoreError> {
        let rows: Vec<ImageRow> = sqlx::query_as(
            r#"
            SELECT id, title, description, category, filename, url, size_bytes, visible, created_at
            FROM gallery_images
            WHERE visible OR NOT $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(only_visible)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(image_from_row).collect())
    }

    async fn update_image(
        &self,
        id: Uuid,
        update: UpdateGalleryImage,
    ) -> Result<GalleryImage, StoreError> {
        let row: Option<ImageRow> = sqlx::query_as(
            r#"
            UPDATE gallery_images
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                category = COALESCE($4, category),
                visible = COALESCE($5, visible)
            WHERE id = $1
            RETURNING id, title, description, category, filename, url, size_bytes, visible, created_at
            "#,
        )
        .bind(id)
        .bind(&update.title)
        .bind(&update.description)
        .bind(&update.category)
        .bind(update.visible)
        .fetch_optional(&self.pool)
        .await?;

        row.map(image_from_row)
            .ok_or_else(|| StoreError::NotFound(format!("gallery image {id}")))
    }

    async fn delete_image(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM gallery_images WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("gallery image {id}")));
        }
        Ok(())
    }

    async fn list_bundles(&self) -> Result<Vec<PricingBundle>, StoreError> {
        let rows: Vec<BundleRow> = sqlx::query_as(
            r#"
            SELECT id, name, price, features, status, created_at, updated_at
            FROM pricing_bundles
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(bundle_from_row).collect()
    }

    async fn get_bundle(&self, id: &str) -> Result<PricingBundle, StoreError> {
        let row: Option<BundleRow> = sqlx::query_as(
            r#"
            SELECT id, name, price, features, status, created_at, updated_at
            FROM pricing_bundles
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => bundle_from_row(row),
            None => Err(StoreError::NotFound(format!("bundle {id}"))),
        }
    }

    async fn upsert_bundle(
        &self,
        id: &str,
        update: BundleUpdate,
    ) -> Result<PricingBundle, StoreError> {
        let features = serde_json::to_value(&update.features)?;

        let row: BundleRow = sqlx::query_as(
            r#"
            INSERT INTO pricing_bundles (id, name, price, features, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
            ON CONFLICT (id) DO UPDATE
            SET name = EXCLUDED.name,
                price = EXCLUDED.price,
                features = EXCLUDED.features,
                status = EXCLUDED.status,
                updated_at = NOW()
            RETURNING id, name, price, features, status, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&update.name)
        .bind(&update.price)
        .bind(&features)
        .bind(&update.status)
        .fetch_one(&self.pool)
        .await?;

        let record = bundle_from_row(row)?;
        tracing::debug!(bundle_id = %record.id, "Bundle upserted");
        Ok(record)
    }

    async fn delete_bundle(&self, id: &str) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM pricing_bundles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("bundle {id}")));
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn backend_type(&self) -> &'static str {
        "postgres"
    }
}
