//! Persisted record types and their write-side payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A contact-form submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    pub message: String,
    /// Page the form was submitted from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    /// Whether an administrator has read the message
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a contact message.
///
/// Required string fields default to empty so that missing JSON keys reach
/// handler validation instead of failing deserialization.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContactMessage {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub phone: Option<String>,
    pub service: Option<String>,
    #[serde(default)]
    pub message: String,
    pub page: Option<String>,
}

/// A gallery image record. The binary itself lives in object storage; only
/// metadata is persisted here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImage {
    pub id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: String,
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub size_bytes: i64,
    /// Whether the image is shown on the public site
    pub visible: bool,
    pub created_at: DateTime<Utc>,
}

/// Payload for registering an uploaded image.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGalleryImage {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub filename: String,
    pub url: Option<String>,
    #[serde(default)]
    pub size_bytes: i64,
}

fn default_category() -> String {
    "general".to_string()
}

/// Partial update for a gallery image. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGalleryImage {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub visible: Option<bool>,
}

/// A product bundle shown on the pricing page.
///
/// `price` is a display string (e.g. "2,999"); the system never does
/// arithmetic on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingBundle {
    /// Stable slug identifier (e.g. "home-basic")
    pub id: String,
    pub name: String,
    pub price: String,
    pub features: Vec<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating or replacing a bundle.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleUpdate {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_status() -> String {
    "active".to_string()
}
