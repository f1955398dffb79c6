//! Composition helpers for the predefined site events.
//!
//! Each helper builds a subject line plus an HTML content fragment for the
//! dispatcher. Every interpolated field is HTML-escaped here; the renderer
//! trusts its input.

use chrono::Utc;

use crate::storage::{BundleUpdate, NewContactMessage, NewGalleryImage};
use crate::template::escape_html;

/// Subject + fragment pair ready for dispatch.
#[derive(Debug, Clone)]
pub struct ComposedNotice {
    pub subject: String,
    pub fragment: String,
}

fn timestamp() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Notice for a new contact-form submission.
pub fn contact_message(msg: &NewContactMessage) -> ComposedNotice {
    let phone = msg.phone.as_deref().unwrap_or("Not provided");
    let service = msg.service.as_deref().unwrap_or("Not specified");
    let page = msg.page.as_deref().unwrap_or("Contact Form");

    let fragment = format!(
        r#"<h2>New Message from Website Contact Form</h2>
<div style="background: #f3f4f6; padding: 15px; border-radius: 8px; margin: 15px 0;">
  <p><strong>Name:</strong> {name}</p>
  <p><strong>Email:</strong> {email}</p>
  <p><strong>Phone:</strong> {phone}</p>
  <p><strong>Service:</strong> {service}</p>
</div>
<h3>Message:</h3>
<blockquote style="border-left: 4px solid #2563eb; padding-left: 15px; margin: 15px 0; color: #4b5563;">{message}</blockquote>
<p><small>Received at: {received}</small></p>
<p><small>From: {page}</small></p>"#,
        name = escape_html(&msg.name),
        email = escape_html(&msg.email),
        phone = escape_html(phone),
        service = escape_html(service),
        message = escape_html(&msg.message),
        received = timestamp(),
        page = escape_html(page),
    );

    ComposedNotice {
        subject: "New Contact Message Received".to_string(),
        fragment,
    }
}

/// Notice for a new gallery upload.
pub fn image_upload(img: &NewGalleryImage) -> ComposedNotice {
    let title = if img.title.is_empty() {
        "Untitled"
    } else {
        img.title.as_str()
    };
    let description = img.description.as_deref().unwrap_or("No description");
    let filename = if img.filename.is_empty() {
        "Unknown"
    } else {
        img.filename.as_str()
    };
    let size_mb = img.size_bytes as f64 / 1024.0 / 1024.0;

    let link = match img.url.as_deref() {
        Some(url) => format!(
            "\n  <p><strong>URL:</strong> <a href=\"{}\">View Image</a></p>",
            escape_html(url)
        ),
        None => String::new(),
    };

    let fragment = format!(
        r#"<h2>New Image Added to Gallery</h2>
<div style="background: #f3f4f6; padding: 15px; border-radius: 8px; margin: 15px 0;">
  <p><strong>Title:</strong> {title}</p>
  <p><strong>Description:</strong> {description}</p>
  <p><strong>Category:</strong> {category}</p>
  <p><strong>File:</strong> {filename}</p>
  <p><strong>Size:</strong> {size_mb:.2} MB</p>{link}
</div>
<p><small>Uploaded at: {uploaded}</small></p>"#,
        title = escape_html(title),
        description = escape_html(description),
        category = escape_html(&img.category),
        filename = escape_html(filename),
        size_mb = size_mb,
        link = link,
        uploaded = timestamp(),
    );

    ComposedNotice {
        subject: "New Image Uploaded to Gallery".to_string(),
        fragment,
    }
}

/// Notice for a bundle create/update.
pub fn bundle_update(bundle_id: &str, update: &BundleUpdate) -> ComposedNotice {
    let features = if update.features.is_empty() {
        "<li>No features listed</li>".to_string()
    } else {
        update
            .features
            .iter()
            .map(|f| format!("<li>{}</li>", escape_html(f)))
            .collect::<Vec<_>>()
            .join("")
    };

    let fragment = format!(
        r#"<h2>Bundle Information Updated</h2>
<div style="background: #f3f4f6; padding: 15px; border-radius: 8px; margin: 15px 0;">
  <p><strong>Bundle ID:</strong> {id}</p>
  <p><strong>Name:</strong> {name}</p>
  <p><strong>Price:</strong> KSh {price}</p>
</div>
<h3>Features:</h3>
<ul>{features}</ul>
<p><small>Updated at: {updated}</small></p>"#,
        id = escape_html(bundle_id),
        name = escape_html(&update.name),
        price = escape_html(&update.price),
        features = features,
        updated = timestamp(),
    );

    ComposedNotice {
        subject: "Bundle Updated".to_string(),
        fragment,
    }
}
