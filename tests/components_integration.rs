//! Cross-component integration tests
//!
//! These tests wire the real template engine, dispatcher, and in-memory
//! store together with a scripted mail transport, without requiring
//! PostgreSQL or an SMTP server.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use wavelink_site_service::config::NotifyConfig;
use wavelink_site_service::mailer::{MailTransport, MailerError, OutgoingEmail};
use wavelink_site_service::notify::{compose, NotificationDispatcher, NotificationRequest};
use wavelink_site_service::storage::{
    BundleUpdate, MemoryStore, NewContactMessage, NewGalleryImage, SiteStore,
};
use wavelink_site_service::template::{TemplateEngine, TemplateKind};

/// Mail transport double that records every send and replays a scripted
/// outcome.
struct ScriptedTransport {
    calls: AtomicU64,
    sent: Mutex<Vec<OutgoingEmail>>,
    fail_with: Option<&'static str>,
}

impl ScriptedTransport {
    fn delivering() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicU64::new(0),
            sent: Mutex::new(Vec::new()),
            fail_with: None,
        })
    }

    fn failing(reason: &'static str) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicU64::new(0),
            sent: Mutex::new(Vec::new()),
            fail_with: Some(reason),
        })
    }

    fn call_count(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }

    async fn last_sent(&self) -> OutgoingEmail {
        self.sent.lock().await.last().cloned().expect("no mail sent")
    }
}

#[async_trait]
impl MailTransport for ScriptedTransport {
    async fn send(&self, mail: &OutgoingEmail) -> Result<String, MailerError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.sent.lock().await.push(mail.clone());
        match self.fail_with {
            Some(reason) => Err(MailerError::Unavailable(reason.to_string())),
            None => Ok("abc123".to_string()),
        }
    }
}

fn test_config() -> NotifyConfig {
    NotifyConfig {
        sender: "Wavelink Support <support@wavelink.test>".to_string(),
        admin_email: "admin@wavelink.test".to_string(),
        console_url: "https://admin.wavelink.test".to_string(),
        timeout_seconds: 5,
        retry_attempts: 0,
    }
}

fn create_dispatcher(transport: Arc<ScriptedTransport>) -> NotificationDispatcher {
    let config = test_config();
    let templates = TemplateEngine::new(config.console_url.clone());
    NotificationDispatcher::new(transport, templates, &config)
}

fn contact_submission() -> NewContactMessage {
    NewContactMessage {
        name: "<script>".to_string(),
        email: "a@b.com".to_string(),
        phone: None,
        service: Some("Home Fibre".to_string()),
        message: "hello".to_string(),
        page: Some("contact".to_string()),
    }
}

// =============================================================================
// Dispatch Integration Tests
// =============================================================================

mod dispatch_tests {
    use super::*;

    #[tokio::test]
    async fn test_contact_notification_is_escaped_end_to_end() {
        let transport = ScriptedTransport::delivering();
        let dispatcher = create_dispatcher(transport.clone());

        let notice = compose::contact_message(&contact_submission());
        let result = dispatcher
            .dispatch_to_admin(notice.subject, notice.fragment)
            .await;

        assert!(result.success);
        assert_eq!(result.message_id.as_deref(), Some("abc123"));

        let mail = transport.last_sent().await;
        assert_eq!(mail.to, "admin@wavelink.test");
        assert!(mail.html_body.contains("&lt;script&gt;"));
        assert!(!mail.html_body.contains("<script>"));
        assert!(mail.html_body.contains("a@b.com"));
        assert!(mail.html_body.contains("hello"));
        // Admin shell with the console link wraps the fragment
        assert!(mail.html_body.starts_with("<!DOCTYPE html>"));
        assert!(mail.html_body.contains("https://admin.wavelink.test"));
    }

    #[tokio::test]
    async fn test_validation_failure_never_reaches_transport() {
        let transport = ScriptedTransport::delivering();
        let dispatcher = create_dispatcher(transport.clone());

        for request in [
            NotificationRequest {
                recipient: String::new(),
                subject: "s".to_string(),
                body_fragment: "<p>b</p>".to_string(),
                kind: TemplateKind::Default,
            },
            NotificationRequest {
                recipient: "a@b.com".to_string(),
                subject: String::new(),
                body_fragment: "<p>b</p>".to_string(),
                kind: TemplateKind::Default,
            },
            NotificationRequest {
                recipient: "a@b.com".to_string(),
                subject: "s".to_string(),
                body_fragment: String::new(),
                kind: TemplateKind::Default,
            },
        ] {
            let result = dispatcher.dispatch(request).await;
            assert!(!result.success);
            assert!(result.error.is_some());
        }

        assert_eq!(transport.call_count(), 0);
        assert_eq!(dispatcher.stats().validation_failures, 3);
    }

    #[tokio::test]
    async fn test_transport_failure_surfaces_in_result() {
        let transport = ScriptedTransport::failing("auth failed");
        let dispatcher = create_dispatcher(transport.clone());

        let result = dispatcher
            .dispatch(NotificationRequest {
                recipient: "user@example.com".to_string(),
                subject: "Welcome".to_string(),
                body_fragment: "<p>hi</p>".to_string(),
                kind: TemplateKind::Default,
            })
            .await;

        assert!(!result.success);
        assert!(result.message_id.is_none());
        assert!(result.error.unwrap().contains("auth failed"));
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_bundle_notice_uses_admin_shell() {
        let transport = ScriptedTransport::delivering();
        let dispatcher = create_dispatcher(transport.clone());

        let update = BundleUpdate {
            name: "Home Basic".to_string(),
            price: "2,999".to_string(),
            features: vec!["10 Mbps".to_string(), "Free installation".to_string()],
            status: "active".to_string(),
        };
        let notice = compose::bundle_update("home-basic", &update);
        let result = dispatcher
            .dispatch_to_admin(notice.subject, notice.fragment)
            .await;

        assert!(result.success);
        let mail = transport.last_sent().await;
        assert_eq!(mail.subject, "Bundle Updated");
        assert!(mail.html_body.contains("KSh 2,999"));
        assert!(mail.html_body.contains("<li>10 Mbps</li>"));
        assert!(mail.html_body.contains("Open Admin Console"));
    }
}

// =============================================================================
// Persist-then-notify Flow Tests
// =============================================================================

mod flow_tests {
    use super::*;

    #[tokio::test]
    async fn test_persisted_record_survives_notify_failure() {
        let store = MemoryStore::new();
        let transport = ScriptedTransport::failing("connection refused");
        let dispatcher = create_dispatcher(transport.clone());

        // Persist first, then notify, the way the handlers do
        let submission = contact_submission();
        let record = store.insert_message(submission.clone()).await.unwrap();

        let notice = compose::contact_message(&submission);
        let notification = dispatcher
            .dispatch_to_admin(notice.subject, notice.fragment)
            .await;

        // The notification failed...
        assert!(!notification.success);
        // ...but the committed record is still there
        let listed = store.list_messages().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, record.id);
    }

    #[tokio::test]
    async fn test_image_upload_flow() {
        let store = MemoryStore::new();
        let transport = ScriptedTransport::delivering();
        let dispatcher = create_dispatcher(transport.clone());

        let upload = NewGalleryImage {
            title: "Night install".to_string(),
            description: Some("Rooftop antenna at dusk".to_string()),
            category: "installs".to_string(),
            filename: "night.jpg".to_string(),
            url: Some("https://cdn.wavelink.test/night.jpg".to_string()),
            size_bytes: 512 * 1024,
        };

        let record = store.insert_image(upload.clone()).await.unwrap();
        assert!(record.visible);

        let notice = compose::image_upload(&upload);
        let notification = dispatcher
            .dispatch_to_admin(notice.subject, notice.fragment)
            .await;

        assert!(notification.success);
        let mail = transport.last_sent().await;
        assert_eq!(mail.subject, "New Image Uploaded to Gallery");
        assert!(mail.html_body.contains("Night install"));
        assert!(mail.html_body.contains("0.50 MB"));
        assert!(mail.html_body.contains("View Image"));
    }

    #[tokio::test]
    async fn test_dispatcher_stats_accumulate_across_flows() {
        let transport = ScriptedTransport::delivering();
        let dispatcher = create_dispatcher(transport.clone());

        dispatcher
            .dispatch_to_admin("One", "<p>one</p>")
            .await;
        dispatcher
            .dispatch(NotificationRequest {
                recipient: String::new(),
                subject: "Two".to_string(),
                body_fragment: "<p>two</p>".to_string(),
                kind: TemplateKind::Default,
            })
            .await;

        let stats = dispatcher.stats();
        assert_eq!(stats.total_dispatched, 2);
        assert_eq!(stats.total_delivered, 1);
        assert_eq!(stats.total_failed, 1);
        assert_eq!(stats.validation_failures, 1);
    }
}

// =============================================================================
// Renderer Property Tests
// =============================================================================

mod renderer_tests {
    use super::*;

    #[test]
    fn test_render_round_trip_is_byte_identical() {
        let engine = TemplateEngine::new("https://admin.wavelink.test");
        let fragment = "<h2>Fixed fragment</h2><p>with content</p>";

        let first = engine.render(fragment, TemplateKind::Admin);
        let second = engine.render(fragment, TemplateKind::Admin);
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_kind_matches_default_render() {
        let engine = TemplateEngine::new("https://admin.wavelink.test");
        let fragment = "<p>anything</p>";

        assert_eq!(
            engine.render(fragment, TemplateKind::parse("unknown-kind")),
            engine.render(fragment, TemplateKind::Default)
        );
    }
}
