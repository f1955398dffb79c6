use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use crate::config::NotifyConfig;
use crate::mailer::{MailTransport, OutgoingEmail};
use crate::template::{TemplateEngine, TemplateKind};

use super::types::{DispatchResult, DispatcherStats, DispatcherStatsSnapshot, NotificationRequest};

/// Pause between send attempts when retries are configured
const RETRY_DELAY: Duration = Duration::from_millis(500);

/// Renders and delivers notifications through an injected mail transport.
///
/// `dispatch` never returns an error: validation failures, transport
/// failures, and timeouts all become a `DispatchResult` with
/// `success = false`, so a failed notification can never abort the request
/// that triggered it.
pub struct NotificationDispatcher {
    mailer: Arc<dyn MailTransport>,
    templates: TemplateEngine,
    sender: String,
    admin_email: String,
    timeout: Duration,
    retry_attempts: u32,
    stats: DispatcherStats,
}

impl NotificationDispatcher {
    pub fn new(
        mailer: Arc<dyn MailTransport>,
        templates: TemplateEngine,
        config: &NotifyConfig,
    ) -> Self {
        Self {
            mailer,
            templates,
            sender: config.sender.clone(),
            admin_email: config.admin_email.clone(),
            timeout: Duration::from_secs(config.timeout_seconds),
            retry_attempts: config.retry_attempts,
            stats: DispatcherStats::default(),
        }
    }

    /// Recipient of admin-facing notifications.
    pub fn admin_email(&self) -> &str {
        &self.admin_email
    }

    /// Get dispatcher statistics.
    pub fn stats(&self) -> DispatcherStatsSnapshot {
        self.stats.snapshot()
    }

    /// Render and deliver one notification.
    #[tracing::instrument(
        name = "notify.dispatch",
        skip(self, request),
        fields(
            recipient = %request.recipient,
            template = %request.kind.as_str()
        )
    )]
    pub async fn dispatch(&self, request: NotificationRequest) -> DispatchResult {
        self.stats.total_dispatched.fetch_add(1, Ordering::Relaxed);

        // Local validation happens before any network call
        if let Err(reason) = request.validate() {
            self.stats.validation_failures.fetch_add(1, Ordering::Relaxed);
            self.stats.total_failed.fetch_add(1, Ordering::Relaxed);
            tracing::warn!(reason = %reason, "Rejected notification before dispatch");
            return DispatchResult::failure(reason);
        }

        let document = self.templates.render(&request.body_fragment, request.kind);
        let mail = OutgoingEmail {
            from: self.sender.clone(),
            to: request.recipient.clone(),
            subject: request.subject.clone(),
            html_body: document,
        };

        let mut last_error = String::new();
        for attempt in 0..=self.retry_attempts {
            if attempt > 0 {
                tokio::time::sleep(RETRY_DELAY).await;
                tracing::debug!(attempt = attempt, "Retrying notification send");
            }

            match tokio::time::timeout(self.timeout, self.mailer.send(&mail)).await {
                Ok(Ok(message_id)) => {
                    self.stats.total_delivered.fetch_add(1, Ordering::Relaxed);
                    tracing::info!(
                        message_id = %message_id,
                        subject = %request.subject,
                        "Notification delivered"
                    );
                    return DispatchResult::delivered(message_id);
                }
                Ok(Err(e)) => {
                    last_error = e.to_string();
                }
                Err(_) => {
                    last_error = format!(
                        "mail transport timed out after {}s",
                        self.timeout.as_secs()
                    );
                }
            }
        }

        self.stats.total_failed.fetch_add(1, Ordering::Relaxed);
        tracing::error!(
            recipient = %request.recipient,
            error = %last_error,
            "Notification dispatch failed"
        );
        DispatchResult::failure(last_error)
    }

    /// Deliver a notification to the configured administrator using the
    /// admin shell.
    pub async fn dispatch_to_admin(
        &self,
        subject: impl Into<String>,
        body_fragment: impl Into<String>,
    ) -> DispatchResult {
        self.dispatch(NotificationRequest {
            recipient: self.admin_email.clone(),
            subject: subject.into(),
            body_fragment: body_fragment.into(),
            kind: TemplateKind::Admin,
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicU64;

    use async_trait::async_trait;
    use tokio::sync::Mutex;

    use crate::mailer::{MailerError, OutgoingEmail};

    use super::*;

    /// Transport double that records invocations and replays a scripted
    /// outcome.
    struct MockTransport {
        calls: AtomicU64,
        sent: Mutex<Vec<OutgoingEmail>>,
        outcome: MockOutcome,
    }

    enum MockOutcome {
        Deliver(&'static str),
        Fail(&'static str),
        Hang,
    }

    impl MockTransport {
        fn new(outcome: MockOutcome) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicU64::new(0),
                sent: Mutex::new(Vec::new()),
                outcome,
            })
        }

        fn call_count(&self) -> u64 {
            self.calls.load(Ordering::Relaxed)
        }
    }

    #[async_trait]
    impl MailTransport for MockTransport {
        async fn send(&self, mail: &OutgoingEmail) -> Result<String, MailerError> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            self.sent.lock().await.push(mail.clone());
            match &self.outcome {
                MockOutcome::Deliver(id) => Ok((*id).to_string()),
                MockOutcome::Fail(msg) => Err(MailerError::Unavailable((*msg).to_string())),
                MockOutcome::Hang => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    unreachable!()
                }
            }
        }
    }

    fn dispatcher(mailer: Arc<MockTransport>, config: NotifyConfig) -> NotificationDispatcher {
        let templates = TemplateEngine::new(config.console_url.clone());
        NotificationDispatcher::new(mailer, templates, &config)
    }

    fn request(recipient: &str) -> NotificationRequest {
        NotificationRequest {
            recipient: recipient.to_string(),
            subject: "Test".to_string(),
            body_fragment: "<p>hello</p>".to_string(),
            kind: TemplateKind::Default,
        }
    }

    #[tokio::test]
    async fn test_missing_recipient_skips_transport() {
        let mailer = MockTransport::new(MockOutcome::Deliver("abc123"));
        let dispatcher = dispatcher(mailer.clone(), NotifyConfig::default());

        let result = dispatcher.dispatch(request("")).await;

        assert!(!result.success);
        assert!(result.error.unwrap().contains("recipient"));
        assert_eq!(mailer.call_count(), 0);
        assert_eq!(dispatcher.stats().validation_failures, 1);
    }

    #[tokio::test]
    async fn test_successful_dispatch_returns_message_id() {
        let mailer = MockTransport::new(MockOutcome::Deliver("abc123"));
        let dispatcher = dispatcher(mailer.clone(), NotifyConfig::default());

        let result = dispatcher.dispatch(request("user@example.com")).await;

        assert!(result.success);
        assert_eq!(result.message_id.as_deref(), Some("abc123"));
        assert!(result.error.is_none());
        assert_eq!(mailer.call_count(), 1);

        // The transport received a complete rendered document
        let sent = mailer.sent.lock().await;
        assert!(sent[0].html_body.starts_with("<!DOCTYPE html>"));
        assert!(sent[0].html_body.contains("<p>hello</p>"));
    }

    #[tokio::test]
    async fn test_transport_failure_is_contained() {
        let mailer = MockTransport::new(MockOutcome::Fail("auth failed"));
        let dispatcher = dispatcher(mailer.clone(), NotifyConfig::default());

        let result = dispatcher.dispatch(request("user@example.com")).await;

        assert!(!result.success);
        assert!(result.error.unwrap().contains("auth failed"));
        assert_eq!(dispatcher.stats().total_failed, 1);
    }

    #[tokio::test]
    async fn test_retry_attempts_are_honored() {
        let mailer = MockTransport::new(MockOutcome::Fail("connection refused"));
        let config = NotifyConfig {
            retry_attempts: 2,
            ..NotifyConfig::default()
        };
        let dispatcher = dispatcher(mailer.clone(), config);

        let result = dispatcher.dispatch(request("user@example.com")).await;

        assert!(!result.success);
        assert_eq!(mailer.call_count(), 3);
    }

    #[tokio::test]
    async fn test_timeout_maps_to_distinct_error() {
        let mailer = MockTransport::new(MockOutcome::Hang);
        let config = NotifyConfig {
            timeout_seconds: 1,
            ..NotifyConfig::default()
        };
        let dispatcher = dispatcher(mailer.clone(), config);

        let result = dispatcher.dispatch(request("user@example.com")).await;

        assert!(!result.success);
        assert!(result.error.unwrap().contains("timed out after 1s"));
        assert_eq!(mailer.call_count(), 1);
    }

    #[tokio::test]
    async fn test_dispatch_to_admin_uses_configured_recipient() {
        let mailer = MockTransport::new(MockOutcome::Deliver("id-1"));
        let config = NotifyConfig {
            admin_email: "ops@example.com".to_string(),
            ..NotifyConfig::default()
        };
        let dispatcher = dispatcher(mailer.clone(), config);

        let result = dispatcher
            .dispatch_to_admin("Heads up", "<p>something happened</p>")
            .await;

        assert!(result.success);
        let sent = mailer.sent.lock().await;
        assert_eq!(sent[0].to, "ops@example.com");
        // Admin shell carries the console call-to-action
        assert!(sent[0].html_body.contains("Open Admin Console"));
    }
}
