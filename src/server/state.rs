use std::sync::Arc;
use std::time::Instant;

use crate::config::Settings;
use crate::mailer::MailTransport;
use crate::notify::NotificationDispatcher;
use crate::storage::SiteStore;
use crate::template::TemplateEngine;

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub store: Arc<dyn SiteStore>,
    pub dispatcher: Arc<NotificationDispatcher>,
    pub start_time: Instant,
}

impl AppState {
    /// Assemble the application state from injected collaborators. The
    /// store and mail transport are trait objects so tests can substitute
    /// doubles.
    pub fn new(
        settings: Settings,
        store: Arc<dyn SiteStore>,
        mailer: Arc<dyn MailTransport>,
    ) -> Self {
        let templates = TemplateEngine::new(settings.notify.console_url.clone());
        let dispatcher = Arc::new(NotificationDispatcher::new(
            mailer,
            templates,
            &settings.notify,
        ));

        Self {
            settings: Arc::new(settings),
            store,
            dispatcher,
            start_time: Instant::now(),
        }
    }
}
