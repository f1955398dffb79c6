//! SMTP transport backed by lettre.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use uuid::Uuid;

use crate::config::SmtpConfig;

use super::{MailTransport, MailerError, OutgoingEmail};

/// SMTP mail transport. The underlying lettre transport keeps a pooled
/// connection, so one `SmtpMailer` is built at startup and shared.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    host: String,
}

impl SmtpMailer {
    /// Build a transport from configuration.
    ///
    /// `secure` selects implicit TLS (SMTPS, port 465 style); otherwise the
    /// connection is upgraded with STARTTLS on the submission port.
    pub fn new(config: &SmtpConfig) -> Result<Self, MailerError> {
        let mut builder = if config.secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
        };

        builder = builder.port(config.port);

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        } else {
            tracing::warn!(host = %config.host, "SMTP credentials not configured");
        }

        Ok(Self {
            transport: builder.build(),
            host: config.host.clone(),
        })
    }

    /// Probe the server: connect, greet, and authenticate if credentials are
    /// configured. Used once at startup to surface misconfiguration early.
    pub async fn verify(&self) -> Result<(), MailerError> {
        let ok = self.transport.test_connection().await?;
        if ok {
            Ok(())
        } else {
            Err(MailerError::Unavailable(format!(
                "{} rejected the connection probe",
                self.host
            )))
        }
    }
}

/// Mint an RFC 5322 Message-ID scoped to the sender's domain.
fn new_message_id(from: &Mailbox) -> String {
    format!("<{}@{}>", Uuid::new_v4(), from.email.domain())
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, mail: &OutgoingEmail) -> Result<String, MailerError> {
        let from: Mailbox = mail.from.parse()?;
        let to: Mailbox = mail.to.parse()?;
        let message_id = new_message_id(&from);

        let message = Message::builder()
            .from(from)
            .to(to)
            .subject(&mail.subject)
            .message_id(Some(message_id.clone()))
            .header(ContentType::TEXT_HTML)
            .body(mail.html_body.clone())?;

        self.transport.send(message).await?;

        tracing::debug!(
            to = %mail.to,
            message_id = %message_id,
            "Email accepted by SMTP server"
        );

        Ok(message_id)
    }
}
