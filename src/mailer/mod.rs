//! Outbound mail transport.
//!
//! `MailTransport` is the seam between the notification dispatcher and the
//! actual delivery mechanism. Production uses [`SmtpMailer`] over lettre;
//! tests substitute recording doubles.

mod smtp;

use async_trait::async_trait;
use thiserror::Error;

pub use smtp::SmtpMailer;

/// Errors that can occur while sending mail.
#[derive(Debug, Error)]
pub enum MailerError {
    /// A mailbox string could not be parsed
    #[error("Invalid mailbox address: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled
    #[error("Failed to build message: {0}")]
    Build(#[from] lettre::error::Error),

    /// Connection, auth, or provider rejection during send
    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    /// The server is reachable but refused the connection probe
    #[error("SMTP connection test failed: {0}")]
    Unavailable(String),
}

/// A fully composed outbound email.
#[derive(Debug, Clone)]
pub struct OutgoingEmail {
    /// Sender mailbox, e.g. `Support <support@example.com>`
    pub from: String,
    /// Recipient mailbox
    pub to: String,
    pub subject: String,
    /// Complete HTML document body
    pub html_body: String,
}

/// Transport abstraction for outbound email.
///
/// `send` returns the RFC 5322 Message-ID assigned to the delivered message.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, mail: &OutgoingEmail) -> Result<String, MailerError>;
}
