//! The `Mailer` trait and its SMTP / no-op implementations.
//!
//! Business flows never await delivery on the request path: dispatches are
//! spawned fire-and-forget and failures are logged, not propagated.

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, warn};

use authhub_core::config::MailConfig;
use authhub_core::error::AppError;
use authhub_core::result::AppResult;

/// An outbound notification email.
#[derive(Debug, Clone)]
pub struct OutboundEmail {
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
}

/// Delivery seam for outbound notifications.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver one email.
    async fn send(&self, email: OutboundEmail) -> AppResult<()>;
}

/// SMTP mailer over a STARTTLS relay.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Build the SMTP transport from configuration.
    pub fn new(config: &MailConfig) -> AppResult<Self> {
        let from: Mailbox = config
            .from
            .parse()
            .map_err(|e| AppError::configuration(format!("Invalid mail.from address: {e}")))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| AppError::configuration(format!("Invalid SMTP relay: {e}")))?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: OutboundEmail) -> AppResult<()> {
        let to: Mailbox = email
            .to
            .parse()
            .map_err(|e| AppError::validation(format!("Invalid recipient address: {e}")))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(&email.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(email.body)
            .map_err(|e| AppError::internal(format!("Failed to build email: {e}")))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| AppError::external_service(format!("SMTP delivery failed: {e}")))?;

        debug!(to = %email.to, subject = %email.subject, "Email delivered");
        Ok(())
    }
}

/// Mailer used when outbound mail is disabled; drops everything.
#[derive(Debug, Clone, Default)]
pub struct NoopMailer;

#[async_trait]
impl Mailer for NoopMailer {
    async fn send(&self, email: OutboundEmail) -> AppResult<()> {
        debug!(to = %email.to, subject = %email.subject, "Mail disabled, dropping email");
        Ok(())
    }
}

/// Spawn a fire-and-forget delivery. The caller is never blocked and a
/// failed delivery only produces a warning.
pub fn dispatch(mailer: std::sync::Arc<dyn Mailer>, email: OutboundEmail) {
    tokio::spawn(async move {
        let to = email.to.clone();
        if let Err(e) = mailer.send(email).await {
            warn!(to = %to, error = %e, "Failed to deliver notification email");
        }
    });
}
