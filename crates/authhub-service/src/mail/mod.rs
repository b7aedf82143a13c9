//! Outbound mail: the `Mailer` seam, the SMTP implementation, and the
//! message templates.

pub mod mailer;
pub mod template;

pub use mailer::{Mailer, NoopMailer, OutboundEmail, SmtpMailer};
