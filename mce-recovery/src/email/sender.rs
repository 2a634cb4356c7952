//! Email sender trait abstraction
//!
//! A sender is one open transport session. It is obtained from a
//! [`TransportConnector`](super::TransportConnector) for a single
//! [`TransportConfig`](super::TransportConfig) and dropped once the message
//! has been handed over.

use async_trait::async_trait;

use super::{Email, EmailError};

/// Trait for sending emails
///
/// Implemented by all email backends (SMTP, console, test doubles).
///
/// # Examples
///
/// ```rust
/// use mce_recovery::email::{ConsoleBackend, Email, EmailSender};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let sender = ConsoleBackend::new();
///
/// let email = Email::new()
///     .to("user@example.com")
///     .from("noreply@mce.example.com")
///     .subject("Hello!")
///     .text("Hello, World!");
///
/// sender.send(email).await?;
/// # Ok(())
/// # }
/// ```
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Send an email
    ///
    /// # Errors
    ///
    /// Returns `EmailError` if the email cannot be sent or is invalid
    async fn send(&self, email: Email) -> Result<(), EmailError>;
}
