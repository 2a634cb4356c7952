//! Testing utilities for the mail layer
//!
//! [`RecordingEmailSender`] captures sent emails in memory;
//! [`RecordingConnector`] records every transport config it is asked to open
//! and hands out sessions that share one [`RecordingEmailSender`]. Both can
//! be told to fail.
//!
//! ```rust
//! use std::sync::Arc;
//! use mce_recovery::config::RecoveryConfig;
//! use mce_recovery::recovery::{RecoveryMailer, RecoveryRequest};
//! use mce_recovery::testing::RecordingConnector;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let connector = RecordingConnector::new();
//! let config = RecoveryConfig::new("https://mce.example.com")
//!     .with_default_transport("console", "noreply@mce.example.com");
//! let mailer = RecoveryMailer::with_connector(Arc::new(config), connector.clone());
//!
//! mailer
//!     .send_recovery_email(RecoveryRequest::new("jane@example.com", "T1", "https://app.example.com"))
//!     .await?;
//!
//! assert!(connector.sender().was_sent_to("jane@example.com"));
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::email::{Email, EmailError, EmailSender, TransportConfig, TransportConnector};

/// Email sender that records messages instead of delivering them
#[derive(Debug, Clone, Default)]
pub struct RecordingEmailSender {
    sent: Arc<Mutex<Vec<Email>>>,
    attempts: Arc<Mutex<usize>>,
    failure: Option<String>,
}

impl RecordingEmailSender {
    /// Create a sender that accepts every valid email
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sender whose every send fails with an SMTP error
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    /// Number of send attempts, successful or not
    #[must_use]
    pub fn attempts(&self) -> usize {
        *self.attempts.lock()
    }

    /// Number of emails recorded
    #[must_use]
    pub fn sent_count(&self) -> usize {
        self.sent.lock().len()
    }

    /// All recorded emails
    #[must_use]
    pub fn sent_emails(&self) -> Vec<Email> {
        self.sent.lock().clone()
    }

    /// The last recorded email
    #[must_use]
    pub fn last_sent(&self) -> Option<Email> {
        self.sent.lock().last().cloned()
    }

    /// Check if an email was sent to a specific address
    #[must_use]
    pub fn was_sent_to(&self, address: &str) -> bool {
        self.sent
            .lock()
            .iter()
            .any(|email| email.to.iter().any(|to| to == address))
    }
}

#[async_trait]
impl EmailSender for RecordingEmailSender {
    async fn send(&self, email: Email) -> Result<(), EmailError> {
        *self.attempts.lock() += 1;

        if let Some(message) = &self.failure {
            return Err(EmailError::smtp(message.clone()));
        }

        email.validate()?;
        self.sent.lock().push(email);

        Ok(())
    }
}

/// Transport connector that records requested configs
#[derive(Debug, Clone, Default)]
pub struct RecordingConnector {
    sender: RecordingEmailSender,
    configs: Arc<Mutex<Vec<TransportConfig>>>,
    connect_failure: Option<String>,
}

impl RecordingConnector {
    /// Create a connector whose sessions record into a fresh sender
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a connector whose sessions record into `sender`
    #[must_use]
    pub fn with_sender(sender: RecordingEmailSender) -> Self {
        Self {
            sender,
            ..Self::default()
        }
    }

    /// Create a connector that refuses to open sessions
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            connect_failure: Some(message.into()),
            ..Self::default()
        }
    }

    /// The sender shared by every session
    #[must_use]
    pub const fn sender(&self) -> &RecordingEmailSender {
        &self.sender
    }

    /// Every transport config passed to [`TransportConnector::connect`]
    #[must_use]
    pub fn configs(&self) -> Vec<TransportConfig> {
        self.configs.lock().clone()
    }
}

impl TransportConnector for RecordingConnector {
    fn connect(&self, config: &TransportConfig) -> Result<Box<dyn EmailSender>, EmailError> {
        self.configs.lock().push(config.clone());

        if let Some(message) = &self.connect_failure {
            return Err(EmailError::smtp(message.clone()));
        }

        Ok(Box::new(self.sender.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(to: &str) -> Email {
        Email::new()
            .to(to)
            .from("noreply@mce.example.com")
            .subject("Test")
            .text("Hello")
    }

    #[tokio::test]
    async fn test_recording_sender() {
        let sender = RecordingEmailSender::new();

        sender.send(email("user@example.com")).await.unwrap();

        assert_eq!(sender.sent_count(), 1);
        assert_eq!(sender.attempts(), 1);
        assert!(sender.was_sent_to("user@example.com"));
        assert!(!sender.was_sent_to("other@example.com"));
    }

    #[tokio::test]
    async fn test_recording_sender_rejects_invalid() {
        let sender = RecordingEmailSender::new();

        let result = sender.send(Email::new().from("noreply@mce.example.com")).await;

        assert!(result.is_err());
        assert_eq!(sender.sent_count(), 0);
        assert_eq!(sender.attempts(), 1);
    }

    #[tokio::test]
    async fn test_failing_sender_counts_attempts() {
        let sender = RecordingEmailSender::failing("boom");

        assert!(sender.send(email("user@example.com")).await.is_err());
        assert_eq!(sender.attempts(), 1);
        assert_eq!(sender.sent_count(), 0);
    }

    #[tokio::test]
    async fn test_connector_shares_sender() {
        let connector = RecordingConnector::new();
        let config = TransportConfig::new("smtp://localhost", "noreply@mce.example.com");

        connector
            .connect(&config)
            .unwrap()
            .send(email("user@example.com"))
            .await
            .unwrap();

        assert_eq!(connector.configs(), vec![config]);
        assert_eq!(connector.sender().sent_count(), 1);
    }

    #[test]
    fn test_failing_connector_records_config() {
        let connector = RecordingConnector::failing("connection refused");
        let config = TransportConfig::new("smtp://localhost", "noreply@mce.example.com");

        assert!(connector.connect(&config).is_err());
        assert_eq!(connector.configs().len(), 1);
    }
}
