//! mce-recovery: password recovery emails for MCE Onboarding
//!
//! Given an account email address, a one-time recovery token and the
//! requesting application's base URL, this crate builds the recovery
//! callback link, renders a branded HTML + plain text email and sends it
//! through SMTP.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use mce_recovery::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     mce_recovery::observability::init()?;
//!
//!     // APP_URL, EMAIL_SERVER and EMAIL_FROM
//!     let config = Arc::new(RecoveryConfig::load()?);
//!     let mailer = RecoveryMailer::new(config);
//!
//!     mailer
//!         .send_recovery_email(RecoveryRequest::new(
//!             "jane.doe@example.com",
//!             "abc123",
//!             "https://portal.example.com",
//!         ))
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! Token generation, storage and expiry, rate limiting and retries belong to
//! the caller.

pub mod config;
pub mod email;
pub mod observability;
pub mod recovery;
pub mod testing;

pub mod prelude {
    //! Convenience re-exports for common types and traits

    pub use crate::config::RecoveryConfig;
    pub use crate::email::{
        Email, EmailError, EmailSender, LettreConnector, ServerDescriptor, SmtpSettings,
        TransportConfig, TransportConnector,
    };
    pub use crate::recovery::{
        FailureKind, ProviderChoice, RecoveryError, RecoveryMailer, RecoveryRequest,
    };
}
