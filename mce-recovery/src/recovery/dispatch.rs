//! Recovery email dispatch
//!
//! Resolves the transport, composes the message and hands it to a freshly
//! opened transport session.

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::config::RecoveryConfig;
use crate::email::{
    Email, EmailError, LettreConnector, TransportConfig, TransportConnector,
};

use super::{callback_link, render_message, MessageContext, RecoveryError};

/// Which transport a request should use
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ProviderChoice {
    /// Use this transport config verbatim
    Explicit(TransportConfig),

    /// Use the configured `EMAIL_SERVER` / `EMAIL_FROM`
    #[default]
    EnvironmentDefault,
}

impl From<Option<TransportConfig>> for ProviderChoice {
    fn from(provider: Option<TransportConfig>) -> Self {
        provider.map_or(Self::EnvironmentDefault, Self::Explicit)
    }
}

/// A single password recovery request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveryRequest {
    /// Account email address; also the recipient
    pub identifier: String,

    /// One-time recovery token
    pub token: String,

    /// Origin of the requesting application
    pub base_url: String,

    /// Transport to send through
    pub provider: ProviderChoice,
}

impl RecoveryRequest {
    /// Create a request using the environment-default transport
    pub fn new(
        identifier: impl Into<String>,
        token: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            token: token.into(),
            base_url: base_url.into(),
            provider: ProviderChoice::EnvironmentDefault,
        }
    }

    /// Send through an explicit transport instead of the environment default
    #[must_use]
    pub fn with_provider(mut self, provider: TransportConfig) -> Self {
        self.provider = ProviderChoice::Explicit(provider);
        self
    }
}

/// Strip a leading `http://` or `https://` from a base URL
///
/// Case-sensitive prefix match; anything else is returned unchanged.
#[must_use]
pub fn site_label(base_url: &str) -> &str {
    base_url
        .strip_prefix("https://")
        .or_else(|| base_url.strip_prefix("http://"))
        .unwrap_or(base_url)
}

/// Sends password recovery emails
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use mce_recovery::config::RecoveryConfig;
/// use mce_recovery::recovery::{RecoveryMailer, RecoveryRequest};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Arc::new(RecoveryConfig::load()?);
/// let mailer = RecoveryMailer::new(config);
///
/// mailer
///     .send_recovery_email(RecoveryRequest::new(
///         "jane.doe@example.com",
///         "abc123",
///         "https://portal.example.com",
///     ))
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct RecoveryMailer<C = LettreConnector> {
    config: Arc<RecoveryConfig>,
    connector: C,
}

impl RecoveryMailer<LettreConnector> {
    /// Create a mailer using the lettre transports
    #[must_use]
    pub const fn new(config: Arc<RecoveryConfig>) -> Self {
        Self::with_connector(config, LettreConnector)
    }
}

impl<C: TransportConnector> RecoveryMailer<C> {
    /// Create a mailer with a custom transport connector
    #[must_use]
    pub const fn with_connector(config: Arc<RecoveryConfig>, connector: C) -> Self {
        Self { config, connector }
    }

    /// The configuration this mailer was built with
    #[must_use]
    pub fn config(&self) -> &RecoveryConfig {
        &self.config
    }

    /// Resolve the transport for a request
    ///
    /// An explicit provider is used as-is; otherwise both `EMAIL_SERVER` and
    /// `EMAIL_FROM` must be configured. Fields are never mixed between the
    /// two sources.
    ///
    /// # Errors
    ///
    /// Returns `EmailError::ConfigError` if the environment default is
    /// selected but incomplete
    pub fn resolve_transport(&self, choice: &ProviderChoice) -> Result<TransportConfig, EmailError> {
        match choice {
            ProviderChoice::Explicit(config) => Ok(config.clone()),
            ProviderChoice::EnvironmentDefault => self.config.default_transport().ok_or_else(|| {
                EmailError::config("EMAIL_SERVER and EMAIL_FROM must both be set")
            }),
        }
    }

    /// Compose and send the recovery email for `request`
    ///
    /// The send is attempted at most once. Every failure is reported as a
    /// single [`RecoveryError`] whose message is the generic `Error`; the
    /// cause is logged and kept as the error source.
    ///
    /// An incomplete environment default (`EMAIL_SERVER` or `EMAIL_FROM`
    /// unset) fails with [`FailureKind::Configuration`] before any transport
    /// is opened, rather than surfacing later as a transport error. Callers
    /// still only see the generic `Error`.
    ///
    /// [`FailureKind::Configuration`]: super::FailureKind::Configuration
    ///
    /// # Errors
    ///
    /// Returns `RecoveryError` if the transport cannot be resolved or opened,
    /// the message cannot be rendered, or the send fails
    pub async fn send_recovery_email(&self, request: RecoveryRequest) -> Result<(), RecoveryError> {
        let result = self.dispatch(&request).await;

        match &result {
            Ok(()) => info!(to = %request.identifier, "Recovery email sent"),
            Err(err) => error!(
                to = %request.identifier,
                kind = %err.kind(),
                cause = %err.cause(),
                "Recovery email failed"
            ),
        }

        result
    }

    async fn dispatch(&self, request: &RecoveryRequest) -> Result<(), RecoveryError> {
        let transport = self
            .resolve_transport(&request.provider)
            .map_err(RecoveryError::configuration)?;

        debug!(
            explicit = matches!(request.provider, ProviderChoice::Explicit(_)),
            "Resolved recovery transport"
        );

        let url = callback_link(&self.config.app_url, &request.identifier, &request.token);
        let message = render_message(MessageContext {
            url: &url,
            site: site_label(&request.base_url),
            email: &request.identifier,
        })
        .map_err(RecoveryError::composition)?;

        let email = Email::new()
            .to(&request.identifier)
            .from(&transport.from)
            .subject(&message.subject)
            .text(&message.text_body)
            .html(&message.html_body);

        let session = self
            .connector
            .connect(&transport)
            .map_err(RecoveryError::transport)?;

        session.send(email).await.map_err(RecoveryError::transport)
    }
}
