//! Recovery dispatch errors

use std::fmt;

use thiserror::Error;

use crate::email::EmailError;

/// Where in the dispatch path a failure happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Transport settings missing or malformed
    Configuration,
    /// Message rendering failed
    Composition,
    /// Connection, authentication or send failure at the mail server
    Transport,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Self::Configuration => "configuration",
            Self::Composition => "composition",
            Self::Transport => "transport",
        };
        f.write_str(kind)
    }
}

/// Failure to send a recovery email
///
/// Displays as the generic `Error` so transport details never reach end
/// users. The underlying cause stays available through
/// [`std::error::Error::source`] and [`RecoveryError::kind`].
#[derive(Debug, Error)]
#[error("Error")]
pub struct RecoveryError {
    kind: FailureKind,
    #[source]
    source: EmailError,
}

impl RecoveryError {
    /// Create a recovery error of the given kind
    #[must_use]
    pub const fn new(kind: FailureKind, source: EmailError) -> Self {
        Self { kind, source }
    }

    /// Configuration failure
    #[must_use]
    pub const fn configuration(source: EmailError) -> Self {
        Self::new(FailureKind::Configuration, source)
    }

    /// Composition failure
    #[must_use]
    pub const fn composition(source: EmailError) -> Self {
        Self::new(FailureKind::Composition, source)
    }

    /// Transport failure
    #[must_use]
    pub const fn transport(source: EmailError) -> Self {
        Self::new(FailureKind::Transport, source)
    }

    /// Where the failure happened
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        self.kind
    }

    /// The underlying email error
    #[must_use]
    pub const fn cause(&self) -> &EmailError {
        &self.source
    }
}
