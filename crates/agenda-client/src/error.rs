//! Client error types.

use std::path::Path;

use agenda_providers::{ProviderError, ProviderErrorCode};
use thiserror::Error;

/// Result type for client operations.
pub type AgendaResult<T> = Result<T, AgendaError>;

/// Exit code for a fatal error.
pub const EXIT_FAILURE: u8 = 1;

/// Exit code for an authorization state the client does not know.
pub const EXIT_UNKNOWN_AUTHORIZATION: u8 = 2;

/// Errors that end an agenda run.
#[derive(Debug, Error)]
pub enum AgendaError {
    /// Calendar access was refused.
    #[error("No access to calendars{}", denial_suffix(.reason))]
    AccessDenied {
        /// Why access was refused, when the provider says.
        reason: Option<String>,
    },

    /// The provider could not be queried.
    #[error("calendar provider unavailable: {0}")]
    ProviderUnavailable(#[source] ProviderError),

    /// The provider reported an authorization state outside the known ones.
    #[error("unknown calendar authorization state: {0}")]
    UnknownAuthorizationState(String),

    /// A provider record violated the event contract.
    #[error("invalid event data: {0}")]
    InvalidInput(#[source] ProviderError),

    /// The provider dropped the access callback without answering.
    #[error("calendar provider never answered the access request")]
    AccessCallbackDropped,

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AgendaError {
    /// Creates a configuration error for a file that could not be read.
    pub fn config_file(path: &Path, message: impl std::fmt::Display) -> Self {
        Self::Config(format!("{}: {}", path.display(), message))
    }

    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::UnknownAuthorizationState(_) => EXIT_UNKNOWN_AUTHORIZATION,
            Self::AccessDenied { .. }
            | Self::ProviderUnavailable(_)
            | Self::InvalidInput(_)
            | Self::AccessCallbackDropped
            | Self::Config(_)
            | Self::Io(_) => EXIT_FAILURE,
        }
    }

    /// Returns true if the error message belongs on stdout.
    ///
    /// An access denial is the run's answer, not a diagnostic.
    pub fn is_user_message(&self) -> bool {
        matches!(self, Self::AccessDenied { .. })
    }
}

fn denial_suffix(reason: &Option<String>) -> String {
    reason
        .as_deref()
        .map(|r| format!(": {}", r))
        .unwrap_or_default()
}

impl From<ProviderError> for AgendaError {
    fn from(err: ProviderError) -> Self {
        match err.code() {
            ProviderErrorCode::InvalidInput => Self::InvalidInput(err),
            ProviderErrorCode::AccessDenied => Self::AccessDenied {
                reason: Some(err.message().to_string()),
            },
            ProviderErrorCode::Unavailable
            | ProviderErrorCode::Parse
            | ProviderErrorCode::Io
            | ProviderErrorCode::Internal => Self::ProviderUnavailable(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_denied_message() {
        let err = AgendaError::AccessDenied { reason: None };
        assert_eq!(err.to_string(), "No access to calendars");

        let err = AgendaError::AccessDenied {
            reason: Some("user declined".to_string()),
        };
        assert_eq!(err.to_string(), "No access to calendars: user declined");
        assert!(err.is_user_message());
    }

    #[test]
    fn exit_codes() {
        assert_eq!(AgendaError::AccessDenied { reason: None }.exit_code(), 1);
        assert_eq!(
            AgendaError::UnknownAuthorizationState("restricted".to_string()).exit_code(),
            2
        );
        assert_eq!(AgendaError::AccessCallbackDropped.exit_code(), 1);
        assert_eq!(AgendaError::Config("bad".to_string()).exit_code(), 1);
    }

    #[test]
    fn provider_error_mapping() {
        let err: AgendaError = ProviderError::invalid_input("no title").into();
        assert!(matches!(err, AgendaError::InvalidInput(_)));

        let err: AgendaError = ProviderError::unavailable("offline").into();
        assert!(matches!(err, AgendaError::ProviderUnavailable(_)));
        assert!(!err.is_user_message());

        let err: AgendaError = ProviderError::access_denied("locked").into();
        assert_eq!(err.to_string(), "No access to calendars: locked");
    }
}
