use std::fmt;

use thiserror::Error;

/// Message shown when the service rejects a login without explaining why.
pub const LOGIN_FAILED_FALLBACK: &str = "Login failed.";

/// Message shown when the service could not be reached.
pub const UNREACHABLE_MESSAGE: &str = "Network error. Is the authentication service running?";

/// Credential form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialField {
    Username,
    Password,
}

impl fmt::Display for CredentialField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CredentialField::Username => "username",
            CredentialField::Password => "password",
        })
    }
}

/// Why a login attempt did not produce a session.
///
/// The `Display` text of every variant is the inline message shown to the
/// user.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A required field was empty; no request was sent.
    #[error("Please fill out the {0} field.")]
    MissingField(CredentialField),

    /// The service answered with a non-success status.
    #[error("{0}")]
    Rejected(String),

    /// The request did not complete or the reply could not be understood.
    #[error("{}", UNREACHABLE_MESSAGE)]
    Unreachable(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl AuthError {
    pub(crate) fn unreachable(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        AuthError::Unreachable(err.into())
    }

    /// Builds a rejection from the service's `error` string, if any.
    pub(crate) fn rejected(message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| LOGIN_FAILED_FALLBACK.to_string());
        AuthError::Rejected(message)
    }
}
