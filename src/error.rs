//! Error types and handling for the Outlook client
//!
//! This module defines the error types used throughout the application,
//! providing consistent error handling and reporting.

use thiserror::Error;

/// Result type alias for Outlook client operations
pub type Result<T> = std::result::Result<T, OutlookError>;

/// Main error type for the Outlook client
#[derive(Debug, Error)]
pub enum OutlookError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Validation errors
    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    /// Transport/I/O failures while talking to the portal
    #[error("Connection error: {message}")]
    Connection { message: String },

    /// The login page did not contain the expected form
    #[error("Login form not found: {message}")]
    LoginFormNotFound { message: String },

    /// The login form had no action target
    #[error("Login URL missing: {message}")]
    LoginUrlMissing { message: String },

    /// Credential submission was rejected
    #[error("Login failed: {message}")]
    LoginFailed { message: String },

    /// An authenticated request bounced back to the login page
    #[error("Session expired: {message}")]
    SessionExpired { message: String },

    /// A JSON payload was missing expected keys or structure
    #[error("Malformed payload: {message}")]
    MalformedPayload { message: String },

    /// Tariff blob or currency string could not be parsed
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// File I/O errors
    #[error("I/O error: {message}")]
    Io { message: String },
}

impl OutlookError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        OutlookError::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(field: S, message: S) -> Self {
        OutlookError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new connection error
    pub fn connection<S: Into<String>>(message: S) -> Self {
        OutlookError::Connection {
            message: message.into(),
        }
    }

    /// Create a new login-form-not-found error
    pub fn login_form_not_found<S: Into<String>>(message: S) -> Self {
        OutlookError::LoginFormNotFound {
            message: message.into(),
        }
    }

    /// Create a new login-URL-missing error
    pub fn login_url_missing<S: Into<String>>(message: S) -> Self {
        OutlookError::LoginUrlMissing {
            message: message.into(),
        }
    }

    /// Create a new login-failed error
    pub fn login_failed<S: Into<String>>(message: S) -> Self {
        OutlookError::LoginFailed {
            message: message.into(),
        }
    }

    /// Create a new session-expired error
    pub fn session_expired<S: Into<String>>(message: S) -> Self {
        OutlookError::SessionExpired {
            message: message.into(),
        }
    }

    /// Create a new malformed-payload error
    pub fn malformed_payload<S: Into<String>>(message: S) -> Self {
        OutlookError::MalformedPayload {
            message: message.into(),
        }
    }

    /// Create a new parse error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        OutlookError::Parse {
            message: message.into(),
        }
    }

    /// Create a new I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        OutlookError::Io {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for OutlookError {
    fn from(err: std::io::Error) -> Self {
        OutlookError::io(err.to_string())
    }
}

impl From<serde_yaml::Error> for OutlookError {
    fn from(err: serde_yaml::Error) -> Self {
        OutlookError::Config {
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for OutlookError {
    fn from(err: reqwest::Error) -> Self {
        OutlookError::connection(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = OutlookError::config("test config error");
        assert!(matches!(err, OutlookError::Config { .. }));

        let err = OutlookError::login_failed("bad status");
        assert!(matches!(err, OutlookError::LoginFailed { .. }));

        let err = OutlookError::validation("field", "test validation error");
        assert!(matches!(err, OutlookError::Validation { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = OutlookError::connection("connection refused");
        assert_eq!(format!("{}", err), "Connection error: connection refused");

        let err = OutlookError::malformed_payload("selectedPeriod missing");
        assert_eq!(
            format!("{}", err),
            "Malformed payload: selectedPeriod missing"
        );

        let err = OutlookError::validation("portal.username", "cannot be empty");
        assert_eq!(
            format!("{}", err),
            "Validation error: portal.username - cannot be empty"
        );
    }
}
