use std::fmt;

use serde::{Deserialize, Serialize};

pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    Network,
    Validation,
    NotFound,
    Conflict,
    Server,
    Deserialization,
    Serialization,
    Unknown,
}

impl ErrorKind {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Network => "NETWORK_ERROR",
            Self::Validation => "VALIDATION_ERROR",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::Server => "SERVER_ERROR",
            Self::Deserialization => "DESERIALIZATION_ERROR",
            Self::Serialization => "SERIALIZATION_ERROR",
            Self::Unknown => "UNKNOWN_ERROR",
        }
    }

    #[must_use]
    pub const fn from_status(status: u16) -> Self {
        match status {
            400 | 422 => Self::Validation,
            404 => Self::NotFound,
            409 => Self::Conflict,
            500..=599 => Self::Server,
            _ => Self::Unknown,
        }
    }
}

/// Error body the API sends with non-2xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppError {
    pub kind: ErrorKind,
    /// Message the server put in the body, if any.
    pub server_message: Option<String>,
    pub status: Option<u16>,
    pub internal_message: Option<String>,
}

impl AppError {
    #[must_use]
    pub const fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            server_message: None,
            status: None,
            internal_message: None,
        }
    }

    #[must_use]
    pub fn with_internal(mut self, internal: impl Into<String>) -> Self {
        self.internal_message = Some(internal.into());
        self
    }

    #[must_use]
    pub fn network(detail: impl fmt::Display) -> Self {
        Self::new(ErrorKind::Network).with_internal(detail.to_string())
    }

    #[must_use]
    pub fn decode(detail: impl fmt::Display) -> Self {
        Self::new(ErrorKind::Deserialization).with_internal(detail.to_string())
    }

    #[must_use]
    pub fn from_http_status(status: u16, body: Option<&[u8]>) -> Self {
        let server_message = body
            .and_then(|b| serde_json::from_slice::<ApiErrorBody>(b).ok())
            .and_then(|b| b.error.or(b.message))
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty());

        Self {
            kind: ErrorKind::from_status(status),
            server_message,
            status: Some(status),
            internal_message: None,
        }
    }

    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.kind.code()
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.kind, ErrorKind::NotFound)
    }

    /// The server's own message when it sent one, otherwise `fallback`.
    #[must_use]
    pub fn user_facing_message(&self, fallback: &str) -> String {
        match &self.server_message {
            Some(message) => message.clone(),
            None if fallback.is_empty() => GENERIC_ERROR_MESSAGE.to_string(),
            None => fallback.to_string(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(status) = self.status {
            write!(f, " HTTP {status}")?;
        }
        if let Some(message) = &self.server_message {
            write!(f, " {message}")?;
        }
        if let Some(internal) = &self.internal_message {
            write!(f, " (internal: {internal})")?;
        }
        Ok(())
    }
}

impl std::error::Error for AppError {}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_error_field() {
        let err = AppError::from_http_status(409, Some(br#"{"error": "Word already exists"}"#));
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(err.user_facing_message("Failed to add word"), "Word already exists");
    }

    #[test]
    fn falls_back_to_message_field() {
        let err = AppError::from_http_status(500, Some(br#"{"message": "db down"}"#));
        assert_eq!(err.kind, ErrorKind::Server);
        assert_eq!(err.server_message.as_deref(), Some("db down"));
    }

    #[test]
    fn uses_fallback_without_body() {
        let err = AppError::from_http_status(400, None);
        assert_eq!(err.user_facing_message("Failed to add word"), "Failed to add word");

        let html = AppError::from_http_status(502, Some(b"<html>bad gateway</html>"));
        assert_eq!(html.user_facing_message("Failed to add word"), "Failed to add word");

        let blank = AppError::from_http_status(400, Some(br#"{"error": "   "}"#));
        assert_eq!(blank.server_message, None);
    }

    #[test]
    fn network_errors_never_carry_server_text() {
        let err = AppError::network("connection refused");
        assert_eq!(err.user_facing_message(""), GENERIC_ERROR_MESSAGE);
        assert_eq!(err.to_string(), "[NETWORK_ERROR] (internal: connection refused)");
    }
}
