use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    Network,
    NotFound,
    Unknown,
}

impl ErrorKind {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Network => "NETWORK_ERROR",
            Self::NotFound => "NOT_FOUND",
            Self::Unknown => "UNKNOWN_ERROR",
        }
    }

    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::Network)
    }
}

/// Failure of a single fetch or update against the profile backend.
///
/// Crosses the FFI boundary inside events, so it stays serializable and
/// carries plain strings rather than source errors.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum FetchError {
    #[error("network error: {message}")]
    Network { message: String },

    #[error("not found: {resource}")]
    NotFound { resource: String },

    #[error("unknown error: {message}")]
    Unknown { message: String },
}

#[derive(Debug, Clone, Deserialize)]
struct ApiErrorResponse {
    message: String,
}

impl FetchError {
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    #[must_use]
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::Unknown {
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Network { .. } => ErrorKind::Network,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Unknown { .. } => ErrorKind::Unknown,
        }
    }

    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.kind().code()
    }

    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        self.kind().is_retryable()
    }

    #[must_use]
    pub fn user_facing_message(&self) -> String {
        match self {
            Self::Network { .. } => {
                "Unable to connect. Please check your internet connection and try again.".into()
            }
            Self::NotFound { .. } => "The requested item could not be found.".into(),
            Self::Unknown { .. } => "Something went wrong. Please try again.".into(),
        }
    }

    /// Classifies a non-success HTTP response. Status `0` is how shells report
    /// a request that never reached the server.
    #[must_use]
    pub fn from_http_status(status: u16, body: Option<&[u8]>) -> Self {
        let message = body
            .and_then(|b| serde_json::from_slice::<ApiErrorResponse>(b).ok())
            .map(|e| e.message)
            .unwrap_or_else(|| format!("HTTP error: {status}"));

        match status {
            404 => Self::not_found(message),
            0 | 408 | 500..=599 => Self::network(message),
            _ => Self::unknown(message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),

    #[error("invalid route {path}: {reason}")]
    InvalidRoute { path: String, reason: String },

    #[error("{0}")]
    Validation(String),
}
