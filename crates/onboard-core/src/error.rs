//! Error types for the Onboard migration engine.
//!
//! Expected remote rejections (constraint violations, missing permissions)
//! are modeled as `Rejected` with a structured [`RejectionKind`] so callers
//! never have to match on human-readable message text. Transport failures
//! and local storage problems get their own variants.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the Onboard engine.
#[derive(Debug, Error)]
pub enum OnboardError {
    // Remote rejections (expected, non-transport)
    #[error("{message}")]
    Rejected {
        kind: RejectionKind,
        message: String,
    },

    #[error("Authentication required")]
    AuthRequired,

    // Network errors
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    #[error("Request timeout after {0:?}")]
    Timeout(std::time::Duration),

    // Local storage errors
    #[error("Storage error at {path:?}: {message}")]
    Storage {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    // Serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    // Validation errors (per-record transform failures)
    #[error("Validation error for {field}: {message}")]
    Validation { field: String, message: String },

    // Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    // Generic errors
    #[error("{0}")]
    Other(String),
}

/// Result type alias for Onboard operations.
pub type Result<T> = std::result::Result<T, OnboardError>;

/// Classified reason for an expected remote rejection.
///
/// Mapped from Postgres / PostgREST error codes by the remote client so the
/// engine can make decisions (e.g. benign duplicate suppression) without
/// inspecting message strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionKind {
    /// Unique constraint violation (Postgres 23505).
    AlreadyExists,
    /// Foreign key violation (Postgres 23503).
    ForeignKeyViolation,
    /// Row-level security / privilege failure (Postgres 42501).
    PermissionDenied,
    /// No rows matched (PostgREST PGRST116).
    NotFound,
    /// Any other rejection the remote reported.
    Other,
}

impl RejectionKind {
    /// Classify a Postgres or PostgREST error code.
    pub fn from_code(code: &str) -> Self {
        match code {
            "23505" => RejectionKind::AlreadyExists,
            "23503" => RejectionKind::ForeignKeyViolation,
            "42501" => RejectionKind::PermissionDenied,
            "PGRST116" => RejectionKind::NotFound,
            _ => RejectionKind::Other,
        }
    }
}

// Conversion implementations for common error types

impl From<std::io::Error> for OnboardError {
    fn from(err: std::io::Error) -> Self {
        OnboardError::Storage {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for OnboardError {
    fn from(err: serde_json::Error) -> Self {
        OnboardError::Json {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<reqwest::Error> for OnboardError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            OnboardError::Timeout(crate::config::NetworkConfig::REQUEST_TIMEOUT)
        } else {
            OnboardError::Network {
                message: err.to_string(),
                source: Some(err),
            }
        }
    }
}

impl OnboardError {
    /// Create a storage error with path context.
    pub fn storage_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        OnboardError::Storage {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    /// The rejection kind, if this is an expected remote rejection.
    pub fn rejection_kind(&self) -> Option<RejectionKind> {
        match self {
            OnboardError::Rejected { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}
