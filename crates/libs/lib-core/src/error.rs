//! # Centralized Error Handling
//!
//! This module defines the application-wide error type [`AppError`] used consistently
//! across the workspace. It follows the `thiserror` pattern for ergonomic error handling.
//!
//! ## Error Categories
//!
//! All variants are infrastructure failures (5xx):
//! - [`Config`](AppError::Config) → 500 Internal Server Error
//! - [`Session`](AppError::Session) → 500 (session lookup failed, not "no session")
//! - [`MarketData`](AppError::MarketData) → 500 (market-data client failed to start)
//! - [`Render`](AppError::Render) → 500 (template rendering failed)
//! - [`Internal`](AppError::Internal) → 500
//!
//! A missing wallet session is **not** an error: the market page degrades to an
//! `error` prop for that case and still answers 200.
//!
//! ## Usage Example
//!
//! ```rust
//! use lib_core::error::{AppError, Result};
//!
//! fn require_key(key: &str) -> Result<&str> {
//!     if key.is_empty() {
//!         return Err(AppError::Config("MORALIS_API_KEY is empty".to_string()));
//!     }
//!     Ok(key)
//! }
//! ```

use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use serde_json::json;
use thiserror::Error;

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application-wide error type covering all error scenarios.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration error during startup or environment loading.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The session collaborator could not be queried.
    #[error("Session error: {0}")]
    Session(String),

    /// The market-data SDK failed to start.
    #[error("Market data error: {0}")]
    MarketData(String),

    /// A page template failed to render.
    #[error("Render error: {0}")]
    Render(String),

    /// Internal server error (unexpected failures).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Config(_)
            | AppError::Session(_)
            | AppError::MarketData(_)
            | AppError::Render(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get a user-friendly error message.
    ///
    /// Always generic; the detail is logged, never sent to the client.
    pub fn user_message(&self) -> String {
        "An internal error occurred".to_string()
    }

    /// Variant name reported as the `code` field of error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "Config",
            AppError::Session(_) => "Session",
            AppError::MarketData(_) => "MarketData",
            AppError::Render(_) => "Render",
            AppError::Internal(_) => "Internal",
        }
    }
}

/// Implement Axum's `IntoResponse` for automatic error handling.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Full error detail stays in the server log
        if status.is_server_error() {
            tracing::error!(code = self.code(), "Server error: {}", self);
        } else {
            tracing::debug!(code = self.code(), "Client error: {}", self);
        }

        let body = Json(json!({
            "error": self.user_message(),
            "code": self.code(),
        }));

        (status, body).into_response()
    }
}

/// Convert `anyhow::Error` to `AppError`.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Convert `serde_json::Error` to `AppError`.
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(format!("JSON error: {}", err))
    }
}

/// Convert environment lookup failures to `AppError::Config`.
impl From<lib_utils::envs::Error> for AppError {
    fn from(err: lib_utils::envs::Error) -> Self {
        AppError::Config(err.to_string())
    }
}
