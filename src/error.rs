// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with one human-readable message per failure.

use crate::services::api::Operation;
use reqwest::StatusCode;

/// Application error type.
///
/// Every remote failure carries the [`Operation`] it came from so that the
/// message shown to the user names what failed ("Failed to fetch badges").
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{}: {source}", .op.failure_message())]
    Request {
        op: Operation,
        #[source]
        source: reqwest::Error,
    },

    #[error("{} (HTTP {status})", .op.failure_message())]
    Status { op: Operation, status: StatusCode },

    #[error("{}: invalid response body ({source})", .op.failure_message())]
    Decode {
        op: Operation,
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid session token: {0}")]
    InvalidToken(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// The remote operation this error came from, if any.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            AppError::Request { op, .. }
            | AppError::Status { op, .. }
            | AppError::Decode { op, .. } => Some(*op),
            AppError::InvalidToken(_) | AppError::Internal(_) => None,
        }
    }

    /// HTTP status of a non-success response.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            AppError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check whether the service rejected the session credential.
    ///
    /// Callers use this to prompt for a fresh sign-in instead of retrying.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    /// Message recorded by the profile view.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, AppError>;
