// SPDX-FileCopyrightText: 2026 Pulso Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Pulso service.

use thiserror::Error;

/// The primary error type used across all Pulso crates.
///
/// The webhook layer maps `Validation` and `MalformedRequest` to HTTP 400
/// and `Storage` to HTTP 500; the remaining variants cover ambient failures
/// (configuration, server lifecycle, unexpected states).
#[derive(Debug, Error)]
pub enum PulsoError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The caller sent an incomplete or invalid payload.
    ///
    /// `required` enumerates the field names the caller must supply so it
    /// can self-correct.
    #[error("{message}")]
    Validation {
        message: String,
        required: Vec<&'static str>,
    },

    /// The request body could not be parsed as JSON.
    #[error("malformed request body: {0}")]
    MalformedRequest(String),

    /// HTTP server errors (bind failure, serve failure).
    #[error("server error: {message}")]
    Server {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl PulsoError {
    /// Shorthand for a validation error with its required-field hints.
    pub fn validation(message: impl Into<String>, required: &[&'static str]) -> Self {
        Self::Validation {
            message: message.into(),
            required: required.to_vec(),
        }
    }
}
