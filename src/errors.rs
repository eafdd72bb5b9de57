// ABOUTME: Unified error handling with standard error codes and HTTP response formatting
// ABOUTME: Defines AppError, ErrorCode, and the JSON error envelope returned by every route
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog

//! # Unified Error Handling
//!
//! Route handlers return [`AppError`], which converts into the JSON error
//! envelope at the HTTP boundary:
//!
//! ```json
//! {"error": {"code": "INVALID_INPUT", "message": "...", "details": {...}}}
//! ```
//!
//! Three error families cross the API: validation (400), not-found (404),
//! and internal/database (500), plus 409 for unique-key collisions.
//! Server-side failures are logged in full and surface only a generic
//! message to the caller.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Stable machine-readable error codes, serialized into the envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Malformed or constraint-violating input
    InvalidInput,
    /// A required field is absent from the request
    MissingRequiredField,
    /// The referenced entity id does not exist
    ResourceNotFound,
    /// An entity with the same unique key already exists
    ResourceAlreadyExists,
    /// A storage backend operation failed
    DatabaseError,
    /// Unexpected failure with no more specific classification
    InternalError,
}

impl ErrorCode {
    /// The HTTP status this code maps to
    #[must_use]
    pub const fn status(self) -> StatusCode {
        match self {
            Self::InvalidInput | Self::MissingRequiredField => StatusCode::BAD_REQUEST,
            Self::ResourceNotFound => StatusCode::NOT_FOUND,
            Self::ResourceAlreadyExists => StatusCode::CONFLICT,
            Self::DatabaseError | Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Caller-safe description, shown in place of the real message for
    /// server-side failures
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::InvalidInput => "Request validation failed",
            Self::MissingRequiredField => "A required field was missing",
            Self::ResourceNotFound => "The requested resource does not exist",
            Self::ResourceAlreadyExists => "A resource with this identifier already exists",
            Self::DatabaseError => "Storage operation failed",
            Self::InternalError => "An internal error occurred",
        }
    }
}

/// Error type carried through route handlers and converted into the JSON
/// envelope at the HTTP boundary
#[derive(Debug, Error)]
pub struct AppError {
    /// Machine-readable classification
    pub code: ErrorCode,
    /// Human-readable message, hidden from callers for 5xx codes
    pub message: String,
    /// Correlation id echoed in the envelope when known
    pub request_id: Option<String>,
    /// Structured detail, e.g. which field failed validation
    pub details: serde_json::Value,
}

impl AppError {
    /// Create an error with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            request_id: None,
            details: serde_json::Value::Null,
        }
    }

    /// Attach the correlation id for the current request
    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Attach structured detail to the envelope
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = details;
        self
    }

    /// Resource lookup failed
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Field fails validation; the field name lands in the details
    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        let field = field.into();
        Self::new(
            ErrorCode::InvalidInput,
            format!("Invalid {field}: {}", reason.into()),
        )
        .with_details(serde_json::json!({ "field": field }))
    }

    /// Required field absent; the field name lands in the details
    pub fn missing_field(field: impl Into<String>) -> Self {
        let field = field.into();
        Self::new(
            ErrorCode::MissingRequiredField,
            format!("Missing required field: {field}"),
        )
        .with_details(serde_json::json!({ "field": field }))
    }

    /// Unique-key collision on create
    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ResourceAlreadyExists, message)
    }

    /// Storage backend failure
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// Unclassified server-side failure
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        // Keep the cause chain in details so the server-side log line
        // carries the full story.
        let chain: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();
        let app = Self::new(ErrorCode::InternalError, error.to_string());
        if chain.is_empty() {
            app
        } else {
            app.with_details(serde_json::json!({ "chain": chain }))
        }
    }
}

/// JSON envelope wrapping every error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// The error payload
    pub error: ErrorBody,
}

/// Payload of the error envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Stable machine-readable error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Correlation id when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// Structured detail, e.g. which field failed validation
    #[serde(skip_serializing_if = "serde_json::Value::is_null")]
    pub details: serde_json::Value,
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self {
            error: ErrorBody {
                code: error.code,
                message: error.message,
                request_id: error.request_id,
                details: error.details,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.code.status();

        let body = if status.is_server_error() {
            tracing::error!(code = ?self.code, message = %self.message, "request failed");
            ErrorResponse {
                error: ErrorBody {
                    code: self.code,
                    message: self.code.description().to_owned(),
                    request_id: self.request_id,
                    details: serde_json::Value::Null,
                },
            }
        } else {
            ErrorResponse::from(self)
        };

        (status, Json(body)).into_response()
    }
}
