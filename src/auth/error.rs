// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::ErrorBody;

/// Authentication error type.
#[derive(Debug)]
pub enum AuthError {
    /// No authorization header present
    MissingAuthHeader,
    /// Token portion is the literal string `null`
    NullToken,
    /// Token is missing, malformed, badly signed, or expired
    InvalidToken,
    /// Token email does not own the requested resource
    OwnerMismatch,
    /// Token could not be signed
    Signing(String),
}

impl AuthError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingAuthHeader | AuthError::NullToken => StatusCode::UNAUTHORIZED,
            AuthError::InvalidToken | AuthError::OwnerMismatch => StatusCode::FORBIDDEN,
            AuthError::Signing(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingAuthHeader | AuthError::NullToken => {
                write!(f, "Unauthorized Access")
            }
            // Expiry and bad signatures share one message.
            AuthError::InvalidToken => write!(f, "User Token Expired"),
            AuthError::OwnerMismatch => write!(f, "Forbidden Access"),
            AuthError::Signing(msg) => write!(f, "Failed to sign token: {msg}"),
        }
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        (self.status_code(), Json(ErrorBody::new(&message))).into_response()
    }
}
