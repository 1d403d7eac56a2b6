// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Identity and authorization errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Rejection produced by the identity extractors.
#[derive(Debug)]
pub enum AuthError {
    /// No identity header and no identity in request extensions
    MissingIdentity,
    /// Identity header is not a valid uid
    InvalidIdentity,
    /// Uid does not belong to any account
    UnknownUser(u64),
    /// Account is banned
    Banned,
    /// Account lacks the permission the route requires
    InsufficientPermissions,
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: String,
    error_code: String,
}

impl AuthError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingIdentity => "missing_identity",
            AuthError::InvalidIdentity => "invalid_identity",
            AuthError::UnknownUser(_) => "unknown_user",
            AuthError::Banned => "banned",
            AuthError::InsufficientPermissions => "insufficient_permissions",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingIdentity | AuthError::InvalidIdentity | AuthError::UnknownUser(_) => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::Banned | AuthError::InsufficientPermissions => StatusCode::FORBIDDEN,
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingIdentity => write!(f, "Request carries no user identity"),
            AuthError::InvalidIdentity => write!(f, "User identity header is not a valid uid"),
            AuthError::UnknownUser(uid) => write!(f, "No account with uid {uid}"),
            AuthError::Banned => write!(f, "This account has been banned"),
            AuthError::InsufficientPermissions => {
                write!(f, "Insufficient permissions for this operation")
            }
        }
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(AuthErrorBody {
            error: self.to_string(),
            error_code: self.error_code().to_string(),
        });
        (status, body).into_response()
    }
}
