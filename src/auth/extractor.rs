// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractors for the calling account.
//!
//! Use the `Auth` extractor in handlers to require a known, non-banned user:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(user): Auth) -> impl IntoResponse {
//!     // user is models::User
//! }
//! ```

use axum::{extract::FromRequestParts, http::request::Parts};

use super::{AuthError, Permission};
use crate::{models::User, state::AppState};

/// Header the gateway uses to forward the authenticated uid.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Uid resolved by an upstream layer.
///
/// When present in request extensions it takes precedence over the
/// `X-User-Id` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(pub u64);

/// Extractor for the calling account.
///
/// Resolves the uid, loads the account from the store and rejects banned
/// accounts.
///
/// # Example
///
/// ```rust,ignore
/// async fn list_players(
///     Auth(user): Auth,
///     State(state): State<AppState>,
/// ) -> Result<Json<Vec<Player>>, ApiError> {
///     // user.uid is the caller, user.permission their level
/// }
/// ```
pub struct Auth(pub User);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let uid = match parts.extensions.get::<CurrentUser>() {
            Some(CurrentUser(uid)) => *uid,
            None => uid_from_header(parts)?,
        };

        let user = state
            .store
            .read()
            .await
            .user(uid)
            .cloned()
            .ok_or(AuthError::UnknownUser(uid))?;

        if user.permission == Permission::Banned {
            tracing::warn!(uid, "Rejected request from banned account");
            return Err(AuthError::Banned);
        }

        Ok(Auth(user))
    }
}

fn uid_from_header(parts: &Parts) -> Result<u64, AuthError> {
    parts
        .headers
        .get(USER_ID_HEADER)
        .ok_or(AuthError::MissingIdentity)?
        .to_str()
        .map_err(|_| AuthError::InvalidIdentity)?
        .trim()
        .parse()
        .map_err(|_| AuthError::InvalidIdentity)
}

/// Extractor that requires admin permission.
pub struct AdminOnly(pub User);

impl FromRequestParts<AppState> for AdminOnly {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Auth(user) = Auth::from_request_parts(parts, state).await?;

        if !user.permission.is_admin() {
            tracing::warn!(uid = user.uid, "Non-admin account hit an admin route");
            return Err(AuthError::InsufficientPermissions);
        }

        Ok(AdminOnly(user))
    }
}
