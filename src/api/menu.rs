// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{OriginalUri, State},
    Json,
};

use crate::{
    auth::{AdminOnly, Auth},
    error::ApiError,
    menu::{self, UserMenu},
    state::AppState,
};

/// Menu data for the page header of the user pages.
#[utoipa::path(
    get,
    path = "/user/menu",
    tag = "Menu",
    responses((status = 200, body = UserMenu))
)]
pub async fn user_menu(
    Auth(user): Auth,
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<UserMenu>, ApiError> {
    Ok(Json(menu::compose(
        user,
        uri.path(),
        &state.config.base_url,
        &state.filters,
    )))
}

/// Menu data for the administration panel. Admins only.
#[utoipa::path(
    get,
    path = "/admin/menu",
    tag = "Menu",
    responses(
        (status = 200, body = UserMenu),
        (status = 403, description = "Not an administrator")
    )
)]
pub async fn admin_menu(
    AdminOnly(user): AdminOnly,
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<UserMenu>, ApiError> {
    Ok(Json(menu::compose(
        user,
        uri.path(),
        &state.config.base_url,
        &state.filters,
    )))
}
