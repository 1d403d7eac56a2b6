// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, Json};

use super::done;
use crate::{
    auth::Auth,
    error::ApiError,
    models::{ActionResponse, AvatarRequest},
    state::AppState,
};

#[utoipa::path(
    post,
    path = "/user/profile/avatar",
    request_body = AvatarRequest,
    tag = "Profile",
    responses((status = 200, description = "Action result", body = ActionResponse))
)]
pub async fn set_avatar(
    Auth(user): Auth,
    State(state): State<AppState>,
    Json(request): Json<AvatarRequest>,
) -> Result<Json<ActionResponse>, ApiError> {
    let result = state.store.write().await.set_avatar(user.uid, request.tid);
    done(result, "Avatar updated")
}
