// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Player administration.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use tracing::info;
use utoipa::IntoParams;

use super::{done, rejected, require_name};
use crate::{
    auth::AdminOnly,
    error::{ApiError, ErrorBody},
    models::{
        ActionResponse, Paginator, Player, PlayerNameRequest, PlayerOwnerRequest,
        PlayerTextureRequest,
    },
    pagination::paginate,
    search::PlayerQuery,
    state::AppState,
};

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct PlayerListQuery {
    /// Search string, e.g. `uid:1 kumi`.
    #[serde(default)]
    pub q: String,
    /// 1-based page number.
    pub page: Option<usize>,
}

#[utoipa::path(
    get,
    path = "/admin/players/list",
    params(PlayerListQuery),
    tag = "Admin",
    responses(
        (status = 200, description = "One page of matching players", body = Paginator<Player>),
        (status = 403, description = "Caller is not an administrator", body = ErrorBody)
    )
)]
pub async fn list_players(
    AdminOnly(_admin): AdminOnly,
    State(state): State<AppState>,
    Query(params): Query<PlayerListQuery>,
) -> Result<Json<Paginator<Player>>, ApiError> {
    let query = PlayerQuery::parse(&params.q);
    let players = state.store.read().await.search_players(&query);
    Ok(Json(paginate(
        players,
        params.page.unwrap_or(1),
        state.config.players_per_page,
    )))
}

#[utoipa::path(
    put,
    path = "/admin/players/{pid}/name",
    params(("pid" = u64, Path, description = "Player id")),
    request_body = PlayerNameRequest,
    tag = "Admin",
    responses(
        (status = 200, description = "Action result", body = ActionResponse),
        (status = 404, description = "Player not found", body = ErrorBody),
        (status = 422, description = "Empty name", body = ErrorBody)
    )
)]
pub async fn update_player_name(
    AdminOnly(admin): AdminOnly,
    State(state): State<AppState>,
    Path(pid): Path<u64>,
    Json(request): Json<PlayerNameRequest>,
) -> Result<Json<ActionResponse>, ApiError> {
    let name = require_name(&request.player_name, "Player name")?;
    let result = state.store.write().await.admin_rename_player(
        &admin,
        pid,
        name,
        &state.config.player_name,
    );
    if result.is_ok() {
        info!(operator = admin.uid, pid, name, "Player renamed by administrator");
    }
    done(result, "Player name updated")
}

#[utoipa::path(
    put,
    path = "/admin/players/{pid}/owner",
    params(("pid" = u64, Path, description = "Player id")),
    request_body = PlayerOwnerRequest,
    tag = "Admin",
    responses(
        (status = 200, description = "Action result", body = ActionResponse),
        (status = 404, description = "Player not found", body = ErrorBody)
    )
)]
pub async fn update_player_owner(
    AdminOnly(admin): AdminOnly,
    State(state): State<AppState>,
    Path(pid): Path<u64>,
    Json(request): Json<PlayerOwnerRequest>,
) -> Result<Json<ActionResponse>, ApiError> {
    let result = state
        .store
        .write()
        .await
        .admin_set_owner(&admin, pid, request.uid);
    if result.is_ok() {
        info!(operator = admin.uid, pid, owner = request.uid, "Player owner changed");
    }
    done(result, "Player owner updated")
}

#[utoipa::path(
    put,
    path = "/admin/players/{pid}/textures",
    params(("pid" = u64, Path, description = "Player id")),
    request_body = PlayerTextureRequest,
    tag = "Admin",
    responses(
        (status = 200, description = "Action result", body = ActionResponse),
        (status = 404, description = "Player not found", body = ErrorBody)
    )
)]
pub async fn update_player_texture(
    AdminOnly(admin): AdminOnly,
    State(state): State<AppState>,
    Path(pid): Path<u64>,
    Json(request): Json<PlayerTextureRequest>,
) -> Result<Json<ActionResponse>, ApiError> {
    let result = state.store.write().await.admin_set_texture(
        &admin,
        pid,
        request.slot,
        request.tid,
    );
    if result.is_ok() {
        info!(
            operator = admin.uid,
            pid,
            slot = %request.slot,
            tid = request.tid,
            "Player texture changed"
        );
    }
    done(result, "Player texture updated")
}

#[utoipa::path(
    delete,
    path = "/admin/players/{pid}",
    params(("pid" = u64, Path, description = "Player id")),
    tag = "Admin",
    responses(
        (status = 200, description = "Action result", body = ActionResponse),
        (status = 404, description = "Player not found", body = ErrorBody)
    )
)]
pub async fn delete_player(
    AdminOnly(admin): AdminOnly,
    State(state): State<AppState>,
    Path(pid): Path<u64>,
) -> Result<Json<ActionResponse>, ApiError> {
    let result = state.store.write().await.admin_delete_player(&admin, pid);
    match result {
        Ok(player) => {
            info!(operator = admin.uid, pid, name = %player.name, "Player deleted");
            Ok(Json(ActionResponse::ok("Player deleted")))
        }
        Err(e) => rejected(e),
    }
}
