// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Players owned by the calling account.

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use super::{done, rejected, require_name};
use crate::{
    auth::Auth,
    error::{ApiError, ErrorBody},
    models::{ActionResponse, ClearTexturesRequest, Player, PlayerNameBody, SetTexturesRequest},
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/user/player/list",
    tag = "Players",
    responses((
        status = 200,
        description = "Players of the caller, wrapped in an action result",
        body = ActionResponse<Vec<Player>>
    ))
)]
pub async fn list_players(
    Auth(user): Auth,
    State(state): State<AppState>,
) -> Result<Json<ActionResponse<Vec<Player>>>, ApiError> {
    let players = state.store.read().await.players_of(user.uid);
    Ok(Json(ActionResponse::with_data("", players)))
}

#[utoipa::path(
    post,
    path = "/user/player/add",
    request_body = PlayerNameBody,
    tag = "Players",
    responses(
        (status = 200, description = "Action result carrying the new player", body = ActionResponse<Player>),
        (status = 422, description = "Empty name", body = ErrorBody)
    )
)]
pub async fn add_player(
    Auth(user): Auth,
    State(state): State<AppState>,
    Json(request): Json<PlayerNameBody>,
) -> Result<Json<ActionResponse<Player>>, ApiError> {
    let name = require_name(&request.name, "Player name")?;
    let result = state
        .store
        .write()
        .await
        .add_player(user.uid, name, &state.config.player_name);
    match result {
        Ok(player) => {
            info!(uid = user.uid, pid = player.pid, name = %player.name, "Player added");
            Ok(Json(ActionResponse::with_data("Player added", player)))
        }
        Err(e) => rejected(e),
    }
}

#[utoipa::path(
    post,
    path = "/user/player/rename/{pid}",
    params(("pid" = u64, Path, description = "Player id")),
    request_body = PlayerNameBody,
    tag = "Players",
    responses(
        (status = 200, description = "Action result", body = ActionResponse),
        (status = 403, description = "Player belongs to another account", body = ErrorBody),
        (status = 404, description = "Player not found", body = ErrorBody),
        (status = 422, description = "Empty name", body = ErrorBody)
    )
)]
pub async fn rename_player(
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(pid): Path<u64>,
    Json(request): Json<PlayerNameBody>,
) -> Result<Json<ActionResponse>, ApiError> {
    let name = require_name(&request.name, "Player name")?;
    let result = state.store.write().await.rename_player(
        user.uid,
        pid,
        name,
        &state.config.player_name,
    );
    done(result, "Player renamed")
}

#[utoipa::path(
    post,
    path = "/user/player/set/{pid}",
    params(("pid" = u64, Path, description = "Player id")),
    request_body = SetTexturesRequest,
    tag = "Players",
    responses(
        (status = 200, description = "Action result", body = ActionResponse),
        (status = 403, description = "Player belongs to another account", body = ErrorBody),
        (status = 404, description = "Player not found", body = ErrorBody)
    )
)]
pub async fn set_textures(
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(pid): Path<u64>,
    Json(request): Json<SetTexturesRequest>,
) -> Result<Json<ActionResponse>, ApiError> {
    let result = state
        .store
        .write()
        .await
        .set_player_textures(user.uid, pid, &request);
    done(result, "Textures applied")
}

#[utoipa::path(
    post,
    path = "/user/player/texture/clear/{pid}",
    params(("pid" = u64, Path, description = "Player id")),
    request_body = ClearTexturesRequest,
    tag = "Players",
    responses(
        (status = 200, description = "Action result", body = ActionResponse),
        (status = 403, description = "Player belongs to another account", body = ErrorBody),
        (status = 404, description = "Player not found", body = ErrorBody)
    )
)]
pub async fn clear_textures(
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(pid): Path<u64>,
    Json(request): Json<ClearTexturesRequest>,
) -> Result<Json<ActionResponse>, ApiError> {
    let result = state.store.write().await.clear_player_textures(
        user.uid,
        pid,
        request.skin,
        request.cape,
    );
    done(result, "Textures cleared")
}

#[utoipa::path(
    delete,
    path = "/user/player/{pid}",
    params(("pid" = u64, Path, description = "Player id")),
    tag = "Players",
    responses(
        (status = 200, description = "Action result", body = ActionResponse),
        (status = 403, description = "Player belongs to another account", body = ErrorBody),
        (status = 404, description = "Player not found", body = ErrorBody)
    )
)]
pub async fn delete_player(
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(pid): Path<u64>,
) -> Result<Json<ActionResponse>, ApiError> {
    let result = state.store.write().await.delete_player(user.uid, pid);
    match result {
        Ok(player) => {
            info!(uid = user.uid, pid, name = %player.name, "Player deleted by owner");
            Ok(Json(ActionResponse::ok("Player deleted")))
        }
        Err(e) => rejected(e),
    }
}
