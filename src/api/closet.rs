// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use super::{done, require_name};
use crate::{
    auth::Auth,
    error::{ApiError, ErrorBody},
    models::{
        ActionResponse, AddClosetItemRequest, Category, ClosetItem, Paginator,
        RenameClosetItemRequest,
    },
    pagination::paginate,
    state::AppState,
};

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ClosetQuery {
    /// `skin` (default) or `cape`.
    #[serde(default)]
    pub category: Category,
    /// Substring of the item name.
    #[serde(default)]
    pub q: String,
    /// 1-based page number.
    pub page: Option<usize>,
}

#[utoipa::path(
    get,
    path = "/user/closet/list",
    params(ClosetQuery),
    tag = "Closet",
    responses((
        status = 200,
        description = "One page of closet items",
        body = Paginator<ClosetItem>
    ))
)]
pub async fn list_closet(
    Auth(user): Auth,
    State(state): State<AppState>,
    Query(params): Query<ClosetQuery>,
) -> Result<Json<Paginator<ClosetItem>>, ApiError> {
    let items = state
        .store
        .read()
        .await
        .closet(user.uid, params.category, &params.q);
    Ok(Json(paginate(
        items,
        params.page.unwrap_or(1),
        state.config.closet_per_page,
    )))
}

#[utoipa::path(
    post,
    path = "/user/closet/add",
    request_body = AddClosetItemRequest,
    tag = "Closet",
    responses(
        (status = 200, description = "Action result", body = ActionResponse),
        (status = 422, description = "Empty item name", body = ErrorBody)
    )
)]
pub async fn add_item(
    Auth(user): Auth,
    State(state): State<AppState>,
    Json(request): Json<AddClosetItemRequest>,
) -> Result<Json<ActionResponse>, ApiError> {
    let name = require_name(&request.name, "Item name")?;
    let result = state
        .store
        .write()
        .await
        .add_to_closet(user.uid, request.tid, name);
    done(result, "Added to closet")
}

#[utoipa::path(
    post,
    path = "/user/closet/rename/{tid}",
    params(("tid" = u64, Path, description = "Texture id")),
    request_body = RenameClosetItemRequest,
    tag = "Closet",
    responses(
        (status = 200, description = "Action result", body = ActionResponse),
        (status = 422, description = "Empty item name", body = ErrorBody)
    )
)]
pub async fn rename_item(
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(tid): Path<u64>,
    Json(request): Json<RenameClosetItemRequest>,
) -> Result<Json<ActionResponse>, ApiError> {
    let name = require_name(&request.name, "Item name")?;
    let result = state
        .store
        .write()
        .await
        .rename_closet_item(user.uid, tid, name);
    done(result, "Item renamed")
}

#[utoipa::path(
    post,
    path = "/user/closet/remove/{tid}",
    params(("tid" = u64, Path, description = "Texture id")),
    tag = "Closet",
    responses((status = 200, description = "Action result", body = ActionResponse))
)]
pub async fn remove_item(
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(tid): Path<u64>,
) -> Result<Json<ActionResponse>, ApiError> {
    let result = state.store.write().await.remove_from_closet(user.uid, tid);
    done(result, "Removed from closet")
}
