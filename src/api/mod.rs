// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    routing::{delete, get, post, put},
    Json, Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    error::{ApiError, ErrorBody},
    menu::UserMenu,
    models::{
        ActionResponse, AddClosetItemRequest, AvatarRequest, Category, ClearTexturesRequest,
        ClosetItem, Pivot, Player, PlayerNameBody, PlayerNameRequest, PlayerOwnerRequest,
        PlayerTextureRequest, RenameClosetItemRequest, SetTexturesRequest, Texture, TextureKind,
        TextureSlot, User,
    },
    state::AppState,
    store::StoreError,
};

pub mod admin;
pub mod closet;
pub mod health;
pub mod menu;
pub mod players;
pub mod profile;

#[cfg(test)]
pub(crate) mod testing;

pub fn router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route("/players/list", get(admin::list_players))
        .route("/players/{pid}", delete(admin::delete_player))
        .route("/players/{pid}/name", put(admin::update_player_name))
        .route("/players/{pid}/owner", put(admin::update_player_owner))
        .route("/players/{pid}/textures", put(admin::update_player_texture))
        .route("/menu", get(menu::admin_menu));

    let user_routes = Router::new()
        .route("/closet/list", get(closet::list_closet))
        .route("/closet/add", post(closet::add_item))
        .route("/closet/rename/{tid}", post(closet::rename_item))
        .route("/closet/remove/{tid}", post(closet::remove_item))
        .route("/profile/avatar", post(profile::set_avatar))
        .route("/player/list", get(players::list_players))
        .route("/player/add", post(players::add_player))
        .route("/player/rename/{pid}", post(players::rename_player))
        .route("/player/set/{pid}", post(players::set_textures))
        .route("/player/texture/clear/{pid}", post(players::clear_textures))
        .route("/player/{pid}", delete(players::delete_player))
        .route("/menu", get(menu::user_menu));

    let app = Router::new()
        .nest("/admin", admin_routes)
        .nest("/user", user_routes)
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .with_state(state);

    Router::new()
        .merge(app)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .layer(CorsLayer::permissive())
}

/// Envelope for a finished mutation.
///
/// A missing player in the path is a 404 and a player owned by someone else
/// a 403; every other refusal is reported in-band with `code = 1`.
pub(crate) fn done(
    result: Result<(), StoreError>,
    message: &str,
) -> Result<Json<ActionResponse>, ApiError> {
    match result {
        Ok(()) => Ok(Json(ActionResponse::ok(message))),
        Err(e) => rejected(e),
    }
}

pub(crate) fn rejected<T>(error: StoreError) -> Result<Json<ActionResponse<T>>, ApiError> {
    match error {
        StoreError::PlayerNotFound(_) => Err(ApiError::not_found(error.to_string())),
        StoreError::NotPlayerOwner(_) => {
            tracing::warn!(%error, "Rejected access to another account's player");
            Err(ApiError::forbidden(error.to_string()))
        }
        other => {
            tracing::debug!(error = %other, "Action refused");
            Ok(Json(ActionResponse::rejected(other.to_string())))
        }
    }
}

/// Names are checked for emptiness before the store is touched.
pub(crate) fn require_name<'a>(raw: &'a str, what: &str) -> Result<&'a str, ApiError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ApiError::unprocessable(format!("{what} must not be empty")));
    }
    Ok(name)
}

#[derive(OpenApi)]
#[openapi(
    paths(
        admin::list_players,
        admin::update_player_name,
        admin::update_player_owner,
        admin::update_player_texture,
        admin::delete_player,
        closet::list_closet,
        closet::add_item,
        closet::rename_item,
        closet::remove_item,
        profile::set_avatar,
        players::list_players,
        players::add_player,
        players::rename_player,
        players::set_textures,
        players::clear_textures,
        players::delete_player,
        menu::user_menu,
        menu::admin_menu,
        health::health,
        health::liveness,
        health::readiness
    ),
    components(
        schemas(
            User,
            Player,
            Texture,
            TextureKind,
            TextureSlot,
            ClosetItem,
            Pivot,
            Category,
            UserMenu,
            PlayerNameRequest,
            PlayerOwnerRequest,
            PlayerTextureRequest,
            PlayerNameBody,
            SetTexturesRequest,
            ClearTexturesRequest,
            AddClosetItemRequest,
            RenameClosetItemRequest,
            AvatarRequest,
            ErrorBody
        )
    ),
    tags(
        (name = "Admin", description = "Player administration"),
        (name = "Closet", description = "Per-user texture closet"),
        (name = "Players", description = "Players owned by the caller"),
        (name = "Profile", description = "Account profile"),
        (name = "Menu", description = "User menu data"),
        (name = "Health", description = "Liveness and readiness")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use super::testing::seeded_state;
    use crate::{auth::USER_ID_HEADER, models::Paginator};
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde::de::DeserializeOwned;
    use tower::ServiceExt;

    fn request(method: &str, uri: &str, uid: Option<u64>, body: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(uid) = uid {
            builder = builder.header(USER_ID_HEADER, uid.to_string());
        }
        match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn send<T: DeserializeOwned>(app: Router, request: Request<Body>) -> (StatusCode, T) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn router_builds_with_all_routes() {
        let app = router(AppState::default());
        let _ = app.into_make_service();
    }

    #[test]
    fn openapi_describes_response_bodies() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let body = |path: &str, method: &str, status: &str| {
            doc["paths"][path][method]["responses"][status]["content"]["application/json"]
                ["schema"]
                .clone()
        };

        assert!(body("/admin/players/list", "get", "200").is_object());
        assert!(body("/admin/players/{pid}/name", "put", "200").is_object());
        assert!(body("/admin/players/{pid}/name", "put", "404").is_object());
        assert!(body("/user/closet/list", "get", "200").is_object());
        assert!(body("/user/player/add", "post", "200").is_object());
        assert!(body("/admin/menu", "get", "200").is_object());
        assert!(doc["components"]["schemas"]["ErrorBody"].is_object());
    }

    #[tokio::test]
    async fn admin_list_requires_admin() {
        let app = router(seeded_state());
        let (status, body): (_, serde_json::Value) =
            send(app, request("GET", "/admin/players/list", Some(2), None)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error_code"], "insufficient_permissions");
    }

    #[tokio::test]
    async fn admin_list_searches_and_paginates() {
        let app = router(seeded_state());
        let (status, page): (_, Paginator<Player>) = send(
            app.clone(),
            request("GET", "/admin/players/list?q=kumi&page=1", Some(1), None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(page.total, 1);
        assert_eq!(page.data[0].name, "kumiko");

        let (_, page): (_, Paginator<Player>) =
            send(app, request("GET", "/admin/players/list?q=s", Some(1), None)).await;
        assert!(page.data.is_empty());
        assert_eq!(page.last_page, 1);
    }

    #[tokio::test]
    async fn admin_rename_reports_in_band_failure() {
        let state = seeded_state();
        let app = router(state.clone());

        let (status, body): (_, ActionResponse) = send(
            app.clone(),
            request(
                "PUT",
                "/admin/players/1/name",
                Some(1),
                Some(r#"{"player_name":"no spaces allowed"}"#),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.code, 1);

        let (_, body): (_, ActionResponse) = send(
            app,
            request(
                "PUT",
                "/admin/players/1/name",
                Some(1),
                Some(r#"{"player_name":"reina"}"#),
            ),
        )
        .await;
        assert_eq!(body.code, 0);
        assert_eq!(state.store.read().await.player(1).unwrap().name, "reina");
    }

    #[tokio::test]
    async fn empty_player_name_is_unprocessable() {
        let app = router(seeded_state());
        let response = app
            .oneshot(request(
                "PUT",
                "/admin/players/1/name",
                Some(1),
                Some(r#"{"player_name":"  "}"#),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn missing_player_is_not_found() {
        let app = router(seeded_state());
        let response = app
            .oneshot(request("DELETE", "/admin/players/42", Some(1), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn admin_texture_and_owner_updates() {
        let state = seeded_state();
        let app = router(state.clone());

        let (_, body): (_, ActionResponse) = send(
            app.clone(),
            request(
                "PUT",
                "/admin/players/1/textures",
                Some(1),
                Some(r#"{"type":"cape","tid":0}"#),
            ),
        )
        .await;
        assert!(body.is_ok());

        let (_, body): (_, ActionResponse) = send(
            app,
            request("PUT", "/admin/players/1/owner", Some(1), Some(r#"{"uid":1}"#)),
        )
        .await;
        assert!(body.is_ok());

        let store = state.store.read().await;
        let player = store.player(1).unwrap();
        assert_eq!(player.tid_cape, 0);
        assert_eq!(player.uid, 1);
    }

    #[tokio::test]
    async fn closet_list_filters_category() {
        let app = router(seeded_state());

        let (status, page): (_, Paginator<ClosetItem>) = send(
            app.clone(),
            request("GET", "/user/closet/list?category=skin", Some(2), None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].item_name(), "closet_skin");

        let (_, page): (_, Paginator<ClosetItem>) = send(
            app,
            request("GET", "/user/closet/list?category=cape", Some(2), None),
        )
        .await;
        assert!(page.data.is_empty());
    }

    #[tokio::test]
    async fn user_player_routes_check_ownership() {
        let app = router(seeded_state());

        // uid 1 does not own pid 1.
        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/user/player/set/1",
                Some(1),
                Some(r#"{"skin":1}"#),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let (_, body): (_, ActionResponse) = send(
            app,
            request("POST", "/user/player/set/1", Some(2), Some(r#"{"skin":1}"#)),
        )
        .await;
        assert!(body.is_ok());
    }

    #[tokio::test]
    async fn menu_knows_admin_pages() {
        let app = router(seeded_state());

        let (_, menu): (_, serde_json::Value) =
            send(app.clone(), request("GET", "/admin/menu", Some(1), None)).await;
        assert_eq!(menu["cli"], true);
        assert_eq!(menu["avatar"], "http://localhost:8080/avatar/0?size=36");

        let (_, menu): (_, serde_json::Value) =
            send(app, request("GET", "/user/menu", Some(1), None)).await;
        assert_eq!(menu["cli"], false);
    }

    #[tokio::test]
    async fn admin_menu_requires_admin() {
        let app = router(seeded_state());

        let (status, body): (_, serde_json::Value) =
            send(app.clone(), request("GET", "/admin/menu", Some(2), None)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error_code"], "insufficient_permissions");

        let (status, menu): (_, serde_json::Value) =
            send(app, request("GET", "/user/menu", Some(2), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(menu["cli"], false);
    }

    #[tokio::test]
    async fn responses_carry_request_id() {
        let app = router(seeded_state());
        let response = app
            .oneshot(request("GET", "/health/live", None, None))
            .await
            .unwrap();
        assert!(response.headers().contains_key("x-request-id"));
    }
}
