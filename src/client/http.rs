// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! [`Backend`] over HTTP.

use std::time::Duration;

use reqwest::{Client, Method};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::json;
use tracing::debug;
use url::Url;
use uuid::Uuid;

use super::{Backend, ClientError};
use crate::{
    auth::USER_ID_HEADER,
    models::{
        ActionResponse, Category, ClosetItem, Paginator, Player, SetTexturesRequest, TextureSlot,
    },
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Talks to the server as the account `uid`, the way the gateway would.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: Url,
    uid: u64,
    http: Client,
}

impl HttpBackend {
    pub fn new(base_url: Url, uid: u64) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ClientError::Request(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            base_url,
            uid,
            http,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}{path}"))
            .map_err(|e| ClientError::Request(format!("invalid URL for {path}: {e}")))
    }

    async fn send<B, T>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request_id = Uuid::new_v4().to_string();
        debug!(%method, path, %request_id, "Calling server");

        let mut request = self
            .http
            .request(method.clone(), self.endpoint(path)?)
            .header(USER_ID_HEADER, self.uid.to_string())
            .header("x-request-id", &request_id)
            .query(query);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Request(format!("{method} {path} failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status { status, body });
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(format!("{method} {path}: {e}")))
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ClientError> {
        self.send::<(), T>(Method::GET, path, query, None).await
    }
}

impl Backend for HttpBackend {
    async fn list_players(
        &self,
        query: &str,
        page: usize,
    ) -> Result<Paginator<Player>, ClientError> {
        self.get(
            "/admin/players/list",
            &[("q", query.to_string()), ("page", page.to_string())],
        )
        .await
    }

    async fn update_player_name(
        &self,
        pid: u64,
        name: &str,
    ) -> Result<ActionResponse, ClientError> {
        let body = json!({ "player_name": name });
        self.send(Method::PUT, &format!("/admin/players/{pid}/name"), &[], Some(&body))
            .await
    }

    async fn update_player_owner(
        &self,
        pid: u64,
        uid: u64,
    ) -> Result<ActionResponse, ClientError> {
        let body = json!({ "uid": uid });
        self.send(Method::PUT, &format!("/admin/players/{pid}/owner"), &[], Some(&body))
            .await
    }

    async fn update_player_texture(
        &self,
        pid: u64,
        slot: TextureSlot,
        tid: u64,
    ) -> Result<ActionResponse, ClientError> {
        let body = json!({ "type": slot, "tid": tid });
        self.send(
            Method::PUT,
            &format!("/admin/players/{pid}/textures"),
            &[],
            Some(&body),
        )
        .await
    }

    async fn delete_player(&self, pid: u64) -> Result<ActionResponse, ClientError> {
        self.send::<(), _>(Method::DELETE, &format!("/admin/players/{pid}"), &[], None)
            .await
    }

    async fn list_closet(
        &self,
        category: Category,
        query: &str,
        page: usize,
    ) -> Result<Paginator<ClosetItem>, ClientError> {
        let category = match category {
            Category::Skin => "skin",
            Category::Cape => "cape",
        };
        self.get(
            "/user/closet/list",
            &[
                ("category", category.to_string()),
                ("q", query.to_string()),
                ("page", page.to_string()),
            ],
        )
        .await
    }

    async fn rename_closet_item(
        &self,
        tid: u64,
        name: &str,
    ) -> Result<ActionResponse, ClientError> {
        let body = json!({ "name": name });
        self.send(
            Method::POST,
            &format!("/user/closet/rename/{tid}"),
            &[],
            Some(&body),
        )
        .await
    }

    async fn remove_closet_item(&self, tid: u64) -> Result<ActionResponse, ClientError> {
        self.send::<(), _>(Method::POST, &format!("/user/closet/remove/{tid}"), &[], None)
            .await
    }

    async fn set_avatar(&self, tid: u64) -> Result<ActionResponse, ClientError> {
        let body = json!({ "tid": tid });
        self.send(Method::POST, "/user/profile/avatar", &[], Some(&body))
            .await
    }

    async fn my_players(&self) -> Result<ActionResponse<Vec<Player>>, ClientError> {
        self.get("/user/player/list", &[]).await
    }

    async fn set_player_textures(
        &self,
        pid: u64,
        textures: &SetTexturesRequest,
    ) -> Result<ActionResponse, ClientError> {
        self.send(
            Method::POST,
            &format!("/user/player/set/{pid}"),
            &[],
            Some(textures),
        )
        .await
    }
}
