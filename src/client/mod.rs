// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Client
//!
//! View models for the two management pages, the admin player table and the
//! user closet. They hold page state, talk to the server through a
//! [`Backend`] and turn every action result into a [`Toast`].
//!
//! Confirmation dialogs are resolved by the caller: every action that would
//! open a dialog takes a [`Dialog`] that is either `Confirmed` with the
//! user's input or `Cancelled`. A cancelled dialog never reaches the server.
//!
//! ```rust,ignore
//! let backend = HttpBackend::new(base_url, uid)?;
//! let mut players = PlayersManagement::new(backend, base_url);
//! players.load().await?;
//! let outcome = players.change_name(pid, Dialog::Confirmed("reina".into())).await?;
//! ```

use thiserror::Error;

use crate::{
    error::ErrorBody,
    models::{
        ActionResponse, Category, ClosetItem, Paginator, Player, SetTexturesRequest, TextureSlot,
    },
};

pub mod closet;
pub mod http;
pub mod players_management;

pub use closet::ClosetView;
pub use http::HttpBackend;
pub use players_management::PlayersManagement;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Response was invalid: {0}")]
    InvalidResponse(String),
}

/// Folds a refused request (non-2xx reply) into a rejected response
/// carrying the server's `error` message. Transport failures stay errors.
pub(crate) fn answered<T>(
    result: Result<ActionResponse<T>, ClientError>,
) -> Result<ActionResponse<T>, ClientError> {
    match result {
        Err(ClientError::Status { status, body }) => {
            tracing::debug!(status, "Action refused by server");
            Ok(ActionResponse::rejected(ErrorBody::message_of(&body)))
        }
        other => other,
    }
}

/// Server calls made by the view models.
#[allow(async_fn_in_trait)]
pub trait Backend {
    async fn list_players(&self, query: &str, page: usize)
        -> Result<Paginator<Player>, ClientError>;

    async fn update_player_name(&self, pid: u64, name: &str)
        -> Result<ActionResponse, ClientError>;

    async fn update_player_owner(&self, pid: u64, uid: u64)
        -> Result<ActionResponse, ClientError>;

    async fn update_player_texture(
        &self,
        pid: u64,
        slot: TextureSlot,
        tid: u64,
    ) -> Result<ActionResponse, ClientError>;

    async fn delete_player(&self, pid: u64) -> Result<ActionResponse, ClientError>;

    async fn list_closet(
        &self,
        category: Category,
        query: &str,
        page: usize,
    ) -> Result<Paginator<ClosetItem>, ClientError>;

    async fn rename_closet_item(&self, tid: u64, name: &str)
        -> Result<ActionResponse, ClientError>;

    async fn remove_closet_item(&self, tid: u64) -> Result<ActionResponse, ClientError>;

    async fn set_avatar(&self, tid: u64) -> Result<ActionResponse, ClientError>;

    async fn my_players(&self) -> Result<ActionResponse<Vec<Player>>, ClientError>;

    async fn set_player_textures(
        &self,
        pid: u64,
        textures: &SetTexturesRequest,
    ) -> Result<ActionResponse, ClientError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

/// A transient notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Info,
            message: message.into(),
        }
    }

    /// Success for `code == 0`, error otherwise, carrying the server message.
    pub fn from_response<T>(response: &ActionResponse<T>) -> Self {
        if response.is_ok() {
            Self::success(&response.message)
        } else {
            Self::error(&response.message)
        }
    }
}

/// How a confirmation dialog was closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog<T> {
    Confirmed(T),
    Cancelled,
}

/// What a dialog-backed action ended with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The dialog was dismissed; nothing was sent.
    Cancelled,
    /// Input was refused before sending; the dialog stays open.
    Rejected(String),
    /// The server answered.
    Done(Toast),
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_follows_response_code() {
        let ok = ActionResponse::ok("done");
        assert_eq!(Toast::from_response(&ok), Toast::success("done"));

        let failed: ActionResponse = ActionResponse::rejected("nope");
        assert_eq!(Toast::from_response(&failed).kind, ToastKind::Error);
        assert_eq!(Toast::from_response(&failed).message, "nope");
    }

    #[test]
    fn refused_request_becomes_rejection() {
        let refused: Result<ActionResponse, _> = Err(ClientError::Status {
            status: 404,
            body: r#"{"error":"Player 1 does not exist"}"#.into(),
        });
        let response = answered(refused).unwrap();
        assert_eq!(Toast::from_response(&response), Toast::error("Player 1 does not exist"));

        let failed: Result<ActionResponse, _> = Err(ClientError::Request("timed out".into()));
        assert!(matches!(answered(failed), Err(ClientError::Request(_))));
    }
}
