// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Admin player table.

use tracing::debug;
use url::Url;

use super::{answered, Backend, ClientError, Dialog, Outcome, Toast};
use crate::{
    models::{Player, TextureSlot},
    urls,
};

/// One preview image of a player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    /// `"{player} - {slot}"`.
    pub alt: String,
    pub src: Url,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Previews {
    pub skin: Preview,
    pub cape: Preview,
}

pub struct PlayersManagement<B> {
    backend: B,
    base_url: Url,
    players: Vec<Player>,
    query: String,
    page: usize,
    last_page: usize,
    total: usize,
}

impl<B: Backend> PlayersManagement<B> {
    pub fn new(backend: B, base_url: Url) -> Self {
        Self {
            backend,
            base_url,
            players: Vec::new(),
            query: String::new(),
            page: 1,
            last_page: 1,
            total: 0,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, pid: u64) -> Option<&Player> {
        self.players.iter().find(|p| p.pid == pid)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn last_page(&self) -> usize {
        self.last_page
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Fetch the current page for the current query.
    pub async fn load(&mut self) -> Result<(), ClientError> {
        debug!(query = %self.query, page = self.page, "Loading players");
        let page = self.backend.list_players(&self.query, self.page).await?;
        self.players = page.data;
        self.total = page.total;
        self.last_page = page.last_page;
        Ok(())
    }

    /// Run a new search from the first page.
    pub async fn search(&mut self, query: impl Into<String>) -> Result<(), ClientError> {
        self.query = query.into();
        self.page = 1;
        self.load().await
    }

    pub async fn switch_page(&mut self, page: usize) -> Result<(), ClientError> {
        self.page = page.max(1);
        self.load().await
    }

    /// Skin and cape preview images of a listed player.
    pub fn previews(&self, pid: u64) -> Option<Previews> {
        let player = self.player(pid)?;
        let preview = |slot: TextureSlot| Preview {
            alt: format!("{} - {slot}", player.name),
            src: urls::preview(&self.base_url, player.texture(slot)),
        };
        Some(Previews {
            skin: preview(TextureSlot::Skin),
            cape: preview(TextureSlot::Cape),
        })
    }

    pub async fn change_name(
        &mut self,
        pid: u64,
        dialog: Dialog<String>,
    ) -> Result<Outcome, ClientError> {
        let Dialog::Confirmed(name) = dialog else {
            return Ok(Outcome::Cancelled);
        };
        let name = name.trim();
        if name.is_empty() {
            return Ok(Outcome::Rejected("Player name must not be empty".to_string()));
        }

        let response = answered(self.backend.update_player_name(pid, name).await)?;
        if response.is_ok() {
            if let Some(player) = self.player_mut(pid) {
                player.name = name.to_string();
            }
        }
        Ok(Outcome::Done(Toast::from_response(&response)))
    }

    pub async fn change_owner(
        &mut self,
        pid: u64,
        dialog: Dialog<u64>,
    ) -> Result<Outcome, ClientError> {
        let Dialog::Confirmed(uid) = dialog else {
            return Ok(Outcome::Cancelled);
        };

        let response = answered(self.backend.update_player_owner(pid, uid).await)?;
        if response.is_ok() {
            if let Some(player) = self.player_mut(pid) {
                player.uid = uid;
            }
        }
        Ok(Outcome::Done(Toast::from_response(&response)))
    }

    pub async fn change_texture(
        &mut self,
        pid: u64,
        dialog: Dialog<(TextureSlot, u64)>,
    ) -> Result<Outcome, ClientError> {
        let Dialog::Confirmed((slot, tid)) = dialog else {
            return Ok(Outcome::Cancelled);
        };

        let response = answered(self.backend.update_player_texture(pid, slot, tid).await)?;
        if response.is_ok() {
            if let Some(player) = self.player_mut(pid) {
                player.set_texture(slot, tid);
            }
        }
        Ok(Outcome::Done(Toast::from_response(&response)))
    }

    pub async fn delete(&mut self, pid: u64, dialog: Dialog<()>) -> Result<Outcome, ClientError> {
        if dialog == Dialog::Cancelled {
            return Ok(Outcome::Cancelled);
        }

        let response = answered(self.backend.delete_player(pid).await)?;
        if response.is_ok() {
            self.players.retain(|p| p.pid != pid);
        }
        Ok(Outcome::Done(Toast::from_response(&response)))
    }

    fn player_mut(&mut self, pid: u64) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.pid == pid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{
        fake::{page, player, Call, FakeBackend},
        ToastKind,
    };

    fn base_url() -> Url {
        Url::parse("http://skins.test").unwrap()
    }

    async fn loaded(backend: FakeBackend) -> PlayersManagement<FakeBackend> {
        let mut view = PlayersManagement::new(
            backend.with_player_pages(vec![page(vec![player()])]),
            base_url(),
        );
        view.load().await.expect("players load");
        view
    }

    #[tokio::test]
    async fn search_restarts_from_first_page() {
        let mut view = PlayersManagement::new(FakeBackend::new(), base_url());
        view.load().await.unwrap();
        view.switch_page(3).await.unwrap();
        view.search("s").await.unwrap();

        assert_eq!(
            view.backend().calls(),
            vec![
                Call::ListPlayers {
                    query: String::new(),
                    page: 1
                },
                Call::ListPlayers {
                    query: String::new(),
                    page: 3
                },
                Call::ListPlayers {
                    query: "s".into(),
                    page: 1
                },
            ]
        );
        assert_eq!(view.page(), 1);
    }

    #[tokio::test]
    async fn previews_point_at_texture_previews() {
        let view = loaded(FakeBackend::new()).await;
        let previews = view.previews(1).expect("player listed");

        assert_eq!(previews.skin.alt, "kumiko - skin");
        assert_eq!(previews.skin.src.as_str(), "http://skins.test/preview/1");
        assert_eq!(previews.cape.alt, "kumiko - cape");
        assert_eq!(previews.cape.src.as_str(), "http://skins.test/preview/2");
        assert!(view.previews(9).is_none());
    }

    #[tokio::test]
    async fn empty_name_is_rejected_without_request() {
        let mut view = loaded(FakeBackend::new()).await;

        let outcome = view
            .change_name(1, Dialog::Confirmed(String::new()))
            .await
            .unwrap();
        assert!(matches!(outcome, Outcome::Rejected(_)));

        let outcome = view.change_name(1, Dialog::Cancelled).await.unwrap();
        assert_eq!(outcome, Outcome::Cancelled);

        assert_eq!(view.backend().calls().len(), 1);
        assert_eq!(view.player(1).unwrap().name, "kumiko");
    }

    #[tokio::test]
    async fn rename_succeeded() {
        let mut view = loaded(FakeBackend::new().answering(0, "ok")).await;

        let outcome = view
            .change_name(1, Dialog::Confirmed("reina".into()))
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Done(Toast::success("ok")));
        assert_eq!(
            view.backend().calls().last(),
            Some(&Call::UpdatePlayerName {
                pid: 1,
                name: "reina".into()
            })
        );
        assert_eq!(view.player(1).unwrap().name, "reina");
    }

    #[tokio::test]
    async fn rename_sends_trimmed_name() {
        let mut view = loaded(FakeBackend::new().answering(0, "ok")).await;

        view.change_name(1, Dialog::Confirmed("  reina ".into()))
            .await
            .unwrap();

        assert_eq!(
            view.backend().calls().last(),
            Some(&Call::UpdatePlayerName {
                pid: 1,
                name: "reina".into()
            })
        );
        assert_eq!(view.player(1).unwrap().name, "reina");
    }

    #[tokio::test]
    async fn refused_actions_show_server_error() {
        let mut view = loaded(FakeBackend::new().refusing(404, "Player 1 does not exist")).await;
        let refused = Outcome::Done(Toast::error("Player 1 does not exist"));

        assert_eq!(
            view.change_name(1, Dialog::Confirmed("reina".into()))
                .await
                .unwrap(),
            refused
        );
        assert_eq!(
            view.change_owner(1, Dialog::Confirmed(2)).await.unwrap(),
            refused
        );
        assert_eq!(
            view.change_texture(1, Dialog::Confirmed((TextureSlot::Skin, 2)))
                .await
                .unwrap(),
            refused
        );
        assert_eq!(view.delete(1, Dialog::Confirmed(())).await.unwrap(), refused);

        let player = view.player(1).unwrap();
        assert_eq!((player.name.as_str(), player.uid, player.tid_skin), ("kumiko", 1, 1));
        assert_eq!(view.players().len(), 1);
    }

    #[tokio::test]
    async fn rename_failed_keeps_name() {
        let mut view = loaded(FakeBackend::new().answering(1, "failed")).await;

        let outcome = view
            .change_name(1, Dialog::Confirmed("reina".into()))
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Done(Toast::error("failed")));
        assert_eq!(view.player(1).unwrap().name, "kumiko");
    }

    #[tokio::test]
    async fn owner_change() {
        let mut view = loaded(FakeBackend::new().answering(0, "ok")).await;

        assert_eq!(
            view.change_owner(1, Dialog::Cancelled).await.unwrap(),
            Outcome::Cancelled
        );
        assert_eq!(view.player(1).unwrap().uid, 1);

        view.change_owner(1, Dialog::Confirmed(2)).await.unwrap();
        assert_eq!(
            view.backend().calls().last(),
            Some(&Call::UpdatePlayerOwner { pid: 1, uid: 2 })
        );
        assert_eq!(view.player(1).unwrap().uid, 2);
    }

    #[tokio::test]
    async fn owner_change_failed() {
        let mut view = loaded(FakeBackend::new().answering(1, "failed")).await;

        let outcome = view.change_owner(1, Dialog::Confirmed(2)).await.unwrap();
        assert_eq!(outcome, Outcome::Done(Toast::error("failed")));
        assert_eq!(view.player(1).unwrap().uid, 1);
    }

    #[tokio::test]
    async fn texture_change_per_slot() {
        let mut view = loaded(FakeBackend::new().answering(0, "ok")).await;

        view.change_texture(1, Dialog::Confirmed((TextureSlot::Skin, 2)))
            .await
            .unwrap();
        let outcome = view
            .change_texture(1, Dialog::Confirmed((TextureSlot::Cape, 5)))
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Done(Toast::success("ok")));
        let calls = view.backend().calls();
        assert_eq!(
            calls[1..],
            [
                Call::UpdatePlayerTexture {
                    pid: 1,
                    slot: TextureSlot::Skin,
                    tid: 2
                },
                Call::UpdatePlayerTexture {
                    pid: 1,
                    slot: TextureSlot::Cape,
                    tid: 5
                },
            ]
        );
        let player = view.player(1).unwrap();
        assert_eq!((player.tid_skin, player.tid_cape), (2, 5));
    }

    #[tokio::test]
    async fn texture_change_failed() {
        let mut view = loaded(FakeBackend::new().answering(1, "failed")).await;

        let outcome = view
            .change_texture(1, Dialog::Confirmed((TextureSlot::Skin, 2)))
            .await
            .unwrap();
        match outcome {
            Outcome::Done(toast) => assert_eq!(toast.kind, ToastKind::Error),
            other => panic!("unexpected outcome {other:?}"),
        }
        assert_eq!(view.player(1).unwrap().tid_skin, 1);
    }

    #[tokio::test]
    async fn delete_player() {
        let mut view = loaded(FakeBackend::new().answering(0, "ok")).await;

        assert_eq!(
            view.delete(1, Dialog::Cancelled).await.unwrap(),
            Outcome::Cancelled
        );
        assert_eq!(view.players().len(), 1);

        view.delete(1, Dialog::Confirmed(())).await.unwrap();
        assert_eq!(
            view.backend().calls().last(),
            Some(&Call::DeletePlayer { pid: 1 })
        );
        assert!(view.players().is_empty());
    }

    #[tokio::test]
    async fn delete_failed_keeps_row() {
        let mut view = loaded(FakeBackend::new().answering(1, "failed")).await;

        let outcome = view.delete(1, Dialog::Confirmed(())).await.unwrap();
        assert_eq!(outcome, Outcome::Done(Toast::error("failed")));
        assert_eq!(view.players().len(), 1);
    }
}
