// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! The user's closet page.
//!
//! Besides paging through closet items, the page keeps a texture selection
//! (one skin and one cape at most) that can be applied to one of the
//! user's players. The selection is independent of the visible category, so
//! a skin picked on the skin tab stays selected while browsing capes.

use tracing::debug;
use url::Url;

use super::{answered, Backend, ClientError, Dialog, Outcome, Toast};
use crate::{
    models::{Category, ClosetItem, Player, SetTexturesRequest, TextureSlot},
    search::name_contains,
    urls::{self, MENU_AVATAR_SIZE},
};

pub struct ClosetView<B> {
    backend: B,
    base_url: Url,
    category: Category,
    query: String,
    page: usize,
    last_page: usize,
    items: Vec<ClosetItem>,
    selected_skin: Option<u64>,
    selected_cape: Option<u64>,
    avatar: Option<Url>,
    players: Vec<Player>,
    player_filter: String,
}

impl<B: Backend> ClosetView<B> {
    pub fn new(backend: B, base_url: Url) -> Self {
        Self {
            backend,
            base_url,
            category: Category::Skin,
            query: String::new(),
            page: 1,
            last_page: 1,
            items: Vec::new(),
            selected_skin: None,
            selected_cape: None,
            avatar: None,
            players: Vec::new(),
            player_filter: String::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn items(&self) -> &[ClosetItem] {
        &self.items
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn last_page(&self) -> usize {
        self.last_page
    }

    /// Avatar URL after a successful "set as avatar", for the page header.
    pub fn avatar(&self) -> Option<&Url> {
        self.avatar.as_ref()
    }

    pub fn selected(&self, slot: TextureSlot) -> Option<u64> {
        match slot {
            TextureSlot::Skin => self.selected_skin,
            TextureSlot::Cape => self.selected_cape,
        }
    }

    pub async fn load(&mut self) -> Result<(), ClientError> {
        debug!(
            category = ?self.category,
            query = %self.query,
            page = self.page,
            "Loading closet"
        );
        let page = self
            .backend
            .list_closet(self.category, &self.query, self.page)
            .await?;
        self.items = page.data;
        self.last_page = page.last_page;
        Ok(())
    }

    pub async fn switch_category(&mut self, category: Category) -> Result<(), ClientError> {
        self.category = category;
        self.page = 1;
        self.load().await
    }

    pub async fn search(&mut self, query: impl Into<String>) -> Result<(), ClientError> {
        self.query = query.into();
        self.page = 1;
        self.load().await
    }

    pub async fn switch_page(&mut self, page: usize) -> Result<(), ClientError> {
        self.page = page.max(1);
        self.load().await
    }

    pub async fn rename(&mut self, tid: u64, dialog: Dialog<String>) -> Result<Outcome, ClientError> {
        let Dialog::Confirmed(name) = dialog else {
            return Ok(Outcome::Cancelled);
        };
        let name = name.trim();
        if name.is_empty() {
            return Ok(Outcome::Rejected("Item name must not be empty".to_string()));
        }

        let response = answered(self.backend.rename_closet_item(tid, name).await)?;
        if response.is_ok() {
            if let Some(item) = self.items.iter_mut().find(|item| item.tid() == tid) {
                item.pivot.item_name = name.to_string();
            }
        }
        Ok(Outcome::Done(Toast::from_response(&response)))
    }

    pub async fn remove(&mut self, tid: u64, dialog: Dialog<()>) -> Result<Outcome, ClientError> {
        if dialog == Dialog::Cancelled {
            return Ok(Outcome::Cancelled);
        }

        let response = answered(self.backend.remove_closet_item(tid).await)?;
        if response.is_ok() {
            self.items.retain(|item| item.tid() != tid);
        }
        Ok(Outcome::Done(Toast::from_response(&response)))
    }

    /// Select a listed item for the slot its texture fits.
    pub fn select(&mut self, tid: u64) {
        let Some(item) = self.items.iter().find(|item| item.tid() == tid) else {
            return;
        };
        match item.texture.kind.slot() {
            TextureSlot::Skin => self.selected_skin = Some(tid),
            TextureSlot::Cape => self.selected_cape = Some(tid),
        }
    }

    pub fn reset_selection(&mut self) {
        self.selected_skin = None;
        self.selected_cape = None;
    }

    /// `skin`, `cape` or `skin & cape`, depending on what is selected.
    pub fn selection_label(&self) -> Option<String> {
        match (self.selected_skin, self.selected_cape) {
            (Some(_), Some(_)) => Some(format!("{} & {}", TextureSlot::Skin, TextureSlot::Cape)),
            (Some(_), None) => Some(TextureSlot::Skin.to_string()),
            (None, Some(_)) => Some(TextureSlot::Cape.to_string()),
            (None, None) => None,
        }
    }

    pub async fn set_avatar(&mut self, tid: u64, dialog: Dialog<()>) -> Result<Outcome, ClientError> {
        if dialog == Dialog::Cancelled {
            return Ok(Outcome::Cancelled);
        }

        let response = answered(self.backend.set_avatar(tid).await)?;
        if response.is_ok() {
            self.avatar = Some(urls::avatar(&self.base_url, tid, MENU_AVATAR_SIZE));
        }
        Ok(Outcome::Done(Toast::from_response(&response)))
    }

    /// Prepare the "apply to player" dialog.
    ///
    /// Returns a toast instead of opening when nothing is selected or the
    /// player list could not be loaded.
    pub async fn open_apply(&mut self) -> Result<Option<Toast>, ClientError> {
        if self.selected_skin.is_none() && self.selected_cape.is_none() {
            return Ok(Some(Toast::info("Please select a texture first")));
        }

        let response = answered(self.backend.my_players().await)?;
        if !response.is_ok() {
            return Ok(Some(Toast::error(response.message)));
        }
        self.players = response.data.unwrap_or_default();
        self.player_filter.clear();
        Ok(None)
    }

    pub fn close_apply(&mut self) {
        self.players.clear();
        self.player_filter.clear();
    }

    pub fn filter_players(&mut self, filter: impl Into<String>) {
        self.player_filter = filter.into();
    }

    /// Players in the apply dialog whose name matches the filter.
    pub fn visible_players(&self) -> Vec<&Player> {
        self.players
            .iter()
            .filter(|player| name_contains(&player.name, &self.player_filter))
            .collect()
    }

    /// Put the selected textures on `pid`.
    pub async fn apply(&mut self, pid: u64) -> Result<Toast, ClientError> {
        let textures = SetTexturesRequest {
            skin: self.selected_skin,
            cape: self.selected_cape,
        };
        let response = answered(self.backend.set_player_textures(pid, &textures).await)?;
        if response.is_ok() {
            self.close_apply();
        }
        Ok(Toast::from_response(&response))
    }
}
