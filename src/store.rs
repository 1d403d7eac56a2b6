// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory store for users, textures, players and closets.
//!
//! The store is the only place that enforces domain rules: name policies,
//! texture slot compatibility, closet membership and admin rank. Handlers
//! hold the `AppState` lock for the duration of one call.
//!
//! ## Invariants
//!
//! - `Texture::likes` equals the number of closets holding the texture
//! - every player mutation refreshes `Player::last_modified`
//! - a closet never holds the same texture twice

use std::{
    collections::{BTreeMap, HashMap},
    path::Path,
};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::{
    auth::Permission,
    config::{ConfigError, PlayerNamePolicy, MAX_ITEM_NAME_LEN},
    models::{
        Category, ClosetItem, Pivot, Player, SetTexturesRequest, Texture, TextureSlot, User,
        NO_TEXTURE,
    },
    search::{name_contains, PlayerQuery},
};

/// Why the store refused an operation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Player {0} does not exist")]
    PlayerNotFound(u64),

    #[error("Player {0} belongs to another account")]
    NotPlayerOwner(u64),

    #[error("You are not allowed to manage players of this account")]
    OwnerOutranks,

    #[error("User {0} does not exist")]
    UserNotFound(u64),

    #[error("Texture {0} does not exist")]
    TextureNotFound(u64),

    #[error("Texture {tid} cannot be used as a {slot}")]
    WrongTextureType { tid: u64, slot: TextureSlot },

    #[error("Texture {0} is private")]
    PrivateTexture(u64),

    #[error("Player name '{0}' is already taken")]
    NameTaken(String),

    #[error("{0}")]
    InvalidName(String),

    #[error("Texture {0} is not in your closet")]
    NotInCloset(u64),

    #[error("Texture {0} is already in your closet")]
    AlreadyInCloset(u64),

    #[error("No player ids left")]
    PlayerIdsExhausted,
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Initial data loaded at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub textures: Vec<Texture>,
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub closets: Vec<Pivot>,
}

impl Seed {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::SeedRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// A store with nothing but one super admin, for first start.
    pub fn bootstrap() -> Self {
        Self {
            users: vec![User {
                uid: 1,
                email: "admin@localhost".to_string(),
                nickname: "admin".to_string(),
                avatar: NO_TEXTURE,
                permission: Permission::SuperAdmin,
            }],
            ..Self::default()
        }
    }
}

/// Record counts reported by the readiness probe.
#[derive(Debug, Clone, Copy, Serialize, ToSchema, PartialEq, Eq)]
pub struct StoreCounts {
    pub users: usize,
    pub textures: usize,
    pub players: usize,
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    users: BTreeMap<u64, User>,
    textures: BTreeMap<u64, Texture>,
    players: BTreeMap<u64, Player>,
    closets: HashMap<u64, Vec<Pivot>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(seed: Seed) -> Self {
        let mut store = Self::new();
        for user in seed.users {
            store.insert_user(user);
        }
        for texture in seed.textures {
            store.insert_texture(texture);
        }
        for player in seed.players {
            store.players.insert(player.pid, player);
        }
        for pivot in seed.closets {
            let closet = store.closets.entry(pivot.user_uid).or_default();
            if closet.iter().all(|p| p.texture_tid != pivot.texture_tid) {
                closet.push(pivot);
            }
        }
        store.recount_likes();
        store
    }

    fn recount_likes(&mut self) {
        for texture in self.textures.values_mut() {
            texture.likes = 0;
        }
        for pivot in self.closets.values().flatten() {
            if let Some(texture) = self.textures.get_mut(&pivot.texture_tid) {
                texture.likes += 1;
            }
        }
    }

    // -------------------------------------------------------------------------
    // Users & textures
    // -------------------------------------------------------------------------

    pub fn insert_user(&mut self, user: User) -> &User {
        let uid = user.uid;
        self.users.insert(uid, user);
        &self.users[&uid]
    }

    pub fn user(&self, uid: u64) -> Option<&User> {
        self.users.get(&uid)
    }

    /// Whether any account can reach the administration panel.
    pub fn has_admin(&self) -> bool {
        self.users.values().any(|user| user.permission.is_admin())
    }

    pub fn counts(&self) -> StoreCounts {
        StoreCounts {
            users: self.users.len(),
            textures: self.textures.len(),
            players: self.players.len(),
        }
    }

    pub fn insert_texture(&mut self, texture: Texture) -> &Texture {
        let tid = texture.tid;
        self.textures.insert(tid, texture);
        &self.textures[&tid]
    }

    pub fn texture(&self, tid: u64) -> Option<&Texture> {
        self.textures.get(&tid)
    }

    fn texture_for_slot(&self, tid: u64, slot: TextureSlot) -> StoreResult<&Texture> {
        let texture = self
            .textures
            .get(&tid)
            .ok_or(StoreError::TextureNotFound(tid))?;
        if !texture.kind.fits(slot) {
            return Err(StoreError::WrongTextureType { tid, slot });
        }
        Ok(texture)
    }

    // -------------------------------------------------------------------------
    // Players (admin)
    // -------------------------------------------------------------------------

    pub fn player(&self, pid: u64) -> Option<&Player> {
        self.players.get(&pid)
    }

    /// Players matching `query`, ordered by pid.
    pub fn search_players(&self, query: &PlayerQuery) -> Vec<Player> {
        self.players
            .values()
            .filter(|player| query.matches(player))
            .cloned()
            .collect()
    }

    /// Resolve a player an admin is about to modify.
    fn managed_player_mut(&mut self, operator: &User, pid: u64) -> StoreResult<&mut Player> {
        let owner_uid = self
            .players
            .get(&pid)
            .ok_or(StoreError::PlayerNotFound(pid))?
            .uid;

        if owner_uid != operator.uid {
            let owner_permission = self
                .users
                .get(&owner_uid)
                .map(|owner| owner.permission)
                .unwrap_or_default();
            if !operator.permission.outranks(owner_permission) {
                return Err(StoreError::OwnerOutranks);
            }
        }

        self.players
            .get_mut(&pid)
            .ok_or(StoreError::PlayerNotFound(pid))
    }

    pub fn admin_rename_player(
        &mut self,
        operator: &User,
        pid: u64,
        name: &str,
        policy: &PlayerNamePolicy,
    ) -> StoreResult<()> {
        self.managed_player_mut(operator, pid)?;
        self.check_player_name(name, Some(pid), policy)?;

        let player = self.managed_player_mut(operator, pid)?;
        player.name = name.to_string();
        touch(player);
        Ok(())
    }

    pub fn admin_set_owner(&mut self, operator: &User, pid: u64, uid: u64) -> StoreResult<()> {
        if !self.users.contains_key(&uid) {
            // Still report a missing player first.
            self.managed_player_mut(operator, pid)?;
            return Err(StoreError::UserNotFound(uid));
        }

        let player = self.managed_player_mut(operator, pid)?;
        player.uid = uid;
        touch(player);
        Ok(())
    }

    pub fn admin_set_texture(
        &mut self,
        operator: &User,
        pid: u64,
        slot: TextureSlot,
        tid: u64,
    ) -> StoreResult<()> {
        self.managed_player_mut(operator, pid)?;
        if tid != NO_TEXTURE {
            self.texture_for_slot(tid, slot)?;
        }

        let player = self.managed_player_mut(operator, pid)?;
        player.set_texture(slot, tid);
        touch(player);
        Ok(())
    }

    pub fn admin_delete_player(&mut self, operator: &User, pid: u64) -> StoreResult<Player> {
        self.managed_player_mut(operator, pid)?;
        self.players
            .remove(&pid)
            .ok_or(StoreError::PlayerNotFound(pid))
    }

    // -------------------------------------------------------------------------
    // Players (owner)
    // -------------------------------------------------------------------------

    /// Players owned by `uid`, ordered by pid.
    pub fn players_of(&self, uid: u64) -> Vec<Player> {
        self.players
            .values()
            .filter(|player| player.uid == uid)
            .cloned()
            .collect()
    }

    fn owned_player_mut(&mut self, uid: u64, pid: u64) -> StoreResult<&mut Player> {
        let player = self
            .players
            .get_mut(&pid)
            .ok_or(StoreError::PlayerNotFound(pid))?;
        if player.uid != uid {
            return Err(StoreError::NotPlayerOwner(pid));
        }
        Ok(player)
    }

    fn check_player_name(
        &self,
        name: &str,
        except: Option<u64>,
        policy: &PlayerNamePolicy,
    ) -> StoreResult<()> {
        policy.check(name).map_err(StoreError::InvalidName)?;

        let taken = self
            .players
            .values()
            .any(|p| Some(p.pid) != except && p.name.eq_ignore_ascii_case(name));
        if taken {
            return Err(StoreError::NameTaken(name.to_string()));
        }
        Ok(())
    }

    pub fn add_player(
        &mut self,
        uid: u64,
        name: &str,
        policy: &PlayerNamePolicy,
    ) -> StoreResult<Player> {
        if !self.users.contains_key(&uid) {
            return Err(StoreError::UserNotFound(uid));
        }
        self.check_player_name(name, None, policy)?;

        let pid = match self.players.keys().next_back() {
            Some(last) => last.checked_add(1).ok_or(StoreError::PlayerIdsExhausted)?,
            None => 1,
        };
        let player = Player {
            pid,
            name: name.to_string(),
            uid,
            tid_skin: NO_TEXTURE,
            tid_cape: NO_TEXTURE,
            last_modified: Utc::now(),
        };
        self.players.insert(pid, player.clone());
        Ok(player)
    }

    pub fn rename_player(
        &mut self,
        uid: u64,
        pid: u64,
        name: &str,
        policy: &PlayerNamePolicy,
    ) -> StoreResult<()> {
        self.owned_player_mut(uid, pid)?;
        self.check_player_name(name, Some(pid), policy)?;

        let player = self.owned_player_mut(uid, pid)?;
        player.name = name.to_string();
        touch(player);
        Ok(())
    }

    pub fn delete_player(&mut self, uid: u64, pid: u64) -> StoreResult<Player> {
        self.owned_player_mut(uid, pid)?;
        self.players
            .remove(&pid)
            .ok_or(StoreError::PlayerNotFound(pid))
    }

    /// Put closet textures on a player. Nothing changes unless every
    /// requested texture is acceptable.
    pub fn set_player_textures(
        &mut self,
        uid: u64,
        pid: u64,
        request: &SetTexturesRequest,
    ) -> StoreResult<()> {
        self.owned_player_mut(uid, pid)?;

        let wanted: Vec<(TextureSlot, u64)> = [
            (TextureSlot::Skin, request.skin),
            (TextureSlot::Cape, request.cape),
        ]
        .into_iter()
        .filter_map(|(slot, tid)| tid.map(|tid| (slot, tid)))
        .collect();

        for &(slot, tid) in &wanted {
            if tid == NO_TEXTURE {
                continue;
            }
            self.texture_for_slot(tid, slot)?;
            if !self.in_closet(uid, tid) {
                return Err(StoreError::NotInCloset(tid));
            }
        }

        let player = self.owned_player_mut(uid, pid)?;
        for (slot, tid) in wanted {
            player.set_texture(slot, tid);
        }
        touch(player);
        Ok(())
    }

    pub fn clear_player_textures(
        &mut self,
        uid: u64,
        pid: u64,
        skin: bool,
        cape: bool,
    ) -> StoreResult<()> {
        let player = self.owned_player_mut(uid, pid)?;
        if skin {
            player.tid_skin = NO_TEXTURE;
        }
        if cape {
            player.tid_cape = NO_TEXTURE;
        }
        touch(player);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Closet
    // -------------------------------------------------------------------------

    fn in_closet(&self, uid: u64, tid: u64) -> bool {
        self.closets
            .get(&uid)
            .is_some_and(|closet| closet.iter().any(|p| p.texture_tid == tid))
    }

    /// Closet items of one category whose item name contains `query`,
    /// in the order they were added.
    pub fn closet(&self, uid: u64, category: Category, query: &str) -> Vec<ClosetItem> {
        let Some(closet) = self.closets.get(&uid) else {
            return Vec::new();
        };

        closet
            .iter()
            .filter(|pivot| name_contains(&pivot.item_name, query))
            .filter_map(|pivot| {
                let texture = self.textures.get(&pivot.texture_tid)?;
                category.includes(texture.kind).then(|| ClosetItem {
                    texture: texture.clone(),
                    pivot: pivot.clone(),
                })
            })
            .collect()
    }

    pub fn add_to_closet(&mut self, uid: u64, tid: u64, name: &str) -> StoreResult<()> {
        let name = check_item_name(name)?;
        let texture = self
            .textures
            .get(&tid)
            .ok_or(StoreError::TextureNotFound(tid))?;
        if !texture.public && texture.uploader != uid {
            return Err(StoreError::PrivateTexture(tid));
        }
        if self.in_closet(uid, tid) {
            return Err(StoreError::AlreadyInCloset(tid));
        }

        self.closets.entry(uid).or_default().push(Pivot {
            user_uid: uid,
            texture_tid: tid,
            item_name: name,
        });
        if let Some(texture) = self.textures.get_mut(&tid) {
            texture.likes += 1;
        }
        Ok(())
    }

    pub fn rename_closet_item(&mut self, uid: u64, tid: u64, name: &str) -> StoreResult<()> {
        let name = check_item_name(name)?;
        let pivot = self
            .closets
            .get_mut(&uid)
            .and_then(|closet| closet.iter_mut().find(|p| p.texture_tid == tid))
            .ok_or(StoreError::NotInCloset(tid))?;
        pivot.item_name = name;
        Ok(())
    }

    pub fn remove_from_closet(&mut self, uid: u64, tid: u64) -> StoreResult<()> {
        let closet = self
            .closets
            .get_mut(&uid)
            .ok_or(StoreError::NotInCloset(tid))?;
        let index = closet
            .iter()
            .position(|p| p.texture_tid == tid)
            .ok_or(StoreError::NotInCloset(tid))?;
        closet.remove(index);

        if let Some(texture) = self.textures.get_mut(&tid) {
            texture.likes = texture.likes.saturating_sub(1);
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Profile
    // -------------------------------------------------------------------------

    pub fn set_avatar(&mut self, uid: u64, tid: u64) -> StoreResult<()> {
        if tid != NO_TEXTURE {
            let texture = self.texture_for_slot(tid, TextureSlot::Skin)?;
            let visible = texture.public || texture.uploader == uid || self.in_closet(uid, tid);
            if !visible {
                return Err(StoreError::PrivateTexture(tid));
            }
        }

        let user = self
            .users
            .get_mut(&uid)
            .ok_or(StoreError::UserNotFound(uid))?;
        user.avatar = tid;
        Ok(())
    }
}

fn touch(player: &mut Player) {
    player.last_modified = Utc::now();
}

fn check_item_name(name: &str) -> StoreResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(StoreError::InvalidName("Name must not be empty".to_string()));
    }
    if name.chars().count() > MAX_ITEM_NAME_LEN {
        return Err(StoreError::InvalidName(format!(
            "Name must be at most {MAX_ITEM_NAME_LEN} characters"
        )));
    }
    Ok(name.to_string())
}
