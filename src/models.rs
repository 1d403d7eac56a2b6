// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response data structures shared by the REST API and the UI
//! view models. All wire types derive `Serialize`, `Deserialize`, and
//! `ToSchema` for JSON handling and OpenAPI documentation.
//!
//! ## Model Categories
//!
//! - **Users**: account records with a permission level and an avatar texture
//! - **Textures**: uploaded skins and capes, identified by `tid`
//! - **Players**: in-game profiles owned by a user
//! - **Closet**: a user's liked textures with per-user item names
//! - **Envelopes**: [`Paginator`] and [`ActionResponse`]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::Permission;

/// Texture id meaning "no texture".
pub const NO_TEXTURE: u64 = 0;

// =============================================================================
// Users
// =============================================================================

/// A registered account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct User {
    pub uid: u64,
    pub email: String,
    pub nickname: String,
    /// Texture id used as the avatar (`0` = default avatar).
    #[serde(default)]
    pub avatar: u64,
    #[serde(default)]
    #[schema(value_type = i8)]
    pub permission: Permission,
}

// =============================================================================
// Textures
// =============================================================================

/// Model type of an uploaded texture.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TextureKind {
    /// Classic (4px arm) skin.
    Steve,
    /// Slim (3px arm) skin.
    Alex,
    Cape,
}

impl TextureKind {
    /// Whether this texture can be worn in the given slot.
    pub fn fits(self, slot: TextureSlot) -> bool {
        match slot {
            TextureSlot::Skin => matches!(self, TextureKind::Steve | TextureKind::Alex),
            TextureSlot::Cape => self == TextureKind::Cape,
        }
    }

    pub fn slot(self) -> TextureSlot {
        match self {
            TextureKind::Steve | TextureKind::Alex => TextureSlot::Skin,
            TextureKind::Cape => TextureSlot::Cape,
        }
    }
}

/// The two texture slots a player has.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TextureSlot {
    Skin,
    Cape,
}

impl std::fmt::Display for TextureSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextureSlot::Skin => write!(f, "skin"),
            TextureSlot::Cape => write!(f, "cape"),
        }
    }
}

/// An uploaded skin or cape.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Texture {
    pub tid: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TextureKind,
    /// Content hash of the image file.
    pub hash: String,
    /// File size in KiB.
    pub size: u64,
    /// Uid of the uploader.
    pub uploader: u64,
    pub public: bool,
    pub upload_at: DateTime<Utc>,
    /// Number of closets this texture is in.
    #[serde(default)]
    pub likes: u64,
}

// =============================================================================
// Players
// =============================================================================

/// An in-game character profile.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Player {
    pub pid: u64,
    pub name: String,
    /// Uid of the owner.
    pub uid: u64,
    #[serde(default)]
    pub tid_skin: u64,
    #[serde(default)]
    pub tid_cape: u64,
    pub last_modified: DateTime<Utc>,
}

impl Player {
    pub fn texture(&self, slot: TextureSlot) -> u64 {
        match slot {
            TextureSlot::Skin => self.tid_skin,
            TextureSlot::Cape => self.tid_cape,
        }
    }

    pub fn set_texture(&mut self, slot: TextureSlot, tid: u64) {
        match slot {
            TextureSlot::Skin => self.tid_skin = tid,
            TextureSlot::Cape => self.tid_cape = tid,
        }
    }
}

// =============================================================================
// Closet
// =============================================================================

/// Join record between a user and a texture in their closet.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Pivot {
    pub user_uid: u64,
    pub texture_tid: u64,
    /// The name the user gave this item in their closet.
    pub item_name: String,
}

/// A texture as seen from inside a user's closet.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ClosetItem {
    #[serde(flatten)]
    pub texture: Texture,
    pub pivot: Pivot,
}

impl ClosetItem {
    pub fn tid(&self) -> u64 {
        self.texture.tid
    }

    pub fn item_name(&self) -> &str {
        &self.pivot.item_name
    }
}

/// Closet tab filter.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Skin,
    Cape,
}

impl Category {
    pub fn includes(self, kind: TextureKind) -> bool {
        match self {
            Category::Skin => kind.fits(TextureSlot::Skin),
            Category::Cape => kind.fits(TextureSlot::Cape),
        }
    }
}

// =============================================================================
// Envelopes
// =============================================================================

/// One page of a listing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Paginator<T> {
    pub data: Vec<T>,
    pub total: usize,
    /// 1-based position of the first item on this page.
    pub from: Option<usize>,
    /// 1-based position of the last item on this page.
    pub to: Option<usize>,
    pub current_page: usize,
    pub last_page: usize,
}

/// Result envelope for mutating endpoints.
///
/// `code == 0` means the action was applied. Any other code means it was
/// rejected and `message` says why; the HTTP status is still 200.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ActionResponse<T = ()> {
    pub code: i32,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl ActionResponse<()> {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            code: 0,
            message: message.into(),
            data: None,
        }
    }
}

impl<T> ActionResponse<T> {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            code: 1,
            message: message.into(),
            data: None,
        }
    }

    pub fn with_data(message: impl Into<String>, data: T) -> Self {
        Self {
            code: 0,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.code == 0
    }
}

// =============================================================================
// Requests
// =============================================================================

/// Admin rename of a player.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PlayerNameRequest {
    pub player_name: String,
}

/// Admin transfer of a player to another user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PlayerOwnerRequest {
    pub uid: u64,
}

/// Admin assignment of one texture slot.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PlayerTextureRequest {
    #[serde(rename = "type")]
    pub slot: TextureSlot,
    /// Texture id, `0` clears the slot.
    pub tid: u64,
}

/// Player name supplied by its owner (add or rename).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PlayerNameBody {
    pub name: String,
}

/// Textures from the closet to put on a player. Absent slots are untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct SetTexturesRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skin: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cape: Option<u64>,
}

/// Which slots to clear on a player.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ClearTexturesRequest {
    #[serde(default)]
    pub skin: bool,
    #[serde(default)]
    pub cape: bool,
}

/// Like a texture into the closet under a name.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AddClosetItemRequest {
    pub tid: u64,
    pub name: String,
}

/// Rename a closet item.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RenameClosetItemRequest {
    pub name: String,
}

/// Use a texture as avatar (`0` resets to the default avatar).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AvatarRequest {
    pub tid: u64,
}
