// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Shared fixtures for handler tests.

use chrono::Utc;

use crate::{
    auth::Permission,
    models::{Pivot, Player, Texture, TextureKind, User},
    state::AppState,
    store::{InMemoryStore, Seed},
};

pub(crate) const SUPER_ADMIN: u64 = 1;
pub(crate) const NORMAL: u64 = 2;
pub(crate) const ADMIN: u64 = 3;

pub(crate) fn user(uid: u64, permission: Permission) -> User {
    User {
        uid,
        email: format!("user{uid}@example.com"),
        nickname: format!("user{uid}"),
        avatar: 0,
        permission,
    }
}

pub(crate) fn texture(tid: u64, kind: TextureKind, uploader: u64, public: bool) -> Texture {
    Texture {
        tid,
        name: format!("texture{tid}"),
        kind,
        hash: format!("hash{tid}"),
        size: 2,
        uploader,
        public,
        upload_at: Utc::now(),
        likes: 0,
    }
}

/// Three accounts, three textures and one player owned by [`NORMAL`]
/// wearing textures 1 and 2, with texture 1 in its owner's closet.
pub(crate) fn seeded_state() -> AppState {
    AppState::new(InMemoryStore::from_seed(Seed {
        users: vec![
            user(SUPER_ADMIN, Permission::SuperAdmin),
            user(NORMAL, Permission::Normal),
            user(ADMIN, Permission::Admin),
        ],
        textures: vec![
            texture(1, TextureKind::Steve, SUPER_ADMIN, true),
            texture(2, TextureKind::Cape, SUPER_ADMIN, true),
            texture(3, TextureKind::Alex, NORMAL, false),
        ],
        players: vec![Player {
            pid: 1,
            name: "kumiko".into(),
            uid: NORMAL,
            tid_skin: 1,
            tid_cape: 2,
            last_modified: Utc::now(),
        }],
        closets: vec![Pivot {
            user_uid: NORMAL,
            texture_tid: 1,
            item_name: "closet_skin".into(),
        }],
    }))
}

/// The account `uid` as currently stored.
pub(crate) async fn stored_user(state: &AppState, uid: u64) -> User {
    state
        .store
        .read()
        .await
        .user(uid)
        .cloned()
        .expect("fixture user exists")
}
