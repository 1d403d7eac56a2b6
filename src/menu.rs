// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Data for the user menu shown in the page header.

use std::sync::LazyLock;

use serde::Serialize;
use url::Url;
use utoipa::ToSchema;

use crate::{
    filters::Filters,
    models::User,
    urls::{self, PathPatterns, MENU_AVATAR_SIZE},
};

/// Path patterns that belong to the administration panel.
pub const ADMIN_PATHS: [&str; 2] = ["admin", "admin/*"];

static ADMIN_PATTERNS: LazyLock<PathPatterns> =
    LazyLock::new(|| PathPatterns::new(&ADMIN_PATHS).expect("admin path patterns compile"));

#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
pub struct UserMenu {
    pub user: User,
    /// Avatar URL after the `user_avatar` filter.
    pub avatar: String,
    /// Whether the page is part of the administration panel.
    pub cli: bool,
}

/// Build the menu for `user` on a page served at `path`.
pub fn compose(user: User, path: &str, base_url: &Url, filters: &Filters) -> UserMenu {
    let avatar_url = urls::avatar(base_url, user.avatar, MENU_AVATAR_SIZE).to_string();
    let avatar = filters.user_avatar.apply(avatar_url, &user);
    let cli = ADMIN_PATTERNS.matches(path);

    UserMenu { user, avatar, cli }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Permission;

    fn user() -> User {
        User {
            uid: 1,
            email: "kumiko@example.com".into(),
            nickname: "kumiko".into(),
            avatar: 5,
            permission: Permission::Admin,
        }
    }

    fn base() -> Url {
        Url::parse("https://skins.example.com").unwrap()
    }

    #[test]
    fn avatar_points_at_texture_avatar_route() {
        let menu = compose(user(), "/user", &base(), &Filters::default());
        assert_eq!(menu.avatar, "https://skins.example.com/avatar/5?size=36");
        assert!(!menu.cli);
    }

    #[test]
    fn admin_pages_set_cli() {
        let filters = Filters::default();
        assert!(compose(user(), "/admin", &base(), &filters).cli);
        assert!(compose(user(), "/admin/players", &base(), &filters).cli);
        assert!(!compose(user(), "/administrator", &base(), &filters).cli);
    }

    #[test]
    fn avatar_goes_through_filter() {
        let mut filters = Filters::default();
        filters
            .user_avatar
            .add(10, |_, user: &User| format!("https://cdn.example.com/{}.png", user.uid));

        let menu = compose(user(), "/user", &base(), &filters);
        assert_eq!(menu.avatar, "https://cdn.example.com/1.png");
    }
}
