// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Link building and request path matching.

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use url::Url;

/// Size, in pixels, of the avatar shown in the user menu.
pub const MENU_AVATAR_SIZE: u32 = 36;

/// `{base}/preview/{tid}`
pub fn preview(base: &Url, tid: u64) -> Url {
    with_segments(base, &["preview", &tid.to_string()])
}

/// `{base}/avatar/{tid}?size={size}`
pub fn avatar(base: &Url, tid: u64, size: u32) -> Url {
    let mut url = with_segments(base, &["avatar", &tid.to_string()]);
    url.query_pairs_mut().append_pair("size", &size.to_string());
    url
}

fn with_segments(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);
    // Bases are validated by `config::parse_base_url`, so this only fails
    // for hand-built opaque URLs, which are returned unchanged.
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

/// Compiled request path patterns.
///
/// The leading `/` of a path is ignored and `*` matches any run of
/// characters, `/` included. `["admin", "admin/*"]` matches `/admin/players`
/// but not `/administrator`.
#[derive(Debug, Clone)]
pub struct PathPatterns(GlobSet);

impl PathPatterns {
    pub fn new(patterns: &[&str]) -> Result<Self, globset::Error> {
        let mut set = GlobSetBuilder::new();
        for pattern in patterns {
            set.add(GlobBuilder::new(pattern).literal_separator(false).build()?);
        }
        Ok(Self(set.build()?))
    }

    pub fn matches(&self, path: &str) -> bool {
        self.0.is_match(path.strip_prefix('/').unwrap_or(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(raw: &str) -> Url {
        Url::parse(raw).unwrap()
    }

    #[test]
    fn preview_appends_to_base() {
        assert_eq!(
            preview(&base("http://localhost:8080"), 1).as_str(),
            "http://localhost:8080/preview/1"
        );
        assert_eq!(
            preview(&base("https://example.com/skins/"), 2).as_str(),
            "https://example.com/skins/preview/2"
        );
    }

    #[test]
    fn avatar_carries_size_query() {
        assert_eq!(
            avatar(&base("http://localhost:8080/"), 5, MENU_AVATAR_SIZE).as_str(),
            "http://localhost:8080/avatar/5?size=36"
        );
    }

    #[test]
    fn base_query_is_not_inherited() {
        assert_eq!(
            preview(&base("https://example.com/?lang=en"), 3).as_str(),
            "https://example.com/preview/3"
        );
    }

    fn patterns(raw: &[&str]) -> PathPatterns {
        PathPatterns::new(raw).unwrap()
    }

    #[test]
    fn admin_paths_match() {
        let admin = patterns(&["admin", "admin/*"]);
        assert!(admin.matches("/admin"));
        assert!(admin.matches("/admin/players/list"));
        assert!(admin.matches("admin/"));
        assert!(!admin.matches("/administrator"));
        assert!(!admin.matches("/user/admin"));
        assert!(!admin.matches("/"));
    }

    #[test]
    fn star_matches_across_segments() {
        assert!(patterns(&["user/*/3"]).matches("/user/closet/rename/3"));
        assert!(patterns(&["*c"]).matches("/a/b/c"));
        assert!(!patterns(&["*d"]).matches("/a/b/c"));
    }

    #[test]
    fn malformed_pattern_is_an_error() {
        assert!(PathPatterns::new(&["admin/[z-a]"]).is_err());
        assert!(PathPatterns::new(&["admin/{a"]).is_err());
    }
}
