// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Search strings for the admin player list.
//!
//! A query is a whitespace-separated list of terms, all of which must match:
//!
//! | Term | Matches |
//! |------|---------|
//! | `pid:3` | player id equals 3 |
//! | `uid:1` | owner uid equals 1 |
//! | `skin:5` | skin texture id equals 5 |
//! | `cape:0` | cape texture id equals 0 (no cape) |
//! | anything else | case-insensitive substring of the player name |

use crate::models::Player;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Term {
    Pid(u64),
    Uid(u64),
    Skin(u64),
    Cape(u64),
    Name(String),
    /// A field term whose value is not a number; matches nothing.
    Never,
}

/// Parsed player search string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerQuery {
    terms: Vec<Term>,
}

impl PlayerQuery {
    pub fn parse(query: &str) -> Self {
        let terms = query.split_whitespace().map(parse_term).collect();
        Self { terms }
    }

    pub fn matches(&self, player: &Player) -> bool {
        self.terms.iter().all(|term| match term {
            Term::Pid(pid) => player.pid == *pid,
            Term::Uid(uid) => player.uid == *uid,
            Term::Skin(tid) => player.tid_skin == *tid,
            Term::Cape(tid) => player.tid_cape == *tid,
            Term::Name(needle) => player.name.to_lowercase().contains(needle.as_str()),
            Term::Never => false,
        })
    }
}

fn parse_term(raw: &str) -> Term {
    let Some((key, value)) = raw.split_once(':') else {
        return Term::Name(raw.to_lowercase());
    };

    let field: fn(u64) -> Term = match key.to_ascii_lowercase().as_str() {
        "pid" => Term::Pid,
        "uid" => Term::Uid,
        "skin" => Term::Skin,
        "cape" => Term::Cape,
        _ => return Term::Name(raw.to_lowercase()),
    };

    value.parse().map(field).unwrap_or(Term::Never)
}

/// Case-insensitive substring match used by the closet search box.
pub fn name_contains(name: &str, query: &str) -> bool {
    let query = query.trim();
    query.is_empty() || name.to_lowercase().contains(&query.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn player(pid: u64, name: &str, uid: u64, tid_skin: u64, tid_cape: u64) -> Player {
        Player {
            pid,
            name: name.into(),
            uid,
            tid_skin,
            tid_cape,
            last_modified: Utc::now(),
        }
    }

    #[test]
    fn empty_query_matches_everything() {
        let query = PlayerQuery::parse("   ");
        assert!(query.matches(&player(1, "kumiko", 1, 0, 0)));
    }

    #[test]
    fn bare_terms_match_name_case_insensitively() {
        let query = PlayerQuery::parse("KUMI");
        assert!(query.matches(&player(1, "kumiko", 1, 0, 0)));
        assert!(!query.matches(&player(2, "reina", 1, 0, 0)));
    }

    #[test]
    fn field_terms_match_exactly() {
        let kumiko = player(1, "kumiko", 7, 3, 0);
        assert!(PlayerQuery::parse("uid:7").matches(&kumiko));
        assert!(PlayerQuery::parse("pid:1 skin:3 cape:0").matches(&kumiko));
        assert!(!PlayerQuery::parse("uid:8").matches(&kumiko));
    }

    #[test]
    fn terms_are_combined_with_and() {
        let kumiko = player(1, "kumiko", 7, 3, 0);
        assert!(PlayerQuery::parse("uid:7 kumi").matches(&kumiko));
        assert!(!PlayerQuery::parse("uid:7 reina").matches(&kumiko));
    }

    #[test]
    fn non_numeric_field_value_matches_nothing() {
        assert!(!PlayerQuery::parse("uid:abc").matches(&player(1, "uid:abc", 1, 0, 0)));
    }

    #[test]
    fn unknown_keys_fall_back_to_name() {
        assert!(PlayerQuery::parse("foo:bar").matches(&player(1, "xfoo:barx", 1, 0, 0)));
    }

    #[test]
    fn closet_search_is_substring() {
        assert!(name_contains("My Skin", "skin"));
        assert!(name_contains("anything", ""));
        assert!(!name_contains("cape", "abc"));
    }
}
