// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is read from the environment once at startup. Malformed
//! numeric values log a warning and fall back to their default; a malformed
//! `BASE_URL` is fatal because every generated link depends on it.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `BASE_URL` | Public URL used when building preview/avatar links | `http://localhost:8080` |
//! | `PLAYERS_PER_PAGE` | Page size of the admin player list | `10` |
//! | `CLOSET_PER_PAGE` | Page size of the closet | `6` |
//! | `PLAYER_NAME_RULE` | `official` or `cjk` | `official` |
//! | `PLAYER_NAME_MIN` | Minimum player name length | `3` |
//! | `PLAYER_NAME_MAX` | Maximum player name length | `16` |
//! | `SEED_FILE` | JSON file with initial users, textures, players, closets | unset |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use thiserror::Error;
use url::Url;

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const BASE_URL_ENV: &str = "BASE_URL";
pub const PLAYERS_PER_PAGE_ENV: &str = "PLAYERS_PER_PAGE";
pub const CLOSET_PER_PAGE_ENV: &str = "CLOSET_PER_PAGE";
pub const PLAYER_NAME_RULE_ENV: &str = "PLAYER_NAME_RULE";
pub const PLAYER_NAME_MIN_ENV: &str = "PLAYER_NAME_MIN";
pub const PLAYER_NAME_MAX_ENV: &str = "PLAYER_NAME_MAX";
pub const SEED_FILE_ENV: &str = "SEED_FILE";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Default `RUST_LOG` filter.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// Longest closet item name accepted, in characters.
pub const MAX_ITEM_NAME_LEN: usize = 32;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("BASE_URL is not a valid absolute URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    #[error("BASE_URL cannot be used as a link base: {0}")]
    UnusableBaseUrl(String),

    #[error("Failed to read seed file {path}: {source}")]
    SeedRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Seed file is not valid: {0}")]
    SeedFormat(#[from] serde_json::Error),
}

/// Characters allowed in player names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlayerNameRule {
    /// ASCII letters, digits and `_`.
    #[default]
    Official,
    /// Official characters plus CJK unified ideographs.
    Cjk,
}

impl FromStr for PlayerNameRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "official" => Ok(PlayerNameRule::Official),
            "cjk" => Ok(PlayerNameRule::Cjk),
            other => Err(format!("unknown player name rule '{other}'")),
        }
    }
}

impl PlayerNameRule {
    fn allows(self, c: char) -> bool {
        let official = c.is_ascii_alphanumeric() || c == '_';
        match self {
            PlayerNameRule::Official => official,
            PlayerNameRule::Cjk => official || ('\u{4e00}'..='\u{9fff}').contains(&c),
        }
    }
}

/// Player name constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerNamePolicy {
    pub rule: PlayerNameRule,
    pub min_len: usize,
    pub max_len: usize,
}

impl Default for PlayerNamePolicy {
    fn default() -> Self {
        Self {
            rule: PlayerNameRule::Official,
            min_len: 3,
            max_len: 16,
        }
    }
}

impl PlayerNamePolicy {
    /// Returns the reason a name is refused, if it is.
    pub fn check(&self, name: &str) -> Result<(), String> {
        let len = name.chars().count();
        if len < self.min_len || len > self.max_len {
            return Err(format!(
                "Player name must be between {} and {} characters",
                self.min_len, self.max_len
            ));
        }
        if let Some(bad) = name.chars().find(|c| !self.rule.allows(*c)) {
            return Err(format!("Player name contains an invalid character '{bad}'"));
        }
        Ok(())
    }
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub base_url: Url,
    pub players_per_page: usize,
    pub closet_per_page: usize,
    pub player_name: PlayerNamePolicy,
    pub seed_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            base_url: default_base_url(),
            players_per_page: 10,
            closet_per_page: 6,
            player_name: PlayerNamePolicy::default(),
            seed_file: None,
        }
    }
}

fn default_base_url() -> Url {
    Url::parse("http://localhost:8080").expect("static URL parses")
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let base_url = match env::var(BASE_URL_ENV) {
            Ok(raw) => parse_base_url(&raw)?,
            Err(_) => defaults.base_url,
        };

        let player_name = PlayerNamePolicy {
            rule: try_load(PLAYER_NAME_RULE_ENV, defaults.player_name.rule),
            min_len: try_load(PLAYER_NAME_MIN_ENV, defaults.player_name.min_len),
            max_len: try_load(PLAYER_NAME_MAX_ENV, defaults.player_name.max_len),
        };

        Ok(Self {
            host: env::var(HOST_ENV).unwrap_or(defaults.host),
            port: try_load(PORT_ENV, defaults.port),
            base_url,
            players_per_page: try_load(PLAYERS_PER_PAGE_ENV, defaults.players_per_page).max(1),
            closet_per_page: try_load(CLOSET_PER_PAGE_ENV, defaults.closet_per_page).max(1),
            player_name,
            seed_file: env::var(SEED_FILE_ENV).ok().map(PathBuf::from),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parse a link base, rejecting URLs that cannot carry path segments.
pub fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim())?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::UnusableBaseUrl(raw.to_string()));
    }
    Ok(url)
}

fn try_load<T>(key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Debug,
    T::Err: Display,
{
    parse_or_default(key, env::var(key).ok(), default)
}

fn parse_or_default<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: FromStr + std::fmt::Debug,
    T::Err: Display,
{
    match raw {
        Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
            tracing::warn!("Invalid {key} value '{raw}': {e}; using default {default:?}");
            default
        }),
        None => default,
    }
}
