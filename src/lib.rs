// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Skinhub - Skin & Texture Management Service
//!
//! Player administration for operators and a texture closet for every
//! account, served over HTTP, plus the view models of the two pages.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Caller identity and permission checks
//! - `client` - Page view models and the HTTP backend they talk to
//! - `store` - In-memory users, textures, players and closets
//! - `filters` - Value hooks plugins can register on
//! - `menu` - User menu data for the page header

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod filters;
pub mod menu;
pub mod models;
pub mod pagination;
pub mod search;
pub mod state;
pub mod store;
pub mod telemetry;
pub mod urls;
