// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Identity & Authorization Module
//!
//! Authentication happens upstream. The gateway in front of this service
//! verifies the session and forwards the account id in `X-User-Id`.
//!
//! ## Request Flow
//!
//! 1. Gateway authenticates the browser session
//! 2. Gateway forwards `X-User-Id: <uid>`
//! 3. This service:
//!    - Loads the user record from the store
//!    - Rejects unknown accounts (401) and banned accounts (403)
//!    - Checks the permission level required by the route
//!
//! ## Permission Rules
//!
//! - `/admin/*` routes require `Admin` or `SuperAdmin`
//! - An admin may only touch players whose owner ranks strictly below them,
//!   unless they own the player or are a super admin

pub mod error;
pub mod extractor;
pub mod permission;

pub use error::AuthError;
pub use extractor::{AdminOnly, Auth, CurrentUser, USER_ID_HEADER};
pub use permission::Permission;
