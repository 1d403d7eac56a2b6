// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Account permission levels.

use serde::{Deserialize, Serialize};

/// Account permission level.
///
/// ## Hierarchy
///
/// `Banned < Normal < Admin < SuperAdmin`
///
/// Serialized as its numeric level (`-1`, `0`, `1`, `2`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum Permission {
    /// Locked out of every endpoint.
    Banned,
    #[default]
    Normal,
    /// Access to the administration panel.
    Admin,
    /// Admin that may also manage other admins.
    SuperAdmin,
}

impl Permission {
    pub fn level(self) -> i8 {
        match self {
            Permission::Banned => -1,
            Permission::Normal => 0,
            Permission::Admin => 1,
            Permission::SuperAdmin => 2,
        }
    }

    pub fn is_admin(self) -> bool {
        self >= Permission::Admin
    }

    /// Whether an operator at this level may manage resources owned by an
    /// account at `owner` level.
    pub fn outranks(self, owner: Permission) -> bool {
        self == Permission::SuperAdmin || self > owner
    }
}

impl TryFrom<i8> for Permission {
    type Error = String;

    fn try_from(level: i8) -> Result<Self, Self::Error> {
        match level {
            -1 => Ok(Permission::Banned),
            0 => Ok(Permission::Normal),
            1 => Ok(Permission::Admin),
            2 => Ok(Permission::SuperAdmin),
            other => Err(format!("unknown permission level {other}")),
        }
    }
}

impl From<Permission> for i8 {
    fn from(permission: Permission) -> Self {
        permission.level()
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Permission::Banned => write!(f, "banned"),
            Permission::Normal => write!(f, "normal"),
            Permission::Admin => write!(f, "admin"),
            Permission::SuperAdmin => write!(f, "super-admin"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_follows_levels() {
        assert!(Permission::Banned < Permission::Normal);
        assert!(Permission::Normal < Permission::Admin);
        assert!(Permission::Admin < Permission::SuperAdmin);
    }

    #[test]
    fn only_admins_are_admins() {
        assert!(!Permission::Banned.is_admin());
        assert!(!Permission::Normal.is_admin());
        assert!(Permission::Admin.is_admin());
        assert!(Permission::SuperAdmin.is_admin());
    }

    #[test]
    fn admin_cannot_manage_peers() {
        assert!(Permission::Admin.outranks(Permission::Normal));
        assert!(!Permission::Admin.outranks(Permission::Admin));
        assert!(!Permission::Admin.outranks(Permission::SuperAdmin));
        assert!(Permission::SuperAdmin.outranks(Permission::SuperAdmin));
    }

    #[test]
    fn serializes_as_numeric_level() {
        assert_eq!(serde_json::to_string(&Permission::Banned).unwrap(), "-1");
        let parsed: Permission = serde_json::from_str("2").unwrap();
        assert_eq!(parsed, Permission::SuperAdmin);
        assert!(serde_json::from_str::<Permission>("7").is_err());
    }

    #[test]
    fn default_permission_is_normal() {
        assert_eq!(Permission::default(), Permission::Normal);
    }
}
