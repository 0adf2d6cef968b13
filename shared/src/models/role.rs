//! Role Model
//!
//! Two broad authorization classes gate the API: admin-tier roles drive
//! the operator console, the device-tier role is what kiosks poll with.
//! Role claims come from the identity provider and are trusted verbatim.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Principal role as claimed by the identity provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Fleet-wide operator, sees every project
    SuperAdmin,
    /// Fleet-wide operator without user administration rights
    Admin,
    /// Operator scoped to a single project (hotel property)
    Manager,
    /// Kiosk device account
    Kiosk,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Kiosk => "kiosk",
        }
    }

    /// Operator-console roles
    pub fn is_admin_tier(&self) -> bool {
        matches!(self, Self::SuperAdmin | Self::Admin | Self::Manager)
    }

    /// Device roles (kiosk pollers)
    pub fn is_device_tier(&self) -> bool {
        matches!(self, Self::Kiosk)
    }

    /// Roles that see kiosk-initiated calls across all projects
    pub fn is_super_admin_class(&self) -> bool {
        matches!(self, Self::SuperAdmin | Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "super_admin" => Ok(Self::SuperAdmin),
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "kiosk" => Ok(Self::Kiosk),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_roundtrip() {
        for role in [Role::SuperAdmin, Role::Admin, Role::Manager, Role::Kiosk] {
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
        }
        assert!("guest".parse::<Role>().is_err());
    }

    #[test]
    fn test_tiers_are_disjoint() {
        for role in [Role::SuperAdmin, Role::Admin, Role::Manager, Role::Kiosk] {
            assert_ne!(role.is_admin_tier(), role.is_device_tier());
        }
    }

    #[test]
    fn test_super_admin_class() {
        assert!(Role::SuperAdmin.is_super_admin_class());
        assert!(Role::Admin.is_super_admin_class());
        assert!(!Role::Manager.is_super_admin_class());
        assert!(!Role::Kiosk.is_super_admin_class());
    }
}
