//! Admin role enumeration.

use serde::{Deserialize, Serialize};

/// Admin role with different permission levels.
///
/// Roles form a closed set; the capabilities each role grants are defined by
/// the static table in [`crate::types::capability`]. Adding a role requires a
/// code change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "admin_role", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    /// Full access to all admin features including admin-user management.
    SuperAdmin,
    /// Full access to content management features.
    Admin,
    /// Content authoring only.
    Editor,
}

impl std::fmt::Display for AdminRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SuperAdmin => write!(f, "super_admin"),
            Self::Admin => write!(f, "admin"),
            Self::Editor => write!(f, "editor"),
        }
    }
}

impl std::str::FromStr for AdminRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "super_admin" => Ok(Self::SuperAdmin),
            "admin" => Ok(Self::Admin),
            "editor" => Ok(Self::Editor),
            _ => Err(format!("invalid admin role: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_from_str_roundtrip() {
        for role in [AdminRole::SuperAdmin, AdminRole::Admin, AdminRole::Editor] {
            let s = role.to_string();
            let parsed: AdminRole = s.parse().unwrap();
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn test_from_str_invalid() {
        assert!("viewer".parse::<AdminRole>().is_err());
        assert!("".parse::<AdminRole>().is_err());
        assert!("SuperAdmin".parse::<AdminRole>().is_err());
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&AdminRole::SuperAdmin).unwrap();
        assert_eq!(json, "\"super_admin\"");

        let parsed: AdminRole = serde_json::from_str("\"editor\"").unwrap();
        assert_eq!(parsed, AdminRole::Editor);
    }
}
