//! Capabilities and the static role→capability table.
//!
//! A capability is a discrete named right (e.g., "create posts"). The set of
//! capabilities is closed and the mapping from [`AdminRole`] to capabilities
//! is fixed at build time: adding a role or capability requires a code change.
//! There is no runtime configuration path that can widen a role's grants.

use serde::{Deserialize, Serialize};

use super::role::AdminRole;

/// A discrete admin capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Create new posts.
    CreatePosts,
    /// Edit existing posts.
    EditPosts,
    /// Delete posts.
    DeletePosts,
    /// Manage post categories.
    ManageCategories,
    /// Add/remove admin users.
    ManageAdmins,
    /// View site analytics.
    ViewAnalytics,
    /// Modify site settings.
    SiteSettings,
}

/// The category a capability belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityCategory {
    Posts,
    Users,
    Settings,
    Analytics,
}

impl Capability {
    /// All capabilities, in canonical order.
    pub const ALL: [Self; 7] = [
        Self::CreatePosts,
        Self::EditPosts,
        Self::DeletePosts,
        Self::ManageCategories,
        Self::ManageAdmins,
        Self::ViewAnalytics,
        Self::SiteSettings,
    ];

    /// Stable identifier used in the database snapshot and API payloads.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::CreatePosts => "create_posts",
            Self::EditPosts => "edit_posts",
            Self::DeletePosts => "delete_posts",
            Self::ManageCategories => "manage_categories",
            Self::ManageAdmins => "manage_admins",
            Self::ViewAnalytics => "view_analytics",
            Self::SiteSettings => "site_settings",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CreatePosts => "Create Posts",
            Self::EditPosts => "Edit Posts",
            Self::DeletePosts => "Delete Posts",
            Self::ManageCategories => "Manage Categories",
            Self::ManageAdmins => "Manage Admins",
            Self::ViewAnalytics => "View Analytics",
            Self::SiteSettings => "Site Settings",
        }
    }

    /// Human-readable description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::CreatePosts => "Can create new posts",
            Self::EditPosts => "Can edit existing posts",
            Self::DeletePosts => "Can delete posts",
            Self::ManageCategories => "Can manage post categories",
            Self::ManageAdmins => "Can add/remove admin users",
            Self::ViewAnalytics => "Can view site analytics",
            Self::SiteSettings => "Can modify site settings",
        }
    }

    /// Category this capability belongs to.
    #[must_use]
    pub const fn category(self) -> CapabilityCategory {
        match self {
            Self::CreatePosts
            | Self::EditPosts
            | Self::DeletePosts
            | Self::ManageCategories => CapabilityCategory::Posts,
            Self::ManageAdmins => CapabilityCategory::Users,
            Self::ViewAnalytics => CapabilityCategory::Analytics,
            Self::SiteSettings => CapabilityCategory::Settings,
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl std::str::FromStr for Capability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create_posts" => Ok(Self::CreatePosts),
            "edit_posts" => Ok(Self::EditPosts),
            "delete_posts" => Ok(Self::DeletePosts),
            "manage_categories" => Ok(Self::ManageCategories),
            "manage_admins" => Ok(Self::ManageAdmins),
            "view_analytics" => Ok(Self::ViewAnalytics),
            "site_settings" => Ok(Self::SiteSettings),
            _ => Err(format!("invalid capability: {s}")),
        }
    }
}

/// Capabilities granted to `super_admin`: everything.
const SUPER_ADMIN_CAPABILITIES: [Capability; 7] = Capability::ALL;

/// Capabilities granted to `admin`: everything except admin-user management
/// and site settings.
const ADMIN_CAPABILITIES: [Capability; 5] = [
    Capability::CreatePosts,
    Capability::EditPosts,
    Capability::DeletePosts,
    Capability::ManageCategories,
    Capability::ViewAnalytics,
];

/// Capabilities granted to `editor`: content authoring without deletion.
const EDITOR_CAPABILITIES: [Capability; 3] = [
    Capability::CreatePosts,
    Capability::EditPosts,
    Capability::ManageCategories,
];

/// The capability set a role grants, in canonical order.
///
/// Pure function over the static role table. `super_admin` holds a strict
/// superset of `admin`, which holds a strict superset of `editor`.
#[must_use]
pub const fn permissions_for(role: AdminRole) -> &'static [Capability] {
    match role {
        AdminRole::SuperAdmin => &SUPER_ADMIN_CAPABILITIES,
        AdminRole::Admin => &ADMIN_CAPABILITIES,
        AdminRole::Editor => &EDITOR_CAPABILITIES,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn is_strict_superset(bigger: &[Capability], smaller: &[Capability]) -> bool {
        smaller.iter().all(|c| bigger.contains(c)) && bigger.len() > smaller.len()
    }

    #[test]
    fn test_role_capability_chain_is_strict() {
        let super_admin = permissions_for(AdminRole::SuperAdmin);
        let admin = permissions_for(AdminRole::Admin);
        let editor = permissions_for(AdminRole::Editor);

        assert!(is_strict_superset(super_admin, admin));
        assert!(is_strict_superset(admin, editor));
        assert!(is_strict_superset(super_admin, editor));
    }

    #[test]
    fn test_chain_holds_per_shared_category() {
        let super_admin = permissions_for(AdminRole::SuperAdmin);
        let admin = permissions_for(AdminRole::Admin);
        let editor = permissions_for(AdminRole::Editor);

        for category in [
            CapabilityCategory::Posts,
            CapabilityCategory::Users,
            CapabilityCategory::Settings,
            CapabilityCategory::Analytics,
        ] {
            let in_cat = |caps: &[Capability]| {
                caps.iter()
                    .filter(|c| c.category() == category)
                    .copied()
                    .collect::<Vec<_>>()
            };
            let (s, a, e) = (in_cat(super_admin), in_cat(admin), in_cat(editor));
            assert!(a.iter().all(|c| s.contains(c)));
            assert!(e.iter().all(|c| a.contains(c)));
        }
    }

    #[test]
    fn test_super_admin_has_everything() {
        assert_eq!(
            permissions_for(AdminRole::SuperAdmin),
            Capability::ALL.as_slice()
        );
    }

    #[test]
    fn test_admin_lacks_user_and_settings_management() {
        let admin = permissions_for(AdminRole::Admin);
        assert!(!admin.contains(&Capability::ManageAdmins));
        assert!(!admin.contains(&Capability::SiteSettings));
        assert!(admin.contains(&Capability::DeletePosts));
    }

    #[test]
    fn test_editor_is_posts_only_without_delete() {
        let editor = permissions_for(AdminRole::Editor);
        assert!(
            editor
                .iter()
                .all(|c| c.category() == CapabilityCategory::Posts)
        );
        assert!(!editor.contains(&Capability::DeletePosts));
        assert!(editor.contains(&Capability::CreatePosts));
        assert!(editor.contains(&Capability::EditPosts));
    }

    #[test]
    fn test_id_from_str_roundtrip() {
        for cap in Capability::ALL {
            let parsed: Capability = cap.id().parse().unwrap();
            assert_eq!(parsed, cap);
        }
        assert!("publish_posts".parse::<Capability>().is_err());
    }

    #[test]
    fn test_serde_matches_id() {
        for cap in Capability::ALL {
            let json = serde_json::to_string(&cap).unwrap();
            assert_eq!(json, format!("\"{}\"", cap.id()));
        }
    }
}
