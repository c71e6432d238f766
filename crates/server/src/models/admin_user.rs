//! Admin user domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use nepali_star_core::{AdminRole, AdminUserId, Capability, Email, Username};

/// An admin user (domain type).
///
/// The credential hash never leaves the db module, so this type is safe to
/// serialize into API responses.
#[derive(Debug, Clone, Serialize)]
pub struct AdminUser {
    /// Unique admin user ID.
    pub id: AdminUserId,
    /// Login username.
    pub username: Username,
    /// Admin's email address.
    pub email: Email,
    /// Admin's role.
    pub role: AdminRole,
    /// Capability snapshot, derived from the role at assignment time.
    pub permissions: Vec<Capability>,
    /// Whether this account may authenticate.
    pub is_active: bool,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// Last successful authentication, if any.
    pub last_login_at: Option<DateTime<Utc>>,
    /// Admin who created this account (audit only).
    pub created_by: Option<AdminUserId>,
}

impl AdminUser {
    /// Whether this account's capability snapshot includes a capability.
    ///
    /// Deactivated accounts hold no capabilities. Request authorization goes
    /// through the claims-based gate instead; this answers for the persisted
    /// snapshot (e.g., for the admin UI).
    #[must_use]
    pub fn has_capability(&self, capability: Capability) -> bool {
        self.is_active && self.permissions.contains(&capability)
    }
}

/// Data for inserting a new admin user.
#[derive(Debug)]
pub struct NewAdminUser {
    pub username: Username,
    pub email: Email,
    /// Argon2 PHC hash of the password.
    pub credential_hash: String,
    pub role: AdminRole,
    /// Capability snapshot for the role.
    pub permissions: Vec<Capability>,
    pub created_by: Option<AdminUserId>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;

    use nepali_star_core::permissions_for;

    use super::*;

    fn user(role: AdminRole, is_active: bool) -> AdminUser {
        AdminUser {
            id: AdminUserId::new(1),
            username: Username::parse("dipesh").unwrap(),
            email: Email::parse("super@nepalistar.com").unwrap(),
            role,
            permissions: permissions_for(role).to_vec(),
            is_active,
            created_at: Utc::now(),
            last_login_at: None,
            created_by: None,
        }
    }

    #[test]
    fn test_has_capability_follows_snapshot() {
        let admin = user(AdminRole::Admin, true);
        assert!(admin.has_capability(Capability::DeletePosts));
        assert!(!admin.has_capability(Capability::ManageAdmins));
    }

    #[test]
    fn test_deactivated_account_has_no_capabilities() {
        let admin = user(AdminRole::SuperAdmin, false);
        assert!(!admin.has_capability(Capability::CreatePosts));
        assert!(!admin.has_capability(Capability::ManageAdmins));
    }
}
