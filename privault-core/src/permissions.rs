use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named boolean capabilities granted to a safe member.
///
/// Missing wire fields default to `false`, so a partially-populated grant
/// deserializes into an explicit bit-set.
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct SafePermissions {
    pub use_accounts: bool,
    pub retrieve_accounts: bool,
    pub list_accounts: bool,
    pub add_accounts: bool,
    pub update_account_content: bool,
    pub update_account_properties: bool,
    pub initiate_credential_rotation: bool,
    pub rename_accounts: bool,
    pub delete_accounts: bool,
    pub unlock_accounts: bool,
    pub manage_safe: bool,
    pub manage_safe_members: bool,
    pub backup_safe: bool,
    pub view_audit_log: bool,
    pub view_safe_members: bool,
    pub access_without_confirmation: bool,
    pub create_folders: bool,
    pub delete_folders: bool,
    pub move_accounts_and_folders: bool,
    pub requests_authorization_level1: bool,
    pub requests_authorization_level2: bool,
}

/// Canonical permission tier, or `Custom` for any non-canonical bit-set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PermissionTier {
    ConnectOnly,
    ReadOnly,
    Approver,
    AccountsManager,
    Full,
    Custom,
}

impl PermissionTier {
    /// Stable string representation used on the request surface.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ConnectOnly => "connect_only",
            Self::ReadOnly => "read_only",
            Self::Approver => "approver",
            Self::AccountsManager => "accounts_manager",
            Self::Full => "full",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for PermissionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PermissionTier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "connect_only" => Ok(Self::ConnectOnly),
            "read_only" => Ok(Self::ReadOnly),
            "approver" => Ok(Self::Approver),
            "accounts_manager" => Ok(Self::AccountsManager),
            "full" => Ok(Self::Full),
            "custom" => Ok(Self::Custom),
            other => Err(Error::UnknownTier(other.to_string())),
        }
    }
}

fn connect_only() -> SafePermissions {
    SafePermissions {
        use_accounts: true,
        list_accounts: true,
        ..SafePermissions::default()
    }
}

fn read_only() -> SafePermissions {
    SafePermissions {
        use_accounts: true,
        retrieve_accounts: true,
        list_accounts: true,
        ..SafePermissions::default()
    }
}

fn approver() -> SafePermissions {
    SafePermissions {
        list_accounts: true,
        view_safe_members: true,
        requests_authorization_level1: true,
        ..SafePermissions::default()
    }
}

fn accounts_manager() -> SafePermissions {
    SafePermissions {
        use_accounts: true,
        retrieve_accounts: true,
        list_accounts: true,
        add_accounts: true,
        update_account_content: true,
        update_account_properties: true,
        initiate_credential_rotation: true,
        rename_accounts: true,
        delete_accounts: true,
        unlock_accounts: true,
        view_audit_log: true,
        view_safe_members: true,
        access_without_confirmation: true,
        ..SafePermissions::default()
    }
}

fn full() -> SafePermissions {
    SafePermissions {
        use_accounts: true,
        retrieve_accounts: true,
        list_accounts: true,
        add_accounts: true,
        update_account_content: true,
        update_account_properties: true,
        initiate_credential_rotation: true,
        rename_accounts: true,
        delete_accounts: true,
        unlock_accounts: true,
        manage_safe: true,
        manage_safe_members: true,
        backup_safe: true,
        view_audit_log: true,
        view_safe_members: true,
        access_without_confirmation: true,
        create_folders: true,
        delete_folders: true,
        move_accounts_and_folders: true,
        requests_authorization_level1: true,
        requests_authorization_level2: false,
    }
}

/// Canonical tier table in a fixed order.
///
/// Classification is by exact equality, so the order only matters if two
/// entries ever coincide; the table test below keeps them pairwise
/// distinct.
pub fn canonical_table() -> [(PermissionTier, SafePermissions); 5] {
    [
        (PermissionTier::ConnectOnly, connect_only()),
        (PermissionTier::ReadOnly, read_only()),
        (PermissionTier::Approver, approver()),
        (PermissionTier::AccountsManager, accounts_manager()),
        (PermissionTier::Full, full()),
    ]
}

/// Map a bit-set to its canonical tier, or `Custom` when no canonical set
/// matches exactly. Never fails.
pub fn classify(permissions: &SafePermissions) -> PermissionTier {
    for (tier, canonical) in canonical_table() {
        if canonical == *permissions {
            return tier;
        }
    }
    PermissionTier::Custom
}

/// Resolve a tier name back to its canonical bit-set.
///
/// `custom` has no canonical set and is rejected alongside unrecognized
/// names.
pub fn reverse_lookup(tier_name: &str) -> Result<SafePermissions> {
    let tier = PermissionTier::from_str(tier_name)?;
    canonical_table()
        .into_iter()
        .find(|(candidate, _)| *candidate == tier)
        .map(|(_, permissions)| permissions)
        .ok_or_else(|| Error::UnknownTier(tier_name.to_string()))
}
