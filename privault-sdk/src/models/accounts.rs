use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Kind of secret an account holds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SecretType {
    Password,
    Key,
}

impl SecretType {
    /// Stable string form matching the wire value.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Password => "password",
            Self::Key => "key",
        }
    }
}

/// Rotation bookkeeping attached to an account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SecretManagement {
    pub automatic_management_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified_time: Option<i64>,
}

/// Account returned by the platform.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccountDetails {
    pub id: String,
    pub name: String,
    pub safe_name: String,
    pub platform_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub secret_type: SecretType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_management: Option<SecretManagement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_time: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddAccountRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub safe_name: String,
    pub platform_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub secret_type: SecretType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
}

impl AddAccountRequest {
    pub fn new(
        safe_name: impl Into<String>,
        platform_id: impl Into<String>,
        secret_type: SecretType,
    ) -> Self {
        Self {
            name: None,
            safe_name: safe_name.into(),
            platform_id: platform_id.into(),
            user_name: None,
            address: None,
            secret_type,
            secret: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Listing filter translated into query parameters.
#[derive(Debug, Clone, Default)]
pub struct AccountsFilter {
    pub search: Option<String>,
    pub safe_name: Option<String>,
    pub limit: Option<u32>,
}

impl AccountsFilter {
    pub fn for_safe(safe_name: impl Into<String>) -> Self {
        Self {
            safe_name: Some(safe_name.into()),
            ..Self::default()
        }
    }

    /// Initial query parameters for the listing request.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(search) = &self.search {
            query.push(("search".to_string(), search.clone()));
        }
        if let Some(safe_name) = &self.safe_name {
            query.push(("safeName".to_string(), safe_name.clone()));
        }
        if let Some(limit) = self.limit {
            query.push(("limit".to_string(), limit.to_string()));
        }
        query
    }
}

/// Fold of a full account listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccountsStats {
    pub total_accounts: u64,
    pub by_platform: BTreeMap<String, u64>,
    pub by_secret_type: BTreeMap<String, u64>,
    pub auto_managed: u64,
}
