use privault_core::SafePermissions;
use serde::{Deserialize, Serialize};

/// Safe returned by the platform.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SafeDetails {
    pub safe_id: String,
    pub safe_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_days_retention: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_purge_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSafeRequest {
    pub safe_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_days_retention: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_purge_enabled: Option<bool>,
}

impl AddSafeRequest {
    /// Request creating a safe with default retention.
    pub fn new(safe_name: impl Into<String>) -> Self {
        Self {
            safe_name: safe_name.into(),
            description: None,
            location: None,
            number_of_days_retention: None,
            auto_purge_enabled: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSafeRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_days_retention: Option<u32>,
}

/// Kind of principal a safe membership is granted to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MemberType {
    User,
    Group,
    Role,
}

/// Membership grant on a safe.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SafeMember {
    pub member_name: String,
    pub member_type: MemberType,
    pub permissions: SafePermissions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub membership_expiration_date: Option<i64>,
}

/// Grant request: either a named permission tier or an explicit custom
/// bit-set. Supplying both is allowed; the explicit set wins.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSafeMemberRequest {
    pub member_name: String,
    pub member_type: MemberType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub membership_expiration_date: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permission_set: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<SafePermissions>,
}

impl AddSafeMemberRequest {
    /// Grant a canonical tier by name.
    pub fn with_tier(
        member_name: impl Into<String>,
        member_type: MemberType,
        tier_name: impl Into<String>,
    ) -> Self {
        Self {
            member_name: member_name.into(),
            member_type,
            membership_expiration_date: None,
            permission_set: Some(tier_name.into()),
            permissions: None,
        }
    }

    /// Grant an explicit custom bit-set.
    pub fn with_permissions(
        member_name: impl Into<String>,
        member_type: MemberType,
        permissions: SafePermissions,
    ) -> Self {
        Self {
            member_name: member_name.into(),
            member_type,
            membership_expiration_date: None,
            permission_set: None,
            permissions: Some(permissions),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSafeMemberRequest {
    pub permissions: SafePermissions,
}

/// Per-safe aggregation result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SafeStats {
    pub members_count: u64,
    pub accounts_count: u64,
}
