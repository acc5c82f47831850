use serde::{Deserialize, Serialize};

/// Connection platform definition.
///
/// The wire nests identity fields under a `general` block; the listing
/// decoder promotes them to the top level before this struct is decoded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Platform {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_type: Option<String>,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_type: Option<String>,
}
