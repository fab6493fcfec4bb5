use serde::{Deserialize, Serialize};

/// A connected social platform account (Instagram page, Facebook page,
/// WhatsApp number). Disconnecting is a logical flip of `is_active`;
/// physical deletion also exists for account removal flows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialMediaAccount {
    pub id: String,
    pub user_id: String,
    pub platform: String,
    pub account_id: String,
    pub account_name: String,
    pub access_token: String,
    pub page_id: String,
    pub connected_at: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSocialAccount {
    pub user_id: String,
    pub platform: String,
    pub account_id: String,
    pub account_name: String,
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_id: Option<String>,
}
