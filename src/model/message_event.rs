use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Platforms broken out in message statistics. Events carrying any other
/// platform value still count toward the total.
pub const KNOWN_PLATFORMS: [&str; 3] = ["instagram", "facebook", "whatsapp"];

/// Message types broken out in message statistics.
pub const KNOWN_TYPES: [&str; 3] = ["incoming", "outgoing", "ai_response"];

/// One tracked message. Callers may attach arbitrary extra fields (sender
/// name, media ids, ...) which are persisted verbatim alongside the known
/// ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageEvent {
    pub id: String,
    pub user_id: String,
    pub platform: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub timestamp: String,
    pub conversation_id: String,
    pub message_id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMessageEvent {
    pub user_id: String,
    pub platform: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Aggregated message activity for one user over a trailing window.
///
/// `platform_counts` and `type_counts` are pre-seeded with every known key
/// at zero; unknown platform/type values are counted only in `total`.
/// `daily_counts` maps UTC calendar dates (YYYY-MM-DD) to event counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageStats {
    pub total: u64,
    pub daily_counts: BTreeMap<String, u64>,
    pub platform_counts: BTreeMap<String, u64>,
    pub type_counts: BTreeMap<String, u64>,
}

impl MessageStats {
    pub fn zeroed() -> Self {
        MessageStats {
            total: 0,
            daily_counts: BTreeMap::new(),
            platform_counts: KNOWN_PLATFORMS
                .iter()
                .map(|p| (p.to_string(), 0))
                .collect(),
            type_counts: KNOWN_TYPES.iter().map(|t| (t.to_string(), 0)).collect(),
        }
    }
}
