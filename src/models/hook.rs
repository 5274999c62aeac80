use crate::types::{JsonObject, JsonValue};
use serde::{Deserialize, Serialize};

/// How a hook is executed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookType {
    #[default]
    Webhook,
    Function,
    Job,
}

fn default_settings() -> Option<JsonObject> {
    Some(JsonObject::new())
}

fn default_extension_source() -> String {
    "custom".to_string()
}

fn default_store_source() -> String {
    "rossum_store".to_string()
}

/// Extension notified on events (webhook or serverless function)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hook {
    pub id: i64,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub config: JsonObject,
    #[serde(default)]
    pub test: JsonObject,
    #[serde(default)]
    pub guide: Option<String>,
    #[serde(default)]
    pub read_more_url: Option<String>,
    #[serde(default)]
    pub extension_image_url: Option<String>,
    #[serde(default, rename = "type")]
    pub hook_type: HookType,
    #[serde(default)]
    pub queues: Vec<String>,
    #[serde(default)]
    pub run_after: Vec<String>,
    /// `<event>.<action>` names, e.g. `annotation_content.initialize`
    #[serde(default)]
    pub events: Vec<String>,
    /// Empty when absent from the payload, `None` when explicitly null
    #[serde(default = "default_settings")]
    pub settings: Option<JsonObject>,
    #[serde(default)]
    pub settings_schema: Option<JsonObject>,
    #[serde(default)]
    pub secrets: JsonObject,
    #[serde(default = "default_extension_source")]
    pub extension_source: String,
    #[serde(default)]
    pub sideload: Vec<String>,
    #[serde(default)]
    pub token_owner: Option<String>,
    #[serde(default)]
    pub token_lifetime_s: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub metadata: JsonObject,
}

/// One entry of the hook run log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HookRunData {
    #[serde(default)]
    pub log_level: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub event: Option<String>,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub organization_id: Option<i64>,
    #[serde(default)]
    pub hook_id: Option<i64>,
    #[serde(default)]
    pub hook_type: Option<HookType>,
    #[serde(default)]
    pub queue_id: Option<i64>,
    #[serde(default)]
    pub annotation_id: Option<i64>,
    #[serde(default)]
    pub email_id: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub request: Option<JsonValue>,
    #[serde(default)]
    pub response: Option<JsonValue>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub status_code: Option<i64>,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub uuid: Option<String>,
}

/// Template for creating hooks (store extensions)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HookTemplate {
    pub id: i64,
    pub name: String,
    pub url: String,
    #[serde(default, rename = "type")]
    pub hook_type: HookType,
    #[serde(default)]
    pub events: Vec<String>,
    #[serde(default)]
    pub sideload: Vec<String>,
    #[serde(default)]
    pub metadata: JsonObject,
    #[serde(default)]
    pub config: JsonObject,
    #[serde(default)]
    pub test: JsonObject,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_store_source")]
    pub extension_source: String,
    #[serde(default)]
    pub settings: JsonObject,
    #[serde(default)]
    pub settings_schema: Option<JsonObject>,
    #[serde(default)]
    pub secrets_schema: Option<JsonObject>,
    #[serde(default)]
    pub guide: Option<String>,
    #[serde(default)]
    pub read_more_url: Option<String>,
    #[serde(default)]
    pub extension_image_url: Option<String>,
}
