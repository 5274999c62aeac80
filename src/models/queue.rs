use super::default_true;
use crate::types::{JsonObject, JsonValue};
use serde::{Deserialize, Serialize};

fn default_score_threshold() -> f64 {
    0.8
}

fn default_session_timeout() -> String {
    "01:00:00".to_string()
}

fn default_automation_level() -> String {
    "never".to_string()
}

fn default_status() -> String {
    "active".to_string()
}

fn default_locale() -> String {
    "en_GB".to_string()
}

/// A queue of documents sharing a schema and processing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Queue {
    pub id: i64,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub workspace: Option<String>,
    #[serde(default)]
    pub connector: Option<String>,
    #[serde(default)]
    pub schema: Option<String>,
    #[serde(default)]
    pub inbox: Option<String>,
    #[serde(default)]
    pub users: Vec<String>,
    #[serde(default)]
    pub hooks: Vec<String>,
    #[serde(default)]
    pub webhooks: Vec<String>,
    #[serde(default = "default_session_timeout")]
    pub session_timeout: String,
    #[serde(default)]
    pub rir_url: Option<String>,
    #[serde(default)]
    pub rir_params: Option<String>,
    #[serde(default)]
    pub dedicated_engine: Option<JsonValue>,
    #[serde(default)]
    pub generic_engine: Option<JsonValue>,
    #[serde(default)]
    pub counts: JsonObject,
    #[serde(default = "default_score_threshold")]
    pub default_score_threshold: f64,
    #[serde(default)]
    pub automation_enabled: bool,
    #[serde(default = "default_automation_level")]
    pub automation_level: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub use_confirmed_state: bool,
    #[serde(default = "default_true")]
    pub training_enabled: bool,
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default)]
    pub document_lifetime: Option<String>,
    #[serde(default)]
    pub delete_after: Option<String>,
    #[serde(default)]
    pub settings: JsonObject,
    #[serde(default)]
    pub metadata: JsonObject,
}

/// A group of queues within an organization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    pub id: i64,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub autopilot: bool,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub queues: Vec<String>,
    #[serde(default)]
    pub metadata: JsonObject,
}

/// An email address receiving documents into queues
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inbox {
    pub id: i64,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub queues: Vec<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub email_prefix: Option<String>,
    #[serde(default)]
    pub bounce_email_to: Option<String>,
    #[serde(default)]
    pub bounce_unprocessable_attachments: bool,
    #[serde(default)]
    pub bounce_postponed_annotations: bool,
    #[serde(default)]
    pub bounce_deleted_annotations: bool,
    #[serde(default = "default_true")]
    pub bounce_email_with_no_attachments: bool,
    #[serde(default)]
    pub filters: JsonObject,
    #[serde(default)]
    pub dmarc_check_action: Option<String>,
    #[serde(default)]
    pub metadata: JsonObject,
}

/// External service validating and exporting a queue's annotations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    pub id: i64,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub queues: Vec<String>,
    #[serde(default)]
    pub service_url: Option<String>,
    #[serde(default)]
    pub params: Option<String>,
    #[serde(default)]
    pub client_ssl_certificate: Option<String>,
    #[serde(default)]
    pub authorization_token: Option<String>,
    #[serde(default = "default_true")]
    pub asynchronous: bool,
    #[serde(default)]
    pub metadata: JsonObject,
}
