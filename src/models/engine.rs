use super::default_true;
use serde::{Deserialize, Serialize};

/// A dedicated extraction engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Engine {
    pub id: i64,
    pub url: String,
    pub name: String,
    #[serde(rename = "type")]
    pub engine_type: String,
    #[serde(default = "default_true")]
    pub learning_enabled: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub agenda_id: Option<String>,
    #[serde(default)]
    pub training_queues: Vec<String>,
    #[serde(default)]
    pub organization: Option<String>,
}

/// A field an engine is trained to extract
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineField {
    pub id: i64,
    pub url: String,
    pub engine: String,
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub subtype: Option<String>,
    #[serde(default)]
    pub pre_trained_field_id: Option<String>,
    #[serde(default)]
    pub tabular: bool,
    #[serde(default)]
    pub multiline: Option<String>,
    #[serde(default)]
    pub schemas: Vec<String>,
}
