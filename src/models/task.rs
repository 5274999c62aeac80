use crate::types::{JsonObject, JsonValue};
use serde::{Deserialize, Serialize};

/// State of an asynchronous task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Running,
    Succeeded,
    Failed,
}

/// Asynchronous server-side operation, e.g. processing an upload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub url: String,
    #[serde(rename = "type")]
    pub task_type: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub expires_at: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub content: JsonObject,
    #[serde(default)]
    pub code: Option<String>,
    /// URL of the object created by the task, e.g. an upload
    #[serde(default)]
    pub result_url: Option<String>,
}

impl Task {
    /// Whether the task finished successfully
    pub fn is_succeeded(&self) -> bool {
        self.status == TaskStatus::Succeeded
    }
}

/// A batch of uploaded files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Upload {
    pub id: i64,
    pub url: String,
    #[serde(default)]
    pub queue: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub creator: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub documents: Vec<String>,
    #[serde(default)]
    pub additional_documents: Vec<String>,
    #[serde(default)]
    pub annotations: Vec<String>,
    #[serde(default)]
    pub email: Option<JsonValue>,
}
