use super::{Document, Link, Queue, Schema, User};
use crate::types::{JsonObject, JsonValue};
use serde::{Deserialize, Serialize};

/// One processed document and its extracted data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: i64,
    pub url: String,
    /// Lifecycle status, e.g. `importing`, `to_review`, `confirmed`, `exported`
    pub status: String,
    /// Schema URL, or the schema when sideloaded. `None` when a sideload
    /// did not include the referenced schema.
    #[serde(default)]
    pub schema: Option<Link<Schema>>,
    /// Document URL, or the document when sideloaded. `None` when a
    /// sideload did not include the referenced document.
    #[serde(default)]
    pub document: Option<Link<Document>>,
    /// Queue URL, or the queue when sideloaded
    #[serde(default)]
    pub queue: Option<Link<Queue>>,
    /// URL of the last modifier, or the user when sideloaded
    #[serde(default)]
    pub modifier: Option<Link<User>>,
    /// Content URL, or the datapoint tree when sideloaded
    #[serde(default)]
    pub content: Option<Link<Vec<JsonValue>>>,
    #[serde(default)]
    pub creator: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub modified_at: Option<String>,
    #[serde(default)]
    pub modified_by: Option<String>,
    #[serde(default)]
    pub arrived_at: Option<String>,
    #[serde(default)]
    pub assigned_at: Option<String>,
    #[serde(default)]
    pub confirmed_at: Option<String>,
    #[serde(default)]
    pub confirmed_by: Option<String>,
    #[serde(default)]
    pub exported_at: Option<String>,
    #[serde(default)]
    pub exported_by: Option<String>,
    #[serde(default)]
    pub export_failed_at: Option<String>,
    #[serde(default)]
    pub deleted_at: Option<String>,
    #[serde(default)]
    pub deleted_by: Option<String>,
    #[serde(default)]
    pub rejected_at: Option<String>,
    #[serde(default)]
    pub rejected_by: Option<String>,
    #[serde(default)]
    pub purged_at: Option<String>,
    #[serde(default)]
    pub purged_by: Option<String>,
    #[serde(default)]
    pub rir_poll_id: Option<String>,
    #[serde(default)]
    pub messages: Option<Vec<JsonValue>>,
    #[serde(default)]
    pub pages: Vec<String>,
    #[serde(default)]
    pub relations: Vec<String>,
    #[serde(default)]
    pub related_emails: Vec<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub email_thread: Option<String>,
    #[serde(default)]
    pub has_email_thread_with_replies: bool,
    #[serde(default)]
    pub has_email_thread_with_new_replies: bool,
    #[serde(default)]
    pub automation_blocker: Option<String>,
    #[serde(default)]
    pub automated: bool,
    #[serde(default)]
    pub restricted_access: bool,
    #[serde(default)]
    pub training_enabled: bool,
    #[serde(default)]
    pub time_spent: Option<f64>,
    #[serde(default)]
    pub prediction: Option<JsonValue>,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub metadata: JsonObject,
}

impl Annotation {
    /// Whether the document finished importing
    pub fn is_imported(&self) -> bool {
        !matches!(self.status.as_str(), "importing" | "created")
    }
}
