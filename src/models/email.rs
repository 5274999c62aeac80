use super::default_true;
use crate::types::{JsonObject, JsonValue};
use serde::{Deserialize, Serialize};

/// Sender or recipient of an email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAddress {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// An email received by an inbox or sent from the app
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Email {
    pub id: i64,
    pub url: String,
    #[serde(default)]
    pub queue: Option<String>,
    #[serde(default)]
    pub inbox: Option<String>,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub email_thread: Option<String>,
    #[serde(default)]
    pub children: Vec<String>,
    #[serde(default)]
    pub documents: Vec<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub last_thread_email_created_at: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default, rename = "from")]
    pub email_from: Option<EmailAddress>,
    #[serde(default)]
    pub to: Vec<EmailAddress>,
    #[serde(default)]
    pub cc: Vec<EmailAddress>,
    #[serde(default)]
    pub bcc: Vec<EmailAddress>,
    #[serde(default)]
    pub body_text_plain: Option<String>,
    #[serde(default)]
    pub body_text_html: Option<String>,
    #[serde(default)]
    pub annotation_counts: JsonObject,
    #[serde(default)]
    pub annotations: Vec<String>,
    #[serde(default)]
    pub related_annotations: Vec<String>,
    #[serde(default)]
    pub related_documents: Vec<String>,
    #[serde(default)]
    pub filtered_out_document_count: Option<i64>,
    #[serde(default)]
    pub labels: Vec<String>,
    /// `incoming` or `outgoing`
    #[serde(default, rename = "type")]
    pub email_type: Option<String>,
    #[serde(default)]
    pub metadata: JsonObject,
}

/// What an email template is used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailTemplateType {
    Rejection,
    RejectionDefault,
    EmailWithNoProcessableAttachments,
    Custom,
}

/// Template to choose from when sending an email
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailTemplate {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub queue: String,
    pub organization: String,
    pub subject: String,
    pub message: String,
    #[serde(rename = "type")]
    pub template_type: EmailTemplateType,
    /// Deprecated, see `automate`
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Send the email automatically on the action given by the type
    #[serde(default)]
    pub automate: bool,
    #[serde(default)]
    pub triggers: Vec<String>,
    #[serde(default)]
    pub to: Vec<JsonValue>,
    #[serde(default)]
    pub cc: Vec<JsonValue>,
    #[serde(default)]
    pub bcc: Vec<JsonValue>,
}
