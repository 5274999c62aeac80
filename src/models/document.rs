use crate::types::JsonObject;
use serde::{Deserialize, Serialize};

/// An uploaded file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: i64,
    pub url: String,
    #[serde(default)]
    pub s3_name: Option<String>,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub creator: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub arrived_at: Option<String>,
    #[serde(default)]
    pub original_file_name: Option<String>,
    /// URL of the raw file content
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub attachment_status: Option<String>,
    #[serde(default)]
    pub annotations: Vec<String>,
    #[serde(default)]
    pub metadata: JsonObject,
}

/// Links an annotation to additional documents (exports, e-invoices)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRelation {
    pub id: i64,
    #[serde(rename = "type")]
    pub relation_type: String,
    pub annotation: String,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub documents: Vec<String>,
    pub url: String,
}

/// Kind of relationship between annotations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationType {
    /// Created by editing (rotating or splitting) a document; the original
    /// annotation is the parent
    Edit,
    /// Documents attached to another document; `key` is null
    Attachment,
    /// The same document imported again; `key` is the MD5 of the content
    Duplicate,
}

/// Common relation between annotations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub id: i64,
    #[serde(rename = "type")]
    pub relation_type: RelationType,
    pub key: Option<String>,
    pub parent: Option<String>,
    pub annotations: Vec<String>,
    pub url: String,
}
