use super::default_true;
use crate::types::JsonObject;
use serde::{Deserialize, Serialize};

/// A user account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub url: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub date_joined: Option<String>,
    pub username: String,
    /// Role URLs
    #[serde(default)]
    pub groups: Vec<String>,
    pub organization: String,
    #[serde(default)]
    pub queues: Vec<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub last_login: Option<String>,
    #[serde(default)]
    pub ui_settings: JsonObject,
    #[serde(default)]
    pub metadata: JsonObject,
    #[serde(default)]
    pub oidc_id: Option<String>,
    #[serde(default)]
    pub auth_type: Option<String>,
    #[serde(default)]
    pub deleted: bool,
}

/// User role: a named set of permissions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: i64,
    pub name: String,
    pub url: String,
}
