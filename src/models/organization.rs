use crate::types::JsonObject;
use serde::{Deserialize, Serialize};

/// Top-level account owning workspaces and users
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: i64,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub workspaces: Vec<String>,
    #[serde(default)]
    pub users: Vec<String>,
    #[serde(default)]
    pub organization_group: Option<String>,
    #[serde(default)]
    pub ui_settings: JsonObject,
    #[serde(default)]
    pub metadata: JsonObject,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub trial_expires_at: Option<String>,
    #[serde(default)]
    pub is_trial: bool,
    #[serde(default)]
    pub oidc_provider: Option<String>,
}

/// Grouping of organizations sharing the same license.
///
/// This is an internal API and may change without notice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationGroup {
    pub id: i64,
    pub name: String,
    pub is_trial: bool,
    pub is_production: bool,
    pub deployment_location: String,
    #[serde(default)]
    pub modified_by: Option<String>,
    #[serde(default)]
    pub modified_at: Option<String>,
    #[serde(default)]
    pub features: Option<JsonObject>,
    #[serde(default)]
    pub usage: JsonObject,
}

/// Email sending limits of an organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailLimits {
    pub count_today: i64,
    pub count_today_notification: i64,
    pub count_total: i64,
    pub email_per_day_limit: i64,
    pub email_per_day_limit_notification: i64,
    #[serde(default)]
    pub email_total_limit: Option<i64>,
    #[serde(default)]
    pub last_sent_at: Option<String>,
    #[serde(default)]
    pub last_sent_at_notification: Option<String>,
}

/// Limits applying to an organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationLimit {
    pub email_limits: EmailLimits,
}
