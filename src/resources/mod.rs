//! Resource module
//!
//! Maps API entity kinds to their REST endpoints and builds the URLs of
//! the action endpoints hanging off them.

mod urls;

pub use urls::{
    cancel_url, confirm_url, content_operations_url, content_url, delete_url, export_url,
    organization_limits_url, parse_resource_id_from_url, queue_upload_url, resource_url,
    search_url, start_url, to_singular, upload_url, AUTH_USER_URL, EMAIL_IMPORT_URL,
    LOGIN_URL, PASSWORD_CHANGE_URL, PASSWORD_RESET_URL,
};

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named API entity type with its own REST endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Annotation,
    Auth,
    Connector,
    Document,
    DocumentRelation,
    Email,
    EmailTemplate,
    Engine,
    EngineField,
    Group,
    Hook,
    HookRunData,
    HookTemplate,
    Inbox,
    Organization,
    OrganizationGroup,
    Queue,
    Relation,
    Rule,
    Schema,
    Task,
    Upload,
    User,
    Workspace,
}

impl Resource {
    /// All resource kinds
    pub const ALL: [Resource; 24] = [
        Resource::Annotation,
        Resource::Auth,
        Resource::Connector,
        Resource::Document,
        Resource::DocumentRelation,
        Resource::Email,
        Resource::EmailTemplate,
        Resource::Engine,
        Resource::EngineField,
        Resource::Group,
        Resource::Hook,
        Resource::HookRunData,
        Resource::HookTemplate,
        Resource::Inbox,
        Resource::Organization,
        Resource::OrganizationGroup,
        Resource::Queue,
        Resource::Relation,
        Resource::Rule,
        Resource::Schema,
        Resource::Task,
        Resource::Upload,
        Resource::User,
        Resource::Workspace,
    ];

    /// Endpoint path relative to the API base URL
    pub fn path(self) -> &'static str {
        match self {
            Resource::Annotation => "annotations",
            Resource::Auth => "auth",
            Resource::Connector => "connectors",
            Resource::Document => "documents",
            Resource::DocumentRelation => "document_relations",
            Resource::Email => "emails",
            Resource::EmailTemplate => "email_templates",
            Resource::Engine => "engines",
            Resource::EngineField => "engine_fields",
            Resource::Group => "groups",
            Resource::Hook => "hooks",
            Resource::HookRunData => "hooks/logs",
            Resource::HookTemplate => "hook_templates",
            Resource::Inbox => "inboxes",
            Resource::Organization => "organizations",
            Resource::OrganizationGroup => "organization_groups",
            Resource::Queue => "queues",
            Resource::Relation => "relations",
            Resource::Rule => "rules",
            Resource::Schema => "schemas",
            Resource::Task => "tasks",
            Resource::Upload => "uploads",
            Resource::User => "users",
            Resource::Workspace => "workspaces",
        }
    }

    /// Look a resource up by its endpoint path (`"queues"`) or its
    /// snake_case name (`"queue"`)
    pub fn from_name(name: &str) -> Option<Resource> {
        let name = name.trim().trim_matches('/');
        Resource::ALL.into_iter().find(|r| {
            r.path() == name
                || serde_json::to_value(r)
                    .ok()
                    .and_then(|v| v.as_str().map(|s| s == name))
                    .unwrap_or(false)
        })
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
