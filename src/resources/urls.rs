//! URL builders for resource and action endpoints
//!
//! All builders return paths relative to the API base URL
//! (e.g. `annotations/7/confirm`); the HTTP client joins them with the base.

use super::Resource;
use crate::error::{Error, Result};
use std::fmt::Display;

/// Email import endpoint
pub const EMAIL_IMPORT_URL: &str = "email_imports";

/// Login endpoint exchanging credentials for a token
pub const LOGIN_URL: &str = "auth/login";

/// Currently authenticated user
pub const AUTH_USER_URL: &str = "auth/user";

/// Password change endpoint
pub const PASSWORD_CHANGE_URL: &str = "auth/password/change";

/// Password reset endpoint
pub const PASSWORD_RESET_URL: &str = "auth/password/reset";

/// URL of a single resource object
pub fn resource_url(resource: Resource, id: impl Display) -> String {
    format!("{}/{id}", resource.path())
}

/// Search endpoint of a resource collection
pub fn search_url(resource: Resource) -> String {
    format!("{}/search", resource.path())
}

/// `POST <resource>/<id>/start`
pub fn start_url(resource: Resource, id: i64) -> String {
    action_url(resource, id, "start")
}

/// `POST <resource>/<id>/confirm`
pub fn confirm_url(resource: Resource, id: i64) -> String {
    action_url(resource, id, "confirm")
}

/// `POST <resource>/<id>/cancel`
pub fn cancel_url(resource: Resource, id: i64) -> String {
    action_url(resource, id, "cancel")
}

/// `POST <resource>/<id>/delete` (soft delete, the object moves to `deleted`)
pub fn delete_url(resource: Resource, id: i64) -> String {
    action_url(resource, id, "delete")
}

/// `<resource>/<id>/content`
pub fn content_url(resource: Resource, id: i64) -> String {
    action_url(resource, id, "content")
}

/// `<resource>/<id>/content/operations`
pub fn content_operations_url(resource: Resource, id: i64) -> String {
    format!("{}/content/operations", resource_url(resource, id))
}

/// `organizations/<id>/limits`
pub fn organization_limits_url(organization_id: i64) -> String {
    action_url(Resource::Organization, organization_id, "limits")
}

/// Upload endpoint creating an asynchronous upload task for a queue
pub fn upload_url(queue_id: i64) -> String {
    format!("{}?queue={queue_id}", Resource::Upload.path())
}

/// Legacy direct-upload endpoint of a queue
pub fn queue_upload_url(queue_id: i64) -> String {
    action_url(Resource::Queue, queue_id, "upload")
}

/// Export endpoint of a queue
pub fn export_url(queue_id: i64) -> String {
    action_url(Resource::Queue, queue_id, "export")
}

fn action_url(resource: Resource, id: i64, action: &str) -> String {
    format!("{}/{action}", resource_url(resource, id))
}

/// Extract the numeric ID from a resource URL
/// (`https://elis.rossum.ai/api/v1/annotations/314` -> `314`)
pub fn parse_resource_id_from_url(url: &str) -> Result<i64> {
    let without_query = url.split(['?', '#']).next().unwrap_or(url);
    let segment = without_query
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default();

    segment
        .parse::<i64>()
        .map_err(|e| Error::InvalidResourceUrl {
            url: url.to_string(),
            message: e.to_string(),
        })
}

/// Singular key under which a sideloaded object is referenced from its parent
pub fn to_singular(sideload: &str) -> String {
    match sideload {
        "content" => "content".to_string(),
        "modifiers" => "modifier".to_string(),
        s if s.ends_with("ies") => format!("{}y", &s[..s.len() - 3]),
        s if s.ends_with("ses") || s.ends_with("xes") => s[..s.len() - 2].to_string(),
        s => s.strip_suffix('s').unwrap_or(s).to_string(),
    }
}
