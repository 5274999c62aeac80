//! Typed API objects
//!
//! Every resource kind has a `serde` model. Optional and absent fields
//! default to `None` or empty collections so that partial payloads (and
//! payloads from newer API versions) still deserialize.
//!
//! [`deserialize_default`] maps a resource kind and raw JSON to the
//! matching model, wrapped in [`ApiObject`].

mod annotation;
mod document;
mod email;
mod engine;
mod hook;
mod organization;
mod queue;
mod rule;
mod schema;
mod task;
mod user;

pub use annotation::Annotation;
pub use document::{Document, DocumentRelation, Relation, RelationType};
pub use email::{Email, EmailAddress, EmailTemplate, EmailTemplateType};
pub use engine::{Engine, EngineField};
pub use hook::{Hook, HookRunData, HookTemplate, HookType};
pub use organization::{EmailLimits, Organization, OrganizationGroup, OrganizationLimit};
pub use queue::{Connector, Inbox, Queue, Workspace};
pub use rule::{
    AddAutomationBlockerPayload, AddValidationSourcePayload, ChangeQueuePayload,
    ChangeStatusMethod, ChangeStatusPayload, LabelsPayload, Rule, RuleAction, RuleActionEvent,
    RuleActionPayload, RuleActionType, SchemaIdsPayload, SendEmailPayload, ShowMessagePayload,
    ShowMessageType,
};
pub use schema::{
    Datapoint, DatapointType, Multivalue, MultivalueChild, NodeRef, ParentRef, Schema, Section,
    SectionChild, Tuple,
};
pub use task::{Task, TaskStatus, Upload};
pub use user::{Group, User};

use crate::error::{Error, Result};
use crate::resources::Resource;
use crate::types::{JsonObject, JsonValue};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A reference to a related object: its URL, or the object itself when it
/// was sideloaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Link<T> {
    Url(String),
    Expanded(Box<T>),
}

impl<T> Link<T> {
    /// URL of the referenced object, if not expanded
    pub fn url(&self) -> Option<&str> {
        match self {
            Link::Url(url) => Some(url),
            Link::Expanded(_) => None,
        }
    }

    /// The sideloaded object, if expanded
    pub fn expanded(&self) -> Option<&T> {
        match self {
            Link::Url(_) => None,
            Link::Expanded(obj) => Some(obj),
        }
    }
}

/// Any typed API object
#[derive(Debug, Clone, PartialEq)]
pub enum ApiObject {
    Annotation(Box<Annotation>),
    Connector(Connector),
    Document(Document),
    DocumentRelation(DocumentRelation),
    Email(Box<Email>),
    EmailTemplate(EmailTemplate),
    Engine(Engine),
    EngineField(EngineField),
    Group(Group),
    Hook(Box<Hook>),
    HookRunData(Box<HookRunData>),
    HookTemplate(Box<HookTemplate>),
    Inbox(Inbox),
    Organization(Organization),
    OrganizationGroup(OrganizationGroup),
    Queue(Box<Queue>),
    Relation(Relation),
    Rule(Rule),
    Schema(Schema),
    Task(Task),
    Upload(Upload),
    User(User),
    Workspace(Workspace),
    /// Resources without a dedicated model
    Raw(JsonObject),
}

/// Deserialize a JSON object as `T`, naming `resource` in the error
pub fn from_json<T: DeserializeOwned>(resource: Resource, value: JsonValue) -> Result<T> {
    serde_json::from_value(value).map_err(|e| Error::deserialize(resource.to_string(), e.to_string()))
}

/// Deserialize `value` into the default model of `resource`
pub fn deserialize_default(resource: Resource, value: JsonValue) -> Result<ApiObject> {
    let obj = match resource {
        Resource::Annotation => ApiObject::Annotation(Box::new(from_json(resource, value)?)),
        Resource::Connector => ApiObject::Connector(from_json(resource, value)?),
        Resource::Document => ApiObject::Document(from_json(resource, value)?),
        Resource::DocumentRelation => ApiObject::DocumentRelation(from_json(resource, value)?),
        Resource::Email => ApiObject::Email(Box::new(from_json(resource, value)?)),
        Resource::EmailTemplate => ApiObject::EmailTemplate(from_json(resource, value)?),
        Resource::Engine => ApiObject::Engine(from_json(resource, value)?),
        Resource::EngineField => ApiObject::EngineField(from_json(resource, value)?),
        Resource::Group => ApiObject::Group(from_json(resource, value)?),
        Resource::Hook => ApiObject::Hook(Box::new(from_json(resource, value)?)),
        Resource::HookRunData => ApiObject::HookRunData(Box::new(from_json(resource, value)?)),
        Resource::HookTemplate => ApiObject::HookTemplate(Box::new(from_json(resource, value)?)),
        Resource::Inbox => ApiObject::Inbox(from_json(resource, value)?),
        Resource::Organization => ApiObject::Organization(from_json(resource, value)?),
        Resource::OrganizationGroup => ApiObject::OrganizationGroup(from_json(resource, value)?),
        Resource::Queue => ApiObject::Queue(Box::new(from_json(resource, value)?)),
        Resource::Relation => ApiObject::Relation(from_json(resource, value)?),
        Resource::Rule => ApiObject::Rule(from_json(resource, value)?),
        Resource::Schema => ApiObject::Schema(from_json(resource, value)?),
        Resource::Task => ApiObject::Task(from_json(resource, value)?),
        Resource::Upload => ApiObject::Upload(from_json(resource, value)?),
        Resource::User => ApiObject::User(from_json(resource, value)?),
        Resource::Workspace => ApiObject::Workspace(from_json(resource, value)?),
        Resource::Auth => ApiObject::Raw(from_json(resource, value)?),
    };
    Ok(obj)
}

impl ApiObject {
    /// JSON representation of the object
    pub fn to_json(&self) -> Result<JsonValue> {
        let value = match self {
            ApiObject::Annotation(o) => serde_json::to_value(o)?,
            ApiObject::Connector(o) => serde_json::to_value(o)?,
            ApiObject::Document(o) => serde_json::to_value(o)?,
            ApiObject::DocumentRelation(o) => serde_json::to_value(o)?,
            ApiObject::Email(o) => serde_json::to_value(o)?,
            ApiObject::EmailTemplate(o) => serde_json::to_value(o)?,
            ApiObject::Engine(o) => serde_json::to_value(o)?,
            ApiObject::EngineField(o) => serde_json::to_value(o)?,
            ApiObject::Group(o) => serde_json::to_value(o)?,
            ApiObject::Hook(o) => serde_json::to_value(o)?,
            ApiObject::HookRunData(o) => serde_json::to_value(o)?,
            ApiObject::HookTemplate(o) => serde_json::to_value(o)?,
            ApiObject::Inbox(o) => serde_json::to_value(o)?,
            ApiObject::Organization(o) => serde_json::to_value(o)?,
            ApiObject::OrganizationGroup(o) => serde_json::to_value(o)?,
            ApiObject::Queue(o) => serde_json::to_value(o)?,
            ApiObject::Relation(o) => serde_json::to_value(o)?,
            ApiObject::Rule(o) => serde_json::to_value(o)?,
            ApiObject::Schema(o) => serde_json::to_value(o)?,
            ApiObject::Task(o) => serde_json::to_value(o)?,
            ApiObject::Upload(o) => serde_json::to_value(o)?,
            ApiObject::User(o) => serde_json::to_value(o)?,
            ApiObject::Workspace(o) => serde_json::to_value(o)?,
            ApiObject::Raw(o) => JsonValue::Object(o.clone()),
        };
        Ok(value)
    }
}

fn default_true() -> bool {
    true
}
