//! Business rules attached to schemas
//!
//! A rule pairs a TxScript trigger condition with actions. The shape of an
//! action's `payload` depends on its `type`, so actions are deserialized in
//! two steps: first the envelope, then the payload for that type.

use super::default_true;
use crate::types::{JsonObject, JsonValue};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Kind of rule action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleActionType {
    ShowMessage,
    AddAutomationBlocker,
    ChangeStatus,
    ChangeQueue,
    AddLabel,
    RemoveLabel,
    AddRemoveLabel,
    ShowField,
    HideField,
    ShowHideField,
    AddValidationSource,
    SendEmail,
    Custom,
}

/// Event on which an action runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleActionEvent {
    Validation,
    AnnotationImported,
    AnnotationConfirmed,
    AnnotationExported,
}

/// Severity of a `show_message` action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShowMessageType {
    Error,
    Warning,
    Info,
}

/// Status change performed by a `change_status` action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeStatusMethod {
    Postpone,
    Export,
    Delete,
    Confirm,
    Reject,
}

/// Payload of `show_message`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowMessagePayload {
    #[serde(rename = "type")]
    pub message_type: ShowMessageType,
    pub content: String,
    /// Target field; document scope when absent
    #[serde(default)]
    pub schema_id: Option<String>,
}

/// Payload of `add_automation_blocker`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddAutomationBlockerPayload {
    pub content: String,
    #[serde(default)]
    pub schema_id: Option<String>,
}

/// Payload of `change_status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeStatusPayload {
    pub method: ChangeStatusMethod,
}

/// Payload of `change_queue`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeQueuePayload {
    pub queue_id: i64,
    #[serde(default)]
    pub reimport: Option<bool>,
}

/// Payload of `add_label`, `remove_label` and `add_remove_label`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelsPayload {
    /// Label URLs
    #[serde(default)]
    pub labels: Vec<String>,
}

/// Payload of `show_field`, `hide_field` and `show_hide_field`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaIdsPayload {
    #[serde(default)]
    pub schema_ids: Vec<String>,
}

/// Payload of `add_validation_source`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddValidationSourcePayload {
    pub schema_id: String,
}

/// Payload of `send_email`.
///
/// With an `email_template` set, the recipients, subject and body are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendEmailPayload {
    #[serde(default)]
    pub email_template: Option<String>,
    #[serde(default)]
    pub attach_document: bool,
    #[serde(default)]
    pub to: Vec<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub cc: Vec<String>,
    #[serde(default)]
    pub bcc: Vec<String>,
}

/// Typed action payload
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RuleActionPayload {
    ShowMessage(ShowMessagePayload),
    AddAutomationBlocker(AddAutomationBlockerPayload),
    ChangeStatus(ChangeStatusPayload),
    ChangeQueue(ChangeQueuePayload),
    Labels(LabelsPayload),
    SchemaIds(SchemaIdsPayload),
    AddValidationSource(AddValidationSourcePayload),
    SendEmail(SendEmailPayload),
    /// Payload of a `custom` action, kept as is
    Custom(JsonObject),
}

impl RuleActionPayload {
    /// Deserialize `value` as the payload of an action of `action_type`
    pub fn from_json(action_type: RuleActionType, value: JsonValue) -> serde_json::Result<Self> {
        use RuleActionType as T;

        let payload = match action_type {
            T::ShowMessage => Self::ShowMessage(serde_json::from_value(value)?),
            T::AddAutomationBlocker => Self::AddAutomationBlocker(serde_json::from_value(value)?),
            T::ChangeStatus => Self::ChangeStatus(serde_json::from_value(value)?),
            T::ChangeQueue => Self::ChangeQueue(serde_json::from_value(value)?),
            T::AddLabel | T::RemoveLabel | T::AddRemoveLabel => {
                Self::Labels(serde_json::from_value(value)?)
            }
            T::ShowField | T::HideField | T::ShowHideField => {
                Self::SchemaIds(serde_json::from_value(value)?)
            }
            T::AddValidationSource => Self::AddValidationSource(serde_json::from_value(value)?),
            T::SendEmail => Self::SendEmail(serde_json::from_value(value)?),
            T::Custom => Self::Custom(serde_json::from_value(value)?),
        };
        Ok(payload)
    }
}

/// Action executed when the rule's trigger condition holds
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleAction {
    /// Unique within the rule
    pub id: String,
    #[serde(rename = "type")]
    pub action_type: RuleActionType,
    pub payload: RuleActionPayload,
    pub event: RuleActionEvent,
    pub enabled: bool,
}

impl<'de> Deserialize<'de> for RuleAction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Envelope {
            id: String,
            #[serde(rename = "type")]
            action_type: RuleActionType,
            #[serde(default)]
            payload: Option<JsonValue>,
            event: RuleActionEvent,
            #[serde(default = "default_true")]
            enabled: bool,
        }

        let envelope = Envelope::deserialize(deserializer)?;
        let raw_payload = envelope
            .payload
            .unwrap_or_else(|| JsonValue::Object(JsonObject::new()));
        let payload = RuleActionPayload::from_json(envelope.action_type, raw_payload).map_err(
            |e| D::Error::custom(format!("invalid payload of rule action {}: {e}", envelope.id)),
        )?;

        Ok(Self {
            id: envelope.id,
            action_type: envelope.action_type,
            payload,
            event: envelope.event,
            enabled: envelope.enabled,
        })
    }
}

fn default_trigger_condition() -> String {
    "True".to_string()
}

/// Business rule evaluated on annotations of a schema.
///
/// The trigger condition must evaluate strictly to `"True"` for the actions
/// to run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: i64,
    pub name: String,
    pub enabled: bool,
    pub organization: String,
    #[serde(default)]
    pub schema: Option<String>,
    #[serde(default = "default_trigger_condition")]
    pub trigger_condition: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub modified_by: Option<String>,
    #[serde(default)]
    pub modified_at: Option<String>,
    #[serde(default)]
    pub rule_template: Option<String>,
    #[serde(default)]
    pub synchronized_from_template: bool,
    #[serde(default)]
    pub actions: Vec<RuleAction>,
}

#[cfg(test)]
mod rule_tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use test_case::test_case;

    fn action(action_type: &str, payload: JsonValue) -> JsonValue {
        json!({
            "id": "f3c43f16-b5f1-4ac8-b789-17d4c26463d7",
            "type": action_type,
            "payload": payload,
            "event": "validation"
        })
    }

    #[test_case("show_message", json!({"type": "error", "content": "Error message!", "schema_id": "invoice_id"}) ; "show message")]
    #[test_case("add_automation_blocker", json!({"content": "blocked"}) ; "automation blocker")]
    #[test_case("change_status", json!({"method": "postpone"}) ; "change status")]
    #[test_case("change_queue", json!({"queue_id": 12, "reimport": true}) ; "change queue")]
    #[test_case("add_label", json!({"labels": ["https://x/api/v1/labels/1"]}) ; "add label")]
    #[test_case("remove_label", json!({"labels": []}) ; "remove label")]
    #[test_case("add_remove_label", json!({}) ; "add remove label defaults")]
    #[test_case("show_field", json!({"schema_ids": ["a"]}) ; "show field")]
    #[test_case("hide_field", json!({"schema_ids": ["a", "b"]}) ; "hide field")]
    #[test_case("show_hide_field", json!({}) ; "show hide field defaults")]
    #[test_case("add_validation_source", json!({"schema_id": "amount"}) ; "validation source")]
    #[test_case("send_email", json!({"email_template": "https://x/api/v1/email_templates/1"}) ; "send email")]
    #[test_case("custom", json!({"anything": [1, 2]}) ; "custom")]
    fn test_payload_deserializes(action_type: &str, payload: JsonValue) {
        let parsed: RuleAction = serde_json::from_value(action(action_type, payload.clone())).unwrap();

        assert_eq!(serde_json::to_value(&parsed.action_type).unwrap(), json!(action_type));
        assert!(parsed.enabled);
        // Serialized payload keeps every key that was sent
        let reserialized = serde_json::to_value(&parsed.payload).unwrap();
        for (key, value) in payload.as_object().unwrap() {
            assert_eq!(&reserialized[key], value);
        }
    }

    #[test_case("show_message", json!({"content": "missing type"}) ; "show message without type")]
    #[test_case("show_message", json!({"type": "fatal", "content": "x"}) ; "show message bad type")]
    #[test_case("change_status", json!({"method": "archive"}) ; "unknown status method")]
    #[test_case("change_queue", json!({"reimport": true}) ; "change queue without queue id")]
    #[test_case("add_validation_source", json!({}) ; "validation source without schema id")]
    #[test_case("custom", json!([1, 2]) ; "custom payload not an object")]
    fn test_invalid_payload(action_type: &str, payload: JsonValue) {
        let result: Result<RuleAction, _> = serde_json::from_value(action(action_type, payload));
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_action_type() {
        let result: Result<RuleAction, _> =
            serde_json::from_value(action("launch_rocket", json!({})));
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_payload_for_labels_defaults() {
        let parsed: RuleAction = serde_json::from_value(json!({
            "id": "a",
            "type": "add_label",
            "event": "annotation_imported",
            "enabled": false
        }))
        .unwrap();

        assert_eq!(parsed.payload, RuleActionPayload::Labels(LabelsPayload::default()));
        assert_eq!(parsed.event, RuleActionEvent::AnnotationImported);
        assert!(!parsed.enabled);
    }

    #[test]
    fn test_show_message_payload_typed() {
        let parsed: RuleAction = serde_json::from_value(action(
            "show_message",
            json!({"type": "warning", "content": "Check the total"}),
        ))
        .unwrap();

        assert_eq!(
            parsed.payload,
            RuleActionPayload::ShowMessage(ShowMessagePayload {
                message_type: ShowMessageType::Warning,
                content: "Check the total".to_string(),
                schema_id: None,
            })
        );
    }

    #[test]
    fn test_rule_defaults() {
        let rule: Rule = serde_json::from_value(json!({
            "id": 123,
            "name": "rule",
            "enabled": true,
            "organization": "https://elis.rossum.ai/api/v1/organizations/1001"
        }))
        .unwrap();

        assert_eq!(rule.trigger_condition, "True");
        assert!(rule.schema.is_none());
        assert!(!rule.synchronized_from_template);
        assert!(rule.actions.is_empty());
    }
}
