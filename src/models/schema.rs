//! Schema tree
//!
//! A schema is a list of sections. Sections hold datapoints, multivalues
//! and tuples; a multivalue holds exactly one datapoint or tuple; a tuple
//! holds datapoints. Nodes are told apart by their `category` field.
//! Children with a category this crate does not know are preserved as raw
//! JSON and skipped by traversal.

use super::default_true;
use crate::types::{JsonObject, JsonValue};
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};

/// Value type of a datapoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatapointType {
    String,
    Number,
    Date,
    Enum,
    Button,
    Formula,
    Reasoning,
}

fn category(name: &str) -> String {
    name.to_string()
}

fn datapoint_category() -> String {
    category("datapoint")
}

fn multivalue_category() -> String {
    category("multivalue")
}

fn tuple_category() -> String {
    category("tuple")
}

fn section_category() -> String {
    category("section")
}

// ============================================================================
// Nodes
// ============================================================================

/// A single value, e.g. one field of a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Datapoint {
    pub id: String,
    #[serde(default, rename = "type")]
    pub datapoint_type: Option<DatapointType>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "datapoint_category")]
    pub category: String,
    #[serde(default)]
    pub disable_prediction: bool,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default = "default_true")]
    pub can_export: bool,
    #[serde(default)]
    pub can_collapse: bool,
    /// Engine fields used to initialize the value
    #[serde(default)]
    pub rir_field_names: Option<Vec<String>>,
    #[serde(default)]
    pub default_value: Option<String>,
    #[serde(default)]
    pub constraints: JsonObject,
    /// Confidence (0-1) above which the value is validated automatically
    #[serde(default)]
    pub score_threshold: Option<f64>,
    /// Choices of `enum` datapoints
    #[serde(default)]
    pub options: Option<Vec<JsonObject>>,
    #[serde(default)]
    pub ui_configuration: Option<JsonObject>,
    #[serde(default)]
    pub width: Option<i64>,
    #[serde(default)]
    pub stretch: bool,
    /// Deprecated, see `width` and `stretch`
    #[serde(default)]
    pub width_chars: Option<i64>,
    /// Required for `formula` datapoints
    #[serde(default)]
    pub formula: Option<String>,
    /// Required for `reasoning` datapoints
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub context: Option<Vec<String>>,
}

impl Datapoint {
    /// Create a datapoint with default settings
    pub fn new(id: impl Into<String>, datapoint_type: Option<DatapointType>) -> Self {
        Self {
            id: id.into(),
            datapoint_type,
            label: None,
            description: None,
            category: datapoint_category(),
            disable_prediction: false,
            hidden: false,
            can_export: true,
            can_collapse: false,
            rir_field_names: None,
            default_value: None,
            constraints: JsonObject::new(),
            score_threshold: None,
            options: None,
            ui_configuration: None,
            width: None,
            stretch: false,
            width_chars: None,
            formula: None,
            prompt: None,
            context: None,
        }
    }

    pub fn is_button(&self) -> bool {
        self.datapoint_type == Some(DatapointType::Button)
    }

    pub fn is_formula(&self) -> bool {
        self.datapoint_type == Some(DatapointType::Formula)
    }

    pub fn is_reasoning(&self) -> bool {
        self.datapoint_type == Some(DatapointType::Reasoning)
    }

    /// This datapoint, unless it is a button and buttons are ignored
    pub fn traverse(&self, ignore_buttons: bool) -> impl Iterator<Item = NodeRef<'_>> {
        let mut nodes = Vec::new();
        self.collect(ignore_buttons, &mut nodes);
        nodes.into_iter()
    }

    fn collect<'a>(&'a self, ignore_buttons: bool, out: &mut Vec<NodeRef<'a>>) {
        if ignore_buttons && self.is_button() {
            return;
        }
        out.push(NodeRef::Datapoint(self));
    }
}

/// Datapoints with different ids forming one table row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuple {
    pub id: String,
    pub children: Vec<Datapoint>,
    #[serde(default = "tuple_category")]
    pub category: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub disable_prediction: bool,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub rir_field_names: Option<Vec<String>>,
}

impl Tuple {
    /// The tuple followed by its datapoints
    pub fn traverse(&self, ignore_buttons: bool) -> impl Iterator<Item = NodeRef<'_>> {
        let mut nodes = Vec::new();
        self.collect(ignore_buttons, &mut nodes);
        nodes.into_iter()
    }

    fn collect<'a>(&'a self, ignore_buttons: bool, out: &mut Vec<NodeRef<'a>>) {
        out.push(NodeRef::Tuple(self));
        for child in &self.children {
            child.collect(ignore_buttons, out);
        }
    }

    fn parent_of(&self, node_id: &str) -> Option<ParentRef<'_>> {
        self.children
            .iter()
            .any(|child| child.id == node_id)
            .then_some(ParentRef::Tuple(self))
    }
}

/// Child of a multivalue
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MultivalueChild {
    Datapoint(Datapoint),
    Tuple(Tuple),
    Unknown(JsonValue),
}

/// Repeated datapoint or tuple (e.g. line items)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Multivalue {
    pub id: String,
    pub children: MultivalueChild,
    #[serde(default = "multivalue_category")]
    pub category: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub rir_field_names: Option<Vec<String>>,
    #[serde(default)]
    pub min_occurrences: Option<i64>,
    #[serde(default)]
    pub max_occurrences: Option<i64>,
    #[serde(default)]
    pub grid: Option<JsonObject>,
    #[serde(default)]
    pub show_grid_by_default: bool,
    #[serde(default)]
    pub hidden: bool,
}

impl Multivalue {
    /// The multivalue followed by its child's subtree
    pub fn traverse(&self, ignore_buttons: bool) -> impl Iterator<Item = NodeRef<'_>> {
        let mut nodes = Vec::new();
        self.collect(ignore_buttons, &mut nodes);
        nodes.into_iter()
    }

    fn collect<'a>(&'a self, ignore_buttons: bool, out: &mut Vec<NodeRef<'a>>) {
        out.push(NodeRef::Multivalue(self));
        match &self.children {
            MultivalueChild::Datapoint(dp) => dp.collect(ignore_buttons, out),
            MultivalueChild::Tuple(tuple) => tuple.collect(ignore_buttons, out),
            MultivalueChild::Unknown(_) => {}
        }
    }

    fn parent_of(&self, node_id: &str) -> Option<ParentRef<'_>> {
        match &self.children {
            MultivalueChild::Datapoint(dp) if dp.id == node_id => Some(ParentRef::Multivalue(self)),
            MultivalueChild::Tuple(tuple) if tuple.id == node_id => {
                Some(ParentRef::Multivalue(self))
            }
            MultivalueChild::Tuple(tuple) => tuple.parent_of(node_id),
            _ => None,
        }
    }
}

/// Child of a section
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SectionChild {
    Datapoint(Datapoint),
    Multivalue(Multivalue),
    Tuple(Tuple),
    Unknown(JsonValue),
}

/// Top-level group of fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    #[serde(default)]
    pub children: Vec<SectionChild>,
    #[serde(default = "section_category")]
    pub category: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

impl Section {
    /// Every node below the section (the section itself is not included)
    pub fn traverse(&self, ignore_buttons: bool) -> impl Iterator<Item = NodeRef<'_>> {
        let mut nodes = Vec::new();
        self.collect(ignore_buttons, &mut nodes);
        nodes.into_iter()
    }

    fn collect<'a>(&'a self, ignore_buttons: bool, out: &mut Vec<NodeRef<'a>>) {
        for child in &self.children {
            match child {
                SectionChild::Datapoint(dp) => dp.collect(ignore_buttons, out),
                SectionChild::Multivalue(mv) => mv.collect(ignore_buttons, out),
                SectionChild::Tuple(tuple) => tuple.collect(ignore_buttons, out),
                SectionChild::Unknown(_) => {}
            }
        }
    }

    fn parent_of(&self, node_id: &str) -> Option<ParentRef<'_>> {
        for child in &self.children {
            let nested = match child {
                SectionChild::Datapoint(dp) if dp.id == node_id => {
                    return Some(ParentRef::Section(self))
                }
                SectionChild::Multivalue(mv) if mv.id == node_id => {
                    return Some(ParentRef::Section(self))
                }
                SectionChild::Tuple(tuple) if tuple.id == node_id => {
                    return Some(ParentRef::Section(self))
                }
                SectionChild::Multivalue(mv) => mv.parent_of(node_id),
                SectionChild::Tuple(tuple) => tuple.parent_of(node_id),
                _ => None,
            };
            if nested.is_some() {
                return nested;
            }
        }
        None
    }
}

// ============================================================================
// Category dispatch
// ============================================================================

fn from_category<'de, D, T>(value: JsonValue) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    serde_json::from_value(value).map_err(D::Error::custom)
}

impl<'de> Deserialize<'de> for MultivalueChild {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = JsonValue::deserialize(deserializer)?;
        let category = value.get("category").and_then(JsonValue::as_str);
        match category {
            Some("datapoint") => Ok(Self::Datapoint(from_category::<D, _>(value)?)),
            Some("tuple") => Ok(Self::Tuple(from_category::<D, _>(value)?)),
            _ => Ok(Self::Unknown(value)),
        }
    }
}

impl<'de> Deserialize<'de> for SectionChild {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = JsonValue::deserialize(deserializer)?;
        let category = value.get("category").and_then(JsonValue::as_str);
        match category {
            Some("datapoint") => Ok(Self::Datapoint(from_category::<D, _>(value)?)),
            Some("multivalue") => Ok(Self::Multivalue(from_category::<D, _>(value)?)),
            Some("tuple") => Ok(Self::Tuple(from_category::<D, _>(value)?)),
            _ => Ok(Self::Unknown(value)),
        }
    }
}

// ============================================================================
// Node references
// ============================================================================

/// A node yielded by traversal
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeRef<'a> {
    Datapoint(&'a Datapoint),
    Multivalue(&'a Multivalue),
    Tuple(&'a Tuple),
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> &'a str {
        match self {
            NodeRef::Datapoint(dp) => &dp.id,
            NodeRef::Multivalue(mv) => &mv.id,
            NodeRef::Tuple(tuple) => &tuple.id,
        }
    }

    pub fn as_datapoint(&self) -> Option<&'a Datapoint> {
        match self {
            NodeRef::Datapoint(dp) => Some(dp),
            _ => None,
        }
    }

    pub fn as_multivalue(&self) -> Option<&'a Multivalue> {
        match self {
            NodeRef::Multivalue(mv) => Some(mv),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&'a Tuple> {
        match self {
            NodeRef::Tuple(tuple) => Some(tuple),
            _ => None,
        }
    }
}

/// The container enclosing a node
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParentRef<'a> {
    Section(&'a Section),
    Multivalue(&'a Multivalue),
    Tuple(&'a Tuple),
}

impl<'a> ParentRef<'a> {
    pub fn id(&self) -> &'a str {
        match self {
            ParentRef::Section(section) => &section.id,
            ParentRef::Multivalue(mv) => &mv.id,
            ParentRef::Tuple(tuple) => &tuple.id,
        }
    }
}

// ============================================================================
// Schema
// ============================================================================

/// The set of fields extracted from documents of a queue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub queues: Vec<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub content: Vec<Section>,
    #[serde(default)]
    pub metadata: JsonObject,
    #[serde(default)]
    pub modified_by: Option<String>,
    #[serde(default)]
    pub modified_at: Option<String>,
}

impl Schema {
    /// Depth-first pre-order walk over multivalues, tuples and datapoints
    /// of all sections
    pub fn traverse(&self, ignore_buttons: bool) -> impl Iterator<Item = NodeRef<'_>> {
        let mut nodes = Vec::new();
        for section in &self.content {
            section.collect(ignore_buttons, &mut nodes);
        }
        nodes.into_iter()
    }

    /// Find a node by id
    pub fn get_by_id(&self, node_id: &str, ignore_buttons: bool) -> Option<NodeRef<'_>> {
        self.traverse(ignore_buttons).find(|node| node.id() == node_id)
    }

    /// Find a section by id
    pub fn section(&self, section_id: &str) -> Option<&Section> {
        self.content.iter().find(|section| section.id == section_id)
    }

    /// The section, multivalue or tuple directly containing `node_id`
    pub fn parent_of(&self, node_id: &str) -> Option<ParentRef<'_>> {
        self.content
            .iter()
            .find_map(|section| section.parent_of(node_id))
    }

    /// Datapoints of type `formula`
    pub fn formula_fields(&self, ignore_buttons: bool) -> impl Iterator<Item = &Datapoint> {
        self.traverse(ignore_buttons)
            .filter_map(|node| node.as_datapoint())
            .filter(|dp| dp.is_formula())
    }

    /// Datapoints of type `reasoning`
    pub fn reasoning_fields(&self, ignore_buttons: bool) -> impl Iterator<Item = &Datapoint> {
        self.traverse(ignore_buttons)
            .filter_map(|node| node.as_datapoint())
            .filter(|dp| dp.is_reasoning())
    }
}

#[cfg(test)]
mod schema_tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::collections::HashSet;

    fn invoice_schema() -> Schema {
        serde_json::from_value(json!({
            "id": 123456,
            "name": "Test Invoice Schema",
            "queues": ["https://us.api.rossum.ai/v1/queues/12345"],
            "url": "https://us.api.rossum.ai/v1/schemas/123456",
            "content": [
                {
                    "category": "section",
                    "id": "invoice_section",
                    "label": "Invoice Details",
                    "children": [
                        {
                            "category": "datapoint",
                            "id": "invoice_number",
                            "type": "string",
                            "label": "Invoice Number",
                            "rir_field_names": ["document_id"],
                            "constraints": {"required": true}
                        },
                        {
                            "category": "datapoint",
                            "id": "total_amount",
                            "type": "number",
                            "label": "Total Amount",
                            "rir_field_names": ["amount_total"],
                            "constraints": {"required": true}
                        }
                    ]
                },
                {
                    "category": "section",
                    "id": "line_items_section",
                    "label": "Line Items",
                    "children": [
                        {
                            "category": "multivalue",
                            "id": "line_items",
                            "rir_field_names": ["line_items"],
                            "min_occurrences": 0,
                            "max_occurrences": 1000,
                            "children": {
                                "category": "tuple",
                                "id": "line_item",
                                "label": "Line Item",
                                "children": [
                                    {
                                        "category": "datapoint",
                                        "id": "item_description",
                                        "type": "string",
                                        "label": "Description"
                                    },
                                    {
                                        "category": "datapoint",
                                        "id": "item_amount",
                                        "type": "number",
                                        "label": "Amount"
                                    }
                                ]
                            }
                        }
                    ]
                }
            ],
            "metadata": {},
            "modified_by": "https://us.api.rossum.ai/v1/users/99999",
            "modified_at": "2025-11-25T10:00:00.000000Z"
        }))
        .unwrap()
    }

    fn flat_schema(children: JsonValue) -> Schema {
        serde_json::from_value(json!({
            "id": 1,
            "content": [{"category": "section", "id": "section1", "children": children}]
        }))
        .unwrap()
    }

    #[test]
    fn test_datapoint_defaults() {
        let dp: Datapoint =
            serde_json::from_value(json!({"id": "test_field", "type": "string"})).unwrap();

        assert_eq!(dp, Datapoint::new("test_field", Some(DatapointType::String)));
        assert_eq!(dp.category, "datapoint");
        assert!(!dp.disable_prediction);
        assert!(!dp.hidden);
        assert!(dp.can_export);
    }

    #[test]
    fn test_unknown_datapoint_type_fails() {
        let result: Result<Datapoint, _> =
            serde_json::from_value(json!({"id": "x", "type": "hologram"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_nested_structure() {
        let schema = invoice_schema();

        assert_eq!(schema.id, 123456);
        assert_eq!(schema.content.len(), 2);
        let section = schema.section("line_items_section").unwrap();
        assert_eq!(section.label.as_deref(), Some("Line Items"));

        let SectionChild::Multivalue(multivalue) = &section.children[0] else {
            panic!("expected a multivalue");
        };
        assert_eq!(multivalue.id, "line_items");
        assert_eq!(multivalue.max_occurrences, Some(1000));

        let MultivalueChild::Tuple(tuple) = &multivalue.children else {
            panic!("expected a tuple");
        };
        let ids: Vec<_> = tuple.children.iter().map(|dp| dp.id.as_str()).collect();
        assert_eq!(ids, ["item_description", "item_amount"]);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let schema = invoice_schema();
        let value = serde_json::to_value(&schema).unwrap();

        assert_eq!(value["content"][1]["children"][0]["category"], "multivalue");
        assert_eq!(value["content"][1]["children"][0]["children"]["category"], "tuple");

        let back: Schema = serde_json::from_value(value).unwrap();
        assert_eq!(back, schema);
    }

    #[test]
    fn test_traverse_order() {
        let schema = invoice_schema();
        let ids: Vec<_> = schema.traverse(true).map(|node| node.id()).collect();

        assert_eq!(
            ids,
            [
                "invoice_number",
                "total_amount",
                "line_items",
                "line_item",
                "item_description",
                "item_amount"
            ]
        );
        assert_eq!(schema.traverse(true).filter(|n| n.as_tuple().is_some()).count(), 1);
        assert_eq!(
            schema
                .traverse(true)
                .filter(|n| n.as_multivalue().is_some())
                .count(),
            1
        );
    }

    #[test]
    fn test_traverse_with_button() {
        let schema = flat_schema(json!([
            {"category": "datapoint", "id": "field1", "type": "string"},
            {"category": "datapoint", "id": "button1", "type": "button"},
            {"category": "datapoint", "id": "field2", "type": "number"}
        ]));

        let ids: HashSet<_> = schema.traverse(true).map(|n| n.id()).collect();
        assert_eq!(ids, HashSet::from(["field1", "field2"]));

        let ids: HashSet<_> = schema.traverse(false).map(|n| n.id()).collect();
        assert_eq!(ids, HashSet::from(["field1", "button1", "field2"]));
    }

    #[test]
    fn test_get_by_id() {
        let schema = invoice_schema();

        let node = schema.get_by_id("invoice_number", true).unwrap();
        assert_eq!(
            node.as_datapoint().unwrap().datapoint_type,
            Some(DatapointType::String)
        );
        assert!(schema.get_by_id("line_items", true).unwrap().as_multivalue().is_some());
        assert!(schema.get_by_id("line_item", true).unwrap().as_tuple().is_some());
        assert!(schema.get_by_id("non_existent_id", true).is_none());
        // Sections are not nodes of the traversal
        assert!(schema.get_by_id("invoice_section", true).is_none());
    }

    #[test]
    fn test_get_by_id_with_button() {
        let schema = flat_schema(json!([
            {"category": "datapoint", "id": "field1", "type": "string"},
            {"category": "datapoint", "id": "button1", "type": "button"}
        ]));

        assert!(schema.get_by_id("button1", true).is_none());
        assert_eq!(schema.get_by_id("button1", false).unwrap().id(), "button1");
    }

    #[test]
    fn test_formula_and_reasoning_fields() {
        let schema = flat_schema(json!([
            {"category": "datapoint", "id": "total", "type": "formula", "formula": "1 + 1"},
            {"category": "datapoint", "id": "vendor", "type": "string"},
            {"category": "datapoint", "id": "summary", "type": "reasoning", "prompt": "Summarize"},
            {
                "category": "multivalue",
                "id": "taxes",
                "children": {"category": "datapoint", "id": "tax", "type": "formula"}
            }
        ]));

        let formulas: Vec<_> = schema.formula_fields(true).map(|dp| dp.id.as_str()).collect();
        assert_eq!(formulas, ["total", "tax"]);

        let reasoning: Vec<_> = schema.reasoning_fields(true).map(|dp| dp.id.as_str()).collect();
        assert_eq!(reasoning, ["summary"]);
    }

    #[test]
    fn test_unknown_category_preserved_and_skipped() {
        let schema = flat_schema(json!([
            {"category": "datapoint", "id": "field1", "type": "string"},
            {"category": "hologram", "id": "strange"}
        ]));

        let section = &schema.content[0];
        assert_eq!(
            section.children[1],
            SectionChild::Unknown(json!({"category": "hologram", "id": "strange"}))
        );
        let ids: Vec<_> = schema.traverse(true).map(|n| n.id()).collect();
        assert_eq!(ids, ["field1"]);

        let value = serde_json::to_value(&schema).unwrap();
        assert_eq!(value["content"][0]["children"][1]["category"], "hologram");
    }

    #[test]
    fn test_invalid_known_child_fails() {
        let result: Result<Schema, _> = serde_json::from_value(json!({
            "id": 1,
            "content": [{"id": "s", "children": [{"category": "datapoint", "type": "string"}]}]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_parent_of() {
        let schema = invoice_schema();

        assert_eq!(
            schema.parent_of("invoice_number").map(|p| p.id()),
            Some("invoice_section")
        );
        assert!(matches!(
            schema.parent_of("line_items"),
            Some(ParentRef::Section(s)) if s.id == "line_items_section"
        ));
        assert!(matches!(
            schema.parent_of("line_item"),
            Some(ParentRef::Multivalue(mv)) if mv.id == "line_items"
        ));
        assert!(matches!(
            schema.parent_of("item_amount"),
            Some(ParentRef::Tuple(t)) if t.id == "line_item"
        ));
        assert!(schema.parent_of("invoice_section").is_none());
        assert!(schema.parent_of("missing").is_none());
    }
}
