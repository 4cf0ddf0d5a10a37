//! Tool input schema handed to the model so its answer comes back typed.

use crate::types::criteria::{CriterionKind, CriterionSpec, DEPRECATED_FIELD, SERVICES_FIELD};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SchemaNode {
    Object {
        properties: BTreeMap<String, SchemaNode>,
        required: Vec<String>,
    },
    Array {
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        items: Box<SchemaNode>,
    },
    String {
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    Boolean {
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    Integer {
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        minimum: Option<i64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        maximum: Option<i64>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    root: SchemaNode,
}

impl Schema {
    pub fn required(&self) -> &[String] {
        match &self.root {
            SchemaNode::Object { required, .. } => required,
            _ => &[],
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.root).unwrap_or(serde_json::Value::Null)
    }
}

pub fn build_schema(specs: &[CriterionSpec]) -> Schema {
    let mut properties = BTreeMap::new();
    properties.insert(
        DEPRECATED_FIELD.to_string(),
        SchemaNode::Boolean {
            description: Some("Indicates if this repository mentions being deprecated.".to_string()),
        },
    );
    properties.insert(
        SERVICES_FIELD.to_string(),
        SchemaNode::Array {
            description: Some("An array of services mentioned in the README.".to_string()),
            items: Box::new(SchemaNode::String { description: None }),
        },
    );

    let mut required = Vec::with_capacity(specs.len() + 2);
    for spec in specs {
        properties.insert(spec.name.clone(), criterion_node(spec));
        required.push(spec.name.clone());
    }
    required.push(DEPRECATED_FIELD.to_string());
    required.push(SERVICES_FIELD.to_string());

    Schema {
        root: SchemaNode::Object {
            properties,
            required,
        },
    }
}

fn criterion_node(spec: &CriterionSpec) -> SchemaNode {
    let description = Some(spec.description.clone()).filter(|text| !text.is_empty());
    match spec.kind {
        CriterionKind::Boolean => SchemaNode::Boolean { description },
        CriterionKind::String => SchemaNode::String { description },
        CriterionKind::Integer => SchemaNode::Integer {
            description,
            minimum: spec.minimum,
            maximum: spec.maximum,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn property<'a>(schema: &'a Schema, name: &str) -> Option<&'a SchemaNode> {
        match &schema.root {
            SchemaNode::Object { properties, .. } => properties.get(name),
            _ => None,
        }
    }

    fn spec(name: &str, kind: CriterionKind) -> CriterionSpec {
        CriterionSpec {
            name: name.to_string(),
            kind,
            description: format!("{name} description"),
            weight: 1.0,
            minimum: matches!(kind, CriterionKind::Integer).then_some(1),
            maximum: matches!(kind, CriterionKind::Integer).then_some(5),
        }
    }

    #[test]
    fn required_lists_every_criterion_then_fixed_fields() {
        let schema = build_schema(&[
            spec("hasTests", CriterionKind::Boolean),
            spec("docsQuality", CriterionKind::Integer),
            spec("summary", CriterionKind::String),
        ]);
        assert_eq!(
            schema.required(),
            ["hasTests", "docsQuality", "summary", "isDeprecated", "serviceNames"]
        );
    }

    #[test]
    fn integer_properties_carry_bounds() {
        let schema = build_schema(&[spec("docsQuality", CriterionKind::Integer)]);
        assert_eq!(
            property(&schema, "docsQuality"),
            Some(&SchemaNode::Integer {
                description: Some("docsQuality description".to_string()),
                minimum: Some(1),
                maximum: Some(5),
            })
        );
    }

    #[test]
    fn empty_spec_list_still_has_fixed_fields() {
        let schema = build_schema(&[]);
        assert_eq!(schema.required(), ["isDeprecated", "serviceNames"]);
        assert!(matches!(
            property(&schema, "serviceNames"),
            Some(SchemaNode::Array { .. })
        ));
    }

    #[test]
    fn json_form_is_tagged_by_type() {
        let schema = build_schema(&[spec("docsQuality", CriterionKind::Integer)]);
        let json = schema.to_json();
        assert_eq!(json["type"], "object");
        assert_eq!(json["properties"]["docsQuality"]["type"], "integer");
        assert_eq!(json["properties"]["docsQuality"]["minimum"], 1);
        assert_eq!(json["properties"]["docsQuality"]["maximum"], 5);
        assert_eq!(json["properties"]["serviceNames"]["items"]["type"], "string");
        assert_eq!(json["properties"]["isDeprecated"]["type"], "boolean");
        assert!(json["properties"]["isDeprecated"].get("minimum").is_none());
    }

    #[test]
    fn building_twice_is_identical() {
        let specs = [
            spec("hasTests", CriterionKind::Boolean),
            spec("docsQuality", CriterionKind::Integer),
        ];
        assert_eq!(build_schema(&specs), build_schema(&specs));
    }
}
