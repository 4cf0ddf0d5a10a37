//! Turns the model's untyped tool answer into typed criterion values.

use crate::types::criteria::{CriterionKind, CriterionSpec, DEPRECATED_FIELD, SERVICES_FIELD};
use crate::types::entity::CriterionValue;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub enum AnswerValue {
    Bool(bool),
    Int(i64),
    Str(String),
    List(Vec<String>),
    Null,
    /// Anything else (floats, objects) kept in its JSON text form.
    Other(String),
}

impl AnswerValue {
    fn coerce_to_string(&self) -> Option<String> {
        match self {
            AnswerValue::Bool(value) => Some(value.to_string()),
            AnswerValue::Int(value) => Some(value.to_string()),
            AnswerValue::Str(value) => Some(value.clone()),
            AnswerValue::List(values) => Some(values.join(",")),
            AnswerValue::Null => None,
            AnswerValue::Other(text) => Some(text.clone()),
        }
    }
}

impl From<&serde_json::Value> for AnswerValue {
    fn from(value: &serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => AnswerValue::Null,
            Value::Bool(flag) => AnswerValue::Bool(*flag),
            Value::Number(number) => match number.as_i64() {
                Some(int) => AnswerValue::Int(int),
                None => AnswerValue::Other(number.to_string()),
            },
            Value::String(text) => AnswerValue::Str(text.clone()),
            Value::Array(items) => AnswerValue::List(
                items
                    .iter()
                    .map(|item| match item {
                        Value::String(text) => text.clone(),
                        other => other.to_string(),
                    })
                    .collect(),
            ),
            Value::Object(_) => AnswerValue::Other(value.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnswerMap {
    fields: HashMap<String, AnswerValue>,
}

impl AnswerMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: AnswerValue) {
        self.fields.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&AnswerValue> {
        self.fields.get(key)
    }

    /// Non-object JSON yields an empty map; extraction then falls back to defaults.
    pub fn from_json(value: &serde_json::Value) -> Self {
        let mut answer = Self::new();
        if let Some(object) = value.as_object() {
            for (key, value) in object {
                answer.insert(key.clone(), AnswerValue::from(value));
            }
        }
        answer
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedResult {
    pub deprecated: bool,
    pub services: Vec<String>,
    pub criteria: Vec<CriterionValue>,
    pub free_text_summary: Option<String>,
}

/// Never fails: missing criteria are skipped and wrongly typed ones become 0.
pub fn extract(answer: &AnswerMap, specs: &[CriterionSpec]) -> ExtractedResult {
    let deprecated = matches!(answer.get(DEPRECATED_FIELD), Some(AnswerValue::Bool(true)));
    let services = match answer.get(SERVICES_FIELD) {
        Some(AnswerValue::List(values)) => values.clone(),
        _ => Vec::new(),
    };

    let mut result = ExtractedResult {
        deprecated,
        services,
        criteria: Vec::new(),
        free_text_summary: None,
    };

    for spec in specs {
        let Some(value) = answer.get(&spec.name) else {
            continue;
        };
        match spec.kind {
            CriterionKind::Boolean => {
                let flag = matches!(value, AnswerValue::Bool(true));
                result.criteria.push(CriterionValue::new(
                    &spec.name,
                    &spec.description,
                    spec.weight,
                    i64::from(flag),
                ));
            }
            CriterionKind::Integer => {
                let int = match value {
                    AnswerValue::Int(int) => *int,
                    _ => 0,
                };
                result.criteria.push(CriterionValue::new(
                    &spec.name,
                    &spec.description,
                    spec.weight,
                    int,
                ));
            }
            CriterionKind::String => {
                if let Some(text) = value.coerce_to_string() {
                    result.free_text_summary = Some(text);
                }
            }
        }
    }

    result
}
