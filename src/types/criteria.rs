use serde::{Deserialize, Serialize};

/// Field the model sets when the README says the repository is deprecated.
pub const DEPRECATED_FIELD: &str = "isDeprecated";
/// Field the model fills with services mentioned in the README.
pub const SERVICES_FIELD: &str = "serviceNames";

pub const RESERVED_FIELDS: [&str; 2] = [DEPRECATED_FIELD, SERVICES_FIELD];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CriterionKind {
    Boolean,
    Integer,
    String,
}

/// A criterion the model answers from the README.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CriterionSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CriterionKind,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub weight: f64,
    pub minimum: Option<i64>,
    pub maximum: Option<i64>,
}

impl CriterionSpec {
    /// Only boolean and integer answers are ranked; string answers are narrative.
    pub fn is_ranked(&self) -> bool {
        !matches!(self.kind, CriterionKind::String)
    }
}

/// A criterion read straight off the repository metadata.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RepoCriterion {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub data_field: String,
    #[serde(default)]
    pub weight: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parses_from_lowercase_type_key() {
        let spec: CriterionSpec = toml::from_str(
            r#"
name = "docsQuality"
type = "integer"
description = "How complete the docs are"
weight = 0.5
minimum = 1
maximum = 5
"#,
        )
        .expect("spec should parse");
        assert_eq!(spec.kind, CriterionKind::Integer);
        assert_eq!(spec.minimum, Some(1));
        assert!(spec.is_ranked());
    }

    #[test]
    fn string_kind_is_not_ranked() {
        let spec: CriterionSpec = toml::from_str(
            r#"
name = "summary"
type = "string"
"#,
        )
        .expect("spec should parse");
        assert!(!spec.is_ranked());
        assert_eq!(spec.weight, 0.0);
    }
}
