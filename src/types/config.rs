use crate::error::RankError;
use crate::report::OutputFormat;
use crate::types::criteria::{CriterionKind, CriterionSpec, RepoCriterion, RESERVED_FIELDS};
use serde::Deserialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub search: SearchOptions,
    #[serde(default)]
    pub repo_criteria: Vec<RepoCriterion>,
    #[serde(default)]
    pub genai_criteria: Vec<CriterionSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_model_id")]
    pub id: String,
    #[serde(default = "default_model_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default)]
    pub temperature: f32,
    #[serde(default = "default_system_text")]
    pub system_text: String,
    #[serde(default = "default_content_text")]
    pub content_text: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            id: default_model_id(),
            endpoint: default_model_endpoint(),
            api_key_env: default_api_key_env(),
            max_tokens: default_max_tokens(),
            temperature: 0.0,
            system_text: default_system_text(),
            content_text: default_content_text(),
        }
    }
}

fn default_model_id() -> String {
    "claude-3-5-sonnet-latest".to_string()
}

fn default_model_endpoint() -> String {
    "https://api.anthropic.com/v1/messages".to_string()
}

fn default_api_key_env() -> String {
    "ANTHROPIC_API_KEY".to_string()
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_system_text() -> String {
    "You review software repositories and answer only through the provided tool.".to_string()
}

fn default_content_text() -> String {
    "Summarize the attached README using the summarize_repository tool.".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: String,
    #[serde(default = "default_output_format")]
    pub format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            format: default_output_format(),
        }
    }
}

fn default_output_path() -> String {
    "repo_rankings.csv".to_string()
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Csv
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchOptions {
    #[serde(default = "default_years_included")]
    pub years_included: u32,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub ignore_repos: Vec<String>,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            years_included: default_years_included(),
            languages: Vec::new(),
            ignore_repos: Vec::new(),
            api_url: default_api_url(),
            max_concurrency: default_max_concurrency(),
            request_delay_ms: default_request_delay_ms(),
        }
    }
}

fn default_years_included() -> u32 {
    1
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_max_concurrency() -> usize {
    8
}

fn default_request_delay_ms() -> u64 {
    200
}

impl SearchConfig {
    pub fn validate(&self) -> Result<(), RankError> {
        if self.search.years_included == 0 {
            return Err(RankError::ConfigParse(
                "search.years_included must be greater than 0".to_string(),
            ));
        }
        if self.search.max_concurrency == 0 {
            return Err(RankError::ConfigParse(
                "search.max_concurrency must be greater than 0".to_string(),
            ));
        }
        if self.output.path.trim().is_empty() {
            return Err(RankError::ConfigParse(
                "output.path must not be empty".to_string(),
            ));
        }

        validate_genai_criteria(&self.genai_criteria)?;
        validate_repo_criteria(&self.repo_criteria)?;
        Ok(())
    }
}

fn validate_genai_criteria(criteria: &[CriterionSpec]) -> Result<(), RankError> {
    let mut seen = HashSet::<&str>::new();
    for spec in criteria {
        let name = spec.name.trim();
        if name.is_empty() {
            return Err(RankError::InvalidCriteria(
                "genai_criteria entries must have a non-empty name".to_string(),
            ));
        }
        if RESERVED_FIELDS.contains(&name) {
            return Err(RankError::InvalidCriteria(format!(
                "genai_criteria name '{name}' is reserved"
            )));
        }
        if !seen.insert(name) {
            return Err(RankError::InvalidCriteria(format!(
                "genai_criteria contains duplicate name: {name}"
            )));
        }
        if !spec.weight.is_finite() {
            return Err(RankError::InvalidCriteria(format!(
                "genai_criteria '{name}' weight must be a finite number"
            )));
        }
        if spec.kind == CriterionKind::Integer {
            match (spec.minimum, spec.maximum) {
                (Some(minimum), Some(maximum)) if minimum <= maximum => {}
                (Some(minimum), Some(maximum)) => {
                    return Err(RankError::InvalidCriteria(format!(
                        "genai_criteria '{name}' minimum ({minimum}) exceeds maximum ({maximum})"
                    )));
                }
                _ => {
                    return Err(RankError::InvalidCriteria(format!(
                        "genai_criteria '{name}' is an integer and needs both minimum and maximum"
                    )));
                }
            }
        }
    }
    Ok(())
}

fn validate_repo_criteria(criteria: &[RepoCriterion]) -> Result<(), RankError> {
    let mut seen = HashSet::<&str>::new();
    for criterion in criteria {
        let name = criterion.name.trim();
        if name.is_empty() {
            return Err(RankError::InvalidCriteria(
                "repo_criteria entries must have a non-empty name".to_string(),
            ));
        }
        if !seen.insert(name) {
            return Err(RankError::InvalidCriteria(format!(
                "repo_criteria contains duplicate name: {name}"
            )));
        }
        if criterion.data_field.trim().is_empty() {
            return Err(RankError::InvalidCriteria(format!(
                "repo_criteria '{name}' needs a data_field"
            )));
        }
        if !criterion.weight.is_finite() {
            return Err(RankError::InvalidCriteria(format!(
                "repo_criteria '{name}' weight must be a finite number"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_config_uses_defaults() {
        let cfg: SearchConfig = toml::from_str("").expect("empty config should parse");
        assert_eq!(cfg.search.years_included, 1);
        assert_eq!(cfg.search.max_concurrency, 8);
        assert_eq!(cfg.model.max_tokens, 2000);
        assert_eq!(cfg.output.format, OutputFormat::Csv);
        assert!(cfg.genai_criteria.is_empty());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
[model]
id = "claude-3-haiku"
system_text = "be brief"

[output]
path = "out.json"
format = "json"

[search]
years_included = 2
languages = ["Rust", "Go"]
ignore_repos = ["sandbox"]

[[repo_criteria]]
name = "stars"
description = "Stargazers"
data_field = "stargazers_count"
weight = 0.4

[[genai_criteria]]
name = "hasTests"
type = "boolean"
description = "README mentions tests"
weight = 0.2

[[genai_criteria]]
name = "docsQuality"
type = "integer"
weight = 0.3
minimum = 1
maximum = 5
"#;
        let cfg: SearchConfig = toml::from_str(toml_str).expect("full config should parse");
        assert_eq!(cfg.model.id, "claude-3-haiku");
        assert_eq!(cfg.output.format, OutputFormat::Json);
        assert_eq!(cfg.search.languages, vec!["Rust".to_string(), "Go".to_string()]);
        assert_eq!(cfg.repo_criteria[0].data_field, "stargazers_count");
        assert_eq!(cfg.genai_criteria.len(), 2);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_inverted_integer_bounds() {
        let cfg: SearchConfig = toml::from_str(
            r#"
[[genai_criteria]]
name = "docsQuality"
type = "integer"
minimum = 5
maximum = 1
"#,
        )
        .expect("config should parse");
        let err = cfg.validate().expect_err("validation should fail");
        assert!(err.to_string().contains("exceeds maximum"));
    }

    #[test]
    fn validate_rejects_integer_without_bounds() {
        let cfg: SearchConfig = toml::from_str(
            r#"
[[genai_criteria]]
name = "docsQuality"
type = "integer"
minimum = 1
"#,
        )
        .expect("config should parse");
        let err = cfg.validate().expect_err("validation should fail");
        assert!(err.to_string().contains("needs both minimum and maximum"));
    }

    #[test]
    fn validate_rejects_duplicate_genai_names() {
        let cfg: SearchConfig = toml::from_str(
            r#"
[[genai_criteria]]
name = "hasTests"
type = "boolean"

[[genai_criteria]]
name = "hasTests"
type = "boolean"
"#,
        )
        .expect("config should parse");
        let err = cfg.validate().expect_err("validation should fail");
        assert!(err.to_string().contains("duplicate name: hasTests"));
    }

    #[test]
    fn validate_rejects_reserved_names() {
        let cfg: SearchConfig = toml::from_str(
            r#"
[[genai_criteria]]
name = "isDeprecated"
type = "boolean"
"#,
        )
        .expect("config should parse");
        let err = cfg.validate().expect_err("validation should fail");
        assert!(err.to_string().contains("reserved"));
    }

    #[test]
    fn validate_rejects_duplicate_repo_names_and_missing_field() {
        let duplicate: SearchConfig = toml::from_str(
            r#"
[[repo_criteria]]
name = "stars"
data_field = "stargazers_count"

[[repo_criteria]]
name = "stars"
data_field = "forks_count"
"#,
        )
        .expect("config should parse");
        assert!(duplicate.validate().is_err());

        let blank_field: SearchConfig = toml::from_str(
            r#"
[[repo_criteria]]
name = "stars"
data_field = " "
"#,
        )
        .expect("config should parse");
        let err = blank_field.validate().expect_err("validation should fail");
        assert!(err.to_string().contains("needs a data_field"));
    }

    #[test]
    fn validate_rejects_zero_concurrency() {
        let cfg: SearchConfig = toml::from_str(
            r#"
[search]
max_concurrency = 0
"#,
        )
        .expect("config should parse");
        let err = cfg.validate().expect_err("validation should fail");
        assert!(err.to_string().contains("max_concurrency"));
    }
}
