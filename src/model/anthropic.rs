//! Anthropic Messages API client that forces a single tool call.

use super::{ModelClient, TOOL_DESCRIPTION, TOOL_NAME};
use crate::error::{RankError, Result};
use crate::extract::AnswerMap;
use crate::schema::Schema;
use crate::types::config::ModelConfig;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

const API_VERSION: &str = "2023-06-01";

pub struct AnthropicClient {
    endpoint: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    stop_reason: Option<String>,
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    ToolUse {
        name: String,
        #[serde(default)]
        input: Value,
    },
    #[serde(other)]
    Other,
}

impl AnthropicClient {
    pub fn new(config: &ModelConfig, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            api_key: api_key.into(),
            model: config.id.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            client: reqwest::Client::new(),
        }
    }

    /// Reads the API key from the environment variable the config names.
    pub fn from_env(config: &ModelConfig) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| RankError::MissingCredential(config.api_key_env.clone()))?;
        Ok(Self::new(config, api_key))
    }

    fn request_body(
        &self,
        schema: &Schema,
        system_prompt: &str,
        user_prompt: &str,
        document: &[u8],
    ) -> Value {
        json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "temperature": self.temperature,
            "system": system_prompt,
            "messages": [{
                "role": "user",
                "content": [
                    { "type": "text", "text": user_prompt },
                    {
                        "type": "document",
                        "title": "README",
                        "source": {
                            "type": "text",
                            "media_type": "text/plain",
                            "data": String::from_utf8_lossy(document),
                        }
                    }
                ]
            }],
            "tools": [{
                "name": TOOL_NAME,
                "description": TOOL_DESCRIPTION,
                "input_schema": schema.to_json(),
            }],
            "tool_choice": { "type": "tool", "name": TOOL_NAME },
        })
    }
}

#[async_trait]
impl ModelClient for AnthropicClient {
    async fn invoke(
        &self,
        schema: &Schema,
        system_prompt: &str,
        user_prompt: &str,
        document: &[u8],
    ) -> Result<AnswerMap> {
        let body = self.request_body(schema, system_prompt, user_prompt, document);
        let response = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| RankError::Invocation(format!("{}: {}", self.model, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(RankError::Invocation(format!(
                "{} returned {}: {}",
                self.model, status, text
            )));
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| RankError::Invocation(format!("{}: {}", self.model, e)))?;
        debug!(stop_reason = ?parsed.stop_reason, "model replied");
        tool_answer(parsed)
    }
}

fn tool_answer(response: MessagesResponse) -> Result<AnswerMap> {
    let stop_reason = response.stop_reason.unwrap_or_else(|| "none".to_string());
    if stop_reason != "tool_use" {
        return Err(RankError::ToolNotUsed(stop_reason));
    }
    response
        .content
        .into_iter()
        .find_map(|block| match block {
            ContentBlock::ToolUse { name, input } if name == TOOL_NAME => {
                Some(AnswerMap::from_json(&input))
            }
            _ => None,
        })
        .ok_or(RankError::ToolNotUsed(stop_reason))
}
