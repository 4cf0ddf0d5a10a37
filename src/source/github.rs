//! GitHub REST client for organization listings and READMEs.

use super::{to_snake_case, RepoRecord, RepositorySource};
use crate::error::{RankError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{RequestBuilder, StatusCode};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

const PAGE_SIZE: usize = 100;
const USER_AGENT: &str = concat!("reporank/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct GithubSource {
    api_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl GithubSource {
    pub fn new(api_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: token.filter(|token| !token.trim().is_empty()),
            client: reqwest::Client::new(),
        }
    }

    fn get(&self, url: &str, accept: &str) -> RequestBuilder {
        let request = self
            .client
            .get(url)
            .header("User-Agent", USER_AGENT)
            .header("Accept", accept)
            .header("X-GitHub-Api-Version", "2022-11-28");
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl RepositorySource for GithubSource {
    async fn list_repositories(&self, org: &str) -> Result<Vec<RepoRecord>> {
        let mut records = Vec::new();
        let mut page = 1;
        loop {
            let url = format!(
                "{}/orgs/{}/repos?per_page={PAGE_SIZE}&page={page}",
                self.api_url, org
            );
            debug!("Fetching repository page {} from {}", page, url);

            let response = self.get(&url, "application/vnd.github+json").send().await?;
            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                return Err(RankError::Listing(format!("{org}: GitHub API {status}: {body}")));
            }

            let listing: Vec<Value> = response.json().await?;
            let count = listing.len();
            records.extend(listing.iter().filter_map(record_from_json));
            if count < PAGE_SIZE {
                break;
            }
            page += 1;
        }
        Ok(records)
    }

    async fn get_readme(&self, repo: &RepoRecord) -> Result<Vec<u8>> {
        let url = format!("{}/repositories/{}/readme", self.api_url, repo.id);
        let response = self.get(&url, "application/vnd.github.raw").send().await?;
        match response.status() {
            status if status.is_success() => Ok(response.bytes().await?.to_vec()),
            StatusCode::NOT_FOUND => Err(RankError::ReadmeNotFound(repo.name.clone())),
            status => Err(RankError::ReadmeNotFound(format!("{} ({status})", repo.name))),
        }
    }
}

/// Entries without an id or name are skipped.
pub(crate) fn record_from_json(value: &Value) -> Option<RepoRecord> {
    let object = value.as_object()?;
    let id = object.get("id")?.as_u64()?;
    let name = object.get("name")?.as_str()?.to_string();

    let fields: BTreeMap<String, i64> = object
        .iter()
        .filter_map(|(key, value)| value.as_i64().map(|int| (to_snake_case(key), int)))
        .collect();

    let text = |key: &str| {
        object
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
    };

    Some(RepoRecord {
        id,
        url: text("html_url").unwrap_or_default(),
        language: text("language"),
        pushed_at: text("pushed_at")
            .and_then(|raw| DateTime::parse_from_rfc3339(&raw).ok())
            .map(|stamp| stamp.with_timezone(&Utc)),
        description: text("description"),
        open_issues_count: fields.get("open_issues_count").copied().unwrap_or(0),
        name,
        fields,
    })
}
