pub mod filter;
pub mod github;

use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Repository metadata as listed by the source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RepoRecord {
    pub id: u64,
    pub name: String,
    pub language: Option<String>,
    pub url: String,
    pub pushed_at: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub open_issues_count: i64,
    /// Every integer-valued field of the listing, keyed by snake_case name.
    pub fields: BTreeMap<String, i64>,
}

impl RepoRecord {
    /// Looks a numeric field up by name; `StargazersCount` and
    /// `stargazers_count` resolve to the same field.
    pub fn numeric_field(&self, name: &str) -> Option<i64> {
        self.fields.get(&to_snake_case(name)).copied()
    }
}

#[async_trait]
pub trait RepositorySource: Send + Sync {
    async fn list_repositories(&self, org: &str) -> Result<Vec<RepoRecord>>;
    async fn get_readme(&self, repo: &RepoRecord) -> Result<Vec<u8>>;
}

pub(crate) fn to_snake_case(name: &str) -> String {
    let mut snake = String::with_capacity(name.len() + 4);
    let mut previous_lower = false;
    for ch in name.trim().chars() {
        if ch.is_ascii_uppercase() {
            if previous_lower {
                snake.push('_');
            }
            snake.push(ch.to_ascii_lowercase());
            previous_lower = false;
        } else if ch == '-' || ch == ' ' {
            snake.push('_');
            previous_lower = false;
        } else {
            snake.push(ch);
            previous_lower = ch.is_ascii_lowercase() || ch.is_ascii_digit();
        }
    }
    snake
}
