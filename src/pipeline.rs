//! End-to-end run: list, filter, score each repository concurrently, then rank.

use crate::aggregate::{aggregate, metadata_criteria};
use crate::error::Result;
use crate::extract::extract;
use crate::model::ModelClient;
use crate::rank::rank;
use crate::schema::{build_schema, Schema};
use crate::source::filter::filter_repositories;
use crate::source::{RepoRecord, RepositorySource};
use crate::types::config::SearchConfig;
use crate::types::entity::Entity;
use crate::types::report::{LanguageCount, RankedRun, RunSummary};
use chrono::NaiveDate;
use futures::future::join_all;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::{info, warn};

#[derive(Debug)]
enum Outcome {
    Scored(Entity),
    MissingReadme,
    ModelFailed,
}

pub struct Pipeline<'a> {
    source: &'a dyn RepositorySource,
    model: &'a dyn ModelClient,
    config: &'a SearchConfig,
    schema: Schema,
    permits: Semaphore,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        source: &'a dyn RepositorySource,
        model: &'a dyn ModelClient,
        config: &'a SearchConfig,
    ) -> Self {
        Self {
            source,
            model,
            config,
            schema: build_schema(&config.genai_criteria),
            permits: Semaphore::new(config.search.max_concurrency.max(1)),
        }
    }

    pub async fn run(&self, org: &str, today: NaiveDate) -> Result<RankedRun> {
        let repos = self.source.list_repositories(org).await?;
        let mut summary = RunSummary {
            total_found: repos.len(),
            ..RunSummary::default()
        };
        info!("found {} repositories in {}", repos.len(), org);

        let filtered = filter_repositories(repos, &self.config.search, today);
        summary.stale = filtered.stale;
        summary.ignored = filtered.ignored;
        summary.language_mismatch = filtered.language_mismatch;

        let outcomes = join_all(filtered.admitted.iter().map(|repo| self.score(repo))).await;

        let mut scored = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            match outcome {
                Outcome::Scored(entity) if entity.is_deprecated => summary.deprecated += 1,
                Outcome::Scored(entity) => scored.push(entity),
                Outcome::MissingReadme => summary.missing_readme += 1,
                Outcome::ModelFailed => summary.model_failed += 1,
            }
        }

        let entities = rank(scored);
        summary.ranked = entities.len();
        summary.by_language = self
            .config
            .search
            .languages
            .iter()
            .map(|language| LanguageCount {
                language: language.clone(),
                count: entities
                    .iter()
                    .filter(|entity| entity.language.as_deref() == Some(language.as_str()))
                    .count(),
            })
            .collect();

        Ok(RankedRun { entities, summary })
    }

    async fn score(&self, repo: &RepoRecord) -> Outcome {
        let Ok(_permit) = self.permits.acquire().await else {
            return Outcome::ModelFailed;
        };

        info!("fetching README for {}", repo.name);
        let readme = match self.source.get_readme(repo).await {
            Ok(readme) => readme,
            Err(e) => {
                warn!("unable to get README for {}: {}", repo.name, e);
                return Outcome::MissingReadme;
            }
        };

        let delay = self.config.search.request_delay_ms;
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }

        info!("requesting model answer for {}", repo.name);
        let answer = match self
            .model
            .invoke(
                &self.schema,
                &self.config.model.system_text,
                &self.config.model.content_text,
                &readme,
            )
            .await
        {
            Ok(answer) => answer,
            Err(e) => {
                warn!("model request failed for {}: {}", repo.name, e);
                return Outcome::ModelFailed;
            }
        };

        let extracted = extract(&answer, &self.config.genai_criteria);
        let metadata = metadata_criteria(repo, &self.config.repo_criteria);
        Outcome::Scored(aggregate(repo, metadata, extracted))
    }
}
