//! Merges metadata criteria and model-derived criteria into one entity.

use crate::extract::ExtractedResult;
use crate::source::RepoRecord;
use crate::types::criteria::RepoCriterion;
use crate::types::entity::{CriterionValue, Entity};
use tracing::{debug, warn};

/// Criteria read from repository fields. Fields that are absent or not
/// integers produce no value.
pub fn metadata_criteria(repo: &RepoRecord, criteria: &[RepoCriterion]) -> Vec<CriterionValue> {
    criteria
        .iter()
        .filter_map(|criterion| match repo.numeric_field(&criterion.data_field) {
            Some(value) => Some(CriterionValue::new(
                &criterion.name,
                &criterion.description,
                criterion.weight,
                value,
            )),
            None => {
                debug!(
                    repo = %repo.name,
                    field = %criterion.data_field,
                    "no integer field for repo criterion {}",
                    criterion.name
                );
                None
            }
        })
        .collect()
}

/// Metadata criteria go in first; a model criterion with a name already
/// taken is dropped with a warning.
pub fn aggregate(
    repo: &RepoRecord,
    metadata: Vec<CriterionValue>,
    extracted: ExtractedResult,
) -> Entity {
    let mut entity = Entity {
        name: repo.name.clone(),
        url: repo.url.clone(),
        language: repo.language.clone(),
        last_modified: repo.pushed_at.map(|pushed| pushed.date_naive()),
        summary: repo.description.clone(),
        open_issues_count: repo.open_issues_count,
        generated_summary: extracted.free_text_summary,
        service_names: extracted.services,
        is_deprecated: extracted.deprecated,
        criteria: Vec::with_capacity(metadata.len() + extracted.criteria.len()),
    };

    for criterion in metadata.into_iter().chain(extracted.criteria) {
        let name = criterion.name.clone();
        if !entity.add_criterion(criterion) {
            warn!(
                repo = %entity.name,
                "criterion '{}' defined by both repo and model criteria; keeping the first",
                name
            );
        }
    }
    entity
}
