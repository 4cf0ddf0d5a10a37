//! Distinct-value ranking across the whole entity set.
//!
//! For each criterion name the participants are the entities that carry it.
//! Their values are deduplicated and sorted ascending; each participant gets
//! `rank = (participants / distinct) * index_of_its_value`. Entities are then
//! ordered by the weighted sum of their ranks, highest first, ties keeping
//! input order.

use crate::types::entity::Entity;
use std::cmp::Ordering;
use tracing::{debug, warn};

pub fn rank(mut entities: Vec<Entity>) -> Vec<Entity> {
    for name in criterion_names(&entities) {
        rank_criterion(&mut entities, &name);
    }

    let mut scored: Vec<(f64, Entity)> = entities
        .into_iter()
        .map(|entity| (entity.total_score(), entity))
        .collect();
    scored.sort_by(|(a, _), (b, _)| b.partial_cmp(a).unwrap_or(Ordering::Equal));
    scored.into_iter().map(|(_, entity)| entity).collect()
}

/// Union of criterion names, in first-seen order.
pub fn criterion_names(entities: &[Entity]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for entity in entities {
        for criterion in &entity.criteria {
            if !names.iter().any(|name| name == &criterion.name) {
                names.push(criterion.name.clone());
            }
        }
    }
    names
}

fn rank_criterion(entities: &mut [Entity], name: &str) {
    let mut distinct: Vec<i64> = entities
        .iter()
        .filter_map(|entity| entity.criterion(name).map(|criterion| criterion.value))
        .collect();
    let participants = distinct.len();
    distinct.sort_unstable();
    distinct.dedup();

    if distinct.is_empty() {
        warn!("criterion '{}' has no observed values; skipping", name);
        return;
    }
    debug!(
        participants,
        distinct = distinct.len(),
        "ranking criterion {}",
        name
    );

    for criterion in entities
        .iter_mut()
        .filter_map(|entity| entity.criterion_mut(name))
    {
        criterion.set_distinct_rank(&distinct, participants);
    }
}
