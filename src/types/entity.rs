use chrono::NaiveDate;
use serde::Serialize;

/// One entity's observed value for a criterion, plus the rank assigned to it
/// by the ranking pass. `rank` stays 0 until that pass runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriterionValue {
    pub name: String,
    pub description: String,
    pub weight: f64,
    pub value: i64,
    pub rank: i64,
}

impl CriterionValue {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        weight: f64,
        value: i64,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            weight,
            value,
            rank: 0,
        }
    }

    pub fn weighted_contribution(&self) -> f64 {
        self.rank as f64 * self.weight
    }

    /// `distinct_sorted` must be the ascending, deduplicated values of every
    /// participant; `participants` counts duplicates.
    pub fn set_distinct_rank(&mut self, distinct_sorted: &[i64], participants: usize) {
        let Ok(index) = distinct_sorted.binary_search(&self.value) else {
            self.rank = 0;
            return;
        };
        let avg = (participants / distinct_sorted.len()) as i64;
        self.rank = avg * index as i64;
    }
}

/// A repository under evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    pub name: String,
    pub url: String,
    pub language: Option<String>,
    pub last_modified: Option<NaiveDate>,
    pub summary: Option<String>,
    pub open_issues_count: i64,
    pub generated_summary: Option<String>,
    pub service_names: Vec<String>,
    pub is_deprecated: bool,
    pub criteria: Vec<CriterionValue>,
}

impl Entity {
    pub fn criterion(&self, name: &str) -> Option<&CriterionValue> {
        self.criteria.iter().find(|criterion| criterion.name == name)
    }

    pub fn criterion_mut(&mut self, name: &str) -> Option<&mut CriterionValue> {
        self.criteria.iter_mut().find(|criterion| criterion.name == name)
    }

    /// Adds the criterion unless one with the same name is already present.
    /// Returns false when the name was taken.
    pub fn add_criterion(&mut self, criterion: CriterionValue) -> bool {
        if self.criterion(&criterion.name).is_some() {
            return false;
        }
        self.criteria.push(criterion);
        true
    }

    /// Always derived from the current ranks, never cached.
    pub fn total_score(&self) -> f64 {
        self.criteria
            .iter()
            .map(CriterionValue::weighted_contribution)
            .sum()
    }
}

#[cfg(test)]
pub(crate) fn test_entity(name: &str, criteria: Vec<CriterionValue>) -> Entity {
    Entity {
        name: name.to_string(),
        url: format!("https://github.com/acme/{name}"),
        language: Some("Rust".to_string()),
        last_modified: NaiveDate::from_ymd_opt(2026, 9, 1),
        summary: None,
        open_issues_count: 0,
        generated_summary: None,
        service_names: Vec::new(),
        is_deprecated: false,
        criteria,
    }
}
