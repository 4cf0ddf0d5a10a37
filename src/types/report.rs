use crate::types::entity::Entity;
use serde::Serialize;

/// Counters describing how the listed repositories were disposed of.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub total_found: usize,
    pub stale: usize,
    pub ignored: usize,
    pub language_mismatch: usize,
    pub missing_readme: usize,
    pub model_failed: usize,
    pub deprecated: usize,
    pub ranked: usize,
    pub by_language: Vec<LanguageCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageCount {
    pub language: String,
    pub count: usize,
}

/// Ranked entities in final order plus the run's counters.
#[derive(Debug, Clone)]
pub struct RankedRun {
    pub entities: Vec<Entity>,
    pub summary: RunSummary,
}
