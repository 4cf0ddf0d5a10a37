use crate::types::entity::CriterionValue;
use crate::types::report::{RankedRun, RunSummary};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: &'a RunSummary,
    repositories: Vec<JsonEntity<'a>>,
}

#[derive(Serialize)]
struct JsonEntity<'a> {
    position: usize,
    name: &'a str,
    url: &'a str,
    language: Option<&'a str>,
    summary: Option<&'a str>,
    generated_summary: Option<&'a str>,
    last_modified: Option<NaiveDate>,
    service_names: &'a [String],
    open_issues_count: i64,
    criteria: Vec<JsonCriterion<'a>>,
    total_score: f64,
}

#[derive(Serialize)]
struct JsonCriterion<'a> {
    #[serde(flatten)]
    criterion: &'a CriterionValue,
    weighted_rank: f64,
}

pub fn to_json(run: &RankedRun) -> Result<String, serde_json::Error> {
    let repositories = run
        .entities
        .iter()
        .enumerate()
        .map(|(index, entity)| JsonEntity {
            position: index + 1,
            name: &entity.name,
            url: &entity.url,
            language: entity.language.as_deref(),
            summary: entity.summary.as_deref(),
            generated_summary: entity.generated_summary.as_deref(),
            last_modified: entity.last_modified,
            service_names: &entity.service_names,
            open_issues_count: entity.open_issues_count,
            criteria: entity
                .criteria
                .iter()
                .map(|criterion| JsonCriterion {
                    criterion,
                    weighted_rank: criterion.weighted_contribution(),
                })
                .collect(),
            total_score: entity.total_score(),
        })
        .collect();

    serde_json::to_string_pretty(&JsonReport {
        summary: &run.summary,
        repositories,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::entity::test_entity;

    #[test]
    fn json_report_contains_summary_and_scores() {
        let mut stars = CriterionValue::new("stars", "Stargazers", 0.5, 10);
        stars.rank = 4;
        let run = RankedRun {
            entities: vec![test_entity("widget", vec![stars])],
            summary: RunSummary {
                total_found: 1,
                ranked: 1,
                ..RunSummary::default()
            },
        };

        let rendered = to_json(&run).expect("json should serialize");
        let value: serde_json::Value = serde_json::from_str(&rendered).expect("valid json");
        assert_eq!(value["summary"]["ranked"], 1);
        assert_eq!(value["repositories"][0]["position"], 1);
        assert_eq!(value["repositories"][0]["name"], "widget");
        assert_eq!(value["repositories"][0]["total_score"], 2.0);
        assert_eq!(value["repositories"][0]["criteria"][0]["rank"], 4);
        assert_eq!(value["repositories"][0]["criteria"][0]["weighted_rank"], 2.0);
        assert_eq!(value["repositories"][0]["last_modified"], "2026-09-01");
    }
}
