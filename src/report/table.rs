//! Flattens ranked entities into the dynamic report columns.

use crate::rank::criterion_names;
use crate::types::entity::Entity;

const IDENTITY_COLUMNS: [&str; 8] = [
    "Name",
    "Url",
    "Language",
    "Summary",
    "GeneratedSummary",
    "Modified",
    "ServiceNames",
    "OpenIssuesCount",
];
pub const TOTAL_COLUMN: &str = "TotalWeightCalc";

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

pub fn build(entities: &[Entity]) -> Table {
    let criteria = criterion_names(entities);

    let mut header: Vec<String> = IDENTITY_COLUMNS.iter().map(|c| c.to_string()).collect();
    for name in &criteria {
        header.push(format!("{name}_Rank"));
        header.push(format!("{name}_Value"));
        header.push(format!("{name}_WeightRank"));
    }
    header.push(TOTAL_COLUMN.to_string());

    let rows = entities
        .iter()
        .map(|entity| {
            let mut row = vec![
                entity.name.clone(),
                entity.url.clone(),
                entity.language.clone().unwrap_or_default(),
                entity.summary.clone().unwrap_or_default(),
                entity.generated_summary.clone().unwrap_or_default(),
                entity
                    .last_modified
                    .map(|date| date.format("%Y-%m-%d").to_string())
                    .unwrap_or_default(),
                entity.service_names.join(","),
                entity.open_issues_count.to_string(),
            ];
            for name in &criteria {
                match entity.criterion(name) {
                    Some(criterion) => {
                        row.push(criterion.rank.to_string());
                        row.push(criterion.value.to_string());
                        row.push(format_score(criterion.weighted_contribution()));
                    }
                    None => row.extend(std::iter::repeat(String::new()).take(3)),
                }
            }
            row.push(format_score(entity.total_score()));
            row
        })
        .collect();

    Table { header, rows }
}

/// Four decimal places at most, trailing zeros trimmed.
pub fn format_score(score: f64) -> String {
    let fixed = format!("{score:.4}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "" | "-0" => "0".to_string(),
        other => other.to_string(),
    }
}
