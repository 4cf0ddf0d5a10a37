pub mod csv;
pub mod json;
pub mod md;
pub mod table;

use crate::error::RankError;
use crate::types::report::{RankedRun, RunSummary};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Csv,
    Json,
    Md,
}

pub fn render(run: &RankedRun, format: OutputFormat) -> Result<String, RankError> {
    match format {
        OutputFormat::Csv => Ok(csv::to_csv(&table::build(&run.entities))),
        OutputFormat::Json => json::to_json(run).map_err(RankError::Json),
        OutputFormat::Md => Ok(md::to_markdown(run)),
    }
}

/// Plain-text run summary printed after the report is written.
pub fn summary_text(summary: &RunSummary) -> String {
    let mut output = String::new();
    output.push_str(&format!("***Found {} total repos.\n", summary.total_found));
    output.push_str(&format!(
        "***Rejected {} repos not updated within the included years.\n",
        summary.stale
    ));
    output.push_str(&format!(
        "***Rejected {} repos on the ignore list.\n",
        summary.ignored
    ));
    output.push_str(&format!(
        "***Rejected {} repos that do not use an included language.\n",
        summary.language_mismatch
    ));
    output.push_str(&format!(
        "***Rejected {} repos that do not have a README.\n",
        summary.missing_readme
    ));
    output.push_str(&format!(
        "***Rejected {} repos without a usable model answer.\n",
        summary.model_failed
    ));
    output.push_str(&format!(
        "***Rejected {} repos marked as deprecated.\n",
        summary.deprecated
    ));
    output.push_str(&format!("\tTotal repositories ranked: {}\n", summary.ranked));
    for entry in &summary.by_language {
        output.push_str(&format!(
            "\t\t{}: {} repos found.\n",
            entry.language, entry.count
        ));
    }
    output
}
