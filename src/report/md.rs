use super::table::{build, format_score, Table};
use crate::types::report::RankedRun;

pub fn to_markdown(run: &RankedRun) -> String {
    let summary = &run.summary;
    let mut output = String::new();
    output.push_str("# Repository Ranking\n\n");
    output.push_str("## Summary\n\n");
    output.push_str(&format!(
        "- found: {}\n- stale: {}\n- ignored: {}\n- language mismatch: {}\n- missing README: {}\n- model failures: {}\n- deprecated: {}\n- ranked: {}\n\n",
        summary.total_found,
        summary.stale,
        summary.ignored,
        summary.language_mismatch,
        summary.missing_readme,
        summary.model_failed,
        summary.deprecated,
        summary.ranked
    ));

    output.push_str("## Ranking\n\n");
    if run.entities.is_empty() {
        output.push_str("- none\n");
        return output;
    }

    output.push_str("| # | Repository | Language | Score | Services |\n");
    output.push_str("|---|---|---|---|---|\n");
    for (index, entity) in run.entities.iter().enumerate() {
        output.push_str(&format!(
            "| {} | [{}]({}) | {} | {} | {} |\n",
            index + 1,
            escape_cell(&entity.name),
            entity.url,
            entity.language.as_deref().unwrap_or("-"),
            format_score(entity.total_score()),
            escape_cell(&entity.service_names.join(", "))
        ));
    }

    output.push_str("\n## Criteria\n\n");
    output.push_str(&table_markdown(&build(&run.entities)));
    output
}

fn table_markdown(table: &Table) -> String {
    let mut output = String::new();
    output.push_str(&format!("| {} |\n", table.header.join(" | ")));
    output.push_str(&format!("|{}\n", "---|".repeat(table.header.len())));
    for row in &table.rows {
        let cells: Vec<String> = row.iter().map(|cell| escape_cell(cell)).collect();
        output.push_str(&format!("| {} |\n", cells.join(" | ")));
    }
    output
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
