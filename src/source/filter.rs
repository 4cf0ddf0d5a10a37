use super::RepoRecord;
use crate::types::config::SearchOptions;
use chrono::{Months, NaiveDate};
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct FilterOutcome {
    /// Admitted repositories, most recently pushed first.
    pub admitted: Vec<RepoRecord>,
    pub stale: usize,
    pub ignored: usize,
    pub language_mismatch: usize,
}

pub fn cutoff_date(today: NaiveDate, years_included: u32) -> NaiveDate {
    today
        .checked_sub_months(Months::new(years_included.saturating_mul(12)))
        .unwrap_or(NaiveDate::MIN)
}

pub fn filter_repositories(
    mut repos: Vec<RepoRecord>,
    options: &SearchOptions,
    today: NaiveDate,
) -> FilterOutcome {
    repos.sort_by(|a, b| b.pushed_at.cmp(&a.pushed_at));
    let cutoff = cutoff_date(today, options.years_included);

    let mut outcome = FilterOutcome::default();
    for repo in repos {
        let fresh = repo
            .pushed_at
            .map(|pushed| pushed.date_naive() > cutoff)
            .unwrap_or(false);
        if !fresh {
            debug!(repo = %repo.name, "not pushed after {cutoff}");
            outcome.stale += 1;
            continue;
        }
        if options.ignore_repos.iter().any(|name| name == &repo.name) {
            debug!(repo = %repo.name, "on the ignore list");
            outcome.ignored += 1;
            continue;
        }
        if !language_admitted(repo.language.as_deref(), &options.languages) {
            debug!(repo = %repo.name, language = ?repo.language, "language not included");
            outcome.language_mismatch += 1;
            continue;
        }
        outcome.admitted.push(repo);
    }
    outcome
}

fn language_admitted(language: Option<&str>, languages: &[String]) -> bool {
    if languages.is_empty() {
        return true;
    }
    match language {
        Some(language) => languages.iter().any(|included| included == language),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn repo(name: &str, language: Option<&str>, pushed: Option<(i32, u32, u32)>) -> RepoRecord {
        RepoRecord {
            name: name.to_string(),
            language: language.map(str::to_string),
            pushed_at: pushed.map(|(y, m, d)| {
                Utc.with_ymd_and_hms(y, m, d, 12, 0, 0)
                    .single()
                    .expect("valid timestamp")
            }),
            ..RepoRecord::default()
        }
    }

    fn options() -> SearchOptions {
        SearchOptions {
            years_included: 1,
            languages: vec!["Rust".to_string(), "Go".to_string()],
            ignore_repos: vec!["sandbox".to_string()],
            ..SearchOptions::default()
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).expect("valid date")
    }

    #[test]
    fn cutoff_subtracts_whole_years() {
        assert_eq!(
            cutoff_date(today(), 2),
            NaiveDate::from_ymd_opt(2024, 10, 16).expect("valid date")
        );
    }

    #[test]
    fn rejects_stale_ignored_and_other_languages() {
        let outcome = filter_repositories(
            vec![
                repo("old", Some("Rust"), Some((2024, 1, 1))),
                repo("never-pushed", Some("Rust"), None),
                repo("on-cutoff", Some("Rust"), Some((2025, 10, 16))),
                repo("sandbox", Some("Rust"), Some((2026, 9, 1))),
                repo("python-tool", Some("Python"), Some((2026, 9, 1))),
                repo("no-language", None, Some((2026, 9, 1))),
                repo("keeper", Some("Go"), Some((2026, 3, 1))),
            ],
            &options(),
            today(),
        );

        assert_eq!(outcome.stale, 3);
        assert_eq!(outcome.ignored, 1);
        assert_eq!(outcome.language_mismatch, 2);
        assert_eq!(outcome.admitted.len(), 1);
        assert_eq!(outcome.admitted[0].name, "keeper");
    }

    #[test]
    fn admitted_are_ordered_by_most_recent_push() {
        let outcome = filter_repositories(
            vec![
                repo("march", Some("Rust"), Some((2026, 3, 1))),
                repo("september", Some("Rust"), Some((2026, 9, 1))),
                repo("june", Some("Go"), Some((2026, 6, 1))),
            ],
            &options(),
            today(),
        );
        let names: Vec<&str> = outcome.admitted.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["september", "june", "march"]);
    }

    #[test]
    fn empty_language_list_admits_everything_fresh() {
        let mut options = options();
        options.languages.clear();
        let outcome = filter_repositories(
            vec![repo("no-language", None, Some((2026, 9, 1)))],
            &options,
            today(),
        );
        assert_eq!(outcome.admitted.len(), 1);
        assert_eq!(outcome.language_mismatch, 0);
    }
}
