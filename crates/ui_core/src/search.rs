use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use shared::domain::Job;

/// How a search query is compared against job names.
///
/// `LowercaseQuery` lowercases the query but compares it against the job name
/// as stored, so a name with upper-case letters in its prefix never matches.
/// That asymmetry is kept as the default until product decides otherwise;
/// `CaseInsensitive` lowercases both sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    #[default]
    LowercaseQuery,
    CaseInsensitive,
}

impl MatchPolicy {
    pub fn matches(self, query: &str, name: &str) -> bool {
        let query = query.to_lowercase();
        match self {
            Self::LowercaseQuery => name.starts_with(&query),
            Self::CaseInsensitive => name.to_lowercase().starts_with(&query),
        }
    }
}

impl FromStr for MatchPolicy {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "lowercase_query" => Ok(Self::LowercaseQuery),
            "case_insensitive" => Ok(Self::CaseInsensitive),
            other => Err(format!("unknown match policy '{other}'")),
        }
    }
}

impl fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LowercaseQuery => f.write_str("lowercase_query"),
            Self::CaseInsensitive => f.write_str("case_insensitive"),
        }
    }
}

/// Jobs whose name starts with `query`; an empty query keeps every job.
/// Order is preserved.
pub fn filter_jobs<'a>(jobs: &'a [Job], query: &str, policy: MatchPolicy) -> Vec<&'a Job> {
    filter_job_positions(jobs, query, policy)
        .into_iter()
        .map(|(_, job)| job)
        .collect()
}

/// Like [`filter_jobs`], paired with each job's index in `jobs`.
pub fn filter_job_positions<'a>(
    jobs: &'a [Job],
    query: &str,
    policy: MatchPolicy,
) -> Vec<(usize, &'a Job)> {
    jobs.iter()
        .enumerate()
        .filter(|(_, job)| query.is_empty() || policy.matches(query, &job.name))
        .collect()
}

#[cfg(test)]
#[path = "tests/search_tests.rs"]
mod tests;
