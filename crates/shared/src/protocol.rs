use serde::{Deserialize, Serialize};

use crate::domain::{Job, Processor, Topic};

pub fn jobs_route() -> &'static str {
    "/jobs"
}

pub fn topics_route() -> &'static str {
    "/topics"
}

pub fn processors_route() -> &'static str {
    "/processors"
}

/// Offline snapshot of everything the data services serve.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub jobs: Vec<Job>,
    #[serde(default)]
    pub topics: Vec<Topic>,
    #[serde(default)]
    pub processors: Vec<Processor>,
}
