//! Application view model: loaded catalogue, current selection, search text
//! and the static menu, driven through the injected data and list services.

use std::sync::Arc;

use shared::domain::{Job, MenuItem, Processor, Stream, Topic};
use tracing::{debug, info};

use crate::{
    error::{ClientError, SelectionError},
    list::ListService,
    search::{filter_job_positions, filter_jobs, MatchPolicy},
    services::DataServices,
    settings::Settings,
};

pub const APP_PATH: &str = "TITLE";

/// How the caller identifies the job to select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectJobRequest {
    ByIndex(usize),
    ByReference(Job),
    ByName(String),
}

pub struct AppController {
    version: String,
    app_path: String,
    jobs: Vec<Job>,
    topics: Vec<Topic>,
    processors: Vec<Processor>,
    // Indices into `jobs`, the selected job's `streams` and `processors`.
    selected_job: Option<usize>,
    selected_stream: Option<usize>,
    selected_processor: Option<usize>,
    expand_jobs: bool,
    new_job_template: Job,
    menu_items: Vec<MenuItem>,
    search_text: String,
    match_policy: MatchPolicy,
    services: DataServices,
    list: Arc<dyn ListService>,
}

impl AppController {
    /// Controller with nothing loaded yet.
    pub fn new(services: DataServices, list: Arc<dyn ListService>, settings: &Settings) -> Self {
        Self {
            version: settings.version.clone(),
            app_path: APP_PATH.to_string(),
            jobs: Vec::new(),
            topics: Vec::new(),
            processors: Vec::new(),
            selected_job: None,
            selected_stream: None,
            selected_processor: None,
            expand_jobs: true,
            new_job_template: Job::new_template(),
            menu_items: MenuItem::defaults(),
            search_text: String::new(),
            match_policy: settings.match_policy,
            services,
            list,
        }
    }

    /// Builds the controller and performs the initial fetch. The first job,
    /// if any, ends up selected.
    pub async fn load(
        services: DataServices,
        list: Arc<dyn ListService>,
        settings: &Settings,
    ) -> Result<Self, ClientError> {
        let mut controller = Self::new(services, list, settings);
        controller.refresh().await?;
        Ok(controller)
    }

    /// Re-queries every data service. On failure the previously loaded state
    /// is left untouched.
    ///
    /// The selected job is kept when a job of the same name is still present,
    /// otherwise the first job is selected.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        let (jobs, topics, processors) = futures::try_join!(
            self.services.jobs.query(),
            self.services.topics.query(),
            self.services.processors.query(),
        )?;

        let previous_job = self.selected_job().map(|job| job.name.clone());
        let previous_stream = self.selected_stream().map(|stream| stream.name.clone());
        let previous_processor = self.selected_processor().map(|p| p.name.clone());

        info!(
            jobs = jobs.len(),
            topics = topics.len(),
            processors = processors.len(),
            "catalogue loaded"
        );
        self.jobs = jobs;
        self.topics = topics;
        self.processors = processors;

        self.selected_job = previous_job
            .as_deref()
            .and_then(|name| self.position_of(name))
            .or(if self.jobs.is_empty() { None } else { Some(0) });
        self.selected_stream = self.selected_job.and_then(|index| {
            let streams = &self.jobs[index].streams;
            previous_stream
                .as_deref()
                .and_then(|name| streams.iter().position(|s| s.name == name))
                .or(if streams.is_empty() { None } else { Some(0) })
        });
        self.selected_processor = previous_processor
            .as_deref()
            .and_then(|name| self.processors.iter().position(|p| p.name == name));

        Ok(())
    }

    /// Selects a job and, when it has any, its first stream. A job without
    /// streams leaves no stream selected. Unresolvable requests leave the
    /// selection as it was.
    pub fn select_job(&mut self, request: SelectJobRequest) -> Result<&Job, SelectionError> {
        let index = match request {
            SelectJobRequest::ByIndex(index) => {
                if index >= self.jobs.len() {
                    return Err(SelectionError::IndexOutOfRange {
                        index,
                        len: self.jobs.len(),
                    });
                }
                index
            }
            SelectJobRequest::ByReference(job) => self
                .jobs
                .iter()
                .position(|candidate| *candidate == job)
                .ok_or(SelectionError::UnknownJob(job.name))?,
            SelectJobRequest::ByName(name) => self
                .position_of(&name)
                .ok_or(SelectionError::UnknownJob(name))?,
        };

        let job = &self.jobs[index];
        self.selected_job = Some(index);
        self.selected_stream = if job.streams.is_empty() { None } else { Some(0) };
        debug!(job = %job.name, streams = job.streams.len(), "selected job");
        Ok(job)
    }

    pub fn select_stream(&mut self, index: usize) -> Result<&Stream, SelectionError> {
        let job_index = self.selected_job.ok_or(SelectionError::NoJobSelected)?;
        let job = &self.jobs[job_index];
        if index >= job.streams.len() {
            return Err(SelectionError::StreamOutOfRange {
                job: job.name.clone(),
                index,
                len: job.streams.len(),
            });
        }
        self.selected_stream = Some(index);
        Ok(&job.streams[index])
    }

    pub fn select_processor(&mut self, name: &str) -> Result<&Processor, SelectionError> {
        let index = self
            .processors
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| SelectionError::UnknownProcessor(name.to_string()))?;
        self.selected_processor = Some(index);
        Ok(&self.processors[index])
    }

    /// Jobs matching `query` under the configured match policy; all jobs for
    /// an empty query.
    pub fn query_search(&self, query: &str) -> Vec<&Job> {
        filter_jobs(&self.jobs, query, self.match_policy)
    }

    /// Search hits with the index `SelectJobRequest::ByIndex` expects.
    pub fn query_search_positions(&self, query: &str) -> Vec<(usize, &Job)> {
        filter_job_positions(&self.jobs, query, self.match_policy)
    }

    pub fn add_job(&self) {
        debug!("add job not implemented");
    }

    pub fn search_text_change(&mut self, text: &str) {
        info!(text, "search text changed");
        self.search_text = text.to_string();
    }

    /// Autocomplete pick. `None` means the field was cleared.
    pub fn selected_item_change(&mut self, job: Option<Job>) -> Result<(), SelectionError> {
        match job {
            Some(job) => self.select_job(SelectJobRequest::ByReference(job)).map(|_| ()),
            None => Ok(()),
        }
    }

    pub fn toggle_list(&self) {
        self.list.toggle();
    }

    pub fn close_list(&self) {
        self.list.close();
    }

    pub fn is_list_open(&self) -> bool {
        self.list.is_open()
    }

    pub fn selected_job(&self) -> Option<&Job> {
        self.selected_job.map(|index| &self.jobs[index])
    }

    pub fn selected_stream(&self) -> Option<&Stream> {
        let job = self.selected_job()?;
        self.selected_stream.and_then(|index| job.streams.get(index))
    }

    pub fn selected_processor(&self) -> Option<&Processor> {
        self.selected_processor.map(|index| &self.processors[index])
    }

    pub fn set_match_policy(&mut self, policy: MatchPolicy) {
        self.match_policy = policy;
    }

    pub fn match_policy(&self) -> MatchPolicy {
        self.match_policy
    }

    pub fn set_expand_jobs(&mut self, expand: bool) {
        self.expand_jobs = expand;
    }

    pub fn expand_jobs(&self) -> bool {
        self.expand_jobs
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn app_path(&self) -> &str {
        &self.app_path
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn processors(&self) -> &[Processor] {
        &self.processors
    }

    pub fn menu_items(&self) -> &[MenuItem] {
        &self.menu_items
    }

    pub fn new_job_template(&self) -> &Job {
        &self.new_job_template
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    fn position_of(&self, name: &str) -> Option<usize> {
        self.jobs.iter().position(|job| job.name == name)
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
