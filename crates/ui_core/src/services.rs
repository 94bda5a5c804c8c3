use std::{path::Path, sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use shared::{
    domain::{Job, Processor, Topic},
    error::ApiError,
    protocol::{jobs_route, processors_route, topics_route, CatalogSnapshot},
};
use tracing::{debug, warn};
use url::Url;

use crate::{error::ClientError, settings::Settings};

#[async_trait]
pub trait JobsDataService: Send + Sync {
    async fn query(&self) -> Result<Vec<Job>, ClientError>;
}

#[async_trait]
pub trait TopicsDataService: Send + Sync {
    async fn query(&self) -> Result<Vec<Topic>, ClientError>;
}

#[async_trait]
pub trait ProcessorsDataService: Send + Sync {
    async fn query(&self) -> Result<Vec<Processor>, ClientError>;
}

/// The set of data services a controller reads from.
#[derive(Clone)]
pub struct DataServices {
    pub jobs: Arc<dyn JobsDataService>,
    pub topics: Arc<dyn TopicsDataService>,
    pub processors: Arc<dyn ProcessorsDataService>,
}

impl DataServices {
    /// Uses one backend for all three services.
    pub fn from_backend<B>(backend: Arc<B>) -> Self
    where
        B: JobsDataService + TopicsDataService + ProcessorsDataService + 'static,
    {
        Self {
            jobs: backend.clone(),
            topics: backend.clone(),
            processors: backend,
        }
    }
}

pub struct RestDataClient {
    http: Client,
    base_url: Url,
}

impl RestDataClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let base_url = parse_base_url(base_url)?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ClientError::HttpClient)?;
        Ok(Self { http, base_url })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, ClientError> {
        Self::new(&settings.api_base_url, settings.request_timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, route: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(route.trim_start_matches('/'))
            .map_err(|source| ClientError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                source,
            })
    }

    async fn get_json<T: DeserializeOwned>(&self, route: &str) -> Result<T, ClientError> {
        let url = self.endpoint(route)?;
        debug!(%url, "querying data service");

        let transport = |source: reqwest::Error| ClientError::Transport {
            url: url.to_string(),
            source,
        };
        let res = self.http.get(url.clone()).send().await.map_err(transport)?;
        let status = res.status();
        let body = res.bytes().await.map_err(transport)?;

        if !status.is_success() {
            let message = match serde_json::from_slice::<ApiError>(&body) {
                Ok(api_error) => api_error.message,
                Err(_) => String::from_utf8_lossy(&body).trim().to_string(),
            };
            warn!(%url, status = status.as_u16(), %message, "data service request rejected");
            return Err(ClientError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_slice(&body).map_err(|source| ClientError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

/// Base URLs are treated as directories so that routes nest under any path prefix.
fn parse_base_url(raw: &str) -> Result<Url, ClientError> {
    let raw = raw.trim();
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };
    Url::parse(&normalized).map_err(|source| ClientError::InvalidBaseUrl {
        url: raw.to_string(),
        source,
    })
}

#[async_trait]
impl JobsDataService for RestDataClient {
    async fn query(&self) -> Result<Vec<Job>, ClientError> {
        self.get_json(jobs_route()).await
    }
}

#[async_trait]
impl TopicsDataService for RestDataClient {
    async fn query(&self) -> Result<Vec<Topic>, ClientError> {
        self.get_json(topics_route()).await
    }
}

#[async_trait]
impl ProcessorsDataService for RestDataClient {
    async fn query(&self) -> Result<Vec<Processor>, ClientError> {
        self.get_json(processors_route()).await
    }
}

/// In-memory services, typically loaded from a JSON fixture for offline use.
#[derive(Debug, Clone, Default)]
pub struct StaticDataService {
    snapshot: CatalogSnapshot,
}

impl StaticDataService {
    pub fn new(snapshot: CatalogSnapshot) -> Self {
        Self { snapshot }
    }

    pub async fn from_fixture(path: &Path) -> Result<Self, ClientError> {
        let raw = tokio::fs::read(path)
            .await
            .map_err(|source| ClientError::FixtureRead {
                path: path.to_path_buf(),
                source,
            })?;
        let snapshot: CatalogSnapshot =
            serde_json::from_slice(&raw).map_err(|source| ClientError::FixtureParse {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(
            path = %path.display(),
            jobs = snapshot.jobs.len(),
            topics = snapshot.topics.len(),
            processors = snapshot.processors.len(),
            "loaded fixture"
        );
        Ok(Self { snapshot })
    }
}

#[async_trait]
impl JobsDataService for StaticDataService {
    async fn query(&self) -> Result<Vec<Job>, ClientError> {
        Ok(self.snapshot.jobs.clone())
    }
}

#[async_trait]
impl TopicsDataService for StaticDataService {
    async fn query(&self) -> Result<Vec<Topic>, ClientError> {
        Ok(self.snapshot.topics.clone())
    }
}

#[async_trait]
impl ProcessorsDataService for StaticDataService {
    async fn query(&self) -> Result<Vec<Processor>, ClientError> {
        Ok(self.snapshot.processors.clone())
    }
}

#[cfg(test)]
#[path = "tests/services_tests.rs"]
mod tests;
