//! GitHub provider using the GitHub REST API
//!
//! Resolves repo queries (`repo,owner,name,property`) against three
//! read-only endpoints: repository metadata, the release list, and traffic
//! views. Requires the `GITHUB_TOKEN` environment variable.
//!
//! Each distinct resource path is fetched at most once per run; the parsed
//! response (or the failure reason) is memoized for the lifetime of the
//! provider instance.

use super::{Provider, ProviderError, Resolution};
use crate::placeholder::{ApiGroup, PropertyProfile, RepoProperty, RepoQuery};
use anyhow::{Context, Result};
use async_trait::async_trait;
use dashmap::DashMap;
use serde::Deserialize;
use std::sync::Arc;

/// GitHub REST API root
const GITHUB_API_URL: &str = "https://api.github.com";

/// Environment variable holding the bearer token
const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Pinned REST API version
const API_VERSION: &str = "2022-11-28";

/// One remote resource, identified by its path under the API root.
///
/// The path doubles as the memoization key: placeholders that map to the
/// same path share one fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    Metadata { owner: String, repo: String },
    Releases { owner: String, repo: String },
    TrafficViews { owner: String, repo: String },
}

impl Resource {
    pub fn path(&self) -> String {
        match self {
            Resource::Metadata { owner, repo } => format!("repos/{owner}/{repo}"),
            Resource::Releases { owner, repo } => format!("repos/{owner}/{repo}/releases"),
            Resource::TrafficViews { owner, repo } => {
                format!("repos/{owner}/{repo}/traffic/views")
            }
        }
    }
}

/// Parsed response payload for one resource.
#[derive(Debug, Clone)]
pub enum ResourceData {
    Repo(RepoMetadata),
    Releases(Vec<Release>),
    Traffic(TrafficViews),
}

/// Transport seam between the provider and the network.
///
/// Production uses [`HttpFetcher`]; tests substitute a recording fake to
/// assert fetch counts and simulate API failures.
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    async fn fetch(&self, resource: &Resource) -> Result<ResourceData>;
}

/// Memoized fetch outcome. Failures are cached exactly like successes so a
/// broken resource is not retried within the run.
#[derive(Debug)]
enum FetchOutcome {
    Success(ResourceData),
    Failed(String),
}

/// GitHub provider
pub struct GitHubProvider {
    fetcher: Box<dyn ResourceFetcher>,
    /// Resource-path keyed cache, scoped to this instance (one invocation)
    cache: DashMap<String, Arc<FetchOutcome>>,
    profile: PropertyProfile,
}

impl GitHubProvider {
    /// Create a provider backed by the real API.
    ///
    /// Reads `GITHUB_TOKEN` from the environment.
    pub fn from_env(profile: PropertyProfile) -> Result<Self, ProviderError> {
        let token = std::env::var(TOKEN_ENV).map_err(|_| {
            ProviderError::Credentials(format!("{TOKEN_ENV} environment variable not set"))
        })?;

        Ok(Self::with_fetcher(Box::new(HttpFetcher::new(token)), profile))
    }

    /// Create with a specific fetcher (used by tests)
    pub fn with_fetcher(fetcher: Box<dyn ResourceFetcher>, profile: PropertyProfile) -> Self {
        Self {
            fetcher,
            cache: DashMap::new(),
            profile,
        }
    }

    /// Fetch a resource through the cache.
    async fn fetch_cached(&self, resource: &Resource) -> Arc<FetchOutcome> {
        let key = resource.path();

        if let Some(cached) = self.cache.get(&key) {
            tracing::debug!(resource = %key, "resource cache hit");
            return Arc::clone(&cached);
        }

        let outcome = match self.fetcher.fetch(resource).await {
            Ok(data) => FetchOutcome::Success(data),
            Err(err) => {
                tracing::error!(resource = %key, error = %err, "resource fetch failed");
                FetchOutcome::Failed(format!("{err:#}"))
            }
        };

        let outcome = Arc::new(outcome);
        self.cache.insert(key, Arc::clone(&outcome));
        outcome
    }

    /// Map a property to the resource that carries it.
    fn resource_for(property: RepoProperty, owner: &str, repo: &str) -> Resource {
        let owner = owner.to_string();
        let repo = repo.to_string();
        match property {
            RepoProperty::Description
            | RepoProperty::Language
            | RepoProperty::Stars
            | RepoProperty::Forks
            | RepoProperty::Watchers => Resource::Metadata { owner, repo },
            RepoProperty::Downloads => Resource::Releases { owner, repo },
            RepoProperty::UniqueVisitors | RepoProperty::TotalViews => {
                Resource::TrafficViews { owner, repo }
            }
        }
    }

    /// Pull one property out of a fetched resource.
    fn extract(data: &ResourceData, property: RepoProperty) -> Resolution {
        let value = match (data, property) {
            (ResourceData::Repo(repo), RepoProperty::Description) => {
                repo.description.clone().unwrap_or_default()
            }
            (ResourceData::Repo(repo), RepoProperty::Language) => {
                repo.language.clone().unwrap_or_default()
            }
            (ResourceData::Repo(repo), RepoProperty::Stars) => repo.stargazers_count.to_string(),
            (ResourceData::Repo(repo), RepoProperty::Forks) => repo.forks_count.to_string(),
            (ResourceData::Repo(repo), RepoProperty::Watchers) => {
                repo.subscribers_count.to_string()
            }
            (ResourceData::Releases(releases), RepoProperty::Downloads) => {
                download_total(releases).to_string()
            }
            (ResourceData::Traffic(traffic), RepoProperty::UniqueVisitors) => {
                traffic.uniques.to_string()
            }
            (ResourceData::Traffic(traffic), RepoProperty::TotalViews) => {
                traffic.count.to_string()
            }
            // resource_for keeps data and property aligned
            _ => return Resolution::Unavailable("resource/property mismatch".to_string()),
        };
        Resolution::Value(value)
    }
}

/// Sum asset downloads across all non-draft releases.
fn download_total(releases: &[Release]) -> u64 {
    releases
        .iter()
        .filter(|release| !release.draft)
        .flat_map(|release| &release.assets)
        .map(|asset| asset.download_count)
        .sum()
}

#[async_trait]
impl Provider for GitHubProvider {
    fn name(&self) -> &str {
        "github"
    }

    async fn resolve(&self, param: &str) -> Resolution {
        let Some(query) = RepoQuery::parse(param) else {
            return Resolution::Unavailable(format!("Invalid repo query: {param}"));
        };

        if ApiGroup::parse(query.api).is_none() {
            return Resolution::Unavailable(format!("Unknown api: {}", query.api));
        }

        let property = match RepoProperty::parse(query.property) {
            Some(property) if self.profile.supports(property) => property,
            _ => return Resolution::Unavailable(format!("Unknown property: {}", query.property)),
        };

        let resource = Self::resource_for(property, query.owner, query.repo);
        match &*self.fetch_cached(&resource).await {
            FetchOutcome::Success(data) => Self::extract(data, property),
            FetchOutcome::Failed(reason) => Resolution::Unavailable(reason.clone()),
        }
    }
}

// ============================================================================
// HTTP TRANSPORT
// ============================================================================

/// Production fetcher backed by reqwest.
pub struct HttpFetcher {
    client: reqwest::Client,
    token: String,
    base_url: String,
}

impl HttpFetcher {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            token: token.into(),
            base_url: GITHUB_API_URL.to_string(),
        }
    }

    /// Point at a different API root (used by tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path);

        tracing::debug!(url = %url, "sending request to GitHub API");

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
            .header("User-Agent", "gitfill")
            .send()
            .await
            .context("Failed to send request to GitHub API")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("GitHub API error ({status}): {error_text}");
        }

        response
            .json()
            .await
            .context("Failed to parse GitHub API response")
    }
}

#[async_trait]
impl ResourceFetcher for HttpFetcher {
    async fn fetch(&self, resource: &Resource) -> Result<ResourceData> {
        let path = resource.path();
        match resource {
            Resource::Metadata { .. } => Ok(ResourceData::Repo(self.get_json(&path).await?)),
            Resource::Releases { .. } => Ok(ResourceData::Releases(self.get_json(&path).await?)),
            Resource::TrafficViews { .. } => {
                Ok(ResourceData::Traffic(self.get_json(&path).await?))
            }
        }
    }
}

// ============================================================================
// API TYPES
// ============================================================================

/// Subset of `GET repos/{owner}/{repo}` the templates can reference
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RepoMetadata {
    pub description: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub subscribers_count: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Release {
    #[serde(default)]
    pub draft: bool,
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseAsset {
    #[serde(default)]
    pub download_count: u64,
}

/// `GET repos/{owner}/{repo}/traffic/views` totals (trailing 14 days)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrafficViews {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub uniques: u64,
}

// ============================================================================
// TESTS
// ============================================================================
