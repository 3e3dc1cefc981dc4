//! # Provider Abstraction Layer
//!
//! Trait and implementations for placeholder value providers.
//!
//! ## Overview
//!
//! A provider owns everything behind a service name: parsing its parameter
//! string, fetching remote resources, and turning a query into a
//! [`Resolution`].
//!
//! - [`Provider`] - Core trait for resolving placeholder parameters
//! - [`GitHubProvider`] - Production provider for the GitHub REST API
//! - [`MockProvider`] - Test provider with configurable resolutions
//!
//! ## Creating Providers
//!
//! Use [`create_provider`] to instantiate a provider by service name. The
//! renderer calls it lazily, on the first placeholder naming the service,
//! so templates that never mention GitHub need no credentials.

mod github;
mod mock;

pub use github::{
    GitHubProvider, HttpFetcher, Release, ReleaseAsset, RepoMetadata, Resource, ResourceData,
    ResourceFetcher, TrafficViews,
};
pub use mock::MockProvider;

use crate::placeholder::PropertyProfile;
use async_trait::async_trait;
use thiserror::Error;

/// Outcome of resolving one placeholder.
///
/// Failure reasons stay structured until substitution time; only
/// [`Resolution::render`] applies the `N/A:` sentinel prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A resolved value, inserted verbatim
    Value(String),
    /// The value could not be resolved; carries the reason
    Unavailable(String),
}

impl Resolution {
    /// Textual rendering used by the substitution stage.
    pub fn render(&self) -> String {
        match self {
            Resolution::Value(value) => value.clone(),
            Resolution::Unavailable(reason) => format!("N/A: {reason}"),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Resolution::Value(_))
    }
}

/// Errors raised while constructing a provider.
///
/// An unknown service name degrades to an `N/A:` substitution; a known
/// service that cannot authenticate is fatal to the run.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Unknown provider: {0}")]
    Unknown(String),

    #[error("{0}")]
    Credentials(String),
}

/// Core trait all placeholder providers implement.
///
/// `resolve` never fails: transport and API errors are folded into
/// [`Resolution::Unavailable`] so one broken placeholder cannot abort the
/// rest of the document.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Service name this provider answers for (e.g. "github")
    fn name(&self) -> &str;

    /// Resolve a raw parameter string into a value or a reason.
    async fn resolve(&self, param: &str) -> Resolution;
}

impl std::fmt::Debug for dyn Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Provider").field("name", &self.name()).finish()
    }
}

/// Create a provider instance by service name.
///
/// | Name | Description | Requires |
/// |------|-------------|----------|
/// | `github` | GitHub REST API | `GITHUB_TOKEN` env var |
pub fn create_provider(
    name: &str,
    profile: PropertyProfile,
) -> Result<Box<dyn Provider>, ProviderError> {
    match name.to_lowercase().as_str() {
        "github" => Ok(Box::new(GitHubProvider::from_env(profile)?)),
        other => Err(ProviderError::Unknown(other.to_string())),
    }
}
