//! gitfill - renders README templates with live GitHub repository stats

pub mod error;
pub mod placeholder;
pub mod provider;
pub mod render;
pub mod template;

pub use error::{FixSuggestion, GitfillError};
pub use placeholder::{ApiGroup, Placeholder, PropertyProfile, RepoProperty, RepoQuery};
pub use provider::{GitHubProvider, MockProvider, Provider, ProviderError, Resolution};
pub use render::Renderer;
