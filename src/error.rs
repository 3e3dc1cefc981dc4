//! Error types with fix suggestions

use thiserror::Error;

use crate::provider::ProviderError;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

/// Fatal errors that abort a render before any output is written.
///
/// Per-placeholder failures never show up here: those degrade to
/// `N/A:` substitutions and the run completes.
#[derive(Error, Debug)]
pub enum GitfillError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Credentials error: {0}")]
    Credentials(String),

    #[error("Template error: {0}")]
    Template(String),
}

impl From<ProviderError> for GitfillError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Credentials(msg) => GitfillError::Credentials(msg),
            other => GitfillError::Template(other.to_string()),
        }
    }
}

impl FixSuggestion for GitfillError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            GitfillError::Io(_) => Some("Check file path and permissions"),
            GitfillError::Credentials(_) => {
                Some("Set GITHUB_TOKEN in the environment or a .env file")
            }
            GitfillError::Template(_) => Some("Check placeholder syntax: {{service:params}}"),
        }
    }
}
