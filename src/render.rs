//! Renderer: drives extract → resolve → substitute for one document
//!
//! Providers are constructed lazily, on the first placeholder naming their
//! service, and live for exactly one render. Every distinct token resolves
//! once; the substitution set is complete before any text is rewritten.

use crate::error::GitfillError;
use crate::placeholder::{Placeholder, PropertyProfile};
use crate::provider::{create_provider, Provider, ProviderError, Resolution};
use crate::template;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

pub struct Renderer {
    profile: PropertyProfile,
    /// Providers keyed by lowercased service name, scoped to this renderer
    providers: HashMap<String, Box<dyn Provider>>,
}

impl Renderer {
    pub fn new(profile: PropertyProfile) -> Self {
        Self {
            profile,
            providers: HashMap::new(),
        }
    }

    /// Pre-register a provider under its own name (used by tests to swap
    /// the network out)
    pub fn with_provider(mut self, provider: Box<dyn Provider>) -> Self {
        self.providers
            .insert(provider.name().to_ascii_lowercase(), provider);
        self
    }

    /// Render a template into its substituted output.
    ///
    /// Per-placeholder failures degrade to `N/A:` substitutions; the only
    /// hard errors are provider credential failures.
    pub async fn render(&mut self, text: &str) -> Result<String, GitfillError> {
        let tokens = template::extract_placeholders(text);
        tracing::info!(placeholders = tokens.len(), "resolving template");

        let mut values = HashMap::with_capacity(tokens.len());
        for token in tokens {
            let placeholder = Placeholder::parse(token);
            let resolution = self.resolve(&placeholder).await?;

            if let Resolution::Unavailable(reason) = &resolution {
                tracing::warn!(token, reason = %reason, "placeholder unresolved");
            }

            values.insert(token.to_string(), resolution.render());
        }

        Ok(template::substitute(text, &values))
    }

    async fn resolve(&mut self, placeholder: &Placeholder<'_>) -> Result<Resolution, GitfillError> {
        let key = placeholder.service.to_ascii_lowercase();

        let provider = match self.providers.entry(key) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => match create_provider(placeholder.service, self.profile) {
                Ok(provider) => entry.insert(provider),
                Err(ProviderError::Unknown(_)) => {
                    return Ok(Resolution::Unavailable(format!(
                        "Unknown provider: {}",
                        placeholder.service
                    )));
                }
                // A known service that cannot authenticate is fatal
                Err(err @ ProviderError::Credentials(_)) => return Err(err.into()),
            },
        };

        Ok(provider.resolve(placeholder.param).await)
    }
}
